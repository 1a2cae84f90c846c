//! Commands built directly (without the facade) and fed to raw connections,
//! the way a caller mixing document commands into a wider pipeline would.
use memjson::MemJson;
use rejson::client::{
    CallContext, ContextClient, ContextConn, DirectClient, DirectConn, ExecuteCommand,
};
use rejson::command::{Command, CommandArg, CommandId};
use rejson::reply::RawReply;
use serde_json::json;

#[test]
fn test_commands_split_into_verb_and_arguments() {
    let cmd = Command::set("user:1", ".", &json!({"name": "Ada"}), &[]).unwrap();
    assert_eq!(cmd.id(), CommandId::Set);

    let (verb, args) = cmd.into_parts();
    assert_eq!(verb, "JSON.SET");
    assert_eq!(args[0], CommandArg::from("user:1"));
    assert_eq!(args[1], CommandArg::from("."));
    assert_eq!(args[2], CommandArg::from(b"{\"name\":\"Ada\"}".to_vec()));
}

#[test]
fn test_raw_dispatch_through_a_direct_conn() {
    let mem = MemJson::new();
    let mut conn = mem.direct();

    let (verb, args) = Command::set("k", ".", &json!([1, 2, 3]), &[])
        .unwrap()
        .into_parts();
    let reply = conn.call(verb, args).unwrap();
    assert_eq!(reply, RawReply::Data(b"OK".to_vec()));

    let (verb, args) = Command::arr_len("k", ".").into_parts();
    assert_eq!(conn.call(verb, args).unwrap(), RawReply::Int(3));

    let (verb, args) = Command::get("k", ".", &[]).unwrap().into_parts();
    assert_eq!(conn.call(verb, args).unwrap(), RawReply::Data(b"[1,2,3]".to_vec()));
}

#[test]
fn test_raw_dispatch_through_a_context_conn() {
    let mem = MemJson::new();
    let mut conn = mem.contextual();
    let ctx = CallContext::background();

    let (verb, args) = Command::set("k", ".", "hi", &[]).unwrap().into_parts();
    let mut full = vec![CommandArg::from(verb)];
    full.extend(args);
    let reply = conn.call(&ctx, full).unwrap();
    assert_eq!(reply, RawReply::Simple("OK".to_string()));
}

#[test]
fn test_adapters_share_one_store() {
    let mem = MemJson::new();
    let mut writer = DirectClient::new(mem.direct());
    let mut reader = ContextClient::new(mem.contextual());

    writer
        .execute(Command::set("shared", ".", &42, &[]).unwrap())
        .unwrap();

    let reply = reader.execute(Command::get("shared", ".", &[]).unwrap()).unwrap();
    assert_eq!(reply, RawReply::Simple("42".to_string()));
}
