//! Per-operation shaping constructors for [`Command`].
//!
//! Each constructor validates the caller's logical arguments and lays them
//! out in the positional order the server parses. Payload values are
//! JSON-encoded here, so a serialization failure aborts the call before it
//! reaches any transport.
use super::{Command, CommandArg, CommandError, CommandId};
use crate::options::{DebugSubcommand, GetOption, SetOption};
use serde::Serialize;

impl Command {
    /// `JSON.SET <key> <path> <json> [NX | XX]`
    pub fn set<T>(
        key: &str,
        path: &str,
        value: &T,
        opts: &[SetOption],
    ) -> Result<Self, CommandError>
    where
        T: Serialize + ?Sized,
    {
        if opts.len() > 1 {
            return Err(CommandError::TooManyOptionals);
        }
        let mut args = vec![
            CommandArg::from(key),
            CommandArg::from(path),
            CommandArg::from(serde_json::to_vec(value)?),
        ];
        if let Some(opt) = opts.first() {
            args.push(CommandArg::from(opt.token()));
        }
        Ok(Self {
            id: CommandId::Set,
            args,
        })
    }

    /// `JSON.GET <key> [INDENT s] [NEWLINE s] [SPACE s] [NOESCAPE] <path>`
    ///
    /// Options precede the path; their order is the caller's.
    pub fn get(key: &str, path: &str, opts: &[GetOption]) -> Result<Self, CommandError> {
        if opts.len() > 4 {
            return Err(CommandError::TooManyOptionals);
        }
        let mut args = vec![CommandArg::from(key)];
        for opt in opts {
            opt.extend_args(&mut args);
        }
        args.push(CommandArg::from(path));
        Ok(Self {
            id: CommandId::Get,
            args,
        })
    }

    /// `JSON.MGET <key> [key ...] <path>`
    pub fn mget(path: &str, keys: &[&str]) -> Result<Self, CommandError> {
        if keys.is_empty() {
            return Err(CommandError::NeedAtLeastOneArg);
        }
        let mut args: Vec<CommandArg> = keys.iter().map(|k| CommandArg::from(*k)).collect();
        args.push(CommandArg::from(path));
        Ok(Self {
            id: CommandId::MGet,
            args,
        })
    }

    /// `JSON.DEL <key> <path>`
    pub fn del(key: &str, path: &str) -> Self {
        Self::key_path(CommandId::Del, key, path)
    }

    /// `JSON.TYPE <key> [path]`
    pub fn type_of(key: &str, path: &str) -> Self {
        Self::key_path(CommandId::Type, key, path)
    }

    /// `JSON.NUMINCRBY <key> <path> <number>`
    pub fn num_incr_by(key: &str, path: &str, number: i64) -> Self {
        Self::key_path_int(CommandId::NumIncrBy, key, path, number)
    }

    /// `JSON.NUMMULTBY <key> <path> <number>`
    pub fn num_mult_by(key: &str, path: &str, number: i64) -> Self {
        Self::key_path_int(CommandId::NumMultBy, key, path, number)
    }

    /// `JSON.STRAPPEND <key> [path] <json-string>`
    ///
    /// `json_string` is already-encoded document text (e.g. `"\"abc\""`) and
    /// is passed through verbatim.
    pub fn str_append(key: &str, path: &str, json_string: &str) -> Self {
        Self {
            id: CommandId::StrAppend,
            args: vec![
                CommandArg::from(key),
                CommandArg::from(path),
                CommandArg::from(json_string),
            ],
        }
    }

    /// `JSON.STRLEN <key> [path]`
    pub fn str_len(key: &str, path: &str) -> Self {
        Self::key_path(CommandId::StrLen, key, path)
    }

    /// `JSON.ARRAPPEND <key> <path> <json> [json ...]`
    pub fn arr_append<T>(key: &str, path: &str, values: &[T]) -> Result<Self, CommandError>
    where
        T: Serialize,
    {
        if values.is_empty() {
            return Err(CommandError::NeedAtLeastOneArg);
        }
        let mut args = vec![CommandArg::from(key), CommandArg::from(path)];
        for value in values {
            args.push(CommandArg::from(serde_json::to_vec(value)?));
        }
        Ok(Self {
            id: CommandId::ArrAppend,
            args,
        })
    }

    /// `JSON.ARRLEN <key> [path]`
    pub fn arr_len(key: &str, path: &str) -> Self {
        Self::key_path(CommandId::ArrLen, key, path)
    }

    /// `JSON.ARRPOP <key> [path [index]]`
    ///
    /// `None` pops the last element; the index argument is then omitted from
    /// the wire entirely.
    pub fn arr_pop(key: &str, path: &str, index: Option<i64>) -> Self {
        let mut args = vec![CommandArg::from(key), CommandArg::from(path)];
        if let Some(index) = index {
            args.push(CommandArg::from(index));
        }
        Self {
            id: CommandId::ArrPop,
            args,
        }
    }

    /// `JSON.ARRINDEX <key> <path> <json-scalar> [start [stop]]`
    ///
    /// `range` supplies 0, 1 (inclusive start) or 2 (start and exclusive
    /// stop) bounds.
    pub fn arr_index<T>(
        key: &str,
        path: &str,
        value: &T,
        range: &[i64],
    ) -> Result<Self, CommandError>
    where
        T: Serialize + ?Sized,
    {
        if range.len() > 2 {
            return Err(CommandError::TooManyOptionals);
        }
        let mut args = vec![
            CommandArg::from(key),
            CommandArg::from(path),
            CommandArg::from(serde_json::to_vec(value)?),
        ];
        for bound in range {
            args.push(CommandArg::from(*bound));
        }
        Ok(Self {
            id: CommandId::ArrIndex,
            args,
        })
    }

    /// `JSON.ARRTRIM <key> <path> <start> <stop>`
    pub fn arr_trim(key: &str, path: &str, start: i64, stop: i64) -> Self {
        Self {
            id: CommandId::ArrTrim,
            args: vec![
                CommandArg::from(key),
                CommandArg::from(path),
                CommandArg::from(start),
                CommandArg::from(stop),
            ],
        }
    }

    /// `JSON.ARRINSERT <key> <path> <index> <json> [json ...]`
    pub fn arr_insert<T>(
        key: &str,
        path: &str,
        index: i64,
        values: &[T],
    ) -> Result<Self, CommandError>
    where
        T: Serialize,
    {
        if values.is_empty() {
            return Err(CommandError::NeedAtLeastOneArg);
        }
        let mut args = vec![
            CommandArg::from(key),
            CommandArg::from(path),
            CommandArg::from(index),
        ];
        for value in values {
            args.push(CommandArg::from(serde_json::to_vec(value)?));
        }
        Ok(Self {
            id: CommandId::ArrInsert,
            args,
        })
    }

    /// `JSON.OBJKEYS <key> [path]`
    pub fn obj_keys(key: &str, path: &str) -> Self {
        Self::key_path(CommandId::ObjKeys, key, path)
    }

    /// `JSON.OBJLEN <key> [path]`
    pub fn obj_len(key: &str, path: &str) -> Self {
        Self::key_path(CommandId::ObjLen, key, path)
    }

    /// `JSON.DEBUG <MEMORY | HELP> <key> [path]`
    pub fn debug(subcommand: DebugSubcommand, key: &str, path: &str) -> Self {
        Self {
            id: CommandId::Debug,
            args: vec![
                CommandArg::from(subcommand.token()),
                CommandArg::from(key),
                CommandArg::from(path),
            ],
        }
    }

    /// `JSON.FORGET <key> [path]` - an alias for `JSON.DEL`.
    pub fn forget(key: &str, path: &str) -> Self {
        Self::key_path(CommandId::Forget, key, path)
    }

    /// `JSON.RESP <key> [path]`
    pub fn resp(key: &str, path: &str) -> Self {
        Self::key_path(CommandId::Resp, key, path)
    }

    fn key_path(id: CommandId, key: &str, path: &str) -> Self {
        Self {
            id,
            args: vec![CommandArg::from(key), CommandArg::from(path)],
        }
    }

    fn key_path_int(id: CommandId, key: &str, path: &str, number: i64) -> Self {
        Self {
            id,
            args: vec![
                CommandArg::from(key),
                CommandArg::from(path),
                CommandArg::from(number),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn str_arg(s: &str) -> CommandArg {
        CommandArg::from(s)
    }

    fn json_arg(text: &str) -> CommandArg {
        CommandArg::from(text.as_bytes().to_vec())
    }

    #[test]
    fn set_emits_key_path_payload() {
        let cmd = Command::set("k", ".", "hello", &[]).unwrap();
        assert_eq!(cmd.verb(), "JSON.SET");
        assert_eq!(
            cmd.args(),
            &[str_arg("k"), str_arg("."), json_arg("\"hello\"")]
        );
    }

    #[test]
    fn set_appends_the_option_token() {
        let cmd = Command::set("k", ".", &5, &[SetOption::Nx]).unwrap();
        assert_eq!(
            cmd.args(),
            &[str_arg("k"), str_arg("."), json_arg("5"), str_arg("NX")]
        );
    }

    #[test]
    fn set_rejects_two_options() {
        let err = Command::set("k", ".", &5, &[SetOption::Nx, SetOption::Xx]).unwrap_err();
        assert_eq!(err.to_string(), "too many optional arguments");
    }

    #[test]
    fn set_payload_round_trips_through_the_document_format() {
        let value = serde_json::json!({"name": "Ada", "tags": ["a", "b"], "n": 3});
        let cmd = Command::set("k", ".", &value, &[]).unwrap();
        let payload = cmd.args()[2].as_bytes().unwrap();
        let decoded: serde_json::Value = serde_json::from_slice(payload).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn get_without_options_is_key_then_path() {
        let cmd = Command::get("k", ".", &[]).unwrap();
        assert_eq!(cmd.verb(), "JSON.GET");
        assert_eq!(cmd.args(), &[str_arg("k"), str_arg(".")]);
    }

    #[test]
    fn get_places_options_before_the_path() {
        let cmd = Command::get(
            "k",
            ".",
            &[GetOption::Indent("\t".to_string()), GetOption::NoEscape],
        )
        .unwrap();
        assert_eq!(
            cmd.args(),
            &[
                str_arg("k"),
                str_arg("INDENT"),
                str_arg("\t"),
                str_arg("NOESCAPE"),
                str_arg("."),
            ]
        );
    }

    #[test]
    fn get_rejects_five_options() {
        let opts = [
            GetOption::Indent("\t".to_string()),
            GetOption::Newline("\n".to_string()),
            GetOption::Space(" ".to_string()),
            GetOption::NoEscape,
            GetOption::NoEscape,
        ];
        let err = Command::get("k", ".", &opts).unwrap_err();
        assert_eq!(err.to_string(), "too many optional arguments");
    }

    #[test]
    fn mget_emits_keys_then_the_shared_path() {
        let cmd = Command::mget(".", &["a", "b"]).unwrap();
        assert_eq!(cmd.args(), &[str_arg("a"), str_arg("b"), str_arg(".")]);
    }

    #[test]
    fn mget_needs_at_least_one_key() {
        let err = Command::mget(".", &[]).unwrap_err();
        assert_eq!(err.to_string(), "need at least one argument");
    }

    #[test]
    fn arr_pop_omits_the_index_when_popping_last() {
        let cmd = Command::arr_pop("k", ".", None);
        assert_eq!(cmd.args(), &[str_arg("k"), str_arg(".")]);

        let cmd = Command::arr_pop("k", ".", Some(2));
        assert_eq!(
            cmd.args(),
            &[str_arg("k"), str_arg("."), CommandArg::from(2i64)]
        );
    }

    #[test]
    fn arr_index_accepts_up_to_two_bounds() {
        let cmd = Command::arr_index("k", ".", "x", &[]).unwrap();
        assert_eq!(
            cmd.args(),
            &[str_arg("k"), str_arg("."), json_arg("\"x\"")]
        );

        let cmd = Command::arr_index("k", ".", "x", &[1]).unwrap();
        assert_eq!(cmd.args()[3], CommandArg::from(1i64));
        assert_eq!(cmd.args().len(), 4);

        let cmd = Command::arr_index("k", ".", "x", &[1, 3]).unwrap();
        assert_eq!(cmd.args()[3], CommandArg::from(1i64));
        assert_eq!(cmd.args()[4], CommandArg::from(3i64));

        let err = Command::arr_index("k", ".", "x", &[1, 3, 5]).unwrap_err();
        assert_eq!(err.to_string(), "too many optional arguments");
    }

    #[test]
    fn arr_append_serializes_each_value_independently() {
        let cmd = Command::arr_append("k", ".", &["a", "b"]).unwrap();
        assert_eq!(
            cmd.args(),
            &[
                str_arg("k"),
                str_arg("."),
                json_arg("\"a\""),
                json_arg("\"b\""),
            ]
        );
    }

    #[test]
    fn arr_append_and_insert_need_values() {
        let none: &[i64] = &[];
        let err = Command::arr_append("k", ".", none).unwrap_err();
        assert_eq!(err.to_string(), "need at least one argument");
        let err = Command::arr_insert("k", ".", 0, none).unwrap_err();
        assert_eq!(err.to_string(), "need at least one argument");
    }

    #[test]
    fn arr_insert_places_the_index_before_the_values() {
        let cmd = Command::arr_insert("k", ".", 2, &[7, 8]).unwrap();
        assert_eq!(
            cmd.args(),
            &[
                str_arg("k"),
                str_arg("."),
                CommandArg::from(2i64),
                json_arg("7"),
                json_arg("8"),
            ]
        );
    }

    #[test]
    fn debug_leads_with_the_subcommand_token() {
        let cmd = Command::debug(DebugSubcommand::Memory, "k", ".");
        assert_eq!(cmd.verb(), "JSON.DEBUG");
        assert_eq!(
            cmd.args(),
            &[str_arg("MEMORY"), str_arg("k"), str_arg(".")]
        );
    }

    #[test]
    fn numeric_commands_pass_native_integers() {
        let cmd = Command::num_incr_by("k", ".n", 5);
        assert_eq!(cmd.args()[2], CommandArg::from(5i64));
        let cmd = Command::arr_trim("k", ".", 1, 2);
        assert_eq!(
            cmd.args(),
            &[
                str_arg("k"),
                str_arg("."),
                CommandArg::from(1i64),
                CommandArg::from(2i64),
            ]
        );
    }

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            Err(serde::ser::Error::custom("refusing to encode"))
        }
    }

    #[test]
    fn set_surfaces_value_encoding_failures() {
        let err = Command::set("k", ".", &Unencodable, &[]).unwrap_err();
        assert!(matches!(err, CommandError::Encode(_)));
        assert!(err.to_string().starts_with("failed to encode value as JSON"));
    }

    #[test]
    fn arr_append_aborts_when_any_value_fails_to_encode() {
        let err = Command::arr_append("k", ".", &[Unencodable]).unwrap_err();
        assert!(matches!(err, CommandError::Encode(_)));

        let err = Command::arr_insert("k", ".", 0, &[Unencodable]).unwrap_err();
        assert!(matches!(err, CommandError::Encode(_)));
    }

    #[test]
    fn arr_index_surfaces_scalar_encoding_failures() {
        let err = Command::arr_index("k", ".", &Unencodable, &[]).unwrap_err();
        assert!(matches!(err, CommandError::Encode(_)));
    }

    #[test]
    fn str_append_passes_encoded_text_verbatim() {
        let cmd = Command::str_append("k", ".", "\"tail\"");
        assert_eq!(
            cmd.args(),
            &[str_arg("k"), str_arg("."), str_arg("\"tail\"")]
        );
    }
}
