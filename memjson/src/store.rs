//! Verb evaluation over the in-memory keyspace.
//!
//! Paths follow the dotted member syntax the library emits: `"."` or `""`
//! selects the root, anything else is a leading-dot-stripped, dot-separated
//! object member traversal. Array subscripts are not part of the wire
//! contract under test and are not supported.
use rejson::command::CommandArg;
use rejson::options::DEBUG_HELP_OUTPUT;
use serde_json::{Map, Value};

/// A server-style error, rendered as `ERR ...` reply text.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    #[error("ERR unknown command '{0}'")]
    UnknownCommand(String),
    #[error("ERR wrong number of arguments")]
    WrongArity,
    #[error("ERR invalid argument")]
    InvalidArgument,
    #[error("ERR key '{0}' does not exist")]
    MissingKey(String),
    #[error("ERR path '{0}' does not exist")]
    MissingPath(String),
    #[error("ERR wrong type of path value - expected {expected} but found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
    #[error("ERR index out of range")]
    IndexOutOfRange,
    #[error("ERR failed to parse JSON: '{0}'")]
    BadJson(#[from] serde_json::Error),
}

/// A reply in the store's neutral form, before a connection renders it into
/// its transport's encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outcome {
    Nil,
    Int(i64),
    Text(String),
    List(Vec<Outcome>),
}

#[derive(Default)]
pub(crate) struct Store {
    entries: Map<String, Value>,
}

impl Store {
    pub(crate) fn dispatch(
        &mut self,
        verb: &str,
        args: &[CommandArg],
    ) -> Result<Outcome, ServerError> {
        match verb {
            "JSON.SET" => self.set(args),
            "JSON.GET" => self.get(args),
            "JSON.MGET" => self.mget(args),
            "JSON.DEL" | "JSON.FORGET" => self.del(args),
            "JSON.TYPE" => self.type_of(args),
            "JSON.NUMINCRBY" => self.num_op(args, |a, b| a + b, |a, b| a + b),
            "JSON.NUMMULTBY" => self.num_op(args, |a, b| a * b, |a, b| a * b),
            "JSON.STRAPPEND" => self.str_append(args),
            "JSON.STRLEN" => self.str_len(args),
            "JSON.ARRAPPEND" => self.arr_append(args),
            "JSON.ARRLEN" => self.arr_len(args),
            "JSON.ARRPOP" => self.arr_pop(args),
            "JSON.ARRINDEX" => self.arr_index(args),
            "JSON.ARRTRIM" => self.arr_trim(args),
            "JSON.ARRINSERT" => self.arr_insert(args),
            "JSON.OBJKEYS" => self.obj_keys(args),
            "JSON.OBJLEN" => self.obj_len(args),
            "JSON.DEBUG" => self.debug(args),
            "JSON.RESP" => self.resp(args),
            other => Err(ServerError::UnknownCommand(other.to_string())),
        }
    }

    fn set(&mut self, args: &[CommandArg]) -> Result<Outcome, ServerError> {
        let key = arg_str(args, 0)?;
        let path = arg_str(args, 1)?;
        let value: Value = serde_json::from_slice(arg_bytes(args, 2)?)?;

        let exists = self
            .entries
            .get(key)
            .is_some_and(|root| value_at(root, path).is_some());
        match args.get(3).and_then(CommandArg::as_str) {
            Some("NX") if exists => return Ok(Outcome::Nil),
            Some("XX") if !exists => return Ok(Outcome::Nil),
            Some("NX") | Some("XX") | None => {}
            Some(_) => return Err(ServerError::InvalidArgument),
        }

        let segs = segments(path);
        if segs.is_empty() {
            self.entries.insert(key.to_string(), value);
        } else {
            let root = self
                .entries
                .get_mut(key)
                .ok_or_else(|| ServerError::MissingKey(key.to_string()))?;
            let (member, parents) = segs.split_last().expect("segs is non-empty");
            let mut current = root;
            for seg in parents {
                current = match current {
                    Value::Object(map) => map
                        .get_mut(*seg)
                        .ok_or_else(|| ServerError::MissingPath(path.to_string()))?,
                    other => {
                        return Err(wrong_type("an object", other));
                    }
                };
            }
            match current {
                Value::Object(map) => {
                    map.insert(member.to_string(), value);
                }
                other => return Err(wrong_type("an object", other)),
            }
        }
        Ok(Outcome::Text("OK".to_string()))
    }

    fn get(&mut self, args: &[CommandArg]) -> Result<Outcome, ServerError> {
        if args.len() < 2 {
            return Err(ServerError::WrongArity);
        }
        let key = arg_str(args, 0)?;
        let path = arg_str(args, args.len() - 1)?;

        let mut format = Format::default();
        let mut i = 1;
        while i < args.len() - 1 {
            match arg_str(args, i)? {
                "INDENT" => {
                    format.indent = arg_str(args, i + 1)?.to_string();
                    i += 2;
                }
                "NEWLINE" => {
                    format.newline = arg_str(args, i + 1)?.to_string();
                    i += 2;
                }
                "SPACE" => {
                    format.space = arg_str(args, i + 1)?.to_string();
                    i += 2;
                }
                // No visible effect on the ASCII documents under test.
                "NOESCAPE" => i += 1,
                _ => return Err(ServerError::InvalidArgument),
            }
        }
        if i != args.len() - 1 {
            return Err(ServerError::WrongArity);
        }

        let Some(root) = self.entries.get(key) else {
            return Ok(Outcome::Nil);
        };
        let value =
            value_at(root, path).ok_or_else(|| ServerError::MissingPath(path.to_string()))?;
        Ok(Outcome::Text(render(value, &format)?))
    }

    fn mget(&mut self, args: &[CommandArg]) -> Result<Outcome, ServerError> {
        if args.len() < 2 {
            return Err(ServerError::WrongArity);
        }
        let path = arg_str(args, args.len() - 1)?;
        let mut results = Vec::with_capacity(args.len() - 1);
        for arg in &args[..args.len() - 1] {
            let key = arg.as_str().ok_or(ServerError::InvalidArgument)?;
            let outcome = match self.entries.get(key).and_then(|root| value_at(root, path)) {
                Some(value) => Outcome::Text(compact(value)?),
                None => Outcome::Nil,
            };
            results.push(outcome);
        }
        Ok(Outcome::List(results))
    }

    fn del(&mut self, args: &[CommandArg]) -> Result<Outcome, ServerError> {
        let key = arg_str(args, 0)?;
        let path = arg_str(args, 1)?;
        let segs = segments(path);
        if segs.is_empty() {
            let removed = self.entries.shift_remove(key).is_some();
            return Ok(Outcome::Int(removed as i64));
        }
        let Some(root) = self.entries.get_mut(key) else {
            return Ok(Outcome::Int(0));
        };
        let (member, parents) = segs.split_last().expect("segs is non-empty");
        let mut current = root;
        for seg in parents {
            match current {
                Value::Object(map) => match map.get_mut(*seg) {
                    Some(next) => current = next,
                    None => return Ok(Outcome::Int(0)),
                },
                _ => return Ok(Outcome::Int(0)),
            }
        }
        let removed = match current {
            Value::Object(map) => map.shift_remove(*member).is_some(),
            _ => false,
        };
        Ok(Outcome::Int(removed as i64))
    }

    fn type_of(&mut self, args: &[CommandArg]) -> Result<Outcome, ServerError> {
        let key = arg_str(args, 0)?;
        let path = arg_str(args, 1)?;
        let Some(root) = self.entries.get(key) else {
            return Ok(Outcome::Nil);
        };
        match value_at(root, path) {
            Some(value) => Ok(Outcome::Text(kind(value).to_string())),
            None => Ok(Outcome::Nil),
        }
    }

    fn num_op(
        &mut self,
        args: &[CommandArg],
        int_op: fn(i64, i64) -> i64,
        float_op: fn(f64, f64) -> f64,
    ) -> Result<Outcome, ServerError> {
        let key = arg_str(args, 0)?.to_string();
        let path = arg_str(args, 1)?.to_string();
        let operand = arg_int(args, 2)?;

        let target = self.value_at_mut(&key, &path)?;
        let new = match &*target {
            Value::Number(n) => match n.as_i64() {
                Some(current) => Value::from(int_op(current, operand)),
                None => {
                    let current = n.as_f64().ok_or(ServerError::InvalidArgument)?;
                    Value::from(float_op(current, operand as f64))
                }
            },
            other => return Err(wrong_type("a number", other)),
        };
        let text = compact(&new)?;
        *target = new;
        Ok(Outcome::Text(text))
    }

    fn str_append(&mut self, args: &[CommandArg]) -> Result<Outcome, ServerError> {
        let key = arg_str(args, 0)?.to_string();
        let path = arg_str(args, 1)?.to_string();
        let tail: Value = serde_json::from_str(arg_str(args, 2)?)?;
        let Value::String(tail) = tail else {
            return Err(wrong_type("a string", &tail));
        };

        let target = self.value_at_mut(&key, &path)?;
        match target {
            Value::String(s) => {
                s.push_str(&tail);
                Ok(Outcome::Int(s.len() as i64))
            }
            other => Err(wrong_type("a string", other)),
        }
    }

    fn str_len(&mut self, args: &[CommandArg]) -> Result<Outcome, ServerError> {
        let value = self.value_at_checked(args)?;
        match value {
            Value::String(s) => Ok(Outcome::Int(s.len() as i64)),
            other => Err(wrong_type("a string", other)),
        }
    }

    fn arr_append(&mut self, args: &[CommandArg]) -> Result<Outcome, ServerError> {
        let key = arg_str(args, 0)?.to_string();
        let path = arg_str(args, 1)?.to_string();
        if args.len() < 3 {
            return Err(ServerError::WrongArity);
        }
        let mut values = Vec::with_capacity(args.len() - 2);
        for arg in &args[2..] {
            let bytes = arg.as_bytes().ok_or(ServerError::InvalidArgument)?;
            values.push(serde_json::from_slice::<Value>(bytes)?);
        }

        let target = self.value_at_mut(&key, &path)?;
        match target {
            Value::Array(items) => {
                items.extend(values);
                Ok(Outcome::Int(items.len() as i64))
            }
            other => Err(wrong_type("array", other)),
        }
    }

    fn arr_len(&mut self, args: &[CommandArg]) -> Result<Outcome, ServerError> {
        let value = self.value_at_checked(args)?;
        match value {
            Value::Array(items) => Ok(Outcome::Int(items.len() as i64)),
            other => Err(wrong_type("array", other)),
        }
    }

    fn arr_pop(&mut self, args: &[CommandArg]) -> Result<Outcome, ServerError> {
        let key = arg_str(args, 0)?.to_string();
        let path = arg_str(args, 1)?.to_string();
        let index = match args.get(2) {
            Some(arg) => Some(arg.as_int().ok_or(ServerError::InvalidArgument)?),
            None => None,
        };

        let target = self.value_at_mut(&key, &path)?;
        let items = match target {
            Value::Array(items) => items,
            other => return Err(wrong_type("array", other)),
        };
        if items.is_empty() {
            return Err(ServerError::IndexOutOfRange);
        }
        let len = items.len() as i64;
        // Default is the last element; out-of-range indices clamp.
        let index = index.unwrap_or(len - 1);
        let index = if index < 0 { len + index } else { index };
        let index = index.clamp(0, len - 1) as usize;
        let popped = items.remove(index);
        Ok(Outcome::Text(compact(&popped)?))
    }

    fn arr_index(&mut self, args: &[CommandArg]) -> Result<Outcome, ServerError> {
        let key = arg_str(args, 0)?;
        let path = arg_str(args, 1)?;
        let needle: Value = serde_json::from_slice(arg_bytes(args, 2)?)?;
        let start = match args.get(3) {
            Some(arg) => arg.as_int().ok_or(ServerError::InvalidArgument)?,
            None => 0,
        };
        let stop = match args.get(4) {
            Some(arg) => arg.as_int().ok_or(ServerError::InvalidArgument)?,
            None => 0,
        };

        let root = self
            .entries
            .get(key)
            .ok_or_else(|| ServerError::MissingKey(key.to_string()))?;
        let value =
            value_at(root, path).ok_or_else(|| ServerError::MissingPath(path.to_string()))?;
        let items = match value {
            Value::Array(items) => items,
            other => return Err(wrong_type("array", other)),
        };

        let len = items.len() as i64;
        let start = normalize_index(start, len).clamp(0, len) as usize;
        // A stop of 0 means "to the end"; the bound is exclusive.
        let stop = match stop {
            0 => len,
            s => normalize_index(s, len).clamp(0, len),
        } as usize;

        for (i, item) in items.iter().enumerate().take(stop).skip(start) {
            if item == &needle {
                return Ok(Outcome::Int(i as i64));
            }
        }
        Ok(Outcome::Int(-1))
    }

    fn arr_trim(&mut self, args: &[CommandArg]) -> Result<Outcome, ServerError> {
        let key = arg_str(args, 0)?.to_string();
        let path = arg_str(args, 1)?.to_string();
        let start = arg_int(args, 2)?;
        let stop = arg_int(args, 3)?;

        let target = self.value_at_mut(&key, &path)?;
        let items = match target {
            Value::Array(items) => items,
            other => return Err(wrong_type("array", other)),
        };
        let len = items.len() as i64;
        let start = normalize_index(start, len).clamp(0, len);
        let stop = normalize_index(stop, len).clamp(-1, len - 1);
        if start > stop || start >= len {
            items.clear();
        } else {
            // Inclusive [start, stop] range survives the trim.
            items.truncate(stop as usize + 1);
            items.drain(..start as usize);
        }
        Ok(Outcome::Int(items.len() as i64))
    }

    fn arr_insert(&mut self, args: &[CommandArg]) -> Result<Outcome, ServerError> {
        let key = arg_str(args, 0)?.to_string();
        let path = arg_str(args, 1)?.to_string();
        let index = arg_int(args, 2)?;
        if args.len() < 4 {
            return Err(ServerError::WrongArity);
        }
        let mut values = Vec::with_capacity(args.len() - 3);
        for arg in &args[3..] {
            let bytes = arg.as_bytes().ok_or(ServerError::InvalidArgument)?;
            values.push(serde_json::from_slice::<Value>(bytes)?);
        }

        let target = self.value_at_mut(&key, &path)?;
        let items = match target {
            Value::Array(items) => items,
            other => return Err(wrong_type("array", other)),
        };
        let len = items.len() as i64;
        let index = normalize_index(index, len);
        if !(0..=len).contains(&index) {
            return Err(ServerError::IndexOutOfRange);
        }
        items.splice(index as usize..index as usize, values);
        Ok(Outcome::Int(items.len() as i64))
    }

    fn obj_keys(&mut self, args: &[CommandArg]) -> Result<Outcome, ServerError> {
        let value = self.value_at_checked(args)?;
        match value {
            Value::Object(map) => Ok(Outcome::List(
                map.keys().map(|k| Outcome::Text(k.clone())).collect(),
            )),
            other => Err(wrong_type("an object", other)),
        }
    }

    fn obj_len(&mut self, args: &[CommandArg]) -> Result<Outcome, ServerError> {
        let value = self.value_at_checked(args)?;
        match value {
            Value::Object(map) => Ok(Outcome::Int(map.len() as i64)),
            other => Err(wrong_type("an object", other)),
        }
    }

    fn debug(&mut self, args: &[CommandArg]) -> Result<Outcome, ServerError> {
        match arg_str(args, 0)? {
            "MEMORY" => {
                let value = self.value_at_checked(&args[1..])?;
                let bytes = serde_json::to_vec(value)?;
                Ok(Outcome::Int(bytes.len() as i64))
            }
            "HELP" => Ok(Outcome::List(
                DEBUG_HELP_OUTPUT
                    .lines()
                    .map(|line| Outcome::Text(line.to_string()))
                    .collect(),
            )),
            _ => Err(ServerError::InvalidArgument),
        }
    }

    fn resp(&mut self, args: &[CommandArg]) -> Result<Outcome, ServerError> {
        let value = self.value_at_checked(args)?;
        Ok(resp_form(value))
    }

    /// Resolves `<key> <path>` from the front of `args`, erroring on a
    /// missing key or path.
    fn value_at_checked(&self, args: &[CommandArg]) -> Result<&Value, ServerError> {
        let key = arg_str(args, 0)?;
        let path = arg_str(args, 1)?;
        let root = self
            .entries
            .get(key)
            .ok_or_else(|| ServerError::MissingKey(key.to_string()))?;
        value_at(root, path).ok_or_else(|| ServerError::MissingPath(path.to_string()))
    }

    fn value_at_mut(&mut self, key: &str, path: &str) -> Result<&mut Value, ServerError> {
        let root = self
            .entries
            .get_mut(key)
            .ok_or_else(|| ServerError::MissingKey(key.to_string()))?;
        value_at_mut(root, path).ok_or_else(|| ServerError::MissingPath(path.to_string()))
    }
}

/// JSON.GET formatting directives; all default to empty, which produces
/// compact output.
#[derive(Default)]
struct Format {
    indent: String,
    newline: String,
    space: String,
}

fn render(value: &Value, format: &Format) -> Result<String, ServerError> {
    let mut out = String::new();
    write_value(value, format, 0, &mut out)?;
    Ok(out)
}

fn write_value(
    value: &Value,
    format: &Format,
    depth: usize,
    out: &mut String,
) -> Result<(), ServerError> {
    match value {
        Value::Array(items) if !items.is_empty() => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&format.newline);
                push_indent(format, depth + 1, out);
                write_value(item, format, depth + 1, out)?;
            }
            out.push_str(&format.newline);
            push_indent(format, depth, out);
            out.push(']');
        }
        Value::Object(map) if !map.is_empty() => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&format.newline);
                push_indent(format, depth + 1, out);
                out.push_str(&serde_json::to_string(key)?);
                out.push(':');
                out.push_str(&format.space);
                write_value(item, format, depth + 1, out)?;
            }
            out.push_str(&format.newline);
            push_indent(format, depth, out);
            out.push('}');
        }
        scalar => out.push_str(&serde_json::to_string(scalar)?),
    }
    Ok(())
}

fn push_indent(format: &Format, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str(&format.indent);
    }
}

fn compact(value: &Value) -> Result<String, ServerError> {
    Ok(serde_json::to_string(value)?)
}

/// The serialization-protocol shape: containers become lists led by their
/// opening-brace marker, objects list [key, value] pairs.
fn resp_form(value: &Value) -> Outcome {
    match value {
        Value::Null => Outcome::Nil,
        Value::Bool(b) => Outcome::Text(b.to_string()),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Outcome::Int(i),
            None => Outcome::Text(n.to_string()),
        },
        Value::String(s) => Outcome::Text(s.clone()),
        Value::Array(items) => {
            let mut list = vec![Outcome::Text("[".to_string())];
            list.extend(items.iter().map(resp_form));
            Outcome::List(list)
        }
        Value::Object(map) => {
            let mut list = vec![Outcome::Text("{".to_string())];
            for (key, item) in map {
                list.push(Outcome::List(vec![
                    Outcome::Text(key.clone()),
                    resp_form(item),
                ]));
            }
            Outcome::List(list)
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.as_i64().is_some() || n.as_u64().is_some() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn wrong_type(expected: &'static str, found: &Value) -> ServerError {
    ServerError::WrongType {
        expected,
        found: kind(found),
    }
}

fn segments(path: &str) -> Vec<&str> {
    let trimmed = path.strip_prefix('.').unwrap_or(path);
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('.').collect()
    }
}

fn value_at<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for seg in segments(path) {
        current = current.as_object()?.get(seg)?;
    }
    Some(current)
}

fn value_at_mut<'a>(root: &'a mut Value, path: &str) -> Option<&'a mut Value> {
    let mut current = root;
    for seg in segments(path) {
        current = current.as_object_mut()?.get_mut(seg)?;
    }
    Some(current)
}

fn normalize_index(index: i64, len: i64) -> i64 {
    if index < 0 { len + index } else { index }
}

fn arg_str(args: &[CommandArg], index: usize) -> Result<&str, ServerError> {
    match args.get(index) {
        Some(arg) => arg.as_str().ok_or(ServerError::InvalidArgument),
        None => Err(ServerError::WrongArity),
    }
}

fn arg_int(args: &[CommandArg], index: usize) -> Result<i64, ServerError> {
    match args.get(index) {
        Some(arg) => arg.as_int().ok_or(ServerError::InvalidArgument),
        None => Err(ServerError::WrongArity),
    }
}

fn arg_bytes(args: &[CommandArg], index: usize) -> Result<&[u8], ServerError> {
    match args.get(index) {
        Some(arg) => arg.as_bytes().ok_or(ServerError::InvalidArgument),
        None => Err(ServerError::WrongArity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_with(key: &str, value: Value) -> Store {
        let mut store = Store::default();
        store
            .dispatch(
                "JSON.SET",
                &[
                    CommandArg::from(key),
                    CommandArg::from("."),
                    CommandArg::from(serde_json::to_vec(&value).unwrap()),
                ],
            )
            .unwrap();
        store
    }

    #[test]
    fn root_path_spellings_select_the_whole_document() {
        let doc = json!({"a": {"b": 1}});
        assert_eq!(value_at(&doc, ".").unwrap(), &doc);
        assert_eq!(value_at(&doc, "").unwrap(), &doc);
        assert_eq!(value_at(&doc, ".a.b").unwrap(), &json!(1));
        assert_eq!(value_at(&doc, "a.b").unwrap(), &json!(1));
        assert!(value_at(&doc, ".a.c").is_none());
    }

    #[test]
    fn get_renders_with_the_requested_format() {
        let mut store = store_with("k", json!({"a": [1, 2]}));
        let compacted = store
            .dispatch(
                "JSON.GET",
                &[CommandArg::from("k"), CommandArg::from(".")],
            )
            .unwrap();
        assert_eq!(compacted, Outcome::Text("{\"a\":[1,2]}".to_string()));

        let pretty = store
            .dispatch(
                "JSON.GET",
                &[
                    CommandArg::from("k"),
                    CommandArg::from("INDENT"),
                    CommandArg::from("\t"),
                    CommandArg::from("NEWLINE"),
                    CommandArg::from("\n"),
                    CommandArg::from("SPACE"),
                    CommandArg::from(" "),
                    CommandArg::from("."),
                ],
            )
            .unwrap();
        assert_eq!(
            pretty,
            Outcome::Text("{\n\t\"a\": [\n\t\t1,\n\t\t2\n\t]\n}".to_string())
        );
    }

    #[test]
    fn set_nx_and_xx_return_nil_without_writing() {
        let mut store = store_with("k", json!(1));
        let nx = store
            .dispatch(
                "JSON.SET",
                &[
                    CommandArg::from("k"),
                    CommandArg::from("."),
                    CommandArg::from(b"2".to_vec()),
                    CommandArg::from("NX"),
                ],
            )
            .unwrap();
        assert_eq!(nx, Outcome::Nil);
        assert_eq!(store.entries["k"], json!(1));

        let xx = store
            .dispatch(
                "JSON.SET",
                &[
                    CommandArg::from("missing"),
                    CommandArg::from("."),
                    CommandArg::from(b"2".to_vec()),
                    CommandArg::from("XX"),
                ],
            )
            .unwrap();
        assert_eq!(xx, Outcome::Nil);
        assert!(!store.entries.contains_key("missing"));
    }

    #[test]
    fn arr_index_searches_the_half_open_range() {
        let mut store = store_with("k", json!(["a", "x", "c", "x"]));
        let args = |range: &[i64]| {
            let mut args = vec![
                CommandArg::from("k"),
                CommandArg::from("."),
                CommandArg::from(b"\"x\"".to_vec()),
            ];
            args.extend(range.iter().map(|n| CommandArg::from(*n)));
            args
        };
        assert_eq!(
            store.dispatch("JSON.ARRINDEX", &args(&[])).unwrap(),
            Outcome::Int(1)
        );
        assert_eq!(
            store.dispatch("JSON.ARRINDEX", &args(&[2])).unwrap(),
            Outcome::Int(3)
        );
        // Exclusive stop: element 3 is out of the searched range.
        assert_eq!(
            store.dispatch("JSON.ARRINDEX", &args(&[2, 3])).unwrap(),
            Outcome::Int(-1)
        );
    }

    #[test]
    fn arr_pop_clamps_and_defaults_to_last() {
        let mut store = store_with("k", json!([1, 2, 3]));
        let pop = |store: &mut Store, index: Option<i64>| {
            let mut args = vec![CommandArg::from("k"), CommandArg::from(".")];
            if let Some(i) = index {
                args.push(CommandArg::from(i));
            }
            store.dispatch("JSON.ARRPOP", &args).unwrap()
        };
        assert_eq!(pop(&mut store, None), Outcome::Text("3".to_string()));
        assert_eq!(pop(&mut store, Some(100)), Outcome::Text("2".to_string()));
        assert_eq!(pop(&mut store, Some(-1)), Outcome::Text("1".to_string()));
    }

    #[test]
    fn arr_trim_keeps_the_inclusive_range() {
        let mut store = store_with("k", json!([0, 1, 2, 3, 4]));
        let trimmed = store
            .dispatch(
                "JSON.ARRTRIM",
                &[
                    CommandArg::from("k"),
                    CommandArg::from("."),
                    CommandArg::from(1i64),
                    CommandArg::from(3i64),
                ],
            )
            .unwrap();
        assert_eq!(trimmed, Outcome::Int(3));
        assert_eq!(store.entries["k"], json!([1, 2, 3]));
    }

    #[test]
    fn wrong_type_errors_name_both_kinds() {
        let mut store = store_with("k", json!("text"));
        let err = store
            .dispatch(
                "JSON.ARRLEN",
                &[CommandArg::from("k"), CommandArg::from(".")],
            )
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "ERR wrong type of path value - expected array but found string"
        );
    }

    #[test]
    fn integer_math_stays_integral() {
        let mut store = store_with("k", json!({"n": 5}));
        let reply = store
            .dispatch(
                "JSON.NUMINCRBY",
                &[
                    CommandArg::from("k"),
                    CommandArg::from(".n"),
                    CommandArg::from(1i64),
                ],
            )
            .unwrap();
        assert_eq!(reply, Outcome::Text("6".to_string()));
    }

    #[test]
    fn unknown_verbs_are_rejected() {
        let mut store = Store::default();
        let err = store.dispatch("JSON.BOGUS", &[]).unwrap_err();
        assert_eq!(err.to_string(), "ERR unknown command 'JSON.BOGUS'");
    }
}
