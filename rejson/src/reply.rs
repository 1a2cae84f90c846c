//! # Reply Model & Normalizers
//!
//! Transports hand back a [`RawReply`], a small closed model of everything
//! the server can answer with. The per-command normalizers living here turn
//! that raw shape into the typed result each operation promises; a reply of
//! the wrong shape is an explicit [`ReplyError::Unexpected`], never a panic.
//!
//! The two transport flavors encode text differently - one as opaque byte
//! buffers, one as native strings - so the model carries both ([`RawReply::Data`]
//! and [`RawReply::Simple`]) and every normalizer accepts either.

/// Errors raised while normalizing a raw reply.
#[derive(Debug, thiserror::Error)]
pub enum ReplyError {
    #[error("unexpected reply type: expected {expected}, found {found}")]
    Unexpected {
        expected: &'static str,
        found: &'static str,
    },
    #[error("reply is not valid UTF-8: '{0}'")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// A raw transport reply, before per-command normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawReply {
    /// No value (absent key or path).
    Nil,
    /// A native integer reply.
    Int(i64),
    /// Text delivered as an opaque byte buffer.
    Data(Vec<u8>),
    /// Text delivered as a native string.
    Simple(String),
    /// A nested reply list.
    Array(Vec<RawReply>),
}

impl RawReply {
    /// Returns the shape name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            RawReply::Nil => "nil",
            RawReply::Int(_) => "integer",
            RawReply::Data(_) => "bulk data",
            RawReply::Simple(_) => "simple string",
            RawReply::Array(_) => "array",
        }
    }

    /// Normalizes an integer reply.
    pub fn into_int(self) -> Result<i64, ReplyError> {
        match self {
            RawReply::Int(n) => Ok(n),
            other => Err(unexpected("integer", &other)),
        }
    }

    /// Normalizes a text reply from either transport encoding.
    pub fn into_text(self) -> Result<String, ReplyError> {
        match self {
            RawReply::Data(bytes) => Ok(String::from_utf8(bytes)?),
            RawReply::Simple(text) => Ok(text),
            other => Err(unexpected("text", &other)),
        }
    }

    /// Normalizes a text reply where nil means "no value".
    pub fn into_optional_text(self) -> Result<Option<String>, ReplyError> {
        match self {
            RawReply::Nil => Ok(None),
            other => other.into_text().map(Some),
        }
    }

    /// Normalizes an opaque encoded-document reply. The buffer is returned
    /// as-is for caller-side decoding.
    pub fn into_json_buf(self) -> Result<Vec<u8>, ReplyError> {
        match self {
            RawReply::Data(bytes) => Ok(bytes),
            RawReply::Simple(text) => Ok(text.into_bytes()),
            other => Err(unexpected("document text", &other)),
        }
    }

    /// Normalizes an opaque encoded-document reply where nil means "no value".
    pub fn into_optional_json_buf(self) -> Result<Option<Vec<u8>>, ReplyError> {
        match self {
            RawReply::Nil => Ok(None),
            other => other.into_json_buf().map(Some),
        }
    }

    /// Normalizes a nested reply list of buffer-or-nil elements, preserving
    /// nils in place so the result length always equals the reply length.
    pub fn into_optional_buf_list(self) -> Result<Vec<Option<Vec<u8>>>, ReplyError> {
        match self {
            RawReply::Array(elems) => elems
                .into_iter()
                .map(RawReply::into_optional_json_buf)
                .collect(),
            other => Err(unexpected("array", &other)),
        }
    }

    /// Normalizes a nested reply list of text fragments into decoded strings.
    pub fn into_text_list(self) -> Result<Vec<String>, ReplyError> {
        match self {
            RawReply::Array(elems) => elems.into_iter().map(RawReply::into_text).collect(),
            other => Err(unexpected("array", &other)),
        }
    }
}

fn unexpected(expected: &'static str, found: &RawReply) -> ReplyError {
    ReplyError::Unexpected {
        expected,
        found: found.kind(),
    }
}

/// Normalized result of `JSON.DEBUG`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebugReply {
    /// Memory usage in bytes, from `JSON.DEBUG MEMORY`.
    Memory(i64),
    /// The joined help text, from `JSON.DEBUG HELP`.
    Help(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_accepts_both_transport_encodings() {
        assert_eq!(
            RawReply::Data(b"OK".to_vec()).into_text().unwrap(),
            "OK"
        );
        assert_eq!(
            RawReply::Simple("OK".to_string()).into_text().unwrap(),
            "OK"
        );
    }

    #[test]
    fn optional_text_maps_nil_to_none() {
        assert_eq!(RawReply::Nil.into_optional_text().unwrap(), None);
    }

    #[test]
    fn wrong_shapes_surface_as_typed_errors() {
        let err = RawReply::Array(vec![]).into_int().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unexpected reply type: expected integer, found array"
        );
        let err = RawReply::Int(3).into_json_buf().unwrap_err();
        assert!(matches!(err, ReplyError::Unexpected { found: "integer", .. }));
    }

    #[test]
    fn buf_list_preserves_nils_positionally() {
        let reply = RawReply::Array(vec![
            RawReply::Data(b"1".to_vec()),
            RawReply::Nil,
            RawReply::Simple("3".to_string()),
        ]);
        let list = reply.into_optional_buf_list().unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].as_deref(), Some(b"1".as_slice()));
        assert_eq!(list[1], None);
        assert_eq!(list[2].as_deref(), Some(b"3".as_slice()));
    }

    #[test]
    fn text_list_decodes_every_fragment() {
        let reply = RawReply::Array(vec![
            RawReply::Data(b"a".to_vec()),
            RawReply::Simple("b".to_string()),
        ]);
        assert_eq!(reply.into_text_list().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn invalid_utf8_is_reported() {
        let err = RawReply::Data(vec![0xff, 0xfe]).into_text().unwrap_err();
        assert!(matches!(err, ReplyError::InvalidUtf8(_)));
    }
}
