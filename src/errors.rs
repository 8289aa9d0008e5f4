use bytes_parser::BytesParserError;
use thiserror::Error;

/// Coarse classification of a [`DecodeError`].
///
/// Callers that only want to skip bad records can ignore this: every kind ends up as
/// "no structured result for this buffer".
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// The record carried no key, so nothing could be decoded.
    MissingKey,

    /// The schema version was read, but it does not match any known layout.
    UnrecognizedSchema,

    /// Not enough bytes for a field, invalid UTF-8, or an out of range timestamp.
    MalformedEncoding,
}

#[derive(Error, Debug, Eq, PartialEq)]
pub enum DecodeError {
    #[error("Cannot decode record without its key: unable to determine schema version")]
    MessageKeyMissing,

    #[error("Failure while parsing bytes: {0}")]
    ByteParsing(#[source] BytesParserError),

    #[error("Encountered a not (yet) supported offset commit key schema version: {0}")]
    UnrecognizedKeySchema(i16),

    #[error("Encountered a not (yet) supported offset commit value schema version: {0}")]
    UnrecognizedValueSchema(i16),

    #[error("Unable to represent {0} epoch milliseconds as a timestamp")]
    InvalidTimestamp(i64),
}

impl DecodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::MessageKeyMissing => ErrorKind::MissingKey,
            DecodeError::UnrecognizedKeySchema(_) | DecodeError::UnrecognizedValueSchema(_) => {
                ErrorKind::UnrecognizedSchema
            },
            DecodeError::ByteParsing(_) | DecodeError::InvalidTimestamp(_) => ErrorKind::MalformedEncoding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::is_thread_safe;
    use crate::utils::read_int16;

    #[test]
    fn classifies_errors() {
        assert_eq!(DecodeError::MessageKeyMissing.kind(), ErrorKind::MissingKey);
        assert_eq!(DecodeError::UnrecognizedKeySchema(2).kind(), ErrorKind::UnrecognizedSchema);
        assert_eq!(DecodeError::UnrecognizedValueSchema(99).kind(), ErrorKind::UnrecognizedSchema);
        assert_eq!(DecodeError::InvalidTimestamp(i64::MAX).kind(), ErrorKind::MalformedEncoding);

        let truncated = read_int16(&[0x01]).unwrap_err();
        assert_eq!(truncated.kind(), ErrorKind::MalformedEncoding);
    }

    #[test]
    fn displays_schema_version() {
        assert_eq!(
            DecodeError::UnrecognizedValueSchema(9).to_string(),
            "Encountered a not (yet) supported offset commit value schema version: 9"
        );
    }

    #[test]
    fn test_types_thread_safety() {
        is_thread_safe::<DecodeError>();
        is_thread_safe::<ErrorKind>();
    }
}
