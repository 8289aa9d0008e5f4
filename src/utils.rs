use bytes_parser::BytesParser;

use crate::errors::DecodeError;
use crate::Timestamp;

/// A [`String`] parser, tailor-made for `__consumer_offsets` records.
///
/// See the crate documentation for details about the format.
///
/// Returns a [`String::default`] if the parsed `i16` length contains a negative value:
/// that is how Kafka encodes a `null` string.
///
/// # Arguments
///
/// * `parser` - A [`BytesParser`] with its internal cursor pointing
///     at the beginning of the [`&str`] we want to parse.
pub(crate) fn parse_str(parser: &mut BytesParser) -> Result<String, DecodeError> {
    let strlen = parse_i16(parser)?;
    if strlen < 0 {
        return Ok(String::default());
    }

    parser.parse_str_utf8(strlen as usize).map(|s| s.into()).map_err(DecodeError::ByteParsing)
}

/// Adapter for [`BytesParser::parse_i16`].
///
/// # Arguments
///
/// * `parser` - A [`BytesParser`] with its internal cursor pointing
///     at the beginning of the [`i16`] we want to parse.
pub(crate) fn parse_i16(parser: &mut BytesParser) -> Result<i16, DecodeError> {
    parser.parse_i16().map_err(DecodeError::ByteParsing)
}

/// Adapter for [`BytesParser::parse_i32`].
pub(crate) fn parse_i32(parser: &mut BytesParser) -> Result<i32, DecodeError> {
    parser.parse_i32().map_err(DecodeError::ByteParsing)
}

/// Adapter for [`BytesParser::parse_i64`].
pub(crate) fn parse_i64(parser: &mut BytesParser) -> Result<i64, DecodeError> {
    parser.parse_i64().map_err(DecodeError::ByteParsing)
}

/// Parses an `i64` of epoch milliseconds into the [`Timestamp`] selected by the `ts_*` features.
pub(crate) fn parse_timestamp(parser: &mut BytesParser) -> Result<Timestamp, DecodeError> {
    timestamp_from_millis(parse_i64(parser)?)
}

#[cfg(feature = "ts_int")]
pub(crate) fn timestamp_from_millis(millis: i64) -> Result<Timestamp, DecodeError> {
    Ok(millis)
}

#[cfg(feature = "ts_chrono")]
pub(crate) fn timestamp_from_millis(millis: i64) -> Result<Timestamp, DecodeError> {
    chrono::DateTime::from_timestamp_millis(millis).ok_or(DecodeError::InvalidTimestamp(millis))
}

#[cfg(feature = "ts_time")]
pub(crate) fn timestamp_from_millis(millis: i64) -> Result<Timestamp, DecodeError> {
    time::OffsetDateTime::from_unix_timestamp_nanos(millis as i128 * 1_000_000)
        .map_err(|_| DecodeError::InvalidTimestamp(millis))
}

/// Runs a cursor adapter over `bytes`, returning the parsed value and the unread remainder.
fn read_with<'a, T, F>(bytes: &'a [u8], parse: F) -> Result<(T, &'a [u8]), DecodeError>
where
    F: FnOnce(&mut BytesParser<'a>) -> Result<T, DecodeError>,
{
    let mut parser = BytesParser::from(bytes);
    let value = parse(&mut parser)?;

    Ok((value, &bytes[parser.position()..]))
}

/// Reads a big-endian `i16` from the front of `bytes`.
///
/// Returns the value and the bytes that follow it.
pub fn read_int16(bytes: &[u8]) -> Result<(i16, &[u8]), DecodeError> {
    read_with(bytes, parse_i16)
}

/// Reads a big-endian `i32` from the front of `bytes`.
pub fn read_int32(bytes: &[u8]) -> Result<(i32, &[u8]), DecodeError> {
    read_with(bytes, parse_i32)
}

/// Reads a big-endian `i64` from the front of `bytes`.
pub fn read_int64(bytes: &[u8]) -> Result<(i64, &[u8]), DecodeError> {
    read_with(bytes, parse_i64)
}

/// Reads a string prefixed by its `i16` big-endian length from the front of `bytes`.
///
/// Fails if fewer bytes than the declared length are available, or if they are not valid UTF-8.
/// A negative length decodes to an empty string, consuming only the length prefix.
pub fn read_string(bytes: &[u8]) -> Result<(String, &[u8]), DecodeError> {
    read_with(bytes, parse_str)
}

/// Used in unit tests to verify type is Thread Safe and Async/Await Safe.
///
/// It enforces that the given type implements the following standard traits:
///
/// * `std::marker::Sized`: type has a constant size known at compile time
/// * `std::marker::Send`: type is safe to send to another thread
/// * `std::marker::Sync`: type is Sync if it is safe to share between threads;
///   type can be Sync if and only if a reference to it is Send
/// * `std::marker::Unpin`: type can be safely moved after pinning
#[cfg(test)]
pub(crate) fn is_thread_safe<T: Sized + Send + Sync + Unpin>() {}

/// Builds `__consumer_offsets` style buffers in unit tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordBytes(Vec<u8>);

#[cfg(test)]
impl RecordBytes {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn i16(mut self, v: i16) -> Self {
        self.0.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub(crate) fn i32(mut self, v: i32) -> Self {
        self.0.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub(crate) fn i64(mut self, v: i64) -> Self {
        self.0.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub(crate) fn str(self, s: &str) -> Self {
        let with_len = self.i16(s.len() as i16);
        with_len.raw(s.as_bytes())
    }

    pub(crate) fn raw(mut self, bytes: &[u8]) -> Self {
        self.0.extend_from_slice(bytes);
        self
    }

    pub(crate) fn build(self) -> Vec<u8> {
        self.0
    }
}
