//! Decode offset commits stored in the Kafka `__consumer_offsets` internal topic.
//!
//! Every time a consumer group commits an offset, the [Group Coordinator] appends a record to
//! `__consumer_offsets`: its key says _which_ group, topic and partition the commit is for,
//! its value says _what_ was committed (offset, metadata and timestamps).
//!
//! Both key and value start with an `i16` schema version, that determines the layout of the
//! bytes that follow. This crate decodes:
//!
//! * keys with schema version `0` and `1` into [`OffsetCommitKey`]
//! * values with schema version `0`, `1`, `2` and `3` into [`OffsetCommitValue`]
//!
//! Anything else (including group metadata records, that use key schema version `2`) is reported
//! as a [`DecodeError`] of kind [`ErrorKind::UnrecognizedSchema`].
//!
//! ## Format
//!
//! Fields are encoded like Java data types, big-endian:
//!
//! * `short` is `i16`, `int` is `i32`, `long` is `i64`
//! * strings are an `i16` length `N`, followed by `N` bytes of UTF-8; a negative `N` is a `null` string
//! * timestamps are `i64` milliseconds since the UNIX epoch
//!
//! Bytes left over once all the fields of a given schema version are decoded, are ignored.
//!
//! ## Skipping records
//!
//! The `try_from_bytes` functions return a [`Result`], so callers can tell an unrecognized schema
//! apart from malformed bytes. The `decode` functions instead log a warning via the [`log`] facade
//! and return [`None`], for callers that just want to skip what can't be decoded.
//!
//! ## Features
//!
//! * `ts_int` (default): timestamps are `i64`
//! * `ts_chrono`: timestamps are [`chrono::DateTime<chrono::Utc>`](https://docs.rs/chrono)
//! * `ts_time`: timestamps are [`time::OffsetDateTime`](https://docs.rs/time)
//! * `serde`: implements `Serialize` and `Deserialize` for the decoded types
//!
//! [Group Coordinator]: https://github.com/apache/kafka/blob/trunk/core/src/main/scala/kafka/coordinator/group/GroupCoordinator.scala

#[cfg(not(any(feature = "ts_int", feature = "ts_chrono", feature = "ts_time")))]
compile_error!("one of the features `ts_int`, `ts_chrono` or `ts_time` must be enabled");

#[cfg(any(
    all(feature = "ts_int", feature = "ts_chrono"),
    all(feature = "ts_int", feature = "ts_time"),
    all(feature = "ts_chrono", feature = "ts_time"),
))]
compile_error!("features `ts_int`, `ts_chrono` and `ts_time` are mutually exclusive: disable default features");

mod errors;
mod offset_commit;
mod offset_commit_key;
mod offset_commit_value;
#[cfg(test)]
mod test_logger;
mod utils;

pub use errors::{DecodeError, ErrorKind};
pub use offset_commit::OffsetCommit;
pub use offset_commit_key::OffsetCommitKey;
pub use offset_commit_value::OffsetCommitValue;
pub use utils::{read_int16, read_int32, read_int64, read_string};

/// Timestamp type, in milliseconds since UNIX epoch.
#[cfg(feature = "ts_int")]
pub type Timestamp = i64;

/// Timestamp type, in UTC.
#[cfg(feature = "ts_chrono")]
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Timestamp type, in UTC.
#[cfg(feature = "ts_time")]
pub type Timestamp = time::OffsetDateTime;
