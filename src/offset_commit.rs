use log::warn;

use crate::errors::DecodeError;
use crate::offset_commit_key::{warn_skipped_key, OffsetCommitKey};
use crate::offset_commit_value::{warn_skipped_value, OffsetCommitValue};

/// A whole offset commit record (a.k.a. message) read from `__consumer_offsets`.
///
/// Made of a [`OffsetCommitKey`] and, unless the record is a _tombstone_, an [`OffsetCommitValue`].
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffsetCommit {
    /// Which group, topic and partition the commit is about.
    pub key: OffsetCommitKey,

    /// What was committed.
    ///
    /// `None` if the record is a tombstone: the committed offset for [`Self::key`] was removed
    /// (ex. expired, or the group was deleted) and will disappear following the [Log Compaction] rules.
    ///
    /// [Log Compaction]: https://kafka.apache.org/documentation/#compaction
    pub value: Option<OffsetCommitValue>,
}

impl OffsetCommit {
    /// Decodes a record from `__consumer_offsets`.
    ///
    /// **NOTE:** As Kafka records have key and value both optional, the signature reflects that.
    /// But offset commit records always have a key: if absent, this returns
    /// [`DecodeError::MessageKeyMissing`].
    ///
    /// # Arguments
    ///
    /// * `key` - An [`Option`] of `&[u8]`: when set, it means the source Kafka record has a key.
    /// * `value` - An [`Option`] of `&[u8]`: when `None`, the source Kafka record is a tombstone.
    pub fn try_from_bytes(key: Option<&[u8]>, value: Option<&[u8]>) -> Result<Self, DecodeError> {
        let key = OffsetCommitKey::try_from_bytes(key.ok_or(DecodeError::MessageKeyMissing)?)?;
        let value = value.map(OffsetCommitValue::try_from_bytes).transpose()?;

        Ok(OffsetCommit { key, value })
    }

    /// Same as [`Self::try_from_bytes`], but handling input as [`Option<Vec<u8>>`].
    pub fn try_from_bytes_vec(key: Option<Vec<u8>>, value: Option<Vec<u8>>) -> Result<Self, DecodeError> {
        Self::try_from_bytes(key.as_deref(), value.as_deref())
    }

    /// Same as [`Self::try_from_bytes`], but logs a warning and returns `None` when the record is skipped.
    pub fn decode(key: Option<&[u8]>, value: Option<&[u8]>) -> Option<Self> {
        let Some(key_bytes) = key else {
            warn!("{}", DecodeError::MessageKeyMissing);
            return None;
        };

        let key = match OffsetCommitKey::try_from_bytes(key_bytes) {
            Ok(k) => k,
            Err(e) => {
                warn_skipped_key(key_bytes, &e);
                return None;
            },
        };

        // If there is a value, decode it; otherwise, it's a tombstone.
        let value = match value {
            Some(value_bytes) => match OffsetCommitValue::try_from_bytes(value_bytes) {
                Ok(v) => Some(v),
                Err(e) => {
                    warn_skipped_value(value_bytes, &e);
                    return None;
                },
            },
            None => None,
        };

        Some(OffsetCommit { key, value })
    }

    /// Is this from a _tombstone_ record?
    pub fn is_tombstone(&self) -> bool {
        self.value.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::test_logger;
    use crate::utils::{is_thread_safe, RecordBytes};

    fn key_bytes() -> Vec<u8> {
        RecordBytes::new().i16(1).str("grp").str("topic1").i32(3).build()
    }

    #[test]
    fn decodes_key_and_value() {
        let value = RecordBytes::new().i16(3).i64(7).i32(2).str("meta").i64(1_600_000_001_000).build();

        let commit = OffsetCommit::try_from_bytes(Some(key_bytes().as_slice()), Some(value.as_slice())).unwrap();
        assert_eq!(commit.key.group, "grp");
        assert_eq!(commit.key.topic, "topic1");
        assert_eq!(commit.key.partition, 3);
        assert!(!commit.is_tombstone());
        assert_eq!(commit.value.map(|v| v.offset()), Some(7));
    }

    #[test]
    fn missing_value_is_tombstone() {
        let commit = OffsetCommit::try_from_bytes_vec(Some(key_bytes()), None).unwrap();

        assert!(commit.is_tombstone());
        assert_eq!(commit.key.schema_version, 1);
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = OffsetCommit::try_from_bytes(None, Some([0x00u8, 0x00].as_slice())).unwrap_err();

        assert_eq!(err, DecodeError::MessageKeyMissing);
        assert_eq!(err.kind(), ErrorKind::MissingKey);
    }

    #[test]
    fn group_metadata_key_is_not_recognized() {
        let key = RecordBytes::new().i16(2).str("grp").build();

        assert_eq!(
            OffsetCommit::try_from_bytes(Some(key.as_slice()), None),
            Err(DecodeError::UnrecognizedKeySchema(2))
        );
    }

    #[test]
    fn value_failure_fails_the_record() {
        let value = RecordBytes::new().i16(0).i64(1).build();

        let err = OffsetCommit::try_from_bytes(Some(key_bytes().as_slice()), Some(value.as_slice())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedEncoding);
    }

    #[test]
    fn decode_skips_bad_records_independently() {
        test_logger::init();
        let good_value = RecordBytes::new().i16(2).i64(10).str("").i64(1_600_000_000_000).build();
        let bad_value = RecordBytes::new().i16(42).build();

        assert_eq!(OffsetCommit::decode(Some(key_bytes().as_slice()), Some(bad_value.as_slice())), None);
        assert_eq!(OffsetCommit::decode(None, Some(good_value.as_slice())), None);

        let commit = OffsetCommit::decode(Some(key_bytes().as_slice()), Some(good_value.as_slice())).unwrap();
        assert_eq!(commit.value.map(|v| v.offset()), Some(10));

        let warnings = test_logger::take();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].starts_with("Did not recognize value schema version 42"));
        assert!(warnings[1].starts_with("Cannot decode record without its key"));
    }

    #[test]
    fn decode_warns_once_per_skipped_part() {
        test_logger::init();
        let truncated_key = RecordBytes::new().i16(1).str("grp").build();
        let truncated_value = RecordBytes::new().i16(3).i64(7).build();

        assert_eq!(OffsetCommit::decode(Some(truncated_key.as_slice()), None), None);
        assert_eq!(OffsetCommit::decode(Some(key_bytes().as_slice()), Some(truncated_value.as_slice())), None);

        let warnings = test_logger::take();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].starts_with("Failed to parse key"));
        assert!(warnings[1].starts_with("Failed to parse value"));
    }

    #[test]
    fn decode_tombstone_without_warnings() {
        test_logger::init();

        let commit = OffsetCommit::decode(Some(key_bytes().as_slice()), None).unwrap();
        assert!(commit.is_tombstone());
        assert!(test_logger::take().is_empty());
    }

    #[test]
    fn test_types_thread_safety() {
        is_thread_safe::<OffsetCommit>();
    }
}
