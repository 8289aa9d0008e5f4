use bytes_parser::BytesParser;
use log::{trace, warn};

use crate::errors::DecodeError;
use crate::utils::{parse_i16, parse_i32, parse_str};

pub(crate) const KEY_V0_OFFSET_COMMIT: i16 = 0;
pub(crate) const KEY_V1_OFFSET_COMMIT: i16 = 1;

/// Key of an offset commit record in `__consumer_offsets`.
///
/// It says _which_ commit this record is about: the offset that consumer group [`Self::group`]
/// committed for partition [`Self::partition`] of topic [`Self::topic`].
///
/// Kafka materialises this via the generated `OffsetCommitKey` class: key schema versions `0` and `1`
/// share the same layout. Key schema version `2` is used by group metadata records, which this
/// crate does not decode.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffsetCommitKey {
    /// First 2-bytes integer of the key, identifying its layout.
    pub schema_version: i16,

    /// Consumer group that committed the offset.
    pub group: String,

    /// Topic the committed offset refers to.
    pub topic: String,

    /// Partition (of [`Self::topic`]) the committed offset refers to.
    pub partition: i32,
}

impl OffsetCommitKey {
    /// Decodes an [`OffsetCommitKey`] from the raw bytes of a record key.
    ///
    /// Bytes left over after [`Self::partition`] are ignored.
    ///
    /// # Errors
    ///
    /// * [`DecodeError::UnrecognizedKeySchema`] if the schema version is neither `0` nor `1`.
    /// * [`DecodeError::ByteParsing`] if the key is truncated or a string is not valid UTF-8.
    pub fn try_from_bytes(key: &[u8]) -> Result<Self, DecodeError> {
        let mut parser = BytesParser::from(key);

        let schema_version = parse_i16(&mut parser)?;
        match schema_version {
            KEY_V0_OFFSET_COMMIT | KEY_V1_OFFSET_COMMIT => Self::try_from(&mut parser, schema_version),
            _ => Err(DecodeError::UnrecognizedKeySchema(schema_version)),
        }
    }

    /// Same as [`Self::try_from_bytes`], but logs a warning and returns `None` on failure.
    pub fn decode(key: &[u8]) -> Option<Self> {
        match Self::try_from_bytes(key) {
            Ok(k) => {
                trace!("Decoded offset commit key (schema v{}): {}/{}", k.schema_version, k.topic, k.partition);
                Some(k)
            },
            Err(e) => {
                warn_skipped_key(key, &e);
                None
            },
        }
    }

    /// Parses the fields that follow the schema version.
    ///
    /// This is based on the generated `kafka.internals.generated.OffsetCommitKey#read` method.
    fn try_from(parser: &mut BytesParser, schema_version: i16) -> Result<Self, DecodeError> {
        Ok(OffsetCommitKey {
            schema_version,
            group: parse_str(parser)?,
            topic: parse_str(parser)?,
            partition: parse_i32(parser)?,
        })
    }
}

pub(crate) fn warn_skipped_key(key: &[u8], e: &DecodeError) {
    match e {
        DecodeError::UnrecognizedKeySchema(v) => {
            warn!("Unrecognized key schema version {v}: not parsing key {key:02x?}")
        },
        _ => warn!("Failed to parse key {key:02x?}: {e}"),
    }
}
