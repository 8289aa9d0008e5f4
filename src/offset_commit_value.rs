use bytes_parser::BytesParser;
use log::{trace, warn};

use crate::errors::DecodeError;
use crate::utils::{parse_i16, parse_i32, parse_i64, parse_str, parse_timestamp};
use crate::Timestamp;

/// Value of an offset commit record in `__consumer_offsets`.
///
/// Each variant corresponds to one schema version of the generated `OffsetCommitValue` class.
/// The layout of a variant is fixed by its version, so a variant is only ever built with all of
/// its fields parsed.
///
/// | Version | Layout |
/// |---|---|
/// | 0 | offset, metadata, commit timestamp |
/// | 1 | offset, metadata, commit timestamp, expire timestamp |
/// | 2 | offset, metadata, commit timestamp |
/// | 3 | offset, leader epoch, metadata, commit timestamp |
///
/// **NOTE:** The type of the timestamps is controlled by the `ts_*` feature flags.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OffsetCommitValue {
    V0 {
        offset: i64,
        metadata: String,
        commit_timestamp: Timestamp,
    },

    /// Only version carrying an explicit expiration; later versions leave it to the broker.
    V1 {
        offset: i64,
        metadata: String,
        commit_timestamp: Timestamp,
        expire_timestamp: Timestamp,
    },

    V2 {
        offset: i64,
        metadata: String,
        commit_timestamp: Timestamp,
    },

    /// The leader epoch is present on the wire, but it's not retained.
    V3 {
        offset: i64,
        metadata: String,
        commit_timestamp: Timestamp,
    },
}

impl OffsetCommitValue {
    /// Decodes an [`OffsetCommitValue`] from the raw bytes of a record value.
    ///
    /// Bytes left over after the last field of the detected version are ignored:
    /// newer brokers may append fields this crate does not know about.
    ///
    /// # Errors
    ///
    /// * [`DecodeError::UnrecognizedValueSchema`] if the schema version is not in `0..=3`.
    /// * [`DecodeError::ByteParsing`] if the value is truncated or the metadata is not valid UTF-8.
    /// * [`DecodeError::InvalidTimestamp`] if a timestamp doesn't fit the selected timestamp type.
    pub fn try_from_bytes(value: &[u8]) -> Result<Self, DecodeError> {
        let mut parser = BytesParser::from(value);

        match parse_i16(&mut parser)? {
            0 => Self::parse_v0(&mut parser),
            1 => Self::parse_v1(&mut parser),
            2 => Self::parse_v2(&mut parser),
            3 => Self::parse_v3(&mut parser),
            v => Err(DecodeError::UnrecognizedValueSchema(v)),
        }
    }

    /// Same as [`Self::try_from_bytes`], but logs a warning and returns `None` on failure.
    pub fn decode(value: &[u8]) -> Option<Self> {
        match Self::try_from_bytes(value) {
            Ok(v) => {
                trace!("Decoded offset commit value (schema v{}): offset {}", v.schema_version(), v.offset());
                Some(v)
            },
            Err(e) => {
                warn_skipped_value(value, &e);
                None
            },
        }
    }

    fn parse_v0(parser: &mut BytesParser) -> Result<Self, DecodeError> {
        Ok(Self::V0 {
            offset: parse_i64(parser)?,
            metadata: parse_str(parser)?,
            commit_timestamp: parse_timestamp(parser)?,
        })
    }

    fn parse_v1(parser: &mut BytesParser) -> Result<Self, DecodeError> {
        Ok(Self::V1 {
            offset: parse_i64(parser)?,
            metadata: parse_str(parser)?,
            commit_timestamp: parse_timestamp(parser)?,
            expire_timestamp: parse_timestamp(parser)?,
        })
    }

    fn parse_v2(parser: &mut BytesParser) -> Result<Self, DecodeError> {
        Ok(Self::V2 {
            offset: parse_i64(parser)?,
            metadata: parse_str(parser)?,
            commit_timestamp: parse_timestamp(parser)?,
        })
    }

    fn parse_v3(parser: &mut BytesParser) -> Result<Self, DecodeError> {
        let offset = parse_i64(parser)?;
        let _leader_epoch = parse_i32(parser)?;

        Ok(Self::V3 {
            offset,
            metadata: parse_str(parser)?,
            commit_timestamp: parse_timestamp(parser)?,
        })
    }

    /// Schema version this value was decoded from.
    pub fn schema_version(&self) -> i16 {
        match self {
            Self::V0 { .. } => 0,
            Self::V1 { .. } => 1,
            Self::V2 { .. } => 2,
            Self::V3 { .. } => 3,
        }
    }

    /// Offset committed by the consumer group.
    pub fn offset(&self) -> i64 {
        match self {
            Self::V0 { offset, .. } | Self::V1 { offset, .. } | Self::V2 { offset, .. } | Self::V3 { offset, .. } => {
                *offset
            },
        }
    }

    /// Free-form metadata the consumer attached to the commit.
    pub fn metadata(&self) -> &str {
        match self {
            Self::V0 { metadata, .. }
            | Self::V1 { metadata, .. }
            | Self::V2 { metadata, .. }
            | Self::V3 { metadata, .. } => metadata,
        }
    }

    /// When the offset was committed.
    pub fn commit_timestamp(&self) -> &Timestamp {
        match self {
            Self::V0 { commit_timestamp, .. }
            | Self::V1 { commit_timestamp, .. }
            | Self::V2 { commit_timestamp, .. }
            | Self::V3 { commit_timestamp, .. } => commit_timestamp,
        }
    }

    /// When the committed offset expires. Only set by schema version `1`.
    pub fn expire_timestamp(&self) -> Option<&Timestamp> {
        match self {
            Self::V1 { expire_timestamp, .. } => Some(expire_timestamp),
            _ => None,
        }
    }
}

pub(crate) fn warn_skipped_value(value: &[u8], e: &DecodeError) {
    match e {
        DecodeError::UnrecognizedValueSchema(v) => {
            warn!("Did not recognize value schema version {v}: not parsing value {value:02x?}")
        },
        _ => warn!("Failed to parse value {value:02x?}: {e}"),
    }
}
