#![allow(clippy::missing_errors_doc)]

use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

const RUN_CODE_DOMAIN: &str = "relay";
const RUN_CODE_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded run payload.
pub(crate) const RUN_CODE_HEADER: &str = "relay:v1";
/// Delimiter used to separate the prefix, tier, and payload.
const FIELD_DELIMITER: char = ':';

/// Shareable description of a run: seed, tier, and mission parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct RunSnapshot {
    /// Difficulty tier the run was generated against.
    pub tier: String,
    /// Seed fixed for the whole run.
    pub seed: u32,
    /// Mission difficulty scalar.
    pub mission_difficulty: f32,
    /// Number of lanes in the mission.
    pub lane_count: u32,
}

impl RunSnapshot {
    /// Encodes the snapshot into a single-line string suitable for sharing.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        let payload = SerializablePayload {
            seed: self.seed,
            mission_difficulty: self.mission_difficulty,
            lane_count: self.lane_count,
        };
        let json = serde_json::to_vec(&payload).expect("run snapshot serialization never fails");
        let encoded = STANDARD_NO_PAD.encode(json);
        format!("{RUN_CODE_HEADER}:{}:{encoded}", self.tier)
    }

    /// Decodes a snapshot from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, RunTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(RunTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(RunTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(RunTransferError::MissingVersion)?;
        let tier = parts.next().ok_or(RunTransferError::MissingTier)?;
        let payload = parts.next().ok_or(RunTransferError::MissingPayload)?;

        if domain != RUN_CODE_DOMAIN {
            return Err(RunTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != RUN_CODE_VERSION {
            return Err(RunTransferError::UnsupportedVersion(version.to_owned()));
        }
        if tier.is_empty() {
            return Err(RunTransferError::MissingTier);
        }

        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(RunTransferError::InvalidEncoding)?;
        let decoded: SerializablePayload =
            serde_json::from_slice(&bytes).map_err(RunTransferError::InvalidPayload)?;

        Ok(Self {
            tier: tier.to_owned(),
            seed: decoded.seed,
            mission_difficulty: decoded.mission_difficulty,
            lane_count: decoded.lane_count,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct SerializablePayload {
    seed: u32,
    mission_difficulty: f32,
    lane_count: u32,
}

/// Errors that can occur while decoding run codes.
#[derive(Debug)]
pub(crate) enum RunTransferError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing from the encoded run code.
    MissingPrefix,
    /// The encoded run code did not contain a version segment.
    MissingVersion,
    /// The encoded run code did not include a difficulty tier.
    MissingTier,
    /// The encoded run code did not include the payload segment.
    MissingPayload,
    /// The encoded run code used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The encoded run code used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The decoded payload could not be deserialised.
    InvalidPayload(serde_json::Error),
}

impl fmt::Display for RunTransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "run code was empty"),
            Self::MissingPrefix => write!(f, "run code is missing the prefix"),
            Self::MissingVersion => write!(f, "run code is missing the version"),
            Self::MissingTier => write!(f, "run code is missing the difficulty tier"),
            Self::MissingPayload => write!(f, "run code is missing the payload"),
            Self::InvalidPrefix(prefix) => write!(f, "run code prefix '{prefix}' is not supported"),
            Self::UnsupportedVersion(version) => {
                write!(f, "run code version '{version}' is not supported")
            }
            Self::InvalidEncoding(error) => {
                write!(f, "could not decode run payload: {error}")
            }
            Self::InvalidPayload(error) => {
                write!(f, "could not parse run payload: {error}")
            }
        }
    }
}

impl Error for RunTransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}
