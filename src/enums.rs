// src/enums.rs
//! Public enum types used throughout the crate
//!
//! Central location for the user-visible choices (padding mode) and the
//! labels attached to per-record failures (stage, store operation).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// RSA encryption padding both the sealing side and this pipeline must agree on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum PaddingMode {
    /// OAEP with SHA-1 digest, MGF1-SHA-1 and an empty label
    #[default]
    #[serde(alias = "oaep")]
    OaepSha1,
    /// OAEP with SHA-256 digest, MGF1-SHA-256 and an empty label
    OaepSha256,
    /// PKCS#1 v1.5 encryption padding
    #[serde(alias = "pkcs1", alias = "pkcs1-v1_5")]
    Pkcs1v15,
}

impl PaddingMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            PaddingMode::OaepSha1 => "oaep-sha1",
            PaddingMode::OaepSha256 => "oaep-sha256",
            PaddingMode::Pkcs1v15 => "pkcs1v15",
        }
    }
}

impl fmt::Display for PaddingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaddingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "oaep" | "oaep-sha1" => Ok(PaddingMode::OaepSha1),
            "oaep-sha256" => Ok(PaddingMode::OaepSha256),
            "pkcs1" | "pkcs1v15" | "pkcs1-v1_5" => Ok(PaddingMode::Pkcs1v15),
            other => Err(format!(
                "unknown padding mode '{other}' (expected oaep-sha1, oaep-sha256 or pkcs1v15)"
            )),
        }
    }
}

/// Where a single record was when it stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStage {
    Fetching,
    Decrypting,
    Uploading,
    Deleting,
    Done,
}

impl fmt::Display for RecordStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordStage::Fetching => "fetching",
            RecordStage::Decrypting => "decrypting",
            RecordStage::Uploading => "uploading",
            RecordStage::Deleting => "deleting",
            RecordStage::Done => "done",
        };
        f.write_str(label)
    }
}

/// Object store operation, attached to `StoreUnavailable`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreOp {
    Get,
    Put,
    Delete,
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StoreOp::Get => "get",
            StoreOp::Put => "put",
            StoreOp::Delete => "delete",
        };
        f.write_str(label)
    }
}
