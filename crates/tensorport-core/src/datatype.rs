//! Canonical tensor datatype tags.
//!
//! The wire protocol spells datatypes as uppercase strings (`"FP32"`,
//! `"INT64"`, …). Clients are not always consistent about casing, so
//! deserialization is case-insensitive and everything downstream works
//! with the canonical [`Datatype`] enum.

use crate::error::ServeError;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// V2 protocol tensor datatypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Datatype {
    Bool,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Int8,
    Int16,
    Int32,
    Int64,
    Fp16,
    Fp32,
    Fp64,
    Bytes,
}

/// Broad payload class of a datatype, used for payload validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    Boolean,
    Integer,
    Float,
    Bytes,
}

impl Datatype {
    /// Canonical wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Datatype::Bool => "BOOL",
            Datatype::Uint8 => "UINT8",
            Datatype::Uint16 => "UINT16",
            Datatype::Uint32 => "UINT32",
            Datatype::Uint64 => "UINT64",
            Datatype::Int8 => "INT8",
            Datatype::Int16 => "INT16",
            Datatype::Int32 => "INT32",
            Datatype::Int64 => "INT64",
            Datatype::Fp16 => "FP16",
            Datatype::Fp32 => "FP32",
            Datatype::Fp64 => "FP64",
            Datatype::Bytes => "BYTES",
        }
    }

    /// Parse a wire tag, case-insensitively.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let canonical = tag.to_ascii_uppercase();
        Some(match canonical.as_str() {
            "BOOL" => Datatype::Bool,
            "UINT8" => Datatype::Uint8,
            "UINT16" => Datatype::Uint16,
            "UINT32" => Datatype::Uint32,
            "UINT64" => Datatype::Uint64,
            "INT8" => Datatype::Int8,
            "INT16" => Datatype::Int16,
            "INT32" => Datatype::Int32,
            "INT64" => Datatype::Int64,
            "FP16" => Datatype::Fp16,
            "FP32" => Datatype::Fp32,
            "FP64" => Datatype::Fp64,
            "BYTES" => Datatype::Bytes,
            _ => return None,
        })
    }

    /// Payload class for validation purposes.
    pub fn kind(&self) -> DataKind {
        match self {
            Datatype::Bool => DataKind::Boolean,
            Datatype::Uint8
            | Datatype::Uint16
            | Datatype::Uint32
            | Datatype::Uint64
            | Datatype::Int8
            | Datatype::Int16
            | Datatype::Int32
            | Datatype::Int64 => DataKind::Integer,
            Datatype::Fp16 | Datatype::Fp32 | Datatype::Fp64 => DataKind::Float,
            Datatype::Bytes => DataKind::Bytes,
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Datatype {
    type Err = ServeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Datatype::from_tag(s)
            .ok_or_else(|| ServeError::InvalidInput(format!("unknown datatype '{s}'")))
    }
}

impl Serialize for Datatype {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Datatype {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Datatype::from_tag(&tag)
            .ok_or_else(|| de::Error::custom(format!("unknown datatype '{tag}'")))
    }
}
