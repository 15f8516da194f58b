// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Primitive field kinds and their fixed wire properties.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive field kinds.
///
/// Every kind except [`FieldKind::FixedBytes`] has a fixed width and a fixed
/// numeric range. `FixedBytes` is as wide as its declared length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    FixedBytes { length: usize },
}

impl FieldKind {
    /// Width in bytes on the wire.
    pub const fn width(&self) -> usize {
        match self {
            Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Int64 | Self::UInt64 | Self::Float64 => 8,
            Self::FixedBytes { length } => *length,
        }
    }

    /// Legal value range for integer kinds (None for floats and bytes).
    pub const fn range(&self) -> Option<IntRange> {
        let range = match self {
            Self::Int8 => IntRange::new(i8::MIN as i128, i8::MAX as i128),
            Self::UInt8 => IntRange::new(0, u8::MAX as i128),
            Self::Int16 => IntRange::new(i16::MIN as i128, i16::MAX as i128),
            Self::UInt16 => IntRange::new(0, u16::MAX as i128),
            Self::Int32 => IntRange::new(i32::MIN as i128, i32::MAX as i128),
            Self::UInt32 => IntRange::new(0, u32::MAX as i128),
            Self::Int64 => IntRange::new(i64::MIN as i128, i64::MAX as i128),
            Self::UInt64 => IntRange::new(0, u64::MAX as i128),
            Self::Float32 | Self::Float64 | Self::FixedBytes { .. } => return None,
        };
        Some(range)
    }

    pub const fn is_integer(&self) -> bool {
        self.range().is_some()
    }

    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    pub const fn is_bytes(&self) -> bool {
        matches!(self, Self::FixedBytes { .. })
    }

    pub const fn is_signed(&self) -> bool {
        matches!(
            self,
            Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64 | Self::Float32 | Self::Float64
        )
    }

    /// Struct-module style format code (`b`, `H`, `f`, `16s`, ...).
    pub fn format_code(&self) -> String {
        let code = match self {
            Self::Int8 => "b",
            Self::UInt8 => "B",
            Self::Int16 => "h",
            Self::UInt16 => "H",
            Self::Int32 => "i",
            Self::UInt32 => "I",
            Self::Int64 => "q",
            Self::UInt64 => "Q",
            Self::Float32 => "f",
            Self::Float64 => "d",
            Self::FixedBytes { length } => return format!("{}s", length),
        };
        code.to_string()
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int8 => write!(f, "int8"),
            Self::UInt8 => write!(f, "uint8"),
            Self::Int16 => write!(f, "int16"),
            Self::UInt16 => write!(f, "uint16"),
            Self::Int32 => write!(f, "int32"),
            Self::UInt32 => write!(f, "uint32"),
            Self::Int64 => write!(f, "int64"),
            Self::UInt64 => write!(f, "uint64"),
            Self::Float32 => write!(f, "float32"),
            Self::Float64 => write!(f, "float64"),
            Self::FixedBytes { length } => write!(f, "fixed_bytes({})", length),
        }
    }
}

/// Inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntRange {
    pub min: i128,
    pub max: i128,
}

impl IntRange {
    pub const fn new(min: i128, max: i128) -> Self {
        Self { min, max }
    }

    pub const fn contains(&self, value: i128) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Byte order of every multi-byte field in a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

impl ByteOrder {
    /// Format string prefix (`<` or `>`).
    pub const fn prefix(&self) -> char {
        match self {
            Self::Little => '<',
            Self::Big => '>',
        }
    }
}
