// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types.
//!
//! One enum per stage: schema compilation, packing, unpacking and the
//! mapping/structure adapters. All of them fold into [`Error`] for callers
//! that chain several stages.

use crate::config::ConfigError;
use crate::kind::FieldKind;
use thiserror::Error;

/// Schema declaration and compilation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("fields '{first}' and '{second}' share index {index}")]
    DuplicateIndex {
        index: u32,
        first: String,
        second: String,
    },

    #[error("fixed bytes field '{field}' requires a positive length")]
    MissingLength { field: String },

    #[error("field name '{name}' declared more than once")]
    DuplicateName { name: String },

    #[error("record size overflows at field '{field}'")]
    SizeOverflow { field: String },
}

/// Errors raised by `pack`. No bytes are produced when one is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("pack requires exactly {expected} values, got {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("value {value} out of range for {kind} field '{field}'")]
    OutOfRange {
        field: String,
        kind: FieldKind,
        value: String,
    },

    #[error("{kind} field '{field}' cannot hold a {found} value")]
    KindMismatch {
        field: String,
        kind: FieldKind,
        found: &'static str,
    },

    #[error("field '{field}' holds {max} bytes, got {length}")]
    BytesTooLong {
        field: String,
        length: usize,
        max: usize,
    },

    #[error("buffer too small: need {need} bytes, have {have}")]
    BufferTooSmall { need: usize, have: usize },
}

/// Errors raised by `unpack`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unpack requires a buffer of {expected} bytes, got {found}")]
    BufferSizeMismatch { expected: usize, found: usize },
}

/// Errors raised converting between ordered values and mappings/structures.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("layout has {expected} fields, got {found} values")]
    ArityMismatch { expected: usize, found: usize },

    #[error("missing field '{field}'")]
    MissingField { field: String },

    #[error("serialized value is not a struct")]
    NotAStruct,

    #[error("field '{field}': {reason}")]
    Unrepresentable { field: String, reason: String },

    #[error("JSON bridge error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Any packrec error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SchemaError::DuplicateIndex {
            index: 3,
            first: "a".into(),
            second: "b".into(),
        };
        assert_eq!(err.to_string(), "fields 'a' and 'b' share index 3");

        let err = EncodeError::OutOfRange {
            field: "value".into(),
            kind: FieldKind::Int32,
            value: "4294967297".into(),
        };
        assert_eq!(
            err.to_string(),
            "value 4294967297 out of range for int32 field 'value'"
        );

        let err = DecodeError::BufferSizeMismatch {
            expected: 4,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "unpack requires a buffer of 4 bytes, got 2"
        );
    }

    #[test]
    fn test_error_wraps_stage_errors() {
        let err: Error = DecodeError::BufferSizeMismatch {
            expected: 4,
            found: 0,
        }
        .into();
        assert!(matches!(err, Error::Decode(_)));

        let err: Error = AdapterError::MissingField {
            field: "id".into(),
        }
        .into();
        assert_eq!(err.to_string(), "missing field 'id'");
    }
}
