// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-schema options.
//!
//! Options are fixed when a schema is compiled. They can be built in code or
//! loaded from a TOML document:
//!
//! ```toml
//! byte_order = "big"
//! bytes_policy = "reject"
//! ```

use crate::kind::ByteOrder;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// What `pack` does with a byte string longer than its fixed field.
///
/// Shorter byte strings are always padded with zero bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BytesPolicy {
    /// Silently keep the leading bytes that fit.
    #[default]
    Truncate,
    /// Fail with `EncodeError::BytesTooLong`.
    Reject,
}

/// Options fixed for the lifetime of a compiled schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaOptions {
    /// Byte order of every multi-byte field.
    pub byte_order: ByteOrder,

    /// Overlong byte string handling.
    pub bytes_policy: BytesPolicy,
}

impl SchemaOptions {
    /// Little-endian, truncating options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    pub fn with_bytes_policy(mut self, bytes_policy: BytesPolicy) -> Self {
        self.bytes_policy = bytes_policy;
        self
    }

    /// Parse options from a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load options from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::debug!("[SchemaOptions::from_file] loading {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
