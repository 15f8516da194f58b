// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field descriptors.

use crate::error::SchemaError;
use crate::kind::FieldKind;

/// One declared field of a record.
///
/// The `index` decides where the field lands in the record, independently of
/// the order in which fields are declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    name: String,
    kind: FieldKind,
    index: u32,
}

impl FieldDescriptor {
    /// Create a field descriptor.
    ///
    /// Fails with [`SchemaError::MissingLength`] for a zero-length
    /// `FixedBytes` kind.
    pub fn new(
        name: impl Into<String>,
        kind: FieldKind,
        index: u32,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        if let FieldKind::FixedBytes { length: 0 } = kind {
            return Err(SchemaError::MissingLength { field: name });
        }
        Ok(Self { name, kind, index })
    }

    /// Create a fixed bytes field. `length` must be present and positive.
    pub fn fixed_bytes(
        name: impl Into<String>,
        index: u32,
        length: Option<usize>,
    ) -> Result<Self, SchemaError> {
        match length {
            Some(length) => Self::new(name, FieldKind::FixedBytes { length }, index),
            None => Err(SchemaError::MissingLength { field: name.into() }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// Width in bytes on the wire.
    pub fn width(&self) -> usize {
        self.kind.width()
    }
}
