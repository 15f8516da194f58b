// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema compilation.
//!
//! A schema is an unordered set of [`FieldDescriptor`]s. Compiling it sorts
//! the fields by their declared index and assigns each one a byte offset,
//! producing an immutable [`Layout`]:
//!
//! ```text
//! declared:  message: fixed_bytes(16) @1, id: uint8 @0
//!
//! offset  0      1                                  17
//!         +------+----------------------------------+
//!         |  id  |             message              |
//!         +------+----------------------------------+
//! ```
//!
//! Fields are packed back to back, without alignment padding.

use crate::config::{BytesPolicy, SchemaOptions};
use crate::error::SchemaError;
use crate::field::FieldDescriptor;
use crate::kind::{ByteOrder, FieldKind};
use std::collections::HashSet;

/// A field placed in a compiled layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutField {
    descriptor: FieldDescriptor,
    offset: usize,
}

impl LayoutField {
    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    pub fn kind(&self) -> FieldKind {
        self.descriptor.kind()
    }

    /// Byte offset from the start of the record.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn width(&self) -> usize {
        self.descriptor.width()
    }

    /// Byte range covered by this field.
    pub fn span(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.width()
    }
}

/// Compiled, immutable record layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    name: String,
    fields: Vec<LayoutField>,
    total_size: usize,
    options: SchemaOptions,
}

impl Layout {
    /// Schema name (empty when compiled without one).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in wire order (ascending index).
    pub fn fields(&self) -> &[LayoutField] {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Size of a packed record in bytes.
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    pub fn options(&self) -> SchemaOptions {
        self.options
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.options.byte_order
    }

    pub fn bytes_policy(&self) -> BytesPolicy {
        self.options.bytes_policy
    }

    /// Field names in wire order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(LayoutField::name)
    }

    /// Get field by name.
    pub fn field(&self, name: &str) -> Option<&LayoutField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Wire position of a field by name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == name)
    }

    /// Struct-module style format string, e.g. `<B16s`.
    pub fn format_string(&self) -> String {
        let mut out = String::with_capacity(1 + self.fields.len() * 2);
        out.push(self.byte_order().prefix());
        for field in &self.fields {
            out.push_str(&field.kind().format_code());
        }
        out
    }
}

/// Compile descriptors into a little-endian, truncating, unnamed layout.
pub fn compile<I>(fields: I) -> Result<Layout, SchemaError>
where
    I: IntoIterator<Item = FieldDescriptor>,
{
    compile_with("", fields, SchemaOptions::default())
}

/// Compile descriptors into a named layout with explicit options.
///
/// Declaration order is irrelevant: the same set of descriptors always yields
/// the same layout.
pub fn compile_with<I>(
    name: impl Into<String>,
    fields: I,
    options: SchemaOptions,
) -> Result<Layout, SchemaError>
where
    I: IntoIterator<Item = FieldDescriptor>,
{
    let name = name.into();
    let mut descriptors: Vec<FieldDescriptor> = fields.into_iter().collect();

    let mut seen = HashSet::with_capacity(descriptors.len());
    for desc in &descriptors {
        if !seen.insert(desc.name()) {
            return Err(SchemaError::DuplicateName {
                name: desc.name().to_string(),
            });
        }
    }

    descriptors.sort_by_key(FieldDescriptor::index);
    if let Some(pair) = descriptors
        .windows(2)
        .find(|pair| pair[0].index() == pair[1].index())
    {
        // Report in a stable order regardless of how the set was declared.
        let (first, second) = if pair[0].name() <= pair[1].name() {
            (&pair[0], &pair[1])
        } else {
            (&pair[1], &pair[0])
        };
        return Err(SchemaError::DuplicateIndex {
            index: first.index(),
            first: first.name().to_string(),
            second: second.name().to_string(),
        });
    }

    let mut offset = 0usize;
    let mut placed = Vec::with_capacity(descriptors.len());
    for descriptor in descriptors {
        let next = offset
            .checked_add(descriptor.width())
            .ok_or_else(|| SchemaError::SizeOverflow {
                field: descriptor.name().to_string(),
            })?;
        placed.push(LayoutField { descriptor, offset });
        offset = next;
    }

    let layout = Layout {
        name,
        fields: placed,
        total_size: offset,
        options,
    };

    log::debug!(
        "[schema::compile] '{}' -> {} fields, {} bytes ({})",
        layout.name,
        layout.fields.len(),
        layout.total_size,
        layout.format_string()
    );

    Ok(layout)
}

/// Fluent builder for declaring and compiling a schema.
///
/// ```
/// use packrec::{FieldKind, SchemaBuilder};
///
/// let layout = SchemaBuilder::new("StringTest")
///     .fixed_bytes("message", 1, 16)
///     .field("id", FieldKind::UInt8, 0)
///     .build()
///     .unwrap();
///
/// assert_eq!(layout.total_size(), 17);
/// assert_eq!(layout.field_names().collect::<Vec<_>>(), ["id", "message"]);
/// ```
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<(String, FieldKind, u32)>,
    options: SchemaOptions,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            options: SchemaOptions::default(),
        }
    }

    /// Declare a field.
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind, index: u32) -> Self {
        self.fields.push((name.into(), kind, index));
        self
    }

    /// Declare a fixed bytes field.
    pub fn fixed_bytes(self, name: impl Into<String>, index: u32, length: usize) -> Self {
        self.field(name, FieldKind::FixedBytes { length }, index)
    }

    pub fn options(mut self, options: SchemaOptions) -> Self {
        self.options = options;
        self
    }

    pub fn byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.options.byte_order = byte_order;
        self
    }

    pub fn bytes_policy(mut self, bytes_policy: BytesPolicy) -> Self {
        self.options.bytes_policy = bytes_policy;
        self
    }

    /// Validate the declared fields and compile the layout.
    pub fn build(self) -> Result<Layout, SchemaError> {
        let descriptors = self
            .fields
            .into_iter()
            .map(|(name, kind, index)| FieldDescriptor::new(name, kind, index))
            .collect::<Result<Vec<_>, _>>()?;
        compile_with(self.name, descriptors, self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(name: &str, kind: FieldKind, index: u32) -> FieldDescriptor {
        FieldDescriptor::new(name, kind, index).expect("valid field")
    }

    #[test]
    fn test_offsets_follow_index_order() {
        let layout = compile(vec![
            desc("message", FieldKind::FixedBytes { length: 16 }, 1),
            desc("id", FieldKind::UInt8, 0),
        ])
        .expect("compile");

        assert_eq!(layout.len(), 2);
        assert_eq!(layout.total_size(), 17);
        assert_eq!(layout.fields()[0].name(), "id");
        assert_eq!(layout.fields()[0].offset(), 0);
        assert_eq!(layout.fields()[1].name(), "message");
        assert_eq!(layout.fields()[1].offset(), 1);
        assert_eq!(layout.fields()[1].span(), 1..17);
        assert_eq!(layout.byte_order(), ByteOrder::Little);
    }

    #[test]
    fn test_sparse_indices() {
        let layout = compile(vec![
            desc("c", FieldKind::UInt16, 40),
            desc("a", FieldKind::Int64, 2),
            desc("b", FieldKind::Float32, 17),
        ])
        .expect("compile");

        let offsets: Vec<_> = layout.fields().iter().map(|f| f.offset()).collect();
        assert_eq!(offsets, [0, 8, 12]);
        assert_eq!(layout.total_size(), 14);
        assert_eq!(layout.position("c"), Some(2));
        assert!(layout.field("missing").is_none());
    }

    #[test]
    fn test_declaration_order_is_irrelevant() {
        let forward = compile(vec![
            desc("a", FieldKind::UInt8, 0),
            desc("b", FieldKind::Int32, 1),
            desc("c", FieldKind::Float64, 2),
        ])
        .expect("compile");
        let reverse = compile(vec![
            desc("c", FieldKind::Float64, 2),
            desc("b", FieldKind::Int32, 1),
            desc("a", FieldKind::UInt8, 0),
        ])
        .expect("compile");

        assert_eq!(forward, reverse);
    }

    #[test]
    fn test_duplicate_index() {
        let err = compile(vec![
            desc("b", FieldKind::UInt8, 3),
            desc("a", FieldKind::UInt8, 3),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            SchemaError::DuplicateIndex {
                index: 3,
                first: "a".into(),
                second: "b".into(),
            }
        );
    }

    #[test]
    fn test_duplicate_name() {
        let err = compile(vec![
            desc("a", FieldKind::UInt8, 0),
            desc("a", FieldKind::UInt16, 1),
        ])
        .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateName { name: "a".into() });
    }

    #[test]
    fn test_size_overflow() {
        let err = compile(vec![
            desc("a", FieldKind::FixedBytes { length: usize::MAX }, 0),
            desc("b", FieldKind::UInt8, 1),
        ])
        .unwrap_err();
        assert_eq!(err, SchemaError::SizeOverflow { field: "b".into() });
    }

    #[test]
    fn test_empty_schema() {
        let layout = compile(Vec::new()).expect("compile");
        assert!(layout.is_empty());
        assert_eq!(layout.total_size(), 0);
        assert_eq!(layout.format_string(), "<");
    }

    #[test]
    fn test_format_string() {
        let layout = SchemaBuilder::new("MultipleTest")
            .field("u_char", FieldKind::UInt8, 0)
            .field("char", FieldKind::Int8, 1)
            .field("short", FieldKind::Int16, 2)
            .field("u_short", FieldKind::UInt16, 3)
            .field("int", FieldKind::Int32, 4)
            .field("u_int", FieldKind::UInt32, 5)
            .field("long", FieldKind::Int64, 6)
            .field("u_long", FieldKind::UInt64, 7)
            .field("float", FieldKind::Float32, 8)
            .field("double", FieldKind::Float64, 9)
            .fixed_bytes("string", 12, 11)
            .byte_order(ByteOrder::Big)
            .build()
            .expect("compile");

        assert_eq!(layout.format_string(), ">BbhHiIqQfd11s");
        assert_eq!(layout.total_size(), 1 + 1 + 2 + 2 + 4 + 4 + 8 + 8 + 4 + 8 + 11);
        assert_eq!(layout.name(), "MultipleTest");
    }

    #[test]
    fn test_builder_rejects_zero_length_bytes() {
        let err = SchemaBuilder::new("Bad")
            .field("id", FieldKind::UInt8, 0)
            .fixed_bytes("name", 1, 0)
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::MissingLength { field: "name".into() });
    }

    #[test]
    fn test_builder_options() {
        let layout = SchemaBuilder::new("Opts")
            .field("id", FieldKind::UInt8, 0)
            .options(SchemaOptions::new().with_bytes_policy(BytesPolicy::Reject))
            .byte_order(ByteOrder::Big)
            .build()
            .expect("compile");
        assert_eq!(layout.byte_order(), ByteOrder::Big);
        assert_eq!(layout.bytes_policy(), BytesPolicy::Reject);
    }
}
