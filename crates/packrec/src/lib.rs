// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # packrec - fixed-layout binary records
//!
//! Declare a record as a set of typed fields, compile it once into an
//! immutable [`Layout`], then pack and unpack byte-exact records against it.
//!
//! ## Quick Start
//!
//! ```rust
//! use packrec::{values, Codec, FieldKind, SchemaBuilder, Value};
//!
//! fn main() -> packrec::Result<()> {
//!     let codec = Codec::new(
//!         SchemaBuilder::new("StringTest")
//!             .fixed_bytes("message", 1, 16)
//!             .field("id", FieldKind::UInt8, 0)
//!             .build()?,
//!     );
//!
//!     // Values follow index order: id (0) then message (1).
//!     let packed = codec.pack(&values![1u8, "Hello World!"])?;
//!     assert_eq!(packed.len(), 17);
//!
//!     let unpacked = codec.unpack(&packed)?;
//!     assert_eq!(unpacked[0], Value::Int(1));
//!     assert_eq!(unpacked[1].as_bytes(), Some(&b"Hello World!\0\0\0\0"[..]));
//!     Ok(())
//! }
//! ```
//!
//! ## Wire Format
//!
//! ```text
//! +----------+----------+-----+----------+
//! | field @0 | field @1 | ... | field @n |   total_size bytes
//! +----------+----------+-----+----------+
//! ```
//!
//! - Fields in ascending index order, back to back, no alignment padding
//! - One byte order per schema (little-endian unless configured)
//! - Integers in two's complement, floats in IEEE-754
//! - Fixed bytes zero-padded to their declared length
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`FieldKind`] | Primitive field kinds with fixed widths and ranges |
//! | [`FieldDescriptor`] | A named field with a kind and an ordering index |
//! | [`SchemaBuilder`] | Fluent declaration of a schema |
//! | [`Layout`] | Compiled, immutable record layout |
//! | [`Codec`] | Pack/unpack bound to a shared layout |
//! | [`Record`] | Named-field view of a decoded record |
//!
//! A [`Layout`] and a [`Codec`] are immutable once built and may be shared
//! across threads without locking.

pub mod adapter;
pub mod codec;
pub mod config;
pub mod error;
pub mod field;
pub mod kind;
pub mod schema;
pub mod value;

pub use adapter::{
    from_mapping, from_struct, from_structure, to_mapping, to_struct, to_structure, Mapping,
    Record,
};
pub use codec::{pack, pack_into, unpack, Codec};
pub use config::{BytesPolicy, ConfigError, SchemaOptions};
pub use error::{AdapterError, DecodeError, EncodeError, Error, Result, SchemaError};
pub use field::FieldDescriptor;
pub use kind::{ByteOrder, FieldKind, IntRange};
pub use schema::{compile, compile_with, Layout, LayoutField, SchemaBuilder};
pub use value::Value;
