// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Binary codec: ordered values <-> fixed-size records.
//!
//! Every field is written at its compiled offset using the layout's byte
//! order. `pack` validates all values before writing any byte, so a failed
//! call never leaves a partially encoded record behind.

use crate::adapter::{self, Mapping, Record};
use crate::config::BytesPolicy;
use crate::error::{DecodeError, EncodeError, Result};
use crate::kind::{ByteOrder, FieldKind};
use crate::schema::{Layout, LayoutField};
use crate::value::Value;
use byteorder::{BigEndian, ByteOrder as Endian, LittleEndian};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// A value checked against its field and narrowed to the wire type.
#[derive(Debug, Clone, Copy)]
enum Scalar<'a> {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Bytes(&'a [u8]),
}

/// Pack `values` (in layout order) into a new record buffer.
pub fn pack(layout: &Layout, values: &[Value]) -> std::result::Result<Vec<u8>, EncodeError> {
    let mut buf = vec![0u8; layout.total_size()];
    pack_into(layout, values, &mut buf)?;
    Ok(buf)
}

/// Pack `values` at the start of `buf`, returning the number of bytes written.
///
/// Bytes past `layout.total_size()` are left untouched.
pub fn pack_into(
    layout: &Layout,
    values: &[Value],
    buf: &mut [u8],
) -> std::result::Result<usize, EncodeError> {
    if values.len() != layout.len() {
        return Err(EncodeError::ArityMismatch {
            expected: layout.len(),
            found: values.len(),
        });
    }

    let need = layout.total_size();
    if buf.len() < need {
        return Err(EncodeError::BufferTooSmall {
            need,
            have: buf.len(),
        });
    }

    let policy = layout.bytes_policy();
    let scalars = layout
        .fields()
        .iter()
        .zip(values)
        .map(|(field, value)| prepare(field, value, policy))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let out = &mut buf[..need];
    match layout.byte_order() {
        ByteOrder::Little => write_fields::<LittleEndian>(layout, &scalars, out),
        ByteOrder::Big => write_fields::<BigEndian>(layout, &scalars, out),
    }
    Ok(need)
}

/// Unpack a record into values in layout order.
///
/// `bytes` must be exactly `layout.total_size()` long. Fixed bytes fields are
/// returned at their full declared length, padding included.
pub fn unpack(layout: &Layout, bytes: &[u8]) -> std::result::Result<Vec<Value>, DecodeError> {
    if bytes.len() != layout.total_size() {
        return Err(DecodeError::BufferSizeMismatch {
            expected: layout.total_size(),
            found: bytes.len(),
        });
    }

    let values = match layout.byte_order() {
        ByteOrder::Little => read_fields::<LittleEndian>(layout, bytes),
        ByteOrder::Big => read_fields::<BigEndian>(layout, bytes),
    };
    Ok(values)
}

fn prepare<'a>(
    field: &LayoutField,
    value: &'a Value,
    policy: BytesPolicy,
) -> std::result::Result<Scalar<'a>, EncodeError> {
    let scalar = match (field.kind(), value) {
        (FieldKind::Int8, Value::Int(v)) => Scalar::I8(check_int(field, *v)? as i8),
        (FieldKind::UInt8, Value::Int(v)) => Scalar::U8(check_int(field, *v)? as u8),
        (FieldKind::Int16, Value::Int(v)) => Scalar::I16(check_int(field, *v)? as i16),
        (FieldKind::UInt16, Value::Int(v)) => Scalar::U16(check_int(field, *v)? as u16),
        (FieldKind::Int32, Value::Int(v)) => Scalar::I32(check_int(field, *v)? as i32),
        (FieldKind::UInt32, Value::Int(v)) => Scalar::U32(check_int(field, *v)? as u32),
        (FieldKind::Int64, Value::Int(v)) => Scalar::I64(check_int(field, *v)? as i64),
        (FieldKind::UInt64, Value::Int(v)) => Scalar::U64(check_int(field, *v)? as u64),
        (FieldKind::Float32, Value::Float(v)) => Scalar::F32(check_f32(field, *v)?),
        (FieldKind::Float32, Value::Int(v)) => Scalar::F32(check_f32(field, *v as f64)?),
        (FieldKind::Float64, Value::Float(v)) => Scalar::F64(*v),
        (FieldKind::Float64, Value::Int(v)) => Scalar::F64(*v as f64),
        (FieldKind::FixedBytes { length }, Value::Bytes(bytes)) => {
            if bytes.len() > length && policy == BytesPolicy::Reject {
                return Err(EncodeError::BytesTooLong {
                    field: field.name().to_string(),
                    length: bytes.len(),
                    max: length,
                });
            }
            Scalar::Bytes(&bytes[..bytes.len().min(length)])
        }
        (kind, other) => {
            return Err(EncodeError::KindMismatch {
                field: field.name().to_string(),
                kind,
                found: other.type_name(),
            })
        }
    };
    Ok(scalar)
}

fn check_int(field: &LayoutField, value: i128) -> std::result::Result<i128, EncodeError> {
    match field.kind().range() {
        Some(range) if range.contains(value) => Ok(value),
        _ => Err(out_of_range(field, value)),
    }
}

/// Finite values beyond the f32 range cannot be represented; NaN and the
/// infinities are passed through.
fn check_f32(field: &LayoutField, value: f64) -> std::result::Result<f32, EncodeError> {
    if value.is_finite() && value.abs() > f64::from(f32::MAX) {
        return Err(out_of_range(field, value));
    }
    Ok(value as f32)
}

fn out_of_range(field: &LayoutField, value: impl ToString) -> EncodeError {
    EncodeError::OutOfRange {
        field: field.name().to_string(),
        kind: field.kind(),
        value: value.to_string(),
    }
}

fn write_fields<B: Endian>(layout: &Layout, scalars: &[Scalar<'_>], out: &mut [u8]) {
    for (field, scalar) in layout.fields().iter().zip(scalars) {
        write_scalar::<B>(*scalar, &mut out[field.span()]);
    }
}

fn write_scalar<B: Endian>(scalar: Scalar<'_>, dst: &mut [u8]) {
    match scalar {
        Scalar::I8(v) => dst[0] = v as u8,
        Scalar::U8(v) => dst[0] = v,
        Scalar::I16(v) => B::write_i16(dst, v),
        Scalar::U16(v) => B::write_u16(dst, v),
        Scalar::I32(v) => B::write_i32(dst, v),
        Scalar::U32(v) => B::write_u32(dst, v),
        Scalar::I64(v) => B::write_i64(dst, v),
        Scalar::U64(v) => B::write_u64(dst, v),
        Scalar::F32(v) => B::write_f32(dst, v),
        Scalar::F64(v) => B::write_f64(dst, v),
        Scalar::Bytes(bytes) => {
            let (head, padding) = dst.split_at_mut(bytes.len());
            head.copy_from_slice(bytes);
            padding.fill(0);
        }
    }
}

fn read_fields<B: Endian>(layout: &Layout, bytes: &[u8]) -> Vec<Value> {
    layout
        .fields()
        .iter()
        .map(|field| read_field::<B>(field.kind(), &bytes[field.span()]))
        .collect()
}

fn read_field<B: Endian>(kind: FieldKind, src: &[u8]) -> Value {
    match kind {
        FieldKind::Int8 => Value::from(src[0] as i8),
        FieldKind::UInt8 => Value::from(src[0]),
        FieldKind::Int16 => Value::from(B::read_i16(src)),
        FieldKind::UInt16 => Value::from(B::read_u16(src)),
        FieldKind::Int32 => Value::from(B::read_i32(src)),
        FieldKind::UInt32 => Value::from(B::read_u32(src)),
        FieldKind::Int64 => Value::from(B::read_i64(src)),
        FieldKind::UInt64 => Value::from(B::read_u64(src)),
        FieldKind::Float32 => Value::from(B::read_f32(src)),
        FieldKind::Float64 => Value::from(B::read_f64(src)),
        FieldKind::FixedBytes { .. } => Value::Bytes(src.to_vec()),
    }
}

/// Pack/unpack bound to one compiled layout.
///
/// Cheap to clone; clones share the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Codec {
    layout: Arc<Layout>,
}

impl Codec {
    pub fn new(layout: Layout) -> Self {
        Self::from_shared(Arc::new(layout))
    }

    pub fn from_shared(layout: Arc<Layout>) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &Arc<Layout> {
        &self.layout
    }

    /// Size of a packed record in bytes.
    pub fn size(&self) -> usize {
        self.layout.total_size()
    }

    pub fn pack(&self, values: &[Value]) -> std::result::Result<Vec<u8>, EncodeError> {
        pack(&self.layout, values)
    }

    pub fn pack_into(
        &self,
        values: &[Value],
        buf: &mut [u8],
    ) -> std::result::Result<usize, EncodeError> {
        pack_into(&self.layout, values, buf)
    }

    pub fn unpack(&self, bytes: &[u8]) -> std::result::Result<Vec<Value>, DecodeError> {
        unpack(&self.layout, bytes)
    }

    pub fn pack_mapping(&self, map: &Mapping) -> Result<Vec<u8>> {
        let values = adapter::from_mapping(&self.layout, map)?;
        Ok(self.pack(&values)?)
    }

    pub fn unpack_mapping(&self, bytes: &[u8]) -> Result<Mapping> {
        let values = self.unpack(bytes)?;
        Ok(adapter::to_mapping(&self.layout, values)?)
    }

    pub fn pack_record(&self, record: &Record) -> Result<Vec<u8>> {
        let values = adapter::from_structure(&self.layout, record)?;
        Ok(self.pack(&values)?)
    }

    pub fn unpack_record(&self, bytes: &[u8]) -> Result<Record> {
        let values = self.unpack(bytes)?;
        Ok(adapter::to_structure(&self.layout, values)?)
    }

    /// Pack any serde struct whose field names match the layout.
    pub fn pack_struct<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        let values = adapter::from_struct(&self.layout, value)?;
        Ok(self.pack(&values)?)
    }

    pub fn unpack_struct<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        let values = self.unpack(bytes)?;
        Ok(adapter::to_struct(&self.layout, values)?)
    }
}

impl From<Layout> for Codec {
    fn from(layout: Layout) -> Self {
        Self::new(layout)
    }
}
