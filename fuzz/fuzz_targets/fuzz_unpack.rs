// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use packrec::{ByteOrder, Codec, FieldKind, SchemaBuilder};

fuzz_target!(|data: &[u8]| {
    for order in [ByteOrder::Little, ByteOrder::Big] {
        let Ok(layout) = SchemaBuilder::new("Fuzz")
            .field("a", FieldKind::UInt8, 0)
            .field("b", FieldKind::Int32, 1)
            .field("c", FieldKind::Float32, 2)
            .fixed_bytes("d", 3, 7)
            .field("e", FieldKind::UInt64, 4)
            .byte_order(order)
            .build()
        else {
            return;
        };
        let codec = Codec::new(layout);

        // Any buffer of the right size must decode, and re-encode to itself
        // unless it holds a float NaN whose payload is not preserved.
        if let Ok(values) = codec.unpack(data) {
            if let Ok(packed) = codec.pack(&values) {
                if values[2].as_f64().is_some_and(|v| !v.is_nan()) {
                    assert_eq!(packed, data);
                }
            }
        }
        let _ = codec.unpack_mapping(data);
    }
});
