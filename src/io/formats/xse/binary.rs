// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Fixed-width field access with an explicit swap flag.
//!
//! `swap == false` reads and writes big-endian (the literal-marker
//! convention); `swap == true` reads and writes the byte-reversed order.
//! These functions do not check bounds: callers guarantee that
//! `offset + width <= buf.len()`, which [`GroupCursor`] enforces one level up.
//!
//! [`GroupCursor`]: super::group::GroupCursor

use byteorder::{BigEndian, ByteOrder, LittleEndian};

macro_rules! field_codec {
    ($get:ident, $put:ident, $ty:ty, $width:expr, $read:ident, $write:ident) => {
        #[doc = concat!("Read a `", stringify!($ty), "` at `offset`.")]
        #[inline]
        pub fn $get(buf: &[u8], offset: usize, swap: bool) -> $ty {
            let bytes = &buf[offset..offset + $width];
            if swap {
                LittleEndian::$read(bytes)
            } else {
                BigEndian::$read(bytes)
            }
        }

        #[doc = concat!("Write a `", stringify!($ty), "` at `offset`.")]
        #[inline]
        pub fn $put(buf: &mut [u8], offset: usize, value: $ty, swap: bool) {
            let bytes = &mut buf[offset..offset + $width];
            if swap {
                LittleEndian::$write(bytes, value)
            } else {
                BigEndian::$write(bytes, value)
            }
        }
    };
}

field_codec!(get_i16, put_i16, i16, 2, read_i16, write_i16);
field_codec!(get_u16, put_u16, u16, 2, read_u16, write_u16);
field_codec!(get_i32, put_i32, i32, 4, read_i32, write_i32);
field_codec!(get_u32, put_u32, u32, 4, read_u32, write_u32);
field_codec!(get_f32, put_f32, f32, 4, read_f32, write_f32);
field_codec!(get_f64, put_f64, f64, 8, read_f64, write_f64);
