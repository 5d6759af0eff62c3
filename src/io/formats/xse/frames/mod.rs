// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Per-frame group tables.
//!
//! Each module owns both halves of one frame kind: `decode` maps group ids
//! to field readers, `encode` writes the groups that are present.

pub mod comment;
pub mod multibeam;
pub mod nav;
pub mod seabeam;
pub mod ship;
pub mod sidescan;
pub mod svp;

use tracing::warn;

use super::group::GroupCursor;
use super::record::Stamp;
use super::scanner::RawFrame;
use crate::core::Result;

/// Source and timestamp of a frame.
pub(crate) fn stamp_of(frame: &RawFrame) -> Stamp {
    Stamp {
        source: frame.header.source,
        sec: frame.header.sec,
        usec: frame.header.usec,
    }
}

/// Read `count` elements, keeping at most `capacity` of them.
///
/// Every element is parsed so the cursor ends up past the group; the ones
/// beyond capacity are dropped with a warning.
pub(crate) fn read_array<T, F>(
    cursor: &mut GroupCursor<'_>,
    count: usize,
    capacity: usize,
    context: (&str, i32),
    mut read: F,
) -> Result<Vec<T>>
where
    F: FnMut(&mut GroupCursor<'_>) -> Result<T>,
{
    warn_if_truncated(count, capacity, context);
    let mut out = Vec::with_capacity(count.min(capacity));
    for i in 0..count {
        let value = read(cursor)?;
        if i < capacity {
            out.push(value);
        }
    }
    Ok(out)
}

/// Log a dropped tail when a count exceeds storage capacity.
pub(crate) fn warn_if_truncated(count: usize, capacity: usize, (frame, group): (&str, i32)) {
    if count > capacity {
        warn!(
            frame,
            group,
            count,
            capacity,
            "element count exceeds capacity, dropping the excess"
        );
    }
}

/// Read `len` bytes of text, keeping at most `max` bytes up to the first NUL.
pub(crate) fn read_text(cursor: &mut GroupCursor<'_>, len: usize, max: usize) -> Result<String> {
    let bytes = cursor.read_bytes(len)?;
    Ok(text_from_bytes(&bytes[..len.min(max)]))
}

pub(crate) fn text_from_bytes(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Cut a string to at most `max` bytes on a character boundary.
pub(crate) fn truncate_text(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WireOrder;

    #[test]
    fn test_read_array_drops_excess() {
        let data: Vec<u8> = (0u8..6).flat_map(|v| [0, v]).collect();
        let mut cursor = GroupCursor::new(&data, 0, WireOrder::Native);
        let kept = read_array(&mut cursor, 6, 4, ("test", 1), |c| c.read_i16()).unwrap();
        assert_eq!(kept, vec![0, 1, 2, 3]);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_text_stops_at_nul() {
        assert_eq!(text_from_bytes(b"abc\0def"), "abc");
        assert_eq!(text_from_bytes(b"abc"), "abc");
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        assert_eq!(truncate_text("héllo", 2), "h");
        assert_eq!(truncate_text("hello", 10), "hello");
    }
}
