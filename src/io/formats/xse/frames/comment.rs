// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Comment frame: one group of NUL-padded text.

use super::{stamp_of, text_from_bytes, truncate_text};
use crate::core::{Result, WireOrder};
use crate::io::formats::xse::constants::{FrameKind, COMMENT_LENGTH};
use crate::io::formats::xse::encoder::FrameEncoder;
use crate::io::formats::xse::group::{for_each_group, GroupOutcome};
use crate::io::formats::xse::record::CommentFields;
use crate::io::formats::xse::scanner::RawFrame;

const GROUP_GENERAL: i32 = 1;

pub fn decode(frame: &RawFrame, order: WireOrder, out: &mut CommentFields) -> Result<()> {
    out.stamp = stamp_of(frame);
    out.text.clear();
    for_each_group(
        &frame.bytes,
        frame.header.body_offset(),
        order,
        "comment",
        |header, cursor| {
            if header.id != GROUP_GENERAL {
                return Ok(GroupOutcome::Skipped);
            }
            let len = header.payload_len().min(cursor.remaining());
            let bytes = cursor.read_bytes(len)?;
            out.text = text_from_bytes(&bytes[..len.min(COMMENT_LENGTH - 1)]);
            Ok(GroupOutcome::Decoded)
        },
    )
}

pub fn encode(comment: &CommentFields, order: WireOrder) -> Vec<u8> {
    let text = truncate_text(&comment.text, COMMENT_LENGTH - 1).as_bytes();
    // text plus four, rounded up to a multiple of 4
    let len = (text.len() + 4).div_ceil(4) * 4;
    let mut enc = FrameEncoder::begin(order, FrameKind::Comment, &comment.stamp);
    enc.group(GROUP_GENERAL, |e| {
        e.put_bytes(text);
        e.put_bytes(&vec![0u8; len - text.len()]);
    });
    enc.finish()
}
