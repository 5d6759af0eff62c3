// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Format-codec seam.
//!
//! Every swath format implements [`SwathCodec`]: allocate a record, read
//! and write one ping at a time, and convert between the format's record
//! and the format-neutral [`SwathData`] view. The facade in
//! [`crate::io::reader`] and [`crate::io::writer`] picks the codec once
//! when a file is opened.

use serde::Serialize;

use crate::io::formats::xse::record::RecordKind;
use crate::io::metadata::FileFormat;
use crate::Result;

/// Quality class of a sounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum BeamFlag {
    /// Unflagged sounding
    #[default]
    Good,
    /// Flagged by the sonar
    Sonar,
    /// No sounding
    Null,
    /// Flagged by hand
    Manual,
    /// Flagged by a filter
    Filter,
}

impl BeamFlag {
    /// Classify an XSE beam quality code.
    pub fn from_quality(quality: u8) -> Self {
        match quality {
            1 => BeamFlag::Good,
            2..=7 => BeamFlag::Sonar,
            10 => BeamFlag::Manual,
            20 => BeamFlag::Filter,
            _ => BeamFlag::Null,
        }
    }

    /// Quality code for this flag given the beam's current code.
    pub fn to_quality(self, current: u8) -> u8 {
        match self {
            BeamFlag::Good => 1,
            BeamFlag::Null => 8,
            BeamFlag::Manual => 10,
            BeamFlag::Filter => 20,
            BeamFlag::Sonar if current == 1 => 7,
            BeamFlag::Sonar => current,
        }
    }

    pub fn is_good(self) -> bool {
        self == BeamFlag::Good
    }
}

/// Format-neutral view of one record.
///
/// Positions are degrees, heading degrees, speed km/h and distances
/// metres. Bathymetry arrays are indexed by beam number; sidescan arrays
/// by pixel.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SwathData {
    pub kind: RecordKind,
    /// Unix seconds
    pub time_d: f64,
    pub lon: f64,
    pub lat: f64,
    pub heading: f64,
    pub speed: f64,
    pub beamflag: Vec<BeamFlag>,
    pub bath: Vec<f64>,
    pub bath_across: Vec<f64>,
    pub bath_along: Vec<f64>,
    /// Empty when the ping has no amplitude
    pub amp: Vec<f64>,
    pub ss: Vec<f64>,
    pub ss_across: Vec<f64>,
    pub ss_along: Vec<f64>,
    pub comment: String,
}

impl SwathData {
    /// Number of soundings flagged good.
    pub fn good_beams(&self) -> usize {
        self.beamflag.iter().filter(|f| f.is_good()).count()
    }
}

/// A swath file format.
///
/// A codec value is one open session: either reading from or writing to a
/// single file. Calling the other direction's method fails with
/// [`crate::CodecError::Unsupported`].
pub trait SwathCodec: Send {
    /// Format-specific record.
    type Record: Default + Clone;

    /// The format this codec handles.
    fn format(&self) -> FileFormat;

    /// Fresh, empty record.
    fn allocate_record(&self) -> Self::Record {
        Self::Record::default()
    }

    /// Fill `record` with the next logical record of the input.
    ///
    /// Pass the same record on every call; partial pings are carried in it.
    fn read_ping(&mut self, record: &mut Self::Record) -> Result<()>;

    /// Append one record to the output.
    fn write_ping(&mut self, record: &Self::Record) -> Result<()>;

    /// Flush pending output.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Format-neutral view of a record.
    fn extract(&self, record: &Self::Record) -> Result<SwathData>;

    /// Write a format-neutral view back into a record.
    fn insert(&self, record: &mut Self::Record, data: &SwathData) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_round_trip() {
        for quality in [1u8, 8, 10, 20] {
            assert_eq!(BeamFlag::from_quality(quality).to_quality(0), quality);
        }
        assert_eq!(BeamFlag::from_quality(0), BeamFlag::Null);
        assert_eq!(BeamFlag::from_quality(9), BeamFlag::Null);
        assert_eq!(BeamFlag::Sonar.to_quality(1), 7);
        assert_eq!(BeamFlag::Sonar.to_quality(3), 3);
    }

    #[test]
    fn test_good_beams() {
        let swath = SwathData {
            beamflag: vec![BeamFlag::Good, BeamFlag::Null, BeamFlag::Good],
            ..SwathData::default()
        };
        assert_eq!(swath.good_beams(), 2);
    }
}
