// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Quantities computed when a ping omits them.
//!
//! - Bathymetry from travel time, steering angle and attitude when the
//!   depth group is missing.
//! - A depth sanity bound that rejects corrupt pings.
//! - Sidescan bin size from the multibeam swath width when the
//!   amplitude-vs-lateral group does not carry one.

use tracing::warn;

use super::record::{MultibeamPing, SidescanPing};
use crate::core::{CodecError, Result};

/// Nominal sound speed for range computation, m/s.
pub const SOUND_SPEED: f64 = 1500.0;
/// Deepest plausible sounding, metres.
pub const MAX_DEPTH: f64 = 11_000.0;
/// Heave beyond this is zeroed on rejected pings, metres.
pub const MAX_HEAVE: f64 = 100.0;

/// Convert roll-frame angles to a takeoff angle and azimuth.
///
/// `alpha` is the pitch angle and `beta` the complement of the across-track
/// steering angle, both in degrees. Returns `(theta, phi)` in degrees:
/// `theta` from vertical, `phi` from the across-track axis towards the bow.
pub fn rollpitch_to_takeoff(alpha: f64, beta: f64) -> (f64, f64) {
    let (alpha, beta) = (alpha.to_radians(), beta.to_radians());
    let x = alpha.sin();
    let y = alpha.cos() * beta.cos();
    let z = alpha.cos() * beta.sin();
    let theta = z.clamp(-1.0, 1.0).acos().to_degrees();
    let phi = if x == 0.0 && y == 0.0 {
        0.0
    } else {
        x.atan2(y).to_degrees()
    };
    (theta, phi)
}

/// Takeoff angles of a beam from its steering angle and pitch (radians).
pub fn beam_takeoff(angle: f64, pitch: f64) -> (f64, f64) {
    rollpitch_to_takeoff(pitch.to_degrees(), 90.0 - angle.to_degrees())
}

/// Fill lateral, along and depth from travel times when depth is absent.
///
/// Returns true when values were derived.
pub fn derive_bathymetry(ping: &mut MultibeamPing, speed_ground: f64) -> bool {
    let g = ping.groups;
    if !(g.tt && g.angle && g.heave && g.roll && g.pitch) || g.depth {
        return false;
    }
    for beam in ping.beams.iter_mut() {
        let (theta, phi) = beam_takeoff(beam.angle, beam.pitch);
        let (theta, phi) = (theta.to_radians(), phi.to_radians());
        let range = SOUND_SPEED * beam.tt / 2.0;
        beam.lateral = range * theta.sin() * phi.cos();
        beam.along = range * theta.sin() * phi.sin() + 0.5 * speed_ground * beam.delay;
        beam.depth = range * theta.cos();
    }
    ping.groups.lateral = true;
    ping.groups.along = true;
    ping.groups.depth = true;
    true
}

/// Reject a ping whose depths exceed the sanity bound.
///
/// Heave on the offending beams is zeroed when it is implausible as well.
pub fn check_depth(ping: &mut MultibeamPing) -> Result<()> {
    if !ping.groups.depth {
        return Ok(());
    }
    let mut rejected: Option<f64> = None;
    for beam in ping.beams.iter_mut() {
        if beam.depth.abs() > MAX_DEPTH {
            rejected.get_or_insert(beam.depth);
            if beam.heave.abs() > MAX_HEAVE {
                beam.heave = 0.0;
            }
        }
    }
    match rejected {
        Some(depth) => {
            warn!(ping = ping.ping, depth, "beam depth outside sanity bound");
            Err(CodecError::unintelligible(
                "multibeam",
                format!("beam depth {depth} m exceeds {MAX_DEPTH} m"),
            ))
        }
        None => Ok(()),
    }
}

/// Derive the sidescan bin size (mm) from the multibeam swath when missing.
///
/// Returns the new bin size when one was computed.
pub fn derive_bin_size(multibeam: &MultibeamPing, sidescan: &mut SidescanPing) -> Option<i32> {
    let avl = sidescan.amp_vs_lateral.as_mut()?;
    if multibeam.num_beams() <= 1 || avl.samples.len() <= 1 || avl.bin_size > 0 {
        return None;
    }
    let (xmin, xmax) = multibeam
        .beams
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), b| {
            (lo.min(b.lateral), hi.max(b.lateral))
        });
    let good = avl.nonzero();
    if xmax > xmin && good > 1 {
        avl.bin_size = (1000.0 * (xmax - xmin) / (good - 1) as f64) as i32;
        Some(avl.bin_size)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::formats::xse::record::{Beam, LateralSeries};

    fn ping_with(beams: Vec<Beam>) -> MultibeamPing {
        let mut ping = MultibeamPing {
            beams,
            ..MultibeamPing::default()
        };
        ping.groups.tt = true;
        ping.groups.angle = true;
        ping.groups.heave = true;
        ping.groups.roll = true;
        ping.groups.pitch = true;
        ping
    }

    #[test]
    fn test_vertical_beam_depth() {
        let mut ping = ping_with(vec![Beam {
            tt: 0.01,
            ..Beam::default()
        }]);
        assert!(derive_bathymetry(&mut ping, 0.0));
        let beam = ping.beams[0];
        assert!((beam.depth - 7.5).abs() < 1e-9);
        assert!(beam.lateral.abs() < 1e-9);
        assert!(beam.along.abs() < 1e-9);
        assert!(ping.groups.depth);
    }

    #[test]
    fn test_steered_beam_goes_to_starboard() {
        let mut ping = ping_with(vec![Beam {
            tt: 0.02,
            angle: 30f64.to_radians(),
            delay: 0.1,
            ..Beam::default()
        }]);
        derive_bathymetry(&mut ping, 4.0);
        let beam = ping.beams[0];
        let range = 15.0;
        assert!((beam.lateral - range * 0.5).abs() < 1e-9);
        assert!((beam.depth - range * 3f64.sqrt() / 2.0).abs() < 1e-9);
        assert!((beam.along - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_decoded_depth_is_kept() {
        let mut ping = ping_with(vec![Beam {
            tt: 0.01,
            depth: 99.0,
            ..Beam::default()
        }]);
        ping.groups.depth = true;
        assert!(!derive_bathymetry(&mut ping, 0.0));
        assert_eq!(ping.beams[0].depth, 99.0);
    }

    #[test]
    fn test_missing_attitude_skips_derivation() {
        let mut ping = ping_with(vec![Beam::default()]);
        ping.groups.roll = false;
        assert!(!derive_bathymetry(&mut ping, 0.0));
        assert!(!ping.groups.depth);
    }

    #[test]
    fn test_depth_sanity_bound() {
        let mut ping = MultibeamPing::default();
        ping.groups.depth = true;
        ping.beams = vec![
            Beam {
                depth: 100.0,
                heave: 500.0,
                ..Beam::default()
            },
            Beam {
                depth: 15_000.0,
                heave: 500.0,
                ..Beam::default()
            },
        ];
        let err = check_depth(&mut ping).unwrap_err();
        assert!(matches!(err, CodecError::Unintelligible { .. }));
        assert_eq!(ping.beams[0].heave, 500.0);
        assert_eq!(ping.beams[1].heave, 0.0);
    }

    #[test]
    fn test_depth_within_bound() {
        let mut ping = MultibeamPing::default();
        ping.groups.depth = true;
        ping.beams = vec![Beam {
            depth: -10_999.0,
            ..Beam::default()
        }];
        assert!(check_depth(&mut ping).is_ok());
    }

    fn swath(from: f64, to: f64, n: usize) -> MultibeamPing {
        let step = (to - from) / (n - 1) as f64;
        MultibeamPing {
            beams: (0..n)
                .map(|i| Beam {
                    lateral: from + step * i as f64,
                    ..Beam::default()
                })
                .collect(),
            ..MultibeamPing::default()
        }
    }

    #[test]
    fn test_bin_size_from_swath() {
        let multibeam = swath(-20.0, 20.0, 11);
        let mut sidescan = SidescanPing {
            amp_vs_lateral: Some(LateralSeries {
                bin_size: 0,
                offset: 0,
                samples: vec![0, 0, 3, 4, 5, 6, 7, 0, 0, 0],
            }),
            ..SidescanPing::default()
        };
        assert_eq!(derive_bin_size(&multibeam, &mut sidescan), Some(10_000));
        assert_eq!(sidescan.amp_vs_lateral.unwrap().bin_size, 10_000);
    }

    #[test]
    fn test_existing_bin_size_kept() {
        let multibeam = swath(-20.0, 20.0, 11);
        let mut sidescan = SidescanPing {
            amp_vs_lateral: Some(LateralSeries {
                bin_size: 250,
                offset: 0,
                samples: vec![1, 2, 3],
            }),
            ..SidescanPing::default()
        };
        assert_eq!(derive_bin_size(&multibeam, &mut sidescan), None);
        assert_eq!(sidescan.amp_vs_lateral.unwrap().bin_size, 250);
    }

    #[test]
    fn test_single_good_sample_gives_no_bin_size() {
        let multibeam = swath(-20.0, 20.0, 11);
        let mut sidescan = SidescanPing {
            amp_vs_lateral: Some(LateralSeries {
                bin_size: 0,
                offset: 0,
                samples: vec![0, 9, 0],
            }),
            ..SidescanPing::default()
        };
        assert_eq!(derive_bin_size(&multibeam, &mut sidescan), None);
    }
}
