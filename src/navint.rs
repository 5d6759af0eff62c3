// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Navigation interpolation.
//!
//! Keeps a bounded history of position fixes and headings and answers
//! "where was the ship at time t". Between fixes the position is linear in
//! time; outside the history it is dead-reckoned from the nearest fix.

use std::collections::VecDeque;

/// Default number of fixes and headings kept.
pub const DEFAULT_CAPACITY: usize = 1000;

/// One position fix (degrees).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavFix {
    pub time: f64,
    pub lon: f64,
    pub lat: f64,
}

/// Result of an interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Interpolated {
    /// Degrees
    pub lon: f64,
    /// Degrees
    pub lat: f64,
    /// Degrees in [0, 360)
    pub heading: f64,
    /// km/h
    pub speed: f64,
    /// False when no fix was available
    pub valid: bool,
}

/// Metres-to-degrees factors `(lon, lat)` at a latitude in degrees.
pub fn degrees_per_metre(lat: f64) -> (f64, f64) {
    let phi = lat.to_radians();
    let per_lon = 111_412.84 * phi.cos() - 93.5 * (3.0 * phi).cos() + 0.118 * (5.0 * phi).cos();
    let per_lat = 111_132.92 - 559.82 * (2.0 * phi).cos() + 1.175 * (4.0 * phi).cos()
        - 0.0023 * (6.0 * phi).cos();
    let lon = if per_lon.abs() > f64::EPSILON {
        1.0 / per_lon.abs()
    } else {
        0.0
    };
    (lon, 1.0 / per_lat.abs())
}

/// Bounded navigation history.
#[derive(Debug, Clone)]
pub struct NavInterpolator {
    capacity: usize,
    fixes: VecDeque<NavFix>,
    /// (time, unwrapped heading in degrees)
    headings: VecDeque<(f64, f64)>,
}

impl Default for NavInterpolator {
    fn default() -> Self {
        Self::new()
    }
}

impl NavInterpolator {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            capacity,
            fixes: VecDeque::with_capacity(capacity),
            headings: VecDeque::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    pub fn clear(&mut self) {
        self.fixes.clear();
        self.headings.clear();
    }

    /// Add a position fix. Fixes that do not advance in time are ignored.
    pub fn add_fix(&mut self, time: f64, lon: f64, lat: f64) {
        if self.fixes.back().is_some_and(|last| time <= last.time) {
            return;
        }
        if self.fixes.len() == self.capacity {
            self.fixes.pop_front();
        }
        self.fixes.push_back(NavFix { time, lon, lat });
    }

    /// Add a heading in degrees, unwrapped against the previous one.
    pub fn add_heading(&mut self, time: f64, heading: f64) {
        let mut heading = heading;
        if let Some(&(last_time, last)) = self.headings.back() {
            if time <= last_time {
                return;
            }
            while heading - last > 180.0 {
                heading -= 360.0;
            }
            while heading - last < -180.0 {
                heading += 360.0;
            }
        }
        if self.headings.len() == self.capacity {
            self.headings.pop_front();
        }
        self.headings.push_back((time, heading));
    }

    /// Heading at `time` in degrees [0, 360), if any heading is known.
    pub fn interpolate_heading(&self, time: f64) -> Option<f64> {
        let (first, last) = (self.headings.front()?, self.headings.back()?);
        let heading = if time <= first.0 {
            first.1
        } else if time >= last.0 {
            last.1
        } else {
            let i = self.headings.partition_point(|&(t, _)| t <= time);
            let (t0, h0) = self.headings[i - 1];
            let (t1, h1) = self.headings[i];
            h0 + (h1 - h0) * (time - t0) / (t1 - t0)
        };
        Some(heading.rem_euclid(360.0))
    }

    /// Position at `time`.
    ///
    /// `heading` (degrees) and `speed` (km/h) are used to dead-reckon when
    /// `time` lies outside the history.
    pub fn interpolate(&self, time: f64, heading: f64, speed: f64) -> Interpolated {
        let (Some(first), Some(last)) = (self.fixes.front(), self.fixes.back()) else {
            return Interpolated::default();
        };
        if time < first.time {
            return dead_reckon(first, time, heading, speed);
        }
        if time > last.time {
            return dead_reckon(last, time, heading, speed);
        }
        if self.fixes.len() == 1 {
            return Interpolated {
                lon: first.lon,
                lat: first.lat,
                heading,
                speed,
                valid: true,
            };
        }

        let i = self
            .fixes
            .partition_point(|f| f.time <= time)
            .clamp(1, self.fixes.len() - 1);
        let (a, b) = (self.fixes[i - 1], self.fixes[i]);
        let factor = (time - a.time) / (b.time - a.time);
        let (per_lon, per_lat) = degrees_per_metre(0.5 * (a.lat + b.lat));
        let dx = (b.lon - a.lon) / per_lon.max(f64::EPSILON);
        let dy = (b.lat - a.lat) / per_lat;
        let pair_speed = 3.6 * dx.hypot(dy) / (b.time - a.time);
        Interpolated {
            lon: a.lon + factor * (b.lon - a.lon),
            lat: a.lat + factor * (b.lat - a.lat),
            heading,
            speed: pair_speed,
            valid: true,
        }
    }
}

fn dead_reckon(fix: &NavFix, time: f64, heading: f64, speed: f64) -> Interpolated {
    let distance = speed / 3.6 * (time - fix.time);
    let (per_lon, per_lat) = degrees_per_metre(fix.lat);
    let course = heading.to_radians();
    Interpolated {
        lon: fix.lon + distance * course.sin() * per_lon,
        lat: fix.lat + distance * course.cos() * per_lat,
        heading,
        speed,
        valid: true,
    }
}
