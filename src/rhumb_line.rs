// Copyright (c) 2025 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The `rhumb_line` module contains the rhumb line solver.
//!
//! A rhumb line (loxodrome) crosses every meridian at the same angle, so it
//! can be flown on a constant bearing.
//! It is a straight line on a Mercator chart and is generally longer than
//! the great circle arc between the same positions.

#![allow(clippy::float_cmp)]
#![allow(clippy::suboptimal_flops)]

use crate::{normalise_bearing, Leg, NauticalMiles, EARTH_MEAN_RADIUS};
use angle_sc::Degrees;
use core::f64::consts::{FRAC_PI_4, PI, TAU};

/// The smallest Mercator latitude difference for which the ratio of the
/// latitude difference to it is numerically stable.
pub const MIN_DELTA_PHI: f64 = 1.0e-11;

/// The inputs of a rhumb line calculation: the start and finish positions.
pub type RhumbLineInput = Leg;

/// The distance and bearing of a rhumb line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RhumbLineResult {
    /// The rhumb line distance.
    pub distance: NauticalMiles,
    /// The constant bearing, `0° <= bearing < 360°`.
    pub bearing: Degrees,
}

/// Reduce a longitude difference to the shorter way around the Earth.
/// * `delta_lon` - the longitude difference in radians, `-2π <= delta_lon <= 2π`.
///
/// returns the longitude difference in the range `-π <= delta_lon <= π`.
#[must_use]
pub fn shortest_delta_longitude(delta_lon: f64) -> f64 {
    if PI < libm::fabs(delta_lon) {
        if 0.0 < delta_lon {
            -(TAU - delta_lon)
        } else {
            TAU + delta_lon
        }
    } else {
        delta_lon
    }
}

/// Calculate the difference between the Mercator projected latitudes of
/// two positions, the "stretched" latitude difference.
/// * `lat1`, `lat2` - the latitudes in radians.
#[must_use]
pub fn calculate_delta_phi(lat1: f64, lat2: f64) -> f64 {
    // the projection is singular at the South pole
    if lat1 == lat2 {
        0.0
    } else {
        libm::log(libm::tan(lat2 / 2.0 + FRAC_PI_4) / libm::tan(lat1 / 2.0 + FRAC_PI_4))
    }
}

/// Solve the rhumb line distance and bearing between two positions.
/// * `input` - the start and finish positions.
///
/// returns the rhumb line distance and its constant bearing.
///
/// # Examples
/// ```
/// use icao_nav_calc::{solve_rhumb_line, RhumbLineInput};
///
/// // Across the antimeridian, the short way round
/// let input = RhumbLineInput::from_degrees(0.0, 179.0, 0.0, -179.0);
/// let result = solve_rhumb_line(&input);
/// assert!(result.distance.0 < 121.0);
/// assert!((result.bearing.0 - 90.0).abs() < 1.0e-9);
/// ```
#[must_use]
pub fn solve_rhumb_line(input: &RhumbLineInput) -> RhumbLineResult {
    let (lat1, lon1, lat2, lon2) = input.to_radians();
    let delta_lat = lat2 - lat1;
    let delta_lon = shortest_delta_longitude(lon2 - lon1);

    let delta_phi = calculate_delta_phi(lat1, lat2);

    // on an East-West line the ratio is 0/0, use the cosine of the latitude
    let q = if MIN_DELTA_PHI < libm::fabs(delta_phi) {
        delta_lat / delta_phi
    } else {
        libm::cos(lat1)
    };

    let bearing = normalise_bearing(Degrees(libm::atan2(delta_lon, delta_phi).to_degrees()));
    let arc_length = libm::sqrt(delta_lat * delta_lat + q * q * delta_lon * delta_lon);

    RhumbLineResult {
        distance: NauticalMiles(EARTH_MEAN_RADIUS.0 * arc_length),
        bearing,
    }
}
