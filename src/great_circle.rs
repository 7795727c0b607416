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

//! The `great_circle` module contains the great circle solver.
//!
//! A great circle arc is the shortest path between two positions on the
//! surface of a sphere.
//! Its distance is calculated with the haversine formula, which is well
//! conditioned for short distances, and its initial bearing from the
//! spherical sine and cosine rules.

#![allow(clippy::suboptimal_flops)]

use crate::{normalise_bearing, Leg, NauticalMiles, EARTH_MEAN_RADIUS};
use angle_sc::Degrees;

/// The inputs of a great circle calculation: the start and finish positions.
pub type GreatCircleInput = Leg;

/// The distance and initial bearing of a great circle arc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GreatCircleResult {
    /// The great circle distance.
    pub distance: NauticalMiles,
    /// The bearing at the start position, `0° <= initial_bearing < 360°`.
    pub initial_bearing: Degrees,
}

/// Calculate the haversine of the great circle arc between two positions.
/// * `lat1`, `lat2` - the latitudes of the positions in radians.
/// * `delta_lat`, `delta_lon` - the latitude and longitude differences in radians.
///
/// returns the haversine of the arc, `0 <= hav <= 1`.
#[must_use]
fn calculate_haversine(lat1: f64, lat2: f64, delta_lat: f64, delta_lon: f64) -> f64 {
    let sin_half_dlat = libm::sin(delta_lat / 2.0);
    let sin_half_dlon = libm::sin(delta_lon / 2.0);
    let hav = sin_half_dlat * sin_half_dlat
        + libm::cos(lat1) * libm::cos(lat2) * sin_half_dlon * sin_half_dlon;
    // rounding may take nearly antipodal positions just outside the range
    hav.clamp(0.0, 1.0)
}

/// Calculate the initial bearing of the great circle arc between two positions.
/// * `lat1`, `lat2` - the latitudes of the positions in radians.
/// * `delta_lon` - the longitude difference in radians.
///
/// returns the initial bearing, `0° <= bearing < 360°`.
/// Coincident positions have an initial bearing of zero.
#[must_use]
pub fn calculate_initial_bearing(lat1: f64, lat2: f64, delta_lon: f64) -> Degrees {
    let y = libm::sin(delta_lon) * libm::cos(lat2);
    let x = libm::cos(lat1) * libm::sin(lat2)
        - libm::sin(lat1) * libm::cos(lat2) * libm::cos(delta_lon);
    normalise_bearing(Degrees(libm::atan2(y, x).to_degrees()))
}

/// Solve the great circle distance and initial bearing between two positions.
/// * `input` - the start and finish positions.
///
/// returns the great circle distance and the initial bearing at the start
/// position.
///
/// # Examples
/// ```
/// use icao_nav_calc::{solve_great_circle, GreatCircleInput};
///
/// let new_york_london = GreatCircleInput::from_degrees(40.7128, -74.0060, 51.5074, -0.1278);
/// let result = solve_great_circle(&new_york_london);
/// assert!(3000.0 < result.distance.0 && result.distance.0 < 4000.0);
///
/// let london_new_york = GreatCircleInput::from_degrees(51.5074, -0.1278, 40.7128, -74.0060);
/// let reverse = solve_great_circle(&london_new_york);
/// assert!((result.distance.0 - reverse.distance.0).abs() < 1.0e-9);
/// ```
#[must_use]
pub fn solve_great_circle(input: &GreatCircleInput) -> GreatCircleResult {
    let (lat1, lon1, lat2, lon2) = input.to_radians();
    let delta_lat = lat2 - lat1;
    let delta_lon = lon2 - lon1;

    let hav = calculate_haversine(lat1, lat2, delta_lat, delta_lon);
    let arc_length = 2.0 * libm::asin(libm::sqrt(hav));

    GreatCircleResult {
        distance: NauticalMiles(EARTH_MEAN_RADIUS.0 * arc_length),
        initial_bearing: calculate_initial_bearing(lat1, lat2, delta_lon),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round_to;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_solve_great_circle_new_york_london() {
        let input = GreatCircleInput::from_degrees(40.7128, -74.0060, 51.5074, -0.1278);
        let result = solve_great_circle(&input);
        assert_eq!(3007.68, round_to(result.distance.0, 2));
        assert_eq!(51.21, round_to(result.initial_bearing.0, 2));

        // The distance is symmetric, the initial bearing is not
        let input = GreatCircleInput::from_degrees(51.5074, -0.1278, 40.7128, -74.0060);
        let reverse = solve_great_circle(&input);
        assert!(is_within_tolerance(
            result.distance.0,
            reverse.distance.0,
            1.0e-9
        ));
        assert_eq!(288.33, round_to(reverse.initial_bearing.0, 2));
    }

    #[test]
    fn test_solve_great_circle_coincident_positions() {
        let input = GreatCircleInput::from_degrees(40.0, -74.0, 40.0, -74.0);
        let result = solve_great_circle(&input);
        assert_eq!(0.0, result.distance.0);
        assert_eq!(0.0, result.initial_bearing.0);
    }

    #[test]
    fn test_solve_great_circle_meridian_and_equator() {
        // Northbound along the Greenwich meridian
        let input = GreatCircleInput::from_degrees(0.0, 0.0, 10.0, 0.0);
        let result = solve_great_circle(&input);
        assert_eq!(0.0, result.initial_bearing.0);
        assert!(is_within_tolerance(
            EARTH_MEAN_RADIUS.0 * 10.0_f64.to_radians(),
            result.distance.0,
            1.0e-9
        ));

        // Southbound
        let input = GreatCircleInput::from_degrees(10.0, 0.0, 0.0, 0.0);
        let result = solve_great_circle(&input);
        assert_eq!(180.0, result.initial_bearing.0);

        // Eastbound along the Equator
        let input = GreatCircleInput::from_degrees(0.0, 0.0, 0.0, 90.0);
        let result = solve_great_circle(&input);
        assert!(is_within_tolerance(
            90.0,
            result.initial_bearing.0,
            1.0e-12
        ));
        assert_eq!(5403.64, round_to(result.distance.0, 2));

        // Westbound across the antimeridian
        let input = GreatCircleInput::from_degrees(0.0, -179.0, 0.0, 179.0);
        let result = solve_great_circle(&input);
        assert!(is_within_tolerance(
            270.0,
            result.initial_bearing.0,
            1.0e-12
        ));
        assert_eq!(120.08, round_to(result.distance.0, 2));
    }

    #[test]
    fn test_solve_great_circle_antipodal_positions() {
        let input = GreatCircleInput::from_degrees(0.0, 0.0, 0.0, 180.0);
        let result = solve_great_circle(&input);
        assert!(is_within_tolerance(
            EARTH_MEAN_RADIUS.0 * core::f64::consts::PI,
            result.distance.0,
            1.0e-9
        ));

        let input = GreatCircleInput::from_degrees(-45.0, 10.0, 45.0, -170.0);
        let result = solve_great_circle(&input);
        assert!(result.distance.0.is_finite());
        assert!((0.0..360.0).contains(&result.initial_bearing.0));
    }

    #[test]
    fn test_calculate_initial_bearing_range() {
        for i in -18..18 {
            let lon2 = f64::from(i * 10).to_radians();
            let result = calculate_initial_bearing(0.5, -0.5, lon2);
            assert!((0.0..360.0).contains(&result.0));
        }
    }
}
