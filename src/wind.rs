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

//! The wind module contains the wind triangle solver.
//!
//! The wind triangle is formed by three vectors: the aircraft's airspeed
//! vector along its heading, the wind vector and the resulting ground
//! vector along the true course.
//! Given the true airspeed, true course and the wind, the solver calculates
//! the drift angle required to hold the course, the resulting heading and
//! the ground speed.

#![allow(clippy::suboptimal_flops)]

use crate::error::{Error, Result};
use crate::normalise_bearing;
use angle_sc::{Angle, Degrees, Radians};

/// The inputs of a wind triangle calculation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindTriangleInput {
    /// The true airspeed in knots, must be greater than zero.
    pub true_airspeed: f64,
    /// The true course to be flown.
    pub true_course: Degrees,
    /// The direction the wind is blowing from.
    pub wind_direction: Degrees,
    /// The wind speed in knots.
    pub wind_speed: f64,
}

impl WindTriangleInput {
    /// Constructor.
    /// * `true_airspeed` - the true airspeed in knots.
    /// * `true_course` - the true course.
    /// * `wind_direction` - the direction the wind is blowing from.
    /// * `wind_speed` - the wind speed in knots.
    #[must_use]
    pub const fn new(
        true_airspeed: f64,
        true_course: Degrees,
        wind_direction: Degrees,
        wind_speed: f64,
    ) -> Self {
        Self {
            true_airspeed,
            true_course,
            wind_direction,
            wind_speed,
        }
    }
}

/// The solution of a wind triangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindTriangleResult {
    /// The drift angle, signed: negative to the left of the course.
    pub drift_angle: Degrees,
    /// The heading to fly, `0° <= magnetic_heading < 360°`.
    pub magnetic_heading: Degrees,
    /// The ground speed in knots.
    pub ground_speed: f64,
}

/// Calculate the sine of the drift angle.
/// * `true_airspeed` - the true airspeed in knots.
/// * `wind_speed` - the wind speed in knots.
/// * `wind_angle` - the angle between the wind direction and the true course.
///
/// returns the sine of the drift angle or an `Error::Domain` if the
/// airspeed is not positive or the crosswind component exceeds it.
fn calculate_sin_drift(true_airspeed: f64, wind_speed: f64, wind_angle: Angle) -> Result<f64> {
    if true_airspeed.is_nan() || true_airspeed <= 0.0 {
        return Err(Error::Domain(format!(
            "true airspeed must be greater than zero, not {true_airspeed}"
        )));
    }

    let crosswind = wind_speed * wind_angle.sin().0;
    let sin_drift = crosswind / true_airspeed;
    if sin_drift.is_nan() || 1.0 < libm::fabs(sin_drift) {
        return Err(Error::Domain(format!(
            "crosswind component {crosswind} exceeds true airspeed {true_airspeed}"
        )));
    }

    Ok(sin_drift)
}

/// Solve the wind triangle.
/// * `input` - the true airspeed, true course and wind.
///
/// returns the drift angle, heading and ground speed, or an `Error::Domain`
/// if there is no heading which holds the course.
///
/// # Errors
/// If the true airspeed is not greater than zero, the crosswind component
/// of the wind is greater than the true airspeed or the ground speed is not
/// finite.
///
/// # Examples
/// ```
/// use icao_nav_calc::{solve_wind_triangle, Degrees, WindTriangleInput};
///
/// // A direct headwind
/// let input = WindTriangleInput::new(120.0, Degrees(0.0), Degrees(0.0), 30.0);
/// let result = solve_wind_triangle(&input).unwrap();
/// assert_eq!(0.0, result.drift_angle.0);
/// assert_eq!(0.0, result.magnetic_heading.0);
/// assert_eq!(90.0, result.ground_speed);
///
/// // No airspeed
/// let input = WindTriangleInput::new(0.0, Degrees(90.0), Degrees(45.0), 100.0);
/// assert!(solve_wind_triangle(&input).is_err());
/// ```
pub fn solve_wind_triangle(input: &WindTriangleInput) -> Result<WindTriangleResult> {
    let wind_angle = Angle::from(input.wind_direction) - Angle::from(input.true_course);
    let sin_drift = calculate_sin_drift(input.true_airspeed, input.wind_speed, wind_angle)?;

    let drift = Radians(libm::asin(sin_drift));
    let ground_speed =
        input.true_airspeed * libm::cos(drift.0) - input.wind_speed * wind_angle.cos().0;
    if !ground_speed.is_finite() {
        return Err(Error::Domain(format!(
            "ground speed of true airspeed {} and wind speed {} is not finite",
            input.true_airspeed, input.wind_speed
        )));
    }

    let drift_angle = Degrees(drift.0.to_degrees());
    let magnetic_heading = normalise_bearing(Degrees(input.true_course.0 + drift_angle.0));

    Ok(WindTriangleResult {
        drift_angle,
        magnetic_heading,
        ground_speed,
    })
}
