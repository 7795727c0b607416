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

//! icao-nav-calc
//!
//! A library for performing the three classic aviation navigation
//! calculations on a spherical Earth:
//!
//! - the [wind triangle](https://en.wikipedia.org/wiki/E6B#Wind_correction_angle),
//!   the drift angle, heading and ground speed of an aircraft flying a
//!   true course through a wind;
//! - the [great circle](https://en.wikipedia.org/wiki/Great-circle_navigation)
//!   distance and initial bearing between two positions, using the
//!   [haversine formula](https://en.wikipedia.org/wiki/Haversine_formula);
//! - the [rhumb line](https://en.wikipedia.org/wiki/Rhumb_line) distance
//!   and constant bearing between two positions.
//!
//! ## Design
//!
//! The solvers in the [`wind`], [`great_circle`] and [`rhumb_line`] modules
//! are pure functions of typed inputs: they own no state and may be called
//! concurrently without locking.
//! The wind triangle is the only calculation without a solution for every
//! input, its failures are reported as [`Error::Domain`].
//!
//! The [`Calculator`] is the request/response boundary around the solvers.
//! It coerces untyped JSON payloads into the typed inputs, rounds the results
//! for reporting and appends every successful calculation to an injected
//! [`HistoryStore`].
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Angle`,
//!   `Degrees` and `Radians` and perform trigonometric calculations;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - to define `LatLong`;
//! - [icao_units](https://crates.io/crates/icao-units) - to define
//!   `NauticalMiles`.
//!
//! The Earth is modelled as a sphere with the mean radius
//! [`EARTH_MEAN_RADIUS`], there is no ellipsoidal correction.

pub mod calculator;
pub mod config;
pub mod error;
pub mod great_circle;
pub mod history;
pub mod rhumb_line;
pub mod wind;

pub use angle_sc::{Angle, Degrees, Radians};
pub use icao_units::non_si::NauticalMiles;
pub use unit_sphere::LatLong;

pub use calculator::{Calculator, Response};
pub use config::CalculatorConfig;
pub use error::{Error, Result};
pub use great_circle::{solve_great_circle, GreatCircleInput, GreatCircleResult};
pub use history::{CalculationRecord, CalculationType, HistoryStore, InMemoryHistory};
pub use rhumb_line::{solve_rhumb_line, RhumbLineInput, RhumbLineResult};
pub use wind::{solve_wind_triangle, WindTriangleInput, WindTriangleResult};

/// The mean radius of the Earth in nautical miles.
pub const EARTH_MEAN_RADIUS: NauticalMiles = NauticalMiles(3_440.065);

/// A pair of positions: the start and finish of a route.
#[derive(Clone, Debug, PartialEq)]
pub struct Leg {
    /// The start position.
    pub from: LatLong,
    /// The finish position.
    pub to: LatLong,
}

impl Leg {
    /// Constructor.
    /// * `from` - the start position.
    /// * `to` - the finish position.
    #[must_use]
    pub const fn new(from: LatLong, to: LatLong) -> Self {
        Self { from, to }
    }

    /// Construct a `Leg` from latitudes and longitudes in degrees.
    /// * `lat1`, `lon1` - the start position.
    /// * `lat2`, `lon2` - the finish position.
    ///
    /// # Examples
    /// ```
    /// use icao_nav_calc::Leg;
    ///
    /// let new_york_london = Leg::from_degrees(40.7128, -74.0060, 51.5074, -0.1278);
    /// assert_eq!(40.7128, new_york_london.from.lat().0);
    /// assert_eq!(-0.1278, new_york_london.to.lon().0);
    /// ```
    #[must_use]
    pub const fn from_degrees(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Self {
        Self::new(
            LatLong::new(Degrees(lat1), Degrees(lon1)),
            LatLong::new(Degrees(lat2), Degrees(lon2)),
        )
    }

    /// The latitudes and longitudes of the start and finish positions in
    /// radians: `(lat1, lon1, lat2, lon2)`.
    #[must_use]
    pub fn to_radians(&self) -> (f64, f64, f64, f64) {
        (
            self.from.lat().0.to_radians(),
            self.from.lon().0.to_radians(),
            self.to.lat().0.to_radians(),
            self.to.lon().0.to_radians(),
        )
    }
}

/// Normalise an angle to a bearing in the range `0° <= bearing < 360°`.
/// * `angle` - the angle in degrees, any finite value.
///
/// # Examples
/// ```
/// use icao_nav_calc::{normalise_bearing, Degrees};
///
/// assert_eq!(270.0, normalise_bearing(Degrees(-90.0)).0);
/// assert_eq!(10.0, normalise_bearing(Degrees(370.0)).0);
/// ```
#[must_use]
pub fn normalise_bearing(angle: Degrees) -> Degrees {
    let mut value = libm::fmod(angle.0, 360.0);
    if value < 0.0 {
        value += 360.0;
    }
    // a tiny negative value rounds up to 360.0 when 360.0 is added
    if 360.0 <= value {
        value = 0.0;
    }
    // + 0.0 converts -0.0 to 0.0
    Degrees(value + 0.0)
}

/// Round a value to a number of decimal places, half away from zero.
/// * `value` - the value to round.
/// * `decimal_places` - the number of decimal places.
///
/// returns `value` unchanged if it is too large to be scaled, since it has
/// no fractional digits to round.
///
/// # Examples
/// ```
/// use icao_nav_calc::round_to;
///
/// assert_eq!(3007.68, round_to(3007.6812, 2));
/// assert_eq!(-8.13, round_to(-8.130102354155978, 2));
/// ```
#[must_use]
pub fn round_to(value: f64, decimal_places: u32) -> f64 {
    let scale = libm::pow(10.0, f64::from(decimal_places));
    let scaled = value * scale;
    if scaled.is_finite() {
        libm::round(scaled) / scale + 0.0
    } else {
        value
    }
}

/// Round a bearing to a number of decimal places, keeping it in the range
/// `0° <= bearing < 360°`, so 359.999° rounds to 0° rather than 360°.
/// * `bearing` - the bearing in degrees.
/// * `decimal_places` - the number of decimal places.
#[must_use]
pub fn round_bearing(bearing: Degrees, decimal_places: u32) -> Degrees {
    normalise_bearing(Degrees(round_to(
        normalise_bearing(bearing).0,
        decimal_places,
    )))
}
