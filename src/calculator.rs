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

//! The calculator module contains the request/response boundary around the
//! navigation solvers.
//!
//! A request is a JSON object of named numeric fields. A field may be a
//! JSON number or a string containing a number; a missing field is taken
//! as zero. Anything else is rejected with an `Error::Validation` before
//! a solver is called.
//!
//! | calculation     | request fields                                               | result fields                                     |
//! |-----------------|--------------------------------------------------------------|---------------------------------------------------|
//! | `wind_triangle` | `true_airspeed`, `true_course`, `wind_direction`, `wind_speed` | `drift_angle`, `magnetic_heading`, `ground_speed` |
//! | `great_circle`  | `lat1`, `lon1`, `lat2`, `lon2`                               | `distance`, `initial_bearing`                     |
//! | `rhumb_line`    | `lat1`, `lon1`, `lat2`, `lon2`                               | `distance`, `bearing`                             |
//!
//! Every successful calculation is appended to the `Calculator`'s
//! `HistoryStore`, failed calculations are not.

use crate::config::CalculatorConfig;
use crate::error::{Error, Result};
use crate::great_circle::{solve_great_circle, GreatCircleResult};
use crate::history::{CalculationRecord, CalculationType, HistoryStore, InMemoryHistory};
use crate::rhumb_line::{solve_rhumb_line, RhumbLineResult};
use crate::wind::{solve_wind_triangle, WindTriangleInput, WindTriangleResult};
use crate::{round_bearing, round_to, Leg};
use angle_sc::Degrees;
use log::{debug, warn};
use serde::ser::{Serialize, Serializer};
use serde_json::{json, Map, Value};

/// The JSON type of a value, for error messages.
const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The fields of a request payload.
/// # Errors
/// If the payload is not a JSON object.
fn request_fields(payload: &Value) -> Result<&Map<String, Value>> {
    payload.as_object().ok_or_else(|| {
        Error::validation(
            "request",
            format!("expected an object, not {}", json_type(payload)),
        )
    })
}

/// Coerce a request field to a finite floating point number.
/// * `fields` - the request fields.
/// * `name` - the name of the field.
///
/// returns the value of the field, zero if it is missing.
///
/// # Errors
/// If the field is not a number or a numeric string, or is not finite.
pub fn numeric_field(fields: &Map<String, Value>, name: &str) -> Result<f64> {
    let value = match fields.get(name) {
        None => return Ok(0.0),
        Some(Value::Number(number)) => number
            .as_f64()
            .ok_or_else(|| Error::validation(name, format!("{number} is not representable")))?,
        Some(Value::String(text)) => text.trim().parse::<f64>().map_err(|_| {
            Error::validation(name, format!("could not convert string to float: '{text}'"))
        })?,
        Some(other) => {
            return Err(Error::validation(
                name,
                format!("expected a number, not {}", json_type(other)),
            ))
        }
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::validation(name, format!("{value} is not finite")))
    }
}

/// Coerce a request field to a latitude in degrees, `-90° <= latitude <= 90°`.
fn latitude_field(fields: &Map<String, Value>, name: &str) -> Result<Degrees> {
    let value = numeric_field(fields, name)?;
    if (-90.0..=90.0).contains(&value) {
        Ok(Degrees(value))
    } else {
        Err(Error::validation(
            name,
            format!("latitude {value} is outside -90 to 90 degrees"),
        ))
    }
}

/// Coerce a request field to a longitude in degrees, `-180° <= longitude <= 180°`.
fn longitude_field(fields: &Map<String, Value>, name: &str) -> Result<Degrees> {
    let value = numeric_field(fields, name)?;
    if (-180.0..=180.0).contains(&value) {
        Ok(Degrees(value))
    } else {
        Err(Error::validation(
            name,
            format!("longitude {value} is outside -180 to 180 degrees"),
        ))
    }
}

/// Parse a wind triangle request.
/// * `payload` - the request payload.
///
/// # Errors
/// If the payload is not an object, a field is invalid or the wind speed
/// is negative.
pub fn parse_wind_triangle(payload: &Value) -> Result<WindTriangleInput> {
    let fields = request_fields(payload)?;
    let true_airspeed = numeric_field(fields, "true_airspeed")?;
    let true_course = numeric_field(fields, "true_course")?;
    let wind_direction = numeric_field(fields, "wind_direction")?;
    let wind_speed = numeric_field(fields, "wind_speed")?;
    if wind_speed < 0.0 {
        return Err(Error::validation(
            "wind_speed",
            format!("{wind_speed} is negative"),
        ));
    }

    Ok(WindTriangleInput::new(
        true_airspeed,
        Degrees(true_course),
        Degrees(wind_direction),
        wind_speed,
    ))
}

/// Parse a great circle or rhumb line request.
/// * `payload` - the request payload.
///
/// # Errors
/// If the payload is not an object or a coordinate is invalid.
pub fn parse_leg(payload: &Value) -> Result<Leg> {
    let fields = request_fields(payload)?;
    let lat1 = latitude_field(fields, "lat1")?;
    let lon1 = longitude_field(fields, "lon1")?;
    let lat2 = latitude_field(fields, "lat2")?;
    let lon2 = longitude_field(fields, "lon2")?;

    Ok(Leg::from_degrees(lat1.0, lon1.0, lat2.0, lon2.0))
}

fn wind_triangle_results(result: &WindTriangleResult, decimal_places: u32) -> Map<String, Value> {
    let mut results = Map::new();
    results.insert(
        String::from("drift_angle"),
        json!(round_to(result.drift_angle.0, decimal_places)),
    );
    results.insert(
        String::from("magnetic_heading"),
        json!(round_bearing(result.magnetic_heading, decimal_places).0),
    );
    results.insert(
        String::from("ground_speed"),
        json!(round_to(result.ground_speed, decimal_places)),
    );
    results
}

fn great_circle_results(result: &GreatCircleResult, decimal_places: u32) -> Map<String, Value> {
    let mut results = Map::new();
    results.insert(
        String::from("distance"),
        json!(round_to(result.distance.0, decimal_places)),
    );
    results.insert(
        String::from("initial_bearing"),
        json!(round_bearing(result.initial_bearing, decimal_places).0),
    );
    results
}

fn rhumb_line_results(result: &RhumbLineResult, decimal_places: u32) -> Map<String, Value> {
    let mut results = Map::new();
    results.insert(
        String::from("distance"),
        json!(round_to(result.distance.0, decimal_places)),
    );
    results.insert(
        String::from("bearing"),
        json!(round_bearing(result.bearing, decimal_places).0),
    );
    results
}

/// The response to a calculation request.
///
/// It serializes as `{"success": true, "results": {...}}` or
/// `{"success": false, "error": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    /// The rounded results of a successful calculation.
    Success(Map<String, Value>),
    /// The reason a calculation failed.
    Failure(String),
}

impl Response {
    /// Whether the calculation succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The results of a successful calculation.
    #[must_use]
    pub const fn results(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Success(results) => Some(results),
            Self::Failure(_) => None,
        }
    }

    /// The error message of a failed calculation.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// The response as a JSON value, the form in which it is serialized.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Success(results) => json!({ "success": true, "results": results }),
            Self::Failure(error) => json!({ "success": false, "error": error }),
        }
    }
}

impl From<Result<Map<String, Value>>> for Response {
    fn from(outcome: Result<Map<String, Value>>) -> Self {
        match outcome {
            Ok(results) => Self::Success(results),
            Err(error) => Self::Failure(error.to_string()),
        }
    }
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// The navigation calculator: it validates requests, calls the solvers and
/// records successful calculations in its `HistoryStore`.
#[derive(Clone, Debug)]
pub struct Calculator<S = InMemoryHistory> {
    config: CalculatorConfig,
    store: S,
}

impl Calculator<InMemoryHistory> {
    /// Construct a `Calculator` with an empty `InMemoryHistory`.
    /// * `config` - the calculator settings.
    #[must_use]
    pub const fn new(config: CalculatorConfig) -> Self {
        Self::with_store(config, InMemoryHistory::new())
    }
}

impl Default for Calculator<InMemoryHistory> {
    fn default() -> Self {
        Self::new(CalculatorConfig::default())
    }
}

impl<S: HistoryStore> Calculator<S> {
    /// Construct a `Calculator` which records calculations in `store`.
    /// * `config` - the calculator settings.
    /// * `store` - the history store.
    #[must_use]
    pub const fn with_store(config: CalculatorConfig, store: S) -> Self {
        Self { config, store }
    }

    /// Accessor for the calculator settings.
    #[must_use]
    pub const fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Accessor for the history store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Take the history store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Perform a calculation without recording it.
    /// * `calculation_type` - the kind of calculation.
    /// * `payload` - the request payload.
    ///
    /// returns the results rounded to the configured number of decimal places.
    ///
    /// # Errors
    /// `Error::Validation` if the payload is invalid or `Error::Domain` if
    /// the wind triangle has no solution.
    pub fn evaluate(
        &self,
        calculation_type: CalculationType,
        payload: &Value,
    ) -> Result<Map<String, Value>> {
        let decimal_places = self.config.decimal_places;
        match calculation_type {
            CalculationType::WindTriangle => {
                let input = parse_wind_triangle(payload)?;
                let result = solve_wind_triangle(&input)?;
                Ok(wind_triangle_results(&result, decimal_places))
            }
            CalculationType::GreatCircle => {
                let input = parse_leg(payload)?;
                let result = solve_great_circle(&input);
                Ok(great_circle_results(&result, decimal_places))
            }
            CalculationType::RhumbLine => {
                let input = parse_leg(payload)?;
                let result = solve_rhumb_line(&input);
                Ok(rhumb_line_results(&result, decimal_places))
            }
        }
    }

    /// Perform a calculation and record it if it succeeds.
    /// * `calculation_type` - the kind of calculation.
    /// * `payload` - the request payload, it is recorded as supplied.
    ///
    /// returns the `Response` to the request.
    pub fn calculate(&mut self, calculation_type: CalculationType, payload: &Value) -> Response {
        debug!("{calculation_type} request: {payload}");
        let outcome = self
            .evaluate(calculation_type, payload)
            .and_then(|results| {
                let record =
                    CalculationRecord::new(calculation_type, payload.clone(), results.clone());
                self.store.append(record)?;
                debug!(
                    "{calculation_type} recorded, history length: {}",
                    self.store.len()
                );
                Ok(results)
            });

        if let Err(error) = &outcome {
            warn!("{calculation_type} request rejected: {error}");
        }
        Response::from(outcome)
    }

    /// Perform a calculation identified by its tag and record it if it succeeds.
    /// * `tag` - the calculation tag: `wind_triangle`, `great_circle` or `rhumb_line`.
    /// * `payload` - the request payload.
    ///
    /// returns the `Response` to the request.
    pub fn calculate_tagged(&mut self, tag: &str, payload: &Value) -> Response {
        match tag.parse::<CalculationType>() {
            Ok(calculation_type) => self.calculate(calculation_type, payload),
            Err(error) => {
                warn!("request rejected: {error}");
                Response::Failure(error.to_string())
            }
        }
    }

    /// The most recent calculations, newest first, up to the configured
    /// history limit.
    #[must_use]
    pub fn history(&self) -> Vec<CalculationRecord> {
        self.store.recent(self.config.history_limit)
    }

    /// The most recent calculations of one kind, newest first, up to the
    /// configured history limit.
    /// * `calculation_type` - the kind of calculation.
    #[must_use]
    pub fn history_of(&self, calculation_type: CalculationType) -> Vec<CalculationRecord> {
        self.store.recent_of(calculation_type, self.config.history_limit)
    }
}
