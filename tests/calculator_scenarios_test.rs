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

// extern crate we're testing, same as any other code would do.
extern crate icao_nav_calc;

use icao_nav_calc::{
    solve_great_circle, solve_rhumb_line, solve_wind_triangle, Calculator, CalculatorConfig,
    CalculationType, Degrees, Leg, WindTriangleInput,
};
use serde_json::{json, Value};

fn result_value(response: &Value, name: &str) -> f64 {
    assert_eq!(json!(true), response["success"], "response: {response}");
    response["results"][name]
        .as_f64()
        .unwrap_or_else(|| panic!("missing result: {name}"))
}

#[test]
fn test_wind_triangle_request() {
    let mut calculator = Calculator::new(CalculatorConfig::default());
    let payload = json!({
        "true_airspeed": 100,
        "true_course": 90,
        "wind_direction": 45,
        "wind_speed": 20
    });
    let response = calculator
        .calculate(CalculationType::WindTriangle, &payload)
        .to_json();

    assert_eq!(-8.13, result_value(&response, "drift_angle"));
    assert_eq!(81.87, result_value(&response, "magnetic_heading"));
    assert_eq!(84.85, result_value(&response, "ground_speed"));
    assert_eq!(1, calculator.history().len());
}

#[test]
fn test_wind_triangle_request_without_airspeed() {
    let mut calculator = Calculator::new(CalculatorConfig::default());
    let payload = json!({
        "true_airspeed": 0,
        "true_course": 90,
        "wind_direction": 45,
        "wind_speed": 100
    });
    let response = calculator
        .calculate_tagged("wind_triangle", &payload)
        .to_json();

    assert_eq!(json!(false), response["success"]);
    assert!(response["error"].is_string());
    assert!(response.get("results").is_none());
    assert!(calculator.history().is_empty());
}

#[test]
fn test_great_circle_request_new_york_london() {
    let mut calculator = Calculator::new(CalculatorConfig::default());
    let payload = json!({
        "lat1": 40.7128,
        "lon1": -74.0060,
        "lat2": 51.5074,
        "lon2": -0.1278
    });
    let response = calculator
        .calculate_tagged("great_circle", &payload)
        .to_json();

    let distance = result_value(&response, "distance");
    assert!(3000.0 < distance && distance < 4000.0);
    let initial_bearing = result_value(&response, "initial_bearing");
    assert!((0.0..360.0).contains(&initial_bearing));
}

#[test]
fn test_great_circle_request_coincident_positions() {
    let mut calculator = Calculator::new(CalculatorConfig::default());
    let payload = json!({ "lat1": 40, "lon1": -74, "lat2": 40, "lon2": -74 });
    let response = calculator
        .calculate_tagged("great_circle", &payload)
        .to_json();

    assert_eq!(0.0, result_value(&response, "distance"));
    assert_eq!(0.0, result_value(&response, "initial_bearing"));
}

#[test]
fn test_rhumb_line_requests() {
    let mut calculator = Calculator::new(CalculatorConfig::default());

    // String fields are coerced
    let payload = json!({ "lat1": "40.0", "lon1": "-74.0", "lat2": "41.0", "lon2": "-73.0" });
    let response = calculator.calculate_tagged("rhumb_line", &payload).to_json();
    let distance = result_value(&response, "distance");
    assert!(0.0 < distance);
    assert_eq!(distance, (distance * 100.0).round() / 100.0);
    assert!((0.0..360.0).contains(&result_value(&response, "bearing")));

    // Across the antimeridian, the short way round
    let payload = json!({ "lat1": 0, "lon1": 179, "lat2": 0, "lon2": -179 });
    let response = calculator.calculate_tagged("rhumb_line", &payload).to_json();
    let distance = result_value(&response, "distance");
    assert!(100.0 < distance && distance < 150.0);
    assert_eq!(90.0, result_value(&response, "bearing"));

    let history = calculator.history();
    assert_eq!(2, history.len());
    assert_eq!(&payload, history[0].inputs());
}

#[test]
fn test_missing_fields_default_to_zero() {
    let mut calculator = Calculator::new(CalculatorConfig::default());

    // A missing wind speed is no wind
    let payload = json!({ "true_airspeed": 120, "true_course": 270 });
    let response = calculator
        .calculate(CalculationType::WindTriangle, &payload)
        .to_json();
    assert_eq!(0.0, result_value(&response, "drift_angle"));
    assert_eq!(270.0, result_value(&response, "magnetic_heading"));
    assert_eq!(120.0, result_value(&response, "ground_speed"));

    // An empty request is a route from and to 0°N 0°E
    let response = calculator
        .calculate(CalculationType::GreatCircle, &json!({}))
        .to_json();
    assert_eq!(0.0, result_value(&response, "distance"));
}

#[test]
fn test_history_is_newest_first_and_limited() {
    let mut calculator = Calculator::new(CalculatorConfig::default());
    for i in 0..60 {
        let payload = json!({ "lat1": 0, "lon1": 0, "lat2": 0, "lon2": i });
        assert!(calculator
            .calculate(CalculationType::RhumbLine, &payload)
            .is_success());
    }

    let history = calculator.history();
    assert_eq!(50, history.len());
    assert_eq!(json!(59), history[0].inputs()["lon2"]);
    assert!(history
        .windows(2)
        .all(|pair| pair[1].created_at() <= pair[0].created_at()));
}

#[test]
fn test_wind_triangle_properties() {
    for tas in [50.0, 100.0, 250.0] {
        for course in (0..360).step_by(15) {
            for wind_direction in (0..360).step_by(30) {
                for wind_speed in [0.0, 10.0, 49.0, 120.0] {
                    let input = WindTriangleInput::new(
                        tas,
                        Degrees(f64::from(course)),
                        Degrees(f64::from(wind_direction)),
                        wind_speed,
                    );
                    let wind_angle = f64::from(wind_direction - course).to_radians();
                    let crosswind = (wind_speed * wind_angle.sin()).abs();
                    match solve_wind_triangle(&input) {
                        Ok(result) => {
                            assert!((0.0..360.0).contains(&result.magnetic_heading.0));
                            assert!(result.drift_angle.0.is_finite());
                            assert!(result.ground_speed.is_finite());
                        }
                        Err(error) => {
                            // only when the crosswind exceeds the airspeed
                            assert!(tas < crosswind + 1.0e-9, "{error}");
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_route_properties() {
    for lat1 in (-90..=90).step_by(30) {
        for lon1 in (-180..=180).step_by(45) {
            for lat2 in (-90..=90).step_by(45) {
                for lon2 in (-180..=180).step_by(60) {
                    let leg = Leg::from_degrees(
                        f64::from(lat1),
                        f64::from(lon1),
                        f64::from(lat2),
                        f64::from(lon2),
                    );
                    let reverse = Leg::new(leg.to.clone(), leg.from.clone());

                    let great_circle = solve_great_circle(&leg);
                    assert!(0.0 <= great_circle.distance.0);
                    assert!((0.0..360.0).contains(&great_circle.initial_bearing.0));
                    let reverse_distance = solve_great_circle(&reverse).distance.0;
                    assert!((great_circle.distance.0 - reverse_distance).abs() < 1.0e-6);

                    let rhumb_line = solve_rhumb_line(&leg);
                    assert!(0.0 <= rhumb_line.distance.0);
                    assert!(rhumb_line.distance.0.is_finite());
                    assert!((0.0..360.0).contains(&rhumb_line.bearing.0));
                }
            }
        }
    }
}
