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

//! The config module contains the `Calculator` settings.
//!
//! The settings may be read from a JSON document, any field which is not
//! present takes its default value:
//!
//! ```json
//! { "decimal_places": 2, "history_limit": 50 }
//! ```

pub mod defaults;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The `Calculator` settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// The number of decimal places results are rounded to.
    #[serde(default = "defaults::decimal_places")]
    pub decimal_places: u32,

    /// The maximum number of records returned by a history listing.
    #[serde(default = "defaults::history_limit")]
    pub history_limit: usize,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            decimal_places: defaults::decimal_places(),
            history_limit: defaults::history_limit(),
        }
    }
}

impl CalculatorConfig {
    /// Parse the settings from a JSON document.
    /// * `json` - the JSON document.
    ///
    /// # Errors
    /// If the document is not valid JSON or a field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read the settings from a JSON file.
    /// * `path` - the path of the file.
    ///
    /// # Errors
    /// If the file cannot be read or its contents are invalid.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&contents)
    }

    /// Check that the settings are usable.
    ///
    /// # Errors
    /// If more than 15 decimal places are requested, beyond the precision
    /// of an `f64`.
    pub fn validate(&self) -> Result<()> {
        const MAX_DECIMAL_PLACES: u32 = 15;

        if MAX_DECIMAL_PLACES < self.decimal_places {
            return Err(Error::Config(format!(
                "decimal_places must not exceed {MAX_DECIMAL_PLACES}, not {}",
                self.decimal_places
            )));
        }
        Ok(())
    }
}
