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

//! The history module contains the records of successful calculations and
//! the stores that hold them.
//!
//! A `CalculationRecord` is created once per successful calculation and is
//! never modified. `HistoryStore`s are append only: records cannot be
//! changed or removed through them.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// The kinds of calculation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationType {
    /// The drift angle, heading and ground speed for a course through a wind.
    WindTriangle,
    /// The great circle distance and initial bearing between two positions.
    GreatCircle,
    /// The rhumb line distance and bearing between two positions.
    RhumbLine,
}

impl CalculationType {
    /// All the kinds of calculation.
    pub const ALL: [Self; 3] = [Self::WindTriangle, Self::GreatCircle, Self::RhumbLine];

    /// The tag which identifies the kind of calculation in requests.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::WindTriangle => "wind_triangle",
            Self::GreatCircle => "great_circle",
            Self::RhumbLine => "rhumb_line",
        }
    }

    /// The human readable name of the kind of calculation.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::WindTriangle => "Wind Triangle",
            Self::GreatCircle => "Great Circle",
            Self::RhumbLine => "Rhumb Line",
        }
    }
}

impl fmt::Display for CalculationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for CalculationType {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| {
                Error::validation(
                    "calculation_type",
                    format!("unknown calculation type '{tag}'"),
                )
            })
    }
}

/// The record of a successful calculation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRecord {
    calculation_type: CalculationType,
    inputs: Value,
    results: Map<String, Value>,
    created_at: DateTime<Utc>,
}

impl CalculationRecord {
    /// Construct a record timestamped now.
    /// * `calculation_type` - the kind of calculation.
    /// * `inputs` - the request payload, as supplied.
    /// * `results` - the reported results.
    #[must_use]
    pub fn new(
        calculation_type: CalculationType,
        inputs: Value,
        results: Map<String, Value>,
    ) -> Self {
        Self::with_timestamp(calculation_type, inputs, results, Utc::now())
    }

    /// Construct a record with a given timestamp, e.g. when restoring a history.
    #[must_use]
    pub const fn with_timestamp(
        calculation_type: CalculationType,
        inputs: Value,
        results: Map<String, Value>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            calculation_type,
            inputs,
            results,
            created_at,
        }
    }

    /// Accessor for the kind of calculation.
    #[must_use]
    pub const fn calculation_type(&self) -> CalculationType {
        self.calculation_type
    }

    /// Accessor for the request payload.
    #[must_use]
    pub const fn inputs(&self) -> &Value {
        &self.inputs
    }

    /// Accessor for the reported results.
    #[must_use]
    pub const fn results(&self) -> &Map<String, Value> {
        &self.results
    }

    /// Accessor for the creation time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl fmt::Display for CalculationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.calculation_type.label(),
            self.created_at.format("%Y-%m-%d %H:%M")
        )
    }
}

/// An append only store of `CalculationRecord`s.
pub trait HistoryStore {
    /// Append a record to the store.
    ///
    /// # Errors
    /// `Error::Store` if the record could not be stored.
    fn append(&mut self, record: CalculationRecord) -> Result<()>;

    /// The most recent records, newest first.
    /// * `limit` - the maximum number of records to return.
    fn recent(&self, limit: usize) -> Vec<CalculationRecord>;

    /// The most recent records of one kind of calculation, newest first.
    /// * `calculation_type` - the kind of calculation.
    /// * `limit` - the maximum number of records to return.
    fn recent_of(&self, calculation_type: CalculationType, limit: usize) -> Vec<CalculationRecord>;

    /// The number of records in the store.
    fn len(&self) -> usize;

    /// Whether the store is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A `HistoryStore` held in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InMemoryHistory {
    records: Vec<CalculationRecord>,
}

impl InMemoryHistory {
    /// Construct an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// The records in the order in which they were appended.
    #[must_use]
    pub fn records(&self) -> &[CalculationRecord] {
        &self.records
    }

    /// The most recent records, of one kind if given, newest first.
    fn select(
        &self,
        calculation_type: Option<CalculationType>,
        limit: usize,
    ) -> Vec<CalculationRecord> {
        // records with the same timestamp are returned latest appended first
        let mut records: Vec<&CalculationRecord> = self
            .records
            .iter()
            .rev()
            .filter(|r| calculation_type.is_none() || calculation_type == Some(r.calculation_type))
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.into_iter().take(limit).cloned().collect()
    }
}

impl HistoryStore for InMemoryHistory {
    fn append(&mut self, record: CalculationRecord) -> Result<()> {
        self.records.push(record);
        Ok(())
    }

    fn recent(&self, limit: usize) -> Vec<CalculationRecord> {
        self.select(None, limit)
    }

    fn recent_of(
        &self,
        calculation_type: CalculationType,
        limit: usize,
    ) -> Vec<CalculationRecord> {
        self.select(Some(calculation_type), limit)
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
