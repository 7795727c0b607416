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

//! The error module contains the `Error` type returned by the solvers,
//! the `Calculator` and the configuration loader.

use thiserror::Error;

/// The errors reported by the library.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A request field is missing, ill-typed, not finite or out of range.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// The name of the offending field.
        field: String,
        /// Why the field was rejected.
        reason: String,
    },

    /// The navigation model has no solution for the given inputs.
    #[error("undefined drift angle: {0}")]
    Domain(String),

    /// The history store could not record a calculation.
    #[error("history store error: {0}")]
    Store(String),

    /// The configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Construct a `Validation` error.
    /// * `field` - the name of the offending field.
    /// * `reason` - why the field was rejected.
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error was caused by the request rather than the model.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// The `Result` type returned by the library.
pub type Result<T> = core::result::Result<T, Error>;
