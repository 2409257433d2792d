// Copyright 2024 WHERE TRUE Technologies.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


use std::{error::Error, fmt::Display};

use arrow::error::ArrowError;

/// An error returned when reading an HMMDomTab file fails.
#[derive(Debug)]
pub enum HMMDomTabError {
    /// A data line had fewer than the 22 positional fields.
    MalformedRecord { line_number: usize, line: String },

    /// A numeric field held a token that does not parse as its type.
    FieldTypeError {
        line_number: usize,
        field: &'static str,
        token: String,
    },

    /// A projection referenced a column the file schema does not have.
    InvalidProjection(usize),

    /// A projection listed the same column more than once.
    DuplicateProjection(usize),

    ArrowError(ArrowError),
    IOError(std::io::Error),
}

impl Display for HMMDomTabError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HMMDomTabError::MalformedRecord { line_number, line } => write!(
                f,
                "Malformed record on line {}: expected at least 22 fields: {:?}",
                line_number, line
            ),
            HMMDomTabError::FieldTypeError {
                line_number,
                field,
                token,
            } => write!(
                f,
                "Invalid value for field {} on line {}: {:?}",
                field, line_number, token
            ),
            HMMDomTabError::InvalidProjection(idx) => {
                write!(f, "Invalid projection index: {}", idx)
            }
            HMMDomTabError::DuplicateProjection(idx) => {
                write!(f, "Duplicate projection index: {}", idx)
            }
            HMMDomTabError::ArrowError(error) => write!(f, "Arrow error: {}", error),
            HMMDomTabError::IOError(error) => write!(f, "IO error: {}", error),
        }
    }
}

impl Error for HMMDomTabError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HMMDomTabError::ArrowError(error) => Some(error),
            HMMDomTabError::IOError(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for HMMDomTabError {
    fn from(error: std::io::Error) -> Self {
        HMMDomTabError::IOError(error)
    }
}

impl From<ArrowError> for HMMDomTabError {
    fn from(error: ArrowError) -> Self {
        HMMDomTabError::ArrowError(error)
    }
}

impl From<HMMDomTabError> for ArrowError {
    fn from(error: HMMDomTabError) -> Self {
        ArrowError::ExternalError(Box::new(error))
    }
}

pub type Result<T, E = HMMDomTabError> = std::result::Result<T, E>;
