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
use domtab_hmmdomtab::HMMDomTabError;

/// Errors surfaced by the `domtab` binary.
#[derive(Debug)]
pub enum DomTabCliError {
    /// The domain table could not be parsed.
    HMMDomTabError(HMMDomTabError),

    /// Error from the Arrow package.
    ArrowError(ArrowError),

    /// Object store error
    ObjectStoreError(object_store::Error),

    /// The input path could not be turned into an object store path.
    InvalidPath(object_store::path::Error),

    /// IO error
    IOError(std::io::Error),

    /// A requested column is not part of the schema.
    UnknownColumn(String),

    /// A column was requested more than once.
    DuplicateColumn(String),
}

impl Display for DomTabCliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomTabCliError::HMMDomTabError(error) => write!(f, "{}", error),
            DomTabCliError::ArrowError(error) => write!(f, "Arrow error: {}", error),
            DomTabCliError::ObjectStoreError(error) => write!(f, "Object store error: {}", error),
            DomTabCliError::InvalidPath(error) => write!(f, "Invalid path: {}", error),
            DomTabCliError::IOError(error) => write!(f, "IO error: {}", error),
            DomTabCliError::UnknownColumn(name) => write!(f, "Unknown column: {}", name),
            DomTabCliError::DuplicateColumn(name) => write!(f, "Duplicate column: {}", name),
        }
    }
}

impl Error for DomTabCliError {}

impl From<HMMDomTabError> for DomTabCliError {
    fn from(error: HMMDomTabError) -> Self {
        DomTabCliError::HMMDomTabError(error)
    }
}

impl From<ArrowError> for DomTabCliError {
    fn from(error: ArrowError) -> Self {
        DomTabCliError::ArrowError(error)
    }
}

impl From<object_store::Error> for DomTabCliError {
    fn from(error: object_store::Error) -> Self {
        DomTabCliError::ObjectStoreError(error)
    }
}

impl From<object_store::path::Error> for DomTabCliError {
    fn from(error: object_store::path::Error) -> Self {
        DomTabCliError::InvalidPath(error)
    }
}

impl From<std::io::Error> for DomTabCliError {
    fn from(error: std::io::Error) -> Self {
        DomTabCliError::IOError(error)
    }
}

pub type Result<T, E = DomTabCliError> = std::result::Result<T, E>;
