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


//! Reads HMMScan `--domtblout` domain tables.
//!
//! Every data line holds 22 whitespace delimited fixed fields followed by a
//! free text description. [`parse_str`] and [`Reader`] produce [`DomainHit`]
//! records, and [`BatchReader`] produces arrow record batches whose columns
//! are described by [`HMMDomTabSchemaBuilder`].

mod array_builder;
mod batch_reader;
mod config;
mod error;
mod io;
mod record;
mod schema_builder;

pub use array_builder::HMMDomTabArrayBuilder;
pub use batch_reader::BatchReader;
pub use config::HMMDomTabConfig;
pub use error::{HMMDomTabError, Result};
pub use io::{parse_str, Reader, Records};
pub use record::{parse_line, DomainHit, FIXED_FIELD_COUNT};
pub use schema_builder::HMMDomTabSchemaBuilder;
