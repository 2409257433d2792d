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


use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};

/// Builds the Arrow schema for domain table files.
pub struct HMMDomTabSchemaBuilder {
    file_fields: Vec<Field>,
}

impl HMMDomTabSchemaBuilder {
    pub fn build(self) -> SchemaRef {
        Arc::new(Schema::new(self.file_fields))
    }
}

impl Default for HMMDomTabSchemaBuilder {
    fn default() -> Self {
        Self {
            file_fields: file_fields(),
        }
    }
}

fn file_fields() -> Vec<Field> {
    vec![
        Field::new("target_name", DataType::Utf8, false),
        Field::new("accession", DataType::Utf8, true),
        Field::new("target_length", DataType::Int64, false),
        Field::new("query_name", DataType::Utf8, false),
        Field::new("query_accession", DataType::Utf8, true),
        Field::new("query_length", DataType::Int64, false),
        Field::new("full_sequence_evalue", DataType::Float64, false),
        Field::new("full_sequence_score", DataType::Float64, false),
        Field::new("full_sequence_bias", DataType::Float64, false),
        Field::new("domain_index", DataType::Int64, false),
        Field::new("domain_count", DataType::Int64, false),
        Field::new("domain_c_evalue", DataType::Float64, false),
        Field::new("domain_i_evalue", DataType::Float64, false),
        Field::new("domain_score", DataType::Float64, false),
        Field::new("domain_bias", DataType::Float64, false),
        Field::new("hmm_coord_from", DataType::Int64, false),
        Field::new("hmm_coord_to", DataType::Int64, false),
        Field::new("ali_coord_from", DataType::Int64, false),
        Field::new("ali_coord_to", DataType::Int64, false),
        Field::new("env_coord_from", DataType::Int64, false),
        Field::new("env_coord_to", DataType::Int64, false),
        Field::new("accuracy", DataType::Float64, false),
        Field::new("description", DataType::Utf8, false),
    ]
}

#[cfg(test)]
mod tests {
    use super::HMMDomTabSchemaBuilder;

    #[test]
    fn test_default_schema() {
        let schema = HMMDomTabSchemaBuilder::default().build();

        assert_eq!(schema.fields().len(), 23);
        assert_eq!(schema.field(0).name(), "target_name");
        assert_eq!(schema.field(22).name(), "description");
        assert!(schema.field(1).is_nullable());
        assert!(schema.field(4).is_nullable());
        assert!(!schema.field(5).is_nullable());
    }
}
