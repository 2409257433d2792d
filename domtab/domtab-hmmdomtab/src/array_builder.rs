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

use arrow::{
    array::{ArrayRef, Float64Builder, GenericStringBuilder, Int64Builder},
    datatypes::SchemaRef,
};
use domtab_common::DomTabArrayBuilder;

use crate::{
    error::{HMMDomTabError, Result},
    record::{DomainHit, FIXED_FIELD_COUNT},
};

/// The fixed fields plus the description.
const N_COLUMNS: usize = FIXED_FIELD_COUNT + 1;

/// Column builders for domain table record batches.
pub struct HMMDomTabArrayBuilder {
    target_names: GenericStringBuilder<i32>,
    accessions: GenericStringBuilder<i32>,
    target_lengths: Int64Builder,
    query_names: GenericStringBuilder<i32>,
    query_accessions: GenericStringBuilder<i32>,
    query_lengths: Int64Builder,
    full_sequence_evalues: Float64Builder,
    full_sequence_scores: Float64Builder,
    full_sequence_biases: Float64Builder,
    domain_indices: Int64Builder,
    domain_counts: Int64Builder,
    domain_c_evalues: Float64Builder,
    domain_i_evalues: Float64Builder,
    domain_scores: Float64Builder,
    domain_biases: Float64Builder,
    hmm_coord_froms: Int64Builder,
    hmm_coord_tos: Int64Builder,
    ali_coord_froms: Int64Builder,
    ali_coord_tos: Int64Builder,
    env_coord_froms: Int64Builder,
    env_coord_tos: Int64Builder,
    accuracies: Float64Builder,
    descriptions: GenericStringBuilder<i32>,

    projection: Vec<usize>,

    rows: usize,
}

impl HMMDomTabArrayBuilder {
    /// Creates builders for the projected columns of `schema`.
    pub fn create(schema: SchemaRef, projection: Option<Vec<usize>>) -> Result<Self> {
        let n_fields = schema.fields().len();
        let projection = match projection {
            Some(p) => p,
            None => (0..n_fields).collect(),
        };

        if let Some(idx) = projection
            .iter()
            .find(|&&idx| idx >= n_fields.min(N_COLUMNS))
        {
            return Err(HMMDomTabError::InvalidProjection(*idx));
        }

        if let Some(idx) = first_duplicate(&projection) {
            return Err(HMMDomTabError::DuplicateProjection(idx));
        }

        Ok(Self {
            target_names: GenericStringBuilder::<i32>::new(),
            accessions: GenericStringBuilder::<i32>::new(),
            target_lengths: Int64Builder::new(),
            query_names: GenericStringBuilder::<i32>::new(),
            query_accessions: GenericStringBuilder::<i32>::new(),
            query_lengths: Int64Builder::new(),
            full_sequence_evalues: Float64Builder::new(),
            full_sequence_scores: Float64Builder::new(),
            full_sequence_biases: Float64Builder::new(),
            domain_indices: Int64Builder::new(),
            domain_counts: Int64Builder::new(),
            domain_c_evalues: Float64Builder::new(),
            domain_i_evalues: Float64Builder::new(),
            domain_scores: Float64Builder::new(),
            domain_biases: Float64Builder::new(),
            hmm_coord_froms: Int64Builder::new(),
            hmm_coord_tos: Int64Builder::new(),
            ali_coord_froms: Int64Builder::new(),
            ali_coord_tos: Int64Builder::new(),
            env_coord_froms: Int64Builder::new(),
            env_coord_tos: Int64Builder::new(),
            accuracies: Float64Builder::new(),
            descriptions: GenericStringBuilder::<i32>::new(),
            projection,
            rows: 0,
        })
    }

    pub fn append(&mut self, record: &DomainHit) -> Result<()> {
        self.rows += 1;

        for col_idx in self.projection.iter() {
            match col_idx {
                0 => self.target_names.append_value(record.target_name()),
                1 => self.accessions.append_option(record.accession()),
                2 => self.target_lengths.append_value(record.target_length()),
                3 => self.query_names.append_value(record.query_name()),
                4 => self.query_accessions.append_option(record.query_accession()),
                5 => self.query_lengths.append_value(record.query_length()),
                6 => self
                    .full_sequence_evalues
                    .append_value(record.full_sequence_evalue()),
                7 => self
                    .full_sequence_scores
                    .append_value(record.full_sequence_score()),
                8 => self
                    .full_sequence_biases
                    .append_value(record.full_sequence_bias()),
                9 => self.domain_indices.append_value(record.domain_index()),
                10 => self.domain_counts.append_value(record.domain_count()),
                11 => self.domain_c_evalues.append_value(record.domain_c_evalue()),
                12 => self.domain_i_evalues.append_value(record.domain_i_evalue()),
                13 => self.domain_scores.append_value(record.domain_score()),
                14 => self.domain_biases.append_value(record.domain_bias()),
                15 => self.hmm_coord_froms.append_value(record.hmm_coord_from()),
                16 => self.hmm_coord_tos.append_value(record.hmm_coord_to()),
                17 => self.ali_coord_froms.append_value(record.ali_coord_from()),
                18 => self.ali_coord_tos.append_value(record.ali_coord_to()),
                19 => self.env_coord_froms.append_value(record.env_coord_from()),
                20 => self.env_coord_tos.append_value(record.env_coord_to()),
                21 => self.accuracies.append_value(record.accuracy()),
                22 => self.descriptions.append_value(record.description()),
                _ => return Err(HMMDomTabError::InvalidProjection(*col_idx)),
            }
        }

        Ok(())
    }

    pub fn finish(&mut self) -> Vec<ArrayRef> {
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(self.projection.len());

        for col_idx in self.projection.iter() {
            let array: ArrayRef = match col_idx {
                0 => Arc::new(self.target_names.finish()),
                1 => Arc::new(self.accessions.finish()),
                2 => Arc::new(self.target_lengths.finish()),
                3 => Arc::new(self.query_names.finish()),
                4 => Arc::new(self.query_accessions.finish()),
                5 => Arc::new(self.query_lengths.finish()),
                6 => Arc::new(self.full_sequence_evalues.finish()),
                7 => Arc::new(self.full_sequence_scores.finish()),
                8 => Arc::new(self.full_sequence_biases.finish()),
                9 => Arc::new(self.domain_indices.finish()),
                10 => Arc::new(self.domain_counts.finish()),
                11 => Arc::new(self.domain_c_evalues.finish()),
                12 => Arc::new(self.domain_i_evalues.finish()),
                13 => Arc::new(self.domain_scores.finish()),
                14 => Arc::new(self.domain_biases.finish()),
                15 => Arc::new(self.hmm_coord_froms.finish()),
                16 => Arc::new(self.hmm_coord_tos.finish()),
                17 => Arc::new(self.ali_coord_froms.finish()),
                18 => Arc::new(self.ali_coord_tos.finish()),
                19 => Arc::new(self.env_coord_froms.finish()),
                20 => Arc::new(self.env_coord_tos.finish()),
                21 => Arc::new(self.accuracies.finish()),
                22 => Arc::new(self.descriptions.finish()),
                _ => panic!("Invalid column index"),
            };

            arrays.push(array);
        }

        arrays
    }
}

fn first_duplicate(projection: &[usize]) -> Option<usize> {
    projection
        .iter()
        .enumerate()
        .find_map(|(i, idx)| projection[..i].contains(idx).then_some(*idx))
}

impl DomTabArrayBuilder for HMMDomTabArrayBuilder {
    fn finish(&mut self) -> Vec<ArrayRef> {
        self.finish()
    }

    fn len(&self) -> usize {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use arrow::array::Array;

    use crate::{parse_line, HMMDomTabError, HMMDomTabSchemaBuilder};

    use super::HMMDomTabArrayBuilder;

    const LINE: &str = "RRM_1 PF00076.21 70 sp|O43251|RFOX2_HUMAN - 390 2.7e-19 68.7 0.0 1 1 1.6e-22 4.8e-19 67.9 0.0 1 70 123 192 123 192 0.98 RNA recognition motif";

    #[test]
    fn test_out_of_range_projection_is_rejected() {
        let schema = HMMDomTabSchemaBuilder::default().build();

        let result = HMMDomTabArrayBuilder::create(schema, Some(vec![0, 23]));
        assert!(matches!(result, Err(HMMDomTabError::InvalidProjection(23))));
    }

    #[test]
    fn test_duplicate_projection_is_rejected() {
        let schema = HMMDomTabSchemaBuilder::default().build();

        let result = HMMDomTabArrayBuilder::create(schema, Some(vec![0, 5, 0]));
        assert!(matches!(result, Err(HMMDomTabError::DuplicateProjection(0))));
    }

    #[test]
    fn test_projected_columns_have_one_value_per_row() {
        let schema = HMMDomTabSchemaBuilder::default().build();
        let mut builder = HMMDomTabArrayBuilder::create(schema, Some(vec![22, 0])).unwrap();

        let hit = parse_line(LINE, 1).unwrap();
        builder.append(&hit).unwrap();
        builder.append(&hit).unwrap();

        let arrays = builder.finish();
        assert_eq!(arrays.len(), 2);
        assert!(arrays.iter().all(|a| a.len() == 2));
    }
}
