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

use arrow::record_batch::RecordBatch;
use domtab_common::DomTabArrayBuilder;
use futures::Stream;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::{
    array_builder::HMMDomTabArrayBuilder,
    config::HMMDomTabConfig,
    error::Result,
    io::is_skippable,
    record::{parse_line, DomainHit},
};

/// Reads a domain table into arrow record batches.
pub struct BatchReader<R> {
    /// The reader to read from.
    reader: R,

    /// The configuration for this reader.
    config: Arc<HMMDomTabConfig>,

    /// Physical lines consumed so far, including comments.
    line_number: usize,

    /// Records emitted so far, checked against the limit.
    rows_read: usize,

    buf: String,
}

impl<R> BatchReader<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(reader: R, config: Arc<HMMDomTabConfig>) -> Self {
        Self {
            reader,
            config,
            line_number: 0,
            rows_read: 0,
            buf: String::new(),
        }
    }

    /// Converts the reader into a stream of batches. The stream ends after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<RecordBatch>> {
        futures::stream::unfold(Some(self), |reader| async move {
            let mut reader = reader?;

            match reader.read_batch().await {
                Ok(Some(batch)) => Some((Ok(batch), Some(reader))),
                Ok(None) => None,
                Err(e) => Some((Err(e), None)),
            }
        })
    }

    pub async fn read_record(&mut self) -> Result<Option<DomainHit>> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf).await? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.buf.trim_end_matches(['\n', '\r']);
            if is_skippable(line) {
                continue;
            }

            return parse_line(line, self.line_number).map(Some);
        }
    }

    fn remaining(&self) -> usize {
        match self.config.limit {
            Some(limit) => limit.saturating_sub(self.rows_read),
            None => usize::MAX,
        }
    }

    async fn read_batch(&mut self) -> Result<Option<RecordBatch>> {
        let batch_size = self.config.effective_batch_size().min(self.remaining());
        if batch_size == 0 {
            return Ok(None);
        }

        let mut array_builder = HMMDomTabArrayBuilder::create(
            self.config.file_schema.clone(),
            Some(self.config.projection()),
        )?;

        for _ in 0..batch_size {
            match self.read_record().await? {
                Some(record) => array_builder.append(&record)?,
                None => break,
            }
        }

        if array_builder.is_empty() {
            return Ok(None);
        }

        self.rows_read += array_builder.len();

        let schema = self.config.projected_schema()?;
        let batch = array_builder.try_into_record_batch(schema)?;

        tracing::debug!(
            rows = batch.num_rows(),
            line_number = self.line_number,
            "Read domain table batch"
        );

        Ok(Some(batch))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::{
        array::{Array, Float64Array, Int64Array, StringArray},
        datatypes::{DataType, Field, Schema},
    };
    use domtab_test::test_listing_table_dir;
    use futures::StreamExt;
    use object_store::local::LocalFileSystem;

    use crate::{HMMDomTabConfig, HMMDomTabError, HMMDomTabSchemaBuilder};

    use super::BatchReader;

    async fn read_fixture(config: HMMDomTabConfig) -> Vec<arrow::record_batch::RecordBatch> {
        let path = test_listing_table_dir("hmmdomtab", "test.hmmdomtab");
        let get_result = config.object_store.get(&path).await.unwrap();

        let stream_reader = tokio_util::io::StreamReader::new(get_result.into_stream());
        let buf_reader = tokio::io::BufReader::new(stream_reader);

        let batch_reader = BatchReader::new(buf_reader, Arc::new(config));

        batch_reader
            .into_stream()
            .map(|batch| batch.unwrap())
            .collect()
            .await
    }

    #[tokio::test]
    async fn test_batch_reader() {
        let batches = read_fixture(HMMDomTabConfig::default()).await;

        assert_eq!(batches.len(), 1);

        let batch = &batches[0];
        assert_eq!(batch.num_rows(), 6);
        assert_eq!(batch.num_columns(), 23);

        let target_names = batch
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap()
            .iter()
            .map(|v| v.unwrap().to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            target_names,
            vec!["Fox-1_C", "Fox-1_C", "RRM_1", "RRM_6", "RRM_5", "RRM_3"]
        );

        let query_accessions = batch
            .column(4)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(query_accessions.null_count(), 6);

        let query_lengths = batch
            .column(5)
            .as_any()
            .downcast_ref::<Int64Array>()
            .unwrap();
        assert!(query_lengths.iter().all(|v| v == Some(390)));

        let accuracies = batch
            .column(21)
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(accuracies.value(0), 0.66);
    }

    #[tokio::test]
    async fn test_batch_size_splits_batches() {
        let batches = read_fixture(HMMDomTabConfig::default().with_batch_size(4)).await;

        let sizes = batches.iter().map(|b| b.num_rows()).collect::<Vec<_>>();
        assert_eq!(sizes, vec![4, 2]);
    }

    #[tokio::test]
    async fn test_zero_batch_size_reads_every_record() {
        let batches = read_fixture(HMMDomTabConfig::default().with_batch_size(0)).await;

        let sizes = batches.iter().map(|b| b.num_rows()).collect::<Vec<_>>();
        assert_eq!(sizes, vec![6]);
    }

    #[tokio::test]
    async fn test_schema_wider_than_the_file_is_an_error() {
        let mut fields = HMMDomTabSchemaBuilder::default()
            .build()
            .fields()
            .iter()
            .map(|f| f.as_ref().clone())
            .collect::<Vec<_>>();
        fields.push(Field::new("sample", DataType::Utf8, false));

        let config = HMMDomTabConfig::new(
            Arc::new(LocalFileSystem::new()),
            Arc::new(Schema::new(fields)),
        );

        let content = "RRM_1 PF00076.21 70 sp|O43251|RFOX2_HUMAN - 390 2.7e-19 68.7 0.0 1 1 1.6e-22 4.8e-19 67.9 0.0 1 70 123 192 123 192 0.98 RNA recognition motif\n";
        let batch_reader = BatchReader::new(content.as_bytes(), Arc::new(config));

        let results = batch_reader.into_stream().collect::<Vec<_>>().await;

        assert_eq!(results.len(), 1);
        assert!(matches!(
            results[0],
            Err(HMMDomTabError::InvalidProjection(23))
        ));
    }

    #[tokio::test]
    async fn test_projection_and_limit() {
        let config = HMMDomTabConfig::default()
            .with_projection(vec![0, 22])
            .unwrap()
            .with_batch_size(2)
            .with_limit_opt(Some(3));

        let batches = read_fixture(config).await;

        let sizes = batches.iter().map(|b| b.num_rows()).collect::<Vec<_>>();
        assert_eq!(sizes, vec![2, 1]);

        let batch = &batches[0];
        assert_eq!(batch.num_columns(), 2);
        assert_eq!(batch.schema().field(1).name(), "description");

        let descriptions = batch
            .column(1)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(
            descriptions.value(0),
            "Calcitonin gene-related peptide regulator C terminal"
        );
    }

    #[tokio::test]
    async fn test_malformed_line_ends_stream() {
        let content = "\
# target name
RRM_1 PF00076.21 70 sp|O43251|RFOX2_HUMAN - 390 2.7e-19 68.7 0.0 1 1 1.6e-22 4.8e-19 67.9 0.0 1 70 123 192 123 192 0.98 RNA recognition motif
RRM_6 PF14259.5 70 sp|O43251|RFOX2_HUMAN - 390 1.1e-12
RRM_5 PF13893.5 56 sp|O43251|RFOX2_HUMAN - 390 1.4e-06 27.8 0.0 1 1 7.2e-10 2.2e-06 27.2 0.0 3 54 136 191 134 193 0.88 RNA recognition motif
";
        let config = Arc::new(HMMDomTabConfig::default().with_batch_size(1));
        let batch_reader = BatchReader::new(content.as_bytes(), config);

        let results = batch_reader.into_stream().collect::<Vec<_>>().await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().num_rows(), 1);
        assert!(matches!(
            results[1],
            Err(HMMDomTabError::MalformedRecord { line_number: 3, .. })
        ));
    }
}
