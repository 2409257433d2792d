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

use arrow::datatypes::SchemaRef;
use domtab_common::DEFAULT_BATCH_SIZE;
use object_store::{local::LocalFileSystem, ObjectStore};

use crate::{
    error::{HMMDomTabError, Result},
    HMMDomTabSchemaBuilder,
};

/// Configuration for a HMMDomTab data source.
#[derive(Debug)]
pub struct HMMDomTabConfig {
    /// The number of rows to read at a time.
    pub batch_size: usize,

    /// The schema of the HMMDomTab file. This is static.
    pub file_schema: SchemaRef,

    /// The object store to use for reading HMMDomTab files.
    pub object_store: Arc<dyn ObjectStore>,

    /// The projection to use for reading HMMDomTab files.
    pub projection: Option<Vec<usize>>,

    /// The maximum number of rows to read.
    pub limit: Option<usize>,
}

impl HMMDomTabConfig {
    /// Create a new HMMDomTab configuration.
    pub fn new(object_store: Arc<dyn ObjectStore>, file_schema: SchemaRef) -> Self {
        Self {
            object_store,
            file_schema,
            batch_size: DEFAULT_BATCH_SIZE,
            projection: None,
            limit: None,
        }
    }

    /// Set the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the limit.
    pub fn with_limit_opt(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Set the projection. Every index must name a distinct column of the file schema.
    pub fn with_projection(mut self, projection: Vec<usize>) -> Result<Self> {
        let n_fields = self.file_schema.fields().len();

        for (i, idx) in projection.iter().enumerate() {
            if *idx >= n_fields {
                return Err(HMMDomTabError::InvalidProjection(*idx));
            }

            if projection[..i].contains(idx) {
                return Err(HMMDomTabError::DuplicateProjection(*idx));
            }
        }

        self.projection = Some(projection);
        Ok(self)
    }

    /// Set the projection from an optional vector.
    pub fn with_some_projection(self, projection: Option<Vec<usize>>) -> Result<Self> {
        match projection {
            Some(projection) => self.with_projection(projection),
            None => Ok(self),
        }
    }

    /// Get the effective batch size, which is the minimum of the batch size
    /// and the limit. A batch size of zero means `DEFAULT_BATCH_SIZE`.
    pub fn effective_batch_size(&self) -> usize {
        let batch_size = match self.batch_size {
            0 => DEFAULT_BATCH_SIZE,
            n => n,
        };

        self.limit.map_or(batch_size, |limit| batch_size.min(limit))
    }

    /// Get the projection.
    pub fn projection(&self) -> Vec<usize> {
        self.projection
            .clone()
            .unwrap_or_else(|| (0..self.file_schema.fields().len()).collect())
    }

    /// Get the projected schema.
    pub fn projected_schema(&self) -> arrow::error::Result<SchemaRef> {
        let schema = self.file_schema.project(&self.projection())?;

        Ok(Arc::new(schema))
    }
}

impl Default for HMMDomTabConfig {
    fn default() -> Self {
        let file_schema = HMMDomTabSchemaBuilder::default().build();

        Self::new(Arc::new(LocalFileSystem::new()), file_schema)
    }
}
