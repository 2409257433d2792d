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


use std::io::BufRead;

use crate::{
    error::Result,
    record::{parse_line, DomainHit},
};

/// Returns true for lines that carry no record: `#` headers and footers, and blank lines.
pub(crate) fn is_skippable(line: &str) -> bool {
    line.starts_with('#') || line.trim().is_empty()
}

/// Parses a whole domain table held in memory.
///
/// Input without data lines yields an empty vector.
pub fn parse_str(content: &str) -> Result<Vec<DomainHit>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !is_skippable(line))
        .map(|(idx, line)| parse_line(line, idx + 1))
        .collect()
}

/// A synchronous domain table reader.
pub struct Reader<R> {
    inner: R,
    line_number: usize,
    buf: String,
}

impl<R> Reader<R>
where
    R: BufRead,
{
    pub fn new(inner: R) -> Self {
        Reader {
            inner,
            line_number: 0,
            buf: String::new(),
        }
    }

    /// The number of physical lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Reads the next record, skipping comment and blank lines.
    pub fn read_record(&mut self) -> Result<Option<DomainHit>> {
        loop {
            self.buf.clear();
            if self.inner.read_line(&mut self.buf)? == 0 {
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

    /// Returns an iterator over the remaining records.
    pub fn records(&mut self) -> Records<'_, R> {
        Records { reader: self }
    }
}

/// An iterator over the records of a [`Reader`].
pub struct Records<'a, R> {
    reader: &'a mut Reader<R>,
}

impl<R> Iterator for Records<'_, R>
where
    R: BufRead,
{
    type Item = Result<DomainHit>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_record().transpose()
    }
}
