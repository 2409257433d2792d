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


use std::fmt::Display;

use crate::error::{HMMDomTabError, Result};

/// Number of whitespace delimited fields that precede the description.
pub const FIXED_FIELD_COUNT: usize = 22;

/// Token HMMER writes in place of an absent accession.
const ABSENT: &str = "-";

/// One row of an HMMScan `--domtblout` report.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainHit {
    target_name: String,
    accession: Option<String>,
    target_length: i64,
    query_name: String,
    query_accession: Option<String>,
    query_length: i64,
    full_sequence_evalue: f64,
    full_sequence_score: f64,
    full_sequence_bias: f64,
    domain_index: i64,
    domain_count: i64,
    domain_c_evalue: f64,
    domain_i_evalue: f64,
    domain_score: f64,
    domain_bias: f64,
    hmm_coord_from: i64,
    hmm_coord_to: i64,
    ali_coord_from: i64,
    ali_coord_to: i64,
    env_coord_from: i64,
    env_coord_to: i64,
    accuracy: f64,
    description: String,
}

/// Parses one data line of a domain table.
///
/// The first 22 whitespace delimited tokens are the fixed fields. Whatever
/// follows is the description, rejoined with single spaces.
pub fn parse_line(line: &str, line_number: usize) -> Result<DomainHit> {
    let tokens = line.split_whitespace().collect::<Vec<_>>();

    if tokens.len() < FIXED_FIELD_COUNT {
        return Err(HMMDomTabError::MalformedRecord {
            line_number,
            line: line.to_string(),
        });
    }

    let fields = Fields {
        tokens: &tokens,
        line_number,
    };

    Ok(DomainHit {
        target_name: tokens[0].to_string(),
        accession: optional(tokens[1]),
        target_length: fields.int(2, "target_length")?,
        query_name: tokens[3].to_string(),
        query_accession: optional(tokens[4]),
        query_length: fields.int(5, "query_length")?,
        full_sequence_evalue: fields.float(6, "full_sequence_evalue")?,
        full_sequence_score: fields.float(7, "full_sequence_score")?,
        full_sequence_bias: fields.float(8, "full_sequence_bias")?,
        domain_index: fields.int(9, "domain_index")?,
        domain_count: fields.int(10, "domain_count")?,
        domain_c_evalue: fields.float(11, "domain_c_evalue")?,
        domain_i_evalue: fields.float(12, "domain_i_evalue")?,
        domain_score: fields.float(13, "domain_score")?,
        domain_bias: fields.float(14, "domain_bias")?,
        hmm_coord_from: fields.int(15, "hmm_coord_from")?,
        hmm_coord_to: fields.int(16, "hmm_coord_to")?,
        ali_coord_from: fields.int(17, "ali_coord_from")?,
        ali_coord_to: fields.int(18, "ali_coord_to")?,
        env_coord_from: fields.int(19, "env_coord_from")?,
        env_coord_to: fields.int(20, "env_coord_to")?,
        accuracy: fields.float(21, "accuracy")?,
        description: tokens[FIXED_FIELD_COUNT..].join(" "),
    })
}

fn optional(token: &str) -> Option<String> {
    if token == ABSENT {
        None
    } else {
        Some(token.to_string())
    }
}

struct Fields<'a> {
    tokens: &'a [&'a str],
    line_number: usize,
}

impl Fields<'_> {
    fn int(&self, idx: usize, field: &'static str) -> Result<i64> {
        self.tokens[idx]
            .parse()
            .map_err(|_| self.type_error(idx, field))
    }

    fn float(&self, idx: usize, field: &'static str) -> Result<f64> {
        self.tokens[idx]
            .parse()
            .map_err(|_| self.type_error(idx, field))
    }

    fn type_error(&self, idx: usize, field: &'static str) -> HMMDomTabError {
        HMMDomTabError::FieldTypeError {
            line_number: self.line_number,
            field,
            token: self.tokens[idx].to_string(),
        }
    }
}

impl DomainHit {
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn accession(&self) -> Option<&str> {
        self.accession.as_deref()
    }

    pub fn target_length(&self) -> i64 {
        self.target_length
    }

    pub fn query_name(&self) -> &str {
        &self.query_name
    }

    pub fn query_accession(&self) -> Option<&str> {
        self.query_accession.as_deref()
    }

    pub fn query_length(&self) -> i64 {
        self.query_length
    }

    pub fn full_sequence_evalue(&self) -> f64 {
        self.full_sequence_evalue
    }

    pub fn full_sequence_score(&self) -> f64 {
        self.full_sequence_score
    }

    pub fn full_sequence_bias(&self) -> f64 {
        self.full_sequence_bias
    }

    /// Ordinal of this domain among the query's domains, 1-based.
    pub fn domain_index(&self) -> i64 {
        self.domain_index
    }

    pub fn domain_count(&self) -> i64 {
        self.domain_count
    }

    /// Conditional E-value.
    pub fn domain_c_evalue(&self) -> f64 {
        self.domain_c_evalue
    }

    /// Independent E-value.
    pub fn domain_i_evalue(&self) -> f64 {
        self.domain_i_evalue
    }

    pub fn domain_score(&self) -> f64 {
        self.domain_score
    }

    pub fn domain_bias(&self) -> f64 {
        self.domain_bias
    }

    pub fn hmm_coord_from(&self) -> i64 {
        self.hmm_coord_from
    }

    pub fn hmm_coord_to(&self) -> i64 {
        self.hmm_coord_to
    }

    pub fn ali_coord_from(&self) -> i64 {
        self.ali_coord_from
    }

    pub fn ali_coord_to(&self) -> i64 {
        self.ali_coord_to
    }

    pub fn env_coord_from(&self) -> i64 {
        self.env_coord_from
    }

    pub fn env_coord_to(&self) -> i64 {
        self.env_coord_to
    }

    /// Mean posterior probability of the aligned residues.
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Writes the hit back out as a single-space separated domain table line.
impl Display for DomainHit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {:e} {} {} {} {} {:e} {:e} {} {} {} {} {} {} {} {} {}",
            self.target_name,
            self.accession.as_deref().unwrap_or(ABSENT),
            self.target_length,
            self.query_name,
            self.query_accession.as_deref().unwrap_or(ABSENT),
            self.query_length,
            self.full_sequence_evalue,
            self.full_sequence_score,
            self.full_sequence_bias,
            self.domain_index,
            self.domain_count,
            self.domain_c_evalue,
            self.domain_i_evalue,
            self.domain_score,
            self.domain_bias,
            self.hmm_coord_from,
            self.hmm_coord_to,
            self.ali_coord_from,
            self.ali_coord_to,
            self.env_coord_from,
            self.env_coord_to,
            self.accuracy,
        )?;

        if !self.description.is_empty() {
            write!(f, " {}", self.description)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::HMMDomTabError;

    use super::parse_line;

    const FOX_LINE: &str = "Fox-1_C              PF12414.7     93 sp|O43251|RFOX2_HUMAN -            390   3.2e-39  134.1  12.7   1   2     0.045   1.3e+02    1.4   0.1     1    24   228   251   227   263 0.66 Calcitonin gene-related peptide regulator C terminal";

    #[test]
    fn test_parse_line() {
        let hit = parse_line(FOX_LINE, 4).unwrap();

        assert_eq!(hit.target_name(), "Fox-1_C");
        assert_eq!(hit.accession(), Some("PF12414.7"));
        assert_eq!(hit.target_length(), 93);
        assert_eq!(hit.query_name(), "sp|O43251|RFOX2_HUMAN");
        assert_eq!(hit.query_accession(), None);
        assert_eq!(hit.query_length(), 390);
        assert_eq!(hit.full_sequence_evalue(), 3.2e-39);
        assert_eq!(hit.full_sequence_score(), 134.1);
        assert_eq!(hit.domain_index(), 1);
        assert_eq!(hit.domain_count(), 2);
        assert_eq!(hit.domain_i_evalue(), 130.0);
        assert_eq!(hit.hmm_coord_from(), 1);
        assert_eq!(hit.env_coord_to(), 263);
        assert_eq!(hit.accuracy(), 0.66);
        assert_eq!(
            hit.description(),
            "Calcitonin gene-related peptide regulator C terminal"
        );
    }

    #[test]
    fn test_description_whitespace_is_normalized() {
        let line = FOX_LINE.replace("gene-related peptide", "gene-related \t  peptide");
        let hit = parse_line(&line, 1).unwrap();

        assert_eq!(
            hit.description(),
            "Calcitonin gene-related peptide regulator C terminal"
        );
    }

    #[test]
    fn test_no_description() {
        let line = FOX_LINE
            .split_whitespace()
            .take(22)
            .collect::<Vec<_>>()
            .join(" ");
        let hit = parse_line(&line, 1).unwrap();

        assert_eq!(hit.description(), "");
        assert_eq!(hit.accuracy(), 0.66);
    }

    #[test]
    fn test_display_reparses_to_same_hit() {
        let hit = parse_line(FOX_LINE, 1).unwrap();
        let reparsed = parse_line(&hit.to_string(), 1).unwrap();

        assert_eq!(hit, reparsed);
        assert!(hit.to_string().contains(" - 390 "));
    }

    #[test]
    fn test_too_few_fields() {
        let line = FOX_LINE
            .split_whitespace()
            .take(20)
            .collect::<Vec<_>>()
            .join(" ");

        match parse_line(&line, 7) {
            Err(HMMDomTabError::MalformedRecord {
                line_number,
                line: raw,
            }) => {
                assert_eq!(line_number, 7);
                assert_eq!(raw, line);
            }
            other => panic!("expected malformed record, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_field() {
        let line = FOX_LINE.replacen(" 390 ", " 39O ", 1);

        match parse_line(&line, 12) {
            Err(HMMDomTabError::FieldTypeError {
                line_number,
                field,
                token,
            }) => {
                assert_eq!(line_number, 12);
                assert_eq!(field, "query_length");
                assert_eq!(token, "39O");
            }
            other => panic!("expected field type error, got {:?}", other),
        }
    }
}
