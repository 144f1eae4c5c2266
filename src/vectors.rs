#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(unused_must_use)]
#![deny(unused_mut)]

//! vectors reads, writes, generates and checks the cross-implementation test vector document.
//!
//! The document is the real contract between implementations: every implementation that loads the
//! same word list must reproduce every expected phrase in it exactly.

use std::collections::HashSet;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::params::ProtocolParams;
use crate::phrase::derive_checksum_with;
use crate::wordlist::{WordList, WORD_COUNT};

/// TestVectors is a versioned list of addresses and the phrases they must produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestVectors {
    /// Version label of the document.
    pub version: String,
    /// Free text description.
    pub description: String,
    /// Name of the tool that produced the document.
    #[serde(
        rename = "generated_by",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub generated_by: Option<String>,
    /// Protocol constants the document was generated under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constants: Option<VectorConstants>,
    /// Coverage summary of the cases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<VectorStatistics>,
    /// The cases themselves.
    pub test_cases: Vec<TestCase>,
}

/// VectorConstants records the protocol parameters behind a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorConstants {
    /// PBKDF2 salt.
    pub salt: String,
    /// PBKDF2 round count.
    pub iterations: u32,
    /// Words per phrase.
    pub checksum_length: usize,
}

impl From<&ProtocolParams> for VectorConstants {
    fn from(params: &ProtocolParams) -> Self {
        VectorConstants {
            salt: params.salt().to_string(),
            iterations: params.iterations(),
            checksum_length: params.checksum_len(),
        }
    }
}

/// VectorStatistics summarizes how much of the word list a document exercises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorStatistics {
    /// Number of cases.
    pub total_vectors: usize,
    /// Number of distinct words appearing in any expected phrase.
    pub words_covered: usize,
    /// Size of the word list.
    pub total_words: usize,
    /// words_covered as a percentage of total_words, rounded to two decimals.
    pub coverage_percent: f64,
}

/// TestCase is one address and the phrase it must produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Input address.
    pub address: String,
    /// What the case exercises.
    pub description: String,
    /// Expected phrase, in order.
    pub expected: Vec<String>,
}

/// CaseFailure records a case whose derived phrase differs from the expected one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFailure {
    /// Position of the case in the document.
    pub index: usize,
    /// Input address.
    pub address: String,
    /// Expected phrase.
    pub expected: Vec<String>,
    /// Phrase actually derived.
    pub actual: Vec<String>,
}

/// ConformanceReport is the outcome of running a document against a word list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConformanceReport {
    /// Number of cases that reproduced exactly.
    pub passed: usize,
    /// Every case that did not.
    pub failures: Vec<CaseFailure>,
}

impl ConformanceReport {
    /// ensure_passed returns an error describing the first failure if any case failed.
    pub fn ensure_passed(&self) -> Result<()> {
        if let Some(first) = self.failures.first() {
            bail!(
                "{} of {} test vectors failed, first at case {} ({}): expected {}, got {}",
                self.failures.len(),
                self.passed + self.failures.len(),
                first.index,
                first.address,
                first.expected.join(" "),
                first.actual.join(" ")
            );
        }
        Ok(())
    }
}

impl TestVectors {
    /// from_json parses a test vector document.
    pub fn from_json(text: &str) -> Result<TestVectors> {
        serde_json::from_str(text).context("unable to parse test vector document")
    }

    /// to_json renders the document as pretty printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("unable to serialize test vector document")
    }

    /// generate derives the expected phrase for every (address, description) pair and records the
    /// constants and word coverage alongside them.
    pub fn generate(
        version: &str,
        description: &str,
        cases: &[(&str, &str)],
        word_list: &WordList,
        params: &ProtocolParams,
    ) -> TestVectors {
        let test_cases: Vec<TestCase> = cases
            .iter()
            .map(|&(address, description)| TestCase {
                address: address.to_string(),
                description: description.to_string(),
                expected: derive_checksum_with(address, word_list, params).into_words(),
            })
            .collect();

        let mut vectors = TestVectors {
            version: version.to_string(),
            description: description.to_string(),
            generated_by: Some(env!("CARGO_PKG_NAME").to_string()),
            constants: Some(params.into()),
            statistics: None,
            test_cases,
        };
        vectors.statistics = Some(vectors.compute_statistics());
        vectors
    }

    /// compute_statistics measures how many distinct words the expected phrases use.
    pub fn compute_statistics(&self) -> VectorStatistics {
        let covered: HashSet<&str> = self
            .test_cases
            .iter()
            .flat_map(|case| case.expected.iter().map(String::as_str))
            .collect();
        let percent = covered.len() as f64 / WORD_COUNT as f64 * 100.0;
        VectorStatistics {
            total_vectors: self.test_cases.len(),
            words_covered: covered.len(),
            total_words: WORD_COUNT,
            coverage_percent: (percent * 100.0).round() / 100.0,
        }
    }

    /// check_constants refuses a document generated under different protocol constants. A
    /// document without constants is accepted.
    pub fn check_constants(&self, params: &ProtocolParams) -> Result<()> {
        let Some(constants) = &self.constants else {
            return Ok(());
        };
        let ours = VectorConstants::from(params);
        if *constants != ours {
            warn!(
                document = ?constants,
                expected = ?ours,
                "test vector constants differ from protocol parameters"
            );
            bail!(
                "test vectors were generated with salt '{}', {} iterations and {} words, expected salt '{}', {} iterations and {} words",
                constants.salt,
                constants.iterations,
                constants.checksum_length,
                ours.salt,
                ours.iterations,
                ours.checksum_length
            );
        }
        Ok(())
    }

    /// verify derives every case under the given list and parameters and reports each mismatch.
    /// It fails outright only if the document's constants do not match the parameters.
    pub fn verify(&self, word_list: &WordList, params: &ProtocolParams) -> Result<ConformanceReport> {
        self.check_constants(params)?;

        let mut report = ConformanceReport::default();
        for (index, case) in self.test_cases.iter().enumerate() {
            let actual = derive_checksum_with(&case.address, word_list, params).into_words();
            if actual == case.expected {
                report.passed += 1;
                continue;
            }
            warn!(
                index,
                address = %case.address,
                description = %case.description,
                expected = %case.expected.join(" "),
                actual = %actual.join(" "),
                "test vector mismatch"
            );
            report.failures.push(CaseFailure {
                index,
                address: case.address.clone(),
                expected: case.expected.clone(),
                actual,
            });
        }

        info!(
            version = %self.version,
            passed = report.passed,
            failed = report.failures.len(),
            "ran test vectors"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SALT;
    use pretty_assertions::assert_eq;

    // fast keeps the unit tests quick, the shipped document is checked under the real
    // parameters in tests/conformance.rs.
    fn fast() -> ProtocolParams {
        ProtocolParams::new(SALT, 100, 5).unwrap()
    }

    #[test]
    // a generated document verifies against the list it was generated with.
    fn check_generate_and_verify() {
        let list = WordList::bip39_english();
        let params = fast();
        let vectors = TestVectors::generate(
            "1.0",
            "unit test vectors",
            &[("addr-a", "first"), ("addr-b", "second"), ("", "empty")],
            list,
            &params,
        );
        assert_eq!(vectors.test_cases.len(), 3);
        assert_eq!(vectors.generated_by.as_deref(), Some("human-checkphrase"));
        assert_eq!(vectors.constants, Some(VectorConstants::from(&params)));

        let stats = vectors.statistics.clone().unwrap();
        assert_eq!(stats.total_vectors, 3);
        assert_eq!(stats.total_words, 2048);
        assert!(stats.words_covered >= 1 && stats.words_covered <= 15);

        let report = vectors.verify(list, &params).unwrap();
        assert_eq!(report.passed, 3);
        assert!(report.failures.is_empty());
        report.ensure_passed().unwrap();
    }

    #[test]
    // a tampered case is reported, the others still pass.
    fn check_mismatch_reported() {
        let list = WordList::bip39_english();
        let params = fast();
        let mut vectors = TestVectors::generate(
            "1.0",
            "unit test vectors",
            &[("addr-a", "first"), ("addr-b", "second")],
            list,
            &params,
        );
        let original = vectors.test_cases[1].expected.clone();
        vectors.test_cases[1].expected.reverse();
        vectors.test_cases[1].expected[0] = "zoo".to_string();

        let report = vectors.verify(list, &params).unwrap();
        assert_eq!(report.passed, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index, 1);
        assert_eq!(report.failures[0].address, "addr-b");
        assert_eq!(report.failures[0].actual, original);
        report.ensure_passed().unwrap_err();
    }

    #[test]
    // a document generated under other constants is refused instead of producing a pile of
    // mismatches.
    fn check_constants_mismatch() {
        let list = WordList::bip39_english();
        let vectors = TestVectors::generate("1.0", "v", &[("a", "a")], list, &fast());
        vectors.check_constants(&fast()).unwrap();
        vectors.verify(list, &ProtocolParams::V1).unwrap_err();

        let mut bare = vectors.clone();
        bare.constants = None;
        bare.check_constants(&ProtocolParams::V1).unwrap();
    }

    #[test]
    // the JSON layout uses the field names shared by every implementation.
    fn check_json_layout() {
        let text = r#"{
            "version": "1.0",
            "description": "layout",
            "generated_by": "elsewhere",
            "constants": { "salt": "human-readable-checksum", "iterations": 40000, "checksumLength": 5 },
            "statistics": { "totalVectors": 1, "wordsCovered": 5, "totalWords": 2048, "coveragePercent": 0.24 },
            "testCases": [
                { "address": "x", "description": "d", "expected": ["a", "b", "c", "d", "e"] }
            ]
        }"#;
        let vectors = TestVectors::from_json(text).unwrap();
        assert_eq!(vectors.generated_by.as_deref(), Some("elsewhere"));
        assert_eq!(
            vectors.constants,
            Some(VectorConstants::from(&ProtocolParams::V1))
        );
        assert_eq!(vectors.statistics.as_ref().unwrap().coverage_percent, 0.24);
        assert_eq!(vectors.test_cases[0].expected.len(), 5);

        let json = vectors.to_json().unwrap();
        assert!(json.contains("\"testCases\""));
        assert!(json.contains("\"checksumLength\": 5"));
        assert!(json.contains("\"generated_by\""));
        assert_eq!(TestVectors::from_json(&json).unwrap(), vectors);

        // The optional sections may be missing.
        let minimal = r#"{ "version": "1.0", "description": "m", "testCases": [] }"#;
        let vectors = TestVectors::from_json(minimal).unwrap();
        assert!(vectors.constants.is_none());
        assert!(vectors.test_cases.is_empty());

        TestVectors::from_json("{ \"version\": 1 }").unwrap_err();
    }

    #[test]
    // coverage counts distinct words and rounds to two decimals.
    fn check_statistics() {
        let vectors = TestVectors {
            version: "1.0".to_string(),
            description: "stats".to_string(),
            generated_by: None,
            constants: None,
            statistics: None,
            test_cases: vec![
                TestCase {
                    address: "a".to_string(),
                    description: "a".to_string(),
                    expected: ["w1", "w2", "w3", "w1", "w2"].map(String::from).to_vec(),
                },
                TestCase {
                    address: "b".to_string(),
                    description: "b".to_string(),
                    expected: ["w3", "w4", "w5", "w6", "w7"].map(String::from).to_vec(),
                },
            ],
        };
        let stats = vectors.compute_statistics();
        assert_eq!(stats.total_vectors, 2);
        assert_eq!(stats.words_covered, 7);
        assert_eq!(stats.coverage_percent, 0.34);
    }
}
