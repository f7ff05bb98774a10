//! Version range expressions.
//!
//! # Responsibilities
//! - Validate range syntax once, at route registration
//! - Test request versions against the validated range
//!
//! # Design Decisions
//! - `||` alternatives are kept as separate `VersionReq` sets (semver has no OR)
//! - Whitespace inside a set means AND; an operator may stand apart from its version
//! - Sets are assembled comparator by comparator, so their size is unbounded
//! - `A - B` is an inclusive hyphen range and must be the whole set

use std::fmt;
use std::str::FromStr;

use semver::{Comparator, Version, VersionReq};
use thiserror::Error;

use crate::versioning::comparator::{is_operator, lower_comparator, lower_hyphen, Lowered};

/// Reasons a range expression is rejected.
#[derive(Debug, Error)]
pub enum RangeError {
    #[error("malformed comparator `{token}`")]
    Comparator { token: String },

    #[error("operator `{op}` is not followed by a version")]
    DanglingOperator { op: String },

    #[error("comparator `{comparator}` rejected: {source}")]
    Semver {
        comparator: String,
        #[source]
        source: semver::Error,
    },
}

/// One `||` alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ComparatorSet {
    Req(VersionReq),
    /// Contains a comparator no version can satisfy (`>*`).
    Unsatisfiable,
}

impl ComparatorSet {
    fn matches(&self, version: &Version) -> bool {
        match self {
            ComparatorSet::Req(req) => req.matches(version),
            ComparatorSet::Unsatisfiable => false,
        }
    }
}

/// A validated semantic version range such as `1.x.x` or `>=1.2.0 <2.0.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    raw: String,
    sets: Vec<ComparatorSet>,
}

impl VersionRange {
    /// Parse and validate a range expression.
    ///
    /// An empty expression matches every release version, like `*`.
    pub fn parse(input: &str) -> Result<Self, RangeError> {
        let sets = input
            .split("||")
            .map(parse_set)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: input.trim().to_string(),
            sets,
        })
    }

    /// Returns true if `input` is a syntactically valid range.
    pub fn is_valid(input: &str) -> bool {
        Self::parse(input).is_ok()
    }

    /// Returns true if the version falls within the range.
    pub fn satisfies(&self, version: &Version) -> bool {
        self.sets.iter().any(|set| set.matches(version))
    }

    /// The range expression as registered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for VersionRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_set(set: &str) -> Result<ComparatorSet, RangeError> {
    let tokens = tokenize(set)?;

    let lowered = if tokens.len() == 3 && tokens[1] == "-" {
        lower_hyphen(&tokens[0], &tokens[2])
            .ok_or_else(|| RangeError::Comparator {
                token: tokens.join(" "),
            })?
            .to_vec()
    } else {
        tokens
            .iter()
            .map(|token| {
                lower_comparator(token).ok_or_else(|| RangeError::Comparator {
                    token: token.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut comparators = Vec::with_capacity(lowered.len());
    for item in lowered {
        match item {
            Lowered::Any => {}
            Lowered::Nothing => return Ok(ComparatorSet::Unsatisfiable),
            Lowered::Comparator(c) => {
                let parsed = Comparator::parse(&c).map_err(|source| RangeError::Semver {
                    comparator: c.clone(),
                    source,
                })?;
                comparators.push(parsed);
            }
        }
    }

    // Built directly: `VersionReq::parse` caps a set at 32 comparators.
    Ok(ComparatorSet::Req(VersionReq { comparators }))
}

/// Split a set on whitespace, gluing standalone operators to the next token.
fn tokenize(set: &str) -> Result<Vec<String>, RangeError> {
    let mut tokens = Vec::new();
    let mut pending: Option<&str> = None;

    for word in set.split_whitespace() {
        match pending.take() {
            Some(op) if word != "-" => tokens.push(format!("{op}{word}")),
            Some(op) => return Err(RangeError::DanglingOperator { op: op.to_string() }),
            None if is_operator(word) => pending = Some(word),
            None => tokens.push(word.to_string()),
        }
    }

    match pending {
        Some(op) => Err(RangeError::DanglingOperator { op: op.to_string() }),
        None => Ok(tokens),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn range(s: &str) -> VersionRange {
        VersionRange::parse(s).unwrap()
    }

    #[test]
    fn test_x_range() {
        let r = range("1.x.x");
        assert!(r.satisfies(&v("1.0.1")));
        assert!(r.satisfies(&v("1.99.0")));
        assert!(!r.satisfies(&v("2.0.0")));
        assert!(!r.satisfies(&v("0.9.9")));
    }

    #[test]
    fn test_bare_version_is_exact() {
        let r = range("1.2.3");
        assert!(r.satisfies(&v("1.2.3")));
        assert!(!r.satisfies(&v("1.2.4")));
    }

    #[test]
    fn test_comparators_are_intersected() {
        let r = range(">=1.2.0 <2.0.0");
        assert!(r.satisfies(&v("1.2.0")));
        assert!(r.satisfies(&v("1.9.9")));
        assert!(!r.satisfies(&v("1.1.9")));
        assert!(!r.satisfies(&v("2.0.0")));

        let spaced = range(">= 1.2.0 < 2.0.0");
        assert!(spaced.satisfies(&v("1.5.0")));
        assert!(!spaced.satisfies(&v("2.0.0")));
    }

    #[test]
    fn test_alternatives_are_unioned() {
        let r = range("<1.0.0 || >=3.0.0");
        assert!(r.satisfies(&v("0.5.0")));
        assert!(!r.satisfies(&v("2.0.0")));
        assert!(r.satisfies(&v("3.1.0")));
    }

    #[test]
    fn test_hyphen_range() {
        let r = range("1.2.3 - 2.3");
        assert!(r.satisfies(&v("1.2.3")));
        assert!(r.satisfies(&v("2.3.9")));
        assert!(!r.satisfies(&v("2.4.0")));
        assert!(!r.satisfies(&v("1.2.2")));
    }

    #[test]
    fn test_tilde_and_caret() {
        let tilde = range("~1.2");
        assert!(tilde.satisfies(&v("1.2.9")));
        assert!(!tilde.satisfies(&v("1.3.0")));

        let caret = range("^0.2.3");
        assert!(caret.satisfies(&v("0.2.9")));
        assert!(!caret.satisfies(&v("0.3.0")));

        assert!(range("~>1.2").satisfies(&v("1.2.0")));
    }

    #[test]
    fn test_match_all_ranges() {
        for expr in ["", "*", "x", "  "] {
            let r = range(expr);
            assert!(r.satisfies(&v("3.4.5")), "{expr:?} should match a release");
            assert!(!r.satisfies(&v("1.0.0-alpha")), "{expr:?} should skip prereleases");
        }
    }

    #[test]
    fn test_unsatisfiable_set() {
        let r = range(">*");
        assert!(!r.satisfies(&v("0.0.0")));
        assert!(!r.satisfies(&v("9.9.9")));

        // Other alternatives still apply.
        assert!(range(">* || 1.x").satisfies(&v("1.4.0")));
    }

    #[test]
    fn test_prerelease_matching() {
        let r = range(">=1.2.3-beta.1 <2.0.0");
        assert!(r.satisfies(&v("1.2.3-beta.2")));
        assert!(!r.satisfies(&v("1.3.0-beta.1")));
        assert!(r.satisfies(&v("1.3.0")));
    }

    #[test]
    fn test_long_comparator_sets() {
        let expr = (0..40).map(|i| format!(">={i}.0.0")).collect::<Vec<_>>().join(" ");
        let r = range(&expr);
        assert!(r.satisfies(&v("39.0.0")));
        assert!(r.satisfies(&v("40.1.0")));
        assert!(!r.satisfies(&v("38.5.0")));
    }

    #[test]
    fn test_partial_and_prerelease_semantics() {
        let cases = [
            ("^0.0.3", "0.0.3", true),
            ("^0.0.3", "0.0.4", false),
            ("^0.0", "0.0.9", true),
            ("^0.0", "0.1.0", false),
            ("~1", "1.9.0", true),
            (">1", "2.0.0", true),
            (">1", "1.9.9", false),
            ("<=1.2", "1.2.9", true),
            ("<=1.2", "1.3.0", false),
            ("<1.2", "1.1.9", true),
            ("<1.2", "1.2.0", false),
            ("1.2.3 - 2", "2.9.9", true),
            ("1.2.3 - 2", "3.0.0", false),
            ("~1.2.3-beta.2", "1.2.3-beta.4", true),
            ("~1.2.3-beta.2", "1.2.4-beta.1", false),
            (">1.2.3-alpha.3", "3.4.5-alpha.9", false),
            (">1.2.3-alpha.3", "3.4.5", true),
        ];
        for (expr, version, expected) in cases {
            assert_eq!(range(expr).satisfies(&v(version)), expected, "{version} in {expr}");
        }
    }

    #[test]
    fn test_prefix_and_build_metadata() {
        assert!(range("v1.2.3").satisfies(&v("1.2.3")));
        assert!(range(">=v1.0.0").satisfies(&v("1.0.1")));
        assert!(range("1.2.3+build.5").satisfies(&v("1.2.3")));
    }

    #[test]
    fn test_invalid_ranges() {
        for expr in ["invalid", "1.2.3.4", ">=", "1.2.3 -", "1.0.0 - - 2.0.0", "01.2.3", ">=1.0.0 <"] {
            assert!(!VersionRange::is_valid(expr), "{expr:?} should be rejected");
        }
    }

    #[test]
    fn test_invalid_range_errors() {
        assert!(matches!(
            VersionRange::parse("invalid"),
            Err(RangeError::Comparator { token }) if token == "invalid"
        ));
        assert!(matches!(
            VersionRange::parse("1.0.0 >="),
            Err(RangeError::DanglingOperator { op }) if op == ">="
        ));
        assert!(matches!(
            VersionRange::parse("01.2.3"),
            Err(RangeError::Semver { .. })
        ));
    }

    #[test]
    fn test_display_and_from_str() {
        let r: VersionRange = " 1.x.x ".parse().unwrap();
        assert_eq!(r.as_str(), "1.x.x");
        assert_eq!(r.to_string(), "1.x.x");
    }
}
