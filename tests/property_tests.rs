//! Property tests for guard decisions.
//!
//! These cover the decision invariants across arbitrary versions,
//! header values and range expressions.

use axum::http::{HeaderMap, HeaderValue};
use proptest::prelude::*;
use semver::Version;
use semver_router::guard::{
    version, ApiVersionError, ConfigError, Decision, Guard, GuardConfig, GuardOptions, MALFORMED_VERSION,
    MISSING_VERSION,
};
use semver_router::VersionRange;

fn guard(range: &str) -> Guard<HeaderMap, ApiVersionError> {
    GuardConfig::default().range(range).unwrap()
}

fn headers(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("accept-version", HeaderValue::from_str(value).unwrap());
    headers
}

// Strategy: Generate a release version as (major, minor, patch)
fn arb_release() -> impl Strategy<Value = (u64, u64, u64)> {
    (0u64..10, 0u64..50, 0u64..50)
}

// Strategy: Generate header values that are not MAJOR.MINOR.PATCH
fn arb_malformed() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u64..100, 0u64..100).prop_map(|(a, b)| format!("{a}.{b}")),
        (0u64..100).prop_map(|a| a.to_string()),
        (0u64..10, 0u64..10, 0u64..10, 0u64..10).prop_map(|(a, b, c, d)| format!("{a}.{b}.{c}.{d}")),
        arb_release().prop_map(|(a, b, c)| format!("v{a}.{b}.{c}")),
        prop::string::string_regex("[a-z]{1,12}").unwrap(),
    ]
}

// Strategy: Generate one comparator in any of the supported forms
fn arb_comparator() -> impl Strategy<Value = String> {
    let ops = prop_oneof![Just(">="), Just("<="), Just(">"), Just("<"), Just("="), Just("")];
    prop_oneof![
        arb_release().prop_map(|(a, b, c)| format!("~{a}.{b}.{c}")),
        (0u64..10, 0u64..50).prop_map(|(a, b)| format!("~{a}.{b}")),
        arb_release().prop_map(|(a, b, c)| format!("^{a}.{b}.{c}")),
        (0u64..10).prop_map(|a| format!("^{a}")),
        (0u64..10).prop_map(|a| format!("{a}.x")),
        (0u64..10, 0u64..50).prop_map(|(a, b)| format!("{a}.{b}.x")),
        Just("*".to_string()),
        (ops, arb_release()).prop_map(|(op, (a, b, c))| format!("{op}{a}.{b}.{c}")),
        (arb_release(), "[a-z]{1,5}").prop_map(|((a, b, c), tag)| format!(">={a}.{b}.{c}-{tag}.1")),
    ]
}

// Strategy: Generate a `||` union of comparator sets and hyphen ranges
fn arb_valid_range() -> impl Strategy<Value = String> {
    let set = prop_oneof![
        prop::collection::vec(arb_comparator(), 1..4).prop_map(|c| c.join(" ")),
        (arb_release(), (0u64..10, 0u64..50)).prop_map(|((a, b, c), (d, e))| format!("{a}.{b}.{c} - {d}.{e}")),
    ];
    prop::collection::vec(set, 1..4).prop_map(|sets| sets.join(" || "))
}

proptest! {
    /// Property: a configuration with both an extractor and a header never builds
    #[test]
    fn proptest_ambiguous_source_always_fails(header in "[a-z][a-z0-9-]{0,15}") {
        let options = GuardOptions::<HeaderMap>::new()
            .get_version(|_| None)
            .header(header);
        prop_assert!(matches!(version(options), Err(ConfigError::AmbiguousVersionSource)));
    }

    /// Property: the major-version wildcard proceeds on its major and skips every other
    #[test]
    fn proptest_x_range_proceeds_or_skips((major, minor, patch) in arb_release()) {
        let raw = format!("{major}.{minor}.{patch}");
        let decision = guard("1.x.x").decide(&headers(&raw));
        let expected = Version::new(major, minor, patch);

        if major == 1 {
            prop_assert_eq!(decision, Decision::Proceed(expected));
        } else {
            prop_assert_eq!(decision, Decision::Skip(expected));
        }
    }

    /// Property: bounded ranges agree with plain version ordering
    #[test]
    fn proptest_bounded_range_matches_ordering(
        lower in arb_release(),
        upper in arb_release(),
        candidate in arb_release(),
    ) {
        let fmt = |(a, b, c): (u64, u64, u64)| format!("{a}.{b}.{c}");
        let range = format!(">={} <{}", fmt(lower), fmt(upper));
        let version = Version::parse(&fmt(candidate)).unwrap();

        let in_range = Version::parse(&fmt(lower)).unwrap() <= version
            && version < Version::parse(&fmt(upper)).unwrap();
        prop_assert_eq!(VersionRange::parse(&range).unwrap().satisfies(&version), in_range);
    }

    /// Property: non-semver header values are request errors, never a skip
    #[test]
    fn proptest_malformed_versions_fail(raw in arb_malformed()) {
        let decision = guard("*").decide(&headers(&raw));
        prop_assert_eq!(decision, Decision::Fail(ApiVersionError::new(MALFORMED_VERSION)));
    }

    /// Property: missing versions are request errors for every valid range
    #[test]
    fn proptest_missing_version_fails((major, minor, _) in arb_release()) {
        let range = format!("^{major}.{minor}");
        let decision = guard(&range).decide(&HeaderMap::new());
        prop_assert_eq!(decision, Decision::Fail(ApiVersionError::new(MISSING_VERSION)));
    }

    /// Property: words that are not versions never register as ranges
    #[test]
    fn proptest_invalid_ranges_rejected(word in "[a-uwyzA-WYZ][a-z]{2,10}") {
        let result = GuardConfig::<HeaderMap>::default().range(&word);
        let is_invalid_range = matches!(result, Err(ConfigError::InvalidRange { .. }));
        prop_assert!(is_invalid_range);
    }

    /// Property: every range built from the supported grammar registers
    #[test]
    fn proptest_valid_ranges_register(range in arb_valid_range()) {
        let result = GuardConfig::<HeaderMap>::default().range(&range);
        prop_assert!(result.is_ok(), "{} rejected: {:?}", range, result.err());
    }

    /// Property: registration accepts exactly the ranges `is_valid` accepts
    #[test]
    fn proptest_registration_agrees_with_is_valid(
        range in prop_oneof![arb_valid_range(), "[ <>=~^|xX*v.0-9a-z-]{0,24}"],
    ) {
        let result = GuardConfig::<HeaderMap>::default().range(&range);
        match result {
            Ok(_) => prop_assert!(VersionRange::is_valid(&range)),
            Err(err) => {
                prop_assert!(!VersionRange::is_valid(&range));
                let is_invalid_range = matches!(err, ConfigError::InvalidRange { .. });
                prop_assert!(is_invalid_range);
            }
        }
    }
}

#[test]
fn test_satisfies_across_range_forms() {
    let cases = [
        ("~1.2.3", "1.2.9", true),
        ("~1.2.3", "1.3.0", false),
        ("~1.2", "1.2.0", true),
        ("^1.2.3", "1.9.0", true),
        ("^1.2.3", "2.0.0", false),
        ("^0.2.3", "0.3.0", false),
        ("1.x", "1.7.2", true),
        ("1.2.x", "1.3.0", false),
        ("*", "0.0.1", true),
        ("1.2.3 - 2.3", "2.3.7", true),
        ("1.2.3 - 2.3", "2.4.0", false),
        ("<1.0.0 || ^3", "3.2.1", true),
        ("<1.0.0 || ^3", "2.0.0", false),
        (">=1.0.0 <1.5.0 || 2.x", "1.5.0", false),
        (">=1.2.3-beta.1 <2.0.0", "1.2.3-beta.2", true),
        (">=1.2.3-beta.1 <2.0.0", "1.4.0-beta.1", false),
    ];
    for (range, version, expected) in cases {
        let parsed = VersionRange::parse(range).unwrap();
        assert_eq!(
            parsed.satisfies(&Version::parse(version).unwrap()),
            expected,
            "{version} in {range}"
        );
    }
}
