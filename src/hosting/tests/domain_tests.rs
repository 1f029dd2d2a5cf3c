//! Validation tests for domain names and records.

use crate::hosting::domain::{DomainName, HostingDomainError};
use rstest::rstest;

#[rstest]
#[case("example.com")]
#[case("sub.example.co.uk")]
#[case("with-hyphen.example.org")]
#[case("xn--bcher-kva.example")]
#[case("123.example.net")]
fn accepts_label_format(#[case] raw: &str) {
    let name = DomainName::new(raw).expect("valid name");

    assert_eq!(name.as_str(), raw);
}

#[rstest]
fn normalizes_case_and_whitespace() {
    let name = DomainName::new("  Example.COM ").expect("valid name");

    assert_eq!(name.as_str(), "example.com");
}

#[rstest]
#[case("")]
#[case("nodot")]
#[case("double..dot.com")]
#[case(".leading.dot")]
#[case("trailing.dot.")]
#[case("-leading.hyphen.com")]
#[case("trailing-.hyphen.com")]
#[case("under_score.com")]
#[case("spa ce.com")]
fn rejects_malformed_names(#[case] raw: &str) {
    let result = DomainName::new(raw);

    assert!(matches!(
        result,
        Err(HostingDomainError::InvalidDomainName(_))
    ));
}

#[rstest]
fn rejects_overlong_label() {
    let label = "a".repeat(64);
    let result = DomainName::new(format!("{label}.com"));

    assert!(matches!(
        result,
        Err(HostingDomainError::InvalidDomainName(_))
    ));
}
