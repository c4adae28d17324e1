use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Shape of a valid release identifier: 14 zero-padded digits
/// (`YYYYMMDDHHMMSS`), optionally followed by a hyphen and a version.
pub const RELEASE_ID_PATTERN: &str = r"^\d{14}(-.+)?$";

const RELEASE_DATE_FMT: &str = "%Y%m%d%H%M%S";

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(RELEASE_ID_PATTERN).expect("invalid release ID pattern"))
}

/// Generate a release identifier from the current UTC time.
///
/// The timestamp prefix is fixed-width and zero-padded so that
/// lexicographic ordering of identifiers matches chronological ordering.
/// Identifiers are always generated in UTC; mixing time zones across
/// releases would break that ordering.
///
/// If a non-empty version is supplied the identifier is
/// `$timestamp-$version` (e.g. `20140214231159-1.4.1`), otherwise just
/// `$timestamp`.
pub fn generate(version: Option<&str>) -> String {
    generate_at(Utc::now(), version)
}

/// Generate a release identifier for an explicit point in time.
pub fn generate_at(time: DateTime<Utc>, version: Option<&str>) -> String {
    let ts = time.format(RELEASE_DATE_FMT).to_string();

    match version {
        Some(version) if !version.is_empty() => format!("{}-{}", ts, version),
        _ => ts,
    }
}

/// Check whether a directory entry name has the release identifier shape.
///
/// Used both to validate caller-supplied identifiers and to filter
/// foreign entries (a stray `README`, lost+found, ...) out of release
/// listings.
pub fn is_valid(id: &str) -> bool {
    pattern().is_match(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn generate_at_without_version() {
        let time = Utc.with_ymd_and_hms(2014, 11, 5, 12, 31, 45).unwrap();
        assert_eq!(generate_at(time, None), "20141105123145");
    }

    #[test]
    fn generate_at_with_version() {
        let time = Utc.with_ymd_and_hms(2014, 2, 14, 23, 11, 59).unwrap();
        assert_eq!(generate_at(time, Some("1.4.1")), "20140214231159-1.4.1");
    }

    #[test]
    fn generate_at_empty_version_omits_suffix() {
        let time = Utc.with_ymd_and_hms(2014, 2, 14, 23, 11, 59).unwrap();
        assert_eq!(generate_at(time, Some("")), "20140214231159");
    }

    #[test]
    fn generate_zero_pads_small_components() {
        let time = Utc.with_ymd_and_hms(2015, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(generate_at(time, None), "20150102030405");
    }

    #[test]
    fn generated_ids_match_pattern() {
        assert!(is_valid(&generate(None)));
        assert!(is_valid(&generate(Some("local"))));
    }

    #[test]
    fn lexicographic_order_matches_chronological_order() {
        let earlier = Utc.with_ymd_and_hms(2014, 1, 9, 23, 59, 59).unwrap();
        let later = Utc.with_ymd_and_hms(2014, 1, 10, 0, 0, 0).unwrap();

        assert!(generate_at(earlier, None) < generate_at(later, None));
        assert!(generate_at(earlier, Some("9.9")) < generate_at(later, Some("0.1")));
    }

    #[test]
    fn is_valid_accepts_expected_shapes() {
        assert!(is_valid("20140921215951"));
        assert!(is_valid("20140921215951-1.4.1"));
        assert!(is_valid("20140921215951-rc1"));
    }

    #[test]
    fn is_valid_rejects_foreign_entries() {
        assert!(!is_valid("README"));
        assert!(!is_valid("2014"));
        assert!(!is_valid("20140921215951-"));
        assert!(!is_valid("current"));
        assert!(!is_valid("v20140921215951"));
    }
}
