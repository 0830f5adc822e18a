//! Plain version part: dotted numeric sequence with an optional trailing letter

use std::cmp::Ordering;

use crate::version::error::VersionError;
use crate::version::number::VersionNumber;

/// The "plain" part of a version, e.g. `1.2.30` or `2.4a`.
///
/// Equality follows the ordering, so `1.2` and `1.2.0` are equal.
#[derive(Debug, Clone)]
pub struct VersionCore {
    segments: Vec<VersionNumber>,
    letter: Option<char>,
}

impl VersionCore {
    /// Parse a plain version such as `1.2.30` or `1.2a`.
    ///
    /// Every dot-separated segment must be a non-empty run of ASCII digits.
    /// The last segment may carry exactly one lowercase letter directly after
    /// its digits.
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        if text.is_empty() {
            return Err(VersionError::malformed(text, "empty version"));
        }

        let mut parts: Vec<&str> = text.split('.').collect();
        let mut letter = None;

        if let Some(last) = parts.last_mut() {
            let segment: &str = *last;
            let digits = segment.trim_end_matches(|c: char| c.is_ascii_lowercase());
            match segment.len() - digits.len() {
                0 => {}
                1 => {
                    letter = segment.chars().last();
                    *last = digits;
                }
                _ => {
                    return Err(VersionError::malformed(
                        text,
                        "more than one trailing letter",
                    ));
                }
            }
        }

        let segments = parts
            .iter()
            .map(|part| parse_segment(text, part))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments, letter })
    }

    pub fn segments(&self) -> &[VersionNumber] {
        &self.segments
    }

    pub fn letter(&self) -> Option<char> {
        self.letter
    }
}

fn parse_segment(text: &str, segment: &str) -> Result<VersionNumber, VersionError> {
    if segment.is_empty() {
        return Err(VersionError::malformed(text, "empty version segment"));
    }
    if !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VersionError::malformed(
            text,
            format!("segment '{}' is not numeric", segment),
        ));
    }
    Ok(VersionNumber::from_digits(segment))
}

impl Ord for VersionCore {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        let zero = VersionNumber::default();

        // Missing trailing segments count as zero
        for i in 0..len {
            let lhs = self.segments.get(i).unwrap_or(&zero);
            let rhs = other.segments.get(i).unwrap_or(&zero);
            match lhs.cmp(rhs) {
                Ordering::Equal => continue,
                ordering => return ordering,
            }
        }

        // None < Some(_), then 'a' < 'b' < ... < 'z'
        self.letter.cmp(&other.letter)
    }
}

impl PartialEq for VersionCore {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionCore {}

impl PartialOrd for VersionCore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", vec![1], None)]
    #[case("1.2.30", vec![1, 2, 30], None)]
    #[case("1.2a", vec![1, 2], Some('a'))]
    #[case("2004.05.01", vec![2004, 5, 1], None)]
    #[case("0.9z", vec![0, 9], Some('z'))]
    fn parse_returns_segments_and_letter(
        #[case] text: &str,
        #[case] segments: Vec<u64>,
        #[case] letter: Option<char>,
    ) {
        let core = VersionCore::parse(text).unwrap();
        let segments: Vec<VersionNumber> =
            segments.into_iter().map(VersionNumber::from).collect();
        assert_eq!(core.segments(), segments.as_slice());
        assert_eq!(core.letter(), letter);
    }

    #[test]
    fn parse_accepts_segments_wider_than_u64() {
        let core = VersionCore::parse("1.1234567890123456789012345").unwrap();
        assert_eq!(core.segments()[1].as_str(), "1234567890123456789012345");
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("1.")]
    #[case(".1")]
    #[case("1..2")]
    #[case("1.2ab")]
    #[case("1.a")]
    #[case("a")]
    #[case("1.2A")]
    #[case("1.x.2")]
    #[case("1a.2")]
    fn parse_rejects_malformed_text(#[case] text: &str) {
        assert!(matches!(
            VersionCore::parse(text),
            Err(VersionError::MalformedVersion { .. })
        ));
    }

    #[rstest]
    #[case("1.2", "1.2.0", Ordering::Equal)]
    #[case("1.2", "1.2.0.0", Ordering::Equal)]
    #[case("1.9", "1.10", Ordering::Less)]
    #[case("2.4", "2.4a", Ordering::Less)]
    #[case("2.4a", "2.4b", Ordering::Less)]
    #[case("2.4.0a", "2.4a", Ordering::Equal)]
    #[case("1.2.1", "1.2a", Ordering::Greater)]
    #[case("1.01", "1.1", Ordering::Equal)]
    #[case("2", "1.99.99", Ordering::Greater)]
    #[case(
        "1.1234567890123456789012345",
        "1.1234567890123456789012344",
        Ordering::Greater
    )]
    #[case("1.1234567890123456789012345", "1.1234567890123456789012345a", Ordering::Less)]
    #[case("20240101123456789012", "20240101123456789012.0", Ordering::Equal)]
    fn cmp_returns_expected_ordering(
        #[case] lhs: &str,
        #[case] rhs: &str,
        #[case] expected: Ordering,
    ) {
        let lhs = VersionCore::parse(lhs).unwrap();
        let rhs = VersionCore::parse(rhs).unwrap();
        assert_eq!(lhs.cmp(&rhs), expected);
        assert_eq!(rhs.cmp(&lhs), expected.reverse());
    }
}
