//! Channel-name parsing for the `S<i>_D<j> <suffix>` convention.
//!
//! Parsing is anchored at the start of the name only: anything after the
//! recognised suffix is ignored, so `S1_D2 760 (raw)` still reads as a
//! 760 nm channel.

use std::fmt;

use serde::Serialize;

use crate::error::NirsError;

/// The source/detector indices encoded in a channel name.
///
/// Indices are `u32`; a name whose index does not fit is unparseable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SourceDetector {
    pub source: u32,
    pub detector: u32,
}

/// Result of parsing a channel name.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelName {
    /// Suffix is a wavelength in nm, e.g. `S1_D2 760`.
    Wavelength { pair: SourceDetector, nm: f64 },
    /// Suffix is a word, e.g. `S1_D2 hbo`.
    Label { pair: SourceDetector, label: String },
    Unparseable,
}

impl ChannelName {
    /// Parse a name, preferring the wavelength reading when the suffix is numeric.
    pub fn parse(name: &str) -> Self {
        if let Some((pair, nm)) = parse_wavelength(name) {
            ChannelName::Wavelength { pair, nm }
        } else if let Some((pair, label)) = parse_label(name) {
            ChannelName::Label { pair, label }
        } else {
            ChannelName::Unparseable
        }
    }

    pub fn pair(&self) -> Option<SourceDetector> {
        match self {
            ChannelName::Wavelength { pair, .. } | ChannelName::Label { pair, .. } => Some(*pair),
            ChannelName::Unparseable => None,
        }
    }
}

/// Split a run of characters matching `pred` off the front of `s`.
fn take_while(s: &str, pred: impl Fn(char) -> bool) -> (&str, &str) {
    let end = s
        .char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(s.len(), |(i, _)| i);
    s.split_at(end)
}

/// Leading decimal index. `None` when there are no digits or they overflow `u32`.
fn take_index(s: &str) -> Option<(u32, &str)> {
    let (digits, rest) = take_while(s, |c| c.is_ascii_digit());
    if digits.is_empty() {
        return None;
    }
    Some((digits.parse().ok()?, rest))
}

/// Parse the `S<i>_D<j> ` prefix, returning the indices and the suffix text.
fn parse_prefix(name: &str) -> Option<(SourceDetector, &str)> {
    let rest = name.strip_prefix('S')?;
    let (source, rest) = take_index(rest)?;
    let rest = rest.strip_prefix("_D")?;
    let (detector, rest) = take_index(rest)?;
    let suffix = rest.strip_prefix(' ')?;
    Some((SourceDetector { source, detector }, suffix))
}

/// Read a name whose suffix starts with `digits[.digits]`.
pub fn parse_wavelength(name: &str) -> Option<(SourceDetector, f64)> {
    let (pair, suffix) = parse_prefix(name)?;
    let (int_part, rest) = take_while(suffix, |c| c.is_ascii_digit());
    if int_part.is_empty() {
        return None;
    }
    let mut end = int_part.len();
    if let Some(frac) = rest.strip_prefix('.') {
        let (frac_digits, _) = take_while(frac, |c| c.is_ascii_digit());
        end += 1 + frac_digits.len();
    }
    let nm = suffix[..end].parse().ok()?;
    Some((pair, nm))
}

/// Read a name whose suffix starts with word characters (letters, digits, `_`).
pub fn parse_label(name: &str) -> Option<(SourceDetector, String)> {
    let (pair, suffix) = parse_prefix(name)?;
    let (word, _) = take_while(suffix, |c| c.is_alphanumeric() || c == '_');
    if word.is_empty() {
        return None;
    }
    Some((pair, word.to_string()))
}

// ---------------------------------------------------------------------------
// Optode labels
// ---------------------------------------------------------------------------

/// A physical source or detector, written `S<n>` / `D<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Optode {
    Source(u32),
    Detector(u32),
}

impl Optode {
    pub fn parse(label: &str) -> Result<Self, NirsError> {
        let invalid = || NirsError::InvalidOptode(label.to_string());
        let (is_source, digits) = if let Some(d) = label.strip_prefix('S') {
            (true, d)
        } else if let Some(d) = label.strip_prefix('D') {
            (false, d)
        } else {
            return Err(invalid());
        };
        match take_index(digits) {
            Some((n, "")) if is_source => Ok(Optode::Source(n)),
            Some((n, "")) => Ok(Optode::Detector(n)),
            _ => Err(invalid()),
        }
    }

    /// Whether this optode is one end of the given pair.
    pub fn is_part_of(&self, pair: SourceDetector) -> bool {
        match *self {
            Optode::Source(n) => pair.source == n,
            Optode::Detector(n) => pair.detector == n,
        }
    }
}

impl fmt::Display for Optode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Optode::Source(n) => write!(f, "S{n}"),
            Optode::Detector(n) => write!(f, "D{n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const S1D2: SourceDetector = SourceDetector { source: 1, detector: 2 };

    #[test]
    fn test_wavelength_names() {
        assert_eq!(parse_wavelength("S1_D2 760"), Some((S1D2, 760.0)));
        assert_eq!(parse_wavelength("S1_D2 850.5"), Some((S1D2, 850.5)));
        assert_eq!(parse_wavelength("S1_D2 850."), Some((S1D2, 850.0)));
        assert_eq!(parse_wavelength("S1_D2 hbo"), None);
    }

    #[test]
    fn test_trailing_text_is_ignored() {
        assert_eq!(parse_wavelength("S1_D2 760 raw"), Some((S1D2, 760.0)));
        assert_eq!(parse_wavelength("S1_D2 7x"), Some((S1D2, 7.0)));
        assert_eq!(parse_label("S1_D2 hbo-filtered"), Some((S1D2, "hbo".into())));
    }

    #[test]
    fn test_label_accepts_numeric_suffix() {
        assert_eq!(parse_label("S1_D2 760"), Some((S1D2, "760".into())));
        assert_eq!(parse_label("S1_D2 hbr"), Some((S1D2, "hbr".into())));
    }

    #[test]
    fn test_malformed_prefixes() {
        for name in ["", "S1_D2", "S1_D2-760", "s1_d2 760", "S_D2 760", "S1D2 760", "S1_D2  760", "Fz"] {
            assert_eq!(ChannelName::parse(name), ChannelName::Unparseable, "{name}");
        }
    }

    #[test]
    fn test_index_beyond_u32_is_unparseable() {
        assert_eq!(
            ChannelName::parse("S4294967295_D1 760").pair(),
            Some(SourceDetector { source: u32::MAX, detector: 1 })
        );
        assert_eq!(ChannelName::parse("S4294967296_D1 760"), ChannelName::Unparseable);
        assert_eq!(ChannelName::parse("S1_D99999999999 hbo"), ChannelName::Unparseable);
        assert!(matches!(Optode::parse("D4294967296"), Err(NirsError::InvalidOptode(_))));
    }

    #[test]
    fn test_tagged_parse_prefers_wavelength() {
        assert_eq!(
            ChannelName::parse("S10_D3 850"),
            ChannelName::Wavelength {
                pair: SourceDetector { source: 10, detector: 3 },
                nm: 850.0
            }
        );
        let parsed = ChannelName::parse("S1_D2 hbo");
        assert_eq!(parsed.pair(), Some(S1D2));
        assert!(matches!(parsed, ChannelName::Label { ref label, .. } if label == "hbo"));
    }

    #[test]
    fn test_optode_labels() {
        assert_eq!(Optode::parse("S3").unwrap(), Optode::Source(3));
        assert_eq!(Optode::parse("D12").unwrap(), Optode::Detector(12));
        assert_eq!(Optode::Detector(12).to_string(), "D12");
        for bad in ["X1", "S", "D1a", "s1", ""] {
            assert!(matches!(Optode::parse(bad), Err(NirsError::InvalidOptode(_))), "{bad}");
        }
    }

    #[test]
    fn test_optode_membership_is_exact() {
        let s10 = SourceDetector { source: 10, detector: 1 };
        assert!(!Optode::Source(1).is_part_of(s10));
        assert!(Optode::Source(10).is_part_of(s10));
        assert!(Optode::Detector(1).is_part_of(s10));
    }
}
