//! Regex pattern library for work-order field extraction.
//!
//! Every family holds an ordered set of patterns; the helpers at the
//! bottom implement the two matching policies used by the extractors.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Unit/port code patterns, strictest first. Unlike the other
    // families, the unit/port extractor unions matches across all four
    // instead of stopping at the first pattern that hits.

    // Canonical phrasing: "Unit/Порт U83.119-eth-5"
    pub static ref UNIT_PORT_PHRASED: Regex = Regex::new(
        r"(?i)Unit/Порт\s+((?:GE|U|MTT)[\d.]+-\w+(?:-\w+)?)"
    ).unwrap();

    // Spaced-hyphen variant: "U21.111 - eth - 15"
    pub static ref UNIT_PORT_SPACED: Regex = Regex::new(
        r"(?i)(?:Unit/Порт\s+)?((?:GE|U|MTT)[\d.]+\s*-\s*\w+\s*-\s*\w+)"
    ).unwrap();

    // Bare code without the phrase, word-bounded: "U21.111-eth-15"
    pub static ref UNIT_PORT_BARE: Regex = Regex::new(
        r"(?i)\b((?:GE|U|MTT)[\d.]+[-\s]\w+[-\s]\w+)\b"
    ).unwrap();

    // Phrase optional, trailing sub-id optional: "U21.111-eth"
    pub static ref UNIT_PORT_SUFFIXED: Regex = Regex::new(
        r"(?i)(?:Unit/Порт\s+)?((?:GE|U|MTT)[\d.]+[-\s]\w+[-\s]?\w*)"
    ).unwrap();

    // Loose fallback, tried only when the primary set finds nothing:
    // anchored on the phrase, generic prefix-digit blob after it.
    pub static ref UNIT_PORT_LOOSE: Regex = Regex::new(
        r"(?i)Unit[-\s/]*Порт[:\s]+((?:GE|U|MTT)[\w.\-]+)"
    ).unwrap();

    // Port number fallback chain: known interface names first, then a
    // generic letters+digits pattern, then trailing digits.
    pub static ref PORT_ETH: Regex = Regex::new(r"(?i)eth[-\s]+(\d+)").unwrap();
    pub static ref PORT_GI: Regex = Regex::new(r"(?i)gi[-\s]+(\d+)").unwrap();
    pub static ref PORT_FA: Regex = Regex::new(r"(?i)fa[-\s]+(\d+)").unwrap();
    pub static ref PORT_TE: Regex = Regex::new(r"(?i)te[-\s]+(\d+)").unwrap();
    pub static ref PORT_GE: Regex = Regex::new(r"(?i)ge[-\s]+(\d+)").unwrap();
    pub static ref PORT_ANY_IFACE: Regex = Regex::new(r"(?i)[a-z]+[-\s]+(\d+)").unwrap();
    pub static ref PORT_TRAILING_SEP: Regex = Regex::new(r"[-\s]+(\d+)$").unwrap();
    pub static ref PORT_TRAILING: Regex = Regex::new(r"(\d+)$").unwrap();

    // Auxiliary administrative fields, one narrow pattern per family.

    // Apartment: root "кв" with any letter suffix, optional dot.
    pub static ref APARTMENT: Regex = Regex::new(
        r"(?i)кв[а-яa-z]*\.?\s*(\d+)"
    ).unwrap();

    // Room: root "ком" with any letter suffix, dot required.
    pub static ref ROOM: Regex = Regex::new(
        r"(?i)ком[а-яa-z]*\.\s*(\d+)"
    ).unwrap();

    // Execution date: labeled D.D.D token, group lengths unconstrained.
    pub static ref EXECUTION_DATE: Regex = Regex::new(
        r"(?i)Дата выполнения\s*(\d+\.\d+\.\d+)"
    ).unwrap();

    // Disconnection keyword, acts as a presence flag.
    pub static ref DISCONNECTION: Regex = Regex::new(
        r"(?i)\bОтключение\b"
    ).unwrap();

    // Request-reason phrase.
    pub static ref REQUEST_REASON: Regex = Regex::new(
        r"(?i)по\s*заявлению"
    ).unwrap();

    // First hyphen separator, surrounding spaces tolerated.
    pub static ref SEPARATOR: Regex = Regex::new(r"\s*-\s*").unwrap();
}

/// All matches of one pattern: the first capture group when the pattern
/// has one, the whole match otherwise.
pub fn captures_first_group(pattern: &Regex, text: &str) -> Vec<String> {
    pattern
        .captures_iter(text)
        .map(|caps| {
            caps.get(1)
                .unwrap_or_else(|| caps.get(0).unwrap())
                .as_str()
                .to_string()
        })
        .collect()
}

/// Ordered pattern set: all matches of the first pattern that yields at
/// least one match. Pure function of (text, pattern set).
pub fn match_first(text: &str, patterns: &[&Regex]) -> Vec<String> {
    for pattern in patterns {
        let matches = captures_first_group(pattern, text);
        if !matches.is_empty() {
            return matches;
        }
    }
    Vec::new()
}

/// Ordered fallback chain: the first capture to succeed, if any.
pub fn first_capture(text: &str, patterns: &[&Regex]) -> Option<String> {
    match_first(text, patterns).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_first_stops_at_first_matching_pattern() {
        let matches = match_first("eth-5 gi-3", &[&PORT_ETH, &PORT_GI]);
        assert_eq!(matches, vec!["5".to_string()]);
    }

    #[test]
    fn test_match_first_falls_through() {
        let matches = match_first("gi-3 gi-4", &[&PORT_ETH, &PORT_GI]);
        assert_eq!(matches, vec!["3".to_string(), "4".to_string()]);
    }

    #[test]
    fn test_match_first_empty_for_no_match() {
        assert!(match_first("nothing here", &[&PORT_ETH, &PORT_GI]).is_empty());
    }

    #[test]
    fn test_captures_whole_match_without_group() {
        let matches = captures_first_group(&DISCONNECTION, "Плановое Отключение абонента");
        assert_eq!(matches, vec!["Отключение".to_string()]);
    }

    #[test]
    fn test_first_capture_order() {
        assert_eq!(
            first_capture("fa-1 eth-9", &[&PORT_ETH, &PORT_FA]),
            Some("9".to_string())
        );
        assert_eq!(first_capture("no ports", &[&PORT_ETH, &PORT_FA]), None);
    }
}
