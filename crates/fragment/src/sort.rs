//! Fragment ordering.
//!
//! Fragments are concatenated in name order. The order is computed from the
//! names alone so it never depends on how the filesystem lists a directory.

use clap::ValueEnum;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::cmp::Ordering;
use std::ffi::{OsStr, OsString};

lazy_static! {
    // Leading run of ASCII digits, e.g. "10" in "10_domain.conf"
    static ref NUMERIC_PREFIX_REGEX: Regex = Regex::new(r"^[0-9]+").unwrap();
}

/// How fragment names are ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Byte-wise comparison of the full name
    #[default]
    Lexical,
    /// By the value of a leading number; names without one follow, lexically
    Numeric,
}

/// Sort fragment names in place
pub fn sort_names(names: &mut [OsString], mode: SortMode) {
    match mode {
        SortMode::Lexical => names.sort_by(|a, b| lexical(a, b)),
        SortMode::Numeric => names.sort_by(|a, b| numeric(a, b)),
    }
}

fn lexical(a: &OsStr, b: &OsStr) -> Ordering {
    a.as_encoded_bytes().cmp(b.as_encoded_bytes())
}

fn numeric(a: &OsStr, b: &OsStr) -> Ordering {
    match (numeric_prefix(a), numeric_prefix(b)) {
        (Some(x), Some(y)) => compare_digits(&x, &y).then_with(|| lexical(a, b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => lexical(a, b),
    }
}

fn numeric_prefix(name: &OsStr) -> Option<String> {
    let name = name.to_string_lossy();
    NUMERIC_PREFIX_REGEX
        .find(&name)
        .map(|m| m.as_str().trim_start_matches('0').to_string())
}

// Compare digit strings by value without parsing, so long prefixes cannot overflow
fn compare_digits(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sorted(names: &[&str], mode: SortMode) -> Vec<String> {
        let mut names: Vec<OsString> = names.iter().map(OsString::from).collect();
        sort_names(&mut names, mode);
        names.into_iter().map(|n| n.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn lexical_is_bytewise() {
        assert_eq!(
            sorted(&["b", "a", "B", "10_x", "9_y", ".hidden"], SortMode::Lexical),
            vec![".hidden", "10_x", "9_y", "B", "a", "b"]
        );
    }

    #[test]
    fn numeric_orders_by_value() {
        assert_eq!(
            sorted(&["10_domain", "9_header", "100_footer", "00_top"], SortMode::Numeric),
            vec!["00_top", "9_header", "10_domain", "100_footer"]
        );
    }

    #[test]
    fn numeric_ties_fall_back_to_name() {
        assert_eq!(
            sorted(&["010_b", "10_a", "10"], SortMode::Numeric),
            vec!["010_b", "10", "10_a"]
        );
    }

    #[test]
    fn numeric_puts_unnumbered_names_last() {
        assert_eq!(
            sorted(&["zz_footer", "5_body", "header"], SortMode::Numeric),
            vec!["5_body", "header", "zz_footer"]
        );
    }

    #[test]
    fn numeric_handles_prefixes_wider_than_u128() {
        let huge = format!("{}_big", "9".repeat(50));
        let names = [huge.as_str(), "1_small"];
        assert_eq!(sorted(&names, SortMode::Numeric), vec!["1_small".to_string(), huge]);
    }

    #[test]
    fn sort_mode_parses_from_yaml() {
        let mode: SortMode = serde_yaml::from_str("numeric").unwrap();
        assert_eq!(mode, SortMode::Numeric);
    }

    proptest! {
        #[test]
        fn order_is_independent_of_input_order(
            names in proptest::collection::hash_set("[0-9a-z_.]{1,8}", 0..20),
            seed in any::<u64>(),
            numeric_mode in any::<bool>(),
        ) {
            let mode = if numeric_mode { SortMode::Numeric } else { SortMode::Lexical };
            let mut forward: Vec<OsString> = names.iter().map(OsString::from).collect();
            let mut shuffled = forward.clone();
            // deterministic rotation + reversal as a stand-in for traversal order
            let len = shuffled.len().max(1);
            shuffled.rotate_left((seed as usize) % len);
            if seed % 2 == 0 {
                shuffled.reverse();
            }

            sort_names(&mut forward, mode);
            sort_names(&mut shuffled, mode);
            prop_assert_eq!(forward, shuffled);
        }

        #[test]
        fn lexical_matches_string_order(
            names in proptest::collection::hash_set("[ -~]{1,12}", 0..20),
        ) {
            let mut expected: Vec<String> = names.iter().cloned().collect();
            expected.sort();
            let mut actual: Vec<OsString> = names.iter().map(OsString::from).collect();
            sort_names(&mut actual, SortMode::Lexical);
            let actual: Vec<String> = actual.into_iter().map(|n| n.into_string().unwrap()).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
