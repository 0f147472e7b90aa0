//! Language ranking and selection.
//!
//! Byte count alone over-weights generated and boilerplate-heavy languages
//! (markup, shaders). The primary allow-list lets a curated domain language
//! outrank a larger but incidental one, and the ignore-list removes
//! languages that never carry project identity.

use serde::{Deserialize, Serialize};

use crate::github::LanguageByteMap;

/// Languages promoted ahead of the byte-count ranking, in display order.
pub const PRIMARY_LANGUAGES: &[&str] = &["GDScript", "C#", "C", "Java", "Python"];

/// Languages excluded from selection entirely.
pub const IGNORED_LANGUAGES: &[&str] = &["GLSL", "HLSL", "ShaderLab", "GAP", "Mathematica", "HTML"];

/// Cap on languages kept per repository.
pub const TOP_LANGUAGES_PER_REPO: usize = 3;

/// A ranked, externally-visible language. List order is rank order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub name: String,
}

impl LanguageEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Rank and filter a repository's language byte map into at most `max`
/// entries.
///
/// Ignored languages are dropped, the rest ordered by byte count descending
/// (name order on ties). Primary languages present in the map come first,
/// in [`PRIMARY_LANGUAGES`] order, followed by the remaining languages in
/// byte order. When nothing usable remains, `fallback` becomes the single
/// entry, or the list is empty.
pub fn select_languages(
    bytes: &LanguageByteMap,
    fallback: Option<&str>,
    max: usize,
) -> Vec<LanguageEntry> {
    let mut ranked: Vec<(&str, u64)> = bytes
        .iter()
        .filter(|(name, _)| !IGNORED_LANGUAGES.contains(&name.as_str()))
        .map(|(name, count)| (name.as_str(), *count))
        .collect();
    // Stable sort over BTreeMap order keeps equal byte counts in name order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    if ranked.is_empty() {
        return match fallback {
            Some(name) => vec![LanguageEntry::new(name)],
            None => Vec::new(),
        };
    }

    let primary: Vec<&str> = PRIMARY_LANGUAGES
        .iter()
        .copied()
        .filter(|lang| ranked.iter().any(|(name, _)| name == lang))
        .collect();
    let secondary = ranked
        .iter()
        .map(|(name, _)| *name)
        .filter(|name| !primary.contains(name));

    primary
        .iter()
        .copied()
        .chain(secondary)
        .take(max)
        .map(LanguageEntry::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn byte_map(entries: &[(&str, u64)]) -> LanguageByteMap {
        entries
            .iter()
            .map(|(name, count)| (name.to_string(), *count))
            .collect()
    }

    fn names(entries: &[LanguageEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn empty_map_without_fallback_is_empty() {
        assert_eq!(select_languages(&byte_map(&[]), None, 3), Vec::new());
    }

    #[test]
    fn empty_map_with_fallback_yields_single_entry() {
        let out = select_languages(&byte_map(&[]), Some("Go"), 3);
        assert_eq!(out, vec![LanguageEntry::new("Go")]);
    }

    #[test]
    fn ranks_by_byte_count_descending() {
        let map = byte_map(&[("Rust", 500), ("Go", 2000), ("Lua", 100)]);
        assert_eq!(names(&select_languages(&map, None, 3)), vec!["Go", "Rust", "Lua"]);
    }

    #[test]
    fn ignored_languages_never_appear() {
        let map = byte_map(&[("GLSL", 9000), ("ShaderLab", 8000), ("Rust", 10)]);
        let out = select_languages(&map, None, 3);
        assert_eq!(names(&out), vec!["Rust"]);
        for entry in &out {
            assert!(!IGNORED_LANGUAGES.contains(&entry.name.as_str()));
        }
    }

    #[test]
    fn all_ignored_falls_back_to_primary_language() {
        let map = byte_map(&[("GLSL", 9000), ("HLSL", 100)]);
        let out = select_languages(&map, Some("GDScript"), 3);
        assert_eq!(out, vec![LanguageEntry::new("GDScript")]);
    }

    #[test]
    fn primary_languages_precede_larger_secondary_ones() {
        // GDScript is tiny next to the generated C++ but still leads.
        let map = byte_map(&[("C++", 90000), ("GDScript", 400), ("Rust", 5000)]);
        assert_eq!(
            names(&select_languages(&map, None, 3)),
            vec!["GDScript", "C++", "Rust"]
        );
    }

    #[test]
    fn primary_group_keeps_declared_order() {
        // Python outweighs C# in bytes; PRIMARY_LANGUAGES order still wins.
        let map = byte_map(&[("Python", 9000), ("C#", 10), ("C", 20)]);
        assert_eq!(
            names(&select_languages(&map, None, 3)),
            vec!["C#", "C", "Python"]
        );
    }

    #[test]
    fn truncates_to_max() {
        let map = byte_map(&[("A", 5), ("B", 4), ("C++", 3), ("D", 2), ("E", 1)]);
        let out = select_languages(&map, None, 3);
        assert_eq!(out.len(), 3);
        assert_eq!(names(&out), vec!["A", "B", "C++"]);
    }

    #[test]
    fn equal_byte_counts_rank_by_name() {
        let map = byte_map(&[("Zig", 100), ("Elm", 100), ("Nim", 100)]);
        assert_eq!(
            names(&select_languages(&map, None, 3)),
            vec!["Elm", "Nim", "Zig"]
        );
    }

    #[test]
    fn fallback_is_unused_when_entries_survive() {
        let map = byte_map(&[("Rust", 100)]);
        assert_eq!(names(&select_languages(&map, Some("Go"), 3)), vec!["Rust"]);
    }

    #[test]
    fn output_never_exceeds_max_or_repeats_names() {
        let map = byte_map(&[
            ("Python", 10),
            ("C", 9),
            ("Rust", 8),
            ("Go", 7),
            ("GLSL", 1000),
        ]);
        for max in 0..6 {
            let out = select_languages(&map, None, max);
            assert!(out.len() <= max);
            let mut seen = out.clone();
            seen.dedup();
            assert_eq!(seen.len(), out.len());
        }
    }
}
