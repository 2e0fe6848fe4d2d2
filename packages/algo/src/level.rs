//! Level Names
//!
//! Catalog levels are named `<base> (<start>-<end>)`, e.g. `B1.1 (31-60)`:
//! a proficiency level split into pages of words.

use std::cmp::Ordering;

use crate::types::DEFAULT_PAGE_SIZE;

/// Parsed level name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelName<'a> {
    pub base: &'a str,
    /// Inclusive word range, when the name carries one
    pub range: Option<(u32, u32)>,
}

/// Split a level name into base and word range
pub fn parse_level(name: &str) -> LevelName<'_> {
    let trimmed = name.trim();
    let parsed = trimmed
        .strip_suffix(')')
        .and_then(|rest| rest.rsplit_once('('))
        .and_then(|(base, range)| {
            let (start, end) = range.split_once('-')?;
            let start = start.trim().parse::<u32>().ok()?;
            let end = end.trim().parse::<u32>().ok()?;
            Some((base.trim_end(), (start, end)))
        });

    match parsed {
        Some((base, range)) => LevelName {
            base,
            range: Some(range),
        },
        None => LevelName {
            base: trimmed,
            range: None,
        },
    }
}

/// First page of a base level, e.g. `B1.1` → `B1.1 (1-30)`
pub fn default_sublevel(base: &str) -> String {
    format!("{} (1-{})", base.trim(), DEFAULT_PAGE_SIZE)
}

/// Order levels by the start of their word range
///
/// Names without a range sort first; ties fall back to the full name.
pub fn compare_levels(a: &str, b: &str) -> Ordering {
    let start = |name: &str| parse_level(name).range.map(|(start, _)| start).unwrap_or(0);
    start(a).cmp(&start(b)).then_with(|| a.cmp(b))
}

pub fn sort_levels(levels: &mut [String]) {
    levels.sort_by(|a, b| compare_levels(a, b));
}

/// Keep the levels whose name starts with `base`
pub fn filter_by_base(levels: Vec<String>, base: &str) -> Vec<String> {
    levels
        .into_iter()
        .filter(|level| level.starts_with(base))
        .collect()
}
