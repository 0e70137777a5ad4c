//! Stored party lists
//!
//! Each recorded acta keeps its parties as `name,shares;name,shares`. The
//! forms page reads them back to suggest names already used by the group.

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::Party;

lazy_static! {
    static ref SHARE_COUNT: Regex = Regex::new(r",+[0-9.]+").unwrap();
}

/// Serialize parties for storage
pub fn encode(parties: &[Party]) -> String {
    parties
        .iter()
        .map(|p| format!("{},{}", p.name, p.shares))
        .collect::<Vec<_>>()
        .join(";")
}

/// Party names from one stored list
pub fn names(accdata: &str) -> Vec<String> {
    SHARE_COUNT
        .replace_all(accdata, "")
        .split(';')
        .map(|name| name.trim().trim_end_matches(',').trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Unique names across many stored lists, in first-seen order
pub fn unique_names<'a>(lists: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = Vec::new();
    for name in lists.into_iter().flat_map(names) {
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}
