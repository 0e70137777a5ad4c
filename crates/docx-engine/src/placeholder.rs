//! Placeholder tables and single-pass substitution

use regex::Regex;

use crate::errors::EngineError;

/// Ordered marker/value pairs applied to one template part
///
/// All markers are replaced in a single left-to-right pass over the original
/// text. Where two markers start at the same position the longer one wins,
/// so `acc1nombre` is never split by a shorter `acc1` marker. Replacement
/// output is never rescanned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderTable {
    entries: Vec<(String, String)>,
}

impl PlaceholderTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a marker whose value is plain text; XML metacharacters are escaped
    pub fn insert_text(&mut self, marker: impl Into<String>, value: impl AsRef<str>) -> &mut Self {
        let escaped = crate::xml::escape_text(value.as_ref());
        self.insert_raw(marker, escaped)
    }

    /// Add a marker whose value is inserted verbatim (may contain markup)
    ///
    /// Re-inserting an existing marker replaces its value in place. Empty
    /// markers are ignored.
    pub fn insert_raw(&mut self, marker: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let marker = marker.into();
        if marker.is_empty() {
            return self;
        }
        let value = value.into();
        match self.entries.iter_mut().find(|(m, _)| *m == marker) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((marker, value)),
        }
        self
    }

    pub fn get(&self, marker: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(m, _)| m == marker)
            .map(|(_, v)| v.as_str())
    }

    pub fn markers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(m, _)| m.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every marker occurrence in `text`
    pub fn apply(&self, text: &str) -> Result<String, EngineError> {
        if self.entries.is_empty() {
            return Ok(text.to_string());
        }

        let matcher = self.matcher()?;
        let replaced = matcher.replace_all(text, |caps: &regex::Captures<'_>| {
            let found = &caps[0];
            self.get(found).unwrap_or(found).to_string()
        });

        Ok(replaced.into_owned())
    }

    /// Markers from this table that still occur in `text`
    pub fn unreplaced<'a>(&'a self, text: &str) -> Vec<&'a str> {
        self.markers().filter(|m| text.contains(m)).collect()
    }

    /// Alternation of all markers, longest first
    fn matcher(&self) -> Result<Regex, EngineError> {
        let mut markers: Vec<&str> = self.markers().collect();
        markers.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let pattern = markers
            .iter()
            .map(|m| regex::escape(m))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Regex::new(&pattern)?)
    }
}

impl<M, V> FromIterator<(M, V)> for PlaceholderTable
where
    M: Into<String>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (M, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (marker, value) in iter {
            table.insert_text(marker, value);
        }
        table
    }
}
