//! Severity and type breakdowns for a scan.
//!
//! A `Tally` keeps keys in first-seen order and serializes as a JSON object,
//! so the persisted breakdown lists severities in the order the aggregator
//! encountered them.

use super::Issue;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Insertion-ordered string → count mapping.
pub struct Tally {
    entries: Vec<(String, usize)>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `key`; unseen keys start at zero.
    pub fn increment(&mut self, key: &str) {
        self.add(key, 1);
    }

    fn add(&mut self, key: &str, n: usize) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, count)) => *count += n,
            None => self.entries.push((key.to_string(), n)),
        }
    }

    pub fn get(&self, key: &str) -> usize {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), *c))
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy with keys in lexicographic order.
    pub fn sorted(&self) -> Tally {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Tally { entries }
    }
}

impl Serialize for Tally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct TallyVisitor;

impl<'de> Visitor<'de> for TallyVisitor {
    type Value = Tally;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object of counts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Tally, A::Error> {
        let mut tally = Tally::new();
        while let Some((k, v)) = access.next_entry::<String, usize>()? {
            tally.add(&k, v);
        }
        Ok(tally)
    }
}

impl<'de> Deserialize<'de> for Tally {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TallyVisitor)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Per-severity and per-type counts over one scan's issues.
pub struct Breakdown {
    pub by_severity: Tally,
    pub by_type: Tally,
}

impl Breakdown {
    /// Single pass over `issues` in detection order.
    pub fn from_issues(issues: &[Issue]) -> Self {
        let mut out = Breakdown::default();
        for issue in issues {
            out.by_severity.increment(issue.severity.as_str());
            out.by_type.increment(issue.kind.as_str());
        }
        out
    }

    pub fn sorted(&self) -> Breakdown {
        Breakdown {
            by_severity: self.by_severity.sorted(),
            by_type: self.by_type.sorted(),
        }
    }
}
