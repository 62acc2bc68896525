//! Candidate Types

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One candidate profile: field name -> value (or absent)
///
/// Fields keep the order and spelling of the source columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateRecord {
    fields: Vec<(String, Option<String>)>,
}

impl CandidateRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record where every field carries a value
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (name, value) in pairs {
            record.insert(name, Some(value.into()));
        }
        record
    }

    /// Set a field; an existing field with the same name is overwritten in place
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// True when the column exists, even if its value is absent or empty
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    /// Value of a field, `None` when the column is missing or absent
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Value of a field that carries non-blank text
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.trim().is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Best-effort display label for logs
    pub fn label(&self) -> &str {
        self.non_empty("name")
            .or_else(|| self.non_empty("id"))
            .unwrap_or("<unnamed>")
    }
}

impl Serialize for CandidateRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order_and_overwrites() {
        let mut record = CandidateRecord::new();
        record.insert("name", Some("Ada".to_string()));
        record.insert("skills", Some("Rust".to_string()));
        record.insert("name", Some("Grace".to_string()));

        let names: Vec<_> = record.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["name", "skills"]);
        assert_eq!(record.get("name"), Some("Grace"));
    }

    #[test]
    fn test_absent_and_empty_values() {
        let mut record = CandidateRecord::new();
        record.insert("education", None);
        record.insert("tools", Some("  ".to_string()));

        assert!(record.contains("education"));
        assert_eq!(record.get("education"), None);
        assert_eq!(record.get("tools"), Some("  "));
        assert_eq!(record.non_empty("tools"), None);
        assert!(!record.contains("skills"));
    }

    #[test]
    fn test_serializes_in_source_order() {
        let mut record = CandidateRecord::from_pairs([("skills", "Python"), ("name", "Ada")]);
        record.insert("location", None);

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"skills":"Python","name":"Ada","location":null}"#);
    }

    #[test]
    fn test_label_fallback() {
        assert_eq!(CandidateRecord::from_pairs([("name", "Ada")]).label(), "Ada");
        assert_eq!(CandidateRecord::from_pairs([("id", "42")]).label(), "42");
        assert_eq!(CandidateRecord::new().label(), "<unnamed>");
    }
}
