use std::collections::BTreeMap;

/// A form submission: field name to value
///
/// Values are trimmed on insert and blank values are dropped, so a field is
/// either present with content or absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Submission {
    fields: BTreeMap<String, String>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut submission = Self::new();
        for (key, value) in pairs {
            submission.insert(key, value);
        }
        submission
    }

    /// Insert a field, trimming the value. Blank values remove the field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl AsRef<str>) {
        let key = key.into();
        let value = value.as_ref().trim();
        if value.is_empty() {
            self.fields.remove(&key);
        } else {
            self.fields.insert(key, value.to_string());
        }
    }

    /// Re-apply trimming to every field (used after deserializing raw input)
    pub fn sanitized(self) -> Self {
        Self::from_pairs(self.fields)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Required fields that are absent from this submission
    pub fn missing<'a>(&self, required: &'a [String]) -> Vec<&'a str> {
        required
            .iter()
            .filter(|name| !self.contains(name))
            .map(String::as_str)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A shareholder or partner listed in meeting minutes
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Party {
    pub name: String,
    pub shares: u64,
}

impl Party {
    pub fn new(name: impl Into<String>, shares: u64) -> Self {
        Self {
            name: name.into(),
            shares,
        }
    }

    /// One vote per share
    pub fn votes(&self) -> u64 {
        self.shares
    }
}

/// Summary of generated minutes, as recorded after generation
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ActaSummary {
    pub makedate: String,
    pub cianame: String,
    pub ciatype: String,
    pub celebdate: String,
    pub accnumber: i64,
    pub accdata: String,
}

/// A property unit offered in a sale agreement
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Alicuota {
    pub id: i64,
    pub alicuota: String,
    pub info1: String,
    pub info2: String,
    pub info3: String,
    pub info4: String,
    pub info5: String,
}
