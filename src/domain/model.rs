use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One sheet row as ordered `column -> cell` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object of string cells")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
        let mut fields = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, String>()? {
            fields.push((key, value));
        }
        Ok(Record { fields })
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}

/// Records sharing one column schema, in sheet row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecordSet {
    #[serde(skip)]
    columns: Vec<String>,
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        debug_assert!(records
            .iter()
            .all(|r| r.keys().eq(columns.iter().map(String::as_str))));
        Self { columns, records }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Same schema, subset of rows.
    pub fn filtered<F>(&self, mut keep: F) -> RecordSet
    where
        F: FnMut(&Record) -> bool,
    {
        RecordSet {
            columns: self.columns.clone(),
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// A shop that receives its own slice of the store list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub name: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default, deserialize_with = "deserialize_countries")]
    pub countries: Vec<String>,
    pub currency: String,
    pub language: String,
    /// Overrides `<prefix>-<name>.json`; the `.min.json` and `.csv` names derive from it.
    #[serde(default)]
    pub output_file: Option<String>,
}

impl Destination {
    pub fn new<I, S>(name: &str, countries: I, currency: &str, language: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.to_string(),
            domain: None,
            countries: countries
                .into_iter()
                .map(|c| normalize_country(c.as_ref()))
                .collect(),
            currency: currency.to_string(),
            language: language.to_string(),
            output_file: None,
        }
    }

    pub fn serves_all_countries(&self) -> bool {
        self.countries.is_empty()
    }
}

fn normalize_country(code: &str) -> String {
    code.trim().to_uppercase()
}

fn deserialize_countries<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw.iter().map(|c| normalize_country(c)).collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    PrettyJson,
    CompactJson,
    Csv,
}

impl ArtifactFormat {
    pub const ALL: [ArtifactFormat; 3] = [
        ArtifactFormat::PrettyJson,
        ArtifactFormat::CompactJson,
        ArtifactFormat::Csv,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactFormat::PrettyJson => "json",
            ArtifactFormat::CompactJson => "min.json",
            ArtifactFormat::Csv => "csv",
        }
    }
}

/// Serialized output waiting to be written by a [`crate::domain::ports::Sink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub format: ArtifactFormat,
    pub record_count: usize,
    pub content: String,
}
