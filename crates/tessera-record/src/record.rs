//! The ordered label-to-series map and its JSON persistence.

use crate::error::RecordError;
use crate::series::Series;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Labelled series produced by one scan, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultRecord {
    entries: IndexMap<String, Series>,
}

impl ResultRecord {
    /// An empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the series under `key`, returning any previous
    /// series. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, series: impl Into<Series>) -> Option<Series> {
        self.entries.insert(key.into(), series.into())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, series: impl Into<Series>) -> Self {
        self.insert(key, series);
        self
    }

    /// The series under `key`.
    pub fn get(&self, key: &str) -> Option<&Series> {
        self.entries.get(key)
    }

    /// `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Labels in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(label, series)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Series)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if the record has no labels.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append every entry of `other`, replacing clashing labels.
    pub fn extend(&mut self, other: ResultRecord) {
        self.entries.extend(other.entries);
    }

    /// Same labels in the same order, floats compared to within
    /// `tolerance`.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((ka, a), (kb, b))| ka == kb && a.approx_eq(b, tolerance))
    }

    /// Serialize as JSON to any writer.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), RecordError> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    /// Deserialize from JSON read from any reader.
    pub fn read_from<R: Read>(reader: R) -> Result<Self, RecordError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Write to `path`, creating or truncating the file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RecordError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Read from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RecordError> {
        Self::read_from(BufReader::new(File::open(path)?))
    }
}

impl<K: Into<String>, S: Into<Series>> FromIterator<(K, S)> for ResultRecord {
    fn from_iter<I: IntoIterator<Item = (K, S)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, s)| (k.into(), s.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys;

    #[test]
    fn insertion_order_is_preserved() {
        let record = ResultRecord::new()
            .with(keys::TEMPERATURE, vec![1.0, 2.0])
            .with(keys::ENERGY, vec![-2.0, -1.5])
            .with(keys::MAGNETISATION, vec![0.9, 0.1]);
        let labels: Vec<&str> = record.keys().collect();
        assert_eq!(labels, ["Temperature", "Energy", "Magnetisation"]);

        let mut json = Vec::new();
        record.write_to(&mut json).unwrap();
        let text = String::from_utf8(json).unwrap();
        let t = text.find("Temperature").unwrap();
        let e = text.find("Energy").unwrap();
        assert!(t < e);
    }

    #[test]
    fn replacing_keeps_position() {
        let mut record = ResultRecord::new()
            .with("a", vec![1u64])
            .with("b", vec![2u64]);
        let old = record.insert("a", vec![9u64]);
        assert_eq!(old, Some(Series::Integers(vec![1])));
        assert_eq!(record.keys().next(), Some("a"));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn reads_a_hand_written_record() {
        let json = r#"{"Histogram Data": [12, 40], "Glider Data": [[0.5, 1.5], [2.0, 3.0]]}"#;
        let record = ResultRecord::read_from(json.as_bytes()).unwrap();
        assert_eq!(
            record.get(keys::HISTOGRAM_DATA).and_then(Series::as_integers),
            Some(&[12u64, 40][..])
        );
        let glider = record.get(keys::GLIDER_DATA).and_then(Series::as_matrix).unwrap();
        assert_eq!(glider[1], vec![Some(2.0), Some(3.0)]);
    }

    #[test]
    fn malformed_input_is_a_json_error() {
        let err = ResultRecord::read_from(&b"{\"Energy\": [1, \"x\"]}"[..]).unwrap_err();
        assert!(matches!(err, RecordError::Json(_)));
        let err = ResultRecord::read_from(&b"[1, 2]"[..]).unwrap_err();
        assert!(matches!(err, RecordError::Json(_)));
    }

    #[test]
    fn collects_from_pairs() {
        let record: ResultRecord = [("x", vec![1u64]), ("y", vec![2u64])].into_iter().collect();
        assert_eq!(record.len(), 2);
        assert!(record.contains_key("y"));
    }

    #[test]
    fn extend_appends_and_replaces() {
        let mut a = ResultRecord::new().with("x", vec![1u64]).with("y", vec![2u64]);
        let b = ResultRecord::new().with("y", vec![3u64]).with("z", vec![4u64]);
        a.extend(b);
        let labels: Vec<&str> = a.keys().collect();
        assert_eq!(labels, ["x", "y", "z"]);
        assert_eq!(a.get("y"), Some(&Series::Integers(vec![3])));
    }
}
