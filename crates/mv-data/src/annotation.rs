//! Annotation documents: named scalar series indexed by frame

use std::path::Path;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{info, warn};

use crate::DataError;

/// Metadata key holding the first annotated frame
pub const START_FRAME_KEY: &str = "START_FRAME";
/// Metadata key holding the last annotated frame
pub const END_FRAME_KEY: &str = "END_FRAME";

/// Feature name -> per-frame values, in document order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationData {
    name: String,
    features: IndexMap<String, Vec<f64>>,
    start_frame: Option<i64>,
    end_frame: Option<i64>,
}

impl AnnotationData {
    /// Create an empty annotation set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add or replace a feature
    pub fn with_feature(mut self, key: impl Into<String>, values: Vec<f64>) -> Self {
        self.features.insert(key.into(), values);
        self
    }

    /// Parse a JSON object whose keys are feature names mapped to numeric
    /// arrays. Reserved metadata keys are kept out of the feature list and
    /// entries that are not numeric arrays are skipped.
    pub fn from_json_str(name: impl Into<String>, json: &str) -> Result<Self, DataError> {
        let name = name.into();
        let document: IndexMap<String, Value> = match serde_json::from_str(json) {
            Ok(document) => document,
            Err(error) => {
                return Err(match serde_json::from_str::<Value>(json) {
                    Ok(other) => DataError::NotAnObject(json_kind(&other)),
                    Err(_) => DataError::Json(error),
                });
            }
        };

        let mut data = Self::new(name);
        for (key, value) in document {
            match key.as_str() {
                START_FRAME_KEY => data.start_frame = metadata_frame(&key, &value),
                END_FRAME_KEY => data.end_frame = metadata_frame(&key, &value),
                _ => match numeric_array(&value) {
                    Some(values) => {
                        data.features.insert(key, values);
                    }
                    None => warn!(feature = %key, "Skipping annotation entry that is not a numeric array"),
                },
            }
        }

        if data.features.is_empty() {
            return Err(DataError::NoFeatures(data.name));
        }
        Ok(data)
    }

    /// Read and parse an annotation file. The file stem becomes the name.
    pub async fn load(path: &Path) -> Result<Self, DataError> {
        let text = tokio::fs::read_to_string(path).await?;
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("annotation");
        let data = Self::from_json_str(name, &text)?;
        info!(
            path = %path.display(),
            features = data.feature_count(),
            frames = data.max_len(),
            "Loaded annotation file"
        );
        Ok(data)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Values of one feature
    pub fn feature(&self, key: &str) -> Option<&[f64]> {
        self.features.get(key).map(Vec::as_slice)
    }

    /// Selectable feature names in document order
    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.features.keys().map(String::as_str)
    }

    pub fn first_feature(&self) -> Option<&str> {
        self.feature_names().next()
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Length of the longest feature
    pub fn max_len(&self) -> usize {
        self.features.values().map(Vec::len).max().unwrap_or(0)
    }

    pub fn start_frame(&self) -> Option<i64> {
        self.start_frame
    }

    pub fn end_frame(&self) -> Option<i64> {
        self.end_frame
    }
}

fn numeric_array(value: &Value) -> Option<Vec<f64>> {
    value.as_array()?.iter().map(Value::as_f64).collect()
}

fn metadata_frame(key: &str, value: &Value) -> Option<i64> {
    let frame = value.as_i64();
    if frame.is_none() {
        warn!(key, "Ignoring non-integer annotation metadata");
    }
    frame
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "START_FRAME": 12,
        "BODY": [0.1, 0.5, 0.9],
        "LEFT_ARM": [0.0, 1.0],
        "END_FRAME": 14,
        "RIGHT_ARM": [0.3, 0.3, 0.3, 0.4]
    }"#;

    #[test]
    fn test_reserved_keys_become_metadata() {
        let data = AnnotationData::from_json_str("take1", DOCUMENT).unwrap();

        let names: Vec<_> = data.feature_names().collect();
        assert_eq!(names, vec!["BODY", "LEFT_ARM", "RIGHT_ARM"]);
        assert_eq!(data.start_frame(), Some(12));
        assert_eq!(data.end_frame(), Some(14));
        assert_eq!(data.feature("BODY"), Some(&[0.1, 0.5, 0.9][..]));
        assert_eq!(data.max_len(), 4);
        assert_eq!(data.first_feature(), Some("BODY"));
    }

    #[test]
    fn test_non_numeric_entries_are_skipped() {
        let json = r#"{ "label": "walk", "MIXED": [1, "x"], "OK": [1, 2] }"#;
        let data = AnnotationData::from_json_str("take", json).unwrap();
        assert_eq!(data.feature_names().collect::<Vec<_>>(), vec!["OK"]);
    }

    #[test]
    fn test_malformed_documents_are_errors() {
        let err = AnnotationData::from_json_str("bad", "{ \"BODY\": [0.1, ").unwrap_err();
        assert!(matches!(err, DataError::Json(_)));

        let err = AnnotationData::from_json_str("list", "[0.1, 0.2]").unwrap_err();
        assert!(matches!(err, DataError::NotAnObject("an array")));

        let err = AnnotationData::from_json_str("meta", r#"{ "START_FRAME": 1 }"#).unwrap_err();
        assert!(matches!(err, DataError::NoFeatures(name) if name == "meta"));
    }

    #[tokio::test]
    async fn test_load_uses_file_stem_as_name() {
        let path = std::env::temp_dir().join(format!("mv-data-annotation-{}.json", std::process::id()));
        std::fs::write(&path, DOCUMENT).unwrap();

        let data = AnnotationData::load(&path).await.unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(data.name().starts_with("mv-data-annotation-"));
        assert_eq!(data.feature_count(), 3);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("mv-data-does-not-exist.json");
        let err = AnnotationData::load(&path).await.unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }
}
