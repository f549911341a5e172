//! OCR Types
//!
//! The engine's output is loosely structured. `OcrResult` keeps the raw JSON
//! untouched and exposes the fields this service relies on through explicit
//! presence checks.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Raw result returned by an OCR engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OcrResult(Value);

impl OcrResult {
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    /// The untransformed engine output
    pub fn raw(&self) -> &Value {
        &self.0
    }

    pub fn into_raw(self) -> Value {
        self.0
    }

    /// Detected regions in engine order.
    ///
    /// Returns `None` when the result is not an object or has no
    /// `ocr_response` array. Entries that are not objects or lack one of the
    /// region keys are skipped.
    pub fn regions(&self) -> Option<Vec<DetectedRegion>> {
        let items = self.0.get("ocr_response")?.as_array()?;

        let regions = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                match DetectedRegion::deserialize(item) {
                    Ok(region) => Some(region),
                    Err(e) => {
                        tracing::warn!(index, error = %e, "Skipping malformed OCR region");
                        None
                    }
                }
            })
            .collect();

        Some(regions)
    }

    /// Image width reported by the engine, if numeric
    pub fn width(&self) -> Option<Number> {
        self.number_field("width")
    }

    /// Image height reported by the engine, if numeric
    pub fn height(&self) -> Option<Number> {
        self.number_field("height")
    }

    fn number_field(&self, key: &str) -> Option<Number> {
        match self.0.get(key)? {
            Value::Number(n) => Some(n.clone()),
            _ => None,
        }
    }
}

/// One text span found by the engine, pixel coordinates with origin top-left.
///
/// Every key must be present; values are mirrored as the engine sent them,
/// `null` included.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetectedRegion {
    pub text: Value,
    /// Recognition certainty, 0-1
    pub rate: Value,
    pub left: Value,
    pub top: Value,
    pub right: Value,
    pub bottom: Value,
}

/// OCR error types
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    /// Failure reported by the engine itself; the message is passed through as-is
    #[error("{0}")]
    Engine(String),

    #[error("Failed to start OCR engine: {0}")]
    Launch(String),

    #[error("OCR engine returned invalid output: {0}")]
    InvalidOutput(String),

    #[error("OCR API error: {0}")]
    Api(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_regions_in_order() {
        let result = OcrResult::new(json!({
            "ocr_response": [
                {"text": "TOTAL", "rate": 0.97, "left": 10, "top": 5, "right": 80, "bottom": 20},
                {"text": "12.50", "rate": 0.88, "left": 90, "top": 5, "right": 140, "bottom": 20}
            ],
            "width": 200,
            "height": 300
        }));

        let regions = result.regions().unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].text, "TOTAL");
        assert_eq!(regions[1].text, "12.50");
        assert_eq!(regions[0].left, json!(10));
        assert_eq!(regions[1].rate, json!(0.88));
        assert_eq!(result.width(), Some(Number::from(200)));
        assert_eq!(result.height(), Some(Number::from(300)));
    }

    #[test]
    fn test_missing_fields() {
        let result = OcrResult::new(json!({"engine": "paddle"}));
        assert!(result.regions().is_none());
        assert!(result.width().is_none());
        assert!(result.height().is_none());
    }

    #[test]
    fn test_not_an_object() {
        let result = OcrResult::new(json!(["TOTAL"]));
        assert!(result.regions().is_none());

        let result = OcrResult::new(json!({"ocr_response": "TOTAL"}));
        assert!(result.regions().is_none());
    }

    #[test]
    fn test_malformed_region_skipped() {
        let result = OcrResult::new(json!({
            "ocr_response": [
                {"text": "A", "rate": 0.5, "left": 0, "top": 0, "right": 1, "bottom": 1},
                {"text": "B", "rate": 0.5},
                {"text": "C", "rate": 0.5, "left": 2, "top": 2, "right": 3, "bottom": 3}
            ]
        }));

        let texts: Vec<_> = result.regions().unwrap().into_iter().map(|r| r.text).collect();
        assert_eq!(texts, vec!["A", "C"]);
    }

    #[test]
    fn test_null_values_kept() {
        let result = OcrResult::new(json!({
            "ocr_response": [
                {"text": "A", "rate": null, "left": 1, "top": 1, "right": 2, "bottom": 2},
                {"text": "B", "rate": 0.5, "left": 1.5, "top": 1, "right": "3", "bottom": 2}
            ]
        }));

        let regions = result.regions().unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].text, json!("A"));
        assert_eq!(regions[0].rate, Value::Null);
        assert_eq!(regions[1].left, json!(1.5));
        assert_eq!(regions[1].right, json!("3"));
    }

    #[test]
    fn test_non_object_region_skipped() {
        let result = OcrResult::new(json!({
            "ocr_response": [
                "stray",
                {"text": "A", "rate": 0.9, "left": 0, "top": 0, "right": 1, "bottom": 1}
            ]
        }));
        assert_eq!(result.regions().unwrap().len(), 1);
    }

    #[test]
    fn test_non_numeric_dimensions_ignored() {
        let result = OcrResult::new(json!({"width": "200", "height": null}));
        assert!(result.width().is_none());
        assert!(result.height().is_none());
    }

    #[test]
    fn test_engine_error_message_verbatim() {
        let err = OcrError::Engine("cannot identify image file".to_string());
        assert_eq!(err.to_string(), "cannot identify image file");
    }
}
