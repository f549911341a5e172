//! Response shaping
//!
//! Turns an engine result plus the stored image into the JSON body returned
//! by `POST /recognize`.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::Serialize;
use serde_json::{Number, Value};

use crate::ocr::{DetectedRegion, OcrResult};

/// Successful recognition response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionResponse {
    pub success: bool,
    /// Full engine output, untransformed
    pub text: Value,
    pub text_results: Vec<TextResult>,
    /// Original image, base64 encoded
    pub image: String,
    pub image_width: Number,
    pub image_height: Number,
}

/// One normalized detection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextResult {
    pub text: Value,
    pub confidence: Value,
    #[serde(rename = "box")]
    pub bounds: BoundingBox,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundingBox {
    pub left: Value,
    pub top: Value,
    pub right: Value,
    pub bottom: Value,
}

impl From<DetectedRegion> for TextResult {
    fn from(region: DetectedRegion) -> Self {
        TextResult {
            text: region.text,
            confidence: region.rate,
            bounds: BoundingBox {
                left: region.left,
                top: region.top,
                right: region.right,
                bottom: region.bottom,
            },
        }
    }
}

/// Build the response for `result` and the image bytes read back from disk
pub fn shape_response(result: OcrResult, image: &[u8]) -> RecognitionResponse {
    let text_results: Vec<TextResult> = result
        .regions()
        .unwrap_or_default()
        .into_iter()
        .map(TextResult::from)
        .collect();

    let image_width = result.width().unwrap_or_else(|| Number::from(0));
    let image_height = result.height().unwrap_or_else(|| Number::from(0));

    RecognitionResponse {
        success: true,
        text_results,
        image: BASE64.encode(image),
        image_width,
        image_height,
        text: result.into_raw(),
    }
}
