use serde::{Deserialize, Deserializer, Serialize};

/// Capture date reported when the API omits `earth_date`.
pub const UNKNOWN_CAPTURE_DATE: &str = "unknown";

/// One rover photo as returned by the photos endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PhotoRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "img_src")]
    pub image_url: String,
    #[serde(rename = "earth_date", default = "unknown_capture_date")]
    pub capture_date: String,
    #[serde(default)]
    pub camera: CameraRecord,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CameraRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl PhotoRecord {
    pub fn new(
        id: impl Into<String>,
        image_url: impl Into<String>,
        capture_date: impl Into<String>,
        camera: CameraRecord,
    ) -> Self {
        Self {
            id: id.into(),
            image_url: image_url.into(),
            capture_date: capture_date.into(),
            camera,
        }
    }
}

impl CameraRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

fn unknown_capture_date() -> String {
    UNKNOWN_CAPTURE_DATE.to_string()
}

/// The public rover API emits numeric ids while the mirror server uses
/// strings; both are stored as strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Str(String),
        Int(i64),
        Uint(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Str(s) => s,
        Id::Int(n) => n.to_string(),
        Id::Uint(n) => n.to_string(),
    })
}
