use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AenFile {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default, alias = "attributeName")]
    pub attribute_name: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default, alias = "mimeType")]
    pub mime_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Which file slot of an object an operation addresses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileTarget {
    pub attribute_name: Option<String>,
    pub filename: Option<String>,
    pub position: Option<u32>,
}

impl FileTarget {
    pub fn attribute(name: impl Into<String>) -> Self {
        Self {
            attribute_name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    #[must_use]
    pub const fn position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }
}
