use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Detail level most read endpoints accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Simple,
    #[default]
    Detailed,
    All,
}

impl View {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Detailed => "detailed",
            Self::All => "all",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for View {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "detailed" => Ok(Self::Detailed),
            "all" => Ok(Self::All),
            other => Err(format!("unknown view '{other}' (expected simple|detailed|all)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AenLocalizedValue {
    pub locale: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AenCategory {
    pub id: Option<String>,
    pub guid: Option<String>,
    pub name: Option<String>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AenProperty {
    pub id: Option<String>,
    pub guid: Option<String>,
    pub name: Option<String>,
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub value: Option<Value>,
}

/// Object as returned by `GET /object/{id}`. Fields the server adds beyond
/// the common ones are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AenObject {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub labels: Option<Vec<AenLocalizedValue>>,
    #[serde(default)]
    pub category: Option<AenCategory>,
    #[serde(default)]
    pub properties: Option<Vec<AenProperty>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewObject {
    pub category_id: String,
    pub parent_id: String,
    pub attribute_name: String,
    pub properties: Vec<Value>,
}

impl NewObject {
    pub fn new(
        category_id: impl Into<String>,
        parent_id: impl Into<String>,
        attribute_name: impl Into<String>,
    ) -> Self {
        Self {
            category_id: category_id.into(),
            parent_id: parent_id.into(),
            attribute_name: attribute_name.into(),
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_properties(mut self, properties: Vec<Value>) -> Self {
        self.properties = properties;
        self
    }
}
