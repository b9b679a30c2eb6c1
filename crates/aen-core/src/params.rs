use std::fmt::Display;

use reqwest::Url;

use crate::error::{AenError, ErrorKind, Result};

/// Ordered query parameters. Repeated keys are kept as separate pairs so
/// bulk endpoints receive `object_id=a&object_id=b`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn push(mut self, key: &str, value: impl Display) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// `None` values are skipped.
    #[must_use]
    pub fn push_opt<V: Display>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    #[must_use]
    pub fn push_all<I>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        for value in values {
            self.pairs.push((key.to_string(), value.to_string()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}

// Only used to borrow `Url`'s path-segment encoding.
const PATH_ROOT: &str = "http://path.invalid/";

/// Builds a path from raw segments. Each segment is percent-encoded by
/// `Url::path_segments_mut`, so `/`, `?` and spaces stay inside their segment.
pub fn path_of(segments: &[&str]) -> Result<String> {
    let mut url = Url::parse(PATH_ROOT)
        .map_err(|e| AenError::Config(format!("cannot build request path: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| AenError::Config("cannot build request path".to_string()))?
        .clear()
        .extend(segments);
    Ok(url.path().to_string())
}

/// Strips a leading run of `A` characters some deployments prefix to OIDs.
pub fn normalize_oid(value: &str) -> &str {
    value.trim_start_matches('A')
}

pub fn chunked<T: Clone>(items: &[T], size: usize) -> Result<Vec<Vec<T>>> {
    if size == 0 {
        return Err(AenError::domain(
            ErrorKind::Validation,
            "chunk size must be > 0",
        ));
    }
    Ok(items.chunks(size).map(<[T]>::to_vec).collect())
}
