use crate::error::Result;
use crate::params::path_of;
use crate::transport::{HttpRequest, Transport};

use super::AenClient;

impl<T: Transport> AenClient<T> {
    pub fn to_version_by_id(&mut self, object_id: &str, version_id: &str) -> Result<()> {
        let request = HttpRequest::post(path_of(&[
            "object",
            object_id,
            "to-version-by-id",
            version_id,
        ])?);
        self.execute_unit("version.by_id", request)
    }

    /// `date_iso` is passed through as given, e.g. `2024-05-01T00:00:00Z`.
    pub fn to_version_by_date(&mut self, object_id: &str, date_iso: &str) -> Result<()> {
        let request = HttpRequest::post(path_of(&[
            "object",
            object_id,
            "to-version-by-date",
            date_iso,
        ])?);
        self.execute_unit("version.by_date", request)
    }

    /// Switches the session to draft view; returns the server's flag.
    pub fn switch_to_draft(&mut self) -> Result<bool> {
        self.execute_typed_or_default(
            "version.to_draft",
            HttpRequest::get("/session/versions/to-draft"),
        )
    }

    pub fn switch_to_release(&mut self) -> Result<bool> {
        self.execute_typed_or_default(
            "version.to_release",
            HttpRequest::get("/session/versions/to-release"),
        )
    }
}
