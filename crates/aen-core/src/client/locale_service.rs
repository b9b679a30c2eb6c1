use crate::error::Result;
use crate::params::path_of;
use crate::transport::{HttpRequest, Transport};

use super::AenClient;

impl<T: Transport> AenClient<T> {
    /// Current session locale; the endpoint answers plain text.
    pub fn get_locale(&mut self) -> Result<String> {
        let response = self.execute("locale.get", HttpRequest::get("/session/locale"))?;
        Ok(response.text())
    }

    pub fn get_locales(&mut self) -> Result<Vec<String>> {
        self.execute_typed_or_default("locale.list", HttpRequest::get("/session/locales"))
    }

    pub fn set_locale(&mut self, language_tag: &str) -> Result<()> {
        self.execute_unit(
            "locale.set",
            HttpRequest::put(path_of(&["session", "locale", language_tag])?),
        )
    }
}
