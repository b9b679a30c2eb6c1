use std::path::Path;

use crate::classify::classify;
use crate::error::{DomainError, ErrorKind, Result};
use crate::mime::guess_mime;
use crate::params::QueryParams;
use crate::transport::{HttpRequest, Transport};

use super::AenClient;
use super::file_service::local_file_name;

const APPDIR_PATH: &str = "/upload/file";

impl<T: Transport> AenClient<T> {
    /// Uploads a local file into the server's application directory.
    pub fn upload_to_appdir(
        &mut self,
        file_path: &Path,
        folder: Option<&str>,
        overwrite: Option<bool>,
    ) -> Result<()> {
        self.require_session()?;
        let file_name = local_file_name(file_path)?;
        let data = std::fs::read(file_path)?;
        let request = HttpRequest::post(APPDIR_PATH)
            .query(
                QueryParams::new()
                    .push_opt("folder", folder)
                    .push_opt("overwrite", overwrite),
            )
            .multipart("file", file_name, guess_mime(file_path), data);
        self.execute_unit("appdir.upload", request)
    }

    pub fn download_from_appdir(&mut self, name: &str, folder: Option<&str>) -> Result<Vec<u8>> {
        let request = HttpRequest::get(APPDIR_PATH).query(
            QueryParams::new()
                .push("name", name)
                .push_opt("folder", folder),
        );
        let response = self.execute_with("appdir.download", request, |response| {
            if response.status == 404 {
                return Some(DomainError::from_status(
                    ErrorKind::NotFound,
                    404,
                    Some(format!("file '{name}' not found in appdir")),
                ));
            }
            classify(response.status, &response.body)
        })?;
        Ok(response.body)
    }
}
