use std::path::Path;

use serde_json::Value;

use crate::classify::classify;
use crate::error::{AenError, ErrorKind, Result};
use crate::mime::guess_mime;
use crate::models::{AenFile, FileTarget};
use crate::params::{QueryParams, path_of};
use crate::transport::{HttpRequest, Transport};

use super::AenClient;

const FILE_FIELD: &str = "file";

fn slot_params(target: &FileTarget) -> QueryParams {
    QueryParams::new()
        .push_opt("attribute_name", target.attribute_name.as_deref())
        .push_opt("position", target.position)
}

fn upload_file_name(file_path: &Path, target: &FileTarget) -> Result<String> {
    match &target.filename {
        Some(name) => Ok(name.clone()),
        None => local_file_name(file_path),
    }
}

pub(super) fn local_file_name(file_path: &Path) -> Result<String> {
    file_path
        .file_name()
        .and_then(|name| name.to_str())
        .map(ToString::to_string)
        .ok_or_else(|| {
            AenError::domain(
                ErrorKind::Validation,
                format!("cannot derive a file name from '{}'", file_path.display()),
            )
        })
}

impl<T: Transport> AenClient<T> {
    /// Objects that do not support files answer 405; that is an empty list.
    pub fn list_files(&mut self, object_id: &str) -> Result<Vec<AenFile>> {
        let path = format!("{}/", path_of(&["object", object_id, "file"])?);
        let response = self.execute_with("file.list", HttpRequest::get(path), |response| {
            if response.status == 405 {
                None
            } else {
                classify(response.status, &response.body)
            }
        })?;
        if response.status == 405 {
            return Ok(Vec::new());
        }
        match response.json_or_null()? {
            Value::Null => Ok(Vec::new()),
            value => Ok(serde_json::from_value(value)?),
        }
    }

    pub fn get_file(
        &mut self,
        object_id: &str,
        filename: &str,
        target: &FileTarget,
    ) -> Result<AenFile> {
        let request = HttpRequest::get(path_of(&["object", object_id, "file", filename])?)
            .query(slot_params(target));
        self.execute_typed_or_default("file.get", request)
    }

    pub fn download_file_content(
        &mut self,
        object_id: &str,
        filename: &str,
        target: &FileTarget,
    ) -> Result<Vec<u8>> {
        let request =
            HttpRequest::get(path_of(&["object", object_id, "file", filename, "content"])?)
                .query(slot_params(target));
        Ok(self.execute("file.download", request)?.body)
    }

    /// `POST /object/{id}/file` as multipart. The upload name defaults to the
    /// file name of `file_path`.
    pub fn upload_file(
        &mut self,
        object_id: &str,
        file_path: &Path,
        target: &FileTarget,
    ) -> Result<()> {
        self.require_session()?;
        let file_name = upload_file_name(file_path, target)?;
        let data = std::fs::read(file_path)?;
        let request = HttpRequest::post(path_of(&["object", object_id, "file"])?)
            .query(
                QueryParams::new()
                    .push_opt("attribute_name", target.attribute_name.as_deref())
                    .push_opt("filename", target.filename.as_deref()),
            )
            .multipart(FILE_FIELD, file_name, guess_mime(file_path), data);
        self.execute_unit("file.upload", request)
    }

    /// Like [`Self::upload_file`] for content already in memory.
    pub fn upload_file_bytes(
        &mut self,
        object_id: &str,
        file_name: &str,
        data: Vec<u8>,
        target: &FileTarget,
    ) -> Result<()> {
        let request = HttpRequest::post(path_of(&["object", object_id, "file"])?)
            .query(
                QueryParams::new()
                    .push_opt("attribute_name", target.attribute_name.as_deref())
                    .push_opt("filename", target.filename.as_deref()),
            )
            .multipart(FILE_FIELD, file_name, guess_mime(Path::new(file_name)), data);
        self.execute_unit("file.upload", request)
    }

    pub fn update_file(
        &mut self,
        object_id: &str,
        file_path: &Path,
        target: &FileTarget,
    ) -> Result<()> {
        self.require_session()?;
        let file_name = upload_file_name(file_path, target)?;
        let data = std::fs::read(file_path)?;
        let request = HttpRequest::put(path_of(&["object", object_id, "file"])?)
            .query(
                QueryParams::new()
                    .push_opt("attribute_name", target.attribute_name.as_deref())
                    .push_opt("filename", target.filename.as_deref())
                    .push_opt("position", target.position),
            )
            .multipart(FILE_FIELD, file_name, guess_mime(file_path), data);
        self.execute_unit("file.update", request)
    }

    pub fn delete_file(&mut self, object_id: &str, target: &FileTarget) -> Result<()> {
        let request = HttpRequest::delete(path_of(&["object", object_id, "file"])?).query(
            QueryParams::new()
                .push_opt("filename", target.filename.as_deref())
                .push_opt("attribute_name", target.attribute_name.as_deref())
                .push_opt("position", target.position),
        );
        self.execute_unit("file.delete", request)
    }
}
