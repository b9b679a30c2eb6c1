use std::path::Path;

pub const DEFAULT_MIME: &str = "application/octet-stream";

pub fn guess_mime(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return DEFAULT_MIME;
    };
    match ext.to_ascii_lowercase().as_str() {
        "md" | "markdown" => "text/markdown",
        "txt" | "log" => "text/plain",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "xml" => "application/xml",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "bpmn" => "application/xml",
        _ => DEFAULT_MIME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_mime_is_case_insensitive() {
        assert_eq!(guess_mime(Path::new("a/Report.PDF")), "application/pdf");
        assert_eq!(guess_mime(Path::new("notes.md")), "text/markdown");
    }

    #[test]
    fn unknown_or_missing_extension_is_octet_stream() {
        assert_eq!(guess_mime(Path::new("blob.xyz")), DEFAULT_MIME);
        assert_eq!(guess_mime(Path::new("Makefile")), DEFAULT_MIME);
    }
}
