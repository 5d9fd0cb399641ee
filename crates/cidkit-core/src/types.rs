//! Shared lookup tables

/// MIME type hinted by a CID extension suffix (`.txt`, `.json`, ...).
///
/// The extension is matched case-insensitively, with or without a leading
/// dot. Unknown extensions return `None`; callers fall back to
/// `application/octet-stream` or sniff the content themselves.
pub fn mime_type_for_extension(extension: &str) -> Option<&'static str> {
    let ext = extension.trim_start_matches('.').to_ascii_lowercase();
    let mime = match ext.as_str() {
        "txt" | "text" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "js" | "mjs" => "text/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "yaml" | "yml" => "application/yaml",
        "toml" => "application/toml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",
        "wasm" => "application/wasm",
        "bin" => "application/octet-stream",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "py" => "text/x-python",
        "rs" => "text/x-rust",
        "sh" => "application/x-sh",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions() {
        assert_eq!(mime_type_for_extension("txt"), Some("text/plain"));
        assert_eq!(mime_type_for_extension("json"), Some("application/json"));
        assert_eq!(mime_type_for_extension("svg"), Some("image/svg+xml"));
    }

    #[test]
    fn case_and_dot_insensitive() {
        assert_eq!(mime_type_for_extension(".HTML"), Some("text/html"));
        assert_eq!(mime_type_for_extension("Md"), Some("text/markdown"));
    }

    #[test]
    fn unknown_extension() {
        assert_eq!(mime_type_for_extension("nope"), None);
        assert_eq!(mime_type_for_extension(""), None);
    }
}
