use std::path::Path;

/// MIME type used when the extension is unknown
const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Guess an image MIME type from the file extension
pub fn mime_type_for(path: &Path) -> &'static str {
    let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
        return FALLBACK_MIME_TYPE;
    };

    match extension.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "avif" => "image/avif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        _ => FALLBACK_MIME_TYPE,
    }
}
