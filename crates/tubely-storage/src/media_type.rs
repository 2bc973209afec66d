//! Media type normalization and media-type-to-extension mapping.
//!
//! Extension lookup consults [`PREFERRED_EXTENSIONS`] first, then the
//! `mime_guess` table. When `mime_guess` lists several extensions for a
//! type, the first entry it returns is used.

/// Canonical extensions for the image types thumbnails normally use.
pub const PREFERRED_EXTENSIONS: &[(&str, &str)] = &[
    ("image/jpeg", ".jpg"),
    ("image/png", ".png"),
    ("image/gif", ".gif"),
    ("image/webp", ".webp"),
    ("image/bmp", ".bmp"),
    ("image/svg+xml", ".svg"),
    ("image/avif", ".avif"),
    ("image/tiff", ".tiff"),
];

/// Returns the lowercased `type/subtype` of a content type with any
/// parameters removed, or `None` if it is not syntactically valid.
pub fn essence(content_type: &str) -> Option<String> {
    let essence = content_type.split(';').next()?.trim().to_ascii_lowercase();
    let (ty, subtype) = essence.split_once('/')?;
    if is_token(ty) && is_token(subtype) {
        Some(essence)
    } else {
        None
    }
}

/// Resolves the file extension (with leading dot) for a content type.
pub fn extension_for(content_type: &str) -> Option<String> {
    let essence = essence(content_type)?;

    if let Some((_, ext)) = PREFERRED_EXTENSIONS
        .iter()
        .find(|(mime, _)| *mime == essence)
    {
        return Some((*ext).to_string());
    }

    mime_guess::get_mime_extensions_str(&essence)
        .and_then(|exts| exts.first())
        .map(|ext| format!(".{ext}"))
}

fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || "!#$&-^_.+".contains(c))
}
