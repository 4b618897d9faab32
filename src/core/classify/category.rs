//! Extension → category folder table used by the `by-type` organize mode.

use super::extension_of;
use crate::core::rules::CustomRules;
use serde::{Deserialize, Serialize};

/// Folder used when neither a custom rule nor the built-in table matches
pub const OTHERS_FOLDER: &str = "OTHERS";

/// Built-in file categories, in lookup order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Images,
    Pdf,
    Docs,
    Audio,
    Video,
    Archives,
    Code,
}

impl Category {
    /// Every category in the order the table is searched
    pub const ALL: [Category; 7] = [
        Category::Images,
        Category::Pdf,
        Category::Docs,
        Category::Audio,
        Category::Video,
        Category::Archives,
        Category::Code,
    ];

    /// Folder name written into archive paths
    pub fn folder(&self) -> &'static str {
        match self {
            Category::Images => "IMAGES",
            Category::Pdf => "PDF",
            Category::Docs => "DOCS",
            Category::Audio => "AUDIO",
            Category::Video => "VIDEO",
            Category::Archives => "ARCHIVES",
            Category::Code => "CODE",
        }
    }

    /// Extensions claimed by this category. No extension appears under two categories.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Category::Images => &["jpg", "jpeg", "png", "gif", "webp", "bmp", "svg"],
            Category::Pdf => &["pdf"],
            Category::Docs => &["doc", "docx", "txt", "rtf", "odt", "csv", "xlsx"],
            Category::Audio => &["mp3", "wav", "aac", "ogg", "flac", "m4a"],
            Category::Video => &["mp4", "mov", "avi", "mkv", "webm"],
            Category::Archives => &["zip", "rar", "7z", "gz", "tar"],
            Category::Code => &["js", "ts", "py", "java", "c", "cpp", "html", "css", "json"],
        }
    }

    /// First category whose table contains `extension`
    pub fn from_extension(extension: &str) -> Option<Category> {
        if extension.is_empty() {
            return None;
        }
        Category::ALL
            .into_iter()
            .find(|category| category.extensions().contains(&extension))
    }
}

/// Folder for `filename` in `by-type` mode.
///
/// Custom rules win over the built-in table; anything unmatched lands in `OTHERS`.
pub fn classify_extension(filename: &str, rules: &CustomRules) -> String {
    let extension = extension_of(filename);

    if let Some(folder) = rules.folder_for(&extension) {
        return folder.to_string();
    }

    Category::from_extension(&extension)
        .map(|category| category.folder().to_string())
        .unwrap_or_else(|| OTHERS_FOLDER.to_string())
}

/// Best-effort MIME type for a lowercased extension, empty when unknown.
pub fn mime_for_extension(extension: &str) -> &'static str {
    match extension {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "odt" => "application/vnd.oasis.opendocument.text",
        "rtf" => "application/rtf",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "md" | "markdown" => "text/markdown",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" | "mjs" | "cjs" => "text/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "aac" => "audio/aac",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        "m4a" => "audio/mp4",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "mkv" => "video/x-matroska",
        "webm" => "video/webm",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",
        "7z" => "application/x-7z-compressed",
        "rar" => "application/vnd.rar",
        _ => "",
    }
}
