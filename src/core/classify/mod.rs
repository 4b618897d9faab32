//! # Classify Module
//!
//! Pure functions that look at a file name or timestamp and answer
//! "what kind of file is this" along three independent axes:
//!
//! - `category` - the folder name used when organizing by type (`IMAGES`, `PDF`, ...)
//! - `language` - language and family used by blueprint inference
//! - `date` - calendar parts and the composite strings used for renaming
//!
//! Nothing in here fails. Missing extensions and missing timestamps fall
//! into well-defined default branches.

mod category;
mod date;
mod language;

pub use category::{classify_extension, mime_for_extension, Category, OTHERS_FOLDER};
pub use date::{month_name, DateParts};
pub use language::{classify_language_and_family, Family, Language};

/// Lowercased text after the last `.`, or an empty string when the name has no dot.
pub fn extension_of(filename: &str) -> String {
    match filename.rfind('.') {
        Some(idx) => filename[idx + 1..].to_lowercase(),
        None => String::new(),
    }
}

/// Split a name at its last `.` into `(base, ".ext")`.
///
/// Without a dot the whole name is the base and the extension is empty.
pub fn split_name(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(idx) => (&filename[..idx], &filename[idx..]),
        None => (filename, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased_after_last_dot() {
        assert_eq!(extension_of("Report Final.PDF"), "pdf");
        assert_eq!(extension_of("backup.tar.GZ"), "gz");
    }

    #[test]
    fn name_without_dot_has_empty_extension() {
        assert_eq!(extension_of("Makefile"), "");
        assert_eq!(split_name("Makefile"), ("Makefile", ""));
    }

    #[test]
    fn split_keeps_inner_dots_in_base() {
        assert_eq!(split_name("my.holiday.jpg"), ("my.holiday", ".jpg"));
        assert_eq!(split_name(".env"), ("", ".env"));
    }
}
