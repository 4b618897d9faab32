//! File name transforms: date stamps first, then character rewrites.

use super::{RenameCharMode, RenameDateMode};
use crate::core::classify::{split_name, DateParts};
use crate::core::ingest::SourceFile;
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));
static WHITESPACE_OR_HYPHEN_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s-]+").expect("valid whitespace/hyphen pattern"));
static NOT_WORD_SPACE_HYPHEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("valid normalize pattern"));
static PLUS_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\++").expect("valid plus pattern"));

/// New name for `file` under the two rename modes.
///
/// The date stamp is applied first; the result is split at its last dot
/// again and the character transform only touches the part before it.
/// With both modes `none` the name is returned unchanged.
pub fn resolve_renamed_name(
    file: &SourceFile,
    date_mode: RenameDateMode,
    char_mode: RenameCharMode,
) -> String {
    if date_mode == RenameDateMode::None && char_mode == RenameCharMode::None {
        return file.name.clone();
    }

    let (base, extension) = split_name(&file.name);
    if date_mode == RenameDateMode::None {
        return apply_char_mode(base, extension, char_mode);
    }

    let parts = DateParts::from_modified(file.modified);
    let dated = apply_date_mode(base, extension, date_mode, &parts);
    let (base, extension) = split_name(&dated);
    apply_char_mode(base, extension, char_mode)
}

/// `base + extension` with the date stamp for `mode`
pub fn apply_date_mode(base: &str, extension: &str, mode: RenameDateMode, parts: &DateParts) -> String {
    let stamped = match mode {
        RenameDateMode::None => base.to_string(),
        RenameDateMode::PrefixIsoUnderscore => format!("{}_{}", parts.iso_date, base),
        RenameDateMode::PrefixIsoSpace => format!("{} {}", parts.iso_date, base),
        RenameDateMode::PrefixEuUnderscore => format!("{}_{}", parts.eu_date, base),
        RenameDateMode::PrefixEuSpace => format!("{} {}", parts.eu_date, base),
        RenameDateMode::PrefixTimeUnderscore => format!("{}_{}", parts.iso_date_time, base),
        RenameDateMode::PrefixTimeSpace => format!("{} {}", parts.iso_date_time, base),
        RenameDateMode::SuffixIso => format!("{}_{}", base, parts.iso_date),
        RenameDateMode::SuffixEu => format!("{}_{}", base, parts.eu_date),
        RenameDateMode::SuffixTime => format!("{}_{}", base, parts.iso_date_time),
        RenameDateMode::Only => parts.iso_date.clone(),
    };
    stamped + extension
}

/// `base + extension` with the character transform for `mode` applied to `base`
pub fn apply_char_mode(base: &str, extension: &str, mode: RenameCharMode) -> String {
    let rewritten = match mode {
        RenameCharMode::None => base.to_string(),
        RenameCharMode::Normalize => return normalize_file_name(&format!("{}{}", base, extension)),
        RenameCharMode::RemoveUnderscore => base.replace('_', ""),
        RenameCharMode::RemoveUnderscoreHyphen => base.replace(['_', '-'], ""),
        RenameCharMode::SpacesToUnderscore => WHITESPACE_RUN.replace_all(base, "_").into_owned(),
        RenameCharMode::SpacesHyphensToUnderscore => {
            WHITESPACE_OR_HYPHEN_RUN.replace_all(base, "_").into_owned()
        }
        RenameCharMode::HyphensToUnderscore => base.replace('-', "_"),
        RenameCharMode::UnderscoresToSpaces => base.replace('_', " "),
        RenameCharMode::RemoveSpaces => WHITESPACE_RUN.replace_all(base, "").into_owned(),
        RenameCharMode::RemoveHyphens => base.replace('-', ""),
    };
    rewritten + extension
}

/// Strip everything but ASCII word characters, whitespace and hyphens from
/// the base name, turn whitespace runs into a single `+`, and keep the
/// extension as-is.
pub fn normalize_file_name(filename: &str) -> String {
    let (base, extension) = split_name(filename);
    let cleaned = NOT_WORD_SPACE_HYPHEN.replace_all(base, "");
    let plussed = WHITESPACE_RUN.replace_all(&cleaned, "+");
    let collapsed = PLUS_RUN.replace_all(&plussed, "+");
    format!("{}{}", collapsed.trim(), extension)
}

/// Swap the last `/` segment of `relative_path` for `leaf`.
///
/// Only the final segment is touched, so a folder that happens to share
/// the file's name keeps its name.
pub fn replace_leaf(relative_path: &str, leaf: &str) -> String {
    match relative_path.rfind('/') {
        Some(idx) => format!("{}/{}", &relative_path[..idx], leaf),
        None => leaf.to_string(),
    }
}
