//! Types for the placement module.

use crate::core::ingest::SourceFile;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How files are grouped into top-level folders
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OrganizeMode {
    /// Category folder from the extension (`IMAGES`, `PDF`, ...)
    #[default]
    ByType,
    /// `2023`
    ByYear,
    /// `06-Junho`
    ByMonth,
    /// `2023/06-Junho`
    ByYearThenMonth,
    /// `2023/PDF`
    ByYearThenType,
    /// `Pequeno` / `Médio` / `Grande`
    BySize,
}

/// Date stamp added to file names
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RenameDateMode {
    #[default]
    None,
    /// `20230615_name`
    PrefixIsoUnderscore,
    /// `20230615 name`
    PrefixIsoSpace,
    /// `15062023_name`
    PrefixEuUnderscore,
    /// `15062023 name`
    PrefixEuSpace,
    /// `20230615_142530_name`
    PrefixTimeUnderscore,
    /// `20230615_142530 name`
    PrefixTimeSpace,
    /// `name_20230615`
    SuffixIso,
    /// `name_15062023`
    SuffixEu,
    /// `name_20230615_142530`
    SuffixTime,
    /// `20230615`, dropping the original base name
    Only,
}

/// Character transform applied to the base name
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RenameCharMode {
    #[default]
    None,
    /// Keep word characters, whitespace and hyphens; whitespace runs become `+`
    Normalize,
    RemoveUnderscore,
    RemoveUnderscoreHyphen,
    SpacesToUnderscore,
    SpacesHyphensToUnderscore,
    HyphensToUnderscore,
    UnderscoresToSpaces,
    RemoveSpaces,
    RemoveHyphens,
}

macro_rules! string_forms {
    ($ty:ty { $($variant:ident => $name:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($name $(| $alias)* => Ok(Self::$variant),)+
                    other => Err(format!(
                        "unknown value '{}', expected one of: {}",
                        other,
                        Self::ALL.iter().map(|v| v.as_str()).collect::<Vec<_>>().join(", ")
                    )),
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_forms!(OrganizeMode {
    ByType => "type" | "by-type",
    ByYear => "year" | "by-year",
    ByMonth => "month" | "by-month",
    ByYearThenMonth => "year-month" | "by-year-then-month",
    ByYearThenType => "year-type" | "by-year-then-type",
    BySize => "size" | "by-size",
});

string_forms!(RenameDateMode {
    None => "none",
    PrefixIsoUnderscore => "prefix-iso-underscore",
    PrefixIsoSpace => "prefix-iso-space",
    PrefixEuUnderscore => "prefix-eu-underscore",
    PrefixEuSpace => "prefix-eu-space",
    PrefixTimeUnderscore => "prefix-time-underscore",
    PrefixTimeSpace => "prefix-time-space",
    SuffixIso => "suffix-iso",
    SuffixEu => "suffix-eu",
    SuffixTime => "suffix-time",
    Only => "only",
});

string_forms!(RenameCharMode {
    None => "none",
    Normalize => "normalize",
    RemoveUnderscore => "remove-underscore",
    RemoveUnderscoreHyphen => "remove-underscore-hyphen",
    SpacesToUnderscore => "spaces-to-underscore",
    SpacesHyphensToUnderscore => "spaces-hyphens-to-underscore",
    HyphensToUnderscore => "hyphens-to-underscore",
    UnderscoresToSpaces => "underscores-to-spaces",
    RemoveSpaces => "remove-spaces",
    RemoveHyphens => "remove-hyphens",
});

/// User-selected policy for one organize run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizeOptions {
    pub mode: OrganizeMode,
    pub date_mode: RenameDateMode,
    pub char_mode: RenameCharMode,
}

/// Where one file ends up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedEntry {
    pub source: SourceFile,
    /// Position in the original drop/selection
    pub relative_path: String,
    /// Top-level folder chosen by the organize mode
    pub folder: String,
    pub renamed_name: String,
    /// Full path inside the archive
    pub target_path: String,
    /// The natural target was taken and a numbered variant was used
    pub has_conflict: bool,
}

impl PlannedEntry {
    pub fn is_renamed(&self) -> bool {
        self.renamed_name != self.source.name
    }
}

/// The organization plan (preview)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizePlan {
    pub id: String,
    pub options: OrganizeOptions,
    pub entries: Vec<PlannedEntry>,
    /// Archive paths of empty-directory markers
    pub directories: Vec<String>,
    pub total_files: usize,
    pub total_size_bytes: u64,
    /// Distinct top-level folders used by the entries
    pub folder_count: usize,
    pub conflict_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_parse_short_and_long_names() {
        assert_eq!("year-month".parse::<OrganizeMode>(), Ok(OrganizeMode::ByYearThenMonth));
        assert_eq!("by-year-then-type".parse::<OrganizeMode>(), Ok(OrganizeMode::ByYearThenType));
        assert_eq!("SUFFIX-ISO".parse::<RenameDateMode>(), Ok(RenameDateMode::SuffixIso));
        assert_eq!("normalize".parse::<RenameCharMode>(), Ok(RenameCharMode::Normalize));
    }

    #[test]
    fn unknown_mode_lists_choices() {
        let err = "sideways".parse::<OrganizeMode>().unwrap_err();
        assert!(err.contains("year-month"));
    }

    #[test]
    fn serde_names_match_display() {
        for mode in RenameCharMode::ALL {
            let json = serde_json::to_string(mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode));
        }
        for mode in RenameDateMode::ALL {
            let json = serde_json::to_string(mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode));
        }
    }
}
