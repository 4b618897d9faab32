//! Destination folder for one file under an organize mode.

use super::OrganizeMode;
use crate::core::classify::{classify_extension, DateParts};
use crate::core::ingest::SourceFile;
use crate::core::rules::CustomRules;
use serde::{Deserialize, Serialize};

const MIB: u64 = 1024 * 1024;

/// Size classes used by `by-size`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeBucket {
    /// Under 1 MiB
    Small,
    /// 1 MiB up to, not including, 100 MiB
    Medium,
    /// 100 MiB and above
    Large,
}

impl SizeBucket {
    pub fn for_size(bytes: u64) -> Self {
        if bytes < MIB {
            SizeBucket::Small
        } else if bytes < 100 * MIB {
            SizeBucket::Medium
        } else {
            SizeBucket::Large
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SizeBucket::Small => "Pequeno",
            SizeBucket::Medium => "Médio",
            SizeBucket::Large => "Grande",
        }
    }
}

/// Folder for `file` under `mode`. Pure; dates are taken from the file's
/// own modification time.
pub fn resolve_folder(file: &SourceFile, mode: OrganizeMode, rules: &CustomRules) -> String {
    match mode {
        OrganizeMode::ByType => classify_extension(&file.name, rules),
        OrganizeMode::ByYear => DateParts::from_modified(file.modified).year,
        OrganizeMode::ByMonth => DateParts::from_modified(file.modified).month_key,
        OrganizeMode::ByYearThenMonth => {
            let parts = DateParts::from_modified(file.modified);
            format!("{}/{}", parts.year, parts.month_key)
        }
        OrganizeMode::ByYearThenType => {
            let parts = DateParts::from_modified(file.modified);
            format!("{}/{}", parts.year, classify_extension(&file.name, rules))
        }
        OrganizeMode::BySize => SizeBucket::for_size(file.size).label().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use std::time::SystemTime;

    fn dated(name: &str, size: u64, y: i32, m: u32, d: u32) -> SourceFile {
        let local = Local.with_ymd_and_hms(y, m, d, 12, 0, 0).single().unwrap();
        SourceFile::new(name, size, format!("/mem/{name}")).with_modified(SystemTime::from(local))
    }

    #[test]
    fn size_boundaries_are_exact() {
        assert_eq!(SizeBucket::for_size(0), SizeBucket::for_size(1_048_575));
        assert_eq!(SizeBucket::for_size(1_048_575), SizeBucket::Small);
        assert_eq!(SizeBucket::for_size(1_048_576), SizeBucket::Medium);
        assert_eq!(SizeBucket::for_size(100 * MIB - 1), SizeBucket::Medium);
        assert_eq!(SizeBucket::for_size(100 * MIB), SizeBucket::Large);
    }

    #[test]
    fn every_mode_resolves() {
        let file = dated("Report Final.PDF", 2 * MIB, 2023, 6, 15);
        let rules = CustomRules::default();

        assert_eq!(resolve_folder(&file, OrganizeMode::ByType, &rules), "PDF");
        assert_eq!(resolve_folder(&file, OrganizeMode::ByYear, &rules), "2023");
        assert_eq!(resolve_folder(&file, OrganizeMode::ByMonth, &rules), "06-Junho");
        assert_eq!(resolve_folder(&file, OrganizeMode::ByYearThenMonth, &rules), "2023/06-Junho");
        assert_eq!(resolve_folder(&file, OrganizeMode::ByYearThenType, &rules), "2023/PDF");
        assert_eq!(resolve_folder(&file, OrganizeMode::BySize, &rules), "Médio");
    }

    #[test]
    fn custom_rule_applies_in_year_then_type() {
        let file = dated("mock.psd", 10, 2022, 1, 3);
        let mut rules = CustomRules::default();
        rules.insert("psd", "DESIGN");

        assert_eq!(resolve_folder(&file, OrganizeMode::ByType, &rules), "DESIGN");
        assert_eq!(resolve_folder(&file, OrganizeMode::ByYearThenType, &rules), "2022/DESIGN");
    }

    #[test]
    fn dates_come_from_each_file() {
        let rules = CustomRules::default();
        let a = dated("a.jpg", 1, 2019, 3, 1);
        let b = dated("b.jpg", 1, 2024, 11, 30);
        assert_eq!(resolve_folder(&a, OrganizeMode::ByYear, &rules), "2019");
        assert_eq!(resolve_folder(&b, OrganizeMode::ByYear, &rules), "2024");
    }
}
