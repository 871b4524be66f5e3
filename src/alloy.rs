use std::fmt;

use serde::{Deserialize, Serialize};

/// The four alloy systems covered by the lab campaigns.
/// Ordering is fixed — it drives the one-hot feature layout, so changing it
/// invalidates previously trained model artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Alloy {
    PureMg,
    AlMgBi,
    AlMgSr,
    AlMgZn,
}

impl Alloy {
    pub const ALL: [Alloy; 4] = [Alloy::PureMg, Alloy::AlMgBi, Alloy::AlMgSr, Alloy::AlMgZn];

    /// Standardized name used in artifacts, responses and request validation.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            Alloy::PureMg => "Pure Mg",
            Alloy::AlMgBi => "Al-Mg-Bi",
            Alloy::AlMgSr => "Al-Mg-Sr",
            Alloy::AlMgZn => "Al-Mg-Zn",
        }
    }

    /// Search term used against the flattened friction CSV headers
    /// (the friction export labels column groups "Mg", "Mg bi", …).
    pub fn friction_search_term(&self) -> &'static str {
        match self {
            Alloy::PureMg => "Mg",
            Alloy::AlMgBi => "Mg bi",
            Alloy::AlMgSr => "Mg Sr",
            Alloy::AlMgZn => "Mg Zn",
        }
    }

    /// Header spellings seen in the OCP export, including the stray
    /// "Al- Mg-Bi" spacing of the source file.
    fn ocp_header_variants(&self) -> &'static [&'static str] {
        match self {
            Alloy::PureMg => &["Pure Mg"],
            Alloy::AlMgBi => &["Al- Mg-Bi", "Al-Mg-Bi"],
            Alloy::AlMgSr => &["Al-Mg-Sr"],
            Alloy::AlMgZn => &["Al-Mg-Zn"],
        }
    }

    /// Sheet-name spellings seen across wear-profile workbooks.
    fn sheet_variants(&self) -> &'static [&'static str] {
        match self {
            Alloy::PureMg => &["Pure Mg", "PureMg", "Mg"],
            Alloy::AlMgBi => &["Al-Mg-Bi", "AlMgBi", "Mg-Bi", "Mg bi"],
            Alloy::AlMgSr => &["Al-Mg-Sr", "AlMgSr", "Mg-Sr", "Mg Sr"],
            Alloy::AlMgZn => &["Al-Mg-Zn", "AlMgZn", "Mg-Zn", "Mg Zn"],
        }
    }

    /// Exact canonical-name lookup, used to validate prediction requests.
    pub fn from_canonical(name: &str) -> Option<Alloy> {
        Alloy::ALL
            .into_iter()
            .find(|a| a.canonical_name() == name.trim())
    }

    /// Case-insensitive substring match of a workbook sheet name against the
    /// known variants. Longest variants are tried first so "AlMgBi" wins over
    /// the bare "Mg".
    pub fn from_sheet_name(sheet: &str) -> Option<Alloy> {
        let sheet_lower = sheet.to_lowercase();
        let mut candidates: Vec<(&'static str, Alloy)> = Vec::new();
        for alloy in Alloy::ALL {
            for variant in alloy.sheet_variants() {
                candidates.push((variant, alloy));
            }
        }
        candidates.sort_by_key(|(v, _)| std::cmp::Reverse(v.len()));
        candidates
            .into_iter()
            .find(|(v, _)| sheet_lower.contains(&v.to_lowercase()))
            .map(|(_, alloy)| alloy)
    }

    /// Substring match of an OCP column header against the known spellings.
    pub fn from_ocp_header(header: &str) -> Option<Alloy> {
        let mut candidates: Vec<(&'static str, Alloy)> = Vec::new();
        for alloy in Alloy::ALL {
            for variant in alloy.ocp_header_variants() {
                candidates.push((variant, alloy));
            }
        }
        candidates.sort_by_key(|(v, _)| std::cmp::Reverse(v.len()));
        candidates
            .into_iter()
            .find(|(v, _)| header.contains(v))
            .map(|(_, alloy)| alloy)
    }

    /// Canonical names in `ALL` order, for listings and error messages.
    pub fn canonical_names() -> Vec<String> {
        Alloy::ALL
            .iter()
            .map(|a| a.canonical_name().to_string())
            .collect()
    }
}

impl fmt::Display for Alloy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}
