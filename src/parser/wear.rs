use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::alloy::Alloy;
use crate::error::AppError;
use crate::parser::types::{WearDatabase, WearMetrics};

/// Result of scanning a wear-profile workbook.
#[derive(Debug, Default)]
pub struct WearScan {
    pub database: WearDatabase,
    /// (sheet name, canonical alloy) for each sheet that produced an entry.
    pub matched_sheets: Vec<(String, String)>,
    /// Sheets whose name matched no alloy variant.
    pub skipped_sheets: Vec<String>,
    /// Matched sheets that carried too few numeric depth cells.
    pub short_sheets: Vec<String>,
}

/// Scan a profilometer workbook: one sheet per alloy, depth profile in the
/// third column (µm). Sheet names are normalized via the alloy variant table.
pub fn scan_workbook(path: &Path) -> Result<WearScan, AppError> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();

    let mut scan = WearScan::default();
    for sheet in sheet_names {
        let Some(alloy) = Alloy::from_sheet_name(&sheet) else {
            tracing::debug!(sheet, "no alloy variant matches sheet name, skipping");
            scan.skipped_sheets.push(sheet);
            continue;
        };

        let range = workbook.worksheet_range(&sheet)?;
        let depths: Vec<f64> = range
            .rows()
            .skip(1) // header row
            .filter_map(|row| row.get(2).and_then(cell_to_f64))
            .collect();

        match max_depth(&depths) {
            Some(depth) => {
                tracing::info!(
                    sheet,
                    alloy = alloy.canonical_name(),
                    depth_um = depth,
                    "wear profile matched"
                );
                scan.database.insert(
                    alloy.canonical_name().to_string(),
                    WearMetrics {
                        max_depth_um: depth,
                        wear_area_um2: 0.0,
                    },
                );
                scan.matched_sheets
                    .push((sheet, alloy.canonical_name().to_string()));
            }
            None => {
                tracing::warn!(sheet, "too few numeric depth cells, skipping sheet");
                scan.short_sheets.push(sheet);
            }
        }
    }

    Ok(scan)
}

/// Peak-to-valley depth of a profile, rounded to 2 decimals.
/// Needs at least two points to be meaningful.
pub fn max_depth(depths: &[f64]) -> Option<f64> {
    if depths.len() < 2 {
        return None;
    }
    let max = depths.iter().cloned().fold(f64::MIN, f64::max);
    let min = depths.iter().cloned().fold(f64::MAX, f64::min);
    Some(((max - min) * 100.0).round() / 100.0)
}

fn cell_to_f64(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_depth_peak_to_valley() {
        // Profile dips to -18.4 µm from a +2.6 µm shoulder.
        let depths = vec![0.0, 2.6, -5.0, -18.4, -12.0, 1.0];
        assert_eq!(max_depth(&depths), Some(21.0));
    }

    #[test]
    fn test_max_depth_rounding() {
        let depths = vec![0.0, 10.555];
        assert_eq!(max_depth(&depths), Some(10.56));
    }

    #[test]
    fn test_max_depth_flat_profile() {
        assert_eq!(max_depth(&[3.0, 3.0, 3.0]), Some(0.0));
    }

    #[test]
    fn test_max_depth_too_short() {
        assert_eq!(max_depth(&[]), None);
        assert_eq!(max_depth(&[5.0]), None);
    }

    #[test]
    fn test_cell_coercion() {
        assert_eq!(cell_to_f64(&Data::Float(1.5)), Some(1.5));
        assert_eq!(cell_to_f64(&Data::Int(-3)), Some(-3.0));
        assert_eq!(cell_to_f64(&Data::String(" 2.25 ".into())), Some(2.25));
        assert_eq!(cell_to_f64(&Data::String("depth".into())), None);
        assert_eq!(cell_to_f64(&Data::Empty), None);
    }

    #[test]
    fn test_scan_missing_workbook_errors() {
        let err = scan_workbook(Path::new("/nonexistent/wear.xlsx")).unwrap_err();
        assert!(matches!(
            err,
            AppError::Workbook(_) | AppError::Io(_)
        ));
    }
}
