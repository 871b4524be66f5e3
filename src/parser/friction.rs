use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::alloy::Alloy;
use crate::error::AppError;
use crate::parser::columns::HeaderMap;
use crate::parser::numbers::parse_opt_f64;
use crate::parser::types::{ParseWarning, Sample, SeriesOutput};

/// Parse the friction test export at `path`.
///
/// The file carries a two-row header: row one holds alloy group labels with
/// continuation blanks, row two holds `Timestamp` / `COF` labels, repeated
/// per alloy.
pub fn parse_friction(path: &Path) -> Result<SeriesOutput, AppError> {
    let file = std::fs::File::open(path)?;
    parse_friction_reader(std::io::BufReader::new(file))
}

/// Core parsing logic — accepts any `Read` source, useful for tests.
pub fn parse_friction_reader<R: Read>(reader: R) -> Result<SeriesOutput, AppError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = rdr.records();
    let top = match records.next() {
        Some(r) => r?,
        None => return Err(AppError::EmptyFile),
    };
    let bottom = match records.next() {
        Some(r) => r?,
        None => return Err(AppError::EmptyFile),
    };

    let headers = HeaderMap::from_names(flatten_headers(&top, &bottom));
    let (pairs, unmatched) = claim_series(&headers);

    let mut out = SeriesOutput {
        unmatched_alloys: unmatched,
        ..SeriesOutput::default()
    };

    for (row_idx, result) in records.enumerate() {
        // +2 header rows, +1 for 1-based line numbers
        let line = row_idx + 3;
        let record = match result {
            Ok(r) => r,
            Err(err) => {
                out.warnings.push(ParseWarning {
                    line,
                    message: err.to_string(),
                });
                continue;
            }
        };
        out.rows_processed += 1;

        for &(alloy, ts_idx, cof_idx) in &pairs {
            let timestamp = record.get(ts_idx).and_then(parse_opt_f64);
            let value = record.get(cof_idx).and_then(parse_opt_f64);
            match (timestamp, value) {
                (Some(timestamp), Some(value)) => out.count_sample(Sample {
                    timestamp,
                    alloy,
                    value,
                }),
                // Series have different lengths, so trailing blanks in one
                // alloy's columns are expected rather than warned about.
                _ => out.skipped_values += 1,
            }
        }
    }

    Ok(out)
}

/// Flatten the two header rows into `"<group>_<label>"` names.
/// A blank, `Unnamed …` or the export's stray `"Mg,"` group cell continues
/// the previous group; any label containing `COF` is normalized to `COF`.
fn flatten_headers(top: &csv::StringRecord, bottom: &csv::StringRecord) -> Vec<String> {
    let width = top.len().max(bottom.len());
    let mut names: Vec<String> = Vec::with_capacity(width);
    for i in 0..width {
        let group = top.get(i).unwrap_or("").trim();
        let label = bottom.get(i).unwrap_or("").trim();

        let prefix = if group.is_empty() || group.starts_with("Unnamed") || group == "Mg," {
            names
                .last()
                .and_then(|prev| prev.split('_').next())
                .unwrap_or("Unknown")
                .to_string()
        } else {
            group.to_string()
        };
        let suffix = if label.contains("COF") { "COF" } else { label };

        names.push(format!("{prefix}_{suffix}"));
    }
    names
}

/// Locate each alloy's (Timestamp, COF) column pair. Alloys with longer
/// search terms claim columns first so the bare "Mg" term cannot steal an
/// "Mg bi" column; each column is claimed at most once.
fn claim_series(headers: &HeaderMap) -> (Vec<(Alloy, usize, usize)>, Vec<String>) {
    let mut by_term_len = Alloy::ALL;
    by_term_len.sort_by_key(|a| std::cmp::Reverse(a.friction_search_term().len()));

    let mut claimed: HashSet<usize> = HashSet::new();
    let mut pairs = Vec::new();
    let mut unmatched = Vec::new();

    for alloy in by_term_len {
        let term = alloy.friction_search_term();
        let ts_idx = headers.find_containing(&[term, "Timestamp"], &claimed);
        let cof_idx = headers.find_containing(&[term, "COF"], &claimed);
        match (ts_idx, cof_idx) {
            (Some(ts), Some(cof)) => {
                claimed.insert(ts);
                claimed.insert(cof);
                pairs.push((alloy, ts, cof));
            }
            _ => unmatched.push(alloy.canonical_name().to_string()),
        }
    }

    // Report pairs in canonical alloy order regardless of claim order.
    pairs.sort_by_key(|(a, _, _)| Alloy::ALL.iter().position(|b| b == a));
    (pairs, unmatched)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
