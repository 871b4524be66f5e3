use std::io::Read;
use std::path::Path;

use crate::alloy::Alloy;
use crate::error::AppError;
use crate::parser::columns::HeaderMap;
use crate::parser::numbers::parse_opt_f64;
use crate::parser::types::{ParseWarning, Sample, SeriesOutput};

/// Parse the open-circuit potential export at `path`.
///
/// The file is laid out as repeating `(timestamp, potential)` column pairs,
/// one pair per alloy, identified by the pair's first header.
pub fn parse_ocp(path: &Path) -> Result<SeriesOutput, AppError> {
    let file = std::fs::File::open(path)?;
    parse_ocp_reader(std::io::BufReader::new(file))
}

/// Core parsing logic — accepts any `Read` source, useful for tests.
pub fn parse_ocp_reader<R: Read>(reader: R) -> Result<SeriesOutput, AppError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = HeaderMap::from_record(&rdr.headers()?.clone());
    if headers.is_empty() {
        return Err(AppError::EmptyFile);
    }

    // Pair up columns (0,1), (2,3), … and match each pair's first header
    // against the known alloy spellings.
    let mut pairs: Vec<(Alloy, usize, usize)> = Vec::new();
    let mut matched: Vec<Alloy> = Vec::new();
    let mut i = 0;
    while i + 1 < headers.len() {
        if let Some(alloy) = Alloy::from_ocp_header(headers.name(i)) {
            pairs.push((alloy, i, i + 1));
            matched.push(alloy);
        }
        i += 2;
    }

    let mut out = SeriesOutput {
        unmatched_alloys: Alloy::ALL
            .iter()
            .filter(|a| !matched.contains(a))
            .map(|a| a.canonical_name().to_string())
            .collect(),
        ..SeriesOutput::default()
    };

    for (row_idx, result) in rdr.records().enumerate() {
        let line = row_idx + 2; // +1 header row, +1 for 1-based lines
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

        for &(alloy, ts_idx, ocp_idx) in &pairs {
            let timestamp = record.get(ts_idx).and_then(parse_opt_f64);
            let value = record.get(ocp_idx).and_then(parse_opt_f64);
            match (timestamp, value) {
                (Some(timestamp), Some(value)) => out.count_sample(Sample {
                    timestamp,
                    alloy,
                    value,
                }),
                _ => out.skipped_values += 1,
            }
        }
    }

    Ok(out)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
