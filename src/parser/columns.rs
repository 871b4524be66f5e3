use std::collections::HashSet;

/// Maps (possibly flattened) header names to their index in a CSV record.
/// Lab exports have no stable column order, so lookups are substring-based.
pub struct HeaderMap {
    headers: Vec<String>,
}

impl HeaderMap {
    /// Build a HeaderMap from a single CSV header record.
    /// Header fields are trimmed of surrounding whitespace.
    pub fn from_record(headers: &csv::StringRecord) -> Self {
        HeaderMap {
            headers: headers.iter().map(|f| f.trim().to_string()).collect(),
        }
    }

    /// Build a HeaderMap from already-flattened header names
    /// (the friction export needs a two-row flattening pass first).
    pub fn from_names(headers: Vec<String>) -> Self {
        HeaderMap { headers }
    }

    /// Index of the first column not in `claimed` whose name contains every
    /// term in `terms`. The claimed set keeps a short search term ("Mg") from
    /// stealing a longer series' columns ("Mg bi_Timestamp").
    pub fn find_containing(&self, terms: &[&str], claimed: &HashSet<usize>) -> Option<usize> {
        self.headers
            .iter()
            .enumerate()
            .find(|(i, name)| !claimed.contains(i) && terms.iter().all(|t| name.contains(t)))
            .map(|(i, _)| i)
    }

    pub fn name(&self, idx: usize) -> &str {
        &self.headers[idx]
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}
