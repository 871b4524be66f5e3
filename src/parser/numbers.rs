/// Lenient numeric coercion for lab-export cells ("" → None, "0.31" → Some).
/// Mirrors the forced-numeric-then-drop handling the lab files require.
pub fn parse_opt_f64(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_opt_f64() {
        assert_eq!(parse_opt_f64("0.31"), Some(0.31));
        assert_eq!(parse_opt_f64("  -1.42 "), Some(-1.42));
        assert_eq!(parse_opt_f64("12"), Some(12.0));
        assert_eq!(parse_opt_f64(""), None);
        assert_eq!(parse_opt_f64("   "), None);
        assert_eq!(parse_opt_f64("n/a"), None);
    }
}
