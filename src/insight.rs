use serde::Serialize;

use crate::config::InsightThresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightLevel {
    Good,
    Info,
    Warning,
    Bad,
    Unknown,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub topic: &'static str,
    pub level: InsightLevel,
    pub text: String,
}

/// Map the two predictions and the wear lookup through the fixed rule tables.
/// Always returns exactly three insights, in Tribology/Corrosion/Wear order.
pub fn generate_insights(
    cof: f64,
    ocp: f64,
    wear_depth_um: Option<f64>,
    t: &InsightThresholds,
) -> Vec<Insight> {
    vec![
        friction_insight(cof, t),
        corrosion_insight(ocp, t),
        wear_insight(wear_depth_um, t),
    ]
}

fn friction_insight(cof: f64, t: &InsightThresholds) -> Insight {
    let (level, text) = if cof < t.cof_low {
        (InsightLevel::Good, "Low friction (excellent)".to_string())
    } else if cof > t.cof_high {
        (InsightLevel::Warning, "High friction (risk of wear)".to_string())
    } else {
        (InsightLevel::Info, "Moderate friction".to_string())
    };
    Insight { topic: "Tribology", level, text }
}

fn corrosion_insight(ocp: f64, t: &InsightThresholds) -> Insight {
    let (level, text) = if ocp < t.ocp_active {
        (
            InsightLevel::Warning,
            "Highly active (rapid degradation)".to_string(),
        )
    } else if ocp > t.ocp_noble {
        (InsightLevel::Good, "More noble (stable)".to_string())
    } else {
        (InsightLevel::Info, "Moderate activity".to_string())
    };
    Insight { topic: "Corrosion", level, text }
}

fn wear_insight(depth_um: Option<f64>, t: &InsightThresholds) -> Insight {
    let (level, text) = match depth_um {
        None => (
            InsightLevel::Unknown,
            "No wear data available for this alloy".to_string(),
        ),
        Some(depth) if depth > t.wear_high_um => (
            InsightLevel::Bad,
            format!("Significant material loss ({} µm)", fmt_depth(depth)),
        ),
        Some(depth) if depth < t.wear_low_um => (
            InsightLevel::Good,
            format!("High wear resistance ({} µm)", fmt_depth(depth)),
        ),
        Some(depth) => (
            InsightLevel::Info,
            format!("Moderate material loss ({} µm)", fmt_depth(depth)),
        ),
    };
    Insight { topic: "Wear", level, text }
}

/// Depths are stored rounded to 2 decimals; render them with at least one
/// decimal so a whole-number depth reads "21.0", not "21".
fn fmt_depth(depth: f64) -> String {
    if depth == depth.trunc() {
        format!("{depth:.1}")
    } else {
        format!("{depth}")
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
