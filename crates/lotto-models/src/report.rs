use chrono::NaiveDateTime;
use lotto_ensemble::CombinedResult;

use crate::draw::pad_numbers;

const RISK_NOTICE: &str =
    "**Risk notice**: this prediction is for entertainment only. Play responsibly.";

/// Render a Markdown analysis report for `period`.
pub fn render_markdown(
    period: &str,
    previous_period: &str,
    result: &CombinedResult,
    generated_at: NaiveDateTime,
) -> String {
    let mut lines = vec![
        format!("# Period {period} Ensemble Prediction Report"),
        String::new(),
        format!("## Analysis date: {}", generated_at.format("%Y-%m-%d")),
        String::new(),
        "---".to_string(),
        String::new(),
        "## Previous period".to_string(),
        format!("Prediction for period {previous_period} compared with the actual draw."),
        String::new(),
        "---".to_string(),
        String::new(),
        "## Ensemble prediction".to_string(),
        String::new(),
        format!("- Primary zone: {}", pad_list(&result.primary_numbers)),
        format!("- Secondary zone: {}", pad_list(&result.secondary_numbers)),
        format!("- Confidence: {:.1}%", result.confidence * 100.0),
    ];

    let filled: Vec<u32> = result
        .filled_primary
        .iter()
        .chain(&result.filled_secondary)
        .copied()
        .collect();
    if !filled.is_empty() {
        lines.push(format!("- Randomly filled: {}", pad_list(&filled)));
    }

    lines.extend([
        String::new(),
        "### Weights used".to_string(),
        String::new(),
        "| source | weight |".to_string(),
        "|---|---|".to_string(),
    ]);
    for (source, weight) in result.weights_used.iter() {
        lines.push(format!("| {source} | {:.1}% |", weight * 100.0));
    }

    if !result.rejected.is_empty() {
        lines.extend([String::new(), "### Rejected candidates".to_string(), String::new()]);
        for rejected in &result.rejected {
            lines.push(format!("- {}: {}", rejected.source_id, rejected.reason));
        }
    }

    lines.extend([
        String::new(),
        RISK_NOTICE.to_string(),
        String::new(),
        "---".to_string(),
        format!("*Generated {}*", generated_at.format("%Y-%m-%d %H:%M:%S")),
    ]);
    lines.join("\n")
}

fn pad_list(numbers: &[u32]) -> String {
    pad_numbers(numbers).replace(' ', ", ")
}
