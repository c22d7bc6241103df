use crate::metrics::Comparison;
use crate::render::text::{NO_DATA, fmt_value};

pub fn render_comparison(cmp: &Comparison) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Performance comparison\n\
         ======================\n\
         baseline:  {}\n\
         candidate: {}\n\n",
        cmp.baseline_label, cmp.candidate_label
    ));

    out.push_str(&format!(
        "  {:<26} {:>14} {:>14} {:>10}\n",
        "metric", "baseline", "candidate", "change"
    ));
    out.push_str(&format!("  {}\n", "-".repeat(67)));

    for row in &cmp.rows {
        let delta = match row.delta_pct {
            Some(d) => format!("{d:+.1}%"),
            None => NO_DATA.to_string(),
        };
        out.push_str(&format!(
            "  {:<26} {:>14} {:>14} {:>10}\n",
            row.metric,
            fmt_value(row.baseline, row.unit),
            fmt_value(row.candidate, row.unit),
            delta
        ));
    }

    out
}
