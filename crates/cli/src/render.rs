//! Text rendering of the analytics report as horizontal bar charts.

use std::fmt::Write;

use shoplens_compute::{AnalyticsReport, SectionOutcome};
use shoplens_core::config::PresentationConfig;

/// Render all four sections, in dashboard order.
pub fn render_report(report: &AnalyticsReport, cfg: &PresentationConfig) -> String {
    let mut out = String::new();

    section(&mut out, &cfg.city_title, &report.top_cities, cfg.bar_width, |rows| {
        rows.iter().map(|r| (r.category.clone(), r.count)).collect()
    });
    section(&mut out, &cfg.category_title, &report.top_categories, cfg.bar_width, |rows| {
        rows.iter().map(|r| (r.category.clone(), r.count)).collect()
    });
    section(&mut out, &cfg.weekday_title, &report.weekday_distribution, cfg.bar_width, |rows| {
        rows.iter().map(|r| (r.weekday.to_string(), r.count)).collect()
    });
    section(&mut out, &cfg.rfm_title, &report.rfm, cfg.bar_width, |table| {
        table
            .distribution
            .iter()
            .map(|b| (b.rfm_score.to_string(), b.customers))
            .collect()
    });

    out
}

fn section<T>(
    out: &mut String,
    title: &str,
    outcome: &SectionOutcome<T>,
    width: usize,
    rows: impl Fn(&T) -> Vec<(String, usize)>,
) {
    match outcome {
        SectionOutcome::Ready { table } => out.push_str(&bar_chart(title, &rows(table), width)),
        SectionOutcome::Failed { step, error } => {
            let _ = writeln!(out, "{}\n  unavailable ({}): {}\n", title, step, error);
        }
    }
}

/// One labelled bar per row, scaled so the largest count spans `width`.
pub fn bar_chart(title: &str, rows: &[(String, usize)], width: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "-".repeat(title.chars().count()));

    if rows.is_empty() {
        out.push_str("  (no data)\n\n");
        return out;
    }

    let label_width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    let max = rows.iter().map(|(_, count)| *count).max().unwrap_or(0);

    for (label, count) in rows {
        let len = if max == 0 { 0 } else { (count * width).div_ceil(max) };
        let _ = writeln!(
            out,
            "  {:<lw$} | {:<bw$} {}",
            label,
            "#".repeat(len),
            count,
            lw = label_width,
            bw = width
        );
    }
    out.push('\n');
    out
}
