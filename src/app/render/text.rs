use crate::core::duration::format_dhms;
use crate::domain::model::{Category, ProfitRecord, Rankings};
use std::fmt::Write;

/// Plain aligned tables for the terminal, one per category.
pub fn render_text(rankings: &Rankings) -> String {
    let mut out = String::new();
    for category in Category::ALL {
        let records = rankings.records(category);
        let _ = writeln!(out, "{} ({})", category.title(), records.len());
        render_category(&mut out, records, rankings.settings.tolerance);
        out.push('\n');
    }
    out
}

fn render_category(out: &mut String, records: &[ProfitRecord], tolerance: bool) {
    let name_width = records
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let _ = write!(
        out,
        "{:>3}  {:<name_width$}  {:>12}  {:>12}  {:>12}  {:>8}  {:>12}",
        "#", "Item", "Seed Cost", "Sell Price", "Profit/Pick", "Time (s)", "Profit/min",
    );
    if tolerance {
        let _ = write!(out, "  {:>14}", "Tolerance");
    }
    out.push('\n');

    for (i, record) in records.iter().enumerate() {
        let _ = write!(
            out,
            "{:>3}  {:<name_width$}  {:>12.6}  {:>12.6}  {:>12.6}  {:>8.0}  {:>12.6}",
            i + 1,
            record.name,
            record.seed_cost,
            record.sell_price,
            record.profit,
            record.seconds,
            record.profit_per_minute,
        );
        if tolerance {
            let _ = write!(
                out,
                "  {:>14}",
                record
                    .tolerance_seconds
                    .map(format_dhms)
                    .unwrap_or_default()
            );
        }
        out.push('\n');
    }
}
