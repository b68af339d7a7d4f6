use crate::core::duration::format_dhms;
use crate::domain::model::{CalculatorSettings, Category, ProfitRecord, Rankings};
use std::fmt::Write;

const STYLE: &str = r#"
    body { background: #f6f7f2; }
    .profit-positive { color: #198754; font-weight: 600; }
    .profit-negative { color: #dc3545; font-weight: 600; }
    .table td, .table th { white-space: nowrap; }
"#;

pub fn render_html(rankings: &Rankings) -> String {
    let mut html = String::with_capacity(16 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("  <meta charset=\"utf-8\">\n");
    html.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("  <title>Sunflower Land Profit Calculator</title>\n");
    html.push_str(
        "  <link rel=\"stylesheet\" href=\"https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css\">\n",
    );
    let _ = writeln!(html, "  <style>{}</style>", STYLE);
    html.push_str("</head>\n<body>\n<div class=\"container py-4\">\n");
    html.push_str("  <h1 class=\"mb-3\">🌻 Sunflower Land Profit Calculator</h1>\n");

    render_settings(&mut html, &rankings.settings);
    let _ = writeln!(
        html,
        "  <p class=\"small text-muted\">Generated at {}</p>",
        rankings.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    for category in Category::ALL {
        let _ = writeln!(html, "  <h2 class=\"mt-4\">{}</h2>", category.title());
        render_table(
            &mut html,
            rankings.records(category),
            rankings.settings.tolerance,
        );
    }

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn render_settings(html: &mut String, settings: &CalculatorSettings) {
    html.push_str("  <div class=\"small text-muted border-top border-bottom py-2\">\n");
    let _ = writeln!(
        html,
        "    Coin rate: <b>{}</b> flower per 1000 coins &middot; Crop multiplier: <b>{}</b> &middot; Fruit multiplier: <b>{}</b>",
        settings.coin_rate, settings.crop_multiplier, settings.fruit_multiplier
    );

    if !settings.modifiers.is_empty() {
        html.push_str("    <br>Modifiers:");
        for modifier in &settings.modifiers {
            let mut parts = Vec::new();
            if let Some(seed) = modifier.seed_override() {
                parts.push(format!("seed {}", seed));
            }
            if let Some(amount) = modifier.yield_override() {
                parts.push(format!("yield {}", amount));
            }
            if let Some(time) = modifier.time_override() {
                parts.push(format!("time {}", format_dhms(time)));
            }
            let _ = write!(
                html,
                " <span class=\"badge text-bg-secondary\">{}: {}</span>",
                escape_html(&modifier.item),
                if parts.is_empty() {
                    "no overrides".to_string()
                } else {
                    parts.join(", ")
                }
            );
        }
        html.push('\n');
    }
    html.push_str("  </div>\n");
}

fn render_table(html: &mut String, records: &[ProfitRecord], tolerance: bool) {
    html.push_str("  <div class=\"table-responsive\">\n");
    html.push_str("    <table class=\"table table-striped align-middle\">\n");
    html.push_str("      <thead>\n        <tr>\n");
    for header in [
        "#",
        "Item",
        "Seed Cost (flower)",
        "Sell Price (flower)",
        "Profit/Pick (flower)",
        "Time (s)",
        "Profit/min (flower)",
    ] {
        let _ = writeln!(html, "          <th>{}</th>", header);
    }
    if tolerance {
        html.push_str("          <th>Tolerance</th>\n");
    }
    html.push_str("        </tr>\n      </thead>\n      <tbody>\n");

    if records.is_empty() {
        let colspan = if tolerance { 8 } else { 7 };
        let _ = writeln!(
            html,
            "        <tr><td colspan=\"{}\" class=\"text-center text-muted p-3\">No tradable items</td></tr>",
            colspan
        );
    }

    for (i, record) in records.iter().enumerate() {
        html.push_str("        <tr>\n");
        let _ = writeln!(html, "          <td>{}</td>", i + 1);
        let _ = writeln!(html, "          <td>{}</td>", escape_html(&record.name));
        let _ = writeln!(html, "          <td>{:.6}</td>", record.seed_cost);
        let _ = writeln!(html, "          <td>{:.6}</td>", record.sell_price);
        let _ = writeln!(
            html,
            "          <td class=\"{}\">{:.6}</td>",
            profit_class(record.profit),
            record.profit
        );
        let _ = writeln!(html, "          <td>{:.0}</td>", record.seconds);
        let _ = writeln!(
            html,
            "          <td class=\"{}\">{:.6}</td>",
            profit_class(record.profit_per_minute),
            record.profit_per_minute
        );
        if tolerance {
            let _ = writeln!(
                html,
                "          <td>{}</td>",
                record
                    .tolerance_seconds
                    .map(format_dhms)
                    .unwrap_or_default()
            );
        }
        html.push_str("        </tr>\n");
    }

    html.push_str("      </tbody>\n    </table>\n  </div>\n");
}

fn profit_class(value: f64) -> &'static str {
    if value < 0.0 {
        "profit-negative"
    } else {
        "profit-positive"
    }
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
