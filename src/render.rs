//! Plain-text building blocks for the pages: headings, bar charts, tables.

use std::io::{self, Write};

const BAR_WIDTH: usize = 40;
const MAX_CELL_WIDTH: usize = 60;

pub fn title(out: &mut dyn Write, text: &str) -> io::Result<()> {
    writeln!(out, "{}", text)?;
    writeln!(out, "{}", "=".repeat(text.chars().count()))
}

pub fn header(out: &mut dyn Write, text: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", text)?;
    writeln!(out, "{}", "-".repeat(text.chars().count()))
}

pub fn rule(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", "-".repeat(60))
}

pub fn info(out: &mut dyn Write, text: &str) -> io::Result<()> {
    writeln!(out, "[info] {}", text)
}

pub fn warning(out: &mut dyn Write, text: &str) -> io::Result<()> {
    writeln!(out, "[peringatan] {}", text)
}

pub fn error(out: &mut dyn Write, text: &str) -> io::Result<()> {
    writeln!(out, "[galat] {}", text)
}

/// `label: value (delta)` line.
pub fn metric(out: &mut dyn Write, label: &str, value: &str, delta: Option<&str>) -> io::Result<()> {
    match delta {
        Some(delta) => writeln!(out, "{:<24} {} ({})", label, value, delta),
        None => writeln!(out, "{:<24} {}", label, value),
    }
}

/// Group digits with commas: 12345 → "12,345".
pub fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Format a fraction as a percentage with `decimals` places.
pub fn percent(fraction: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, fraction * 100.0)
}

/// `[#####.....]` for a fraction in [0, 1].
pub fn progress(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

/// Cut to `max` characters, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    let single_line = text.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= max {
        return single_line;
    }
    let mut cut: String = single_line.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Horizontal bars scaled to the largest value, in the given order.
pub fn bar_chart(out: &mut dyn Write, rows: &[(String, f64)], value_label: impl Fn(f64) -> String) -> io::Result<()> {
    let label_width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0).min(MAX_CELL_WIDTH);
    let max = rows.iter().map(|&(_, v)| v).fold(0.0_f64, f64::max);
    for (label, value) in rows {
        let len = if max > 0.0 { (value / max * BAR_WIDTH as f64).round() as usize } else { 0 };
        writeln!(
            out,
            "{:<width$} | {:<bar$} {}",
            truncate(label, label_width),
            "█".repeat(len),
            value_label(*value),
            width = label_width,
            bar = BAR_WIDTH
        )?;
    }
    Ok(())
}

/// Left-aligned table with a header row; long cells are truncated.
pub fn table(out: &mut dyn Write, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count().min(MAX_CELL_WIDTH));
        }
    }

    let line = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| {
                let cell = truncate(cell, w);
                let pad = w - cell.chars().count();
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join(" | ")
    };

    writeln!(out, "{}", line(headers.iter().map(|h| h.to_string()).collect()))?;
    writeln!(out, "{}", widths.iter().map(|&w| "-".repeat(w)).collect::<Vec<_>>().join("-+-"))?;
    for row in rows {
        writeln!(out, "{}", line(row.clone()))?;
    }
    Ok(())
}

/// Text wrapped in a fenced block, as shown for raw reports and logs.
pub fn code_block(out: &mut dyn Write, text: &str) -> io::Result<()> {
    writeln!(out, "```")?;
    writeln!(out, "{}", text.trim_end())?;
    writeln!(out, "```")
}
