//! Text tables and bar charts.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Renders rows in a double-line grid with a header row.
///
/// Short rows are padded with empty cells.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let columns = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().take(columns).enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let rule = |left: char, mid: char, right: char| {
        let segments: Vec<String> = widths.iter().map(|w| "═".repeat(w + 2)).collect();
        format!("{left}{}{right}\n", segments.join(&mid.to_string()))
    };
    let line = |cells: Vec<&str>| {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let cell = cells.get(i).copied().unwrap_or("");
                let pad = w - cell.chars().count();
                format!(" {cell}{} ", " ".repeat(pad))
            })
            .collect();
        format!("║{}║\n", padded.join("║"))
    };

    let mut out = rule('╔', '╦', '╗');
    out.push_str(&line(headers.to_vec()));
    out.push_str(&rule('╠', '╬', '╣'));
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    out.push_str(&rule('╚', '╩', '╝'));
    out
}

/// Renders a horizontal bar chart scaled so the largest value fills `width`.
pub fn render_bar_chart(title: &str, bars: &[(String, Decimal)], width: usize) -> String {
    let mut out = format!("{title}\n");
    if bars.is_empty() {
        out.push_str("(no data)\n");
        return out;
    }

    let label_width = bars.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let max = bars
        .iter()
        .map(|(_, v)| *v)
        .max()
        .unwrap_or(Decimal::ZERO);

    for (label, value) in bars {
        let filled = if max > Decimal::ZERO && *value > Decimal::ZERO {
            (*value / max * Decimal::from(width))
                .round()
                .to_usize()
                .unwrap_or(0)
                .max(1)
        } else {
            0
        };
        let pad = label_width - label.chars().count();
        out.push_str(&format!(
            "{label}{} │{} {}\n",
            " ".repeat(pad),
            "█".repeat(filled),
            value.normalize()
        ));
    }
    out
}
