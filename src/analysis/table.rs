//! Plain-text rendering of display rows and raw model output.

use unicode_width::UnicodeWidthStr;

use crate::model::PredictionRecord;

use super::display::DisplayRow;

const HEADERS: [&str; 3] = ["Aspect", "Sentiment", "Confidence"];

/// Renders rows as an aligned three-column table.
///
/// Columns are padded by terminal display width so emoji-decorated
/// sentiment labels line up.
#[must_use]
pub fn render_table(rows: &[DisplayRow]) -> String {
    let cells: Vec<[&str; 3]> = rows
        .iter()
        .map(|row| {
            [
                row.aspect.as_str(),
                row.sentiment.as_str(),
                row.confidence.as_str(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(UnicodeWidthStr::width);
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.width());
        }
    }

    let mut output = String::new();
    push_line(&mut output, &HEADERS, &widths);
    let separator: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    output.push_str(separator.join("-+-").as_str());
    output.push('\n');
    for line in &cells {
        push_line(&mut output, line, &widths);
    }
    output
}

/// Pretty-prints the raw key-value document returned by the model.
#[must_use]
pub fn render_raw_json(record: &PredictionRecord) -> String {
    serde_json::to_string_pretty(record.raw()).unwrap_or_else(|_| record.raw().to_string())
}

fn push_line(output: &mut String, cells: &[&str; 3], widths: &[usize; 3]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let fill = width.saturating_sub(cell.width());
            format!("{cell}{}", " ".repeat(fill))
        })
        .collect();
    output.push_str(padded.join(" | ").trim_end());
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{render_raw_json, render_table};
    use crate::analysis::display::DisplayRow;
    use crate::model::PredictionRecord;

    fn row(aspect: &str, sentiment: &str, confidence: &str) -> DisplayRow {
        DisplayRow {
            aspect: aspect.to_owned(),
            sentiment: sentiment.to_owned(),
            confidence: confidence.to_owned(),
        }
    }

    #[test]
    fn table_aligns_columns_by_display_width() {
        let table = render_table(&[
            row("battery life", "😄 Positive", "98.12%"),
            row("camera", "😞 Negative", "87.30%"),
        ]);

        let expected = concat!(
            "Aspect       | Sentiment   | Confidence\n",
            "-------------+-------------+-----------\n",
            "battery life | 😄 Positive | 98.12%\n",
            "camera       | 😞 Negative | 87.30%\n",
        );
        assert_eq!(table, expected);
    }

    #[test]
    fn table_without_rows_has_only_headers() {
        let table = render_table(&[]);

        assert_eq!(
            table,
            "Aspect | Sentiment | Confidence\n-------+-----------+-----------\n"
        );
    }

    #[test]
    fn raw_json_is_pretty_printed() {
        let record = PredictionRecord::from_value(json!({
            "aspect": ["screen"],
            "sentiment": ["Positive"],
            "confidence": [0.5]
        }))
        .expect("record should decode");

        let rendered = render_raw_json(&record);

        assert!(rendered.contains("\n  \"aspect\": [\n    \"screen\"\n  ]"), "{rendered}");
    }
}
