// ============================================================
// TEXT REPORT
// ============================================================
// Render an AnalysisResult as a sectioned terminal report

use crate::domain::analysis::AnalysisResult;
use crate::shared::format::{format_count, format_number};

/// Metric row labels for the numeric summary, in display order
const NUMERIC_METRICS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Render the full text report for an analysis result.
///
/// Formatting only; every number here was computed by the profiler.
pub fn render_text(result: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str("# CSV Analysis\n");
    if let Some(filename) = &result.filename {
        out.push_str(&format!("- File: {}\n", filename));
    }
    out.push_str(&format!("- Encoding: {}\n", result.encoding));
    out.push_str(&format!(
        "- Detected delimiter: {}\n",
        display_delimiter(result.detected_delimiter)
    ));

    out.push_str("\n## Dimensions\n");
    out.push_str(&format!("- Rows: {}\n", format_count(result.rows)));
    out.push_str(&format!("- Columns: {}\n", format_count(result.columns)));

    out.push_str("\n## Dtypes\n");
    let dtype_rows: Vec<Vec<String>> = result
        .dtypes
        .iter()
        .map(|d| vec![d.column.clone(), d.dtype.label().to_string()])
        .collect();
    out.push_str(&render_grid(&["Column", "Dtype"], &dtype_rows));

    out.push_str("\n## Missing values\n");
    if result.has_missing {
        let missing_rows: Vec<Vec<String>> = result
            .missing
            .iter()
            .map(|m| {
                vec![
                    m.column.clone(),
                    format_count(m.count),
                    format!("{:.1}%", m.pct),
                ]
            })
            .collect();
        out.push_str(&render_grid(&["Column", "Missing", "Pct"], &missing_rows));
        out.push_str(&format!(
            "Overall missing: {} values ({:.2}%)\n",
            format_count(result.overall_missing),
            result.overall_missing_pct
        ));
    } else {
        out.push_str("No missing values.\n");
    }

    out.push_str("\n## Duplicates\n");
    out.push_str(&format!(
        "- Count: {}\n",
        format_count(result.duplicates.count)
    ));
    if !result.duplicates.preview.is_empty() {
        out.push_str(&format!(
            "Preview (up to {} rows):\n",
            crate::application::use_cases::profiler::DUPLICATE_PREVIEW_ROWS
        ));
        let mut headers = vec!["Row".to_string()];
        headers.extend(result.preview.columns.iter().cloned());
        let dup_rows: Vec<Vec<String>> = result
            .duplicates
            .preview
            .iter()
            .map(|d| {
                let mut row = vec![d.index.to_string()];
                row.extend(d.values.iter().cloned());
                row
            })
            .collect();
        let header_refs: Vec<&str> = headers.iter().map(|h| h.as_str()).collect();
        out.push_str(&render_grid(&header_refs, &dup_rows));
    }

    out.push_str("\n## Numeric summary\n");
    if result.has_numeric {
        let mut headers = vec!["Metric".to_string()];
        headers.extend(result.numeric_summary.iter().map(|s| s.column.clone()));

        let rows: Vec<Vec<String>> = NUMERIC_METRICS
            .iter()
            .map(|metric| {
                let mut row = vec![metric.to_string()];
                for summary in &result.numeric_summary {
                    row.push(match *metric {
                        "count" => format_count(summary.count),
                        "mean" => format_number(summary.mean),
                        "std" => format_number(summary.std),
                        "min" => format_number(summary.min),
                        "25%" => format_number(summary.q25),
                        "50%" => format_number(summary.median),
                        "75%" => format_number(summary.q75),
                        _ => format_number(summary.max),
                    });
                }
                row
            })
            .collect();

        let header_refs: Vec<&str> = headers.iter().map(|h| h.as_str()).collect();
        out.push_str(&render_grid(&header_refs, &rows));
    } else {
        out.push_str("No numeric columns.\n");
    }

    out.push_str(&format!(
        "\n## Preview (first {} rows)\n",
        crate::application::use_cases::profiler::PREVIEW_ROWS
    ));
    let header_refs: Vec<&str> = result.preview.columns.iter().map(|h| h.as_str()).collect();
    out.push_str(&render_grid(&header_refs, &result.preview.rows));

    out.push_str("\n## Memory usage\n");
    out.push_str(&format!(
        "- {} bytes ({})\n",
        format_count(result.memory.bytes),
        result.memory.human
    ));

    if !result.warnings.is_empty() {
        out.push_str("\n## Warnings\n");
        for warning in &result.warnings {
            out.push_str(&format!("- {}\n", warning));
        }
    }

    out
}

/// Printable form of the sniffed delimiter
fn display_delimiter(delimiter: char) -> String {
    match delimiter {
        '\t' => "\\t".to_string(),
        other => other.to_string(),
    }
}

/// Left-aligned fixed-width grid with a header row
fn render_grid(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    let render_row = |cells: Vec<&str>, widths: &[usize]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{:<width$}", c, width = widths.get(i).copied().unwrap_or(0)))
            .collect();
        let mut line = padded.join("  ");
        while line.ends_with(' ') {
            line.pop();
        }
        line
    };

    out.push_str(&render_row(headers.to_vec(), &widths));
    out.push('\n');
    for row in rows {
        let cells: Vec<&str> = row.iter().map(|c| c.as_str()).collect();
        out.push_str(&render_row(cells, &widths));
        out.push('\n');
    }

    out
}
