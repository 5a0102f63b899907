//! Output formatting.
//!
//! Structured modes (JSON, YAML, CSV) serialize data directly. Text mode
//! renders lists as aligned tables whose cells are read through
//! [`Seekable`], so any entity can be shown without its own formatter.

use chrono::DateTime;
use fieldops_seeker::{ActiveFilters, FacetFilterConfig, PageInfo, Seekable, SortSpec, Value};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::error::{Error, Result};
use crate::lists::Column;
use crate::quote::QuoteTotals;

/// Output format selected with `--output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputMode {
    /// Aligned plain-text table
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
    /// CSV with nested fields flattened to dotted columns
    Csv,
}

impl OutputMode {
    /// Returns true for JSON, YAML and CSV.
    pub fn is_structured(&self) -> bool {
        !matches!(self, OutputMode::Text)
    }
}

/// Serializes data in a structured mode.
pub fn serialize_structured<T: Serialize + ?Sized>(data: &T, mode: OutputMode) -> Result<String> {
    match mode {
        OutputMode::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputMode::Yaml => Ok(serde_yaml::to_string(data)?),
        OutputMode::Csv => to_csv(data),
        OutputMode::Text => Err(Error::NotStructured),
    }
}

/// Serializes data as CSV.
///
/// An array of objects becomes one row per object; nested objects are
/// flattened into `parent.child` columns. A single object becomes
/// `key,value` rows.
pub fn to_csv<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    use serde_json::Value as Json;

    let mut wtr = csv::Writer::from_writer(vec![]);
    let csv_err = |e: csv::Error| Error::Csv(e.to_string());

    match serde_json::to_value(data)? {
        Json::Array(items) => {
            let rows: Vec<Vec<(String, String)>> = items.iter().map(flatten).collect();
            let mut headers: Vec<&str> = Vec::new();
            for (key, _) in rows.iter().flatten() {
                if !headers.contains(&key.as_str()) {
                    headers.push(key);
                }
            }
            if !headers.is_empty() {
                wtr.write_record(&headers).map_err(csv_err)?;
            }
            for row in &rows {
                let record: Vec<&str> = headers
                    .iter()
                    .map(|h| {
                        row.iter()
                            .find(|(k, _)| k == h)
                            .map_or("", |(_, v)| v.as_str())
                    })
                    .collect();
                wtr.write_record(&record).map_err(csv_err)?;
            }
        }
        Json::Object(map) => {
            wtr.write_record(["key", "value"]).map_err(csv_err)?;
            for (key, value) in flatten(&Json::Object(map)) {
                wtr.write_record([key, value]).map_err(csv_err)?;
            }
        }
        scalar => {
            wtr.write_record(["value"]).map_err(csv_err)?;
            wtr.write_record([scalar_to_string(&scalar)])
                .map_err(csv_err)?;
        }
    }

    let bytes = wtr.into_inner().map_err(|e| Error::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Csv(e.to_string()))
}

/// Flattens a JSON value into `(dotted.key, text)` pairs.
fn flatten(value: &serde_json::Value) -> Vec<(String, String)> {
    fn walk(prefix: &str, value: &serde_json::Value, out: &mut Vec<(String, String)>) {
        match value {
            serde_json::Value::Object(map) => {
                for (key, child) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    walk(&path, child, out);
                }
            }
            other => {
                let key = if prefix.is_empty() { "value" } else { prefix };
                out.push((key.to_string(), scalar_to_string(other)));
            }
        }
    }

    let mut out = Vec::new();
    walk("", value, &mut out);
    out
}

fn scalar_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Text of one table cell.
pub fn cell_text(value: Value<'_>) -> String {
    match value {
        Value::String(s) => s.to_string(),
        Value::Number(n) => n.display(),
        Value::Timestamp(ts) => DateTime::from_timestamp_millis(ts.as_millis())
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        Value::Bool(true) => "yes".to_string(),
        Value::Bool(false) => "no".to_string(),
        Value::None => "-".to_string(),
    }
}

/// Truncates a string to a display width, ending in `…` when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(fill))
}

/// Renders rows as an aligned table. Headers are bold when `styled`.
pub fn render_table<T: Seekable>(rows: &[&T], columns: &[Column], styled: bool) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| truncate_to_width(&cell_text(row.field_value(c.field)), c.max_width))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(c.header.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |values: Vec<String>| -> String {
        values.join("  ").trim_end().to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(line(
        columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| {
                let header = pad(c.header, *w);
                if styled {
                    console::style(header).bold().to_string()
                } else {
                    header
                }
            })
            .collect(),
    ));
    lines.push(line(widths.iter().map(|w| "-".repeat(*w)).collect()));
    for row in &cells {
        lines.push(line(
            row.iter().zip(&widths).map(|(cell, w)| pad(cell, *w)).collect(),
        ));
    }
    lines.join("\n")
}

/// "Showing X-Y of Z" footer for a list page.
pub fn page_footer(info: &PageInfo) -> String {
    if info.total_items == 0 {
        return "No matching records".to_string();
    }
    format!(
        "Showing {}-{} of {} (page {} of {})",
        info.first_item, info.last_item, info.total_items, info.current_page, info.total_pages
    )
}

/// One page of a list, as emitted by structured output.
#[derive(Debug, Serialize)]
pub struct ListPage<'a, T> {
    pub entity: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub search: &'a str,
    #[serde(skip_serializing_if = "ActiveFilters::is_empty")]
    pub filters: &'a ActiveFilters,
    pub sort: &'a SortSpec,
    pub page: PageInfo,
    pub items: Vec<&'a T>,
}

/// Option counts of one facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetSummary {
    pub key: String,
    pub label: String,
    pub options: Vec<FacetCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetCount {
    pub value: String,
    pub label: String,
    pub count: usize,
}

impl FacetSummary {
    /// Pairs a facet's options with counts from `facet_counts`.
    pub fn new(facet: &FacetFilterConfig, counts: Vec<(String, usize)>) -> Self {
        let options = facet
            .options
            .iter()
            .zip(counts)
            .map(|(option, (value, count))| FacetCount {
                value,
                label: option.label.clone(),
                count,
            })
            .collect();
        FacetSummary {
            key: facet.key.clone(),
            label: facet.label.clone(),
            options,
        }
    }
}

/// Text listing of facets and their option counts.
pub fn render_facets(facets: &[FacetSummary]) -> String {
    let mut out = Vec::new();
    for facet in facets {
        out.push(format!("{} ({})", facet.label, facet.key));
        let width = facet
            .options
            .iter()
            .map(|o| o.label.width())
            .max()
            .unwrap_or(0);
        for option in &facet.options {
            out.push(format!(
                "  {}  {:>4}  {}",
                pad(&option.label, width),
                option.count,
                option.value
            ));
        }
    }
    out.join("\n")
}

/// Text rendering of quote totals.
pub fn render_totals(totals: &QuoteTotals) -> String {
    let discount = if totals.discount_amount == 0.0 {
        0.0
    } else {
        -totals.discount_amount
    };
    let rows = [
        ("Subtotal", totals.subtotal),
        ("Discount", discount),
        ("Tax", totals.tax_amount),
        ("Total", totals.total),
    ];
    rows.iter()
        .map(|(label, amount)| format!("{label:<10}{amount:>12.2}"))
        .collect::<Vec<_>>()
        .join("\n")
}
