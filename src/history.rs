use crate::errors::RenderError;
use crate::format::{format_count, format_timestamp, parse_timestamp};
use crate::markup::Markup;
use crate::models::{HistoryEntry, HistoryResponse, HistoryRow};
use chrono::FixedOffset;
use serde_json::Value;

pub const EM_DASH: &str = "—";

/// Reads the single-metric document. `None` means "no data yet": the
/// payload is not an array or the array is empty.
pub fn entries_from_value(value: &Value) -> Option<Vec<HistoryEntry>> {
    let items = value.as_array()?;
    if items.is_empty() {
        return None;
    }
    Some(items.iter().map(HistoryEntry::from_value).collect())
}

/// Stable ascending sort by parsed timestamp; unparseable timestamps first.
pub fn sort_entries(entries: &mut [HistoryEntry]) {
    entries.sort_by_key(|entry| entry.timestamp.as_deref().and_then(parse_timestamp));
}

pub fn delta_display(delta: i64) -> String {
    if delta > 0 {
        format!("+{}", format_count(delta))
    } else {
        EM_DASH.to_string()
    }
}

pub fn build_history(
    mut entries: Vec<HistoryEntry>,
    offset: FixedOffset,
) -> Result<HistoryResponse, RenderError> {
    sort_entries(&mut entries);
    let latest = entries
        .last()
        .ok_or_else(|| RenderError::shape("history is empty"))?;
    let latest_count = require_count(latest)?;

    let mut rows = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate().rev() {
        let count = require_count(entry)?;
        let delta = match index.checked_sub(1).and_then(|prev| entries[prev].download_count) {
            Some(previous) => count.saturating_sub(previous),
            None => 0,
        };

        rows.push(HistoryRow {
            label: entries.len() - index,
            timestamp: format_timestamp(entry.timestamp.as_deref(), offset),
            download_count: format_count(count),
            delta,
            delta_display: delta_display(delta),
        });
    }

    Ok(HistoryResponse {
        current_count: format_count(latest_count),
        last_updated: format!(
            "Last updated: {}",
            format_timestamp(latest.timestamp.as_deref(), offset)
        ),
        rows,
    })
}

pub fn render_rows(rows: &[HistoryRow]) -> Markup {
    rows.iter()
        .map(|row| {
            Markup::element("tr")
                .child(Markup::element("td").text(&row.label.to_string()))
                .child(Markup::element("td").text(&row.timestamp))
                .child(Markup::element("td").text(&row.download_count))
                .child(Markup::element("td").text(&row.delta_display))
                .build()
        })
        .collect()
}

/// A single full-width row used for the empty and error states.
pub fn placeholder_row(message: &str) -> Markup {
    Markup::element("tr")
        .child(
            Markup::element("td")
                .attr("colspan", "4")
                .attr("style", "text-align:center;")
                .text(message),
        )
        .build()
}

fn require_count(entry: &HistoryEntry) -> Result<i64, RenderError> {
    entry.download_count.ok_or_else(|| {
        RenderError::shape(format!(
            "entry at {} has no numeric downloadCount",
            entry.timestamp.as_deref().unwrap_or("<no timestamp>")
        ))
    })
}
