//! Output formatting helpers for CLI commands

use crate::gateway::{AggregateStats, InferenceRecord};
use crate::store::{SystemSnapshot, UiPrefs};
use colored::{ColoredString, Colorize};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use std::fmt::Write;

/// Color accents for rendered views. Dark mode maps to the bright
/// variants, which read better on dark terminals.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    bright: bool,
}

impl Theme {
    pub fn from_prefs(prefs: &UiPrefs) -> Self {
        Self {
            bright: prefs.dark_mode,
        }
    }

    pub fn good(&self, text: &str) -> ColoredString {
        if self.bright {
            text.bright_green()
        } else {
            text.green()
        }
    }

    pub fn bad(&self, text: &str) -> ColoredString {
        if self.bright {
            text.bright_red()
        } else {
            text.red()
        }
    }

    pub fn warn(&self, text: &str) -> ColoredString {
        if self.bright {
            text.bright_yellow()
        } else {
            text.yellow()
        }
    }

    pub fn accent(&self, text: &str) -> ColoredString {
        if self.bright {
            text.bright_cyan()
        } else {
            text.cyan()
        }
    }
}

/// Format a latency in a human-readable way
pub fn format_latency(latency_ms: f64) -> String {
    if latency_ms < 1000.0 {
        format!("{:.1}ms", latency_ms)
    } else {
        format!("{:.2}s", latency_ms / 1000.0)
    }
}

/// Format a memory amount in a human-readable way
pub fn format_memory(memory_mb: f64) -> String {
    if memory_mb < 1024.0 {
        format!("{:.1} MB", memory_mb)
    } else {
        format!("{:.2} GB", memory_mb / 1024.0)
    }
}

pub fn format_tokens_per_second(tokens_per_second: f64) -> String {
    format!("{:.1} tokens/sec", tokens_per_second)
}

/// Trim an ISO timestamp down to something table-sized.
pub fn format_timestamp(timestamp: &str) -> String {
    let head = timestamp.get(..19).unwrap_or(timestamp);
    match chrono::NaiveDateTime::parse_from_str(head, "%Y-%m-%dT%H:%M:%S") {
        Ok(parsed) => parsed.format("%m-%d %H:%M:%S").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

/// Format the aggregate stats as a two-column table.
pub fn metrics_summary_table(summary: &AggregateStats) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Metric", "Value"]);

    table.add_row(vec![
        Cell::new("Total inferences"),
        Cell::new(summary.total_inferences),
    ]);
    table.add_row(vec![
        Cell::new("Avg latency"),
        Cell::new(format_latency(summary.avg_latency_ms)),
    ]);
    table.add_row(vec![
        Cell::new("Avg throughput"),
        Cell::new(format_tokens_per_second(summary.avg_tokens_per_second)),
    ]);
    table.add_row(vec![
        Cell::new("Avg memory"),
        Cell::new(format_memory(summary.avg_memory_mb)),
    ]);
    if let Some(last) = &summary.last_inference {
        table.add_row(vec![Cell::new("Last inference"), Cell::new(format_timestamp(last))]);
    }

    table.to_string()
}

/// Format recent inference rows, newest first.
///
/// Sorts a copy for display; the canonical sequence in the store keeps
/// the agent's order.
pub fn recent_inferences_table(records: &[InferenceRecord]) -> String {
    let mut rows: Vec<InferenceRecord> = records.to_vec();
    rows.sort_by(|a, b| b.timestamp().cmp(a.timestamp()));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Time", "Prompt", "Latency", "Tokens", "Tok/s", "Memory", "Temp",
    ]);

    for record in &rows {
        table.add_row(vec![
            Cell::new(format_timestamp(record.timestamp())),
            Cell::new(record.prompt_length()),
            Cell::new(format_latency(record.latency_ms())),
            Cell::new(record.tokens_generated()),
            Cell::new(format!("{:.1}", record.tokens_per_second())),
            Cell::new(format_memory(record.memory_mb())),
            Cell::new(
                record
                    .temperature()
                    .map(|t| format!("{:.1}", t))
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }

    table.to_string()
}

/// Render the whole snapshot as one dashboard frame.
pub fn render_dashboard(snapshot: &SystemSnapshot) -> String {
    let theme = Theme::from_prefs(&snapshot.ui_prefs);
    let mut out = String::new();

    let connection = if snapshot.connected {
        theme.good("● connected")
    } else {
        theme.bad("● disconnected")
    };
    writeln!(out, "{}  {}", "Edge Foundry".bold(), connection).unwrap();

    if let Some(error) = &snapshot.error {
        writeln!(out, "{} {}", theme.bad("!"), error.message).unwrap();
    }

    if let Some(health) = &snapshot.health {
        let model = if health.model_loaded {
            theme.good("model loaded")
        } else {
            theme.warn("no model loaded")
        };
        writeln!(out, "Agent: {} ({})", health.status, model).unwrap();
    }

    if let Some(model_info) = &snapshot.model_info {
        writeln!(
            out,
            "Model: {} [{} on {}]",
            theme.accent(&model_info.model_path),
            model_info.runtime,
            model_info.device
        )
        .unwrap();
    }

    if let Some(updated) = &snapshot.last_updated {
        writeln!(out, "Updated: {}", updated.format("%H:%M:%S")).unwrap();
    }

    if snapshot.inference.running {
        writeln!(out, "{}", theme.warn("inference running...")).unwrap();
    } else if let Some(last) = &snapshot.inference.last {
        writeln!(
            out,
            "Last inference ({:.2}s): {}",
            last.processing_time,
            truncate(&last.response, 80)
        )
        .unwrap();
    }

    if let Some(metrics) = &snapshot.metrics {
        writeln!(out).unwrap();
        writeln!(out, "{}", metrics_summary_table(&metrics.summary)).unwrap();
    }

    if !snapshot.recent_inferences.is_empty() {
        writeln!(out, "{}", recent_inferences_table(&snapshot.recent_inferences)).unwrap();
    }

    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{HealthInfo, MetricsBundle};

    fn record(timestamp: &str) -> InferenceRecord {
        InferenceRecord(
            timestamp.to_string(),
            10,
            120.5,
            32,
            26.5,
            800.0,
            Some("m.gguf".to_string()),
            Some(0.7),
            Some(64),
        )
    }

    #[test]
    fn test_format_latency() {
        assert_eq!(format_latency(153.25), "153.2ms");
        assert_eq!(format_latency(2500.0), "2.50s");
    }

    #[test]
    fn test_format_memory() {
        assert_eq!(format_memory(812.4), "812.4 MB");
        assert_eq!(format_memory(2048.0), "2.00 GB");
    }

    #[test]
    fn test_format_timestamp_fallback() {
        assert_eq!(format_timestamp("not a date"), "not a date");
        assert_eq!(format_timestamp("2024-05-01T12:30:45"), "05-01 12:30:45");
    }

    #[test]
    fn test_recent_table_sorts_copy_only() {
        let records = vec![record("2024-05-01T10:00:00"), record("2024-05-01T12:00:00")];
        let output = recent_inferences_table(&records);

        assert!(output.contains("05-01 12:00:00"));
        // canonical order untouched
        assert_eq!(records[0].timestamp(), "2024-05-01T10:00:00");
    }

    #[test]
    fn test_metrics_summary_table_formats_values() {
        let summary = AggregateStats {
            total_inferences: 7,
            avg_latency_ms: 150.0,
            avg_tokens_per_second: 20.5,
            avg_memory_mb: 1536.0,
            last_inference: Some("2024-05-01T12:00:00".to_string()),
            first_inference: None,
        };

        let output = metrics_summary_table(&summary);
        assert!(output.contains("150.0ms"));
        assert!(output.contains("1.50 GB"));
        assert!(output.contains("20.5 tokens/sec"));
    }

    #[test]
    fn test_render_dashboard_disconnected() {
        let snapshot = SystemSnapshot::default();
        let output = render_dashboard(&snapshot);
        assert!(output.contains("disconnected"));
    }

    #[test]
    fn test_render_dashboard_with_data() {
        let mut snapshot = SystemSnapshot::default();
        snapshot.connected = true;
        snapshot.health = Some(HealthInfo {
            status: "healthy".to_string(),
            model_loaded: true,
            config: serde_json::json!({}),
        });
        snapshot.metrics = Some(MetricsBundle::default());

        let output = render_dashboard(&snapshot);
        assert!(output.contains("connected"));
        assert!(output.contains("healthy"));
        assert!(output.contains("Total inferences"));
    }

    #[test]
    fn test_truncate_bounds_response() {
        assert_eq!(truncate("short", 80), "short");
        let long = "x".repeat(100);
        assert_eq!(truncate(&long, 80).chars().count(), 83);
    }
}
