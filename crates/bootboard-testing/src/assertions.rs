//! Custom assertions for bootboard-specific validation.
//!
//! Provides high-level assertions on `--format json` output:
//! - Table row and total counts
//! - Table state
//! - Summary panel outcomes

use anyhow::{Context, Result};
use serde_json::Value;

/// Assert that a drawn table holds `expected` entries in total.
pub fn assert_table_total(json: &Value, expected: u64) -> Result<()> {
    let total = json["table"]["total"]
        .as_u64()
        .context("Expected 'table.total' number in JSON")?;

    if total != expected {
        anyhow::bail!("Expected {} table entries, got {}", expected, total);
    }

    Ok(())
}

/// Assert that the drawn page shows `expected` rows.
pub fn assert_row_count(json: &Value, expected: usize) -> Result<()> {
    let rows = json["table"]["rows"]
        .as_array()
        .context("Expected 'table.rows' array in JSON")?;

    if rows.len() != expected {
        anyhow::bail!("Expected {} rows, got {}", expected, rows.len());
    }

    Ok(())
}

/// Assert the table area state (`ready`, `empty`, `error`, `loading`).
pub fn assert_table_state(json: &Value, expected: &str) -> Result<()> {
    let state = json["table"]["status"]["state"]
        .as_str()
        .context("Expected 'table.status.state' string in JSON")?;

    if state != expected {
        anyhow::bail!("Expected table state '{}', got '{}'", expected, state);
    }

    Ok(())
}

/// Assert the outcome of every summary panel, in order.
pub fn assert_panel_outcomes(json: &Value, expected: &[&str]) -> Result<()> {
    let panels = json["panels"]
        .as_array()
        .context("Expected 'panels' array in JSON")?;

    let outcomes: Vec<&str> = panels
        .iter()
        .enumerate()
        .map(|(i, panel)| {
            panel["outcome"]
                .as_str()
                .with_context(|| format!("Panel {} missing outcome", i))
        })
        .collect::<Result<_>>()?;

    if outcomes != expected {
        anyhow::bail!("Expected panel outcomes {:?}, got {:?}", expected, outcomes);
    }

    Ok(())
}
