use bootboard_types::Timestamp;

/// Calendar date of a wrapped timestamp as `YYYY-MM-DD` (UTC).
pub fn format_iso_date(ts: Timestamp) -> Option<String> {
    ts.to_datetime()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
}
