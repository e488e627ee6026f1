//! Human-readable formatting helpers for the file list.

const KB: u64 = 1024;
const MB: u64 = 1024 * 1024;

/// Format a byte count for display.
///
/// Below 1 KiB the exact count is shown (`"500 B"`); below 1 MiB the
/// value is shown in kilobytes with two decimals (`"2.00 KB"`);
/// everything larger is shown in megabytes (`"5.00 MB"`).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_file_size(bytes: u64) -> String {
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    }
}
