//! Human-readable byte size formatting
//!
//! Storage-usage columns in share audit lines use 1024-based units with one
//! decimal place and no space before the suffix ("476.8MB").

/// Unit suffixes, 1024-based.
///
/// A `u64` byte count tops out in the EB range; the larger suffixes are kept
/// so the ladder stays complete, but they are unreachable in practice.
const UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Format a byte count as a compact human-readable size.
///
/// Zero formats as `"0B"`. Otherwise the largest unit whose mantissa is at
/// least 1 is selected and the scaled value is printed with one decimal
/// place.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0B".to_string();
    }

    let index = (bytes.ilog(1024) as usize).min(UNITS.len() - 1);
    let scaled = bytes as f64 / 1024f64.powi(index as i32);
    format!("{:.1}{}", scaled, UNITS[index])
}
