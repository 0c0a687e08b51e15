//! Utility functions for arxshelf

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

/// Characters that are unsafe in file names on common platforms.
const INVALID_FILENAME_CHARS: &[char] = &[':', '/', '\\', '?', '%', '*', '|', '"', '<', '>'];

/// Strips characters that are unsafe in file names.
///
/// Removes path separators and shell/OS reserved characters, then trims
/// surrounding whitespace. Falls back to `"paper"` if nothing is left.
///
/// # Arguments
///
/// * `title`: Article title or other display name
///
/// # Returns
///
/// File name stem safe to join onto a directory
pub fn sanitize_filename(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !INVALID_FILENAME_CHARS.contains(c) && !c.is_control())
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        "paper".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Picks a path in `dir` that does not exist yet.
///
/// Tries `stem.ext` first, then `stem (1).ext`, `stem (2).ext` and so on.
///
/// # Arguments
///
/// * `dir`: Target directory
/// * `stem`: File name without extension
/// * `extension`: Extension without the leading dot
///
/// # Returns
///
/// First candidate path that is free
pub fn unique_path(dir: &Path, stem: &str, extension: &str) -> PathBuf {
    let mut candidate = dir.join(format!("{}.{}", stem, extension));
    let mut counter = 1;

    while candidate.exists() {
        candidate = dir.join(format!("{} ({}).{}", stem, counter, extension));
        counter += 1;
    }

    candidate
}

/// Formats a timestamp as human readable relative time
///
/// Produces strings like "5 min ago" or "2 weeks ago" relative to `now`.
/// Future timestamps are treated as "just now", which covers clock skew
/// between the feed server and the local machine.
///
/// # Arguments
///
/// * `time`: Timestamp to describe
/// * `now`: Reference point, normally `Utc::now()`
///
/// # Returns
///
/// Human readable relative time string
pub fn format_relative(time: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - time).num_seconds().max(0);
    let minutes = secs / 60;
    let hours = secs / 3600;
    let days = secs / 86400;

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{} min ago", minutes)
    } else if hours < 24 {
        format!("{} hr ago", hours)
    } else if days < 7 {
        format!("{} days ago", days)
    } else if days < 30 {
        format!("{} weeks ago", days / 7)
    } else if days < 365 {
        format!("{} months ago", days / 30)
    } else {
        format!("{} years ago", days / 365)
    }
}

/// Formats byte count as human readable file size
///
/// Converts byte count to appropriate unit (bytes, KB, MB) with two decimal
/// places for KB and MB. Uses binary prefixes.
pub fn format_file_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Shortens `text` to at most `max_chars` characters, ending with "…".
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}
