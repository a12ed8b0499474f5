//! Version token detection for artifact filenames
//!
//! A filename qualifies when its stem, after stripping the final extension,
//! contains a recognizable version number. Patterns are checked as substring
//! searches, so `Neptune_2025.1.3.exe` qualifies.

use once_cell::sync::Lazy;
use regex::Regex;

// Checked in order; the first match wins.
static VERSION_PATTERNS: Lazy<[Regex; 4]> = Lazy::new(|| {
    [
        Regex::new(r"\d+\.\d+\.\d+").expect("valid version pattern"),
        Regex::new(r"\d+\.\d+").expect("valid version pattern"),
        Regex::new(r"v\d+\.\d+\.\d+").expect("valid version pattern"),
        Regex::new(r"v\d+\.\d+").expect("valid version pattern"),
    ]
});

/// Check whether a filename contains a recognizable version token
///
/// The final extension is stripped before matching, so the extension itself
/// never supplies the dots of a version number.
pub fn has_version_token(filename: &str) -> bool {
    let stem = strip_final_extension(filename);
    VERSION_PATTERNS.iter().any(|pattern| pattern.is_match(stem))
}

/// Strip the final `.ext` segment, if any
fn strip_final_extension(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => filename,
    }
}
