//! Size parsing, formatting, and measurement utilities.
//!
//! This module provides functions for parsing human-readable quota strings
//! (like "10GB" or "1GB 512MB") into byte values, formatting byte counts
//! back into human-readable strings, and measuring directory sizes on disk.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use walkdir::WalkDir;

/// One kibibyte (2^10 bytes).
const KIB: u64 = 1 << 10;

/// One mebibyte (2^20 bytes).
const MIB: u64 = 1 << 20;

/// One gibibyte (2^30 bytes).
const GIB: u64 = 1 << 30;

/// Matches one size token: a run of digits, optional whitespace, and an
/// optional unit suffix. Longer suffixes come first so `GB` is not consumed
/// as a bare `B`.
#[allow(clippy::expect_used)]
static SIZE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*(GB|MB|KB|B)?").expect("hardcoded pattern is valid")
});

/// Calculate the total size of a directory and all its contents, in bytes.
///
/// Recursively traverses the directory tree using `walkdir` and sums the
/// lengths of all files found. Directory entries themselves contribute
/// nothing. Errors for individual entries (permission denied, broken
/// symlinks, files vanishing mid-walk) are silently skipped so the function
/// always returns a total.
///
/// Returns `0` if the path does not exist or cannot be traversed at the
/// root level.
#[must_use]
pub fn directory_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}

/// Format a byte count as a human-readable string.
///
/// Thresholds are binary: values of at least 2^30 bytes are shown in GB,
/// then MB at 2^20, KB at 2^10, and plain bytes below that. Scaled values
/// carry two decimal places with a locale-invariant decimal point.
///
/// # Examples
///
/// ```
/// # use heavy_dirs::utils::format_size;
/// assert_eq!(format_size(1 << 30), "1.00 GB");
/// assert_eq!(format_size(512), "512 B");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    if bytes >= GIB {
        format!("{:.2} GB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.2} MB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.2} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Parse a human-readable quota string into bytes.
///
/// The rules, in order:
///
/// 1. Empty or whitespace-only input is a zero quota.
/// 2. A bare integer with no unit suffix is interpreted as **megabytes**
///    (`"1024"` is 1024 MB, i.e. 2^30 bytes).
/// 3. Otherwise every `<number>[unit]` token in the input is converted and
///    the results are **summed**: `"1GB 500MB"` yields their sum. A token
///    with no unit in this form counts as raw bytes — note the asymmetry
///    with rule 2, which is preserved for compatibility with existing
///    quota strings. Text between tokens is ignored.
///
/// Units are case-insensitive and binary: B = 1, KB = 2^10, MB = 2^20,
/// GB = 2^30.
///
/// # Errors
///
/// Returns an error if a non-empty input contains no recognizable size
/// token, or if a value would overflow `u64`.
///
/// # Examples
///
/// ```
/// # use heavy_dirs::utils::parse_quota;
/// # fn main() -> anyhow::Result<()> {
/// assert_eq!(parse_quota("1GB")?, 1 << 30);
/// assert_eq!(parse_quota("1024")?, 1 << 30);
/// assert_eq!(parse_quota("1GB 512MB")?, (1 << 30) + 512 * (1 << 20));
/// # Ok(())
/// # }
/// ```
pub fn parse_quota(input: &str) -> Result<u64> {
    let input = input.trim();

    if input.is_empty() {
        return Ok(0);
    }

    if let Ok(megabytes) = input.parse::<u64>() {
        return multiply_with_overflow_check(megabytes, MIB);
    }

    let mut total = 0u64;
    let mut found_token = false;

    for captures in SIZE_TOKEN.captures_iter(input) {
        found_token = true;

        let number: u64 = captures[1]
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid size value {:?}: {e}", &captures[1]))?;
        let multiplier = captures
            .get(2)
            .map_or(1, |unit| unit_multiplier(unit.as_str()));

        let bytes = multiply_with_overflow_check(number, multiplier)?;
        total = add_with_overflow_check(total, bytes)?;
    }

    if !found_token {
        anyhow::bail!("Unrecognized size string: {input:?}");
    }

    Ok(total)
}

/// Byte multiplier for a unit suffix (already matched case-insensitively).
fn unit_multiplier(unit: &str) -> u64 {
    match unit.to_ascii_uppercase().as_str() {
        "GB" => GIB,
        "MB" => MIB,
        "KB" => KIB,
        _ => 1,
    }
}

/// Multiply two values with overflow checking.
fn multiply_with_overflow_check(a: u64, b: u64) -> Result<u64> {
    a.checked_mul(b)
        .ok_or_else(|| anyhow::anyhow!("Size value overflow: {a} * {b}"))
}

/// Add two values with overflow checking.
fn add_with_overflow_check(a: u64, b: u64) -> Result<u64> {
    a.checked_add(b)
        .ok_or_else(|| anyhow::anyhow!("Size value overflow: {a} + {b}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    // ── format_size ─────────────────────────────────────────────────────

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1), "1 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1023), "1023 B");
    }

    #[test]
    fn test_format_size_kilobytes() {
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
    }

    #[test]
    fn test_format_size_megabytes() {
        assert_eq!(format_size(1 << 20), "1.00 MB");
        assert_eq!(format_size(600 * (1 << 20)), "600.00 MB");
        assert_eq!(format_size((1 << 20) + (1 << 19)), "1.50 MB");
    }

    #[test]
    fn test_format_size_gigabytes() {
        assert_eq!(format_size(1 << 30), "1.00 GB");
        assert_eq!(format_size(10 * (1 << 30)), "10.00 GB");
        assert_eq!(format_size((1 << 30) + (1 << 29)), "1.50 GB");
    }

    #[test]
    fn test_format_size_uses_dot_decimal_point() {
        let formatted = format_size(1536);
        assert!(formatted.contains('.'));
        assert!(!formatted.contains(','));
    }

    // ── parse_quota ─────────────────────────────────────────────────────

    #[test]
    fn test_parse_quota_empty_is_zero() {
        assert_eq!(parse_quota("").unwrap(), 0);
        assert_eq!(parse_quota("   ").unwrap(), 0);
        assert_eq!(parse_quota("\t\n").unwrap(), 0);
    }

    #[test]
    fn test_parse_quota_bare_integer_is_megabytes() {
        assert_eq!(parse_quota("1").unwrap(), 1 << 20);
        assert_eq!(parse_quota("1024").unwrap(), 1 << 30);
        assert_eq!(parse_quota("512").unwrap(), 512 * (1 << 20));
        assert_eq!(parse_quota(" 10 ").unwrap(), 10 * (1 << 20));
    }

    #[test]
    fn test_parse_quota_single_units() {
        assert_eq!(parse_quota("1B").unwrap(), 1);
        assert_eq!(parse_quota("1KB").unwrap(), 1 << 10);
        assert_eq!(parse_quota("1MB").unwrap(), 1 << 20);
        assert_eq!(parse_quota("1GB").unwrap(), 1 << 30);
        assert_eq!(parse_quota("100MB").unwrap(), 100 * (1 << 20));
    }

    #[test]
    fn test_parse_quota_case_insensitive() {
        assert_eq!(parse_quota("1gb").unwrap(), 1 << 30);
        assert_eq!(parse_quota("1Gb").unwrap(), 1 << 30);
        assert_eq!(parse_quota("2kb").unwrap(), 2048);
    }

    #[test]
    fn test_parse_quota_whitespace_before_unit() {
        assert_eq!(parse_quota("1 GB").unwrap(), 1 << 30);
        assert_eq!(parse_quota("512  MB").unwrap(), 512 * (1 << 20));
    }

    #[test]
    fn test_parse_quota_multiple_tokens_are_summed() {
        assert_eq!(
            parse_quota("1GB 512MB").unwrap(),
            (1 << 30) + 512 * (1 << 20)
        );
        assert_eq!(
            parse_quota("1GB 500MB 10KB").unwrap(),
            (1 << 30) + 500 * (1 << 20) + 10 * (1 << 10)
        );
    }

    #[test]
    fn test_parse_quota_unitless_token_in_multi_form_is_bytes() {
        // A bare number alongside a unit token counts as raw bytes, unlike
        // the whole-integer megabyte rule.
        assert_eq!(parse_quota("1GB 500").unwrap(), (1 << 30) + 500);
        assert_eq!(parse_quota("500 1GB").unwrap(), 500 + (1 << 30));
    }

    #[test]
    fn test_parse_quota_ignores_surrounding_text() {
        assert_eq!(parse_quota("about 1GB or so").unwrap(), 1 << 30);
        assert_eq!(parse_quota("quota=512MB;").unwrap(), 512 * (1 << 20));
    }

    #[test]
    fn test_parse_quota_no_tokens_is_error() {
        assert!(parse_quota("invalid").is_err());
        assert!(parse_quota("GB").is_err());
        assert!(parse_quota("---").is_err());
    }

    #[test]
    fn test_parse_quota_overflow_is_error() {
        assert!(parse_quota(&format!("{}GB", u64::MAX)).is_err());
        assert!(parse_quota(&format!("{}", u64::MAX)).is_err());
        assert!(parse_quota("999999999999999999999999MB").is_err());
    }

    #[test]
    fn test_parse_quota_zero_values() {
        assert_eq!(parse_quota("0").unwrap(), 0);
        assert_eq!(parse_quota("0GB").unwrap(), 0);
        assert_eq!(parse_quota("0B 0KB").unwrap(), 0);
    }

    #[test]
    fn test_format_parse_round_trip_at_thresholds() {
        assert_eq!(format_size(1 << 30), "1.00 GB");
        assert_eq!(parse_quota("1GB").unwrap(), 1 << 30);
        assert_eq!(format_size(1 << 20), "1.00 MB");
        assert_eq!(parse_quota("1MB").unwrap(), 1 << 20);
        assert_eq!(format_size(1 << 10), "1.00 KB");
        assert_eq!(parse_quota("1KB").unwrap(), 1 << 10);
    }

    // ── directory_size ──────────────────────────────────────────────────

    #[test]
    fn test_directory_size_missing_path_is_zero() {
        assert_eq!(directory_size(Path::new("/nonexistent/path/xyz")), 0);
    }

    #[test]
    fn test_directory_size_sums_nested_files() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("a.bin"), vec![0u8; 100]).unwrap();
        fs::create_dir_all(dir.path().join("sub").join("deeper")).unwrap();
        fs::write(dir.path().join("sub").join("b.bin"), vec![0u8; 200]).unwrap();
        fs::write(
            dir.path().join("sub").join("deeper").join("c.bin"),
            vec![0u8; 300],
        )
        .unwrap();

        assert_eq!(directory_size(dir.path()), 600);
    }

    #[test]
    fn test_directory_size_ignores_directory_entries() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("empty").join("also_empty")).unwrap();

        assert_eq!(directory_size(dir.path()), 0);
    }

    #[test]
    fn test_directory_size_is_idempotent() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("data"), vec![0u8; 4096]).unwrap();

        let first = directory_size(dir.path());
        let second = directory_size(dir.path());
        assert_eq!(first, second);
        assert_eq!(first, 4096);
    }
}
