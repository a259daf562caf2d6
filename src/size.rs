//! Human-readable byte quantities for `--keep-size`.

use crate::error::{Error, Result};
use humansize::{format_size, BINARY};

/// Parse a size string with optional unit suffix
/// Supports: B, K/KB, M/MB, G/GB, T/TB, P/PB (powers of 1000)
/// and KiB, MiB, GiB, TiB, PiB (powers of 1024), case-insensitive
/// Plain numbers are bytes
/// Examples: "512", "20MiB", "1.5 GB", "100k"
pub fn parse_size(size_str: &str) -> Result<u64> {
    let invalid = |reason: &str| Error::InvalidSize {
        input: size_str.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = size_str.trim();
    if trimmed.is_empty() {
        return Err(invalid("empty size"));
    }

    // Split the numeric part from the unit
    let (num_str, unit) = match trimmed.find(|c: char| c.is_alphabetic()) {
        Some(pos) => trimmed.split_at(pos),
        None => (trimmed, ""),
    };
    let num_str = num_str.trim();

    if num_str.starts_with('-') {
        return Err(invalid("size must not be negative"));
    }

    let multiplier: u64 = match unit.to_ascii_lowercase().as_str() {
        "" | "b" => 1,
        "k" | "kb" => 1000,
        "m" | "mb" => 1000u64.pow(2),
        "g" | "gb" => 1000u64.pow(3),
        "t" | "tb" => 1000u64.pow(4),
        "p" | "pb" => 1000u64.pow(5),
        "kib" => 1 << 10,
        "mib" => 1 << 20,
        "gib" => 1 << 30,
        "tib" => 1 << 40,
        "pib" => 1 << 50,
        _ => {
            return Err(invalid(
                "unknown unit, expected B, KB, MB, GB, TB, PB or KiB, MiB, GiB, TiB, PiB",
            ))
        }
    };

    if num_str.contains('.') {
        let value: f64 = num_str
            .parse()
            .map_err(|_| invalid("expected a number"))?;
        let bytes = (value * multiplier as f64).round();
        if !bytes.is_finite() || bytes >= u64::MAX as f64 {
            return Err(invalid("size is too large"));
        }
        Ok(bytes as u64)
    } else {
        let value: u64 = num_str
            .parse()
            .map_err(|_| invalid("expected a number"))?;
        value
            .checked_mul(multiplier)
            .ok_or_else(|| invalid("size is too large"))
    }
}

/// Format a byte count the way the report prints it
pub fn display_size(bytes: u64) -> String {
    format_size(bytes, BINARY)
}
