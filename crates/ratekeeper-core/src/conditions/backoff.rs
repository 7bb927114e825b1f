//! Backoff arithmetic shared by the re-prompt conditions.

/// Number of whole days to wait before prompting again.
///
/// Without a backoff factor the base wait is used as-is. With a factor the
/// wait grows multiplicatively per recorded occurrence:
/// `base_days * factor^(times_occurred - 1)`, truncated toward zero.
/// `times_occurred` is the total count of matching actions including the
/// most recent one, so the first occurrence uses exponent 0 and waits the
/// base number of days.
pub fn wait_days(base_days: u64, backoff_factor: Option<f64>, times_occurred: u64) -> u64 {
    let factor = match backoff_factor {
        Some(factor) => factor,
        None => return base_days,
    };

    let exponent = times_occurred.saturating_sub(1);
    // The float-to-int cast saturates, so extreme factors clamp instead of
    // wrapping and a negative product clamps to zero.
    (base_days as f64 * factor.powf(exponent as f64)).floor() as u64
}
