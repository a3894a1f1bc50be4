//! Duration strings such as `90s`, `1m30s` or `1.5h`.
//!
//! A duration is an optional sign followed by one or more
//! `<decimal><unit>` groups. Valid units are `ns`, `us` (or `µs`),
//! `ms`, `s`, `m` and `h`. The bare string `0` needs no unit.

use std::time::Duration;

use thiserror::Error;

/// Error returned by [`parse_duration`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    /// Empty input or a group without digits.
    #[error("invalid duration \"{0}\"")]
    Invalid(String),

    /// A number without a unit.
    #[error("missing unit in duration \"{0}\"")]
    MissingUnit(String),

    /// A unit outside the supported set.
    #[error("unknown unit \"{unit}\" in duration \"{input}\"")]
    UnknownUnit {
        /// The unrecognized unit
        unit: String,
        /// The whole input
        input: String,
    },

    /// The value does not fit in 64-bit nanoseconds.
    #[error("duration \"{0}\" is too large")]
    Overflow(String),

    /// A negative, non-zero value.
    #[error("duration \"{0}\" is negative")]
    Negative(String),
}

/// Digits of a fraction beyond this count cannot change the result.
const MAX_FRACTION_DIGITS: usize = 19;

/// Parses a duration string.
///
/// # Errors
///
/// Returns [`DurationError`] if the syntax is invalid, a unit is unknown,
/// the value overflows, or the value is negative.
///
/// # Example
///
/// ```
/// use headscale2hosts::config::parse_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
/// assert_eq!(parse_duration("1.5h").unwrap(), Duration::from_secs(5400));
/// assert!(parse_duration("10").is_err());
/// ```
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(DurationError::Invalid(input.to_string()));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (nanos, remaining) = parse_group(rest, input)?;
        total = total
            .checked_add(nanos)
            .ok_or_else(|| DurationError::Overflow(input.to_string()))?;
        rest = remaining;
    }

    let nanos = u64::try_from(total).map_err(|_| DurationError::Overflow(input.to_string()))?;
    if negative && nanos > 0 {
        return Err(DurationError::Negative(input.to_string()));
    }

    Ok(Duration::from_nanos(nanos))
}

/// Parses one `<decimal><unit>` group, returning its nanoseconds and the rest.
fn parse_group<'a>(group: &'a str, input: &str) -> Result<(u128, &'a str), DurationError> {
    let (whole, rest) = split_digits(group);
    let (fraction, rest) = match rest.strip_prefix('.') {
        Some(after_dot) => split_digits(after_dot),
        None => ("", rest),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(DurationError::Invalid(input.to_string()));
    }

    let unit_len = rest
        .find(|c: char| c == '.' || c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (unit, rest) = rest.split_at(unit_len);
    let scale = match unit {
        "" => return Err(DurationError::MissingUnit(input.to_string())),
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => 60 * 1_000_000_000,
        "h" => 3_600 * 1_000_000_000,
        other => {
            return Err(DurationError::UnknownUnit {
                unit: other.to_string(),
                input: input.to_string(),
            });
        }
    };

    let overflow = || DurationError::Overflow(input.to_string());

    let whole_value: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| overflow())?
    };
    let mut nanos = whole_value.checked_mul(scale).ok_or_else(overflow)?;

    let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
    if !fraction.is_empty() {
        let numerator: u128 = fraction.parse().map_err(|_| overflow())?;
        let denominator = 10u128.pow(u32::try_from(fraction.len()).map_err(|_| overflow())?);
        nanos = nanos
            .checked_add(numerator * scale / denominator)
            .ok_or_else(overflow)?;
    }

    Ok((nanos, rest))
}

fn split_digits(s: &str) -> (&str, &str) {
    let len = s.bytes().take_while(u8::is_ascii_digit).count();
    s.split_at(len)
}
