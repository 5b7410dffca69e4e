use crate::error::{Error, Result};

/// Prefix every shot name starts with
pub const SHOT_PREFIX: &str = "SH";

/// Highest number the three-digit convention allows
pub const MAX_SHOT_NUMBER: u32 = 999;

/// Spacing between auto-numbered shots, leaving room to insert in between
pub const SHOT_NUMBER_STEP: u32 = 10;

/// Normalize a user-supplied shot name.
///
/// Trims surrounding whitespace and uppercases the whole string, then checks
/// the result against `SH` + three digits with an optional `_<alnum>` suffix
/// (`SH001`, `SH015`, `SH010_B`). Pure: nothing on disk is touched.
pub fn validate_shot_name(raw: &str) -> Result<String> {
    let name = raw.trim().to_uppercase();
    if name.is_empty() {
        return Err(invalid(raw, "name is empty"));
    }

    let rest = name
        .strip_prefix(SHOT_PREFIX)
        .ok_or_else(|| invalid(raw, "must start with SH"))?;

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits != 3 {
        return Err(invalid(raw, "expected three digits after SH"));
    }

    let suffix = &rest[digits..];
    if !suffix.is_empty() {
        let tail = suffix
            .strip_prefix('_')
            .ok_or_else(|| invalid(raw, "suffix must start with '_'"))?;
        if tail.is_empty() || !tail.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(invalid(raw, "suffix must be letters or digits"));
        }
    }

    Ok(name)
}

fn invalid(raw: &str, reason: &'static str) -> Error {
    Error::InvalidShotName {
        name: raw.to_string(),
        reason,
    }
}

/// Number of a plain `SH###` shot; `None` for suffixed names
pub fn shot_number(name: &str) -> Option<u32> {
    let digits = name.strip_prefix(SHOT_PREFIX)?;
    if digits.len() != 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

pub fn format_shot_name(number: u32) -> String {
    format!("{SHOT_PREFIX}{number:03}")
}

/// Next auto-numbered shot: the highest plain number rounded down to the
/// step, plus one step.
pub fn next_shot_number<'a>(existing: impl IntoIterator<Item = &'a str>) -> Result<u32> {
    let max = existing.into_iter().filter_map(shot_number).max().unwrap_or(0);
    let next = (max / SHOT_NUMBER_STEP + 1) * SHOT_NUMBER_STEP;
    if next > MAX_SHOT_NUMBER {
        return Err(Error::ShotLimitExceeded);
    }
    Ok(next)
}

/// Number for a shot inserted right after `after` (or at the very start).
///
/// Takes the midpoint between `after` and the following plain-numbered shot.
/// When nothing follows, one step past `after` is used.
pub fn number_after<'a>(
    existing: impl IntoIterator<Item = &'a str>,
    after: Option<&str>,
) -> Result<u32> {
    let low = match after {
        Some(name) => shot_number(name).ok_or_else(|| Error::NoShotNumberAvailable {
            after: Some(name.to_string()),
        })?,
        None => 0,
    };

    let high = existing
        .into_iter()
        .filter_map(shot_number)
        .filter(|n| *n > low)
        .min();

    let candidate = match high {
        Some(high) => {
            let mid = low + (high - low) / 2;
            if mid == low {
                return Err(Error::NoShotNumberAvailable {
                    after: after.map(str::to_string),
                });
            }
            mid
        }
        None => (low / SHOT_NUMBER_STEP + 1) * SHOT_NUMBER_STEP,
    };

    if candidate > MAX_SHOT_NUMBER {
        return Err(Error::ShotLimitExceeded);
    }
    Ok(candidate)
}
