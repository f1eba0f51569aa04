// Token lifetime parsing
// Accepts Go-style durations ("1h30m", "1.5h", "300us", "500ms") plus a "d"
// unit and a bare number of seconds.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::error::{AuthError, Result};

const NANOS_PER_SEC: u128 = 1_000_000_000;

static COMPOUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:(?:\d+(?:\.\d*)?|\.\d+)(?:ns|us|µs|μs|ms|s|m|h|d))+$")
        .expect("static regex")
});
static COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d*)(?:\.(\d*))?(ns|us|µs|μs|ms|s|m|h|d)").expect("static regex")
});

fn unit_nanos(unit: &str) -> u128 {
    match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => NANOS_PER_SEC,
        "m" => 60 * NANOS_PER_SEC,
        "h" => 3_600 * NANOS_PER_SEC,
        _ => 86_400 * NANOS_PER_SEC,
    }
}

/// Parse a token lifetime from configuration.
///
/// Fails with [`AuthError::TokenIssuance`] when the value is empty, malformed,
/// negative, overflows or resolves to zero.
pub fn parse_ttl(raw: &str) -> Result<Duration> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AuthError::token_issuance("token lifetime is empty"));
    }

    let overflow = || AuthError::token_issuance(format!("token lifetime {:?} overflows", raw));

    let ttl = if raw.bytes().all(|b| b.is_ascii_digit()) {
        let secs: u64 = raw
            .parse()
            .map_err(|e| AuthError::token_issuance(format!("token lifetime {:?}: {}", raw, e)))?;
        Duration::from_secs(secs)
    } else if COMPOUND.is_match(raw) {
        let mut total: u128 = 0;
        for cap in COMPONENT.captures_iter(raw) {
            let unit = unit_nanos(&cap[3]);

            let whole: u128 = match &cap[1] {
                "" => 0,
                digits => digits.parse().map_err(|_| overflow())?,
            };
            let mut nanos = whole.checked_mul(unit).ok_or_else(overflow)?;

            // Digits past nanosecond precision are dropped
            if let Some(frac) = cap.get(2) {
                let (mut value, mut scale) = (0u128, 1u128);
                for digit in frac.as_str().bytes().take(18) {
                    value = value * 10 + u128::from(digit - b'0');
                    scale *= 10;
                }
                nanos = nanos.checked_add(value * unit / scale).ok_or_else(overflow)?;
            }

            total = total.checked_add(nanos).ok_or_else(overflow)?;
        }

        if raw.starts_with('-') && total > 0 {
            return Err(AuthError::token_issuance("token lifetime must be positive"));
        }

        let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| overflow())?;
        // Remainder is below one second
        Duration::new(secs, (total % NANOS_PER_SEC) as u32)
    } else {
        return Err(AuthError::token_issuance(format!(
            "token lifetime {:?} is not a duration",
            raw
        )));
    };

    if ttl.is_zero() {
        return Err(AuthError::token_issuance("token lifetime must be positive"));
    }

    Ok(ttl)
}
