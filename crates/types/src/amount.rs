/// Fixed-point amount type and codecs
///
/// An `Amount` is a non-negative quantity held as a u128 scaled by 10^18
/// ("attos"). The decimal codec here must match the on-chain `Amount`
/// parser digit-for-digit: the wire carries the raw u128.

use serde::{Deserialize, Serialize};

use crate::constants::{AMOUNT_DECIMALS, ATTOS_PER_UNIT};
use crate::errors::LaunchError;
use crate::LaunchResult;

// ============================================================================
// Amount
// ============================================================================

/// A non-negative token quantity in attos (10^-18 units)
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// One whole unit (10^18 attos)
    pub const ONE: Amount = Amount(ATTOS_PER_UNIT);

    pub const fn from_attos(attos: u128) -> Self {
        Amount(attos)
    }

    pub const fn to_attos(self) -> u128 {
        self.0
    }

    /// Parse a human decimal string into attos.
    ///
    /// Accepts an optional leading `+`, `_` digit separators, and at most
    /// 18 fractional digits. Negative input is rejected; an empty string
    /// parses as zero.
    pub fn from_decimal(input: &str) -> LaunchResult<Amount> {
        let raw = input.trim().replace('_', "");
        if raw.is_empty() {
            return Ok(Amount::ZERO);
        }
        if raw.starts_with('-') {
            return Err(LaunchError::invalid_amount(input, "amount cannot be negative"));
        }
        let unsigned = raw.strip_prefix('+').unwrap_or(&raw);

        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, f),
            None => (unsigned, ""),
        };
        let int_part = if int_part.is_empty() { "0" } else { int_part };

        if frac_part.len() > AMOUNT_DECIMALS as usize {
            return Err(LaunchError::invalid_amount(
                input,
                "too many fractional digits",
            ));
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(LaunchError::invalid_amount(input, "not a decimal number"));
        }

        // Equivalent to concatenating int digits with the zero-padded
        // fractional digits and parsing the result as one big integer.
        let int_value: u128 = int_part
            .parse()
            .map_err(|_| LaunchError::invalid_amount(input, "integer part too large"))?;
        let mut frac_value: u128 = 0;
        if !frac_part.is_empty() {
            frac_value = frac_part
                .parse()
                .map_err(|_| LaunchError::invalid_amount(input, "fractional part invalid"))?;
            for _ in 0..(AMOUNT_DECIMALS as usize - frac_part.len()) {
                frac_value *= 10;
            }
        }
        let attos = int_value
            .checked_mul(ATTOS_PER_UNIT)
            .and_then(|v| v.checked_add(frac_value))
            .ok_or_else(|| LaunchError::invalid_amount(input, "amount exceeds u128"))?;
        Ok(Amount(attos))
    }

    /// Render as a decimal string, stripping trailing fractional zeros.
    pub fn to_decimal(self) -> String {
        let int_part = self.0 / ATTOS_PER_UNIT;
        let frac_part = self.0 % ATTOS_PER_UNIT;
        if frac_part == 0 {
            return int_part.to_string();
        }
        let frac = format!("{:018}", frac_part);
        let frac = frac.trim_end_matches('0');
        format!("{}.{}", int_part, frac)
    }

    /// Lossy conversion to whole units, for display and price sampling only.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / ATTOS_PER_UNIT as f64
    }
}

impl std::str::FromStr for Amount {
    type Err = LaunchError;

    fn from_str(s: &str) -> LaunchResult<Amount> {
        Amount::from_decimal(s)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_decimal())
    }
}

// ============================================================================
// Externally-Sourced Amounts
// ============================================================================

/// The shapes an externally-sourced amount scalar is known to arrive in.
///
/// Query services serialize `Amount` inconsistently: as a bare string or
/// number, or as an object carrying an `attos`/`tokens`/`value` sub-field.
/// Each known shape gets its own decode path; anything else is
/// `UnparseableAmount` rather than a guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalAmount {
    /// Explicit attos sub-field: already scaled, parsed verbatim
    Attos(String),
    /// Bare integer with more than 18 digits: assumed pre-scaled.
    ///
    /// This digit-count heuristic is inherently ambiguous near the
    /// boundary; the external serializer does not document which form it
    /// emits, so we mirror the interpretation its peers use.
    ScaledInteger(String),
    /// Human decimal (or short integer) in whole units.
    ///
    /// Decoded with the strict `Amount` parser: more than 18 fractional
    /// digits is `UnparseableAmount`, where older clients silently
    /// truncated the excess. Sub-atto precision in an external value
    /// means the serializer is broken, and guessing at its intent here
    /// would let the corruption through.
    Decimal(String),
}

impl ExternalAmount {
    /// Classify a JSON value into one of the known amount shapes.
    pub fn classify(value: &serde_json::Value) -> LaunchResult<ExternalAmount> {
        use serde_json::Value;
        match value {
            Value::String(s) => Self::classify_scalar(s),
            Value::Number(n) => Self::classify_scalar(&n.to_string()),
            Value::Object(map) => {
                if let Some(attos) = map.get("attos") {
                    let text = match attos {
                        Value::String(s) => s.trim().to_string(),
                        Value::Number(n) => n.to_string(),
                        _ => return Err(LaunchError::UnparseableAmount),
                    };
                    return Ok(ExternalAmount::Attos(text));
                }
                for key in ["tokens", "value"] {
                    match map.get(key) {
                        Some(Value::String(s)) => return Self::classify_scalar(s),
                        Some(Value::Number(n)) => return Self::classify_scalar(&n.to_string()),
                        _ => {}
                    }
                }
                Err(LaunchError::UnparseableAmount)
            }
            _ => Err(LaunchError::UnparseableAmount),
        }
    }

    fn classify_scalar(raw: &str) -> LaunchResult<ExternalAmount> {
        let cleaned = raw.trim().replace('_', "");
        if cleaned.is_empty() || cleaned.starts_with('-') {
            return Err(LaunchError::UnparseableAmount);
        }
        let normalized = cleaned.strip_suffix('.').unwrap_or(&cleaned);
        let digits = normalized.strip_prefix('+').unwrap_or(normalized);
        if !digits.contains('.')
            && digits.len() > AMOUNT_DECIMALS as usize
            && digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Ok(ExternalAmount::ScaledInteger(digits.to_string()));
        }
        Ok(ExternalAmount::Decimal(digits.to_string()))
    }

    /// Decode this shape into attos.
    pub fn to_attos(&self) -> LaunchResult<u128> {
        match self {
            ExternalAmount::Attos(text) | ExternalAmount::ScaledInteger(text) => {
                text.parse().map_err(|_| LaunchError::UnparseableAmount)
            }
            ExternalAmount::Decimal(text) => Ok(Amount::from_decimal(text)
                .map_err(|_| LaunchError::UnparseableAmount)?
                .to_attos()),
        }
    }

    /// Classify and decode in one step.
    pub fn parse(value: &serde_json::Value) -> LaunchResult<u128> {
        Self::classify(value)?.to_attos()
    }
}
