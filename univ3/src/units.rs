use alloy::primitives::U256;

use crate::error::OpsError;

/// Scale a whole-token count into smallest units.
pub fn whole_to_units(whole: u64, decimals: u32) -> U256 {
    U256::from(whole) * U256::from(10u64).pow(U256::from(decimals))
}

pub fn format_token(amount: U256, decimals: u32) -> String {
    let base = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / base;
    let frac = amount % base;
    if frac.is_zero() {
        return format!("{whole}");
    }
    let mut frac_str = format!("{:0width$}", frac, width = decimals as usize);
    while frac_str.ends_with('0') {
        frac_str.pop();
    }
    format!("{whole}.{frac_str}")
}

/// Exact parse of a human amount ("45000000", "1.5") into smallest units.
/// More fractional digits than the token carries is an error, never rounded.
pub fn parse_token(s: &str, decimals: u32) -> Result<U256, OpsError> {
    let s = s.trim();
    let (whole_part, frac_part) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if whole_part.is_empty() && frac_part.is_empty() {
        return Err(OpsError::InvalidInput(format!("`{s}` is not a token amount")));
    }
    if frac_part.len() as u32 > decimals {
        return Err(OpsError::InvalidInput(format!(
            "`{s}` has more than {decimals} fractional digits"
        )));
    }

    let digits = |part: &str| -> Result<U256, OpsError> {
        if part.is_empty() {
            return Ok(U256::ZERO);
        }
        if !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OpsError::InvalidInput(format!("`{s}` is not a token amount")));
        }
        part.parse::<U256>()
            .map_err(|_| OpsError::InvalidInput(format!("`{s}` is not a token amount")))
    };

    let whole = digits(whole_part)?;
    let frac = digits(frac_part)?;
    let scale = U256::from(10u64).pow(U256::from(decimals));
    let frac_scale = U256::from(10u64).pow(U256::from(decimals - frac_part.len() as u32));
    Ok(whole * scale + frac * frac_scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_amounts() {
        assert_eq!(
            parse_token("45000000", 18).unwrap(),
            whole_to_units(45_000_000, 18)
        );
        assert_eq!(parse_token("200", 6).unwrap(), U256::from(200_000_000u64));
        assert_eq!(parse_token("0", 18).unwrap(), U256::ZERO);
    }

    #[test]
    fn parses_fractional_amounts_exactly() {
        assert_eq!(
            parse_token("1.5", 18).unwrap(),
            U256::from(1_500_000_000_000_000_000u128)
        );
        assert_eq!(parse_token("0.000001", 6).unwrap(), U256::from(1u64));
        assert_eq!(parse_token(".5", 6).unwrap(), U256::from(500_000u64));
    }

    #[test]
    fn rejects_garbage_and_excess_precision() {
        assert!(parse_token("", 18).is_err());
        assert!(parse_token(".", 18).is_err());
        assert!(parse_token("12a", 18).is_err());
        assert!(parse_token("-5", 18).is_err());
        // 7 fractional digits on a 6-decimal token must not be rounded away
        assert!(parse_token("0.0000001", 6).is_err());
    }

    #[test]
    fn formats_without_trailing_zeros() {
        assert_eq!(format_token(whole_to_units(22_500_000, 18), 18), "22500000");
        assert_eq!(format_token(U256::from(1_500_000u64), 6), "1.5");
        assert_eq!(format_token(U256::from(1u64), 6), "0.000001");
        assert_eq!(format_token(U256::ZERO, 18), "0");
    }

    #[test]
    fn parse_and_format_are_inverse_on_whole_tokens() {
        let raw = parse_token("22500000", 18).unwrap();
        assert_eq!(format_token(raw, 18), "22500000");
    }
}
