use alloy::primitives::Address;

use univ3::error::OpsError;
use univ3::report::Reporter;
use univ3::uniswap::erc20::{AllowanceOutcome, TokenOps, ensure_allowance};
use univ3::uniswap::gas::GasOracle;
use univ3::units::{format_token, parse_token};
use univ3::writing::cc;

pub fn parse_address(label: &str, value: &str) -> Result<Address, OpsError> {
    value
        .parse()
        .map_err(|_| OpsError::InvalidInput(format!("{label} is not a valid address: {value}")))
}

/// Standalone allowance grant. Same allowance manager the liquidity run
/// uses, plus the before/after bookkeeping an operator wants to see.
pub async fn run_allowance(
    token: &dyn TokenOps,
    owner: Address,
    spender: Address,
    amount_whole: &str,
    gas: &dyn GasOracle,
    reporter: &dyn Reporter,
) -> Result<AllowanceOutcome, OpsError> {
    let meta = token.metadata().await?;
    let amount = parse_token(amount_whole, meta.decimals)?;

    let before = token.allowance(owner, spender).await?;
    univ3::log!(cc::CYAN, "Token: {} ({}), decimals: {}", meta.name, meta.symbol, meta.decimals);
    univ3::log!(cc::CYAN, "Owner: {}", owner);
    univ3::log!(cc::CYAN, "Spender: {}", spender);
    univ3::log!(cc::CYAN, "Allowance before: {}", format_token(before, meta.decimals));

    let outcome = ensure_allowance(token, owner, spender, amount, gas, reporter).await?;

    let after = token.allowance(owner, spender).await?;
    univ3::log!(cc::CYAN, "Allowance after: {}", format_token(after, meta.decimals));
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_parsing_flags_bad_input() {
        assert!(parse_address("SPENDER", "0x4752ba5dbc23f44d87826276bf6fd6b1c372ad24").is_ok());
        let err = parse_address("SPENDER", "not-an-address").unwrap_err();
        assert!(matches!(err, OpsError::InvalidInput(_)));
        assert!(err.to_string().contains("SPENDER"));
    }
}
