use alloy::providers::Provider;
use async_trait::async_trait;

/// Submission price is the suggested network price plus 20%.
pub const GAS_BUFFER_NUM: u128 = 120;
pub const GAS_BUFFER_DEN: u128 = 100;

/// 1 gwei, used when the fee feed is unavailable.
pub const FALLBACK_GAS_PRICE_WEI: u128 = 1_000_000_000;

#[async_trait]
pub trait GasOracle: Send + Sync {
    /// Suggested gas price in wei, `None` when the feed is unavailable.
    async fn suggested_gas_price(&self) -> Option<u128>;
}

pub struct NodeGasOracle<P> {
    provider: P,
}

impl<P> NodeGasOracle<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<P: Provider + Clone> GasOracle for NodeGasOracle<P> {
    async fn suggested_gas_price(&self) -> Option<u128> {
        self.provider.get_gas_price().await.ok().filter(|g| *g > 0)
    }
}

pub fn buffered_gas_price(suggested: Option<u128>) -> u128 {
    match suggested {
        Some(g) if g > 0 => g * GAS_BUFFER_NUM / GAS_BUFFER_DEN,
        _ => FALLBACK_GAS_PRICE_WEI,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffers_suggested_price_by_twenty_percent() {
        assert_eq!(buffered_gas_price(Some(1_000_000_000)), 1_200_000_000);
        assert_eq!(buffered_gas_price(Some(50)), 60);
        // integer division floors
        assert_eq!(buffered_gas_price(Some(5)), 6);
        assert_eq!(buffered_gas_price(Some(1)), 1);
    }

    #[test]
    fn falls_back_to_one_gwei_without_a_feed() {
        assert_eq!(buffered_gas_price(None), FALLBACK_GAS_PRICE_WEI);
        assert_eq!(buffered_gas_price(Some(0)), FALLBACK_GAS_PRICE_WEI);
    }
}
