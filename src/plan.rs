use std::collections::BTreeMap;

use alloy::primitives::{Address, U256};

use univ3::uniswap::addresses::{BASE_CHAIN_ID, NONFUNGIBLE_POSITION_MANAGER, TENDER, USDC, USDT};
use univ3::uniswap::position::{AssetAmount, FeeTier, PairConfig};
use univ3::units::whole_to_units;

/// Immutable description of one liquidity run: which position manager, which
/// pools, how much of each asset. Built up front and handed to the flow so
/// tests can substitute other networks and amounts.
#[derive(Debug, Clone)]
pub struct Plan {
    pub chain_id: u64,
    pub position_manager: Address,
    pub pairs: Vec<PairConfig>,
}

impl Plan {
    /// TENDER/USDC and TENDER/USDT on Base mainnet: 22.5M TNDR plus 200
    /// quote units each, 0.3% fee, full range.
    pub fn base_mainnet() -> Self {
        let tender_side = AssetAmount { token: TENDER, amount: whole_to_units(22_500_000, 18) };
        Self {
            chain_id: BASE_CHAIN_ID,
            position_manager: NONFUNGIBLE_POSITION_MANAGER,
            pairs: vec![
                PairConfig::full_range(
                    tender_side,
                    AssetAmount { token: USDC, amount: whole_to_units(200, 6) },
                    FeeTier::Medium,
                ),
                PairConfig::full_range(
                    tender_side,
                    AssetAmount { token: USDT, amount: whole_to_units(200, 6) },
                    FeeTier::Medium,
                ),
            ],
        }
    }

    /// Total desired amount per token across all pairs, for the whole-run
    /// pre-flight balance check.
    pub fn required_totals(&self) -> BTreeMap<Address, U256> {
        let mut totals = BTreeMap::new();
        for pair in &self.pairs {
            for asset in [pair.asset_a, pair.asset_b] {
                *totals.entry(asset.token).or_insert(U256::ZERO) += asset.amount;
            }
        }
        totals
    }
}
