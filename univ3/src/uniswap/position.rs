use std::time::{SystemTime, UNIX_EPOCH};

use alloy::primitives::aliases::{I24, U24};
use alloy::primitives::{Address, U256};
use alloy::providers::Provider;
use async_trait::async_trait;

use crate::error::OpsError;
use crate::uniswap::erc20::TxHash;

alloy::sol! {
    #[sol(rpc)]
    interface INonfungiblePositionManager {
        struct MintParams {
            address token0;
            address token1;
            uint24 fee;
            int24 tickLower;
            int24 tickUpper;
            uint256 amount0Desired;
            uint256 amount1Desired;
            uint256 amount0Min;
            uint256 amount1Min;
            address recipient;
            uint256 deadline;
        }

        event IncreaseLiquidity(uint256 indexed tokenId, uint128 liquidity, uint256 amount0, uint256 amount1);

        function mint(MintParams calldata params)
            payable
            returns (uint256 tokenId, uint128 liquidity, uint256 amount0, uint256 amount1);
    }
}

/// Supported pool fee tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeTier {
    Lowest,
    Low,
    Medium,
    High,
}

impl FeeTier {
    /// Fee in hundredths of a bip, as the pool contracts encode it.
    pub fn as_u32(self) -> u32 {
        match self {
            FeeTier::Lowest => 100,
            FeeTier::Low => 500,
            FeeTier::Medium => 3_000,
            FeeTier::High => 10_000,
        }
    }
}

// Full price range.
pub const TICK_LOWER_FULL_RANGE: i32 = -887_272;
pub const TICK_UPPER_FULL_RANGE: i32 = 887_272;

/// 5% tolerance between desired and minimum accepted amounts.
pub const SLIPPAGE_BPS: u32 = 500;

/// A mint request older than this must be rejected by the pool side.
pub const DEADLINE_SECS: u64 = 20 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetAmount {
    pub token: Address,
    pub amount: U256,
}

#[derive(Debug, Clone, Copy)]
pub struct PairConfig {
    pub asset_a: AssetAmount,
    pub asset_b: AssetAmount,
    pub fee: FeeTier,
    pub tick_lower: i32,
    pub tick_upper: i32,
}

impl PairConfig {
    pub fn full_range(asset_a: AssetAmount, asset_b: AssetAmount, fee: FeeTier) -> Self {
        Self {
            asset_a,
            asset_b,
            fee,
            tick_lower: TICK_LOWER_FULL_RANGE,
            tick_upper: TICK_UPPER_FULL_RANGE,
        }
    }
}

/// Pool slot assignment: the numerically lower address is token0. The pool
/// contracts mandate this order; amounts travel with their token.
pub fn order_for_pool(a: AssetAmount, b: AssetAmount) -> (AssetAmount, AssetAmount) {
    if a.token < b.token { (a, b) } else { (b, a) }
}

/// Slippage floor, rounding down.
pub fn slippage_floor(desired: U256, slippage_bps: u32) -> U256 {
    let keep = U256::from(10_000u64 - slippage_bps as u64);
    desired * keep / U256::from(10_000u64)
}

/// Absolute unix deadline `secs` from now.
pub fn deadline_after(secs: u64) -> U256 {
    U256::from(
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
            + secs,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintRequest {
    pub token0: Address,
    pub token1: Address,
    pub fee: FeeTier,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub amount0_desired: U256,
    pub amount1_desired: U256,
    pub amount0_min: U256,
    pub amount1_min: U256,
    pub recipient: Address,
    pub deadline: U256,
}

impl MintRequest {
    /// Assemble the ordered, slippage-bounded request for one pair.
    pub fn from_pair(cfg: &PairConfig, recipient: Address, deadline: U256) -> Self {
        let (slot0, slot1) = order_for_pool(cfg.asset_a, cfg.asset_b);
        Self {
            token0: slot0.token,
            token1: slot1.token,
            fee: cfg.fee,
            tick_lower: cfg.tick_lower,
            tick_upper: cfg.tick_upper,
            amount0_desired: slot0.amount,
            amount1_desired: slot1.amount,
            amount0_min: slippage_floor(slot0.amount, SLIPPAGE_BPS),
            amount1_min: slippage_floor(slot1.amount, SLIPPAGE_BPS),
            recipient,
            deadline,
        }
    }

    fn as_params(&self) -> Result<INonfungiblePositionManager::MintParams, OpsError> {
        let tick = |value: i32| {
            I24::try_from(value)
                .map_err(|e| OpsError::InvalidInput(format!("tick {value} out of range: {e}")))
        };
        Ok(INonfungiblePositionManager::MintParams {
            token0: self.token0,
            token1: self.token1,
            fee: U24::from(self.fee.as_u32()),
            tickLower: tick(self.tick_lower)?,
            tickUpper: tick(self.tick_upper)?,
            amount0Desired: self.amount0_desired,
            amount1Desired: self.amount1_desired,
            amount0Min: self.amount0_min,
            amount1Min: self.amount1_min,
            recipient: self.recipient,
            deadline: self.deadline,
        })
    }
}

/// Outcome of a confirmed mint, as reported by the position manager.
#[derive(Debug, Clone, Copy)]
pub struct MintedPosition {
    pub token_id: U256,
    pub liquidity: u128,
    pub amount0: U256,
    pub amount1: U256,
    pub tx: TxHash,
}

/// The position-manager capability the orchestrator consumes.
#[async_trait]
pub trait PositionOps: Send + Sync {
    fn address(&self) -> Address;
    /// Submits the mint at `gas_price` and waits for one confirmation.
    async fn mint(
        &self,
        request: &MintRequest,
        gas_price: u128,
    ) -> Result<MintedPosition, OpsError>;
}

#[derive(Clone)]
pub struct PositionManagerClient<P: Provider + Clone> {
    manager: Address,
    provider: P,
}

impl<P: Provider + Clone> PositionManagerClient<P> {
    pub fn new(manager: Address, provider: P) -> Self {
        Self { manager, provider }
    }
}

#[async_trait]
impl<P: Provider + Clone> PositionOps for PositionManagerClient<P> {
    fn address(&self) -> Address {
        self.manager
    }

    async fn mint(
        &self,
        request: &MintRequest,
        gas_price: u128,
    ) -> Result<MintedPosition, OpsError> {
        let manager = INonfungiblePositionManager::new(self.manager, self.provider.clone());
        let params = request.as_params()?;
        let pending = manager
            .mint(params)
            .gas_price(gas_price)
            .send()
            .await
            .map_err(|e| OpsError::Transaction(format!("mint rejected: {e}")))?;
        let tx = *pending.tx_hash();
        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| OpsError::Transaction(format!("mint {tx}: {e}")))?;
        if !receipt.status() {
            return Err(OpsError::Transaction(format!("mint reverted in tx {tx}")));
        }

        let increase = receipt
            .inner
            .logs()
            .iter()
            .filter(|l| l.address() == self.manager)
            .find_map(|l| l.log_decode::<INonfungiblePositionManager::IncreaseLiquidity>().ok())
            .ok_or_else(|| {
                OpsError::Transaction(format!("mint {tx}: no IncreaseLiquidity event in receipt"))
            })?;
        let ev = increase.inner.data;
        Ok(MintedPosition {
            token_id: ev.tokenId,
            liquidity: ev.liquidity,
            amount0: ev.amount0,
            amount1: ev.amount1,
            tx,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(byte: u8, amount: u64) -> AssetAmount {
        AssetAmount { token: Address::repeat_byte(byte), amount: U256::from(amount) }
    }

    #[test]
    fn ordering_is_deterministic_and_input_order_independent() {
        let low = asset(0x01, 10);
        let high = asset(0xfe, 20);

        let (a0, a1) = order_for_pool(low, high);
        let (b0, b1) = order_for_pool(high, low);

        assert_eq!(a0.token, low.token);
        assert_eq!(a1.token, high.token);
        assert_eq!(a0, b0);
        assert_eq!(a1, b1);
    }

    #[test]
    fn amounts_travel_with_their_token_through_ordering() {
        let low = asset(0x01, 10);
        let high = asset(0xfe, 20);

        for (x, y) in [(low, high), (high, low)] {
            let (slot0, slot1) = order_for_pool(x, y);
            assert_eq!(slot0.amount, U256::from(10u64));
            assert_eq!(slot1.amount, U256::from(20u64));
        }
    }

    #[test]
    fn slippage_floor_never_exceeds_desired() {
        for desired in [0u64, 1, 19, 20, 99, 100, 101, 45_000_000] {
            let desired = U256::from(desired);
            let min = slippage_floor(desired, SLIPPAGE_BPS);
            assert!(min <= desired);
            // never more than 5% below, and floored rather than rounded up
            assert!(desired - min <= desired * U256::from(5u64) / U256::from(100u64) + U256::from(1u64));
            assert_eq!(min, desired * U256::from(95u64) / U256::from(100u64));
        }
    }

    #[test]
    fn slippage_floor_exact_values() {
        assert_eq!(slippage_floor(U256::from(100u64), SLIPPAGE_BPS), U256::from(95u64));
        // floor(19 * 0.95) = floor(18.05) = 18
        assert_eq!(slippage_floor(U256::from(19u64), SLIPPAGE_BPS), U256::from(18u64));
        let desired = crate::units::whole_to_units(22_500_000, 18);
        assert_eq!(
            slippage_floor(desired, SLIPPAGE_BPS),
            crate::units::whole_to_units(21_375_000, 18)
        );
    }

    #[test]
    fn mint_request_assigns_amounts_to_ordered_slots() {
        let tender = asset(0xd1, 22_500_000);
        let usdc = asset(0x83, 200);
        let recipient = Address::repeat_byte(0xaa);
        let deadline = U256::from(1_700_000_000u64);

        let cfg = PairConfig::full_range(tender, usdc, FeeTier::Medium);
        let flipped = PairConfig::full_range(usdc, tender, FeeTier::Medium);

        let req = MintRequest::from_pair(&cfg, recipient, deadline);
        let req_flipped = MintRequest::from_pair(&flipped, recipient, deadline);

        assert_eq!(req, req_flipped);
        assert!(req.token0 < req.token1);
        assert_eq!(req.token0, usdc.token);
        assert_eq!(req.amount0_desired, usdc.amount);
        assert_eq!(req.amount1_desired, tender.amount);
        assert_eq!(req.amount0_min, slippage_floor(usdc.amount, SLIPPAGE_BPS));
        assert_eq!(req.amount1_min, slippage_floor(tender.amount, SLIPPAGE_BPS));
        assert_eq!(req.tick_lower, TICK_LOWER_FULL_RANGE);
        assert_eq!(req.tick_upper, TICK_UPPER_FULL_RANGE);
        assert_eq!(req.deadline, deadline);
    }

    #[test]
    fn deadline_is_twenty_minutes_out() {
        let before = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs();
        let deadline = deadline_after(DEADLINE_SECS);
        let after = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs();

        assert!(deadline >= U256::from(before + 1_200));
        assert!(deadline <= U256::from(after + 1_200));
    }

    #[test]
    fn fee_tiers_match_pool_encoding() {
        assert_eq!(FeeTier::Medium.as_u32(), 3_000);
        assert_eq!(FeeTier::Lowest.as_u32(), 100);
        assert_eq!(FeeTier::Low.as_u32(), 500);
        assert_eq!(FeeTier::High.as_u32(), 10_000);
    }
}
