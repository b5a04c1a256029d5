use alloy::primitives::{Address, U256};

use crate::error::OpsError;
use crate::report::{Event, Reporter};
use crate::uniswap::erc20::{TokenOps, ensure_allowance};
use crate::uniswap::gas::{GasOracle, buffered_gas_price};
use crate::uniswap::position::{
    DEADLINE_SECS, MintRequest, MintedPosition, PairConfig, PositionOps, deadline_after,
};

/// One liquidity-provisioning run against a single pool pair.
///
/// Balance checks come first so a doomed run never spends gas; approvals and
/// the mint are strictly sequential because they share the signer's nonce
/// sequence.
pub struct PairProvisioner<'a> {
    pub owner: Address,
    pub token_a: &'a dyn TokenOps,
    pub token_b: &'a dyn TokenOps,
    pub manager: &'a dyn PositionOps,
    pub gas: &'a dyn GasOracle,
    pub reporter: &'a dyn Reporter,
}

impl PairProvisioner<'_> {
    pub async fn provision(&self, cfg: &PairConfig) -> Result<MintedPosition, OpsError> {
        if cfg.asset_a.token != self.token_a.address()
            || cfg.asset_b.token != self.token_b.address()
        {
            return Err(OpsError::InvalidInput(
                "pair config does not match the bound token clients".into(),
            ));
        }

        let (meta_a, meta_b) = tokio::try_join!(self.token_a.metadata(), self.token_b.metadata())?;
        self.reporter.report(Event::PairStarted {
            symbol_a: meta_a.symbol.clone(),
            symbol_b: meta_b.symbol.clone(),
            fee: cfg.fee.as_u32(),
        });

        // Reads carry no ordering constraint, so both balances go out at once.
        let (have_a, have_b) = tokio::try_join!(
            self.token_a.balance_of(self.owner),
            self.token_b.balance_of(self.owner),
        )?;
        self.reporter.report(Event::BalanceChecked {
            symbol: meta_a.symbol.clone(),
            decimals: meta_a.decimals,
            have: have_a,
            needed: cfg.asset_a.amount,
        });
        self.reporter.report(Event::BalanceChecked {
            symbol: meta_b.symbol.clone(),
            decimals: meta_b.decimals,
            have: have_b,
            needed: cfg.asset_b.amount,
        });
        require_balance(&meta_a.symbol, cfg.asset_a.amount, have_a)?;
        require_balance(&meta_b.symbol, cfg.asset_b.amount, have_b)?;

        let spender = self.manager.address();
        ensure_allowance(
            self.token_a,
            self.owner,
            spender,
            cfg.asset_a.amount,
            self.gas,
            self.reporter,
        )
        .await?;
        ensure_allowance(
            self.token_b,
            self.owner,
            spender,
            cfg.asset_b.amount,
            self.gas,
            self.reporter,
        )
        .await?;

        let request = MintRequest::from_pair(cfg, self.owner, deadline_after(DEADLINE_SECS));
        self.reporter.report(Event::MintPlanned {
            token0: request.token0,
            token1: request.token1,
            fee: cfg.fee.as_u32(),
            amount0_desired: request.amount0_desired,
            amount1_desired: request.amount1_desired,
        });

        let gas_price = buffered_gas_price(self.gas.suggested_gas_price().await);
        let minted = self.manager.mint(&request, gas_price).await?;
        self.reporter.report(Event::PositionMinted {
            token_id: minted.token_id,
            liquidity: minted.liquidity,
            amount0: minted.amount0,
            amount1: minted.amount1,
            tx: minted.tx,
        });
        Ok(minted)
    }
}

fn require_balance(symbol: &str, needed: U256, have: U256) -> Result<(), OpsError> {
    if have < needed {
        return Err(OpsError::InsufficientBalance { symbol: symbol.to_string(), needed, have });
    }
    Ok(())
}
