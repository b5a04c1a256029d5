use alloy::primitives::{Address, B256, U256};

use crate::units::format_token;
use crate::writing::cc;

/// Progress events emitted by the flows. Business logic reports these and
/// leaves presentation to the [`Reporter`] implementation.
#[derive(Debug, Clone)]
pub enum Event {
    PairStarted {
        symbol_a: String,
        symbol_b: String,
        fee: u32,
    },
    BalanceChecked {
        symbol: String,
        decimals: u32,
        have: U256,
        needed: U256,
    },
    AllowanceSufficient {
        token: Address,
        spender: Address,
    },
    ApprovalConfirmed {
        token: Address,
        spender: Address,
        value: U256,
        tx: B256,
    },
    MintPlanned {
        token0: Address,
        token1: Address,
        fee: u32,
        amount0_desired: U256,
        amount1_desired: U256,
    },
    PositionMinted {
        token_id: U256,
        liquidity: u128,
        amount0: U256,
        amount1: U256,
        tx: B256,
    },
    ContractVerified {
        address: Address,
    },
    ContractAlreadyVerified {
        address: Address,
    },
    ContractVerifyFailed {
        address: Address,
        reason: String,
    },
}

pub trait Reporter: Send + Sync {
    fn report(&self, event: Event);
}

/// Prints every event as a colored console line.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, event: Event) {
        match event {
            Event::PairStarted { symbol_a, symbol_b, fee } => {
                crate::log!(cc::BOLD, "Pool {}/{} (fee {})", symbol_a, symbol_b, fee);
            }
            Event::BalanceChecked { symbol, decimals, have, needed } => {
                crate::log!(
                    cc::CYAN,
                    "{}: balance {}, required {}",
                    symbol,
                    format_token(have, decimals),
                    format_token(needed, decimals)
                );
            }
            Event::AllowanceSufficient { token, spender } => {
                crate::log!(cc::GREEN, "{} already approved for {}", token, spender);
            }
            Event::ApprovalConfirmed { token, spender, value, tx } => {
                crate::log!(
                    cc::GREEN,
                    "Approved {} of {} for {} in tx {:?}",
                    value,
                    token,
                    spender,
                    tx
                );
            }
            Event::MintPlanned { token0, token1, fee, amount0_desired, amount1_desired } => {
                crate::log!(
                    cc::YELLOW,
                    "Minting {}/{} fee {}: desired {} / {}",
                    token0,
                    token1,
                    fee,
                    amount0_desired,
                    amount1_desired
                );
            }
            Event::PositionMinted { token_id, liquidity, amount0, amount1, tx } => {
                crate::log!(
                    cc::LIGHT_GREEN,
                    "Position {} minted in tx {:?}: liquidity {}, amounts {} / {}",
                    token_id,
                    tx,
                    liquidity,
                    amount0,
                    amount1
                );
            }
            Event::ContractVerified { address } => {
                crate::log!(cc::GREEN, "Verified: {}", address);
            }
            Event::ContractAlreadyVerified { address } => {
                crate::log!(cc::CYAN, "Already verified: {}", address);
            }
            Event::ContractVerifyFailed { address, reason } => {
                crate::log!(cc::RED, "Verify failed for {}: {}", address, reason);
            }
        }
    }
}

/// Discards everything. Used by tests that only care about return values.
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _event: Event) {}
}
