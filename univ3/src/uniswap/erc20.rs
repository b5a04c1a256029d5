use alloy::primitives::{Address, B256, U256};
use alloy::providers::Provider;
use async_trait::async_trait;

use crate::error::OpsError;
use crate::report::{Event, Reporter};
use crate::uniswap::gas::{GasOracle, buffered_gas_price};

pub type TxHash = B256;

alloy::sol! {
    #[sol(rpc)]
    interface IERC20 {
        function name() view returns (string);
        function symbol() view returns (string);
        function decimals() view returns (uint8);
        function balanceOf(address owner) view returns (uint256);
        function allowance(address owner, address spender) view returns (uint256);
        function approve(address spender, uint256 value) returns (bool);
    }
}

#[derive(Debug, Clone)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
}

/// The token capability set the flows consume. Implemented on-chain by
/// [`Erc20Client`] and by in-process doubles in tests.
#[async_trait]
pub trait TokenOps: Send + Sync {
    fn address(&self) -> Address;
    async fn metadata(&self) -> Result<TokenMetadata, OpsError>;
    async fn balance_of(&self, owner: Address) -> Result<U256, OpsError>;
    async fn allowance(&self, owner: Address, spender: Address) -> Result<U256, OpsError>;
    /// Submits the approval at `gas_price` and waits for one confirmation.
    async fn approve(
        &self,
        spender: Address,
        value: U256,
        gas_price: u128,
    ) -> Result<TxHash, OpsError>;
}

#[derive(Clone)]
pub struct Erc20Client<P: Provider + Clone> {
    token: Address,
    provider: P,
}

impl<P: Provider + Clone> Erc20Client<P> {
    pub fn new(token: Address, provider: P) -> Self {
        Self { token, provider }
    }

    fn instance(&self) -> IERC20::IERC20Instance<P> {
        IERC20::new(self.token, self.provider.clone())
    }
}

#[async_trait]
impl<P: Provider + Clone> TokenOps for Erc20Client<P> {
    fn address(&self) -> Address {
        self.token
    }

    async fn metadata(&self) -> Result<TokenMetadata, OpsError> {
        let erc20 = self.instance();
        // Read-only lookups, no ordering constraint between them.
        let name = erc20.name();
        let symbol = erc20.symbol();
        let decimals = erc20.decimals();
        let (name, symbol, decimals) =
            tokio::try_join!(name.call(), symbol.call(), decimals.call())?;
        Ok(TokenMetadata { name, symbol, decimals: decimals as u32 })
    }

    async fn balance_of(&self, owner: Address) -> Result<U256, OpsError> {
        Ok(self.instance().balanceOf(owner).call().await?)
    }

    async fn allowance(&self, owner: Address, spender: Address) -> Result<U256, OpsError> {
        Ok(self.instance().allowance(owner, spender).call().await?)
    }

    async fn approve(
        &self,
        spender: Address,
        value: U256,
        gas_price: u128,
    ) -> Result<TxHash, OpsError> {
        let erc20 = self.instance();
        let pending = erc20
            .approve(spender, value)
            .gas_price(gas_price)
            .send()
            .await
            .map_err(|e| OpsError::Transaction(format!("approve rejected: {e}")))?;
        let tx = *pending.tx_hash();
        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| OpsError::Transaction(format!("approve {tx}: {e}")))?;
        if !receipt.status() {
            return Err(OpsError::Transaction(format!("approve reverted in tx {tx}")));
        }
        Ok(tx)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowanceOutcome {
    AlreadySufficient,
    Approved(TxHash),
}

/// Idempotent allowance management for one (token, spender) pair.
///
/// Approves exactly `required` (never an unlimited allowance) and waits
/// for the confirmation. Calling again once satisfied issues no further
/// transaction.
pub async fn ensure_allowance(
    token: &dyn TokenOps,
    owner: Address,
    spender: Address,
    required: U256,
    gas: &dyn GasOracle,
    reporter: &dyn Reporter,
) -> Result<AllowanceOutcome, OpsError> {
    let current = token.allowance(owner, spender).await?;
    if current >= required {
        reporter.report(Event::AllowanceSufficient { token: token.address(), spender });
        return Ok(AllowanceOutcome::AlreadySufficient);
    }

    let gas_price = buffered_gas_price(gas.suggested_gas_price().await);
    let tx = token.approve(spender, required, gas_price).await?;
    reporter.report(Event::ApprovalConfirmed {
        token: token.address(),
        spender,
        value: required,
        tx,
    });
    Ok(AllowanceOutcome::Approved(tx))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::report::NullReporter;

    struct FixedGas(Option<u128>);

    #[async_trait]
    impl GasOracle for FixedGas {
        async fn suggested_gas_price(&self) -> Option<u128> {
            self.0
        }
    }

    struct FakeToken {
        address: Address,
        allowance: Mutex<U256>,
        approvals: Mutex<Vec<(Address, U256, u128)>>,
    }

    impl FakeToken {
        fn with_allowance(allowance: U256) -> Self {
            Self {
                address: Address::repeat_byte(0x11),
                allowance: Mutex::new(allowance),
                approvals: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TokenOps for FakeToken {
        fn address(&self) -> Address {
            self.address
        }

        async fn metadata(&self) -> Result<TokenMetadata, OpsError> {
            Ok(TokenMetadata { name: "Tender".into(), symbol: "TNDR".into(), decimals: 18 })
        }

        async fn balance_of(&self, _owner: Address) -> Result<U256, OpsError> {
            Ok(U256::MAX)
        }

        async fn allowance(&self, _owner: Address, _spender: Address) -> Result<U256, OpsError> {
            Ok(*self.allowance.lock().unwrap())
        }

        async fn approve(
            &self,
            spender: Address,
            value: U256,
            gas_price: u128,
        ) -> Result<TxHash, OpsError> {
            self.approvals.lock().unwrap().push((spender, value, gas_price));
            *self.allowance.lock().unwrap() = value;
            Ok(TxHash::repeat_byte(0xab))
        }
    }

    fn units(whole: u64) -> U256 {
        crate::units::whole_to_units(whole, 18)
    }

    #[tokio::test]
    async fn sufficient_allowance_is_a_no_op() {
        let token = FakeToken::with_allowance(units(22_500_000));
        let owner = Address::repeat_byte(0xaa);
        let spender = Address::repeat_byte(0xbb);

        let outcome = ensure_allowance(
            &token,
            owner,
            spender,
            units(22_500_000),
            &FixedGas(Some(1_000_000_000)),
            &NullReporter,
        )
        .await
        .unwrap();

        assert_eq!(outcome, AllowanceOutcome::AlreadySufficient);
        assert!(token.approvals.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn repeated_calls_issue_one_transaction_total() {
        let token = FakeToken::with_allowance(U256::ZERO);
        let owner = Address::repeat_byte(0xaa);
        let spender = Address::repeat_byte(0xbb);
        let required = units(22_500_000);
        let gas = FixedGas(Some(1_000_000_000));

        let first = ensure_allowance(&token, owner, spender, required, &gas, &NullReporter)
            .await
            .unwrap();
        let second = ensure_allowance(&token, owner, spender, required, &gas, &NullReporter)
            .await
            .unwrap();

        assert!(matches!(first, AllowanceOutcome::Approved(_)));
        assert_eq!(second, AllowanceOutcome::AlreadySufficient);
        assert_eq!(token.approvals.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn approves_the_exact_required_amount_at_buffered_price() {
        let token = FakeToken::with_allowance(units(1));
        let owner = Address::repeat_byte(0xaa);
        let spender = Address::repeat_byte(0xbb);
        let required = units(45_000_000);

        ensure_allowance(&token, owner, spender, required, &FixedGas(Some(100)), &NullReporter)
            .await
            .unwrap();

        let approvals = token.approvals.lock().unwrap();
        assert_eq!(approvals.as_slice(), &[(spender, required, 120u128)]);
    }

    #[tokio::test]
    async fn missing_fee_feed_uses_the_floor_price() {
        let token = FakeToken::with_allowance(U256::ZERO);
        let owner = Address::repeat_byte(0xaa);
        let spender = Address::repeat_byte(0xbb);

        ensure_allowance(&token, owner, spender, units(5), &FixedGas(None), &NullReporter)
            .await
            .unwrap();

        let approvals = token.approvals.lock().unwrap();
        assert_eq!(approvals[0].2, crate::uniswap::gas::FALLBACK_GAS_PRICE_WEI);
    }
}
