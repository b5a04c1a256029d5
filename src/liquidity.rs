use alloy::primitives::{Address, U256};
use alloy::providers::Provider;

use univ3::error::OpsError;
use univ3::report::{Event, Reporter};
use univ3::uniswap::erc20::{Erc20Client, TokenOps};
use univ3::uniswap::gas::NodeGasOracle;
use univ3::uniswap::position::{MintedPosition, PositionManagerClient};
use univ3::uniswap::provision::PairProvisioner;

use crate::plan::Plan;

/// Aggregate pre-flight: every token must cover its total across all pools
/// before the first transaction of the run goes out.
pub async fn preflight(
    requirements: &[(&dyn TokenOps, U256)],
    owner: Address,
    reporter: &dyn Reporter,
) -> Result<(), OpsError> {
    for (token, needed) in requirements {
        let meta = token.metadata().await?;
        let have = token.balance_of(owner).await?;
        reporter.report(Event::BalanceChecked {
            symbol: meta.symbol.clone(),
            decimals: meta.decimals,
            have,
            needed: *needed,
        });
        if have < *needed {
            return Err(OpsError::InsufficientBalance {
                symbol: meta.symbol,
                needed: *needed,
                have,
            });
        }
    }
    Ok(())
}

/// Run the whole plan, one pool at a time. A later pool failing leaves the
/// earlier mints in place; nothing on-chain can be rolled back.
pub async fn run_plan<P: Provider + Clone>(
    plan: &Plan,
    owner: Address,
    provider: P,
    reporter: &dyn Reporter,
) -> Result<Vec<MintedPosition>, OpsError> {
    let totals = plan.required_totals();
    let clients: Vec<(Erc20Client<P>, U256)> = totals
        .iter()
        .map(|(token, needed)| (Erc20Client::new(*token, provider.clone()), *needed))
        .collect();
    let requirements: Vec<(&dyn TokenOps, U256)> = clients
        .iter()
        .map(|(client, needed)| (client as &dyn TokenOps, *needed))
        .collect();
    preflight(&requirements, owner, reporter).await?;

    let manager = PositionManagerClient::new(plan.position_manager, provider.clone());
    let gas = NodeGasOracle::new(provider.clone());

    let mut minted = Vec::with_capacity(plan.pairs.len());
    for pair in &plan.pairs {
        let token_a = Erc20Client::new(pair.asset_a.token, provider.clone());
        let token_b = Erc20Client::new(pair.asset_b.token, provider.clone());
        let provisioner = PairProvisioner {
            owner,
            token_a: &token_a,
            token_b: &token_b,
            manager: &manager,
            gas: &gas,
            reporter,
        };
        minted.push(provisioner.provision(pair).await?);
    }
    Ok(minted)
}
