use std::str::FromStr;

use anyhow::Result;

use alloy::providers::{Provider, ProviderBuilder, WalletProvider};
use alloy::signers::Signer;
use alloy::signers::local::PrivateKeySigner;
use url::Url;

use tenderops::config::{Config, load_env};
use tenderops::liquidity::run_plan;
use tenderops::plan::Plan;
use univ3::report::ConsoleReporter;
use univ3::units::format_token;
use univ3::writing::cc;

#[tokio::main]
async fn main() -> Result<()> {
    load_env();
    let cfg = Config::new();

    let url = Url::parse(&cfg.rpc_url)?;
    let signer =
        PrivateKeySigner::from_str(&cfg.private_key())?.with_chain_id(Some(cfg.chain_id()));
    let provider = ProviderBuilder::new()
        .with_chain_id(cfg.chain_id())
        .wallet(signer)
        .connect_http(url);
    let owner = provider.wallet().default_signer().address();

    univ3::log!(cc::BOLD, "Owner: {}", owner);
    let eth = provider.get_balance(owner).await?;
    univ3::log!("ETH balance: {}", format_token(eth, 18));

    let plan = Plan::base_mainnet();
    let minted = run_plan(&plan, owner, provider, &ConsoleReporter).await?;

    univ3::log!(cc::LIGHT_GREEN, "All {} pools created", minted.len());
    for position in &minted {
        univ3::log!(
            cc::LIGHT_GREEN,
            "Position {}: amounts {} / {} (tx {:?})",
            position.token_id,
            position.amount0,
            position.amount1,
            position.tx
        );
    }
    Ok(())
}
