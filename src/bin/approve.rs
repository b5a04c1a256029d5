use std::str::FromStr;

use anyhow::Result;

use alloy::providers::{ProviderBuilder, WalletProvider};
use alloy::signers::Signer;
use alloy::signers::local::PrivateKeySigner;
use url::Url;

use tenderops::allowance::{parse_address, run_allowance};
use tenderops::config::{Config, load_env};
use univ3::report::ConsoleReporter;
use univ3::uniswap::addresses::{TENDER, UNIVERSAL_ROUTER};
use univ3::uniswap::erc20::Erc20Client;
use univ3::uniswap::gas::NodeGasOracle;

/// Grant a spending allowance on TNDR (or any token via TOKEN/SPENDER/AMOUNT
/// env overrides; AMOUNT is in whole tokens).
#[tokio::main]
async fn main() -> Result<()> {
    load_env();
    let cfg = Config::new();

    let token_addr =
        parse_address("TOKEN", &Config::get_var_t::<String>("TOKEN", TENDER.to_string()))?;
    let spender = parse_address(
        "SPENDER",
        &Config::get_var_t::<String>("SPENDER", UNIVERSAL_ROUTER.to_string()),
    )?;
    let amount = Config::get_var_t::<String>("AMOUNT", "45000000".to_string());

    let url = Url::parse(&cfg.rpc_url)?;
    let signer =
        PrivateKeySigner::from_str(&cfg.private_key())?.with_chain_id(Some(cfg.chain_id()));
    let provider = ProviderBuilder::new()
        .with_chain_id(cfg.chain_id())
        .wallet(signer)
        .connect_http(url);
    let owner = provider.wallet().default_signer().address();

    let token = Erc20Client::new(token_addr, provider.clone());
    let gas = NodeGasOracle::new(provider.clone());
    run_allowance(&token, owner, spender, &amount, &gas, &ConsoleReporter).await?;
    Ok(())
}
