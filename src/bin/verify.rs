use std::path::Path;

use anyhow::Result;
use url::Url;

use tenderops::config::{Config, load_env};
use tenderops::deployments::{deployment_file, load_record};
use tenderops::verify::{EtherscanVerifier, verify_deployment};
use univ3::report::ConsoleReporter;

#[tokio::main]
async fn main() -> Result<()> {
    load_env();
    let cfg = Config::new();

    let record = load_record(Path::new("deployments"), &cfg.network)?;
    univ3::log!("Network: {}", cfg.network);
    univ3::log!("Using deployments from: deployments/{}", deployment_file(&cfg.network));

    let verifier = EtherscanVerifier::new(
        Url::parse(&cfg.verifier_url)?,
        cfg.verifier_api_key.clone(),
        cfg.chain_id(),
    );
    let report = verify_deployment(&record, &verifier, &ConsoleReporter).await;

    let ok = report.entries.iter().filter(|(_, outcome)| outcome.is_success()).count();
    univ3::log!("Done. {}/{} contracts verified", ok, report.entries.len());
    Ok(())
}
