use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use univ3::report::{Event, Reporter};

use crate::deployments::{ContractDeployment, DeploymentRecord};

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("verification service error: {0}")]
    Service(String),

    #[error("bad constructor argument `{0}`")]
    BadArg(String),
}

/// What the explorer said about one contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyStatus {
    Verified,
    AlreadyVerified,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    Verified,
    AlreadyVerified,
    Failed(String),
}

impl VerifyOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, VerifyOutcome::Failed(_))
    }
}

#[async_trait]
pub trait VerificationService: Send + Sync {
    async fn verify_source(
        &self,
        address: Address,
        constructor_args: &[String],
    ) -> Result<VerifyStatus, VerifyError>;
}

/// Explorer client speaking the Etherscan `status`/`result` envelope.
pub struct EtherscanVerifier {
    http: HttpClient,
    api_url: Url,
    api_key: String,
    chain_id: u64,
}

impl EtherscanVerifier {
    pub fn new(api_url: Url, api_key: String, chain_id: u64) -> Self {
        Self { http: HttpClient::new(), api_url, api_key, chain_id }
    }
}

/// ABI-encode constructor arguments as 32-byte words. Deployment records
/// only ever hold addresses and unsigned decimal integers.
pub fn encode_constructor_args(args: &[String]) -> Result<String, VerifyError> {
    let mut words = String::with_capacity(args.len() * 64);
    for arg in args {
        let trimmed = arg.trim();
        let word: [u8; 32] = if trimmed.len() == 42 && trimmed.starts_with("0x") {
            let addr: Address =
                trimmed.parse().map_err(|_| VerifyError::BadArg(arg.clone()))?;
            let mut w = [0u8; 32];
            w[12..].copy_from_slice(addr.as_slice());
            w
        } else {
            let value: U256 =
                trimmed.parse().map_err(|_| VerifyError::BadArg(arg.clone()))?;
            value.to_be_bytes()
        };
        words.push_str(&hex::encode(word));
    }
    Ok(words)
}

#[async_trait]
impl VerificationService for EtherscanVerifier {
    async fn verify_source(
        &self,
        address: Address,
        constructor_args: &[String],
    ) -> Result<VerifyStatus, VerifyError> {
        let encoded = encode_constructor_args(constructor_args)?;
        let form = [
            ("chainid", self.chain_id.to_string()),
            ("module", "contract".to_string()),
            ("action", "verifysourcecode".to_string()),
            ("apikey", self.api_key.clone()),
            ("contractaddress", address.to_string()),
            // field name spelled the way the API expects
            ("constructorArguements", encoded),
        ];

        let res = self.http.post(self.api_url.as_str()).form(&form).send().await?;
        let body: Value = res.json().await?;
        let status = body.get("status").and_then(|s| s.as_str()).unwrap_or_default();
        let result = body.get("result").and_then(|r| r.as_str()).unwrap_or_default();

        if result.contains("Already Verified") {
            return Ok(VerifyStatus::AlreadyVerified);
        }
        if status == "1" {
            return Ok(VerifyStatus::Verified);
        }
        Err(VerifyError::Service(if result.is_empty() {
            body.to_string()
        } else {
            result.to_string()
        }))
    }
}

#[derive(Debug)]
pub struct VerificationReport {
    pub entries: Vec<(Address, VerifyOutcome)>,
}

impl VerificationReport {
    pub fn all_ok(&self) -> bool {
        self.entries.iter().all(|(_, outcome)| outcome.is_success())
    }
}

/// Best-effort verification of every contract in the record. One contract
/// failing never blocks the rest; each gets its own reported outcome.
pub async fn verify_deployment(
    record: &DeploymentRecord,
    service: &dyn VerificationService,
    reporter: &dyn Reporter,
) -> VerificationReport {
    let mut entries = Vec::new();
    for contract in [&record.token, &record.vesting] {
        let outcome = verify_one(contract, service, reporter).await;
        entries.push((contract.address, outcome));
    }
    VerificationReport { entries }
}

async fn verify_one(
    contract: &ContractDeployment,
    service: &dyn VerificationService,
    reporter: &dyn Reporter,
) -> VerifyOutcome {
    match service.verify_source(contract.address, &contract.constructor_args).await {
        Ok(VerifyStatus::Verified) => {
            reporter.report(Event::ContractVerified { address: contract.address });
            VerifyOutcome::Verified
        }
        Ok(VerifyStatus::AlreadyVerified) => {
            reporter.report(Event::ContractAlreadyVerified { address: contract.address });
            VerifyOutcome::AlreadyVerified
        }
        Err(e) => {
            let reason = e.to_string();
            reporter.report(Event::ContractVerifyFailed {
                address: contract.address,
                reason: reason.clone(),
            });
            VerifyOutcome::Failed(reason)
        }
    }
}
