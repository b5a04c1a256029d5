use std::fs;
use std::path::Path;

use alloy::primitives::Address;
use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// One deployed contract as recorded at deploy time. The constructor
/// arguments are kept verbatim (addresses or decimal integers, as strings)
/// because source verification needs exactly what the deployment used.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractDeployment {
    pub address: Address,
    #[serde(rename = "constructorArgs")]
    pub constructor_args: Vec<String>,
}

/// Durable per-network deployment record. Written once by the deploy
/// tooling, only ever read here.
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentRecord {
    pub network: String,
    pub token: ContractDeployment,
    pub vesting: ContractDeployment,
}

/// File holding the record for `network`; any sepolia variant selects the
/// test file.
pub fn deployment_file(network: &str) -> &'static str {
    if network.to_lowercase().contains("sepolia") {
        "base-sepolia.json"
    } else {
        "base.json"
    }
}

pub fn load_record(dir: &Path, network: &str) -> Result<DeploymentRecord> {
    let path = dir.join(deployment_file(network));
    if !path.exists() {
        bail!("deployments file not found: {}", path.display());
    }
    let raw = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    let record: DeploymentRecord =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_name_selects_the_file() {
        assert_eq!(deployment_file("base"), "base.json");
        assert_eq!(deployment_file("baseSepolia"), "base-sepolia.json");
        assert_eq!(deployment_file("BASE-SEPOLIA"), "base-sepolia.json");
        assert_eq!(deployment_file("mainnet"), "base.json");
    }

    #[test]
    fn parses_a_record() {
        let raw = r#"{
            "network": "base",
            "token": {
                "address": "0xD199870e61018163f1214d1790A5d49c556b812F",
                "constructorArgs": ["0x7c39a136540aD07f1f0DBc45dbDFAfd1E10f2f3e"]
            },
            "vesting": {
                "address": "0x2b0CAe8De2cbaB176644ACf93dF0aBb2889cd8Fc",
                "constructorArgs": [
                    "0x7c39a136540aD07f1f0DBc45dbDFAfd1E10f2f3e",
                    "1786569600",
                    "94608000"
                ]
            }
        }"#;

        let record: DeploymentRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.network, "base");
        assert_eq!(record.token.constructor_args.len(), 1);
        assert_eq!(record.vesting.constructor_args.len(), 3);
        assert_eq!(
            record.vesting.constructor_args[1], "1786569600",
            "start timestamp must survive verbatim"
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_record(Path::new("does-not-exist"), "base").unwrap_err();
        assert!(err.to_string().contains("deployments file not found"));
    }
}
