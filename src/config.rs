use {
    dotenv::dotenv,
    serde::{Deserialize, Serialize},
    std::{fmt::Debug, str::FromStr},
};

use univ3::uniswap::addresses::{BASE_CHAIN_ID, BASE_SEPOLIA_CHAIN_ID};

pub fn load_env() {
    dotenv().ok();
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub rpc_url: String,
    pub network: String,
    pub verifier_url: String,
    pub verifier_api_key: String,
}

impl Config {
    pub fn new() -> Self {
        Self {
            rpc_url: std::env::var("RPC_URL")
                .unwrap_or_else(|_| "https://mainnet.base.org".to_string()),
            network: std::env::var("NETWORK").unwrap_or_else(|_| "base".to_string()),
            verifier_url: std::env::var("VERIFIER_URL")
                .unwrap_or_else(|_| "https://api.etherscan.io/v2/api".to_string()),
            verifier_api_key: std::env::var("VERIFIER_API_KEY").unwrap_or_default(),
        }
    }

    /// Signing key; only the transaction-bearing flows ask for it.
    pub fn private_key(&self) -> String {
        std::env::var("PRIVATE_KEY").expect("config.rs: PRIVATE_KEY is not set")
    }

    pub fn chain_id(&self) -> u64 {
        if self.network.to_lowercase().contains("sepolia") {
            BASE_SEPOLIA_CHAIN_ID
        } else {
            BASE_CHAIN_ID
        }
    }

    /// Parse env var to T; fall back to typed default.
    pub fn get_var_t<T>(key: &str, default: T) -> T
    where
        T: FromStr,
        <T as FromStr>::Err: Debug,
    {
        std::env::var(key)
            .ok()
            .and_then(|s| s.parse::<T>().ok())
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_id_follows_the_network_name() {
        let mut cfg = Config {
            rpc_url: String::new(),
            network: "base".to_string(),
            verifier_url: String::new(),
            verifier_api_key: String::new(),
        };
        assert_eq!(cfg.chain_id(), BASE_CHAIN_ID);

        cfg.network = "baseSepolia".to_string();
        assert_eq!(cfg.chain_id(), BASE_SEPOLIA_CHAIN_ID);
    }
}
