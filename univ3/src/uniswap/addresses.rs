use alloy::primitives::{Address, address};

pub const BASE_CHAIN_ID: u64 = 8453;
pub const BASE_SEPOLIA_CHAIN_ID: u64 = 84532;

// https://docs.uniswap.org/contracts/v3/reference/deployments/base-deployments
pub const NONFUNGIBLE_POSITION_MANAGER: Address =
    address!("0x03a520b32C04BF3bEEf7BEb72E919cf822Ed34f1");

pub const UNIVERSAL_ROUTER: Address =
    address!("0x4752ba5dbc23f44d87826276bf6fd6b1c372ad24");

pub const TENDER: Address = address!("0xD199870e61018163f1214d1790A5d49c556b812F");

pub const USDC: Address = address!("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");

pub const USDT: Address = address!("0x50c5725949A6F0c72E6C4a641F24049A917DB0Cb");
