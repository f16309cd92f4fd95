use common::ttl;
use soroban_sdk::{symbol_short, Address, Bytes, BytesN, Env, Symbol};

use crate::ContractError;

const VIEW_KEY: Symbol = symbol_short!("VIEW_KEY");

fn key_of(account: &Address) -> (Symbol, Address) {
    (VIEW_KEY, account.clone())
}

fn digest(env: &Env, key: &Bytes) -> BytesN<32> {
    env.crypto().sha256(key).to_bytes()
}

/// Only the digest is stored.
pub fn set(env: &Env, account: &Address, key: &Bytes) {
    let storage_key = key_of(account);
    env.storage()
        .persistent()
        .set(&storage_key, &digest(env, key));
    ttl::extend_persistent(env, &storage_key);
}

pub fn require_valid(env: &Env, account: &Address, key: &Bytes) -> Result<(), ContractError> {
    let stored: Option<BytesN<32>> = env.storage().persistent().get(&key_of(account));
    match stored {
        Some(d) if d == digest(env, key) => Ok(()),
        _ => Err(ContractError::InvalidViewingKey),
    }
}
