use common::address_set;
use soroban_sdk::{contractclient, symbol_short, Address, Bytes, Env, Symbol};

use crate::ContractError;

pub(crate) const RECEIVING: Symbol = symbol_short!("RECEIVNG");

/// Callback implemented by contracts that accept stake forwarded with
/// `send_from_platform`. Tokens are already transferred when it runs.
#[contractclient(name = "PlatformReceiverClient")]
pub trait PlatformReceiver {
    fn on_platform_receive(env: Env, from: Address, amount: i128, msg: Bytes);
}

pub fn is_receiving_contract(env: &Env, who: &Address) -> bool {
    address_set::contains(env, &RECEIVING, who)
}

pub fn require_receiving_contract(env: &Env, who: &Address) -> Result<(), ContractError> {
    if !is_receiving_contract(env, who) {
        return Err(ContractError::NotAReceivingContract);
    }
    Ok(())
}

/// Hands `amount` and the caller's payload to `target`.
pub fn forward(env: &Env, target: &Address, from: &Address, amount: i128, msg: &Bytes) {
    PlatformReceiverClient::new(env, target).on_platform_receive(from, &amount, msg);
}
