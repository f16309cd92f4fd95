use common::address_set;
use soroban_sdk::{contractclient, symbol_short, Address, Env, Symbol};

pub(crate) const SUBSCRIBERS: Symbol = symbol_short!("SUBSCRBS");

/// Implemented by contracts that mirror staked balances, e.g. governance
/// voting power.
#[contractclient(name = "StakeSubscriberClient")]
pub trait StakeSubscriber {
    fn on_stake_change(env: Env, account: Address, new_staked: i128);
}

/// Tells every subscriber about `account`'s new staked balance.
pub fn notify(env: &Env, account: &Address, new_staked: i128) {
    for sub in address_set::members(env, &SUBSCRIBERS).iter() {
        StakeSubscriberClient::new(env, &sub).on_stake_change(account, &new_staked);
    }
}
