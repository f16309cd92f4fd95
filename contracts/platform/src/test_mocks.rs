//! Stand-ins for the contracts the platform talks to.

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Bytes, Env, Symbol};

use crate::PlatformContractClient;

const LAST_FROM: Symbol = symbol_short!("LAST_FROM");
const LAST_AMT: Symbol = symbol_short!("LAST_AMT");
const LAST_MSG: Symbol = symbol_short!("LAST_MSG");
const CALLS: Symbol = symbol_short!("CALLS");

// ── Receiving contract ───────────────────────────────────────────────────────

#[contract]
pub struct MockReceiver;

#[contractimpl]
impl MockReceiver {
    pub fn on_platform_receive(env: Env, from: Address, amount: i128, msg: Bytes) {
        env.storage().instance().set(&LAST_FROM, &from);
        env.storage().instance().set(&LAST_AMT, &amount);
        env.storage().instance().set(&LAST_MSG, &msg);
    }

    pub fn last(env: Env) -> Option<(Address, i128, Bytes)> {
        let from: Address = env.storage().instance().get(&LAST_FROM)?;
        let amount: i128 = env.storage().instance().get(&LAST_AMT)?;
        let msg: Bytes = env.storage().instance().get(&LAST_MSG)?;
        Some((from, amount, msg))
    }
}

// ── Stake subscriber ─────────────────────────────────────────────────────────

#[contract]
pub struct MockSubscriber;

#[contractimpl]
impl MockSubscriber {
    pub fn on_stake_change(env: Env, account: Address, new_staked: i128) {
        env.storage().instance().set(&account, &new_staked);
        let calls: u32 = env.storage().instance().get(&CALLS).unwrap_or(0);
        env.storage().instance().set(&CALLS, &(calls + 1));
    }

    pub fn staked_of(env: Env, account: Address) -> Option<i128> {
        env.storage().instance().get(&account)
    }

    pub fn calls(env: Env) -> u32 {
        env.storage().instance().get(&CALLS).unwrap_or(0)
    }
}

// ── Booster NFT ──────────────────────────────────────────────────────────────

/// Locks and unlocks items and notifies the platform, the way a booster
/// collection would.
#[contract]
pub struct MockBoosterNft;

#[contractimpl]
impl MockBoosterNft {
    pub fn lock_nft(env: Env, platform: Address, owner: Address, item_id: u64, multiplier: u32) -> bool {
        PlatformContractClient::new(&env, &platform).on_lock(
            &env.current_contract_address(),
            &owner,
            &item_id,
            &multiplier,
        )
    }

    pub fn unlock_nft(env: Env, platform: Address, owner: Address, item_id: u64) -> bool {
        PlatformContractClient::new(&env, &platform).on_unlock(
            &env.current_contract_address(),
            &owner,
            &item_id,
        )
    }
}
