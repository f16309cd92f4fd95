//! Admin-managed address sets stored as a single instance entry.
//!
//! The sets guarded here are short lists edited by an administrator, so a
//! linear scan over a `Vec<Address>` is cheaper than a key per member.

use soroban_sdk::{Address, Env, Symbol, Vec};

/// Returns every member of the set stored under `key`.
pub fn members(env: &Env, key: &Symbol) -> Vec<Address> {
    env.storage()
        .instance()
        .get(key)
        .unwrap_or(Vec::new(env))
}

/// Returns `true` if `who` is a member of the set stored under `key`.
pub fn contains(env: &Env, key: &Symbol, who: &Address) -> bool {
    members(env, key).iter().any(|a| a == *who)
}

/// Adds every address in `addrs` that is not yet present.
///
/// Returns the number of addresses actually added.
pub fn insert_all(env: &Env, key: &Symbol, addrs: &Vec<Address>) -> u32 {
    let mut set = members(env, key);
    let mut added = 0u32;
    for addr in addrs.iter() {
        if !set.iter().any(|a| a == addr) {
            set.push_back(addr);
            added = added.saturating_add(1);
        }
    }
    if added > 0 {
        env.storage().instance().set(key, &set);
    }
    added
}

/// Removes every address in `addrs` from the set.
///
/// Returns the number of addresses actually removed.
pub fn remove_all(env: &Env, key: &Symbol, addrs: &Vec<Address>) -> u32 {
    let set = members(env, key);
    let mut kept = Vec::new(env);
    for a in set.iter() {
        if !addrs.iter().any(|r| r == a) {
            kept.push_back(a);
        }
    }
    let removed = set.len().saturating_sub(kept.len());
    if removed > 0 {
        env.storage().instance().set(key, &kept);
    }
    removed
}
