use common::{address_set, ttl};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::rewards::MULTIPLIER_SCALE;
use crate::ContractError;

// ── Types ────────────────────────────────────────────────────────────────────

/// An external NFT locked in its contract on behalf of an account.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoosterItem {
    pub contract: Address,
    pub id: u64,
    pub multiplier: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
struct LockedBy {
    owner: Address,
    multiplier: u32,
}

// ── Storage Keys ─────────────────────────────────────────────────────────────

pub(crate) const MULTIPLIER_CONTRACTS: Symbol = symbol_short!("MULT_CTR");
const BOOSTER: Symbol = symbol_short!("BOOSTER");
const INVENTORY: Symbol = symbol_short!("INVENTRY");

fn item_key(contract: &Address, id: u64) -> (Symbol, Address, u64) {
    (BOOSTER, contract.clone(), id)
}

fn inventory_key(account: &Address) -> (Symbol, Address) {
    (INVENTORY, account.clone())
}

// ── Registry ─────────────────────────────────────────────────────────────────

pub fn require_multiplier_contract(env: &Env, contract: &Address) -> Result<(), ContractError> {
    if !address_set::contains(env, &MULTIPLIER_CONTRACTS, contract) {
        return Err(ContractError::NotAllowedToSetMultipliers);
    }
    Ok(())
}

// ── Multiplier composition ───────────────────────────────────────────────────

/// Adds the booster's excess over 1x.
pub fn compose(total: u32, multiplier: u32) -> Result<u32, ContractError> {
    let excess = multiplier
        .checked_sub(MULTIPLIER_SCALE)
        .ok_or(ContractError::InvalidMultiplier)?;
    total
        .checked_add(excess)
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Removes the booster's excess over 1x, never dropping below 1x.
pub fn decompose(total: u32, multiplier: u32) -> u32 {
    let excess = multiplier.saturating_sub(MULTIPLIER_SCALE);
    let remaining = total.saturating_sub(excess);
    if remaining < MULTIPLIER_SCALE {
        MULTIPLIER_SCALE
    } else {
        remaining
    }
}

// ── Items ────────────────────────────────────────────────────────────────────

pub fn inventory(env: &Env, account: &Address) -> Vec<BoosterItem> {
    env.storage()
        .persistent()
        .get(&inventory_key(account))
        .unwrap_or(Vec::new(env))
}

fn save_inventory(env: &Env, account: &Address, items: &Vec<BoosterItem>) {
    let key = inventory_key(account);
    env.storage().persistent().set(&key, items);
    ttl::extend_persistent(env, &key);
}

pub fn is_locked(env: &Env, contract: &Address, id: u64) -> bool {
    env.storage().persistent().has(&item_key(contract, id))
}

/// Records `item` as locked by `owner`.
pub fn record_lock(env: &Env, owner: &Address, item: &BoosterItem) {
    let key = item_key(&item.contract, item.id);
    let locked = LockedBy {
        owner: owner.clone(),
        multiplier: item.multiplier,
    };
    env.storage().persistent().set(&key, &locked);
    ttl::extend_persistent(env, &key);

    let mut items = inventory(env, owner);
    items.push_back(item.clone());
    save_inventory(env, owner, &items);
}

/// Multiplier of the item locked by `owner`, or `None` if the item is unknown.
pub fn locked_multiplier(
    env: &Env,
    owner: &Address,
    contract: &Address,
    id: u64,
) -> Result<Option<u32>, ContractError> {
    let locked: Option<LockedBy> = env.storage().persistent().get(&item_key(contract, id));
    match locked {
        None => Ok(None),
        Some(l) if l.owner != *owner => Err(ContractError::ItemNotLockedByAccount),
        Some(l) => Ok(Some(l.multiplier)),
    }
}

pub fn record_unlock(env: &Env, owner: &Address, contract: &Address, id: u64) {
    env.storage().persistent().remove(&item_key(contract, id));

    let items = inventory(env, owner);
    let mut kept = Vec::new(env);
    for item in items.iter() {
        if !(item.contract == *contract && item.id == id) {
            kept.push_back(item);
        }
    }
    save_inventory(env, owner, &kept);
}

/// Page `page` (zero-based) of `account`'s items in lock order.
pub fn page(
    env: &Env,
    account: &Address,
    page: u32,
    page_size: u32,
) -> Result<Vec<BoosterItem>, ContractError> {
    if page_size == 0 {
        return Err(ContractError::InvalidInput);
    }
    let items = inventory(env, account);
    let start = page.saturating_mul(page_size);
    if start >= items.len() {
        return Ok(Vec::new(env));
    }
    let end = start.saturating_add(page_size).min(items.len());
    Ok(items.slice(start..end))
}
