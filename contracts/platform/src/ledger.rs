use common::ttl;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::rewards::MULTIPLIER_SCALE;
use crate::unbonding::UnbondingEntry;
use crate::ContractError;

// ── Types ────────────────────────────────────────────────────────────────────

/// An account's custody position. Created on first touch, never deleted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedPosition {
    pub staked: i128,
    /// Composed booster multiplier, uncapped.
    pub multiplier: u32,
    pub weight: u128,
    pub reward_debt: u128,
    /// Block at which rewards were last crystallized or forfeited.
    pub checkpoint_height: u64,
    /// Ordered by `end_ts` ascending, at most one entry per `end_ts`.
    pub unbondings: Vec<UnbondingEntry>,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PoolTotals {
    pub total_staked: i128,
    pub total_unbonding: i128,
}

/// One recipient's share of a `batch_deposit`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deposit {
    pub to: Address,
    pub amount: i128,
}

/// Every movement of funds between the staked and unbonding buckets.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BalanceChange {
    Deposit(i128),
    Reward(i128),
    Redeem(i128),
    Send(i128),
    Claim(i128),
}

// ── Storage Keys ─────────────────────────────────────────────────────────────

const POSITION: Symbol = symbol_short!("POSITION");
const TOTALS: Symbol = symbol_short!("TOTALS");

fn position_key(account: &Address) -> (Symbol, Address) {
    (POSITION, account.clone())
}

// ── Positions ────────────────────────────────────────────────────────────────

pub fn load_position(env: &Env, account: &Address) -> StakedPosition {
    env.storage()
        .persistent()
        .get(&position_key(account))
        .unwrap_or(StakedPosition {
            staked: 0,
            multiplier: MULTIPLIER_SCALE,
            weight: 0,
            reward_debt: 0,
            checkpoint_height: 0,
            unbondings: Vec::new(env),
        })
}

pub fn save_position(env: &Env, account: &Address, position: &StakedPosition) {
    let key = position_key(account);
    env.storage().persistent().set(&key, position);
    ttl::extend_persistent(env, &key);
}

// ── Totals ───────────────────────────────────────────────────────────────────

pub fn totals(env: &Env) -> PoolTotals {
    env.storage().instance().get(&TOTALS).unwrap_or_default()
}

/// Applies one balance movement to the pool totals.
pub fn apply_change(env: &Env, change: BalanceChange) -> Result<PoolTotals, ContractError> {
    let mut t = totals(env);
    let (staked, unbonding) = match change {
        BalanceChange::Deposit(a) | BalanceChange::Reward(a) => {
            (t.total_staked.checked_add(a), Some(t.total_unbonding))
        }
        BalanceChange::Redeem(a) => (t.total_staked.checked_sub(a), t.total_unbonding.checked_add(a)),
        BalanceChange::Send(a) => (t.total_staked.checked_sub(a), Some(t.total_unbonding)),
        BalanceChange::Claim(a) => (Some(t.total_staked), t.total_unbonding.checked_sub(a)),
    };
    t.total_staked = staked.ok_or(ContractError::ArithmeticOverflow)?;
    t.total_unbonding = unbonding.ok_or(ContractError::ArithmeticOverflow)?;
    env.storage().instance().set(&TOTALS, &t);
    Ok(t)
}
