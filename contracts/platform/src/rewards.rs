//! Block-indexed reward accounting.
//!
//! Emission follows an [`ScheduleUnit`] list and is spread over stakers in
//! proportion to their weight through a single reward-per-weight accumulator.
//! An account's pending reward is derived from its weight and the debt it
//! recorded at its last checkpoint, so no operation ever walks all accounts.
//!
//! All arithmetic floors. The truncation in the accumulator means an account
//! can observe one unit less than the exact proportional share.

use common::math::mul_div_floor;
use soroban_sdk::{contracttype, symbol_short, Env, Symbol, Vec};

use crate::ContractError;

/// 100_000 == 1.0x
pub const MULTIPLIER_SCALE: u32 = 100_000;
pub const REWARD_SCALE: u128 = 1_000_000_000_000;

// ── Types ────────────────────────────────────────────────────────────────────

/// Emits `reward_per_block` for every block below `end_block` that is not
/// covered by an earlier unit.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduleUnit {
    pub end_block: u64,
    pub reward_per_block: u128,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RewardPool {
    /// Emission that accrued while nobody was staked.
    pub residue: u128,
    pub last_reward_block: u64,
    pub total_weight: u128,
    pub acc_reward_per_weight: u128,
}

// ── Storage Keys ─────────────────────────────────────────────────────────────

const POOL: Symbol = symbol_short!("RWD_POOL");
const SCHEDULE: Symbol = symbol_short!("SCHEDULE");
const RESERVE: Symbol = symbol_short!("RWD_RSRV");

// ── Pure math ────────────────────────────────────────────────────────────────

/// End blocks must be strictly increasing.
pub fn is_valid_schedule(schedule: &Vec<ScheduleUnit>) -> bool {
    let mut prev: Option<u64> = None;
    for unit in schedule.iter() {
        if let Some(p) = prev {
            if unit.end_block <= p {
                return false;
            }
        }
        prev = Some(unit.end_block);
    }
    true
}

/// Total emission for the blocks in `(from, to]`.
pub fn inflation_between(schedule: &Vec<ScheduleUnit>, from: u64, to: u64) -> Option<u128> {
    if to <= from {
        return Some(0);
    }

    let mut from = from;
    let mut amount: u128 = 0;
    for unit in schedule.iter() {
        if from >= unit.end_block {
            continue;
        }
        let until = if to > unit.end_block { unit.end_block } else { to };
        let blocks = u128::from(until - from);
        amount = amount.checked_add(blocks.checked_mul(unit.reward_per_block)?)?;
        if until == to {
            break;
        }
        from = until;
    }
    Some(amount)
}

/// Returns `pool` advanced to `block`.
///
/// Emission accrued while `total_weight == 0` is parked in `residue` and
/// handed to whoever is staked when emission next flows. Blocks without
/// emission still move the checkpoint, so a later schedule never pays for
/// them.
pub fn advance(pool: &RewardPool, schedule: &Vec<ScheduleUnit>, block: u64) -> Option<RewardPool> {
    let mut next = pool.clone();
    if block <= pool.last_reward_block {
        return Some(next);
    }
    next.last_reward_block = block;

    let emitted = inflation_between(schedule, pool.last_reward_block, block)?;
    if emitted == 0 {
        return Some(next);
    }
    if pool.total_weight == 0 {
        next.residue = pool.residue.checked_add(emitted)?;
        return Some(next);
    }

    let distributable = emitted.checked_add(pool.residue)?;
    let per_weight = mul_div_floor(distributable, REWARD_SCALE, pool.total_weight)?;
    next.acc_reward_per_weight = pool.acc_reward_per_weight.checked_add(per_weight)?;
    next.residue = 0;
    Some(next)
}

/// `staked * min(multiplier, max_multiplier) / MULTIPLIER_SCALE`.
pub fn weight(staked: i128, multiplier: u32, max_multiplier: u32) -> Option<u128> {
    let staked = u128::try_from(staked).ok()?;
    let effective = if multiplier > max_multiplier { max_multiplier } else { multiplier };
    mul_div_floor(staked, u128::from(effective), u128::from(MULTIPLIER_SCALE))
}

pub fn debt(weight: u128, acc_reward_per_weight: u128) -> Option<u128> {
    mul_div_floor(weight, acc_reward_per_weight, REWARD_SCALE)
}

pub fn pending(weight: u128, acc_reward_per_weight: u128, reward_debt: u128) -> Option<u128> {
    Some(debt(weight, acc_reward_per_weight)?.saturating_sub(reward_debt))
}

// ── Storage ──────────────────────────────────────────────────────────────────

pub fn load_pool(env: &Env) -> RewardPool {
    env.storage().instance().get(&POOL).unwrap_or_default()
}

pub fn save_pool(env: &Env, pool: &RewardPool) {
    env.storage().instance().set(&POOL, pool);
}

pub fn load_schedule(env: &Env) -> Vec<ScheduleUnit> {
    env.storage()
        .instance()
        .get(&SCHEDULE)
        .unwrap_or(Vec::new(env))
}

pub fn save_schedule(env: &Env, schedule: &Vec<ScheduleUnit>) {
    env.storage().instance().set(&SCHEDULE, schedule);
}

/// Pool advanced to `block` without persisting anything.
pub fn pool_at(env: &Env, block: u64) -> Result<RewardPool, ContractError> {
    advance(&load_pool(env), &load_schedule(env), block).ok_or(ContractError::ArithmeticOverflow)
}

pub fn reserve(env: &Env) -> i128 {
    env.storage().instance().get(&RESERVE).unwrap_or(0)
}

pub fn add_to_reserve(env: &Env, amount: i128) -> Result<i128, ContractError> {
    let next = reserve(env)
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;
    env.storage().instance().set(&RESERVE, &next);
    Ok(next)
}

/// Takes `amount` out of the reward reserve.
pub fn draw_from_reserve(env: &Env, amount: i128) -> Result<(), ContractError> {
    let current = reserve(env);
    if current < amount {
        return Err(ContractError::RewardReserveExhausted);
    }
    env.storage().instance().set(&RESERVE, &(current - amount));
    Ok(())
}
