//! Unbonding entries and the global auto-claim queue.
//!
//! Withdrawals mature at the start of the current UTC day plus the configured
//! unbonding period, so every withdrawal an account makes on the same day
//! lands in one entry. Each new entry also gets a ticket at the back of a FIFO
//! queue; pool-mutating calls pop matured tickets and release those accounts'
//! funds without anyone having to claim explicitly.

use common::{math, ttl};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::ContractError;

// ── Types ────────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnbondingEntry {
    pub amount: i128,
    pub end_ts: u64,
}

/// Redeemed funds of one account as seen at query time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingRedeem {
    /// Entries still waiting for maturity.
    pub unbondings: Vec<UnbondingEntry>,
    /// Sum of matured entries, releasable right now.
    pub claimable: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimTicket {
    pub account: Address,
    pub end_ts: u64,
}

// ── Storage Keys ─────────────────────────────────────────────────────────────

const QUEUE_HEAD: Symbol = symbol_short!("CLQ_HEAD");
const QUEUE_TAIL: Symbol = symbol_short!("CLQ_TAIL");
const QUEUE_ITEM: Symbol = symbol_short!("CLAIM_Q");

fn ticket_key(index: u64) -> (Symbol, u64) {
    (QUEUE_ITEM, index)
}

// ── Entries ──────────────────────────────────────────────────────────────────

/// Maturity timestamp for a withdrawal requested at `now`.
pub fn maturity_bucket(now: u64, unbonding_period: u64) -> Result<u64, ContractError> {
    math::start_of_day(now)
        .checked_add(unbonding_period)
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Adds `amount` to the entry maturing at `end_ts`, creating it if needed.
///
/// Returns `true` when a new entry was created.
pub fn add_entry(
    entries: &mut Vec<UnbondingEntry>,
    end_ts: u64,
    amount: i128,
) -> Result<bool, ContractError> {
    let mut insert_at = entries.len();
    for i in 0..entries.len() {
        let Some(entry) = entries.get(i) else {
            break;
        };
        if entry.end_ts == end_ts {
            let merged = UnbondingEntry {
                amount: entry
                    .amount
                    .checked_add(amount)
                    .ok_or(ContractError::ArithmeticOverflow)?,
                end_ts,
            };
            entries.set(i, merged);
            return Ok(false);
        }
        if entry.end_ts > end_ts {
            insert_at = i;
            break;
        }
    }
    entries.insert(insert_at, UnbondingEntry { amount, end_ts });
    Ok(true)
}

/// Splits `entries` at `now` into the entries still pending and the sum of
/// the matured ones.
pub fn split_matured(
    env: &Env,
    entries: &Vec<UnbondingEntry>,
    now: u64,
) -> Result<(Vec<UnbondingEntry>, i128), ContractError> {
    let mut pending = Vec::new(env);
    let mut matured: i128 = 0;
    for entry in entries.iter() {
        if entry.end_ts <= now {
            matured = matured
                .checked_add(entry.amount)
                .ok_or(ContractError::ArithmeticOverflow)?;
        } else {
            pending.push_back(entry);
        }
    }
    Ok((pending, matured))
}

pub fn pending_redeem(
    env: &Env,
    entries: &Vec<UnbondingEntry>,
    now: u64,
) -> Result<PendingRedeem, ContractError> {
    let (unbondings, claimable) = split_matured(env, entries, now)?;
    Ok(PendingRedeem {
        unbondings,
        claimable,
    })
}

// ── Claim queue ──────────────────────────────────────────────────────────────

fn head(env: &Env) -> u64 {
    env.storage().instance().get(&QUEUE_HEAD).unwrap_or(0)
}

fn tail(env: &Env) -> u64 {
    env.storage().instance().get(&QUEUE_TAIL).unwrap_or(0)
}

pub fn queue_len(env: &Env) -> u32 {
    let len = tail(env).saturating_sub(head(env));
    u32::try_from(len).unwrap_or(u32::MAX)
}

pub fn push_ticket(env: &Env, ticket: &ClaimTicket) {
    let index = tail(env);
    let key = ticket_key(index);
    env.storage().persistent().set(&key, ticket);
    ttl::extend_persistent(env, &key);
    env.storage().instance().set(&QUEUE_TAIL, &(index + 1));
}

/// Pops the front ticket if it has matured by `now`.
pub fn pop_matured(env: &Env, now: u64) -> Option<ClaimTicket> {
    let index = head(env);
    if index >= tail(env) {
        return None;
    }
    let key = ticket_key(index);
    let ticket: ClaimTicket = env.storage().persistent().get(&key)?;
    if ticket.end_ts > now {
        return None;
    }
    env.storage().persistent().remove(&key);
    env.storage().instance().set(&QUEUE_HEAD, &(index + 1));
    Some(ticket)
}
