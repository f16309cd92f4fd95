#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

use crate::features::Feature;
use crate::rewards::ScheduleUnit;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub token: Address,
    pub unbonding_period: u64,
    pub max_multiplier: u32,
    pub auto_claim_fee: i128,
    pub timestamp: u64,
}

/// Fired when tokens are deposited as stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositedEvent {
    pub from: Address,
    pub to: Address,
    pub amount: i128,
    pub new_staked: i128,
    pub timestamp: u64,
}

/// Fired when stake enters unbonding.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RedeemedEvent {
    pub account: Address,
    pub amount: i128,
    pub end_ts: u64,
    pub emergency: bool,
    pub timestamp: u64,
}

/// Fired when matured unbondings are paid out, explicitly or by the
/// auto-claim batch.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimedEvent {
    pub account: Address,
    pub amount: i128,
    pub fee: i128,
    pub fee_recipient: Option<Address>,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SentFromPlatformEvent {
    pub account: Address,
    pub target: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when accrued rewards are folded into an account's stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsCrystallizedEvent {
    pub account: Address,
    pub amount: i128,
    pub height: u64,
    pub timestamp: u64,
}

/// Fired when an emergency redeem gives up accrued rewards.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsForfeitedEvent {
    pub account: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsFundedEvent {
    pub from: Address,
    pub amount: i128,
    pub new_reserve: i128,
    pub timestamp: u64,
}

/// Fired on lock and unlock notifications that changed a multiplier.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoosterEvent {
    pub account: Address,
    pub contract: Address,
    pub item_id: u64,
    pub multiplier: u32,
    pub effective_multiplier: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeaturesToggledEvent {
    pub caller: Address,
    pub features: Vec<Feature>,
    pub timestamp: u64,
}

/// Fired when one of the admin-managed address lists changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddressListEvent {
    pub admin: Address,
    pub addresses: Vec<Address>,
    pub changed: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigChangedEvent {
    pub unbonding_period: u64,
    pub auto_claim_fee: i128,
    pub max_auto_claims: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduleChangedEvent {
    pub schedule: Vec<ScheduleUnit>,
    pub effective_from: u64,
    pub timestamp: u64,
}

/// Fired when an admin transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferProposedEvent {
    pub current_admin: Address,
    pub proposed_admin: Address,
    pub timestamp: u64,
}

/// Fired when an admin transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferAcceptedEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

/// Fired when a pending admin transfer is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferCancelledEvent {
    pub admin: Address,
    pub cancelled_admin: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    token: Address,
    unbonding_period: u64,
    max_multiplier: u32,
    auto_claim_fee: i128,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            token,
            unbonding_period,
            max_multiplier,
            auto_claim_fee,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposited(env: &Env, from: Address, to: Address, amount: i128, new_staked: i128) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), to.clone()),
        DepositedEvent {
            from,
            to,
            amount,
            new_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_redeemed(env: &Env, account: Address, amount: i128, end_ts: u64, emergency: bool) {
    env.events().publish(
        (symbol_short!("REDEEM"), account.clone()),
        RedeemedEvent {
            account,
            amount,
            end_ts,
            emergency,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_claimed(
    env: &Env,
    account: Address,
    amount: i128,
    fee: i128,
    fee_recipient: Option<Address>,
) {
    let topic = if fee_recipient.is_some() {
        symbol_short!("AUTO_CLM")
    } else {
        symbol_short!("CLAIM")
    };
    env.events().publish(
        (topic, account.clone()),
        ClaimedEvent {
            account,
            amount,
            fee,
            fee_recipient,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_sent_from_platform(env: &Env, account: Address, target: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("SEND"), account.clone()),
        SentFromPlatformEvent {
            account,
            target,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_crystallized(env: &Env, account: Address, amount: i128, height: u64) {
    env.events().publish(
        (symbol_short!("RWD_CRYS"), account.clone()),
        RewardsCrystallizedEvent {
            account,
            amount,
            height,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_forfeited(env: &Env, account: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("RWD_FORF"), account.clone()),
        RewardsForfeitedEvent {
            account,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_funded(env: &Env, from: Address, amount: i128, new_reserve: i128) {
    env.events().publish(
        (symbol_short!("RWD_FUND"), from.clone()),
        RewardsFundedEvent {
            from,
            amount,
            new_reserve,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_booster_locked(
    env: &Env,
    account: Address,
    contract: Address,
    item_id: u64,
    multiplier: u32,
    effective_multiplier: u32,
) {
    env.events().publish(
        (symbol_short!("BOOST_ON"), account.clone()),
        BoosterEvent {
            account,
            contract,
            item_id,
            multiplier,
            effective_multiplier,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_booster_unlocked(
    env: &Env,
    account: Address,
    contract: Address,
    item_id: u64,
    multiplier: u32,
    effective_multiplier: u32,
) {
    env.events().publish(
        (symbol_short!("BOOST_OF"), account.clone()),
        BoosterEvent {
            account,
            contract,
            item_id,
            multiplier,
            effective_multiplier,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_features_paused(env: &Env, caller: Address, features: Vec<Feature>) {
    env.events().publish(
        (symbol_short!("PAUSED"), caller.clone()),
        FeaturesToggledEvent {
            caller,
            features,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_features_unpaused(env: &Env, caller: Address, features: Vec<Feature>) {
    env.events().publish(
        (symbol_short!("UNPAUSED"), caller.clone()),
        FeaturesToggledEvent {
            caller,
            features,
            timestamp: env.ledger().timestamp(),
        },
    );
}

/// `list` names the address list, e.g. `RECV_ADD` or `PAUSR_RM`.
pub fn publish_address_list_changed(
    env: &Env,
    list: Symbol,
    admin: Address,
    addresses: Vec<Address>,
    changed: u32,
) {
    env.events().publish(
        (list, admin.clone()),
        AddressListEvent {
            admin,
            addresses,
            changed,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_config_changed(
    env: &Env,
    unbonding_period: u64,
    auto_claim_fee: i128,
    max_auto_claims: u32,
) {
    env.events().publish(
        (symbol_short!("CFG_SET"),),
        ConfigChangedEvent {
            unbonding_period,
            auto_claim_fee,
            max_auto_claims,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_schedule_changed(env: &Env, schedule: Vec<ScheduleUnit>, effective_from: u64) {
    env.events().publish(
        (symbol_short!("SCHED_SET"),),
        ScheduleChangedEvent {
            schedule,
            effective_from,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_proposed(env: &Env, current_admin: Address, proposed_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_PROP"), current_admin.clone()),
        AdminTransferProposedEvent {
            current_admin,
            proposed_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_accepted(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACPT"), new_admin.clone()),
        AdminTransferAcceptedEvent {
            old_admin,
            new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_cancelled(env: &Env, admin: Address, cancelled_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_CNCL"), admin.clone()),
        AdminTransferCancelledEvent {
            admin,
            cancelled_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}
