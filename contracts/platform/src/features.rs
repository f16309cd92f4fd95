use common::address_set;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::ContractError;

// ── Types ────────────────────────────────────────────────────────────────────

/// Independently pausable groups of entry points.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Feature {
    Deposit,
    Redeem,
    Claim,
    SendFromPlatform,
    ClaimRewards,
    Boost,
    EmergencyRedeem,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Status {
    NotPaused,
    Paused,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeatureStatus {
    pub feature: Feature,
    pub status: Status,
}

// ── Storage Keys ─────────────────────────────────────────────────────────────

const FEATURE: Symbol = symbol_short!("FEATURE");
pub(crate) const PAUSERS: Symbol = symbol_short!("PAUSERS");

fn feature_key(feature: &Feature) -> (Symbol, Feature) {
    (FEATURE, feature.clone())
}

// ── Gate ─────────────────────────────────────────────────────────────────────

pub fn status(env: &Env, feature: &Feature) -> Status {
    env.storage()
        .instance()
        .get(&feature_key(feature))
        .unwrap_or(Status::NotPaused)
}

pub fn is_paused(env: &Env, feature: &Feature) -> bool {
    status(env, feature) == Status::Paused
}

/// Fails with `FeaturePaused` when `feature` is paused.
pub fn require_not_paused(env: &Env, feature: &Feature) -> Result<(), ContractError> {
    if is_paused(env, feature) {
        return Err(ContractError::FeaturePaused);
    }
    Ok(())
}

pub fn set_status(env: &Env, features: &Vec<Feature>, status: Status) {
    for feature in features.iter() {
        env.storage().instance().set(&feature_key(&feature), &status);
    }
}

pub fn statuses(env: &Env, features: &Vec<Feature>) -> Vec<FeatureStatus> {
    let mut out = Vec::new(env);
    for feature in features.iter() {
        let status = status(env, &feature);
        out.push_back(FeatureStatus { feature, status });
    }
    out
}

// ── Pausers ──────────────────────────────────────────────────────────────────

pub fn is_pauser(env: &Env, who: &Address) -> bool {
    address_set::contains(env, &PAUSERS, who)
}

/// Admin or any registered pauser may toggle features.
pub fn require_pauser_or_admin(
    env: &Env,
    caller: &Address,
    admin: &Address,
) -> Result<(), ContractError> {
    if caller == admin || is_pauser(env, caller) {
        return Ok(());
    }
    Err(ContractError::Unauthorized)
}
