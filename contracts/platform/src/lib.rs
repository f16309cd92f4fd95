#![no_std]

pub mod boosters;
pub mod errors;
pub mod events;
pub mod features;
pub mod ledger;
pub mod receiving;
pub mod rewards;
pub mod subscribers;
pub mod unbonding;
pub mod viewing_key;

use common::{address_set, ttl};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, vec, Address, Bytes, Env, Symbol,
    Vec,
};

pub use boosters::BoosterItem;
pub use errors::{ContractError, ErrorCategory};
pub use features::{Feature, FeatureStatus, Status};
pub use ledger::{BalanceChange, Deposit, PoolTotals, StakedPosition};
pub use rewards::{RewardPool, ScheduleUnit, MULTIPLIER_SCALE, REWARD_SCALE};
pub use unbonding::{PendingRedeem, UnbondingEntry};

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");
const INITIALIZED: Symbol = symbol_short!("INIT");
const CONFIG: Symbol = symbol_short!("CONFIG");

/// Claim tickets a single call pops before leaving the rest for later calls.
pub const DEFAULT_MAX_AUTO_CLAIMS: u32 = 20;

// ── Public-facing types ──────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Token accepted as stake and paid out on claim.
    pub token: Address,
    /// Seconds between the day a redeem is requested and its maturity.
    pub unbonding_period: u64,
    /// Cap on the multiplier used for weight, scaled by `MULTIPLIER_SCALE`.
    pub max_multiplier: u32,
    /// Deducted from every auto-claimed payout and paid to the caller that
    /// triggered the batch.
    pub auto_claim_fee: i128,
    /// Upper bound on claim tickets popped by one auto-claim batch.
    pub max_auto_claims: u32,
}

/// Result of the `balance` query.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Balances {
    pub staked: i128,
    pub pending_redeem: PendingRedeem,
    /// Block at which rewards were last settled for the account.
    pub checkpoint_height: u64,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct PlatformContract;

#[contractimpl]
impl PlatformContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `token`            – SAC address of the staked token.
    /// * `unbonding_period` – seconds added to the day-aligned redeem time.
    /// * `max_multiplier`   – weight cap, at least `MULTIPLIER_SCALE`.
    /// * `auto_claim_fee`   – flat fee per auto-claimed payout.
    /// * `schedule`         – reward emission, `end_block` strictly increasing.
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        unbonding_period: u64,
        max_multiplier: u32,
        auto_claim_fee: i128,
        schedule: Vec<ScheduleUnit>,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if max_multiplier < MULTIPLIER_SCALE {
            return Err(ContractError::InvalidMultiplier);
        }
        if auto_claim_fee < 0 {
            return Err(ContractError::InvalidInput);
        }
        if !rewards::is_valid_schedule(&schedule) {
            return Err(ContractError::InvalidSchedule);
        }

        let config = Config {
            token: token.clone(),
            unbonding_period,
            max_multiplier,
            auto_claim_fee,
            max_auto_claims: DEFAULT_MAX_AUTO_CLAIMS,
        };

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&CONFIG, &config);
        rewards::save_schedule(&env, &schedule);
        rewards::save_pool(
            &env,
            &RewardPool {
                last_reward_block: Self::current_block(&env),
                ..RewardPool::default()
            },
        );
        // The escape hatch stays closed until an operator opens it.
        features::set_status(
            &env,
            &vec![&env, Feature::EmergencyRedeem],
            Status::Paused,
        );
        ttl::extend_instance(&env);

        events::publish_initialized(
            &env,
            admin,
            token,
            unbonding_period,
            max_multiplier,
            auto_claim_fee,
        );

        Ok(())
    }

    // ── Balance ledger ──────────────────────────────────────────────────────

    /// Pull `amount` tokens from `from` and stake them for `to`.
    ///
    /// Returns the new staked balance of `to`.
    pub fn deposit(env: Env, from: Address, to: Address, amount: i128) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        from.require_auth();
        features::require_not_paused(&env, &Feature::Deposit)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        Self::run_auto_claims(&env, &from)?;

        let config = Self::load_config(&env)?;
        token::Client::new(&env, &config.token).transfer(
            &from,
            &env.current_contract_address(),
            &amount,
        );

        Self::credit(&env, &from, &to, amount, &config)
    }

    /// Pull `amount` tokens from `from` once and stake them across several
    /// accounts. The parts must add up to exactly `amount`.
    ///
    /// Returns `amount`.
    pub fn batch_deposit(
        env: Env,
        from: Address,
        amount: i128,
        deposits: Vec<Deposit>,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        from.require_auth();
        features::require_not_paused(&env, &Feature::Deposit)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let mut remaining = amount;
        for deposit in deposits.iter() {
            if deposit.amount <= 0 {
                return Err(ContractError::InvalidAmount);
            }
            remaining = remaining
                .checked_sub(deposit.amount)
                .ok_or(ContractError::ArithmeticOverflow)?;
        }
        if remaining != 0 {
            return Err(ContractError::DepositSumMismatch);
        }
        Self::run_auto_claims(&env, &from)?;

        let config = Self::load_config(&env)?;
        token::Client::new(&env, &config.token).transfer(
            &from,
            &env.current_contract_address(),
            &amount,
        );

        for deposit in deposits.iter() {
            Self::credit(&env, &from, &deposit.to, deposit.amount, &config)?;
        }

        Ok(amount)
    }

    /// Move stake into unbonding. `None` redeems the whole balance.
    ///
    /// Pending rewards are crystallized first, so the full-balance redeem
    /// includes them. Returns the maturity timestamp of the entry.
    pub fn redeem(env: Env, account: Address, amount: Option<i128>) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        features::require_not_paused(&env, &Feature::Redeem)?;
        Self::run_auto_claims(&env, &account)?;

        let config = Self::load_config(&env)?;
        let mut position = ledger::load_position(&env, &account);
        let mut pool = Self::crystallize(&env, &account, &mut position)?;

        let amount = Self::resolve_amount(amount, position.staked)?;
        let end_ts = Self::start_unbonding(&env, &account, &mut position, amount, &config)?;

        Self::reweight(&env, &mut pool, &mut position, config.max_multiplier)?;
        ledger::save_position(&env, &account, &position);

        events::publish_redeemed(&env, account.clone(), amount, end_ts, false);
        subscribers::notify(&env, &account, position.staked);

        Ok(end_ts)
    }

    /// Redeem without paying out accrued rewards.
    ///
    /// Paused at instantiation; operators open it when crystallization is
    /// blocked, e.g. by an exhausted reward reserve.
    pub fn emergency_redeem(
        env: Env,
        account: Address,
        amount: Option<i128>,
    ) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        features::require_not_paused(&env, &Feature::EmergencyRedeem)?;
        Self::run_auto_claims(&env, &account)?;

        let config = Self::load_config(&env)?;
        let mut position = ledger::load_position(&env, &account);
        let block = Self::current_block(&env);
        let mut pool = rewards::pool_at(&env, block)?;

        let forfeited =
            rewards::pending(position.weight, pool.acc_reward_per_weight, position.reward_debt)
                .ok_or(ContractError::ArithmeticOverflow)?;

        let amount = Self::resolve_amount(amount, position.staked)?;
        let end_ts = Self::start_unbonding(&env, &account, &mut position, amount, &config)?;
        position.checkpoint_height = block;

        Self::reweight(&env, &mut pool, &mut position, config.max_multiplier)?;
        ledger::save_position(&env, &account, &position);

        if forfeited > 0 {
            let forfeited = i128::try_from(forfeited).map_err(|_| ContractError::ArithmeticOverflow)?;
            events::publish_rewards_forfeited(&env, account.clone(), forfeited);
        }
        events::publish_redeemed(&env, account.clone(), amount, end_ts, true);
        subscribers::notify(&env, &account, position.staked);

        Ok(end_ts)
    }

    /// Forward stake to an allow-listed contract together with `msg`.
    ///
    /// The target receives the tokens and then an `on_platform_receive`
    /// callback. Returns the amount sent.
    pub fn send_from_platform(
        env: Env,
        account: Address,
        target: Address,
        amount: Option<i128>,
        msg: Bytes,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        features::require_not_paused(&env, &Feature::SendFromPlatform)?;
        receiving::require_receiving_contract(&env, &target)?;
        Self::run_auto_claims(&env, &account)?;

        let config = Self::load_config(&env)?;
        let mut position = ledger::load_position(&env, &account);
        let mut pool = Self::crystallize(&env, &account, &mut position)?;

        let amount = Self::resolve_amount(amount, position.staked)?;
        position.staked -= amount;
        ledger::apply_change(&env, BalanceChange::Send(amount))?;

        Self::reweight(&env, &mut pool, &mut position, config.max_multiplier)?;
        ledger::save_position(&env, &account, &position);

        token::Client::new(&env, &config.token).transfer(
            &env.current_contract_address(),
            &target,
            &amount,
        );
        receiving::forward(&env, &target, &account, amount, &msg);

        events::publish_sent_from_platform(&env, account.clone(), target, amount);
        subscribers::notify(&env, &account, position.staked);

        Ok(amount)
    }

    /// Compound pending rewards into the staked balance.
    ///
    /// Returns the amount compounded; zero is not an error.
    pub fn claim_rewards(env: Env, account: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        features::require_not_paused(&env, &Feature::ClaimRewards)?;
        Self::run_auto_claims(&env, &account)?;

        let config = Self::load_config(&env)?;
        let mut position = ledger::load_position(&env, &account);
        let before = position.staked;
        let mut pool = Self::crystallize(&env, &account, &mut position)?;

        Self::reweight(&env, &mut pool, &mut position, config.max_multiplier)?;
        ledger::save_position(&env, &account, &position);

        let compounded = position.staked - before;
        if compounded > 0 {
            subscribers::notify(&env, &account, position.staked);
        }

        Ok(compounded)
    }

    /// Release every matured unbonding of `account`.
    ///
    /// Fails with `NothingToClaim` when nothing has matured. The auto-claim
    /// batch runs afterwards on behalf of the caller.
    pub fn claim_redeemed(env: Env, account: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        features::require_not_paused(&env, &Feature::Claim)?;

        let released = Self::release_matured(&env, &account)?;
        if released == 0 {
            return Err(ContractError::NothingToClaim);
        }

        let config = Self::load_config(&env)?;
        token::Client::new(&env, &config.token).transfer(
            &env.current_contract_address(),
            &account,
            &released,
        );
        events::publish_claimed(&env, account.clone(), released, 0, None);

        Self::run_auto_claims(&env, &account)?;

        Ok(released)
    }

    /// Top up the reward reserve that crystallization draws from.
    pub fn fund_rewards(env: Env, from: Address, amount: i128) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        from.require_auth();
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let config = Self::load_config(&env)?;
        token::Client::new(&env, &config.token).transfer(
            &from,
            &env.current_contract_address(),
            &amount,
        );
        let reserve = rewards::add_to_reserve(&env, amount)?;
        ttl::extend_instance(&env);

        events::publish_rewards_funded(&env, from, amount, reserve);

        Ok(reserve)
    }

    // ── Booster callbacks ───────────────────────────────────────────────────

    /// Called by a registered NFT contract after it locked `item_id` for
    /// `account`. Returns `false` if the item was already locked.
    pub fn on_lock(
        env: Env,
        contract: Address,
        account: Address,
        item_id: u64,
        multiplier: u32,
    ) -> Result<bool, ContractError> {
        Self::require_initialized(&env)?;
        contract.require_auth();
        features::require_not_paused(&env, &Feature::Boost)?;
        boosters::require_multiplier_contract(&env, &contract)?;
        if multiplier < MULTIPLIER_SCALE {
            return Err(ContractError::InvalidMultiplier);
        }
        if boosters::is_locked(&env, &contract, item_id) {
            return Ok(false);
        }

        let config = Self::load_config(&env)?;
        let mut position = ledger::load_position(&env, &account);
        let before = position.staked;
        let mut pool = Self::crystallize(&env, &account, &mut position)?;

        position.multiplier = boosters::compose(position.multiplier, multiplier)?;
        let item = BoosterItem {
            contract: contract.clone(),
            id: item_id,
            multiplier,
        };
        boosters::record_lock(&env, &account, &item);

        Self::reweight(&env, &mut pool, &mut position, config.max_multiplier)?;
        ledger::save_position(&env, &account, &position);

        events::publish_booster_locked(
            &env,
            account.clone(),
            contract,
            item_id,
            multiplier,
            position.multiplier,
        );
        if position.staked != before {
            subscribers::notify(&env, &account, position.staked);
        }

        Ok(true)
    }

    /// Called by a registered NFT contract after it unlocked `item_id`.
    /// Returns `false` if the item was never locked here.
    pub fn on_unlock(
        env: Env,
        contract: Address,
        account: Address,
        item_id: u64,
    ) -> Result<bool, ContractError> {
        Self::require_initialized(&env)?;
        contract.require_auth();
        features::require_not_paused(&env, &Feature::Boost)?;
        boosters::require_multiplier_contract(&env, &contract)?;
        let Some(multiplier) = boosters::locked_multiplier(&env, &account, &contract, item_id)?
        else {
            return Ok(false);
        };

        let config = Self::load_config(&env)?;
        let mut position = ledger::load_position(&env, &account);
        let before = position.staked;
        let mut pool = Self::crystallize(&env, &account, &mut position)?;

        position.multiplier = boosters::decompose(position.multiplier, multiplier);
        boosters::record_unlock(&env, &account, &contract, item_id);

        Self::reweight(&env, &mut pool, &mut position, config.max_multiplier)?;
        ledger::save_position(&env, &account, &position);

        events::publish_booster_unlocked(
            &env,
            account.clone(),
            contract,
            item_id,
            multiplier,
            position.multiplier,
        );
        if position.staked != before {
            subscribers::notify(&env, &account, position.staked);
        }

        Ok(true)
    }

    // ── Viewing keys and keyed queries ──────────────────────────────────────

    pub fn set_viewing_key(env: Env, account: Address, key: Bytes) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        viewing_key::set(&env, &account, &key);
        Ok(())
    }

    pub fn balance(env: Env, account: Address, key: Bytes) -> Result<Balances, ContractError> {
        viewing_key::require_valid(&env, &account, &key)?;
        let position = ledger::load_position(&env, &account);
        let pending_redeem =
            unbonding::pending_redeem(&env, &position.unbondings, env.ledger().timestamp())?;
        Ok(Balances {
            staked: position.staked,
            pending_redeem,
            checkpoint_height: position.checkpoint_height,
        })
    }

    pub fn rewards(
        env: Env,
        account: Address,
        key: Bytes,
        height: u64,
    ) -> Result<i128, ContractError> {
        viewing_key::require_valid(&env, &account, &key)?;
        Self::rewards_at(env, account, height)
    }

    pub fn booster_items(
        env: Env,
        account: Address,
        key: Bytes,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<BoosterItem>, ContractError> {
        viewing_key::require_valid(&env, &account, &key)?;
        boosters::page(&env, &account, page, page_size)
    }

    // ── Public queries ───────────────────────────────────────────────────────

    /// Rewards `account` would have accrued at `height` if nothing else
    /// changed. `height` may lie in the future. Never mutates state.
    pub fn rewards_at(env: Env, account: Address, height: u64) -> Result<i128, ContractError> {
        let position = ledger::load_position(&env, &account);
        let pool = rewards::pool_at(&env, height)?;
        let owed = rewards::pending(position.weight, pool.acc_reward_per_weight, position.reward_debt)
            .ok_or(ContractError::ArithmeticOverflow)?;
        i128::try_from(owed).map_err(|_| ContractError::ArithmeticOverflow)
    }

    pub fn total_balances(env: Env) -> PoolTotals {
        ledger::totals(&env)
    }

    /// Number of claim tickets still waiting in the auto-claim queue.
    pub fn num_of_pending_claims(env: Env) -> u32 {
        unbonding::queue_len(&env)
    }

    /// Composed booster multiplier of `account` (uncapped).
    pub fn effective_multiplier(env: Env, account: Address) -> u32 {
        ledger::load_position(&env, &account).multiplier
    }

    pub fn reward_pool(env: Env) -> RewardPool {
        rewards::load_pool(&env)
    }

    pub fn reward_reserve(env: Env) -> i128 {
        rewards::reserve(&env)
    }

    pub fn inflation_schedule(env: Env) -> Vec<ScheduleUnit> {
        rewards::load_schedule(&env)
    }

    pub fn features_status(env: Env, features: Vec<Feature>) -> Vec<FeatureStatus> {
        features::statuses(&env, &features)
    }

    pub fn is_pauser(env: Env, address: Address) -> bool {
        features::is_pauser(&env, &address)
    }

    pub fn is_receiving_contract(env: Env, address: Address) -> bool {
        receiving::is_receiving_contract(&env, &address)
    }

    pub fn receiving_contracts(env: Env) -> Vec<Address> {
        address_set::members(&env, &receiving::RECEIVING)
    }

    pub fn multiplier_contracts(env: Env) -> Vec<Address> {
        address_set::members(&env, &boosters::MULTIPLIER_CONTRACTS)
    }

    pub fn subscribers(env: Env) -> Vec<Address> {
        address_set::members(&env, &subscribers::SUBSCRIBERS)
    }

    pub fn get_config(env: Env) -> Result<Config, ContractError> {
        Self::load_config(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    // ── Feature gate ────────────────────────────────────────────────────────

    pub fn pause(env: Env, caller: Address, features: Vec<Feature>) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        let admin = Self::get_admin(env.clone())?;
        features::require_pauser_or_admin(&env, &caller, &admin)?;
        Self::run_auto_claims(&env, &caller)?;

        features::set_status(&env, &features, Status::Paused);
        events::publish_features_paused(&env, caller, features);
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address, features: Vec<Feature>) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        let admin = Self::get_admin(env.clone())?;
        features::require_pauser_or_admin(&env, &caller, &admin)?;

        features::set_status(&env, &features, Status::NotPaused);
        // Runs after the toggle so unpausing `Claim` releases the backlog.
        Self::run_auto_claims(&env, &caller)?;

        events::publish_features_unpaused(&env, caller, features);
        Ok(())
    }

    pub fn add_pauser(env: Env, admin: Address, pauser: Address) -> Result<(), ContractError> {
        let list = vec![&env, pauser];
        let changed = Self::edit_address_list(&env, &admin, &features::PAUSERS, &list, true)?;
        events::publish_address_list_changed(&env, symbol_short!("PAUSR_ADD"), admin, list, changed);
        Ok(())
    }

    pub fn remove_pauser(env: Env, admin: Address, pauser: Address) -> Result<(), ContractError> {
        let list = vec![&env, pauser];
        let changed = Self::edit_address_list(&env, &admin, &features::PAUSERS, &list, false)?;
        events::publish_address_list_changed(&env, symbol_short!("PAUSR_RM"), admin, list, changed);
        Ok(())
    }

    // ── Allow-lists ─────────────────────────────────────────────────────────

    pub fn add_receiving_contracts(
        env: Env,
        admin: Address,
        addresses: Vec<Address>,
    ) -> Result<u32, ContractError> {
        let changed =
            Self::edit_address_list(&env, &admin, &receiving::RECEIVING, &addresses, true)?;
        events::publish_address_list_changed(&env, symbol_short!("RECV_ADD"), admin, addresses, changed);
        Ok(changed)
    }

    pub fn remove_receiving_contracts(
        env: Env,
        admin: Address,
        addresses: Vec<Address>,
    ) -> Result<u32, ContractError> {
        let changed =
            Self::edit_address_list(&env, &admin, &receiving::RECEIVING, &addresses, false)?;
        events::publish_address_list_changed(&env, symbol_short!("RECV_RM"), admin, addresses, changed);
        Ok(changed)
    }

    pub fn add_multiplier_contracts(
        env: Env,
        admin: Address,
        contracts: Vec<Address>,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        admin.require_auth();
        Self::require_admin(&env, &admin)?;

        let changed = address_set::insert_all(&env, &boosters::MULTIPLIER_CONTRACTS, &contracts);
        events::publish_address_list_changed(&env, symbol_short!("MULT_ADD"), admin, contracts, changed);
        Ok(changed)
    }

    pub fn remove_multiplier_contracts(
        env: Env,
        admin: Address,
        contracts: Vec<Address>,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        admin.require_auth();
        Self::require_admin(&env, &admin)?;

        let changed = address_set::remove_all(&env, &boosters::MULTIPLIER_CONTRACTS, &contracts);
        events::publish_address_list_changed(&env, symbol_short!("MULT_RM"), admin, contracts, changed);
        Ok(changed)
    }

    pub fn add_subscribers(
        env: Env,
        admin: Address,
        contracts: Vec<Address>,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        admin.require_auth();
        Self::require_admin(&env, &admin)?;

        let changed = address_set::insert_all(&env, &subscribers::SUBSCRIBERS, &contracts);
        events::publish_address_list_changed(&env, symbol_short!("SUBS_ADD"), admin, contracts, changed);
        Ok(changed)
    }

    pub fn remove_subscribers(
        env: Env,
        admin: Address,
        contracts: Vec<Address>,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        admin.require_auth();
        Self::require_admin(&env, &admin)?;

        let changed = address_set::remove_all(&env, &subscribers::SUBSCRIBERS, &contracts);
        events::publish_address_list_changed(&env, symbol_short!("SUBS_RM"), admin, contracts, changed);
        Ok(changed)
    }

    // ── Configuration ───────────────────────────────────────────────────────

    /// Update the unbonding period, auto-claim fee and auto-claim batch cap.
    ///
    /// A new period only affects redeems made afterwards.
    pub fn change_config(
        env: Env,
        admin: Address,
        unbonding_period: Option<u64>,
        auto_claim_fee: Option<i128>,
        max_auto_claims: Option<u32>,
    ) -> Result<Config, ContractError> {
        Self::require_initialized(&env)?;
        admin.require_auth();
        Self::require_admin(&env, &admin)?;

        let mut config = Self::load_config(&env)?;
        if let Some(period) = unbonding_period {
            config.unbonding_period = period;
        }
        if let Some(fee) = auto_claim_fee {
            if fee < 0 {
                return Err(ContractError::InvalidInput);
            }
            config.auto_claim_fee = fee;
        }
        if let Some(cap) = max_auto_claims {
            if cap == 0 {
                return Err(ContractError::InvalidInput);
            }
            config.max_auto_claims = cap;
        }
        env.storage().instance().set(&CONFIG, &config);
        ttl::extend_instance(&env);

        events::publish_config_changed(
            &env,
            config.unbonding_period,
            config.auto_claim_fee,
            config.max_auto_claims,
        );

        Ok(config)
    }

    /// Replace the emission schedule from the current block onwards.
    ///
    /// The pool is first advanced under the old schedule, so rewards
    /// already emitted are never re-priced.
    pub fn set_inflation_schedule(
        env: Env,
        admin: Address,
        schedule: Vec<ScheduleUnit>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        if !rewards::is_valid_schedule(&schedule) {
            return Err(ContractError::InvalidSchedule);
        }

        let block = Self::current_block(&env);
        let pool = rewards::pool_at(&env, block)?;
        rewards::save_pool(&env, &pool);
        rewards::save_schedule(&env, &schedule);
        ttl::extend_instance(&env);

        events::publish_schedule_changed(&env, schedule, block);

        Ok(())
    }

    // ── Admin transfer (two-step) ──────────────────────────────────────────

    /// Propose a new admin address. Only the current admin can call this.
    /// The new admin must call `accept_admin` to complete the transfer.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        env.storage().instance().set(&PENDING_ADMIN, &new_admin);

        events::publish_admin_transfer_proposed(&env, current_admin, new_admin);

        Ok(())
    }

    /// Accept the pending admin transfer. Only the proposed new admin can call this.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_admin.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::InvalidInput)?;

        if new_admin != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_admin = Self::get_admin(env.clone())?;

        env.storage().instance().set(&ADMIN, &new_admin);
        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);

        Ok(())
    }

    /// Cancel a pending admin transfer. Only the current admin can call this.
    pub fn cancel_admin_transfer(env: Env, current_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::InvalidInput)?;

        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_cancelled(&env, current_admin, pending);

        Ok(())
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_ADMIN)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != admin {
            return Err(ContractError::NotAnAdmin);
        }
        Ok(())
    }

    fn load_config(env: &Env) -> Result<Config, ContractError> {
        env.storage()
            .instance()
            .get(&CONFIG)
            .ok_or(ContractError::NotInitialized)
    }

    fn current_block(env: &Env) -> u64 {
        u64::from(env.ledger().sequence())
    }

    /// Admin-gated edit of an address list that also drives the auto-claim
    /// batch. Returns how many addresses were added or removed.
    fn edit_address_list(
        env: &Env,
        admin: &Address,
        list: &Symbol,
        addresses: &Vec<Address>,
        insert: bool,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(env)?;
        admin.require_auth();
        Self::require_admin(env, admin)?;
        Self::run_auto_claims(env, admin)?;

        let changed = if insert {
            address_set::insert_all(env, list, addresses)
        } else {
            address_set::remove_all(env, list, addresses)
        };
        ttl::extend_instance(env);
        Ok(changed)
    }

    /// Stakes `amount`, already held by the contract, for `to`. Returns the
    /// new staked balance.
    fn credit(
        env: &Env,
        from: &Address,
        to: &Address,
        amount: i128,
        config: &Config,
    ) -> Result<i128, ContractError> {
        let mut position = ledger::load_position(env, to);
        let mut pool = Self::crystallize(env, to, &mut position)?;

        position.staked = position
            .staked
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        ledger::apply_change(env, BalanceChange::Deposit(amount))?;

        Self::reweight(env, &mut pool, &mut position, config.max_multiplier)?;
        ledger::save_position(env, to, &position);

        events::publish_deposited(env, from.clone(), to.clone(), amount, position.staked);
        subscribers::notify(env, to, position.staked);

        Ok(position.staked)
    }

    /// `None` means the whole staked balance.
    fn resolve_amount(requested: Option<i128>, staked: i128) -> Result<i128, ContractError> {
        let amount = match requested {
            Some(a) if a <= 0 => return Err(ContractError::InvalidAmount),
            Some(a) => a,
            None => staked,
        };
        if amount == 0 || amount > staked {
            return Err(ContractError::InsufficientFunds);
        }
        Ok(amount)
    }

    /// Moves `amount` from `staked` into the unbonding entry for today's
    /// bucket, queueing a claim ticket when the entry is new.
    fn start_unbonding(
        env: &Env,
        account: &Address,
        position: &mut StakedPosition,
        amount: i128,
        config: &Config,
    ) -> Result<u64, ContractError> {
        let end_ts = unbonding::maturity_bucket(env.ledger().timestamp(), config.unbonding_period)?;
        let is_new = unbonding::add_entry(&mut position.unbondings, end_ts, amount)?;
        if is_new {
            unbonding::push_ticket(
                env,
                &unbonding::ClaimTicket {
                    account: account.clone(),
                    end_ts,
                },
            );
        }
        position.staked -= amount;
        ledger::apply_change(env, BalanceChange::Redeem(amount))?;
        Ok(end_ts)
    }

    /// Removes the matured unbondings of `account` from its position and the
    /// pool totals. Returns the amount released; the caller pays it out.
    fn release_matured(env: &Env, account: &Address) -> Result<i128, ContractError> {
        let mut position = ledger::load_position(env, account);
        let (remaining, matured) =
            unbonding::split_matured(env, &position.unbondings, env.ledger().timestamp())?;
        if matured == 0 {
            return Ok(0);
        }
        position.unbondings = remaining;
        ledger::save_position(env, account, &position);
        ledger::apply_change(env, BalanceChange::Claim(matured))?;
        Ok(matured)
    }

    /// Pays out accounts whose claim ticket has matured, front of the queue
    /// first, charging the configured fee to each payout in favour of
    /// `caller`. Pops at most `max_auto_claims` tickets; the rest wait for
    /// the next call. A no-op while `Claim` is paused.
    fn run_auto_claims(env: &Env, caller: &Address) -> Result<(), ContractError> {
        if features::is_paused(env, &Feature::Claim) {
            return Ok(());
        }
        let now = env.ledger().timestamp();
        let config = Self::load_config(env)?;
        let token = token::Client::new(env, &config.token);
        let this = env.current_contract_address();

        for _ in 0..config.max_auto_claims {
            let Some(ticket) = unbonding::pop_matured(env, now) else {
                break;
            };
            let released = Self::release_matured(env, &ticket.account)?;
            if released == 0 {
                continue;
            }
            let fee = released.min(config.auto_claim_fee);
            let payout = released - fee;
            if payout > 0 {
                token.transfer(&this, &ticket.account, &payout);
            }
            if fee > 0 {
                token.transfer(&this, caller, &fee);
            }
            events::publish_claimed(env, ticket.account, payout, fee, Some(caller.clone()));
        }
        ttl::extend_instance(env);
        Ok(())
    }

    /// Advances the reward pool to the current block and folds `account`'s
    /// pending rewards into its stake, paid from the reward reserve.
    ///
    /// The returned pool must be handed to `reweight` once the position has
    /// been mutated.
    fn crystallize(
        env: &Env,
        account: &Address,
        position: &mut StakedPosition,
    ) -> Result<RewardPool, ContractError> {
        let block = Self::current_block(env);
        let pool = rewards::pool_at(env, block)?;

        let owed = rewards::pending(position.weight, pool.acc_reward_per_weight, position.reward_debt)
            .ok_or(ContractError::ArithmeticOverflow)?;
        if owed > 0 {
            let owed = i128::try_from(owed).map_err(|_| ContractError::ArithmeticOverflow)?;
            rewards::draw_from_reserve(env, owed)?;
            position.staked = position
                .staked
                .checked_add(owed)
                .ok_or(ContractError::ArithmeticOverflow)?;
            ledger::apply_change(env, BalanceChange::Reward(owed))?;
            events::publish_rewards_crystallized(env, account.clone(), owed, block);
        }
        position.checkpoint_height = block;
        Ok(pool)
    }

    /// Recomputes `position`'s weight, swaps it into the pool total and
    /// snapshots the reward debt, then persists the pool.
    fn reweight(
        env: &Env,
        pool: &mut RewardPool,
        position: &mut StakedPosition,
        max_multiplier: u32,
    ) -> Result<(), ContractError> {
        let weight = rewards::weight(position.staked, position.multiplier, max_multiplier)
            .ok_or(ContractError::ArithmeticOverflow)?;
        pool.total_weight = pool
            .total_weight
            .checked_sub(position.weight)
            .and_then(|w| w.checked_add(weight))
            .ok_or(ContractError::ArithmeticOverflow)?;
        position.weight = weight;
        position.reward_debt = rewards::debt(weight, pool.acc_reward_per_weight)
            .ok_or(ContractError::ArithmeticOverflow)?;
        rewards::save_pool(env, pool);
        ttl::extend_instance(env);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test_mocks;


#[cfg(test)]
mod test_rewards;

#[cfg(test)]
mod test_boosters;
