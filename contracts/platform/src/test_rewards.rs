extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    vec, Address,
};

use crate::test::{schedule_of, setup_with, Setup};
use crate::{ContractError, Feature, PoolTotals};

fn funded(schedule: &[(u64, u128)], height: u32, reserve: i128) -> Setup {
    let s = setup_with(schedule, 0, height);
    if reserve > 0 {
        s.fund_rewards(reserve);
    }
    s
}

/// Everything the contract holds is accounted for by stake, unbonding
/// entries or the reward reserve.
fn assert_fully_backed(s: &Setup) {
    let totals = s.client.total_balances();
    assert_eq!(
        s.token_balance(&s.client.address),
        totals.total_staked + totals.total_unbonding + s.client.reward_reserve()
    );
}

#[test]
fn test_rewards_split_by_weight() {
    let s = funded(&[(1_000, 100)], 10, 1_000_000);
    let alice = s.staker(1_000_000);
    let bob = s.staker(2_000_000);

    s.env.ledger().set_sequence_number(14);

    assert_eq!(s.client.rewards_at(&alice, &14), 133);
    assert_eq!(s.client.rewards_at(&bob, &14), 266);
}

#[test]
fn test_rewards_query_is_pure() {
    let s = funded(&[(1_000, 100)], 10, 1_000_000);
    let alice = s.staker(1_000);
    let pool_before = s.client.reward_pool();

    // Heights ahead of the ledger are fine.
    let first = s.client.rewards_at(&alice, &30);
    let second = s.client.rewards_at(&alice, &30);

    assert_eq!(first, 2_000);
    assert_eq!(first, second);
    assert_eq!(s.client.reward_pool(), pool_before);
    assert_eq!(s.client.reward_reserve(), 1_000_000);

    let key = s.viewing_key(&alice);
    assert_eq!(s.client.rewards(&alice, &key, &30), first);
}

#[test]
fn test_late_joiner_only_earns_from_entry() {
    let s = funded(&[(1_000, 100)], 10, 1_000_000);
    let alice = s.staker(1_000);

    s.env.ledger().set_sequence_number(14);
    let bob = s.staker(1_000);

    assert_eq!(s.client.rewards_at(&alice, &16), 500);
    assert_eq!(s.client.rewards_at(&bob, &16), 100);
}

#[test]
fn test_emission_before_first_stake_goes_to_first_staker() {
    let s = funded(&[(10, 5_000), (20, 100)], 0, 1_000_000);

    s.env.ledger().set_sequence_number(1);
    let user = s.staker(75);

    assert_eq!(s.client.reward_pool().residue, 5_000);
    assert_eq!(s.client.rewards_at(&user, &2), 9_999);
}

#[test]
fn test_emission_stops_after_schedule() {
    let s = funded(&[(20, 100)], 10, 1_000_000);
    let alice = s.staker(1_000);

    assert_eq!(s.client.rewards_at(&alice, &30), 1_000);
    assert_eq!(s.client.rewards_at(&alice, &40), 1_000);
}

#[test]
fn test_redeem_crystallizes_rewards_first() {
    let s = funded(&[(1_000, 100)], 10, 1_000_000);
    let alice = s.staker(1_000);

    s.env.ledger().set_sequence_number(15);
    s.client.redeem(&alice, &Some(100));

    assert_eq!(s.staked(&alice), 1_400);
    assert_eq!(s.client.reward_reserve(), 999_500);
    assert_eq!(s.client.rewards_at(&alice, &15), 0);
    assert_eq!(
        s.client.total_balances(),
        PoolTotals {
            total_staked: 1_400,
            total_unbonding: 100
        }
    );
    assert_fully_backed(&s);
}

#[test]
fn test_full_redeem_includes_rewards() {
    let s = funded(&[(1_000, 100)], 10, 1_000_000);
    let alice = s.staker(1_000);

    s.env.ledger().set_sequence_number(13);
    s.client.redeem(&alice, &None);

    let key = s.viewing_key(&alice);
    let balance = s.client.balance(&alice, &key);
    assert_eq!(balance.staked, 0);
    assert_eq!(balance.pending_redeem.unbondings.get(0).unwrap().amount, 1_300);
    assert_eq!(s.client.reward_pool().total_weight, 0);
    assert_fully_backed(&s);
}

#[test]
fn test_claim_rewards_compounds() {
    let s = funded(&[(1_000, 100)], 10, 1_000_000);
    let alice = s.staker(1_000);

    let key = s.viewing_key(&alice);
    assert_eq!(s.client.balance(&alice, &key).checkpoint_height, 10);

    s.env.ledger().set_sequence_number(15);
    assert_eq!(s.client.claim_rewards(&alice), 500);
    let balance = s.client.balance(&alice, &key);
    assert_eq!(balance.staked, 1_500);
    assert_eq!(balance.checkpoint_height, 15);
    assert_eq!(s.client.reward_pool().total_weight, 1_500);

    // Nothing new within the same block.
    assert_eq!(s.client.claim_rewards(&alice), 0);
    assert_fully_backed(&s);
}

#[test]
fn test_exhausted_reserve_blocks_crystallization() {
    let s = funded(&[(1_000, 100)], 10, 100);
    let alice = s.staker(1_000);

    s.env.ledger().set_sequence_number(15);

    match s.client.try_redeem(&alice, &Some(10)) {
        Err(Ok(e)) => assert_eq!(e, ContractError::RewardReserveExhausted),
        _ => unreachable!("Expected RewardReserveExhausted error"),
    }
    match s.client.try_claim_rewards(&alice) {
        Err(Ok(e)) => assert_eq!(e, ContractError::RewardReserveExhausted),
        _ => unreachable!("Expected RewardReserveExhausted error"),
    }

    // Operators open the escape hatch; rewards are given up.
    s.client
        .unpause(&s.admin, &vec![&s.env, Feature::EmergencyRedeem]);
    s.client.emergency_redeem(&alice, &None);

    assert_eq!(s.staked(&alice), 0);
    assert_eq!(s.client.reward_reserve(), 100);
    assert_eq!(s.client.rewards_at(&alice, &20), 0);
    assert_eq!(s.client.total_balances().total_unbonding, 1_000);
    assert_fully_backed(&s);
}

#[test]
fn test_schedule_change_is_not_retroactive() {
    let s = funded(&[(1_000, 100)], 10, 1_000_000);
    let alice = s.staker(1_000);

    s.env.ledger().set_sequence_number(15);
    s.client
        .set_inflation_schedule(&s.admin, &schedule_of(&s.env, &[(1_000, 1_000)]));

    assert_eq!(s.client.inflation_schedule(), schedule_of(&s.env, &[(1_000, 1_000)]));
    assert_eq!(s.client.rewards_at(&alice, &15), 500);
    assert_eq!(s.client.rewards_at(&alice, &16), 1_500);
}

#[test]
fn test_schedule_after_idle_period_pays_nothing_for_the_gap() {
    let s = funded(&[], 10, 1_000_000);
    let alice = s.staker(1_000);

    s.env.ledger().set_sequence_number(100);
    s.client
        .set_inflation_schedule(&s.admin, &schedule_of(&s.env, &[(1_000, 10)]));

    assert_eq!(s.client.reward_pool().last_reward_block, 100);
    assert_eq!(s.client.rewards_at(&alice, &100), 0);
    assert_eq!(s.client.rewards_at(&alice, &101), 10);
}

#[test]
fn test_schedule_after_ended_schedule_pays_nothing_for_the_gap() {
    let s = funded(&[(20, 10)], 10, 1_000_000);
    let alice = s.staker(1_000);

    s.env.ledger().set_sequence_number(30);
    assert_eq!(s.client.claim_rewards(&alice), 100);
    s.env.ledger().set_sequence_number(40);
    assert_eq!(s.client.claim_rewards(&alice), 0);

    s.env.ledger().set_sequence_number(500);
    s.client
        .set_inflation_schedule(&s.admin, &schedule_of(&s.env, &[(1_000, 10)]));

    assert_eq!(s.client.reward_pool().last_reward_block, 500);
    assert_eq!(s.client.rewards_at(&alice, &500), 0);
    // Ten blocks of 10 over a weight of 1_100, floored.
    assert_eq!(s.client.rewards_at(&alice, &510), 99);
}

#[test]
fn test_invalid_schedule_is_rejected() {
    let s = funded(&[(1_000, 100)], 10, 0);
    let before = s.client.inflation_schedule();

    let res = s
        .client
        .try_set_inflation_schedule(&s.admin, &schedule_of(&s.env, &[(50, 1), (50, 2)]));

    assert_eq!(res.unwrap_err().unwrap(), ContractError::InvalidSchedule);
    assert_eq!(s.client.inflation_schedule(), before);
}

#[test]
fn test_rewards_of_unknown_account_are_zero() {
    let s = funded(&[(1_000, 100)], 10, 0);
    let _alice = s.staker(1_000);

    let nobody = Address::generate(&s.env);
    assert_eq!(s.client.rewards_at(&nobody, &500), 0);
}
