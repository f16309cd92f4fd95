extern crate std;

use soroban_sdk::{testutils::Address as _, testutils::Ledger as _, vec, Address};

use crate::test::{setup_with, Setup};
use crate::test_mocks::{MockBoosterNft, MockBoosterNftClient, MockSubscriber, MockSubscriberClient};
use crate::{ContractError, Feature, MULTIPLIER_SCALE};

struct Boosted {
    s: Setup,
    nft: Address,
}

impl Boosted {
    fn new() -> Self {
        let s = setup_with(&[(1_000, 100)], 0, 10);
        s.fund_rewards(1_000_000);
        let nft = s.env.register(MockBoosterNft, ());
        s.client
            .add_multiplier_contracts(&s.admin, &vec![&s.env, nft.clone()]);
        Boosted { s, nft }
    }

    fn nft(&self) -> MockBoosterNftClient<'static> {
        MockBoosterNftClient::new(&self.s.env, &self.nft)
    }

    fn lock(&self, owner: &Address, id: u64, multiplier: u32) -> bool {
        self.nft()
            .lock_nft(&self.s.client.address, owner, &id, &multiplier)
    }

    fn unlock(&self, owner: &Address, id: u64) -> bool {
        self.nft().unlock_nft(&self.s.client.address, owner, &id)
    }
}

#[test]
fn test_lock_boosts_only_future_rewards() {
    let b = Boosted::new();
    let s = &b.s;
    let alice = s.staker(1_000);
    let bob = s.staker(1_000);

    s.env.ledger().set_sequence_number(12);
    assert!(b.lock(&alice, 1, 130_000));

    // Rewards up to the lock were paid at 1x.
    assert_eq!(s.client.effective_multiplier(&alice), 130_000);
    assert_eq!(s.staked(&alice), 1_100);
    assert_eq!(s.client.reward_pool().total_weight, 1_430 + 1_000);

    assert_eq!(s.client.rewards_at(&alice, &14), 117);
    assert_eq!(s.client.rewards_at(&bob, &14), 182);

    s.env.ledger().set_sequence_number(14);
    assert!(b.unlock(&alice, 1));

    assert_eq!(s.client.effective_multiplier(&alice), MULTIPLIER_SCALE);
    assert_eq!(s.staked(&alice), 1_217);
    assert_eq!(s.client.reward_pool().total_weight, 1_217 + 1_000);
}

#[test]
fn test_lock_and_unlock_notify_subscribers_of_crystallized_stake() {
    let b = Boosted::new();
    let s = &b.s;
    let sub_id = s.env.register(MockSubscriber, ());
    s.client.add_subscribers(&s.admin, &vec![&s.env, sub_id.clone()]);
    let sub = MockSubscriberClient::new(&s.env, &sub_id);

    let alice = s.staker(1_000);
    assert_eq!(sub.staked_of(&alice), Some(1_000));

    s.env.ledger().set_sequence_number(20);
    assert!(b.lock(&alice, 1, 130_000));
    assert_eq!(sub.staked_of(&alice), Some(2_000));
    assert_eq!(sub.calls(), 2);

    // Same block: nothing crystallized, nothing to report.
    assert!(b.lock(&alice, 2, 110_000));
    assert_eq!(sub.calls(), 2);

    s.env.ledger().set_sequence_number(21);
    assert!(b.unlock(&alice, 2));
    assert_eq!(sub.staked_of(&alice), Some(2_099));
    assert_eq!(sub.calls(), 3);
}

#[test]
fn test_boosters_stack_additively() {
    let b = Boosted::new();
    let alice = b.s.staker(1_000);

    assert!(b.lock(&alice, 1, 110_000));
    assert!(b.lock(&alice, 2, 130_000));
    assert_eq!(b.s.client.effective_multiplier(&alice), 140_000);

    assert!(b.unlock(&alice, 1));
    assert_eq!(b.s.client.effective_multiplier(&alice), 130_000);
}

#[test]
fn test_duplicate_lock_and_unknown_unlock_are_ignored() {
    let b = Boosted::new();
    let alice = b.s.staker(1_000);

    assert!(b.lock(&alice, 5, 150_000));
    assert!(!b.lock(&alice, 5, 150_000));
    assert_eq!(b.s.client.effective_multiplier(&alice), 150_000);

    assert!(!b.unlock(&alice, 6));
    assert_eq!(b.s.client.effective_multiplier(&alice), 150_000);
}

#[test]
fn test_unregistered_contract_cannot_set_multipliers() {
    let b = Boosted::new();
    let alice = b.s.staker(1_000);
    let stranger = Address::generate(&b.s.env);

    let err = b
        .s
        .client
        .try_on_lock(&stranger, &alice, &1, &130_000)
        .unwrap_err()
        .unwrap();
    assert_eq!(err, ContractError::NotAllowedToSetMultipliers);
    assert_eq!(err.message(), "address is not allowed to set multipliers");

    b.s.client
        .remove_multiplier_contracts(&b.s.admin, &vec![&b.s.env, b.nft.clone()]);
    let res = b.s.client.try_on_lock(&b.nft, &alice, &1, &130_000);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::NotAllowedToSetMultipliers);
    assert_eq!(b.s.client.effective_multiplier(&alice), MULTIPLIER_SCALE);
}

#[test]
fn test_multiplier_below_one_is_rejected() {
    let b = Boosted::new();
    let alice = b.s.staker(1_000);

    let err = b
        .s
        .client
        .try_on_lock(&b.nft, &alice, &1, &99_999)
        .unwrap_err()
        .unwrap();
    assert_eq!(err, ContractError::InvalidMultiplier);
    assert_eq!(err.message(), "multiplier can't be less than 1x");
}

#[test]
fn test_unlock_by_other_account_fails() {
    let b = Boosted::new();
    let alice = b.s.staker(1_000);
    let bob = b.s.staker(1_000);
    assert!(b.lock(&alice, 7, 120_000));

    let res = b.s.client.try_on_unlock(&b.nft, &bob, &7);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::ItemNotLockedByAccount);
    assert_eq!(b.s.client.effective_multiplier(&alice), 120_000);
}

#[test]
fn test_booster_items_are_paginated() {
    let b = Boosted::new();
    let alice = b.s.staker(1_000);
    for id in 1..=5u64 {
        assert!(b.lock(&alice, id, 101_000));
    }
    let key = b.s.viewing_key(&alice);

    let first = b.s.client.booster_items(&alice, &key, &0, &2);
    assert_eq!(first.len(), 2);
    assert_eq!(first.get(0).unwrap().id, 1);
    assert_eq!(first.get(1).unwrap().id, 2);
    assert_eq!(first.get(0).unwrap().contract, b.nft);

    let last = b.s.client.booster_items(&alice, &key, &2, &2);
    assert_eq!(last.len(), 1);
    assert_eq!(last.get(0).unwrap().id, 5);
    assert_eq!(last.get(0).unwrap().multiplier, 101_000);

    assert!(b.s.client.booster_items(&alice, &key, &3, &2).is_empty());

    let res = b.s.client.try_booster_items(&alice, &key, &0, &0);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::InvalidInput);

    assert!(b.unlock(&alice, 3));
    let all = b.s.client.booster_items(&alice, &key, &0, &10);
    assert_eq!(all.len(), 4);
    assert_eq!(all.get(2).unwrap().id, 4);
}

#[test]
fn test_weight_is_capped_by_max_multiplier() {
    let b = Boosted::new();
    let alice = b.s.staker(1_000);

    assert!(b.lock(&alice, 1, 500_000));

    assert_eq!(b.s.client.effective_multiplier(&alice), 500_000);
    assert_eq!(b.s.client.reward_pool().total_weight, 3_000);
}

#[test]
fn test_lock_without_stake_applies_on_deposit() {
    let b = Boosted::new();
    let alice = Address::generate(&b.s.env);

    assert!(b.lock(&alice, 1, 200_000));
    assert_eq!(b.s.client.reward_pool().total_weight, 0);

    b.s.mint(&alice, 1_000);
    b.s.client.deposit(&alice, &alice, &1_000);
    assert_eq!(b.s.client.reward_pool().total_weight, 2_000);
}

#[test]
fn test_boost_can_be_paused() {
    let b = Boosted::new();
    let alice = b.s.staker(1_000);
    b.s.client.pause(&b.s.admin, &vec![&b.s.env, Feature::Boost]);

    let res = b.s.client.try_on_lock(&b.nft, &alice, &1, &130_000);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::FeaturePaused);

    b.s.client.unpause(&b.s.admin, &vec![&b.s.env, Feature::Boost]);
    assert!(b.lock(&alice, 1, 130_000));
}
