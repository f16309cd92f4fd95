#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use platform::{Deposit, PlatformContract, PlatformContractClient, ScheduleUnit};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    vec, Address, Env,
};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { amount: u64 },
    BatchDeposit { parts: Vec<(u8, u64)>, extra: i64 },
    Redeem { amount: Option<u64> },
    EmergencyRedeem { amount: Option<u64> },
    ClaimRedeemed,
    ClaimRewards,
    Lock { item: u8, multiplier: u32 },
    Unlock { item: u8 },
    AdvanceBlocks { blocks: u16 },
    AdvanceTime { seconds: u32 },
    SetFee { fee: u32 },
    SetBatchCap { cap: u8 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_700_000_000);
    env.ledger().set_sequence_number(1);

    let admin = Address::generate(&env);
    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(PlatformContract, ());
    let client = PlatformContractClient::new(&env, &contract_id);

    let schedule = vec![
        &env,
        ScheduleUnit {
            end_block: 100_000,
            reward_per_block: 1_000,
        },
    ];
    client.initialize(&admin, &token, &(7 * 86_400), &300_000, &0, &schedule);

    let booster = Address::generate(&env);
    client.add_multiplier_contracts(&admin, &vec![&env, booster.clone()]);
    client.unpause(&admin, &vec![&env, platform::Feature::EmergencyRedeem]);

    let minter = StellarAssetClient::new(&env, &token);
    minter.mint(&admin, &(i128::from(u64::MAX) * 4));
    client.fund_rewards(&admin, &(i128::from(u64::MAX) * 2));

    let mut users = std::vec::Vec::new();
    for _ in 0..4 {
        let user = Address::generate(&env);
        minter.mint(&user, &(i128::from(u64::MAX) * 8));
        users.push(user);
    }

    // Looking for panics and for token holdings drifting away from the
    // ledger totals.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Deposit { amount } => {
                let _ = client.try_deposit(caller, caller, &i128::from(amount));
            }
            FuzzAction::BatchDeposit { parts, extra } => {
                let mut deposits = soroban_sdk::Vec::new(&env);
                let mut sum = i128::from(extra);
                for (to, amount) in parts {
                    deposits.push_back(Deposit {
                        to: users[usize::from(to) % users.len()].clone(),
                        amount: i128::from(amount),
                    });
                    sum += i128::from(amount);
                }
                let _ = client.try_batch_deposit(caller, &sum, &deposits);
            }
            FuzzAction::Redeem { amount } => {
                let _ = client.try_redeem(caller, &amount.map(i128::from));
            }
            FuzzAction::EmergencyRedeem { amount } => {
                let _ = client.try_emergency_redeem(caller, &amount.map(i128::from));
            }
            FuzzAction::ClaimRedeemed => {
                let _ = client.try_claim_redeemed(caller);
            }
            FuzzAction::ClaimRewards => {
                let _ = client.try_claim_rewards(caller);
            }
            FuzzAction::Lock { item, multiplier } => {
                let _ = client.try_on_lock(&booster, caller, &u64::from(item), &multiplier);
            }
            FuzzAction::Unlock { item } => {
                let _ = client.try_on_unlock(&booster, caller, &u64::from(item));
            }
            FuzzAction::AdvanceBlocks { blocks } => {
                let height = env.ledger().sequence();
                env.ledger()
                    .set_sequence_number(height.saturating_add(u32::from(blocks)));
            }
            FuzzAction::AdvanceTime { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now.saturating_add(u64::from(seconds)));
            }
            FuzzAction::SetFee { fee } => {
                let _ = client.try_change_config(&admin, &None, &Some(i128::from(fee)), &None);
            }
            FuzzAction::SetBatchCap { cap } => {
                let _ = client.try_change_config(&admin, &None, &None, &Some(u32::from(cap)));
            }
        }

        let totals = client.total_balances();
        let held = TokenClient::new(&env, &token).balance(&contract_id);
        assert_eq!(
            held,
            totals.total_staked + totals.total_unbonding + client.reward_reserve()
        );
    }
});
