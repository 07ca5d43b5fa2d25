#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use liquidity_mining::{LiquidityMiningContract, LiquidityMiningContractClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};

#[derive(Arbitrary, Debug)]
pub struct FuzzInput {
    pub reward_per_block: u32,
    pub pool_limit_per_user: u16,
    pub window: u16,
    pub actions: Vec<FuzzAction>,
}

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { user: u8, amount: u64 },
    Withdraw { user: u8, amount: u64 },
    EmergencyWithdraw { user: u8 },
    Advance { blocks: u8 },
}

const USER_FUNDING: i128 = 1_000_000_000;

fuzz_target!(|input: FuzzInput| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_min_persistent_entry_ttl(100_000);
    env.ledger().set_min_temp_entry_ttl(100_000);
    env.ledger().set_max_entry_ttl(1_000_000);
    env.ledger().set_sequence_number(1);

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(LiquidityMiningContract, ());
    let client = LiquidityMiningContractClient::new(&env, &contract_id);

    let reward_per_block = i128::from(input.reward_per_block);
    let end_block = 1 + u32::from(input.window);
    client.initialize(
        &Address::generate(&env),
        &stake_token,
        &reward_token,
        &1,
        &end_block,
        &reward_per_block,
        &i128::from(input.pool_limit_per_user),
        &50,
    );
    let budget = reward_per_block * i128::from(input.window);
    StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &budget.max(1));

    let mut users = vec![];
    for _ in 0..4 {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &stake_token).mint(&user, &USER_FUNDING);
        TokenClient::new(&env, &stake_token).approve(&user, &contract_id, &USER_FUNDING, &500_000);
        users.push(user);
    }

    // The reward budget equals the full emission, so a claim may only fail
    // if the accounting over-issued.
    for action in input.actions.into_iter().take(64) {
        match action {
            FuzzAction::Deposit { user, amount } => {
                let user = &users[user as usize % users.len()];
                let _ = client.try_deposit(user, &i128::from(amount));
            }
            FuzzAction::Withdraw { user, amount } => {
                let user = &users[user as usize % users.len()];
                let staked = client.get_user_info(user).amount;
                let amount = i128::from(amount) % (staked + 1);
                assert!(client.try_withdraw(user, &amount).is_ok());
            }
            FuzzAction::EmergencyWithdraw { user } => {
                let user = &users[user as usize % users.len()];
                assert!(client.try_emergency_withdraw(user).is_ok());
            }
            FuzzAction::Advance { blocks } => {
                let next = env.ledger().sequence() + u32::from(blocks);
                env.ledger().set_sequence_number(next);
            }
        }

        let total: i128 = users.iter().map(|u| client.get_user_info(u).amount).sum();
        assert_eq!(total, client.get_total_staked());
    }
});
