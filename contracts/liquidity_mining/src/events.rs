#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the pool is configured.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub stake_token: Address,
    pub reward_token: Address,
    pub start_block: u32,
    pub end_block: u32,
    pub reward_per_block: i128,
    pub pool_limit_per_user: i128,
    pub number_blocks_for_user_limit: u32,
}

/// Fired on every deposit, including zero-amount claims.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub user: Address,
    pub amount: i128,
    pub block: u32,
}

/// Fired on every withdraw, including zero-amount claims.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub user: Address,
    pub amount: i128,
    pub block: u32,
}

/// Fired when a user pulls out their stake and forfeits pending reward.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawEvent {
    pub user: Address,
    pub amount: i128,
    pub block: u32,
}

/// Fired when the owner recovers a token sent to the pool by mistake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenRecoveredEvent {
    pub token: Address,
    pub amount: i128,
    pub block: u32,
}

// ── Publishers ──────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
pub fn publish_initialized(
    env: &Env,
    owner: Address,
    stake_token: Address,
    reward_token: Address,
    start_block: u32,
    end_block: u32,
    reward_per_block: i128,
    pool_limit_per_user: i128,
    number_blocks_for_user_limit: u32,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            stake_token,
            reward_token,
            start_block,
            end_block,
            reward_per_block,
            pool_limit_per_user,
            number_blocks_for_user_limit,
        },
    );
}

pub fn publish_deposit(env: &Env, user: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), user.clone()),
        DepositEvent {
            user,
            amount,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_withdraw(env: &Env, user: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), user.clone()),
        WithdrawEvent {
            user,
            amount,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_emergency_withdraw(env: &Env, user: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("EMRG_WDR"), user.clone()),
        EmergencyWithdrawEvent {
            user,
            amount,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_token_recovered(env: &Env, token: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("RECOVER"), token.clone()),
        TokenRecoveredEvent {
            token,
            amount,
            block: env.ledger().sequence(),
        },
    );
}
