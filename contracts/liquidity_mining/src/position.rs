use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{rewards, ContractError};

// Per-user persistent storage uses tuple keys: (prefix, user_address)
const USER_INFO: Symbol = symbol_short!("USR_INFO");

const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 535_680;

/// A staker's stored position. Created on first deposit and kept at zero
/// after a full withdrawal.
///
/// `scaled_debt` is `amount × acc_reward_per_share` at the last settlement,
/// not divided by [`rewards::PRECISION`].
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Position {
    pub amount: i128,
    pub scaled_debt: i128,
}

/// A position as reported to callers, with the debt in whole reward units.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserInfo {
    pub amount: i128,
    pub reward_debt: i128,
}

impl Position {
    /// Reward owed against the given accumulator value.
    pub fn pending(&self, acc_reward_per_share: i128) -> Result<i128, ContractError> {
        rewards::pending(self.amount, acc_reward_per_share, self.scaled_debt)
    }

    /// Settle the position against `acc_reward_per_share` so nothing is owed.
    pub fn reset_debt(&mut self, acc_reward_per_share: i128) -> Result<(), ContractError> {
        self.scaled_debt = rewards::scaled_debt(self.amount, acc_reward_per_share)?;
        Ok(())
    }

    pub fn info(&self) -> UserInfo {
        UserInfo {
            amount: self.amount,
            reward_debt: self.scaled_debt / rewards::PRECISION,
        }
    }
}

pub(crate) fn user_key(user: &Address) -> (Symbol, Address) {
    (USER_INFO, user.clone())
}

fn extend_ttl(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Read a position without touching its TTL. Accounts that never deposited
/// read as an empty one.
pub fn read(env: &Env, user: &Address) -> Position {
    env.storage()
        .persistent()
        .get(&user_key(user))
        .unwrap_or_default()
}

/// Read a position for update, bumping its TTL if it exists.
pub fn load(env: &Env, user: &Address) -> Position {
    let key = user_key(user);
    let position: Option<Position> = env.storage().persistent().get(&key);
    match position {
        Some(position) => {
            extend_ttl(env, &key);
            position
        }
        None => Position::default(),
    }
}

pub fn store(env: &Env, user: &Address, position: &Position) {
    let key = user_key(user);
    env.storage().persistent().set(&key, position);
    extend_ttl(env, &key);
}
