use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{clock, rewards, ContractError};

const CONFIG: Symbol = symbol_short!("CONFIG");
const POOL: Symbol = symbol_short!("POOL");

/// Pool parameters fixed at `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    pub stake_token: Address,
    pub reward_token: Address,
    pub start_block: u32,
    pub end_block: u32,
    /// Reward units emitted per eligible block across all stakers.
    pub reward_per_block: i128,
    /// Maximum stake per account while the cap is active; 0 disables it.
    pub pool_limit_per_user: i128,
    pub number_blocks_for_user_limit: u32,
    /// `start_block + number_blocks_for_user_limit`.
    pub user_limit_expiry_block: u32,
}

impl PoolConfig {
    /// Whether the per-user cap applies to deposits made at `height`.
    pub fn user_limit_active(&self, height: u32) -> bool {
        self.pool_limit_per_user > 0 && height < self.user_limit_expiry_block
    }
}

/// Shared accounting state for every staker.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    pub total_staked: i128,
    /// Reward per staked unit, scaled by [`rewards::PRECISION`].
    pub acc_reward_per_share: i128,
    pub last_reward_block: u32,
}

impl PoolState {
    pub fn new(start_block: u32) -> Self {
        Self {
            total_staked: 0,
            acc_reward_per_share: 0,
            last_reward_block: start_block,
        }
    }

    /// The state a refresh at `height` would produce.
    ///
    /// Pure: callers decide whether to persist it. Queries use the result
    /// directly, mutating calls store it together with their own changes.
    pub fn refreshed(&self, config: &PoolConfig, height: u32) -> Result<Self, ContractError> {
        let blocks = clock::eligible_blocks(height, self.last_reward_block, config.end_block);
        let acc_reward_per_share = rewards::accrue(
            self.acc_reward_per_share,
            config.reward_per_block,
            blocks,
            self.total_staked,
        )?;

        Ok(Self {
            total_staked: self.total_staked,
            acc_reward_per_share,
            last_reward_block: clock::checkpoint(
                height,
                self.last_reward_block,
                config.end_block,
            ),
        })
    }

    /// Move the checkpoint to `height` without accruing anything.
    ///
    /// The emission for the skipped blocks is not distributed. Only the
    /// emergency exit uses this, when a refresh cannot be computed.
    pub fn skipped(&self, config: &PoolConfig, height: u32) -> Self {
        Self {
            last_reward_block: clock::checkpoint(
                height,
                self.last_reward_block,
                config.end_block,
            ),
            ..self.clone()
        }
    }
}

// ── Storage ─────────────────────────────────────────────────────────────────

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub fn load_config(env: &Env) -> Result<PoolConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub fn store_config(env: &Env, config: &PoolConfig) {
    env.storage().instance().set(&CONFIG, config);
}

pub fn load_state(env: &Env) -> Result<PoolState, ContractError> {
    env.storage()
        .instance()
        .get(&POOL)
        .ok_or(ContractError::NotInitialized)
}

pub fn store_state(env: &Env, state: &PoolState) {
    env.storage().instance().set(&POOL, state);
}
