#![no_std]

pub mod asset;
pub mod clock;
pub mod events;
pub mod pool;
pub mod position;
pub mod rewards;

use soroban_sdk::{contract, contractimpl, log, symbol_short, Address, Env, Symbol};

pub use pool::{PoolConfig, PoolState};
pub use position::{Position, UserInfo};
pub use rewards::PRECISION;

// ── Storage key constants ────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");

const INSTANCE_TTL_THRESHOLD: u32 = 518_400;
const INSTANCE_TTL_EXTEND_TO: u32 = 535_680;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    InsufficientBalance = 5,
    LimitExceeded = 6,
    ExternalTransferFailed = 7,
    ArithmeticOverflow = 8,
    TokensIdentical = 9,
    InvalidBlockRange = 10,
    ProtectedToken = 11,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct LiquidityMiningContract;

#[contractimpl]
impl LiquidityMiningContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Configure the pool. Parameters are immutable afterwards.
    ///
    /// * `start_block` / `end_block` – ledger sequence window that earns rewards.
    /// * `reward_per_block` – reward units emitted per block across all stakers.
    /// * `pool_limit_per_user` – stake cap per account, 0 for none.
    /// * `number_blocks_for_user_limit` – blocks after `start_block` during
    ///   which the cap is enforced.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        owner: Address,
        stake_token: Address,
        reward_token: Address,
        start_block: u32,
        end_block: u32,
        reward_per_block: i128,
        pool_limit_per_user: i128,
        number_blocks_for_user_limit: u32,
    ) -> Result<(), ContractError> {
        if pool::has_config(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        if reward_per_block < 0 || pool_limit_per_user < 0 {
            return Err(ContractError::InvalidInput);
        }
        if start_block > end_block {
            return Err(ContractError::InvalidBlockRange);
        }
        if stake_token == reward_token {
            return Err(ContractError::TokensIdentical);
        }
        let user_limit_expiry_block = start_block
            .checked_add(number_blocks_for_user_limit)
            .ok_or(ContractError::InvalidInput)?;

        let config = PoolConfig {
            stake_token: stake_token.clone(),
            reward_token: reward_token.clone(),
            start_block,
            end_block,
            reward_per_block,
            pool_limit_per_user,
            number_blocks_for_user_limit,
            user_limit_expiry_block,
        };

        env.storage().instance().set(&OWNER, &owner);
        pool::store_config(&env, &config);
        pool::store_state(&env, &PoolState::new(start_block));
        Self::extend_instance_ttl(&env);

        events::publish_initialized(
            &env,
            owner,
            stake_token,
            reward_token,
            start_block,
            end_block,
            reward_per_block,
            pool_limit_per_user,
            number_blocks_for_user_limit,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Stake `amount` units and collect any reward owed on the existing stake.
    ///
    /// A zero `amount` only claims. The stake is pulled with `transfer_from`,
    /// so `user` must have approved the pool beforehand.
    pub fn deposit(env: Env, user: Address, amount: i128) -> Result<(), ContractError> {
        user.require_auth();
        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }

        let config = pool::load_config(&env)?;
        let height = env.ledger().sequence();
        let mut info = position::load(&env, &user);

        if amount > 0 && config.user_limit_active(height) {
            let after = info
                .amount
                .checked_add(amount)
                .ok_or(ContractError::ArithmeticOverflow)?;
            if after > config.pool_limit_per_user {
                log!(&env, "deposit over user limit", user, after);
                return Err(ContractError::LimitExceeded);
            }
        }

        // 1. Bring the accumulator up to the current block.
        let mut state = pool::load_state(&env)?.refreshed(&config, height)?;

        // 2. Reward owed on the stake held so far.
        let reward = if info.amount > 0 {
            info.pending(state.acc_reward_per_share)?
        } else {
            0
        };

        // 3. Grow the position.
        if amount > 0 {
            info.amount = info
                .amount
                .checked_add(amount)
                .ok_or(ContractError::ArithmeticOverflow)?;
            state.total_staked = state
                .total_staked
                .checked_add(amount)
                .ok_or(ContractError::ArithmeticOverflow)?;
        }

        // 4. Settle the position at the current accumulator.
        info.reset_debt(state.acc_reward_per_share)?;

        // 5. External transfers, all before any write.
        let this = env.current_contract_address();
        asset::ensure_balance(&env, &config.reward_token, &this, reward)?;
        asset::ensure_pullable(&env, &config.stake_token, &user, amount)?;
        asset::pay(&env, &config.reward_token, &user, reward)?;
        asset::pull(&env, &config.stake_token, &user, amount)?;

        pool::store_state(&env, &state);
        position::store(&env, &user, &info);
        Self::extend_instance_ttl(&env);

        log!(&env, "deposit", user, amount, reward);
        events::publish_deposit(&env, user, amount);

        Ok(())
    }

    /// Unstake `amount` units and collect the reward owed.
    ///
    /// A zero `amount` only claims. The per-user cap never applies here.
    pub fn withdraw(env: Env, user: Address, amount: i128) -> Result<(), ContractError> {
        user.require_auth();
        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }

        let config = pool::load_config(&env)?;
        let height = env.ledger().sequence();
        let before = position::load(&env, &user);
        if amount > before.amount {
            return Err(ContractError::InsufficientBalance);
        }

        let mut state = pool::load_state(&env)?.refreshed(&config, height)?;

        let mut info = before.clone();
        let reward = info.pending(state.acc_reward_per_share)?;

        if amount > 0 {
            info.amount = info
                .amount
                .checked_sub(amount)
                .ok_or(ContractError::ArithmeticOverflow)?;
            state.total_staked = state
                .total_staked
                .checked_sub(amount)
                .ok_or(ContractError::ArithmeticOverflow)?;
        }

        info.reset_debt(state.acc_reward_per_share)?;

        let this = env.current_contract_address();
        asset::ensure_balance(&env, &config.reward_token, &this, reward)?;
        asset::ensure_balance(&env, &config.stake_token, &this, amount)?;
        asset::pay(&env, &config.reward_token, &user, reward)?;
        asset::pay(&env, &config.stake_token, &user, amount)?;

        pool::store_state(&env, &state);
        if info != before {
            position::store(&env, &user, &info);
        }
        Self::extend_instance_ttl(&env);

        log!(&env, "withdraw", user, amount, reward);
        events::publish_withdraw(&env, user, amount);

        Ok(())
    }

    /// Return the whole stake to `user` without paying any reward.
    ///
    /// The forfeited reward stays in the pool. Returns the amount sent back.
    pub fn emergency_withdraw(env: Env, user: Address) -> Result<i128, ContractError> {
        user.require_auth();

        let config = pool::load_config(&env)?;
        let height = env.ledger().sequence();
        let before = position::load(&env, &user);

        // Accrue at the old total before the stake leaves. If the accrual
        // cannot be computed the blocks are skipped so principal still leaves.
        let stored = pool::load_state(&env)?;
        let mut state = match stored.refreshed(&config, height) {
            Ok(state) => state,
            Err(_) => {
                log!(&env, "emergency withdraw skips accrual", user, height);
                stored.skipped(&config, height)
            }
        };

        let amount = before.amount;
        state.total_staked = state
            .total_staked
            .checked_sub(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;

        let this = env.current_contract_address();
        asset::ensure_balance(&env, &config.stake_token, &this, amount)?;
        asset::pay(&env, &config.stake_token, &user, amount)?;

        pool::store_state(&env, &state);
        let info = Position::default();
        if info != before {
            position::store(&env, &user, &info);
        }
        Self::extend_instance_ttl(&env);

        log!(&env, "emergency withdraw", user, amount);
        events::publish_emergency_withdraw(&env, user, amount);

        Ok(amount)
    }

    // ── Owner ───────────────────────────────────────────────────────────────

    /// Send a token that was transferred to the pool by mistake to the owner.
    ///
    /// The stake and reward tokens are refused so neither principal nor the
    /// reward budget can leave through this path.
    pub fn recover_wrong_tokens(
        env: Env,
        caller: Address,
        token: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }
        let config = pool::load_config(&env)?;
        if token == config.stake_token || token == config.reward_token {
            return Err(ContractError::ProtectedToken);
        }

        let this = env.current_contract_address();
        asset::ensure_balance(&env, &token, &this, amount)?;
        asset::pay(&env, &token, &caller, amount)?;

        events::publish_token_recovered(&env, token, amount);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Reward `user` could claim at the current block, without mutating state.
    pub fn pending_reward(env: Env, user: Address) -> Result<i128, ContractError> {
        let config = pool::load_config(&env)?;
        let state = pool::load_state(&env)?.refreshed(&config, env.ledger().sequence())?;
        position::read(&env, &user).pending(state.acc_reward_per_share)
    }

    /// Stake and settled debt, with the debt reported in whole reward units.
    pub fn get_user_info(env: Env, user: Address) -> UserInfo {
        position::read(&env, &user).info()
    }

    pub fn get_stake_token(env: Env) -> Result<Address, ContractError> {
        Ok(pool::load_config(&env)?.stake_token)
    }

    pub fn get_reward_token(env: Env) -> Result<Address, ContractError> {
        Ok(pool::load_config(&env)?.reward_token)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&OWNER)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_start_block(env: Env) -> Result<u32, ContractError> {
        Ok(pool::load_config(&env)?.start_block)
    }

    pub fn get_end_block(env: Env) -> Result<u32, ContractError> {
        Ok(pool::load_config(&env)?.end_block)
    }

    pub fn get_reward_per_block(env: Env) -> Result<i128, ContractError> {
        Ok(pool::load_config(&env)?.reward_per_block)
    }

    pub fn get_pool_limit_per_user(env: Env) -> Result<i128, ContractError> {
        Ok(pool::load_config(&env)?.pool_limit_per_user)
    }

    pub fn get_number_blocks_for_user_limit(env: Env) -> Result<u32, ContractError> {
        Ok(pool::load_config(&env)?.number_blocks_for_user_limit)
    }

    pub fn get_user_limit_expiry_block(env: Env) -> Result<u32, ContractError> {
        Ok(pool::load_config(&env)?.user_limit_expiry_block)
    }

    /// Whether deposits at the current block are subject to the per-user cap.
    pub fn has_user_limit(env: Env) -> Result<bool, ContractError> {
        Ok(pool::load_config(&env)?.user_limit_active(env.ledger().sequence()))
    }

    /// Checkpoint as last persisted; queries do not advance it.
    pub fn get_last_reward_block(env: Env) -> Result<u32, ContractError> {
        Ok(pool::load_state(&env)?.last_reward_block)
    }

    /// Accumulator as last persisted, scaled by [`PRECISION`].
    pub fn get_acc_reward_per_share(env: Env) -> Result<i128, ContractError> {
        Ok(pool::load_state(&env)?.acc_reward_per_share)
    }

    pub fn get_total_staked(env: Env) -> Result<i128, ContractError> {
        Ok(pool::load_state(&env)?.total_staked)
    }

    pub fn get_config(env: Env) -> Result<PoolConfig, ContractError> {
        pool::load_config(&env)
    }

    pub fn get_pool_state(env: Env) -> Result<PoolState, ContractError> {
        pool::load_state(&env)
    }

    pub fn precision() -> i128 {
        PRECISION
    }

    pub fn is_initialized(env: Env) -> bool {
        pool::has_config(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if `caller` is not the stored owner.
    fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let owner: Address = env
            .storage()
            .instance()
            .get(&OWNER)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != owner {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn extend_instance_ttl(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
