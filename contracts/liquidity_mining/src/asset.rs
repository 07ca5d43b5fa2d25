//! Stake- and reward-token movements.
//!
//! Every transfer is checked against the token's balance (and allowance for
//! pulls) before it is attempted, and attempted through the fallible client
//! calls so a refusal comes back as [`ContractError::ExternalTransferFailed`]
//! instead of trapping. Callers run all of their transfers before persisting
//! any state; an `Err` from the entry point rolls back the transfers already
//! made in the same invocation.

use soroban_sdk::{log, token, Address, Env};

use crate::ContractError;

/// Fail early if `from` cannot cover `amount` of `token`.
pub fn ensure_balance(
    env: &Env,
    token: &Address,
    from: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount <= 0 {
        return Ok(());
    }
    if token::Client::new(env, token).balance(from) < amount {
        log!(env, "insufficient token balance", token.clone(), from.clone(), amount);
        return Err(ContractError::ExternalTransferFailed);
    }
    Ok(())
}

/// Fail early if the pool may not pull `amount` of `token` from `owner`.
pub fn ensure_pullable(
    env: &Env,
    token: &Address,
    owner: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount <= 0 {
        return Ok(());
    }
    ensure_balance(env, token, owner, amount)?;
    let allowance =
        token::Client::new(env, token).allowance(owner, &env.current_contract_address());
    if allowance < amount {
        log!(env, "insufficient allowance", token.clone(), owner.clone(), allowance);
        return Err(ContractError::ExternalTransferFailed);
    }
    Ok(())
}

/// Send `amount` of `token` from the pool to `to`.
pub fn pay(env: &Env, token: &Address, to: &Address, amount: i128) -> Result<(), ContractError> {
    if amount <= 0 {
        return Ok(());
    }
    match token::Client::new(env, token).try_transfer(
        &env.current_contract_address(),
        to,
        &amount,
    ) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::ExternalTransferFailed),
    }
}

/// Pull `amount` of `token` from `from` into the pool using its allowance.
pub fn pull(env: &Env, token: &Address, from: &Address, amount: i128) -> Result<(), ContractError> {
    if amount <= 0 {
        return Ok(());
    }
    let pool = env.current_contract_address();
    match token::Client::new(env, token).try_transfer_from(&pool, from, &pool, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::ExternalTransferFailed),
    }
}
