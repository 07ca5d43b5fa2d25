use crate::ContractError;

/// Fixed-point scaling factor for `acc_reward_per_share`.
///
/// Reward-per-share values are multiplied by this constant before storage so
/// sub-unit shares survive integer division. 10^12 keeps headroom in `i128`
/// for stake amounts well beyond 10^18 units.
pub const PRECISION: i128 = 1_000_000_000_000;

// ── Accumulator ─────────────────────────────────────────────────────────────

/// Advance the reward-per-share accumulator by `blocks` blocks of emission.
///
/// ```text
/// Δacc = blocks × reward_per_block × PRECISION / total_staked
/// ```
///
/// Division truncates toward zero, so the dust stays in the pool and the sum
/// of all entitlements never exceeds what was emitted. With nothing staked the
/// accumulator is returned unchanged and the emission for those blocks is not
/// distributed to anyone.
pub fn accrue(
    acc_reward_per_share: i128,
    reward_per_block: i128,
    blocks: u32,
    total_staked: i128,
) -> Result<i128, ContractError> {
    if blocks == 0 || total_staked <= 0 {
        return Ok(acc_reward_per_share);
    }

    let reward = reward_per_block
        .checked_mul(i128::from(blocks))
        .ok_or(ContractError::ArithmeticOverflow)?;
    let delta = reward
        .checked_mul(PRECISION)
        .ok_or(ContractError::ArithmeticOverflow)?
        .checked_div(total_staked)
        .ok_or(ContractError::ArithmeticOverflow)?;

    acc_reward_per_share
        .checked_add(delta)
        .ok_or(ContractError::ArithmeticOverflow)
}

// ── Per-user entitlement ────────────────────────────────────────────────────

/// The part of `amount × acc` already settled for a position, kept at full
/// precision (not divided by [`PRECISION`]).
///
/// Truncating the debt would let a position that is topped up at a
/// fractional accumulator collect reward its new stake never earned.
pub fn scaled_debt(amount: i128, acc_reward_per_share: i128) -> Result<i128, ContractError> {
    amount
        .checked_mul(acc_reward_per_share)
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Reward owed to a position since its debt was last reset.
///
/// ```text
/// pending = (amount × acc − scaled_debt) / PRECISION
/// ```
///
/// The accumulator only grows and the debt is reset on every interaction, so a
/// negative result means the stored state is corrupt; it is reported as an
/// arithmetic failure rather than clamped.
pub fn pending(
    amount: i128,
    acc_reward_per_share: i128,
    scaled_debt_paid: i128,
) -> Result<i128, ContractError> {
    let owed = scaled_debt(amount, acc_reward_per_share)?
        .checked_sub(scaled_debt_paid)
        .ok_or(ContractError::ArithmeticOverflow)?;
    if owed < 0 {
        return Err(ContractError::ArithmeticOverflow);
    }
    owed.checked_div(PRECISION)
        .ok_or(ContractError::ArithmeticOverflow)
}
