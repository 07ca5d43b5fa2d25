//! Reward window clock.
//!
//! Heights are ledger sequence numbers. The pool only pays for blocks in the
//! half-open window `(last_reward_block, end_block]`; everything here is a
//! pure function of its inputs so it can be evaluated any number of times at
//! the same height.

/// Number of reward-eligible blocks between the last checkpoint and `height`.
///
/// ```text
/// eligible = max(0, min(height, end_block) − last_reward_block)
/// ```
///
/// Returns 0 when the ledger has not moved past the checkpoint or when the
/// window has already been fully accrued.
pub fn eligible_blocks(height: u32, last_reward_block: u32, end_block: u32) -> u32 {
    height.min(end_block).saturating_sub(last_reward_block)
}

/// The checkpoint a refresh at `height` leaves behind.
///
/// Never moves backwards: a query below `start_block` (where the checkpoint
/// starts) keeps the checkpoint where it is.
pub fn checkpoint(height: u32, last_reward_block: u32, end_block: u32) -> u32 {
    last_reward_block.max(height.min(end_block))
}
