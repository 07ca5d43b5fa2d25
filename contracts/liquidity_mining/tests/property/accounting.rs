#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for reward accounting.
//!
//! Invariants tested:
//! - Blocks with nothing staked never pay anyone, even once stake arrives
//! - A sole staker earns the full emission, minus at most one unit of rounding
//! - Two stakers split the emission in proportion to their stake, never over-issuing
//! - After a partial withdraw pending reward restarts from zero

use proptest::prelude::*;

use crate::harness::Pool;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Idle blocks before the first deposit are not distributed retroactively.
    #[test]
    fn prop_empty_pool_gap_is_not_distributed(
        gap in 0u32..=500u32,
        staked_blocks in 1u32..=500u32,
        amount in 1i128..=1_000i128,
        reward_per_block in 1i128..=1_000i128,
    ) {
        let pool = Pool::new(reward_per_block, 5_000, 0, 1);
        let user = pool.user(0).clone();

        pool.advance(gap);
        pool.client.deposit(&user, &amount);
        prop_assert_eq!(pool.client.get_acc_reward_per_share(), 0);

        pool.advance(staked_blocks);
        let expected = reward_per_block * i128::from(staked_blocks);
        let pending = pool.client.pending_reward(&user);
        prop_assert!(pending <= expected);
        prop_assert!(pending >= expected - 1, "lost more than rounding: {} vs {}", pending, expected);
    }

    /// Same-height reads of `pending_reward` agree and leave the checkpoint alone.
    #[test]
    fn prop_pending_reward_idempotent(
        blocks in 0u32..=1_000u32,
        amount in 1i128..=1_000i128,
    ) {
        let pool = Pool::new(10, 5_000, 0, 1);
        let user = pool.user(0).clone();
        pool.client.deposit(&user, &amount);
        let checkpoint = pool.client.get_last_reward_block();

        pool.advance(blocks);
        let first = pool.client.pending_reward(&user);
        let second = pool.client.pending_reward(&user);

        prop_assert_eq!(first, second);
        prop_assert_eq!(pool.client.get_last_reward_block(), checkpoint);
    }

    /// Two stakers entering together split the emission by stake share.
    #[test]
    fn prop_two_stakers_split_by_share(
        a in 1i128..=1_000i128,
        b in 1i128..=1_000i128,
        blocks in 1u32..=1_000u32,
        reward_per_block in 1i128..=100i128,
    ) {
        let pool = Pool::new(reward_per_block, 5_000, 0, 2);
        let alice = pool.user(0).clone();
        let bob = pool.user(1).clone();
        pool.client.deposit(&alice, &a);
        pool.client.deposit(&bob, &b);

        pool.advance(blocks);
        let emitted = reward_per_block * i128::from(blocks);
        let alice_pending = pool.client.pending_reward(&alice);
        let bob_pending = pool.client.pending_reward(&bob);

        prop_assert!(alice_pending + bob_pending <= emitted);
        // Each side loses strictly less than one unit to truncation.
        prop_assert!(alice_pending * (a + b) <= emitted * a);
        prop_assert!(emitted * a - alice_pending * (a + b) < 2 * (a + b));
        prop_assert!(bob_pending * (a + b) <= emitted * b);
        prop_assert!(emitted * b - bob_pending * (a + b) < 2 * (a + b));
    }

    /// Pending reward is zero right after a partial withdraw and then grows.
    #[test]
    fn prop_partial_withdraw_resets_pending(
        amount in 2i128..=1_000i128,
        withdraw_share in 1u32..=99u32,
        before in 1u32..=300u32,
        after in 1u32..=300u32,
    ) {
        let pool = Pool::new(10, 5_000, 0, 1);
        let user = pool.user(0).clone();
        pool.client.deposit(&user, &amount);

        pool.advance(before);
        let out = (amount * i128::from(withdraw_share) / 100).max(1);
        pool.client.withdraw(&user, &out);
        prop_assert_eq!(pool.client.pending_reward(&user), 0);
        prop_assert_eq!(pool.client.get_user_info(&user).amount, amount - out);

        pool.advance(after);
        let expected = 10 * i128::from(after);
        let pending = pool.client.pending_reward(&user);
        prop_assert!(pending <= expected);
        prop_assert!(pending >= expected - 1);
    }
}
