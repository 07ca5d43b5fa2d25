#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based state machine tests for the pool.
//!
//! Random interleavings of deposits, withdrawals, claims, emergency exits and
//! idle blocks are replayed against a fresh pool. After every step:
//! - the sum of user positions equals `total_staked` and the stake the pool holds
//! - `acc_reward_per_share` never decreases
//! - paid plus pending reward never exceeds the emission schedule
//! - `pending_reward` is stable across repeated reads at the same height

use proptest::prelude::*;
use proptest_derive::Arbitrary;

use crate::harness::Pool;

#[derive(Arbitrary, Clone, Debug)]
enum Action {
    Deposit {
        user: u8,
        #[proptest(strategy = "0i128..=400i128")]
        amount: i128,
    },
    Withdraw {
        user: u8,
        #[proptest(strategy = "0i128..=400i128")]
        amount: i128,
    },
    Claim {
        user: u8,
    },
    EmergencyWithdraw {
        user: u8,
    },
    Advance {
        #[proptest(strategy = "0u32..=60u32")]
        blocks: u32,
    },
}

fn apply(pool: &Pool, action: &Action) {
    // Failures (over the limit, over the balance, out of allowance) are part
    // of the model; the invariants must hold whether or not a step succeeds.
    match action {
        Action::Deposit { user, amount } => {
            let _ = pool.client.try_deposit(pool.user(*user), amount);
        }
        Action::Withdraw { user, amount } => {
            let _ = pool.client.try_withdraw(pool.user(*user), amount);
        }
        Action::Claim { user } => {
            let _ = pool.client.try_withdraw(pool.user(*user), &0);
        }
        Action::EmergencyWithdraw { user } => {
            let _ = pool.client.try_emergency_withdraw(pool.user(*user));
        }
        Action::Advance { blocks } => pool.advance(*blocks),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_invariants_hold_for_any_interleaving(
        actions in prop::collection::vec(any::<Action>(), 1..40),
        reward_per_block in 1i128..=1_000i128,
        end_offset in 50u32..=2_000u32,
    ) {
        let pool = Pool::new(reward_per_block, 1 + end_offset, 300, 3);
        let mut last_acc = pool.client.get_acc_reward_per_share();

        for action in &actions {
            apply(&pool, action);

            let total = pool.client.get_total_staked();
            prop_assert_eq!(pool.sum_of_positions(), total);
            prop_assert_eq!(pool.stake_held_by_pool(), total);

            let acc = pool.client.get_acc_reward_per_share();
            prop_assert!(acc >= last_acc, "accumulator went backwards: {} -> {}", last_acc, acc);
            last_acc = acc;

            let pending = pool.reward_pending();
            prop_assert!(
                pool.reward_paid() + pending <= pool.emitted_bound(),
                "paid {} + pending {} exceeds emission {}",
                pool.reward_paid(),
                pending,
                pool.emitted_bound()
            );
            prop_assert_eq!(pool.reward_pending(), pending);
        }
    }

    #[test]
    fn prop_user_limit_never_exceeded_while_active(
        amounts in prop::collection::vec(1i128..=150i128, 1..10),
    ) {
        // Expiry is start + 100, and the sequence never leaves block 1.
        let pool = Pool::new(10, 1_000, 100, 1);
        let user = pool.user(0).clone();

        for amount in amounts {
            let before = pool.client.get_user_info(&user).amount;
            let result = pool.client.try_deposit(&user, &amount);
            let after = pool.client.get_user_info(&user).amount;

            prop_assert!(after <= 100);
            if before + amount > 100 {
                prop_assert!(result.is_err());
                prop_assert_eq!(after, before);
            } else {
                prop_assert!(result.is_ok());
                prop_assert_eq!(after, before + amount);
            }
        }
    }
}
