//! Property tests over the ledger
//!
//! For any sequence of credits, requests, and admin actions — valid or
//! rejected — money is conserved: the balance buckets always sum to the
//! total successfully credited, and the aggregates always agree with the
//! request history.

use chrono::Utc;
use ledger::WithdrawalLedger;
use proptest::prelude::*;
use rust_decimal::Decimal;
use types::ids::{EmailAddress, WithdrawalId};
use types::withdrawal::{PayoutDetails, PayoutMethod, PaypalDetails, WithdrawalStatus};

#[derive(Debug, Clone)]
enum Op {
    /// Credit earnings (cents)
    Credit(u64),
    /// Request a withdrawal (cents)
    Request(u64),
    /// Admin action on a previously created request (index, action)
    Action(usize, usize),
}

const ACTIONS: [&str; 4] = ["approve", "complete", "cancel", "return"];

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u64..=50_000).prop_map(Op::Credit),
        (1u64..=20_000).prop_map(Op::Request),
        (any::<usize>(), 0usize..ACTIONS.len()).prop_map(|(i, a)| Op::Action(i, a)),
    ]
}

fn paypal_details() -> PayoutDetails {
    PayoutDetails {
        selected_method: PayoutMethod::PayPal,
        paypal: Some(PaypalDetails {
            email: "payee@example.com".to_string(),
        }),
        upi: None,
        bank: None,
    }
}

proptest! {
    #[test]
    fn money_is_conserved(ops in proptest::collection::vec(op_strategy(), 1..80)) {
        let ledger = WithdrawalLedger::new();
        let user = EmailAddress::new("prop@example.com");
        ledger.provision(&user);
        ledger.save_details(&user, paypal_details()).unwrap();

        let mut credited = Decimal::ZERO;
        let mut ids: Vec<WithdrawalId> = Vec::new();

        for op in ops {
            match op {
                Op::Credit(cents) => {
                    let amount = Decimal::new(cents as i64, 2);
                    if ledger.credit_earnings(&user, amount).is_ok() {
                        credited += amount;
                    }
                }
                Op::Request(cents) => {
                    let amount = Decimal::new(cents as i64, 2);
                    if let Ok(request) = ledger.request_withdrawal(&user, amount, Utc::now()) {
                        ids.push(request.withdrawal_id);
                    }
                }
                Op::Action(index, action) => {
                    if !ids.is_empty() {
                        let id = ids[index % ids.len()];
                        // Rejections are expected; they must not move money.
                        let _ = ledger.admin_action(&user, &id, ACTIONS[action], None);
                    }
                }
            }

            let account = ledger.account(&user).unwrap();
            prop_assert_eq!(account.lifetime_total(), credited);
            prop_assert!(account.available_balance >= Decimal::ZERO);
            prop_assert!(account.pending_balance >= Decimal::ZERO);
        }

        // Aggregates agree with the history.
        let account = ledger.account(&user).unwrap();
        let open: Decimal = account
            .history
            .iter()
            .filter(|r| r.status.is_open())
            .map(|r| r.total_amount)
            .sum();
        prop_assert_eq!(account.pending_balance, open);

        let withdrawn: Decimal = account
            .history
            .iter()
            .filter(|r| r.status == WithdrawalStatus::Complete)
            .map(|r| r.total_amount)
            .sum();
        prop_assert_eq!(account.total_withdrawn, withdrawn);
    }
}
