//! Property tests for the adjudication ledger invariants.

use std::collections::HashSet;

use iqr_core::Descriptor;
use iqr_session::AdjudicationLedger;
use proptest::prelude::*;

fn descriptors(uuids: &[u8]) -> Vec<Descriptor> {
    uuids
        .iter()
        .map(|u| Descriptor::new("prop", format!("d{u}")))
        .collect()
}

/// One ledger call with small uuid universes so collisions between the
/// argument sets actually happen.
#[derive(Debug, Clone)]
enum LedgerCall {
    Adjudicate {
        new_pos: Vec<u8>,
        new_neg: Vec<u8>,
        un_pos: Vec<u8>,
        un_neg: Vec<u8>,
    },
    AddExternal {
        pos: Vec<u8>,
        neg: Vec<u8>,
    },
}

fn uuid_pool() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(0u8..8, 0..5)
}

fn ledger_call() -> impl Strategy<Value = LedgerCall> {
    prop_oneof![
        (uuid_pool(), uuid_pool(), uuid_pool(), uuid_pool()).prop_map(
            |(new_pos, new_neg, un_pos, un_neg)| LedgerCall::Adjudicate {
                new_pos,
                new_neg,
                un_pos,
                un_neg,
            }
        ),
        (uuid_pool(), uuid_pool()).prop_map(|(pos, neg)| LedgerCall::AddExternal { pos, neg }),
    ]
}

fn apply(ledger: &mut AdjudicationLedger, call: &LedgerCall) {
    match call {
        LedgerCall::Adjudicate {
            new_pos,
            new_neg,
            un_pos,
            un_neg,
        } => {
            ledger.adjudicate(
                &descriptors(new_pos),
                &descriptors(new_neg),
                &descriptors(un_pos),
                &descriptors(un_neg),
            );
        }
        LedgerCall::AddExternal { pos, neg } => {
            ledger.add_external(&descriptors(pos), &descriptors(neg));
        }
    }
}

fn disjoint(a: &HashSet<Descriptor>, b: &HashSet<Descriptor>) -> bool {
    a.intersection(b).next().is_none()
}

proptest! {
    #[test]
    fn mutual_exclusion_holds_after_every_call(
        calls in proptest::collection::vec(ledger_call(), 0..40)
    ) {
        let mut ledger = AdjudicationLedger::new();
        for call in &calls {
            apply(&mut ledger, call);
            prop_assert!(disjoint(&ledger.positive, &ledger.negative));
            prop_assert!(disjoint(&ledger.external_positive, &ledger.external_negative));
        }
    }

    #[test]
    fn add_external_is_idempotent(pos in uuid_pool(), neg in uuid_pool()) {
        let mut ledger = AdjudicationLedger::new();
        ledger.add_external(&descriptors(&pos), &descriptors(&neg));
        let ext_pos = ledger.external_positive.clone();
        let ext_neg = ledger.external_negative.clone();

        ledger.add_external(&descriptors(&pos), &descriptors(&neg));
        prop_assert_eq!(&ledger.external_positive, &ext_pos);
        prop_assert_eq!(&ledger.external_negative, &ext_neg);
    }

    #[test]
    fn empty_adjudicate_is_a_noop(calls in proptest::collection::vec(ledger_call(), 0..20)) {
        let mut ledger = AdjudicationLedger::new();
        for call in &calls {
            apply(&mut ledger, call);
        }
        let pos = ledger.positive.clone();
        let neg = ledger.negative.clone();

        let delta = ledger.adjudicate(&[], &[], &[], &[]);
        prop_assert!(!delta.positive_changed);
        prop_assert!(!delta.negative_changed);
        prop_assert_eq!(&ledger.positive, &pos);
        prop_assert_eq!(&ledger.negative, &neg);
    }

    #[test]
    fn cancellation_excludes_from_both(overlap in uuid_pool()) {
        let mut ledger = AdjudicationLedger::new();
        let items = descriptors(&overlap);
        let delta = ledger.adjudicate(&items, &items, &[], &[]);
        prop_assert!(!delta.positive_changed);
        prop_assert!(!delta.negative_changed);
        prop_assert!(ledger.positive.is_empty());
        prop_assert!(ledger.negative.is_empty());
    }
}
