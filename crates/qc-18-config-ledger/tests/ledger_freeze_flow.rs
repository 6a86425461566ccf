//! End-to-end ledger freeze flow through the request pipeline, using the
//! in-memory state and rule-based authorization.

use proptest::prelude::*;
use qc_18_config_ledger::{
    read_frozen_ledgers, AuthRuleValidator, ConfigLedgerConfig, FrozenLedgersRecord,
    GetFrozenLedgersHandler, InMemoryState, LedgerFreezeHandler, RequestError, VersionedState,
    WriteRequestHandler, WriteRequestManager,
};
use serde_json::json;
use shared_types::{LedgerId, Operation, Request, Role, Txn, GET_FROZEN_LEDGERS, LEDGERS_FREEZE};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const TRUSTEES: [&str; 3] = ["trustee1", "trustee2", "trustee3"];

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct Node {
    state: Arc<InMemoryState>,
    manager: WriteRequestManager<InMemoryState>,
}

fn node() -> Node {
    init_tracing();
    let config = ConfigLedgerConfig::default();
    let state = Arc::new(InMemoryState::new());
    let validator = Arc::new(AuthRuleValidator::with_config(&config));
    for did in TRUSTEES {
        validator.register_identity(did, Role::Trustee);
    }
    validator.register_identity("steward1", Role::Steward);

    let mut manager = WriteRequestManager::new(config, state.clone());
    manager.register_write_handler(Arc::new(LedgerFreezeHandler::new(
        state.clone(),
        validator,
    )));
    manager.register_read_handler(Arc::new(GetFrozenLedgersHandler::new(state.clone())));
    Node { state, manager }
}

fn freeze_request(ids: Vec<LedgerId>, req_id: u64, signers: &[&str]) -> Request {
    let mut request = Request::new(
        signers[0],
        req_id,
        Operation::new(LEDGERS_FREEZE).with_field("ledgers_ids", ids),
    );
    for did in signers {
        request = request.with_signature(*did, format!("sig-{did}"));
    }
    request
}

/// Validate, order and commit one request as a batch of its own.
fn submit(node: &Node, request: &Request, seq_no: u64, txn_time: u64) -> Result<Txn, RequestError> {
    node.manager.static_validation(request)?;
    node.manager.dynamic_validation(request, Some(txn_time))?;
    let txn = node.manager.apply_request(request, seq_no, txn_time)?;
    node.manager.commit_batch()?;
    Ok(txn)
}

fn get_request() -> Request {
    Request::new("client1", 99, Operation::new(GET_FROZEN_LEDGERS))
}

#[test]
fn test_freeze_then_unfreeze_scenario() {
    let node = node();

    submit(&node, &freeze_request(vec![2, 3], 1, &TRUSTEES), 10, 1_000).unwrap();
    let record = read_frozen_ledgers(node.state.as_ref(), true).unwrap();
    assert_eq!(record, Some(FrozenLedgersRecord::new(vec![2, 3], 10, 1_000)));

    submit(&node, &freeze_request(vec![], 2, &TRUSTEES), 11, 2_000).unwrap();
    let record = read_frozen_ledgers(node.state.as_ref(), true).unwrap();
    assert_eq!(record, Some(FrozenLedgersRecord::new(vec![], 11, 2_000)));

    let reply = node.manager.get_result(&get_request()).unwrap();
    assert_eq!(reply.data, Some(json!([])));
    assert_eq!(reply.seq_no, Some(11));
    assert_eq!(reply.txn_time, Some(2_000));
}

#[test]
fn test_first_freeze_needs_trustee_quorum() {
    let node = node();
    let request = freeze_request(vec![5], 1, &["trustee1", "trustee2", "steward1"]);

    let err = submit(&node, &request, 10, 1_000).unwrap_err();

    assert!(matches!(err, RequestError::UnauthorizedClientRequest { .. }));
    assert!(err.to_string().contains("ADD"));
    assert!(err.is_client_rejection());
    assert!(node.manager.frozen_ledgers().unwrap().is_none());
    assert_eq!(node.state.get(b"4:FROZEN_LEDGERS", true).unwrap(), None);
}

#[test]
fn test_refreeze_is_checked_as_edit() {
    let node = node();
    submit(&node, &freeze_request(vec![5], 1, &TRUSTEES), 10, 1_000).unwrap();

    let err = submit(&node, &freeze_request(vec![6], 2, &["trustee1"]), 11, 2_000).unwrap_err();

    assert!(err.to_string().contains("EDIT"));
    let record = read_frozen_ledgers(node.state.as_ref(), true).unwrap().unwrap();
    assert_eq!(record.frozen_ledger_ids(), &[5]);
}

#[test]
fn test_other_type_rejected_by_static_validation() {
    let node = node();
    let request = Request::new("trustee1", 1, Operation::new(GET_FROZEN_LEDGERS));
    let handler = LedgerFreezeHandler::new(
        node.state.clone(),
        Arc::new(AuthRuleValidator::default()),
    );

    assert!(matches!(
        handler.static_validation(&request),
        Err(RequestError::InvalidClientRequest { .. })
    ));
}

#[test]
fn test_freeze_without_ledger_ids_never_reaches_apply() {
    let node = node();
    let request = Request::new("trustee1", 1, Operation::new(LEDGERS_FREEZE))
        .with_signature("trustee1", "sig")
        .with_signature("trustee2", "sig")
        .with_signature("trustee3", "sig");

    let err = submit(&node, &request, 10, 1_000).unwrap_err();

    assert!(matches!(err, RequestError::InvalidClientRequest { .. }));
    assert!(err.is_client_rejection());
    assert!(node.manager.frozen_ledgers().unwrap().is_none());
}

#[test]
fn test_reverted_batch_leaves_no_record() {
    let node = node();
    let request = freeze_request(vec![5], 1, &TRUSTEES);

    node.manager.dynamic_validation(&request, None).unwrap();
    node.manager.apply_request(&request, 10, 1_000).unwrap();
    node.manager.revert_batch().unwrap();

    assert!(node.manager.get_result(&get_request()).unwrap().data.is_none());
    // Still a first-time freeze: the reverted write never existed.
    let err = submit(&node, &freeze_request(vec![5], 2, &["trustee1"]), 10, 1_000).unwrap_err();
    assert!(err.to_string().contains("ADD"));
}

proptest! {
    #[test]
    fn prop_apply_fully_replaces(
        first in proptest::collection::vec(0u32..64, 0..8),
        second in proptest::collection::vec(0u32..64, 0..8),
    ) {
        let node = node();
        node.manager.apply_request(&freeze_request(first, 1, &TRUSTEES), 10, 1_000).unwrap();
        node.manager.apply_request(&freeze_request(second.clone(), 2, &TRUSTEES), 11, 2_000).unwrap();

        let record = node.manager.frozen_ledgers().unwrap().unwrap();
        prop_assert_eq!(record.value, second);
        prop_assert_eq!(record.seq_no, 11);
    }

    #[test]
    fn prop_apply_is_idempotent(
        ids in proptest::collection::vec(0u32..64, 0..8),
        seq_no in 1u64..1_000_000,
        txn_time in 1u64..2_000_000_000,
    ) {
        let node = node();
        let request = freeze_request(ids, 1, &TRUSTEES);

        node.manager.apply_request(&request, seq_no, txn_time).unwrap();
        let once = node.state.get(b"4:FROZEN_LEDGERS", false).unwrap();
        node.manager.apply_request(&request, seq_no, txn_time).unwrap();
        let twice = node.state.get(b"4:FROZEN_LEDGERS", false).unwrap();

        prop_assert!(once.is_some());
        prop_assert_eq!(once, twice);
    }
}
