use circles::chain::CREATE_CIRCLE;
use circles::model::*;
use circles::queries::stats_queries;
use circles::{Chain, CircleRegistry, ErrorCode};

fn setup() -> (Chain, Principal, Principal) {
    let chain = Chain::in_memory().unwrap();
    let w1 = Principal::parse("ST1SJ3DTE5DN7X54YDH5D64R3BCB6A2AG2ZQ8YPD5").unwrap();
    let w2 = Principal::parse("ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG").unwrap();
    (chain, w1, w2)
}

#[test]
fn create_circle_mines_a_block() {
    let (mut chain, w1, _) = setup();
    assert_eq!(chain.block_height(), BlockHeight(0));

    let receipt = chain.call_create_circle("Family Expenses", &w1).unwrap();
    assert_eq!(receipt.result, TxResult::Ok { value: 1 });
    assert_eq!(receipt.block_height, BlockHeight(1));
    assert_eq!(chain.block_height(), BlockHeight(1));
}

#[test]
fn created_at_matches_height_after_call() {
    let (mut chain, w1, _) = setup();
    chain.mine_empty_blocks(4).unwrap();

    let receipt = chain.call_create_circle("Family Expenses", &w1).unwrap();
    let id = Id::new(receipt.result.ok_value().unwrap());

    let view = chain.registry().get_circle(id).unwrap();
    assert_eq!(view.created_at, chain.block_height());
    assert_eq!(view.created_at, BlockHeight(5));
    assert_eq!(view.creator, w1);
}

#[test]
fn failed_call_still_mines_and_records_error() {
    let (mut chain, w1, _) = setup();

    let receipt = chain.call_create_circle("", &w1).unwrap();
    assert_eq!(receipt.result.error_code(), Some(ErrorCode::InvalidInput));
    assert_eq!(receipt.block_height, BlockHeight(1));
    assert_eq!(chain.registry().get_total_circles().unwrap(), 0);

    let next = chain.call_create_circle("Trip", &w1).unwrap();
    assert_eq!(next.result.ok_value(), Some(1));
    assert_eq!(next.block_height, BlockHeight(2));
}

#[test]
fn receipts_are_kept_in_submission_order() {
    let (mut chain, w1, w2) = setup();
    let a = chain.call_create_circle("Circle 1", &w1).unwrap();
    let b = chain.call_create_circle(&"a".repeat(51), &w2).unwrap();
    let c = chain.call_create_circle("Circle 2", &w2).unwrap();

    let receipts = chain.receipts().unwrap();
    let ids: Vec<_> = receipts.iter().map(|r| r.tx_id).collect();
    assert_eq!(ids, vec![a.tx_id, b.tx_id, c.tx_id]);

    let seqs: Vec<u64> = receipts.iter().map(|r| r.seq).collect();
    assert_eq!(seqs, vec![1, 2, 3]);
    assert!(receipts.iter().all(|r| r.function == CREATE_CIRCLE));
    assert_eq!(receipts[1].sender, w2);
    assert_eq!(c.result.ok_value(), Some(2));
}

#[test]
fn receipt_lookup_by_tx_id() {
    let (mut chain, w1, _) = setup();
    let r = chain.call_create_circle("Family Expenses", &w1).unwrap();

    let found = chain.receipt(r.tx_id).unwrap();
    assert_eq!(found.args, vec!["Family Expenses".to_string()]);
    assert_eq!(found.result, r.result);
}

#[test]
fn unknown_receipt_is_not_found() {
    let (chain, _, _) = setup();
    let err = chain.receipt(uuid::Uuid::new_v4()).unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::NotFound));
}

#[test]
fn reads_do_not_mine_blocks() {
    let (mut chain, w1, w2) = setup();
    chain.call_create_circle("Family Expenses", &w1).unwrap();
    let before = chain.block_height();

    let reg = chain.registry();
    reg.get_circle(Id::new(1)).unwrap();
    reg.is_circle_member(Id::new(1), &w2).unwrap();
    reg.get_circle_members(Id::new(1)).unwrap();
    reg.get_total_circles().unwrap();
    reg.get_user_circles(&w1).unwrap();

    assert_eq!(chain.block_height(), before);
}

#[test]
fn genesis_height_offsets_first_block() {
    let reg = CircleRegistry::open_in_memory().unwrap();
    let mut chain = Chain::new(reg, BlockHeight(100)).unwrap();
    let w = Principal::parse("wallet_1").unwrap();

    let r = chain.call_create_circle("Family Expenses", &w).unwrap();
    assert_eq!(r.block_height, BlockHeight(101));
}

#[test]
fn file_backed_chain_resumes_height_and_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chain.db");
    let w = Principal::parse("wallet_1").unwrap();

    {
        let mut chain = Chain::new(CircleRegistry::open(&path).unwrap(), BlockHeight(0)).unwrap();
        chain.call_create_circle("One", &w).unwrap();
        chain.call_create_circle("Two", &w).unwrap();
    }

    let mut chain = Chain::new(CircleRegistry::open(&path).unwrap(), BlockHeight(0)).unwrap();
    assert_eq!(chain.block_height(), BlockHeight(2));

    let r = chain.call_create_circle("Three", &w).unwrap();
    assert_eq!(r.seq, 3);
    assert_eq!(r.block_height, BlockHeight(3));
    assert_eq!(r.result.ok_value(), Some(3));
}

#[test]
fn file_backed_chain_resumes_after_empty_blocks() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chain.db");
    let w = Principal::parse("wallet_1").unwrap();

    {
        let mut chain = Chain::new(CircleRegistry::open(&path).unwrap(), BlockHeight(0)).unwrap();
        chain.call_create_circle("One", &w).unwrap();
        chain.mine_empty_blocks(10).unwrap();
    }

    let mut chain = Chain::new(CircleRegistry::open(&path).unwrap(), BlockHeight(0)).unwrap();
    assert_eq!(chain.block_height(), BlockHeight(11));

    let r = chain.call_create_circle("Two", &w).unwrap();
    assert_eq!(r.block_height, BlockHeight(12));
}

#[test]
fn failed_receipt_write_rolls_back_the_circle() {
    let (mut chain, w1, _) = setup();
    chain.call_create_circle("One", &w1).unwrap();

    chain
        .registry()
        .connection()
        .execute_batch(
            "CREATE TRIGGER reject_receipts BEFORE INSERT ON transactions
             BEGIN SELECT RAISE(ABORT, 'receipts disabled'); END;",
        )
        .unwrap();

    let err = chain.call_create_circle("Two", &w1).unwrap_err();
    assert_eq!(err.error_code(), None);

    let reg = chain.registry();
    assert_eq!(reg.get_total_circles().unwrap(), 1);
    assert!(reg.get_circle(Id::new(2)).is_err());
    assert!(reg.get_user_circles(&w1).unwrap().iter().all(|c| c.name == "One"));
    assert!(stats_queries::verify_invariants(reg.connection()).unwrap().is_empty());
    assert_eq!(chain.block_height(), BlockHeight(1));
    assert_eq!(chain.receipts().unwrap().len(), 1);
}

#[test]
fn two_handles_on_one_file_share_sequence_and_counter() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chain.db");
    let w = Principal::parse("wallet_1").unwrap();

    let mut a = Chain::new(CircleRegistry::open(&path).unwrap(), BlockHeight(0)).unwrap();
    let mut b = Chain::new(CircleRegistry::open(&path).unwrap(), BlockHeight(0)).unwrap();

    let first = a.call_create_circle("One", &w).unwrap();
    let second = b.call_create_circle("Two", &w).unwrap();

    assert_eq!(first.result.ok_value(), Some(1));
    assert_eq!(second.result.ok_value(), Some(2));
    assert_eq!(second.seq, 2);
    assert_eq!(second.block_height, BlockHeight(2));
    assert_eq!(b.registry().get_total_circles().unwrap(), 2);
    assert_eq!(a.receipts().unwrap().len(), 2);
}

#[test]
fn mining_past_max_height_is_rejected() {
    let (mut chain, w1, _) = setup();

    let err = chain.mine_empty_blocks(u64::MAX).unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::InvalidInput));
    assert_eq!(chain.block_height(), BlockHeight(0));

    let r = chain.call_create_circle("Trip", &w1).unwrap();
    assert_eq!(r.block_height, BlockHeight(1));
}

#[test]
fn create_at_max_height_fails_without_writing() {
    let (mut chain, w1, _) = setup();
    chain.mine_empty_blocks(BlockHeight::MAX.value()).unwrap();

    assert!(chain.call_create_circle("Trip", &w1).is_err());
    assert_eq!(chain.block_height(), BlockHeight::MAX);
    assert_eq!(chain.registry().get_total_circles().unwrap(), 0);
    assert!(chain.receipts().unwrap().is_empty());
}

#[test]
fn genesis_beyond_max_height_is_rejected() {
    let reg = CircleRegistry::open_in_memory().unwrap();
    assert!(Chain::new(reg, BlockHeight(u64::MAX)).is_err());
}
