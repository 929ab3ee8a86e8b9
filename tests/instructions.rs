//! Instruction framer and order-verifier tests (§4.E, §4.H).

use ofp_actions::diag::NullSink;
use ofp_actions::{decode_v11_instructions, encode_v11_instructions, verify_order, Action, ActionRecord, DialectConfig, Error};

fn config() -> DialectConfig {
    DialectConfig::default()
}

fn goto_table(table_id: u8) -> Vec<u8> {
    let mut b = vec![0u8, 1, 0, 8, table_id, 0, 0, 0];
    b[2..4].copy_from_slice(&8u16.to_be_bytes());
    b
}

fn write_metadata(value: u64, mask: u64) -> Vec<u8> {
    let mut b = vec![0u8, 2, 0, 24, 0, 0, 0, 0];
    b.extend_from_slice(&value.to_be_bytes());
    b.extend_from_slice(&mask.to_be_bytes());
    b
}

fn clear_actions() -> Vec<u8> {
    vec![0u8, 5, 0, 8, 0, 0, 0, 0]
}

fn apply_actions_output(port: u32) -> Vec<u8> {
    let mut inner = vec![0u8, 0, 0, 16];
    inner.extend_from_slice(&port.to_be_bytes());
    inner.extend_from_slice(&[0u8; 8]); // max_len(2) + pad(6)
    let total = 8 + inner.len();
    let mut b = vec![0u8, 4];
    b.extend_from_slice(&(total as u16).to_be_bytes());
    b.extend_from_slice(&[0u8; 4]);
    b.extend_from_slice(&inner);
    b
}

#[test]
fn apply_write_metadata_goto_table_round_trips_in_order() {
    let mut bytes = Vec::new();
    bytes.extend(apply_actions_output(1));
    bytes.extend(write_metadata(0x42, u64::MAX));
    bytes.extend(goto_table(5));

    let sink = NullSink;
    let decoded = decode_v11_instructions(&bytes, &config(), &sink).expect("valid order should decode");
    assert_eq!(decoded.len(), 3);
    assert_eq!(decoded[0].action, Action::Output { port: 1, max_len: 0 });
    assert_eq!(decoded[1].action, Action::WriteMetadata { value: 0x42, mask: u64::MAX });
    assert_eq!(decoded[2].action, Action::GotoTable { table_id: 5 });

    let reencoded = encode_v11_instructions(&decoded, &config()).unwrap();
    let redecoded = decode_v11_instructions(&reencoded, &config(), &sink).unwrap();
    assert_eq!(decoded, redecoded);
}

#[test]
fn clear_action_after_goto_table_is_rejected() {
    // apply(output), goto_table, clear_actions: clear appears after the
    // higher-ranked goto_table category, so this must be rejected.
    let mut bytes = Vec::new();
    bytes.extend(apply_actions_output(1));
    bytes.extend(goto_table(5));
    bytes.extend(clear_actions());

    let sink = NullSink;
    let err = decode_v11_instructions(&bytes, &config(), &sink).unwrap_err();
    assert!(matches!(err, Error::UnsupportedOrder { .. }));
}

#[test]
fn duplicate_write_metadata_instruction_is_rejected() {
    let mut bytes = Vec::new();
    bytes.extend(write_metadata(1, u64::MAX));
    bytes.extend(write_metadata(2, u64::MAX));

    let sink = NullSink;
    let err = decode_v11_instructions(&bytes, &config(), &sink).unwrap_err();
    assert!(matches!(err, Error::UnsupportedOrder { .. }));
}

#[test]
fn verify_order_rejects_regression_below_highest_seen() {
    let actions = vec![
        ActionRecord::new(Action::Output { port: 1, max_len: 0 }),
        ActionRecord::new(Action::GotoTable { table_id: 5 }),
        ActionRecord::new(Action::ClearActions),
    ];
    let err = verify_order(&actions).unwrap_err();
    assert!(matches!(err, Error::UnsupportedOrder { .. }));
}

#[test]
fn verify_order_accepts_the_canonical_partial_order() {
    let actions = vec![
        ActionRecord::new(Action::Output { port: 1, max_len: 0 }),
        ActionRecord::new(Action::Output { port: 2, max_len: 0 }),
        ActionRecord::new(Action::ClearActions),
        ActionRecord::new(Action::WriteMetadata { value: 1, mask: u64::MAX }),
        ActionRecord::new(Action::GotoTable { table_id: 3 }),
    ];
    assert!(verify_order(&actions).is_ok());
}

#[test]
fn write_actions_is_decoded_as_apply_when_dialect_allows_it() {
    let inner_output = apply_actions_output(1);
    // reuse the apply_actions body but with WRITE_ACTIONS's own type code (3)
    let mut bytes = inner_output;
    bytes[1] = 3;

    let sink = NullSink;
    let decoded = decode_v11_instructions(&bytes, &config(), &sink).expect("write-actions should decode as apply");
    assert_eq!(decoded[0].action, Action::Output { port: 1, max_len: 0 });
}

#[test]
fn write_actions_is_rejected_when_dialect_disallows_it() {
    let inner_output = apply_actions_output(1);
    let mut bytes = inner_output;
    bytes[1] = 3;

    let mut cfg = config();
    cfg.decode_write_actions_as_apply = false;
    let sink = NullSink;
    let err = decode_v11_instructions(&bytes, &cfg, &sink).unwrap_err();
    assert!(matches!(err, Error::UnsupInst { .. }));
}
