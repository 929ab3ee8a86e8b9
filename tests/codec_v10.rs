//! Round-trip and validation tests for the OpenFlow 1.0 action dialect.

use ofp_actions::diag::NullSink;
use ofp_actions::{decode_v10, encode_v10, equal, Action, ActionRecord, Compat, DialectConfig, Error};

fn roundtrip(bytes: &[u8]) -> Vec<ActionRecord> {
    let config = DialectConfig::default();
    let sink = NullSink;
    let decoded = decode_v10(bytes, &config, &sink).expect("decode should succeed");
    let reencoded = encode_v10(&decoded).expect("encode should succeed");
    assert_eq!(reencoded, bytes, "re-encoding must reproduce the original wire bytes");
    decoded
}

#[test]
fn output_action_round_trips() {
    // OFPAT10_OUTPUT: type=0 len=8 port=5 max_len=0
    let bytes = [0u8, 0, 0, 8, 0, 5, 0, 0];
    let decoded = roundtrip(&bytes);
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0].action, Action::Output { port: 5, max_len: 0 });
    assert_eq!(decoded[0].compat, Compat::Ofp10(ofp_actions::opcode::Ofp10ActionType::Output));
}

#[test]
fn enqueue_action_round_trips() {
    // OFPAT10_ENQUEUE: type=11 len=16 port=3 pad(6) queue_id=7
    let bytes = [0u8, 11, 0, 16, 0, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 7];
    let decoded = roundtrip(&bytes);
    assert_eq!(decoded[0].action, Action::Enqueue { port: 3, queue_id: 7 });
}

#[test]
fn set_eth_src_round_trips() {
    // OFPAT10_SET_DL_SRC: type=4 len=16 mac(6) pad(6)
    let bytes = [0u8, 4, 0, 16, 0xde, 0xad, 0xbe, 0xef, 0x00, 0x01, 0, 0, 0, 0, 0, 0];
    let decoded = roundtrip(&bytes);
    assert_eq!(decoded[0].action, Action::SetEthSrc { mac: [0xde, 0xad, 0xbe, 0xef, 0x00, 0x01] });
}

#[test]
fn set_vlan_vid_round_trips() {
    let bytes = [0u8, 1, 0, 8, 0x0, 0x64, 0, 0];
    let decoded = roundtrip(&bytes);
    assert_eq!(decoded[0].action, Action::SetVlanVid { vlan_vid: 0x64 });
}

#[test]
fn multiple_actions_in_one_list_round_trip() {
    let output = [0u8, 0, 0, 8, 0, 1, 0, 0];
    let strip_vlan = [0u8, 3, 0, 8, 0, 0, 0, 0];
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&output);
    bytes.extend_from_slice(&strip_vlan);
    let decoded = roundtrip(&bytes);
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded[0].action, Action::Output { port: 1, max_len: 0 });
    assert_eq!(decoded[1].action, Action::StripVlan);
}

#[test]
fn truncated_action_is_a_bad_len_error() {
    // claims len=8 but only 4 bytes follow
    let bytes = [0u8, 0, 0, 8, 0, 1];
    let config = DialectConfig::default();
    let sink = NullSink;
    let err = decode_v10(&bytes, &config, &sink).unwrap_err();
    assert!(matches!(err, Error::BadLen { .. }));
}

#[test]
fn unknown_action_type_is_bad_type() {
    let bytes = [0u8, 200, 0, 8, 0, 0, 0, 0];
    let config = DialectConfig::default();
    let sink = NullSink;
    let err = decode_v10(&bytes, &config, &sink).unwrap_err();
    assert!(matches!(err, Error::BadType));
}

#[test]
fn equal_ignores_nothing_compat_included() {
    let bytes = [0u8, 0, 0, 8, 0, 1, 0, 0];
    let config = DialectConfig::default();
    let sink = NullSink;
    let a = decode_v10(&bytes, &config, &sink).unwrap();
    let b = vec![ActionRecord::new(Action::Output { port: 1, max_len: 0 })];
    // same action, but `a` remembers Ofp10 compat and `b` doesn't: not equal.
    assert!(!equal(&a, &b));
    assert!(equal(&a, &a));
}
