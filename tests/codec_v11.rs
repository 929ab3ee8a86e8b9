//! Round-trip and validation tests for the OpenFlow 1.1+ plain action list
//! (no instruction wrapping), including NX fallback and `compat`-preferred
//! shape preservation.

use ofp_actions::diag::NullSink;
use ofp_actions::opcode::NxSubtype;
use ofp_actions::subcodec::RegLoadSpec;
use ofp_actions::{decode_v11_actions, encode_v11_actions, Action, ActionRecord, Compat, DialectConfig};

fn config() -> DialectConfig {
    DialectConfig::default()
}

fn roundtrip(bytes: &[u8]) -> Vec<ActionRecord> {
    let sink = NullSink;
    let decoded = decode_v11_actions(bytes, &config(), &sink).expect("decode should succeed");
    let reencoded = encode_v11_actions(&decoded, &config()).expect("encode should succeed");
    assert_eq!(reencoded, bytes, "re-encoding must reproduce the original wire bytes");
    decoded
}

#[test]
fn native_output_round_trips() {
    // OFPAT11_OUTPUT: type=0 len=16 port=1 max_len=0 pad(6)
    let bytes = [0u8, 0, 0, 16, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0];
    let decoded = roundtrip(&bytes);
    assert_eq!(decoded[0].action, Action::Output { port: 1, max_len: 0 });
}

#[test]
fn output_to_reserved_controller_port_round_trips() {
    // port = OFPP11_CONTROLLER = 0xfffffffd
    let mut bytes = vec![0u8, 0, 0, 16];
    bytes.extend_from_slice(&0xffff_fffdu32.to_be_bytes());
    bytes.extend_from_slice(&0u16.to_be_bytes()); // max_len
    bytes.extend_from_slice(&[0u8; 6]);
    let decoded = roundtrip(&bytes);
    assert_eq!(decoded[0].action, Action::Output { port: ofp_actions::consts::OFPP_CONTROLLER as u32, max_len: 0 });
}

#[test]
fn group_action_round_trips() {
    // OFPAT11_GROUP: type=22 len=8 group_id=9
    let bytes = [0u8, 22, 0, 8, 0, 0, 0, 9];
    let decoded = roundtrip(&bytes);
    assert_eq!(decoded[0].action, Action::Group { group_id: 9 });
}

#[test]
fn set_tunnel_nx_fallback_round_trips_narrow() {
    // NXAST_SET_TUNNEL: vendor header(10) + pad(2) + tun_id(4) = 16 bytes
    let mut bytes = vec![0xffu8, 0xff, 0, 16];
    bytes.extend_from_slice(&0x0000_2320u32.to_be_bytes()); // NX_VENDOR_ID
    bytes.extend_from_slice(&2u16.to_be_bytes()); // NXAST_SET_TUNNEL
    bytes.extend_from_slice(&[0u8; 2]);
    bytes.extend_from_slice(&0x1234_5678u32.to_be_bytes());
    let decoded = roundtrip(&bytes);
    assert_eq!(decoded[0].action, Action::SetTunnel { tun_id: 0x1234_5678 });
    assert_eq!(decoded[0].compat, Compat::Nx(NxSubtype::SetTunnel));
}

#[test]
fn set_tunnel_promotes_to_64_bit_when_value_does_not_fit() {
    // A tun_id that doesn't fit in 32 bits must always encode as set_tunnel64,
    // regardless of any remembered compat.
    let record = ActionRecord::new(Action::SetTunnel { tun_id: 0x1_0000_0000 });
    let bytes = encode_v11_actions(std::slice::from_ref(&record), &config()).unwrap();
    let sink = NullSink;
    let decoded = decode_v11_actions(&bytes, &config(), &sink).unwrap();
    assert_eq!(decoded[0].action, Action::SetTunnel { tun_id: 0x1_0000_0000 });
    assert_eq!(decoded[0].compat, Compat::Nx(NxSubtype::SetTunnel64));
}

#[test]
fn set_tunnel_honors_compat_hint_for_a_narrow_value() {
    // A value that fits in 32 bits but was remembered as having come from
    // set_tunnel64 must re-encode as set_tunnel64, not silently narrow.
    let record = ActionRecord::with_compat(Action::SetTunnel { tun_id: 42 }, Compat::Nx(NxSubtype::SetTunnel64));
    let bytes = encode_v11_actions(std::slice::from_ref(&record), &config()).unwrap();
    let sink = NullSink;
    let decoded = decode_v11_actions(&bytes, &config(), &sink).unwrap();
    assert_eq!(decoded[0].compat, Compat::Nx(NxSubtype::SetTunnel64));
}

#[test]
fn nx_set_queue_compat_is_preferred_over_native_shape() {
    // A record remembered as NX set_queue must not be silently upgraded to
    // the native OFPAT11_SET_QUEUE action on re-encode.
    let record = ActionRecord::with_compat(Action::SetQueue { queue_id: 3 }, Compat::Nx(NxSubtype::SetQueue));
    let bytes = encode_v11_actions(std::slice::from_ref(&record), &config()).unwrap();
    // native OFPAT11_SET_QUEUE is type=21, len=8; the NX fallback starts
    // with type=0xffff.
    assert_eq!(&bytes[0..2], &0xffffu16.to_be_bytes());
}

#[test]
fn set_queue_with_no_compat_prefers_the_native_shape() {
    let record = ActionRecord::new(Action::SetQueue { queue_id: 3 });
    let bytes = encode_v11_actions(std::slice::from_ref(&record), &config()).unwrap();
    assert_eq!(&bytes[0..2], &21u16.to_be_bytes());
}

#[test]
fn set_field_round_trips_as_reg_load_with_compat() {
    let spec = RegLoadSpec { dst_field: 5, offset: 0, n_bits: 32, value: 0xdead_beef };
    let record = ActionRecord::with_compat(Action::RegLoad(spec), Compat::SetField);
    let bytes = encode_v11_actions(std::slice::from_ref(&record), &config()).unwrap();
    // OFPAT12_SET_FIELD wire type is 25.
    assert_eq!(&bytes[0..2], &25u16.to_be_bytes());
    let sink = NullSink;
    let decoded = decode_v11_actions(&bytes, &config(), &sink).unwrap();
    assert_eq!(decoded[0].action, Action::RegLoad(spec));
    assert_eq!(decoded[0].compat, Compat::SetField);
}

#[test]
fn reg_load_with_no_compat_falls_back_to_nx() {
    let spec = RegLoadSpec { dst_field: 5, offset: 0, n_bits: 16, value: 7 };
    let record = ActionRecord::new(Action::RegLoad(spec));
    let bytes = encode_v11_actions(std::slice::from_ref(&record), &config()).unwrap();
    assert_eq!(&bytes[0..2], &0xffffu16.to_be_bytes());
    let sink = NullSink;
    let decoded = decode_v11_actions(&bytes, &config(), &sink).unwrap();
    assert_eq!(decoded[0].action, Action::RegLoad(spec));
    assert_eq!(decoded[0].compat, Compat::Nx(NxSubtype::RegLoad));
}

#[test]
fn dec_ttl_plain_and_with_controller_ids_round_trip() {
    // Plain dec_ttl (controller_ids == [0]) defaults to NXAST_DEC_TTL.
    let plain = ActionRecord::new(Action::DecTtl { controller_ids: vec![0] });
    let bytes = encode_v11_actions(std::slice::from_ref(&plain), &config()).unwrap();
    let sink = NullSink;
    let decoded = decode_v11_actions(&bytes, &config(), &sink).unwrap();
    assert_eq!(decoded[0].action, Action::DecTtl { controller_ids: vec![0] });

    // dec_ttl with explicit controller ids must use NXAST_DEC_TTL_CNT_IDS
    // and round-trip the full id list.
    let with_ids = ActionRecord::new(Action::DecTtl { controller_ids: vec![1, 2, 3] });
    let bytes = encode_v11_actions(std::slice::from_ref(&with_ids), &config()).unwrap();
    let decoded = decode_v11_actions(&bytes, &config(), &sink).unwrap();
    assert_eq!(decoded[0].action, Action::DecTtl { controller_ids: vec![1, 2, 3] });
    assert_eq!(decoded[0].compat, Compat::Nx(NxSubtype::DecTtlCntIds));
}

#[test]
fn push_mpls_rejects_non_mpls_ethertype() {
    let bytes = [0u8, 19, 0, 8, 0x08, 0x00, 0, 0]; // ethertype 0x0800 is not MPLS
    let sink = NullSink;
    let err = decode_v11_actions(&bytes, &config(), &sink).unwrap_err();
    assert!(matches!(err, ofp_actions::Error::BadArgument { .. }));
}

#[test]
fn experimenter_with_foreign_vendor_is_bad_vendor() {
    let mut bytes = vec![0xffu8, 0xff, 0, 16];
    bytes.extend_from_slice(&0xdead_beefu32.to_be_bytes());
    bytes.extend_from_slice(&[0u8; 8]);
    let sink = NullSink;
    let err = decode_v11_actions(&bytes, &config(), &sink).unwrap_err();
    assert!(matches!(err, ofp_actions::Error::BadVendor));
}
