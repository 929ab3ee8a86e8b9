//! Canonical text formatter tests (§4.I).

use ofp_actions::opcode::NxSubtype;
use ofp_actions::subcodec::RegLoadSpec;
use ofp_actions::{format, Action, ActionRecord, Compat};

#[test]
fn empty_action_list_formats_as_drop() {
    assert_eq!(format(&[]), "actions=drop");
}

#[test]
fn output_formats_with_symbolic_reserved_ports() {
    let actions = vec![
        ActionRecord::new(Action::Output { port: 3, max_len: 0 }),
        ActionRecord::new(Action::Output { port: ofp_actions::consts::OFPP_FLOOD as u32, max_len: 0 }),
    ];
    assert_eq!(format(&actions), "actions=output:3,FLOOD");
}

#[test]
fn controller_formats_compactly_for_the_common_case() {
    let actions = vec![ActionRecord::new(Action::Controller { max_len: 128, controller_id: 0, reason: 0 })];
    assert_eq!(format(&actions), "actions=CONTROLLER:128");
}

#[test]
fn controller_formats_verbosely_for_a_nonzero_id() {
    let actions = vec![ActionRecord::new(Action::Controller { max_len: 128, controller_id: 7, reason: 0 })];
    assert_eq!(format(&actions), "actions=controller(reason=0,max_len=128,id=7)");
}

#[test]
fn set_tunnel_formats_narrow_by_default_and_wide_when_it_does_not_fit() {
    let narrow = vec![ActionRecord::new(Action::SetTunnel { tun_id: 0x2a })];
    assert_eq!(format(&narrow), "actions=set_tunnel:0x2a");

    let wide = vec![ActionRecord::new(Action::SetTunnel { tun_id: 0x1_0000_0000 })];
    assert_eq!(format(&wide), "actions=set_tunnel64:0x100000000");

    let compat_wide = vec![ActionRecord::with_compat(Action::SetTunnel { tun_id: 1 }, Compat::Nx(NxSubtype::SetTunnel64))];
    assert_eq!(format(&compat_wide), "actions=set_tunnel64:0x1");
}

#[test]
fn dec_ttl_formats_compactly_for_a_single_zero_id() {
    let plain = vec![ActionRecord::new(Action::DecTtl { controller_ids: vec![0] })];
    assert_eq!(format(&plain), "actions=dec_ttl");

    let with_ids = vec![ActionRecord::new(Action::DecTtl { controller_ids: vec![1, 2] })];
    assert_eq!(format(&with_ids), "actions=dec_ttl(1,2)");
}

#[test]
fn write_metadata_formats_with_mask_only_when_not_all_ones() {
    let full = vec![ActionRecord::new(Action::WriteMetadata { value: 0x42, mask: u64::MAX })];
    assert_eq!(format(&full), "actions=write_metadata:0x42");

    let masked = vec![ActionRecord::new(Action::WriteMetadata { value: 0x42, mask: 0xff })];
    assert_eq!(format(&masked), "actions=write_metadata:0x42/0xff");
}

#[test]
fn resubmit_formats_compactly_for_the_current_table_shape() {
    let compact = vec![ActionRecord::new(Action::Resubmit {
        in_port: 3,
        table_id: ofp_actions::consts::RESUBMIT_CURRENT_TABLE,
    })];
    assert_eq!(format(&compact), "actions=resubmit:3");

    let verbose = vec![ActionRecord::new(Action::Resubmit { in_port: 3, table_id: 2 })];
    assert_eq!(format(&verbose), "actions=resubmit(port=3,table=2)");
}

#[test]
fn note_formats_as_dotted_hex() {
    let actions = vec![ActionRecord::new(Action::Note { data: vec![0xde, 0xad, 0xbe, 0xef] })];
    assert_eq!(format(&actions), "actions=note:de.ad.be.ef");
}

#[test]
fn reg_load_delegates_to_its_own_formatter() {
    let spec = RegLoadSpec { dst_field: 5, offset: 0, n_bits: 16, value: 7 };
    let actions = vec![ActionRecord::new(Action::RegLoad(spec))];
    assert_eq!(format(&actions), format!("actions={}", spec.format()));
}

#[test]
fn multiple_actions_join_with_commas() {
    let actions = vec![
        ActionRecord::new(Action::StripVlan),
        ActionRecord::new(Action::SetEthDst { mac: [0, 1, 2, 3, 4, 5] }),
        ActionRecord::new(Action::Output { port: 1, max_len: 0 }),
    ];
    assert_eq!(format(&actions), "actions=strip_vlan,mod_dl_dst:00:01:02:03:04:05,output:1");
}
