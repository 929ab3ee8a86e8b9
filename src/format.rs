//! Canonical text formatter (§4.I): one-way rendering of an internal action
//! list into the compact form used by flow dumps. Never fails.

use crate::action::{Action, ActionRecord, Compat};
use crate::consts::{
    OFPP_ALL, OFPP_CONTROLLER, OFPP_FLOOD, OFPP_IN_PORT, OFPP_LOCAL, OFPP_NORMAL, OFPP_TABLE,
};
use crate::opcode::NxSubtype;
use std::fmt::Write as _;

/// `ofp_packet_in_reason::OFPR_ACTION`: the reason code a `controller`
/// action renders compactly under.
const REASON_ACTION: u8 = 0;

fn format_port(port: u32) -> String {
    if port == OFPP_IN_PORT as u32 {
        "IN_PORT".to_string()
    } else if port == OFPP_TABLE as u32 {
        "TABLE".to_string()
    } else if port == OFPP_NORMAL as u32 {
        "NORMAL".to_string()
    } else if port == OFPP_FLOOD as u32 {
        "FLOOD".to_string()
    } else if port == OFPP_ALL as u32 {
        "ALL".to_string()
    } else if port == OFPP_CONTROLLER as u32 {
        "CONTROLLER".to_string()
    } else if port == OFPP_LOCAL as u32 {
        "LOCAL".to_string()
    } else {
        format!("output:{port}")
    }
}

fn format_note(data: &[u8]) -> String {
    let hex: Vec<String> = data.iter().map(|b| format!("{b:02x}")).collect();
    format!("note:{}", hex.join("."))
}

fn format_one(record: &ActionRecord, out: &mut String) {
    match &record.action {
        Action::Output { port, .. } => {
            let _ = write!(out, "{}", format_port(*port));
        }
        Action::Controller { max_len, controller_id, reason } => {
            if *reason == REASON_ACTION && *controller_id == 0 {
                let _ = write!(out, "CONTROLLER:{max_len}");
            } else {
                let _ = write!(out, "controller(reason={reason},max_len={max_len},id={controller_id})");
            }
        }
        Action::Enqueue { port, queue_id } => {
            let _ = write!(out, "enqueue:{port}q{queue_id}");
        }
        Action::OutputReg(spec) => {
            let _ = write!(out, "{}", spec.format());
        }
        Action::Bundle(spec) => {
            let _ = write!(out, "{}", spec.format());
        }
        Action::SetVlanVid { vlan_vid } => {
            let _ = write!(out, "mod_vlan_vid:{vlan_vid}");
        }
        Action::SetVlanPcp { vlan_pcp } => {
            let _ = write!(out, "mod_vlan_pcp:{vlan_pcp}");
        }
        Action::StripVlan => {
            let _ = write!(out, "strip_vlan");
        }
        Action::PushVlan { ethertype } => {
            let _ = write!(out, "push_vlan:0x{ethertype:04x}");
        }
        Action::SetEthSrc { mac } => {
            let _ = write!(out, "mod_dl_src:{}", format_mac(mac));
        }
        Action::SetEthDst { mac } => {
            let _ = write!(out, "mod_dl_dst:{}", format_mac(mac));
        }
        Action::SetIpv4Src { addr } => {
            let _ = write!(out, "mod_nw_src:{}", format_ipv4(*addr));
        }
        Action::SetIpv4Dst { addr } => {
            let _ = write!(out, "mod_nw_dst:{}", format_ipv4(*addr));
        }
        Action::SetIpv4Dscp { dscp } => {
            let _ = write!(out, "mod_nw_tos:{dscp}");
        }
        Action::SetL4SrcPort { port } => {
            let _ = write!(out, "mod_tp_src:{port}");
        }
        Action::SetL4DstPort { port } => {
            let _ = write!(out, "mod_tp_dst:{port}");
        }
        Action::RegMove(spec) => {
            let _ = write!(out, "{}", spec.format());
        }
        Action::RegLoad(spec) => {
            let _ = write!(out, "{}", spec.format());
        }
        Action::DecTtl { controller_ids } => {
            if controller_ids.len() == 1 && controller_ids[0] == 0 {
                let _ = write!(out, "dec_ttl");
            } else {
                let _ = write!(out, "dec_ttl({})", controller_ids.iter().map(u16::to_string).collect::<Vec<_>>().join(","));
            }
        }
        Action::SetMplsTtl { ttl } => {
            let _ = write!(out, "set_mpls_ttl:{ttl}");
        }
        Action::PushMpls { ethertype } => {
            let _ = write!(out, "push_mpls:0x{ethertype:04x}");
        }
        Action::PopMpls { ethertype } => {
            let _ = write!(out, "pop_mpls:0x{ethertype:04x}");
        }
        Action::PushL2 => {
            let _ = write!(out, "push_l2");
        }
        Action::PopL2 => {
            let _ = write!(out, "pop_l2");
        }
        Action::SetTunnel { tun_id } => {
            let use_64 = *tun_id > u64::from(u32::MAX) || matches!(record.compat, Compat::Nx(NxSubtype::SetTunnel64));
            if use_64 {
                let _ = write!(out, "set_tunnel64:0x{tun_id:x}");
            } else {
                let _ = write!(out, "set_tunnel:0x{tun_id:x}");
            }
        }
        Action::SetQueue { queue_id } => {
            let _ = write!(out, "set_queue:{queue_id}");
        }
        Action::PopQueue => {
            let _ = write!(out, "pop_queue");
        }
        Action::FinTimeout { fin_idle_timeout, fin_hard_timeout } => {
            let _ = write!(out, "fin_timeout(idle_timeout={fin_idle_timeout},hard_timeout={fin_hard_timeout})");
        }
        Action::Resubmit { in_port, table_id } => {
            if *table_id == crate::consts::RESUBMIT_CURRENT_TABLE && *in_port != OFPP_IN_PORT {
                let _ = write!(out, "resubmit:{in_port}");
            } else {
                let _ = write!(out, "resubmit(port={in_port},table={table_id})");
            }
        }
        Action::Learn(spec) => {
            let _ = write!(out, "{}", spec.format());
        }
        Action::Multipath(spec) => {
            let _ = write!(out, "{}", spec.format());
        }
        Action::Note { data } => {
            let _ = write!(out, "{}", format_note(data));
        }
        Action::Exit => {
            let _ = write!(out, "exit");
        }
        Action::WriteMetadata { value, mask } => {
            if *mask == u64::MAX {
                let _ = write!(out, "write_metadata:0x{value:x}");
            } else {
                let _ = write!(out, "write_metadata:0x{value:x}/0x{mask:x}");
            }
        }
        Action::ClearActions => {
            let _ = write!(out, "clear_actions");
        }
        Action::GotoTable { table_id } => {
            let _ = write!(out, "goto_table:{table_id}");
        }
        Action::Group { group_id } => {
            let _ = write!(out, "group:{group_id}");
        }
        Action::Meter { meter_id } => {
            let _ = write!(out, "meter:{meter_id}");
        }
    }
}

fn format_mac(mac: &[u8; 6]) -> String {
    mac.iter().map(|b| format!("{b:02x}")).collect::<Vec<_>>().join(":")
}

fn format_ipv4(addr: u32) -> String {
    let b = addr.to_be_bytes();
    format!("{}.{}.{}.{}", b[0], b[1], b[2], b[3])
}

/// Renders `actions` as the `actions=...` canonical text form. Never fails:
/// an empty list renders as `actions=drop`.
pub fn format(actions: &[ActionRecord]) -> String {
    if actions.is_empty() {
        return "actions=drop".to_string();
    }
    let mut out = String::from("actions=");
    for (i, record) in actions.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        format_one(record, &mut out);
    }
    out
}
