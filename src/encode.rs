//! Internal→wire encoder (§4.F): the inverse of [`crate::decode`] and
//! [`crate::instructions`] for each of the three wire targets.

use crate::action::{Action, ActionRecord, Compat, Kind};
use crate::config::DialectConfig;
use crate::consts::{self, NX_VENDOR_ID};
use crate::error::Error;
use crate::opcode::{NxSubtype, Ofp10ActionType, Ofp11ActionType};
use crate::wire::Writer;

const VENDOR_WIRE_CODE: u16 = 0xffff;

fn begin_nx(w: &mut Writer, subtype: NxSubtype) -> usize {
    let start = w.len();
    w.push_u16(VENDOR_WIRE_CODE);
    w.push_u16(0);
    w.push_u32(NX_VENDOR_ID);
    w.push_u16(subtype.wire_code());
    start
}

fn finish_nx(w: &mut Writer, start: usize) {
    w.align_from(start);
    let len = (w.len() - start) as u16;
    w.patch_u16(start + 2, len);
}

fn begin_action(w: &mut Writer, wire_code: u16) -> usize {
    let start = w.len();
    w.push_u16(wire_code);
    w.push_u16(0);
    start
}

fn finish_action(w: &mut Writer, start: usize, fixed_size: usize) {
    debug_assert_eq!(w.len() - start, fixed_size);
    let len = fixed_size as u16;
    w.patch_u16(start + 2, len);
}

/// Whether `dec_ttl`'s controller-id list is exactly the plain-shape
/// default (`n=1, ids=[0]`), the only content the narrower wire shapes
/// (`dec_ttl`/`dec_nw_ttl`/`dec_mpls_ttl`) can represent.
fn dec_ttl_is_plain_shape(ids: &[u16]) -> bool {
    ids == [0]
}

/// Encodes an internal action list as OpenFlow 1.0 wire actions.
pub fn encode_v10(actions: &[ActionRecord]) -> Result<Vec<u8>, Error> {
    let mut w = Writer::new();
    for record in actions {
        encode_v10_one(record, &mut w)?;
    }
    Ok(w.into_inner())
}

fn encode_v10_one(record: &ActionRecord, w: &mut Writer) -> Result<(), Error> {
    match &record.action {
        Action::Output { port, max_len } => {
            if *port > 0xffff {
                return Err(Error::UnrepresentableInTarget { kind: Kind::Output });
            }
            let start = begin_action(w, Ofp10ActionType::Output.wire_code());
            w.push_u16(*port as u16);
            w.push_u16(*max_len);
            finish_action(w, start, 8);
        }
        Action::Enqueue { port, queue_id } => {
            let start = begin_action(w, Ofp10ActionType::Enqueue.wire_code());
            w.push_u16(*port);
            w.push_zeros(6);
            w.push_u32(*queue_id);
            finish_action(w, start, 16);
        }
        _ => return encode_common_field_setter(record, w, FieldTarget::V10).or_else(|e| match e {
            Error::UnrepresentableInTarget { .. } => encode_nx_fallback(record, w),
            other => Err(other),
        }),
    }
    Ok(())
}

/// Encodes an internal action list as plain OpenFlow 1.1 wire actions (no
/// instruction wrapping).
pub fn encode_v11_actions(actions: &[ActionRecord], config: &DialectConfig) -> Result<Vec<u8>, Error> {
    let mut w = Writer::new();
    encode_v11_actions_into(actions, &mut w, config)?;
    Ok(w.into_inner())
}

pub(crate) fn encode_v11_actions_into(actions: &[ActionRecord], w: &mut Writer, config: &DialectConfig) -> Result<(), Error> {
    for record in actions {
        encode_v11_one(record, w, config)?;
    }
    Ok(())
}

fn encode_v11_one(record: &ActionRecord, w: &mut Writer, config: &DialectConfig) -> Result<(), Error> {
    match &record.action {
        Action::Output { port, max_len } => {
            let wire_port = consts::map_internal_port_to_ofp11(*port);
            let start = begin_action(w, Ofp11ActionType::Output.wire_code());
            w.push_u32(wire_port);
            w.push_u16(*max_len);
            w.push_zeros(6);
            finish_action(w, start, 16);
        }
        Action::PushVlan { ethertype } => {
            let start = begin_action(w, Ofp11ActionType::PushVlan.wire_code());
            w.push_u16(*ethertype);
            w.push_zeros(2);
            finish_action(w, start, 8);
        }
        Action::PushMpls { ethertype } => {
            let start = begin_action(w, Ofp11ActionType::PushMpls.wire_code());
            w.push_u16(*ethertype);
            w.push_zeros(2);
            finish_action(w, start, 8);
        }
        Action::PopMpls { ethertype } => {
            let start = begin_action(w, Ofp11ActionType::PopMpls.wire_code());
            w.push_u16(*ethertype);
            w.push_zeros(2);
            finish_action(w, start, 8);
        }
        Action::SetQueue { queue_id } if !matches!(record.compat, Compat::Nx(NxSubtype::SetQueue)) => {
            let start = begin_action(w, Ofp11ActionType::SetQueue.wire_code());
            w.push_u32(*queue_id);
            finish_action(w, start, 8);
        }
        Action::Group { group_id } if config.enable_group => {
            let start = begin_action(w, Ofp11ActionType::Group.wire_code());
            w.push_u32(*group_id);
            finish_action(w, start, 8);
        }
        Action::SetMplsTtl { ttl } if config.enable_set_mpls_ttl && !matches!(record.compat, Compat::Nx(NxSubtype::SetMplsTtl)) => {
            let wire_ty = match record.compat {
                Compat::Ofp11(t @ (Ofp11ActionType::SetMplsLabel | Ofp11ActionType::SetMplsTc | Ofp11ActionType::SetNwTtl)) => t,
                _ => Ofp11ActionType::SetMplsTtl,
            };
            let start = begin_action(w, wire_ty.wire_code());
            w.push_u8(*ttl);
            w.push_zeros(3);
            finish_action(w, start, 8);
        }
        Action::PushL2 if config.enable_push_pop_l2 && !matches!(record.compat, Compat::Nx(NxSubtype::PushL2)) => {
            let start = begin_action(w, Ofp11ActionType::CopyTtlOut.wire_code());
            w.push_zeros(4);
            finish_action(w, start, 8);
        }
        Action::PopL2 if config.enable_push_pop_l2 && !matches!(record.compat, Compat::Nx(NxSubtype::PopL2)) => {
            let start = begin_action(w, Ofp11ActionType::CopyTtlIn.wire_code());
            w.push_zeros(4);
            finish_action(w, start, 8);
        }
        Action::DecTtl { controller_ids } if dec_ttl_is_plain_shape(controller_ids) && !matches!(record.compat, Compat::Nx(_)) => {
            let wire_ty = if matches!(record.compat, Compat::Ofp11(Ofp11ActionType::DecNwTtl)) {
                Ofp11ActionType::DecNwTtl
            } else {
                Ofp11ActionType::DecMplsTtl
            };
            let start = begin_action(w, wire_ty.wire_code());
            w.push_zeros(4);
            finish_action(w, start, 8);
        }
        _ => return encode_common_field_setter(record, w, FieldTarget::V11).or_else(|e| match e {
            Error::UnrepresentableInTarget { .. } => encode_nx_fallback(record, w),
            other => Err(other),
        }),
    }
    Ok(())
}

enum FieldTarget {
    V10,
    V11,
}

/// Encodes the field-setter kinds whose wire shape is identical between
/// 1.0 and 1.1 (only the opcode numbering differs). Returns
/// `UnrepresentableInTarget` for anything else so the caller can fall
/// through to the NX encoder.
fn encode_common_field_setter(record: &ActionRecord, w: &mut Writer, target: FieldTarget) -> Result<(), Error> {
    let code = |v10: Ofp10ActionType, v11: Ofp11ActionType| match target {
        FieldTarget::V10 => v10.wire_code(),
        FieldTarget::V11 => v11.wire_code(),
    };
    match &record.action {
        Action::SetVlanVid { vlan_vid } => {
            let start = begin_action(w, code(Ofp10ActionType::SetVlanVid, Ofp11ActionType::SetVlanVid));
            w.push_u16(*vlan_vid);
            w.push_zeros(2);
            finish_action(w, start, 8);
        }
        Action::SetVlanPcp { vlan_pcp } => {
            let start = begin_action(w, code(Ofp10ActionType::SetVlanPcp, Ofp11ActionType::SetVlanPcp));
            w.push_u8(*vlan_pcp);
            w.push_zeros(3);
            finish_action(w, start, 8);
        }
        Action::StripVlan => {
            let start = begin_action(w, code(Ofp10ActionType::StripVlan, Ofp11ActionType::PopVlan));
            w.push_zeros(4);
            finish_action(w, start, 8);
        }
        Action::SetEthSrc { mac } => {
            let start = begin_action(w, code(Ofp10ActionType::SetDlSrc, Ofp11ActionType::SetDlSrc));
            w.push_bytes(mac);
            w.push_zeros(6);
            finish_action(w, start, 16);
        }
        Action::SetEthDst { mac } => {
            let start = begin_action(w, code(Ofp10ActionType::SetDlDst, Ofp11ActionType::SetDlDst));
            w.push_bytes(mac);
            w.push_zeros(6);
            finish_action(w, start, 16);
        }
        Action::SetIpv4Src { addr } => {
            let start = begin_action(w, code(Ofp10ActionType::SetNwSrc, Ofp11ActionType::SetNwSrc));
            w.push_u32(*addr);
            finish_action(w, start, 8);
        }
        Action::SetIpv4Dst { addr } => {
            let start = begin_action(w, code(Ofp10ActionType::SetNwDst, Ofp11ActionType::SetNwDst));
            w.push_u32(*addr);
            finish_action(w, start, 8);
        }
        Action::SetIpv4Dscp { dscp } => {
            let start = begin_action(w, code(Ofp10ActionType::SetNwTos, Ofp11ActionType::SetNwTos));
            w.push_u8(*dscp);
            w.push_zeros(3);
            finish_action(w, start, 8);
        }
        Action::SetL4SrcPort { port } => {
            let start = begin_action(w, code(Ofp10ActionType::SetTpSrc, Ofp11ActionType::SetTpSrc));
            w.push_u16(*port);
            w.push_zeros(2);
            finish_action(w, start, 8);
        }
        Action::SetL4DstPort { port } => {
            let start = begin_action(w, code(Ofp10ActionType::SetTpDst, Ofp11ActionType::SetTpDst));
            w.push_u16(*port);
            w.push_zeros(2);
            finish_action(w, start, 8);
        }
        Action::RegLoad(spec) if matches!(record.compat, Compat::SetField) => {
            if let FieldTarget::V11 = target {
                let start = begin_action(w, Ofp11ActionType::SetField.wire_code());
                crate::subcodec::encode_set_field(spec, w);
                let len = (w.len() - start) as u16;
                w.patch_u16(start + 2, len);
            } else {
                return Err(Error::UnrepresentableInTarget { kind: Kind::RegLoad });
            }
        }
        _ => return Err(Error::UnrepresentableInTarget { kind: record.kind() }),
    }
    Ok(())
}

/// NX-vendor fallback (§4.F "Unrepresentable in target"): every kind this
/// crate supports that has no native 1.0/1.1 action is emitted as an NX
/// action instead.
fn encode_nx_fallback(record: &ActionRecord, w: &mut Writer) -> Result<(), Error> {
    match &record.action {
        Action::Controller { max_len, controller_id, reason } => {
            let start = begin_nx(w, NxSubtype::Controller);
            w.push_u16(*max_len);
            w.push_u16(*controller_id);
            w.push_u8(*reason);
            w.push_zeros(1);
            finish_nx(w, start);
        }
        Action::OutputReg(spec) => {
            let start = begin_nx(w, NxSubtype::OutputReg);
            spec.encode(w);
            finish_nx(w, start);
        }
        Action::Bundle(spec) => {
            let subtype = if spec.dst.is_some() { NxSubtype::BundleLoad } else { NxSubtype::Bundle };
            let start = begin_nx(w, subtype);
            spec.encode(w);
            finish_nx(w, start);
        }
        Action::RegMove(spec) => {
            let start = begin_nx(w, NxSubtype::RegMove);
            spec.encode(w);
            finish_nx(w, start);
        }
        Action::RegLoad(spec) => {
            let start = begin_nx(w, NxSubtype::RegLoad);
            spec.encode(w);
            finish_nx(w, start);
        }
        Action::DecTtl { controller_ids } => {
            if dec_ttl_is_plain_shape(controller_ids) {
                let subtype = if matches!(record.compat, Compat::Nx(NxSubtype::DecMplsTtl)) {
                    NxSubtype::DecMplsTtl
                } else {
                    NxSubtype::DecTtl
                };
                let start = begin_nx(w, subtype);
                w.push_zeros(6);
                finish_nx(w, start);
            } else {
                let start = begin_nx(w, NxSubtype::DecTtlCntIds);
                w.push_u16(controller_ids.len() as u16);
                w.push_zeros(4);
                let ids_start = w.len();
                for id in controller_ids {
                    w.push_u16(*id);
                }
                w.align_from(ids_start);
                finish_nx(w, start);
            }
        }
        Action::SetMplsTtl { ttl } => {
            let start = begin_nx(w, NxSubtype::SetMplsTtl);
            w.push_u8(*ttl);
            w.push_zeros(5);
            finish_nx(w, start);
        }
        Action::PushMpls { ethertype } => {
            let start = begin_nx(w, NxSubtype::PushMpls);
            w.push_u16(*ethertype);
            w.push_zeros(4);
            finish_nx(w, start);
        }
        Action::PopMpls { ethertype } => {
            let start = begin_nx(w, NxSubtype::PopMpls);
            w.push_u16(*ethertype);
            w.push_zeros(4);
            finish_nx(w, start);
        }
        Action::PushL2 => {
            let start = begin_nx(w, NxSubtype::PushL2);
            w.push_zeros(6);
            finish_nx(w, start);
        }
        Action::PopL2 => {
            let start = begin_nx(w, NxSubtype::PopL2);
            w.push_zeros(6);
            finish_nx(w, start);
        }
        Action::SetTunnel { tun_id } => {
            let fits_u32 = *tun_id <= u64::from(u32::MAX);
            let prefer_64 = !fits_u32 || matches!(record.compat, Compat::Nx(NxSubtype::SetTunnel64));
            if prefer_64 {
                let start = begin_nx(w, NxSubtype::SetTunnel64);
                w.push_zeros(6);
                w.push_u64(*tun_id);
                finish_nx(w, start);
            } else {
                let start = begin_nx(w, NxSubtype::SetTunnel);
                w.push_zeros(2);
                w.push_u32(*tun_id as u32);
                finish_nx(w, start);
            }
        }
        Action::SetQueue { queue_id } => {
            let start = begin_nx(w, NxSubtype::SetQueue);
            w.push_zeros(2);
            w.push_u32(*queue_id);
            finish_nx(w, start);
        }
        Action::PopQueue => {
            let start = begin_nx(w, NxSubtype::PopQueue);
            w.push_zeros(6);
            finish_nx(w, start);
        }
        Action::FinTimeout { fin_idle_timeout, fin_hard_timeout } => {
            let start = begin_nx(w, NxSubtype::FinTimeout);
            w.push_u16(*fin_idle_timeout);
            w.push_u16(*fin_hard_timeout);
            w.push_zeros(2);
            finish_nx(w, start);
        }
        Action::Resubmit { in_port, table_id } => {
            let plain_ok = *table_id == consts::RESUBMIT_CURRENT_TABLE && !matches!(record.compat, Compat::Nx(NxSubtype::ResubmitTable));
            if plain_ok {
                let start = begin_nx(w, NxSubtype::Resubmit);
                w.push_u16(*in_port);
                w.push_zeros(4);
                finish_nx(w, start);
            } else {
                let start = begin_nx(w, NxSubtype::ResubmitTable);
                w.push_u16(*in_port);
                w.push_u8(*table_id);
                w.push_zeros(1);
                w.push_zeros(2);
                finish_nx(w, start);
            }
        }
        Action::Learn(spec) => {
            let start = begin_nx(w, NxSubtype::Learn);
            spec.encode(w);
            finish_nx(w, start);
        }
        Action::Multipath(spec) => {
            let start = begin_nx(w, NxSubtype::Multipath);
            spec.encode(w);
            finish_nx(w, start);
        }
        Action::Note { data } => {
            let start = begin_nx(w, NxSubtype::Note);
            w.push_bytes(data);
            finish_nx(w, start);
        }
        Action::Exit => {
            let start = begin_nx(w, NxSubtype::Exit);
            w.push_zeros(6);
            finish_nx(w, start);
        }
        Action::WriteMetadata { value, mask } => {
            let start = begin_nx(w, NxSubtype::WriteMetadata);
            w.push_zeros(6);
            w.push_u64(*value);
            w.push_u64(*mask);
            finish_nx(w, start);
        }
        other => return Err(Error::UnrepresentableInTarget { kind: other.kind() }),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_v10;
    use crate::diag::NullSink;

    #[test]
    fn nx_write_metadata_round_trips_through_v10() {
        let action = ActionRecord::new(Action::WriteMetadata { value: 0x1122, mask: 0xff00 });
        let bytes = encode_v10(&[action]).expect("encode should succeed");

        let config = DialectConfig::default();
        let decoded = decode_v10(&bytes, &config, &NullSink).expect("decode should succeed");
        assert_eq!(decoded[0].action, Action::WriteMetadata { value: 0x1122, mask: 0xff00 });

        let reencoded = encode_v10(&decoded).expect("re-encode should succeed");
        assert_eq!(reencoded, bytes, "NX write_metadata must round-trip byte for byte");
    }
}
