//! Wire→internal decoding for plain OpenFlow 1.1 actions (§4.D).

use crate::action::{Action, Compat};
use crate::config::DialectConfig;
use crate::consts;
use crate::error::Error;
use crate::opcode::Ofp11ActionType;
use crate::wire::Cursor;

const HEADER: usize = 4;

pub fn decode(ty: Ofp11ActionType, body: &mut Cursor<'_>, config: &DialectConfig) -> Result<(Action, Compat), Error> {
    body.skip(HEADER)?;
    use Ofp11ActionType::*;
    let action = match ty {
        Output => {
            let port = body.read_u32()?;
            let max_len = body.read_u16()?;
            body.skip(6)?;
            let port = consts::map_ofp11_port_to_internal(port)
                .ok_or_else(|| Error::bad_argument(format!("output: unrecognised reserved port 0x{port:08x}")))?;
            Action::Output { port, max_len }
        }
        SetVlanVid => {
            let vlan_vid = body.read_u16()?;
            body.skip(2)?;
            if vlan_vid & !consts::VLAN_VID_MASK != 0 {
                return Err(Error::bad_argument("set_vlan_vid: value exceeds 12 bits"));
            }
            Action::SetVlanVid { vlan_vid }
        }
        SetVlanPcp => {
            let vlan_pcp = body.read_u8()?;
            body.skip(3)?;
            if vlan_pcp & !consts::VLAN_PCP_MASK != 0 {
                return Err(Error::bad_argument("set_vlan_pcp: value exceeds 3 bits"));
            }
            Action::SetVlanPcp { vlan_pcp }
        }
        SetDlSrc => {
            let mac = body.read_array::<6>()?;
            body.skip(6)?;
            Action::SetEthSrc { mac }
        }
        SetDlDst => {
            let mac = body.read_array::<6>()?;
            body.skip(6)?;
            Action::SetEthDst { mac }
        }
        SetNwSrc => {
            let addr = body.read_u32()?;
            Action::SetIpv4Src { addr }
        }
        SetNwDst => {
            let addr = body.read_u32()?;
            Action::SetIpv4Dst { addr }
        }
        SetNwTos => {
            let nw_tos = body.read_u8()?;
            body.skip(3)?;
            if nw_tos & !consts::DSCP_MASK != 0 {
                return Err(Error::bad_argument("set_nw_tos: bits outside DSCP mask set"));
            }
            Action::SetIpv4Dscp { dscp: nw_tos }
        }
        SetNwEcn => {
            // No internal kind represents ECN separately from DSCP (§6.2);
            // aliasing it onto `SetIpv4Dscp` would silently lose the
            // distinction and never round-trip, so this is rejected outright
            // rather than decoded.
            return Err(Error::BadType);
        }
        SetTpSrc => {
            let port = body.read_u16()?;
            body.skip(2)?;
            Action::SetL4SrcPort { port }
        }
        SetTpDst => {
            let port = body.read_u16()?;
            body.skip(2)?;
            Action::SetL4DstPort { port }
        }
        CopyTtlOut => {
            if !config.enable_push_pop_l2 {
                return Err(Error::BadType);
            }
            body.skip(4)?;
            Action::PushL2
        }
        CopyTtlIn => {
            if !config.enable_push_pop_l2 {
                return Err(Error::BadType);
            }
            body.skip(4)?;
            Action::PopL2
        }
        SetMplsLabel | SetMplsTc | SetMplsTtl => {
            if !config.enable_set_mpls_ttl {
                return Err(Error::BadType);
            }
            let ttl = body.read_u8()?;
            body.skip(3)?;
            Action::SetMplsTtl { ttl }
        }
        DecMplsTtl => {
            body.skip(4)?;
            Action::DecTtl { controller_ids: vec![0] }
        }
        PushVlan => {
            let ethertype = body.read_u16()?;
            body.skip(2)?;
            let allowed = ethertype == consts::ETH_TYPE_VLAN
                || (config.allow_push_vlan_ethertype_88a8 && ethertype == consts::ETH_TYPE_VLAN_QINQ);
            if !allowed {
                return Err(Error::bad_argument(format!("push_vlan: unsupported ethertype 0x{ethertype:04x}")));
            }
            Action::PushVlan { ethertype }
        }
        PopVlan => {
            body.skip(4)?;
            Action::StripVlan
        }
        PushMpls => {
            let ethertype = body.read_u16()?;
            body.skip(2)?;
            if !consts::is_mpls_ethertype(ethertype) {
                return Err(Error::bad_argument("push_mpls: ethertype is not an MPLS ethertype"));
            }
            Action::PushMpls { ethertype }
        }
        PopMpls => {
            let ethertype = body.read_u16()?;
            body.skip(2)?;
            if consts::is_mpls_ethertype(ethertype) && !config.relaxed_pop_mpls_check {
                return Err(Error::bad_argument("pop_mpls: resulting ethertype must not be MPLS"));
            }
            Action::PopMpls { ethertype }
        }
        SetQueue => {
            let queue_id = body.read_u32()?;
            Action::SetQueue { queue_id }
        }
        Group => {
            if !config.enable_group {
                return Err(Error::BadType);
            }
            let group_id = body.read_u32()?;
            Action::Group { group_id }
        }
        SetNwTtl => {
            if !config.enable_set_mpls_ttl {
                return Err(Error::BadType);
            }
            let ttl = body.read_u8()?;
            body.skip(3)?;
            Action::SetMplsTtl { ttl }
        }
        DecNwTtl => {
            body.skip(4)?;
            Action::DecTtl { controller_ids: vec![0] }
        }
        Experimenter => unreachable!("classify_v11 dispatches EXPERIMENTER to the NX decoder"),
        SetField => unreachable!("decode_v11_record intercepts SET_FIELD before reaching this decoder"),
    };
    Ok((action, Compat::Ofp11(ty)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_nw_ecn_is_rejected_rather_than_aliased_onto_dscp() {
        let body_bytes = [0u8; 8];
        let mut body = Cursor::new(&body_bytes);
        let config = DialectConfig::default();
        let result = decode(Ofp11ActionType::SetNwEcn, &mut body, &config);
        assert!(matches!(result, Err(Error::BadType)));
    }
}
