//! Wire→internal decoding for plain OpenFlow 1.0 actions (§4.D).
//!
//! Every function here receives `body`, a cursor over the *entire* wire
//! record (type and len included, already validated by
//! [`crate::classify::classify_v10`]); each skips the 4-byte `type`/`len`
//! prefix before reading its own fields.

use crate::action::{Action, Compat};
use crate::error::Error;
use crate::opcode::Ofp10ActionType;
use crate::wire::Cursor;

const HEADER: usize = 4;

pub fn decode(ty: Ofp10ActionType, body: &mut Cursor<'_>) -> Result<(Action, Compat), Error> {
    body.skip(HEADER)?;
    use Ofp10ActionType::*;
    let action = match ty {
        Output => {
            let port = body.read_u16()? as u32;
            let max_len = body.read_u16()?;
            Action::Output { port, max_len }
        }
        SetVlanVid => {
            let vlan_vid = body.read_u16()?;
            body.skip(2)?;
            if vlan_vid & !crate::consts::VLAN_VID_MASK != 0 {
                return Err(Error::bad_argument("set_vlan_vid: value exceeds 12 bits"));
            }
            Action::SetVlanVid { vlan_vid }
        }
        SetVlanPcp => {
            let vlan_pcp = body.read_u8()?;
            body.skip(3)?;
            if vlan_pcp & !crate::consts::VLAN_PCP_MASK != 0 {
                return Err(Error::bad_argument("set_vlan_pcp: value exceeds 3 bits"));
            }
            Action::SetVlanPcp { vlan_pcp }
        }
        StripVlan => {
            body.skip(4)?;
            Action::StripVlan
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
            if nw_tos & !crate::consts::DSCP_MASK != 0 {
                return Err(Error::bad_argument("set_nw_tos: bits outside DSCP mask set"));
            }
            Action::SetIpv4Dscp { dscp: nw_tos }
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
        Enqueue => {
            let port = body.read_u16()?;
            body.skip(6)?;
            let queue_id = body.read_u32()?;
            Action::Enqueue { port, queue_id }
        }
        Vendor => unreachable!("classify_v10 dispatches VENDOR to the NX decoder"),
    };
    Ok((action, Compat::Ofp10(ty)))
}
