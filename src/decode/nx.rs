//! Wire→internal decoding for Nicira vendor-extension actions (§4.D).
//!
//! `body` is a cursor over the whole wire record including the 10-byte
//! `nx_action_header` (`type`, `len`, `vendor`, `subtype`); every arm skips
//! it before reading its own fields.

use crate::action::{Action, Compat};
use crate::config::DialectConfig;
use crate::consts::RESUBMIT_CURRENT_TABLE;
use crate::error::Error;
use crate::opcode::NxSubtype;
use crate::subcodec::{BundleSpec, LearnSpec, MultipathSpec, OutputRegSpec, RegLoadSpec, RegMoveSpec};
use crate::wire::{padding_for, Cursor};

const NX_HEADER: usize = 10;

pub fn decode(ty: NxSubtype, body: &mut Cursor<'_>, config: &DialectConfig) -> Result<(Action, Compat), Error> {
    body.skip(NX_HEADER)?;
    use NxSubtype::*;
    let action = match ty {
        Resubmit => {
            let in_port = body.read_u16()?;
            body.skip(4)?;
            Action::Resubmit { in_port, table_id: RESUBMIT_CURRENT_TABLE }
        }
        ResubmitTable => {
            let in_port = body.read_u16()?;
            let table_id = body.read_u8()?;
            body.expect_zero(1)?;
            body.skip(2)?;
            Action::Resubmit { in_port, table_id }
        }
        SetTunnel => {
            body.skip(2)?;
            let tun_id = body.read_u32()? as u64;
            Action::SetTunnel { tun_id }
        }
        SetTunnel64 => {
            body.skip(6)?;
            let tun_id = body.read_u64()?;
            Action::SetTunnel { tun_id }
        }
        SetQueue => {
            body.skip(2)?;
            let queue_id = body.read_u32()?;
            Action::SetQueue { queue_id }
        }
        PopQueue => {
            body.skip(6)?;
            Action::PopQueue
        }
        RegMove => Action::RegMove(RegMoveSpec::decode(body)?),
        RegLoad => Action::RegLoad(RegLoadSpec::decode(body)?),
        Note => {
            let data = body.read_bytes(body.remaining())?.to_vec();
            Action::Note { data }
        }
        Multipath => Action::Multipath(MultipathSpec::decode(body)?),
        Bundle => Action::Bundle(BundleSpec::decode(body, false)?),
        BundleLoad => Action::Bundle(BundleSpec::decode(body, true)?),
        OutputReg => Action::OutputReg(OutputRegSpec::decode(body)?),
        Learn => Action::Learn(LearnSpec::decode(body)?),
        Exit => {
            body.skip(6)?;
            Action::Exit
        }
        DecTtl => {
            body.skip(6)?;
            Action::DecTtl { controller_ids: vec![0] }
        }
        FinTimeout => {
            let fin_idle_timeout = body.read_u16()?;
            let fin_hard_timeout = body.read_u16()?;
            body.skip(2)?;
            Action::FinTimeout { fin_idle_timeout, fin_hard_timeout }
        }
        Controller => {
            let max_len = body.read_u16()?;
            let controller_id = body.read_u16()?;
            let reason = body.read_u8()?;
            body.skip(1)?;
            Action::Controller { max_len, controller_id, reason }
        }
        DecTtlCntIds => {
            let n_controllers = body.read_u16()?;
            body.expect_zero(4)?;
            let mut controller_ids = Vec::with_capacity(n_controllers as usize);
            for _ in 0..n_controllers {
                controller_ids.push(body.read_u16()?);
            }
            let trailing = padding_for(2 * n_controllers as usize);
            body.expect_zero(trailing)?;
            Action::DecTtl { controller_ids }
        }
        WriteMetadata => {
            body.expect_zero(6)?;
            let value = body.read_u64()?;
            let mask = body.read_u64()?;
            Action::WriteMetadata { value, mask }
        }
        PushMpls => {
            let ethertype = body.read_u16()?;
            body.skip(4)?;
            if !crate::consts::is_mpls_ethertype(ethertype) {
                return Err(Error::bad_argument("push_mpls: ethertype is not an MPLS ethertype"));
            }
            Action::PushMpls { ethertype }
        }
        PopMpls => {
            let ethertype = body.read_u16()?;
            body.skip(4)?;
            if crate::consts::is_mpls_ethertype(ethertype) && !config.relaxed_pop_mpls_check {
                return Err(Error::bad_argument("pop_mpls: resulting ethertype must not be MPLS"));
            }
            Action::PopMpls { ethertype }
        }
        SetMplsTtl => {
            if !config.enable_set_mpls_ttl {
                return Err(Error::BadType);
            }
            let ttl = body.read_u8()?;
            body.skip(5)?;
            Action::SetMplsTtl { ttl }
        }
        DecMplsTtl => {
            body.skip(6)?;
            Action::DecTtl { controller_ids: vec![0] }
        }
        PushL2 => {
            if !config.enable_push_pop_l2 {
                return Err(Error::BadType);
            }
            body.skip(6)?;
            Action::PushL2
        }
        PopL2 => {
            if !config.enable_push_pop_l2 {
                return Err(Error::BadType);
            }
            body.skip(6)?;
            Action::PopL2
        }
    };
    Ok((action, Compat::Nx(ty)))
}
