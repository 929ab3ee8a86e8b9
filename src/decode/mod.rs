//! Wire→internal decoding (§4.D): per-dialect entry points that classify
//! each record (§4.C) and dispatch to the matching per-kind decoder.

mod nx;
mod v10;
mod v11;

use crate::action::{ActionRecord, Compat};
use crate::classify::{classify_v10, classify_v11, Classified};
use crate::config::DialectConfig;
use crate::diag::{WarnKind, WarnSink};
use crate::error::Error;
use crate::opcode::Ofp11ActionType;
use crate::wire::{next_record, Cursor};

/// Generic header size used for the safety walk (§4.A): the 4-byte
/// `type`/`len` prefix every action shares, before descriptor-specific
/// length checks narrow it further.
const GENERIC_HEADER: usize = 4;

fn on_error(sink: &dyn WarnSink, kind: WarnKind, err: &Error) -> Error {
    sink.warn(kind, &err.to_string());
    err.clone()
}

/// Decodes a complete OpenFlow 1.0 action list.
pub fn decode_v10(bytes: &[u8], config: &DialectConfig, sink: &dyn WarnSink) -> Result<Vec<ActionRecord>, Error> {
    let mut cursor = Cursor::new(bytes);
    let mut out = Vec::new();
    loop {
        match next_record(&mut cursor, GENERIC_HEADER) {
            Ok(None) => break,
            Ok(Some((ty, len, mut body))) => {
                let record = decode_v10_record(ty, len, &mut body, config)
                    .map_err(|e| on_error(sink, WarnKind::MalformedAction, &e))?;
                out.push(record);
            }
            Err(e) => return Err(on_error(sink, WarnKind::MalformedAction, &e)),
        }
    }
    Ok(out)
}

fn decode_v10_record(ty: u16, len: u16, body: &mut Cursor<'_>, config: &DialectConfig) -> Result<ActionRecord, Error> {
    match classify_v10(ty, len, body)? {
        Classified::Ofp10(action_ty, _) => {
            let (action, compat) = v10::decode(action_ty, body)?;
            Ok(ActionRecord::with_compat(action, compat))
        }
        Classified::Nx(subtype, _) => {
            let (action, compat) = nx::decode(subtype, body, config)?;
            Ok(ActionRecord::with_compat(action, compat))
        }
        Classified::Ofp11(..) => unreachable!("classify_v10 never returns an Ofp11 match"),
    }
}

/// Decodes a plain OpenFlow 1.1 action list (no instruction wrapping).
pub fn decode_v11_actions(bytes: &[u8], config: &DialectConfig, sink: &dyn WarnSink) -> Result<Vec<ActionRecord>, Error> {
    let mut cursor = Cursor::new(bytes);
    let mut out = Vec::new();
    loop {
        match next_record(&mut cursor, GENERIC_HEADER) {
            Ok(None) => break,
            Ok(Some((ty, len, mut body))) => {
                let record = decode_v11_record(ty, len, &mut body, config)
                    .map_err(|e| on_error(sink, WarnKind::MalformedAction, &e))?;
                out.push(record);
            }
            Err(e) => return Err(on_error(sink, WarnKind::MalformedAction, &e)),
        }
    }
    Ok(out)
}

fn decode_v11_record(ty: u16, len: u16, body: &mut Cursor<'_>, config: &DialectConfig) -> Result<ActionRecord, Error> {
    match classify_v11(ty, len, body)? {
        Classified::Ofp11(Ofp11ActionType::SetField, _) => {
            body.skip(4)?;
            let spec = crate::subcodec::decode_set_field(body)?;
            Ok(ActionRecord::with_compat(crate::action::Action::RegLoad(spec), Compat::SetField))
        }
        Classified::Ofp11(action_ty, _) => {
            let (action, compat) = v11::decode(action_ty, body, config)?;
            Ok(ActionRecord::with_compat(action, compat))
        }
        Classified::Nx(subtype, _) => {
            let (action, compat) = nx::decode(subtype, body, config)?;
            Ok(ActionRecord::with_compat(action, compat))
        }
        Classified::Ofp10(..) => unreachable!("classify_v11 never returns an Ofp10 match"),
    }
}
