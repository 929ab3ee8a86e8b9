//! Instruction framer (§4.E): partitions a 1.1+ instruction list into
//! at-most-one-of-each-kind, decodes the wrapped action list, and
//! materialises the standalone instructions as synthetic internal actions.

use crate::action::{Action, ActionRecord, Compat};
use crate::config::DialectConfig;
use crate::decode::decode_v11_actions;
use crate::diag::{WarnKind, WarnSink};
use crate::error::Error;
use crate::opcode::InstructionType;
use crate::order::verify_order;
use crate::wire::{next_record, Cursor};

const GENERIC_HEADER: usize = 4;

/// Decodes a complete 1.1+ instruction list into the internal action
/// sequence it represents (§4.E), then runs the order verifier (§4.H).
pub fn decode_v11_instructions(bytes: &[u8], config: &DialectConfig, sink: &dyn WarnSink) -> Result<Vec<ActionRecord>, Error> {
    let mut cursor = Cursor::new(bytes);
    let mut seen = [false; 6]; // goto, write_metadata, write_actions, apply_actions, clear_actions, meter
    let mut out = Vec::new();

    loop {
        let next = next_record(&mut cursor, GENERIC_HEADER).map_err(|e| warn(sink, &e))?;
        let Some((ty, len, mut body)) = next else { break };
        let (inst_ty, _) = crate::classify::classify_instruction(ty, len).map_err(|e| warn(sink, &e))?;

        let slot = match inst_ty {
            InstructionType::GotoTable => 0,
            InstructionType::WriteMetadata => 1,
            InstructionType::WriteActions => 2,
            InstructionType::ApplyActions => 3,
            InstructionType::ClearActions => 4,
            InstructionType::Meter => 5,
            InstructionType::Experimenter => unreachable!("rejected by classify_instruction"),
        };
        if seen[slot] {
            return Err(warn(sink, &Error::UnsupportedOrder {
                detail: format!("duplicate {inst_ty:?} instruction"),
            }));
        }
        if (slot == 2 && seen[3]) || (slot == 3 && seen[2]) {
            return Err(warn(sink, &Error::UnsupInst {
                detail: "apply-actions and write-actions cannot coexist".into(),
            }));
        }
        seen[slot] = true;

        match inst_ty {
            InstructionType::GotoTable => {
                body.skip(GENERIC_HEADER)?;
                let table_id = body.read_u8()?;
                body.skip(3)?;
                out.push(ActionRecord::new(Action::GotoTable { table_id }));
            }
            InstructionType::WriteMetadata => {
                body.skip(GENERIC_HEADER)?;
                body.skip(4)?;
                let value = body.read_u64()?;
                let mask = body.read_u64()?;
                out.push(ActionRecord::new(Action::WriteMetadata { value, mask }));
            }
            InstructionType::Meter => {
                if !config.enable_meter {
                    return Err(warn(sink, &Error::UnsupInst {
                        detail: "meter is not supported in this dialect".into(),
                    }));
                }
                body.skip(GENERIC_HEADER)?;
                let meter_id = body.read_u32()?;
                out.push(ActionRecord::new(Action::Meter { meter_id }));
            }
            InstructionType::ClearActions => {
                body.skip(GENERIC_HEADER)?;
                body.skip(4)?;
                out.push(ActionRecord::new(Action::ClearActions));
            }
            InstructionType::ApplyActions => {
                let inner = body.read_bytes(body.remaining())?;
                let inner = &inner[GENERIC_HEADER + 4..];
                let mut actions = decode_v11_actions(inner, config, sink).map_err(|e| warn(sink, &e))?;
                out.append(&mut actions);
            }
            InstructionType::WriteActions => {
                if !config.decode_write_actions_as_apply {
                    return Err(warn(sink, &Error::UnsupInst {
                        detail: "write-actions is not supported in this dialect".into(),
                    }));
                }
                let inner = body.read_bytes(body.remaining())?;
                let inner = &inner[GENERIC_HEADER + 4..];
                let mut actions = decode_v11_actions(inner, config, sink).map_err(|e| warn(sink, &e))?;
                out.append(&mut actions);
            }
            InstructionType::Experimenter => unreachable!(),
        }
    }

    verify_order(&out)?;
    Ok(out)
}

fn warn(sink: &dyn WarnSink, err: &Error) -> Error {
    sink.warn(WarnKind::MalformedInstruction, &err.to_string());
    err.clone()
}

/// Encodes an internal action list as a 1.1+ instruction list (§4.F
/// "Instruction emission"): synthetic kinds emit their dedicated
/// instruction; any run of plain actions is wrapped in a single
/// `apply-actions` whose length is fixed up once the run is written.
pub fn encode_v11_instructions(actions: &[ActionRecord], config: &DialectConfig) -> Result<Vec<u8>, Error> {
    use crate::wire::Writer;
    let mut w = Writer::new();
    let mut i = 0;
    while i < actions.len() {
        match &actions[i].action {
            Action::GotoTable { table_id } => {
                let start = w.len();
                w.push_u16(InstructionType::GotoTable.wire_code());
                w.push_u16(0);
                w.push_u8(*table_id);
                w.push_zeros(3);
                let len = (w.len() - start) as u16;
                w.patch_u16(start + 2, len);
                i += 1;
            }
            Action::WriteMetadata { value, mask } => {
                let start = w.len();
                w.push_u16(InstructionType::WriteMetadata.wire_code());
                w.push_u16(0);
                w.push_zeros(4);
                w.push_u64(*value);
                w.push_u64(*mask);
                let len = (w.len() - start) as u16;
                w.patch_u16(start + 2, len);
                i += 1;
            }
            Action::Meter { meter_id } => {
                if !config.enable_meter {
                    return Err(Error::UnsupInst {
                        detail: "meter is not supported in this dialect".into(),
                    });
                }
                let start = w.len();
                w.push_u16(InstructionType::Meter.wire_code());
                w.push_u16(0);
                w.push_u32(*meter_id);
                let len = (w.len() - start) as u16;
                w.patch_u16(start + 2, len);
                i += 1;
            }
            Action::ClearActions => {
                let start = w.len();
                w.push_u16(InstructionType::ClearActions.wire_code());
                w.push_u16(0);
                w.push_zeros(4);
                let len = (w.len() - start) as u16;
                w.patch_u16(start + 2, len);
                i += 1;
            }
            _ => {
                let run_start = i;
                while i < actions.len() && !is_synthetic(&actions[i].action) {
                    i += 1;
                }
                let run = &actions[run_start..i];
                if !run.is_empty() {
                    let start = w.len();
                    w.push_u16(InstructionType::ApplyActions.wire_code());
                    w.push_u16(0);
                    w.push_zeros(4);
                    crate::encode::encode_v11_actions_into(run, &mut w, config)?;
                    let len = (w.len() - start) as u16;
                    w.patch_u16(start + 2, len);
                }
            }
        }
    }
    Ok(w.into_inner())
}

fn is_synthetic(action: &Action) -> bool {
    matches!(
        action,
        Action::GotoTable { .. } | Action::WriteMetadata { .. } | Action::Meter { .. } | Action::ClearActions
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::NullSink;

    fn meter_instruction(meter_id: u32) -> Vec<u8> {
        let mut bytes = vec![0u8, InstructionType::Meter.wire_code() as u8, 0, 8];
        bytes.extend_from_slice(&meter_id.to_be_bytes());
        bytes
    }

    #[test]
    fn meter_instruction_is_rejected_when_disabled() {
        let bytes = meter_instruction(5);
        let mut config = DialectConfig::default();
        config.enable_meter = false;
        let err = decode_v11_instructions(&bytes, &config, &NullSink).unwrap_err();
        assert!(matches!(err, Error::UnsupInst { .. }));
    }

    #[test]
    fn meter_instruction_round_trips_when_enabled() {
        let bytes = meter_instruction(5);
        let config = DialectConfig::default();
        let decoded = decode_v11_instructions(&bytes, &config, &NullSink).expect("decode should succeed");
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].action, Action::Meter { meter_id: 5 });

        let reencoded = encode_v11_instructions(&decoded, &config).expect("encode should succeed");
        assert_eq!(reencoded, bytes);

        let mut disabled = config;
        disabled.enable_meter = false;
        let err = encode_v11_instructions(&decoded, &disabled).unwrap_err();
        assert!(matches!(err, Error::UnsupInst { .. }));
    }
}
