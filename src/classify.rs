//! Length/type decoder (§4.C): validates one wire record's length against
//! its opcode descriptor and returns its symbolic kind, without yet
//! interpreting the body.

use crate::consts::NX_VENDOR_ID;
use crate::error::Error;
use crate::opcode::{
    instruction_descriptor, nx_descriptor, ofp10_descriptor, ofp11_descriptor, ActionDescriptor,
    InstructionType, NxSubtype, Ofp10ActionType, Ofp11ActionType,
};
use crate::wire::Cursor;

/// Which opcode table a classified record was matched against, and its
/// resolved descriptor.
#[derive(Debug, Clone, Copy)]
pub enum Classified {
    Ofp10(Ofp10ActionType, ActionDescriptor),
    Ofp11(Ofp11ActionType, ActionDescriptor),
    Nx(NxSubtype, ActionDescriptor),
}

impl Classified {
    pub fn descriptor(&self) -> ActionDescriptor {
        match self {
            Classified::Ofp10(_, d) => *d,
            Classified::Ofp11(_, d) => *d,
            Classified::Nx(_, d) => *d,
        }
    }
}

fn check_length(len: usize, descriptor: &ActionDescriptor) -> Result<(), Error> {
    if descriptor.extensible {
        if len < descriptor.body_size {
            return Err(Error::bad_len(format!(
                "{}: len {len} shorter than minimum {}",
                descriptor.name, descriptor.body_size
            )));
        }
    } else if len != descriptor.body_size {
        return Err(Error::bad_len(format!(
            "{}: len {len} does not match fixed size {}",
            descriptor.name, descriptor.body_size
        )));
    }
    Ok(())
}

/// `OFPAT10_VENDOR` / `OFPAT11_EXPERIMENTER`: both use `0xffff`.
const VENDOR_TYPE: u16 = 0xffff;

/// Classifies a 1.0 action record. `body` must be exactly `len` bytes (the
/// caller slices it via [`crate::wire::next_record`]); `ty`/`len` are its
/// already-read header fields.
pub fn classify_v10(ty: u16, len: u16, body: &Cursor<'_>) -> Result<Classified, Error> {
    let len = len as usize;
    if ty == VENDOR_TYPE {
        return classify_nx(len, body);
    }
    let action_ty = Ofp10ActionType::from_wire(ty).ok_or(Error::BadType)?;
    let descriptor = ofp10_descriptor(action_ty);
    check_length(len, &descriptor)?;
    Ok(Classified::Ofp10(action_ty, descriptor))
}

/// Classifies a 1.1+ action record.
pub fn classify_v11(ty: u16, len: u16, body: &Cursor<'_>) -> Result<Classified, Error> {
    let len = len as usize;
    if ty == VENDOR_TYPE {
        return classify_nx(len, body);
    }
    let action_ty = Ofp11ActionType::from_wire(ty).ok_or(Error::BadType)?;
    let descriptor = ofp11_descriptor(action_ty);
    check_length(len, &descriptor)?;
    Ok(Classified::Ofp11(action_ty, descriptor))
}

/// Minimum size of the `nx_action_header` prefix (`type`, `len`, `vendor`,
/// `subtype`) every NX action shares before its kind-specific body.
const NX_HEADER_SIZE: usize = 10;

/// Classifies a 1.1+ instruction header (§4.E step 1). `EXPERIMENTER`
/// instructions are rejected with [`Error::BadExperimenter`] rather than
/// falling through to [`Error::BadType`], since they are a distinct,
/// explicitly-named error per §7.
pub fn classify_instruction(ty: u16, len: u16) -> Result<(InstructionType, crate::opcode::InstructionDescriptor), Error> {
    let inst_ty = InstructionType::from_wire(ty).ok_or(Error::UnknownInst)?;
    if matches!(inst_ty, InstructionType::Experimenter) {
        return Err(Error::BadExperimenter);
    }
    let descriptor = instruction_descriptor(inst_ty);
    let len = len as usize;
    let ok = if descriptor.extensible {
        len >= descriptor.body_size
    } else {
        len == descriptor.body_size
    };
    if !ok {
        return Err(Error::BadInstLen {
            detail: format!("{}: len {len} invalid for its type", descriptor.name),
        });
    }
    Ok((inst_ty, descriptor))
}

fn classify_nx(len: usize, body: &Cursor<'_>) -> Result<Classified, Error> {
    if len < NX_HEADER_SIZE {
        return Err(Error::bad_len("vendor action shorter than nx_action_header"));
    }
    let mut peek = body.clone();
    peek.skip(4)?; // type, len: already consumed by the caller's header read
    let vendor = peek.read_u32()?;
    if vendor != NX_VENDOR_ID {
        return Err(Error::BadVendor);
    }
    let subtype = peek.read_u16()?;
    let nx_ty = NxSubtype::from_wire(subtype).ok_or(Error::BadType)?;
    let descriptor = nx_descriptor(nx_ty);
    check_length(len, &descriptor)?;
    Ok(Classified::Nx(nx_ty, descriptor))
}
