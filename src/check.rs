//! Context-check pass (§4.G): validates each internal action against a flow
//! descriptor and a port ceiling, threading `dl_type` across `push_mpls`/
//! `pop_mpls` since the subsequent checks must see the updated ethertype.

use crate::action::{Action, ActionRecord};
use crate::consts::{OFPP_ALL, OFPP_CONTROLLER, OFPP_FLOOD, OFPP_IN_PORT, OFPP_LOCAL, OFPP_NORMAL, OFPP_TABLE};
use crate::error::Error;
use crate::flow::{Flow, SimpleFlow};

/// Threaded state for the fold (§9 "Stateful check pass"): only `dl_type`
/// changes as the walk proceeds, and only `push_mpls`/`pop_mpls` change it.
#[derive(Debug, Clone, Copy)]
pub struct CheckState {
    pub dl_type: u16,
}

fn is_reserved_output_port(port: u32) -> bool {
    port == OFPP_IN_PORT as u32
        || port == OFPP_TABLE as u32
        || port == OFPP_NORMAL as u32
        || port == OFPP_FLOOD as u32
        || port == OFPP_ALL as u32
        || port == OFPP_CONTROLLER as u32
        || port == OFPP_LOCAL as u32
}

fn is_reserved_enqueue_port(port: u32) -> bool {
    port == OFPP_IN_PORT as u32 || port == OFPP_LOCAL as u32
}

fn check_out_port(port: u32, max_ports: u32, reserved_ok: impl Fn(u32) -> bool) -> Result<(), Error> {
    if port < max_ports || reserved_ok(port) {
        Ok(())
    } else {
        Err(Error::BadOutPort { port, max_ports })
    }
}

/// Validates `actions` against `flow` and `max_ports` (§4.G, §6.1 `check`).
///
/// A failure here does not mean the preceding decode was invalid: per §7's
/// policy, context-check errors are not fatal to the decode that already
/// produced `actions` — the caller decides what to do with an internal list
/// that is well-formed but invalid in this context.
pub fn check(actions: &[ActionRecord], flow: &impl Flow, max_ports: u32) -> Result<(), Error> {
    let mut state = CheckState { dl_type: flow.dl_type() };
    for record in actions {
        check_one(record, &mut state, max_ports)?;
    }
    Ok(())
}

fn check_one(record: &ActionRecord, state: &mut CheckState, max_ports: u32) -> Result<(), Error> {
    match &record.action {
        Action::Output { port, .. } => check_out_port(*port, max_ports, is_reserved_output_port),
        Action::Enqueue { port, .. } => check_out_port(*port as u32, max_ports, is_reserved_enqueue_port),
        Action::OutputReg(spec) => spec.check(),
        Action::RegMove(spec) => spec.check(),
        Action::RegLoad(spec) => spec.check(),
        Action::Learn(spec) => spec.check(),
        Action::Multipath(spec) => spec.check(),
        Action::Bundle(spec) => spec.check(),
        Action::PushMpls { ethertype } | Action::PopMpls { ethertype } => {
            state.dl_type = *ethertype;
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Convenience entry point for callers that only care about `dl_type` and
/// don't otherwise need a full flow descriptor.
pub fn check_with_dl_type(actions: &[ActionRecord], dl_type: u16, max_ports: u32) -> Result<(), Error> {
    check(actions, &SimpleFlow { dl_type }, max_ports)
}
