//! Bidirectional wire/internal codec for OpenFlow flow-table actions and
//! instructions (OpenFlow 1.0/1.1/1.2/1.3 action dialects plus the Nicira
//! vendor extension), with strict length/alignment/ordering validation and a
//! canonical text formatter.
//!
//! The three wire dialects this crate translates between — 1.0 actions,
//! 1.1+ actions, and 1.1+ instructions — are described module-by-module
//! below; [`decode`] and [`encode`] are the core entry points, [`check`] and
//! [`order`] validate a decoded list against context, and [`format`] renders
//! one for a flow dump.

pub mod action;
pub mod check;
pub mod classify;
pub mod config;
pub mod consts;
pub mod decode;
mod encode;
pub mod error;
pub mod diag;
pub mod field;
pub mod flow;
pub mod format;
pub mod instructions;
pub mod opcode;
pub mod order;
pub mod subcodec;
pub mod wire;

pub use action::{equal, Action, ActionRecord, Compat, FieldSlice, Kind};
pub use check::check;
pub use config::DialectConfig;
pub use error::Error;
pub use order::verify_order;

/// Decodes a complete OpenFlow 1.0 action list.
pub use decode::decode_v10;
/// Decodes a plain OpenFlow 1.1+ action list (no instruction wrapping).
pub use decode::decode_v11_actions;
/// Decodes a complete OpenFlow 1.1+ instruction list.
pub use instructions::decode_v11_instructions;

/// Encodes an internal action list as OpenFlow 1.0 wire actions.
pub use encode::encode_v10;
/// Encodes an internal action list as a plain OpenFlow 1.1+ action list.
pub use encode::encode_v11_actions;
/// Encodes an internal action list as an OpenFlow 1.1+ instruction list.
pub use instructions::encode_v11_instructions;

/// Renders `actions` as the canonical flow-dump text form (§4.I). Never
/// fails.
pub fn format(actions: &[ActionRecord]) -> String {
    format::format(actions)
}

/// Whether `actions` contains an `output` to `port`.
pub fn outputs_to_port(actions: &[ActionRecord], port: u32) -> bool {
    actions.iter().any(|r| matches!(&r.action, Action::Output { port: p, .. } if *p == port))
}

/// Whether `actions` contains a `group` action targeting `group_id`.
pub fn outputs_to_group(actions: &[ActionRecord], group_id: u32) -> bool {
    actions.iter().any(|r| matches!(&r.action, Action::Group { group_id: g } if *g == group_id))
}
