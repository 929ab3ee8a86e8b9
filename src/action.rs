//! The internal action record: the densely packed, version-independent form
//! the rest of the switch consumes (§3.1, §6.2).
//!
//! This crate represents the "internal buffer" as a `Vec<ActionRecord>`
//! rather than a raw byte slice: the internal form exists to be consumed by
//! typed code (matching, execution, flow-dump formatting), so a sum type
//! carrying its own fields plays the role the source's tagged C struct
//! plays, the same way `Receipt` stands in for a wire receipt in the
//! teacher's transaction crate. `len`/alignment accounting (§3.1's
//! invariants) is recovered on demand from [`ActionRecord::encoded_len`]
//! rather than stored, since nothing here ever needs to lie about it.

use crate::opcode::{NxSubtype, Ofp10ActionType, Ofp11ActionType};
use crate::subcodec::{BundleSpec, LearnSpec, MultipathSpec, OutputRegSpec, RegLoadSpec, RegMoveSpec};
use crate::wire::{aligned_len, ALIGN};

/// The closed set of internal action kinds (§6.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "strum", derive(strum::EnumIter))]
pub enum Kind {
    Output,
    Controller,
    Enqueue,
    OutputReg,
    Bundle,
    SetVlanVid,
    SetVlanPcp,
    StripVlan,
    PushVlan,
    SetEthSrc,
    SetEthDst,
    SetIpv4Src,
    SetIpv4Dst,
    SetIpv4Dscp,
    SetL4SrcPort,
    SetL4DstPort,
    RegMove,
    RegLoad,
    DecTtl,
    SetMplsTtl,
    PushMpls,
    PopMpls,
    PushL2,
    PopL2,
    SetTunnel,
    SetQueue,
    PopQueue,
    FinTimeout,
    Resubmit,
    Learn,
    Multipath,
    Note,
    Exit,
    WriteMetadata,
    ClearActions,
    GotoTable,
    Group,
    Meter,
}

/// Which instruction category an internal action belongs to, for the
/// partial-order check in §4.H.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum InstructionCategory {
    /// Any non-instruction action; these are carried inside `apply-actions`
    /// (or `write-actions`) and may repeat freely.
    Apply,
    Clear,
    WriteMetadata,
    GotoTable,
}

impl Kind {
    /// The instruction category this kind occupies when present in a 1.1+
    /// instruction list (§4.H). All non-synthetic kinds are `Apply`.
    pub fn instruction_category(self) -> InstructionCategory {
        match self {
            Kind::ClearActions => InstructionCategory::Clear,
            Kind::WriteMetadata => InstructionCategory::WriteMetadata,
            Kind::GotoTable => InstructionCategory::GotoTable,
            _ => InstructionCategory::Apply,
        }
    }
}

/// Remembers the wire shape an internal record was decoded from, so the
/// encoder can reproduce it on round-trip when more than one wire shape
/// represents the same internal value (§3.1, §4.F "Preferred shape").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compat {
    /// No originating wire opcode is remembered (user-constructed, or the
    /// distinction doesn't apply to this kind).
    Invalid,
    /// Decoded from a plain OpenFlow 1.0 action.
    Ofp10(Ofp10ActionType),
    /// Decoded from a plain OpenFlow 1.1 action.
    Ofp11(Ofp11ActionType),
    /// Decoded from a Nicira vendor-extension action.
    Nx(NxSubtype),
    /// Decoded from a 1.2 `OFPAT12_SET_FIELD` action (itself layered over
    /// an OXM header), producing an internal `reg_load`.
    SetField,
}

/// A register/field header plus bit offset/width, the shape reg_move and
/// reg_load address fields with. The field registry (external to this
/// crate, see [`crate::field`]) interprets the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSlice {
    /// Numeric field header, opaque to this crate beyond the field
    /// registry lookup.
    pub field: u32,
    /// Bit offset of the slice within the field.
    pub offset: u16,
    /// Width of the slice in bits.
    pub n_bits: u16,
}

/// The body of an internal action record, one variant per [`Kind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Output { port: u32, max_len: u16 },
    Controller { max_len: u16, controller_id: u16, reason: u8 },
    Enqueue { port: u16, queue_id: u32 },
    OutputReg(OutputRegSpec),
    Bundle(BundleSpec),
    SetVlanVid { vlan_vid: u16 },
    SetVlanPcp { vlan_pcp: u8 },
    StripVlan,
    PushVlan { ethertype: u16 },
    SetEthSrc { mac: [u8; 6] },
    SetEthDst { mac: [u8; 6] },
    SetIpv4Src { addr: u32 },
    SetIpv4Dst { addr: u32 },
    SetIpv4Dscp { dscp: u8 },
    SetL4SrcPort { port: u16 },
    SetL4DstPort { port: u16 },
    RegMove(RegMoveSpec),
    RegLoad(RegLoadSpec),
    DecTtl { controller_ids: Vec<u16> },
    SetMplsTtl { ttl: u8 },
    PushMpls { ethertype: u16 },
    PopMpls { ethertype: u16 },
    PushL2,
    PopL2,
    SetTunnel { tun_id: u64 },
    SetQueue { queue_id: u32 },
    PopQueue,
    FinTimeout { fin_idle_timeout: u16, fin_hard_timeout: u16 },
    Resubmit { in_port: u16, table_id: u8 },
    Learn(LearnSpec),
    Multipath(MultipathSpec),
    Note { data: Vec<u8> },
    Exit,
    WriteMetadata { value: u64, mask: u64 },
    ClearActions,
    GotoTable { table_id: u8 },
    Group { group_id: u32 },
    Meter { meter_id: u32 },
}

impl Action {
    /// The [`Kind`] this action's data corresponds to.
    pub fn kind(&self) -> Kind {
        match self {
            Action::Output { .. } => Kind::Output,
            Action::Controller { .. } => Kind::Controller,
            Action::Enqueue { .. } => Kind::Enqueue,
            Action::OutputReg(_) => Kind::OutputReg,
            Action::Bundle(_) => Kind::Bundle,
            Action::SetVlanVid { .. } => Kind::SetVlanVid,
            Action::SetVlanPcp { .. } => Kind::SetVlanPcp,
            Action::StripVlan => Kind::StripVlan,
            Action::PushVlan { .. } => Kind::PushVlan,
            Action::SetEthSrc { .. } => Kind::SetEthSrc,
            Action::SetEthDst { .. } => Kind::SetEthDst,
            Action::SetIpv4Src { .. } => Kind::SetIpv4Src,
            Action::SetIpv4Dst { .. } => Kind::SetIpv4Dst,
            Action::SetIpv4Dscp { .. } => Kind::SetIpv4Dscp,
            Action::SetL4SrcPort { .. } => Kind::SetL4SrcPort,
            Action::SetL4DstPort { .. } => Kind::SetL4DstPort,
            Action::RegMove(_) => Kind::RegMove,
            Action::RegLoad(_) => Kind::RegLoad,
            Action::DecTtl { .. } => Kind::DecTtl,
            Action::SetMplsTtl { .. } => Kind::SetMplsTtl,
            Action::PushMpls { .. } => Kind::PushMpls,
            Action::PopMpls { .. } => Kind::PopMpls,
            Action::PushL2 => Kind::PushL2,
            Action::PopL2 => Kind::PopL2,
            Action::SetTunnel { .. } => Kind::SetTunnel,
            Action::SetQueue { .. } => Kind::SetQueue,
            Action::PopQueue => Kind::PopQueue,
            Action::FinTimeout { .. } => Kind::FinTimeout,
            Action::Resubmit { .. } => Kind::Resubmit,
            Action::Learn(_) => Kind::Learn,
            Action::Multipath(_) => Kind::Multipath,
            Action::Note { .. } => Kind::Note,
            Action::Exit => Kind::Exit,
            Action::WriteMetadata { .. } => Kind::WriteMetadata,
            Action::ClearActions => Kind::ClearActions,
            Action::GotoTable { .. } => Kind::GotoTable,
            Action::Group { .. } => Kind::Group,
            Action::Meter { .. } => Kind::Meter,
        }
    }
}

/// One record of the internal action/instruction list: a [`Kind`]-tagged
/// body plus the [`Compat`] shadow field remembering its originating wire
/// shape (§3.1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    pub compat: Compat,
    pub action: Action,
}

impl ActionRecord {
    /// Builds a record with no remembered wire shape.
    pub fn new(action: Action) -> Self {
        ActionRecord {
            compat: Compat::Invalid,
            action,
        }
    }

    /// Builds a record remembering its originating wire shape.
    pub fn with_compat(action: Action, compat: Compat) -> Self {
        ActionRecord { compat, action }
    }

    /// The kind of the wrapped action.
    pub fn kind(&self) -> Kind {
        self.action.kind()
    }

    /// Size, in bytes, this record would occupy in a materialised internal
    /// buffer (§3.1): header plus body, aligned to [`ALIGN`]. Used by
    /// tests asserting the §3.1 invariants and by the formatter's note
    /// hex-dump length accounting.
    pub fn internal_len(&self) -> usize {
        const HEADER: usize = 8;
        let body = match &self.action {
            Action::Note { data } => data.len(),
            Action::DecTtl { controller_ids } => controller_ids.len() * 2,
            _ => 8,
        };
        aligned_len(HEADER + body).max(ALIGN)
    }
}

/// Byte-for-byte equality of two internal action lists, including anything
/// that would be padding on the wire (§6.1 `equal`).
///
/// Since this crate's internal form is typed rather than a raw buffer,
/// structural equality (derived `PartialEq`, which compares `compat` too)
/// already is "byte-for-byte including padding": two records compare equal
/// only if every field that would ever reach the wire, including the
/// remembered shape, matches.
pub fn equal(a: &[ActionRecord], b: &[ActionRecord]) -> bool {
    a == b
}
