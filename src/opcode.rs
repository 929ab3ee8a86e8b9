//! Wire opcode tables (§4.B): the numeric type/subtype codes for each of the
//! three action dialects plus the 1.1+ instruction header, and the
//! descriptors [`crate::decode`] and [`crate::encode`] drive off of.
//!
//! Values come from the OpenFlow 1.0/1.1 struct definitions and the Nicira
//! extension header, cross-checked against the original source's
//! `enum ofp_raw_action_type` and `ofp_action_type` switches.

use crate::action::Kind;

/// `OFPAT10_*` action type codes (OpenFlow 1.0 `struct ofp_action_header`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Ofp10ActionType {
    Output = 0,
    SetVlanVid = 1,
    SetVlanPcp = 2,
    StripVlan = 3,
    SetDlSrc = 4,
    SetDlDst = 5,
    SetNwSrc = 6,
    SetNwDst = 7,
    SetNwTos = 8,
    SetTpSrc = 9,
    SetTpDst = 10,
    Enqueue = 11,
    Vendor = 0xffff,
}

impl Ofp10ActionType {
    /// Looks up the variant for a wire code, if any 1.0 action uses it.
    pub fn from_wire(code: u16) -> Option<Self> {
        use Ofp10ActionType::*;
        Some(match code {
            0 => Output,
            1 => SetVlanVid,
            2 => SetVlanPcp,
            3 => StripVlan,
            4 => SetDlSrc,
            5 => SetDlDst,
            6 => SetNwSrc,
            7 => SetNwDst,
            8 => SetNwTos,
            9 => SetTpSrc,
            10 => SetTpDst,
            11 => Enqueue,
            0xffff => Vendor,
            _ => return None,
        })
    }

    pub fn wire_code(self) -> u16 {
        self as u16
    }
}

/// `OFPAT11_*` action type codes (OpenFlow 1.1 `struct ofp11_action_header`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Ofp11ActionType {
    Output = 0,
    SetVlanVid = 1,
    SetVlanPcp = 2,
    SetDlSrc = 3,
    SetDlDst = 4,
    SetNwSrc = 5,
    SetNwDst = 6,
    SetNwTos = 7,
    SetNwEcn = 8,
    SetTpSrc = 9,
    SetTpDst = 10,
    CopyTtlOut = 11,
    CopyTtlIn = 12,
    SetMplsLabel = 13,
    SetMplsTc = 14,
    SetMplsTtl = 15,
    DecMplsTtl = 16,
    PushVlan = 17,
    PopVlan = 18,
    PushMpls = 19,
    PopMpls = 20,
    SetQueue = 21,
    Group = 22,
    SetNwTtl = 23,
    DecNwTtl = 24,
    /// `OFPAT12_SET_FIELD`, introduced in OpenFlow 1.2: a masked OXM field
    /// write, layered over the 1.1 action header.
    SetField = 25,
    Experimenter = 0xffff,
}

impl Ofp11ActionType {
    pub fn from_wire(code: u16) -> Option<Self> {
        use Ofp11ActionType::*;
        Some(match code {
            0 => Output,
            1 => SetVlanVid,
            2 => SetVlanPcp,
            3 => SetDlSrc,
            4 => SetDlDst,
            5 => SetNwSrc,
            6 => SetNwDst,
            7 => SetNwTos,
            8 => SetNwEcn,
            9 => SetTpSrc,
            10 => SetTpDst,
            11 => CopyTtlOut,
            12 => CopyTtlIn,
            13 => SetMplsLabel,
            14 => SetMplsTc,
            15 => SetMplsTtl,
            16 => DecMplsTtl,
            17 => PushVlan,
            18 => PopVlan,
            19 => PushMpls,
            20 => PopMpls,
            21 => SetQueue,
            22 => Group,
            23 => SetNwTtl,
            24 => DecNwTtl,
            25 => SetField,
            0xffff => Experimenter,
            _ => return None,
        })
    }

    pub fn wire_code(self) -> u16 {
        self as u16
    }
}

/// `NXAST_*` subtype codes carried in the `subtype` field of an
/// `nx_action_header`. `PushL2`/`PopL2` are this implementation's own
/// dialect-gated extension, not part of upstream Nicira's numbering; they
/// live in a block upstream has never assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum NxSubtype {
    Resubmit = 1,
    SetTunnel = 2,
    SetQueue = 4,
    PopQueue = 5,
    RegMove = 6,
    RegLoad = 7,
    Note = 8,
    SetTunnel64 = 9,
    Multipath = 10,
    Bundle = 12,
    BundleLoad = 13,
    ResubmitTable = 14,
    OutputReg = 15,
    Learn = 16,
    Exit = 17,
    DecTtl = 18,
    FinTimeout = 19,
    Controller = 20,
    DecTtlCntIds = 21,
    WriteMetadata = 22,
    PushMpls = 23,
    PopMpls = 24,
    SetMplsTtl = 25,
    DecMplsTtl = 26,
    PushL2 = 200,
    PopL2 = 201,
}

impl NxSubtype {
    pub fn from_wire(code: u16) -> Option<Self> {
        use NxSubtype::*;
        Some(match code {
            1 => Resubmit,
            2 => SetTunnel,
            4 => SetQueue,
            5 => PopQueue,
            6 => RegMove,
            7 => RegLoad,
            8 => Note,
            9 => SetTunnel64,
            10 => Multipath,
            12 => Bundle,
            13 => BundleLoad,
            14 => ResubmitTable,
            15 => OutputReg,
            16 => Learn,
            17 => Exit,
            18 => DecTtl,
            19 => FinTimeout,
            20 => Controller,
            21 => DecTtlCntIds,
            22 => WriteMetadata,
            23 => PushMpls,
            24 => PopMpls,
            25 => SetMplsTtl,
            26 => DecMplsTtl,
            200 => PushL2,
            201 => PopL2,
            _ => return None,
        })
    }

    pub fn wire_code(self) -> u16 {
        self as u16
    }
}

/// `OFPIT_*` instruction type codes (the 1.1+ instruction header, §4.E).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum InstructionType {
    GotoTable = 1,
    WriteMetadata = 2,
    WriteActions = 3,
    ApplyActions = 4,
    ClearActions = 5,
    Meter = 6,
    Experimenter = 0xffff,
}

impl InstructionType {
    pub fn from_wire(code: u16) -> Option<Self> {
        use InstructionType::*;
        Some(match code {
            1 => GotoTable,
            2 => WriteMetadata,
            3 => WriteActions,
            4 => ApplyActions,
            5 => ClearActions,
            6 => Meter,
            0xffff => Experimenter,
            _ => return None,
        })
    }

    pub fn wire_code(self) -> u16 {
        self as u16
    }
}

/// A wire-shape descriptor: how big a record is, whether its length is
/// extensible (carries a variable-length tail), and which internal [`Kind`]
/// it maps to. One of these backs every entry in the three opcode tables
/// below.
#[derive(Debug, Clone, Copy)]
pub struct ActionDescriptor {
    pub name: &'static str,
    /// Total wire record size in bytes, header included. For extensible
    /// records this is the minimum (the fixed prefix, 8-aligned).
    pub body_size: usize,
    /// Whether the record may carry a variable-length tail beyond
    /// `body_size`.
    pub extensible: bool,
    pub kind: Kind,
}

const fn d(name: &'static str, body_size: usize, extensible: bool, kind: Kind) -> ActionDescriptor {
    ActionDescriptor { name, body_size, extensible, kind }
}

/// Descriptor for a given 1.0 action type.
pub fn ofp10_descriptor(ty: Ofp10ActionType) -> ActionDescriptor {
    use Ofp10ActionType::*;
    match ty {
        Output => d("output", 8, false, Kind::Output),
        SetVlanVid => d("set_vlan_vid", 8, false, Kind::SetVlanVid),
        SetVlanPcp => d("set_vlan_pcp", 8, false, Kind::SetVlanPcp),
        StripVlan => d("strip_vlan", 8, false, Kind::StripVlan),
        SetDlSrc => d("set_dl_src", 16, false, Kind::SetEthSrc),
        SetDlDst => d("set_dl_dst", 16, false, Kind::SetEthDst),
        SetNwSrc => d("set_nw_src", 8, false, Kind::SetIpv4Src),
        SetNwDst => d("set_nw_dst", 8, false, Kind::SetIpv4Dst),
        SetNwTos => d("set_nw_tos", 8, false, Kind::SetIpv4Dscp),
        SetTpSrc => d("set_tp_src", 8, false, Kind::SetL4SrcPort),
        SetTpDst => d("set_tp_dst", 8, false, Kind::SetL4DstPort),
        Enqueue => d("enqueue", 16, false, Kind::Enqueue),
        Vendor => d("vendor", 8, true, Kind::Note),
    }
}

/// Descriptor for a given 1.1+ action type.
pub fn ofp11_descriptor(ty: Ofp11ActionType) -> ActionDescriptor {
    use Ofp11ActionType::*;
    match ty {
        Output => d("output", 16, false, Kind::Output),
        SetVlanVid => d("set_vlan_vid", 8, false, Kind::SetVlanVid),
        SetVlanPcp => d("set_vlan_pcp", 8, false, Kind::SetVlanPcp),
        SetDlSrc => d("set_dl_src", 16, false, Kind::SetEthSrc),
        SetDlDst => d("set_dl_dst", 16, false, Kind::SetEthDst),
        SetNwSrc => d("set_nw_src", 8, false, Kind::SetIpv4Src),
        SetNwDst => d("set_nw_dst", 8, false, Kind::SetIpv4Dst),
        SetNwTos => d("set_nw_tos", 8, false, Kind::SetIpv4Dscp),
        SetNwEcn => d("set_nw_ecn", 8, false, Kind::SetIpv4Dscp),
        SetTpSrc => d("set_tp_src", 8, false, Kind::SetL4SrcPort),
        SetTpDst => d("set_tp_dst", 8, false, Kind::SetL4DstPort),
        CopyTtlOut => d("copy_ttl_out", 8, false, Kind::PushL2),
        CopyTtlIn => d("copy_ttl_in", 8, false, Kind::PopL2),
        SetMplsLabel => d("set_mpls_label", 8, false, Kind::SetMplsTtl),
        SetMplsTc => d("set_mpls_tc", 8, false, Kind::SetMplsTtl),
        SetMplsTtl => d("set_mpls_ttl", 8, false, Kind::SetMplsTtl),
        DecMplsTtl => d("dec_mpls_ttl", 8, false, Kind::DecTtl),
        PushVlan => d("push_vlan", 8, false, Kind::PushVlan),
        PopVlan => d("pop_vlan", 8, false, Kind::StripVlan),
        PushMpls => d("push_mpls", 8, false, Kind::PushMpls),
        PopMpls => d("pop_mpls", 8, false, Kind::PopMpls),
        SetQueue => d("set_queue", 8, false, Kind::SetQueue),
        Group => d("group", 8, false, Kind::Group),
        SetNwTtl => d("set_nw_ttl", 8, false, Kind::SetMplsTtl),
        DecNwTtl => d("dec_nw_ttl", 8, false, Kind::DecTtl),
        SetField => d("set_field", 8, true, Kind::RegLoad),
        Experimenter => d("experimenter", 8, true, Kind::Note),
    }
}

/// Wire-shape descriptor for a 1.1+ instruction header (§4.E), the
/// instruction-table analogue of [`ActionDescriptor`].
#[derive(Debug, Clone, Copy)]
pub struct InstructionDescriptor {
    pub name: &'static str,
    /// Minimum (extensible) or exact (non-extensible) total wire size,
    /// header included.
    pub body_size: usize,
    pub extensible: bool,
}

const fn i(name: &'static str, body_size: usize, extensible: bool) -> InstructionDescriptor {
    InstructionDescriptor { name, body_size, extensible }
}

/// Descriptor for a given instruction type.
pub fn instruction_descriptor(ty: InstructionType) -> InstructionDescriptor {
    use InstructionType::*;
    match ty {
        GotoTable => i("goto_table", 8, false),
        WriteMetadata => i("write_metadata", 24, false),
        WriteActions => i("write_actions", 8, true),
        ApplyActions => i("apply_actions", 8, true),
        ClearActions => i("clear_actions", 8, false),
        Meter => i("meter", 8, false),
        Experimenter => i("experimenter", 8, true),
    }
}

/// Descriptor for a given NX subtype. `body_size` is the full wire record
/// size including the 10-byte `nx_action_header` prefix (type, len, vendor,
/// subtype); every NX record is padded to at least 16 bytes even when its
/// fixed fields need fewer, matching the upstream header's own doc comment.
pub fn nx_descriptor(ty: NxSubtype) -> ActionDescriptor {
    use NxSubtype::*;
    match ty {
        Resubmit => d("resubmit", 16, false, Kind::Resubmit),
        SetTunnel => d("set_tunnel", 16, false, Kind::SetTunnel),
        SetQueue => d("set_queue", 16, false, Kind::SetQueue),
        PopQueue => d("pop_queue", 16, false, Kind::PopQueue),
        RegMove => d("reg_move", 24, false, Kind::RegMove),
        RegLoad => d("reg_load", 24, false, Kind::RegLoad),
        Note => d("note", 16, true, Kind::Note),
        SetTunnel64 => d("set_tunnel64", 24, false, Kind::SetTunnel),
        Multipath => d("multipath", 40, false, Kind::Multipath),
        Bundle => d("bundle", 32, true, Kind::Bundle),
        BundleLoad => d("bundle_load", 32, true, Kind::Bundle),
        ResubmitTable => d("resubmit_table", 16, false, Kind::Resubmit),
        OutputReg => d("output_reg", 24, false, Kind::OutputReg),
        Learn => d("learn", 32, true, Kind::Learn),
        Exit => d("exit", 16, false, Kind::Exit),
        DecTtl => d("dec_ttl", 16, false, Kind::DecTtl),
        FinTimeout => d("fin_timeout", 16, false, Kind::FinTimeout),
        Controller => d("controller", 16, false, Kind::Controller),
        DecTtlCntIds => d("dec_ttl_cnt_ids", 16, true, Kind::DecTtl),
        WriteMetadata => d("write_metadata", 32, false, Kind::WriteMetadata),
        PushMpls => d("push_mpls", 16, false, Kind::PushMpls),
        PopMpls => d("pop_mpls", 16, false, Kind::PopMpls),
        SetMplsTtl => d("set_mpls_ttl", 16, false, Kind::SetMplsTtl),
        DecMplsTtl => d("dec_mpls_ttl", 16, false, Kind::DecTtl),
        PushL2 => d("push_l2", 16, false, Kind::PushL2),
        PopL2 => d("pop_l2", 16, false, Kind::PopL2),
    }
}
