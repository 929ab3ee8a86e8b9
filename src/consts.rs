//! Numeric constants pinned down by reading the original source
//! (`ovs/lib/ofp-actions.c` and the OpenFlow/Nicira headers it includes).
//! The distilled spec names these only by symbol; this file is the single
//! place their values live.

/// Nicira vendor id carried in every `OFPAT_VENDOR`/`OFPAT_EXPERIMENTER`
/// envelope that is actually an NX action.
pub const NX_VENDOR_ID: u32 = 0x0000_2320;

/// Ceiling below which an OpenFlow 1.0 port number is a real switch port
/// rather than one of the reserved pseudo-ports below.
pub const OFPP_MAX: u16 = 0xff00;

/// Send the packet out the port it came in on.
pub const OFPP_IN_PORT: u16 = 0xfff8;
/// Perform actions in flow table.
pub const OFPP_TABLE: u16 = 0xfff9;
/// Process with normal L2/L3 switching.
pub const OFPP_NORMAL: u16 = 0xfffa;
/// All physical ports except input port and those disabled by STP.
pub const OFPP_FLOOD: u16 = 0xfffb;
/// All physical ports except input port.
pub const OFPP_ALL: u16 = 0xfffc;
/// Send to controller.
pub const OFPP_CONTROLLER: u16 = 0xfffd;
/// Local openflow "port".
pub const OFPP_LOCAL: u16 = 0xfffe;
/// Not associated with a physical port.
pub const OFPP_NONE: u16 = 0xffff;

/// OpenFlow 1.1+ reserved port numbers begin here (32-bit port space).
pub const OFPP11_MAX: u32 = 0xffff_ff00;
/// 1.1+ equivalents of the 1.0 reserved ports, same low 16 bits.
pub const OFPP11_IN_PORT: u32 = 0xffff_fff8;
pub const OFPP11_TABLE: u32 = 0xffff_fff9;
pub const OFPP11_NORMAL: u32 = 0xffff_fffa;
pub const OFPP11_FLOOD: u32 = 0xffff_fffb;
pub const OFPP11_ALL: u32 = 0xffff_fffc;
pub const OFPP11_CONTROLLER: u32 = 0xffff_fffd;
pub const OFPP11_LOCAL: u32 = 0xffff_fffe;

/// VLAN TCI ethertype, the only ethertype `push_vlan` accepts unless the
/// dialect allows the 802.1ad variant too.
pub const ETH_TYPE_VLAN: u16 = 0x8100;
/// 802.1ad ("QinQ") outer-tag ethertype.
pub const ETH_TYPE_VLAN_QINQ: u16 = 0x88a8;
/// MPLS unicast ethertype.
pub const ETH_TYPE_MPLS: u16 = 0x8847;
/// MPLS multicast ethertype.
pub const ETH_TYPE_MPLS_MCAST: u16 = 0x8848;

/// Returns true if `ethertype` is one of the MPLS ethertypes.
pub const fn is_mpls_ethertype(ethertype: u16) -> bool {
    ethertype == ETH_TYPE_MPLS || ethertype == ETH_TYPE_MPLS_MCAST
}

/// Mask of the valid bits of a VLAN VID field (12 bits).
pub const VLAN_VID_MASK: u16 = 0x0fff;
/// Mask of the valid bits of a VLAN PCP field (3 bits).
pub const VLAN_PCP_MASK: u8 = 0x07;
/// Mask of the valid bits of an IP DSCP field as carried in `nw_tos` (top 6
/// bits of the TOS byte).
pub const DSCP_MASK: u8 = 0xfc;

/// `table_id` written by the plain (non-table) `resubmit` action, meaning
/// "the table that's executing now".
pub const RESUBMIT_CURRENT_TABLE: u8 = 0xff;

/// Maps a wire OpenFlow 1.1+ 32-bit port to this crate's internal port
/// space, where reserved ports are represented by the same 16-bit sentinel
/// values OpenFlow 1.0 uses (§4.D "output (1.1)"). Real port numbers below
/// [`OFPP11_MAX`] pass through unchanged.
pub fn map_ofp11_port_to_internal(port: u32) -> Option<u32> {
    if port < OFPP11_MAX {
        return Some(port);
    }
    Some(match port {
        OFPP11_IN_PORT => OFPP_IN_PORT as u32,
        OFPP11_TABLE => OFPP_TABLE as u32,
        OFPP11_NORMAL => OFPP_NORMAL as u32,
        OFPP11_FLOOD => OFPP_FLOOD as u32,
        OFPP11_ALL => OFPP_ALL as u32,
        OFPP11_CONTROLLER => OFPP_CONTROLLER as u32,
        OFPP11_LOCAL => OFPP_LOCAL as u32,
        _ => return None,
    })
}

/// Inverse of [`map_ofp11_port_to_internal`]: maps an internal port back to
/// the wire's 32-bit 1.1+ encoding.
pub fn map_internal_port_to_ofp11(port: u32) -> u32 {
    if port == OFPP_IN_PORT as u32 {
        OFPP11_IN_PORT
    } else if port == OFPP_TABLE as u32 {
        OFPP11_TABLE
    } else if port == OFPP_NORMAL as u32 {
        OFPP11_NORMAL
    } else if port == OFPP_FLOOD as u32 {
        OFPP11_FLOOD
    } else if port == OFPP_ALL as u32 {
        OFPP11_ALL
    } else if port == OFPP_CONTROLLER as u32 {
        OFPP11_CONTROLLER
    } else if port == OFPP_LOCAL as u32 {
        OFPP11_LOCAL
    } else {
        port
    }
}
