//! Dialect configuration knobs (§4.K, §9.1).
//!
//! The source gates these behind a build flag; this crate threads them as an
//! explicit parameter instead, so a single binary can run more than one
//! policy (e.g. a strict-1.1 southbound connection next to a permissive NX
//! one) without a recompile.

/// Per-dialect behavior that the base OpenFlow/NX specifications leave to
/// the implementer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectConfig {
    /// Accept `push_vlan` with ethertype `0x88a8` (802.1ad / QinQ) in
    /// addition to the standard `0x8100`.
    pub allow_push_vlan_ethertype_88a8: bool,
    /// Skip the "result ethertype must not be MPLS" check on `pop_mpls`.
    pub relaxed_pop_mpls_check: bool,
    /// Decode/encode the `push_l2`/`pop_l2` internal kinds.
    pub enable_push_pop_l2: bool,
    /// Decode/encode the `set_mpls_ttl` internal kind.
    pub enable_set_mpls_ttl: bool,
    /// Decode/encode the `group` internal kind.
    pub enable_group: bool,
    /// Decode/encode the `meter` internal kind.
    pub enable_meter: bool,
    /// Treat a `write-actions` instruction as equivalent to `apply-actions`
    /// rather than rejecting it with `UNSUP_INST`.
    pub decode_write_actions_as_apply: bool,
}

impl Default for DialectConfig {
    fn default() -> Self {
        DialectConfig {
            allow_push_vlan_ethertype_88a8: true,
            relaxed_pop_mpls_check: false,
            enable_push_pop_l2: true,
            enable_set_mpls_ttl: true,
            enable_group: true,
            enable_meter: true,
            decode_write_actions_as_apply: true,
        }
    }
}
