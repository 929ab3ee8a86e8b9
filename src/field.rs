//! Field registry seam (§1 "Out of scope", §4.D's `set_field`/`reg_move`
//! notes).
//!
//! The full NXM/OXM field catalogue — every field's numeric header, bit
//! width, and writability — is explicitly out of scope. What this crate
//! needs from it is narrow: a width, for the one case (`set_field` with an
//! all-ones or absent mask) where this codec must know a field's width to
//! synthesize a `reg_load`. That seam is this trait; a real switch would
//! back it with its full field catalogue, exactly as a flow-match
//! implementation would back [`crate::flow::Flow`].

/// Static information about one field, as far as this crate needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Numeric field header (the `field` value used in [`crate::action::FieldSlice`]
    /// and the NX sub-codec specs).
    pub field: u32,
    /// Width of the field in bits.
    pub n_bits: u16,
    /// Whether `reg_load`/`set_field` may write to this field.
    pub writable: bool,
}

/// Looks up field metadata by numeric header.
///
/// This crate ships no catalogue of its own; callers that need full-field
/// `set_field` support implement this against their own field tables and
/// pass it through [`crate::decode`]. [`DefaultFieldRegistry`] answers every
/// lookup with `None`, which is enough for every other part of this crate
/// (plain `reg_load`, `reg_move`, and partial-mask `set_field` never consult
/// it at all).
pub trait FieldRegistry {
    /// Returns the descriptor for `field`, or `None` if it is unknown to this
    /// registry.
    fn lookup(&self, field: u32) -> Option<FieldDescriptor>;
}

/// A registry that knows no fields. Using it means full-width `set_field`
/// synthesis always fails with [`crate::error::Error::BadArgument`]; every
/// other decode path is unaffected.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFieldRegistry;

impl FieldRegistry for DefaultFieldRegistry {
    fn lookup(&self, _field: u32) -> Option<FieldDescriptor> {
        None
    }
}
