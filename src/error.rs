//! Error taxonomy for the action/instruction codec.
//!
//! Every fallible boundary in this crate returns one of these variants
//! (§7). Sub-codec errors are surfaced unchanged by wrapping them rather
//! than folding them into a generic variant.

use thiserror::Error;

/// A field-slice or NX-action error surfaced by a sub-codec (`reg_move`,
/// `reg_load`, `set_field`, `learn`, `multipath`, `bundle`), or by the field
/// registry consulted through [`crate::field::FieldRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct SubCodecError(pub String);

impl SubCodecError {
    /// Builds a sub-codec error from any displayable detail.
    pub fn new(detail: impl Into<String>) -> Self {
        SubCodecError(detail.into())
    }
}

/// All errors this crate's codec can produce.
///
/// Variants map 1:1 onto §7's closed error taxonomy. None of them overlap in
/// meaning; a caller can match exhaustively on the kind to decide how to
/// report a malformed flow-mod to its own caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Unknown action or instruction code.
    #[error("unknown action/instruction type code")]
    BadType,

    /// Vendor envelope carried a non-Nicira vendor id.
    #[error("vendor action with unsupported vendor id")]
    BadVendor,

    /// Length mismatch, misalignment, truncation, or trailing bytes.
    #[error("bad length: {detail}")]
    BadLen {
        /// Human-readable detail of which length check failed.
        detail: String,
    },

    /// An in-range but semantically invalid field value.
    #[error("bad argument: {detail}")]
    BadArgument {
        /// Human-readable detail of the invalid field.
        detail: String,
    },

    /// A port value outside the datapath's valid range.
    #[error("output port {port} is out of range (max_ports={max_ports})")]
    BadOutPort {
        /// The offending port value.
        port: u32,
        /// The datapath's configured port ceiling at the time of the check.
        max_ports: u32,
    },

    /// Reserved padding that was required to be zero was not.
    #[error("reserved field must be zero")]
    MustBeZero,

    /// An instruction list contained an unrecognised instruction type.
    #[error("unknown instruction type code")]
    UnknownInst,

    /// An instruction list carried an `OFPIT_EXPERIMENTER` instruction.
    #[error("experimenter instructions are not supported")]
    BadExperimenter,

    /// An instruction's length field was invalid for its type.
    #[error("bad instruction length: {detail}")]
    BadInstLen {
        /// Human-readable detail of which length check failed.
        detail: String,
    },

    /// An instruction type is not supported in the requested dialect, or
    /// conflicts with another instruction present in the same list (e.g.
    /// `write-actions` alongside `apply-actions`).
    #[error("unsupported instruction: {detail}")]
    UnsupInst {
        /// Human-readable detail of the conflict.
        detail: String,
    },

    /// Instructions or their synthesised internal actions appeared out of
    /// the partial order `apply < clear < write_metadata < goto_table`, or a
    /// non-apply category was duplicated.
    #[error("unsupported instruction order: {detail}")]
    UnsupportedOrder {
        /// Human-readable detail of the ordering violation.
        detail: String,
    },

    /// A kind has no representation in the requested encode target and no
    /// NX fallback exists either (should not occur for any kind in the
    /// closed enumeration; surfaced rather than panicking).
    #[error("internal kind {kind:?} cannot be represented in this target dialect")]
    UnrepresentableInTarget {
        /// The kind that could not be encoded.
        kind: crate::action::Kind,
    },

    /// Error surfaced unchanged from a sub-codec or the field registry.
    #[error(transparent)]
    SubCodec(#[from] SubCodecError),
}

impl Error {
    /// Shorthand for [`Error::BadLen`].
    pub fn bad_len(detail: impl Into<String>) -> Self {
        Error::BadLen {
            detail: detail.into(),
        }
    }

    /// Shorthand for [`Error::BadArgument`].
    pub fn bad_argument(detail: impl Into<String>) -> Self {
        Error::BadArgument {
            detail: detail.into(),
        }
    }
}
