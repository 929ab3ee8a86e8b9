//! Sub-codecs for the handful of NX actions whose bodies are themselves a
//! small grammar rather than a flat struct (§1 "Out of scope", §4.D).
//!
//! Each of these types exposes the same `decode`/`encode`/`check`/`format`
//! quartet so [`crate::decode`], [`crate::encode`], [`crate::check`] and
//! [`crate::format`] can treat them uniformly; none of them consult a real
//! field registry (that grammar is explicitly out of scope), so `set_field`
//! support in particular is deliberately narrow — see [`RegLoadSpec`].

use crate::error::Error;
use crate::wire::{Cursor, Writer};

/// Packs an NXM-style `offset`/`n_bits` pair into the wire's combined
/// `ofs_nbits` field (`offset << 6 | (n_bits - 1)`).
pub(crate) fn pack_ofs_nbits(offset: u16, n_bits: u16) -> u16 {
    (offset << 6) | (n_bits.saturating_sub(1) & 0x3f)
}

/// Unpacks a wire `ofs_nbits` field into `(offset, n_bits)`.
pub(crate) fn unpack_ofs_nbits(v: u16) -> (u16, u16) {
    (v >> 6, (v & 0x3f) + 1)
}

/// `NXAST_REG_MOVE`: copies a bit range from one field to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegMoveSpec {
    pub n_bits: u16,
    pub src_offset: u16,
    pub dst_offset: u16,
    pub src_field: u32,
    pub dst_field: u32,
}

impl RegMoveSpec {
    pub fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let n_bits = cursor.read_u16()?;
        let src_offset = cursor.read_u16()?;
        let dst_offset = cursor.read_u16()?;
        let src_field = cursor.read_u32()?;
        let dst_field = cursor.read_u32()?;
        Ok(RegMoveSpec { n_bits, src_offset, dst_offset, src_field, dst_field })
    }

    pub fn encode(&self, w: &mut Writer) {
        w.push_u16(self.n_bits);
        w.push_u16(self.src_offset);
        w.push_u16(self.dst_offset);
        w.push_u32(self.src_field);
        w.push_u32(self.dst_field);
    }

    pub fn check(&self) -> Result<(), Error> {
        if self.n_bits == 0 {
            return Err(Error::bad_argument("reg_move: n_bits must be nonzero"));
        }
        Ok(())
    }

    pub fn format(&self) -> String {
        format!(
            "move:bits[{}..{}]->field(0x{:08x})[{}..{}]->field(0x{:08x})",
            self.src_offset,
            self.src_offset + self.n_bits,
            self.src_field,
            self.dst_offset,
            self.dst_offset + self.n_bits,
            self.dst_field
        )
    }
}

/// `NXAST_REG_LOAD`: writes an immediate value into a bit range of a field.
///
/// Also backs the internal translation of `OFPAT12_SET_FIELD` (§3.1's
/// `compat` note): a set_field whose mask is absent or all-ones decodes into
/// a full-width `reg_load`. Partial (non-all-ones) masks have no
/// representation here, since the OXM field-width table they'd need lives in
/// the field registry this crate doesn't implement; decoding such a
/// set_field fails with [`Error::BadArgument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegLoadSpec {
    pub dst_field: u32,
    pub offset: u16,
    pub n_bits: u16,
    pub value: u64,
}

impl RegLoadSpec {
    pub fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let ofs_nbits = cursor.read_u16()?;
        let dst_field = cursor.read_u32()?;
        let value = cursor.read_u64()?;
        let (offset, n_bits) = unpack_ofs_nbits(ofs_nbits);
        Ok(RegLoadSpec { dst_field, offset, n_bits, value })
    }

    pub fn encode(&self, w: &mut Writer) {
        w.push_u16(pack_ofs_nbits(self.offset, self.n_bits));
        w.push_u32(self.dst_field);
        w.push_u64(self.value);
    }

    pub fn check(&self) -> Result<(), Error> {
        if self.n_bits == 0 || self.n_bits > 64 {
            return Err(Error::bad_argument("reg_load: n_bits out of range"));
        }
        if self.n_bits < 64 && self.value >> self.n_bits != 0 {
            return Err(Error::bad_argument("reg_load: value wider than n_bits"));
        }
        Ok(())
    }

    pub fn format(&self) -> String {
        format!(
            "load:0x{:x}->field(0x{:08x})[{}..{}]",
            self.value,
            self.dst_field,
            self.offset,
            self.offset + self.n_bits
        )
    }
}

/// `NXAST_OUTPUT_REG`: sends the packet out the port named by a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputRegSpec {
    pub offset: u16,
    pub n_bits: u16,
    pub src_field: u32,
    pub max_len: u16,
}

impl OutputRegSpec {
    pub fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let ofs_nbits = cursor.read_u16()?;
        let src_field = cursor.read_u32()?;
        let max_len = cursor.read_u16()?;
        cursor.expect_zero(6)?;
        let (offset, n_bits) = unpack_ofs_nbits(ofs_nbits);
        Ok(OutputRegSpec { offset, n_bits, src_field, max_len })
    }

    pub fn encode(&self, w: &mut Writer) {
        w.push_u16(pack_ofs_nbits(self.offset, self.n_bits));
        w.push_u32(self.src_field);
        w.push_u16(self.max_len);
        w.push_zeros(6);
    }

    pub fn check(&self) -> Result<(), Error> {
        if self.n_bits == 0 || self.n_bits > 64 {
            return Err(Error::bad_argument("output_reg: n_bits out of range"));
        }
        Ok(())
    }

    pub fn format(&self) -> String {
        format!(
            "output:field(0x{:08x})[{}..{}]",
            self.src_field,
            self.offset,
            self.offset + self.n_bits
        )
    }
}

/// Decodes an `OFPAT12_SET_FIELD` body (a single OXM TLV) into a
/// full-width [`RegLoadSpec`] (§4.D `set_field`).
///
/// Only a full-field write is representable without a field registry: a
/// present bitmask must be all-ones, and an absent mask is treated the same
/// way. A partial mask fails with [`Error::BadArgument`], since mapping it
/// onto a bit-offset/width pair needs the field's byte width from the
/// registry this crate doesn't carry.
pub fn decode_set_field(cursor: &mut Cursor<'_>) -> Result<RegLoadSpec, Error> {
    let oxm_header = cursor.read_u32()?;
    let has_mask = oxm_header & 0x0000_0100 != 0;
    let length = (oxm_header & 0xff) as usize;
    let value_len = if has_mask { length / 2 } else { length };
    if value_len == 0 || value_len > 8 || (has_mask && length % 2 != 0) {
        return Err(Error::bad_argument("set_field: invalid OXM length"));
    }
    let value_bytes = cursor.read_bytes(value_len)?;
    let mut value = 0u64;
    for &b in value_bytes {
        value = (value << 8) | b as u64;
    }
    if has_mask {
        let mask_bytes = cursor.read_bytes(value_len)?;
        if mask_bytes.iter().any(|&b| b != 0xff) {
            return Err(Error::bad_argument("set_field: partial bitmask not supported"));
        }
    }
    let trailing = crate::wire::padding_for(length);
    cursor.expect_zero(trailing)?;
    let field = oxm_header >> 9;
    Ok(RegLoadSpec { dst_field: field, offset: 0, n_bits: (value_len * 8) as u16, value })
}

/// Encodes a [`RegLoadSpec`] back into an `OFPAT12_SET_FIELD` body, always
/// as an unmasked, full-width OXM TLV (the canonical shape for a value this
/// crate can represent at all).
pub fn encode_set_field(spec: &RegLoadSpec, w: &mut Writer) {
    let value_len = (spec.n_bits as usize).div_ceil(8).max(1);
    let oxm_header = (spec.dst_field << 9) | (value_len as u32 & 0xff);
    w.push_u32(oxm_header);
    let start = w.len();
    let bytes = spec.value.to_be_bytes();
    w.push_bytes(&bytes[8 - value_len..]);
    w.align_from(start);
}

/// `NXAST_BUNDLE`/`NXAST_BUNDLE_LOAD`: hashes over a slave port list (link
/// aggregation); the `_LOAD` subtype additionally writes the chosen slave
/// into a field instead of outputting to it directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleSpec {
    pub algorithm: u16,
    pub fields: u16,
    pub basis: u16,
    pub slave_type: u32,
    pub slaves: Vec<u16>,
    /// `Some((field, offset, n_bits))` for `bundle_load`; `None` for plain
    /// `bundle`, which outputs directly to the chosen slave.
    pub dst: Option<(u32, u16, u16)>,
}

impl BundleSpec {
    pub fn decode(cursor: &mut Cursor<'_>, loads: bool) -> Result<Self, Error> {
        let algorithm = cursor.read_u16()?;
        let fields = cursor.read_u16()?;
        let basis = cursor.read_u16()?;
        let slave_type = cursor.read_u32()?;
        let n_slaves = cursor.read_u16()?;
        let ofs_nbits = cursor.read_u16()?;
        let dst_field = cursor.read_u32()?;
        cursor.expect_zero(4)?;
        let mut slaves = Vec::with_capacity(n_slaves as usize);
        for _ in 0..n_slaves {
            slaves.push(cursor.read_u16()?);
        }
        let trailing = crate::wire::padding_for(2 * n_slaves as usize);
        cursor.expect_zero(trailing)?;
        let dst = if loads {
            let (offset, n_bits) = unpack_ofs_nbits(ofs_nbits);
            Some((dst_field, offset, n_bits))
        } else {
            None
        };
        Ok(BundleSpec { algorithm, fields, basis, slave_type, slaves, dst })
    }

    pub fn encode(&self, w: &mut Writer) {
        w.push_u16(self.algorithm);
        w.push_u16(self.fields);
        w.push_u16(self.basis);
        w.push_u32(self.slave_type);
        w.push_u16(self.slaves.len() as u16);
        match self.dst {
            Some((field, offset, n_bits)) => {
                w.push_u16(pack_ofs_nbits(offset, n_bits));
                w.push_u32(field);
            }
            None => {
                w.push_u16(0);
                w.push_u32(0);
            }
        }
        w.push_zeros(4);
        let start = w.len();
        for slave in &self.slaves {
            w.push_u16(*slave);
        }
        w.align_from(start);
    }

    pub fn check(&self) -> Result<(), Error> {
        if self.slaves.is_empty() {
            return Err(Error::bad_argument("bundle: slave list must not be empty"));
        }
        Ok(())
    }

    pub fn format(&self) -> String {
        match self.dst {
            Some((field, offset, n_bits)) => format!(
                "bundle_load(slaves={:?})->field(0x{:08x})[{}..{}]",
                self.slaves,
                field,
                offset,
                offset + n_bits
            ),
            None => format!("bundle(slaves={:?})", self.slaves),
        }
    }
}

/// `NXAST_LEARN`: installs a flow in another table from fields of the
/// current packet. The fixed header is decoded in full; the trailing
/// `learn-spec` list is kept as an opaque, verbatim byte blob (its grammar
/// needs a field registry this crate doesn't implement, per scope).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearnSpec {
    pub idle_timeout: u16,
    pub hard_timeout: u16,
    pub priority: u16,
    pub cookie: u64,
    pub flags: u16,
    pub table_id: u8,
    pub fin_idle_timeout: u16,
    pub fin_hard_timeout: u16,
    /// Opaque trailing bytes, copied verbatim on round-trip.
    pub specs: Vec<u8>,
}

impl LearnSpec {
    pub fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let idle_timeout = cursor.read_u16()?;
        let hard_timeout = cursor.read_u16()?;
        let priority = cursor.read_u16()?;
        let cookie = cursor.read_u64()?;
        let flags = cursor.read_u16()?;
        let table_id = cursor.read_u8()?;
        cursor.skip(1)?;
        let fin_idle_timeout = cursor.read_u16()?;
        let fin_hard_timeout = cursor.read_u16()?;
        let specs = cursor.read_bytes(cursor.remaining())?.to_vec();
        Ok(LearnSpec {
            idle_timeout,
            hard_timeout,
            priority,
            cookie,
            flags,
            table_id,
            fin_idle_timeout,
            fin_hard_timeout,
            specs,
        })
    }

    pub fn encode(&self, w: &mut Writer) {
        w.push_u16(self.idle_timeout);
        w.push_u16(self.hard_timeout);
        w.push_u16(self.priority);
        w.push_u64(self.cookie);
        w.push_u16(self.flags);
        w.push_u8(self.table_id);
        w.push_u8(0);
        w.push_u16(self.fin_idle_timeout);
        w.push_u16(self.fin_hard_timeout);
        w.push_bytes(&self.specs);
    }

    pub fn check(&self) -> Result<(), Error> {
        Ok(())
    }

    pub fn format(&self) -> String {
        format!(
            "learn(table={},priority={},idle_timeout={},hard_timeout={},specs={}b)",
            self.table_id,
            self.priority,
            self.idle_timeout,
            self.hard_timeout,
            self.specs.len()
        )
    }
}

/// `NXAST_MULTIPATH`: hashes packet fields into a link/slave index and
/// writes it into a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MultipathSpec {
    pub fields: u16,
    pub basis: u16,
    pub algorithm: u16,
    pub max_link: u16,
    pub arg: u32,
    pub dst_field: u32,
    pub dst_offset: u16,
    pub dst_n_bits: u16,
}

impl MultipathSpec {
    pub fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let fields = cursor.read_u16()?;
        let basis = cursor.read_u16()?;
        cursor.skip(2)?;
        let algorithm = cursor.read_u16()?;
        let max_link = cursor.read_u16()?;
        let arg = cursor.read_u32()?;
        cursor.expect_zero(6)?;
        let ofs_nbits = cursor.read_u16()?;
        let dst_field = cursor.read_u32()?;
        cursor.expect_zero(4)?;
        let (dst_offset, dst_n_bits) = unpack_ofs_nbits(ofs_nbits);
        Ok(MultipathSpec { fields, basis, algorithm, max_link, arg, dst_field, dst_offset, dst_n_bits })
    }

    pub fn encode(&self, w: &mut Writer) {
        w.push_u16(self.fields);
        w.push_u16(self.basis);
        w.push_u16(0);
        w.push_u16(self.algorithm);
        w.push_u16(self.max_link);
        w.push_u32(self.arg);
        w.push_zeros(6);
        w.push_u16(pack_ofs_nbits(self.dst_offset, self.dst_n_bits));
        w.push_u32(self.dst_field);
        w.push_zeros(4);
    }

    pub fn check(&self) -> Result<(), Error> {
        if self.max_link == 0 {
            return Err(Error::bad_argument("multipath: max_link must be nonzero"));
        }
        Ok(())
    }

    pub fn format(&self) -> String {
        format!(
            "multipath(max_link={})->field(0x{:08x})[{}..{}]",
            self.max_link,
            self.dst_field,
            self.dst_offset,
            self.dst_offset + self.dst_n_bits
        )
    }
}
