//! Byte-level primitives shared by every decoder and encoder in this crate.
//!
//! Every multi-byte field on the wire is big-endian; conversion to/from host
//! order happens at exactly this boundary. All three buffer kinds this crate
//! speaks (1.0 actions, 1.1+ instructions, internal records) share the same
//! 8-byte alignment, so the alignment helpers here are not per-dialect.

use crate::error::Error;

/// Alignment, in bytes, of every wire action, wire instruction, and internal
/// action record.
pub const ALIGN: usize = 8;

/// Rounds `len` up to the next multiple of [`ALIGN`].
pub const fn aligned_len(len: usize) -> usize {
    (len + ALIGN - 1) / ALIGN * ALIGN
}

/// Number of zero padding bytes needed to align `len`.
pub const fn padding_for(len: usize) -> usize {
    aligned_len(len) - len
}

/// A read-only, length-tracked view over a wire buffer.
///
/// This is the read-side counterpart of [`Writer`]; together they keep every
/// length and alignment check in one place instead of scattered across each
/// per-kind decoder.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Wraps `buf` for reading from the start.
    pub fn new(buf: &'a [u8]) -> Self {
        Cursor { buf, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// True if every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Current absolute offset from the start of the original buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The full buffer this cursor was constructed from.
    pub fn full_buffer(&self) -> &'a [u8] {
        self.buf
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], Error> {
        if self.remaining() < n {
            return Err(Error::BadLen {
                detail: "truncated record".into(),
            });
        }
        let (head, tail) = self.buf[self.pos..].split_at(n);
        self.pos += n;
        let _ = tail;
        Ok(head)
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> Result<u8, Error> {
        Ok(self.take(1)?[0])
    }

    /// Reads a big-endian `u16`.
    pub fn read_u16(&mut self) -> Result<u16, Error> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    /// Reads a big-endian `u32`.
    pub fn read_u32(&mut self) -> Result<u32, Error> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Reads a big-endian `u64`.
    pub fn read_u64(&mut self) -> Result<u64, Error> {
        let b = self.take(8)?;
        let mut arr = [0u8; 8];
        arr.copy_from_slice(b);
        Ok(u64::from_be_bytes(arr))
    }

    /// Reads `n` raw bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], Error> {
        self.take(n)
    }

    /// Reads a fixed-size array of bytes.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let b = self.take(N)?;
        let mut arr = [0u8; N];
        arr.copy_from_slice(b);
        Ok(arr)
    }

    /// Skips `n` bytes without interpreting them; used to jump over padding
    /// whose zero-ness has already been checked by the caller.
    pub fn skip(&mut self, n: usize) -> Result<(), Error> {
        self.take(n).map(|_| ())
    }

    /// Reads `n` bytes and checks they are all zero, per the `MUST_BE_ZERO`
    /// reserved-padding rule (§4.D).
    pub fn expect_zero(&mut self, n: usize) -> Result<(), Error> {
        let b = self.take(n)?;
        if b.iter().any(|&byte| byte != 0) {
            return Err(Error::MustBeZero);
        }
        Ok(())
    }

    /// Returns a sub-cursor over the next `n` bytes and advances past them.
    pub fn sub_cursor(&mut self, n: usize) -> Result<Cursor<'a>, Error> {
        Ok(Cursor::new(self.take(n)?))
    }
}

/// Safe iteration over a buffer of aligned, length-prefixed records.
///
/// Given the byte offset of the current record's header, returns the next
/// record's `(type, len)` pair and its body slice, or a [`Error::BadLen`] if
/// any of the safety conditions from §4.A is violated:
///
/// - `len` is a multiple of [`ALIGN`]
/// - `len >= header_size`
/// - the record fits within the remaining buffer
///
/// A nonzero remainder at end-of-buffer is also `BadLen`.
pub fn next_record<'a>(
    cursor: &mut Cursor<'a>,
    header_size: usize,
) -> Result<Option<(u16, u16, Cursor<'a>)>, Error> {
    if cursor.is_empty() {
        return Ok(None);
    }
    if cursor.remaining() < header_size {
        return Err(Error::BadLen {
            detail: "record shorter than header".into(),
        });
    }
    let mut peek = cursor.clone();
    let ty = peek.read_u16()?;
    let len = peek.read_u16()?;
    let len_usize = len as usize;
    if len_usize < header_size || len_usize % ALIGN != 0 || len_usize > cursor.remaining() {
        return Err(Error::BadLen {
            detail: format!("invalid record length {len}"),
        });
    }
    let body = cursor.sub_cursor(len_usize)?;
    Ok(Some((ty, len, body)))
}

/// Accumulates encoded bytes, tracking alignment padding and providing
/// length-fixup for records whose size is only known after their body is
/// written (e.g. the `apply-actions` instruction wrapper, §4.F).
#[derive(Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Writer { buf: Vec::new() }
    }

    /// Wraps an existing output buffer, appending to it.
    pub fn from_vec(buf: Vec<u8>) -> Self {
        Writer { buf }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consumes the writer, returning the accumulated bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    /// Writes a single byte.
    pub fn push_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    /// Writes a big-endian `u16`.
    pub fn push_u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    /// Writes a big-endian `u32`.
    pub fn push_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    /// Writes a big-endian `u64`.
    pub fn push_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    /// Writes raw bytes verbatim.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes `n` zero bytes.
    pub fn push_zeros(&mut self, n: usize) {
        self.buf.resize(self.buf.len() + n, 0);
    }

    /// Pads the buffer up to the next [`ALIGN`] boundary, measured from byte
    /// offset `start`.
    pub fn align_from(&mut self, start: usize) {
        let written = self.buf.len() - start;
        self.push_zeros(padding_for(written));
    }

    /// Rewrites the big-endian `u16` at absolute offset `at` in the buffer.
    ///
    /// Used to fix up a `len` field once a variable-length body (or a run of
    /// wrapped actions) has been fully written.
    pub fn patch_u16(&mut self, at: usize, v: u16) {
        self.buf[at..at + 2].copy_from_slice(&v.to_be_bytes());
    }
}
