//! Support for ASN.1 DER-encoded ECDSA signatures:
//!
//! ```text
//! ECDSA-Sig-Value ::= SEQUENCE {
//!   r  INTEGER,
//!   s  INTEGER
//! }
//! ```
//!
//! Only short-form lengths are understood, which bounds every encoding to
//! 129 bytes and each integer to 127 content octets.

use crate::DecodeError;
use alloc::vec::Vec;
use der::{
    asn1::UintRef, Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Sequence,
    Writer,
};
use num_bigint::BigUint;

/// ASN.1 `SEQUENCE` tag
const SEQUENCE: u8 = 0x30;

/// ASN.1 `INTEGER` tag
const INTEGER: u8 = 0x02;

/// Decode `(r, s)` from a DER-encoded signature.
///
/// Structural checks only; the integers are not compared against any curve
/// order. A leading `0x00` in an integer is dropped from its value but
/// counts towards its length.
pub fn decode_der(bytes: &[u8]) -> Result<(BigUint, BigUint), DecodeError> {
    let result = decode_sequence(bytes);
    if let Err(_err) = &result {
        debug!(error = %_err, len = bytes.len(), "rejected DER signature");
    }
    result
}

/// Decode `(r, s)` from hex text holding a DER-encoded signature.
///
/// Surrounding whitespace and a `0x` prefix are ignored; case is not significant.
pub fn decode_der_hex(hex: &str) -> Result<(BigUint, BigUint), DecodeError> {
    let hex = hex.trim();
    let hex = hex
        .strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex);

    decode_der(&hex::decode(hex)?)
}

/// Encode `(r, s)` as DER: each integer in minimal big-endian form, with a
/// leading `0x00` iff its most significant bit is set.
///
/// The result only round-trips through [`decode_der`] while the two INTEGERs
/// fit in 127 content bytes together, which holds for any `r` and `s` below
/// 2^487 (so for every curve whose `n` has at most 487 bits). Larger values
/// are still encoded, with long-form lengths, and [`decode_der`] rejects them
/// with [`DecodeError::LongFormLength`].
#[must_use]
pub fn encode_der(r: &BigUint, s: &BigUint) -> Vec<u8> {
    let r_bytes = r.to_bytes_be();
    let s_bytes = s.to_bytes_be();

    SignatureRef::new(&r_bytes, &s_bytes)
        .and_then(|sig| sig.to_der())
        .expect("DER encoding error")
}

fn decode_sequence(bytes: &[u8]) -> Result<(BigUint, BigUint), DecodeError> {
    let mut cursor = Cursor::new(bytes);

    cursor.tag(SEQUENCE)?;
    let len = cursor.length()?;
    if bytes.len() != 2 + len {
        return Err(DecodeError::LengthMismatch);
    }

    let r = cursor.integer()?;
    let s = cursor.integer()?;

    if !cursor.is_finished() {
        return Err(DecodeError::LengthMismatch);
    }

    Ok((r, s))
}

/// Byte-wise reader over a candidate encoding
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn is_finished(&self) -> bool {
        self.pos == self.bytes.len()
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.pos.checked_add(len).ok_or(DecodeError::Truncated)?;
        let slice = self.bytes.get(self.pos..end).ok_or(DecodeError::Truncated)?;
        self.pos = end;
        Ok(slice)
    }

    fn byte(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    fn tag(&mut self, expected: u8) -> Result<(), DecodeError> {
        match self.byte()? {
            found if found == expected => Ok(()),
            found => Err(DecodeError::UnexpectedTag { expected, found }),
        }
    }

    /// Short-form length octet
    fn length(&mut self) -> Result<usize, DecodeError> {
        match self.byte()? {
            len if len & 0x80 != 0 => Err(DecodeError::LongFormLength),
            len => Ok(usize::from(len)),
        }
    }

    fn integer(&mut self) -> Result<BigUint, DecodeError> {
        self.tag(INTEGER)?;
        let len = self.length()?;
        if len == 0 {
            return Err(DecodeError::EmptyInteger);
        }

        Ok(BigUint::from_bytes_be(self.take(len)?))
    }
}

/// Borrowed `(r, s)` pair in the shape the `der` crate encodes
struct SignatureRef<'a> {
    r: UintRef<'a>,
    s: UintRef<'a>,
}

impl<'a> SignatureRef<'a> {
    fn new(r: &'a [u8], s: &'a [u8]) -> der::Result<Self> {
        Ok(Self {
            r: UintRef::new(r)?,
            s: UintRef::new(s)?,
        })
    }
}

impl EncodeValue for SignatureRef<'_> {
    fn value_len(&self) -> der::Result<Length> {
        self.r.encoded_len()? + self.s.encoded_len()?
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.r.encode(writer)?;
        self.s.encode(writer)?;
        Ok(())
    }
}

impl<'a> DecodeValue<'a> for SignatureRef<'a> {
    fn decode_value<R: Reader<'a>>(reader: &mut R, _header: Header) -> der::Result<Self> {
        Ok(Self {
            r: UintRef::decode(reader)?,
            s: UintRef::decode(reader)?,
        })
    }
}

impl<'a> Sequence<'a> for SignatureRef<'a> {}
