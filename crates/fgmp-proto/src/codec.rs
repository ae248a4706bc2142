//! Canonical scalar encoding.
//!
//! Every multi-byte scalar travels big-endian (network order) whatever the
//! host byte order is. Floats are moved through their raw bit patterns, so a
//! decode reproduces NaN payloads and signed zeros exactly.

use crate::error::ProtoError;

pub fn encode_u32(v: u32) -> [u8; 4] {
    v.to_be_bytes()
}

pub fn encode_u16(v: u16) -> [u8; 2] {
    v.to_be_bytes()
}

pub fn encode_f64(v: f64) -> [u8; 8] {
    v.to_bits().to_be_bytes()
}

pub fn encode_f32(v: f32) -> [u8; 4] {
    v.to_bits().to_be_bytes()
}

/// Pack two 16-bit values into one 32-bit field: `hi` in the upper half,
/// `lo` in the lower half.
pub fn encode_pair_u16(hi: u16, lo: u16) -> [u8; 4] {
    encode_u32((u32::from(hi) << 16) | u32::from(lo))
}

pub fn decode_u32(buf: &[u8]) -> Result<u32, ProtoError> {
    Ok(u32::from_be_bytes(exact(buf)?))
}

pub fn decode_u16(buf: &[u8]) -> Result<u16, ProtoError> {
    Ok(u16::from_be_bytes(exact(buf)?))
}

pub fn decode_f64(buf: &[u8]) -> Result<f64, ProtoError> {
    Ok(f64::from_bits(u64::from_be_bytes(exact(buf)?)))
}

pub fn decode_f32(buf: &[u8]) -> Result<f32, ProtoError> {
    Ok(f32::from_bits(u32::from_be_bytes(exact(buf)?)))
}

/// Inverse of [`encode_pair_u16`], returns `(hi, lo)`.
pub fn decode_pair_u16(buf: &[u8]) -> Result<(u16, u16), ProtoError> {
    let v = decode_u32(buf)?;
    Ok(((v >> 16) as u16, (v & 0xFFFF) as u16))
}

/// The decoders take a slice of exactly the scalar width; anything else is
/// a caller bug and is reported rather than truncated or zero-extended.
fn exact<const N: usize>(buf: &[u8]) -> Result<[u8; N], ProtoError> {
    buf.try_into().map_err(|_| ProtoError::BufferLength {
        expected: N,
        actual: buf.len(),
    })
}

/// Sequential writer over a fixed record buffer.
///
/// Record layouts are constants, so the buffers handed in are always sized
/// to fit. Running past the end is a layout bug and panics through slice
/// indexing.
pub struct Writer<'a> {
    out: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    pub fn new(out: &'a mut [u8]) -> Self {
        Self { out, pos: 0 }
    }

    pub fn put(&mut self, bytes: &[u8]) {
        self.out[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    pub fn put_u32(&mut self, v: u32) {
        self.put(&encode_u32(v));
    }

    pub fn put_u16(&mut self, v: u16) {
        self.put(&encode_u16(v));
    }

    pub fn put_f64(&mut self, v: f64) {
        self.put(&encode_f64(v));
    }

    pub fn put_f32(&mut self, v: f32) {
        self.put(&encode_f32(v));
    }

    pub fn put_f64x3(&mut self, v: &[f64; 3]) {
        for x in v {
            self.put_f64(*x);
        }
    }

    pub fn put_f32x3(&mut self, v: &[f32; 3]) {
        for x in v {
            self.put_f32(*x);
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

/// Bounds-checked sequential reader over an inbound buffer.
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn take(&mut self, n: usize) -> Result<&'a [u8], ProtoError> {
        let end = self.pos + n;
        let bytes = self.buf.get(self.pos..end).ok_or(ProtoError::ShortBuffer {
            needed: end,
            actual: self.buf.len(),
        })?;
        self.pos = end;
        Ok(bytes)
    }

    pub fn take_array<const N: usize>(&mut self) -> Result<[u8; N], ProtoError> {
        exact(self.take(N)?)
    }

    pub fn u32(&mut self) -> Result<u32, ProtoError> {
        decode_u32(self.take(4)?)
    }

    pub fn u16(&mut self) -> Result<u16, ProtoError> {
        decode_u16(self.take(2)?)
    }

    pub fn f64(&mut self) -> Result<f64, ProtoError> {
        decode_f64(self.take(8)?)
    }

    pub fn f32(&mut self) -> Result<f32, ProtoError> {
        decode_f32(self.take(4)?)
    }

    pub fn f64x3(&mut self) -> Result<[f64; 3], ProtoError> {
        Ok([self.f64()?, self.f64()?, self.f64()?])
    }

    pub fn f32x3(&mut self) -> Result<[f32; 3], ProtoError> {
        Ok([self.f32()?, self.f32()?, self.f32()?])
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodings_are_big_endian() {
        assert_eq!(encode_u32(0x0102_0304), [1, 2, 3, 4]);
        assert_eq!(encode_u16(0xABCD), [0xAB, 0xCD]);
        assert_eq!(encode_f64(1.0), [0x3F, 0xF0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(encode_f32(-2.0), [0xC0, 0, 0, 0]);
    }

    #[test]
    fn pair_puts_first_value_in_high_half() {
        assert_eq!(encode_pair_u16(0, 100), [0, 0, 0, 100]);
        assert_eq!(encode_pair_u16(0x1234, 0x5678), [0x12, 0x34, 0x56, 0x78]);
        assert_eq!(decode_pair_u16(&[0x12, 0x34, 0x56, 0x78]), Ok((0x1234, 0x5678)));
    }

    #[test]
    fn boundary_values_survive() {
        assert_eq!(decode_u32(&encode_u32(0)), Ok(0));
        assert_eq!(decode_u32(&encode_u32(u32::MAX)), Ok(u32::MAX));
        assert_eq!(decode_u16(&encode_u16(u16::MAX)), Ok(u16::MAX));

        let neg_zero = decode_f64(&encode_f64(-0.0)).unwrap();
        assert_eq!(neg_zero.to_bits(), (-0.0f64).to_bits());

        let nan = f64::from_bits(0x7FF8_0000_DEAD_BEEF);
        assert_eq!(decode_f64(&encode_f64(nan)).unwrap().to_bits(), nan.to_bits());

        let snan = f32::from_bits(0x7F80_0001);
        assert_eq!(decode_f32(&encode_f32(snan)).unwrap().to_bits(), 0x7F80_0001);

        assert_eq!(decode_f32(&encode_f32(f32::NEG_INFINITY)), Ok(f32::NEG_INFINITY));
    }

    #[test]
    fn wrong_length_fails_loudly() {
        assert_eq!(
            decode_u32(&[1, 2, 3]),
            Err(ProtoError::BufferLength {
                expected: 4,
                actual: 3
            })
        );
        assert_eq!(
            decode_f64(&[0; 9]),
            Err(ProtoError::BufferLength {
                expected: 8,
                actual: 9
            })
        );
        assert!(decode_u16(&[]).is_err());
    }

    #[test]
    fn reader_reports_short_buffer() {
        let buf = [0u8, 0, 0, 7, 1];
        let mut r = Reader::new(&buf);
        assert_eq!(r.u32(), Ok(7));
        assert_eq!(
            r.u16(),
            Err(ProtoError::ShortBuffer {
                needed: 6,
                actual: 5
            })
        );
        assert_eq!(r.position(), 4);
    }

    #[test]
    fn writer_and_reader_agree() {
        let mut buf = [0u8; 4 + 2 + 24 + 12];
        let mut w = Writer::new(&mut buf);
        w.put_u32(42);
        w.put_u16(7);
        w.put_f64x3(&[1.5, -2.25, 1e300]);
        w.put_f32x3(&[0.5, f32::MAX, f32::MIN_POSITIVE]);
        assert_eq!(w.position(), buf.len());

        let mut r = Reader::new(&buf);
        assert_eq!(r.u32(), Ok(42));
        assert_eq!(r.u16(), Ok(7));
        assert_eq!(r.f64x3(), Ok([1.5, -2.25, 1e300]));
        assert_eq!(r.f32x3(), Ok([0.5, f32::MAX, f32::MIN_POSITIVE]));
    }
}
