// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.
use std::fmt::Write;

use crate::error::GeowireError;

/// WKB byte-order tag
///
/// Tag byte 0 selects big-endian ("XDR"), tag byte 1 little-endian ("NDR").
/// Any other tag byte is malformed input.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ByteOrder {
    /// Big-endian, tag byte 0
    Xdr,
    /// Little-endian, tag byte 1
    Ndr,
}

impl ByteOrder {
    /// Interpret a wire tag byte
    pub fn try_from_tag(tag: u8) -> Result<Self, GeowireError> {
        match tag {
            0 => Ok(Self::Xdr),
            1 => Ok(Self::Ndr),
            other => Err(GeowireError::Format(format!(
                "Unknown byte-order tag {other}"
            ))),
        }
    }

    /// The wire tag byte for this order
    pub fn tag(&self) -> u8 {
        match self {
            Self::Xdr => 0,
            Self::Ndr => 1,
        }
    }
}

/// Random-access byte supplier backing a [ValueReader]
pub trait ByteSource {
    /// Total number of bytes available
    fn len(&self) -> usize;

    /// The byte at `index`, which the caller has checked is `< len()`
    fn byte_at(&self, index: usize) -> Result<u8, GeowireError>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A raw byte buffer source
pub struct BytesSource<'a> {
    buf: &'a [u8],
}

impl<'a> BytesSource<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }
}

impl ByteSource for BytesSource<'_> {
    fn len(&self) -> usize {
        self.buf.len()
    }

    fn byte_at(&self, index: usize) -> Result<u8, GeowireError> {
        Ok(self.buf[index])
    }
}

/// A hex-text source: one byte per pair of hex nibble characters
pub struct HexSource<'a> {
    text: &'a [u8],
}

impl<'a> HexSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text: text.as_bytes(),
        }
    }
}

fn hex_nibble(c: u8) -> Result<u8, GeowireError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        other => Err(GeowireError::Format(format!(
            "No valid hex character: '{}'",
            other as char
        ))),
    }
}

impl ByteSource for HexSource<'_> {
    fn len(&self) -> usize {
        self.text.len() / 2
    }

    fn byte_at(&self, index: usize) -> Result<u8, GeowireError> {
        let high = hex_nibble(self.text[index * 2])?;
        let low = hex_nibble(self.text[index * 2 + 1])?;
        Ok((high << 4) | low)
    }
}

/// Endian-aware cursor over a [ByteSource]
///
/// The byte order in effect is rebindable because EWKB repeats the
/// byte-order tag at every nested geometry header; [ValueReader::read_order]
/// consumes a tag byte and rebinds in one step.
pub struct ValueReader<S> {
    source: S,
    position: usize,
    order: ByteOrder,
}

impl<S: ByteSource> ValueReader<S> {
    /// Create a reader positioned at the start of `source`
    ///
    /// The initial order is little-endian; decoding input is expected to
    /// rebind it from the first tag byte before reading any multi-byte value.
    pub fn new(source: S) -> Self {
        Self {
            source,
            position: 0,
            order: ByteOrder::Ndr,
        }
    }

    /// The byte order currently bound
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Rebind the byte order
    pub fn set_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    /// Number of unread bytes
    pub fn remaining(&self) -> usize {
        self.source.len() - self.position
    }

    /// Offset of the next byte to read
    pub fn position(&self) -> usize {
        self.position
    }

    fn read_bytes<const N: usize>(&mut self) -> Result<[u8; N], GeowireError> {
        if self.remaining() < N {
            return Err(GeowireError::Truncated {
                offset: self.position,
                needed: N - self.remaining(),
            });
        }
        let mut bytes = [0u8; N];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = self.source.byte_at(self.position + i)?;
        }
        self.position += N;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8, GeowireError> {
        let [byte] = self.read_bytes::<1>()?;
        Ok(byte)
    }

    /// Consume a byte-order tag byte and bind it for subsequent reads
    pub fn read_order(&mut self) -> Result<ByteOrder, GeowireError> {
        let order = ByteOrder::try_from_tag(self.read_u8()?)?;
        self.order = order;
        Ok(order)
    }

    pub fn read_u32(&mut self) -> Result<u32, GeowireError> {
        let bytes = self.read_bytes::<4>()?;
        Ok(match self.order {
            ByteOrder::Xdr => u32::from_be_bytes(bytes),
            ByteOrder::Ndr => u32::from_le_bytes(bytes),
        })
    }

    pub fn read_i32(&mut self) -> Result<i32, GeowireError> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_u64(&mut self) -> Result<u64, GeowireError> {
        let bytes = self.read_bytes::<8>()?;
        Ok(match self.order {
            ByteOrder::Xdr => u64::from_be_bytes(bytes),
            ByteOrder::Ndr => u64::from_le_bytes(bytes),
        })
    }

    pub fn read_i64(&mut self) -> Result<i64, GeowireError> {
        Ok(self.read_u64()? as i64)
    }

    /// Read an f64 transmitted as the bit pattern of its 64-bit representation
    pub fn read_f64(&mut self) -> Result<f64, GeowireError> {
        Ok(f64::from_bits(self.read_u64()?))
    }
}

/// Byte consumer backing a [ValueWriter]
pub trait ByteSink {
    fn push_byte(&mut self, byte: u8);
}

impl ByteSink for Vec<u8> {
    fn push_byte(&mut self, byte: u8) {
        self.push(byte);
    }
}

/// A hex-text sink: each byte lands as two uppercase hex characters
///
/// Implemented on String directly; the hex envelope is an exact
/// byte-for-byte dump of the binary form, never a decimal re-rendering.
impl ByteSink for String {
    fn push_byte(&mut self, byte: u8) {
        // Infallible for String
        let _ = write!(self, "{byte:02X}");
    }
}

/// Endian-aware value writer over a [ByteSink]
pub struct ValueWriter<S> {
    sink: S,
    order: ByteOrder,
}

impl<S: ByteSink> ValueWriter<S> {
    pub fn new(sink: S, order: ByteOrder) -> Self {
        Self { sink, order }
    }

    /// The byte order values are written with
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Recover the sink once writing is complete
    pub fn into_inner(self) -> S {
        self.sink
    }

    pub fn write_u8(&mut self, value: u8) {
        self.sink.push_byte(value);
    }

    /// Emit the byte-order tag for this writer's bound order
    pub fn write_order(&mut self) {
        self.write_u8(self.order.tag());
    }

    pub fn write_u32(&mut self, value: u32) {
        let bytes = match self.order {
            ByteOrder::Xdr => value.to_be_bytes(),
            ByteOrder::Ndr => value.to_le_bytes(),
        };
        for byte in bytes {
            self.sink.push_byte(byte);
        }
    }

    pub fn write_i32(&mut self, value: i32) {
        self.write_u32(value as u32);
    }

    pub fn write_u64(&mut self, value: u64) {
        let bytes = match self.order {
            ByteOrder::Xdr => value.to_be_bytes(),
            ByteOrder::Ndr => value.to_le_bytes(),
        };
        for byte in bytes {
            self.sink.push_byte(byte);
        }
    }

    pub fn write_i64(&mut self, value: i64) {
        self.write_u64(value as u64);
    }

    /// Write an f64 as the bit pattern of its 64-bit representation
    pub fn write_f64(&mut self, value: f64) {
        self.write_u64(value.to_bits());
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn byte_order_tags() {
        assert_eq!(ByteOrder::try_from_tag(0).unwrap(), ByteOrder::Xdr);
        assert_eq!(ByteOrder::try_from_tag(1).unwrap(), ByteOrder::Ndr);
        assert_eq!(ByteOrder::Xdr.tag(), 0);
        assert_eq!(ByteOrder::Ndr.tag(), 1);

        let err = ByteOrder::try_from_tag(2).unwrap_err();
        assert_eq!(err.to_string(), "Unknown byte-order tag 2");
    }

    #[test]
    fn read_values_both_orders() {
        let buf = [0x01, 0x02, 0x03, 0x04];
        let mut reader = ValueReader::new(BytesSource::new(&buf));
        reader.set_order(ByteOrder::Xdr);
        assert_eq!(reader.read_u32().unwrap(), 0x01020304);

        let mut reader = ValueReader::new(BytesSource::new(&buf));
        reader.set_order(ByteOrder::Ndr);
        assert_eq!(reader.read_u32().unwrap(), 0x04030201);
    }

    #[test]
    fn read_f64_bit_pattern() {
        let bits = 1.5f64.to_bits();
        let mut buf = Vec::new();
        buf.extend_from_slice(&bits.to_le_bytes());
        let mut reader = ValueReader::new(BytesSource::new(&buf));
        assert_eq!(reader.read_f64().unwrap(), 1.5);

        // NaN payloads survive untouched
        let weird_nan = f64::from_bits(0x7FF8000000000123);
        let buf = weird_nan.to_bits().to_le_bytes();
        let mut reader = ValueReader::new(BytesSource::new(&buf));
        assert_eq!(reader.read_f64().unwrap().to_bits(), weird_nan.to_bits());
    }

    #[test]
    fn read_past_end() {
        let buf = [0x01, 0x02];
        let mut reader = ValueReader::new(BytesSource::new(&buf));
        let err = reader.read_u32().unwrap_err();
        assert_eq!(
            err,
            GeowireError::Truncated {
                offset: 0,
                needed: 2
            }
        );

        // Position is untouched by a failed read
        assert_eq!(reader.read_u8().unwrap(), 0x01);
    }

    #[test]
    fn hex_source() {
        let mut reader = ValueReader::new(HexSource::new("0001020304"));
        assert_eq!(reader.read_u8().unwrap(), 0);
        reader.set_order(ByteOrder::Xdr);
        assert_eq!(reader.read_u32().unwrap(), 0x01020304);

        let mut reader = ValueReader::new(HexSource::new("ff"));
        assert_eq!(reader.read_u8().unwrap(), 0xFF);
    }

    #[test]
    fn hex_source_bad_digit() {
        let mut reader = ValueReader::new(HexSource::new("0g"));
        let err = reader.read_u8().unwrap_err();
        assert_eq!(err.to_string(), "No valid hex character: 'g'");
    }

    #[test]
    fn hex_source_truncated() {
        // An odd trailing nibble is not a readable byte
        let mut reader = ValueReader::new(HexSource::new("01F"));
        assert_eq!(reader.read_u8().unwrap(), 0x01);
        assert!(matches!(
            reader.read_u8().unwrap_err(),
            GeowireError::Truncated { .. }
        ));
    }

    #[test]
    fn read_order_binds() {
        let buf = [0x00, 0x00, 0x00, 0x00, 0x2A];
        let mut reader = ValueReader::new(BytesSource::new(&buf));
        assert_eq!(reader.read_order().unwrap(), ByteOrder::Xdr);
        assert_eq!(reader.order(), ByteOrder::Xdr);
        assert_eq!(reader.read_u32().unwrap(), 42);
    }

    #[test]
    fn write_values_both_orders() {
        let mut writer = ValueWriter::new(Vec::new(), ByteOrder::Ndr);
        writer.write_order();
        writer.write_u32(0x01020304);
        assert_eq!(writer.into_inner(), vec![0x01, 0x04, 0x03, 0x02, 0x01]);

        let mut writer = ValueWriter::new(Vec::new(), ByteOrder::Xdr);
        writer.write_order();
        writer.write_u32(0x01020304);
        assert_eq!(writer.into_inner(), vec![0x00, 0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn write_hex_uppercase() {
        let mut writer = ValueWriter::new(String::new(), ByteOrder::Ndr);
        writer.write_u8(0xAB);
        writer.write_u8(0x01);
        assert_eq!(writer.into_inner(), "AB01");
    }

    #[test]
    fn value_roundtrip_through_hex() {
        let mut writer = ValueWriter::new(String::new(), ByteOrder::Ndr);
        writer.write_order();
        writer.write_f64(-123.456);
        writer.write_i32(-5);
        let hex = writer.into_inner();

        let mut reader = ValueReader::new(HexSource::new(&hex));
        reader.read_order().unwrap();
        assert_eq!(reader.read_f64().unwrap(), -123.456);
        assert_eq!(reader.read_i32().unwrap(), -5);
        assert_eq!(reader.remaining(), 0);
    }
}
