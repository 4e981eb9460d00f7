//! Binary data: Buffer, ArrayBuffer, typed arrays and DataView
//!
//! Every binary value is a byte vector plus the kind of view it was created
//! as. The kind only changes how elements are read and how the value is
//! named; the bytes are the same.

use crate::util::{base64_encode, hex_encode};
use crate::value::Value;

/// The flavour of a binary value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    /// Node-style `Buffer`
    Buffer,
    ArrayBuffer,
    Uint8Array,
    Int8Array,
    DataView,
}

impl BufferKind {
    pub fn name(self) -> &'static str {
        match self {
            BufferKind::Buffer => "Buffer",
            BufferKind::ArrayBuffer => "ArrayBuffer",
            BufferKind::Uint8Array => "Uint8Array",
            BufferKind::Int8Array => "Int8Array",
            BufferKind::DataView => "DataView",
        }
    }

    /// Check if elements can be indexed directly
    pub fn is_typed_array(self) -> bool {
        matches!(
            self,
            BufferKind::Buffer | BufferKind::Uint8Array | BufferKind::Int8Array
        )
    }
}

/// A fixed-length run of bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteBuffer {
    kind: BufferKind,
    bytes: Vec<u8>,
}

impl ByteBuffer {
    /// `Buffer.from(text)`: the UTF-8 bytes of `text`
    pub fn from_str(text: &str) -> Self {
        ByteBuffer {
            kind: BufferKind::Buffer,
            bytes: text.as_bytes().to_vec(),
        }
    }

    pub fn from_bytes(kind: BufferKind, bytes: Vec<u8>) -> Self {
        ByteBuffer { kind, bytes }
    }

    /// `new ArrayBuffer(len)` and friends: `len` zero bytes
    pub fn zeroed(kind: BufferKind, len: usize) -> Self {
        ByteBuffer {
            kind,
            bytes: vec![0; len],
        }
    }

    /// Byte length
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn kind(&self) -> BufferKind {
        self.kind
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn get_u8(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }

    pub fn get_i8(&self, index: usize) -> Option<i8> {
        self.get_u8(index).map(|b| b as i8)
    }

    /// Store a byte; returns false when `index` is out of range
    ///
    /// Values wrap modulo 256 like a typed-array store.
    pub fn set_u8(&mut self, index: usize, value: i64) -> bool {
        match self.bytes.get_mut(index) {
            Some(slot) => {
                *slot = value as u8;
                true
            }
            None => false,
        }
    }

    /// Element `index` as a number, read according to the buffer kind
    ///
    /// ArrayBuffer and DataView have no indexed elements.
    pub fn element(&self, index: usize) -> Option<Value> {
        if !self.kind.is_typed_array() {
            return None;
        }
        match self.kind {
            BufferKind::Int8Array => self.get_i8(index).map(|b| Value::int(b as i32)),
            _ => self.get_u8(index).map(|b| Value::int(b as i32)),
        }
    }

    /// All elements as numbers
    pub fn elements(&self) -> Vec<Value> {
        (0..self.len()).filter_map(|i| self.element(i)).collect()
    }

    /// `buf.toString('hex')`
    pub fn to_hex(&self) -> String {
        hex_encode(&self.bytes)
    }

    /// `buf.toString('base64')`
    pub fn to_base64(&self) -> String {
        base64_encode(&self.bytes)
    }

    /// `buf.toString()`, with invalid sequences replaced by U+FFFD
    pub fn to_utf8_lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    fn read<const N: usize>(&self, offset: usize) -> Option<[u8; N]> {
        let end = offset.checked_add(N)?;
        self.bytes.get(offset..end)?.try_into().ok()
    }

    fn write<const N: usize>(&mut self, offset: usize, raw: [u8; N]) -> bool {
        let Some(end) = offset.checked_add(N) else {
            return false;
        };
        match self.bytes.get_mut(offset..end) {
            Some(slot) => {
                slot.copy_from_slice(&raw);
                true
            }
            None => false,
        }
    }

    // DataView accessors, big-endian like the JavaScript defaults

    pub fn get_i32(&self, offset: usize) -> Option<i32> {
        self.read(offset).map(i32::from_be_bytes)
    }

    pub fn set_i32(&mut self, offset: usize, value: i32) -> bool {
        self.write(offset, value.to_be_bytes())
    }

    pub fn get_f64(&self, offset: usize) -> Option<f64> {
        self.read(offset).map(f64::from_be_bytes)
    }

    pub fn set_f64(&mut self, offset: usize, value: f64) -> bool {
        self.write(offset, value.to_be_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        let buf = ByteBuffer::from_str("Hello, Node.js!");
        assert_eq!(buf.len(), 15);
        assert_eq!(buf.kind(), BufferKind::Buffer);
        assert_eq!(buf.to_utf8_lossy(), "Hello, Node.js!");
        assert_eq!(buf.to_base64(), "SGVsbG8sIE5vZGUuanMh");
    }

    #[test]
    fn test_hex_and_base64() {
        let buf = ByteBuffer::from_str("AB");
        assert_eq!(buf.to_hex(), "4142");
        assert_eq!(buf.to_base64(), "QUI=");
    }

    #[test]
    fn test_utf8_multibyte() {
        let buf = ByteBuffer::from_str("日本");
        assert_eq!(buf.len(), 6);
        assert_eq!(buf.to_hex(), "e697a5e69cac");
    }

    #[test]
    fn test_typed_elements() {
        let mut buf = ByteBuffer::zeroed(BufferKind::Uint8Array, 4);
        assert!(buf.set_u8(0, 255));
        assert!(buf.set_u8(1, 256));
        assert!(!buf.set_u8(4, 1));
        let elems: Vec<i32> = buf.elements().iter().filter_map(Value::to_i32).collect();
        assert_eq!(elems, vec![255, 0, 0, 0]);

        let signed = ByteBuffer::from_bytes(BufferKind::Int8Array, vec![0xff, 0x7f]);
        assert_eq!(signed.element(0).and_then(|v| v.to_i32()), Some(-1));
        assert_eq!(signed.element(1).and_then(|v| v.to_i32()), Some(127));
        assert!(signed.element(2).is_none());
    }

    #[test]
    fn test_data_view() {
        let mut view = ByteBuffer::zeroed(BufferKind::DataView, 16);
        assert!(view.set_i32(0, 42));
        assert!(view.set_f64(8, 3.14));
        assert_eq!(view.get_i32(0), Some(42));
        assert_eq!(view.get_f64(8), Some(3.14));
        assert_eq!(&view.as_bytes()[..4], &[0, 0, 0, 42]);

        assert!(!view.set_i32(14, 1));
        assert_eq!(view.get_f64(9), None);
        assert_eq!(view.get_i32(usize::MAX), None);
    }

    #[test]
    fn test_kind() {
        assert!(BufferKind::Uint8Array.is_typed_array());
        assert!(!BufferKind::ArrayBuffer.is_typed_array());
        assert!(!BufferKind::DataView.is_typed_array());
        assert_eq!(BufferKind::Int8Array.name(), "Int8Array");
    }

    #[test]
    fn test_elements_only_on_typed_arrays() {
        let raw = ByteBuffer::zeroed(BufferKind::ArrayBuffer, 2);
        assert!(raw.element(0).is_none());
        assert!(raw.elements().is_empty());

        let view = ByteBuffer::zeroed(BufferKind::DataView, 2);
        assert!(view.element(1).is_none());

        let bytes = ByteBuffer::from_bytes(BufferKind::Int8Array, vec![0xff, 1]);
        assert_eq!(bytes.element(0).and_then(|v| v.to_i32()), Some(-1));
        assert_eq!(bytes.elements().len(), 2);
    }
}
