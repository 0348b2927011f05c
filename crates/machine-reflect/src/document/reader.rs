// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Validating document parser.

use super::{tag, DocumentError, MAX_DEPTH, MIN_DOCUMENT_LEN};

/// One decoded element payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Double(f64),
    String(String),
    Document(Document),
    Array(Document),
    Boolean(bool),
    Int32(i32),
    Int64(i64),
}

impl Element {
    /// Short name of the payload kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::Document(_) => "document",
            Self::Array(_) => "array",
            Self::Boolean(_) => "bool",
            Self::Int32(_) => "int32",
            Self::Int64(_) => "int64",
        }
    }

    /// Embedded document payload (tag 0x03 or 0x04).
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Self::Document(d) | Self::Array(d) => Some(d),
            _ => None,
        }
    }
}

/// A parsed document: named elements in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    elements: Vec<(String, Element)>,
}

impl Document {
    /// Parse a complete document, rejecting trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        let mut cursor = Cursor::new(bytes);
        let document = cursor.read_document(0)?;
        if cursor.pos != bytes.len() {
            return Err(DocumentError::TrailingBytes { offset: cursor.pos });
        }
        Ok(document)
    }

    /// First element named `name`.
    pub fn get(&self, name: &str) -> Option<&Element> {
        self.elements
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, element)| element)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Element)> {
        self.elements.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Byte cursor. `buf` ends where the enclosing document's elements end, so
/// nested reads cannot run past their parent.
struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], DocumentError> {
        let remaining = self.buf.len().saturating_sub(self.pos);
        if remaining < count {
            return Err(DocumentError::Truncated {
                offset: self.pos,
                need: count - remaining,
            });
        }
        let bytes = &self.buf[self.pos..self.pos + count];
        self.pos += count;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DocumentError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    fn read_u8(&mut self) -> Result<u8, DocumentError> {
        Ok(self.read_array::<1>()?[0])
    }

    fn read_i32(&mut self) -> Result<i32, DocumentError> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    fn read_cstring(&mut self) -> Result<String, DocumentError> {
        let start = self.pos;
        let rest = self.buf.get(start..).unwrap_or_default();
        let len = rest
            .iter()
            .position(|b| *b == 0)
            .ok_or(DocumentError::MissingTerminator {
                offset: self.buf.len(),
            })?;
        let bytes = self.read_bytes(len + 1)?;
        std::str::from_utf8(&bytes[..len])
            .map(str::to_string)
            .map_err(|_| DocumentError::InvalidUtf8 { offset: start })
    }

    fn read_document(&mut self, depth: usize) -> Result<Document, DocumentError> {
        let start = self.pos;
        if depth > MAX_DEPTH {
            return Err(DocumentError::NestingTooDeep { offset: start });
        }
        let declared = self.read_i32()?;
        let length = usize::try_from(declared)
            .ok()
            .filter(|l| *l >= MIN_DOCUMENT_LEN)
            .ok_or(DocumentError::BadLength {
                offset: start,
                length: i64::from(declared),
            })?;
        let end = start + length;
        if end > self.buf.len() {
            return Err(DocumentError::Truncated {
                offset: start,
                need: end - self.buf.len(),
            });
        }

        let mut body = Cursor {
            buf: &self.buf[..end - 1],
            pos: self.pos,
        };
        let mut elements = Vec::new();
        while body.pos < body.buf.len() {
            elements.push(body.read_element(depth)?);
        }
        if self.buf[end - 1] != 0 {
            return Err(DocumentError::MissingTerminator { offset: end - 1 });
        }
        self.pos = end;
        Ok(Document { elements })
    }

    fn read_element(&mut self, depth: usize) -> Result<(String, Element), DocumentError> {
        let offset = self.pos;
        let tag = self.read_u8()?;
        let name = self.read_cstring()?;
        let element = match tag {
            tag::DOUBLE => Element::Double(f64::from_le_bytes(self.read_array()?)),
            tag::STRING => Element::String(self.read_string()?),
            tag::DOCUMENT => Element::Document(self.read_document(depth + 1)?),
            tag::ARRAY => Element::Array(self.read_document(depth + 1)?),
            tag::BOOLEAN => {
                let value_offset = self.pos;
                match self.read_u8()? {
                    0 => Element::Boolean(false),
                    1 => Element::Boolean(true),
                    value => {
                        return Err(DocumentError::InvalidBoolean {
                            offset: value_offset,
                            value,
                        })
                    }
                }
            }
            tag::INT32 => Element::Int32(self.read_i32()?),
            tag::INT64 => Element::Int64(i64::from_le_bytes(self.read_array()?)),
            other => return Err(DocumentError::UnsupportedTag { offset, tag: other }),
        };
        Ok((name, element))
    }

    fn read_string(&mut self) -> Result<String, DocumentError> {
        let start = self.pos;
        let declared = self.read_i32()?;
        let length = usize::try_from(declared)
            .ok()
            .filter(|l| *l >= 1)
            .ok_or(DocumentError::BadLength {
                offset: start,
                length: i64::from(declared),
            })?;
        let bytes = self.read_bytes(length)?;
        if bytes[length - 1] != 0 {
            return Err(DocumentError::MissingTerminator {
                offset: self.pos - 1,
            });
        }
        String::from_utf8(bytes[..length - 1].to_vec())
            .map_err(|_| DocumentError::InvalidUtf8 { offset: start + 4 })
    }
}
