/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during decoding.

use core::fmt::{Debug, Display, Formatter};

use opal_core::bytestream::ByteIoError;
use zune_inflate::errors::InflateDecodeErrors;

/// All errors the decoder can surface.
///
/// Each variant is one category of failure: I/O shortfalls, format
/// violations, checksum mismatches, features outside the supported
/// scope and zlib stream corruption.
pub enum DecodeErrors {
    /// The stream does not start with the eight byte PNG signature.
    BadSignature,
    /// The underlying stream ended before a read completed.
    Io(ByteIoError),
    /// A chunk's stored CRC-32 disagrees with the one computed
    /// over its type and data bytes.
    BadCrc {
        /// Raw tag of the offending chunk
        chunk:      [u8; 4],
        stored:     u32,
        calculated: u32
    },
    /// A structural violation in the stream, heap allocated message.
    Format(String),
    /// A structural violation in the stream, static message.
    FormatStatic(&'static str),
    /// The stream is well formed but uses a feature outside the
    /// supported scope, e.g a 16 bit depth or a palette.
    Unsupported(String),
    /// The concatenated IDAT payload is not a valid zlib stream.
    Inflate(InflateDecodeErrors)
}

impl Debug for DecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BadSignature => {
                writeln!(f, "Bad PNG signature, not a PNG")
            }
            Self::Io(err) => {
                writeln!(f, "I/O error: {err:?}")
            }
            Self::BadCrc { chunk, stored, calculated } => {
                writeln!(
                    f,
                    "CRC mismatch in {} chunk, stored {stored:#010X} but calculated {calculated:#010X}",
                    String::from_utf8_lossy(chunk)
                )
            }
            Self::Format(val) => {
                writeln!(f, "{val}")
            }
            Self::FormatStatic(val) => {
                writeln!(f, "{val}")
            }
            Self::Unsupported(val) => {
                writeln!(f, "{val}")
            }
            Self::Inflate(err) => {
                writeln!(f, "Error decoding idat chunks: {err:?}")
            }
        }
    }
}

impl Display for DecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

impl std::error::Error for DecodeErrors {}

impl From<&'static str> for DecodeErrors {
    fn from(val: &'static str) -> Self {
        Self::FormatStatic(val)
    }
}

impl From<String> for DecodeErrors {
    fn from(val: String) -> Self {
        Self::Format(val)
    }
}

impl From<ByteIoError> for DecodeErrors {
    fn from(val: ByteIoError) -> Self {
        Self::Io(val)
    }
}

impl From<InflateDecodeErrors> for DecodeErrors {
    fn from(val: InflateDecodeErrors) -> Self {
        Self::Inflate(val)
    }
}
