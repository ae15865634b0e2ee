/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Chunk framing: length, type, data and CRC.
//!
//! [`ChunkReader`] walks the stream lazily, one chunk per `next()`
//! call, so nothing is buffered beyond what the caller keeps.
//! [`validate_chunks`] runs the ordering rules over a completed
//! sequence before any payload is interpreted.

use log::trace;
use opal_core::bytestream::ByteReader;

use crate::crc::crc32_slice8;
use crate::enums::ChunkType;
use crate::error::DecodeErrors;

/// A single parsed chunk.
///
/// `data` borrows the input buffer; no payload bytes are copied
/// while reading.
#[derive(Copy, Clone, Debug)]
pub struct Chunk<'a> {
    /// Declared payload length.
    pub length: usize,
    /// Raw four byte tag as it appeared in the stream.
    pub name:   [u8; 4],
    /// Tag resolved against the types the decoder knows.
    pub ty:     ChunkType,
    /// Payload, exactly `length` bytes.
    pub data:   &'a [u8],
    /// Stored CRC-32 over tag and payload.
    pub crc:    u32
}

impl Chunk<'_> {
    /// True if the chunk is ancillary and may be skipped without
    /// misdecoding the image.
    ///
    /// Bit 5 of the first tag byte; lowercase means ancillary.
    pub const fn is_ancillary(&self) -> bool {
        self.name[0] & 0b10_0000 != 0
    }
}

/// Lazy iterator over the chunks of a stream.
///
/// Yields chunks until an `IEND` chunk is produced or the stream is
/// exhausted at a chunk boundary; both end iteration cleanly. Bytes
/// after `IEND` are ignored. After an error the iterator is fused.
pub(crate) struct ChunkReader<'a, 'b> {
    stream:      &'b mut ByteReader<'a>,
    confirm_crc: bool,
    finished:    bool
}

impl<'a, 'b> ChunkReader<'a, 'b> {
    pub(crate) fn new(stream: &'b mut ByteReader<'a>, confirm_crc: bool) -> ChunkReader<'a, 'b> {
        ChunkReader { stream, confirm_crc, finished: false }
    }

    fn read_chunk(&mut self) -> Result<Chunk<'a>, DecodeErrors> {
        // format is length - chunk type - [data] - crc
        let length = self.stream.get_u32_be_err()? as usize;
        let name = self.stream.get_fixed_bytes_or_err::<4>()?;

        let ty = ChunkType::from_bytes(name);

        if !self.stream.has(length + 4 /*crc stream*/) {
            let err = format!(
                "Not enough bytes for chunk {:?}, bytes requested are {}, but bytes present are {}",
                String::from_utf8_lossy(&name),
                length + 4,
                self.stream.remaining()
            );

            return Err(DecodeErrors::Format(err));
        }

        let data = self.stream.get_bytes(length)?;
        let crc = self.stream.get_u32_be_err()?;

        if self.confirm_crc {
            // crc covers the tag and the payload, hash them in sequence
            let running = crc32_slice8(&name, u32::MAX);
            let calculated = !crc32_slice8(data, running);

            if crc != calculated {
                return Err(DecodeErrors::BadCrc { chunk: name, stored: crc, calculated });
            }
        }

        if ty == ChunkType::IEND && length != 0 {
            return Err(DecodeErrors::FormatStatic("IEND chunk must have zero length"));
        }

        trace!("Read chunk {:?}, length {}", String::from_utf8_lossy(&name), length);

        Ok(Chunk { length, name, ty, data, crc })
    }
}

impl<'a> Iterator for ChunkReader<'a, '_> {
    type Item = Result<Chunk<'a>, DecodeErrors>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.stream.remaining() == 0 {
            return None;
        }

        let chunk = self.read_chunk();

        match &chunk {
            Ok(parsed) => {
                if parsed.ty == ChunkType::IEND {
                    self.finished = true;

                    if self.stream.remaining() > 0 {
                        trace!("Ignoring {} bytes after IEND", self.stream.remaining());
                    }
                }
            }
            Err(_) => self.finished = true
        }

        Some(chunk)
    }
}

/// Enforce ordering and presence rules over a completed sequence:
/// `IHDR` first, `IEND` last, at least one `IDAT`.
pub(crate) fn validate_chunks(chunks: &[Chunk]) -> Result<(), DecodeErrors> {
    let mut seen_ihdr = false;
    let mut idat_count = 0usize;

    for (position, chunk) in chunks.iter().enumerate() {
        match chunk.ty {
            ChunkType::IHDR => {
                if position != 0 {
                    return Err(DecodeErrors::FormatStatic("IHDR must be the first chunk"));
                }
                seen_ihdr = true;
            }
            ChunkType::IEND => {
                if position != chunks.len() - 1 {
                    return Err(DecodeErrors::FormatStatic("IEND must be the last chunk"));
                }
            }
            ChunkType::IDAT => idat_count += 1,
            _ => {}
        }
    }

    if !seen_ihdr {
        return Err(DecodeErrors::FormatStatic("missing IHDR chunk"));
    }

    match chunks.last() {
        Some(chunk) if chunk.ty == ChunkType::IEND => {}
        _ => return Err(DecodeErrors::FormatStatic("missing IEND chunk"))
    }

    if idat_count == 0 {
        return Err(DecodeErrors::FormatStatic("no IDAT chunks found"));
    }

    Ok(())
}
