/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Helpers for building png streams byte by byte, used to make
//! inputs the `png` crate encoder refuses to produce.
#![allow(dead_code)]

pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Bitwise crc32, the reference formulation.
pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = u32::MAX;

    for byte in data {
        crc ^= u32::from(*byte);

        for _ in 0..8 {
            if crc & 1 == 1 {
                crc = (crc >> 1) ^ 0xEDB8_8320;
            } else {
                crc >>= 1;
            }
        }
    }
    !crc
}

pub fn adler32(data: &[u8]) -> u32 {
    const ADLER_MOD: u32 = 65521;

    let mut a: u32 = 1;
    let mut b: u32 = 0;

    for byte in data {
        a = (a + u32::from(*byte)) % ADLER_MOD;
        b = (b + a) % ADLER_MOD;
    }
    (b << 16) | a
}

/// Wrap raw bytes into a zlib stream of stored deflate blocks.
pub fn zlib_store(raw: &[u8]) -> Vec<u8> {
    let mut out = vec![0x78, 0x01];

    if raw.is_empty() {
        // a single final stored block of length zero
        out.extend_from_slice(&[0x01, 0x00, 0x00, 0xFF, 0xFF]);
    } else {
        let mut blocks = raw.chunks(0xFFFF).peekable();

        while let Some(block) = blocks.next() {
            let bfinal = u8::from(blocks.peek().is_none());
            let len = block.len() as u16;

            out.push(bfinal);
            out.extend_from_slice(&len.to_le_bytes());
            out.extend_from_slice(&(!len).to_le_bytes());
            out.extend_from_slice(block);
        }
    }

    out.extend_from_slice(&adler32(raw).to_be_bytes());

    out
}

/// Frame `data` as a chunk called `name`, length and crc included.
pub fn chunk(name: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + 12);

    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(name);
    out.extend_from_slice(data);

    let mut checksummed = name.to_vec();
    checksummed.extend_from_slice(data);

    out.extend_from_slice(&crc32(&checksummed).to_be_bytes());

    out
}

pub fn ihdr(width: u32, height: u32, depth: u8, color: u8) -> Vec<u8> {
    ihdr_full(width, height, depth, color, 0, 0, 0)
}

pub fn ihdr_full(
    width: u32, height: u32, depth: u8, color: u8, compression: u8, filter: u8, interlace: u8
) -> Vec<u8> {
    let mut payload = Vec::with_capacity(13);

    payload.extend_from_slice(&width.to_be_bytes());
    payload.extend_from_slice(&height.to_be_bytes());
    payload.extend_from_slice(&[depth, color, compression, filter, interlace]);

    chunk(b"IHDR", &payload)
}

pub fn iend() -> Vec<u8> {
    chunk(b"IEND", &[])
}

/// Glue the signature and chunks into one stream.
pub fn png_from_chunks(chunks: &[Vec<u8>]) -> Vec<u8> {
    let mut out = SIGNATURE.to_vec();

    for piece in chunks {
        out.extend_from_slice(piece);
    }
    out
}

/// Samples per pixel for a png colour type code.
pub fn components(color: u8) -> usize {
    match color {
        0 => 1,
        2 => 3,
        4 => 2,
        6 => 4,
        _ => panic!("unsupported colour code {color}")
    }
}

/// Prefix every scanline of `samples` with a filter byte of zero.
pub fn filter_none_scanlines(samples: &[u8], stride: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() + samples.len() / stride + 1);

    for line in samples.chunks(stride) {
        out.push(0);
        out.extend_from_slice(line);
    }
    out
}

/// Build a complete, valid png holding `samples`, unfiltered.
pub fn build_png(width: u32, height: u32, color: u8, samples: &[u8]) -> Vec<u8> {
    let stride = width as usize * components(color);
    let filtered = filter_none_scanlines(samples, stride);

    png_from_chunks(&[
        ihdr(width, height, 8, color),
        chunk(b"IDAT", &zlib_store(&filtered)),
        iend()
    ])
}

/// Expand raw samples of the given colour code to interleaved RGBA
/// bytes, the layout the decoder always produces.
pub fn to_rgba(color: u8, samples: &[u8]) -> Vec<u8> {
    match color {
        0 => samples.iter().flat_map(|g| [*g, *g, *g, 255]).collect(),
        2 => {
            samples
                .chunks_exact(3)
                .flat_map(|px| [px[0], px[1], px[2], 255])
                .collect()
        }
        4 => {
            samples
                .chunks_exact(2)
                .flat_map(|px| [px[0], px[0], px[0], px[1]])
                .collect()
        }
        6 => samples.to_vec(),
        _ => panic!("unsupported colour code {color}")
    }
}
