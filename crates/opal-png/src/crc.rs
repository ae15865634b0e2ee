/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! CRC-32 (IEEE, reflected) over chunk type and data bytes.
//!
//! Uses slicing-by-eight with tables built at compile time. The
//! running form lets callers hash discontiguous regions without
//! first gluing them together.

/// Reflected IEEE polynomial.
const CRC32_POLY: u32 = 0xEDB8_8320;

const fn crc32_tables() -> [[u32; 256]; 8] {
    let mut tables = [[0u32; 256]; 8];

    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut round = 0;

        while round < 8 {
            crc = if crc & 1 == 1 { (crc >> 1) ^ CRC32_POLY } else { crc >> 1 };
            round += 1;
        }
        tables[0][i] = crc;
        i += 1;
    }

    // table `t` advances a byte through `t` additional zero bytes
    let mut t = 1;
    while t < 8 {
        let mut i = 0;
        while i < 256 {
            let prev = tables[t - 1][i];
            tables[t][i] = (prev >> 8) ^ tables[0][(prev & 0xFF) as usize];
            i += 1;
        }
        t += 1;
    }

    tables
}

static CRC32_TABLES: [[u32; 256]; 8] = crc32_tables();

/// Update a running CRC-32 with `data`, eight bytes per step.
///
/// Seed with `u32::MAX` and invert the final value to get the
/// checksum, i.e `!crc32_slice8(data, u32::MAX)`.
pub(crate) fn crc32_slice8(data: &[u8], mut crc: u32) -> u32 {
    let mut chunks = data.chunks_exact(8);

    for chunk in &mut chunks {
        crc ^= u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);

        crc = CRC32_TABLES[7][(crc & 0xFF) as usize]
            ^ CRC32_TABLES[6][((crc >> 8) & 0xFF) as usize]
            ^ CRC32_TABLES[5][((crc >> 16) & 0xFF) as usize]
            ^ CRC32_TABLES[4][(crc >> 24) as usize]
            ^ CRC32_TABLES[3][chunk[4] as usize]
            ^ CRC32_TABLES[2][chunk[5] as usize]
            ^ CRC32_TABLES[1][chunk[6] as usize]
            ^ CRC32_TABLES[0][chunk[7] as usize];
    }

    for byte in chunks.remainder() {
        crc = (crc >> 8) ^ CRC32_TABLES[0][((crc ^ u32::from(*byte)) & 0xFF) as usize];
    }

    crc
}

/// One shot CRC-32 of `data`.
pub(crate) fn crc32(data: &[u8]) -> u32 {
    !crc32_slice8(data, u32::MAX)
}
