/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// The first eight bytes of every PNG stream, read as one
/// big endian u64.
///
/// A `0x89` byte, the letters `PNG`, then `\r\n`, `0x1A`, `\n`.
pub(crate) const PNG_SIGNATURE: u64 = 0x8950_4E47_0D0A_1A0A;

/// Size of the IHDR chunk payload, always exactly 13 bytes.
pub(crate) const IHDR_PAYLOAD_SIZE: usize = 13;
