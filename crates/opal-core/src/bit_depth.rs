/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image bit depth information.

/// The image bit depth.
///
/// Sub byte depths do not appear here, eight is the smallest value
/// a decoder reports.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum BitDepth {
    /// Eight bit depth.
    ///
    /// Images with such bit depth use [`u8`] to store
    /// pixels and use the whole range from 0-255.
    #[default]
    Eight,
    /// Sixteen bit depth.
    ///
    /// Images with such bit depth use [`u16`] to store values and
    /// use the whole range, i.e 0-65535.
    ///
    /// Data is stored and processed in native endian.
    Sixteen
}

impl BitDepth {
    /// The maximum value a pixel sample can take for this depth.
    pub const fn max_value(self) -> u16 {
        match self {
            Self::Eight => u8::MAX as u16,
            Self::Sixteen => u16::MAX
        }
    }

    /// Number of bytes a single pixel sample occupies.
    pub const fn size_of(self) -> usize {
        match self {
            Self::Eight => 1,
            Self::Sixteen => 2
        }
    }
}
