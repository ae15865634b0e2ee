/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(clippy::upper_case_acronyms, non_camel_case_types)]

use opal_core::colorspace::ColorSpace;

/// Chunk types this decoder distinguishes, see
/// <https://www.w3.org/TR/2003/REC-PNG-20031110/> table 5.3.
///
/// Everything outside the critical set and `tEXt` maps to `unkn`;
/// the raw tag survives on the parsed chunk itself.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ChunkType {
    IHDR,
    IDAT,
    IEND,
    tEXt,
    unkn
}

impl ChunkType {
    pub(crate) fn from_bytes(name: [u8; 4]) -> ChunkType {
        match &name {
            b"IHDR" => ChunkType::IHDR,
            b"IDAT" => ChunkType::IDAT,
            b"IEND" => ChunkType::IEND,
            b"tEXt" => ChunkType::tEXt,
            _ => ChunkType::unkn
        }
    }
}

/// Scanline filter types, the five from the PNG spec plus the two
/// first-scanline rewrites used during dispatch.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FilterType {
    None,
    Sub,
    Up,
    Average,
    Paeth,
    // First scanline, special
    PaethFirst,
    AvgFirst
}

impl FilterType {
    pub fn from_int(int: u8) -> Option<FilterType> {
        match int {
            0 => Some(FilterType::None),
            1 => Some(FilterType::Sub),
            2 => Some(FilterType::Up),
            3 => Some(FilterType::Average),
            4 => Some(FilterType::Paeth),
            _ => None
        }
    }
}

/// Color layout declared by a PNG's IHDR chunk.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ColorType {
    Luma,
    Palette,
    LumaA,
    RGB,
    RGBA,
    #[default]
    Unknown
}

impl ColorType {
    pub(crate) const fn num_components(self) -> u8 {
        match self {
            ColorType::Luma | ColorType::Palette => 1,
            ColorType::LumaA => 2,
            ColorType::RGB => 3,
            ColorType::RGBA => 4,
            ColorType::Unknown => 0
        }
    }

    pub(crate) fn from_int(int: u8) -> Option<ColorType> {
        match int {
            0 => Some(Self::Luma),
            2 => Some(Self::RGB),
            3 => Some(Self::Palette),
            4 => Some(Self::LumaA),
            6 => Some(Self::RGBA),
            _ => None
        }
    }

    /// The colorspace this color type stores its samples in.
    pub const fn to_colorspace(self) -> ColorSpace {
        match self {
            ColorType::Luma => ColorSpace::Luma,
            ColorType::LumaA => ColorSpace::LumaA,
            ColorType::RGB => ColorSpace::RGB,
            ColorType::RGBA => ColorSpace::RGBA,
            // palettes never survive header parsing
            ColorType::Palette | ColorType::Unknown => ColorSpace::Unknown
        }
    }
}
