/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The output pixel type and expansion of decoded scanlines into it.
//!
//! Every supported colour type normalizes to four channel RGBA on
//! output. Grayscale samples are replicated across the colour
//! channels and a missing alpha channel becomes fully opaque.

use bytemuck::{Pod, Zeroable};

use crate::enums::ColorType;

/// A single RGBA pixel with 8 bits per channel.
#[repr(C)]
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8
}

// Pixel is four plain bytes with no padding.
unsafe impl Zeroable for Pixel {}

unsafe impl Pod for Pixel {}

impl Pixel {
    /// Create a pixel from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Pixel {
        Pixel { r, g, b, a }
    }

    /// Create a fully opaque pixel.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Pixel {
        Pixel::new(r, g, b, 255)
    }
}

/// Expand reconstructed samples into RGBA pixels for `color`.
///
/// `source` holds `output.len()` pixels worth of samples laid out
/// in scanline order.
pub(crate) fn assemble(color: ColorType, source: &[u8], output: &mut [Pixel]) {
    match color {
        ColorType::Luma => expand_luma(source, output),
        ColorType::LumaA => expand_luma_alpha(source, output),
        ColorType::RGB => expand_rgb(source, output),
        ColorType::RGBA => expand_rgba(source, output),
        // rejected during header parsing
        ColorType::Palette | ColorType::Unknown => {}
    }
}

fn expand_luma(source: &[u8], output: &mut [Pixel]) {
    for (gray, pixel) in source.iter().zip(output) {
        *pixel = Pixel::opaque(*gray, *gray, *gray);
    }
}

fn expand_luma_alpha(source: &[u8], output: &mut [Pixel]) {
    for (pair, pixel) in source.chunks_exact(2).zip(output) {
        *pixel = Pixel::new(pair[0], pair[0], pair[0], pair[1]);
    }
}

fn expand_rgb(source: &[u8], output: &mut [Pixel]) {
    for (rgb, pixel) in source.chunks_exact(3).zip(output) {
        *pixel = Pixel::opaque(rgb[0], rgb[1], rgb[2]);
    }
}

fn expand_rgba(source: &[u8], output: &mut [Pixel]) {
    let out_bytes: &mut [u8] = bytemuck::cast_slice_mut(output);

    let min_size = out_bytes.len().min(source.len());
    out_bytes[..min_size].copy_from_slice(&source[..min_size]);
}
