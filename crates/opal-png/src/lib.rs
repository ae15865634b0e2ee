/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A png decoder
//!
//! This features a simple PNG reader in Rust which decodes the
//! commonly used subset of ISO/IEC 15948:2003 (E), 8 bit images
//! without interlacing, and hands back pixels in one fixed format.
//!
//! # Features
//! - Fast inflate decoder
//! - Whole image CRC and Adler validation, individually toggleable
//! - Every output normalized to 8 bit RGBA, whatever the input
//!   colour type
//!
//! # Usage
//! Add the library to `Cargo.toml`
//!
//! ```toml
//! opal-png = "0.1"
//! ```
//!
//! Then decode an in memory png to pixels
//!
//!```no_run
//! use opal_png::PngDecoder;
//!
//! let mut decoder = PngDecoder::new(&[]);
//!
//! let image = decoder.decode().unwrap();
//!
//! // channels are pixel.r, pixel.g, pixel.b and pixel.a,
//! // grayscale and rgb inputs come back opaque
//! let pixels = image.pixels();
//!```
//!
//! # Inspecting an image without decoding it
//!
//! Dimensions, depth and colorspace live in the first chunk, so
//! they can be read without inflating the pixel data
//!
//!```no_run
//! use opal_png::PngDecoder;
//!
//! let mut decoder = PngDecoder::new(&[]);
//!
//! decoder.decode_headers().unwrap();
//!
//! let (width, height) = decoder.dimensions().unwrap();
//!```
//!
//! # Metadata
//!
//! tEXt chunks are parsed into [`TextChunk`] and reachable via
//! [`DecodedImage::text_chunks`], other ancillary chunks keep
//! their raw payloads in [`DecodedImage::metadata`].
//!
//! # Alternatives
//! - [png](https://crates.io/crates/png) crate
pub use decoder::{DecodedImage, ImageHeader, PngDecoder, TextChunk};
pub use enums::ColorType;
pub use opal_core;
pub use pixel::Pixel;

mod chunk;
mod constants;
mod crc;
mod decoder;
mod enums;
pub mod error;
mod filters;
mod headers;
mod pixel;
