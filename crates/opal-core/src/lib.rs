/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the `opal` decoding crates
//!
//! This crate carries the small pieces every format decoder needs but
//! no format owns:
//!
//! - An endian aware bytestream reader over borrowed slices
//! - Colorspace and bit depth descriptions of decoded images
//! - Decoder options and the flags that influence decoding
//!
//! It knows nothing about any specific image format.

pub mod bit_depth;
pub mod bytestream;
pub mod colorspace;
pub mod options;
