/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Interpretation of individual chunk payloads.

use log::{info, trace, warn};
use opal_core::bit_depth::BitDepth;
use opal_core::bytestream::ByteReader;

use crate::chunk::Chunk;
use crate::constants::IHDR_PAYLOAD_SIZE;
use crate::decoder::TextChunk;
use crate::enums::ColorType;
use crate::error::DecodeErrors;
use crate::PngDecoder;

impl<'a> PngDecoder<'a> {
    /// Interpret the 13 byte IHDR payload into [`crate::ImageHeader`],
    /// rejecting dimensions and features outside the supported scope.
    pub(crate) fn parse_ihdr(&mut self, chunk: &Chunk<'a>) -> Result<(), DecodeErrors> {
        if self.seen_hdr {
            return Err(DecodeErrors::FormatStatic("Multiple IHDR, corrupt PNG"));
        }

        if chunk.length != IHDR_PAYLOAD_SIZE {
            return Err(DecodeErrors::FormatStatic("Bad IHDR length, must be 13 bytes"));
        }

        let mut stream = ByteReader::new(chunk.data);

        self.info.width = stream.get_u32_be() as usize;
        self.info.height = stream.get_u32_be() as usize;

        if self.info.width == 0 || self.info.height == 0 {
            return Err(DecodeErrors::FormatStatic("Width or height cannot be zero"));
        }

        if self.info.width > self.options.max_width() {
            return Err(DecodeErrors::Format(format!(
                "Image width {}, larger than maximum configured width {}, aborting",
                self.info.width,
                self.options.max_width()
            )));
        }

        if self.info.height > self.options.max_height() {
            return Err(DecodeErrors::Format(format!(
                "Image height {}, larger than maximum configured height {}, aborting",
                self.info.height,
                self.options.max_height()
            )));
        }

        let depth = stream.get_u8();
        let color = stream.get_u8();

        match ColorType::from_int(color) {
            Some(ColorType::Palette) => {
                return Err(DecodeErrors::Unsupported(format!(
                    "Indexed colour (colour type {color}) is not supported"
                )));
            }
            Some(img_color) => self.info.color = img_color,
            None => {
                return Err(DecodeErrors::Format(format!("Unknown color value {color}")));
            }
        }
        self.info.components = self.info.color.num_components();

        // verify color plus bit depth
        match depth {
            8 => self.info.depth = BitDepth::Eight,
            1 | 2 | 4 | 16 => {
                return Err(DecodeErrors::Unsupported(format!(
                    "Bit depth {depth} is not supported, only 8 bit images are decoded"
                )));
            }
            _ => {
                return Err(DecodeErrors::Format(format!("Unknown bit depth {depth}")));
            }
        }

        self.info.compression_method = stream.get_u8();

        if self.info.compression_method != 0 {
            return Err(DecodeErrors::Unsupported(format!(
                "Unsupported compression method {}, only deflate (0) is defined",
                self.info.compression_method
            )));
        }

        self.info.filter_method = stream.get_u8();

        if self.info.filter_method != 0 {
            return Err(DecodeErrors::Unsupported(format!(
                "Unsupported filter method {}, only adaptive filtering (0) is defined",
                self.info.filter_method
            )));
        }

        self.info.interlace_method = stream.get_u8();

        match self.info.interlace_method {
            0 => {}
            1 => {
                return Err(DecodeErrors::Unsupported(
                    "Adam7 interlaced images are not supported".to_string()
                ));
            }
            method => {
                return Err(DecodeErrors::Format(format!("Unknown interlace method {method}")));
            }
        }

        info!("Width: {}", self.info.width);
        info!("Height: {}", self.info.height);
        info!("Depth: {:?}", self.info.depth);
        info!("Colour type: {:?}", self.info.color);

        self.seen_hdr = true;

        Ok(())
    }

    /// Split a tEXt payload at its first NUL into keyword and text.
    ///
    /// The payload is Latin-1 per the PNG spec; both halves are kept
    /// with a lossy UTF-8 conversion since the raw bytes survive in
    /// the metadata map anyway.
    pub(crate) fn parse_text(&mut self, chunk: &Chunk<'a>) -> Result<(), DecodeErrors> {
        match chunk.data.iter().position(|byte| *byte == 0) {
            Some(separator) => {
                let keyword = String::from_utf8_lossy(&chunk.data[..separator]).into_owned();
                let text = String::from_utf8_lossy(&chunk.data[separator + 1..]).into_owned();

                trace!("tEXt keyword: {keyword}");

                self.text.push(TextChunk { keyword, text });
            }
            None => {
                if self.options.strict_mode() {
                    return Err(DecodeErrors::FormatStatic(
                        "tEXt chunk has no keyword separator"
                    ));
                }
                warn!("Malformed tEXt chunk with no keyword separator, skipping");
            }
        }

        Ok(())
    }
}
