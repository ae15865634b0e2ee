/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The main decoder, walking a png stream from signature to pixels.

use std::collections::BTreeMap;

use log::{trace, warn};
use opal_core::bit_depth::BitDepth;
use opal_core::bytestream::ByteReader;
use opal_core::colorspace::ColorSpace;
use opal_core::options::DecoderOptions;
use zune_inflate::{DeflateDecoder, DeflateOptions};

use crate::chunk::{validate_chunks, Chunk, ChunkReader};
use crate::constants::PNG_SIGNATURE;
use crate::enums::{ChunkType, ColorType, FilterType};
use crate::error::DecodeErrors;
use crate::filters::{recon_average, recon_average_first, recon_paeth, recon_sub, recon_up};
use crate::pixel::{assemble, Pixel};

/// Information read from the IHDR chunk.
#[derive(Default, Debug, Copy, Clone)]
pub struct ImageHeader {
    pub width:  usize,
    pub height: usize,
    pub depth:  BitDepth,
    pub color:  ColorType,
    /// Samples per pixel for `color`.
    pub components:         u8,
    pub compression_method: u8,
    pub filter_method:      u8,
    pub interlace_method:   u8
}

impl ImageHeader {
    /// Number of bytes holding one pixel in the reconstructed
    /// scanline data, before alpha expansion.
    pub const fn bytes_per_pixel(&self) -> usize {
        self.components as usize
    }

    /// Number of bytes holding one reconstructed scanline.
    pub const fn row_stride(&self) -> usize {
        self.width * self.bytes_per_pixel()
    }
}

/// A decoded tEXt chunk, a keyword and its human readable text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TextChunk {
    pub keyword: String,
    pub text:    String
}

/// A fully decoded image, always 8 bit RGBA, plus whatever
/// ancillary information survived decoding.
#[derive(Debug)]
pub struct DecodedImage {
    header:   ImageHeader,
    pixels:   Vec<Pixel>,
    metadata: BTreeMap<[u8; 4], Vec<u8>>,
    text:     Vec<TextChunk>
}

impl DecodedImage {
    /// Return image width and height.
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.header.width, self.header.height)
    }

    /// Return the header the image was decoded from.
    pub const fn header(&self) -> &ImageHeader {
        &self.header
    }

    /// Return pixels in scanline order, top to bottom, left to
    /// right within a scanline.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Consume the image, returning its pixels.
    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }

    /// View the pixels as raw interleaved RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Return the pixel at `(x, y)`, or `None` when the position
    /// lies outside the image.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Pixel> {
        if x >= self.header.width {
            return None;
        }
        self.pixels.get(y * self.header.width + x).copied()
    }

    /// Raw payloads of ancillary chunks the decoder did not
    /// interpret itself, keyed by chunk tag.
    pub const fn metadata(&self) -> &BTreeMap<[u8; 4], Vec<u8>> {
        &self.metadata
    }

    /// All tEXt chunks found in the stream, in stream order.
    pub fn text_chunks(&self) -> &[TextChunk] {
        &self.text
    }
}

/// A png decoder over borrowed input.
///
/// The decoder works in two stages, [`decode_headers`](Self::decode_headers)
/// walks the chunk sequence and interprets everything but the
/// compressed pixel data, and [`decode`](Self::decode) finishes the
/// job. Calling `decode` directly runs both stages.
pub struct PngDecoder<'a> {
    pub(crate) stream:   ByteReader<'a>,
    pub(crate) options:  DecoderOptions,
    pub(crate) info:     ImageHeader,
    pub(crate) seen_hdr: bool,
    pub(crate) text:     Vec<TextChunk>,
    idat_stream:         Vec<u8>,
    metadata:            BTreeMap<[u8; 4], Vec<u8>>,
    decoded_headers:     bool
}

impl<'a> PngDecoder<'a> {
    pub fn new(data: &'a [u8]) -> PngDecoder<'a> {
        PngDecoder::new_with_options(data, DecoderOptions::default())
    }

    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> PngDecoder<'a> {
        PngDecoder {
            stream: ByteReader::new(data),
            options,
            info: ImageHeader::default(),
            seen_hdr: false,
            text: Vec::new(),
            idat_stream: Vec::new(),
            metadata: BTreeMap::new(),
            decoded_headers: false
        }
    }

    /// Image width and height, present after headers are decoded.
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        if self.decoded_headers {
            return Some((self.info.width, self.info.height));
        }
        None
    }

    /// Image bit depth, present after headers are decoded.
    pub const fn depth(&self) -> Option<BitDepth> {
        if self.decoded_headers {
            return Some(self.info.depth);
        }
        None
    }

    /// Input colorspace of the image, present after headers are
    /// decoded. Output pixels are always RGBA regardless.
    pub fn colorspace(&self) -> Option<ColorSpace> {
        if self.decoded_headers {
            return Some(self.info.color.to_colorspace());
        }
        None
    }

    /// The full parsed header, present after headers are decoded.
    pub const fn header(&self) -> Option<&ImageHeader> {
        if self.decoded_headers {
            return Some(&self.info);
        }
        None
    }

    /// Decode a png up to, but not including, the compressed pixel
    /// data.
    ///
    /// This verifies the signature, reads every chunk, checks the
    /// sequence rules and interprets IHDR and tEXt, leaving the
    /// dimensions and colorspace queryable without paying for
    /// inflation. Calling it twice is a no-op.
    pub fn decode_headers(&mut self) -> Result<(), DecodeErrors> {
        if self.decoded_headers {
            return Ok(());
        }

        // a short stream reads as zero here and fails the same way
        // a wrong signature does
        if self.stream.get_u64_be() != PNG_SIGNATURE {
            return Err(DecodeErrors::BadSignature);
        }

        let confirm_crc = self.options.png_confirm_crc();

        let chunks: Vec<Chunk<'a>> = ChunkReader::new(&mut self.stream, confirm_crc)
            .collect::<Result<Vec<Chunk<'a>>, DecodeErrors>>()?;

        validate_chunks(&chunks)?;

        for chunk in &chunks {
            match chunk.ty {
                ChunkType::IHDR => self.parse_ihdr(chunk)?,
                ChunkType::IDAT => {
                    trace!("IDAT chunk, length {}", chunk.length);

                    self.idat_stream.extend_from_slice(chunk.data);
                }
                ChunkType::tEXt => {
                    self.parse_text(chunk)?;
                    self.stash_metadata(chunk);
                }
                ChunkType::IEND => {}
                ChunkType::unkn => {
                    if !chunk.is_ancillary() {
                        return Err(DecodeErrors::Format(format!(
                            "Unknown critical chunk {}, cannot decode",
                            String::from_utf8_lossy(&chunk.name)
                        )));
                    }
                    trace!(
                        "Skipping unknown ancillary chunk {}",
                        String::from_utf8_lossy(&chunk.name)
                    );
                    self.stash_metadata(chunk);
                }
            }
        }

        self.decoded_headers = true;

        Ok(())
    }

    /// Decode a whole image, normalizing the output to 8 bit RGBA.
    ///
    /// Can be called again after a successful decode and will
    /// return an equal image.
    pub fn decode(&mut self) -> Result<DecodedImage, DecodeErrors> {
        self.decode_headers()?;

        let deflate_data = self.inflate()?;
        let raw = self.unfilter(&deflate_data)?;

        let mut pixels = vec![Pixel::default(); self.info.width * self.info.height];

        assemble(self.info.color, &raw, &mut pixels);

        trace!("Decoded {} pixels", pixels.len());

        Ok(DecodedImage {
            header:   self.info,
            pixels,
            metadata: self.metadata.clone(),
            text:     self.text.clone()
        })
    }

    /// Keep the raw payload of an ancillary chunk around. Chunks
    /// sharing a tag overwrite each other, the last one wins.
    fn stash_metadata(&mut self, chunk: &Chunk<'a>) {
        if self.metadata.insert(chunk.name, chunk.data.to_vec()).is_some() {
            trace!(
                "Duplicate {} chunk, keeping the later one",
                String::from_utf8_lossy(&chunk.name)
            );
        }
    }

    /// Inflate the concatenated IDAT payloads into filtered
    /// scanline data.
    fn inflate(&mut self) -> Result<Vec<u8>, DecodeErrors> {
        // deflate streams do not record their decompressed size, so
        // pass a hint and let the inflator grow its buffer as needed
        let size_hint = (self.info.row_stride() + 1) * self.info.height;

        let option = DeflateOptions::default()
            .set_size_hint(size_hint)
            .set_confirm_checksum(self.options.inflate_confirm_adler());

        let mut decoder = DeflateDecoder::new_with_options(&self.idat_stream, option);

        decoder.decode_zlib().map_err(DecodeErrors::Inflate)
    }

    /// Undo scanline filtering over the whole inflated stream,
    /// returning packed samples without the leading filter bytes.
    fn unfilter(&mut self, deflate_data: &[u8]) -> Result<Vec<u8>, DecodeErrors> {
        let info = &self.info;

        let width_stride = info.row_stride();
        // one filter byte leads every scanline
        let chunk_size = width_stride + 1;
        let image_len = chunk_size * info.height;

        if deflate_data.len() < image_len {
            return Err(DecodeErrors::Format(format!(
                "Not enough bytes for image, expected {} but found {}",
                image_len,
                deflate_data.len()
            )));
        }
        if deflate_data.len() > image_len {
            if self.options.strict_mode() {
                return Err(DecodeErrors::Format(format!(
                    "Inflated stream is {} bytes, expected {}",
                    deflate_data.len(),
                    image_len
                )));
            }
            warn!(
                "Inflated stream is {} bytes, expected {}, ignoring the trailing bytes",
                deflate_data.len(),
                image_len
            );
        }

        let mut out = vec![0_u8; width_stride * info.height];

        let components = info.bytes_per_pixel();

        let mut prev_row_start = 0;
        let mut out_position = 0;
        let mut first_row = true;

        for in_stride in deflate_data.chunks_exact(chunk_size).take(info.height) {
            // everything before out_position is reconstructed, the
            // current row is written right at the split
            let (prev, current) = out.split_at_mut(out_position);

            // dummy for the first row, later rows take the real
            // slice one stride back
            let mut prev_row: &[u8] = &[0_u8];

            if !first_row {
                prev_row = &prev[prev_row_start..prev_row_start + width_stride];
                prev_row_start += width_stride;
            }

            out_position += width_stride;

            let filter_byte = in_stride[0];
            let raw = &in_stride[1..];

            let mut filter = FilterType::from_int(filter_byte)
                .ok_or_else(|| DecodeErrors::Format(format!("Unknown filter {filter_byte}")))?;

            if first_row {
                // the row above the first row is defined to be zero,
                // swap in the variants that hardcode that
                if filter == FilterType::Paeth {
                    filter = FilterType::PaethFirst;
                }
                if filter == FilterType::Up {
                    filter = FilterType::None;
                }
                if filter == FilterType::Average {
                    filter = FilterType::AvgFirst;
                }

                first_row = false;
            }

            match filter {
                FilterType::None => current[0..width_stride].copy_from_slice(raw),
                FilterType::Sub => recon_sub(raw, current, components),
                FilterType::Up => recon_up(prev_row, raw, current),
                FilterType::Average => recon_average(prev_row, raw, current, components),
                FilterType::Paeth => recon_paeth(prev_row, raw, current, components),
                // paeth with a zero row above degenerates to sub
                FilterType::PaethFirst => recon_sub(raw, current, components),
                FilterType::AvgFirst => recon_average_first(raw, current, components)
            }
        }

        Ok(out)
    }
}
