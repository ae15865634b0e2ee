/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! IHDR interpretation, the invalid versus unsupported split and
//! the staged header decode.

use opal_core::bit_depth::BitDepth;
use opal_core::colorspace::ColorSpace;
use opal_core::options::DecoderOptions;
use opal_png::error::DecodeErrors;
use opal_png::PngDecoder;

mod support;

use support::{build_png, chunk, iend, ihdr, ihdr_full, png_from_chunks, zlib_store};

/// Wrap a header chunk with enough scaffolding to reach the header
/// parser. The pixel data is junk, every case here errors before
/// it matters.
fn png_with_header(header: Vec<u8>) -> Vec<u8> {
    png_from_chunks(&[header, chunk(b"IDAT", &[1, 2, 3]), iend()])
}

fn expect_header_failure(header: Vec<u8>) -> DecodeErrors {
    let data = png_with_header(header);

    PngDecoder::new(&data).decode_headers().unwrap_err()
}

#[test]
fn ihdr_payload_must_be_13_bytes() {
    let err = expect_header_failure(chunk(b"IHDR", &[0; 12]));

    assert!(format!("{err:?}").contains("Bad IHDR length"));
}

#[test]
fn zero_dimensions_are_rejected() {
    for header in [ihdr(0, 1, 8, 0), ihdr(1, 0, 8, 0), ihdr(0, 0, 8, 0)] {
        let err = expect_header_failure(header);

        assert!(format!("{err:?}").contains("cannot be zero"));
    }
}

#[test]
fn dimension_limits_are_enforced_and_adjustable() {
    // one past the default 16384 limit
    let err = expect_header_failure(ihdr(16385, 1, 8, 0));
    assert!(format!("{err:?}").contains("larger than maximum"));

    let err = expect_header_failure(ihdr(1, 16385, 8, 0));
    assert!(format!("{err:?}").contains("larger than maximum"));

    let options = DecoderOptions::default().set_max_width(20_000);
    let data = build_png(16385, 1, 0, &vec![3; 16385]);

    let mut decoder = PngDecoder::new_with_options(&data, options);
    decoder.decode_headers().unwrap();

    assert_eq!(decoder.dimensions(), Some((16385, 1)));
}

#[test]
fn sixteen_bit_images_are_unsupported_before_any_inflation() {
    let err = expect_header_failure(ihdr(2, 2, 16, 0));

    assert!(matches!(err, DecodeErrors::Unsupported(_)));
    assert!(format!("{err:?}").contains("Bit depth 16"));
}

#[test]
fn sub_byte_depths_are_unsupported() {
    for depth in [1, 2, 4] {
        let err = expect_header_failure(ihdr(4, 4, depth, 0));

        assert!(matches!(err, DecodeErrors::Unsupported(_)));
    }
}

#[test]
fn depths_the_format_never_defined_are_invalid() {
    let err = expect_header_failure(ihdr(4, 4, 3, 0));

    assert!(matches!(err, DecodeErrors::Format(_)));
    assert!(format!("{err:?}").contains("Unknown bit depth 3"));
}

#[test]
fn palette_images_are_unsupported() {
    let err = expect_header_failure(ihdr(4, 4, 8, 3));

    assert!(matches!(err, DecodeErrors::Unsupported(_)));
    assert!(format!("{err:?}").contains("Indexed colour"));
}

#[test]
fn unknown_colour_codes_are_invalid() {
    let err = expect_header_failure(ihdr(4, 4, 8, 5));

    assert!(matches!(err, DecodeErrors::Format(_)));
    assert!(format!("{err:?}").contains("Unknown color value 5"));
}

#[test]
fn nonzero_compression_method_is_unsupported() {
    let err = expect_header_failure(ihdr_full(4, 4, 8, 0, 1, 0, 0));

    assert!(matches!(err, DecodeErrors::Unsupported(_)));
    assert!(format!("{err:?}").contains("compression method 1"));
}

#[test]
fn nonzero_filter_method_is_unsupported() {
    let err = expect_header_failure(ihdr_full(4, 4, 8, 0, 0, 1, 0));

    assert!(matches!(err, DecodeErrors::Unsupported(_)));
    assert!(format!("{err:?}").contains("filter method 1"));
}

#[test]
fn adam7_is_unsupported_and_other_interlacing_invalid() {
    let err = expect_header_failure(ihdr_full(4, 4, 8, 0, 0, 0, 1));

    assert!(matches!(err, DecodeErrors::Unsupported(_)));
    assert!(format!("{err:?}").contains("Adam7"));

    let err = expect_header_failure(ihdr_full(4, 4, 8, 0, 0, 0, 2));

    assert!(matches!(err, DecodeErrors::Format(_)));
    assert!(format!("{err:?}").contains("Unknown interlace method 2"));
}

#[test]
fn accessors_only_fill_after_header_decode() {
    let data = build_png(5, 3, 6, &[7; 5 * 3 * 4]);
    let mut decoder = PngDecoder::new(&data);

    assert!(decoder.dimensions().is_none());
    assert!(decoder.depth().is_none());
    assert!(decoder.colorspace().is_none());
    assert!(decoder.header().is_none());

    decoder.decode_headers().unwrap();

    assert_eq!(decoder.dimensions(), Some((5, 3)));
    assert_eq!(decoder.depth(), Some(BitDepth::Eight));
    assert_eq!(decoder.colorspace(), Some(ColorSpace::RGBA));

    let header = decoder.header().unwrap();

    assert_eq!(header.components, 4);
    assert_eq!(header.row_stride(), 20);
}

#[test]
fn each_colour_type_reports_its_colorspace() {
    for (color, samples_per_px, colorspace) in [
        (0, 1, ColorSpace::Luma),
        (2, 3, ColorSpace::RGB),
        (4, 2, ColorSpace::LumaA),
        (6, 4, ColorSpace::RGBA)
    ] {
        let data = build_png(2, 2, color, &vec![128; 4 * samples_per_px]);

        let mut decoder = PngDecoder::new(&data);
        decoder.decode_headers().unwrap();

        assert_eq!(decoder.colorspace(), Some(colorspace));
        assert_eq!(decoder.header().unwrap().components, samples_per_px as u8);
    }
}
