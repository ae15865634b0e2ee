/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Global decoder options.

use bitflags::bitflags;

fn decoder_strict_mode() -> DecoderFlags {
    let mut flags = DecoderFlags::empty();

    flags.set(DecoderFlags::INFLATE_CONFIRM_ADLER, true);
    flags.set(DecoderFlags::PNG_CONFIRM_CRC, true);
    flags.set(DecoderFlags::ERROR_ON_NON_CONFORMANCE, true);

    flags
}

/// Fast decoder options
///
/// Skips checksum confirmation and tolerates recoverable
/// irregularities in the stream.
fn fast_options() -> DecoderFlags {
    let mut flags = DecoderFlags::empty();

    flags.set(DecoderFlags::INFLATE_CONFIRM_ADLER, false);
    flags.set(DecoderFlags::PNG_CONFIRM_CRC, false);
    flags.set(DecoderFlags::ERROR_ON_NON_CONFORMANCE, false);

    flags
}

bitflags! {
    /// Decoder options that are flags
    ///
    /// NOTE: When you extend this, add true or false to
    /// all options above that return a `DecoderFlags`
    #[derive(Copy, Debug, Clone, Eq, PartialEq)]
    pub struct DecoderFlags: u64 {
        /// Whether the decoder should confirm and report adler mismatch
        const INFLATE_CONFIRM_ADLER    = 1 << 0;
        /// Whether the PNG decoder should confirm crc
        const PNG_CONFIRM_CRC          = 1 << 1;
        /// Whether decoders should error out on recoverable
        /// non-conformance in the stream instead of warning
        const ERROR_ON_NON_CONFORMANCE = 1 << 2;
    }
}

/// Decoder options
///
/// Options are consumed by value and returned, so configuration
/// chains builder style:
///
/// ```
/// use opal_core::options::DecoderOptions;
///
/// let options = DecoderOptions::default()
///     .set_max_width(1 << 16)
///     .png_set_confirm_crc(false);
///
/// assert!(!options.png_confirm_crc());
/// ```
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will
    /// not try to decode images larger than
    /// the specified width.
    ///
    /// - Default value: 16384
    max_width:  usize,
    /// Maximum height for which decoders will not
    /// try to decode images larger than the
    /// specified height
    ///
    /// - Default value: 16384
    max_height: usize,
    /// Boolean flags that influence decoding
    flags:      DecoderFlags
}

impl Default for DecoderOptions {
    fn default() -> Self {
        DecoderOptions {
            max_width:  1 << 14,
            max_height: 1 << 14,
            flags:      decoder_strict_mode()
        }
    }
}

/// Initializers
impl DecoderOptions {
    /// Create decoder options with the configurable options
    /// set to their safe counterparts.
    ///
    /// This is the same as the `default` constructor.
    pub fn new_safe() -> DecoderOptions {
        DecoderOptions::default()
    }

    /// Create decoder options with the configurable options
    /// set to their fast counterparts.
    ///
    /// Checksums in the stream are not confirmed in this mode.
    pub fn new_fast() -> DecoderOptions {
        let flags = fast_options();
        DecoderOptions::default().set_decoder_flags(flags)
    }
}

/// Global options respected by all decoders
impl DecoderOptions {
    /// Get maximum width configured for which the decoder
    /// should not try to decode images greater than this width
    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height configured for which the decoder should
    /// not try to decode images greater than this height
    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    /// Return true whether the decoder should be in strict mode
    /// and reject most errors
    pub fn strict_mode(&self) -> bool {
        let flags = DecoderFlags::ERROR_ON_NON_CONFORMANCE
            | DecoderFlags::PNG_CONFIRM_CRC
            | DecoderFlags::INFLATE_CONFIRM_ADLER;

        self.flags.contains(flags)
    }

    /// Set maximum width for which the decoder should not try
    /// decoding images greater than that width
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding images greater than that height
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set whether the decoder should be in standards conforming/
    /// strict mode
    ///
    /// This reduces the error tolerance level for the decoders; invalid
    /// samples are rejected instead of warned about.
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        let flags = DecoderFlags::ERROR_ON_NON_CONFORMANCE
            | DecoderFlags::PNG_CONFIRM_CRC
            | DecoderFlags::INFLATE_CONFIRM_ADLER;

        self.flags.set(flags, yes);
        self
    }

    fn set_decoder_flags(mut self, flags: DecoderFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Options respected by the zlib inflate routines
impl DecoderOptions {
    /// Whether the inflate decoder should confirm
    /// adler checksums
    pub const fn inflate_confirm_adler(&self) -> bool {
        self.flags.contains(DecoderFlags::INFLATE_CONFIRM_ADLER)
    }

    /// Set whether the inflate decoder should confirm
    /// adler checksums
    pub fn inflate_set_confirm_adler(mut self, yes: bool) -> Self {
        self.flags.set(DecoderFlags::INFLATE_CONFIRM_ADLER, yes);
        self
    }
}

/// Options respected by the PNG decoder
impl DecoderOptions {
    /// Whether the PNG decoder should confirm each chunk's crc
    pub const fn png_confirm_crc(&self) -> bool {
        self.flags.contains(DecoderFlags::PNG_CONFIRM_CRC)
    }

    /// Set whether the PNG decoder should confirm each chunk's crc
    pub fn png_set_confirm_crc(mut self, yes: bool) -> Self {
        self.flags.set(DecoderFlags::PNG_CONFIRM_CRC, yes);
        self
    }

    /// Whether decoders should error out on recoverable
    /// irregularities instead of warning
    pub const fn error_on_non_conformance(&self) -> bool {
        self.flags.contains(DecoderFlags::ERROR_ON_NON_CONFORMANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_strict() {
        let options = DecoderOptions::default();
        assert!(options.strict_mode());
        assert!(options.png_confirm_crc());
        assert!(options.inflate_confirm_adler());
        assert_eq!(options.max_width(), 1 << 14);
    }

    #[test]
    fn fast_options_skip_checksums() {
        let options = DecoderOptions::new_fast();
        assert!(!options.strict_mode());
        assert!(!options.png_confirm_crc());
        assert!(!options.inflate_confirm_adler());
    }

    #[test]
    fn single_flag_clears_strict_mode() {
        let options = DecoderOptions::default().png_set_confirm_crc(false);
        assert!(!options.strict_mode());
        assert!(options.inflate_confirm_adler());
    }
}
