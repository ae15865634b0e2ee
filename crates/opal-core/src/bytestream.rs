/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A bytestream reader with endian aware reads
//!
//! [`ByteReader`] wraps a borrowed byte slice and tracks a cursor into it.
//! Integer accessors come in two flavours, one returning a default value on
//! end of stream (`get_u32_be`) and one reporting the shortfall
//! (`get_u32_be_err`). Slice accessors keep the lifetime of the underlying
//! buffer so callers can hold on to views of the input without copying.

use core::fmt::{Debug, Display, Formatter};

/// Errors produced when reading from a [`ByteReader`].
pub enum ByteIoError {
    /// The stream ended before the requested number of bytes
    /// could be read. Arguments are `(expected, found)`.
    NotEnoughBytes(usize, usize),
    /// Any other I/O violation.
    Generic(&'static str)
}

impl Debug for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            ByteIoError::Generic(err) => {
                writeln!(f, "Generic I/O error: {err}")
            }
        }
    }
}

impl Display for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for ByteIoError {}

impl From<&'static str> for ByteIoError {
    fn from(value: &'static str) -> Self {
        ByteIoError::Generic(value)
    }
}

enum Mode {
    // Big endian
    BE,
    // Little endian
    LE
}

/// An encapsulation of a borrowed byte stream.
///
/// The lifetime parameter is that of the wrapped slice, and slice
/// reads hand out sub-slices with that same lifetime.
pub struct ByteReader<'a> {
    /// Data stream
    stream:   &'a [u8],
    position: usize
}

impl<'a> ByteReader<'a> {
    /// Create a new reader positioned at the start of `buf`.
    pub const fn new(buf: &'a [u8]) -> ByteReader<'a> {
        ByteReader { stream: buf, position: 0 }
    }

    /// Skip `num` bytes ahead of the stream, stopping at the end
    /// of the buffer on overrun.
    pub fn skip(&mut self, num: usize) {
        self.position = self.position.saturating_add(num).min(self.stream.len());
    }

    /// Return the number of bytes left unread.
    pub const fn remaining(&self) -> usize {
        // saturating prevents underflow
        self.stream.len().saturating_sub(self.position)
    }

    /// Return true if at least `num` more bytes can be read.
    pub const fn has(&self, num: usize) -> bool {
        self.position.saturating_add(num) <= self.stream.len()
    }

    /// Total length of the wrapped buffer.
    pub const fn len(&self) -> usize {
        self.stream.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.stream.is_empty()
    }

    /// Current cursor position, in bytes from the start of the buffer.
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Read a single byte, returning 0 on end of stream.
    pub fn get_u8(&mut self) -> u8 {
        match self.stream.get(self.position) {
            Some(byte) => {
                self.position += 1;
                *byte
            }
            None => 0
        }
    }

    /// Read a single byte, erroring on end of stream.
    pub fn get_u8_err(&mut self) -> Result<u8, ByteIoError> {
        match self.stream.get(self.position) {
            Some(byte) => {
                self.position += 1;
                Ok(*byte)
            }
            None => Err(ByteIoError::NotEnoughBytes(1, 0))
        }
    }

    /// Read `N` bytes into a fixed size array.
    pub fn get_fixed_bytes_or_err<const N: usize>(&mut self) -> Result<[u8; N], ByteIoError> {
        let mut bytes = [0; N];
        bytes.copy_from_slice(self.get_bytes(N)?);
        Ok(bytes)
    }

    /// Read `num` bytes as a slice of the underlying buffer.
    ///
    /// The returned slice borrows the wrapped buffer, not the reader,
    /// so it stays valid after further reads.
    pub fn get_bytes(&mut self, num: usize) -> Result<&'a [u8], ByteIoError> {
        // copy the reference out so the sub-slice keeps the buffer lifetime
        let stream: &'a [u8] = self.stream;

        match stream.get(self.position..self.position.saturating_add(num)) {
            Some(bytes) => {
                self.position += num;
                Ok(bytes)
            }
            None => Err(ByteIoError::NotEnoughBytes(num, self.remaining()))
        }
    }
}

macro_rules! get_single_type {
    ($name:tt,$name2:tt,$name3:tt,$name4:tt,$name5:tt,$name6:tt,$int_type:tt) => {
        impl<'a> ByteReader<'a> {
            #[inline(always)]
            fn $name(&mut self, mode: Mode) -> $int_type {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let mut space = [0; SIZE_OF_VAL];

                match self.stream.get(self.position..self.position + SIZE_OF_VAL) {
                    Some(position) => {
                        space.copy_from_slice(position);
                        self.position += SIZE_OF_VAL;

                        match mode {
                            Mode::LE => $int_type::from_le_bytes(space),
                            Mode::BE => $int_type::from_be_bytes(space)
                        }
                    }
                    None => 0
                }
            }

            #[inline(always)]
            fn $name2(&mut self, mode: Mode) -> Result<$int_type, ByteIoError> {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let mut space = [0; SIZE_OF_VAL];

                match self.stream.get(self.position..self.position + SIZE_OF_VAL) {
                    Some(position) => {
                        space.copy_from_slice(position);
                        self.position += SIZE_OF_VAL;

                        match mode {
                            Mode::LE => Ok($int_type::from_le_bytes(space)),
                            Mode::BE => Ok($int_type::from_be_bytes(space))
                        }
                    }
                    None => Err(ByteIoError::NotEnoughBytes(SIZE_OF_VAL, self.remaining()))
                }
            }

            pub fn $name3(&mut self) -> Result<$int_type, ByteIoError> {
                self.$name2(Mode::BE)
            }

            pub fn $name4(&mut self) -> Result<$int_type, ByteIoError> {
                self.$name2(Mode::LE)
            }

            pub fn $name5(&mut self) -> $int_type {
                self.$name(Mode::BE)
            }

            pub fn $name6(&mut self) -> $int_type {
                self.$name(Mode::LE)
            }
        }
    };
}

get_single_type!(
    get_u16_inner_or_default,
    get_u16_inner_or_die,
    get_u16_be_err,
    get_u16_le_err,
    get_u16_be,
    get_u16_le,
    u16
);
get_single_type!(
    get_u32_inner_or_default,
    get_u32_inner_or_die,
    get_u32_be_err,
    get_u32_le_err,
    get_u32_be,
    get_u32_le,
    u32
);
get_single_type!(
    get_u64_inner_or_default,
    get_u64_inner_or_die,
    get_u64_be_err,
    get_u64_le_err,
    get_u64_be,
    get_u64_le,
    u64
);
