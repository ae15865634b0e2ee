/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Scanline reconstruction functions undoing png filters.
//!
//! Functions with a `_first` suffix are variants for the first
//! scanline, where the row above is defined to be all zeroes and
//! the predictors collapse into simpler forms.
//!
//! All of them take `raw`, the filtered bytes of one scanline, and
//! write reconstructed bytes into `current`. `components` is the
//! pixel stride in bytes, the distance to the neighbour on the left.

/// Undo the sub filter, each byte is predicted by its left neighbour.
pub(crate) fn recon_sub(raw: &[u8], current: &mut [u8], components: usize) {
    if raw.len() < components || current.len() < components {
        return;
    }
    // leftmost pixel has no left neighbour
    current[..components].copy_from_slice(&raw[..components]);

    let end = current.len().min(raw.len());

    for i in components..end {
        current[i] = raw[i].wrapping_add(current[i - components]);
    }
}

/// Undo the up filter, each byte is predicted by the byte above it.
pub(crate) fn recon_up(prev_row: &[u8], raw: &[u8], current: &mut [u8]) {
    for ((filt, recon), above) in raw.iter().zip(current).zip(prev_row) {
        *recon = (*filt).wrapping_add(*above);
    }
}

/// Undo the average filter, the predictor is the mean of the left
/// and above neighbours.
pub(crate) fn recon_average(prev_row: &[u8], raw: &[u8], current: &mut [u8], components: usize) {
    if raw.len() < components || current.len() < components || prev_row.len() < components {
        return;
    }
    // leftmost pixel only averages the byte above it
    for i in 0..components {
        current[i] = raw[i].wrapping_add(prev_row[i] >> 1);
    }

    let end = current.len().min(raw.len()).min(prev_row.len());

    for i in components..end {
        // the sum needs 9 bits of precision, so widen to 16
        let left = u16::from(current[i - components]);
        let above = u16::from(prev_row[i]);

        let predicted = (((left + above) >> 1) & 0xFF) as u8;

        current[i] = raw[i].wrapping_add(predicted);
    }
}

/// Undo the average filter on the first scanline, where the row
/// above is all zeroes and the mean degenerates to `left >> 1`.
pub(crate) fn recon_average_first(raw: &[u8], current: &mut [u8], components: usize) {
    if raw.len() < components || current.len() < components {
        return;
    }
    current[..components].copy_from_slice(&raw[..components]);

    let end = current.len().min(raw.len());

    for i in components..end {
        current[i] = raw[i].wrapping_add(current[i - components] >> 1);
    }
}

/// Undo the paeth filter using the left, above and upper left
/// neighbours.
pub(crate) fn recon_paeth(prev_row: &[u8], raw: &[u8], current: &mut [u8], components: usize) {
    if raw.len() < components || current.len() < components || prev_row.len() < components {
        return;
    }
    // paeth(0, above, 0) always resolves to above
    for i in 0..components {
        current[i] = raw[i].wrapping_add(prev_row[i]);
    }

    let end = current.len().min(raw.len()).min(prev_row.len());

    for i in components..end {
        let predicted = paeth(current[i - components], prev_row[i], prev_row[i - components]);

        current[i] = raw[i].wrapping_add(predicted);
    }
}

/// The paeth predictor, choosing whichever neighbour is closest to
/// the initial estimate `left + above - upper_left`.
///
/// Ties resolve in the order left, above, upper left.
#[inline(always)]
pub(crate) fn paeth(left: u8, above: u8, upper_left: u8) -> u8 {
    let a = i16::from(left);
    let b = i16::from(above);
    let c = i16::from(upper_left);

    let p = a + b - c;
    let pa = (p - a).abs();
    let pb = (p - b).abs();
    let pc = (p - c).abs();

    if pa <= pb && pa <= pc {
        return a as u8;
    }
    if pb <= pc {
        return b as u8;
    }
    c as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paeth_zero_neighbours_are_identities() {
        for value in 0..=255 {
            assert_eq!(paeth(value, 0, 0), value);
            assert_eq!(paeth(0, value, 0), value);
        }
    }

    #[test]
    fn paeth_tie_order() {
        // all distances zero, left wins
        assert_eq!(paeth(7, 7, 7), 7);
        // left and upper left tie, left wins
        assert_eq!(paeth(90, 105, 100), 90);
        // above and upper left tie, above wins
        assert_eq!(paeth(105, 90, 100), 90);
    }

    #[test]
    fn paeth_picks_nearest_neighbour() {
        // estimate is 100, above matches it exactly
        assert_eq!(paeth(50, 100, 50), 100);
        // estimate is 70, upper left is closest
        assert_eq!(paeth(100, 20, 50), 50);
    }

    #[test]
    fn sub_accumulates_left_neighbour() {
        let raw = [10, 20, 30, 40];
        let mut current = [0; 4];

        recon_sub(&raw, &mut current, 1);
        assert_eq!(current, [10, 30, 60, 100]);

        recon_sub(&raw, &mut current, 2);
        assert_eq!(current, [10, 20, 40, 60]);
    }

    #[test]
    fn up_adds_previous_row() {
        let prev = [1, 2, 3];
        let raw = [10, 20, 30];
        let mut current = [0; 3];

        recon_up(&prev, &raw, &mut current);
        assert_eq!(current, [11, 22, 33]);

        // additions wrap
        recon_up(&[200], &[100], &mut current[..1]);
        assert_eq!(current[0], 44);
    }

    #[test]
    fn average_widens_the_sum() {
        let prev = [10, 20, 30, 40];
        let raw = [1, 2, 3, 4];
        let mut current = [0; 4];

        recon_average(&prev, &raw, &mut current, 2);
        assert_eq!(current, [6, 12, 21, 30]);
    }

    #[test]
    fn average_first_halves_left_neighbour() {
        let raw = [2, 4, 6, 8];
        let mut current = [0; 4];

        recon_average_first(&raw, &mut current, 1);
        assert_eq!(current, [2, 5, 8, 12]);
    }

    #[test]
    fn paeth_row_with_neighbours_above() {
        let prev = [5, 10];
        let raw = [1, 2];
        let mut current = [0; 2];

        recon_paeth(&prev, &raw, &mut current, 1);
        assert_eq!(current, [6, 12]);
    }

    #[test]
    fn paeth_with_zero_row_above_matches_sub() {
        let raw = [13, 240, 7, 99, 61, 18];
        let prev = [0; 6];

        let mut via_paeth = [0; 6];
        let mut via_sub = [0; 6];

        recon_paeth(&prev, &raw, &mut via_paeth, 3);
        recon_sub(&raw, &mut via_sub, 3);

        assert_eq!(via_paeth, via_sub);
    }
}
