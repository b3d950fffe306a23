// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pixel buffer a render writes into, and the row bands that let
//! several workers write into it at once.
//!
//! A buffer hands out its bands by splitting its storage with
//! `split_at_mut`, so each `RowBand` is an exclusive borrow of its own
//! rows.  Two workers cannot alias a pixel; there is nothing to lock.

use partition::{partition, RowRange};

/// A `width` by `height` grid of packed `0xRRGGBB` colors, stored row
/// by row.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// A black buffer of the given size.
    pub fn new(width: usize, height: usize) -> PixelBuffer {
        PixelBuffer {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Paint every pixel the same color.
    pub fn fill(&mut self, color: u32) {
        for pixel in self.pixels.iter_mut() {
            *pixel = color;
        }
    }

    /// The color at column `x`, row `y`.  Panics when out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        assert!(x < self.width && y < self.height);
        self.pixels[y * self.width + x]
    }

    /// Set the color at column `x`, row `y`.  Panics when out of bounds.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        assert!(x < self.width && y < self.height);
        self.pixels[y * self.width + x] = color;
    }

    /// Every pixel, row by row.
    pub fn as_slice(&self) -> &[u32] {
        &self.pixels
    }

    /// Carve the buffer into one band per worker, following
    /// `partition(height, threads)`.  The bands borrow the buffer
    /// mutably, so nothing else can see it until all of them are gone.
    pub fn bands_mut(&mut self, threads: usize) -> Vec<RowBand> {
        let width = self.width;
        let ranges = partition(self.height, threads);
        let mut bands = Vec::with_capacity(ranges.len());
        let mut rest: &mut [u32] = &mut self.pixels;
        for range in ranges {
            let (head, tail) = { rest }.split_at_mut(range.len() * width);
            bands.push(RowBand {
                range,
                width,
                pixels: head,
            });
            rest = tail;
        }
        bands
    }
}

/// Exclusive access to a run of rows inside a `PixelBuffer`.
/// Coordinates are absolute: row `range.start` is the band's first row.
#[derive(Debug)]
pub struct RowBand<'a> {
    range: RowRange,
    width: usize,
    pixels: &'a mut [u32],
}

impl<'a> RowBand<'a> {
    /// The rows this band owns.
    pub fn range(&self) -> RowRange {
        self.range
    }

    /// Width of every row in the band.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Set the color at column `x` of absolute row `y`.  Panics when
    /// `y` belongs to some other band.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        assert!(x < self.width && y >= self.range.start && y < self.range.end);
        self.pixels[(y - self.range.start) * self.width + x] = color;
    }
}
