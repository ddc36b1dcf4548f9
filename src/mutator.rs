// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam removal and duplication
//!
//! Both operations work on the raw row-major samples, row by row, so
//! the same code carves a three-channel image, a one-channel mask, an
//! index map or a label grid: a map is just a grid with a single
//! channel.  Samples are copied, never converted, so the element type
//! comes out exactly as it went in.

use crate::error::{Result, SeamError};
use crate::twodmap::TwoDimensionalMap;
use crate::Image;
use image::{ImageBuffer, Pixel};

/// A row-major grid with a fixed number of samples per cell.
pub trait SeamGrid: Sized {
    type Sample: Copy;

    /// `(width, height)` in cells.
    fn grid_dimensions(&self) -> (u32, u32);

    /// Samples per cell.
    fn channels(&self) -> usize;

    fn samples(&self) -> &[Self::Sample];

    /// Rebuild a grid of the same kind from row-major samples.
    fn from_samples(width: u32, height: u32, samples: Vec<Self::Sample>) -> Option<Self>;
}

impl<P: Pixel> SeamGrid for Image<P> {
    type Sample = P::Subpixel;

    fn grid_dimensions(&self) -> (u32, u32) {
        self.dimensions()
    }

    fn channels(&self) -> usize {
        usize::from(P::CHANNEL_COUNT)
    }

    fn samples(&self) -> &[P::Subpixel] {
        self.as_raw()
    }

    fn from_samples(width: u32, height: u32, samples: Vec<P::Subpixel>) -> Option<Self> {
        ImageBuffer::from_raw(width, height, samples)
    }
}

impl<T: Default + Copy> SeamGrid for TwoDimensionalMap<T> {
    type Sample = T;

    fn grid_dimensions(&self) -> (u32, u32) {
        self.dimensions()
    }

    fn channels(&self) -> usize {
        1
    }

    fn samples(&self) -> &[T] {
        self.as_slice()
    }

    fn from_samples(width: u32, height: u32, samples: Vec<T>) -> Option<Self> {
        TwoDimensionalMap::from_vec(width, height, samples)
    }
}

/// Anything that can take a seam out of a grid or put one back.
pub trait SeamMutator {
    /// Drop the cell at `columns[y]` from every row `y`.
    fn remove<G: SeamGrid>(&self, grid: &G, columns: &[u32]) -> Result<G>;

    /// Repeat the cell at `columns[y]` in every row `y`, so it appears
    /// twice side by side.  The columns need not form a connected
    /// seam; enlargement feeds it seams mapped back into original
    /// coordinates.
    fn duplicate<G: SeamGrid>(&self, grid: &G, columns: &[u32]) -> Result<G>;
}

/// Shift every row around its seam column.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShiftMutator;

impl SeamMutator for ShiftMutator {
    fn remove<G: SeamGrid>(&self, grid: &G, columns: &[u32]) -> Result<G> {
        let (width, height) = check_columns(grid, columns)?;
        let channels = grid.channels();
        let stride = width as usize * channels;
        let mut out = Vec::with_capacity(grid.samples().len() - height as usize * channels);

        for (row, &x) in grid.samples().chunks_exact(stride).zip(columns) {
            let cut = x as usize * channels;
            out.extend_from_slice(&row[..cut]);
            out.extend_from_slice(&row[cut + channels..]);
        }

        G::from_samples(width - 1, height, out).ok_or(SeamError::BufferCreationFailed {
            width: width - 1,
            height,
        })
    }

    fn duplicate<G: SeamGrid>(&self, grid: &G, columns: &[u32]) -> Result<G> {
        let (width, height) = check_columns(grid, columns)?;
        let channels = grid.channels();
        let stride = width as usize * channels;
        let mut out = Vec::with_capacity(grid.samples().len() + height as usize * channels);

        for (row, &x) in grid.samples().chunks_exact(stride).zip(columns) {
            let end = (x as usize + 1) * channels;
            out.extend_from_slice(&row[..end]);
            out.extend_from_slice(&row[end - channels..]);
        }

        G::from_samples(width + 1, height, out).ok_or(SeamError::BufferCreationFailed {
            width: width + 1,
            height,
        })
    }
}

// One column per row, each inside the grid.
fn check_columns<G: SeamGrid>(grid: &G, columns: &[u32]) -> Result<(u32, u32)> {
    let (width, height) = grid.grid_dimensions();
    if width == 0 || height == 0 {
        return Err(SeamError::EmptyImage { width, height });
    }
    if columns.len() != height as usize {
        return Err(SeamError::SeamLength {
            expected: height,
            actual: columns.len() as u32,
        });
    }
    match columns.iter().position(|&x| x >= width) {
        Some(row) => Err(SeamError::SeamOutOfBounds {
            row: row as u32,
            column: i64::from(columns[row]),
            width,
        }),
        None => Ok((width, height)),
    }
}
