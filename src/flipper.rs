// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Image dimensional flipper
//!
//! Every algorithm in this crate is written once, for vertical seams
//! running top to bottom through rows.  Horizontal seams are found by
//! flipping the grid across its diagonal, so that each column becomes
//! a contiguous row, running the same code, and flipping the result
//! back.  The flip is its own inverse.

use crate::twodmap::TwoDimensionalMap;
use crate::Image;
use image::{ImageBuffer, Pixel};

/// Which dimension a carve shrinks or grows.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Carve {
    /// Change the width by removing or adding vertical seams.
    Width,
    /// Change the height by removing or adding horizontal seams.
    Height,
}

impl Carve {
    /// The size of `(width, height)` along this axis.
    pub fn extent(self, (width, height): (u32, u32)) -> u32 {
        match self {
            Carve::Width => width,
            Carve::Height => height,
        }
    }

    /// Put a grid into (or back out of) row-major order for this axis:
    /// untouched for `Width`, flipped for `Height`.
    pub fn orient<G: Flipper + Clone>(self, grid: &G) -> G {
        match self {
            Carve::Width => grid.clone(),
            Carve::Height => grid.flip(),
        }
    }
}

/// Transposition: width becomes height, `(x, y)` becomes `(y, x)`.
pub trait Flipper {
    fn flip(&self) -> Self;
}

impl<P: Pixel> Flipper for Image<P> {
    fn flip(&self) -> Self {
        let (width, height) = self.dimensions();
        ImageBuffer::from_fn(height, width, |x, y| *self.get_pixel(y, x))
    }
}

impl<P: Default + Copy> Flipper for TwoDimensionalMap<P> {
    fn flip(&self) -> Self {
        let (width, height) = self.dimensions();
        TwoDimensionalMap::from_fn(height, width, |x, y| self[(y, x)])
    }
}
