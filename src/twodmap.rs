// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Row-major two-dimensional maps
//!
//! Every scalar field the carver works with lives in one of these:
//! the energy map, the cost and direction map, the index map that
//! remembers original columns, the seam label grid, and the object
//! mask.

use std::ops::{Index, IndexMut};

/// An addressable two-dimensional field of `P`, stored row by row.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    width: u32,
    height: u32,
    data: Vec<P>,
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// Define a new map with every cell at `P::default()`.
    pub fn new(width: u32, height: u32) -> Self {
        TwoDimensionalMap {
            width,
            height,
            data: vec![P::default(); width as usize * height as usize],
        }
    }

    /// Build a map by asking `f` for the value at every `(x, y)`.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> P,
    {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        TwoDimensionalMap {
            width,
            height,
            data,
        }
    }

    /// Wrap an existing row-major buffer.  Returns `None` when the
    /// buffer length disagrees with the dimensions.
    pub fn from_vec(width: u32, height: u32, data: Vec<P>) -> Option<Self> {
        if data.len() == width as usize * height as usize {
            Some(TwoDimensionalMap {
                width,
                height,
                data,
            })
        } else {
            None
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The raw row-major cells.
    pub fn as_slice(&self) -> &[P] {
        &self.data
    }

    /// One row of the map.
    pub fn row(&self, y: u32) -> &[P] {
        let start = self.get_index(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// Walk every cell along with its address.
    pub fn enumerate(&self) -> impl Iterator<Item = (u32, u32, P)> + '_ {
        let width = self.width.max(1) as usize;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, p)| ((i % width) as u32, (i / width) as u32, *p))
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

impl<P: Default + Copy + Send + Sync> TwoDimensionalMap<P> {
    /// Fill row `y` (which must not be the first row) cell by cell.
    /// `cell` receives the finished row above and the column to
    /// compute.  Columns of one row never depend on each other, so with
    /// the `threaded` feature the row is split into chunks and filled
    /// on scoped threads; rows themselves are always done in order.
    pub fn fill_row<F>(&mut self, y: u32, cell: F)
    where
        F: Fn(&[P], u32) -> P + Sync,
    {
        let width = self.width as usize;
        if width == 0 || y == 0 {
            return;
        }
        let start = self.get_index(0, y);
        let (above, rest) = self.data.split_at_mut(start);
        let previous = &above[start - width..];
        let row = &mut rest[..width];

        #[cfg(feature = "threaded")]
        {
            let chunk = (width + num_cpus::get() - 1) / num_cpus::get();
            let cell = &cell;
            let filled = crossbeam::scope(|scope| {
                for (n, part) in row.chunks_mut(chunk.max(1)).enumerate() {
                    scope.spawn(move |_| {
                        let first = n * chunk.max(1);
                        for (offset, slot) in part.iter_mut().enumerate() {
                            *slot = cell(previous, (first + offset) as u32);
                        }
                    });
                }
            });
            if let Err(panic) = filled {
                std::panic::resume_unwind(panic);
            }
        }

        #[cfg(not(feature = "threaded"))]
        for (x, slot) in row.iter_mut().enumerate() {
            *slot = cell(previous, x as u32);
        }
    }
}

impl<P: Default + Copy + PartialEq> TwoDimensionalMap<P> {
    /// How many cells in row `y` hold `value`.
    pub fn count_in_row(&self, y: u32, value: P) -> u32 {
        self.row(y).iter().filter(|p| **p == value).count() as u32
    }

    /// How many cells anywhere hold `value`.
    pub fn count(&self, value: P) -> usize {
        self.data.iter().filter(|p| **p == value).count()
    }
}

impl<P: Default + Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    fn index(&self, (x, y): (u32, u32)) -> &P {
        let index = self.get_index(x, y);
        &self.data[index]
    }
}

impl<P: Default + Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.data[index]
    }
}
