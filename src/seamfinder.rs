// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam tracing
//!
//! A seam is a list of x-coordinates, one per row, which when paired
//! with the range `0..height` gives the pixels to remove.  Tracing walks
//! the direction map from the bottom row back up to the top.

use crate::accumulator::{lowest_end, CostAccumulator, CostMap};
use crate::energy::EnergyEstimator;
use crate::error::{Result, SeamError};
use crate::twodmap::TwoDimensionalMap;
use crate::Image;
use image::Pixel;
use tracing::trace;

/// Energy forced onto masked pixels so that seams are drawn through
/// them.
pub const MASKED_ENERGY: f64 = -100_000.0;

/// Anything that can turn a direction map and an end column into a
/// seam.
pub trait SeamTracer {
    /// Trace the seam that ends at `(end, height - 1)`.
    fn trace(&self, costs: &CostMap, end: u32) -> Result<Vec<u32>>;
}

/// Follow the back-pointers, bottom to top.
#[derive(Debug, Default, Clone, Copy)]
pub struct Backtrack;

impl SeamTracer for Backtrack {
    fn trace(&self, costs: &CostMap, end: u32) -> Result<Vec<u32>> {
        let (width, height) = costs.dimensions();
        if height == 0 {
            return Ok(Vec::new());
        }
        if end >= width {
            return Err(SeamError::SeamOutOfBounds {
                row: height - 1,
                column: i64::from(end),
                width,
            });
        }

        let mut seam = vec![0u32; height as usize];
        seam[height as usize - 1] = end;
        for y in (0..height - 1).rev() {
            let below = seam[y as usize + 1];
            let direction = costs[(below, y + 1)].direction;
            if !(-1..=1).contains(&direction) {
                return Err(SeamError::DirectionOutOfRange {
                    column: below,
                    row: y + 1,
                    value: direction,
                });
            }
            let column = i64::from(below) + i64::from(direction);
            if column < 0 || column >= i64::from(width) {
                return Err(SeamError::SeamOutOfBounds {
                    row: y,
                    column,
                    width,
                });
            }
            seam[y as usize] = column as u32;
        }

        check_seam(&seam, width, height)?;
        Ok(seam)
    }
}

/// Verify that a seam has one entry per row, stays inside the grid,
/// and never moves more than one column between rows.
pub fn check_seam(seam: &[u32], width: u32, height: u32) -> Result<()> {
    if seam.len() != height as usize {
        return Err(SeamError::SeamLength {
            expected: height,
            actual: seam.len() as u32,
        });
    }
    if let Some((row, &column)) = seam.iter().enumerate().find(|(_, &x)| x >= width) {
        return Err(SeamError::SeamOutOfBounds {
            row: row as u32,
            column: i64::from(column),
            width,
        });
    }
    if let Some(row) = seam
        .windows(2)
        .position(|pair| (i64::from(pair[0]) - i64::from(pair[1])).abs() > 1)
    {
        return Err(SeamError::SeamDisconnected {
            row: row as u32,
            next: row as u32 + 1,
        });
    }
    Ok(())
}

/// One full pass of the pipeline: energy, optional mask forcing, cost,
/// cheapest end, trace.  The image is taken as-is, so the seam always
/// runs top to bottom.
pub fn lowest_seam<P, E, C, T>(
    image: &Image<P>,
    mask: Option<&TwoDimensionalMap<bool>>,
    estimator: &E,
    accumulator: &C,
    tracer: &T,
) -> Result<Vec<u32>>
where
    P: Pixel,
    E: EnergyEstimator,
    C: CostAccumulator,
    T: SeamTracer,
{
    let mut energy = estimator.energy(image);
    if let Some(mask) = mask {
        for (x, y, masked) in mask.enumerate() {
            if masked {
                energy[(x, y)] = MASKED_ENERGY;
            }
        }
    }
    let costs = accumulator.accumulate(image, &energy)?;
    let end = lowest_end(&costs)?;
    let seam = tracer.trace(&costs, end)?;
    trace!(end, cost = costs[(end, costs.height() - 1)].cost, "traced seam");
    Ok(seam)
}
