// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Cumulative seam cost
//!
//! A cost accumulator turns an energy map into a map where every cell
//! holds the cheapest total cost of any seam reaching it from the top
//! row, together with the direction of the cell above that the
//! cheapest seam came through: -1 for up-left, 0 for straight up, +1
//! for up-right.  The first row has no predecessor and keeps
//! direction 0.
//!
//! Ties always go to the left-most candidate.  That rule is what makes
//! a carve reproducible, so every accumulator funnels its choice
//! through [`leftmost_min`].

use crate::energy::EnergyMap;
use crate::error::{Result, SeamError};
use crate::flipper::{Carve, Flipper};
use crate::twodmap::TwoDimensionalMap;
use crate::Image;
use image::Pixel;
use itertools::Itertools;
use std::cmp::Ordering;

/// The cumulative cost of reaching a cell, and which way the cheapest
/// path came from.
#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub struct CostAndDirection {
    pub cost: f64,
    pub direction: i8,
}

/// The cost grid and direction grid, cell by cell.
pub type CostMap = TwoDimensionalMap<CostAndDirection>;

/// Anything that can accumulate seam costs over an energy map.
pub trait CostAccumulator {
    /// Accumulate top to bottom, for vertical seams.  `image` is the
    /// image the energy came from; models that only need the energy
    /// ignore it.
    fn accumulate<P: Pixel>(&self, image: &Image<P>, energy: &EnergyMap) -> Result<CostMap>;

    /// Accumulate along either axis.  Horizontal seams are found by
    /// flipping the inputs, accumulating, and flipping the result back,
    /// so the returned map is in the caller's orientation.
    fn accumulate_along<P: Pixel>(
        &self,
        image: &Image<P>,
        energy: &EnergyMap,
        axis: Carve,
    ) -> Result<CostMap> {
        match axis {
            Carve::Width => self.accumulate(image, energy),
            Carve::Height => Ok(self.accumulate(&image.flip(), &energy.flip())?.flip()),
        }
    }
}

/// Pick the smallest of the up-left, up and up-right candidates.
/// Returns the cost and the direction (-1, 0 or +1); on a tie the
/// left-most candidate wins.
#[inline]
pub fn leftmost_min(candidates: [f64; 3]) -> CostAndDirection {
    let best = candidates
        .iter()
        .position_min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        .unwrap_or(1);
    CostAndDirection {
        cost: candidates[best],
        direction: best as i8 - 1,
    }
}

/// Start a cost map whose first row is the first row of the energy.
pub fn seed_first_row(energy: &EnergyMap) -> CostMap {
    let (width, height) = energy.dimensions();
    let mut costs = CostMap::new(width, height);
    if height > 0 {
        for x in 0..width {
            costs[(x, 0)].cost = energy[(x, 0)];
        }
    }
    costs
}

/// Check that every direction is -1, 0 or +1.
pub fn check_directions(costs: &CostMap) -> Result<()> {
    match costs
        .enumerate()
        .find(|(_, _, cell)| !(-1..=1).contains(&cell.direction))
    {
        Some((column, row, cell)) => Err(SeamError::DirectionOutOfRange {
            column,
            row,
            value: cell.direction,
        }),
        None => Ok(()),
    }
}

/// The column where the cheapest seam ends: the minimum of the last
/// row, left-most on ties.
pub fn lowest_end(costs: &CostMap) -> Result<u32> {
    let (width, height) = costs.dimensions();
    if width == 0 || height == 0 {
        return Err(SeamError::EmptyImage { width, height });
    }
    let end = costs
        .row(height - 1)
        .iter()
        .position_min_by(|a, b| a.cost.partial_cmp(&b.cost).unwrap_or(Ordering::Equal))
        .unwrap_or(0);
    Ok(end as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INF: f64 = std::f64::INFINITY;

    #[test]
    fn smallest_candidate_wins() {
        assert_eq!(leftmost_min([3.0, 1.0, 2.0]).direction, 0);
        assert_eq!(leftmost_min([3.0, 4.0, 2.0]).direction, 1);
        assert_eq!(leftmost_min([0.5, 4.0, 2.0]).cost, 0.5);
    }

    #[test]
    fn ties_go_left() {
        assert_eq!(leftmost_min([1.0, 1.0, 1.0]).direction, -1);
        assert_eq!(leftmost_min([2.0, 1.0, 1.0]).direction, 0);
        assert_eq!(leftmost_min([INF, 1.0, 1.0]).direction, 0);
    }

    #[test]
    fn border_infinity_is_never_picked() {
        assert_eq!(leftmost_min([INF, 7.0, INF]).direction, 0);
        assert_eq!(leftmost_min([7.0, 9.0, INF]).direction, -1);
    }

    #[test]
    fn lowest_end_prefers_the_left() {
        let energy = TwoDimensionalMap::from_vec(4, 1, vec![3.0, 1.0, 1.0, 2.0]).unwrap();
        assert_eq!(lowest_end(&seed_first_row(&energy)).unwrap(), 1);
    }

    #[test]
    fn rogue_direction_is_reported() {
        let mut costs = CostMap::new(2, 2);
        costs[(1, 1)].direction = 2;
        assert_eq!(
            check_directions(&costs),
            Err(SeamError::DirectionOutOfRange {
                column: 1,
                row: 1,
                value: 2
            })
        );
    }
}
