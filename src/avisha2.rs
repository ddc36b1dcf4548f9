// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam cost using the Avidan & Shamir "Forward Energy" algorithm.
//!
//! Removing a seam pixel makes its two neighbours adjacent, and that
//! new edge has an energy of its own.  Forward cost charges each
//! candidate path for the edges it would create:
//!
//! ```text
//!  CU(x,y) = D[(x−1,y),(x+1,y)]
//!  CL(x,y) = D[(x−1,y),(x+1,y)] + D[(x,y−1),(x−1,y)]
//!  CR(x,y) = D[(x−1,y),(x+1,y)] + D[(x,y−1),(x+1,y)]
//!
//!           ⎧ M(x−1,y−1)+CL(x,y)
//! M(x,y)=min⎨ M(x,y−1)+CU(x,y)      + e(x,y)
//!           ⎩ M(x+1,y−1)+CR(x,y)
//! ```
//!
//! where D is the absolute luminance difference.  Edges:
//!
//! ```text
//!  CL(0,y) = ∞,  CU(0,y) = 0,  CR(0,y) = D[(0,y−1),(1,y)]
//! ```
//!
//! and the far edge by analogy.  The first row is the energy, as with
//! the backward model.

use crate::accumulator::{
    check_directions, leftmost_min, seed_first_row, CostAccumulator, CostMap,
};
use crate::cq;
use crate::energy::EnergyMap;
use crate::error::{Result, SeamError};
use crate::flipper::Carve;
use crate::luma::luminance_map;
use crate::twodmap::TwoDimensionalMap;
use crate::Image;
use image::Pixel;

const INF: f64 = std::f64::INFINITY;

/// The forward-looking cost model.  Defined for vertical seams only;
/// to carve height with it, flip the image first (the carver does).
#[derive(Debug, Default, Clone, Copy)]
pub struct ForwardCost;

impl CostAccumulator for ForwardCost {
    fn accumulate<P: Pixel>(&self, image: &Image<P>, energy: &EnergyMap) -> Result<CostMap> {
        forward_costs(&luminance_map(image), energy)
    }

    fn accumulate_along<P: Pixel>(
        &self,
        image: &Image<P>,
        energy: &EnergyMap,
        axis: Carve,
    ) -> Result<CostMap> {
        match axis {
            Carve::Width => self.accumulate(image, energy),
            Carve::Height => Err(SeamError::UnsupportedAxis { model: "forward" }),
        }
    }
}

/// Accumulate forward costs given the luminance and energy maps of
/// the same image.
pub fn forward_costs(luma: &TwoDimensionalMap<f64>, energy: &EnergyMap) -> Result<CostMap> {
    let (width, height) = energy.dimensions();
    let mw = width.saturating_sub(1);
    let d = |a: (u32, u32), b: (u32, u32)| (luma[a] - luma[b]).abs();
    let mut costs = seed_first_row(energy);

    for y in 1..height {
        costs.fill_row(y, |above, x| {
            let xu = x as usize;
            let (at_left, at_right) = (x == 0, x >= mw);
            let across = cq!(at_left || at_right, 0.0, d((x + 1, y), (x - 1, y)));
            let mut best = leftmost_min([
                cq!(at_left, INF, above[xu - 1].cost + across + d((x, y - 1), (x - 1, y))),
                above[xu].cost + across,
                cq!(at_right, INF, above[xu + 1].cost + across + d((x, y - 1), (x + 1, y))),
            ]);
            best.cost += energy[(x, y)];
            best
        });
    }

    check_directions(&costs)?;
    Ok(costs)
}
