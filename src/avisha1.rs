// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam cost after Avidan & Shamir (2007), the original "backward"
//! formulation: a seam costs the energy of the pixels it removes, and
//! nothing else.
//!
//! ```text
//!           ⎧ M(x−1,y−1)
//! M(x,y)=min⎨ M(x,y−1)      + e(x,y)
//!           ⎩ M(x+1,y−1)
//! ```
//!
//! with the out-of-range diagonal at either border counted as +∞.

use crate::accumulator::{
    check_directions, leftmost_min, seed_first_row, CostAccumulator, CostMap,
};
use crate::cq;
use crate::energy::EnergyMap;
use crate::error::Result;
use crate::Image;
use image::Pixel;

const INF: f64 = std::f64::INFINITY;

/// The simple cost model.
#[derive(Debug, Default, Clone, Copy)]
pub struct BackwardCost;

impl CostAccumulator for BackwardCost {
    fn accumulate<P: Pixel>(&self, _image: &Image<P>, energy: &EnergyMap) -> Result<CostMap> {
        energy_to_costs(energy)
    }
}

/// Accumulate costs over the energy map alone.
pub fn energy_to_costs(energy: &EnergyMap) -> Result<CostMap> {
    let (width, height) = energy.dimensions();
    let mw = width.saturating_sub(1);
    let mut costs = seed_first_row(energy);

    for y in 1..height {
        costs.fill_row(y, |above, x| {
            let xu = x as usize;
            let mut best = leftmost_min([
                cq!(x == 0, INF, above[xu - 1].cost),
                above[xu].cost,
                cq!(x >= mw, INF, above[xu + 1].cost),
            ]);
            best.cost += energy[(x, y)];
            best
        });
    }

    check_directions(&costs)?;
    Ok(costs)
}
