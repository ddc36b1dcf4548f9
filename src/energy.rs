// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! Energy is how much a pixel matters: seams are routed through the
//! cheapest pixels first.  The estimator here is the classic gradient
//! magnitude of the luminance, |∂L/∂y| + |∂L/∂x|, with central
//! differences in the interior and one-sided differences along the
//! borders.  Other metrics plug in through [`EnergyEstimator`].

use crate::cq;
use crate::luma::luminance_map;
use crate::twodmap::TwoDimensionalMap;
use crate::Image;
use image::Pixel;

/// One non-negative importance value per pixel.
pub type EnergyMap = TwoDimensionalMap<f64>;

/// Anything that can score the pixels of an image.
pub trait EnergyEstimator {
    /// Compute the energy of every pixel; the map has the image's
    /// dimensions.
    fn energy<P: Pixel>(&self, image: &Image<P>) -> EnergyMap;
}

/// Sum of the absolute luminance gradients along both axes.
#[derive(Debug, Default, Clone, Copy)]
pub struct GradientEnergy;

impl EnergyEstimator for GradientEnergy {
    fn energy<P: Pixel>(&self, image: &Image<P>) -> EnergyMap {
        gradient_energy(&luminance_map(image))
    }
}

/// Gradient magnitude of an already-computed luminance map.
pub fn gradient_energy(luma: &TwoDimensionalMap<f64>) -> EnergyMap {
    let (width, height) = luma.dimensions();
    let (mw, mh) = (width.saturating_sub(1), height.saturating_sub(1));

    // Substituting the pixel itself for a missing neighbour turns the
    // central difference into a one-sided one; the divisor drops to 1
    // to match.  A one-pixel axis has no gradient at all.
    TwoDimensionalMap::from_fn(width, height, |x, y| {
        let here = luma[(x, y)];
        let (left, right) = (
            cq!(x == 0, here, luma[(x - 1, y)]),
            cq!(x >= mw, here, luma[(x + 1, y)]),
        );
        let (up, down) = (
            cq!(y == 0, here, luma[(x, y - 1)]),
            cq!(y >= mh, here, luma[(x, y + 1)]),
        );
        let dx = (right - left) / cq!(x == 0 || x >= mw, 1.0, 2.0);
        let dy = (down - up) / cq!(y == 0 || y >= mh, 1.0, 2.0);
        dx.abs() + dy.abs()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma, Rgb};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn ramp_has_flat_gradient() {
        let image: Image<Luma<u8>> = ImageBuffer::from_raw(3, 1, vec![0, 51, 102]).unwrap();
        let energy = GradientEnergy.energy(&image);
        for x in 0..3 {
            assert!(close(energy[(x, 0)], 0.2), "column {}", x);
        }
    }

    #[test]
    fn vertical_and_horizontal_terms_add() {
        let luma = TwoDimensionalMap::from_vec(
            3,
            3,
            vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
        )
        .unwrap();
        let energy = gradient_energy(&luma);
        // Centre: both central differences cancel.
        assert!(close(energy[(1, 1)], 0.0));
        // Edge midpoints see the bump one-sidedly on one axis only.
        assert!(close(energy[(1, 0)], 1.0));
        assert!(close(energy[(0, 1)], 1.0));
        // Corners are untouched.
        assert!(close(energy[(0, 0)], 0.0));
    }

    #[test]
    fn single_pixel_has_no_energy() {
        let image: Image<Rgb<u8>> = ImageBuffer::from_pixel(1, 1, Rgb([200, 10, 30]));
        assert_eq!(GradientEnergy.energy(&image).as_slice(), &[0.0]);
    }

    #[test]
    fn shifting_every_value_changes_nothing() {
        let base: Image<Luma<f32>> =
            ImageBuffer::from_fn(5, 4, |x, y| Luma([((x * 7 + y * 3) % 5) as f32 * 0.1]));
        let shifted: Image<Luma<f32>> =
            ImageBuffer::from_fn(5, 4, |x, y| Luma([base.get_pixel(x, y)[0] + 0.25]));
        let (a, b) = (GradientEnergy.energy(&base), GradientEnergy.energy(&shifted));
        for (x, y, e) in a.enumerate() {
            assert!(e >= 0.0);
            assert!((e - b[(x, y)]).abs() < 1e-5);
        }
    }
}
