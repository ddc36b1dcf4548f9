// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Grayscale luminance
//!
//! Both the gradient energy and the forward cost look at brightness,
//! not colour.  Colour pixels are weighted with the Rec. 709
//! coefficients; gray pixels pass straight through.  Either way the
//! result is scaled into [0, 1] by the subpixel type's nominal maximum,
//! so a `u8` image and the same image as `u16` give the same map.

use crate::twodmap::TwoDimensionalMap;
use crate::Image;
use image::{Pixel, Primitive};
use num_traits::ToPrimitive;

const RED: f64 = 0.2125;
const GREEN: f64 = 0.7154;
const BLUE: f64 = 0.0721;

#[inline]
fn sample<S: Primitive>(s: S) -> f64 {
    s.to_f64().unwrap_or_default()
}

/// Luminance of one pixel in [0, 1] (for in-range samples).
#[inline]
pub fn luminance<P: Pixel>(pixel: &P) -> f64 {
    let channels = pixel.channels();
    let scale = sample(P::Subpixel::DEFAULT_MAX_VALUE);
    let raw = match channels {
        [r, g, b, ..] => {
            RED * sample(*r) + GREEN * sample(*g) + BLUE * sample(*b)
        }
        [y, ..] => sample(*y),
        [] => 0.0,
    };
    raw / scale
}

/// The luminance of every pixel of an image.
pub fn luminance_map<P: Pixel>(image: &Image<P>) -> TwoDimensionalMap<f64> {
    let (width, height) = image.dimensions();
    TwoDimensionalMap::from_fn(width, height, |x, y| luminance(image.get_pixel(x, y)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, LumaA, Rgb};

    #[test]
    fn gray_passes_through_scaled() {
        assert_eq!(luminance(&Luma([255u8])), 1.0);
        assert_eq!(luminance(&Luma([0u8])), 0.0);
        assert_eq!(luminance(&LumaA([51u8, 9])), 0.2);
    }

    #[test]
    fn white_is_one_whatever_the_depth() {
        assert!((luminance(&Rgb([255u8, 255, 255])) - 1.0).abs() < 1e-12);
        assert!((luminance(&Rgb([65535u16, 65535, 65535])) - 1.0).abs() < 1e-12);
        assert!((luminance(&Rgb([1.0f32, 1.0, 1.0])) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn green_outweighs_red_and_blue() {
        let red = luminance(&Rgb([255u8, 0, 0]));
        let green = luminance(&Rgb([0u8, 255, 0]));
        let blue = luminance(&Rgb([0u8, 0, 255]));
        assert!(green > red && red > blue);
    }
}
