// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Pictures of the carver's working state, for debugging and for the
//! command line's `--energy` and `--seam-overlay` options.

use crate::cq;
use crate::energy::EnergyMap;
use crate::error::{Result, SeamError};
use crate::multiseam::SeamLabels;
use crate::seamfinder::check_seam;
use crate::Image;
use image::{GrayImage, Luma, Pixel};

/// Scale an energy map into an 8-bit grayscale image; the highest
/// energy becomes white.  Negative (masked) energy is drawn black.
pub fn energy_to_image(energy: &EnergyMap) -> GrayImage {
    let (width, height) = energy.dimensions();
    let factor = energy.as_slice().iter().cloned().fold(0.0, f64::max);
    GrayImage::from_fn(width, height, |x, y| {
        let level = cq!(factor > 0.0, energy[(x, y)].max(0.0) * 255.0 / factor, 0.0);
        Luma([level.round().min(255.0) as u8])
    })
}

/// Paint one vertical seam onto a copy of the image.
pub fn draw_seam<P: Pixel>(image: &Image<P>, seam: &[u32], colour: P) -> Result<Image<P>> {
    let (width, height) = image.dimensions();
    check_seam(seam, width, height)?;
    let mut out = image.clone();
    for (y, &x) in seam.iter().enumerate() {
        out.put_pixel(x, y as u32, colour);
    }
    Ok(out)
}

/// Paint every labelled cell of a seam label grid onto a copy of the
/// image.
pub fn draw_labels<P: Pixel>(image: &Image<P>, labels: &SeamLabels, colour: P) -> Result<Image<P>> {
    if labels.dimensions() != image.dimensions() {
        return Err(SeamError::MaskMismatch {
            mask: labels.dimensions(),
            image: image.dimensions(),
        });
    }
    let mut out = image.clone();
    for (x, y, label) in labels.enumerate() {
        if label != 0 {
            out.put_pixel(x, y, colour);
        }
    }
    Ok(out)
}
