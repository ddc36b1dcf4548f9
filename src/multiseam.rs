// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Finding the k cheapest seams at once
//!
//! Enlargement needs to know where the seams that reduction would have
//! removed lie in the *original* image.  So we pretend to reduce: carve
//! k seams out of a scratch copy, and carry an index map alongside it
//! that is carved with exactly the same seams.  Before each removal,
//! the index map says which original column every surviving pixel came
//! from, which is where the seam gets stamped in the label grid.

use crate::accumulator::CostAccumulator;
use crate::energy::EnergyEstimator;
use crate::error::{Result, SeamError};
use crate::flipper::Carve;
use crate::mutator::SeamMutator;
use crate::seamfinder::{lowest_seam, SeamTracer};
use crate::twodmap::TwoDimensionalMap;
use crate::Image;
use image::Pixel;
use tracing::debug;

/// For every original pixel: 0 if no extracted seam passed through
/// it, otherwise the 1-based order in which its seam was extracted.
pub type SeamLabels = TwoDimensionalMap<u32>;

/// Label the `count` cheapest seams of `image` along `axis`.  The
/// returned grid has the image's dimensions; each label from 1 to
/// `count` occupies exactly one cell per row (per column for
/// `Carve::Height`).
pub fn find_seams<P, E, C, T, M>(
    image: &Image<P>,
    count: u32,
    axis: Carve,
    estimator: &E,
    accumulator: &C,
    tracer: &T,
    mutator: &M,
) -> Result<SeamLabels>
where
    P: Pixel,
    E: EnergyEstimator,
    C: CostAccumulator,
    T: SeamTracer,
    M: SeamMutator,
{
    let mut scratch = axis.orient(image);
    let (width, height) = scratch.dimensions();
    if width == 0 || height == 0 {
        return Err(SeamError::EmptyImage { width, height });
    }
    if count > width {
        return Err(SeamError::TooManySeams { count, width });
    }

    let mut indices: TwoDimensionalMap<u32> = TwoDimensionalMap::from_fn(width, height, |x, _| x);
    let mut labels = SeamLabels::new(width, height);

    for label in 1..=count {
        let seam = lowest_seam(&scratch, None, estimator, accumulator, tracer)?;
        for (y, &x) in seam.iter().enumerate() {
            let y = y as u32;
            let original = indices[(x, y)];
            let cell = &mut labels[(original, y)];
            if *cell != 0 {
                return Err(SeamError::LabelCollision {
                    column: original,
                    row: y,
                    label,
                    existing: *cell,
                });
            }
            *cell = label;
        }
        scratch = mutator.remove(&scratch, &seam)?;
        indices = mutator.remove(&indices, &seam)?;
        debug!(label, remaining = scratch.width(), "extracted seam");
    }

    Ok(axis.orient(&labels))
}

/// The column holding `label` in each row of a label grid.
pub fn columns_of(labels: &SeamLabels, label: u32) -> Result<Vec<u32>> {
    (0..labels.height())
        .map(|y| {
            labels
                .row(y)
                .iter()
                .position(|&l| l == label)
                .map(|x| x as u32)
                .ok_or(SeamError::MissingLabel { label, row: y })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avisha1::BackwardCost;
    use crate::energy::GradientEnergy;
    use crate::mutator::ShiftMutator;
    use crate::seamfinder::Backtrack;
    use image::{ImageBuffer, Rgb};
    use itertools::iproduct;

    fn busy_image() -> Image<Rgb<u8>> {
        ImageBuffer::from_fn(7, 5, |x, y| {
            let v = ((x * 37 + y * 91) % 256) as u8;
            Rgb([v, v.wrapping_mul(3), 255 - v])
        })
    }

    fn extract(image: &Image<Rgb<u8>>, count: u32, axis: Carve) -> Result<SeamLabels> {
        find_seams(
            image,
            count,
            axis,
            &GradientEnergy,
            &BackwardCost,
            &Backtrack,
            &ShiftMutator,
        )
    }

    fn assert_one_per_row(labels: &SeamLabels, count: u32) {
        let (width, height) = labels.dimensions();
        for label in 1..=count {
            for y in 0..height {
                assert_eq!(labels.count_in_row(y, label), 1, "label {} row {}", label, y);
            }
        }
        let unlabelled = iproduct!(0..height, 0..width)
            .filter(|&(y, x)| labels[(x, y)] == 0)
            .count();
        assert_eq!(unlabelled, ((width - count) * height) as usize);
    }

    #[test]
    fn every_seam_gets_one_cell_per_row() {
        let labels = extract(&busy_image(), 4, Carve::Width).unwrap();
        assert_eq!(labels.dimensions(), (7, 5));
        assert_one_per_row(&labels, 4);
    }

    #[test]
    fn can_label_every_column() {
        let labels = extract(&busy_image(), 7, Carve::Width).unwrap();
        assert_one_per_row(&labels, 7);
    }

    #[test]
    fn height_labels_come_back_in_image_orientation() {
        let labels = extract(&busy_image(), 2, Carve::Height).unwrap();
        assert_eq!(labels.dimensions(), (7, 5));
        for label in 1..=2 {
            for x in 0..7 {
                let hits = (0..5).filter(|&y| labels[(x, y)] == label).count();
                assert_eq!(hits, 1);
            }
        }
    }

    #[test]
    fn first_seam_is_the_cheapest_seam() {
        let image = busy_image();
        let labels = extract(&image, 1, Carve::Width).unwrap();
        let seam =
            lowest_seam(&image, None, &GradientEnergy, &BackwardCost, &Backtrack).unwrap();
        assert_eq!(columns_of(&labels, 1).unwrap(), seam);
    }

    #[test]
    fn too_many_seams_is_refused() {
        assert_eq!(
            extract(&busy_image(), 8, Carve::Width),
            Err(SeamError::TooManySeams { count: 8, width: 7 })
        );
    }

    #[test]
    fn missing_label_is_reported() {
        let labels = SeamLabels::from_vec(2, 2, vec![1, 0, 0, 0]).unwrap();
        assert_eq!(
            columns_of(&labels, 1),
            Err(SeamError::MissingLabel { label: 1, row: 1 })
        );
    }
}
