// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - the main driver
//!
//! The carver owns no image.  It holds the four strategies (energy,
//! cost, tracing, mutation) and applies them to whatever image it is
//! handed, always returning a new one.  Every operation is written for
//! vertical seams; height is handled by flipping the image on the way
//! in and back on the way out.

use crate::accumulator::CostAccumulator;
use crate::avisha1::BackwardCost;
use crate::energy::{EnergyEstimator, GradientEnergy};
use crate::error::{Result, SeamError};
use crate::flipper::Carve;
use crate::multiseam::{self, columns_of, SeamLabels};
use crate::mutator::{SeamMutator, ShiftMutator};
use crate::seamfinder::{self, Backtrack, SeamTracer};
use crate::twodmap::TwoDimensionalMap;
use crate::Image;
use image::Pixel;
use std::cmp::Ordering;
use tracing::{debug, info, warn};

/// Extra passes object removal makes beyond the widest row of the
/// mask, since seams rarely run straight down through an object.
pub const OBJECT_MARGIN: u32 = 30;

/// The resize orchestrator, generic over its strategies.
#[derive(Debug, Clone)]
pub struct SeamCarver<E = GradientEnergy, C = BackwardCost, T = Backtrack, M = ShiftMutator> {
    estimator: E,
    accumulator: C,
    tracer: T,
    mutator: M,
    object_margin: u32,
}

impl SeamCarver {
    /// Gradient energy, backward cost, plain backtracking and shifting.
    pub fn new() -> Self {
        SeamCarver {
            estimator: GradientEnergy,
            accumulator: BackwardCost,
            tracer: Backtrack,
            mutator: ShiftMutator,
            object_margin: OBJECT_MARGIN,
        }
    }
}

impl Default for SeamCarver {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, C, T, M> SeamCarver<E, C, T, M> {
    /// Swap in another energy estimator.
    pub fn with_energy<E2>(self, estimator: E2) -> SeamCarver<E2, C, T, M> {
        SeamCarver {
            estimator,
            accumulator: self.accumulator,
            tracer: self.tracer,
            mutator: self.mutator,
            object_margin: self.object_margin,
        }
    }

    /// Swap in another cost model, e.g. [`crate::ForwardCost`].
    pub fn with_costs<C2>(self, accumulator: C2) -> SeamCarver<E, C2, T, M> {
        SeamCarver {
            estimator: self.estimator,
            accumulator,
            tracer: self.tracer,
            mutator: self.mutator,
            object_margin: self.object_margin,
        }
    }

    pub fn with_tracer<T2>(self, tracer: T2) -> SeamCarver<E, C, T2, M> {
        SeamCarver {
            estimator: self.estimator,
            accumulator: self.accumulator,
            tracer,
            mutator: self.mutator,
            object_margin: self.object_margin,
        }
    }

    pub fn with_mutator<M2>(self, mutator: M2) -> SeamCarver<E, C, T, M2> {
        SeamCarver {
            estimator: self.estimator,
            accumulator: self.accumulator,
            tracer: self.tracer,
            mutator,
            object_margin: self.object_margin,
        }
    }

    /// Change how many extra passes object removal makes.
    pub fn with_object_margin(mut self, margin: u32) -> Self {
        self.object_margin = margin;
        self
    }
}

impl<E, C, T, M> SeamCarver<E, C, T, M>
where
    E: EnergyEstimator,
    C: CostAccumulator,
    T: SeamTracer,
    M: SeamMutator,
{
    fn next_seam<P: Pixel>(
        &self,
        image: &Image<P>,
        mask: Option<&TwoDimensionalMap<bool>>,
    ) -> Result<Vec<u32>> {
        seamfinder::lowest_seam(image, mask, &self.estimator, &self.accumulator, &self.tracer)
    }

    /// The seam the next reduction along `axis` would remove.  For
    /// `Carve::Height` the entries are row numbers, one per column.
    pub fn lowest_seam<P: Pixel>(&self, image: &Image<P>, axis: Carve) -> Result<Vec<u32>> {
        check_not_empty(image)?;
        self.next_seam(&axis.orient(image), None)
    }

    /// Label the `count` cheapest seams along `axis` in original
    /// coordinates.
    pub fn find_seams<P: Pixel>(
        &self,
        image: &Image<P>,
        count: u32,
        axis: Carve,
    ) -> Result<SeamLabels> {
        multiseam::find_seams(
            image,
            count,
            axis,
            &self.estimator,
            &self.accumulator,
            &self.tracer,
            &self.mutator,
        )
    }

    /// Remove seams until the image is `target` wide (or high).  A
    /// target equal to the current size returns a copy.
    pub fn reduce<P: Pixel>(&self, image: &Image<P>, target: u32, axis: Carve) -> Result<Image<P>> {
        check_not_empty(image)?;
        let current = axis.extent(image.dimensions());
        if target == 0 {
            return Err(SeamError::ZeroTarget);
        }
        if target > current {
            return Err(SeamError::TargetNotSmaller { target, current });
        }

        info!(?axis, from = current, to = target, "reducing");
        let mut scratch = axis.orient(image);
        for pass in 0..current - target {
            let seam = self.next_seam(&scratch, None)?;
            scratch = self.mutator.remove(&scratch, &seam)?;
            debug!(pass, size = scratch.width(), "removed seam");
        }

        check_size(&scratch, target)?;
        Ok(axis.orient(&scratch))
    }

    /// Duplicate seams until the image is `target` wide (or high).  At
    /// most doubles the size: each seam can only be duplicated once
    /// per pass.
    pub fn enlarge<P: Pixel>(&self, image: &Image<P>, target: u32, axis: Carve) -> Result<Image<P>> {
        check_not_empty(image)?;
        let current = axis.extent(image.dimensions());
        if target < current {
            return Err(SeamError::TargetNotLarger { target, current });
        }
        if u64::from(target) > 2 * u64::from(current) {
            return Err(SeamError::TargetTooLarge { target, current });
        }
        if target == current {
            return Ok(image.clone());
        }

        info!(?axis, from = current, to = target, "enlarging");
        let count = target - current;
        let mut scratch = axis.orient(image);
        let mut labels = self.find_seams(&scratch, count, Carve::Width)?;

        // Lowest-cost seam first.  The label grid is widened together
        // with the image, so each lookup reads live coordinates.
        for label in 1..=count {
            let columns = columns_of(&labels, label)?;
            scratch = self.mutator.duplicate(&scratch, &columns)?;
            labels = self.mutator.duplicate(&labels, &columns)?;
            debug!(label, size = scratch.width(), "duplicated seam");
        }

        check_size(&scratch, target)?;
        Ok(axis.orient(&scratch))
    }

    /// Resize to `width` x `height`: width first, then height, each
    /// reduced, enlarged or left alone as needed.
    pub fn carve<P: Pixel>(&self, image: &Image<P>, width: u32, height: u32) -> Result<Image<P>> {
        let wide = self.carve_axis(image, width, Carve::Width)?;
        self.carve_axis(&wide, height, Carve::Height)
    }

    fn carve_axis<P: Pixel>(&self, image: &Image<P>, target: u32, axis: Carve) -> Result<Image<P>> {
        match target.cmp(&axis.extent(image.dimensions())) {
            Ordering::Less => self.reduce(image, target, axis),
            Ordering::Greater => self.enlarge(image, target, axis),
            Ordering::Equal => Ok(image.clone()),
        }
    }

    /// Remove the masked object with vertical seams and restore the
    /// original width.
    pub fn remove_object<P: Pixel>(
        &self,
        image: &Image<P>,
        mask: &TwoDimensionalMap<bool>,
    ) -> Result<Image<P>> {
        self.remove_object_along(image, mask, Carve::Width)
    }

    /// Remove every `true` pixel of `mask` by forcing seams through it,
    /// then grow the image back to its original size along `axis`.
    /// Best effort: an object the seams cannot fully reach within the
    /// pass budget is shrunk rather than erased, and a warning is
    /// logged.
    pub fn remove_object_along<P: Pixel>(
        &self,
        image: &Image<P>,
        mask: &TwoDimensionalMap<bool>,
        axis: Carve,
    ) -> Result<Image<P>> {
        check_not_empty(image)?;
        if mask.dimensions() != image.dimensions() {
            return Err(SeamError::MaskMismatch {
                mask: mask.dimensions(),
                image: image.dimensions(),
            });
        }
        if mask.count(true) == 0 {
            return Ok(image.clone());
        }

        let mut scratch = axis.orient(image);
        let mut mask = axis.orient(mask);
        let (width, height) = scratch.dimensions();
        let widest = (0..height)
            .map(|y| mask.count_in_row(y, true))
            .max()
            .unwrap_or(0);
        let passes = widest.saturating_add(self.object_margin).min(width - 1);

        info!(?axis, widest, passes, "removing object");
        for pass in 0..passes {
            let seam = self.next_seam(&scratch, Some(&mask))?;
            scratch = self.mutator.remove(&scratch, &seam)?;
            mask = self.mutator.remove(&mask, &seam)?;
            debug!(pass, left = mask.count(true), "carved through object");
        }

        let left = mask.count(true);
        if left > 0 {
            warn!(left, "object was not fully removed");
        }

        while scratch.width() < width {
            let step = width.min(scratch.width() * 2);
            scratch = self.enlarge(&scratch, step, Carve::Width)?;
        }
        Ok(axis.orient(&scratch))
    }
}

fn check_not_empty<P: Pixel>(image: &Image<P>) -> Result<()> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        Err(SeamError::EmptyImage { width, height })
    } else {
        Ok(())
    }
}

fn check_size<P: Pixel>(image: &Image<P>, expected: u32) -> Result<()> {
    if image.width() == expected {
        Ok(())
    } else {
        Err(SeamError::SizeMismatch {
            expected,
            actual: image.width(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avisha2::ForwardCost;
    use crate::energy::EnergyMap;
    use crate::luma::luminance_map;
    use image::{ImageBuffer, Luma, LumaA, Rgb};

    /// Uses the pixel's own brightness as its energy, so tests can
    /// write the energy field directly.
    struct BrightnessIsEnergy;

    impl EnergyEstimator for BrightnessIsEnergy {
        fn energy<P: Pixel>(&self, image: &Image<P>) -> EnergyMap {
            luminance_map(image)
        }
    }

    fn direct() -> SeamCarver<BrightnessIsEnergy> {
        SeamCarver::new().with_energy(BrightnessIsEnergy)
    }

    fn photo() -> Image<Rgb<u8>> {
        ImageBuffer::from_fn(12, 9, |x, y| {
            let v = ((x * 29 + y * 53 + x * y * 7) % 251) as u8;
            Rgb([v, 255 - v, v / 2])
        })
    }

    #[test]
    fn removes_the_uniquely_cheapest_column() {
        let image: Image<Luma<u8>> =
            ImageBuffer::from_fn(4, 4, |x, _| Luma([10 * (x as u8 + 1)]));
        let out = direct().reduce(&image, 3, Carve::Width).unwrap();
        assert_eq!(out.dimensions(), (3, 4));
        for y in 0..4 {
            let row: Vec<u8> = (0..3).map(|x| out.get_pixel(x, y)[0]).collect();
            assert_eq!(row, vec![20, 30, 40]);
        }
    }

    #[test]
    fn tied_columns_lose_the_left_one() {
        // Brightness is the energy; the alpha channel tags each column.
        let energies = [50u8, 10, 10, 50];
        let image: Image<LumaA<u8>> =
            ImageBuffer::from_fn(4, 3, |x, _| LumaA([energies[x as usize], x as u8]));
        let out = direct().reduce(&image, 3, Carve::Width).unwrap();
        for y in 0..3 {
            let tags: Vec<u8> = (0..3).map(|x| out.get_pixel(x, y)[1]).collect();
            assert_eq!(tags, vec![0, 2, 3], "row {}", y);
        }
    }

    #[test]
    fn reduce_to_the_same_size_is_a_copy() {
        let image = photo();
        assert_eq!(SeamCarver::new().reduce(&image, 12, Carve::Width).unwrap(), image);
    }

    #[test]
    fn reduce_rejects_bad_targets() {
        let image = photo();
        let carver = SeamCarver::new();
        assert_eq!(
            carver.reduce(&image, 13, Carve::Width),
            Err(SeamError::TargetNotSmaller {
                target: 13,
                current: 12
            })
        );
        assert_eq!(carver.reduce(&image, 0, Carve::Width), Err(SeamError::ZeroTarget));
    }

    #[test]
    fn reduces_height_through_the_flip() {
        let out = SeamCarver::new().reduce(&photo(), 5, Carve::Height).unwrap();
        assert_eq!(out.dimensions(), (12, 5));
    }

    #[test]
    fn forward_cost_carves_both_axes() {
        let carver = SeamCarver::new().with_costs(ForwardCost);
        let out = carver.carve(&photo(), 9, 7).unwrap();
        assert_eq!(out.dimensions(), (9, 7));
    }

    #[test]
    fn enlarge_can_double() {
        let out = SeamCarver::new().enlarge(&photo(), 24, Carve::Width).unwrap();
        assert_eq!(out.dimensions(), (24, 9));
    }

    #[test]
    fn enlarge_refuses_more_than_double() {
        assert_eq!(
            SeamCarver::new().enlarge(&photo(), 25, Carve::Width),
            Err(SeamError::TargetTooLarge {
                target: 25,
                current: 12
            })
        );
        assert_eq!(
            SeamCarver::new().enlarge(&photo(), 11, Carve::Width),
            Err(SeamError::TargetNotLarger {
                target: 11,
                current: 12
            })
        );
    }

    #[test]
    fn enlarge_only_repeats_existing_pixels() {
        let image: Image<Luma<u16>> =
            ImageBuffer::from_fn(6, 4, |x, y| Luma([(x * 3 + y * 7 + (x * y) % 4) as u16 * 100 + x as u16]));
        let out = SeamCarver::new().enlarge(&image, 9, Carve::Width).unwrap();
        assert_eq!(out.dimensions(), (9, 4));
        for y in 0..4 {
            let original: Vec<u16> = (0..6).map(|x| image.get_pixel(x, y)[0]).collect();
            let mut grown: Vec<u16> = (0..9).map(|x| out.get_pixel(x, y)[0]).collect();
            grown.dedup();
            assert_eq!(grown, original, "row {}", y);
        }
    }

    #[test]
    fn enlarges_height_through_the_flip() {
        let out = SeamCarver::new().enlarge(&photo(), 13, Carve::Height).unwrap();
        assert_eq!(out.dimensions(), (12, 13));
    }

    #[test]
    fn carve_mixes_directions() {
        let out = SeamCarver::new().carve(&photo(), 15, 6).unwrap();
        assert_eq!(out.dimensions(), (15, 6));
    }

    #[test]
    fn empty_mask_is_a_no_op() {
        let image = photo();
        let mask = TwoDimensionalMap::new(12, 9);
        assert_eq!(SeamCarver::new().remove_object(&image, &mask).unwrap(), image);
    }

    #[test]
    fn mask_must_match_the_image() {
        let mask = TwoDimensionalMap::new(11, 9);
        assert_eq!(
            SeamCarver::new().remove_object(&photo(), &mask),
            Err(SeamError::MaskMismatch {
                mask: (11, 9),
                image: (12, 9)
            })
        );
    }

    #[test]
    fn object_is_carved_away_and_width_restored() {
        let red = Rgb([255u8, 0, 0]);
        let image: Image<Rgb<u8>> = ImageBuffer::from_fn(40, 6, |x, y| {
            if x == 17 || (x == 18 && y % 2 == 0) {
                red
            } else {
                let v = (x * 6) as u8;
                Rgb([v, v, v])
            }
        });
        let mask = TwoDimensionalMap::from_fn(40, 6, |x, y| *image.get_pixel(x, y) == red);
        let out = SeamCarver::new().remove_object(&image, &mask).unwrap();
        assert_eq!(out.dimensions(), image.dimensions());
        assert!(out.pixels().all(|p| *p != red));
    }

    #[test]
    fn small_images_still_come_back_whole() {
        let image = photo();
        let mask = TwoDimensionalMap::from_fn(12, 9, |x, _| x == 4);
        let out = SeamCarver::new().remove_object(&image, &mask).unwrap();
        assert_eq!(out.dimensions(), (12, 9));
    }

    #[test]
    fn object_removal_along_height() {
        let image = photo();
        let mask = TwoDimensionalMap::from_fn(12, 9, |_, y| y == 2);
        let out = SeamCarver::new()
            .with_object_margin(2)
            .remove_object_along(&image, &mask, Carve::Height)
            .unwrap();
        assert_eq!(out.dimensions(), (12, 9));
    }

    #[test]
    fn lowest_seam_does_not_touch_the_image() {
        let image = photo();
        let seam = SeamCarver::new().lowest_seam(&image, Carve::Height).unwrap();
        assert_eq!(seam.len(), 12);
        assert!(seam.iter().all(|&y| y < 9));
    }
}
