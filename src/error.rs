// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors raised by the carving engine
//!
//! Two families live here.  Precondition failures are the caller's
//! fault and are reported before anything is mutated.  Invariant
//! failures mean the accumulation or bookkeeping code is broken; they
//! are returned rather than papered over, because a quietly repaired
//! seam poisons every pass that follows it.

use failure::Fail;

/// Everything that can go wrong while carving.
#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum SeamError {
    /// The image (or grid) has no pixels along some axis.
    #[fail(display = "cannot carve an empty {}x{} image", width, height)]
    EmptyImage { width: u32, height: u32 },

    /// A resize was asked to produce a zero-sized axis.
    #[fail(display = "target size must be greater than zero")]
    ZeroTarget,

    /// Reduce was handed a target larger than the current size.
    #[fail(
        display = "target size {} must not exceed the current size {} when reducing",
        target, current
    )]
    TargetNotSmaller { target: u32, current: u32 },

    /// Enlarge was handed a target smaller than the current size.
    #[fail(
        display = "target size {} must not be below the current size {} when enlarging",
        target, current
    )]
    TargetNotLarger { target: u32, current: u32 },

    /// Enlarge can duplicate each seam at most once per pass.
    #[fail(
        display = "target size {} exceeds twice the current size {}",
        target, current
    )]
    TargetTooLarge { target: u32, current: u32 },

    /// More seams were requested than there are columns.
    #[fail(display = "cannot extract {} seams from an image {} wide", count, width)]
    TooManySeams { count: u32, width: u32 },

    /// The object mask does not cover the image exactly.
    #[fail(
        display = "mask is {:?} but the image is {:?}",
        mask, image
    )]
    MaskMismatch { mask: (u32, u32), image: (u32, u32) },

    /// The cost model has no definition along the requested axis.
    #[fail(display = "{} cost is only defined for vertical seams", model)]
    UnsupportedAxis { model: &'static str },

    /// A direction cell held something other than -1, 0 or +1.
    #[fail(
        display = "direction {} at ({}, {}) is outside -1..=1",
        value, column, row
    )]
    DirectionOutOfRange { column: u32, row: u32, value: i8 },

    /// A seam did not have exactly one entry per row.
    #[fail(display = "seam has {} entries for {} rows", actual, expected)]
    SeamLength { expected: u32, actual: u32 },

    /// A seam points outside the grid.
    #[fail(
        display = "seam column {} in row {} is outside a grid {} wide",
        column, row, width
    )]
    SeamOutOfBounds { row: u32, column: i64, width: u32 },

    /// Two consecutive seam cells are more than one column apart.
    #[fail(display = "seam jumps more than one column between rows {} and {}", row, next)]
    SeamDisconnected { row: u32, next: u32 },

    /// The multi-seam extractor tried to stamp an already-labelled cell.
    #[fail(
        display = "seam {} would overwrite seam {} at ({}, {})",
        label, existing, column, row
    )]
    LabelCollision {
        column: u32,
        row: u32,
        label: u32,
        existing: u32,
    },

    /// A seam label vanished from a row of the label grid.
    #[fail(display = "seam {} has no cell in row {}", label, row)]
    MissingLabel { label: u32, row: u32 },

    /// A finished resize did not land on the requested size.
    #[fail(display = "carved to {} but {} was requested", actual, expected)]
    SizeMismatch { expected: u32, actual: u32 },

    /// A sample buffer did not match the dimensions it was built for.
    #[fail(display = "failed to rebuild a {}x{} buffer", width, height)]
    BufferCreationFailed { width: u32, height: u32 },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SeamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_sizes() {
        let err = SeamError::TargetTooLarge {
            target: 9,
            current: 4,
        };
        assert_eq!(
            err.to_string(),
            "target size 9 exceeds twice the current size 4"
        );
    }

    #[test]
    fn mask_mismatch_reports_both_shapes() {
        let err = SeamError::MaskMismatch {
            mask: (3, 2),
            image: (4, 2),
        };
        assert_eq!(err.to_string(), "mask is (3, 2) but the image is (4, 2)");
    }
}
