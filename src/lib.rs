// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware image resizing by seam carving.
//!
//! A seam is a connected path of pixels, one per row, running from the
//! top of an image to the bottom.  Removing the seam whose pixels
//! matter least narrows the image while leaving its interesting parts
//! alone; duplicating the cheapest seams widens it.  Horizontal seams
//! are handled by flipping the image and carving vertically.
//!
//! ```no_run
//! use smartseam::{Carve, SeamCarver};
//!
//! let image = image::open("tower.png").unwrap().to_rgb8();
//! let narrow = SeamCarver::new().reduce(&image, 200, Carve::Width).unwrap();
//! narrow.save("narrow.png").unwrap();
//! ```

use image::{ImageBuffer, Pixel};

#[macro_use]
pub mod ternary;

pub mod accumulator;
pub mod avisha1;
pub mod avisha2;
pub mod dump;
pub mod energy;
pub mod error;
pub mod flipper;
pub mod luma;
pub mod multiseam;
pub mod mutator;
pub mod seamcarver;
pub mod seamfinder;
pub mod twodmap;

/// An owned image with any pixel type.
pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;

pub use accumulator::{CostAccumulator, CostAndDirection, CostMap};
pub use avisha1::BackwardCost;
pub use avisha2::ForwardCost;
pub use dump::{draw_labels, draw_seam, energy_to_image};
pub use energy::{EnergyEstimator, EnergyMap, GradientEnergy};
pub use error::{Result, SeamError};
pub use flipper::{Carve, Flipper};
pub use multiseam::{columns_of, SeamLabels};
pub use mutator::{SeamGrid, SeamMutator, ShiftMutator};
pub use seamcarver::{SeamCarver, OBJECT_MARGIN};
pub use seamfinder::{Backtrack, SeamTracer, MASKED_ENERGY};
pub use twodmap::TwoDimensionalMap;
