// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{value_t, App, Arg, ArgMatches};
use failure::Error;
use image::{Rgb, RgbImage};
use smartseam::{
    draw_labels, energy_to_image, Carve, CostAccumulator, EnergyEstimator, ForwardCost,
    GradientEnergy, SeamCarver, TwoDimensionalMap, OBJECT_MARGIN,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SEAM_COLOUR: Rgb<u8> = Rgb([255, 0, 0]);

fn main() {
    if let Err(err) = try_main() {
        eprintln!("smartseam: {}", err);
        std::process::exit(1);
    }
}

fn try_main() -> Result<(), Error> {
    let matches = App::new("smartseam")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware image resizing by seam carving")
        .arg(
            Arg::with_name("input")
                .help("The image to carve")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the carved image")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("width")
                .long("width")
                .value_name("PIXELS")
                .help("Target width (default: unchanged)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .value_name("PIXELS")
                .help("Target height (default: unchanged)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("forward")
                .long("forward")
                .help("Use the forward-looking cost model"),
        )
        .arg(
            Arg::with_name("mask")
                .long("mask")
                .value_name("FILE")
                .help("Remove the object under the non-black pixels of this image")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("margin")
                .long("margin")
                .value_name("N")
                .help("Extra seams to carve through a masked object")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("energy")
                .long("energy")
                .value_name("FILE")
                .help("Also write the input's energy map as a grayscale image")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("seams")
                .long("seams")
                .value_name("N")
                .help("Number of lowest seams to paint into the overlay")
                .takes_value(true)
                .requires("seam-overlay"),
        )
        .arg(
            Arg::with_name("seam-overlay")
                .long("seam-overlay")
                .value_name("FILE")
                .help("Also write the input with its lowest seams painted red")
                .takes_value(true)
                .requires("seams"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Log progress to stderr; repeat for more detail"),
        )
        .get_matches();

    let level = match matches.occurrences_of("verbose") {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(env_filter)
        .init();

    let margin = if matches.is_present("margin") {
        value_t!(matches, "margin", u32).unwrap_or_else(|e| e.exit())
    } else {
        OBJECT_MARGIN
    };
    let carver = SeamCarver::new().with_object_margin(margin);

    if matches.is_present("forward") {
        run(&matches, carver.with_costs(ForwardCost))
    } else {
        run(&matches, carver)
    }
}

fn run<C: CostAccumulator>(matches: &ArgMatches, carver: SeamCarver<GradientEnergy, C>) -> Result<(), Error> {
    let input = matches.value_of("input").unwrap_or_default();
    let mut image: RgbImage = image::open(input)?.to_rgb8();
    info!(path = input, width = image.width(), height = image.height(), "loaded");

    if let Some(path) = matches.value_of("energy") {
        energy_to_image(&GradientEnergy.energy(&image)).save(path)?;
        info!(path, "wrote energy map");
    }

    if let Some(path) = matches.value_of("seam-overlay") {
        let count = value_t!(matches, "seams", u32).unwrap_or_else(|e| e.exit());
        let labels = carver.find_seams(&image, count, Carve::Width)?;
        draw_labels(&image, &labels, SEAM_COLOUR)?.save(path)?;
        info!(path, count, "wrote seam overlay");
    }

    if let Some(path) = matches.value_of("mask") {
        let mask = image::open(path)?.to_luma8();
        let mask = TwoDimensionalMap::from_fn(mask.width(), mask.height(), |x, y| {
            mask.get_pixel(x, y)[0] != 0
        });
        image = carver.remove_object(&image, &mask)?;
    }

    let width = target(matches, "width", image.width());
    let height = target(matches, "height", image.height());
    let carved = carver.carve(&image, width, height)?;

    let output = matches.value_of("output").unwrap_or_default();
    carved.save(output)?;
    info!(path = output, width, height, "saved");
    Ok(())
}

fn target(matches: &ArgMatches, name: &str, current: u32) -> u32 {
    if matches.is_present(name) {
        value_t!(matches, name, u32).unwrap_or_else(|e| e.exit())
    } else {
        current
    }
}
