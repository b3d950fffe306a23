// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[macro_use]
extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate mandelmovie;
extern crate num;
extern crate num_cpus;

use clap::{App, AppSettings, Arg, ArgMatches};
use mandelmovie::output::{write_image, JPEG_MAX_SIDE};
use mandelmovie::partition::{clamp_threads, MAX_THREADS};
use mandelmovie::{render, Error, Palette, RenderConfig};
use num::Complex;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

fn validate<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd + Display>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(format!("Must be between {} and {}", low, high))
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const XCENTER: &str = "xcenter";
const YCENTER: &str = "ycenter";
const SCALE: &str = "scale";
const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const ITERATIONS: &str = "max";
const OUTPUT: &str = "output";
const THREADS: &str = "threads";
const PALETTE: &str = "palette";

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandel")
        .version(crate_version!())
        .about("Renders one Mandelbrot image")
        .setting(AppSettings::AllowNegativeNumbers)
        .after_help(
            "Some examples are:\n    \
             mandel -x -0.5 -y -0.5 -s 0.2\n    \
             mandel -x -.38 -y -.665 -s .05 -m 100\n    \
             mandel -x 0.286932 -y 0.014287 -s .0005 -m 1000 -t 8",
        )
        .arg(
            Arg::with_name(XCENTER)
                .short("x")
                .long(XCENTER)
                .takes_value(true)
                .default_value("0")
                .validator(|s| validate::<f64>(&s, "Could not parse x coordinate"))
                .help("X coordinate of image center point"),
        )
        .arg(
            Arg::with_name(YCENTER)
                .short("y")
                .long(YCENTER)
                .takes_value(true)
                .default_value("0")
                .validator(|s| validate::<f64>(&s, "Could not parse y coordinate"))
                .help("Y coordinate of image center point"),
        )
        .arg(
            Arg::with_name(SCALE)
                .short("s")
                .long(SCALE)
                .takes_value(true)
                .default_value("4")
                .validator(|s| validate::<f64>(&s, "Could not parse scale"))
                .help("Scale of the image in Mandelbrot coordinates (X-axis)"),
        )
        .arg(
            Arg::with_name(WIDTH)
                .short("W")
                .long(WIDTH)
                .takes_value(true)
                .default_value("1000")
                .validator(|s| validate_range(&s, 1, JPEG_MAX_SIDE, "Could not parse width"))
                .help("Width of the image in pixels"),
        )
        .arg(
            Arg::with_name(HEIGHT)
                .short("H")
                .long(HEIGHT)
                .takes_value(true)
                .default_value("1000")
                .validator(|s| validate_range(&s, 1, JPEG_MAX_SIDE, "Could not parse height"))
                .help("Height of the image in pixels"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .short("m")
                .long(ITERATIONS)
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_range(&s, 1u32, u32::max_value(), "Could not parse iteration count")
                })
                .help("The maximum number of iterations per point"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .short("o")
                .long(OUTPUT)
                .takes_value(true)
                .default_value("mandel.jpg")
                .help("Output file; .jpg, .png or .ppm"),
        )
        .arg(
            Arg::with_name(THREADS)
                .short("t")
                .long(THREADS)
                .takes_value(true)
                .default_value("1")
                .validator(|s| validate::<i64>(&s, "Could not parse thread count"))
                .help("Number of threads to use; clamped to 1..20"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .long(PALETTE)
                .takes_value(true)
                .default_value("linear")
                .validator(|s| s.parse::<Palette>().map(|_| ()))
                .help("Color palette: linear or gray"),
        )
        .get_matches()
}

fn config(matches: &ArgMatches) -> RenderConfig {
    let requested = value_t_or_exit!(matches, THREADS, i64);
    let threads = clamp_threads(requested);
    if threads as i64 != requested {
        debug!("thread count {} clamped to {}", requested, threads);
    }
    RenderConfig {
        center: Complex::new(
            value_t_or_exit!(matches, XCENTER, f64),
            value_t_or_exit!(matches, YCENTER, f64),
        ),
        scale: value_t_or_exit!(matches, SCALE, f64),
        width: value_t_or_exit!(matches, WIDTH, usize),
        height: value_t_or_exit!(matches, HEIGHT, usize),
        max_iterations: value_t_or_exit!(matches, ITERATIONS, u32),
        output: PathBuf::from(matches.value_of(OUTPUT).unwrap_or("mandel.jpg")),
        threads,
        palette: value_t_or_exit!(matches, PALETTE, Palette),
    }
}

fn run(config: &RenderConfig) -> Result<(), Error> {
    println!(
        "mandel: x={:.6} y={:.6} xscale={:.6} yscale={:.6} max={} outfile={}",
        config.center.re,
        config.center.im,
        config.scale,
        config.yscale(),
        config.max_iterations,
        config.output.display()
    );
    let cores = num_cpus::get();
    if config.threads > cores {
        warn!(
            "{} render threads on {} core(s); at most {} are useful",
            config.threads,
            cores,
            cores.min(MAX_THREADS)
        );
    }
    let buffer = render(&config.job())?;
    write_image(&config.output, &buffer)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = args();
    if let Err(e) = run(&config(&matches)) {
        eprintln!("mandel: {}", e);
        std::process::exit(1);
    }
}
