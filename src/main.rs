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

use clap::{App, AppSettings, Arg, ArgMatches};
use mandelmovie::output::JPEG_MAX_SIDE;
use mandelmovie::partition::clamp_threads;
use mandelmovie::{
    run_movie, Error, Launcher, MovieConfig, Palette, ProcessLauncher, RenderConfig, Report,
    ThreadLauncher,
};
use num::Complex;
use std::fmt::Display;
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
    err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) if i >= low && i <= high => Ok(()),
        Ok(_) => Err(format!("Must be between {} and {}", low, high)),
        Err(_) => Err(err.to_string()),
    }
}

const PROCESSES: &str = "processes";
const FRAMES: &str = "frames";
const XCENTER: &str = "xcenter";
const YCENTER: &str = "ycenter";
const SCALE: &str = "scale";
const ZOOM: &str = "zoom";
const PREFIX: &str = "prefix";
const EXTENSION: &str = "extension";
const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const ITERATIONS: &str = "max";
const THREADS: &str = "threads";
const PALETTE: &str = "palette";
const IN_PROCESS: &str = "in-process";
const MANDEL: &str = "mandel";
const QUIET: &str = "quiet";

fn valued<'a, 'b>(name: &'a str, short: &str, default: &'a str, help: &'b str) -> Arg<'a, 'b> {
    Arg::with_name(name)
        .short(short)
        .long(name)
        .takes_value(true)
        .default_value(default)
        .help(help)
}

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandelmovie")
        .version(crate_version!())
        .about("Renders a Mandelbrot zoom as a numbered series of images")
        .setting(AppSettings::AllowNegativeNumbers)
        .after_help(
            "Example:\n    \
             mandelmovie -p 4 -f 20 -x -0.7 -y 0.0 -s 3.0 -z 0.8 -o mandelZoom\n\n\
             The frames can be stitched together with\n    \
             ffmpeg -framerate 24 -i mandelZoom%d.jpg -pix_fmt yuv420p mandel.mp4",
        )
        .arg(
            valued(PROCESSES, "p", "1", "Number of frames rendering simultaneously")
                .validator(|s| validate::<i64>(&s, "Could not parse process count")),
        )
        .arg(
            valued(FRAMES, "f", "10", "Total number of frames to generate")
                .validator(|s| validate::<i64>(&s, "Could not parse frame count")),
        )
        .arg(
            valued(XCENTER, "x", "0.0", "X coordinate of image center")
                .validator(|s| validate::<f64>(&s, "Could not parse x coordinate")),
        )
        .arg(
            valued(YCENTER, "y", "0.0", "Y coordinate of image center")
                .validator(|s| validate::<f64>(&s, "Could not parse y coordinate")),
        )
        .arg(
            valued(SCALE, "s", "4.0", "Starting scale, the width of frame 0")
                .validator(|s| validate::<f64>(&s, "Could not parse scale")),
        )
        .arg(
            valued(ZOOM, "z", "0.9", "Zoom multiplier per frame")
                .validator(|s| validate::<f64>(&s, "Could not parse zoom factor")),
        )
        .arg(valued(PREFIX, "o", "mandel", "Output filename prefix"))
        .arg(valued(EXTENSION, "e", "jpg", "Output format: jpg, png or ppm"))
        .arg(
            valued(WIDTH, "W", "1000", "Width of each frame in pixels")
                .validator(|s| validate_range(&s, 1, JPEG_MAX_SIDE, "Could not parse width")),
        )
        .arg(
            valued(HEIGHT, "H", "1000", "Height of each frame in pixels")
                .validator(|s| validate_range(&s, 1, JPEG_MAX_SIDE, "Could not parse height")),
        )
        .arg(
            valued(ITERATIONS, "m", "1000", "Maximum iterations per point")
                .validator(|s| validate::<u32>(&s, "Could not parse iteration count")),
        )
        .arg(
            valued(THREADS, "t", "1", "Render threads per frame; clamped to 1..20")
                .validator(|s| validate::<i64>(&s, "Could not parse thread count")),
        )
        .arg(
            Arg::with_name(PALETTE)
                .long(PALETTE)
                .takes_value(true)
                .default_value("linear")
                .validator(|s| s.parse::<Palette>().map(|_| ()))
                .help("Color palette: linear or gray"),
        )
        .arg(
            Arg::with_name(IN_PROCESS)
                .long(IN_PROCESS)
                .help("Render frames on threads in this process instead of running mandel"),
        )
        .arg(
            Arg::with_name(MANDEL)
                .long(MANDEL)
                .takes_value(true)
                .conflicts_with(IN_PROCESS)
                .help("Path to the mandel binary (default: next to this one)"),
        )
        .arg(
            Arg::with_name(QUIET)
                .short("q")
                .long(QUIET)
                .help("Silence the mandel processes' own output"),
        )
        .get_matches()
}

fn config(matches: &ArgMatches) -> Result<MovieConfig, Error> {
    let processes = value_t_or_exit!(matches, PROCESSES, i64);
    if processes <= 0 {
        return Err(Error::NoSlots(processes));
    }
    let frames = value_t_or_exit!(matches, FRAMES, i64);
    if frames <= 0 {
        info!("{} frames requested; nothing to do", frames);
    }
    let defaults = MovieConfig::default();
    Ok(MovieConfig {
        max_concurrency: processes as usize,
        frames: frames.max(0) as usize,
        base_scale: value_t_or_exit!(matches, SCALE, f64),
        zoom_factor: value_t_or_exit!(matches, ZOOM, f64),
        prefix: matches
            .value_of(PREFIX)
            .map(str::to_string)
            .unwrap_or(defaults.prefix),
        extension: matches
            .value_of(EXTENSION)
            .map(str::to_string)
            .unwrap_or(defaults.extension),
        render: RenderConfig {
            center: Complex::new(
                value_t_or_exit!(matches, XCENTER, f64),
                value_t_or_exit!(matches, YCENTER, f64),
            ),
            width: value_t_or_exit!(matches, WIDTH, usize),
            height: value_t_or_exit!(matches, HEIGHT, usize),
            max_iterations: value_t_or_exit!(matches, ITERATIONS, u32),
            threads: clamp_threads(value_t_or_exit!(matches, THREADS, i64)),
            palette: value_t_or_exit!(matches, PALETTE, Palette),
            ..defaults.render
        },
    })
}

fn launcher(matches: &ArgMatches) -> Result<Box<dyn Launcher>, Error> {
    if matches.is_present(IN_PROCESS) {
        return Ok(Box::new(ThreadLauncher));
    }
    let launcher = match matches.value_of(MANDEL) {
        Some(path) => ProcessLauncher::new(path),
        None => ProcessLauncher::sibling()?,
    };
    debug!("frames will be rendered by {}", launcher.program().display());
    Ok(Box::new(launcher.quiet(matches.is_present(QUIET))))
}

fn run(matches: &ArgMatches) -> Result<Report, Error> {
    let config = config(matches)?;
    println!(
        "Running mandelmovie with {} concurrent frame(s) and {} frame(s)",
        config.max_concurrency, config.frames
    );
    let launcher = launcher(matches)?;
    run_movie(&config, &*launcher)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = args();
    match run(&matches) {
        Err(e) => {
            eprintln!("mandelmovie: {}", e);
            std::process::exit(1);
        }
        Ok(report) => {
            let failures = report.failures();
            if failures.is_empty() {
                println!("All frames generated.");
            } else {
                for failure in &failures {
                    warn!(
                        "frame {} ({}) {}",
                        failure.frame.index,
                        failure.frame.output.display(),
                        failure.status
                    );
                }
                println!(
                    "{} of {} frames generated; {} failed.",
                    report.succeeded(),
                    report.completions.len(),
                    failures.len()
                );
            }
        }
    }
}
