// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Settings for one render and for a whole movie, with the defaults
//! both command-line tools start from.

use num::Complex;
use palette::Palette;
use partition::{MAX_THREADS, MIN_THREADS};
use planes::Bounds;
use render::RenderJob;
use std::path::PathBuf;

/// What the `mandel` tool renders when given no options.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Center of the image on the complex plane.
    pub center: Complex<f64>,
    /// Width of the image on the real axis; the height follows from
    /// the pixel aspect ratio.
    pub scale: f64,
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Iteration budget per pixel.
    pub max_iterations: u32,
    /// Where the image goes.
    pub output: PathBuf,
    /// Render workers, already clamped to `1..=20`.
    pub threads: usize,
    /// Color scheme.
    pub palette: Palette,
}

impl Default for RenderConfig {
    fn default() -> RenderConfig {
        RenderConfig {
            center: Complex::new(0.0, 0.0),
            scale: 4.0,
            width: 1000,
            height: 1000,
            max_iterations: 1000,
            output: PathBuf::from("mandel.jpg"),
            threads: 1,
            palette: Palette::Linear,
        }
    }
}

impl RenderConfig {
    /// Height of the image on the imaginary axis.
    pub fn yscale(&self) -> f64 {
        self.scale / (self.width as f64) * (self.height as f64)
    }

    /// The render job this configuration describes.
    pub fn job(&self) -> RenderJob {
        RenderJob {
            width: self.width,
            height: self.height,
            bounds: Bounds::centered(self.center, self.scale, self.width, self.height),
            max_iterations: self.max_iterations,
            threads: self.threads.max(MIN_THREADS).min(MAX_THREADS),
            palette: self.palette,
        }
    }

    /// The `mandel` command line that reproduces this configuration.
    /// Floats use Rust's shortest round-trip formatting, so nothing is
    /// lost crossing a process boundary.
    pub fn to_args(&self) -> Vec<String> {
        vec![
            "-x".to_string(),
            self.center.re.to_string(),
            "-y".to_string(),
            self.center.im.to_string(),
            "-s".to_string(),
            self.scale.to_string(),
            "-W".to_string(),
            self.width.to_string(),
            "-H".to_string(),
            self.height.to_string(),
            "-m".to_string(),
            self.max_iterations.to_string(),
            "-t".to_string(),
            self.threads.to_string(),
            "--palette".to_string(),
            self.palette.to_string(),
            "-o".to_string(),
            self.output.to_string_lossy().into_owned(),
        ]
    }
}

/// What the `mandelmovie` tool does when given no options.
#[derive(Clone, Debug, PartialEq)]
pub struct MovieConfig {
    /// Most frames rendering at any one time.
    pub max_concurrency: usize,
    /// How many frames to render.
    pub frames: usize,
    /// Scale of frame zero.
    pub base_scale: f64,
    /// Each frame's scale is the previous one's times this.
    pub zoom_factor: f64,
    /// Frame `i` is written to `<prefix><i>.<extension>`.
    pub prefix: String,
    /// Image format extension, without the dot.
    pub extension: String,
    /// Everything else about a frame: center, size, iterations,
    /// threads and palette.  Its scale and output are replaced per
    /// frame.
    pub render: RenderConfig,
}

impl Default for MovieConfig {
    fn default() -> MovieConfig {
        MovieConfig {
            max_concurrency: 1,
            frames: 10,
            base_scale: 4.0,
            zoom_factor: 0.9,
            prefix: "mandel".to_string(),
            extension: "jpg".to_string(),
            render: RenderConfig::default(),
        }
    }
}
