#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer and zoom-movie driver
//!
//! There are two engines in here.  The first renders a single
//! Mandelbrot image: the rows of the image are cut into contiguous
//! bands, one per worker thread, and each worker owns its band of the
//! pixel buffer outright.  No locks are involved; the borrow checker
//! sees to it that no two workers can ever touch the same row.
//!
//! The second engine renders a zoom movie: a sequence of frames, each
//! one a full render at a geometrically shrinking scale, run as
//! isolated units of work under an admission controller that never
//! lets more than a fixed number of them run at once.

extern crate crossbeam;
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
#[cfg(test)]
extern crate tempfile;

pub mod buffer;
pub mod config;
pub mod driver;
pub mod error;
pub mod escape;
pub mod frames;
pub mod launch;
pub mod output;
pub mod palette;
pub mod partition;
pub mod planes;
pub mod pool;
pub mod render;

pub use config::{MovieConfig, RenderConfig};
pub use driver::run_movie;
pub use error::Error;
pub use frames::{FrameSpec, ZoomSequence};
pub use launch::{Launcher, ProcessLauncher, Status, ThreadLauncher};
pub use palette::Palette;
pub use pool::{AdmissionController, PoolState, Report};
pub use render::{render, RenderJob};
