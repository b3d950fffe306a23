// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The one error type shared by both engines and both binaries.

use failure::Fail;
use std::io;

/// Everything that can go wrong while rendering a frame or driving a
/// movie.  Failed units of work are *not* errors; those come back as a
/// `launch::Status` in the controller's report.
#[derive(Debug, Fail)]
pub enum Error {
    /// The requested image has no pixels.
    #[fail(display = "image dimensions must be non-zero, got {}x{}", _0, _1)]
    EmptyImage(usize, usize),

    /// An iteration budget of zero leaves nothing to scale colors by.
    #[fail(display = "maximum iterations must be at least 1")]
    NoIterations,

    /// The complex plane's corners are the wrong way around.
    #[fail(display = "{}", _0)]
    InvertedPlane(&'static str),

    /// One of the render workers died; the whole render is void.
    #[fail(display = "a render worker panicked; no image was written")]
    WorkerPanicked,

    /// The output path's extension has no encoder.
    #[fail(display = "unsupported image format: {:?}", _0)]
    UnsupportedFormat(String),

    /// The format cannot describe an image this large.
    #[fail(display = "{} images are at most {} pixels a side, got {}x{}", _0, _1, _2, _3)]
    TooLarge(&'static str, usize, usize, usize),

    /// The admission controller was configured with no slots.
    #[fail(display = "concurrency limit must be at least 1, got {}", _0)]
    NoSlots(i64),

    /// A frame's unit of work could not be started.
    #[fail(display = "failed to launch frame {}: {}", frame, cause)]
    Launch {
        /// Index of the frame that never started.
        frame: usize,
        /// What the operating system had to say about it.
        #[cause]
        cause: io::Error,
    },

    /// Frames may not be submitted once draining has begun.
    #[fail(display = "admission controller is no longer accepting frames")]
    Closed,

    /// Every completion sender hung up while units were still counted
    /// as active.
    #[fail(display = "lost track of {} running frame(s)", _0)]
    Disconnected(usize),

    /// Reading or writing an image failed.
    #[fail(display = "I/O error: {}", _0)]
    Io(#[cause] io::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}
