// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The row-partitioned render engine.
//!
//! `render` allocates a buffer, splits it into one band per worker,
//! and hands each band to a scoped thread.  The scope is the join
//! barrier: when it returns, every band has been written and the
//! buffer belongs to the caller again.  If any worker panics the
//! render as a whole fails and the half-painted buffer is dropped.

use buffer::{PixelBuffer, RowBand};
use crossbeam;
use error::Error;
use escape::iterations_at;
use itertools::iproduct;
use palette::Palette;
use planes::{Bounds, Pixel, PlaneMapper};

/// Everything that determines a rendered image.  Rendering the same
/// job twice, with any thread count, yields identical pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderJob {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// The region of the complex plane to draw.
    pub bounds: Bounds,
    /// Iteration budget per pixel.
    pub max_iterations: u32,
    /// Number of render workers; clamped to `1..=20` when used.
    pub threads: usize,
    /// How iteration counts become colors.
    pub palette: Palette,
}

/// Paint every pixel of one band.  This is all a worker does.
pub fn render_band(job: &RenderJob, plane: &PlaneMapper, band: &mut RowBand) {
    let range = band.range();
    let width = band.width();
    for (row, column) in iproduct!(range.rows(), 0..width) {
        let point = plane.pixel_to_point(&Pixel(column, row));
        let iterations = iterations_at(point, job.max_iterations);
        band.set_pixel(
            column,
            row,
            job.palette.color_for(iterations, job.max_iterations),
        );
    }
}

/// Render a whole image, one scoped worker thread per band.
pub fn render(job: &RenderJob) -> Result<PixelBuffer, Error> {
    if job.max_iterations == 0 {
        return Err(Error::NoIterations);
    }
    let plane = PlaneMapper::new(job.width, job.height, job.bounds)?;

    let mut buffer = PixelBuffer::new(job.width, job.height);
    {
        let bands = buffer.bands_mut(job.threads);
        debug!(
            "rendering {}x{} with {} worker(s)",
            job.width,
            job.height,
            bands.len()
        );
        let plane = &plane;
        crossbeam::scope(|spawner| {
            for (worker, mut band) in bands.into_iter().enumerate() {
                debug!("worker {} takes rows {:?}", worker, band.range().rows());
                spawner.spawn(move |_| render_band(job, plane, &mut band));
            }
        })
        .map_err(|_| Error::WorkerPanicked)?;
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(threads: usize) -> RenderJob {
        RenderJob {
            width: 64,
            height: 48,
            bounds: Bounds {
                xmin: -2.0,
                xmax: 1.0,
                ymin: -1.125,
                ymax: 1.125,
            },
            max_iterations: 200,
            threads,
            palette: Palette::Linear,
        }
    }

    #[test]
    fn single_thread_matches_many() {
        let reference = render(&job(1)).unwrap();
        for threads in &[2, 3, 7, 20, 64] {
            assert_eq!(render(&job(*threads)).unwrap(), reference);
        }
    }

    #[test]
    fn interior_is_white_and_exterior_is_not() {
        let buffer = render(&job(4)).unwrap();
        // Column 43 is x = 0.015625, row 24 is y = 0: inside the main cardioid.
        assert_eq!(buffer.pixel(43, 24), 0xFF_FFFF);
        // The top-left corner, -2 - 1.125i, escapes at once.
        assert_eq!(buffer.pixel(0, 0), 0);
    }

    #[test]
    fn rejects_zero_iterations() {
        let mut j = job(1);
        j.max_iterations = 0;
        match render(&j) {
            Err(Error::NoIterations) => (),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rejects_empty_images() {
        let mut j = job(1);
        j.height = 0;
        match render(&j) {
            Err(Error::EmptyImage(64, 0)) => (),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn one_row_per_worker_or_fewer() {
        let mut j = job(20);
        j.height = 5;
        let many = render(&j).unwrap();
        j.threads = 1;
        assert_eq!(render(&j).unwrap(), many);
    }
}
