// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Drives a whole movie through the admission controller.

use config::MovieConfig;
use error::Error;
use frames::ZoomSequence;
use launch::Launcher;
use pool::{AdmissionController, Report};

/// Render every frame of `config`, at most `config.max_concurrency` at
/// a time, and wait for all of them.  Frames are submitted in order
/// but may finish in any order.
///
/// If a frame cannot be launched, the frames already running are
/// waited for and then the launch error is returned.  Frames that run
/// and fail do not stop the movie; they show up in the report.
pub fn run_movie<L: Launcher + ?Sized>(
    config: &MovieConfig,
    launcher: &L,
) -> Result<Report, Error> {
    let mut pool = AdmissionController::new(config.max_concurrency)?;
    let zoom = ZoomSequence::from_config(config);
    for frame in zoom.frames(config.frames) {
        info!(
            "Frame {}: scale={} -> {}",
            frame.index,
            frame.scale,
            frame.output.display()
        );
        let render = frame.render_config(&config.render);
        if let Err(e) = pool.submit(launcher, frame, render) {
            error!("{}; waiting for {} running frame(s)", e, pool.active());
            if let Err(drain) = pool.drain() {
                error!("while draining: {}", drain);
            }
            return Err(e);
        }
    }
    let report = pool.drain()?;
    info!(
        "{} of {} frame(s) rendered, at most {} at once",
        report.succeeded(),
        report.completions.len(),
        report.peak
    );
    Ok(report)
}
