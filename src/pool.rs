// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The admission controller: a pool of at most `limit` running units
//! of work.
//!
//! Every unit is waited on by its own thread, which exists before the
//! unit is launched, and which sends a `Completion` down a channel the
//! controller owns once the unit finishes.  Only the
//! controller touches the active count, and only from the thread that
//! owns it, so the bookkeeping is serialized by construction.  Units
//! are reaped in whatever order they finish.

use config::RenderConfig;
use crossbeam::channel::{bounded, unbounded, Receiver, SendError, Sender};
use error::Error;
use frames::FrameSpec;
use launch::{Launcher, Status, Unit};
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

/// Where the controller is in its life.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PoolState {
    /// Nothing submitted yet.
    Idle,
    /// Accepting frames.
    Admitting,
    /// No more frames; waiting for the stragglers.
    Draining,
    /// Everything finished.  Terminal.
    Done,
}

/// A unit of work that has finished, for better or worse.
#[derive(Clone, Debug, PartialEq)]
pub struct Completion {
    /// The frame the unit was rendering.
    pub frame: FrameSpec,
    /// How it ended.
    pub status: Status,
}

/// Everything that finished, in the order it finished.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    /// One entry per submitted frame.
    pub completions: Vec<Completion>,
    /// The most units that were ever running at once.
    pub peak: usize,
}

impl Report {
    /// How many frames were produced.
    pub fn succeeded(&self) -> usize {
        self.completions
            .iter()
            .filter(|c| c.status.is_success())
            .count()
    }

    /// The frames that were not.
    pub fn failures(&self) -> Vec<&Completion> {
        self.completions
            .iter()
            .filter(|c| !c.status.is_success())
            .collect()
    }
}

/// Bounds the number of concurrently running units of work.
pub struct AdmissionController {
    limit: usize,
    active: usize,
    peak: usize,
    state: PoolState,
    // Dropped once draining starts, so the channel closes when the last
    // waiter is gone.
    sender: Option<Sender<Completion>>,
    receiver: Receiver<Completion>,
    completions: Vec<Completion>,
}

impl AdmissionController {
    /// A controller allowing `limit` units at once.  A limit of zero
    /// could never admit anything, so it is refused.
    pub fn new(limit: usize) -> Result<AdmissionController, Error> {
        if limit == 0 {
            return Err(Error::NoSlots(0));
        }
        let (sender, receiver) = unbounded();
        Ok(AdmissionController {
            limit,
            active: 0,
            peak: 0,
            state: PoolState::Idle,
            sender: Some(sender),
            receiver,
            completions: vec![],
        })
    }

    /// The most units allowed at once.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Units currently running.  Never more than `limit()`.
    pub fn active(&self) -> usize {
        self.active
    }

    /// The most units that have been running at once so far.
    pub fn peak(&self) -> usize {
        self.peak
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PoolState {
        self.state
    }

    /// Start `frame`, first waiting for a free slot if the pool is
    /// full.  Fails if the unit cannot be started, or if draining has
    /// already begun.
    pub fn submit<L: Launcher + ?Sized>(
        &mut self,
        launcher: &L,
        frame: FrameSpec,
        config: RenderConfig,
    ) -> Result<(), Error> {
        match self.state {
            PoolState::Draining | PoolState::Done => return Err(Error::Closed),
            PoolState::Idle => self.state = PoolState::Admitting,
            PoolState::Admitting => (),
        }

        while self.active >= self.limit {
            self.reap()?;
        }

        let sender = match self.sender {
            Some(ref sender) => sender.clone(),
            None => return Err(Error::Closed),
        };
        let index = frame.index;
        let (handoff, pickup) = bounded::<Box<dyn Unit>>(1);
        let waiting_for = frame.clone();
        thread::Builder::new()
            .name(format!("frame-{}", index))
            .spawn(move || {
                // A closed handoff means the launch failed; nothing to wait for.
                if let Ok(unit) = pickup.recv() {
                    let status = panic::catch_unwind(AssertUnwindSafe(|| unit.wait()))
                        .unwrap_or_else(|_| Status::Failed("unit of work panicked".to_string()));
                    let _ = sender.send(Completion {
                        frame: waiting_for,
                        status,
                    });
                }
            })
            .map_err(|cause| Error::Launch {
                frame: index,
                cause,
            })?;

        let unit = launcher.launch(&frame, config)?;
        if let Err(SendError(unit)) = handoff.send(unit) {
            // The waiter is gone, so finish the unit here rather than
            // leave it running unaccounted for.
            warn!("frame {} lost its waiter; waiting inline", index);
            let status = unit.wait();
            self.record(Completion { frame, status });
            return Ok(());
        }

        self.active += 1;
        if self.active > self.peak {
            self.peak = self.active;
        }
        debug!("launched frame {} ({} of {} slots busy)", index, self.active, self.limit);
        Ok(())
    }

    /// Wait for whichever unit finishes next and free its slot.
    fn reap(&mut self) -> Result<(), Error> {
        let completion = self
            .receiver
            .recv()
            .map_err(|_| Error::Disconnected(self.active))?;
        self.active -= 1;
        self.record(completion);
        Ok(())
    }

    fn record(&mut self, completion: Completion) {
        match completion.status {
            Status::Success => debug!(
                "frame {} finished ({} still running)",
                completion.frame.index, self.active
            ),
            Status::Failed(ref why) => warn!("frame {} failed: {}", completion.frame.index, why),
        }
        self.completions.push(completion);
    }

    /// Stop admitting, wait for every running unit, and report how
    /// each one ended.  Afterwards the controller is `Done` and refuses
    /// further frames.
    pub fn drain(&mut self) -> Result<Report, Error> {
        self.state = PoolState::Draining;
        self.sender = None;
        while self.active > 0 {
            self.reap()?;
        }
        self.state = PoolState::Done;
        Ok(Report {
            completions: mem::replace(&mut self.completions, vec![]),
            peak: self.peak,
        })
    }
}
