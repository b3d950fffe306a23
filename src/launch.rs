// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Units of work: one isolated render per movie frame.
//!
//! A `Launcher` starts a unit and hands back something to wait on.
//! Units are given everything they need up front, by value, and give
//! back nothing but a `Status`.  Whether a unit is a thread in this
//! process or a separate `mandel` process is the launcher's business.

use config::RenderConfig;
use error::Error;
use frames::FrameSpec;
use output::write_image;
use render::render;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

/// How a unit of work ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    /// The frame was rendered and written.
    Success,
    /// The frame was not produced; the string says why.
    Failed(String),
}

impl Status {
    /// True for `Status::Success`.
    pub fn is_success(&self) -> bool {
        *self == Status::Success
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Status::Success => write!(f, "ok"),
            Status::Failed(ref why) => write!(f, "failed: {}", why),
        }
    }
}

/// A started unit of work.
pub trait Unit: Send {
    /// Block until the unit is finished.
    fn wait(self: Box<Self>) -> Status;
}

/// Something that can start units of work.
pub trait Launcher {
    /// Start rendering `frame` with `config`.  An `Err` here means the
    /// unit never started at all; a unit that starts and then fails
    /// reports that through `Unit::wait`.
    fn launch(&self, frame: &FrameSpec, config: RenderConfig) -> Result<Box<dyn Unit>, Error>;
}

/// Renders each frame on its own thread inside this process.  Each
/// unit owns its copy of the configuration and its own buffer.
#[derive(Copy, Clone, Debug, Default)]
pub struct ThreadLauncher;

struct InProcess {
    config: RenderConfig,
}

impl Unit for InProcess {
    fn wait(self: Box<Self>) -> Status {
        let written = render(&self.config.job())
            .and_then(|buffer| write_image(&self.config.output, &buffer));
        match written {
            Ok(()) => Status::Success,
            Err(e) => Status::Failed(e.to_string()),
        }
    }
}

impl Launcher for ThreadLauncher {
    fn launch(&self, _frame: &FrameSpec, config: RenderConfig) -> Result<Box<dyn Unit>, Error> {
        Ok(Box::new(InProcess { config }))
    }
}

/// Runs the `mandel` binary once per frame, each in a process of its
/// own.
#[derive(Clone, Debug)]
pub struct ProcessLauncher {
    program: PathBuf,
    quiet: bool,
}

impl ProcessLauncher {
    /// Launch `program` for every frame.
    pub fn new<P: AsRef<Path>>(program: P) -> ProcessLauncher {
        ProcessLauncher {
            program: program.as_ref().to_path_buf(),
            quiet: false,
        }
    }

    /// The `mandel` binary installed next to the running executable.
    pub fn sibling() -> Result<ProcessLauncher, Error> {
        let exe = std::env::current_exe()?;
        let name = format!("mandel{}", std::env::consts::EXE_SUFFIX);
        let program = match exe.parent() {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        };
        Ok(ProcessLauncher::new(program))
    }

    /// Discard the children's standard output.
    pub fn quiet(mut self, quiet: bool) -> ProcessLauncher {
        self.quiet = quiet;
        self
    }

    /// The program being launched.
    pub fn program(&self) -> &Path {
        &self.program
    }
}

struct ChildProcess(Child);

impl Unit for ChildProcess {
    fn wait(self: Box<Self>) -> Status {
        let mut child = self.0;
        match child.wait() {
            Ok(status) if status.success() => Status::Success,
            Ok(status) => Status::Failed(format!("mandel exited with {}", status)),
            Err(e) => Status::Failed(format!("lost track of mandel: {}", e)),
        }
    }
}

impl Launcher for ProcessLauncher {
    fn launch(&self, frame: &FrameSpec, config: RenderConfig) -> Result<Box<dyn Unit>, Error> {
        let mut command = Command::new(&self.program);
        command.args(config.to_args()).stdin(Stdio::null());
        if self.quiet {
            command.stdout(Stdio::null());
        }
        let child = command.spawn().map_err(|cause| Error::Launch {
            frame: frame.index,
            cause,
        })?;
        debug!("frame {} is pid {}", frame.index, child.id());
        Ok(Box::new(ChildProcess(child)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frames::ZoomSequence;
    use tempfile::tempdir;

    fn frame(dir: &Path, extension: &str) -> (FrameSpec, RenderConfig) {
        let zoom = ZoomSequence {
            base_scale: 4.0,
            zoom_factor: 0.5,
            prefix: dir.join("f").to_string_lossy().into_owned(),
            extension: extension.to_string(),
        };
        let frame = zoom.frame(1);
        let template = RenderConfig {
            width: 16,
            height: 12,
            max_iterations: 50,
            ..RenderConfig::default()
        };
        let config = frame.render_config(&template);
        (frame, config)
    }

    #[test]
    fn thread_units_write_their_frame() {
        let dir = tempdir().unwrap();
        let (frame, config) = frame(dir.path(), "ppm");
        let unit = ThreadLauncher.launch(&frame, config).unwrap();
        assert_eq!(unit.wait(), Status::Success);
        assert!(dir.path().join("f1.ppm").exists());
    }

    #[test]
    fn thread_units_report_failure() {
        let dir = tempdir().unwrap();
        let (frame, config) = frame(dir.path(), "gif");
        let status = ThreadLauncher.launch(&frame, config).unwrap().wait();
        assert!(!status.is_success());
        assert!(status.to_string().contains("gif"));
    }

    #[test]
    fn missing_programs_fail_to_launch() {
        let dir = tempdir().unwrap();
        let (frame, config) = frame(dir.path(), "jpg");
        let launcher = ProcessLauncher::new(dir.path().join("no-such-mandel"));
        match launcher.launch(&frame, config) {
            Err(Error::Launch { frame: 1, .. }) => (),
            Err(e) => panic!("unexpected error {}", e),
            Ok(_) => panic!("launched a program that does not exist"),
        }
    }
}
