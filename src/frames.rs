// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The frames of a zoom movie.  Frame `i` is drawn at
//! `base_scale * zoom_factor^i`; nothing is renormalized, so a long
//! enough movie eventually zooms past what an `f64` can resolve.

use config::{MovieConfig, RenderConfig};
use std::ops::Range;
use std::path::PathBuf;

/// One frame of the movie.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSpec {
    /// Position in the movie, counting from zero.
    pub index: usize,
    /// Width of the frame on the real axis.
    pub scale: f64,
    /// Where the frame is written.
    pub output: PathBuf,
}

impl FrameSpec {
    /// The render settings for this frame: the movie's template with
    /// this frame's scale and output filled in.
    pub fn render_config(&self, template: &RenderConfig) -> RenderConfig {
        RenderConfig {
            scale: self.scale,
            output: self.output.clone(),
            ..template.clone()
        }
    }
}

/// Generates `FrameSpec`s for a geometric zoom.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomSequence {
    /// Scale of frame zero.
    pub base_scale: f64,
    /// Per-frame scale multiplier.
    pub zoom_factor: f64,
    /// Output file prefix.
    pub prefix: String,
    /// Output file extension, without the dot.
    pub extension: String,
}

impl ZoomSequence {
    /// The sequence a movie configuration describes.
    pub fn from_config(config: &MovieConfig) -> ZoomSequence {
        ZoomSequence {
            base_scale: config.base_scale,
            zoom_factor: config.zoom_factor,
            prefix: config.prefix.clone(),
            extension: config.extension.clone(),
        }
    }

    /// Scale of frame `index`.
    pub fn scale(&self, index: usize) -> f64 {
        self.base_scale * self.zoom_factor.powf(index as f64)
    }

    /// Frame `index`, for any `index`.
    pub fn frame(&self, index: usize) -> FrameSpec {
        FrameSpec {
            index,
            scale: self.scale(index),
            output: PathBuf::from(format!("{}{}.{}", self.prefix, index, self.extension)),
        }
    }

    /// The first `count` frames, in order.
    pub fn frames(&self, count: usize) -> Frames {
        Frames {
            sequence: self,
            indices: 0..count,
        }
    }
}

/// Iterator over the frames of a `ZoomSequence`.
pub struct Frames<'a> {
    sequence: &'a ZoomSequence,
    indices: Range<usize>,
}

impl<'a> Iterator for Frames<'a> {
    type Item = FrameSpec;

    fn next(&mut self) -> Option<FrameSpec> {
        self.indices.next().map(|i| self.sequence.frame(i))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zoom() -> ZoomSequence {
        ZoomSequence {
            base_scale: 4.0,
            zoom_factor: 0.9,
            prefix: "frame".to_string(),
            extension: "jpg".to_string(),
        }
    }

    #[test]
    fn scales_decay_geometrically() {
        let zoom = zoom();
        let mut expected = 4.0;
        for frame in zoom.frames(50) {
            assert!(
                (frame.scale - expected).abs() <= 1e-12 * expected,
                "frame {}: {} vs {}",
                frame.index,
                frame.scale,
                expected
            );
            expected *= 0.9;
        }
        assert_eq!(zoom.scale(0), 4.0);
    }

    #[test]
    fn names_follow_the_prefix() {
        let names: Vec<PathBuf> = zoom().frames(3).map(|f| f.output).collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("frame0.jpg"),
                PathBuf::from("frame1.jpg"),
                PathBuf::from("frame2.jpg"),
            ]
        );
        assert_eq!(zoom().frame(123).output, PathBuf::from("frame123.jpg"));
    }

    #[test]
    fn no_frames_is_empty() {
        assert_eq!(zoom().frames(0).count(), 0);
    }

    #[test]
    fn render_config_takes_scale_and_output() {
        let template = RenderConfig {
            width: 32,
            ..RenderConfig::default()
        };
        let config = zoom().frame(2).render_config(&template);
        assert_eq!(config.width, 32);
        assert_eq!(config.output, PathBuf::from("frame2.jpg"));
        assert!((config.scale - 3.24).abs() < 1e-12);
    }
}
