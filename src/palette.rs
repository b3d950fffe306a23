// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Iteration counts to packed `0xRRGGBB` colors.

use std::fmt;
use std::str::FromStr;

/// The brightest color any palette produces.
pub const WHITE: u32 = 0x00FF_FFFF;

/// How an iteration count becomes a color.  Every palette is
/// non-decreasing in the iteration count, maps zero iterations to
/// black and a point that never escaped to white.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Palette {
    /// Scale the whole 24-bit packed value linearly, as the classic
    /// `mandel` program does.  This is not a grayscale: adjacent counts
    /// land in different color channels, which gives the familiar
    /// blue-green banding.  Use `Gray` for a gray ramp.
    Linear,
    /// Scale a single 8-bit intensity and copy it into all three
    /// channels.
    Gray,
}

impl Default for Palette {
    fn default() -> Palette {
        Palette::Linear
    }
}

impl Palette {
    /// Map `iters` out of `max` to a packed color.  Counts above `max`
    /// are treated as `max`; a `max` of zero is black.
    pub fn color_for(self, iters: u32, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        let iters = u64::from(iters.min(max));
        let max = u64::from(max);
        match self {
            Palette::Linear => (u64::from(WHITE) * iters / max) as u32,
            Palette::Gray => {
                let v = (255 * iters / max) as u32;
                (v << 16) | (v << 8) | v
            }
        }
    }
}

impl FromStr for Palette {
    type Err = String;

    fn from_str(s: &str) -> Result<Palette, String> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(Palette::Linear),
            "gray" | "grey" => Ok(Palette::Gray),
            other => Err(format!("Unknown palette {:?}; expected linear or gray", other)),
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Palette::Linear => write!(f, "linear"),
            Palette::Gray => write!(f, "gray"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_black_and_white() {
        for palette in &[Palette::Linear, Palette::Gray] {
            for max in &[1, 255, 1000, u32::max_value()] {
                assert_eq!(palette.color_for(0, *max), 0);
                assert_eq!(palette.color_for(*max, *max), WHITE);
            }
        }
    }

    #[test]
    fn colors_never_decrease() {
        for palette in &[Palette::Linear, Palette::Gray] {
            let max = 1000;
            let mut last = 0;
            for iters in 0..=max {
                let color = palette.color_for(iters, max);
                assert!(color >= last, "{} dropped at {}", palette, iters);
                last = color;
            }
        }
    }

    #[test]
    fn huge_budgets_do_not_overflow() {
        let max = u32::max_value();
        let half = Palette::Linear.color_for(max / 2, max);
        assert!(half > 0x007F_0000 && half < 0x0080_0000);
    }

    #[test]
    fn parses_names() {
        assert_eq!("gray".parse::<Palette>(), Ok(Palette::Gray));
        assert_eq!("Linear".parse::<Palette>(), Ok(Palette::Linear));
        assert!("plaid".parse::<Palette>().is_err());
        assert_eq!(Palette::Gray.to_string().parse::<Palette>(), Ok(Palette::Gray));
    }

    #[test]
    fn linear_spreads_across_channels() {
        assert_eq!(Palette::Linear.color_for(1, 2), 0x7F_FFFF);
        assert_eq!(Palette::Gray.color_for(1, 2), 0x7F_7F7F);
        assert_eq!(Palette::default(), Palette::Linear);
    }
}
