// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane bounded by `xmin..xmax` along
//! the real axis and `ymin..ymax` along the imaginary one.
use error::Error;
use num::Complex;

/// Describes the x, y of a pixel in the image.  Column first, then row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// The region of the complex plane an image covers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    /// Leftmost real value; column zero.
    pub xmin: f64,
    /// Rightmost real value; one past the last column.
    pub xmax: f64,
    /// Imaginary value of row zero.
    pub ymin: f64,
    /// Imaginary value one past the last row.
    pub ymax: f64,
}

impl Bounds {
    /// A region `xscale` wide centered on `center`, with its height
    /// chosen so that pixels come out square for a `width` by `height`
    /// image.
    pub fn centered(center: Complex<f64>, xscale: f64, width: usize, height: usize) -> Bounds {
        let yscale = xscale / (width as f64) * (height as f64);
        Bounds {
            xmin: center.re - xscale / 2.0,
            xmax: center.re + xscale / 2.0,
            ymin: center.im - yscale / 2.0,
            ymax: center.im + yscale / 2.0,
        }
    }
}

/// Contains the definitions of two planes: an integral cartesian plane,
/// and a complex cartesian plane.  Maps pixels in the one to points
/// in the other.
#[derive(Debug)]
pub struct PlaneMapper {
    /// Width and height of the integral plane.
    pub size: (usize, usize),
    /// The complex region the integral plane covers.
    pub bounds: Bounds,
    // How far along each complex axis one pixel moves.
    step: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the integral plane and the
    /// region of the complex plane it should cover.
    pub fn new(width: usize, height: usize, bounds: Bounds) -> Result<PlaneMapper, Error> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage(width, height));
        }

        if bounds.xmax < bounds.xmin {
            return Err(Error::InvertedPlane(
                "The left edge of the plane is not to the left of the right edge.",
            ));
        }

        if bounds.ymax < bounds.ymin {
            return Err(Error::InvertedPlane(
                "The top edge of the plane is not above the bottom edge.",
            ));
        }

        Ok(PlaneMapper {
            size: (width, height),
            bounds,
            step: (
                (bounds.xmax - bounds.xmin) / (width as f64),
                (bounds.ymax - bounds.ymin) / (height as f64),
            ),
        })
    }

    /// The total number of points in the integral grid.
    pub fn len(&self) -> usize {
        self.size.0 * self.size.1
    }

    /// Describes whether the integral plane has no area.  Never true for
    /// a mapper built by `new`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Given a pixel on the integral cartesian plane, map that to the
    /// point on the complex cartesian plane at its upper-left corner.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.bounds.xmin + (pixel.0 as f64) * self.step.0,
            self.bounds.ymin + (pixel.1 as f64) * self.step.1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(lo: f64, hi: f64) -> Bounds {
        Bounds {
            xmin: lo,
            xmax: hi,
            ymin: lo,
            ymax: hi,
        }
    }

    #[test]
    fn planemapper_fails_on_bad_shape() {
        let flipped = Bounds {
            xmin: 1.0,
            xmax: -1.0,
            ymin: -1.0,
            ymax: 1.0,
        };
        assert!(PlaneMapper::new(4, 4, flipped).is_err());
        let upside_down = Bounds {
            xmin: -1.0,
            xmax: 1.0,
            ymin: 1.0,
            ymax: -1.0,
        };
        assert!(PlaneMapper::new(4, 4, upside_down).is_err());
    }

    #[test]
    fn planemapper_fails_on_empty_image() {
        assert!(PlaneMapper::new(0, 4, square(-1.0, 1.0)).is_err());
        assert!(PlaneMapper::new(4, 0, square(-1.0, 1.0)).is_err());
    }

    #[test]
    fn planemapper_passes_on_good_shape() {
        let pm = PlaneMapper::new(4, 4, square(-1.0, 1.0)).unwrap();
        assert_eq!(pm.len(), 16);
        assert!(!pm.is_empty());
    }

    #[test]
    fn pixel_to_point_on_positive_planes() {
        let pm = PlaneMapper::new(5, 5, square(0.0, 5.0)).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 4)), Complex::new(4.0, 4.0));
    }

    #[test]
    fn pixel_to_points_on_mixed_planes() {
        let pm = PlaneMapper::new(4, 4, square(-2.0, 2.0)).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, -2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 4)), Complex::new(2.0, 2.0));
    }

    #[test]
    fn centered_bounds_keep_pixels_square() {
        let b = Bounds::centered(Complex::new(-0.5, 0.25), 4.0, 8, 4);
        assert_eq!(b.xmin, -2.5);
        assert_eq!(b.xmax, 1.5);
        assert_eq!(b.ymin, -0.75);
        assert_eq!(b.ymax, 1.25);
    }
}
