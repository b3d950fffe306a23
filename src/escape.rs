// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time test at the heart of every Mandelbrot renderer.

use num::Complex;

/// Given a point on the complex plane, iterate `z = z * z + c`
/// starting from the point itself (which is also `c`), and count the
/// iterations until the orbit leaves the circle of radius two or the
/// budget runs out.  The result is always in `0..=max`; a point that
/// never escapes returns exactly `max`.
pub fn iterations_at(point: Complex<f64>, max: u32) -> u32 {
    let c = point;
    let mut z = point;
    let mut iterations = 0;
    while z.norm_sqr() <= 4.0 && iterations < max {
        z = Complex {
            re: z.re * z.re - z.im * z.im + c.re,
            im: 2.0 * z.re * z.im + c.im,
        };
        iterations += 1;
    }
    iterations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_never_escapes() {
        for max in &[1, 2, 17, 1000] {
            assert_eq!(iterations_at(Complex::new(0.0, 0.0), *max), *max);
        }
    }

    #[test]
    fn far_points_escape_immediately() {
        assert!(iterations_at(Complex::new(2.0, 2.0), 1000) <= 2);
        assert_eq!(iterations_at(Complex::new(3.0, 0.0), 1000), 0);
    }

    #[test]
    fn zero_budget_is_zero() {
        assert_eq!(iterations_at(Complex::new(0.0, 0.0), 0), 0);
    }

    #[test]
    fn boundary_point_takes_a_while() {
        // -2 sits on the real tip of the set and stays at |z| = 2 forever.
        assert_eq!(iterations_at(Complex::new(-2.0, 0.0), 500), 500);
        let near = iterations_at(Complex::new(0.26, 0.0), 1000);
        assert!(near > 10 && near < 1000);
    }
}
