// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Dividing an image's rows among render workers.
//!
//! Each worker gets `height / threads` rows, and the last one also
//! picks up whatever is left over.  That balances row counts, not
//! work: the interesting parts of the Mandelbrot set cost far more per
//! pixel than the empty parts, and a worker whose band crosses the
//! main cardioid will finish long after its neighbours.

use std::ops::Range;

/// The fewest render workers a job may ask for.
pub const MIN_THREADS: usize = 1;

/// The most render workers a job may ask for.
pub const MAX_THREADS: usize = 20;

/// Pull a requested worker count into `MIN_THREADS..=MAX_THREADS`.
/// Out-of-range requests are clamped, never refused.
pub fn clamp_threads(requested: i64) -> usize {
    if requested < MIN_THREADS as i64 {
        MIN_THREADS
    } else if requested > MAX_THREADS as i64 {
        MAX_THREADS
    } else {
        requested as usize
    }
}

/// A half-open run of rows, `start..end`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RowRange {
    /// First row in the range.
    pub start: usize,
    /// One past the last row in the range.
    pub end: usize,
}

impl RowRange {
    /// How many rows the range covers.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when the worker holding this range has nothing to do.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The rows themselves.
    pub fn rows(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Split `0..height` into exactly `threads` (clamped) contiguous,
/// ascending, non-overlapping ranges that together cover every row.
/// When there are more workers than rows, the early workers receive
/// empty ranges and the last one does everything.
pub fn partition(height: usize, threads: usize) -> Vec<RowRange> {
    let threads = threads.max(MIN_THREADS).min(MAX_THREADS);
    let per_worker = height / threads;
    (0..threads)
        .map(|k| RowRange {
            start: k * per_worker,
            end: if k == threads - 1 {
                height
            } else {
                (k + 1) * per_worker
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_requests() {
        assert_eq!(clamp_threads(-5), 1);
        assert_eq!(clamp_threads(0), 1);
        assert_eq!(clamp_threads(1), 1);
        assert_eq!(clamp_threads(7), 7);
        assert_eq!(clamp_threads(20), 20);
        assert_eq!(clamp_threads(21), 20);
        assert_eq!(clamp_threads(i64::max_value()), 20);
    }

    #[test]
    fn partitions_cover_every_row_exactly_once() {
        for height in 1..200 {
            for threads in MIN_THREADS..=MAX_THREADS {
                let ranges = partition(height, threads);
                assert_eq!(ranges.len(), threads);
                let mut seen = vec![0u8; height];
                for range in &ranges {
                    for row in range.rows() {
                        seen[row] += 1;
                    }
                }
                assert!(
                    seen.iter().all(|&n| n == 1),
                    "height {} threads {}: {:?}",
                    height,
                    threads,
                    ranges
                );
            }
        }
    }

    #[test]
    fn ranges_are_contiguous_and_ascending() {
        let ranges = partition(1000, 7);
        assert_eq!(ranges[0].start, 0);
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(ranges[6].end, 1000);
    }

    #[test]
    fn last_worker_absorbs_the_remainder() {
        let ranges = partition(10, 3);
        assert_eq!(
            ranges,
            vec![
                RowRange { start: 0, end: 3 },
                RowRange { start: 3, end: 6 },
                RowRange { start: 6, end: 10 },
            ]
        );
    }

    #[test]
    fn more_workers_than_rows() {
        let ranges = partition(3, 5);
        assert!(ranges[..4].iter().all(|r| r.is_empty()));
        assert_eq!(ranges[4], RowRange { start: 0, end: 3 });
    }

    #[test]
    fn thread_count_is_clamped() {
        assert_eq!(partition(100, 0).len(), 1);
        assert_eq!(partition(100, 64).len(), 20);
    }
}
