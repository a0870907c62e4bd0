// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Tail latency estimation.
//!
//! p95/p99 use interpolated quantiles of order 100 with the "exclusive"
//! method: the sorted sample is treated as `m = n + 1` equal-probability
//! points and each cut point is linearly interpolated between neighbours,
//! clamped to the inner pair at either end. Near small sample sizes this
//! extrapolates past the maximum, e.g. `[1, 2, 3, 4, 5]` gives p95 = 5.7.
//!
//! Below [`SMALL_SAMPLE_THRESHOLD`] observations both tails are simply the
//! sample maximum.

use serde::Serialize;

/// Minimum sample size for real quantile estimation.
pub const SMALL_SAMPLE_THRESHOLD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TailLatency {
    pub p95: f64,
    pub p99: f64,
}

/// Cut points dividing `samples` into `n` equal-probability intervals.
///
/// Returns `n - 1` values. Needs at least two samples and `n >= 2`;
/// otherwise returns an empty vector.
pub fn quantiles(samples: &[f64], n: usize) -> Vec<f64> {
    let len = samples.len();
    if len < 2 || n < 2 {
        return Vec::new();
    }

    let mut data = samples.to_vec();
    data.sort_by(f64::total_cmp);

    let m = len + 1;
    (1..n)
        .map(|i| {
            let j = (i * m / n).clamp(1, len - 1);
            let delta = (i * m) as f64 - (j * n) as f64;
            (data[j - 1] * (n as f64 - delta) + data[j] * delta) / n as f64
        })
        .collect()
}

/// p95 and p99 of one bucket, rounded to 2 dp. `None` for an empty sample.
pub fn tail_latency(samples: &[f64]) -> Option<TailLatency> {
    if samples.is_empty() {
        return None;
    }

    let (p95, p99) = if samples.len() < SMALL_SAMPLE_THRESHOLD {
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (max, max)
    } else {
        let cuts = quantiles(samples, 100);
        (cuts[94], cuts[98])
    };

    Some(TailLatency {
        p95: round_to(p95, 2),
        p99: round_to(p99, 2),
    })
}

pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Round to `places` decimal places using the exact decimal value of
/// `value`, with exact halves going to the even digit (`0.125` -> `0.12`).
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}
