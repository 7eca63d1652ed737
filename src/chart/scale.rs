use crate::data::model::RaceTime;

/// A tick on an axis: data value, pixel position and rendered label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub offset: f64,
    pub label: String,
}

// ---------------------------------------------------------------------------
// Linear scale
// ---------------------------------------------------------------------------

/// Maps a numeric domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// A degenerate domain maps every value to the middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }

    /// Round 1, 2 or 5 × 10^k values inside the domain, integer labels.
    pub fn ticks(&self, count: usize) -> Vec<Tick> {
        nice_ticks(self.domain.0, self.domain.1, count)
            .into_iter()
            .map(|value| Tick {
                value,
                offset: self.map(value),
                label: format!("{}", value.round() as i64),
            })
            .collect()
    }
}

/// Step between ticks for roughly `count` ticks over `[start, stop]`.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start).abs() / count.max(1) as f64;
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    power * factor
}

fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if start == stop {
        return vec![start];
    }
    let (lo, hi) = if start < stop { (start, stop) } else { (stop, start) };
    let step = tick_step(lo, hi, count);
    if !step.is_finite() || step <= 0.0 {
        return Vec::new();
    }

    // Fractional steps divide by the inverse to keep values exact.
    let ticks: Vec<f64> = if step >= 1.0 {
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    } else {
        let inverse = (1.0 / step).round();
        let first = (lo * inverse).ceil() as i64;
        let last = (hi * inverse).floor() as i64;
        (first..=last).map(|i| i as f64 / inverse).collect()
    };

    if start > stop {
        ticks.into_iter().rev().collect()
    } else {
        ticks
    }
}

// ---------------------------------------------------------------------------
// Time scale
// ---------------------------------------------------------------------------

/// Clock-aligned tick intervals in seconds.
const TIME_INTERVALS: [u32; 12] = [1, 5, 15, 30, 60, 300, 900, 1800, 3600, 10800, 21600, 43200];

/// Maps race times onto a pixel range. Low times map to the start of the
/// range; the range is not inverted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(domain: (RaceTime, RaceTime), range: (f64, f64)) -> Self {
        Self {
            inner: LinearScale::new(
                (domain.0.as_secs() as f64, domain.1.as_secs() as f64),
                range,
            ),
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.inner.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.inner.range
    }

    pub fn map(&self, time: RaceTime) -> f64 {
        self.inner.map(time.as_secs() as f64)
    }

    /// The interval whose tick count lands closest to `count`.
    pub fn tick_interval(&self, count: usize) -> u32 {
        let (d0, d1) = self.inner.domain;
        let target = (d1 - d0).abs() / count.max(1) as f64;
        let idx = TIME_INTERVALS.partition_point(|&secs| secs as f64 <= target);
        match idx {
            0 => TIME_INTERVALS[0],
            i if i == TIME_INTERVALS.len() => TIME_INTERVALS[i - 1],
            i => {
                let before = TIME_INTERVALS[i - 1] as f64;
                let after = TIME_INTERVALS[i] as f64;
                if target / before < after / target {
                    TIME_INTERVALS[i - 1]
                } else {
                    TIME_INTERVALS[i]
                }
            }
        }
    }

    /// Clock-aligned ticks labelled `MM:SS`.
    pub fn ticks(&self, count: usize) -> Vec<Tick> {
        let (d0, d1) = self.inner.domain;
        let (lo, hi) = (d0.min(d1) as u32, d0.max(d1) as u32);
        let step = self.tick_interval(count);
        let first = lo.div_ceil(step);
        let last = hi / step;

        (first..=last)
            .filter_map(|i| RaceTime::from_secs(i * step))
            .map(|time| Tick {
                value: time.as_secs() as f64,
                offset: self.map(time),
                label: time.to_string(),
            })
            .collect()
    }
}
