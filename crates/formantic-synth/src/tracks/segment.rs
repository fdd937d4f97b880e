//! Append-only segment history shared by every leaf track.

use std::time::Duration;

const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// Parameters that can be linearly interpolated between two states.
pub trait Lerp: Clone + PartialEq {
    /// Returns the state a fraction `t` of the way from `self` to `end`.
    fn lerp(&self, end: &Self, t: f64) -> Self;
}

pub(crate) fn lerp_f64(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// One stretch of a track's history.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment<P> {
    /// Length of the segment.
    pub duration: Duration,
    /// Parameters at the segment's first instant.
    pub start: P,
    /// Parameters reached at the segment's end.
    pub end: P,
}

impl<P: Lerp> Segment<P> {
    /// A segment whose parameters never change.
    pub fn is_static(&self) -> bool {
        self.start == self.end
    }

    /// Interpolated parameters at fraction `t` of this segment.
    pub fn at(&self, t: f64) -> P {
        self.start.lerp(&self.end, t)
    }
}

/// The full history of a track.
///
/// Starts as a single zero-length segment holding the initial parameters.
/// Only ever grows.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline<P> {
    segments: Vec<Segment<P>>,
}

impl<P: Lerp> Timeline<P> {
    /// Creates a zero-length timeline at `initial`.
    pub fn new(initial: P) -> Self {
        Self {
            segments: vec![Segment {
                duration: Duration::ZERO,
                start: initial.clone(),
                end: initial,
            }],
        }
    }

    /// Sum of all segment durations.
    pub fn duration(&self) -> Duration {
        self.segments.iter().map(|s| s.duration).sum()
    }

    /// End parameters of the most recent segment.
    pub fn current(&self) -> &P {
        &self.last().end
    }

    /// Number of stored segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Extends the timeline holding the current parameters.
    ///
    /// A trailing static segment absorbs the extension.
    pub fn continue_for(&mut self, duration: Duration) {
        let last = self.last_mut();
        if last.is_static() {
            last.duration += duration;
            return;
        }
        let end = last.end.clone();
        self.segments.push(Segment {
            duration,
            start: end.clone(),
            end,
        });
    }

    /// Appends a ramp from the current parameters to `target`.
    ///
    /// A zero `duration` is an instantaneous jump.
    pub fn adjust(&mut self, target: P, duration: Duration) {
        let start = self.current().clone();
        self.segments.push(Segment {
            duration,
            start,
            end: target,
        });
    }

    /// Number of samples a render at `sample_rate` produces.
    ///
    /// `floor(duration * sample_rate)`, computed in integer nanoseconds.
    pub fn sample_count(&self, sample_rate: u32) -> usize {
        (self.duration().as_nanos() * sample_rate as u128 / NANOS_PER_SECOND) as usize
    }

    /// Calls `f(segment, t)` once per output sample, in order.
    ///
    /// Sample `i` sits at time `i / sample_rate`. `t` is its fraction through
    /// the active segment and always lies in `[0, 1)`. Zero-length segments are
    /// never active.
    pub fn for_each_sample<F>(&self, sample_rate: u32, mut f: F)
    where
        F: FnMut(&Segment<P>, f64),
    {
        let rate = sample_rate as u128;
        let count = self.sample_count(sample_rate);

        // Times are compared scaled by the sample rate so that every
        // comparison is exact integer arithmetic.
        let mut index = 0;
        let mut seg_start = 0u128;
        let mut seg_end = self.segments[0].duration.as_nanos() * rate;

        for sample in 0..count {
            let now = sample as u128 * NANOS_PER_SECOND;
            while now >= seg_end && index + 1 < self.segments.len() {
                index += 1;
                seg_start = seg_end;
                seg_end += self.segments[index].duration.as_nanos() * rate;
            }
            let segment = &self.segments[index];
            let span = seg_end - seg_start;
            let t = if span == 0 {
                0.0
            } else {
                (now - seg_start) as f64 / span as f64
            };
            f(segment, t);
        }
    }

    fn last(&self) -> &Segment<P> {
        &self.segments[self.segments.len() - 1]
    }

    fn last_mut(&mut self) -> &mut Segment<P> {
        let last = self.segments.len() - 1;
        &mut self.segments[last]
    }
}
