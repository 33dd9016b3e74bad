use num_traits::{Float, FromPrimitive, ToPrimitive};
use std::ops::Range;

/// One point of a discretized path segment.
///
/// Distances are signed plotting distances (negative on a long way
/// round path); depth and time are in the solver's units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentStep<T = f64> {
    pub dist_deg: T,
    pub depth: T,
    pub time: T,
}

impl<T> SegmentStep<T> {
    pub const fn new(dist_deg: T, depth: T, time: T) -> Self {
        Self {
            dist_deg,
            depth,
            time,
        }
    }
}

impl From<crate::arrival::PathSample> for SegmentStep<f64> {
    fn from(sample: crate::arrival::PathSample) -> Self {
        Self::new(sample.dist_deg, sample.depth, sample.time)
    }
}

/// Subdivides one raw path segment into angular steps of bounded size.
///
/// A segment whose endpoints are `gap` degrees apart is split into
/// `n = ceil(gap / max_step)` pieces and the `n - 1` interior points
/// are yielded in order. Time and depth are linear in the step
/// fraction `k/n`, with depth anchored at the segment's starting
/// depth. Distance is accumulated one signed increment at a time from
/// the starting plotting distance, so yielded values reproduce a
/// running accumulator rather than a closed-form evaluation.
///
/// A segment no wider than `max_step` yields nothing.
pub struct SegmentIter<T: Float = f64> {
    steps: Range<usize>,
    segments: T,
    dist: T,
    dist_step: T,
    depth_start: T,
    depth_delta: T,
    time_start: T,
    time_delta: T,
}

impl<T> SegmentIter<T>
where
    T: Float + FromPrimitive + ToPrimitive,
{
    /// `from` and `to` carry the raw (unsigned) sample values;
    /// `long_way_round` flips the plotting sign the same way the
    /// renderer does for raw samples.
    pub fn new(from: SegmentStep<T>, to: SegmentStep<T>, max_step: T, long_way_round: bool) -> Self {
        let gap = to.dist_deg - from.dist_deg;
        let segments = (gap / max_step).ceil();
        let n = segments.to_usize().unwrap_or(0);

        let start_dist = if long_way_round && from.dist_deg != T::zero() {
            -from.dist_deg
        } else {
            from.dist_deg
        };
        let dist_step = if long_way_round {
            -(gap / segments)
        } else {
            gap / segments
        };

        Self {
            steps: 1..n,
            segments,
            dist: start_dist,
            dist_step,
            depth_start: from.depth,
            depth_delta: to.depth - from.depth,
            time_start: from.time,
            time_delta: to.time - from.time,
        }
    }
}

impl<T> Iterator for SegmentIter<T>
where
    T: Float + FromPrimitive,
{
    type Item = SegmentStep<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.steps.next().map(|k| {
            let k = T::from_usize(k).unwrap();
            self.dist = self.dist + self.dist_step;
            SegmentStep {
                dist_deg: self.dist,
                depth: self.depth_start + k * self.depth_delta / self.segments,
                time: self.time_start + k * self.time_delta / self.segments,
            }
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.steps.size_hint()
    }
}

impl<T> ExactSizeIterator for SegmentIter<T>
where
    T: Float + FromPrimitive,
{
    fn len(&self) -> usize {
        self.steps.len()
    }
}
