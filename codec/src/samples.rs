//! Force samples in physical units.

use std::slice;

/// One force reading at a depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub depth_mm: f64,
    pub force_n: f64,
}

impl Sample {
    #[must_use]
    pub const fn new(depth_mm: f64, force_n: f64) -> Self {
        Self { depth_mm, force_n }
    }
}

/// The largest force in a series and where it occurs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxForce {
    pub force_n: f64,
    pub depth_mm: f64,
}

/// An ordered force profile. Index order is depth order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSeries {
    samples: Vec<Sample>,
}

impl SampleSeries {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    /// Converts raw readings: `depth = i * dist_mm`, `force = raw * scale`.
    #[must_use]
    pub fn from_raw(raw: &[i16], dist_mm: f64, scale: f64) -> Self {
        raw.iter()
            .enumerate()
            .map(|(i, &value)| Sample::new(i as f64 * dist_mm, f64::from(value) * scale))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    pub fn as_mut_slice(&mut self) -> &mut [Sample] {
        &mut self.samples
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Keeps the first `len` samples.
    pub fn truncate(&mut self, len: usize) {
        self.samples.truncate(len);
    }

    /// Largest force and its depth; ties keep the shallowest. NaN forces are
    /// skipped.
    #[must_use]
    pub fn max_force(&self) -> Option<MaxForce> {
        let mut best: Option<MaxForce> = None;
        for sample in self.samples.iter().filter(|s| !s.force_n.is_nan()) {
            if best.map_or(true, |b| sample.force_n > b.force_n) {
                best = Some(MaxForce {
                    force_n: sample.force_n,
                    depth_mm: sample.depth_mm,
                });
            }
        }
        best
    }

    /// Depth of the first sample whose force reaches `threshold_n`.
    #[must_use]
    pub fn surface_position(&self, threshold_n: f64) -> Option<f64> {
        self.samples
            .iter()
            .find(|s| s.force_n >= threshold_n)
            .map(|s| s.depth_mm)
    }
}

impl From<Vec<Sample>> for SampleSeries {
    fn from(samples: Vec<Sample>) -> Self {
        Self { samples }
    }
}

impl FromIterator<Sample> for SampleSeries {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SampleSeries {
    type Item = &'a Sample;
    type IntoIter = slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(forces: &[f64]) -> SampleSeries {
        forces
            .iter()
            .enumerate()
            .map(|(i, &f)| Sample::new(i as f64, f))
            .collect()
    }

    #[test]
    fn from_raw_scales_depth_and_force() {
        let s = SampleSeries::from_raw(&[100, -200, 0], 0.5, 0.01);
        assert_eq!(s.len(), 3);
        assert_eq!(s.as_slice()[0], Sample::new(0.0, 1.0));
        assert_eq!(s.as_slice()[1], Sample::new(0.5, -2.0));
        assert_eq!(s.as_slice()[2], Sample::new(1.0, 0.0));
    }

    #[test]
    fn from_raw_empty() {
        let s = SampleSeries::from_raw(&[], 1.0, 1.0);
        assert!(s.is_empty());
        assert_eq!(s.max_force(), None);
    }

    #[test]
    fn max_force_keeps_first_occurrence() {
        let s = series(&[0.1, 0.7, 0.3, 0.7]);
        assert_eq!(
            s.max_force(),
            Some(MaxForce {
                force_n: 0.7,
                depth_mm: 1.0
            })
        );
    }

    #[test]
    fn max_force_skips_nan() {
        let s = series(&[f64::NAN, 0.2, f64::NAN]);
        assert_eq!(s.max_force().unwrap().depth_mm, 1.0);
        assert_eq!(series(&[f64::NAN]).max_force(), None);
    }

    #[test]
    fn surface_position_is_first_crossing() {
        let s = series(&[0.0, 0.05, 0.2, 0.01, 0.5]);
        assert_eq!(s.surface_position(0.1), Some(2.0));
        assert_eq!(s.surface_position(0.05), Some(1.0));
        assert_eq!(s.surface_position(1.0), None);
    }

    #[test]
    fn mutation_preserves_order() {
        let mut s = series(&[1.0, 2.0, 3.0]);
        s.as_mut_slice()[1].force_n = 9.0;
        s.push(Sample::new(3.0, 4.0));
        s.truncate(3);
        let forces: Vec<_> = s.iter().map(|x| x.force_n).collect();
        assert_eq!(forces, [1.0, 9.0, 3.0]);
        assert_eq!((&s).into_iter().count(), 3);
    }
}
