use std::f32::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
| type              | passes          | rejects      |
| ----------------- | --------------- | ------------ |
| low-pass          | below cutoff    | above cutoff |
| high-pass         | above cutoff    | below cutoff |
| band-pass         | around cutoff   | outside      |
| notch / band-stop | outside         | at cutoff    |
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    LowPass,
    HighPass,
    BandPass,
    Notch,
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
    pub notch: f32,
}

/// Butterworth Q; no resonant peak.
pub const BUTTERWORTH_Q: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Topology-preserving state-variable filter.
pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    pub cutoff_hz: f32,
    pub q: f32,
    filter_type: FilterType,
}

impl SVFilter {
    pub fn new(filter_type: FilterType, cutoff_hz: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz,
            q: BUTTERWORTH_Q,
            filter_type,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::LowPass, cutoff_hz)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::HighPass, cutoff_hz)
    }

    pub fn bandpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::BandPass, cutoff_hz)
    }

    pub fn notch(cutoff_hz: f32) -> Self {
        Self::new(FilterType::Notch, cutoff_hz)
    }

    pub fn with_q(mut self, q: f32) -> Self {
        self.set_q(q);
        self
    }

    /// Prewarped integrator gain. Cutoff is kept below Nyquist so `tan`
    /// stays finite.
    #[inline]
    fn compute_g(&self, sample_rate: f32) -> f32 {
        let cutoff = self.cutoff_hz.clamp(1.0, sample_rate * 0.49);
        (PI * cutoff / sample_rate).tan()
    }

    #[inline]
    fn compute_k(&self) -> f32 {
        1.0 / self.q
    }

    pub fn next_sample(&mut self, sample: f32, k: f32, g: f32) -> FilterOutputs {
        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
            highpass: sample - k * v1 - v2,
            notch: sample - k * v1,
        }
    }

    /// Filter a single sample with the current settings.
    #[inline]
    pub fn process(&mut self, sample: f32, sample_rate: f32) -> f32 {
        let g = self.compute_g(sample_rate);
        let k = self.compute_k();
        self.select(sample, k, g)
    }

    #[inline]
    fn select(&mut self, sample: f32, k: f32, g: f32) -> f32 {
        let outputs = self.next_sample(sample, k, g);
        match self.filter_type {
            FilterType::LowPass => outputs.lowpass,
            FilterType::HighPass => outputs.highpass,
            FilterType::BandPass => outputs.bandpass,
            FilterType::Notch => outputs.notch,
        }
    }

    pub fn render(&mut self, buffer: &mut [f32], sample_rate: f32) {
        let g = self.compute_g(sample_rate);
        let k = self.compute_k();

        for sample in buffer.iter_mut() {
            *sample = self.select(*sample, k, g);
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    pub fn set_cutoff(&mut self, cutoff: f32) {
        self.cutoff_hz = cutoff;
    }

    /// Q below 0.1 is raised to 0.1 to keep the damping term finite.
    pub fn set_q(&mut self, q: f32) {
        self.q = q.max(0.1);
    }
}
