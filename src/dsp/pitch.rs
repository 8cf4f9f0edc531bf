//! Time-domain pitch shifting with two crossfaded read heads.

/*
Rotating Read Heads
===================

Reading a delay line at a moving delay changes pitch. If the delay shrinks
by `ratio - 1` samples every sample, the read head runs `ratio` times faster
than the write head:

    delay[n+1] = delay[n] + (1 - ratio)      (wrapped into 0..window)

A single head would click every time it wraps, so two heads run half a
window apart and are crossfaded. Each head is silent at the wrap point:

    gain(d) = sin²(π · d / window)

The two gains always sum to 1 because the second head sits at d + window/2.

Window size trades smearing (large) against roughness (small).
*/

use std::f32::consts::PI;

use crate::dsp::delay::DelayLine;

pub struct PitchShifter {
    delay_line: DelayLine,
    window: f32,
    delay: f32,
    ratio: f32,
}

impl PitchShifter {
    pub fn new(window_samples: usize) -> Self {
        let window = window_samples.max(4);
        Self {
            delay_line: DelayLine::new(window + 2),
            window: window as f32,
            delay: 0.0,
            ratio: 1.0,
        }
    }

    pub fn window(&self) -> usize {
        self.window as usize
    }

    /// Changing the window reallocates the delay line and restarts the heads.
    pub fn set_window(&mut self, window_samples: usize) {
        let window = window_samples.max(4);
        if window != self.window() {
            *self = Self {
                ratio: self.ratio,
                ..Self::new(window)
            };
        }
    }

    pub fn set_ratio(&mut self, ratio: f32) {
        self.ratio = ratio.max(0.0);
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    #[inline]
    fn head_gain(&self, delay: f32) -> f32 {
        let s = (PI * delay / self.window).sin();
        s * s
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.delay_line.write(input);

        if (self.ratio - 1.0).abs() < 1e-6 {
            return input;
        }

        let half = self.window * 0.5;
        let d1 = self.delay;
        let d2 = (d1 + half) % self.window;

        let out = self.delay_line.read_interpolated(d1) * self.head_gain(d1)
            + self.delay_line.read_interpolated(d2) * self.head_gain(d2);

        self.delay = (self.delay + 1.0 - self.ratio).rem_euclid(self.window);
        out
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    pub fn reset(&mut self) {
        self.delay_line.reset();
        self.delay = 0.0;
    }
}
