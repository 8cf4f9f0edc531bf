//! Reverb - Room Simulation via Delay Networks
//!
//! Classic Schroeder reverb:
//!
//! ```text
//! Input ──┬──→ [Comb 1] ──┐
//!         ├──→ [Comb 2] ──┤
//!         ├──→ [Comb 3] ──┼──→ (+) ──→ [Allpass 1] ──→ [Allpass 2] ──→ Output
//!         └──→ [Comb 4] ──┘
//! ```
//!
//! ## Comb Filters
//!
//! ```text
//! y[n] = x[n] + feedback * lowpass(y[n - delay])
//! ```
//!
//! Comb delays are mutually prime to avoid resonant buildup. Each comb's
//! feedback is derived from the requested decay time (RT60, the time for the
//! tail to fall by 60 dB):
//!
//! ```text
//! feedback = 10 ^ (-3 * delay / decay_time)
//! ```
//!
//! ## Allpass Filters
//!
//! ```text
//! y[n] = -g * x[n] + x[n - delay] + g * y[n - delay]
//! ```
//!
//! Allpass gain `g` is the diffusion control.

/// Comb delay times in ms (mutually prime ratios)
const COMB_DELAYS_MS: [f32; 4] = [29.7, 37.1, 41.1, 43.7];
/// Allpass delay times in ms
const ALLPASS_DELAYS_MS: [f32; 2] = [5.0, 1.7];

fn ms_to_samples(ms: f32, sample_rate: f32) -> usize {
    ((ms * sample_rate / 1000.0) as usize).max(1)
}

/// Feedback comb with one-pole damping in the loop
pub struct CombFilter {
    buffer: Vec<f32>,
    write_pos: usize,
    feedback: f32,
    damp: f32,
    filter_state: f32,
}

impl CombFilter {
    pub fn new(delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; delay_samples.max(1)],
            write_pos: 0,
            feedback: 0.5,
            damp: 0.5,
            filter_state: 0.0,
        }
    }

    pub fn delay_samples(&self) -> usize {
        self.buffer.len()
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, 0.99);
    }

    pub fn set_damp(&mut self, damp: f32) {
        self.damp = damp.clamp(0.0, 1.0);
    }

    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.buffer[self.write_pos];

        // One-pole lowpass filter for damping (absorbs high frequencies)
        self.filter_state = output * (1.0 - self.damp) + self.filter_state * self.damp;

        self.buffer[self.write_pos] = input + self.filter_state * self.feedback;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();

        output
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.filter_state = 0.0;
        self.write_pos = 0;
    }
}

/// Schroeder allpass for diffusion
pub struct AllpassFilter {
    buffer: Vec<f32>,
    write_pos: usize,
    feedback: f32,
}

impl AllpassFilter {
    pub fn new(delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; delay_samples.max(1)],
            write_pos: 0,
            feedback: 0.5,
        }
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, 0.9);
    }

    pub fn process(&mut self, input: f32) -> f32 {
        let delayed = self.buffer[self.write_pos];
        let output = -self.feedback * input + delayed;

        self.buffer[self.write_pos] = input + self.feedback * output;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();

        output
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}

/// Schroeder reverb with 4 comb filters and 2 allpass filters
pub struct SchroederReverb {
    combs: [CombFilter; 4],
    allpasses: [AllpassFilter; 2],
    sample_rate: f32,
}

impl SchroederReverb {
    /// Create a reverb tuned for `sample_rate`, with a 1.5 s decay.
    pub fn new(sample_rate: f32) -> Self {
        let combs = COMB_DELAYS_MS.map(|ms| CombFilter::new(ms_to_samples(ms, sample_rate)));
        let allpasses =
            ALLPASS_DELAYS_MS.map(|ms| AllpassFilter::new(ms_to_samples(ms, sample_rate)));

        let mut reverb = Self {
            combs,
            allpasses,
            sample_rate,
        };
        reverb.set_decay_time(1500.0);
        reverb
    }

    /// Set the RT60 decay time in milliseconds.
    pub fn set_decay_time(&mut self, decay_ms: f32) {
        let decay_ms = decay_ms.max(1.0);
        for comb in &mut self.combs {
            let delay_ms = comb.delay_samples() as f32 * 1000.0 / self.sample_rate;
            comb.set_feedback(10.0_f32.powf(-3.0 * delay_ms / decay_ms));
        }
    }

    /// Set damping (high frequency absorption)
    pub fn set_damping(&mut self, damp: f32) {
        for comb in &mut self.combs {
            comb.set_damp(damp);
        }
    }

    /// Set allpass diffusion (0.0 = sparse echoes, 1.0 = smooth wash)
    pub fn set_diffusion(&mut self, diffusion: f32) {
        let g = diffusion.clamp(0.0, 1.0) * 0.7;
        for allpass in &mut self.allpasses {
            allpass.set_feedback(g);
        }
    }

    /// Process a single sample through the reverb
    pub fn process(&mut self, input: f32) -> f32 {
        let mut output = 0.0;
        for comb in &mut self.combs {
            output += comb.process(input);
        }
        output *= 0.25; // Normalize for 4 combs

        for allpass in &mut self.allpasses {
            output = allpass.process(output);
        }

        output
    }

    /// Reset all filter states
    pub fn reset(&mut self) {
        for comb in &mut self.combs {
            comb.reset();
        }
        for allpass in &mut self.allpasses {
            allpass.reset();
        }
    }
}
