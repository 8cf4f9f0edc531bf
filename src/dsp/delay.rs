/// Circular delay buffer.
///
/// Sized once at construction; reads and writes never allocate.
pub struct DelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl DelayLine {
    /// Create a delay line able to look back `max_delay_samples` samples.
    pub fn new(max_delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; max_delay_samples.max(1) + 2],
            write_pos: 0,
        }
    }

    /// Create a delay line long enough for `max_ms` at `sample_rate`.
    pub fn for_duration(max_ms: f32, sample_rate: f32) -> Self {
        Self::new((max_ms.max(0.0) * sample_rate / 1000.0).ceil() as usize)
    }

    /// Longest delay in samples this line can produce.
    pub fn max_delay(&self) -> usize {
        self.buffer.len() - 2
    }

    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    /// Read the sample written `delay_samples` writes ago (0 = most recent).
    #[inline]
    pub fn read(&self, delay_samples: usize) -> f32 {
        let len = self.buffer.len();
        let delay = delay_samples.min(len - 2);
        self.buffer[(self.write_pos + 2 * len - 1 - delay) % len]
    }

    /// Fractional read with linear interpolation, for modulated delays.
    #[inline]
    pub fn read_interpolated(&self, delay_samples: f32) -> f32 {
        let delay = delay_samples.clamp(0.0, self.max_delay() as f32 - 1.0);
        let whole = delay.floor();
        let frac = delay - whole;
        let a = self.read(whole as usize);
        let b = self.read(whole as usize + 1);
        a + (b - a) * frac
    }

    /// Write `sample` and return the sample from `delay_samples` ago.
    pub fn next_sample(&mut self, sample: f32, delay_samples: usize) -> f32 {
        self.write(sample);
        self.read(delay_samples)
    }

    pub fn render(&mut self, buffer: &mut [f32], delay_samples: usize) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample, delay_samples);
        }
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}
