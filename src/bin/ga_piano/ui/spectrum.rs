//! Spectrum of the mono mix, log-spaced from 20 Hz.

use std::f32::consts::TAU;
use std::sync::Arc;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

const BINS: usize = 48;
const FLOOR_DB: f64 = -100.0;

pub struct SpectrumAnalyzer {
    window: Vec<f32>,
    bin_indices: Vec<usize>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// (bin position 0..BINS, magnitude dB)
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(fft_len: usize, sample_rate: f32) -> Self {
        let fft_len = fft_len.max(2);
        let fft = FftPlanner::new().plan_fft_forward(fft_len);

        // Hann
        let window = (0..fft_len)
            .map(|i| 0.5 * (1.0 - (TAU * i as f32 / (fft_len - 1) as f32).cos()))
            .collect();

        let max_freq = (sample_rate / 2.0).min(20_000.0).max(40.0) as f64;
        let min_freq = 20.0f64;
        let half = fft_len / 2;
        let bin_indices = (0..BINS)
            .map(|i| {
                let t = i as f64 / (BINS - 1) as f64;
                let freq = min_freq * (max_freq / min_freq).powf(t);
                let index = (freq * fft_len as f64 / sample_rate as f64).round() as usize;
                index.min(half - 1)
            })
            .collect();

        Self {
            window,
            bin_indices,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); fft_len],
            spectrum: (0..BINS).map(|i| (i as f64, FLOOR_DB)).collect(),
        }
    }

    pub fn fft_len(&self) -> usize {
        self.window.len()
    }

    /// Analyze the newest `fft_len` samples of `scope`. Shorter input is
    /// ignored.
    pub fn update(&mut self, scope: &[f32]) {
        let len = self.window.len();
        if scope.len() < len {
            return;
        }
        let recent = &scope[scope.len() - len..];

        for ((bin, &sample), &w) in self.scratch.iter_mut().zip(recent).zip(&self.window) {
            *bin = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        let norm = 2.0 / len as f32;
        for ((_, db), &index) in self.spectrum.iter_mut().zip(&self.bin_indices) {
            let magnitude = self.scratch[index].norm() * norm;
            *db = (20.0 * (magnitude.max(1e-6) as f64).log10()).max(FLOOR_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let block = Block::default()
        .title(" Spectrum (20 Hz - 20 kHz) ")
        .borders(Borders::ALL);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, (BINS - 1) as f64])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, 0.0])
                .labels(vec!["-100", "-50", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_peaks_near_its_bin() {
        let sample_rate = 48_000.0;
        let mut analyzer = SpectrumAnalyzer::new(1024, sample_rate);
        let tone: Vec<f32> = (0..1024)
            .map(|n| (TAU * 1000.0 * n as f32 / sample_rate).sin())
            .collect();
        analyzer.update(&tone);

        let (loudest, _) = analyzer
            .data()
            .iter()
            .enumerate()
            .fold((0, FLOOR_DB), |best, (i, &(_, db))| if db > best.1 { (i, db) } else { best });

        // 1 kHz sits a little under 60% of the way along a 20 Hz - 20 kHz log axis
        let position = loudest as f64 / (BINS - 1) as f64;
        assert!((0.5..0.65).contains(&position), "position = {}", position);
    }

    #[test]
    fn test_short_input_ignored() {
        let mut analyzer = SpectrumAnalyzer::new(256, 48_000.0);
        analyzer.update(&[1.0; 10]);
        assert!(analyzer.data().iter().all(|&(_, db)| db == FLOOR_DB));
    }
}
