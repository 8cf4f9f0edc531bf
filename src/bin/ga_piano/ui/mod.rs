//! Terminal front end: keyboard input in, scope and controls out.

mod controls;
mod keyboard;
mod spectrum;
mod waveform;

use std::time::{Duration, Instant};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ga_audio::AudioComponent;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;

use crate::piano::{Band, Piano, NUM_KEYS};
use controls::{render_channels, render_controls, render_status, AudioStats};
use keyboard::{key_for_char, render_keyboard};
use spectrum::{render_spectrum, SpectrumAnalyzer};
use waveform::render_waveform;

/// Scope samples kept for drawing
const VIS_BUFFER_SIZE: usize = 1024;

/// How long a key stays lit after being struck
const KEY_FLASH: Duration = Duration::from_millis(200);

pub struct UiApp {
    audio: AudioComponent,
    piano: Piano,
    /// Mono mix from the mixer, if the scope is available
    scope_rx: Option<Consumer<f32>>,
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    struck: [Option<Instant>; NUM_KEYS],
    should_quit: bool,
}

impl UiApp {
    pub fn new(mut audio: AudioComponent) -> Self {
        let scope_rx = audio.take_scope();
        let sample_rate = audio.sample_rate() as f32;
        Self {
            audio,
            piano: Piano::default(),
            scope_rx,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate),
            struck: [None; NUM_KEYS],
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.audio.update();
            self.poll_audio();

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        self.audio.stop_all();
        Ok(())
    }

    fn poll_audio(&mut self) {
        let Some(rx) = self.scope_rx.as_mut() else {
            return;
        };

        let mut received = false;
        while let Ok(sample) = rx.pop() {
            self.audio_buffer.push(sample);
            received = true;
        }

        if received {
            if self.audio_buffer.len() > VIS_BUFFER_SIZE {
                let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
                self.audio_buffer.drain(0..excess);
            }
            self.spectrum.update(&self.audio_buffer);
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        let KeyCode::Char(c) = key else {
            if key == KeyCode::Esc {
                self.should_quit = true;
            }
            return;
        };

        if let Some(note) = key_for_char(c) {
            if self.piano.play(&mut self.audio, note).is_some() {
                self.struck[note] = Some(Instant::now());
            }
            return;
        }

        let piano = &mut self.piano;
        match c {
            'q' | 'Q' => self.should_quit = true,
            '1' => piano.use_guitar = !piano.use_guitar,
            '2' => piano.octave_up = !piano.octave_up,
            '3' => piano.distort = !piano.distort,
            '4' => piano.echo = !piano.echo,
            '5' => piano.tremolo = !piano.tremolo,
            '6' => piano.chorus = !piano.chorus,
            '-' => piano.volume_down(),
            '=' | '+' => piano.volume_up(),
            '0' => piano.reset_volume(),
            '[' => piano.pan_left(),
            ']' => piano.pan_right(),
            '\\' => piano.reset_pan(),
            'z' => piano.eq_down(Band::Low),
            'x' => piano.eq_up(Band::Low),
            'c' => piano.eq_down(Band::Mid),
            'v' => piano.eq_up(Band::Mid),
            'b' => piano.eq_down(Band::High),
            'n' => piano.eq_up(Band::High),
            'm' => piano.reset_eq(),
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status
                Constraint::Length(4), // Keys
                Constraint::Length(8), // Controls
                Constraint::Length(3), // Channels
                Constraint::Min(6),    // Scope + spectrum
                Constraint::Length(1), // Help
            ])
            .split(frame.area());

        let playing: Vec<bool> = (0..self.audio.num_channels())
            .map(|ch| self.audio.is_channel_playing(ch))
            .collect();
        let active = playing.iter().filter(|&&on| on).count();
        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_status(
            frame,
            chunks[0],
            self.audio.sample_rate(),
            active,
            playing.len(),
            &stats,
        );

        let now = Instant::now();
        let lit = self
            .struck
            .map(|at| at.is_some_and(|at| now.duration_since(at) < KEY_FLASH));
        render_keyboard(frame, chunks[1], &lit);

        render_controls(frame, chunks[2], &self.piano);
        render_channels(frame, chunks[3], &playing);

        let scopes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[4]);
        render_waveform(frame, scopes[0], &self.audio_buffer);
        render_spectrum(frame, scopes[1], self.spectrum.data());

        let help = Paragraph::new(
            " a-k: play | 1-6: toggles | -/=/0: volume | [/]/\\: pan | z x c v b n/m: EQ | q: quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[5]);
    }
}
