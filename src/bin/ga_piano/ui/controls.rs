//! Status bar, effect toggles, level sliders and channel activity.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::piano::{Piano, EQ_MAX, EQ_MIN, VOLUME_MAX};

const SLIDER_WIDTH: usize = 16;

/// Peak and RMS of the scope buffer
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

fn to_db(level: f32) -> f32 {
    if level > 0.0 {
        20.0 * level.log10()
    } else {
        f32::NEG_INFINITY
    }
}

/// `[#####-----]` with `value` placed between `min` and `max`.
fn slider(value: f32, min: f32, max: f32) -> String {
    let t = ((value - min) / (max - min)).clamp(0.0, 1.0);
    let filled = (t * SLIDER_WIDTH as f32).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(SLIDER_WIDTH - filled))
}

pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    sample_rate: u32,
    active: usize,
    total: usize,
    stats: &AudioStats,
) {
    let block = Block::default().title(" ga_piano ").borders(Borders::ALL);

    let line = Line::from(vec![
        Span::styled(
            format!(" {:.1}kHz  ", sample_rate as f32 / 1000.0),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Channels {}/{}  ", active, total),
            Style::default().fg(if active == total {
                Color::Red
            } else {
                Color::Green
            }),
        ),
        Span::styled(
            format!("Peak: {:.1}dB  RMS: {:.1}dB", to_db(stats.peak), to_db(stats.rms)),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

pub fn render_controls(frame: &mut Frame, area: Rect, piano: &Piano) {
    let block = Block::default().title(" Controls ").borders(Borders::ALL);

    let toggle = |label: &str, on: bool| {
        Span::styled(
            format!("{} ", label),
            if on {
                Style::default().fg(Color::Black).bg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            },
        )
    };

    let toggles = Line::from(vec![
        toggle("1 guitar", piano.use_guitar),
        toggle("2 octave", piano.octave_up),
        toggle("3 distort", piano.distort),
        toggle("4 echo", piano.echo),
        toggle("5 tremolo", piano.tremolo),
        toggle("6 chorus", piano.chorus),
    ]);

    let row = |label: &str, bar: String, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<8}", label), Style::default().fg(Color::White)),
            Span::styled(bar, Style::default().fg(Color::Cyan)),
            Span::raw(format!(" {}", value)),
        ])
    };

    let lines = vec![
        toggles,
        row(
            "volume",
            slider(piano.volume, 0.0, VOLUME_MAX),
            format!("{:.1}", piano.volume),
        ),
        row("pan", slider(piano.pan, -1.0, 1.0), format!("{:+.1}", piano.pan)),
        row(
            "low",
            slider(piano.low_gain, EQ_MIN, EQ_MAX),
            format!("{:+.0}dB", piano.low_gain),
        ),
        row(
            "mid",
            slider(piano.mid_gain, EQ_MIN, EQ_MAX),
            format!("{:+.0}dB", piano.mid_gain),
        ),
        row(
            "high",
            slider(piano.high_gain, EQ_MIN, EQ_MAX),
            format!("{:+.0}dB", piano.high_gain),
        ),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// One cell per channel, filled while it plays.
pub fn render_channels(frame: &mut Frame, area: Rect, playing: &[bool]) {
    let block = Block::default().title(" Channels ").borders(Borders::ALL);

    let spans: Vec<Span> = playing
        .iter()
        .map(|&on| {
            if on {
                Span::styled("■", Style::default().fg(Color::Green))
            } else {
                Span::styled("·", Style::default().fg(Color::DarkGray))
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_stats() {
        let stats = AudioStats::from_buffer(&[0.5, -0.5, 0.5, -0.5]);
        assert_eq!(stats.peak, 0.5);
        assert!((stats.rms - 0.5).abs() < 1e-6);

        let empty = AudioStats::from_buffer(&[]);
        assert_eq!(empty.peak, 0.0);
    }

    #[test]
    fn test_slider_ends() {
        assert_eq!(slider(0.0, 0.0, 1.0), format!("[{}]", "-".repeat(SLIDER_WIDTH)));
        assert_eq!(slider(5.0, 0.0, 1.0), format!("[{}]", "#".repeat(SLIDER_WIDTH)));
    }
}
