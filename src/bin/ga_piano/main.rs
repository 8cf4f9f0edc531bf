//! ga_piano: a one-octave keyboard in the terminal, played through the
//! audio component with switchable per-note effects.

mod piano;
mod tones;
mod ui;

use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};
use env_logger::{Builder, Env, Target};
use ga_audio::{AudioComponent, AudioConfig, OutputMode};

#[derive(Parser, Debug)]
#[command(name = "ga_piano", about = "Play a sampled piano from the keyboard")]
struct Args {
    /// WAV used for the piano voice; should be a C4
    #[arg(long)]
    piano: Option<PathBuf>,

    /// WAV used for the guitar voice; should be a C4
    #[arg(long)]
    guitar: Option<PathBuf>,

    /// Size of the channel pool
    #[arg(long, default_value_t = ga_audio::component::DEFAULT_CHANNELS)]
    channels: usize,

    /// Mix without opening an audio device
    #[arg(long)]
    no_sound: bool,

    /// Log file; the terminal belongs to the UI
    #[arg(long, default_value = "ga_piano.log")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let log_file = File::create(&args.log_file)
        .wrap_err_with(|| format!("creating {}", args.log_file.display()))?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(log_file)))
        .init();

    let output = if args.no_sound {
        OutputMode::NoSound
    } else {
        OutputMode::Device
    };
    let config = AudioConfig::new().channels(args.channels).output(output);
    let mut audio = AudioComponent::with_config(config)
        .map_err(|e| eyre!("failed to start audio: {}", e))?;

    let sample_rate = audio.sample_rate();
    load_or_synthesize(&mut audio, args.piano.as_ref(), || tones::piano(sample_rate));
    load_or_synthesize(&mut audio, args.guitar.as_ref(), || tones::guitar(sample_rate));

    let mut app = ui::UiApp::new(audio);
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result
}

/// Load `path` if given and readable, otherwise fall back to a built-in tone
/// so sound indices stay 0 = piano, 1 = guitar.
fn load_or_synthesize(
    audio: &mut AudioComponent,
    path: Option<&PathBuf>,
    fallback: impl FnOnce() -> ga_audio::Sound,
) -> usize {
    if let Some(path) = path {
        if let Some(index) = audio.add_sound(path) {
            log::info!("loaded {} as sound {}", path.display(), index);
            return index;
        }
        log::warn!("could not load {}, using built-in tone", path.display());
    }
    audio.add_sound_data(fallback())
}
