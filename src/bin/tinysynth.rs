use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand, crate_version};
use tracing_subscriber::EnvFilter;

use tinysynth::batch;
use tinysynth::config::RenderConfig;
use tinysynth::dsp::sequencer::DrumLoopMode;
use tinysynth::dsp::wavetable::DrumKit;
use tinysynth::export::{WavDirectory, read_wav};

#[derive(Parser)]
#[clap(
    version = crate_version!(),
    about = "Renders synthesized notes, clicks and drum loops to WAV files."
)]
struct Cli {
    /// JSON render config. Flags below override its values.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Directory to write WAV files into.
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,
    /// Sample rate for note buffers, in Hz.
    #[arg(short, long, global = true)]
    sample_rate: Option<u32>,
    /// Octave the chromatic note sets are built in.
    #[arg(long, global = true)]
    octave: Option<i32>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Renders 13 fading vibrato notes, one file per semitone.
    Notes {
        /// Samples per note.
        #[arg(short, long, default_value_t = 44100 / 2)]
        length: usize,
        /// File name prefix; files are named <PREFIX><SEMITONE>.wav.
        #[arg(short, long, default_value = "note")]
        prefix: String,
    },
    /// Renders 13 four-beat metronome clicks, one file per semitone.
    Metronome {
        /// Samples per file (four beats).
        #[arg(short, long, default_value_t = 44100 * 4)]
        length: usize,
        #[arg(short, long, default_value = "metronome")]
        prefix: String,
    },
    /// Renders eight seconds of a self-retriggering low C.
    LongNote {},
    /// Renders a steady sine at 48 kHz.
    ConstantSine {
        /// Samples to render.
        #[arg(short, long, default_value_t = 1024 * 50)]
        length: usize,
        /// Frequency in Hz.
        #[arg(short, long, default_value_t = 93.75)]
        frequency: f64,
        #[arg(default_value = "constant_sine_period_512.wav")]
        file_name: String,
    },
    /// Renders the built-in eight-step drum loop.
    Drums {
        #[arg(short, long, default_value_t = 44100 * 4)]
        length: usize,
        /// Directory holding bd.wav, hh.wav and sn.wav. Uses a synthesized
        /// kit when omitted.
        #[arg(short, long)]
        kit: Option<PathBuf>,
        /// Overwrite the loop with a one-shot kick afterwards.
        #[arg(long)]
        legacy_overwrite: bool,
        #[arg(default_value = "output.wav")]
        file_name: String,
    },
    /// Renders four evenly spaced unit impulses.
    Impulses {
        #[arg(short, long, default_value_t = 44100)]
        length: usize,
        #[arg(default_value = "impulses.wav")]
        file_name: String,
    },
    /// Prints the format and level of a WAV file.
    Inspect {
        /// The WAV file to read.
        path: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(rate) = cli.sample_rate {
        config.sample_rate = rate;
    }
    if let Some(octave) = cli.octave {
        config.octave = octave;
    }
    config.validate()?;

    let mut sink = WavDirectory::new(&config.output_dir);

    match cli.command {
        Commands::Notes { length, prefix } => {
            batch::make_notes(&mut sink, length, &prefix, &config)?;
        }
        Commands::Metronome { length, prefix } => {
            batch::make_metronome_notes(&mut sink, length, &prefix, &config)?;
        }
        Commands::LongNote {} => {
            batch::make_long_note(&mut sink, &config)?;
        }
        Commands::ConstantSine {
            length,
            frequency,
            file_name,
        } => {
            batch::make_constant_sine(&mut sink, length, frequency, &file_name)?;
        }
        Commands::Drums {
            length,
            kit,
            legacy_overwrite,
            file_name,
        } => {
            let kit = match kit {
                Some(dir) => DrumKit::load_dir(dir)?,
                None => DrumKit::synthesized(),
            };
            let mode = if legacy_overwrite {
                DrumLoopMode::LegacyOverwrite
            } else {
                DrumLoopMode::Pattern
            };
            batch::make_drum_loop(&mut sink, &kit, length, mode, &file_name, &config)?;
        }
        Commands::Impulses { length, file_name } => {
            batch::make_impulse_rhythm(&mut sink, length, &file_name, &config)?;
        }
        Commands::Inspect { path } => {
            let buffer = read_wav(&path)?;
            let peak = buffer.samples().iter().fold(0.0f64, |m, s| m.max(s.abs()));
            println!("{}:", path.display());
            println!("- channels: {}", buffer.channel_count());
            println!("- sample rate: {} Hz", buffer.sample_rate());
            println!("- samples: {}", buffer.len());
            println!(
                "- duration: {:.3} s",
                buffer.len() as f64 / buffer.channel_count() as f64 / buffer.sample_rate() as f64
            );
            println!("- peak: {peak:.4}");
        }
    }

    Ok(())
}
