use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use voxscribe_core::audio::infrastructure::ffmpeg_audio_decoder::FfmpegAudioDecoder;
use voxscribe_core::output::infrastructure::text_file_writer::TextFileWriter;
use voxscribe_core::pipeline::invocation::InvocationParams;
use voxscribe_core::pipeline::run_result::{RunError, RunResult};
use voxscribe_core::pipeline::transcribe_use_case::TranscribeAudioUseCase;
use voxscribe_core::shared::constants::DEFAULT_OUTPUT_DIR;
use voxscribe_core::transcription::domain::model_size::ModelSize;
use voxscribe_core::transcription::domain::speech_recognizer::SpeechRecognizer;
use voxscribe_core::transcription::domain::transcript::Transcript;
use voxscribe_core::transcription::infrastructure::model_resolver;
use voxscribe_core::transcription::infrastructure::whisper_recognizer::WhisperRecognizer;

/// Audio file transcription using Whisper speech recognition.
#[derive(Parser)]
#[command(name = "voxscribe")]
struct Cli {
    /// Input audio file (MP3, WAV, M4A, FLAC, OGG, ...).
    input: PathBuf,

    /// Model size: tiny, base, small, medium or large.
    #[arg(long, short = 'm', default_value = "base")]
    model: String,

    /// Output text file (default: output/<input stem>.txt).
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Print the run result as JSON instead of the transcript.
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let json = cli.json;

    match run(cli) {
        Ok((result, transcript)) => {
            if json {
                println!("{}", serde_json::to_string(&result).unwrap_or_default());
            } else {
                println!("{}", transcript.text());
            }
        }
        Err(e) => {
            if json {
                let result = RunResult::failure(e.kind());
                println!("{}", serde_json::to_string(&result).unwrap_or_default());
            }
            eprintln!("Error [{}]: {e}", e.kind());
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<(RunResult, Transcript), RunError> {
    let params = InvocationParams::resolve(
        &cli.input,
        &cli.model,
        cli.output.as_deref(),
        Path::new(DEFAULT_OUTPUT_DIR),
    )?;

    let recognizer = build_recognizer(params.model_size)?;

    let use_case = TranscribeAudioUseCase::new(
        Box::new(FfmpegAudioDecoder),
        recognizer,
        Box::new(TextFileWriter::new()),
    );

    log::info!("Transcribing {}", params.input_path.display());
    let transcript = use_case.run(&params.input_path, &params.output_path)?;
    log::info!("Transcript written to {}", params.output_path.display());

    Ok((RunResult::success(params.output_path), transcript))
}

fn build_recognizer(size: ModelSize) -> Result<Box<dyn SpeechRecognizer>, RunError> {
    log::info!(
        "Resolving '{size}' model (~{} MB download on first use)",
        size.approx_size_mb()
    );
    let model_path = model_resolver::resolve(size, None, Some(Box::new(download_progress)))
        .map_err(|e| RunError::ModelUnavailable {
            size,
            detail: e.to_string(),
        })?;
    eprintln!();

    let recognizer = WhisperRecognizer::load(&model_path, size).map_err(|e| {
        RunError::ModelUnavailable {
            size,
            detail: e.to_string(),
        }
    })?;
    Ok(Box::new(recognizer))
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading speech model... {pct}%");
    } else {
        eprint!("\rDownloading speech model... {downloaded} bytes");
    }
}
