use std::path::{Path, PathBuf};

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::audio::domain::audio_segment::AudioSegment;
use crate::transcription::domain::model_size::ModelSize;
use crate::transcription::domain::speech_recognizer::SpeechRecognizer;
use crate::transcription::domain::transcript::{Transcript, TranscriptSegment};

/// Speech recognizer using whisper.cpp via whisper-rs.
///
/// Owns a loaded Whisper context for one model size; each call runs a
/// single blocking inference pass over the full audio.
pub struct WhisperRecognizer {
    ctx: WhisperContext,
    size: ModelSize,
    model_path: PathBuf,
}

impl std::fmt::Debug for WhisperRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhisperRecognizer")
            .field("size", &self.size)
            .field("model_path", &self.model_path)
            .finish_non_exhaustive()
    }
}

impl WhisperRecognizer {
    /// Load the ggml weights at `model_path` into a ready-to-use context.
    pub fn load(model_path: &Path, size: ModelSize) -> Result<Self, Box<dyn std::error::Error>> {
        if !model_path.exists() {
            return Err(format!("Whisper model not found at: {}", model_path.display()).into());
        }
        let ctx = WhisperContext::new_with_params(
            model_path.to_str().ok_or("Invalid model path")?,
            WhisperContextParameters::default(),
        )
        .map_err(|e| format!("Failed to load Whisper model: {e}"))?;

        Ok(Self {
            ctx,
            size,
            model_path: model_path.to_path_buf(),
        })
    }

    pub fn size(&self) -> ModelSize {
        self.size
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl SpeechRecognizer for WhisperRecognizer {
    fn transcribe(&self, audio: &AudioSegment) -> Result<Transcript, Box<dyn std::error::Error>> {
        let mut state = self
            .ctx
            .create_state()
            .map_err(|e| format!("Failed to create Whisper state: {e}"))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 0 });
        params.set_language(Some("auto"));
        params.set_translate(false);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_n_threads(num_cpus().min(4) as i32);

        state
            .full(params, audio.samples())
            .map_err(|e| format!("Whisper inference failed: {e}"))?;

        let mut segments = Vec::new();
        let num_segments = state.full_n_segments();

        for seg_idx in 0..num_segments {
            let segment = match state.get_segment(seg_idx) {
                Some(s) => s,
                None => continue,
            };

            let text = match segment.to_str() {
                Ok(t) => t,
                Err(_) => continue,
            };
            if text.is_empty() {
                continue;
            }

            // Segment timestamps are in centiseconds (10ms units)
            let start_time = segment.start_timestamp() as f64 / 100.0;
            let end_time = segment.end_timestamp() as f64 / 100.0;

            segments.push(TranscriptSegment {
                text: text.to_string(),
                start_time,
                end_time,
            });
        }

        Ok(Transcript::new(segments))
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
