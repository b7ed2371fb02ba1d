use crate::audio::domain::audio_segment::AudioSegment;
use crate::transcription::domain::transcript::Transcript;

/// Domain interface for speech-to-text transcription.
///
/// Implementations run one blocking inference pass over the full audio;
/// there is no partial or streaming output.
pub trait SpeechRecognizer: Send {
    fn transcribe(&self, audio: &AudioSegment) -> Result<Transcript, Box<dyn std::error::Error>>;
}
