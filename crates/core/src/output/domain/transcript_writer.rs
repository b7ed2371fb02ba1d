use std::path::Path;

use crate::transcription::domain::transcript::Transcript;

/// Domain interface for persisting a transcript.
pub trait TranscriptWriter: Send {
    /// Write the transcript text to `path`, replacing any existing file.
    fn write(&self, path: &Path, transcript: &Transcript)
        -> Result<(), Box<dyn std::error::Error>>;
}
