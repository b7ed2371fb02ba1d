use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::output::domain::transcript_writer::TranscriptWriter;
use crate::transcription::domain::transcript::Transcript;

/// Writes transcript text to a file with std::fs.
///
/// The file handle is scoped to the call: flushed on success and closed on
/// every exit path when it drops. Re-running against the same path
/// overwrites (last-write-wins); a failed write may leave a truncated file
/// behind, and the run result is authoritative over the file contents.
pub struct TextFileWriter;

impl TextFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptWriter for TextFileWriter {
    fn write(
        &self,
        path: &Path,
        transcript: &Transcript,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut file = File::create(path)?;
        file.write_all(transcript.text().as_bytes())?;
        file.flush()?;
        Ok(())
    }
}
