use std::path::Path;
use std::time::Instant;

use crate::audio::domain::audio_decoder::AudioDecoder;
use crate::output::domain::transcript_writer::TranscriptWriter;
use crate::pipeline::run_result::RunError;
use crate::shared::constants::WHISPER_SAMPLE_RATE;
use crate::transcription::domain::speech_recognizer::SpeechRecognizer;
use crate::transcription::domain::transcript::Transcript;

/// Drives one transcription run: decode, recognize, persist.
///
/// Stages run strictly in sequence on the calling thread; each stage
/// failure maps to its own [`RunError`] variant and ends the run. No
/// stage is retried and no partial transcript is written.
pub struct TranscribeAudioUseCase {
    decoder: Box<dyn AudioDecoder>,
    recognizer: Box<dyn SpeechRecognizer>,
    writer: Box<dyn TranscriptWriter>,
}

impl TranscribeAudioUseCase {
    pub fn new(
        decoder: Box<dyn AudioDecoder>,
        recognizer: Box<dyn SpeechRecognizer>,
        writer: Box<dyn TranscriptWriter>,
    ) -> Self {
        Self {
            decoder,
            recognizer,
            writer,
        }
    }

    pub fn run(&self, input_path: &Path, output_path: &Path) -> Result<Transcript, RunError> {
        // 1. Decode to the model's input format (16 kHz mono)
        let started = Instant::now();
        let audio = self
            .decoder
            .decode(input_path, WHISPER_SAMPLE_RATE)
            .map_err(|e| RunError::AudioDecode {
                path: input_path.to_path_buf(),
                detail: e.to_string(),
            })?;
        log::info!(
            "Decoded {:.1}s of audio in {:.1}s",
            audio.duration(),
            started.elapsed().as_secs_f64()
        );

        // 2. Single blocking inference pass over the full audio
        let started = Instant::now();
        let transcript = self
            .recognizer
            .transcribe(&audio)
            .map_err(|e| RunError::Inference {
                detail: e.to_string(),
            })?;
        log::info!(
            "Transcribed {} segments in {:.1}s",
            transcript.segments().len(),
            started.elapsed().as_secs_f64()
        );

        // 3. Persist before reporting success
        self.writer
            .write(output_path, &transcript)
            .map_err(|e| RunError::OutputWrite {
                path: output_path.to_path_buf(),
                detail: e.to_string(),
            })?;

        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::domain::audio_segment::AudioSegment;
    use crate::pipeline::run_result::ErrorKind;
    use crate::transcription::domain::transcript::TranscriptSegment;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    // ─── Stubs ───

    struct StubDecoder {
        result: Result<AudioSegment, String>,
        called: Arc<Mutex<bool>>,
    }

    impl AudioDecoder for StubDecoder {
        fn decode(
            &self,
            _: &Path,
            _: u32,
        ) -> Result<AudioSegment, Box<dyn std::error::Error>> {
            *self.called.lock().unwrap() = true;
            self.result.clone().map_err(|e| e.into())
        }
    }

    struct StubRecognizer {
        result: Result<Transcript, String>,
        called: Arc<Mutex<bool>>,
    }

    impl SpeechRecognizer for StubRecognizer {
        fn transcribe(&self, _: &AudioSegment) -> Result<Transcript, Box<dyn std::error::Error>> {
            *self.called.lock().unwrap() = true;
            self.result.clone().map_err(|e| e.into())
        }
    }

    struct StubWriter {
        fail: bool,
        written: Arc<Mutex<Vec<String>>>,
    }

    impl TranscriptWriter for StubWriter {
        fn write(
            &self,
            _: &Path,
            transcript: &Transcript,
        ) -> Result<(), Box<dyn std::error::Error>> {
            if self.fail {
                return Err("disk full".into());
            }
            self.written.lock().unwrap().push(transcript.text());
            Ok(())
        }
    }

    fn silent_audio() -> AudioSegment {
        AudioSegment::new(vec![0.0; 16000], 16000, 1)
    }

    fn hello_transcript() -> Transcript {
        Transcript::new(vec![TranscriptSegment {
            text: " hello".to_string(),
            start_time: 0.0,
            end_time: 1.0,
        }])
    }

    fn use_case(
        decoder: Result<AudioSegment, String>,
        recognizer: Result<Transcript, String>,
        writer_fails: bool,
    ) -> (
        TranscribeAudioUseCase,
        Arc<Mutex<bool>>,
        Arc<Mutex<bool>>,
        Arc<Mutex<Vec<String>>>,
    ) {
        let decode_called = Arc::new(Mutex::new(false));
        let transcribe_called = Arc::new(Mutex::new(false));
        let written = Arc::new(Mutex::new(Vec::new()));
        let uc = TranscribeAudioUseCase::new(
            Box::new(StubDecoder {
                result: decoder,
                called: decode_called.clone(),
            }),
            Box::new(StubRecognizer {
                result: recognizer,
                called: transcribe_called.clone(),
            }),
            Box::new(StubWriter {
                fail: writer_fails,
                written: written.clone(),
            }),
        );
        (uc, decode_called, transcribe_called, written)
    }

    #[test]
    fn test_successful_run_writes_transcript() {
        let (uc, _, _, written) =
            use_case(Ok(silent_audio()), Ok(hello_transcript()), false);

        let transcript = uc.run(Path::new("in.mp3"), Path::new("out.txt")).unwrap();

        assert_eq!(transcript.text(), " hello");
        assert_eq!(written.lock().unwrap().as_slice(), &[" hello".to_string()]);
    }

    #[test]
    fn test_decode_failure_maps_to_audio_decode_error() {
        let (uc, _, transcribe_called, written) = use_case(
            Err("corrupt container".to_string()),
            Ok(hello_transcript()),
            false,
        );

        let err = uc
            .run(Path::new("in.mp3"), Path::new("out.txt"))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::AudioDecodeError);
        assert!(err.to_string().contains("in.mp3"));
        // Terminal: inference never starts, nothing is written
        assert!(!*transcribe_called.lock().unwrap());
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_inference_failure_maps_to_inference_error() {
        let (uc, decode_called, _, written) = use_case(
            Ok(silent_audio()),
            Err("out of memory".to_string()),
            false,
        );

        let err = uc
            .run(Path::new("in.mp3"), Path::new("out.txt"))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InferenceError);
        assert!(*decode_called.lock().unwrap());
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_write_failure_maps_to_output_write_error() {
        let (uc, _, _, _) = use_case(Ok(silent_audio()), Ok(hello_transcript()), true);

        let err = uc
            .run(Path::new("in.mp3"), Path::new("out.txt"))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::OutputWriteError);
        assert!(err.to_string().contains("out.txt"));
    }

    #[test]
    fn test_rerun_produces_identical_transcript() {
        let (uc, _, _, written) =
            use_case(Ok(silent_audio()), Ok(hello_transcript()), false);

        let first = uc.run(Path::new("in.mp3"), Path::new("out.txt")).unwrap();
        let second = uc.run(Path::new("in.mp3"), Path::new("out.txt")).unwrap();

        assert_eq!(first, second);
        let written = written.lock().unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[0], written[1]);
    }
}
