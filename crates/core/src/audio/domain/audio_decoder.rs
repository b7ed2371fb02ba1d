use std::path::Path;

use crate::audio::domain::audio_segment::AudioSegment;

/// Domain interface for decoding an audio file to PCM samples.
pub trait AudioDecoder: Send {
    /// Decode the best audio stream to a mono [`AudioSegment`] at the given
    /// sample rate. A source with no decodable audio stream is an error.
    fn decode(
        &self,
        path: &Path,
        target_sample_rate: u32,
    ) -> Result<AudioSegment, Box<dyn std::error::Error>>;
}
