//! Audio-to-text transcription core: audio decoding, Whisper model
//! acquisition and inference, and transcript persistence, behind
//! swappable domain seams.

pub mod audio;
pub mod output;
pub mod pipeline;
pub mod shared;
pub mod transcription;
