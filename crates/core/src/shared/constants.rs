pub const WHISPER_SAMPLE_RATE: u32 = 16000;

pub const WHISPER_MODEL_BASE_URL: &str =
    "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

/// Default directory for derived transcript paths, relative to the
/// working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output";
