pub mod invocation;
pub mod run_result;
pub mod transcribe_use_case;
