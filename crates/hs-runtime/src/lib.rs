mod config;
mod contract;
mod decode;
mod encode;
mod engine;
mod runner;
mod sink;

pub use config::{EvalConfig, DEFAULT_LABEL};
pub use contract::{extract_result, RESULT_BINDING};
pub use decode::{decode_result, decode_value};
pub use encode::{encode_inputs, encode_value};
pub use runner::ScriptRunner;
pub use sink::{CapturingSink, DiscardSink, PrintSink, TracingSink};
