pub mod error;
pub mod types;
pub mod value;

pub use error::EvalError;
pub use types::*;
pub use value::*;
