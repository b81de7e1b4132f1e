// Library surface shared by the binary, the integration tests and benches.
pub mod affix;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod word_generator;

pub use error::{RandwordError, Result};
pub use word_generator::{flag_set, WordGenConfig, WordGenerator};
