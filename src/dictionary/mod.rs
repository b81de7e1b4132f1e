pub mod record;
pub mod sampler;
pub mod source;

pub use record::WordFormRecord;
pub use sampler::{sample_words, DictionarySampler, SamplerOptions};
pub use source::{DictionarySource, InMemoryDictionary, MappedDictionary};
