use super::record::WordFormRecord;
use super::source::DictionarySource;
use crate::error::{RandwordError, Result};
use log::{debug, trace};
use rand::Rng;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SamplerOptions {
    /// Reject dictionaries whose first line is not a word count.
    pub require_count_header: bool,
}

/// Picks dictionary lines by seeking to random byte offsets.
///
/// A random offset is resynced to the start of the following line, so a
/// line's chance of being picked is proportional to the length of the line
/// before it. Offsets in the final line have nothing after them and are
/// redrawn. Without a count header nothing precedes the first word line, so
/// there the final line wraps around to it instead. The count header, when
/// present, is never picked.
#[derive(Debug)]
pub struct DictionarySampler<S> {
    source: S,
    data_start: usize,
    advertised_words: Option<usize>,
}

impl<S: DictionarySource> DictionarySampler<S> {
    pub fn new(source: S) -> Result<Self> {
        Self::with_options(source, SamplerOptions::default())
    }

    pub fn with_options(source: S, options: SamplerOptions) -> Result<Self> {
        let bytes = source.as_bytes();
        let (advertised_words, data_start) = read_count_header(bytes);

        if advertised_words.is_none() && options.require_count_header {
            return Err(RandwordError::invalid_dictionary(
                "first line is not a word count",
            ));
        }
        if bytes[data_start..].iter().all(u8::is_ascii_whitespace) {
            return Err(RandwordError::invalid_dictionary("dictionary has no words"));
        }

        debug!(
            "dictionary of {} bytes, {} words advertised",
            bytes.len(),
            advertised_words.map_or_else(|| "no".to_string(), |n| n.to_string())
        );

        Ok(Self {
            source,
            data_start,
            advertised_words,
        })
    }

    /// Word count from the header line, if the dictionary has one.
    pub fn advertised_words(&self) -> Option<usize> {
        self.advertised_words
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Draw `count` records. The first invalid line aborts the whole draw.
    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Result<Vec<WordFormRecord>> {
        let bytes = self.source.as_bytes();
        let mut records = Vec::with_capacity(count);

        while records.len() < count {
            let offset = rng.gen_range(0..bytes.len());
            let Some((start, line)) = self.line_after(offset) else {
                trace!("offset {offset} has no line after it, redrawing");
                continue;
            };
            let line = line.trim_ascii_end();

            let text = std::str::from_utf8(line).map_err(|_| {
                RandwordError::invalid_dictionary(format!("line at byte {start} is not UTF-8"))
            })?;
            let record = WordFormRecord::parse(text)?;
            trace!("offset {offset} picked {:?}", record.base);
            records.push(record);
        }

        Ok(records)
    }

    /// The full line following the one containing `offset`, with its start.
    /// `None` when `offset` is in the final line and nothing follows it.
    fn line_after(&self, offset: usize) -> Option<(usize, &[u8])> {
        let bytes = self.source.as_bytes();
        let next = match bytes[offset..].iter().position(|&b| b == b'\n') {
            Some(pos) => offset + pos + 1,
            None => bytes.len(),
        };
        let start = if next < bytes.len() {
            next
        } else if self.data_start == 0 {
            // A headerless first line is only reachable by wrapping.
            0
        } else {
            return None;
        };
        let end = bytes[start..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(bytes.len(), |pos| start + pos);

        Some((start, &bytes[start..end]))
    }
}

/// Sample `count` records from `source`.
pub fn sample_words<S, R>(source: S, count: usize, rng: &mut R) -> Result<Vec<WordFormRecord>>
where
    S: DictionarySource,
    R: Rng + ?Sized,
{
    DictionarySampler::new(source)?.sample(count, rng)
}

/// Split off a leading decimal word count. Returns the count and the offset
/// where word lines begin.
fn read_count_header(bytes: &[u8]) -> (Option<usize>, usize) {
    let end = bytes.iter().position(|&b| b == b'\n');
    let first = &bytes[..end.unwrap_or(bytes.len())];
    let first = first.trim_ascii();

    if first.is_empty() || !first.iter().all(u8::is_ascii_digit) {
        return (None, 0);
    }
    let count = std::str::from_utf8(first)
        .ok()
        .and_then(|s| s.parse::<usize>().ok());
    match count {
        Some(n) => (Some(n), end.map_or(bytes.len(), |e| e + 1)),
        None => (None, 0),
    }
}
