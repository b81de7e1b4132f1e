use crate::error::{RandwordError, Result};
use memmap2::{Mmap, MmapOptions};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Randomly addressable dictionary bytes.
pub trait DictionarySource {
    fn as_bytes(&self) -> &[u8];

    fn byte_len(&self) -> usize {
        self.as_bytes().len()
    }
}

impl<T: DictionarySource + ?Sized> DictionarySource for &T {
    fn as_bytes(&self) -> &[u8] {
        (**self).as_bytes()
    }
}

/// A `.dic` file mapped into memory.
#[derive(Debug)]
pub struct MappedDictionary {
    path: PathBuf,
    // Zero-length files cannot be mapped on every platform.
    mmap: Option<Mmap>,
}

impl MappedDictionary {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| RandwordError::file_access(path, e))?;
        let len = file
            .metadata()
            .map_err(|e| RandwordError::file_access(path, e))?
            .len();

        let mmap = if len == 0 {
            None
        } else {
            // Read-only map; the file is not expected to change while we sample.
            let mmap = unsafe { MmapOptions::new().map(&file) }
                .map_err(|e| RandwordError::file_access(path, e))?;
            Some(mmap)
        };

        Ok(Self {
            path: path.to_path_buf(),
            mmap,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DictionarySource for MappedDictionary {
    fn as_bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }
}

/// Dictionary contents held in an owned buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryDictionary {
    bytes: Vec<u8>,
}

impl InMemoryDictionary {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self { bytes })
    }
}

impl From<Vec<u8>> for InMemoryDictionary {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&str> for InMemoryDictionary {
    fn from(text: &str) -> Self {
        Self::new(text.as_bytes().to_vec())
    }
}

impl DictionarySource for InMemoryDictionary {
    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
