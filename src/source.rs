use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{DiffcountError, Result};

/// Anything a [`FileSource`] can pull bytes from.
pub trait ReadSeek: Read + Seek + Send {}

impl<T: Read + Seek + Send> ReadSeek for T {}

/// A finite, seekable stream of bytes.
pub struct FileSource {
    name: String,
    len: Option<u64>,
    reader: Box<dyn ReadSeek>,
}

impl FileSource {
    pub fn open(path: &Path) -> Result<Self> {
        let open_err = |source| DiffcountError::SourceOpen {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(open_err)?;
        let len = file.metadata().map_err(open_err)?.len();

        Ok(Self {
            name: path.display().to_string(),
            len: Some(len),
            reader: Box::new(file),
        })
    }

    /// Wraps an already opened reader. Its size is unknown to the source.
    pub fn from_reader(name: impl Into<String>, reader: impl ReadSeek + 'static) -> Self {
        Self {
            name: name.into(),
            len: None,
            reader: Box::new(reader),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> Option<u64> {
        self.len
    }

    fn seek(&mut self, offset: u64) -> Result<()> {
        self.reader
            .seek(SeekFrom::Start(offset))
            .map(|_| ())
            .map_err(|source| DiffcountError::Seek {
                name: self.name.clone(),
                offset,
                source,
            })
    }

    // Keeps reading until `buf` is full or the reader hits end-of-data, so
    // a short count never means anything but exhaustion.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(DiffcountError::IoRead {
                        name: self.name.clone(),
                        source,
                    })
                }
            }
        }
        Ok(filled)
    }
}

impl fmt::Debug for FileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSource")
            .field("name", &self.name)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

/// An endless run of one byte value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantSource {
    pub value: u8,
}

#[derive(Debug)]
pub enum ByteSource {
    File(FileSource),
    Constant(ConstantSource),
}

impl ByteSource {
    pub fn open(path: &Path) -> Result<Self> {
        FileSource::open(path).map(ByteSource::File)
    }

    pub fn constant(value: u8) -> Self {
        ByteSource::Constant(ConstantSource { value })
    }

    pub fn name(&self) -> String {
        match self {
            ByteSource::File(file) => file.name().to_string(),
            ByteSource::Constant(c) => format!("constant 0x{:02x}", c.value),
        }
    }

    /// Size in bytes of a file-backed source, when known.
    pub fn len(&self) -> Option<u64> {
        match self {
            ByteSource::File(file) => file.len(),
            ByteSource::Constant(_) => None,
        }
    }

    /// Positions the source at `offset`. A no-op for constants.
    pub fn seek(&mut self, offset: u64) -> Result<()> {
        match self {
            ByteSource::File(file) => file.seek(offset),
            ByteSource::Constant(_) => Ok(()),
        }
    }

    /// Writes up to `buf.len()` bytes into `buf` and returns how many were
    /// produced. `Ok(0)` on a non-empty buffer means the source is exhausted.
    pub fn fill(&mut self, buf: &mut [u8]) -> Result<usize> {
        match self {
            ByteSource::File(file) => file.fill(buf),
            ByteSource::Constant(c) => {
                buf.fill(c.value);
                Ok(buf.len())
            }
        }
    }
}
