//! Decorator
//! Example: File Operations Wrapper
//!
//! Codecs wrap a [`DataSource`] and transform data on the way in and out.
//! Decorators stack: `Rot13::new(Base64::new(file))` rot13-encodes first, then
//! base64-encodes the result before it reaches the file.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {codec} data: {reason}")]
    Decode { codec: &'static str, reason: String },
}

pub trait DataSource {
    /// Replace the stored data.
    fn write(&mut self, data: &str) -> Result<(), SourceError>;
    fn read(&self) -> Result<String, SourceError>;
}

impl<S: DataSource + ?Sized> DataSource for Box<S> {
    fn write(&mut self, data: &str) -> Result<(), SourceError> {
        (**self).write(data)
    }

    fn read(&self) -> Result<String, SourceError> {
        (**self).read()
    }
}

// =============================================================================
// Concrete sources
// =============================================================================

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SourceError {
        SourceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl DataSource for FileSource {
    fn write(&mut self, data: &str) -> Result<(), SourceError> {
        fs::write(&self.path, data).map_err(|e| self.io_error(e))
    }

    fn read(&self) -> Result<String, SourceError> {
        fs::read_to_string(&self.path).map_err(|e| self.io_error(e))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySource {
    data: String,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// What actually got stored, bypassing every decorator.
    pub fn raw(&self) -> &str {
        &self.data
    }
}

impl DataSource for MemorySource {
    fn write(&mut self, data: &str) -> Result<(), SourceError> {
        self.data = data.to_string();
        Ok(())
    }

    fn read(&self) -> Result<String, SourceError> {
        Ok(self.data.clone())
    }
}

// =============================================================================
// Decorators
// =============================================================================

macro_rules! decorator {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name<S> {
            inner: S,
        }

        impl<S: DataSource> $name<S> {
            pub fn new(inner: S) -> Self {
                $name { inner }
            }

            /// The wrapped source.
            pub fn inner(&self) -> &S {
                &self.inner
            }

            pub fn into_inner(self) -> S {
                self.inner
            }
        }
    };
}

decorator!(
    /// Applies rot13 to ASCII letters; everything else passes through.
    Rot13
);
decorator!(
    /// Stores data as standard padded base64.
    Base64
);

pub fn rot13(data: &str) -> String {
    data.chars()
        .map(|c| match c {
            'a'..='z' => (((c as u8 - b'a') + 13) % 26 + b'a') as char,
            'A'..='Z' => (((c as u8 - b'A') + 13) % 26 + b'A') as char,
            _ => c,
        })
        .collect()
}

impl<S: DataSource> DataSource for Rot13<S> {
    fn write(&mut self, data: &str) -> Result<(), SourceError> {
        self.inner.write(&rot13(data))
    }

    fn read(&self) -> Result<String, SourceError> {
        // rot13 is its own inverse
        self.inner.read().map(|data| rot13(&data))
    }
}

impl<S: DataSource> DataSource for Base64<S> {
    fn write(&mut self, data: &str) -> Result<(), SourceError> {
        self.inner.write(&STANDARD.encode(data))
    }

    fn read(&self) -> Result<String, SourceError> {
        let encoded = self.inner.read()?;
        let bytes = STANDARD
            .decode(encoded.trim_end())
            .map_err(|e| SourceError::Decode {
                codec: "base64",
                reason: e.to_string(),
            })?;
        String::from_utf8(bytes).map_err(|e| SourceError::Decode {
            codec: "base64",
            reason: e.to_string(),
        })
    }
}
