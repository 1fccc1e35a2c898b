// docmask/src/archive.rs
//! Reading and re-writing office containers.
//!
//! Entries are read in archive order together with their compression method and
//! written back in that same order and method, so consumers that care about the
//! layout (HWPX requires a stored `mimetype` first) keep accepting the output.
//! The output is staged in a temporary file next to the destination and moved
//! into place only once the archive is complete.
//!
//! License: MIT OR APACHE 2.0

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Failures that abort processing of one document.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ArchiveError {
    #[error("cannot read '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{path}' is not a valid container: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("unsupported document type: '{0}'")]
    UnsupportedFormat(PathBuf),

    #[error("refusing to overwrite the input file '{0}'")]
    OutputIsInput(PathBuf),

    #[error("cannot write '{path}' (is it open in another program?): {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One archive entry, in memory.
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub data: Vec<u8>,
    pub compression: CompressionMethod,
    pub is_dir: bool,
}

/// An in-memory copy of a container, entries in their original order.
#[derive(Debug, Clone, Default)]
pub struct Container {
    pub entries: Vec<Entry>,
}

impl Container {
    pub fn read(path: &Path) -> Result<Self, ArchiveError> {
        let file = File::open(path).map_err(|source| ArchiveError::Unreadable { path: path.to_path_buf(), source })?;
        let corrupt = |source| ArchiveError::Corrupt { path: path.to_path_buf(), source };
        let mut archive = ZipArchive::new(file).map_err(corrupt)?;

        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).map_err(corrupt)?;
            let mut data = Vec::new();
            entry
                .read_to_end(&mut data)
                .map_err(|source| ArchiveError::Unreadable { path: path.to_path_buf(), source })?;
            entries.push(Entry {
                name: entry.name().to_string(),
                compression: entry.compression(),
                is_dir: entry.is_dir(),
                data,
            });
        }
        debug!("Read {} entries from {}.", entries.len(), path.display());
        Ok(Self { entries })
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Replaces the data of entry `name`. Returns `false` when no such entry exists.
    pub fn replace(&mut self, name: &str, data: Vec<u8>) -> bool {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                entry.data = data;
                true
            }
            None => false,
        }
    }

    /// Serializes the container into `writer`.
    pub fn write_to<W: Write + io::Seek>(&self, writer: W) -> zip::result::ZipResult<W> {
        let mut zip = ZipWriter::new(writer);
        for entry in &self.entries {
            let options = SimpleFileOptions::default().compression_method(entry.compression);
            if entry.is_dir {
                zip.add_directory(entry.name.as_str(), options)?;
            } else {
                zip.start_file(entry.name.as_str(), options)?;
                zip.write_all(&entry.data)?;
            }
        }
        zip.finish()
    }

    /// Writes the container to `output` atomically.
    ///
    /// `input` is the file the container was read from; writing over it is refused.
    pub fn save(&self, input: &Path, output: &Path) -> Result<(), ArchiveError> {
        if same_file(input, output) {
            return Err(ArchiveError::OutputIsInput(output.to_path_buf()));
        }
        let write_err = |source: io::Error| ArchiveError::OutputWrite { path: output.to_path_buf(), source };

        let dir = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let staged = NamedTempFile::new_in(&dir).map_err(write_err)?;
        let file = self
            .write_to(staged.reopen().map_err(write_err)?)
            .map_err(|e| write_err(io::Error::other(e)))?;
        file.sync_all().map_err(write_err)?;
        drop(file);

        staged.persist(output).map_err(|e| write_err(e.error))?;
        debug!("Wrote {} entries to {}.", self.entries.len(), output.display());
        Ok(())
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
