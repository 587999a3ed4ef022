pub mod walker;

use crate::core::{Error, Result};
use std::borrow::Cow;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Command-line argument meaning "read standard input".
pub const STDIN_ARG: &str = "-";

/// One unit of input text and where it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub origin: PathBuf,
    pub text: String,
}

impl SourceFile {
    pub fn new(origin: impl Into<PathBuf>, text: String) -> Self {
        Self {
            origin: origin.into(),
            text,
        }
    }

    pub fn is_stdin(&self) -> bool {
        self.origin == Path::new(STDIN_ARG)
    }
}

/// Reads `path` as text. Bytes that are not UTF-8 (a Latin-1 comment, say)
/// become U+FFFD instead of failing the whole file.
pub fn read_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::load_failure(path, e))?;
    Ok(decode(&bytes, path))
}

pub fn read_stdin() -> Result<String> {
    let mut bytes = Vec::new();
    std::io::stdin()
        .read_to_end(&mut bytes)
        .map_err(|e| Error::load_failure(STDIN_ARG, e))?;
    Ok(decode(&bytes, Path::new(STDIN_ARG)))
}

fn decode(bytes: &[u8], origin: &Path) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(text) => text.to_string(),
        Cow::Owned(text) => {
            log::debug!("{} is not valid UTF-8; invalid bytes replaced", origin.display());
            text
        }
    }
}

/// Expands command-line paths into sources.
///
/// Directories are walked for `.rb` files; `-` reads standard input once.
/// Anything unreadable is logged and left out.
pub fn load_sources(paths: &[PathBuf], ignore_patterns: &[String]) -> Vec<SourceFile> {
    let mut sources = Vec::new();
    let mut stdin_read = false;

    for path in paths {
        if path == Path::new(STDIN_ARG) {
            if stdin_read {
                log::debug!("Standard input already consumed; ignoring repeated -");
                continue;
            }
            stdin_read = true;
            match read_stdin() {
                Ok(text) => sources.push(SourceFile::new(STDIN_ARG, text)),
                Err(e) => log::warn!("{}", e),
            }
        } else if path.is_dir() {
            match walker::find_ruby_files(path, ignore_patterns) {
                Ok(files) => sources.extend(files.iter().filter_map(|f| load_one(f))),
                Err(e) => log::warn!("Could not walk {}: {}", path.display(), e),
            }
        } else if let Some(source) = load_one(path) {
            sources.push(source);
        }
    }

    sources
}

fn load_one(path: &Path) -> Option<SourceFile> {
    log::debug!("loading {}", path.display());
    match read_file(path) {
        Ok(text) => Some(SourceFile::new(path, text)),
        Err(e) => {
            log::warn!("{}", e);
            None
        }
    }
}
