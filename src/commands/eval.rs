//! Runs generated code through a Ruby interpreter.

use crate::core::{Error, Result};
use crate::io::SourceFile;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub const RUBY: &str = "ruby";

/// Loads every input, then the stubs, so test/unit runs against them.
///
/// Files are required by absolute path; standard input is inlined.
pub fn build_program(sources: &[SourceFile], stubs: &str) -> String {
    let mut program = String::from("require 'test/unit'\n");
    for source in sources {
        if source.is_stdin() {
            program.push_str(&source.text);
            if !source.text.ends_with('\n') {
                program.push('\n');
            }
        } else {
            program.push_str(&format!(
                "require File.expand_path('{}')\n",
                ruby_single_quoted(&source.origin.to_string_lossy())
            ));
        }
    }
    program.push_str(stubs);
    program
}

fn ruby_single_quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

pub fn find_ruby() -> Result<PathBuf> {
    which::which(RUBY).map_err(|e| Error::interpreter(format!("{RUBY} not found on PATH: {e}")))
}

/// Feeds `program` to `ruby -` and returns its exit status.
pub fn run_program(ruby: &Path, program: &str) -> Result<i32> {
    log::debug!("running {} -", ruby.display());
    let mut child = Command::new(ruby)
        .arg("-")
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| Error::interpreter(format!("could not start {}: {e}", ruby.display())))?;

    // The pipe must be closed before waiting, so stdin is dropped here.
    let written = child
        .stdin
        .take()
        .map_or(Ok(()), |mut stdin| stdin.write_all(program.as_bytes()));

    let status = child.wait()?;
    match written {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => {
            log::debug!("{} exited before reading the whole program", ruby.display());
        }
        Err(e) => return Err(e.into()),
        Ok(()) => {}
    }
    Ok(status.code().unwrap_or(1))
}

pub fn eval(sources: &[SourceFile], stubs: &str) -> Result<i32> {
    let ruby = find_ruby()?;
    run_program(&ruby, &build_program(sources, stubs))
}
