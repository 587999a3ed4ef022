// Test utility module for testgap integration tests
#![allow(dead_code)]

use std::path::PathBuf;
use testgap::{SourceFile, TestgapConfig};

// Helper to create temporary test files
pub fn create_test_file(content: &str, name: &str) -> (tempfile::TempDir, PathBuf) {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join(name);
    std::fs::write(&file_path, content).expect("Failed to write test file");
    (temp_dir, file_path)
}

// Helper to write several files under one temporary root
pub fn create_test_tree(files: &[(&str, &str)]) -> tempfile::TempDir {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    for (name, content) in files {
        let path = temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directory");
        }
        std::fs::write(&path, content).expect("Failed to write test file");
    }
    temp_dir
}

pub fn source(name: &str, text: &str) -> SourceFile {
    SourceFile::new(name, text.to_string())
}

pub fn reverse_config() -> TestgapConfig {
    TestgapConfig::default().with_overrides(true, false)
}

// Path of the compiled binary under test
pub fn testgap_bin() -> &'static str {
    env!("CARGO_BIN_EXE_testgap")
}
