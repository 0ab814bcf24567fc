//! Matchers for selecting files to patch.

pub mod file;

pub use file::FileMatcher;
