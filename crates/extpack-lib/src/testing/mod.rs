//! Test fixtures shared by unit tests and the end-to-end crate

pub mod filesystem;

pub use filesystem::TempDirFixture;
