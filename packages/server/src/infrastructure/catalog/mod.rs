//! Video catalog implementations.

pub mod filesystem;

pub use filesystem::FsVideoCatalog;
