//! Which files and which functions a run touches.

pub mod fs_scan;
pub mod globs;

pub use fs_scan::select_files;
