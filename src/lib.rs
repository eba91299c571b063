//! Lyrics catalog indexing library - shared modules for all binaries.

pub mod content;
pub mod index;
pub mod lang;
pub mod models;
pub mod moods;
pub mod progress;
pub mod resolver;
pub mod table;
