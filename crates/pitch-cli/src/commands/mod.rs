//! Subcommand handlers. Each one owns its output; none contains scaffolding
//! logic of its own.

pub mod completions;
pub mod go;
