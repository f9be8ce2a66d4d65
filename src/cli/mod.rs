//! Command-line interface for the `lzom` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity and the shared `DISPLAY_LEVEL` atomic with its print macros. |
//! | [`op_mode`]   | `OpMode`, extension-based mode inference, and default output names. |
//! | [`args`]      | clap definition of the command line and per-file `Job` resolution. |
//!
//! Typical call sequence: `Args::parse` → `Args::jobs` → dispatch to [`crate::io`].

pub mod constants;
pub mod op_mode;
pub mod args;
