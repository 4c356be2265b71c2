//! API modules exposed to REPL scripts
//!
//! Each submodule provides functions under `<module>::*`

pub mod repl;
