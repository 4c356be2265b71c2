//! Scripting module - Rhai runtime behind the REPL
//!
//! Session controls are exposed under the `repl` namespace:
//! - `repl::quit()`, `repl::dump()` - also available unqualified
//! - `repl::prompt()`, `repl::set_prompt(s)`

mod api;
mod engine;

pub use engine::ScriptEngine;
