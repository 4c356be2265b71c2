//! repl - Session control for the interactive loop
//!
//! Usage in Rhai:
//! ```rhai
//! repl::set_prompt(">> ");
//! repl::dump();
//! repl::quit();
//! ```

use rhai::EvalAltResult;
use std::sync::{Arc, RwLock};

/// State shared between the REPL driver and native functions.
#[derive(Debug, Default)]
pub struct ReplState {
    pub quit_requested: bool,
    pub prompt: String,
    /// Lines printed by scripts, drained by the driver after each eval
    pub output: Vec<String>,
    /// Positions in `output` where `dump()` was called
    pub dump_at: Vec<usize>,
}

impl ReplState {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }
}

/// Create the repl module with access to the shared state
pub fn create_module(state: Arc<RwLock<ReplState>>) -> rhai::Module {
    let mut module = rhai::Module::new();

    // quit()
    {
        let s = Arc::clone(&state);
        module.set_native_fn("quit", move || -> Result<(), Box<EvalAltResult>> {
            request_quit(&s);
            Ok(())
        });
    }

    // dump()
    {
        let s = Arc::clone(&state);
        module.set_native_fn("dump", move || -> Result<(), Box<EvalAltResult>> {
            request_dump(&s);
            Ok(())
        });
    }

    // set_prompt(prompt: &str)
    {
        let s = Arc::clone(&state);
        module.set_native_fn(
            "set_prompt",
            move |prompt: &str| -> Result<(), Box<EvalAltResult>> {
                if let Ok(mut state) = s.write() {
                    state.prompt = prompt.to_string();
                }
                Ok(())
            },
        );
    }

    // prompt() -> String
    {
        let s = Arc::clone(&state);
        module.set_native_fn("prompt", move || -> Result<String, Box<EvalAltResult>> {
            Ok(s.read().map(|s| s.prompt.clone()).unwrap_or_default())
        });
    }

    module
}

pub fn request_quit(state: &RwLock<ReplState>) {
    if let Ok(mut state) = state.write() {
        state.quit_requested = true;
    }
}

pub fn request_dump(state: &RwLock<ReplState>) {
    if let Ok(mut state) = state.write() {
        let at = state.output.len();
        state.dump_at.push(at);
    }
}
