//! The Rhai engine behind the REPL
//!
//! Natives available to every line:
//! - `print(x)` - echoed back prefixed with `> `
//! - `dump()` - list every variable and function defined so far
//! - `quit()` - leave the REPL after the current line
//! - `repl::*` - the same controls plus prompt access

use std::mem;
use std::sync::{Arc, RwLock};

use rhai::{AST, Engine, Scope};
use tracing::debug;

use super::api::{self, repl::ReplState};
use crate::config::Settings;

/// Rhai engine with a scope that lives across REPL lines
pub struct ScriptEngine {
    engine: Engine,
    state: Arc<RwLock<ReplState>>,
    scope: Scope<'static>,
    // Functions defined on earlier lines; statements are dropped after each run
    ast: AST,
}

impl ScriptEngine {
    pub fn new(settings: &Settings) -> Self {
        let state = Arc::new(RwLock::new(ReplState::new(settings.prompt.clone())));
        let engine = Self::create_engine(Arc::clone(&state), settings.max_operations);

        Self {
            engine,
            state,
            scope: Scope::new(),
            ast: AST::empty(),
        }
    }

    fn create_engine(state: Arc<RwLock<ReplState>>, max_operations: u64) -> Engine {
        let mut engine = Engine::new();

        // Safety limits
        engine.set_max_expr_depths(64, 64);
        engine.set_max_operations(max_operations);

        engine.register_static_module("repl", api::repl::create_module(Arc::clone(&state)).into());

        // Top-level shortcuts
        {
            let s = Arc::clone(&state);
            engine.register_fn("quit", move || api::repl::request_quit(&s));
        }
        {
            let s = Arc::clone(&state);
            engine.register_fn("dump", move || api::repl::request_dump(&s));
        }

        {
            let s = Arc::clone(&state);
            engine.on_print(move |text| {
                if let Ok(mut state) = s.write() {
                    state.output.push(format!("> {text}"));
                }
            });
        }

        engine
    }

    /// Evaluate one line (or file) of script. Variables and functions it
    /// defines stay visible to later calls.
    pub fn eval(&mut self, script: &str) -> Result<(), String> {
        let ast = self
            .engine
            .compile_with_scope(&self.scope, script)
            .map_err(|e| format!("Parse error: {}", e))?;

        self.ast += ast;
        let result = self
            .engine
            .run_ast_with_scope(&mut self.scope, &self.ast)
            .map_err(|e| e.to_string());
        self.ast.clear_statements();

        let dump_at = self.take_dump_positions();
        if !dump_at.is_empty() {
            let lines = self.dump_lines();
            if let Ok(mut state) = self.state.write() {
                // back to front so earlier positions stay valid
                for &at in dump_at.iter().rev() {
                    let at = at.min(state.output.len());
                    state.output.splice(at..at, lines.iter().cloned());
                }
            }
        }

        if let Err(e) = &result {
            debug!(error = %e, "script failed");
        }
        result
    }

    /// One line per variable and script function currently defined
    pub fn dump_lines(&self) -> Vec<String> {
        let vars = self.scope.iter().map(|(name, constant, value)| {
            let kind = if constant { "const" } else { "let" };
            format!(">  {kind} {name} = {value:?}")
        });
        let fns = self
            .ast
            .iter_functions()
            .map(|f| format!(">  fn {}({})", f.name, f.params.join(", ")));
        vars.chain(fns).collect()
    }

    /// Printed lines since the last call
    pub fn take_output(&mut self) -> Vec<String> {
        self.state
            .write()
            .map(|mut s| mem::take(&mut s.output))
            .unwrap_or_default()
    }

    pub fn quit_requested(&self) -> bool {
        self.state.read().map(|s| s.quit_requested).unwrap_or(false)
    }

    pub fn prompt(&self) -> String {
        self.state.read().map(|s| s.prompt.clone()).unwrap_or_default()
    }

    fn take_dump_positions(&self) -> Vec<usize> {
        self.state
            .write()
            .map(|mut s| mem::take(&mut s.dump_at))
            .unwrap_or_default()
    }
}

impl Default for ScriptEngine {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}
