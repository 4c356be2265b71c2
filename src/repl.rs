use std::io::{self, Read, Write};

use tracing::{debug, info};

use crate::config::Settings;
use crate::editor::{HistoryStore, edit_line};
use crate::scripting::ScriptEngine;
use crate::terminal::TerminalMode;

const BANNER: &str = r#"print("Interactive mode...\nType quit(); to exit,\nor print(...); to print something,\nor dump() to dump the symbol table!");"#;

/// Read-eval-print loop tying the line editor to the script engine.
pub struct Repl {
    engine: ScriptEngine,
    history: HistoryStore,
    banner: bool,
}

impl Repl {
    pub fn new(settings: &Settings) -> Self {
        Self {
            engine: ScriptEngine::new(settings),
            history: HistoryStore::new(settings.history_size, settings.line_capacity),
            banner: settings.banner,
        }
    }

    /// Run until `quit()` is called or the input closes.
    pub fn run<T, R, W>(&mut self, terminal: &mut T, input: &mut R, output: &mut W) -> io::Result<()>
    where
        T: TerminalMode + ?Sized,
        R: Read + ?Sized,
        W: Write,
    {
        info!(raw_mode = terminal.raw_mode(), "repl started");
        if self.banner {
            self.execute(BANNER, output)?;
        }

        let mut index = 0;
        while !self.engine.quit_requested() {
            write!(output, "{}", self.engine.prompt())?;
            output.flush()?;

            index = match edit_line(&mut self.history, index, terminal, input, &mut *output) {
                Ok(index) => index,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    writeln!(output)?;
                    debug!("input closed, leaving repl");
                    break;
                }
                Err(e) => return Err(e),
            };

            let command = self
                .history
                .slot(index)
                .map(|line| line.text().into_owned())
                .unwrap_or_default();
            self.execute(&command, output)?;
        }

        info!("repl finished");
        Ok(())
    }

    /// Evaluate `script` and write whatever it printed, or its error.
    pub fn execute<W: Write>(&mut self, script: &str, output: &mut W) -> io::Result<()> {
        let result = self.engine.eval(script);
        for line in self.engine.take_output() {
            writeln!(output, "{line}")?;
        }
        if let Err(e) = result {
            writeln!(output, "ERROR: {e}")?;
        }
        output.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::terminal::RecordingTerminal;

    /// One byte per read, like a raw-mode tty fed by a fast typist.
    struct Typist(VecDeque<u8>);

    impl Typist {
        fn new(text: &str) -> Self {
            Self(text.bytes().collect())
        }
    }

    impl Read for Typist {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.0.pop_front() {
                Some(b) if !buf.is_empty() => {
                    buf[0] = b;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    fn quiet() -> Settings {
        Settings {
            banner: false,
            prompt: "> ".to_string(),
            ..Settings::default()
        }
    }

    fn run_session(settings: &Settings, typed: &str) -> (String, RecordingTerminal) {
        let mut repl = Repl::new(settings);
        let mut term = RecordingTerminal::default();
        let mut out = Vec::new();
        repl.run(&mut term, &mut Typist::new(typed), &mut out).unwrap();
        (String::from_utf8_lossy(&out).into_owned(), term)
    }

    #[test]
    fn evaluates_lines_until_quit() {
        let (out, term) = run_session(&quiet(), "let x = 40 + 2;\rprint(x);\rquit();\rprint(1);\r");

        assert!(out.contains("> 42\n"));
        assert!(!out.contains("> 1\n"));
        assert_eq!(term.enters, 3);
        assert_eq!(term.leaves, 3);
    }

    #[test]
    fn script_errors_are_printed_and_loop_continues() {
        let (out, _) = run_session(&quiet(), "nope();\rprint(\"still here\");\rquit();\r");

        assert!(out.contains("ERROR: "));
        assert!(out.contains("> still here\n"));
    }

    #[test]
    fn eof_ends_the_loop_with_terminal_restored() {
        let (out, term) = run_session(&quiet(), "print(7);\rprint(8");

        assert!(out.contains("> 7\n"));
        assert!(!out.contains("> 8"));
        assert_eq!(term.enters, term.leaves);
    }

    #[test]
    fn banner_is_printed_through_print() {
        let settings = Settings {
            banner: true,
            ..quiet()
        };
        let (out, _) = run_session(&settings, "quit();\r");

        assert!(out.starts_with("> Interactive mode...\n"));
        assert!(out.contains("dump() to dump the symbol table!"));
    }

    #[test]
    fn prompt_change_takes_effect_on_next_line() {
        let (out, _) = run_session(&quiet(), "repl::set_prompt(\"js> \");\rquit();\r");
        assert!(out.contains("\r\njs> "));
    }

    #[test]
    fn line_capacity_limits_commands() {
        let settings = Settings {
            line_capacity: 9,
            ..quiet()
        };
        // "print(12345);" is cut to "print(12" and fails to parse
        let (out, _) = run_session(&settings, "print(12345);\rquit();\r");
        assert!(out.contains("ERROR: "));
        assert!(!out.contains("> 12345"));
    }
}
