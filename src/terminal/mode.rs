use std::io;

use crossterm::terminal;
use crossterm::tty::IsTty;
use tracing::{debug, warn};

/// Whether this platform can switch a terminal into raw mode at all.
pub const RAW_MODE_SUPPORTED: bool = cfg!(any(unix, windows));

/// Something that can put the input device into raw mode and back.
pub trait TerminalMode {
    /// Save the current attributes and switch to raw mode.
    fn enter(&mut self) -> io::Result<()>;

    /// Restore the attributes saved by `enter`.
    fn leave(&mut self) -> io::Result<()>;

    /// False when `enter`/`leave` are no-ops and the host terminal keeps
    /// its own echo and line buffering.
    fn raw_mode(&self) -> bool;
}

/// Raw mode through crossterm, which saves and restores the termios state.
#[derive(Debug, Default)]
pub struct RawTerminal;

impl TerminalMode for RawTerminal {
    fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()
    }

    fn leave(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()
    }

    fn raw_mode(&self) -> bool {
        true
    }
}

/// Leaves the terminal alone. Used when stdin is not a terminal or the
/// platform has no raw mode.
#[derive(Debug, Default)]
pub struct PassthroughTerminal;

impl TerminalMode for PassthroughTerminal {
    fn enter(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn leave(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn raw_mode(&self) -> bool {
        false
    }
}

/// Pick the controller for this process's stdin.
pub fn for_stdin() -> Box<dyn TerminalMode> {
    if RAW_MODE_SUPPORTED && io::stdin().is_tty() {
        Box::new(RawTerminal)
    } else {
        debug!("stdin is not a terminal, raw mode disabled");
        Box::new(PassthroughTerminal)
    }
}

/// Raw mode held for the lifetime of the guard.
///
/// `release` restores the terminal and reports failure; dropping the guard
/// without releasing (an early `?` return, a panic) restores it best-effort.
pub struct ModeGuard<'a, T: TerminalMode + ?Sized> {
    terminal: &'a mut T,
    held: bool,
}

impl<'a, T: TerminalMode + ?Sized> ModeGuard<'a, T> {
    pub fn acquire(terminal: &'a mut T) -> io::Result<Self> {
        terminal.enter()?;
        Ok(Self {
            terminal,
            held: true,
        })
    }

    pub fn release(mut self) -> io::Result<()> {
        self.held = false;
        self.terminal.leave()
    }
}

impl<T: TerminalMode + ?Sized> Drop for ModeGuard<'_, T> {
    fn drop(&mut self) {
        if self.held {
            if let Err(e) = self.terminal.leave() {
                warn!(error = %e, "failed to restore terminal mode");
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records every mode switch instead of touching a real terminal.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingTerminal {
        pub enters: usize,
        pub leaves: usize,
        pub fail_enter: bool,
    }

    impl RecordingTerminal {
        pub fn is_raw(&self) -> bool {
            self.enters > self.leaves
        }
    }

    impl TerminalMode for RecordingTerminal {
        fn enter(&mut self) -> io::Result<()> {
            if self.fail_enter {
                return Err(io::Error::other("no tty"));
            }
            self.enters += 1;
            Ok(())
        }

        fn leave(&mut self) -> io::Result<()> {
            self.leaves += 1;
            Ok(())
        }

        fn raw_mode(&self) -> bool {
            true
        }
    }

    #[test]
    fn release_leaves_exactly_once() {
        let mut term = RecordingTerminal::default();
        let guard = ModeGuard::acquire(&mut term).unwrap();
        guard.release().unwrap();
        assert_eq!(term.enters, 1);
        assert_eq!(term.leaves, 1);
    }

    #[test]
    fn drop_without_release_restores() {
        let mut term = RecordingTerminal::default();
        {
            let _guard = ModeGuard::acquire(&mut term).unwrap();
        }
        assert_eq!(term.leaves, 1);
        assert!(!term.is_raw());
    }

    #[test]
    fn failed_enter_does_not_leave() {
        let mut term = RecordingTerminal {
            fail_enter: true,
            ..Default::default()
        };
        assert!(ModeGuard::acquire(&mut term).is_err());
        assert_eq!(term.leaves, 0);
    }

    #[test]
    fn passthrough_reports_no_raw_mode() {
        let mut term = PassthroughTerminal;
        assert!(!term.raw_mode());
        let guard = ModeGuard::acquire(&mut term).unwrap();
        guard.release().unwrap();
    }
}
