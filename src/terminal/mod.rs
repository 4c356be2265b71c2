mod mode;

pub use mode::{ModeGuard, TerminalMode, for_stdin};

#[cfg(test)]
pub(crate) use mode::tests::RecordingTerminal;
