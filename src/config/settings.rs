/// REPL settings that can be customized via Rhai config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    // Line editor
    pub history_size: usize,
    pub line_capacity: usize,

    // Prompt and output
    pub prompt: String,
    pub banner: bool,

    // Script limits
    pub max_operations: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_size: 10,
            line_capacity: 2048,

            prompt: "rhai> ".to_string(),
            banner: true,

            max_operations: 1_000_000,
        }
    }
}

impl Settings {
    pub const HISTORY_SIZE_RANGE: (usize, usize) = (1, 100);
    // cursor moves are emitted as 16-bit column counts
    pub const LINE_CAPACITY_RANGE: (usize, usize) = (2, u16::MAX as usize);
}
