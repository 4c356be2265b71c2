mod decoder;

pub use decoder::{KeyEvent, read_event};
