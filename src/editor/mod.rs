mod buffer;
mod cursor;
mod history;
mod session;

pub use buffer::LineBuffer;
pub use cursor::Cursor;
pub use history::HistoryStore;
pub use session::edit_line;
