use std::fmt;
use std::io::{self, Read};

use tracing::warn;

const ESC: u8 = 0x1b;
const CSI: u8 = b'[';
const BACKSPACE: u8 = 0x08;
const DEL: u8 = 0x7f;

/// Longest burst of bytes classified as one key.
const READ_CHUNK: usize = 4;

/// A logical key decoded from one read of the input device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    Commit,
    Backspace,
    ForwardDelete,
    CursorLeft,
    CursorRight,
    HistoryOlder,
    HistoryNewer,
    Home,
    End,
    Printable(u8),
    Unrecognized(RawBytes),
}

/// Raw bytes of an escape sequence the decoder did not understand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBytes(pub Vec<u8>);

impl fmt::Display for RawBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{b}")?;
        }
        Ok(())
    }
}

/// Classify one read worth of bytes. Returns `None` for an empty read.
///
/// Only the first byte is looked at unless it starts an escape sequence;
/// nothing is carried over between calls.
pub fn decode(bytes: &[u8]) -> Option<KeyEvent> {
    let event = match *bytes.first()? {
        b'\r' | b'\n' => KeyEvent::Commit,
        BACKSPACE | DEL => KeyEvent::Backspace,
        ESC => decode_escape(bytes),
        b => KeyEvent::Printable(b),
    };
    Some(event)
}

fn decode_escape(bytes: &[u8]) -> KeyEvent {
    let event = match bytes.get(1..3) {
        Some(&[CSI, b'A']) => KeyEvent::HistoryOlder,
        Some(&[CSI, b'B']) => KeyEvent::HistoryNewer,
        Some(&[CSI, b'C']) => KeyEvent::CursorRight,
        Some(&[CSI, b'D']) => KeyEvent::CursorLeft,
        Some(&[CSI, 72]) => KeyEvent::Home,
        Some(&[CSI, 70]) => KeyEvent::End,
        // `ESC [ 3 ~` on real terminals; the trailing `~` is not checked
        Some(&[CSI, 51]) => KeyEvent::ForwardDelete,
        _ => KeyEvent::Unrecognized(RawBytes(bytes.to_vec())),
    };
    if let KeyEvent::Unrecognized(raw) = &event {
        warn!(bytes = %raw, "unrecognized escape sequence");
    }
    event
}

/// Block until the next key arrives on `input`.
///
/// A zero-length read means the input is closed and is reported as
/// `UnexpectedEof`; interrupted reads are retried.
pub fn read_event<R: Read + ?Sized>(input: &mut R) -> io::Result<KeyEvent> {
    let mut buf = [0u8; READ_CHUNK];
    loop {
        let n = match input.read(&mut buf) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        return decode(&buf[..n]).ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "input closed while editing")
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_commits() {
        assert_eq!(decode(b"\r"), Some(KeyEvent::Commit));
        assert_eq!(decode(b"\n"), Some(KeyEvent::Commit));
    }

    #[test]
    fn backspace_and_del_both_erase() {
        assert_eq!(decode(&[0x08]), Some(KeyEvent::Backspace));
        assert_eq!(decode(&[0x7f]), Some(KeyEvent::Backspace));
    }

    #[test]
    fn arrow_keys() {
        assert_eq!(decode(b"\x1b[A"), Some(KeyEvent::HistoryOlder));
        assert_eq!(decode(b"\x1b[B"), Some(KeyEvent::HistoryNewer));
        assert_eq!(decode(b"\x1b[C"), Some(KeyEvent::CursorRight));
        assert_eq!(decode(b"\x1b[D"), Some(KeyEvent::CursorLeft));
    }

    #[test]
    fn home_end_use_literal_bytes() {
        assert_eq!(decode(&[27, 91, 72]), Some(KeyEvent::Home));
        assert_eq!(decode(&[27, 91, 70]), Some(KeyEvent::End));
    }

    #[test]
    fn forward_delete_ignores_trailing_tilde() {
        assert_eq!(decode(b"\x1b[3~"), Some(KeyEvent::ForwardDelete));
        assert_eq!(decode(b"\x1b[3"), Some(KeyEvent::ForwardDelete));
    }

    #[test]
    fn unknown_csi_keeps_raw_bytes() {
        let event = decode(b"\x1b[Z");
        assert_eq!(
            event,
            Some(KeyEvent::Unrecognized(RawBytes(vec![27, 91, 90])))
        );
    }

    #[test]
    fn split_escape_sequence_is_unrecognized() {
        assert!(matches!(decode(b"\x1b"), Some(KeyEvent::Unrecognized(_))));
        assert!(matches!(decode(b"\x1b["), Some(KeyEvent::Unrecognized(_))));
        assert!(matches!(decode(b"\x1bOA"), Some(KeyEvent::Unrecognized(_))));
    }

    #[test]
    fn printable_takes_first_byte_only() {
        assert_eq!(decode(b"a"), Some(KeyEvent::Printable(b'a')));
        assert_eq!(decode(b"xyz"), Some(KeyEvent::Printable(b'x')));
        assert_eq!(decode(&[0xc3, 0xa9]), Some(KeyEvent::Printable(0xc3)));
    }

    #[test]
    fn empty_read_decodes_to_nothing() {
        assert_eq!(decode(b""), None);
    }

    #[test]
    fn raw_bytes_display_as_decimal_list() {
        assert_eq!(RawBytes(vec![27, 91, 90]).to_string(), "27 91 90");
    }

    #[test]
    fn read_event_reports_eof() {
        let mut input: &[u8] = b"";
        let err = read_event(&mut input).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn read_event_decodes_one_chunk() {
        let mut input: &[u8] = b"\x1b[D";
        assert_eq!(read_event(&mut input).unwrap(), KeyEvent::CursorLeft);
    }
}
