//! Character Display Wire Protocol
//!
//! Line-addressed command set of the serial character-matrix display.
//! Every line write is a 3-byte cursor prefix, one byte holding the
//! numeric line index, then exactly `width` ASCII bytes.

use std::io::{self, Write};
use thiserror::Error;

/// Number of text rows on the display
pub const LINE_COUNT: u8 = 4;

/// Command groups sent once at startup to prepare the device
pub const INIT_SEQUENCE: [[u8; 3]; 2] = [[0xFE, 0x56, 0x01], [0xFE, 0x56, 0x02]];

/// Prefix of every line write: command byte, cursor set, column one
pub const WRITE_LINE_PREFIX: [u8; 3] = [0xFE, 0x47, 0x01];

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("Line {line} text is {len} characters, display width is {width}")]
    LineOverflow { line: u8, len: usize, width: usize },
    #[error("Line {0} is outside the display (1-4)")]
    LineOutOfRange(u8),
    #[error("Line {0} contains non-ASCII text")]
    NonAscii(u8),
    #[error("Serial transport error: {0}")]
    Transport(#[from] io::Error),
}

/// One command for the display
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DisplayCommand {
    Init,
    ClearLine { line: u8 },
    WriteLine { line: u8, message: String },
}

impl DisplayCommand {
    /// Encode to wire bytes for a display `width` characters wide.
    ///
    /// `WriteLine` messages must already be exactly `width` long.
    pub(crate) fn encode(&self, width: usize) -> Vec<u8> {
        match self {
            DisplayCommand::Init => INIT_SEQUENCE.concat(),
            DisplayCommand::ClearLine { line } => line_frame(*line, &" ".repeat(width)),
            DisplayCommand::WriteLine { line, message } => {
                debug_assert_eq!(message.len(), width, "unpadded message for line {}", line);
                line_frame(*line, message)
            }
        }
    }
}

fn line_frame(line: u8, message: &str) -> Vec<u8> {
    let mut frame = Vec::with_capacity(WRITE_LINE_PREFIX.len() + 1 + message.len());
    frame.extend_from_slice(&WRITE_LINE_PREFIX);
    frame.push(line);
    frame.extend_from_slice(message.as_bytes());
    frame
}

/// Pad `left` and `right` apart so the message is exactly `width` long.
pub fn compose_line(line: u8, left: &str, right: &str, width: usize) -> Result<String, DisplayError> {
    if !left.is_ascii() || !right.is_ascii() {
        return Err(DisplayError::NonAscii(line));
    }
    let len = left.len() + right.len();
    if len > width {
        return Err(DisplayError::LineOverflow { line, len, width });
    }
    Ok(format!("{}{}{}", left, " ".repeat(width - len), right))
}

/// Display attached to a byte sink, usually the serial port
pub struct DisplayProtocol<W: Write> {
    port: W,
    width: usize,
}

impl<W: Write> DisplayProtocol<W> {
    pub fn new(port: W, width: usize) -> Self {
        Self { port, width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn get_ref(&self) -> &W {
        &self.port
    }

    pub fn into_inner(self) -> W {
        self.port
    }

    /// Send the startup handshake
    pub fn initialize(&mut self) -> Result<(), DisplayError> {
        self.send(&DisplayCommand::Init)
    }

    /// Blank one line
    pub fn clear_line(&mut self, line: u8) -> Result<(), DisplayError> {
        check_line(line)?;
        self.send(&DisplayCommand::ClearLine { line })
    }

    /// Blank every line, top to bottom
    pub fn clear(&mut self) -> Result<(), DisplayError> {
        for line in 1..=LINE_COUNT {
            self.clear_line(line)?;
        }
        Ok(())
    }

    /// Write `left` flush left and `right` flush right on `line`.
    ///
    /// Text that does not fit is rejected, never truncated, and nothing
    /// is transmitted.
    pub fn write_line(&mut self, line: u8, left: &str, right: &str) -> Result<(), DisplayError> {
        check_line(line)?;
        let message = compose_line(line, left, right, self.width)?;
        self.send(&DisplayCommand::WriteLine { line, message })
    }

    fn send(&mut self, command: &DisplayCommand) -> Result<(), DisplayError> {
        let frame = command.encode(self.width);
        tracing::trace!("display frame {:02X?}", frame);
        self.port.write_all(&frame)?;
        self.port.flush()?;
        Ok(())
    }
}

fn check_line(line: u8) -> Result<(), DisplayError> {
    if (1..=LINE_COUNT).contains(&line) {
        Ok(())
    } else {
        Err(DisplayError::LineOutOfRange(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display() -> DisplayProtocol<Vec<u8>> {
        DisplayProtocol::new(Vec::new(), 20)
    }

    /// Message bytes of a single line frame
    fn message(frame: &[u8]) -> &str {
        std::str::from_utf8(&frame[4..]).unwrap()
    }

    #[test]
    fn test_init_sequence_bytes() {
        let mut d = display();
        d.initialize().unwrap();
        assert_eq!(
            d.into_inner(),
            vec![0xFE, 0x56, 0x01, 0xFE, 0x56, 0x02]
        );
    }

    #[test]
    fn test_write_line_frame_layout() {
        let mut d = display();
        d.write_line(3, "Equity", "$123.45").unwrap();
        let frame = d.into_inner();

        assert_eq!(&frame[..3], &[0xFE, 0x47, 0x01]);
        assert_eq!(frame[3], 3, "line index is the raw number, not an ASCII digit");
        assert_eq!(frame.len(), 4 + 20);
        assert_eq!(message(&frame), "Equity       $123.45");
    }

    #[test]
    fn test_padding_fills_width_exactly() {
        for (left, right) in [("", ""), ("A", ""), ("", "B"), ("Market Status", "Open")] {
            let composed = compose_line(1, left, right, 20).unwrap();
            assert_eq!(composed.len(), 20);
            assert!(composed.starts_with(left));
            assert!(composed.ends_with(right));
        }
    }

    #[test]
    fn test_full_width_is_verbatim() {
        let composed = compose_line(1, "0123456789", "abcdefghij", 20).unwrap();
        assert_eq!(composed, "0123456789abcdefghij");
    }

    #[test]
    fn test_overflow_transmits_nothing() {
        let mut d = display();
        let err = d.write_line(1, "Authenticating with", "Robinhood").unwrap_err();

        assert!(matches!(
            err,
            DisplayError::LineOverflow { line: 1, len: 28, width: 20 }
        ));
        assert!(d.get_ref().is_empty());
    }

    #[test]
    fn test_line_out_of_range() {
        let mut d = display();
        assert!(matches!(d.write_line(0, "x", ""), Err(DisplayError::LineOutOfRange(0))));
        assert!(matches!(d.write_line(5, "x", ""), Err(DisplayError::LineOutOfRange(5))));
        assert!(matches!(d.clear_line(9), Err(DisplayError::LineOutOfRange(9))));
        assert!(d.get_ref().is_empty());
    }

    #[test]
    fn test_non_ascii_rejected() {
        let mut d = display();
        assert!(matches!(d.write_line(2, "Équité", ""), Err(DisplayError::NonAscii(2))));
        assert!(d.get_ref().is_empty());
    }

    #[test]
    fn test_clear_writes_spaces_to_every_line() {
        let mut d = display();
        d.clear().unwrap();
        let bytes = d.into_inner();

        assert_eq!(bytes.len(), 4 * 24);
        for (i, frame) in bytes.chunks(24).enumerate() {
            assert_eq!(&frame[..3], &WRITE_LINE_PREFIX);
            assert_eq!(frame[3], i as u8 + 1);
            assert_eq!(message(frame), " ".repeat(20));
        }
    }

    #[test]
    fn test_clear_line_matches_blank_write() {
        let blank = DisplayCommand::ClearLine { line: 2 }.encode(20);
        let write = DisplayCommand::WriteLine {
            line: 2,
            message: " ".repeat(20),
        }
        .encode(20);
        assert_eq!(blank, write);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "unpadded message")]
    fn test_encode_refuses_unpadded_message() {
        DisplayCommand::WriteLine {
            line: 1,
            message: "Equity".to_string(),
        }
        .encode(20);
    }

    struct BrokenPort;

    impl Write for BrokenPort {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "unplugged"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_transport_failure_propagates() {
        let mut d = DisplayProtocol::new(BrokenPort, 20);
        assert!(matches!(d.initialize(), Err(DisplayError::Transport(_))));
        assert!(matches!(d.write_line(1, "Equity", ""), Err(DisplayError::Transport(_))));
    }
}
