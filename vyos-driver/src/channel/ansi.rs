//! ANSI escape stripping for captured command output.
//!
//! VyOS op-mode scripts sometimes emit colour and pager control sequences
//! even on a non-interactive channel. Output is run through a `vte` parser
//! and only printable characters, newlines and tabs are kept.

use vte::{Parser, Perform};

#[derive(Default)]
struct Printable {
    out: String,
}

impl Perform for Printable {
    fn print(&mut self, c: char) {
        self.out.push(c);
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            b'\n' => self.out.push('\n'),
            b'\t' => self.out.push('\t'),
            // \r, bells, backspaces
            _ => {}
        }
    }
}

/// Strip ANSI escape sequences and control characters from raw output.
pub fn strip_ansi(data: &[u8]) -> String {
    let mut parser = Parser::new();
    let mut printable = Printable::default();
    parser.advance(&mut printable, data);
    printable.out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(strip_ansi(b"eth0 up\n\tlo up"), "eth0 up\n\tlo up");
    }

    #[test]
    fn test_colour_codes_removed() {
        assert_eq!(strip_ansi(b"\x1b[32mu/u\x1b[0m"), "u/u");
    }

    #[test]
    fn test_crlf_normalized() {
        assert_eq!(strip_ansi(b"line1\r\nline2\r\n"), "line1\nline2\n");
    }
}
