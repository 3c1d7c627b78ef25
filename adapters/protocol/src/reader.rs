//! Whitespace-delimited integer tokens pulled lazily from the engine stream.

use std::{collections::VecDeque, io::BufRead, str::FromStr};

use rampart_core::ProtocolFormatError;

/// Reads integer tokens one line at a time.
///
/// Lines are only pulled when the buffered tokens run out, so the reader never
/// waits on input the engine sends only after seeing this turn's output.
#[derive(Debug)]
pub struct TokenReader<R> {
    source: R,
    line: String,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    /// Wraps a buffered source.
    pub fn new(source: R) -> Self {
        Self {
            source,
            line: String::new(),
            pending: VecDeque::new(),
        }
    }

    /// Reads an unsigned 32-bit value for `field`.
    pub fn read_u32(&mut self, field: &'static str) -> Result<u32, ProtocolFormatError> {
        self.read(field)
    }

    /// Reads a signed 32-bit value for `field`.
    pub fn read_i32(&mut self, field: &'static str) -> Result<i32, ProtocolFormatError> {
        self.read(field)
    }

    /// Reads an element count for `field`.
    pub fn read_count(&mut self, field: &'static str) -> Result<usize, ProtocolFormatError> {
        self.read(field)
    }

    fn read<T: FromStr>(&mut self, field: &'static str) -> Result<T, ProtocolFormatError> {
        let token = self.next_token(field)?;
        token
            .parse()
            .map_err(|_| ProtocolFormatError::InvalidInteger { field, token })
    }

    fn next_token(&mut self, field: &'static str) -> Result<String, ProtocolFormatError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }

            self.line.clear();
            if self.source.read_line(&mut self.line)? == 0 {
                return Err(ProtocolFormatError::Truncated { field });
            }
            self.pending
                .extend(self.line.split_whitespace().map(str::to_owned));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_span_lines_and_blank_lines() {
        let mut reader = TokenReader::new("1 2\n\n  3\t-4\n".as_bytes());
        assert_eq!(reader.read_u32("a").expect("a"), 1);
        assert_eq!(reader.read_count("b").expect("b"), 2);
        assert_eq!(reader.read_u32("c").expect("c"), 3);
        assert_eq!(reader.read_i32("d").expect("d"), -4);
        assert!(matches!(
            reader.read_u32("e"),
            Err(ProtocolFormatError::Truncated { field: "e" })
        ));
    }

    #[test]
    fn non_integer_tokens_are_reported() {
        let mut reader = TokenReader::new("seven".as_bytes());
        match reader.read_u32("turn count") {
            Err(ProtocolFormatError::InvalidInteger { field, token }) => {
                assert_eq!(field, "turn count");
                assert_eq!(token, "seven");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn negative_values_do_not_fit_unsigned_fields() {
        let mut reader = TokenReader::new("-1".as_bytes());
        assert!(matches!(
            reader.read_u32("hp"),
            Err(ProtocolFormatError::InvalidInteger { .. })
        ));
    }
}
