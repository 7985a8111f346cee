//! Tokenizer for PDF content streams.
//!
//! Splits decoded content-stream bytes into numbers, strings, names,
//! structural brackets and operator keywords. Content streams are fully
//! decoded before interpretation, so the lexer works on an in-memory slice.

use super::error::{EngineError, EngineResult};

/// A lexical token from a content stream.
///
/// Hex strings are decoded at the lexer level and folded into [`Token::String`];
/// the interpreter never needs to distinguish the two spellings.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// End of stream
    Eof,

    /// Boolean keyword (`true` / `false`)
    Boolean(bool),

    /// `null` keyword
    Null,

    /// Numeric value (integers and reals)
    Number(f64),

    /// String value, from `(literal)` or `<hex>` spelling
    String(Vec<u8>),

    /// Name value (from `/Name`)
    Name(String),

    /// Operator keyword (`q`, `cm`, `Tj`, `Do`, ...)
    Operator(String),

    /// Array start `[`
    ArrayStart,

    /// Array end `]`
    ArrayEnd,

    /// Dictionary start `<<`
    DictStart,

    /// Dictionary end `>>`
    DictEnd,
}

/// Content-stream lexer.
pub struct Lexer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Lexer { data, pos: 0 }
    }

    /// Checks if a byte is whitespace according to the PDF spec.
    ///
    /// PDF whitespace: NUL, TAB, LF, FF, CR, SPACE
    fn is_whitespace(ch: u8) -> bool {
        matches!(ch, 0x00 | 0x09 | 0x0A | 0x0C | 0x0D | 0x20)
    }

    /// Checks if a byte is a delimiter according to the PDF spec.
    ///
    /// PDF delimiters: ( ) < > [ ] { } / %
    fn is_delimiter(ch: u8) -> bool {
        matches!(ch, b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%')
    }

    /// Checks if a byte is special (whitespace or delimiter).
    fn is_special(ch: u8) -> bool {
        Self::is_whitespace(ch) || Self::is_delimiter(ch)
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    /// Skips whitespace and `%`-comments.
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == b'%' {
                // Comment runs to end of line
                while let Some(c) = self.peek() {
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                    self.pos += 1;
                }
            } else if Self::is_whitespace(ch) {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Returns the next token from the stream.
    pub fn next_token(&mut self) -> EngineResult<Token> {
        self.skip_whitespace_and_comments();

        let Some(ch) = self.peek() else {
            return Ok(Token::Eof);
        };

        match ch {
            b'0'..=b'9' | b'+' | b'-' | b'.' => self.read_number(),
            b'(' => self.read_literal_string(),
            b'<' => {
                if self.data.get(self.pos + 1) == Some(&b'<') {
                    self.pos += 2;
                    Ok(Token::DictStart)
                } else {
                    self.read_hex_string()
                }
            }
            b'>' => {
                if self.data.get(self.pos + 1) == Some(&b'>') {
                    self.pos += 2;
                    Ok(Token::DictEnd)
                } else {
                    Err(EngineError::parse("unexpected '>'"))
                }
            }
            b'/' => self.read_name(),
            b'[' => {
                self.pos += 1;
                Ok(Token::ArrayStart)
            }
            b']' => {
                self.pos += 1;
                Ok(Token::ArrayEnd)
            }
            b')' => Err(EngineError::parse("unexpected ')'")),
            b'{' | b'}' => {
                // Braces only appear inside PostScript function streams; a
                // content stream treats them as one-byte operators.
                self.pos += 1;
                Ok(Token::Operator((ch as char).to_string()))
            }
            _ => self.read_keyword(),
        }
    }

    /// Parses an integer or real number.
    fn read_number(&mut self) -> EngineResult<Token> {
        let start = self.pos;
        if matches!(self.peek(), Some(b'+') | Some(b'-')) {
            self.pos += 1;
        }
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() || ch == b'.' {
                self.pos += 1;
            } else {
                break;
            }
        }

        let text = std::str::from_utf8(&self.data[start..self.pos])
            .map_err(|_| EngineError::parse("malformed number"))?;
        // "4." and "-.5" are legal PDF spellings that str::parse rejects or
        // accepts inconsistently; normalize the bare trailing dot.
        let normalized = text.strip_suffix('.').unwrap_or(text);
        normalized
            .parse::<f64>()
            .map(Token::Number)
            .map_err(|_| EngineError::parse(format!("malformed number '{}'", text)))
    }

    /// Parses a `(literal)` string with escapes and balanced nesting.
    fn read_literal_string(&mut self) -> EngineResult<Token> {
        self.pos += 1; // consume '('
        let mut buf = Vec::new();
        let mut depth = 1usize;

        loop {
            let Some(ch) = self.advance() else {
                return Err(EngineError::parse("unterminated string"));
            };
            match ch {
                b'(' => {
                    depth += 1;
                    buf.push(ch);
                }
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(Token::String(buf));
                    }
                    buf.push(ch);
                }
                b'\\' => {
                    let Some(esc) = self.advance() else {
                        return Err(EngineError::parse("unterminated string escape"));
                    };
                    match esc {
                        b'n' => buf.push(b'\n'),
                        b'r' => buf.push(b'\r'),
                        b't' => buf.push(b'\t'),
                        b'b' => buf.push(0x08),
                        b'f' => buf.push(0x0C),
                        b'(' | b')' | b'\\' => buf.push(esc),
                        b'\r' => {
                            // Line continuation; swallow an optional LF
                            if self.peek() == Some(b'\n') {
                                self.pos += 1;
                            }
                        }
                        b'\n' => {}
                        b'0'..=b'7' => {
                            // Up to three octal digits
                            let mut value = (esc - b'0') as u32;
                            for _ in 0..2 {
                                match self.peek() {
                                    Some(d @ b'0'..=b'7') => {
                                        value = value * 8 + (d - b'0') as u32;
                                        self.pos += 1;
                                    }
                                    _ => break,
                                }
                            }
                            buf.push((value & 0xFF) as u8);
                        }
                        // Unknown escapes drop the backslash
                        other => buf.push(other),
                    }
                }
                _ => buf.push(ch),
            }
        }
    }

    /// Parses a `<hex>` string. An odd trailing digit is padded with zero.
    fn read_hex_string(&mut self) -> EngineResult<Token> {
        self.pos += 1; // consume '<'
        let mut buf = Vec::new();
        let mut digits: Vec<u8> = Vec::new();

        loop {
            let Some(ch) = self.advance() else {
                return Err(EngineError::parse("unterminated hex string"));
            };
            match ch {
                b'>' => break,
                _ if Self::is_whitespace(ch) => {}
                _ => {
                    let digit = (ch as char)
                        .to_digit(16)
                        .ok_or_else(|| EngineError::parse("invalid hex digit in string"))?;
                    digits.push(digit as u8);
                }
            }
        }

        if digits.len() % 2 == 1 {
            digits.push(0);
        }
        for pair in digits.chunks(2) {
            buf.push(pair[0] << 4 | pair[1]);
        }
        Ok(Token::String(buf))
    }

    /// Parses a `/Name`, resolving `#xx` escapes.
    fn read_name(&mut self) -> EngineResult<Token> {
        self.pos += 1; // consume '/'
        let mut name = String::new();

        while let Some(ch) = self.peek() {
            if Self::is_special(ch) {
                break;
            }
            self.pos += 1;
            if ch == b'#' {
                let hi = self.advance();
                let lo = self.advance();
                match (
                    hi.and_then(|c| (c as char).to_digit(16)),
                    lo.and_then(|c| (c as char).to_digit(16)),
                ) {
                    (Some(h), Some(l)) => name.push(((h * 16 + l) as u8) as char),
                    _ => return Err(EngineError::parse("invalid #-escape in name")),
                }
            } else {
                name.push(ch as char);
            }
        }

        Ok(Token::Name(name))
    }

    /// Parses a bare keyword: an operator, `true`, `false` or `null`.
    fn read_keyword(&mut self) -> EngineResult<Token> {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if Self::is_special(ch) {
                break;
            }
            self.pos += 1;
        }

        if self.pos == start {
            return Err(EngineError::parse(format!(
                "unexpected byte 0x{:02X}",
                self.data[self.pos]
            )));
        }

        let keyword = String::from_utf8_lossy(&self.data[start..self.pos]).into_owned();
        Ok(match keyword.as_str() {
            "true" => Token::Boolean(true),
            "false" => Token::Boolean(false),
            "null" => Token::Null,
            _ => Token::Operator(keyword),
        })
    }

    /// Reads the raw data of an inline image, from just after the `ID`
    /// operator up to the closing `EI`.
    ///
    /// The data is binary and unframed, so the only reliable terminator is a
    /// whitespace-delimited `EI` keyword.
    pub fn read_inline_image_data(&mut self) -> EngineResult<Vec<u8>> {
        // A single whitespace byte separates ID from the data
        if self.peek().is_some_and(Self::is_whitespace) {
            self.pos += 1;
        }

        let start = self.pos;
        let mut i = self.pos;
        while i + 1 < self.data.len() {
            if self.data[i] == b'E'
                && self.data[i + 1] == b'I'
                && (i == start || Self::is_whitespace(self.data[i - 1]))
                && self
                    .data
                    .get(i + 2)
                    .is_none_or(|&ch| Self::is_special(ch))
            {
                // Trim the single whitespace byte preceding EI
                let end = if i > start { i - 1 } else { i };
                self.pos = i + 2;
                return Ok(self.data[start..end].to_vec());
            }
            i += 1;
        }

        Err(EngineError::parse("inline image data missing EI terminator"))
    }
}
