//! Operand objects and the pull parser feeding the stream executor.
//!
//! The parser turns lexer tokens into complete operand objects (arrays and
//! dictionaries included) and yields them interleaved with operator tokens.
//! The executor accumulates operands until an operator arrives.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use super::error::{EngineError, EngineResult};
use super::lexer::{Lexer, Token};

/// A content-stream operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Null value
    Null,

    /// Boolean value
    Boolean(bool),

    /// Numeric value (integers and reals)
    Number(f64),

    /// String value (raw bytes; text decoding is a font concern)
    String(Vec<u8>),

    /// Name value (from `/Name`)
    Name(String),

    /// Array of objects
    Array(Vec<Object>),

    /// Dictionary (name keys to objects)
    Dictionary(FxHashMap<String, Object>),
}

impl Object {
    /// A short tag for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Null => "null",
            Object::Boolean(_) => "boolean",
            Object::Number(_) => "number",
            Object::String(_) => "string",
            Object::Name(_) => "name",
            Object::Array(_) => "array",
            Object::Dictionary(_) => "dictionary",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Object::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&[u8]> {
        match self {
            Object::String(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Object]> {
        match self {
            Object::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&FxHashMap<String, Object>> {
        match self {
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }
}

/// One item pulled from a content stream: either an operand to accumulate or
/// an operator to dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentItem {
    Operand(Object),
    Operator(String),
}

/// Pull parser over a content stream.
pub struct ContentParser<'a> {
    lexer: Lexer<'a>,

    /// Items synthesized ahead of the cursor (inline images expand to
    /// several items at once).
    pending: VecDeque<ContentItem>,
}

impl<'a> ContentParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ContentParser {
            lexer: Lexer::new(data),
            pending: VecDeque::new(),
        }
    }

    /// Returns the next operand or operator, or `None` at end of stream.
    pub fn next_item(&mut self) -> EngineResult<Option<ContentItem>> {
        if let Some(item) = self.pending.pop_front() {
            return Ok(Some(item));
        }

        let token = self.lexer.next_token()?;
        match token {
            Token::Eof => Ok(None),
            Token::Operator(name) => {
                if name == "BI" {
                    self.parse_inline_image()?;
                    return Ok(self.pending.pop_front());
                }
                Ok(Some(ContentItem::Operator(name)))
            }
            other => Ok(Some(ContentItem::Operand(self.parse_object(other)?))),
        }
    }

    /// Builds a complete object from the given initial token.
    fn parse_object(&mut self, token: Token) -> EngineResult<Object> {
        match token {
            Token::Null => Ok(Object::Null),
            Token::Boolean(value) => Ok(Object::Boolean(value)),
            Token::Number(value) => Ok(Object::Number(value)),
            Token::String(bytes) => Ok(Object::String(bytes)),
            Token::Name(name) => Ok(Object::Name(name)),
            Token::ArrayStart => self.parse_array(),
            Token::DictStart => self.parse_dictionary(),
            Token::ArrayEnd => Err(EngineError::parse("unexpected ']'")),
            Token::DictEnd => Err(EngineError::parse("unexpected '>>'")),
            Token::Eof => Err(EngineError::parse("unexpected end of stream in object")),
            Token::Operator(name) => Err(EngineError::parse(format!(
                "operator '{}' inside composite object",
                name
            ))),
        }
    }

    fn parse_array(&mut self) -> EngineResult<Object> {
        let mut items = Vec::new();
        loop {
            let token = self.lexer.next_token()?;
            match token {
                Token::ArrayEnd => return Ok(Object::Array(items)),
                Token::Eof => return Err(EngineError::parse("unterminated array")),
                other => items.push(self.parse_object(other)?),
            }
        }
    }

    fn parse_dictionary(&mut self) -> EngineResult<Object> {
        let mut dict = FxHashMap::default();
        loop {
            let token = self.lexer.next_token()?;
            let key = match token {
                Token::DictEnd => return Ok(Object::Dictionary(dict)),
                Token::Name(name) => name,
                Token::Eof => return Err(EngineError::parse("unterminated dictionary")),
                other => {
                    return Err(EngineError::parse(format!(
                        "dictionary key must be a name, got {:?}",
                        other
                    )));
                }
            };
            let value_token = self.lexer.next_token()?;
            let value = self.parse_object(value_token)?;
            dict.insert(key, value);
        }
    }

    /// Consumes `BI <pairs> ID <data> EI` and queues it up as a dictionary
    /// operand, a string operand with the raw sample data, and a final `EI`
    /// operator so the executor sees the usual operand/operator shape.
    fn parse_inline_image(&mut self) -> EngineResult<()> {
        let mut dict = FxHashMap::default();
        loop {
            let token = self.lexer.next_token()?;
            match token {
                Token::Operator(ref op) if op == "ID" => break,
                Token::Name(key) => {
                    let value_token = self.lexer.next_token()?;
                    let value = self.parse_object(value_token)?;
                    dict.insert(key, value);
                }
                Token::Eof => {
                    return Err(EngineError::parse("unterminated inline image dictionary"));
                }
                other => {
                    return Err(EngineError::parse(format!(
                        "inline image key must be a name, got {:?}",
                        other
                    )));
                }
            }
        }

        let data = self.lexer.read_inline_image_data()?;
        self.pending
            .push_back(ContentItem::Operand(Object::Dictionary(dict)));
        self.pending
            .push_back(ContentItem::Operand(Object::String(data)));
        self.pending
            .push_back(ContentItem::Operator("EI".to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(input: &str) -> Vec<ContentItem> {
        let mut parser = ContentParser::new(input.as_bytes());
        let mut out = Vec::new();
        while let Some(item) = parser.next_item().unwrap() {
            out.push(item);
        }
        out
    }

    #[test]
    fn test_operands_then_operator() {
        assert_eq!(
            items("10 20 m"),
            vec![
                ContentItem::Operand(Object::Number(10.0)),
                ContentItem::Operand(Object::Number(20.0)),
                ContentItem::Operator("m".to_string()),
            ]
        );
    }

    #[test]
    fn test_nested_array() {
        let parsed = items("[(A) -120 [(B)]] TJ");
        assert_eq!(parsed.len(), 2);
        match &parsed[0] {
            ContentItem::Operand(Object::Array(elements)) => {
                assert_eq!(elements.len(), 3);
                assert_eq!(elements[0], Object::String(b"A".to_vec()));
                assert_eq!(elements[1], Object::Number(-120.0));
                assert_eq!(
                    elements[2],
                    Object::Array(vec![Object::String(b"B".to_vec())])
                );
            }
            other => panic!("expected array operand, got {:?}", other),
        }
    }

    #[test]
    fn test_dictionary_operand() {
        let parsed = items("/Span << /MCID 7 >> BDC");
        assert_eq!(parsed.len(), 3);
        match &parsed[1] {
            ContentItem::Operand(Object::Dictionary(dict)) => {
                assert_eq!(dict.get("MCID"), Some(&Object::Number(7.0)));
            }
            other => panic!("expected dictionary operand, got {:?}", other),
        }
    }

    #[test]
    fn test_inline_image_expansion() {
        let parsed = items("BI /W 2 /H 2 ID \x01\x02\x03\x04 EI Q");
        assert_eq!(parsed.len(), 4);
        match &parsed[0] {
            ContentItem::Operand(Object::Dictionary(dict)) => {
                assert_eq!(dict.get("W"), Some(&Object::Number(2.0)));
                assert_eq!(dict.get("H"), Some(&Object::Number(2.0)));
            }
            other => panic!("expected dictionary operand, got {:?}", other),
        }
        assert_eq!(
            parsed[1],
            ContentItem::Operand(Object::String(vec![1, 2, 3, 4]))
        );
        assert_eq!(parsed[2], ContentItem::Operator("EI".to_string()));
        assert_eq!(parsed[3], ContentItem::Operator("Q".to_string()));
    }

    #[test]
    fn test_bad_dictionary_key_is_error() {
        let mut parser = ContentParser::new(b"<< 3 /V >>");
        assert!(parser.next_item().is_err());
    }
}
