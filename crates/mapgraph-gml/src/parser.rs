use crate::ParseError;
use crate::ast::{Document, Entry, Value};
use crate::lexer::{Lexer, Token, TokenKind};

pub fn parse_document(input: &str) -> Result<Document, ParseError> {
    let parser = Parser::new(input)?;
    parser.parse_document()
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    depth: usize,
}

const MAX_DEPTH: usize = 64;

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(input);
        let first = lexer.next_token()?;
        Ok(Self {
            lexer,
            current: first,
            depth: 0,
        })
    }

    fn parse_document(mut self) -> Result<Document, ParseError> {
        let entries = self.parse_entries()?;
        match self.current.kind {
            TokenKind::Eof => Ok(Document::new(entries)),
            _ => Err(self.error_here("unexpected ']' at top level")),
        }
    }

    fn parse_entries(&mut self) -> Result<Vec<Entry>, ParseError> {
        let mut entries = Vec::new();
        loop {
            match self.current.kind.clone() {
                TokenKind::Eof | TokenKind::CloseList => return Ok(entries),
                TokenKind::Key(key) => {
                    let offset = self.current.start;
                    self.advance()?;
                    let value = self.parse_value()?;
                    entries.push(Entry { key, value, offset });
                }
                _ => return Err(self.error_here("expected key")),
            }
        }
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        let value = match self.current.kind.clone() {
            TokenKind::Int(value) => Value::Int(value),
            TokenKind::Real(value) => Value::Real(value),
            TokenKind::Str(value) => Value::Str(value),
            TokenKind::Key(word) if word == "INF" => Value::Real(f64::INFINITY),
            TokenKind::Key(word) if word == "NAN" => Value::Real(f64::NAN),
            TokenKind::OpenList => return self.parse_list(),
            _ => return Err(self.error_here("expected value")),
        };
        self.advance()?;
        Ok(value)
    }

    fn parse_list(&mut self) -> Result<Value, ParseError> {
        let open = self.current.start;
        if self.depth >= MAX_DEPTH {
            return Err(self.error_here("lists nested too deeply"));
        }
        self.depth += 1;
        self.advance()?;
        let entries = self.parse_entries()?;
        match self.current.kind {
            TokenKind::CloseList => {
                self.depth -= 1;
                self.advance()?;
                Ok(Value::List(entries))
            }
            _ => Err(ParseError::new("unterminated '[' list".to_string(), open)),
        }
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn error_here(&self, message: &str) -> ParseError {
        ParseError::new(message.to_string(), self.current.start)
    }
}
