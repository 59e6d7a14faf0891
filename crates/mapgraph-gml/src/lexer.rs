use crate::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Key(String),
    Int(i64),
    Real(f64),
    Str(String),
    OpenList,
    CloseList,
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    len: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            len: input.len(),
        }
    }

    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        let bytes = self.input.as_bytes();
        while self.pos < self.len {
            let b = bytes[self.pos];
            if b.is_ascii_whitespace() {
                self.pos += 1;
                continue;
            }

            if b == b'#' {
                while self.pos < self.len && bytes[self.pos] != b'\n' {
                    self.pos += 1;
                }
                continue;
            }

            if b == b'[' || b == b']' {
                let start = self.pos;
                self.pos += 1;
                let kind = if b == b'[' {
                    TokenKind::OpenList
                } else {
                    TokenKind::CloseList
                };
                return Ok(Token {
                    kind,
                    start,
                    end: self.pos,
                });
            }

            if b == b'"' {
                return self.read_string();
            }

            if b.is_ascii_digit() || b == b'+' || b == b'-' || b == b'.' {
                return self.read_number();
            }

            if is_key_start(b) {
                return self.read_key();
            }

            return Err(ParseError::new(
                format!("unexpected character '{}'", self.input[self.pos..].chars().next().unwrap_or('?')),
                self.pos,
            ));
        }

        Ok(Token {
            kind: TokenKind::Eof,
            start: self.pos,
            end: self.pos,
        })
    }

    fn read_key(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        let bytes = self.input.as_bytes();
        self.pos += 1;
        while self.pos < self.len && is_key_continue(bytes[self.pos]) {
            self.pos += 1;
        }
        Ok(Token {
            kind: TokenKind::Key(self.input[start..self.pos].to_string()),
            start,
            end: self.pos,
        })
    }

    fn read_string(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        let search_start = self.pos + 1;
        if let Some(end_rel) = self.input[search_start..].find('"') {
            let end = search_start + end_rel;
            let text = unescape(&self.input[search_start..end], search_start)?;
            self.pos = end + 1;
            Ok(Token {
                kind: TokenKind::Str(text),
                start,
                end: self.pos,
            })
        } else {
            Err(ParseError::new("unterminated string".to_string(), start))
        }
    }

    fn read_number(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        let bytes = self.input.as_bytes();
        if bytes[self.pos] == b'+' || bytes[self.pos] == b'-' {
            self.pos += 1;
        }

        if self.input[self.pos..].starts_with("INF") {
            self.pos += 3;
            let value = if bytes[start] == b'-' {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            };
            return Ok(Token {
                kind: TokenKind::Real(value),
                start,
                end: self.pos,
            });
        }

        let mut is_real = false;
        let digits_start = self.pos;
        while self.pos < self.len && bytes[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if self.pos < self.len && bytes[self.pos] == b'.' {
            is_real = true;
            self.pos += 1;
            while self.pos < self.len && bytes[self.pos].is_ascii_digit() {
                self.pos += 1;
            }
        }
        let mantissa = &self.input[digits_start..self.pos];
        if mantissa.is_empty() || mantissa == "." {
            return Err(ParseError::new("expected digits".to_string(), start));
        }

        if self.pos < self.len && (bytes[self.pos] == b'e' || bytes[self.pos] == b'E') {
            is_real = true;
            self.pos += 1;
            if self.pos < self.len && (bytes[self.pos] == b'+' || bytes[self.pos] == b'-') {
                self.pos += 1;
            }
            let exponent_start = self.pos;
            while self.pos < self.len && bytes[self.pos].is_ascii_digit() {
                self.pos += 1;
            }
            if exponent_start == self.pos {
                return Err(ParseError::new("expected exponent digits".to_string(), start));
            }
        }

        if self.pos < self.len && is_key_continue(bytes[self.pos]) {
            return Err(ParseError::new("malformed number".to_string(), start));
        }

        let text = &self.input[start..self.pos];
        let kind = if is_real {
            let value = text
                .parse::<f64>()
                .map_err(|_| ParseError::new(format!("invalid real '{text}'"), start))?;
            TokenKind::Real(value)
        } else {
            let value = text
                .parse::<i64>()
                .map_err(|_| ParseError::new(format!("integer '{text}' out of range"), start))?;
            TokenKind::Int(value)
        };
        Ok(Token {
            kind,
            start,
            end: self.pos,
        })
    }
}

fn unescape(raw: &str, offset: usize) -> Result<String, ParseError> {
    if !raw.contains('&') {
        return Ok(raw.to_string());
    }

    let mut output = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        output.push_str(&rest[..amp]);
        let entity_start = offset + (raw.len() - rest.len()) + amp;
        let tail = &rest[amp..];
        let Some(semi) = tail.find(';') else {
            return Err(ParseError::new("unterminated character entity".to_string(), entity_start));
        };
        let name = &tail[1..semi];
        let decoded = match name {
            "quot" => '"',
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "apos" => '\'',
            _ => decode_numeric_entity(name)
                .ok_or_else(|| ParseError::new(format!("unknown character entity '&{name};'"), entity_start))?,
        };
        output.push(decoded);
        rest = &tail[semi + 1..];
    }
    output.push_str(rest);
    Ok(output)
}

fn decode_numeric_entity(name: &str) -> Option<char> {
    let digits = name.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}

fn is_key_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_key_continue(b: u8) -> bool {
    is_key_start(b) || b.is_ascii_digit()
}
