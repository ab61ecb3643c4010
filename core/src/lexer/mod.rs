//! file: core/src/lexer/mod.rs
//! description: indentation-aware lexer for Vypr source text.
//!
//! The lexer walks the source a character at a time and produces `Token`s on
//! demand. Indentation is tracked with a stack of depths; entering a deeper
//! line emits a synthetic `Indent`, leaving one emits one `Dedent` per level
//! popped, and a depth that matches no open level is a lex error. Blank and
//! comment-only lines never participate in indentation.

pub mod err;
pub mod token;

use std::collections::VecDeque;

use crate::error::{Level, Location, Span, VyprErrorExt};
use crate::script::Script;
use err::LexError;
use token::{Token, TokenKind, TokenValue};

const TAB_WIDTH: usize = 4;

pub struct Lexer {
    file: String,
    chars: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    indent_stack: Vec<usize>,
    at_line_start: bool,
    pending: VecDeque<Token>,
}

impl Lexer {
    pub fn new(script: &Script) -> Self {
        Lexer {
            file: script.name.clone(),
            chars: script.content.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            indent_stack: vec![0],
            at_line_start: true,
            pending: VecDeque::new(),
        }
    }

    /// Tokenize the whole source. The returned sequence always ends with
    /// exactly one `Eof` token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, Box<dyn VyprErrorExt>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position + 1).copied()
    }

    fn advance(&mut self) {
        if let Some(c) = self.current() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.position += 1;
        }
    }

    pub fn next_token(&mut self) -> Result<Token, Box<dyn VyprErrorExt>> {
        if let Some(token) = self.pending.pop_front() {
            return Ok(token);
        }

        loop {
            if self.at_line_start {
                self.handle_line_start()?;
                self.at_line_start = false;
                if let Some(token) = self.pending.pop_front() {
                    return Ok(token);
                }
                if self.current().is_none() {
                    break;
                }
                continue;
            }

            match self.current() {
                None => break,
                Some('\n') => {
                    let (line, column) = (self.line, self.column);
                    self.advance();
                    self.at_line_start = true;
                    return Ok(Token::new(TokenKind::Newline, line, column));
                }
                Some(' ') | Some('\t') | Some('\r') => {
                    self.advance();
                }
                Some('/') if self.peek() == Some('/') => {
                    while !matches!(self.current(), None | Some('\n')) {
                        self.advance();
                    }
                }
                Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                    return Ok(self.scan_identifier());
                }
                Some(c) if c.is_ascii_digit() => {
                    return self.scan_number();
                }
                Some('"') | Some('\'') => {
                    return self.scan_string();
                }
                Some(_) => {
                    return self.scan_operator();
                }
            }
        }

        // End of file: close every open indentation level, then Eof.
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.pending
                .push_back(Token::new(TokenKind::Dedent, self.line, self.column));
        }
        if let Some(token) = self.pending.pop_front() {
            return Ok(token);
        }
        Ok(Token::new(TokenKind::Eof, self.line, self.column))
    }

    /// Skip blank and comment-only lines, then measure the depth of the first
    /// content line and reconcile it against the indentation stack.
    fn handle_line_start(&mut self) -> Result<(), Box<dyn VyprErrorExt>> {
        loop {
            let mut depth = 0usize;
            loop {
                match self.current() {
                    Some(' ') => {
                        depth += 1;
                        self.advance();
                    }
                    Some('\t') => {
                        depth += TAB_WIDTH;
                        self.advance();
                    }
                    Some('\r') => {
                        self.advance();
                    }
                    _ => break,
                }
            }

            match self.current() {
                Some('\n') => {
                    // Blank line: indentation does not apply.
                    self.advance();
                }
                Some('/') if self.peek() == Some('/') => {
                    // Comment-only line.
                    while !matches!(self.current(), None | Some('\n')) {
                        self.advance();
                    }
                    if self.current() == Some('\n') {
                        self.advance();
                    }
                }
                None => return Ok(()),
                _ => return self.process_indent(depth),
            }
        }
    }

    fn process_indent(&mut self, depth: usize) -> Result<(), Box<dyn VyprErrorExt>> {
        let top = *self.indent_stack.last().unwrap_or(&0);

        if depth > top {
            self.indent_stack.push(depth);
            self.pending
                .push_back(Token::new(TokenKind::Indent, self.line, 1));
        } else if depth < top {
            while self
                .indent_stack
                .last()
                .map_or(false, |&level| level > depth)
            {
                self.indent_stack.pop();
                self.pending
                    .push_back(Token::new(TokenKind::Dedent, self.line, 1));
            }
            if self.indent_stack.last() != Some(&depth) {
                return Err(self.error(
                    format!("Invalid indentation at line {}", self.line),
                    "vypr.lexer.process_indent",
                ));
            }
        }

        Ok(())
    }

    fn scan_identifier(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let mut ident = String::new();

        while let Some(c) = self.current() {
            if c.is_ascii_alphanumeric() || c == '_' {
                ident.push(c);
                self.advance();
            } else {
                break;
            }
        }

        match TokenKind::keyword(&ident) {
            Some(TokenKind::Boolean) => Token::with_value(
                TokenKind::Boolean,
                TokenValue::Bool(ident == "true"),
                line,
                column,
            ),
            Some(kind) => Token::new(kind, line, column),
            None => Token::with_value(
                TokenKind::Identifier,
                TokenValue::Str(ident),
                line,
                column,
            ),
        }
    }

    fn scan_number(&mut self) -> Result<Token, Box<dyn VyprErrorExt>> {
        let (line, column) = (self.line, self.column);
        let mut literal = String::new();
        let mut is_float = false;

        while let Some(c) = self.current() {
            if c.is_ascii_digit() {
                literal.push(c);
                self.advance();
            } else if c == '.' {
                if is_float {
                    return Err(self.error(
                        format!("Invalid number format at line {}", self.line),
                        "vypr.lexer.scan_number",
                    ));
                }
                is_float = true;
                literal.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if is_float {
            let value: f64 = literal.parse().map_err(|_| {
                self.error(
                    format!("Invalid number format at line {}", line),
                    "vypr.lexer.scan_number",
                )
            })?;
            Ok(Token::with_value(
                TokenKind::Float,
                TokenValue::Float(value),
                line,
                column,
            ))
        } else {
            let value: i64 = literal.parse().map_err(|_| {
                self.error(
                    format!("Invalid number format at line {}", line),
                    "vypr.lexer.scan_number",
                )
            })?;
            Ok(Token::with_value(
                TokenKind::Integer,
                TokenValue::Int(value),
                line,
                column,
            ))
        }
    }

    fn scan_string(&mut self) -> Result<Token, Box<dyn VyprErrorExt>> {
        let (line, column) = (self.line, self.column);
        let start = Location::new(self.file.clone(), line, column);
        let quote = self.current().unwrap_or('"');
        self.advance();

        let mut value = String::new();
        while let Some(c) = self.current() {
            if c == quote {
                break;
            }
            // The only recognized escape is backslash + the active quote.
            if c == '\\' && self.peek() == Some(quote) {
                self.advance();
                value.push(quote);
                self.advance();
                continue;
            }
            value.push(c);
            self.advance();
        }

        if self.current() != Some(quote) {
            let end = Location::new(self.file.clone(), self.line, self.column);
            return Err(Box::new(LexError::with(
                Level::Error,
                format!("Unterminated string at line {}", line),
                "vypr.lexer.scan_string".to_string(),
                Some(start.clone()),
                Some(Span::new(start, end)),
            )));
        }
        self.advance();

        Ok(Token::with_value(
            TokenKind::String,
            TokenValue::Str(value),
            line,
            column,
        ))
    }

    fn scan_operator(&mut self) -> Result<Token, Box<dyn VyprErrorExt>> {
        let (line, column) = (self.line, self.column);
        let c = self.current().unwrap_or('\0');
        self.advance();

        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Multiply,
            '/' => TokenKind::Divide,
            '^' => TokenKind::Concat,
            '=' => {
                if self.current() == Some('=') {
                    self.advance();
                    TokenKind::Equal
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.current() == Some('=') {
                    self.advance();
                    TokenKind::NotEqual
                } else {
                    TokenKind::Not
                }
            }
            '>' => {
                if self.current() == Some('=') {
                    self.advance();
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                }
            }
            '<' => {
                if self.current() == Some('=') {
                    self.advance();
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                }
            }
            '&' => {
                if self.current() == Some('&') {
                    self.advance();
                    TokenKind::And
                } else {
                    return Err(self.error(
                        format!("Unexpected character '&' at line {}", line),
                        "vypr.lexer.scan_operator",
                    ));
                }
            }
            '|' => {
                if self.current() == Some('|') {
                    self.advance();
                    TokenKind::Or
                } else {
                    return Err(self.error(
                        format!("Unexpected character '|' at line {}", line),
                        "vypr.lexer.scan_operator",
                    ));
                }
            }
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            other => {
                return Err(self.error(
                    format!("Unexpected character '{}' at line {}", other, line),
                    "vypr.lexer.scan_operator",
                ));
            }
        };

        Ok(Token::new(kind, line, column))
    }

    fn error(&self, message: String, issuer: &str) -> Box<dyn VyprErrorExt> {
        Box::new(LexError::with(
            Level::Error,
            message,
            issuer.to_string(),
            Some(Location::new(self.file.clone(), self.line, self.column)),
            None,
        ))
    }
}
