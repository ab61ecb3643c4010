//! file: core/src/ast/parser.rs
//! description: recursive-descent parser over the lexer's token stream.
//!
//! One statement per source line; `:` followed by `NEWLINE INDENT … DEDENT`
//! introduces a block. Expressions use precedence climbing with assignment
//! as the lowest, right-associative level. The parser surfaces the first
//! error; `synchronize` exists for recovery experiments but is not wired
//! into the default path.

use crate::ast::err::SyntaxError;
use crate::ast::expr::{Expr, LiteralValue};
use crate::ast::stmt::{Program, Stmt};
use crate::error::{Level, Location, VyprErrorExt};
use crate::lexer::token::{Token, TokenKind, TokenValue};

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    file: String,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>, file: &str) -> Self {
        // The lexer always terminates the stream with Eof; guard against
        // hand-built token vectors that forget it.
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            tokens.push(Token::new(TokenKind::Eof, 0, 0));
        }
        Parser {
            tokens,
            current: 0,
            file: file.to_string(),
        }
    }

    pub fn parse(mut self) -> Result<Program, Box<dyn VyprErrorExt>> {
        self.program()
    }

    // ------- Cursor helpers -------

    fn peek(&self) -> &Token {
        match self.tokens.get(self.current) {
            Some(token) => token,
            None => &self.tokens[self.tokens.len() - 1],
        }
    }

    fn peek_next(&self) -> &Token {
        match self.tokens.get(self.current + 1) {
            Some(token) => token,
            None => &self.tokens[self.tokens.len() - 1],
        }
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len() || self.peek().kind == TokenKind::Eof
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            return true;
        }
        false
    }

    fn match_any(&mut self, kinds: &[TokenKind]) -> bool {
        for &kind in kinds {
            if self.match_kind(kind) {
                return true;
            }
        }
        false
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> Result<(), Box<dyn VyprErrorExt>> {
        if self.check(kind) {
            self.advance();
            return Ok(());
        }
        Err(self.error_at(self.peek().line, self.peek().column, message))
    }

    fn error_at(&self, line: usize, column: usize, message: &str) -> Box<dyn VyprErrorExt> {
        Box::new(SyntaxError::with(
            Level::Error,
            message.to_string(),
            "vypr.ast.parser".to_string(),
            Some(Location::new(self.file.clone(), line, column)),
            None,
        ))
    }

    fn error_here(&self, message: &str) -> Box<dyn VyprErrorExt> {
        self.error_at(self.peek().line, self.peek().column, message)
    }

    fn error_behind(&self, message: &str) -> Box<dyn VyprErrorExt> {
        self.error_at(self.previous().line, self.previous().column, message)
    }

    /// The identifier payload of the token just consumed.
    fn previous_name(&self) -> String {
        match &self.previous().value {
            TokenValue::Str(name) => name.clone(),
            _ => String::new(),
        }
    }

    /// Skip forward to the next statement boundary after an error. Kept for
    /// multi-error reporting; the default pipeline surfaces the first error.
    #[allow(dead_code)]
    fn synchronize(&mut self) {
        self.advance();
        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Newline {
                return;
            }
            match self.peek().kind {
                TokenKind::Var
                | TokenKind::Func
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Loop
                | TokenKind::Return
                | TokenKind::Print
                | TokenKind::Input => return,
                _ => {}
            }
            self.advance();
        }
    }

    // ------- Statements -------

    fn program(&mut self) -> Result<Program, Box<dyn VyprErrorExt>> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            if self.match_kind(TokenKind::Newline) {
                continue;
            }
            statements.push(self.declaration()?);
        }
        Ok(Program::new(statements))
    }

    fn declaration(&mut self) -> Result<Stmt, Box<dyn VyprErrorExt>> {
        if self.match_kind(TokenKind::Var) {
            return self.var_declaration();
        }
        if self.match_kind(TokenKind::Func) {
            return self.func_declaration();
        }
        self.statement()
    }

    fn var_declaration(&mut self) -> Result<Stmt, Box<dyn VyprErrorExt>> {
        if !self.match_kind(TokenKind::Identifier) {
            return Err(self.error_here("Expected variable name."));
        }
        let name = self.previous_name();

        let initializer = if self.match_kind(TokenKind::Assign) {
            Some(self.expression()?)
        } else {
            None
        };

        self.match_kind(TokenKind::Newline);
        Ok(Stmt::VarDecl { name, initializer })
    }

    fn func_declaration(&mut self) -> Result<Stmt, Box<dyn VyprErrorExt>> {
        if !self.match_kind(TokenKind::Identifier) {
            return Err(self.error_here("Expected function name."));
        }
        let name = self.previous_name();

        self.consume(TokenKind::LParen, "Expected '(' after function name.")?;
        let params = self.parameters()?;
        self.consume(TokenKind::RParen, "Expected ')' after parameters.")?;

        self.consume(TokenKind::Colon, "Expected ':' after function declaration.")?;
        self.match_kind(TokenKind::Newline);
        self.consume(TokenKind::Indent, "Expected indented function body.")?;

        let body = self.block()?;
        Ok(Stmt::FunctionDecl {
            name,
            params,
            body: Box::new(body),
        })
    }

    fn parameters(&mut self) -> Result<Vec<String>, Box<dyn VyprErrorExt>> {
        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                if !self.match_kind(TokenKind::Identifier) {
                    return Err(self.error_here("Expected parameter name."));
                }
                params.push(self.previous_name());
                if !self.match_kind(TokenKind::Comma) {
                    break;
                }
            }
        }
        Ok(params)
    }

    fn statement(&mut self) -> Result<Stmt, Box<dyn VyprErrorExt>> {
        if self.match_kind(TokenKind::If) {
            return self.if_statement();
        }
        if self.match_kind(TokenKind::While) {
            return self.while_statement();
        }
        if self.match_kind(TokenKind::Loop) {
            return self.loop_statement();
        }
        if self.match_kind(TokenKind::Return) {
            return self.return_statement();
        }
        if self.match_kind(TokenKind::Print) {
            return self.print_statement();
        }
        if self.match_kind(TokenKind::Input) {
            return self.input_statement();
        }
        self.expression_statement()
    }

    fn if_statement(&mut self) -> Result<Stmt, Box<dyn VyprErrorExt>> {
        let condition = self.expression()?;

        self.consume(TokenKind::Colon, "Expected ':' after if condition.")?;
        self.match_kind(TokenKind::Newline);
        self.consume(TokenKind::Indent, "Expected indented if body.")?;

        let then_branch = self.block()?;

        let else_branch = if self.match_kind(TokenKind::Else) {
            if self.match_kind(TokenKind::If) {
                // `else if` chains nest as an If in the else slot.
                Some(Box::new(self.if_statement()?))
            } else {
                self.consume(TokenKind::Colon, "Expected ':' after else.")?;
                self.match_kind(TokenKind::Newline);
                self.consume(TokenKind::Indent, "Expected indented else body.")?;
                Some(Box::new(self.block()?))
            }
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch,
        })
    }

    fn while_statement(&mut self) -> Result<Stmt, Box<dyn VyprErrorExt>> {
        let condition = self.expression()?;

        self.consume(TokenKind::Colon, "Expected ':' after while condition.")?;
        self.match_kind(TokenKind::Newline);
        self.consume(TokenKind::Indent, "Expected indented while body.")?;

        let body = self.block()?;
        Ok(Stmt::While {
            condition,
            body: Box::new(body),
        })
    }

    fn loop_statement(&mut self) -> Result<Stmt, Box<dyn VyprErrorExt>> {
        // `loop v in xs:` needs one token of lookahead to distinguish the
        // for-each form from a times-count held in a variable.
        if self.check(TokenKind::Identifier) && self.peek_next().kind == TokenKind::In {
            self.advance();
            let variable = self.previous_name();

            self.consume(TokenKind::In, "Expected 'in' after variable in loop.")?;
            let iterable = self.expression()?;

            self.consume(TokenKind::Colon, "Expected ':' after loop in.")?;
            self.match_kind(TokenKind::Newline);
            self.consume(TokenKind::Indent, "Expected indented loop body.")?;

            let body = self.block()?;
            return Ok(Stmt::LoopIn {
                variable,
                iterable,
                body: Box::new(body),
            });
        }

        if self.check(TokenKind::Integer) || self.check(TokenKind::Identifier) {
            let count = self.expression()?;

            self.consume(TokenKind::Times, "Expected 'times' after count.")?;
            self.consume(TokenKind::Colon, "Expected ':' after loop times.")?;
            self.match_kind(TokenKind::Newline);
            self.consume(TokenKind::Indent, "Expected indented loop body.")?;

            let body = self.block()?;
            return Ok(Stmt::LoopTimes {
                count,
                body: Box::new(body),
            });
        }

        Err(self.error_here("Expected variable name or number after 'loop'."))
    }

    fn return_statement(&mut self) -> Result<Stmt, Box<dyn VyprErrorExt>> {
        let value = if !self.check(TokenKind::Newline)
            && !self.check(TokenKind::Dedent)
            && !self.is_at_end()
        {
            Some(self.expression()?)
        } else {
            None
        };

        self.match_kind(TokenKind::Newline);
        Ok(Stmt::Return { value })
    }

    fn print_statement(&mut self) -> Result<Stmt, Box<dyn VyprErrorExt>> {
        let expr = self.expression()?;
        self.match_kind(TokenKind::Newline);
        Ok(Stmt::Print { expr })
    }

    fn input_statement(&mut self) -> Result<Stmt, Box<dyn VyprErrorExt>> {
        if !self.match_kind(TokenKind::Identifier) {
            return Err(self.error_here("Expected variable name after 'input'."));
        }
        let variable = self.previous_name();

        self.match_kind(TokenKind::Newline);
        Ok(Stmt::Input { variable })
    }

    fn expression_statement(&mut self) -> Result<Stmt, Box<dyn VyprErrorExt>> {
        let expr = self.expression()?;
        self.match_kind(TokenKind::Newline);
        Ok(Stmt::Expression { expr })
    }

    fn block(&mut self) -> Result<Stmt, Box<dyn VyprErrorExt>> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::Dedent) && !self.is_at_end() {
            if self.match_kind(TokenKind::Newline) {
                continue;
            }
            statements.push(self.declaration()?);
        }

        self.consume(TokenKind::Dedent, "Expected dedent at end of block.")?;
        Ok(Stmt::Block { statements })
    }

    // ------- Expressions -------

    fn expression(&mut self) -> Result<Expr, Box<dyn VyprErrorExt>> {
        self.assignment()
    }

    fn assignment(&mut self) -> Result<Expr, Box<dyn VyprErrorExt>> {
        let expr = self.logical_or()?;

        if self.match_kind(TokenKind::Assign) {
            let value = self.assignment()?;

            return match expr {
                Expr::Variable { .. } | Expr::ArrayAccess { .. } => Ok(Expr::Binary {
                    left: Box::new(expr),
                    op: TokenKind::Assign,
                    right: Box::new(value),
                }),
                _ => Err(self.error_behind("Invalid assignment target.")),
            };
        }

        Ok(expr)
    }

    fn logical_or(&mut self) -> Result<Expr, Box<dyn VyprErrorExt>> {
        let mut expr = self.logical_and()?;
        while self.match_kind(TokenKind::Or) {
            let op = self.previous().kind;
            let right = self.logical_and()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                op,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn logical_and(&mut self) -> Result<Expr, Box<dyn VyprErrorExt>> {
        let mut expr = self.equality()?;
        while self.match_kind(TokenKind::And) {
            let op = self.previous().kind;
            let right = self.equality()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                op,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expr, Box<dyn VyprErrorExt>> {
        let mut expr = self.comparison()?;
        while self.match_any(&[TokenKind::Equal, TokenKind::NotEqual]) {
            let op = self.previous().kind;
            let right = self.comparison()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                op,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr, Box<dyn VyprErrorExt>> {
        let mut expr = self.term()?;
        while self.match_any(&[
            TokenKind::Less,
            TokenKind::LessEqual,
            TokenKind::Greater,
            TokenKind::GreaterEqual,
        ]) {
            let op = self.previous().kind;
            let right = self.term()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                op,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr, Box<dyn VyprErrorExt>> {
        let mut expr = self.factor()?;
        while self.match_any(&[TokenKind::Plus, TokenKind::Minus, TokenKind::Concat]) {
            let op = self.previous().kind;
            let right = self.factor()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                op,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr, Box<dyn VyprErrorExt>> {
        let mut expr = self.unary()?;
        while self.match_any(&[TokenKind::Multiply, TokenKind::Divide]) {
            let op = self.previous().kind;
            let right = self.unary()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                op,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr, Box<dyn VyprErrorExt>> {
        if self.match_any(&[TokenKind::Minus, TokenKind::Not]) {
            let op = self.previous().kind;
            let operand = self.unary()?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            });
        }
        self.call()
    }

    fn call(&mut self) -> Result<Expr, Box<dyn VyprErrorExt>> {
        let mut expr = self.primary()?;

        loop {
            if self.match_kind(TokenKind::LParen) {
                expr = self.finish_call(expr)?;
            } else if self.match_kind(TokenKind::LBracket) {
                let index = self.expression()?;
                self.consume(TokenKind::RBracket, "Expected ']' after array index.")?;
                expr = Expr::ArrayAccess {
                    array: Box::new(expr),
                    index: Box::new(index),
                };
            } else if self.match_kind(TokenKind::Dot) {
                if !self.match_kind(TokenKind::Identifier) {
                    return Err(self.error_here("Expected property name after '.'."));
                }
                let member = self.previous_name();
                expr = Expr::MemberAccess {
                    object: Box::new(expr),
                    member,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> Result<Expr, Box<dyn VyprErrorExt>> {
        let args = self.arguments()?;
        self.consume(TokenKind::RParen, "Expected ')' after arguments.")?;

        match callee {
            Expr::Variable { name } => Ok(Expr::Call { callee: name, args }),
            _ => Err(self.error_behind("Expected function name.")),
        }
    }

    fn arguments(&mut self) -> Result<Vec<Expr>, Box<dyn VyprErrorExt>> {
        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                args.push(self.expression()?);
                if !self.match_kind(TokenKind::Comma) {
                    break;
                }
            }
        }
        Ok(args)
    }

    fn primary(&mut self) -> Result<Expr, Box<dyn VyprErrorExt>> {
        if self.match_kind(TokenKind::Boolean) {
            if let TokenValue::Bool(value) = self.previous().value {
                return Ok(Expr::Literal {
                    value: LiteralValue::Bool(value),
                });
            }
        }

        if self.match_kind(TokenKind::Integer) {
            if let TokenValue::Int(value) = self.previous().value {
                return Ok(Expr::Literal {
                    value: LiteralValue::Int(value),
                });
            }
        }

        if self.match_kind(TokenKind::Float) {
            if let TokenValue::Float(value) = self.previous().value {
                return Ok(Expr::Literal {
                    value: LiteralValue::Float(value),
                });
            }
        }

        if self.match_kind(TokenKind::String) {
            return Ok(Expr::Literal {
                value: LiteralValue::Str(self.previous_name()),
            });
        }

        if self.match_kind(TokenKind::Identifier) {
            return Ok(Expr::Variable {
                name: self.previous_name(),
            });
        }

        if self.match_kind(TokenKind::LParen) {
            let expr = self.expression()?;
            self.consume(TokenKind::RParen, "Expected ')' after expression.")?;
            return Ok(expr);
        }

        if self.match_kind(TokenKind::LBracket) {
            let mut elements = Vec::new();
            if !self.check(TokenKind::RBracket) {
                loop {
                    elements.push(self.expression()?);
                    if !self.match_kind(TokenKind::Comma) {
                        break;
                    }
                }
            }
            self.consume(TokenKind::RBracket, "Expected ']' after array elements.")?;
            return Ok(Expr::Array { elements });
        }

        Err(self.error_here("Expected expression."))
    }
}
