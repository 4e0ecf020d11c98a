use crate::error;
use crate::error::ParseError;
use crate::expr;
use crate::expr::Expr;
use crate::stmt::{FunctionDeclaration, Stmt};
use crate::token::{Literal, Token, TokenType};
use crate::value::object::Object;
use std::rc::Rc;

/// The parser is the second step. It consumes the flat token sequence the
/// scanner produced and builds the syntax tree, one recursive-descent method
/// per grammar rule. Each method for parsing a rule produces a tree node for
/// that rule and returns it to the caller.
#[derive(Default)]
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    /// program := declaration* EOF
    ///
    /// A panicked rule unwinds to here; we synchronize to the next statement
    /// boundary and keep parsing so one mistake doesn't hide the rest.
    pub fn parse(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            match self.declaration() {
                Ok(statement) => statements.push(statement),
                Err(ParseError) => self.synchronize(),
            }
        }
        statements
    }

    fn declaration(&mut self) -> Result<Stmt, ParseError> {
        if self.match_types(vec![TokenType::CLASS]) {
            return self.class_declaration();
        }
        if self.match_types(vec![TokenType::FUN]) {
            let declaration = self.function("function")?;
            return Ok(Stmt::Function { declaration: Rc::new(declaration) });
        }
        if self.match_types(vec![TokenType::VAR]) {
            return self.var_declaration();
        }
        self.statement()
    }

    fn class_declaration(&mut self) -> Result<Stmt, ParseError> {
        let name = self.consume(TokenType::IDENTIFIER, "Expect class name.")?;
        self.consume(TokenType::LEFT_BRACE, "Expect '{' before class body.")?;

        let mut methods = Vec::new();
        while !self.check(TokenType::RIGHT_BRACE) && !self.is_at_end() {
            methods.push(Rc::new(self.function("method")?));
        }

        self.consume(TokenType::RIGHT_BRACE, "Expect '}' after class body.")?;
        Ok(Stmt::Class { name, methods })
    }

    /// Parses the name, parameter list and body shared by named functions
    /// and class methods. `kind` is only used to word the error messages.
    fn function(&mut self, kind: &str) -> Result<FunctionDeclaration, ParseError> {
        let name = self.consume(TokenType::IDENTIFIER, &format!("Expect {kind} name."))?;
        self.consume(TokenType::LEFT_PAREN, &format!("Expect '(' after {kind} name."))?;

        let mut params = Vec::new();
        if !self.check(TokenType::RIGHT_PAREN) {
            loop {
                params.push(self.consume(TokenType::IDENTIFIER, "Expect parameter name.")?);
                if !self.match_types(vec![TokenType::COMMA]) {
                    break;
                }
            }
        }
        self.consume(TokenType::RIGHT_PAREN, "Expect ')' after parameters.")?;

        self.consume(TokenType::LEFT_BRACE, &format!("Expect '{{' before {kind} body."))?;
        let body = self.block()?;
        Ok(FunctionDeclaration { name, params, body })
    }

    fn var_declaration(&mut self) -> Result<Stmt, ParseError> {
        let name = self.consume(TokenType::IDENTIFIER, "Expect variable name.")?;

        let mut initializer = None;
        if self.match_types(vec![TokenType::EQUAL]) {
            initializer = Some(self.expression()?);
        }

        self.consume(TokenType::SEMICOLON, "Expect ';' after variable declaration.")?;
        Ok(Stmt::Var { name, initializer })
    }

    fn statement(&mut self) -> Result<Stmt, ParseError> {
        if self.match_types(vec![TokenType::FOR]) {
            return self.for_statement();
        }
        if self.match_types(vec![TokenType::IF]) {
            return self.if_statement();
        }
        if self.match_types(vec![TokenType::PRINT]) {
            return self.print_statement();
        }
        if self.match_types(vec![TokenType::RETURN]) {
            return self.return_statement();
        }
        if self.match_types(vec![TokenType::WHILE]) {
            return self.while_statement();
        }
        if self.match_types(vec![TokenType::LEFT_BRACE]) {
            return Ok(Stmt::Block { statements: self.block()? });
        }
        self.expression_statement()
    }

    /// 'for' is pure syntactic sugar. We desugar it right here into the
    /// primitive forms the rest of the pipeline already understands:
    ///
    ///     { initializer; while (condition) { body; increment; } }
    ///
    /// The outer block also gives the loop head its own scope, so the
    /// resolver and interpreter never have to treat 'for' specially.
    fn for_statement(&mut self) -> Result<Stmt, ParseError> {
        self.consume(TokenType::LEFT_PAREN, "Expect '(' after 'for'.")?;

        let initializer = if self.match_types(vec![TokenType::SEMICOLON]) {
            None
        } else if self.match_types(vec![TokenType::VAR]) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let mut condition = None;
        if !self.check(TokenType::SEMICOLON) {
            condition = Some(self.expression()?);
        }
        self.consume(TokenType::SEMICOLON, "Expect ';' after loop condition.")?;

        let mut increment = None;
        if !self.check(TokenType::RIGHT_PAREN) {
            increment = Some(self.expression()?);
        }
        self.consume(TokenType::RIGHT_PAREN, "Expect ')' after for clauses.")?;

        let mut body = self.statement()?;

        if let Some(increment) = increment {
            body = Stmt::Block {
                statements: vec![body, Stmt::Expression { expression: increment }],
            };
        }

        let condition = condition.unwrap_or(Expr::Literal { value: Object::Boolean(true) });
        body = Stmt::While { condition, body: Box::from(body) };

        if let Some(initializer) = initializer {
            body = Stmt::Block { statements: vec![initializer, body] };
        }

        Ok(body)
    }

    fn if_statement(&mut self) -> Result<Stmt, ParseError> {
        self.consume(TokenType::LEFT_PAREN, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(TokenType::RIGHT_PAREN, "Expect ')' after if condition.")?;

        let then_branch = self.statement()?;
        let mut else_branch = None;
        if self.match_types(vec![TokenType::ELSE]) {
            else_branch = Some(Box::from(self.statement()?));
        }

        Ok(Stmt::If {
            condition,
            then_branch: Box::from(then_branch),
            else_branch,
        })
    }

    fn print_statement(&mut self) -> Result<Stmt, ParseError> {
        let expression = self.expression()?;
        self.consume(TokenType::SEMICOLON, "Expect ';' after value.")?;
        Ok(Stmt::Print { expression })
    }

    fn return_statement(&mut self) -> Result<Stmt, ParseError> {
        let keyword = self.previous();
        let mut value = None;
        if !self.check(TokenType::SEMICOLON) {
            value = Some(self.expression()?);
        }
        self.consume(TokenType::SEMICOLON, "Expect ';' after return value.")?;
        Ok(Stmt::Return { keyword, value })
    }

    fn while_statement(&mut self) -> Result<Stmt, ParseError> {
        self.consume(TokenType::LEFT_PAREN, "Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume(TokenType::RIGHT_PAREN, "Expect ')' after condition.")?;
        let body = self.statement()?;

        Ok(Stmt::While { condition, body: Box::from(body) })
    }

    fn block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();
        while !self.check(TokenType::RIGHT_BRACE) && !self.is_at_end() {
            statements.push(self.declaration()?);
        }
        self.consume(TokenType::RIGHT_BRACE, "Expect '}' after block.")?;
        Ok(statements)
    }

    fn expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let expression = self.expression()?;
        self.consume(TokenType::SEMICOLON, "Expect ';' after expression.")?;
        Ok(Stmt::Expression { expression })
    }

    fn expression(&mut self) -> Result<Expr, ParseError> {
        self.assignment()
    }

    /// Assignment is right-associative, and we only discover that the left
    /// side was a valid target after parsing it as an ordinary expression.
    /// A plain variable becomes Assign; a property access becomes Set.
    fn assignment(&mut self) -> Result<Expr, ParseError> {
        let expr = self.or()?;

        if self.match_types(vec![TokenType::EQUAL]) {
            let equals = self.previous();
            let value = self.assignment()?;

            return match expr {
                Expr::Variable { name, .. } => Ok(Expr::Assign {
                    id: expr::next_id(),
                    name,
                    value: Box::from(value),
                }),
                Expr::Get { object, name } => Ok(Expr::Set {
                    object,
                    name,
                    value: Box::from(value),
                }),
                _ => Err(self.error(equals, "Invalid assignment target.")),
            };
        }

        Ok(expr)
    }

    fn or(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.and()?;

        while self.match_types(vec![TokenType::OR]) {
            let operator = self.previous();
            let right = self.and()?;
            expr = Expr::Logical {
                operator,
                left: Box::from(expr),
                right: Box::from(right),
            };
        }

        Ok(expr)
    }

    fn and(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.equality()?;

        while self.match_types(vec![TokenType::AND]) {
            let operator = self.previous();
            let right = self.equality()?;
            expr = Expr::Logical {
                operator,
                left: Box::from(expr),
                right: Box::from(right),
            };
        }

        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.comparison()?;

        while self.match_types(vec![TokenType::BANG_EQUAL, TokenType::EQUAL_EQUAL]) {
            let operator = self.previous();
            let right = self.comparison()?;
            expr = Expr::Binary {
                operator,
                left: Box::from(expr),
                right: Box::from(right),
            };
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.term()?;

        while self.match_types(vec![
            TokenType::GREATER,
            TokenType::GREATER_EQUAL,
            TokenType::LESS,
            TokenType::LESS_EQUAL,
        ]) {
            let operator = self.previous();
            let right = self.term()?;
            expr = Expr::Binary {
                operator,
                left: Box::from(expr),
                right: Box::from(right),
            };
        }

        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.factor()?;

        while self.match_types(vec![TokenType::MINUS, TokenType::PLUS]) {
            let operator = self.previous();
            let right = self.factor()?;
            expr = Expr::Binary {
                operator,
                left: Box::from(expr),
                right: Box::from(right),
            };
        }

        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.unary()?;

        while self.match_types(vec![TokenType::SLASH, TokenType::STAR]) {
            let operator = self.previous();
            let right = self.unary()?;
            expr = Expr::Binary {
                operator,
                left: Box::from(expr),
                right: Box::from(right),
            };
        }

        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        if self.match_types(vec![TokenType::BANG, TokenType::MINUS]) {
            let operator = self.previous();
            let right = self.unary()?;
            return Ok(Expr::Unary { operator, right: Box::from(right) });
        }

        self.call()
    }

    fn call(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.primary()?;

        loop {
            if self.match_types(vec![TokenType::LEFT_PAREN]) {
                expr = self.finish_call(expr)?;
            } else if self.match_types(vec![TokenType::DOT]) {
                let name = self.consume(TokenType::IDENTIFIER, "Expect property name after '.'.")?;
                expr = Expr::Get { object: Box::from(expr), name };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> Result<Expr, ParseError> {
        let mut arguments = Vec::new();
        if !self.check(TokenType::RIGHT_PAREN) {
            loop {
                arguments.push(self.expression()?);
                if !self.match_types(vec![TokenType::COMMA]) {
                    break;
                }
            }
        }

        let paren = self.consume(TokenType::RIGHT_PAREN, "Expect ')' after arguments.")?;
        Ok(Expr::Call {
            callee: Box::from(callee),
            paren,
            arguments,
        })
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        if self.match_types(vec![TokenType::FALSE]) {
            return Ok(Expr::Literal { value: Object::Boolean(false) });
        }
        if self.match_types(vec![TokenType::TRUE]) {
            return Ok(Expr::Literal { value: Object::Boolean(true) });
        }
        if self.match_types(vec![TokenType::NIL]) {
            return Ok(Expr::Literal { value: Object::Nil });
        }

        if self.match_types(vec![TokenType::NUMBER, TokenType::STRING]) {
            let token = self.previous();
            let value = match token.literal {
                Some(Literal::Number(n)) => Object::Number(n),
                Some(Literal::String(s)) => Object::String(s),
                None => unreachable!("literal token without a payload"),
            };
            return Ok(Expr::Literal { value });
        }

        if self.match_types(vec![TokenType::IDENTIFIER]) {
            return Ok(Expr::Variable {
                id: expr::next_id(),
                name: self.previous(),
            });
        }

        if self.match_types(vec![TokenType::LEFT_PAREN]) {
            let expr = self.expression()?;
            self.consume(TokenType::RIGHT_PAREN, "Expect ')' after expression.")?;
            return Ok(Expr::Grouping { expression: Box::from(expr) });
        }

        Err(self.error(self.peek(), "Expect expression."))
    }

    fn consume(&mut self, token_type: TokenType, message: &str) -> Result<Token, ParseError> {
        if self.check(token_type) {
            return Ok(self.advance());
        }

        Err(self.error(self.peek(), message))
    }

    fn match_types(&mut self, types: Vec<TokenType>) -> bool {
        for token_type in types {
            if self.check(token_type) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn check(&self, token_type: TokenType) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.peek().token_type == token_type
    }

    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        };
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().token_type == TokenType::EOF
    }

    fn peek(&self) -> Token {
        self.tokens[self.current].clone()
    }

    fn previous(&self) -> Token {
        self.tokens[self.current - 1].clone()
    }

    fn error(&self, token: Token, message: &str) -> ParseError {
        error::error_token(&token, message);
        ParseError
    }

    /// After a syntax error we discard tokens until we're right before a
    /// statement boundary, so the parser can pick up again in a sane state.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().token_type == TokenType::SEMICOLON {
                return;
            }

            match self.peek().token_type {
                TokenType::CLASS
                | TokenType::FUN
                | TokenType::VAR
                | TokenType::FOR
                | TokenType::IF
                | TokenType::WHILE
                | TokenType::PRINT
                | TokenType::RETURN => return,
                _ => {
                    self.advance();
                }
            }
        }
    }
}
