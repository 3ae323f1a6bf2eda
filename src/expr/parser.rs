use anyhow::{Result, bail};
use serde_json::{Map, Value};

use super::Expr;
use super::lexer::{Spanned, Token, tokenize};

/// Compile expression text into an invocable unit. Fails on anything outside
/// the restricted grammar; the caller unifies this with run-time failures.
pub fn parse(src: &str) -> Result<Expr> {
    let tokens = tokenize(src)?;
    let mut p = Parser { tokens, pos: 0 };
    let expr = p.expression()?;
    if let Some(extra) = p.peek() {
        bail!("unexpected trailing input at position {}", extra.at);
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Spanned> {
        let t = self.tokens.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn expect(&mut self, wanted: &Token, what: &str) -> Result<()> {
        match self.next() {
            Some(t) if t.token == *wanted => Ok(()),
            Some(t) => bail!("expected {what} at position {}", t.at),
            None => bail!("expected {what}, found end of input"),
        }
    }

    fn expression(&mut self) -> Result<Expr> {
        match self.peek() {
            None => bail!("empty expression"),
            Some(t) => match &t.token {
                Token::Ident(_) => self.call(),
                _ => Ok(Expr::Literal(self.value()?)),
            },
        }
    }

    fn call(&mut self) -> Result<Expr> {
        let mut path = vec![self.ident("identifier")?];
        while matches!(self.peek().map(|t| &t.token), Some(Token::Dot)) {
            self.next();
            path.push(self.ident("identifier after `.`")?);
        }

        self.expect(&Token::LParen, "`(` to invoke the capability operation")?;
        let mut args = Vec::new();
        if !matches!(self.peek().map(|t| &t.token), Some(Token::RParen)) {
            loop {
                args.push(self.value()?);
                match self.peek().map(|t| &t.token) {
                    Some(Token::Comma) => {
                        self.next();
                        // Tolerate a trailing comma before the closing paren.
                        if matches!(self.peek().map(|t| &t.token), Some(Token::RParen)) {
                            break;
                        }
                    }
                    _ => break,
                }
            }
        }
        self.expect(&Token::RParen, "`)`")?;

        Ok(Expr::Call { path, args })
    }

    fn ident(&mut self, what: &str) -> Result<String> {
        match self.next() {
            Some(Spanned {
                token: Token::Ident(name),
                ..
            }) => Ok(name),
            Some(t) => bail!("expected {what} at position {}", t.at),
            None => bail!("expected {what}, found end of input"),
        }
    }

    fn value(&mut self) -> Result<Value> {
        match self.next() {
            None => bail!("expected a value, found end of input"),
            Some(t) => match t.token {
                Token::Str(s) => Ok(Value::String(s)),
                Token::Number(n) => Ok(number_value(n)),
                Token::True => Ok(Value::Bool(true)),
                Token::False => Ok(Value::Bool(false)),
                Token::Null => Ok(Value::Null),
                Token::LBrace => self.object(),
                _ => bail!("expected a literal value at position {}", t.at),
            },
        }
    }

    fn object(&mut self) -> Result<Value> {
        let mut map = Map::new();
        if matches!(self.peek().map(|t| &t.token), Some(Token::RBrace)) {
            self.next();
            return Ok(Value::Object(map));
        }
        loop {
            let key = match self.next() {
                Some(Spanned {
                    token: Token::Ident(name),
                    ..
                }) => name,
                Some(Spanned {
                    token: Token::Str(s),
                    ..
                }) => s,
                Some(t) => bail!("expected object key at position {}", t.at),
                None => bail!("expected object key, found end of input"),
            };
            self.expect(&Token::Colon, "`:` after object key")?;
            map.insert(key, self.value()?);

            match self.next() {
                Some(Spanned {
                    token: Token::Comma,
                    ..
                }) => {
                    if matches!(self.peek().map(|t| &t.token), Some(Token::RBrace)) {
                        self.next();
                        return Ok(Value::Object(map));
                    }
                }
                Some(Spanned {
                    token: Token::RBrace,
                    ..
                }) => return Ok(Value::Object(map)),
                Some(t) => bail!("expected `,` or `}}` at position {}", t.at),
                None => bail!("unterminated object literal"),
            }
        }
    }
}

fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}

#[cfg(test)]
#[path = "../tests/expr/parser_tests.rs"]
mod tests;
