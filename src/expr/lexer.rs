use anyhow::{Result, bail};

#[derive(Clone, Debug, PartialEq)]
pub(super) enum Token {
    Ident(String),
    Str(String),
    Number(f64),
    True,
    False,
    Null,
    Dot,
    Comma,
    Colon,
    LParen,
    RParen,
    LBrace,
    RBrace,
}

#[derive(Clone, Debug)]
pub(super) struct Spanned {
    pub(super) token: Token,
    pub(super) at: usize,
}

pub(super) fn tokenize(src: &str) -> Result<Vec<Spanned>> {
    let mut out = Vec::new();
    let chars: Vec<char> = src.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let at = i;
        match c {
            c if c.is_whitespace() => {
                i += 1;
            }
            '.' => {
                out.push(Spanned { token: Token::Dot, at });
                i += 1;
            }
            ',' => {
                out.push(Spanned { token: Token::Comma, at });
                i += 1;
            }
            ':' => {
                out.push(Spanned { token: Token::Colon, at });
                i += 1;
            }
            '(' => {
                out.push(Spanned { token: Token::LParen, at });
                i += 1;
            }
            ')' => {
                out.push(Spanned { token: Token::RParen, at });
                i += 1;
            }
            '{' => {
                out.push(Spanned { token: Token::LBrace, at });
                i += 1;
            }
            '}' => {
                out.push(Spanned { token: Token::RBrace, at });
                i += 1;
            }
            '\'' | '"' => {
                let (s, next) = scan_string(&chars, i)?;
                out.push(Spanned { token: Token::Str(s), at });
                i = next;
            }
            '-' => {
                let (n, next) = scan_number(&chars, i)?;
                out.push(Spanned { token: Token::Number(n), at });
                i = next;
            }
            c if c.is_ascii_digit() => {
                let (n, next) = scan_number(&chars, i)?;
                out.push(Spanned { token: Token::Number(n), at });
                i = next;
            }
            c if c.is_alphabetic() || c == '_' || c == '$' => {
                let start = i;
                while i < chars.len()
                    && (chars[i].is_alphanumeric() || chars[i] == '_' || chars[i] == '$')
                {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                let token = match word.as_str() {
                    "true" => Token::True,
                    "false" => Token::False,
                    "null" => Token::Null,
                    _ => Token::Ident(word),
                };
                out.push(Spanned { token, at });
            }
            other => bail!("unexpected character `{other}` at position {at}"),
        }
    }

    Ok(out)
}

fn scan_string(chars: &[char], start: usize) -> Result<(String, usize)> {
    let quote = chars[start];
    let mut out = String::new();
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => {
                let Some(&esc) = chars.get(i + 1) else {
                    bail!("unterminated escape at position {i}");
                };
                out.push(match esc {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    other => other,
                });
                i += 2;
            }
            c if c == quote => return Ok((out, i + 1)),
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    bail!("unterminated string starting at position {start}")
}

fn scan_number(chars: &[char], start: usize) -> Result<(f64, usize)> {
    let mut i = start;
    if chars[i] == '-' {
        i += 1;
    }
    let digits_start = i;
    while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
        i += 1;
    }
    if i == digits_start {
        bail!("expected digits at position {start}");
    }
    let text: String = chars[start..i].iter().collect();
    let n = text
        .parse::<f64>()
        .map_err(|_| anyhow::anyhow!("invalid number `{text}` at position {start}"))?;
    Ok((n, i))
}
