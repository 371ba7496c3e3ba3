use crate::{consume_while, is_word_char};
use std::fmt::{self, Display};

/// Lexical unit of an entity-relative expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'s> {
    Whitespace(&'s str),
    /// Identifier, possibly dotted (`manager.department.name`).
    Word(&'s str),
    /// Named parameter, sigil included (`:status`).
    Parameter(&'s str),
    Number(&'s str),
    /// Quoted literal or quoted identifier, quotes included.
    Literal(&'s str),
    Symbol(&'s str),
}

impl<'s> Token<'s> {
    pub fn as_str(&self) -> &'s str {
        match self {
            Token::Whitespace(v)
            | Token::Word(v)
            | Token::Parameter(v)
            | Token::Number(v)
            | Token::Literal(v)
            | Token::Symbol(v) => v,
        }
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Splits an expression into tokens. Concatenating the tokens gives back the input.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut input = input;
    let mut result = Vec::new();
    while let Some(c) = input.chars().next() {
        let token = if c.is_whitespace() {
            Token::Whitespace(consume_while(&mut input, |v| v.is_whitespace()))
        } else if c.is_ascii_digit() {
            Token::Number(consume_number(&mut input))
        } else if is_word_char(&c) {
            Token::Word(consume_word(&mut input))
        } else if c == ':' {
            parameter_or_symbol(&mut input)
        } else if matches!(c, '\'' | '"' | '`') {
            Token::Literal(consume_quoted(&mut input, c))
        } else {
            let (symbol, rest) = input.split_at(c.len_utf8());
            input = rest;
            Token::Symbol(symbol)
        };
        result.push(token);
    }
    result
}

fn split<'s>(input: &mut &'s str, len: usize) -> &'s str {
    let (result, rest) = input.split_at(len);
    *input = rest;
    result
}

/// Digits with an optional fractional part, `1.5` is a single token.
fn consume_number<'s>(input: &mut &'s str) -> &'s str {
    let integral = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let rest = &input[integral..];
    let mut len = integral;
    if rest.starts_with('.') && rest[1..].starts_with(|c: char| c.is_ascii_digit()) {
        len += 1 + rest[1..]
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len() - 1);
    }
    if input[len..].starts_with(|c: char| is_word_char(&c)) {
        // Identifiers may start with a digit (`2fa_enabled`)
        return consume_word(input);
    }
    split(input, len)
}

/// Word characters joined by single dots, a trailing dot is not part of the word.
fn consume_word<'s>(input: &mut &'s str) -> &'s str {
    let mut len = 0;
    loop {
        len += input[len..]
            .find(|c: char| !is_word_char(&c))
            .unwrap_or(input.len() - len);
        let rest = &input[len..];
        if rest.starts_with('.') && rest[1..].starts_with(|c: char| is_word_char(&c)) {
            len += 1;
        } else {
            break;
        }
    }
    split(input, len)
}

fn parameter_or_symbol<'s>(input: &mut &'s str) -> Token<'s> {
    let rest = &input[1..];
    if rest.starts_with(':') {
        return Token::Symbol(split(input, 2));
    }
    let name = rest.find(|c: char| !is_word_char(&c)).unwrap_or(rest.len());
    if name == 0 {
        return Token::Symbol(split(input, 1));
    }
    Token::Parameter(split(input, 1 + name))
}

/// A doubled quote inside the literal escapes it, an unterminated literal runs to the end.
fn consume_quoted<'s>(input: &mut &'s str, quote: char) -> &'s str {
    let mut position = 1;
    while let Some(i) = input[position..].find(quote) {
        position += i + 1;
        if !input[position..].starts_with(quote) {
            return split(input, position);
        }
        position += 1;
    }
    split(input, input.len())
}
