use crate::ast::{Number, Token, TokenStream};
use crate::error::LexError;
use log::trace;
use std::iter::Peekable;
use std::str::Chars;

/// Single-character lookahead cursor over source text.
pub struct CharacterStream<'src> {
    src: &'src str,
    chars: Peekable<Chars<'src>>,
    offset: usize,
}

impl<'src> CharacterStream<'src> {
    pub fn new(src: &'src str) -> Self {
        Self {
            src,
            chars: src.chars().peekable(),
            offset: 0,
        }
    }

    /// Returns the next character without advancing. Repeated calls return
    /// the same character until [`advance`](Self::advance).
    pub fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    pub fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.offset += c.len_utf8();
        Some(c)
    }

    /// Byte offset of the next unread character.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    /// Consumes characters while `predicate` holds and returns the slice
    /// they span, starting at `from_offset`.
    fn slice_while<P>(&mut self, from_offset: usize, predicate: P) -> &'src str
    where
        P: Fn(char) -> bool,
    {
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.advance();
        }
        &self.src[from_offset..self.offset]
    }
}

/// Pull-based tokenizer with one token of lookahead.
pub struct Lexer<'src> {
    stream: CharacterStream<'src>,
    token: Option<(Token, usize)>,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        Self {
            stream: CharacterStream::new(src),
            token: None,
        }
    }

    /// Scans the whole input. The result always ends with a single `End`.
    pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();
        while !lexer.at_end()? {
            tokens.extend(lexer.consume_token());
        }
        tokens.push(Token::End);
        Ok(tokens)
    }

    fn produce_next_token(&mut self) -> Result<(Token, usize), LexError> {
        self.stream.slice_while(self.stream.offset(), char::is_whitespace);

        let start = self.stream.offset();
        let Some(c) = self.stream.peek() else {
            return Ok((Token::End, start));
        };

        let token = if c.is_ascii_digit() {
            let text = self.stream.slice_while(start, Self::is_number_part);
            let value = Number::from_literal(text).ok_or_else(|| LexError::MalformedNumber {
                text: text.to_string(),
                position: start,
            })?;
            Token::Number(value)
        } else if Self::is_id_start(c) {
            let name = self.stream.slice_while(start, Self::is_id_part);
            Token::Identifier(name.to_string())
        } else if let Some(token) = Token::from_symbol(c) {
            self.stream.advance();
            token
        } else {
            return Err(LexError::UnexpectedInput {
                input: c,
                position: start,
            });
        };

        trace!("token {token:?} at {start}");
        Ok((token, start))
    }

    fn is_id_start(c: char) -> bool {
        c.is_ascii_alphabetic() || c == '_'
    }

    fn is_id_part(c: char) -> bool {
        Self::is_id_start(c) || c.is_ascii_digit()
    }

    // letters and dots are swallowed so that `1a` or `1..0` fail as a whole
    fn is_number_part(c: char) -> bool {
        Self::is_id_part(c) || c == '.'
    }
}

impl TokenStream for Lexer<'_> {
    fn peek_token(&mut self) -> Result<&Token, LexError> {
        let lookahead = match self.token.take() {
            Some(lookahead) => lookahead,
            None => self.produce_next_token()?,
        };
        Ok(&self.token.insert(lookahead).0)
    }

    fn consume_token(&mut self) -> Option<Token> {
        self.token.take().map(|(token, _)| token)
    }

    fn position(&self) -> usize {
        match &self.token {
            Some((_, position)) => *position,
            None => self.stream.offset(),
        }
    }
}
