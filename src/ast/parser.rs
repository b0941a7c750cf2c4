use crate::ast::{ASTNode, Lexer, Operator, Token, TokenBuffer, TokenStream};
use crate::error::{Error, ParseError};
use log::{debug, trace};

/// Deepest tree the parser builds. Applies both to nested groups and unary
/// minus, and to the depth of the resulting tree, so a long chain like
/// `1 + 1 + ... + 1` is bounded too. Evaluation, compilation and drop all
/// recurse once per level.
pub const MAX_DEPTH: usize = 256;

/// Recursive-descent parser over any [`TokenStream`].
///
/// ```text
/// expression := term   (('+' | '-') term)*
/// term       := factor (('*' | '/') factor)*
/// factor     := '-' factor | NUMBER | IDENTIFIER | '(' expression ')'
/// ```
///
/// Chains of operators with equal precedence fold to the left, so
/// `a - b - c` parses as `(a - b) - c`.
pub struct Parser<S> {
    tokens: S,
    outcome: Option<Result<ASTNode, Error>>,
    nesting: usize,
}

/// A parsed subtree together with its depth.
type Parsed = Result<(ASTNode, usize), Error>;

impl<'src> Parser<Lexer<'src>> {
    /// Parses `input` in one go and hands back the tree.
    pub fn parse_str(input: &'src str) -> Result<ASTNode, Error> {
        debug!("Parsing expression: {}", input);
        let ast = Parser::new(Lexer::new(input)).parse_root()?;
        debug!("Parse result: {:?}", ast);
        Ok(ast)
    }
}

impl Parser<TokenBuffer> {
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Parser::new(TokenBuffer::new(tokens))
    }
}

impl<S: TokenStream> Parser<S> {
    pub fn new(tokens: S) -> Self {
        Self {
            tokens,
            outcome: None,
            nesting: 0,
        }
    }

    /// Parses the whole token stream. The first call decides the outcome;
    /// later calls return the same tree or the same error.
    pub fn parse(&mut self) -> Result<&ASTNode, Error> {
        let outcome = match self.outcome.take() {
            Some(outcome) => outcome,
            None => self.parse_root(),
        };
        match self.outcome.insert(outcome) {
            Ok(ast) => Ok(ast),
            Err(error) => Err(error.clone()),
        }
    }

    fn parse_root(&mut self) -> Result<ASTNode, Error> {
        let (expression, _) = self.parse_expression()?;
        if !self.tokens.at_end()? {
            let token = self.tokens.peek_token()?.clone();
            return Err(ParseError::TrailingTokens {
                token,
                position: self.tokens.position(),
            }
            .into());
        }
        Ok(expression)
    }

    fn parse_expression(&mut self) -> Parsed {
        let (mut node, mut depth) = self.parse_term()?;
        while let Some((operator, position)) =
            self.next_operator(&[Operator::Add, Operator::Subtract])?
        {
            let (right, right_depth) = self.parse_term()?;
            depth = Self::checked_depth(depth.max(right_depth) + 1, position)?;
            node = ASTNode::operation(node, operator, right);
        }
        Ok((node, depth))
    }

    fn parse_term(&mut self) -> Parsed {
        let (mut node, mut depth) = self.parse_factor()?;
        while let Some((operator, position)) =
            self.next_operator(&[Operator::Multiply, Operator::Divide])?
        {
            let (right, right_depth) = self.parse_factor()?;
            depth = Self::checked_depth(depth.max(right_depth) + 1, position)?;
            node = ASTNode::operation(node, operator, right);
        }
        Ok((node, depth))
    }

    fn parse_factor(&mut self) -> Parsed {
        self.tokens.peek_token()?;
        let position = self.tokens.position();
        let token = self.tokens.consume_token().unwrap_or(Token::End);
        trace!("factor starting with {token:?} at {position}");

        match token {
            Token::Minus => match self.nested(position, Self::parse_factor)? {
                (ASTNode::Constant(value), depth) => Ok((ASTNode::Constant(-value), depth)),
                (factor, depth) => Ok((
                    ASTNode::operation(ASTNode::constant(-1), Operator::Multiply, factor),
                    Self::checked_depth(depth + 1, position)?,
                )),
            },
            Token::Number(value) => Ok((ASTNode::Constant(value), 1)),
            Token::Identifier(name) => Ok((ASTNode::Reference(name), 1)),
            Token::OpenParen => self.nested(position, Self::parse_group),
            token => Err(ParseError::IllegalToken { token, position }.into()),
        }
    }

    fn parse_group(&mut self) -> Parsed {
        let expression = self.parse_expression()?;
        if *self.tokens.peek_token()? == Token::CloseParen {
            self.tokens.consume_token();
            Ok(expression)
        } else {
            Err(ParseError::MissingClosingParenthesis {
                position: self.tokens.position(),
            }
            .into())
        }
    }

    /// Runs `parse` one nesting level deeper, failing past [`MAX_DEPTH`].
    fn nested(&mut self, position: usize, parse: fn(&mut Self) -> Parsed) -> Parsed {
        if self.nesting >= MAX_DEPTH {
            return Err(Self::too_deep(position));
        }
        self.nesting += 1;
        let parsed = parse(self);
        self.nesting -= 1;
        parsed
    }

    fn checked_depth(depth: usize, position: usize) -> Result<usize, Error> {
        if depth > MAX_DEPTH {
            return Err(Self::too_deep(position));
        }
        Ok(depth)
    }

    fn too_deep(position: usize) -> Error {
        ParseError::NestingTooDeep {
            limit: MAX_DEPTH,
            position,
        }
        .into()
    }

    /// Consumes the lookahead if it is one of `allowed`, returning it with
    /// its position.
    fn next_operator(&mut self, allowed: &[Operator]) -> Result<Option<(Operator, usize)>, Error> {
        let operator = Operator::from_token(self.tokens.peek_token()?)
            .filter(|operator| allowed.contains(operator));
        let position = self.tokens.position();
        if operator.is_some() {
            self.tokens.consume_token();
        }
        Ok(operator.map(|operator| (operator, position)))
    }
}
