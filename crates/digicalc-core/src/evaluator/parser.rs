//! Precedence-climbing parser over an [`OperatorTable`].
//!
//! The parser knows no operator by name: which symbols exist, how tightly
//! they bind and how they associate all come from the table. The only
//! built-in rules are grouping with `( )`, function application and implicit
//! multiplication (an operand directly followed by a number, a function or
//! `(`), which borrows the table's `*` entry.

use super::{
    error::EvaluationError,
    lexer::{Token, TokenKind},
    operators::{Associativity, Fixity, FunctionDef, OperatorDef, OperatorTable, precedence},
};

/// Parsed expression tree.
#[derive(Debug, Clone)]
pub enum Expr {
    Number(f64),
    Unary {
        op: OperatorDef,
        operand: Box<Expr>,
    },
    Binary {
        op: OperatorDef,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        function: FunctionDef,
        arg: Box<Expr>,
    },
}

impl Expr {
    pub fn eval(&self) -> Result<f64, EvaluationError> {
        match self {
            Self::Number(v) => Ok(*v),
            Self::Unary { op, operand } => op.apply_unary(operand.eval()?),
            Self::Binary { op, lhs, rhs } => op.apply_binary(lhs.eval()?, rhs.eval()?),
            Self::Call { function, arg } => function.call(arg.eval()?),
        }
    }
}

/// Parse a complete token stream.
pub fn parse(tokens: &[Token], table: &OperatorTable) -> Result<Expr, EvaluationError> {
    if tokens.is_empty() {
        return Err(EvaluationError::EmptyExpression);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        table,
        nesting: 0,
    };
    let (expr, _) = parser.expression(0)?;

    match parser.peek() {
        None => Ok(expr),
        Some(Token {
            kind: TokenKind::RParen,
            ..
        }) => Err(EvaluationError::UnbalancedParentheses),
        Some(token) => Err(EvaluationError::UnexpectedToken {
            found: token.describe(),
            offset: token.offset,
        }),
    }
}

/// Deepest `(`, sign or function nesting accepted.
pub const MAX_NESTING: usize = 256;

/// Deepest expression tree accepted. Long operator chains such as
/// `1+1+…+1` or `5!!!…` grow the tree without nesting.
pub const MAX_TREE_DEPTH: usize = 1024;

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    table: &'a OperatorTable,
    nesting: usize,
}

/// A subtree and its height.
type Node = (Expr, usize);

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Parse operators binding at least as tightly as `min_precedence`.
    fn expression(&mut self, min_precedence: u8) -> Result<Node, EvaluationError> {
        if self.nesting >= MAX_NESTING {
            return Err(EvaluationError::TooDeep { limit: MAX_NESTING });
        }
        self.nesting += 1;
        let node = self.climb(min_precedence);
        self.nesting -= 1;
        node
    }

    fn climb(&mut self, min_precedence: u8) -> Result<Node, EvaluationError> {
        let (mut lhs, mut depth) = self.operand()?;

        while let Some(token) = self.peek() {
            match &token.kind {
                TokenKind::Symbol(symbol) => {
                    if let Some(op) = self.table.lookup(*symbol, Fixity::Postfix).copied() {
                        if op.precedence() < min_precedence {
                            break;
                        }
                        self.advance();
                        depth = grow(depth, 0)?;
                        lhs = Expr::Unary {
                            op,
                            operand: Box::new(lhs),
                        };
                        continue;
                    }

                    let Some(op) = self.table.lookup(*symbol, Fixity::Infix).copied() else {
                        return Err(EvaluationError::UnknownOperator {
                            symbol: *symbol,
                            offset: token.offset,
                        });
                    };
                    if op.precedence() < min_precedence {
                        break;
                    }
                    self.advance();
                    let next_min = match op.associativity() {
                        Associativity::Left => op.precedence() + 1,
                        Associativity::Right => op.precedence(),
                    };
                    let (rhs, rhs_depth) = self.expression(next_min)?;
                    depth = grow(depth, rhs_depth)?;
                    lhs = Expr::Binary {
                        op,
                        lhs: Box::new(lhs),
                        rhs: Box::new(rhs),
                    };
                }

                TokenKind::RParen => break,

                // `2sin30`, `2(3)`, `5!3`
                TokenKind::Number(_) | TokenKind::Ident(_) | TokenKind::LParen => {
                    let Some(op) = self.table.lookup('*', Fixity::Infix).copied() else {
                        return Err(EvaluationError::UnexpectedToken {
                            found: token.describe(),
                            offset: token.offset,
                        });
                    };
                    if op.precedence() < min_precedence {
                        break;
                    }
                    let (rhs, rhs_depth) = self.expression(op.precedence() + 1)?;
                    depth = grow(depth, rhs_depth)?;
                    lhs = Expr::Binary {
                        op,
                        lhs: Box::new(lhs),
                        rhs: Box::new(rhs),
                    };
                }
            }
        }

        Ok((lhs, depth))
    }

    /// A number, a parenthesised group, a function call or a prefixed operand.
    fn operand(&mut self) -> Result<Node, EvaluationError> {
        let token = self.advance().ok_or(EvaluationError::UnexpectedEnd)?;

        match &token.kind {
            TokenKind::Number(value) => Ok((Expr::Number(*value), 1)),

            TokenKind::LParen => {
                let inner = self.expression(0)?;
                match self.advance() {
                    Some(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => Ok(inner),
                    _ => Err(EvaluationError::UnbalancedParentheses),
                }
            }

            TokenKind::Ident(name) => {
                let function = *self.table.function(name).ok_or_else(|| {
                    EvaluationError::UnknownFunction {
                        name: name.clone(),
                        offset: token.offset,
                    }
                })?;
                // `sin(x)^2` squares the sine; `sin x^2` takes the sine of the square
                let (arg, depth) = match self.peek() {
                    Some(Token {
                        kind: TokenKind::LParen,
                        ..
                    }) => self.operand()?,
                    _ => self.expression(precedence::POWER)?,
                };
                Ok((
                    Expr::Call {
                        function,
                        arg: Box::new(arg),
                    },
                    grow(depth, 0)?,
                ))
            }

            TokenKind::Symbol(symbol) => {
                let Some(op) = self.table.lookup(*symbol, Fixity::Prefix).copied() else {
                    return Err(EvaluationError::UnexpectedToken {
                        found: symbol.to_string(),
                        offset: token.offset,
                    });
                };
                let (operand, depth) = self.expression(op.precedence())?;
                Ok((
                    Expr::Unary {
                        op,
                        operand: Box::new(operand),
                    },
                    grow(depth, 0)?,
                ))
            }

            TokenKind::RParen => Err(EvaluationError::UnexpectedToken {
                found: ")".into(),
                offset: token.offset,
            }),
        }
    }
}

/// Height of a node over children of the given heights.
fn grow(lhs: usize, rhs: usize) -> Result<usize, EvaluationError> {
    let depth = lhs.max(rhs) + 1;
    if depth > MAX_TREE_DEPTH {
        return Err(EvaluationError::TooDeep {
            limit: MAX_TREE_DEPTH,
        });
    }
    Ok(depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::lexer::tokenize;

    fn eval_with(source: &str, table: &OperatorTable) -> Result<f64, EvaluationError> {
        parse(&tokenize(source)?, table)?.eval()
    }

    fn eval(source: &str) -> Result<f64, EvaluationError> {
        eval_with(source, &OperatorTable::standard().with_factorial())
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(eval("3+4*2").unwrap(), 11.0);
        assert_eq!(eval("10-4-3").unwrap(), 3.0);
        assert_eq!(eval("20/4/5").unwrap(), 1.0);
    }

    #[test]
    fn power_is_right_associative_and_above_multiplication() {
        assert_eq!(eval("2^3^2").unwrap(), 512.0);
        assert_eq!(eval("2*3^2").unwrap(), 18.0);
    }

    #[test]
    fn modulo_shares_multiplication_level() {
        assert_eq!(eval("7%4*2").unwrap(), 6.0);
        assert_eq!(eval("1+7%4").unwrap(), 4.0);
    }

    #[test]
    fn factorial_binds_tighter_than_power() {
        assert_eq!(eval("3!^2").unwrap(), 36.0);
        assert_eq!(eval("2^3!").unwrap(), 64.0);
        assert_eq!(eval("5!").unwrap(), 120.0);
    }

    #[test]
    fn sign_binds_to_its_operand() {
        assert_eq!(
            eval("-1!").unwrap_err(),
            EvaluationError::NegativeFactorial { operand: -1.0 }
        );
        assert_eq!(eval("5--3").unwrap(), 8.0);
        assert_eq!(eval("2*-3").unwrap(), -6.0);
        assert_eq!(eval("+4").unwrap(), 4.0);
    }

    #[test]
    fn parentheses_group() {
        assert_eq!(eval("(3+4)*2").unwrap(), 14.0);
        assert_eq!(eval("(1+2)!").unwrap(), 6.0);
    }

    #[test]
    fn functions_with_and_without_parentheses() {
        assert_eq!(eval("sin(0)").unwrap(), 0.0);
        assert_eq!(eval("cos0").unwrap(), 1.0);
        assert_eq!(eval("tan 0").unwrap(), 0.0);
        assert_eq!(eval("cos(0)^2").unwrap(), 1.0);
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(eval("2cos0").unwrap(), 2.0);
        assert_eq!(eval("2(3+1)").unwrap(), 8.0);
        assert_eq!(eval("3!2").unwrap(), 12.0);
        assert_eq!(eval("1+2cos0*3").unwrap(), 7.0);
    }

    #[test]
    fn factorial_needs_extended_table() {
        let err = eval_with("5!", &OperatorTable::standard()).unwrap_err();
        assert_eq!(
            err,
            EvaluationError::UnknownOperator {
                symbol: '!',
                offset: 1
            }
        );
    }

    #[test]
    fn malformed_expressions() {
        assert_eq!(eval("3+").unwrap_err(), EvaluationError::UnexpectedEnd);
        assert_eq!(eval("(3+4").unwrap_err(), EvaluationError::UnbalancedParentheses);
        assert_eq!(eval("3+4)").unwrap_err(), EvaluationError::UnbalancedParentheses);
        assert!(matches!(
            eval("*3").unwrap_err(),
            EvaluationError::UnexpectedToken { .. }
        ));
        assert!(matches!(
            eval("3sqrt4").unwrap_err(),
            EvaluationError::UnknownFunction { .. }
        ));
        assert!(matches!(
            eval("3&4").unwrap_err(),
            EvaluationError::UnknownOperator { symbol: '&', .. }
        ));
        assert_eq!(eval("").unwrap_err(), EvaluationError::EmptyExpression);
    }

    #[test]
    fn deep_nesting_is_an_error() {
        let depth = 100_000;
        let parens = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(
            eval(&parens).unwrap_err(),
            EvaluationError::TooDeep { limit: MAX_NESTING }
        );

        let signs = format!("{}1", "-".repeat(depth));
        assert_eq!(
            eval(&signs).unwrap_err(),
            EvaluationError::TooDeep { limit: MAX_NESTING }
        );

        let calls = format!("{}0", "sin ".repeat(depth));
        assert_eq!(
            eval(&calls).unwrap_err(),
            EvaluationError::TooDeep { limit: MAX_NESTING }
        );
    }

    #[test]
    fn long_chains_are_bounded() {
        let sum = vec!["1"; 100_000].join("+");
        assert_eq!(
            eval(&sum).unwrap_err(),
            EvaluationError::TooDeep {
                limit: MAX_TREE_DEPTH
            }
        );

        let factorials = format!("1{}", "!".repeat(100_000));
        assert_eq!(
            eval(&factorials).unwrap_err(),
            EvaluationError::TooDeep {
                limit: MAX_TREE_DEPTH
            }
        );
    }

    #[test]
    fn nesting_below_the_limit_evaluates() {
        let depth = MAX_NESTING - 1;
        let parens = format!("{}7{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(eval(&parens).unwrap(), 7.0);
        assert_eq!(eval(&vec!["1"; 500].join("+")).unwrap(), 500.0);
    }

    #[test]
    fn sign_binds_tighter_than_power() {
        assert_eq!(eval("-2^2").unwrap(), 4.0);
        assert_eq!(eval("0-2^2").unwrap(), -4.0);
        assert_eq!(eval("2^-1").unwrap(), 0.5);
    }

    #[test]
    fn division_by_zero_propagates() {
        assert_eq!(eval("5/0").unwrap_err(), EvaluationError::DivisionByZero);
        assert_eq!(eval("1+5%0").unwrap_err(), EvaluationError::DivisionByZero);
    }
}
