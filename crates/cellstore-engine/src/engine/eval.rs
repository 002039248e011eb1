//! Arithmetic evaluation of resolved formulas.
//!
//! Operator precedence parsing over a fully literal infix expression, with
//! explicit operator and value stacks so nesting depth is bounded only by
//! memory:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('-' | '+') unary | primary
//! primary := number | '(' expr ')'
//! ```
//!
//! Whitespace between tokens is ignored. Any error carries the position and
//! cause, wrapped in [`CellError::ExpressionEvaluation`].

use super::error::{CellError, CellResult};

/// Evaluate a literal arithmetic expression such as `12+23.03+(10-5)`.
pub fn evaluate(expression: &str) -> CellResult<f64> {
    let value = ExprParser::new(expression).run()?;
    if !value.is_finite() {
        return Err(CellError::ExpressionEvaluation(format!(
            "result is not a finite number ({})",
            value
        )));
    }
    Ok(value)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Neg,
    Open,
}

impl Op {
    fn precedence(self) -> u8 {
        match self {
            Op::Open => 0,
            Op::Add | Op::Sub => 1,
            Op::Mul | Op::Div => 2,
            Op::Neg => 3,
        }
    }
}

struct ExprParser<'a> {
    input: &'a str,
    pos: usize,
    ops: Vec<Op>,
    values: Vec<f64>,
}

impl<'a> ExprParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            ops: Vec::new(),
            values: Vec::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn error(&self, message: String) -> CellError {
        CellError::ExpressionEvaluation(format!("{} at position {}", message, self.pos))
    }

    fn run(mut self) -> CellResult<f64> {
        loop {
            self.parse_operand()?;
            if self.parse_operator()? {
                break;
            }
        }
        self.values
            .pop()
            .ok_or_else(|| self.error("expected a number but found end of input".to_string()))
    }

    /// Consume prefix operators and open parentheses up to and including a
    /// number.
    fn parse_operand(&mut self) -> CellResult<()> {
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('(') => {
                    self.pos += 1;
                    self.ops.push(Op::Open);
                }
                Some('-') => {
                    self.pos += 1;
                    self.ops.push(Op::Neg);
                }
                Some('+') => self.pos += 1,
                Some(c) if c.is_ascii_digit() || c == '.' => {
                    let value = self.parse_number()?;
                    self.values.push(value);
                    return Ok(());
                }
                Some(c) => return Err(self.error(format!("expected a number but found '{}'", c))),
                None => {
                    return Err(self.error("expected a number but found end of input".to_string()));
                }
            }
        }
    }

    /// Consume closing parentheses and one binary operator. Returns true at
    /// the end of input.
    fn parse_operator(&mut self) -> CellResult<bool> {
        loop {
            self.skip_whitespace();
            let op = match self.peek() {
                Some(')') => {
                    self.reduce_while(|op| op != Op::Open)?;
                    if self.ops.pop() != Some(Op::Open) {
                        return Err(self.error("unexpected ')'".to_string()));
                    }
                    self.pos += 1;
                    continue;
                }
                Some('+') => Op::Add,
                Some('-') => Op::Sub,
                Some('*') => Op::Mul,
                Some('/') => Op::Div,
                Some(c) => return Err(self.error(format!("unexpected '{}'", c))),
                None => {
                    self.reduce_while(|op| op != Op::Open)?;
                    if !self.ops.is_empty() {
                        return Err(self.error("missing closing ')'".to_string()));
                    }
                    return Ok(true);
                }
            };
            // Left associative: equal precedence reduces first.
            self.reduce_while(|top| top.precedence() >= op.precedence())?;
            self.ops.push(op);
            self.pos += 1;
            return Ok(false);
        }
    }

    fn reduce_while(&mut self, pred: impl Fn(Op) -> bool) -> CellResult<()> {
        while let Some(&top) = self.ops.last() {
            if !pred(top) {
                break;
            }
            self.ops.pop();
            self.apply(top)?;
        }
        Ok(())
    }

    fn apply(&mut self, op: Op) -> CellResult<()> {
        let rhs = self.pop_value()?;
        let value = match op {
            Op::Neg => -rhs,
            Op::Add => self.pop_value()? + rhs,
            Op::Sub => self.pop_value()? - rhs,
            Op::Mul => self.pop_value()? * rhs,
            Op::Div => {
                let value = self.pop_value()? / rhs;
                if !value.is_finite() {
                    return Err(self.error(format!("division by {} is not finite", rhs)));
                }
                value
            }
            Op::Open => return Err(self.error("missing closing ')'".to_string())),
        };
        self.values.push(value);
        Ok(())
    }

    fn pop_value(&mut self) -> CellResult<f64> {
        self.values
            .pop()
            .ok_or_else(|| self.error("expected a number but found end of input".to_string()))
    }

    fn parse_number(&mut self) -> CellResult<f64> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !(c.is_ascii_digit() || c == '.') {
                break;
            }
            self.pos += 1;
        }
        let literal = &self.input[start..self.pos];
        literal.parse::<f64>().map_err(|e| {
            CellError::ExpressionEvaluation(format!(
                "invalid number '{}' at position {}: {}",
                literal, start, e
            ))
        })
    }
}
