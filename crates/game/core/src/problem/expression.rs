//! Evaluator for the question strings produced by the generator.
//!
//! Grammar (whitespace ignored):
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('×' | '*' | '÷' | '/') factor)*
//! factor := integer | '(' expr ')'
//! ```
//!
//! Division must be exact; any non-integer quotient, overflow or syntax error
//! yields `None`.

use std::iter::Peekable;
use std::str::Chars;

/// Evaluates a question such as `"(7 + 3) × 4"`.
pub fn evaluate(question: &str) -> Option<i64> {
    let mut parser = Parser {
        chars: question.chars().peekable(),
    };
    let value = parser.expr()?;
    parser.skip_whitespace();
    match parser.chars.peek() {
        None => Some(value),
        Some(_) => None,
    }
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
}

impl Parser<'_> {
    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
    }

    fn peek_symbol(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.chars.peek().copied()
    }

    fn expr(&mut self) -> Option<i64> {
        let mut value = self.term()?;
        while let Some(op @ ('+' | '-')) = self.peek_symbol() {
            self.chars.next();
            let rhs = self.term()?;
            value = match op {
                '+' => value.checked_add(rhs)?,
                _ => value.checked_sub(rhs)?,
            };
        }
        Some(value)
    }

    fn term(&mut self) -> Option<i64> {
        let mut value = self.factor()?;
        while let Some(op @ ('×' | '*' | '÷' | '/')) = self.peek_symbol() {
            self.chars.next();
            let rhs = self.factor()?;
            value = match op {
                '×' | '*' => value.checked_mul(rhs)?,
                _ => {
                    if rhs == 0 || value.checked_rem(rhs)? != 0 {
                        return None;
                    }
                    value / rhs
                }
            };
        }
        Some(value)
    }

    fn factor(&mut self) -> Option<i64> {
        match self.peek_symbol()? {
            '(' => {
                self.chars.next();
                let value = self.expr()?;
                match self.peek_symbol() {
                    Some(')') => {
                        self.chars.next();
                        Some(value)
                    }
                    _ => None,
                }
            }
            c if c.is_ascii_digit() => {
                let mut value: i64 = 0;
                while let Some(digit) = self.chars.peek().and_then(|c| c.to_digit(10)) {
                    self.chars.next();
                    value = value.checked_mul(10)?.checked_add(digit as i64)?;
                }
                Some(value)
            }
            _ => None,
        }
    }
}
