//! Arithmetic expression evaluator used by `calc` and table cells.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! list   = expr { "," expr }                 value of the last expr
//! expr   = term { ("+" | "-") term }
//! term   = factor { ("*" | "/" | "%") factor }
//! factor = power { "^" power }               left associative
//! power  = { "+" | "-" } base
//! base   = number | constant [ "(" ")" ] | func1 power
//!        | func2 "(" expr "," expr ")" | "(" list ")"
//! ```
//!
//! Identifiers are lower-case. Evaluation follows IEEE rules, so `1/0` is
//! `inf` and `sqrt(-1)` is `nan` rather than an error; only malformed input
//! fails.

use std::f64::consts::{E, PI};

use thiserror::Error;

/// Why an expression could not be evaluated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// Input ended where an operand was expected.
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// A character that cannot start or continue the expression.
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar {
        /// Offending character
        ch: char,
        /// Byte offset
        pos: usize,
    },

    /// Name that is neither a constant nor a function.
    #[error("unknown identifier \"{name}\" at position {pos}")]
    UnknownIdentifier {
        /// Identifier as written
        name: String,
        /// Byte offset
        pos: usize,
    },

    /// A required token is missing.
    #[error("expected '{expected}' at position {pos}")]
    Expected {
        /// Missing character
        expected: char,
        /// Byte offset
        pos: usize,
    },

    /// Parentheses or function operands nested deeper than [`MAX_NESTING`].
    #[error("expression nested too deep at position {pos}")]
    TooDeep {
        /// Byte offset
        pos: usize,
    },
}

/// Deepest nesting of parentheses and function operands accepted.
pub const MAX_NESTING: usize = 256;

type ExprResult = std::result::Result<f64, ExprError>;

/// Evaluate an arithmetic expression.
///
/// # Example
///
/// ```
/// use txtml::expr::evaluate;
///
/// assert_eq!(evaluate("2+2*3").unwrap(), 8.0);
/// assert!(evaluate("2+").is_err());
/// ```
pub fn evaluate(source: &str) -> ExprResult {
    let mut parser = Parser {
        src: source,
        pos: 0,
        depth: 0,
    };
    let value = parser.list()?;
    match parser.peek() {
        None => Ok(value),
        Some(ch) => Err(ExprError::UnexpectedChar {
            ch,
            pos: parser.pos,
        }),
    }
}

/// Format a number the way C's `%g` does: six significant digits, trailing
/// zeros removed, exponent notation for very large or small magnitudes.
pub fn format_number(value: f64) -> String {
    const PRECISION: i32 = 6;

    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let scientific = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.abs()
        )
    } else {
        let decimals = (PRECISION - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

enum Ident {
    Constant(f64),
    Unary(fn(f64) -> f64),
    Binary(fn(f64, f64) -> f64),
}

fn lookup(name: &str) -> Option<Ident> {
    use Ident::{Binary, Constant, Unary};

    let ident = match name {
        "pi" => Constant(PI),
        "e" => Constant(E),
        "abs" => Unary(f64::abs),
        "acos" => Unary(f64::acos),
        "asin" => Unary(f64::asin),
        "atan" => Unary(f64::atan),
        "ceil" => Unary(f64::ceil),
        "cos" => Unary(f64::cos),
        "cosh" => Unary(f64::cosh),
        "exp" => Unary(f64::exp),
        "fac" => Unary(factorial),
        "floor" => Unary(f64::floor),
        "ln" => Unary(f64::ln),
        "log" | "log10" => Unary(f64::log10),
        "sin" => Unary(f64::sin),
        "sinh" => Unary(f64::sinh),
        "sqrt" => Unary(f64::sqrt),
        "tan" => Unary(f64::tan),
        "tanh" => Unary(f64::tanh),
        "atan2" => Binary(f64::atan2),
        "ncr" => Binary(combinations),
        "npr" => Binary(permutations),
        "pow" => Binary(f64::powf),
        _ => return None,
    };
    Some(ident)
}

fn factorial(a: f64) -> f64 {
    if a < 0.0 {
        return f64::NAN;
    }
    if a > f64::from(u32::MAX) {
        return f64::INFINITY;
    }
    let n = a.floor() as u64;
    let mut result = 1.0f64;
    for i in 1..=n {
        result *= i as f64;
        if result.is_infinite() {
            break;
        }
    }
    result
}

fn combinations(n: f64, r: f64) -> f64 {
    if n < 0.0 || r < 0.0 || n < r {
        return f64::NAN;
    }
    if n > f64::from(u32::MAX) || r > f64::from(u32::MAX) {
        return f64::INFINITY;
    }
    let n = n.floor() as u64;
    let mut r = r.floor() as u64;
    if r > n / 2 {
        r = n - r;
    }
    let mut result = 1.0f64;
    for i in 1..=r {
        result *= (n - r + i) as f64 / i as f64;
        if result.is_infinite() {
            break;
        }
    }
    result
}

fn permutations(n: f64, r: f64) -> f64 {
    combinations(n, r) * factorial(r)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn skip_whitespace(&mut self) {
        let rest = &self.src[self.pos..];
        let trimmed = rest.trim_start_matches([' ', '\t', '\n', '\r']);
        self.pos += rest.len() - trimmed.len();
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.src[self.pos..].chars().next()
    }

    fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, ch: char) -> Result<(), ExprError> {
        if self.eat(ch) {
            Ok(())
        } else {
            Err(ExprError::Expected {
                expected: ch,
                pos: self.pos,
            })
        }
    }

    /// Run `f` one nesting level deeper.
    fn nested(&mut self, f: impl FnOnce(&mut Self) -> ExprResult) -> ExprResult {
        if self.depth >= MAX_NESTING {
            return Err(ExprError::TooDeep { pos: self.pos });
        }
        self.depth += 1;
        let value = f(self);
        self.depth -= 1;
        value
    }

    fn list(&mut self) -> ExprResult {
        let mut value = self.expr()?;
        while self.eat(',') {
            value = self.expr()?;
        }
        Ok(value)
    }

    fn expr(&mut self) -> ExprResult {
        let mut value = self.term()?;
        loop {
            if self.eat('+') {
                value += self.term()?;
            } else if self.eat('-') {
                value -= self.term()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn term(&mut self) -> ExprResult {
        let mut value = self.factor()?;
        loop {
            if self.eat('*') {
                value *= self.factor()?;
            } else if self.eat('/') {
                value /= self.factor()?;
            } else if self.eat('%') {
                value %= self.factor()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn factor(&mut self) -> ExprResult {
        let mut value = self.power()?;
        while self.eat('^') {
            value = value.powf(self.power()?);
        }
        Ok(value)
    }

    fn power(&mut self) -> ExprResult {
        let mut negative = false;
        loop {
            if self.eat('-') {
                negative = !negative;
            } else if !self.eat('+') {
                break;
            }
        }
        let value = self.base()?;
        Ok(if negative { -value } else { value })
    }

    fn base(&mut self) -> ExprResult {
        match self.peek() {
            None => Err(ExprError::UnexpectedEnd),
            Some('(') => {
                self.pos += 1;
                self.nested(|p| {
                    let value = p.list()?;
                    p.expect(')')?;
                    Ok(value)
                })
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(c) if c.is_ascii_lowercase() => self.identifier(),
            Some(ch) => Err(ExprError::UnexpectedChar { ch, pos: self.pos }),
        }
    }

    fn number(&mut self) -> ExprResult {
        let start = self.pos;
        let bytes = self.src.as_bytes();
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end < bytes.len() && bytes[end] == b'.' {
            end += 1;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
        }
        if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
            let mut exp_end = end + 1;
            if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
                exp_end += 1;
            }
            let digits_start = exp_end;
            while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
                exp_end += 1;
            }
            if exp_end > digits_start {
                end = exp_end;
            }
        }

        match self.src[start..end].parse::<f64>() {
            Ok(value) => {
                self.pos = end;
                Ok(value)
            }
            Err(_) => Err(ExprError::UnexpectedChar {
                ch: '.',
                pos: start,
            }),
        }
    }

    fn identifier(&mut self) -> ExprResult {
        let start = self.pos;
        let len = self.src[start..]
            .find(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'))
            .unwrap_or(self.src.len() - start);
        let name = &self.src[start..start + len];
        self.pos += len;

        match lookup(name) {
            Some(Ident::Constant(value)) => {
                if self.eat('(') {
                    self.expect(')')?;
                }
                Ok(value)
            }
            Some(Ident::Unary(f)) => self.nested(|p| Ok(f(p.power()?))),
            Some(Ident::Binary(f)) => self.nested(|p| {
                p.expect('(')?;
                let a = p.expr()?;
                p.expect(',')?;
                let b = p.expr()?;
                p.expect(')')?;
                Ok(f(a, b))
            }),
            None => Err(ExprError::UnknownIdentifier {
                name: name.to_string(),
                pos: start,
            }),
        }
    }
}
