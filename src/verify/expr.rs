//! Tiny arithmetic evaluator for the fallback comparison.
//!
//! Grammar (precedence low → high):
//!   expr   := term (('+' | '-') term)*
//!   term   := unary (('*' | '/') unary)*
//!   unary  := '-' unary | '+' unary | power
//!   power  := postfix ('^' unary)?
//!   postfix:= atom '%'?
//!   atom   := number | '(' expr ')'
//!
//! Anything else (identifiers, stray characters, empty input) is not a number.

/// Evaluate `input` to a finite number, or `None` when it isn't pure arithmetic.
pub fn evaluate(input: &str) -> Option<f64> {
  let tokens = tokenize(input)?;
  if tokens.is_empty() { return None; }
  let mut p = Parser { tokens: &tokens, pos: 0 };
  let value = p.expr()?;
  if p.pos != tokens.len() { return None; }
  value.is_finite().then_some(value)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tok {
  Num(f64),
  Op(char),
  Open,
  Close,
}

fn tokenize(input: &str) -> Option<Vec<Tok>> {
  let chars: Vec<char> = input.chars().collect();
  let mut out = Vec::new();
  let mut i = 0;
  while i < chars.len() {
    let c = chars[i];
    match c {
      c if c.is_whitespace() => { i += 1; }
      '0'..='9' | '.' => {
        let start = i;
        while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') { i += 1; }
        let text: String = chars[start..i].iter().collect();
        out.push(Tok::Num(text.parse().ok()?));
      }
      '+' | '-' | '*' | '/' | '^' | '%' => { out.push(Tok::Op(c)); i += 1; }
      '×' => { out.push(Tok::Op('*')); i += 1; }
      '÷' => { out.push(Tok::Op('/')); i += 1; }
      '−' => { out.push(Tok::Op('-')); i += 1; }
      '(' => { out.push(Tok::Open); i += 1; }
      ')' => { out.push(Tok::Close); i += 1; }
      _ => return None,
    }
  }
  Some(out)
}

struct Parser<'a> {
  tokens: &'a [Tok],
  pos: usize,
}

impl Parser<'_> {
  fn peek(&self) -> Option<Tok> {
    self.tokens.get(self.pos).copied()
  }

  fn eat_op(&mut self, ops: &[char]) -> Option<char> {
    match self.peek() {
      Some(Tok::Op(c)) if ops.contains(&c) => { self.pos += 1; Some(c) }
      _ => None,
    }
  }

  fn expr(&mut self) -> Option<f64> {
    let mut acc = self.term()?;
    while let Some(op) = self.eat_op(&['+', '-']) {
      let rhs = self.term()?;
      acc = if op == '+' { acc + rhs } else { acc - rhs };
    }
    Some(acc)
  }

  fn term(&mut self) -> Option<f64> {
    let mut acc = self.unary()?;
    while let Some(op) = self.eat_op(&['*', '/']) {
      let rhs = self.unary()?;
      acc = if op == '*' { acc * rhs } else { acc / rhs };
    }
    Some(acc)
  }

  fn unary(&mut self) -> Option<f64> {
    match self.eat_op(&['-', '+']) {
      Some('-') => Some(-self.unary()?),
      Some(_) => self.unary(),
      None => self.power(),
    }
  }

  fn power(&mut self) -> Option<f64> {
    let base = self.postfix()?;
    if self.eat_op(&['^']).is_some() {
      // Right-associative: 2^3^2 = 2^9.
      let exp = self.unary()?;
      return Some(base.powf(exp));
    }
    Some(base)
  }

  fn postfix(&mut self) -> Option<f64> {
    let v = self.atom()?;
    if self.eat_op(&['%']).is_some() {
      return Some(v / 100.0);
    }
    Some(v)
  }

  fn atom(&mut self) -> Option<f64> {
    match self.peek()? {
      Tok::Num(n) => { self.pos += 1; Some(n) }
      Tok::Open => {
        self.pos += 1;
        let v = self.expr()?;
        match self.peek()? {
          Tok::Close => { self.pos += 1; Some(v) }
          _ => None,
        }
      }
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn close(a: Option<f64>, b: f64) -> bool {
    a.map(|a| (a - b).abs() < 1e-9).unwrap_or(false)
  }

  #[test]
  fn respects_precedence_and_parentheses() {
    assert!(close(evaluate("2 + 3 * 4"), 14.0));
    assert!(close(evaluate("(2 + 3) * 4"), 20.0));
    assert!(close(evaluate("10 / 4"), 2.5));
    assert!(close(evaluate("2^3^2"), 512.0));
    assert!(close(evaluate("-2^2"), -4.0));
  }

  #[test]
  fn handles_unicode_operators_and_percent() {
    assert!(close(evaluate("6 × 7"), 42.0));
    assert!(close(evaluate("9 ÷ 3 − 1"), 2.0));
    assert!(close(evaluate("50%"), 0.5));
  }

  #[test]
  fn rejects_non_arithmetic_input() {
    assert_eq!(evaluate(""), None);
    assert_eq!(evaluate("x + 1"), None);
    assert_eq!(evaluate("(1 + 2"), None);
    assert_eq!(evaluate("1 2"), None);
    assert_eq!(evaluate("1..2"), None);
    assert_eq!(evaluate("1 / 0"), None);
  }
}
