//! Exact rational numbers for fraction answers.

/// `num / den` in lowest terms with a positive denominator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rational {
  num: i128,
  den: i128,
}

/// Both arguments must be non-negative.
fn gcd(mut a: i128, mut b: i128) -> i128 {
  while b != 0 {
    let t = a % b;
    a = b;
    b = t;
  }
  a
}

impl Rational {
  pub fn new(num: i128, den: i128) -> Option<Self> {
    if den == 0 { return None; }
    // `i128::MIN` has no positive counterpart; treat it as unrepresentable.
    let (num, den) = if den < 0 { (num.checked_neg()?, den.checked_neg()?) } else { (num, den) };
    let g = gcd(num.checked_abs()?, den).max(1);
    Some(Self { num: num / g, den: den / g })
  }

  /// Parse `"a/b"` or a bare decimal such as `"-0.75"`; each side of `/` may itself be a decimal.
  pub fn parse(s: &str) -> Option<Self> {
    match s.split_once('/') {
      Some((a, b)) => {
        let a = Self::parse_decimal(a)?;
        let b = Self::parse_decimal(b)?;
        a.checked_div(b)
      }
      None => Self::parse_decimal(s),
    }
  }

  /// Exact decimal literal: optional sign, digits, optional fractional digits.
  fn parse_decimal(s: &str) -> Option<Self> {
    let (negative, body) = match s.strip_prefix('-') {
      Some(rest) => (true, rest),
      None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
    if int_part.is_empty() && frac_part.is_empty() { return None; }
    if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
      return None;
    }

    let mut num: i128 = 0;
    for b in int_part.bytes().chain(frac_part.bytes()) {
      num = num.checked_mul(10)?.checked_add(i128::from(b - b'0'))?;
    }
    let den = 10i128.checked_pow(u32::try_from(frac_part.len()).ok()?)?;
    Self::new(if negative { -num } else { num }, den)
  }

  fn checked_div(self, rhs: Self) -> Option<Self> {
    Self::new(self.num.checked_mul(rhs.den)?, self.den.checked_mul(rhs.num)?)
  }

  pub fn to_f64(self) -> f64 {
    self.num as f64 / self.den as f64
  }
}
