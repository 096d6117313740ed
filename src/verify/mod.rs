//! Answer verification: decides whether a student's free-text final answer matches
//! the canonical answer under the rule implied by the problem's answer type.
//!
//! Malformed student input is never an error here. It resolves to an ordinary
//! `is_correct: false` result whose `message` explains what could not be read.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::domain::AnswerType;

pub mod expr;
mod rational;

pub use rational::Rational;

/// Absolute tolerance for every numeric comparison (strict `<`).
pub const DECIMAL_TOLERANCE: f64 = 1e-4;

/// Which rule produced a verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMethod {
  Integer,
  Decimal,
  Fraction,
  Percent,
  Mixed,
  Multi,
  Expression,
  Text,
}

/// The student's answer as the verifier understood it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedAnswer {
  Integer(i64),
  Number(f64),
  Text(String),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationDetails {
  pub method: ComparisonMethod,
  pub canonical_answer: String,
  pub parsed_student_answer: Option<ParsedAnswer>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
  pub is_correct: bool,
  pub details: VerificationDetails,
}

/// Answer verdict plus the independent equation check.
#[derive(Clone, Debug, PartialEq)]
pub struct SubmissionResult {
  pub verification: Verification,
  /// `true` when either side has no equation to compare.
  pub equation_correct: bool,
}

/// Verify `student` against `canonical` under `answer_type`.
#[instrument(level = "debug", skip_all, fields(answer_type = %answer_type, student_len = student.len()))]
pub fn verify_answer(student: &str, canonical: &str, answer_type: &AnswerType) -> Verification {
  let ctx = Ctx { canonical_raw: canonical };
  let v = match answer_type {
    AnswerType::Integer => verify_integer(&normalize(student), &normalize(canonical), &ctx),
    AnswerType::Decimal | AnswerType::Number => {
      verify_decimal(&normalize(student), &normalize(canonical), ComparisonMethod::Decimal, &ctx)
    }
    AnswerType::Fraction => verify_fraction(&normalize(student), &normalize(canonical), &ctx),
    AnswerType::Percent => {
      let s = normalize(student).replace('%', "");
      let c = normalize(canonical).replace('%', "");
      verify_decimal(s.trim(), c.trim(), ComparisonMethod::Percent, &ctx)
    }
    AnswerType::Mixed => verify_mixed(&normalize(student), &normalize(canonical), &ctx),
    // Commas separate parts here, so they can't be read as thousands separators.
    AnswerType::Multi => verify_multi(&normalize_keep_commas(student), &normalize_keep_commas(canonical), &ctx),
    AnswerType::Unrecognized(_) => verify_generic(&normalize(student), &normalize(canonical), &ctx),
  };
  debug!(target: "verify", is_correct = v.is_correct, method = ?v.details.method, "Answer verified");
  v
}

/// Compare two equations, accepting sides written in either order (`x+5=20` vs `20=x+5`).
pub fn verify_equation(student: &str, canonical: &str) -> bool {
  let s = normalize_equation(student);
  let c = normalize_equation(canonical);
  if s == c {
    return true;
  }

  let mut s_sides: Vec<&str> = s.split('=').collect();
  let mut c_sides: Vec<&str> = c.split('=').collect();
  if s_sides.len() != c_sides.len() {
    return false;
  }
  s_sides.sort_unstable();
  c_sides.sort_unstable();
  s_sides == c_sides
}

/// Full check of a submitted step: the answer verdict plus the supplementary equation verdict.
/// A mismatched equation never flips `is_correct`.
pub fn verify_submission(
  student_answer: &str,
  student_equation: Option<&str>,
  canonical_answer: &str,
  canonical_equation: Option<&str>,
  answer_type: &AnswerType,
) -> SubmissionResult {
  let verification = verify_answer(student_answer, canonical_answer, answer_type);
  let equation_correct = match (student_equation, canonical_equation) {
    (Some(s), Some(c)) if !s.trim().is_empty() && !c.trim().is_empty() => verify_equation(s, c),
    _ => true,
  };
  SubmissionResult { verification, equation_correct }
}

// -------- Normalization --------

/// Trim, lowercase, collapse whitespace, drop thousands separators, `$` and quotes.
pub fn normalize(answer: &str) -> String {
  normalize_keep_commas(answer).replace(',', "")
}

fn normalize_keep_commas(answer: &str) -> String {
  let stripped: String = answer.chars().filter(|c| !matches!(c, '$' | '\'' | '"')).collect();
  stripped.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

fn normalize_equation(eq: &str) -> String {
  eq.chars()
    .filter(|c| !c.is_whitespace())
    .flat_map(char::to_lowercase)
    .map(|c| match c {
      '×' => '*',
      '÷' => '/',
      '−' => '-',
      other => other,
    })
    .collect()
}

// -------- Per-type rules --------

struct Ctx<'a> {
  canonical_raw: &'a str,
}

impl Ctx<'_> {
  fn verdict(&self, is_correct: bool, method: ComparisonMethod, parsed: Option<ParsedAnswer>, message: Option<String>) -> Verification {
    Verification {
      is_correct,
      details: VerificationDetails {
        method,
        canonical_answer: self.canonical_raw.to_string(),
        parsed_student_answer: parsed,
        message,
      },
    }
  }

  fn unparsable(&self, method: ComparisonMethod, message: &str) -> Verification {
    self.verdict(false, method, None, Some(message.to_string()))
  }

  fn bad_canonical(&self, method: ComparisonMethod, parsed: ParsedAnswer) -> Verification {
    warn!(target: "verify", canonical = %self.canonical_raw, ?method, "Canonical answer does not parse under its answer type");
    self.verdict(false, method, Some(parsed), Some("The expected answer for this problem could not be read".into()))
  }
}

fn within_tolerance(a: f64, b: f64) -> bool {
  (a - b).abs() < DECIMAL_TOLERANCE
}

fn parse_number(s: &str) -> Option<f64> {
  s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn verify_integer(student: &str, canonical: &str, ctx: &Ctx) -> Verification {
  let method = ComparisonMethod::Integer;
  let Ok(s) = student.parse::<i64>() else {
    return ctx.unparsable(method, "Could not parse your answer as an integer");
  };
  match canonical.parse::<i64>() {
    Ok(c) => ctx.verdict(s == c, method, Some(ParsedAnswer::Integer(s)), None),
    Err(_) => ctx.bad_canonical(method, ParsedAnswer::Integer(s)),
  }
}

fn verify_decimal(student: &str, canonical: &str, method: ComparisonMethod, ctx: &Ctx) -> Verification {
  let Some(s) = parse_number(student) else {
    return ctx.unparsable(method, "Could not parse your answer as a number");
  };
  match parse_number(canonical) {
    Some(c) => ctx.verdict(within_tolerance(s, c), method, Some(ParsedAnswer::Number(s)), None),
    None => ctx.bad_canonical(method, ParsedAnswer::Number(s)),
  }
}

fn parse_fraction(s: &str) -> Option<f64> {
  let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
  Rational::parse(&compact).map(|r| r.to_f64())
}

fn verify_fraction(student: &str, canonical: &str, ctx: &Ctx) -> Verification {
  let method = ComparisonMethod::Fraction;
  let Some(s) = parse_fraction(student) else {
    return ctx.unparsable(method, "Could not parse your answer as a fraction");
  };
  match parse_fraction(canonical) {
    Some(c) => ctx.verdict(within_tolerance(s, c), method, Some(ParsedAnswer::Number(s)), None),
    None => ctx.bad_canonical(method, ParsedAnswer::Number(s)),
  }
}

fn cached_regex(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
  cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

static MIXED_NUMBER: OnceLock<Option<Regex>> = OnceLock::new();
static SIMPLE_FRACTION: OnceLock<Option<Regex>> = OnceLock::new();
static MULTI_SEPARATOR: OnceLock<Option<Regex>> = OnceLock::new();

/// Decimal, simple fraction `a/b`, or mixed number `w n/d`.
/// A negative whole part subtracts the fraction: `-2 1/2` is -2.5.
pub fn parse_mixed_number(s: &str) -> Option<f64> {
  let s = s.trim();
  if !s.contains('/') {
    return parse_number(s);
  }

  let mixed = cached_regex(&MIXED_NUMBER, r"^(-?[0-9]+)\s+([0-9]+)/([0-9]+)$")?;
  if let Some(caps) = mixed.captures(s) {
    let whole = &caps[1];
    let w: f64 = whole.parse().ok()?;
    let f = ratio(&caps[2], &caps[3])?;
    return Some(if whole.starts_with('-') { w - f } else { w + f });
  }

  let simple = cached_regex(&SIMPLE_FRACTION, r"^(-?[0-9]+)/([0-9]+)$")?;
  let caps = simple.captures(s)?;
  ratio(&caps[1], &caps[2])
}

fn ratio(num: &str, den: &str) -> Option<f64> {
  let n: f64 = num.parse().ok()?;
  let d: f64 = den.parse().ok()?;
  (d != 0.0).then(|| n / d)
}

fn verify_mixed(student: &str, canonical: &str, ctx: &Ctx) -> Verification {
  let method = ComparisonMethod::Mixed;
  let Some(s) = parse_mixed_number(student) else {
    return ctx.unparsable(method, "Could not parse your answer");
  };
  match parse_mixed_number(canonical) {
    Some(c) => ctx.verdict(within_tolerance(s, c), method, Some(ParsedAnswer::Number(s)), None),
    None => ctx.bad_canonical(method, ParsedAnswer::Number(s)),
  }
}

/// Split a multi-part answer on `,`, `;` or the standalone word "and" into trimmed,
/// non-empty, lexicographically sorted parts.
pub fn split_multi(answer: &str) -> Vec<String> {
  let mut parts: Vec<String> = match cached_regex(&MULTI_SEPARATOR, r"(?i)[,;]|\band\b") {
    Some(re) => re.split(answer).map(str::trim).filter(|p| !p.is_empty()).map(str::to_string).collect(),
    None => vec![answer.trim().to_string()],
  };
  parts.sort();
  parts
}

fn parts_match(student: &str, canonical: &str) -> bool {
  match (parse_number(student), parse_number(canonical)) {
    (Some(s), Some(c)) => within_tolerance(s, c),
    _ => student.to_lowercase() == canonical.to_lowercase(),
  }
}

fn verify_multi(student: &str, canonical: &str, ctx: &Ctx) -> Verification {
  let method = ComparisonMethod::Multi;
  let s_parts = split_multi(student);
  let c_parts = split_multi(canonical);
  let parsed = Some(ParsedAnswer::Text(student.to_string()));

  if s_parts.len() != c_parts.len() {
    let message = format!("Expected {} answer(s), got {}", c_parts.len(), s_parts.len());
    return ctx.verdict(false, method, parsed, Some(message));
  }

  let all_match = s_parts.iter().zip(&c_parts).all(|(s, c)| parts_match(s, c));
  ctx.verdict(all_match, method, parsed, None)
}

fn verify_generic(student: &str, canonical: &str, ctx: &Ctx) -> Verification {
  if let (Some(s), Some(c)) = (expr::evaluate(student), expr::evaluate(canonical)) {
    return ctx.verdict(within_tolerance(s, c), ComparisonMethod::Expression, Some(ParsedAnswer::Number(s)), None);
  }
  let is_correct = student.to_lowercase() == canonical.to_lowercase();
  ctx.verdict(is_correct, ComparisonMethod::Text, Some(ParsedAnswer::Text(student.to_string())), None)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn check(student: &str, canonical: &str, t: AnswerType) -> Verification {
    verify_answer(student, canonical, &t)
  }

  #[test]
  fn normalization_strips_formatting_noise() {
    assert_eq!(normalize("  $1,250  "), "1250");
    assert_eq!(normalize("\"Two   Apples\""), "two apples");
  }

  #[test]
  fn integer_requires_exact_whole_number() {
    let ok = check("42", "42", AnswerType::Integer);
    assert!(ok.is_correct);
    assert_eq!(ok.details.parsed_student_answer, Some(ParsedAnswer::Integer(42)));
    assert!(ok.details.message.is_none());

    let v = check("42.5", "42", AnswerType::Integer);
    assert!(!v.is_correct);
    assert_eq!(v.details.parsed_student_answer, None);
    assert_eq!(v.details.message.as_deref(), Some("Could not parse your answer as an integer"));

    assert!(check(" 1,000 ", "1000", AnswerType::Integer).is_correct);
    assert!(check("$ 20", "20", AnswerType::Integer).is_correct);
    assert!(check("20 $", "20", AnswerType::Integer).is_correct);
    assert_eq!(normalize("\" 20 \""), "20");
    assert!(!check("41", "42", AnswerType::Integer).is_correct);
  }

  #[test]
  fn decimal_uses_absolute_tolerance() {
    assert!(check("3.14159", "3.1416", AnswerType::Decimal).is_correct);
    assert!(!check("3.14", "3.1416", AnswerType::Number).is_correct);
    assert!(check("$12.50", "12.5", AnswerType::Number).is_correct);
    let v = check("twelve", "12", AnswerType::Decimal);
    assert!(!v.is_correct);
    assert_eq!(v.details.message.as_deref(), Some("Could not parse your answer as a number"));
    assert!(!check("nan", "12", AnswerType::Decimal).is_correct);
  }

  #[test]
  fn fraction_accepts_cross_notation() {
    assert!(check("3/4", "0.75", AnswerType::Fraction).is_correct);
    assert!(check("6 / 8", "3/4", AnswerType::Fraction).is_correct);
    assert!(check("-1/2", "-0.5", AnswerType::Fraction).is_correct);
    assert!(!check("2/3", "0.66", AnswerType::Fraction).is_correct);
    let v = check("-85070591730234615865843651857942052864/0.5", "1/2", AnswerType::Fraction);
    assert!(!v.is_correct);
    assert_eq!(v.details.message.as_deref(), Some("Could not parse your answer as a fraction"));
    let v = check("1/0", "1", AnswerType::Fraction);
    assert!(!v.is_correct);
    assert_eq!(v.details.message.as_deref(), Some("Could not parse your answer as a fraction"));
  }

  #[test]
  fn percent_compares_raw_figures() {
    assert!(check("50%", "50", AnswerType::Percent).is_correct);
    assert!(check("50", "50%", AnswerType::Percent).is_correct);
    assert!(!check("0.5", "50", AnswerType::Percent).is_correct);
    assert_eq!(check("50%", "50", AnswerType::Percent).details.method, ComparisonMethod::Percent);
  }

  #[test]
  fn mixed_numbers_and_negative_whole_parts() {
    assert!(check("2 1/2", "2.5", AnswerType::Mixed).is_correct);
    assert!(check("5/2", "2 1/2", AnswerType::Mixed).is_correct);
    assert_eq!(parse_mixed_number("-2 1/2"), Some(-2.5));
    assert_eq!(parse_mixed_number("-3/4"), Some(-0.75));
    assert_eq!(parse_mixed_number("2 1/0"), None);
    assert_eq!(parse_mixed_number("2 -1/2"), None);
    assert_eq!(parse_mixed_number("2  3/4"), Some(2.75));
    assert_eq!(parse_mixed_number("1/2/3"), None);
    let v = check("two and a half", "2.5", AnswerType::Mixed);
    assert!(!v.is_correct);
    assert_eq!(v.details.message.as_deref(), Some("Could not parse your answer"));
  }

  #[test]
  fn multi_is_order_independent_and_counts_parts() {
    assert!(check("3, 5", "5,3", AnswerType::Multi).is_correct);
    assert!(check("5 and 3", "3; 5", AnswerType::Multi).is_correct);
    assert!(check("Red AND blue", "blue, red", AnswerType::Multi).is_correct);
    assert!(check("3.0, 5", "3, 5", AnswerType::Multi).is_correct);

    let v = check("3", "3, 5", AnswerType::Multi);
    assert!(!v.is_correct);
    assert_eq!(v.details.message.as_deref(), Some("Expected 2 answer(s), got 1"));
  }

  #[test]
  fn multi_split_keeps_words_containing_and() {
    assert_eq!(split_multi("band, sandy"), vec!["band", "sandy"]);
    assert_eq!(split_multi("x=2 and y=3"), vec!["x=2", "y=3"]);
    assert_eq!(split_multi(", ;"), Vec::<String>::new());
    assert_eq!(split_multi("İ and 2"), vec!["2", "İ"]);
    assert_eq!(split_multi("straße AND 4"), vec!["4", "straße"]);
  }

  #[test]
  fn unrecognized_type_evaluates_expressions_then_falls_back_to_text() {
    let t = AnswerType::Unrecognized("expression".into());
    let v = check("2*3+1", "7", t.clone());
    assert!(v.is_correct);
    assert_eq!(v.details.method, ComparisonMethod::Expression);

    let v = check("Triangle", "triangle", t.clone());
    assert!(v.is_correct);
    assert_eq!(v.details.method, ComparisonMethod::Text);
    assert!(!check("square", "triangle", t).is_correct);
  }

  #[test]
  fn malformed_canonical_is_reported_not_raised() {
    let v = check("4", "four", AnswerType::Integer);
    assert!(!v.is_correct);
    assert!(v.details.message.is_some());
  }

  #[test]
  fn details_echo_canonical_as_given() {
    let v = check("1/2", " 0.50 ", AnswerType::Fraction);
    assert_eq!(v.details.canonical_answer, " 0.50 ");
  }

  #[test]
  fn equations_match_with_swapped_sides() {
    assert!(verify_equation("x+5=20", "20=x+5"));
    assert!(verify_equation("3 × x = 12", "3*x=12"));
    assert!(verify_equation("X − 2 = 4", "x-2=4"));
    assert!(!verify_equation("x+5=20", "x+6=21"));
    assert!(!verify_equation("x=5=5", "x=5"));
  }

  #[test]
  fn equation_check_never_flips_answer_verdict() {
    let r = verify_submission("15", Some("x+5=21"), "15", Some("x+5=20"), &AnswerType::Integer);
    assert!(r.verification.is_correct);
    assert!(!r.equation_correct);

    let r = verify_submission("15", None, "15", Some("x+5=20"), &AnswerType::Integer);
    assert!(r.equation_correct);
  }

  #[test]
  fn verification_is_idempotent() {
    let a = check("2 1/2", "2.5", AnswerType::Mixed);
    let b = check("2 1/2", "2.5", AnswerType::Mixed);
    assert_eq!(a, b);
  }

  #[test]
  fn serializes_with_camel_case_keys() {
    let v = check("x", "3", AnswerType::Integer);
    let json = serde_json::to_value(&v).expect("json");
    assert_eq!(json["isCorrect"], false);
    assert_eq!(json["details"]["method"], "integer");
    assert!(json["details"]["parsedStudentAnswer"].is_null());
  }
}
