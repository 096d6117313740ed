//! Built-in standards and vetted problems so the service is useful without external config.

use crate::domain::{AnswerType, Problem, Standard};

fn standard(code: &str, grade: u8, domain: &str, description: &str) -> Standard {
  Standard {
    id: code.into(),
    code: code.into(),
    grade,
    domain: domain.into(),
    description: description.into(),
  }
}

pub fn seed_standards() -> Vec<Standard> {
  vec![
    standard("6.RP.A.1", 6, "RP", "Understand the concept of a ratio and use ratio language"),
    standard("6.RP.A.3", 6, "RP", "Use ratio and rate reasoning to solve real-world problems"),
    standard("6.NS.A.1", 6, "NS", "Interpret and compute quotients of fractions"),
    standard("6.NS.B.3", 6, "NS", "Fluently add, subtract, multiply, and divide multi-digit decimals"),
    standard("6.EE.B.7", 6, "EE", "Solve real-world and mathematical problems by writing and solving equations"),
    standard("6.G.A.1", 6, "G", "Find the area of triangles, quadrilaterals, and polygons"),
    standard("7.RP.A.3", 7, "RP", "Use proportional relationships to solve multi-step ratio and percent problems"),
    standard("7.NS.A.1", 7, "NS", "Apply and extend previous understandings of addition and subtraction"),
    standard("7.EE.B.4", 7, "EE", "Use variables to represent quantities in a real-world or mathematical problem"),
    standard("7.G.B.4", 7, "G", "Know the formulas for the area and circumference of a circle"),
    standard("8.EE.C.7", 8, "EE", "Solve linear equations in one variable"),
    standard("8.EE.C.8", 8, "EE", "Analyze and solve pairs of simultaneous linear equations"),
    standard("8.F.B.4", 8, "F", "Construct a function to model a linear relationship between two quantities"),
    standard("8.G.B.7", 8, "G", "Apply the Pythagorean Theorem to determine unknown side lengths"),
  ]
}

#[allow(clippy::too_many_arguments)]
fn problem(
  id: &str,
  grade: u8,
  standard_id: &str,
  difficulty: u8,
  prompt: &str,
  answer_type: AnswerType,
  canonical_answer: &str,
  canonical_equation: Option<&str>,
) -> Problem {
  Problem {
    id: id.into(),
    grade,
    standard_id: standard_id.into(),
    difficulty,
    prompt: prompt.into(),
    canonical_answer: canonical_answer.into(),
    canonical_equation: canonical_equation.map(str::to_string),
    answer_type,
  }
}

pub fn seed_problems() -> Vec<Problem> {
  use AnswerType::*;
  vec![
    problem("g6-rp-1", 6, "6.RP.A.1", 1,
      "A bag has 4 red marbles and 6 blue marbles. What is the ratio of red to total marbles as a fraction?",
      Fraction, "2/5", None),
    problem("g6-rp-2", 6, "6.RP.A.3", 2,
      "A car travels 150 miles in 3 hours. How many miles does it travel per hour?",
      Integer, "50", Some("150/3=x")),
    problem("g6-rp-3", 6, "6.RP.A.3", 3,
      "Lemonade uses 3 cups of sugar for every 8 cups of water. How many cups of sugar are needed for 20 cups of water?",
      Decimal, "7.5", Some("3/8=x/20")),
    problem("g6-ns-1", 6, "6.NS.A.1", 3,
      "How many 3/4-cup servings are in 6 cups of trail mix?",
      Integer, "8", Some("6÷(3/4)=x")),
    problem("g6-ns-2", 6, "6.NS.A.1", 4,
      "A ribbon 2 1/2 yards long is cut into pieces 1/4 yard long. How many pieces are there?",
      Integer, "10", Some("(5/2)÷(1/4)=x")),
    problem("g6-ns-3", 6, "6.NS.B.3", 2,
      "Maya buys a notebook for $3.75 and a pen for $1.40. How much does she spend?",
      Decimal, "5.15", Some("3.75+1.40=x")),
    problem("g6-ee-1", 6, "6.EE.B.7", 1,
      "Sam has some stickers. After getting 5 more he has 20. How many did he start with?",
      Integer, "15", Some("x+5=20")),
    problem("g6-ee-2", 6, "6.EE.B.7", 2,
      "Four equal boxes weigh 26 pounds together. How much does one box weigh?",
      Mixed, "6 1/2", Some("4x=26")),
    problem("g6-ee-3", 6, "6.EE.B.7", 4,
      "A gym charges $12 per visit. Jo spent $84. How many visits did Jo make?",
      Integer, "7", Some("12x=84")),
    problem("g6-g-1", 6, "6.G.A.1", 2,
      "A triangle has a base of 10 cm and a height of 7 cm. What is its area in square cm?",
      Integer, "35", Some("(1/2)×10×7=x")),
    problem("g6-g-2", 6, "6.G.A.1", 3,
      "A rectangle is 4.5 m long and 3 m wide. What is its area in square meters?",
      Number, "13.5", Some("4.5×3=x")),
    problem("g6-g-3", 6, "6.G.A.1", 5,
      "A trapezoid has bases 6 and 10 and height 4. What is its area?",
      Integer, "32", Some("((6+10)/2)×4=x")),
    problem("g7-rp-1", 7, "7.RP.A.3", 2,
      "A $40 jacket is on sale for 25% off. What percent of the original price do you pay?",
      Percent, "75", None),
    problem("g7-rp-2", 7, "7.RP.A.3", 3,
      "A shirt costs $20 and sales tax is 8%. What is the total cost?",
      Decimal, "21.60", Some("20×1.08=x")),
    problem("g7-ns-1", 7, "7.NS.A.1", 1,
      "The temperature was -4 degrees and rose 9 degrees. What is the new temperature?",
      Integer, "5", Some("-4+9=x")),
    problem("g7-ns-2", 7, "7.NS.A.1", 3,
      "A diver at -2 1/2 meters descends another 1 1/4 meters. What is the new depth?",
      Mixed, "-3 3/4", Some("-2.5-1.25=x")),
    problem("g7-ee-1", 7, "7.EE.B.4", 2,
      "Three times a number plus 4 is 19. What is the number?",
      Integer, "5", Some("3x+4=19")),
    problem("g7-ee-2", 7, "7.EE.B.4", 4,
      "A phone plan costs $15 plus $0.10 per text. The bill was $23. How many texts were sent?",
      Integer, "80", Some("15+0.10x=23")),
    problem("g7-g-1", 7, "7.G.B.4", 3,
      "A circle has radius 5. What is its area? Use 3.14 for pi.",
      Decimal, "78.5", Some("3.14×5^2=a")),
    problem("g8-ee-1", 8, "8.EE.C.7", 2,
      "Solve for x: 5x - 7 = 3x + 9.",
      Integer, "8", Some("5x-7=3x+9")),
    problem("g8-ee-2", 8, "8.EE.C.7", 3,
      "Solve for x: 2(x + 3) = 5x - 3.",
      Integer, "3", Some("2(x+3)=5x-3")),
    problem("g8-ee-3", 8, "8.EE.C.8", 4,
      "The sum of two numbers is 12 and their difference is 4. What are the two numbers?",
      Multi, "8, 4", None),
    problem("g8-f-1", 8, "8.F.B.4", 3,
      "A plumber charges $50 plus $30 per hour. Write the cost for 3 hours.",
      Integer, "140", Some("c=50+30×3")),
    problem("g8-g-1", 8, "8.G.B.7", 3,
      "A right triangle has legs 6 and 8. How long is the hypotenuse?",
      Integer, "10", Some("6^2+8^2=c^2")),
    problem("g8-g-2", 8, "8.G.B.7", 5,
      "A ladder 13 ft long reaches 12 ft up a wall. How far is its base from the wall?",
      Integer, "5", Some("x^2+12^2=13^2")),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn seed_problems_reference_known_standards_and_valid_difficulty() {
    let standards: HashSet<String> = seed_standards().into_iter().map(|s| s.id).collect();
    let problems = seed_problems();
    let ids: HashSet<&str> = problems.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids.len(), problems.len());
    for p in &problems {
      assert!(standards.contains(&p.standard_id), "{} has unknown standard", p.id);
      assert!((1..=5).contains(&p.difficulty));
    }
  }

  #[test]
  fn seed_canonical_answers_verify_against_themselves() {
    for p in seed_problems() {
      let v = crate::verify::verify_answer(&p.canonical_answer, &p.canonical_answer, &p.answer_type);
      assert!(v.is_correct, "{} canonical does not self-verify", p.id);
    }
  }
}
