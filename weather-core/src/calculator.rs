//! Four-operation calculator behind `weather calc`.

use std::fmt;

/// Printed instead of a number when the operation tag is not recognised.
pub const INVALID_OPERATION: &str = "Invalid operation";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Add,
    Sub,
    Mul,
    Div,
    Unknown(String),
}

impl Operation {
    /// Tags are matched exactly; anything else (including an empty tag) is `Unknown`.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "add" => Operation::Add,
            "sub" => Operation::Sub,
            "mul" => Operation::Mul,
            "div" => Operation::Div,
            other => Operation::Unknown(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Number(f64),
    InvalidOperation,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InvalidOperation => f.write_str(INVALID_OPERATION),
            Outcome::Number(n) if n.is_nan() => f.write_str("NaN"),
            Outcome::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Outcome::Number(n) if *n != 0.0 && (n.abs() >= 1e21 || n.abs() < 1e-6) => {
                let sci = format!("{n:e}");
                match sci.split_once('e') {
                    Some((mantissa, exp)) if !exp.starts_with('-') => {
                        write!(f, "{mantissa}e+{exp}")
                    }
                    _ => f.write_str(&sci),
                }
            }
            Outcome::Number(n) => write!(f, "{n}"),
        }
    }
}

pub fn evaluate(x: f64, y: f64, op: &Operation) -> Outcome {
    match op {
        Operation::Add => Outcome::Number(x + y),
        Operation::Sub => Outcome::Number(x - y),
        Operation::Mul => Outcome::Number(x * y),
        Operation::Div => Outcome::Number(x / y),
        Operation::Unknown(_) => Outcome::InvalidOperation,
    }
}

/// Convenience over the raw CLI arguments; missing operands are NaN.
pub fn calculate(num1: Option<&str>, num2: Option<&str>, operation: Option<&str>) -> Outcome {
    let x = num1.map_or(f64::NAN, parse_operand);
    let y = num2.map_or(f64::NAN, parse_operand);
    evaluate(x, y, &Operation::parse(operation.unwrap_or_default()))
}

/// Lenient float parsing: leading whitespace is skipped and the longest numeric
/// prefix wins (`"3abc"` is 3). Input with no numeric prefix is NaN.
pub fn parse_operand(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
