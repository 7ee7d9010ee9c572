//! Four-function keypad calculator.

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalcError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("unknown key '{0}'")]
    UnknownKey(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, CalcError> {
        match self {
            Operator::Add => Ok(lhs + rhs),
            Operator::Subtract => Ok(lhs - rhs),
            Operator::Multiply => Ok(lhs * rhs),
            Operator::Divide if rhs == 0.0 => Err(CalcError::DivisionByZero),
            Operator::Divide => Ok(lhs / rhs),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(char),
    Point,
    Op(Operator),
    Equals,
    Clear,
}

impl FromStr for Key {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.trim() {
            "+" => Key::Op(Operator::Add),
            "-" | "−" => Key::Op(Operator::Subtract),
            "*" | "×" | "x" => Key::Op(Operator::Multiply),
            "/" | "÷" => Key::Op(Operator::Divide),
            "=" => Key::Equals,
            "." => Key::Point,
            "C" | "c" | "clear" => Key::Clear,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(d), None) if d.is_ascii_digit() => Key::Digit(d),
                    _ => return Err(CalcError::UnknownKey(s.to_string())),
                }
            }
        };
        Ok(key)
    }
}

/// Keypad state: the display, the left operand and the pending operator.
/// Operators chain left to right, so `2 + 3 × 4 =` shows `20`.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculator {
    display: String,
    previous: Option<f64>,
    operator: Option<Operator>,
    waiting_for_operand: bool,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            previous: None,
            operator: None,
            waiting_for_operand: false,
        }
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn value(&self) -> f64 {
        self.display.parse().unwrap_or(0.0)
    }

    /// Applies one key. On error the calculator is left as it was.
    pub fn press(&mut self, key: Key) -> Result<(), CalcError> {
        match key {
            Key::Digit(d) => self.input_digit(d),
            Key::Point => self.input_point(),
            Key::Op(op) => self.input_operator(op)?,
            Key::Equals => self.equals()?,
            Key::Clear => self.clear(),
        }
        Ok(())
    }

    /// Presses each key in turn, stopping at the first error.
    pub fn press_all<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) -> Result<(), CalcError> {
        for key in keys {
            self.press(key.parse()?)?;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn input_digit(&mut self, digit: char) {
        if self.waiting_for_operand {
            self.display = digit.to_string();
            self.waiting_for_operand = false;
        } else if self.display == "0" {
            self.display = digit.to_string();
        } else {
            self.display.push(digit);
        }
    }

    fn input_point(&mut self) {
        if self.waiting_for_operand {
            self.display = "0.".to_string();
            self.waiting_for_operand = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    fn input_operator(&mut self, next: Operator) -> Result<(), CalcError> {
        // A second operator in a row replaces the first.
        if self.waiting_for_operand && self.operator.is_some() {
            self.operator = Some(next);
            return Ok(());
        }

        let input = self.value();
        match (self.previous, self.operator) {
            (Some(previous), Some(op)) => {
                let result = op.apply(previous, input)?;
                self.display = format_number(result);
                self.previous = Some(result);
            }
            _ => self.previous = Some(input),
        }
        self.operator = Some(next);
        self.waiting_for_operand = true;
        Ok(())
    }

    fn equals(&mut self) -> Result<(), CalcError> {
        let (Some(previous), Some(op)) = (self.previous, self.operator) else {
            return Ok(());
        };
        let result = op.apply(previous, self.value())?;
        self.display = format_number(result);
        self.previous = None;
        self.operator = None;
        self.waiting_for_operand = true;
        Ok(())
    }
}

fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Avoids showing "-0".
        "0".to_string()
    } else {
        value.to_string()
    }
}
