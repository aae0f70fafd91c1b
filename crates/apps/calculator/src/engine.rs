//! Immediate-execution calculator engine.
//!
//! Operators apply left to right as they are entered (`2 + 3 × 4 = 20`). Pressing `=` again
//! repeats the last operator with the last right-hand operand.

use thiserror::Error;

const MAX_ENTRY_DIGITS: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "−",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    fn apply(self, lhs: f64, rhs: f64) -> Result<f64, CalcError> {
        let result = match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => {
                if rhs == 0.0 {
                    return Err(CalcError::DivideByZero);
                }
                lhs / rhs
            }
        };
        if result.is_finite() {
            Ok(result)
        } else {
            Err(CalcError::Overflow)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("division by zero")]
    DivideByZero,
    #[error("result out of range")]
    Overflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcAction {
    Digit(u8),
    Decimal,
    Operator(Operator),
    Equals,
    Percent,
    ToggleSign,
    Backspace,
    Clear,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Calculator {
    entry: String,
    accumulator: Option<f64>,
    pending: Option<Operator>,
    repeat: Option<(Operator, f64)>,
    /// Next digit starts a new entry instead of appending.
    fresh_entry: bool,
    error: Option<CalcError>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            entry: "0".to_string(),
            accumulator: None,
            pending: None,
            repeat: None,
            fresh_entry: false,
            error: None,
        }
    }
}

impl Calculator {
    pub fn apply(&mut self, action: CalcAction) {
        if self.error.is_some() {
            // Any input after an error starts over; clear and backspace only reset.
            *self = Self::default();
            if matches!(action, CalcAction::Clear | CalcAction::Backspace) {
                return;
            }
        }
        match action {
            CalcAction::Digit(digit) => self.input_digit(digit),
            CalcAction::Decimal => self.input_decimal(),
            CalcAction::Operator(op) => self.set_operator(op),
            CalcAction::Equals => self.equals(),
            CalcAction::Percent => self.percent(),
            CalcAction::ToggleSign => self.toggle_sign(),
            CalcAction::Backspace => self.backspace(),
            CalcAction::Clear => *self = Self::default(),
        }
    }

    pub fn display(&self) -> String {
        if self.error.is_some() {
            "Error".to_string()
        } else {
            self.entry.clone()
        }
    }

    /// Pending left operand and operator, e.g. `12 ×`.
    pub fn expression(&self) -> String {
        match (self.accumulator, self.pending) {
            (Some(lhs), Some(op)) => format!("{} {}", format_number(lhs), op.symbol()),
            _ => String::new(),
        }
    }

    pub fn error(&self) -> Option<CalcError> {
        self.error
    }

    fn entry_value(&self) -> f64 {
        self.entry.parse().unwrap_or(0.0)
    }

    fn start_entry_if_fresh(&mut self) {
        if self.fresh_entry {
            self.entry = "0".to_string();
            self.fresh_entry = false;
            if self.pending.is_none() {
                self.accumulator = None;
            }
        }
    }

    fn input_digit(&mut self, digit: u8) {
        if digit > 9 {
            return;
        }
        self.start_entry_if_fresh();
        if self.entry.chars().filter(char::is_ascii_digit).count() >= MAX_ENTRY_DIGITS {
            return;
        }
        let digit = char::from(b'0' + digit);
        match self.entry.as_str() {
            "0" => self.entry = digit.to_string(),
            "-0" => self.entry = format!("-{digit}"),
            _ => self.entry.push(digit),
        }
        self.repeat = None;
    }

    fn input_decimal(&mut self) {
        self.start_entry_if_fresh();
        if !self.entry.contains('.') {
            self.entry.push('.');
        }
        self.repeat = None;
    }

    fn set_operator(&mut self, op: Operator) {
        let current = self.entry_value();
        let lhs = match (self.accumulator, self.pending) {
            // Operator pressed twice in a row replaces the pending one.
            (Some(acc), Some(_)) if self.fresh_entry => acc,
            (Some(acc), Some(pending)) => match pending.apply(acc, current) {
                Ok(value) => value,
                Err(err) => return self.fail(err),
            },
            _ => current,
        };
        self.accumulator = Some(lhs);
        self.pending = Some(op);
        self.repeat = None;
        self.entry = format_number(lhs);
        self.fresh_entry = true;
    }

    fn equals(&mut self) {
        let (op, lhs, rhs) = match (self.accumulator, self.pending, self.repeat) {
            (Some(acc), Some(op), _) => (op, acc, self.entry_value()),
            (_, None, Some((op, rhs))) => (op, self.entry_value(), rhs),
            _ => return,
        };
        match op.apply(lhs, rhs) {
            Ok(result) => {
                self.accumulator = Some(result);
                self.pending = None;
                self.repeat = Some((op, rhs));
                self.entry = format_number(result);
                self.fresh_entry = true;
            }
            Err(err) => self.fail(err),
        }
    }

    /// `a + b%` adds `b` percent of `a`; otherwise the entry is divided by 100.
    fn percent(&mut self) {
        let current = self.entry_value();
        let value = match (self.accumulator, self.pending) {
            (Some(acc), Some(Operator::Add | Operator::Subtract)) => acc * current / 100.0,
            _ => current / 100.0,
        };
        self.entry = format_number(value);
        self.repeat = None;
    }

    fn toggle_sign(&mut self) {
        if self.fresh_entry {
            self.fresh_entry = false;
            if self.pending.is_none() {
                self.accumulator = None;
            }
        }
        self.entry = match self.entry.strip_prefix('-') {
            Some(positive) => positive.to_string(),
            None => format!("-{}", self.entry),
        };
    }

    fn backspace(&mut self) {
        if self.fresh_entry {
            return;
        }
        self.entry.pop();
        if self.entry.is_empty() || self.entry == "-" {
            self.entry = "0".to_string();
        }
    }

    fn fail(&mut self, err: CalcError) {
        *self = Self {
            error: Some(err),
            ..Self::default()
        };
    }
}

/// Maps a `KeyboardEvent::key` value to a calculator action.
pub fn keyboard_action(key: &str) -> Option<CalcAction> {
    let action = match key {
        "." | "," => CalcAction::Decimal,
        "+" => CalcAction::Operator(Operator::Add),
        "-" => CalcAction::Operator(Operator::Subtract),
        "*" | "x" | "X" => CalcAction::Operator(Operator::Multiply),
        "/" => CalcAction::Operator(Operator::Divide),
        "%" => CalcAction::Percent,
        "=" | "Enter" => CalcAction::Equals,
        "Backspace" => CalcAction::Backspace,
        "Escape" | "Delete" | "c" | "C" => CalcAction::Clear,
        "F9" => CalcAction::ToggleSign,
        _ => {
            let mut chars = key.chars();
            let digit = chars.next()?.to_digit(10)?;
            if chars.next().is_some() {
                return None;
            }
            CalcAction::Digit(digit as u8)
        }
    };
    Some(action)
}

/// Formats a result without trailing zeros, rounding away float noise past 12 decimals.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{value:.0}");
    }
    let mut text = format!("{value:.12}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    text
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn press(calc: &mut Calculator, keys: &str) {
        for token in keys.split_whitespace() {
            // Multi-digit tokens are typed one digit at a time.
            let keys: Vec<String> = if token.len() > 1 && token.chars().all(|c| c.is_ascii_digit()) {
                token.chars().map(String::from).collect()
            } else {
                vec![token.to_string()]
            };
            for key in keys {
                let action =
                    keyboard_action(&key).unwrap_or_else(|| panic!("unmapped key {key}"));
                calc.apply(action);
            }
        }
    }

    fn run(keys: &str) -> String {
        let mut calc = Calculator::default();
        press(&mut calc, keys);
        calc.display()
    }

    #[test]
    fn digits_replace_leading_zero_and_decimal_is_single() {
        assert_eq!(run("0 0 7"), "7");
        assert_eq!(run("1 . . 5"), "1.5");
        assert_eq!(run(". 2"), "0.2");
    }

    #[test]
    fn operators_execute_left_to_right() {
        assert_eq!(run("2 + 3 * 4 ="), "20");
        assert_eq!(run("9 - 4 / 2 ="), "2.5");
    }

    #[test]
    fn operator_replacement_keeps_left_operand() {
        let mut calc = Calculator::default();
        press(&mut calc, "8 + -");
        assert_eq!(calc.expression(), "8 −");
        press(&mut calc, "3 =");
        assert_eq!(calc.display(), "5");
    }

    #[test]
    fn repeated_equals_reapplies_last_operation() {
        assert_eq!(run("5 + 2 = = ="), "11");
        assert_eq!(run("81 / 3 = ="), "9");
    }

    #[test]
    fn new_digit_after_equals_starts_fresh_calculation() {
        let mut calc = Calculator::default();
        press(&mut calc, "4 * 4 =");
        press(&mut calc, "3 + 1 =");
        assert_eq!(calc.display(), "4");
    }

    #[test]
    fn result_can_feed_the_next_operator() {
        assert_eq!(run("6 * 7 = - 2 ="), "40");
    }

    #[test]
    fn percent_is_relative_to_left_operand_for_sums() {
        assert_eq!(run("200 + 10 % ="), "220");
        assert_eq!(run("50 %"), "0.5");
        assert_eq!(run("80 * 25 % ="), "20");
    }

    #[test]
    fn sign_toggle_and_backspace() {
        assert_eq!(run("1 2 F9"), "-12");
        assert_eq!(run("1 2 F9 F9"), "12");
        assert_eq!(run("- 3"), "3");
        assert_eq!(run("1 2 3 Backspace"), "12");
        assert_eq!(run("7 F9 Backspace"), "0");
    }

    #[test]
    fn division_by_zero_shows_error_until_next_input() {
        let mut calc = Calculator::default();
        press(&mut calc, "9 / 0 =");
        assert_eq!(calc.display(), "Error");
        assert_eq!(calc.error(), Some(CalcError::DivideByZero));

        press(&mut calc, "4");
        assert_eq!(calc.display(), "4");
        assert_eq!(calc.error(), None);

        press(&mut calc, "/ 0 = Escape");
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn entry_length_is_capped() {
        assert_eq!(run("1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7"), "123456789012345");
    }

    #[test]
    fn keyboard_mapping_ignores_unknown_keys() {
        assert_eq!(keyboard_action("7"), Some(CalcAction::Digit(7)));
        assert_eq!(keyboard_action("Enter"), Some(CalcAction::Equals));
        assert_eq!(keyboard_action("12"), None);
        assert_eq!(keyboard_action("Shift"), None);
        assert_eq!(keyboard_action(""), None);
    }

    #[test]
    fn format_number_trims_float_noise() {
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(-42.0), "-42");
        assert_eq!(format_number(2.5), "2.5");
    }
}
