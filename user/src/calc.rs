//! Four-operator integer calculator.

use core::fmt;

use syscall::{Syscalls, TaskStack};

use crate::console::read_line;

pub const CALC_STACK_SIZE: usize = 64 * 1024;

pub static CALC_STACK: TaskStack<CALC_STACK_SIZE> = TaskStack::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request<'a> {
    Quit,
    Compute { op: &'a str, a: i32, b: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcError<'a> {
    DivisionByZero,
    UnknownOperation(&'a str),
}

impl fmt::Display for CalcError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CalcError::DivisionByZero => write!(f, "Error: Division by zero."),
            CalcError::UnknownOperation(op) => write!(f, "Unknown operation: '{}'", op),
        }
    }
}

/// Parses `op a b`, or a lone `exit`/`quit`.
pub fn parse(line: &str) -> Option<Request> {
    let mut words = line.split_whitespace();
    let op = words.next()?;
    let Some(a) = words.next() else {
        return matches!(op, "exit" | "quit").then_some(Request::Quit);
    };
    let a = a.parse().ok()?;
    let b = words.next()?.parse().ok()?;
    if words.next().is_some() {
        return None;
    }
    Some(Request::Compute { op, a, b })
}

/// Results wrap on overflow.
pub fn compute(op: &str, a: i32, b: i32) -> Result<i32, CalcError> {
    match op {
        "add" => Ok(a.wrapping_add(b)),
        "sub" => Ok(a.wrapping_sub(b)),
        "mul" => Ok(a.wrapping_mul(b)),
        "div" if b == 0 => Err(CalcError::DivisionByZero),
        "div" => Ok(a.wrapping_div(b)),
        _ => Err(CalcError::UnknownOperation(op)),
    }
}

pub fn calc(sys: &mut dyn Syscalls) {
    println!(
        sys,
        "Calculator App. Operation: add, sub, mul, div. Type 'exit' or 'quit' to close."
    );

    let mut line = [0u8; 64];
    loop {
        print!(sys, "calc> ");
        match parse(read_line(sys, &mut line)) {
            Some(Request::Quit) => {
                println!(sys, "Exiting calculator...");
                sys.exit();
            }
            Some(Request::Compute { op, a, b }) => match compute(op, a, b) {
                Ok(result) => println!(sys, "{}", result),
                Err(err) => println!(sys, "{}", err),
            },
            None => println!(
                sys,
                "Syntax: op num1 num2 (e.g. add 5 2) Operation: add, sub, mul, div or 'exit'/'quit'"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_operations() {
        assert_eq!(
            parse("  add 5   -2 "),
            Some(Request::Compute {
                op: "add",
                a: 5,
                b: -2,
            })
        );
        assert_eq!(parse("quit"), Some(Request::Quit));
        assert_eq!(parse("exit"), Some(Request::Quit));
    }

    #[test]
    fn rejects_malformed_lines() {
        for line in ["", "add", "add 1", "add x 2", "add 1 2 3", "quit now"] {
            assert_eq!(parse(line), None, "{:?}", line);
        }
    }

    #[test]
    fn computes() {
        assert_eq!(compute("add", 2, 3), Ok(5));
        assert_eq!(compute("sub", 2, 5), Ok(-3));
        assert_eq!(compute("mul", -4, 6), Ok(-24));
        assert_eq!(compute("div", 7, 2), Ok(3));
        assert_eq!(compute("div", -7, 2), Ok(-3));
        assert_eq!(compute("add", i32::MAX, 1), Ok(i32::MIN));
    }

    #[test]
    fn reports_errors() {
        assert_eq!(compute("div", 1, 0), Err(CalcError::DivisionByZero));
        assert_eq!(compute("mod", 1, 2), Err(CalcError::UnknownOperation("mod")));
        assert_eq!(
            CalcError::UnknownOperation("mod").to_string(),
            "Unknown operation: 'mod'"
        );
    }
}
