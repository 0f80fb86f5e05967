use super::Val;
use crate::error;
use crate::lang::Error;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Operator semantics
///
/// VB6 value semantics for the constant-expression operators.
/// Logical operators are boolean when both operands are boolean and
/// bitwise over integers otherwise. `Empty` coerces to `0`, `""`, and
/// `False`.

pub struct Operation {}

enum Num {
    Integer(i32),
    Double(f64),
}

fn number(val: &Val) -> Result<Num> {
    match val {
        Val::Empty => Ok(Num::Integer(0)),
        Val::Boolean(b) => Ok(Num::Integer(if *b { -1 } else { 0 })),
        Val::Integer(n) => Ok(Num::Integer(*n)),
        Val::Double(d) => Ok(Num::Double(*d)),
        Val::String(s) => match s.trim().parse::<f64>() {
            Ok(d) => Ok(Num::Double(d)),
            Err(_) => Err(error!(TypeMismatch)),
        },
        Val::Object(_) => Err(error!(TypeMismatch)),
    }
}

fn as_f64(num: Num) -> f64 {
    match num {
        Num::Integer(n) => n as f64,
        Num::Double(d) => d,
    }
}

// VB6 rounds halves to the even neighbor.
fn round_even(d: f64) -> f64 {
    let rounded = d.round();
    if (d - d.trunc()).abs() == 0.5 && rounded % 2.0 != 0.0 {
        rounded - d.signum()
    } else {
        rounded
    }
}

fn integer(val: &Val) -> Result<i32> {
    match number(val)? {
        Num::Integer(n) => Ok(n),
        Num::Double(d) => {
            let r = round_even(d);
            if r >= i32::min_value() as f64 && r <= i32::max_value() as f64 {
                Ok(r as i32)
            } else {
                Err(error!(Overflow))
            }
        }
    }
}

fn string(val: &Val) -> Result<String> {
    match val {
        Val::Object(_) => Err(error!(TypeMismatch)),
        _ => Ok(val.to_string()),
    }
}

impl Operation {
    /// Truthiness of a directive condition.
    pub fn cond(val: Val) -> Result<bool> {
        match &val {
            Val::Boolean(b) => Ok(*b),
            _ => match number(&val)? {
                Num::Integer(n) => Ok(n != 0),
                Num::Double(d) => Ok(d != 0.0),
            },
        }
    }

    pub fn negate(val: Val) -> Result<Val> {
        match number(&val)? {
            Num::Integer(n) => match n.checked_neg() {
                Some(i) => Ok(Val::Integer(i)),
                None => Err(error!(Overflow)),
            },
            Num::Double(d) => Ok(Val::Double(-d)),
        }
    }

    pub fn not(val: Val) -> Result<Val> {
        match &val {
            Val::Boolean(b) => Ok(Val::Boolean(!b)),
            _ => Ok(Val::Integer(!integer(&val)?)),
        }
    }

    pub fn power(lhs: Val, rhs: Val) -> Result<Val> {
        let l = as_f64(number(&lhs)?);
        let r = as_f64(number(&rhs)?);
        let result = l.powf(r);
        if result.is_finite() {
            Ok(Val::Double(result))
        } else if l == 0.0 && r < 0.0 {
            Err(error!(DivisionByZero))
        } else {
            Err(error!(Overflow))
        }
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        match (number(&lhs)?, number(&rhs)?) {
            (Num::Integer(l), Num::Integer(r)) => match l.checked_mul(r) {
                Some(i) => Ok(Val::Integer(i)),
                None => Err(error!(Overflow)),
            },
            (l, r) => Ok(Val::Double(as_f64(l) * as_f64(r))),
        }
    }

    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        let l = as_f64(number(&lhs)?);
        let r = as_f64(number(&rhs)?);
        if r == 0.0 {
            Err(error!(DivisionByZero))
        } else {
            Ok(Val::Double(l / r))
        }
    }

    pub fn divide_int(lhs: Val, rhs: Val) -> Result<Val> {
        let l = integer(&lhs)?;
        let r = integer(&rhs)?;
        match l.checked_div(r) {
            Some(i) => Ok(Val::Integer(i)),
            None => {
                if r == 0 {
                    Err(error!(DivisionByZero))
                } else {
                    Err(error!(Overflow))
                }
            }
        }
    }

    pub fn modulus(lhs: Val, rhs: Val) -> Result<Val> {
        let l = integer(&lhs)?;
        let r = integer(&rhs)?;
        match l.checked_rem(r) {
            Some(i) => Ok(Val::Integer(i)),
            None => {
                if r == 0 {
                    Err(error!(DivisionByZero))
                } else {
                    Err(error!(Overflow))
                }
            }
        }
    }

    pub fn add(lhs: Val, rhs: Val) -> Result<Val> {
        match (&lhs, &rhs) {
            (Val::String(l), Val::String(r)) => {
                Ok(Val::String(Rc::from(format!("{}{}", l, r).as_str())))
            }
            (Val::String(s), Val::Empty) | (Val::Empty, Val::String(s)) => {
                Ok(Val::String(s.clone()))
            }
            _ => match (number(&lhs)?, number(&rhs)?) {
                (Num::Integer(l), Num::Integer(r)) => match l.checked_add(r) {
                    Some(i) => Ok(Val::Integer(i)),
                    None => Err(error!(Overflow)),
                },
                (l, r) => Ok(Val::Double(as_f64(l) + as_f64(r))),
            },
        }
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        match (number(&lhs)?, number(&rhs)?) {
            (Num::Integer(l), Num::Integer(r)) => match l.checked_sub(r) {
                Some(i) => Ok(Val::Integer(i)),
                None => Err(error!(Overflow)),
            },
            (l, r) => Ok(Val::Double(as_f64(l) - as_f64(r))),
        }
    }

    pub fn concat(lhs: Val, rhs: Val) -> Result<Val> {
        let mut s = string(&lhs)?;
        s.push_str(&string(&rhs)?);
        Ok(Val::String(Rc::from(s.as_str())))
    }

    pub fn equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Boolean(Operation::equal_bool(lhs, rhs)?))
    }

    pub fn not_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Boolean(!Operation::equal_bool(lhs, rhs)?))
    }

    fn equal_bool(lhs: Val, rhs: Val) -> Result<bool> {
        match (&lhs, &rhs) {
            (Val::String(l), Val::String(r)) => Ok(l == r),
            (Val::String(s), Val::Empty) | (Val::Empty, Val::String(s)) => Ok(s.is_empty()),
            _ => match (number(&lhs)?, number(&rhs)?) {
                (Num::Integer(l), Num::Integer(r)) => Ok(l == r),
                (l, r) => Ok(as_f64(l) == as_f64(r)),
            },
        }
    }

    pub fn greater(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Boolean(Operation::less_bool(rhs, lhs)?))
    }

    pub fn less(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Boolean(Operation::less_bool(lhs, rhs)?))
    }

    pub fn greater_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Boolean(!Operation::less_bool(lhs, rhs)?))
    }

    pub fn less_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Boolean(!Operation::less_bool(rhs, lhs)?))
    }

    fn less_bool(lhs: Val, rhs: Val) -> Result<bool> {
        match (&lhs, &rhs) {
            (Val::String(l), Val::String(r)) => Ok(l < r),
            _ => match (number(&lhs)?, number(&rhs)?) {
                (Num::Integer(l), Num::Integer(r)) => Ok(l < r),
                (l, r) => Ok(as_f64(l) < as_f64(r)),
            },
        }
    }

    pub fn and(lhs: Val, rhs: Val) -> Result<Val> {
        match (&lhs, &rhs) {
            (Val::Boolean(l), Val::Boolean(r)) => Ok(Val::Boolean(*l && *r)),
            _ => Ok(Val::Integer(integer(&lhs)? & integer(&rhs)?)),
        }
    }

    pub fn or(lhs: Val, rhs: Val) -> Result<Val> {
        match (&lhs, &rhs) {
            (Val::Boolean(l), Val::Boolean(r)) => Ok(Val::Boolean(*l || *r)),
            _ => Ok(Val::Integer(integer(&lhs)? | integer(&rhs)?)),
        }
    }

    pub fn xor(lhs: Val, rhs: Val) -> Result<Val> {
        match (&lhs, &rhs) {
            (Val::Boolean(l), Val::Boolean(r)) => Ok(Val::Boolean(l != r)),
            _ => Ok(Val::Integer(integer(&lhs)? ^ integer(&rhs)?)),
        }
    }

    pub fn eqv(lhs: Val, rhs: Val) -> Result<Val> {
        match (&lhs, &rhs) {
            (Val::Boolean(l), Val::Boolean(r)) => Ok(Val::Boolean(l == r)),
            _ => Ok(Val::Integer(!(integer(&lhs)? ^ integer(&rhs)?))),
        }
    }

    pub fn imp(lhs: Val, rhs: Val) -> Result<Val> {
        match (&lhs, &rhs) {
            (Val::Boolean(l), Val::Boolean(r)) => Ok(Val::Boolean(!l || *r)),
            _ => Ok(Val::Integer(!integer(&lhs)? | integer(&rhs)?)),
        }
    }
}
