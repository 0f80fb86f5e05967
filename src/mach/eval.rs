use super::{Constants, Operation, Val};
use crate::lang::ast::{Condition, Expression};
use crate::lang::{Column, Error};
use log::warn;

type Result<T> = std::result::Result<T, Error>;

/// ## Directive expression evaluator
///
/// Walks a parsed constant expression against the `#Const` store.
/// No dynamic evaluation happens anywhere; every operator is a
/// `Operation` function over `Val`. Undefined names read as `Empty`.
///
/// Conditions evaluated through `condition` never raise: any failure
/// is logged and treated as `False`.

pub struct Evaluator<'a> {
    constants: &'a Constants,
}

impl<'a> Evaluator<'a> {
    pub fn new(constants: &'a Constants) -> Evaluator<'a> {
        Evaluator { constants }
    }

    pub fn evaluate(&self, expr: &Expression) -> Result<Val> {
        use Expression::*;
        match expr {
            Integer(_, n) => Ok(Val::Integer(*n)),
            Double(_, d) => Ok(Val::Double(*d)),
            String(_, s) => Ok(Val::String(s.clone())),
            Boolean(_, b) => Ok(Val::Boolean(*b)),
            Var(_, name) => Ok(self.constants.get(name).unwrap_or(Val::Empty)),
            Negation(col, e) => self.unary(col, e, Operation::negate),
            Not(col, e) => self.unary(col, e, Operation::not),
            Power(col, l, r) => self.binary(col, l, r, Operation::power),
            Multiply(col, l, r) => self.binary(col, l, r, Operation::multiply),
            Divide(col, l, r) => self.binary(col, l, r, Operation::divide),
            DivideInt(col, l, r) => self.binary(col, l, r, Operation::divide_int),
            Modulus(col, l, r) => self.binary(col, l, r, Operation::modulus),
            Add(col, l, r) => self.binary(col, l, r, Operation::add),
            Subtract(col, l, r) => self.binary(col, l, r, Operation::subtract),
            Concat(col, l, r) => self.binary(col, l, r, Operation::concat),
            Equal(col, l, r) => self.binary(col, l, r, Operation::equal),
            NotEqual(col, l, r) => self.binary(col, l, r, Operation::not_equal),
            Less(col, l, r) => self.binary(col, l, r, Operation::less),
            LessEqual(col, l, r) => self.binary(col, l, r, Operation::less_equal),
            Greater(col, l, r) => self.binary(col, l, r, Operation::greater),
            GreaterEqual(col, l, r) => self.binary(col, l, r, Operation::greater_equal),
            And(col, l, r) => self.binary(col, l, r, Operation::and),
            Or(col, l, r) => self.binary(col, l, r, Operation::or),
            Xor(col, l, r) => self.binary(col, l, r, Operation::xor),
            Eqv(col, l, r) => self.binary(col, l, r, Operation::eqv),
            Imp(col, l, r) => self.binary(col, l, r, Operation::imp),
        }
    }

    fn unary(
        &self,
        col: &Column,
        expr: &Expression,
        op: fn(Val) -> Result<Val>,
    ) -> Result<Val> {
        let val = self.evaluate(expr)?;
        op(val).map_err(|e| e.in_column(col))
    }

    fn binary(
        &self,
        col: &Column,
        lhs: &Expression,
        rhs: &Expression,
        op: fn(Val, Val) -> Result<Val>,
    ) -> Result<Val> {
        let lhs = self.evaluate(lhs)?;
        let rhs = self.evaluate(rhs)?;
        op(lhs, rhs).map_err(|e| e.in_column(col))
    }

    /// Fail-closed truthiness of a parsed directive condition.
    pub fn condition(&self, cond: &Condition) -> bool {
        match cond {
            Ok(expr) => match self.evaluate(expr).and_then(Operation::cond) {
                Ok(b) => b,
                Err(error) => {
                    warn!("condition treated as False: {}", error);
                    false
                }
            },
            Err(error) => {
                warn!("condition treated as False: {}", error);
                false
            }
        }
    }

    /// Parses and evaluates a bare expression string.
    pub fn condition_str(&self, source: &str) -> bool {
        match crate::lang::expression(source) {
            Ok(expr) => self.condition(&Ok(expr)),
            Err(error) => {
                warn!("condition treated as False: {}", error);
                false
            }
        }
    }

    /// Value of a `#Const` right-hand side. Failures are logged and
    /// leave the constant undefined.
    pub fn value(&self, cond: &Condition) -> Option<Val> {
        match cond {
            Ok(expr) => match self.evaluate(expr) {
                Ok(val) => Some(val),
                Err(error) => {
                    warn!("#Const value ignored: {}", error);
                    None
                }
            },
            Err(error) => {
                warn!("#Const value ignored: {}", error);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::expression;

    fn eval(consts: &Constants, source: &str) -> Result<Val> {
        Evaluator::new(consts).evaluate(&expression(source)?)
    }

    #[test]
    fn test_arithmetic() {
        let c = Constants::new();
        assert_eq!(eval(&c, "1 + 2 * 3").unwrap(), Val::Integer(7));
        assert_eq!(eval(&c, "10 / 4").unwrap(), Val::Double(2.5));
        assert_eq!(eval(&c, "10 \\ 4").unwrap(), Val::Integer(2));
        assert_eq!(eval(&c, "10 Mod 4").unwrap(), Val::Integer(2));
        assert_eq!(eval(&c, "2 ^ 10").unwrap(), Val::Double(1024.0));
    }

    #[test]
    fn test_undefined_name_is_empty() {
        let c = Constants::new();
        assert_eq!(eval(&c, "NOPE").unwrap(), Val::Empty);
        assert_eq!(eval(&c, "NOPE = 0").unwrap(), Val::Boolean(true));
        assert_eq!(eval(&c, "NOPE + 1").unwrap(), Val::Integer(1));
    }

    #[test]
    fn test_platform_constants() {
        let c = Constants::new();
        assert_eq!(eval(&c, "Win32").unwrap(), Val::Boolean(true));
        assert_eq!(eval(&c, "Win32 And Not Mac").unwrap(), Val::Boolean(true));
    }

    #[test]
    fn test_logical_bitwise_when_not_boolean() {
        let c = Constants::new();
        assert_eq!(eval(&c, "6 And 3").unwrap(), Val::Integer(2));
        assert_eq!(eval(&c, "6 Or 3").unwrap(), Val::Integer(7));
        assert_eq!(eval(&c, "6 Xor 3").unwrap(), Val::Integer(5));
        assert_eq!(eval(&c, "True And False").unwrap(), Val::Boolean(false));
        assert_eq!(eval(&c, "True Eqv True").unwrap(), Val::Boolean(true));
        assert_eq!(eval(&c, "True Imp False").unwrap(), Val::Boolean(false));
    }

    #[test]
    fn test_division_by_zero_carries_column() {
        let c = Constants::new();
        let error = eval(&c, "1 / 0").unwrap_err();
        assert_eq!(error.code(), 11);
    }

    #[test]
    fn test_condition_fail_closed() {
        let c = Constants::new();
        let e = Evaluator::new(&c);
        assert!(!e.condition_str("\"abc\" + 1"));
        assert!(!e.condition_str("1 +"));
        assert!(e.condition_str("-1"));
        assert!(!e.condition_str("0"));
        assert!(!e.condition_str("UNDEFINED"));
    }
}
