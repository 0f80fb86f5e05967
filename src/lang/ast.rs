use super::{Column, Error};
use std::rc::Rc;

/// A parsed `#If`/`#ElseIf` condition. Malformed conditions carry the
/// parse error so the preprocessor can apply its fail-closed policy
/// instead of aborting.
pub type Condition = std::result::Result<Expression, Error>;

#[derive(Debug)]
pub enum Directive {
    If(Column, Condition),
    ElseIf(Column, Condition),
    Else(Column),
    EndIf(Column),
    Const(Column, Rc<str>, Condition),
}

#[derive(Debug, PartialEq)]
pub enum Expression {
    Integer(Column, i32),
    Double(Column, f64),
    String(Column, Rc<str>),
    Boolean(Column, bool),
    Var(Column, Rc<str>),
    Negation(Column, Box<Expression>),
    Not(Column, Box<Expression>),
    Power(Column, Box<Expression>, Box<Expression>),
    Multiply(Column, Box<Expression>, Box<Expression>),
    Divide(Column, Box<Expression>, Box<Expression>),
    DivideInt(Column, Box<Expression>, Box<Expression>),
    Modulus(Column, Box<Expression>, Box<Expression>),
    Add(Column, Box<Expression>, Box<Expression>),
    Subtract(Column, Box<Expression>, Box<Expression>),
    Concat(Column, Box<Expression>, Box<Expression>),
    Equal(Column, Box<Expression>, Box<Expression>),
    NotEqual(Column, Box<Expression>, Box<Expression>),
    Less(Column, Box<Expression>, Box<Expression>),
    LessEqual(Column, Box<Expression>, Box<Expression>),
    Greater(Column, Box<Expression>, Box<Expression>),
    GreaterEqual(Column, Box<Expression>, Box<Expression>),
    And(Column, Box<Expression>, Box<Expression>),
    Or(Column, Box<Expression>, Box<Expression>),
    Xor(Column, Box<Expression>, Box<Expression>),
    Eqv(Column, Box<Expression>, Box<Expression>),
    Imp(Column, Box<Expression>, Box<Expression>),
}

impl Expression {
    pub fn column(&self) -> Column {
        use Expression::*;
        match self {
            Integer(col, ..) | Double(col, ..) | String(col, ..) | Boolean(col, ..)
            | Var(col, ..) | Negation(col, ..) | Not(col, ..) | Power(col, ..)
            | Multiply(col, ..) | Divide(col, ..) | DivideInt(col, ..) | Modulus(col, ..)
            | Add(col, ..) | Subtract(col, ..) | Concat(col, ..) | Equal(col, ..)
            | NotEqual(col, ..) | Less(col, ..) | LessEqual(col, ..) | Greater(col, ..)
            | GreaterEqual(col, ..) | And(col, ..) | Or(col, ..) | Xor(col, ..)
            | Eqv(col, ..) | Imp(col, ..) => col.clone(),
        }
    }
}
