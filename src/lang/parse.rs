use super::{ast::*, lex::lex, token::*, Column, Error};
use crate::error;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

const NOT_PRECEDENCE: usize = 6;
const NEGATION_PRECEDENCE: usize = 13;

/// Recognizes and parses a conditional-compilation directive line.
/// Ordinary source lines return `Ok(None)` without being lexed.
pub fn directive(line: &str) -> Result<Option<Directive>> {
    if !line.trim_start().starts_with('#') {
        return Ok(None);
    }
    let tokens = lex(line);
    Parser::directive(&tokens).map(Some)
}

/// Parses a bare constant expression, as found between `#If` and `Then`.
pub fn expression(s: &str) -> Result<Expression> {
    let tokens = lex(s);
    let mut parser = Parser::new(&tokens);
    let expr = parser.expression()?;
    parser.expect_end()?;
    Ok(expr)
}

struct Parser<'a> {
    token_stream: std::slice::Iter<'a, Token>,
    peeked: Option<&'a Token>,
    col: Column,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Parser<'a> {
        Parser {
            token_stream: tokens.iter(),
            peeked: None,
            col: 0..0,
        }
    }

    fn directive(tokens: &'a [Token]) -> Result<Directive> {
        let mut parser = Parser::new(tokens);
        parser.expect(Token::Hash)?;
        let token = parser.next();
        let column = parser.column();
        match token {
            Some(Token::Word(Word::If)) => Ok(Directive::If(column, parser.condition())),
            Some(Token::Word(Word::ElseIf)) => Ok(Directive::ElseIf(column, parser.condition())),
            Some(Token::Word(Word::Else)) => {
                parser.expect_end()?;
                Ok(Directive::Else(column))
            }
            Some(Token::Word(Word::End)) => {
                parser.expect(Token::Word(Word::If))?;
                parser.expect_end()?;
                Ok(Directive::EndIf(column))
            }
            Some(Token::Word(Word::EndIf)) => {
                parser.expect_end()?;
                Ok(Directive::EndIf(column))
            }
            Some(Token::Word(Word::Const)) => parser.constant(column),
            _ => Err(error!(SyntaxError, ..&parser.column(); "INVALID DIRECTIVE")),
        }
    }

    fn condition(&mut self) -> Condition {
        let expr = self.expression()?;
        self.expect(Token::Word(Word::Then))?;
        self.expect_end()?;
        Ok(expr)
    }

    fn constant(&mut self, column: Column) -> Result<Directive> {
        let name: Rc<str> = match self.next() {
            Some(Token::Ident(s)) => Rc::from(s.as_str()),
            _ => return Err(error!(SyntaxError, ..&self.column(); "EXPECTED CONSTANT NAME")),
        };
        self.expect(Token::Operator(Operator::Equal))?;
        let value = self.value();
        Ok(Directive::Const(column, name, value))
    }

    fn value(&mut self) -> Condition {
        let expr = self.expression()?;
        self.expect_end()?;
        Ok(expr)
    }

    fn column(&self) -> Column {
        self.col.clone()
    }

    fn next(&mut self) -> Option<&'a Token> {
        if self.peeked.is_some() {
            return self.peeked.take();
        }
        loop {
            self.col.start = self.col.end;
            let t = self.token_stream.next()?;
            self.col.end += t.to_string().chars().count();
            match t {
                Token::Whitespace(_) | Token::Remark(_) => continue,
                _ => return Some(t),
            }
        }
    }

    fn peek(&mut self) -> Option<&&'a Token> {
        if self.peeked.is_none() {
            self.peeked = self.next();
        }
        self.peeked.as_ref()
    }

    fn expression(&mut self) -> Result<Expression> {
        fn parse(this: &mut Parser, precedence: usize) -> Result<Expression> {
            let mut lhs = match this.next() {
                Some(Token::LParen) => {
                    let expr = parse(this, 0)?;
                    this.expect(Token::RParen)?;
                    expr
                }
                Some(Token::Operator(Operator::Minus)) => {
                    let column = this.column();
                    let expr = parse(this, NEGATION_PRECEDENCE)?;
                    Expression::Negation(column, Box::new(expr))
                }
                Some(Token::Operator(Operator::Plus)) => parse(this, NEGATION_PRECEDENCE)?,
                Some(Token::Operator(Operator::Not)) => {
                    let column = this.column();
                    let expr = parse(this, NOT_PRECEDENCE)?;
                    Expression::Not(column, Box::new(expr))
                }
                Some(Token::Ident(s)) => Expression::Var(this.column(), Rc::from(s.as_str())),
                Some(Token::Word(Word::True)) => Expression::Boolean(this.column(), true),
                Some(Token::Word(Word::False)) => Expression::Boolean(this.column(), false),
                Some(Token::Literal(l)) => Expression::for_literal(this.column(), l)?,
                _ => return Err(error!(SyntaxError, ..&this.column(); "EXPECTED EXPRESSION")),
            };
            loop {
                match this.peek() {
                    Some(Token::Operator(op)) => {
                        let op_precedence = match Expression::binary_precedence(op) {
                            Some(p) => p,
                            None => break,
                        };
                        if op_precedence < precedence {
                            break;
                        }
                        let op = op.clone();
                        this.next();
                        let column = this.column();
                        let rhs = parse(this, op_precedence + 1)?;
                        lhs = Expression::for_binary_op(column, &op, lhs, rhs);
                    }
                    _ => break,
                }
            }
            Ok(lhs)
        }
        parse(self, 0)
    }

    fn expect(&mut self, token: Token) -> Result<()> {
        if let Some(t) = self.next() {
            if *t == token {
                return Ok(());
            }
        }
        use Token::*;
        Err(error!(SyntaxError, ..&self.column();
            match token {
                Unknown(_) | Whitespace(_) | Remark(_) => "UNEXPECTED TOKEN",
                Literal(_) => "EXPECTED LITERAL",
                Word(super::token::Word::Then) => "EXPECTED THEN",
                Word(super::token::Word::If) => "EXPECTED IF",
                Word(_) => "EXPECTED RESERVED WORD",
                Operator(super::token::Operator::Equal) => "EXPECTED EQUALS SIGN",
                Operator(_) => "EXPECTED OPERATOR",
                Ident(_) => "EXPECTED IDENTIFIER",
                Hash => "EXPECTED DIRECTIVE",
                LParen => "EXPECTED LEFT PARENTHESIS",
                RParen => "EXPECTED RIGHT PARENTHESIS",
            }
        ))
    }

    fn expect_end(&mut self) -> Result<()> {
        match self.next() {
            None => Ok(()),
            Some(_) => Err(error!(SyntaxError, ..&self.column(); "UNEXPECTED TOKEN")),
        }
    }
}

impl Expression {
    fn for_binary_op(col: Column, op: &Operator, lhs: Expression, rhs: Expression) -> Expression {
        use Operator::*;
        let lhs = Box::new(lhs);
        let rhs = Box::new(rhs);
        match op {
            Caret => Expression::Power(col, lhs, rhs),
            Multiply => Expression::Multiply(col, lhs, rhs),
            Divide => Expression::Divide(col, lhs, rhs),
            DivideInt => Expression::DivideInt(col, lhs, rhs),
            Modulus => Expression::Modulus(col, lhs, rhs),
            Plus => Expression::Add(col, lhs, rhs),
            Minus => Expression::Subtract(col, lhs, rhs),
            Ampersand => Expression::Concat(col, lhs, rhs),
            Equal => Expression::Equal(col, lhs, rhs),
            NotEqual => Expression::NotEqual(col, lhs, rhs),
            Less => Expression::Less(col, lhs, rhs),
            LessEqual => Expression::LessEqual(col, lhs, rhs),
            Greater => Expression::Greater(col, lhs, rhs),
            GreaterEqual => Expression::GreaterEqual(col, lhs, rhs),
            Not | And | Or | Xor | Eqv | Imp => match op {
                And => Expression::And(col, lhs, rhs),
                Or => Expression::Or(col, lhs, rhs),
                Xor => Expression::Xor(col, lhs, rhs),
                Eqv => Expression::Eqv(col, lhs, rhs),
                Imp => Expression::Imp(col, lhs, rhs),
                _ => unreachable!("NOT is not a binary operator"),
            },
        }
    }

    fn binary_precedence(op: &Operator) -> Option<usize> {
        use Operator::*;
        match op {
            Imp => Some(1),
            Eqv => Some(2),
            Xor => Some(3),
            Or => Some(4),
            And => Some(5),
            Not => None,
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => Some(7),
            Ampersand => Some(8),
            Plus | Minus => Some(9),
            Modulus => Some(10),
            DivideInt => Some(11),
            Multiply | Divide => Some(12),
            Caret => Some(14),
        }
    }

    fn for_literal(col: Column, lit: &Literal) -> Result<Expression> {
        match lit {
            Literal::Integer(s) => {
                if let Some(hex) = s.strip_prefix("&H") {
                    match u32::from_str_radix(hex, 16) {
                        Ok(n) => Ok(Expression::Integer(col, n as i32)),
                        Err(_) => Err(error!(Overflow, ..&col)),
                    }
                } else if let Some(oct) = s.strip_prefix("&O") {
                    match u32::from_str_radix(oct, 8) {
                        Ok(n) => Ok(Expression::Integer(col, n as i32)),
                        Err(_) => Err(error!(Overflow, ..&col)),
                    }
                } else if let Ok(n) = s.parse::<i32>() {
                    Ok(Expression::Integer(col, n))
                } else if let Ok(d) = s.parse::<f64>() {
                    // Too wide for Long; promote.
                    Ok(Expression::Double(col, d))
                } else {
                    Err(error!(Overflow, ..&col))
                }
            }
            Literal::Double(s) => match s.parse::<f64>() {
                Ok(d) => Ok(Expression::Double(col, d)),
                Err(_) => Err(error!(SyntaxError, ..&col; "INVALID NUMBER")),
            },
            Literal::String(s) => Ok(Expression::String(col, Rc::from(s.as_str()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr_str(s: &str) -> Expression {
        match expression(s) {
            Ok(e) => e,
            Err(e) => panic!("{} : {:?}", e, e),
        }
    }

    #[test]
    fn test_precedence() {
        let answer = Expression::Add(
            2..3,
            Box::new(Expression::Integer(0..1, 1)),
            Box::new(Expression::Multiply(
                6..7,
                Box::new(Expression::Integer(4..5, 2)),
                Box::new(Expression::Integer(8..9, 3)),
            )),
        );
        assert_eq!(expr_str("1 + 2 * 3"), answer);
    }

    #[test]
    fn test_left_associativity() {
        let answer = Expression::Subtract(
            6..7,
            Box::new(Expression::Subtract(
                2..3,
                Box::new(Expression::Integer(0..1, 9)),
                Box::new(Expression::Integer(4..5, 5)),
            )),
            Box::new(Expression::Integer(8..9, 2)),
        );
        assert_eq!(expr_str("9 - 5 - 2"), answer);
    }

    #[test]
    fn test_negation_binds_looser_than_power() {
        let answer = Expression::Negation(
            0..1,
            Box::new(Expression::Power(
                2..3,
                Box::new(Expression::Integer(1..2, 2)),
                Box::new(Expression::Integer(3..4, 2)),
            )),
        );
        assert_eq!(expr_str("-2^2"), answer);
    }

    #[test]
    fn test_logical_precedence() {
        // And binds tighter than Or.
        let answer = Expression::Or(
            2..4,
            Box::new(Expression::Var(0..1, "A".into())),
            Box::new(Expression::And(
                7..10,
                Box::new(Expression::Var(5..6, "B".into())),
                Box::new(Expression::Var(11..12, "C".into())),
            )),
        );
        assert_eq!(expr_str("a Or b And c"), answer);
    }

    #[test]
    fn test_directive_if() {
        let d = directive("#If FOO Then").unwrap().unwrap();
        match d {
            Directive::If(col, Ok(Expression::Var(vcol, name))) => {
                assert_eq!(col, 1..3);
                assert_eq!(vcol, 4..7);
                assert_eq!(&*name, "FOO");
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_directive_const() {
        let d = directive("#Const N = 1").unwrap().unwrap();
        match d {
            Directive::Const(_, name, Ok(Expression::Integer(col, 1))) => {
                assert_eq!(&*name, "N");
                assert_eq!(col, 11..12);
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_directive_end_if_both_spellings() {
        assert!(matches!(
            directive("#End If").unwrap().unwrap(),
            Directive::EndIf(_)
        ));
        assert!(matches!(
            directive("#EndIf").unwrap().unwrap(),
            Directive::EndIf(_)
        ));
    }

    #[test]
    fn test_not_a_directive() {
        assert!(directive("Print 1").unwrap().is_none());
        assert!(directive("  x = 1").unwrap().is_none());
    }

    #[test]
    fn test_unknown_directive() {
        assert!(directive("#Include foo").is_err());
    }

    #[test]
    fn test_malformed_condition_is_embedded() {
        // The directive head parses; the bad condition is carried as
        // an error so the preprocessor can fail closed.
        match directive("#If + Then").unwrap().unwrap() {
            Directive::If(_, Err(_)) => {}
            other => panic!("{:?}", other),
        }
        match directive("#If FOO").unwrap().unwrap() {
            Directive::If(_, Err(_)) => {}
            other => panic!("{:?}", other),
        }
    }
}
