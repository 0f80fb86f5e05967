use std::collections::HashMap;

thread_local!(
    static STRING_TO_TOKEN: HashMap<&'static str, Token> = {
        use Operator::*;
        use Word::*;
        let mut m = HashMap::new();
        for (s, w) in &[
            ("IF", If),
            ("ELSEIF", ElseIf),
            ("ELSE", Else),
            ("END", End),
            ("ENDIF", EndIf),
            ("CONST", Const),
            ("THEN", Then),
            ("TRUE", True),
            ("FALSE", False),
        ] {
            m.insert(*s, Token::Word(w.clone()));
        }
        for (s, o) in &[
            ("MOD", Modulus),
            ("NOT", Not),
            ("AND", And),
            ("OR", Or),
            ("XOR", Xor),
            ("EQV", Eqv),
            ("IMP", Imp),
        ] {
            m.insert(*s, Token::Operator(o.clone()));
        }
        m
    };
);

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Unknown(String),
    Whitespace(usize),
    Remark(String),
    Literal(Literal),
    Word(Word),
    Operator(Operator),
    Ident(String),
    Hash,
    LParen,
    RParen,
}

impl Token {
    pub fn from_string(s: &str) -> Option<Token> {
        STRING_TO_TOKEN.with(|stt| stt.get(s).cloned())
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Unknown(s) => write!(f, "{}", s),
            Whitespace(u) => write!(f, "{s:>w$}", s = "", w = u),
            Remark(s) => write!(f, "'{}", s),
            Literal(s) => write!(f, "{}", s),
            Word(s) => write!(f, "{}", s),
            Operator(s) => write!(f, "{}", s),
            Ident(s) => write!(f, "{}", s),
            Hash => write!(f, "#"),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Integer(String),
    Double(String),
    String(String),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Literal::*;
        match self {
            Integer(s) => write!(f, "{}", s),
            Double(s) => write!(f, "{}", s),
            String(s) => write!(f, "\"{}\"", s),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Word {
    If,
    ElseIf,
    Else,
    End,
    EndIf,
    Const,
    Then,
    True,
    False,
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Word::*;
        match self {
            If => write!(f, "IF"),
            ElseIf => write!(f, "ELSEIF"),
            Else => write!(f, "ELSE"),
            End => write!(f, "END"),
            EndIf => write!(f, "ENDIF"),
            Const => write!(f, "CONST"),
            Then => write!(f, "THEN"),
            True => write!(f, "TRUE"),
            False => write!(f, "FALSE"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Operator {
    Caret,
    Multiply,
    Divide,
    DivideInt,
    Modulus,
    Plus,
    Minus,
    Ampersand,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Not,
    And,
    Or,
    Xor,
    Eqv,
    Imp,
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Caret => write!(f, "^"),
            Multiply => write!(f, "*"),
            Divide => write!(f, "/"),
            DivideInt => write!(f, "\\"),
            Modulus => write!(f, "MOD"),
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Ampersand => write!(f, "&"),
            Equal => write!(f, "="),
            NotEqual => write!(f, "<>"),
            Less => write!(f, "<"),
            LessEqual => write!(f, "<="),
            Greater => write!(f, ">"),
            GreaterEqual => write!(f, ">="),
            Not => write!(f, "NOT"),
            And => write!(f, "AND"),
            Or => write!(f, "OR"),
            Xor => write!(f, "XOR"),
            Eqv => write!(f, "EQV"),
            Imp => write!(f, "IMP"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string() {
        let t = Token::from_string("ELSEIF");
        assert_eq!(t, Some(Token::Word(Word::ElseIf)));
        let t = Token::from_string("EQV");
        assert_eq!(t, Some(Token::Operator(Operator::Eqv)));
        let t = Token::from_string("DEBUGMODE");
        assert_eq!(t, None);
    }
}
