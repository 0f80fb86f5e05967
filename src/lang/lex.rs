use super::token::*;

pub fn lex(s: &str) -> Vec<Token> {
    DirectiveLexer::lex(s)
}

fn is_vb_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_vb_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_vb_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic()
}

struct DirectiveLexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> DirectiveLexer<'a> {
    fn lex(s: &str) -> Vec<Token> {
        let mut tokens: Vec<Token> = DirectiveLexer {
            chars: s.trim_end().chars().peekable(),
        }
        .collect();
        if let Some(Token::Whitespace(_)) = tokens.last() {
            tokens.pop();
        }
        tokens
    }

    fn whitespace(&mut self) -> Option<Token> {
        let mut len = 0;
        loop {
            self.chars.next();
            len += 1;
            if let Some(pk) = self.chars.peek() {
                if is_vb_whitespace(*pk) {
                    continue;
                }
            }
            return Some(Token::Whitespace(len));
        }
    }

    fn number(&mut self) -> Option<Token> {
        let mut s = String::new();
        let mut decimal = false;
        let mut exp = false;
        loop {
            let mut ch = match self.chars.next() {
                Some(c) => c,
                None => {
                    debug_assert!(false, "Failed to tokenize number.");
                    return None;
                }
            };
            if ch == 'e' {
                ch = 'E'
            }
            s.push(ch);
            if ch == '.' {
                decimal = true
            }
            if let Some(pk) = self.chars.peek() {
                if ch == 'E' {
                    exp = true;
                    if *pk == '+' || *pk == '-' {
                        continue;
                    }
                }
                if is_vb_digit(*pk) {
                    continue;
                }
                if !decimal && !exp && *pk == '.' {
                    continue;
                }
                if !exp && (*pk == 'E' || *pk == 'e') {
                    continue;
                }
            }
            break;
        }
        if decimal || exp {
            Some(Token::Literal(Literal::Double(s)))
        } else {
            Some(Token::Literal(Literal::Integer(s)))
        }
    }

    // &H and &O radix literals; a bare & is the concatenation operator.
    fn radix(&mut self) -> Option<Token> {
        let mut s = String::new();
        s.push(self.chars.next()?);
        match self.chars.peek() {
            Some('H') | Some('h') | Some('O') | Some('o') => {}
            _ => return Some(Token::Operator(Operator::Ampersand)),
        }
        s.push(self.chars.next()?.to_ascii_uppercase());
        while let Some(pk) = self.chars.peek() {
            if pk.is_ascii_alphanumeric() {
                s.push(self.chars.next()?.to_ascii_uppercase());
            } else {
                break;
            }
        }
        Some(Token::Literal(Literal::Integer(s)))
    }

    fn string(&mut self) -> Option<Token> {
        let mut s = String::new();
        self.chars.next();
        loop {
            match self.chars.next() {
                Some('"') => {
                    // A doubled quote is an escaped quote.
                    if let Some('"') = self.chars.peek() {
                        self.chars.next();
                        s.push('"');
                        continue;
                    }
                    break;
                }
                Some(ch) => s.push(ch),
                None => break,
            }
        }
        Some(Token::Literal(Literal::String(s)))
    }

    fn alphabetic(&mut self) -> Option<Token> {
        let mut s = String::new();
        loop {
            let ch = match self.chars.next() {
                Some(ch) => ch.to_ascii_uppercase(),
                None => {
                    debug_assert!(false, "Failed to tokenize alphabetic.");
                    return None;
                }
            };
            s.push(ch);
            if let Some(pk) = self.chars.peek() {
                if is_vb_alphabetic(*pk) || is_vb_digit(*pk) || *pk == '_' {
                    continue;
                }
            }
            break;
        }
        match Token::from_string(&s) {
            Some(token) => Some(token),
            None => Some(Token::Ident(s)),
        }
    }

    fn remark(&mut self) -> Option<Token> {
        self.chars.next();
        Some(Token::Remark(self.chars.by_ref().collect()))
    }

    fn minutia(&mut self) -> Option<Token> {
        use Operator::*;
        let ch = self.chars.next()?;
        let token = match ch {
            '#' => Token::Hash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '^' => Token::Operator(Caret),
            '*' => Token::Operator(Multiply),
            '/' => Token::Operator(Divide),
            '\\' => Token::Operator(DivideInt),
            '+' => Token::Operator(Plus),
            '-' => Token::Operator(Minus),
            '=' => Token::Operator(Equal),
            '<' => match self.chars.peek() {
                Some('>') => {
                    self.chars.next();
                    Token::Operator(NotEqual)
                }
                Some('=') => {
                    self.chars.next();
                    Token::Operator(LessEqual)
                }
                _ => Token::Operator(Less),
            },
            '>' => match self.chars.peek() {
                Some('=') => {
                    self.chars.next();
                    Token::Operator(GreaterEqual)
                }
                _ => Token::Operator(Greater),
            },
            _ => Token::Unknown(ch.to_string()),
        };
        Some(token)
    }
}

impl<'a> Iterator for DirectiveLexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let pk = self.chars.peek()?;
        if is_vb_whitespace(*pk) {
            return self.whitespace();
        }
        if is_vb_digit(*pk) || *pk == '.' {
            return self.number();
        }
        if is_vb_alphabetic(*pk) {
            return self.alphabetic();
        }
        if *pk == '"' {
            return self.string();
        }
        if *pk == '&' {
            return self.radix();
        }
        if *pk == '\'' {
            return self.remark();
        }
        self.minutia()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_line() {
        let tokens = lex("#If DEBUGMODE Then");
        assert_eq!(
            tokens,
            vec![
                Token::Hash,
                Token::Word(Word::If),
                Token::Whitespace(1),
                Token::Ident("DEBUGMODE".to_string()),
                Token::Whitespace(1),
                Token::Word(Word::Then),
            ]
        );
    }

    #[test]
    fn test_operators_collapse() {
        let tokens = lex("a<>1 <= >=");
        assert_eq!(
            tokens,
            vec![
                Token::Ident("A".to_string()),
                Token::Operator(Operator::NotEqual),
                Token::Literal(Literal::Integer("1".to_string())),
                Token::Whitespace(1),
                Token::Operator(Operator::LessEqual),
                Token::Whitespace(1),
                Token::Operator(Operator::GreaterEqual),
            ]
        );
    }

    #[test]
    fn test_radix_and_concat() {
        let tokens = lex("&HFF & &O17");
        assert_eq!(
            tokens,
            vec![
                Token::Literal(Literal::Integer("&HFF".to_string())),
                Token::Whitespace(1),
                Token::Operator(Operator::Ampersand),
                Token::Whitespace(1),
                Token::Literal(Literal::Integer("&O17".to_string())),
            ]
        );
    }

    #[test]
    fn test_string_escape() {
        let tokens = lex("\"say \"\"hi\"\"\"");
        assert_eq!(
            tokens,
            vec![Token::Literal(Literal::String("say \"hi\"".to_string()))]
        );
    }

    #[test]
    fn test_remark() {
        let tokens = lex("#Else ' nothing more");
        assert_eq!(
            tokens,
            vec![
                Token::Hash,
                Token::Word(Word::Else),
                Token::Whitespace(1),
                Token::Remark(" nothing more".to_string()),
            ]
        );
    }
}
