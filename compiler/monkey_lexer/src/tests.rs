use super::*;
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<Token> {
    match lex(source) {
        Ok(tokens) => tokens.into_iter().map(|t| t.value).collect(),
        Err(err) => panic!("lexing {source:?} failed: {err}"),
    }
}

#[test]
fn let_and_function_tokens() {
    let source = "let add = fn(x, y) {\n  x + y;\n};";
    assert_eq!(
        kinds(source),
        vec![
            Token::Let,
            Token::Ident("add".into()),
            Token::Assign,
            Token::Function,
            Token::LParen,
            Token::Ident("x".into()),
            Token::Comma,
            Token::Ident("y".into()),
            Token::RParen,
            Token::LBrace,
            Token::Ident("x".into()),
            Token::Plus,
            Token::Ident("y".into()),
            Token::Semicolon,
            Token::RBrace,
            Token::Semicolon,
        ]
    );
}

#[test]
fn two_character_operators() {
    assert_eq!(
        kinds("10 == 10; 10 != 9; !-/*5 % 2 < >"),
        vec![
            Token::Int(10),
            Token::Eq,
            Token::Int(10),
            Token::Semicolon,
            Token::Int(10),
            Token::NotEq,
            Token::Int(9),
            Token::Semicolon,
            Token::Bang,
            Token::Minus,
            Token::Slash,
            Token::Asterisk,
            Token::Int(5),
            Token::Percent,
            Token::Int(2),
            Token::Lt,
            Token::Gt,
        ]
    );
}

#[test]
fn keywords_versus_identifiers() {
    assert_eq!(
        kinds("if iffy else return returned true false fn fnord"),
        vec![
            Token::If,
            Token::Ident("iffy".into()),
            Token::Else,
            Token::Return,
            Token::Ident("returned".into()),
            Token::True,
            Token::False,
            Token::Function,
            Token::Ident("fnord".into()),
        ]
    );
}

#[test]
fn strings_and_arrays() {
    assert_eq!(
        kinds(r#""foo bar" "" [1, 2]"#),
        vec![
            Token::Str("foo bar".into()),
            Token::Str(String::new()),
            Token::LBracket,
            Token::Int(1),
            Token::Comma,
            Token::Int(2),
            Token::RBracket,
        ]
    );
}

#[test]
fn spans_point_into_source() {
    let tokens = lex("let five = 5;").unwrap_or_default();
    assert_eq!(tokens[1].span, Span::new(4, 8));
    assert_eq!(tokens[3].span, Span::new(11, 12));
}

#[test]
fn rejects_unknown_character() {
    let err = lex("let a = 1 @ 2;").err();
    assert_eq!(
        err,
        Some(LexError::UnexpectedChar {
            found: '@',
            span: Span::new(10, 11)
        })
    );
}

#[test]
fn rejects_integer_overflow() {
    let err = lex("99999999999999999999").err();
    assert!(matches!(err, Some(LexError::IntegerOutOfRange { .. })));
    assert_eq!(
        err.map(|e| e.to_string()).unwrap_or_default(),
        "could not parse 99999999999999999999 as integer"
    );
}

#[test]
fn rejects_unterminated_string() {
    let err = lex("\"never closed").err();
    assert!(matches!(err, Some(LexError::UnterminatedString { .. })));
}
