#[cfg(test)]
mod scanner_tests {
    use treelox as lox;

    use lox::error::LoxError;
    use lox::scanner::*;
    use lox::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*:})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::COLON, ":"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_two_char_operators() {
        assert_token_sequence(
            "! != = == < <= > >=",
            &[
                (TokenType::BANG, "!"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_token_sequence(
            "class Dog : Animal { init() { return this; } } var printer = super;",
            &[
                (TokenType::CLASS, "class"),
                (TokenType::IDENTIFIER, "Dog"),
                (TokenType::COLON, ":"),
                (TokenType::IDENTIFIER, "Animal"),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::IDENTIFIER, "init"),
                (TokenType::LEFT_PAREN, "("),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::RETURN, "return"),
                (TokenType::THIS, "this"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::VAR, "var"),
                (TokenType::IDENTIFIER, "printer"),
                (TokenType::EQUAL, "="),
                (TokenType::SUPER, "super"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_literals_carry_values() {
        let tokens = scan("12.5 7 \"hi there\"").expect("scans");

        assert!(matches!(tokens[0].token_type, TokenType::NUMBER(n) if n == 12.5));
        assert!(matches!(tokens[1].token_type, TokenType::NUMBER(n) if n == 7.0));
        assert!(matches!(&tokens[2].token_type, TokenType::STRING(s) if s == "hi there"));
        assert_eq!(tokens[2].lexeme, "\"hi there\"");
    }

    #[test]
    fn test_comments_and_lines() {
        let tokens = scan("a // ignored ( )\nb\n\"multi\nline\" c").expect("scans");
        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();

        assert_eq!(tokens.len(), 5);
        assert_eq!(lines, vec![1, 2, 4, 4, 4]);
    }

    #[test]
    fn test_token_display() {
        let tokens = scan("var x = 3; \"s\" 2.5").expect("scans");
        let printed: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();

        assert_eq!(
            printed,
            vec![
                "VAR var null",
                "IDENTIFIER x null",
                "EQUAL = null",
                "NUMBER 3 3.0",
                "SEMICOLON ; null",
                "STRING \"s\" s",
                "NUMBER 2.5 2.5",
                "EOF  null",
            ]
        );
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",.$(#";
        let results: Vec<_> = Scanner::new(source).collect();

        // COMMA, DOT, error, LEFT_PAREN, error, EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert!(matches!(&results[0], Ok(t) if t.token_type == TokenType::COMMA));
        assert!(matches!(&results[1], Ok(t) if t.token_type == TokenType::DOT));
        assert!(matches!(&results[3], Ok(t) if t.token_type == TokenType::LEFT_PAREN));
        assert!(matches!(&results[5], Ok(t) if t.token_type == TokenType::EOF));

        let errors: Vec<_> = results.iter().filter_map(|r| r.as_ref().err()).collect();
        assert_eq!(errors.len(), 2, "Expected 2 error messages");

        for err in errors {
            assert!(
                err.to_string().contains("Unexpected character"),
                "got: {}",
                err
            );
        }
    }

    #[test]
    fn test_unterminated_string_is_reported() {
        let errors = scan("var s = \"never closed;").expect_err("must fail");

        assert_eq!(
            errors,
            vec![LoxError::Lex {
                message: "Unterminated string.".into(),
                line: 1
            }]
        );
    }

    #[test]
    fn test_non_ascii_outside_strings_is_one_error() {
        let errors = scan("var é = 1;").expect_err("must fail");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "[line 1] Error: Unexpected character: é");
    }
}
