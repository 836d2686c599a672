#[cfg(test)]
mod scanner_tests {
    use pretty_assertions::assert_eq;

    use rox::error::{Diagnostic, Location};
    use rox::scanner::*;
    use rox::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    // Helper function
    fn assert_token_matches(
        result: &Result<Token, Diagnostic>,
        expected_type: TokenType,
        expected_lexeme: &str,
    ) {
        match result {
            Ok(token) => {
                assert_eq!(
                    token.token_type, expected_type,
                    "Expected token type {:?}, got {:?}",
                    expected_type, token.token_type
                );
                assert_eq!(
                    token.lexeme, expected_lexeme,
                    "Expected lexeme '{}', got '{}'",
                    expected_lexeme, token.lexeme
                );
            }
            Err(e) => panic!("Expected token but got error: {}", e),
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_two_char_operators() {
        assert_token_sequence(
            "! != = == < <= > >= /",
            &[
                (TokenType::BANG, "!"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::SLASH, "/"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_03_keywords_and_identifiers() {
        assert_token_sequence(
            "class classy _under fun for orchid or",
            &[
                (TokenType::CLASS, "class"),
                (TokenType::IDENTIFIER, "classy"),
                (TokenType::IDENTIFIER, "_under"),
                (TokenType::FUN, "fun"),
                (TokenType::FOR, "for"),
                (TokenType::IDENTIFIER, "orchid"),
                (TokenType::OR, "or"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_04_comments_and_lines() {
        let source = "// leading comment\nvar x; // trailing\n\nprint x;";
        let tokens: Vec<Token> = Scanner::new(source).filter_map(Result::ok).collect();

        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![2, 2, 2, 4, 4, 4, 4]);
        assert_eq!(tokens.last().map(|t| t.token_type.clone()), Some(TokenType::EOF));
    }

    #[test]
    fn test_scanner_05_number_literals() {
        let tokens: Vec<Token> = Scanner::new("123 3.25 7.").filter_map(Result::ok).collect();

        let values: Vec<f64> = tokens
            .iter()
            .filter_map(|t| match t.token_type {
                TokenType::NUMBER(n) => Some(n),
                _ => None,
            })
            .collect();
        assert_eq!(values, vec![123.0, 3.25, 7.0]);

        // A trailing dot is not part of the number.
        assert_eq!(tokens[3].token_type, TokenType::DOT);

        assert_eq!(tokens[0].to_string(), "NUMBER 123 123.0");
        assert_eq!(tokens[1].to_string(), "NUMBER 3.25 3.25");
    }

    #[test]
    fn test_scanner_06_multiline_string() {
        let results: Vec<_> = Scanner::new("\"one\ntwo\" x").collect();

        assert_eq!(results.len(), 3);
        match &results[0] {
            Ok(Token {
                token_type: TokenType::STRING(value),
                lexeme,
                line,
            }) => {
                assert_eq!(value, "one\ntwo");
                assert_eq!(lexeme, "\"one\ntwo\"");
                assert_eq!(*line, 2);
            }
            other => panic!("Expected a string token, got {:?}", other),
        }
        assert_token_matches(&results[1], TokenType::IDENTIFIER, "x");
    }

    #[test]
    fn test_scanner_07_unterminated_string() {
        let results: Vec<_> = Scanner::new("print \"abc\nxyz").collect();

        assert_eq!(results.len(), 3);
        assert_token_matches(&results[0], TokenType::PRINT, "print");

        let err = results[1].as_ref().err().expect("unterminated string");
        assert_eq!(err.to_string(), "[line 2] Error: Unterminated string.");
        assert_eq!(err.location, Location::Line);

        assert_token_matches(&results[2], TokenType::EOF, "");
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",.$(#";
        let scanner = Scanner::new(source);

        // Collect all results (both tokens and errors)
        let results: Vec<_> = scanner.collect();

        // 0: COMMA ','
        // 1: DOT '.'
        // 2: Error for '$'
        // 3: LEFT_PAREN '('
        // 4: Error for '#'
        // 5: EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::DOT, ".");
        assert_token_matches(&results[3], TokenType::LEFT_PAREN, "(");
        assert_token_matches(&results[5], TokenType::EOF, "");

        let errors: Vec<String> = results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .map(|e| e.to_string())
            .collect();
        assert_eq!(
            errors,
            vec![
                "[line 1] Error: Unexpected character: $",
                "[line 1] Error: Unexpected character: #",
            ]
        );
    }

    #[test]
    fn test_scanner_08_non_ascii_character() {
        let results: Vec<_> = Scanner::new("a é b").collect();

        assert_eq!(results.len(), 4);
        assert_token_matches(&results[0], TokenType::IDENTIFIER, "a");
        assert_eq!(
            results[1].as_ref().err().map(|e| e.message.clone()),
            Some("Unexpected character: é".to_string())
        );
        assert_token_matches(&results[2], TokenType::IDENTIFIER, "b");
        assert_token_matches(&results[3], TokenType::EOF, "");
    }

    #[test]
    fn test_scanner_09_scan_tokens_splits_diagnostics() {
        let (tokens, diagnostics) = scan_tokens("var @ = 1;\n@");

        let kinds: Vec<&str> = tokens.iter().map(|t| t.token_type.name()).collect();
        assert_eq!(kinds, vec!["VAR", "EQUAL", "NUMBER", "SEMICOLON", "EOF"]);

        let lines: Vec<usize> = diagnostics.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![1, 2]);
    }

    #[test]
    fn test_scanner_10_empty_source() {
        let mut scanner = Scanner::new("");

        assert_token_matches(&scanner.next().expect("eof token"), TokenType::EOF, "");
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }

    #[test]
    fn test_scanner_11_token_display() {
        let tokens: Vec<Token> = Scanner::new("var s = \"hi\";")
            .filter_map(Result::ok)
            .collect();
        let dump: Vec<String> = tokens.iter().map(Token::to_string).collect();

        assert_eq!(
            dump,
            vec![
                "VAR var null",
                "IDENTIFIER s null",
                "EQUAL = null",
                "STRING \"hi\" hi",
                "SEMICOLON ; null",
                "EOF  null",
            ]
        );
    }
}
