#[cfg(test)]
mod parser_tests {
    use pretty_assertions::assert_eq;

    use rox::ast::{Expr, LiteralValue, Stmt};
    use rox::error::{Diagnostic, Location};
    use rox::parser::Parser;
    use rox::scanner::scan_tokens;

    fn parse(source: &str) -> Result<Vec<Stmt>, Vec<Diagnostic>> {
        let (tokens, lex_errors) = scan_tokens(source);
        assert!(lex_errors.is_empty(), "unexpected lex errors: {:?}", lex_errors);

        Parser::new(&tokens).parse()
    }

    fn parse_ok(source: &str) -> Vec<Stmt> {
        match parse(source) {
            Ok(statements) => statements,
            Err(diagnostics) => panic!("Expected a clean parse, got {:?}", diagnostics),
        }
    }

    fn parse_err(source: &str) -> Vec<String> {
        match parse(source) {
            Ok(statements) => panic!("Expected diagnostics, got {:?}", statements),
            Err(diagnostics) => diagnostics.iter().map(Diagnostic::to_string).collect(),
        }
    }

    /// Fully parenthesised rendering of an expression.
    fn show(expr: &Expr) -> String {
        match expr {
            Expr::Literal(LiteralValue::Number(n)) => n.to_string(),
            Expr::Literal(LiteralValue::Str(s)) => format!("{:?}", s),
            Expr::Literal(LiteralValue::True) => "true".into(),
            Expr::Literal(LiteralValue::False) => "false".into(),
            Expr::Literal(LiteralValue::Nil) => "nil".into(),
            Expr::Unary { operator, right } => format!("({} {})", operator.lexeme, show(right)),
            Expr::Binary {
                left,
                operator,
                right,
            }
            | Expr::Logical {
                left,
                operator,
                right,
            } => format!("({} {} {})", operator.lexeme, show(left), show(right)),
            Expr::Grouping(inner) => format!("(group {})", show(inner)),
            Expr::Variable { name, .. } => name.lexeme.clone(),
            Expr::Assign { name, value, .. } => format!("(= {} {})", name.lexeme, show(value)),
            Expr::Call {
                callee, arguments, ..
            } => {
                let mut out = format!("(call {}", show(callee));
                for argument in arguments {
                    out.push(' ');
                    out.push_str(&show(argument));
                }
                out.push(')');
                out
            }
            Expr::Get { object, name } => format!("(. {} {})", show(object), name.lexeme),
            Expr::Set {
                object,
                name,
                value,
            } => format!("(=. {} {} {})", show(object), name.lexeme, show(value)),
            Expr::This { .. } => "this".into(),
            Expr::Super { method, .. } => format!("(super {})", method.lexeme),
        }
    }

    fn single_expression(source: &str) -> String {
        let statements = parse_ok(source);
        assert_eq!(statements.len(), 1);

        match &statements[0] {
            Stmt::Expression(expr) | Stmt::Print(expr) => show(expr),
            other => panic!("Expected an expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_parser_01_precedence() {
        assert_eq!(single_expression("1 + 2 * 3;"), "(+ 1 (* 2 3))");
        assert_eq!(single_expression("1 - 2 - 3;"), "(- (- 1 2) 3)");
        assert_eq!(
            single_expression("-a < b == !c;"),
            "(== (< (- a) b) (! c))"
        );
        assert_eq!(
            single_expression("a or b and c;"),
            "(or a (and b c))"
        );
        assert_eq!(single_expression("(1 + 2) / 3;"), "(/ (group (+ 1 2)) 3)");
    }

    #[test]
    fn test_parser_02_assignment_is_right_associative() {
        assert_eq!(single_expression("a = b = 3;"), "(= a (= b 3))");
        assert_eq!(
            single_expression("obj.field.inner = 1;"),
            "(=. (. obj field) inner 1)"
        );
    }

    #[test]
    fn test_parser_03_calls_and_properties() {
        assert_eq!(
            single_expression("f(1)(2).g(\"x\");"),
            "(call (. (call (call f 1) 2) g) \"x\")"
        );
    }

    #[test]
    fn test_parser_04_for_desugars_into_while() {
        let statements = parse_ok("for (var i = 0; i < 3; i = i + 1) print i;");
        assert_eq!(statements.len(), 1);

        let Stmt::Block(outer) = &statements[0] else {
            panic!("Expected a block around the loop, got {:?}", statements[0]);
        };
        assert_eq!(outer.len(), 2);
        assert!(matches!(&outer[0], Stmt::Var { name, .. } if name.lexeme == "i"));

        let Stmt::While { condition, body } = &outer[1] else {
            panic!("Expected a while loop, got {:?}", outer[1]);
        };
        assert_eq!(show(condition), "(< i 3)");

        let Stmt::Block(body) = body.as_ref() else {
            panic!("Expected body and increment in a block, got {:?}", body);
        };
        assert!(matches!(&body[0], Stmt::Print(_)));
        assert!(matches!(&body[1], Stmt::Expression(expr) if show(expr) == "(= i (+ i 1))"));
    }

    #[test]
    fn test_parser_05_empty_for_clauses() {
        let statements = parse_ok("for (;;) print 1;");

        let Stmt::While { condition, body } = &statements[0] else {
            panic!("Expected a bare while loop, got {:?}", statements[0]);
        };
        assert_eq!(*condition, Expr::Literal(LiteralValue::True));
        assert!(matches!(body.as_ref(), Stmt::Print(_)));
    }

    #[test]
    fn test_parser_06_class_declaration() {
        let statements = parse_ok("class B < A { init(x) { this.x = x; } get() { return super.get(); } }");

        let Stmt::Class(class) = &statements[0] else {
            panic!("Expected a class, got {:?}", statements[0]);
        };
        assert_eq!(class.name.lexeme, "B");
        assert!(matches!(&class.superclass, Some(Expr::Variable { name, .. }) if name.lexeme == "A"));

        let methods: Vec<&str> = class
            .methods
            .iter()
            .map(|m| m.name.lexeme.as_str())
            .collect();
        assert_eq!(methods, vec!["init", "get"]);
        assert_eq!(class.methods[0].params.len(), 1);
    }

    #[test]
    fn test_parser_07_missing_expression() {
        assert_eq!(
            parse_err("print ;"),
            vec!["[line 1] Error at ';': Expected expression."]
        );
    }

    #[test]
    fn test_parser_08_error_at_end() {
        let errors = parse(" print 1").expect_err("missing semicolon");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].location, Location::AtEnd);
        assert_eq!(
            errors[0].to_string(),
            "[line 1] Error at end: Expected ';' after value."
        );
    }

    #[test]
    fn test_parser_09_recovers_and_reports_every_error() {
        let source = "var = 1;\nprint 2;\nvar b = ;\nprint 3;";

        assert_eq!(
            parse_err(source),
            vec![
                "[line 1] Error at '=': Expected variable name.",
                "[line 3] Error at ';': Expected expression.",
            ]
        );
    }

    #[test]
    fn test_parser_10_invalid_assignment_target() {
        assert_eq!(
            parse_err("1 + 2 = 3;"),
            vec!["[line 1] Error at '=': Invalid assignment target."]
        );
    }

    #[test]
    fn test_parser_11_too_many_arguments() {
        let errors = parse_err("f(1, 2, 3, 4, 5, 6, 7, 8, 9);");
        assert_eq!(
            errors,
            vec!["[line 1] Error at '9': Can't have more than 8 arguments."]
        );

        // Exactly eight is fine.
        parse_ok("f(1, 2, 3, 4, 5, 6, 7, 8);");
    }

    #[test]
    fn test_parser_12_too_many_parameters() {
        let errors = parse_err("fun f(a, b, c, d, e, f, g, h, i) {}");
        assert_eq!(
            errors,
            vec!["[line 1] Error at 'i': Can't have more than 8 parameters."]
        );
    }

    #[test]
    fn test_parser_13_unclosed_block() {
        assert_eq!(
            parse_err("{ print 1;"),
            vec!["[line 1] Error at end: Expected '}' after block."]
        );
    }

    #[test]
    fn test_parser_14_super_requires_method_name() {
        assert_eq!(
            parse_err("super;"),
            vec!["[line 1] Error at ';': Expected '.' after 'super'."]
        );
    }
}
