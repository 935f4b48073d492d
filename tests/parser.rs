#[cfg(test)]
mod parser_tests {
    use pretty_assertions::assert_eq;

    use treelox::ast::{Expr, Stmt};
    use treelox::ast_printer::AstPrinter;
    use treelox::diagnostics::Diagnostics;
    use treelox::parser::Parser;
    use treelox::scanner::Scanner;

    fn parse(source: &str) -> (Vec<Stmt>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let tokens = Scanner::new(source).scan_tokens(&mut diagnostics);
        let statements = Parser::new(tokens, &mut diagnostics).parse();
        (statements, diagnostics)
    }

    fn printed(source: &str) -> Vec<String> {
        let (statements, diagnostics) = parse(source);
        assert!(
            !diagnostics.had_error(),
            "unexpected errors: {:?}",
            diagnostics.errors()
        );
        statements.iter().map(AstPrinter::print_stmt).collect()
    }

    fn errors(source: &str) -> Vec<String> {
        let (_, diagnostics) = parse(source);
        diagnostics.errors().iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_precedence_and_associativity() {
        assert_eq!(
            printed("print 1 + 2 * 3 - 4 / 2;"),
            vec!["(print (- (+ 1.0 (* 2.0 3.0)) (/ 4.0 2.0)))"]
        );
        assert_eq!(
            printed("a = b = 3;"),
            vec!["(; (= a (= b 3.0)))"]
        );
        assert_eq!(
            printed("print !true == false or 1 < 2 and nil;"),
            vec!["(print (or (== (! true) false) (and (< 1.0 2.0) nil)))"]
        );
    }

    #[test]
    fn test_calls_and_properties() {
        assert_eq!(
            printed("a.b(1, \"s\").c = -x;"),
            vec!["(; (= (call (. a b) 1.0 s) c (- x)))"]
        );
    }

    #[test]
    fn test_for_desugars_to_while() {
        assert_eq!(
            printed("for (var i = 0; i < 3; i = i + 1) print i;"),
            vec!["(block (var i = 0.0) (while (< i 3.0) (block (print i) (; (= i (+ i 1.0))))))"]
        );
        assert_eq!(printed("for (;;) print 1;"), vec!["(while true (print 1.0))"]);
    }

    #[test]
    fn test_dangling_else_binds_to_nearest_if() {
        assert_eq!(
            printed("if (a) if (b) print 1; else print 2;"),
            vec!["(if a (if-else b (print 1.0) (print 2.0)))"]
        );
    }

    #[test]
    fn test_functions_and_classes() {
        assert_eq!(
            printed("fun add(a, b) { return a + b; }"),
            vec!["(fun add(a b) (return (+ a b)))"]
        );
        assert_eq!(
            printed("class B < A { init(x) { this.x = x; } get() { return super.get(); } }"),
            vec![
                "(class B < A (method init(x) (; (= this x x))) (method get() (return (call (super get)))))"
            ]
        );
    }

    #[test]
    fn test_missing_semicolon() {
        assert_eq!(
            errors("print 1"),
            vec!["[line 1] Error at end: Expect ';' after value."]
        );
        assert_eq!(
            errors("var a = 1\nprint a;"),
            vec!["[line 2] Error at 'print': Expect ';' after variable declaration."]
        );
    }

    #[test]
    fn test_invalid_assignment_target_does_not_stop_parsing() {
        let (statements, diagnostics) = parse("1 + 2 = 3; print 4;");

        assert_eq!(
            diagnostics
                .errors()
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>(),
            vec!["[line 1] Error at '=': Invalid assignment target."]
        );
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn test_recovery_reports_every_bad_statement() {
        let (statements, diagnostics) = parse("print ;\nvar x = 1;\nprint );\nprint x;");

        assert_eq!(
            diagnostics
                .errors()
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>(),
            vec![
                "[line 1] Error at ';': Expect expression.",
                "[line 3] Error at ')': Expect expression.",
            ]
        );
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn test_too_many_arguments() {
        let args: Vec<String> = (0..256).map(|i| i.to_string()).collect();
        let source = format!("f({});", args.join(", "));

        let (statements, diagnostics) = parse(&source);

        assert_eq!(diagnostics.errors().len(), 1);
        assert_eq!(
            diagnostics.errors()[0].message(),
            "Can't have more than 255 arguments."
        );
        match &statements[..] {
            [Stmt::Expression(Expr::Call { arguments, .. })] => assert_eq!(arguments.len(), 256),
            other => panic!("expected one call statement, got {:?}", other),
        }
    }

    #[test]
    fn test_too_many_parameters_keeps_parsing() {
        let params: Vec<String> = (0..256).map(|i| format!("p{}", i)).collect();
        let source = format!("fun f({}) {{ return p0; }}\nprint ;", params.join(", "));

        let (statements, diagnostics) = parse(&source);

        assert_eq!(
            diagnostics
                .errors()
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>(),
            vec![
                "[line 1] Error at 'p255': Can't have more than 255 parameters.",
                "[line 2] Error at ';': Expect expression.",
            ]
        );
        match &statements[..] {
            [Stmt::Function(decl)] => assert_eq!(decl.params.len(), 256),
            other => panic!("expected one function declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_expression_ids_are_unique_across_parses() {
        let mut diagnostics = Diagnostics::new();

        let tokens = Scanner::new("a; b;").scan_tokens(&mut diagnostics);
        let mut first = Parser::new(tokens, &mut diagnostics);
        first.parse();
        let next = first.next_free_id();
        assert_eq!(next, 2);

        let tokens = Scanner::new("c;").scan_tokens(&mut diagnostics);
        let statements = Parser::new(tokens, &mut diagnostics)
            .with_first_id(next)
            .parse();

        match &statements[..] {
            [Stmt::Expression(Expr::Variable { id, .. })] => assert_eq!(id.0, 2),
            other => panic!("expected one variable statement, got {:?}", other),
        }
    }
}
