mod common;

#[cfg(test)]
mod resolver_tests {
    use pretty_assertions::assert_eq;

    use treelox::RunOutcome;

    use super::common::run;

    #[test]
    fn test_closure_keeps_binding_seen_at_declaration() {
        let (outcome, printed, _) = run(r#"
            var a = "global";
            {
                fun showA() { print a; }
                showA();
                var a = "block";
                showA();
                print a;
            }
        "#);

        assert_eq!(outcome, RunOutcome::Ok);
        assert_eq!(printed, vec!["global", "global", "block"]);
    }

    #[test]
    fn test_own_initializer_is_static_error() {
        let (outcome, printed, errors) = run("var a = 1; { var a = a; print a; }");

        assert_eq!(outcome, RunOutcome::StaticError);
        assert!(printed.is_empty());
        assert_eq!(
            errors,
            vec!["[line 1] Error at 'a': Can't read local variable in its own initializer."]
        );
    }

    #[test]
    fn test_redeclaration_in_local_scope() {
        let (outcome, _, errors) = run("fun f(a) { var a = 2; }");

        assert_eq!(outcome, RunOutcome::StaticError);
        assert_eq!(
            errors,
            vec!["[line 1] Error at 'a': Already a variable with this name in this scope."]
        );
    }

    #[test]
    fn test_global_redeclaration_is_allowed() {
        let (outcome, printed, _) = run("var a = 1; var a = 2; print a;");

        assert_eq!(outcome, RunOutcome::Ok);
        assert_eq!(printed, vec!["2"]);
    }

    #[test]
    fn test_misplaced_return_this_and_super() {
        let cases = [
            ("return;", "[line 1] Error at 'return': Can't return from top-level code."),
            (
                "class A { init() { return 1; } }",
                "[line 1] Error at 'return': Can't return a value from an initializer.",
            ),
            ("print this;", "[line 1] Error at 'this': Can't use 'this' outside of a class."),
            (
                "print super.x;",
                "[line 1] Error at 'super': Can't use 'super' outside of a class.",
            ),
            (
                "class A { m() { super.m(); } }",
                "[line 1] Error at 'super': Can't use 'super' in a class with no superclass.",
            ),
            ("class A < A {}", "[line 1] Error at 'A': A class can't inherit from itself."),
        ];

        for (source, expected) in cases {
            let (outcome, _, errors) = run(source);
            assert_eq!(outcome, RunOutcome::StaticError, "{}", source);
            assert_eq!(errors, vec![expected.to_string()], "{}", source);
        }
    }

    #[test]
    fn test_all_resolution_errors_are_reported() {
        let (_, _, errors) = run("return 1;\nprint this;");

        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_syntax_errors_skip_resolution() {
        let (outcome, _, errors) = run("{ var a = a; }\nprint ;");

        assert_eq!(outcome, RunOutcome::StaticError);
        assert_eq!(errors, vec!["[line 2] Error at ';': Expect expression."]);
    }
}
