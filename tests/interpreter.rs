mod common;

#[cfg(test)]
mod interpreter_tests {
    use pretty_assertions::assert_eq;

    use treelox::RunOutcome;

    use super::common::run;

    fn output(source: &str) -> Vec<String> {
        let (outcome, printed, errors) = run(source);
        assert_eq!(outcome, RunOutcome::Ok, "errors: {:?}", errors);
        printed
    }

    #[test]
    fn test_arithmetic_and_printing() {
        assert_eq!(
            output("print 1 + 2 * 3; print 7 / 2; print -(4 - 6); print \"con\" + \"cat\";"),
            vec!["7", "3.5", "2", "concat"]
        );
        assert_eq!(
            output("print nil; print true; print !nil; print 1 == 1.0; print \"a\" != \"a\";"),
            vec!["nil", "true", "true", "true", "false"]
        );
    }

    #[test]
    fn test_equality_never_coerces() {
        assert_eq!(
            output("print 1 == \"1\"; print nil == false; print nil == nil;"),
            vec!["false", "false", "true"]
        );
    }

    #[test]
    fn test_logical_operators_return_deciding_operand() {
        assert_eq!(
            output("print nil or \"yes\"; print 0 and 2; print false and missing(); print 1 or missing();"),
            vec!["yes", "2", "false", "1"]
        );
    }

    #[test]
    fn test_scoping_and_shadowing() {
        assert_eq!(
            output(r#"
                var a = "outer";
                {
                    var a = "inner";
                    print a;
                }
                print a;
                a = "assigned";
                print a;
            "#),
            vec!["inner", "outer", "assigned"]
        );
    }

    #[test]
    fn test_control_flow() {
        assert_eq!(
            output(r#"
                var sum = 0;
                for (var i = 1; i <= 4; i = i + 1) sum = sum + i;
                print sum;
                var n = 0;
                while (n < 3) n = n + 1;
                if (n == 3) print "three"; else print "other";
            "#),
            vec!["10", "three"]
        );
    }

    #[test]
    fn test_recursion() {
        assert_eq!(
            output(r#"
                fun fact(n) {
                    if (n <= 1) return 1;
                    return n * fact(n - 1);
                }
                print fact(5);
            "#),
            vec!["120"]
        );
    }

    #[test]
    fn test_closures_share_captured_state() {
        assert_eq!(
            output(r#"
                fun makeCounter() {
                    var i = 0;
                    fun count() {
                        i = i + 1;
                        return i;
                    }
                    return count;
                }
                var counter = makeCounter();
                print counter();
                print counter();
                var other = makeCounter();
                print other();
            "#),
            vec!["1", "2", "1"]
        );
    }

    #[test]
    fn test_return_unwinds_loops() {
        assert_eq!(
            output(r#"
                fun first() {
                    for (var i = 0; ; i = i + 1) {
                        while (true) { return i + 10; }
                    }
                }
                print first();
            "#),
            vec!["10"]
        );
    }

    #[test]
    fn test_function_values_print() {
        assert_eq!(
            output("fun f() {} print f; print clock; print f();"),
            vec!["<fn f>", "<native fn>", "nil"]
        );
    }

    #[test]
    fn test_clock_returns_a_number() {
        assert_eq!(output("print clock() > 0;"), vec!["true"]);
    }

    #[test]
    fn test_division_by_zero_halts() {
        let (outcome, printed, errors) = run("print 1; print 1 / 0; print 2;");

        assert_eq!(outcome, RunOutcome::RuntimeError);
        assert_eq!(printed, vec!["1"]);
        assert_eq!(errors, vec!["Division by zero.\n[line 1]"]);
    }

    #[test]
    fn test_type_errors() {
        let cases = [
            ("print \"a\" + 1;", "Operands must be two numbers or two strings."),
            ("print -\"a\";", "Operand must be a number."),
            ("print 1 < \"2\";", "Operands must be numbers."),
            ("print undefined;", "Undefined variable 'undefined'."),
            ("missing = 1;", "Undefined variable 'missing'."),
            ("\"str\"();", "Can only call functions and classes."),
            ("fun f(a) {} f(1, 2);", "Expected 1 arguments but got 2."),
            ("print clock(1);", "Expected 0 arguments but got 1."),
            ("var x = 1; print x.y;", "Only instances have properties."),
            ("var x = 1; x.y = 2;", "Only instances have fields."),
        ];

        for (source, expected) in cases {
            let (outcome, _, errors) = run(source);
            assert_eq!(outcome, RunOutcome::RuntimeError, "{}", source);
            assert_eq!(errors, vec![format!("{}\n[line 1]", expected)], "{}", source);
        }
    }

    #[test]
    fn test_runtime_error_reports_line() {
        let (_, _, errors) = run("var a = 1;\n\nprint a + nil;");

        assert_eq!(
            errors,
            vec!["Operands must be two numbers or two strings.\n[line 3]"]
        );
    }

    #[test]
    fn test_error_inside_block_restores_scope() {
        let (mut lox, out) = super::common::session();

        assert_eq!(
            lox.run("var a = \"global\"; { var a = \"local\"; print nil + 1; }"),
            RunOutcome::RuntimeError
        );
        assert_eq!(lox.run("print a;"), RunOutcome::Ok);
        assert_eq!(out.contents(), "global\n");
    }
}
