use subscheme::{eval, eval_source, global_environment};
use subscheme_core::{Environment, Error, Tokenizer, Value, parse};

fn eval_expr(expr: &str) -> String {
    let env = global_environment();
    eval_in(expr, &env)
}

fn eval_in(expr: &str, env: &Environment) -> String {
    match parse(expr) {
        Ok(parsed) => match eval(&parsed, env) {
            Ok(result) => result.to_string(),
            Err(e) => format!("Error: {e}"),
        },
        Err(e) => format!("Parse error: {e}"),
    }
}

fn eval_err(expr: &str, env: &Environment) -> Error {
    let parsed = parse(expr).unwrap();
    eval(&parsed, env).unwrap_err()
}

#[test]
fn test_tokenize_application() {
    let tokenizer = Tokenizer::new("(+ 1 2)");
    assert_eq!(tokenizer.tokens(), ["(", "+", "1", "2", ")"]);
}

#[test]
fn test_arithmetic() {
    assert_eq!(eval_expr("(+ 1 2 3)"), "6");
    assert_eq!(eval_expr("(* 2 3 4)"), "24");
    assert_eq!(eval_expr("(- 10 1 2)"), "7");
    assert_eq!(eval_expr("(- 5)"), "-5");
    assert_eq!(eval_expr("(+)"), "0");
    assert_eq!(eval_expr("(*)"), "1");
    assert_eq!(eval_expr("(+ 1 2.5)"), "3.5");
    assert_eq!(eval_expr("(/ 10 4)"), "2.5");
    assert_eq!(eval_expr("(/ 6 3)"), "2.0");
    assert_eq!(eval_expr("(/ 6)"), "6");
}

#[test]
fn test_division_by_zero_propagates() {
    let env = global_environment();
    assert!(matches!(eval_err("(/ 1 0)", &env), Error::Arithmetic(_)));
    assert!(matches!(eval_err("(+ 1 (/ 2 0))", &env), Error::Arithmetic(_)));
}

#[test]
fn test_subtraction_needs_an_argument() {
    let env = global_environment();
    assert!(matches!(eval_err("(-)", &env), Error::Arity { .. }));
}

#[test]
fn test_comparisons() {
    assert_eq!(eval_expr("(< 1 2)"), "#t");
    assert_eq!(eval_expr("(> 1 2)"), "#f");
    assert_eq!(eval_expr("(= 2 2.0)"), "#t");
    assert_eq!(eval_expr("(eq? 'a 'a)"), "#t");
    assert_eq!(eval_expr("(eq? 'a 'b)"), "#f");
    assert_eq!(eval_expr("(eq? '(1 2) '(1 2))"), "#t");
    assert_eq!(eval_expr("(zero? 0)"), "#t");
    assert_eq!(eval_expr("(zero? 1)"), "#f");
}

#[test]
fn test_booleans() {
    assert_eq!(eval_expr("#t"), "#t");
    assert_eq!(eval_expr("#f"), "#f");
    assert_eq!(eval_expr("'#t"), "#t");
    assert_eq!(eval_expr("(atom? '#t)"), "#t");
    assert_eq!(eval_expr("(not #f)"), "#t");
    assert_eq!(eval_expr("(not 1)"), "#f");
}

#[test]
fn test_quote() {
    assert_eq!(eval_expr("(quote a)"), "a");
    assert_eq!(eval_expr("(quote (1 2 3))"), "(1 2 3)");
    assert_eq!(eval_expr("'a"), "a");
    assert_eq!(eval_expr("'(+ 1 2)"), "(+ 1 2)");
    assert_eq!(eval_expr("'()"), "()");
}

#[test]
fn test_list_primitives() {
    assert_eq!(eval_expr("(cons 1 (quote (2 3)))"), "(1 2 3)");
    assert_eq!(eval_expr("(car (quote (1 2)))"), "1");
    assert_eq!(eval_expr("(cdr (quote (1 2)))"), "(2)");
    assert_eq!(eval_expr("(cdr '(1))"), "()");
    assert_eq!(eval_expr("(cons 1 '())"), "(1)");
    assert_eq!(eval_expr("(null? '())"), "#t");
    assert_eq!(eval_expr("(null? '(1))"), "#f");
    assert_eq!(eval_expr("(atom? 'a)"), "#t");
    assert_eq!(eval_expr("(atom? 1)"), "#f");
    assert_eq!(eval_expr("(atom? '(a))"), "#f");
}

#[test]
fn test_car_of_empty_list_fails() {
    let env = global_environment();
    assert!(matches!(eval_err("(car '())", &env), Error::Type(_)));
}

#[test]
fn test_cond() {
    assert_eq!(eval_expr("(cond (#f 1) (#t 2) (else 3))"), "2");
    assert_eq!(eval_expr("(cond (#f 1) (else 3))"), "3");
    assert_eq!(eval_expr("(cond ((< 2 1) 'a) ((> 2 1) 'b 'c))"), "c");
    assert_eq!(eval_expr("(cond (#f 1))"), "#<unspecified>");
}

#[test]
fn test_cond_evaluates_only_the_chosen_clause() {
    let env = global_environment();
    assert_eq!(eval_in("(cond (#t 1) ((car '()) 2))", &env), "1");
    assert_eq!(eval_in("(cond (#f (undefined)) (#t 2))", &env), "2");
}

#[test]
fn test_unmatched_cond_is_false() {
    assert_eq!(eval_expr("(not (cond (#f 1)))"), "#t");
    assert_eq!(eval_expr("(cond ((cond (#f 1)) 'a) (else 'b))"), "b");
    assert_eq!(eval_expr("(or (cond (#f 1)))"), "#f");
}

#[test]
fn test_symbols_are_ordered_by_name() {
    assert_eq!(eval_expr("(< 'a 'b)"), "#t");
    assert_eq!(eval_expr("(> 'apple 'banana)"), "#f");
    assert!(eval_expr("(< 'a 1)").starts_with("Error: TypeError"));
}

#[test]
fn test_oversized_integer_literal() {
    assert!(eval_expr("99999999999999999999").starts_with("Parse error: ArithmeticError"));
    assert_eq!(eval_expr("9223372036854775807"), "9223372036854775807");
}

#[test]
fn test_and_or_short_circuit() {
    assert_eq!(eval_expr("(and 1 2 3)"), "#t");
    assert_eq!(eval_expr("(and 1 #f (car '()))"), "#f");
    assert_eq!(eval_expr("(or #f 5)"), "#t");
    assert_eq!(eval_expr("(or 1 (car '()))"), "#t");
    assert_eq!(eval_expr("(or #f '())"), "#f");
    assert_eq!(eval_expr("(and)"), "#t");
    assert_eq!(eval_expr("(or)"), "#f");
}

#[test]
fn test_begin() {
    let env = global_environment();
    assert_eq!(eval_in("(begin (define a 1) (define b 2) (+ a b))", &env), "3");
    assert!(matches!(eval_err("(begin)", &env), Error::Arity { .. }));
}

#[test]
fn test_lambda() {
    assert_eq!(eval_expr("((lambda (x) x) 42)"), "42");
    assert_eq!(eval_expr("((lambda (x y) (cons x y)) 1 '(2))"), "(1 2)");
    assert_eq!(eval_expr("((lambda () 7))"), "7");
    assert_eq!(eval_expr("(lambda (x) x)"), "#<compound procedure>");
    assert_eq!(eval_expr("car"), "#<primitive car>");
}

#[test]
fn test_lambda_body_is_a_sequence() {
    let env = global_environment();
    eval_in("(define f (lambda (x) (define y (* x 2)) (+ y 1)))", &env);
    assert_eq!(eval_in("(f 5)", &env), "11");
    // the inner define bound y in the call's scope only
    assert!(matches!(eval_err("y", &env), Error::UndefinedSymbol(_)));
}

#[test]
fn test_define_and_call() {
    let env = global_environment();
    assert_eq!(eval_in("(define square (lambda (x) (* x x)))", &env), "#<compound procedure>");
    assert_eq!(eval_in("(square 5)", &env), "25");
}

#[test]
fn test_define_returns_value() {
    assert_eq!(eval_expr("(define x 10)"), "10");
}

#[test]
fn test_redefinition_overwrites() {
    let env = global_environment();
    eval_in("(define x 1)", &env);
    eval_in("(define x 2)", &env);
    assert_eq!(eval_in("x", &env), "2");
}

#[test]
fn test_undefined_symbol() {
    let env = global_environment();
    assert_eq!(
        eval_err("nowhere", &env),
        Error::UndefinedSymbol("nowhere".to_string())
    );
    assert_eq!(eval_in("nowhere", &env), "Error: Undefined symbol: nowhere");
}

#[test]
fn test_closure_arity_errors() {
    let env = global_environment();
    eval_in("(define pair (lambda (a b) (cons a (cons b '()))))", &env);
    assert_eq!(eval_in("(pair 1 2)", &env), "(1 2)");

    for call in ["(pair 1)", "(pair 1 2 3)"] {
        match eval_err(call, &env) {
            Error::Arity { expected, provided, .. } => {
                assert_eq!(expected.to_string(), "2");
                assert_ne!(provided, 2);
            }
            other => panic!("expected arity error, got {other:?}"),
        }
    }
}

#[test]
fn test_primitive_arity_errors() {
    let env = global_environment();
    assert!(matches!(eval_err("(car '(1) '(2))", &env), Error::Arity { .. }));
    assert!(matches!(eval_err("(cons 1)", &env), Error::Arity { .. }));
    assert!(matches!(eval_err("(quit 1)", &env), Error::Arity { .. }));
}

#[test]
fn test_apply_non_callable() {
    let env = global_environment();
    assert!(matches!(eval_err("(1 2 3)", &env), Error::Type(_)));
    assert!(matches!(eval_err("('car '(1))", &env), Error::Type(_)));
}

#[test]
fn test_recursion() {
    let env = global_environment();
    eval_in(
        "(define fact (lambda (n) (cond ((zero? n) 1) (else (* n (fact (- n 1)))))))",
        &env,
    );
    assert_eq!(eval_in("(fact 10)", &env), "3628800");

    eval_in(
        "(define len (lambda (l) (cond ((null? l) 0) (else (+ 1 (len (cdr l)))))))",
        &env,
    );
    assert_eq!(eval_in("(len '(a b c d))", &env), "4");
}

#[test]
fn test_closure_captures_defining_environment() {
    let env = global_environment();
    eval_in("(define make-adder (lambda (n) (lambda (x) (+ x n))))", &env);
    eval_in("(define add5 (make-adder 5))", &env);
    // a global n must not leak into the closure
    eval_in("(define n 100)", &env);
    assert_eq!(eval_in("(add5 1)", &env), "6");

    // the call site's bindings are invisible to the closure body
    eval_in("(define call-with-n (lambda (n f) (f 0)))", &env);
    assert_eq!(eval_in("(call-with-n 1000 add5)", &env), "5");
}

#[test]
fn test_counter_closures_are_independent() {
    let env = global_environment();
    eval_in("(define make-const (lambda (x) (lambda () x)))", &env);
    eval_in("(define one (make-const 1))", &env);
    eval_in("(define two (make-const 2))", &env);
    assert_eq!(eval_in("(one)", &env), "1");
    assert_eq!(eval_in("(two)", &env), "2");
}

#[test]
fn test_higher_order_procedures() {
    let env = global_environment();
    eval_in(
        "(define map (lambda (f l) (cond ((null? l) '()) (else (cons (f (car l)) (map f (cdr l)))))))",
        &env,
    );
    assert_eq!(eval_in("(map (lambda (x) (* x x)) '(1 2 3))", &env), "(1 4 9)");
    assert_eq!(eval_in("(map car '((a b) (c d)))", &env), "(a c)");
}

#[test]
fn test_quit_is_a_signal() {
    let env = global_environment();
    let err = eval_err("(begin (define before 1) (quit) (define after 2))", &env);
    assert!(err.is_quit());
    assert_eq!(eval_in("before", &env), "1");
    assert!(matches!(eval_err("after", &env), Error::UndefinedSymbol(_)));
}

#[test]
fn test_failed_expression_leaves_environment_usable() {
    let env = global_environment();
    eval_in("(define x 1)", &env);
    assert!(eval_in("(define x (car '()))", &env).starts_with("Error: "));
    assert_eq!(eval_in("x", &env), "1");
}

#[test]
fn test_eval_source_multiple_expressions() {
    let env = global_environment();
    let last = eval_source(
        "(define double (lambda (x) (* 2 x)))\n(double 21)",
        &env,
    )
    .unwrap();
    assert_eq!(last, Some(Value::int(42)));
}

#[test]
fn test_incomplete_input_reports_syntax_error() {
    assert!(eval_expr("(+ 1 2").starts_with("Parse error: SyntaxError"));
}
