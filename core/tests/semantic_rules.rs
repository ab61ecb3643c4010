use vypr_core::analyzers::{analyze_semantic_rules, Analyzer};
use vypr_core::ast;
use vypr_core::{Script, VyprErrorExt};

fn analyze(src: &str) -> Result<(), String> {
    let script = Script::from_source("t.vy", src);
    let program = ast::generate_ast_from_source(&script).expect("parse");
    analyze_semantic_rules(&program).map_err(|e| e.message())
}

fn expect_err(src: &str) -> String {
    analyze(src).expect_err("expected semantic error")
}

#[test]
fn undefined_variable_read_is_rejected() {
    let message = expect_err("print y\n");
    assert!(message.contains("Variable 'y' is not defined"), "{}", message);
}

#[test]
fn declared_and_initialized_variable_is_accepted() {
    analyze("var x = 1\nprint x\n").expect("should analyze");
}

#[test]
fn uninitialized_read_is_rejected() {
    let message = expect_err("var x\nprint x\n");
    assert!(
        message.contains("Variable 'x' is not initialized"),
        "{}",
        message
    );
}

#[test]
fn input_marks_a_variable_initialized() {
    analyze("var x\ninput x\nprint x\n").expect("should analyze");
}

#[test]
fn input_of_undefined_variable_is_rejected() {
    let message = expect_err("input x\n");
    assert!(message.contains("Variable 'x' is not defined"), "{}", message);
}

#[test]
fn duplicate_variable_in_same_scope_is_rejected() {
    let message = expect_err("var x = 1\nvar x = 2\n");
    assert!(
        message.contains("Variable 'x' is already defined in this scope"),
        "{}",
        message
    );
}

#[test]
fn shadowing_in_an_inner_scope_is_allowed() {
    let src = "var x = 1\nif true:\n    var x = 2\n    print x\nprint x\n";
    analyze(src).expect("shadowing should analyze");
}

#[test]
fn initializer_cannot_see_the_new_binding() {
    let message = expect_err("var x = x\n");
    assert!(message.contains("Variable 'x' is not defined"), "{}", message);
}

#[test]
fn block_scoped_variable_does_not_leak() {
    let src = "if true:\n    var inner = 1\nprint inner\n";
    let message = expect_err(src);
    assert!(
        message.contains("Variable 'inner' is not defined"),
        "{}",
        message
    );
}

#[test]
fn assignment_to_undefined_variable_is_rejected() {
    let message = expect_err("y = 1\n");
    assert!(message.contains("Variable 'y' is not defined"), "{}", message);
}

#[test]
fn return_outside_function_is_rejected() {
    let message = expect_err("return 1\n");
    assert!(
        message.contains("Cannot return from outside a function"),
        "{}",
        message
    );
}

#[test]
fn return_inside_function_is_accepted() {
    analyze("func f():\n    return 1\n").expect("should analyze");
}

#[test]
fn return_flag_is_restored_after_function_body() {
    let src = "func f():\n    return 1\nreturn 2\n";
    let message = expect_err(src);
    assert!(
        message.contains("Cannot return from outside a function"),
        "{}",
        message
    );
}

#[test]
fn function_parameters_are_initialized() {
    analyze("func f(a):\n    print a\n").expect("should analyze");
}

#[test]
fn duplicate_parameter_is_rejected() {
    let message = expect_err("func f(a, a):\n    return a\n");
    assert!(
        message.contains("Parameter 'a' is already defined in function 'f'"),
        "{}",
        message
    );
}

#[test]
fn duplicate_function_in_same_scope_is_rejected() {
    let src = "func f():\n    return\nfunc f():\n    return\n";
    let message = expect_err(src);
    assert!(
        message.contains("Function 'f' is already defined in this scope"),
        "{}",
        message
    );
}

#[test]
fn call_of_undefined_function_is_rejected() {
    let message = expect_err("f(1)\n");
    assert!(message.contains("Function 'f' is not defined"), "{}", message);
}

#[test]
fn calling_a_variable_is_rejected() {
    let message = expect_err("var x = 1\nx(2)\n");
    assert!(message.contains("'x' is not a function"), "{}", message);
}

#[test]
fn wrong_user_arity_is_rejected() {
    let src = "func add(a, b):\n    return a + b\nadd(1)\n";
    let message = expect_err(src);
    assert!(
        message.contains("Function 'add' expects 2 arguments, but got 1"),
        "{}",
        message
    );
}

#[test]
fn exact_user_arity_is_accepted() {
    let src = "func add(a, b):\n    return a + b\nprint add(1, 2)\n";
    analyze(src).expect("should analyze");
}

#[test]
fn recursive_calls_resolve_the_function_name() {
    let src = "func fib(n):\n    if n < 2:\n        return n\n    return fib(n - 1) + fib(n - 2)\nprint fib(10)\n";
    analyze(src).expect("recursion should analyze");
}

#[test]
fn builtin_conversions_take_exactly_one_argument() {
    analyze("print int(\"3\")\n").expect("int/1 should analyze");
    let message = expect_err("print int(1, 2)\n");
    assert!(
        message.contains("Built-in function 'int' expects 1 argument, but got 2"),
        "{}",
        message
    );
}

#[test]
fn loop_variable_is_bound_inside_the_body_only() {
    analyze("var xs = [1, 2]\nloop v in xs:\n    print v\n").expect("loop var in body");

    let message = expect_err("var xs = [1, 2]\nloop v in xs:\n    print v\nprint v\n");
    assert!(message.contains("Variable 'v' is not defined"), "{}", message);
}

#[test]
fn loop_times_count_is_checked() {
    let message = expect_err("loop n times:\n    print 1\n");
    assert!(message.contains("Variable 'n' is not defined"), "{}", message);
}

#[test]
fn symbol_table_dump_lists_globals() {
    let script = Script::from_source("t.vy", "var x = 1\nfunc f(a):\n    return a\n");
    let program = ast::generate_ast_from_source(&script).expect("parse");
    let mut analyzer = Analyzer::new();
    analyzer.analyze(&program).expect("analyze");

    let dump = analyzer.symbol_table_dump();
    assert!(dump.contains("x: VARIABLE"), "{}", dump);
    assert!(dump.contains("f: FUNCTION (1 parameters)"), "{}", dump);
}
