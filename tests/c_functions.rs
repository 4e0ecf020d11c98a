mod util;

use indoc::indoc;
use util::{run_ok, run_script, FAILURE, NO_ERROR, SUCCESS};

#[test]
fn declaration_call_and_rendering() {
    let input = indoc! {r#"
        fun greet(name) {
          print "hi " + name;
        }
        greet("lox");
        print greet;
        print clock;
    "#};
    let expected = indoc! {"
        hi lox
        <fn greet>
        <fn clock>
    "};
    run_ok(input, expected);
}

#[test]
fn recursion() {
    let input = indoc! {"
        fun fib(n) {
          if (n <= 1) return n;
          return fib(n - 2) + fib(n - 1);
        }
        print fib(10);
    "};
    run_ok(input, "55\n");
}

#[test]
fn closures_keep_their_defining_scope_alive() {
    let input = indoc! {"
        fun makeCounter() {
          var i = 0;
          fun count() {
            i = i + 1;
            print i;
          }
          return count;
        }
        var counter = makeCounter();
        counter();
        counter();
    "};
    let expected = indoc! {"
        1
        2
    "};
    run_ok(input, expected);
}

#[test]
fn resolution_pins_a_reference_to_its_declaration_scope() {
    let input = indoc! {r#"
        var a = "global";
        {
          fun showA() {
            print a;
          }
          showA();
          var a = "local";
          showA();
        }
    "#};
    let expected = indoc! {"
        global
        global
    "};
    run_script(
        input,
        expected,
        "[line 7] Warning at 'a': Local variable is never read.\n",
        SUCCESS,
    );
}

#[test]
fn sibling_closures_share_one_captured_scope() {
    let input = indoc! {"
        fun pair() {
          var shared = 0;
          fun inc() {
            shared = shared + 1;
          }
          fun show() {
            print shared;
          }
          inc();
          inc();
          show();
        }
        pair();
    "};
    run_ok(input, "2\n");
}

#[test]
fn globals_bound_after_declaration_are_visible() {
    let input = indoc! {r#"
        fun show() {
          print g;
        }
        var g = "late";
        show();
    "#};
    run_ok(input, "late\n");
}

#[test]
fn return_unwinds_through_nested_blocks() {
    let input = indoc! {"
        fun f() {
          {
            {
              return 42;
            }
          }
          return 0;
        }
        print f();
    "};
    run_ok(input, "42\n");
}

#[test]
fn falling_off_the_end_returns_nil() {
    let input = indoc! {"
        fun noop() {}
        print noop();
    "};
    run_ok(input, "nil\n");
}

#[test]
fn short_circuit_never_evaluates_the_right_operand() {
    let input = indoc! {r#"
        fun bang() {
          print "evaluated";
          return true;
        }
        print true or bang();
        print false and bang();
    "#};
    let expected = indoc! {"
        true
        false
    "};
    run_ok(input, expected);
}

#[test]
fn functions_are_first_class_values() {
    let input = indoc! {"
        fun twice(f, x) {
          return f(f(x));
        }
        fun addOne(n) {
          return n + 1;
        }
        print twice(addOne, 5);
    "};
    run_ok(input, "7\n");
}

#[test]
fn function_equality_is_identity() {
    let input = indoc! {"
        fun f() {}
        var g = f;
        print f == g;
        print f == clock;
        print clock == clock;
    "};
    let expected = indoc! {"
        true
        false
        true
    "};
    run_ok(input, expected);
}

#[test]
fn native_clock_is_monotonic_and_numeric() {
    let input = indoc! {"
        var before = clock();
        var after = clock();
        print before >= 0;
        print after >= before;
    "};
    let expected = indoc! {"
        true
        true
    "};
    run_ok(input, expected);
}

#[test]
fn native_test_add_handles_numbers_and_strings() {
    let input = indoc! {r#"
        print _ci_test_add(1, 2);
        print _ci_test_add("foo", "bar");
    "#};
    let expected = indoc! {"
        3
        foobar
    "};
    run_ok(input, expected);
}

#[test]
fn native_test_add_rejects_mixed_operands() {
    run_script(
        r#"_ci_test_add(1, "x");"#,
        "",
        "[line 1] Error at ')': Invalid arguments to _ci_test_add: Must be two numbers or strings.\n",
        FAILURE,
    );
}

#[test]
fn calling_with_the_wrong_arity_fails() {
    let input = indoc! {"
        fun f(a, b) {
          print a + b;
        }
        f(1);
    "};
    run_script(
        input,
        "",
        "[line 4] Error at ')': Expected 2 arguments but got 1.\n",
        FAILURE,
    );
}

#[test]
fn only_functions_and_classes_are_callable() {
    run_script(
        r#""totally not a function"();"#,
        "",
        "[line 1] Error at ')': Can only call functions and classes.\n",
        FAILURE,
    );
}

#[test]
fn arguments_evaluate_left_to_right() {
    let input = indoc! {r#"
        fun note(label) {
          print label;
          return label;
        }
        _ci_test_add(note("first"), note("second"));
    "#};
    let expected = indoc! {"
        first
        second
    "};
    run_script(input, expected, NO_ERROR, SUCCESS);
}
