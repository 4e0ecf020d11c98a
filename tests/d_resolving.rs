mod util;

use indoc::indoc;
use util::{run_ok, run_script, FAILURE, SUCCESS};

#[test]
fn self_referential_initializer_is_rejected_statically() {
    run_script(
        "{ var a = a; }",
        "",
        "[line 1] Error at 'a': Can't read local variable in its own initializer.\n",
        FAILURE,
    );
}

#[test]
fn redeclaring_in_the_same_scope_is_rejected() {
    let input = indoc! {"
        {
          var a = 1;
          var a = 2;
          print a;
        }
    "};
    run_script(
        input,
        "",
        "[line 3] Error at 'a': A variable with this name already exists in current scope.\n",
        FAILURE,
    );
}

#[test]
fn duplicate_parameter_names_are_rejected() {
    let input = indoc! {"
        fun f(a, a) {
          print a;
        }
    "};
    run_script(
        input,
        "",
        "[line 1] Error at 'a': A variable with this name already exists in current scope.\n",
        FAILURE,
    );
}

#[test]
fn return_at_top_level_is_rejected() {
    run_script(
        "return 42;",
        "",
        "[line 1] Error at 'return': Can't return in top-level code.\n",
        FAILURE,
    );
}

#[test]
fn static_errors_are_collected_before_giving_up() {
    let input = indoc! {"
        return 1;
        { var b = b; }
    "};
    let expected_error = indoc! {"
        [line 1] Error at 'return': Can't return in top-level code.
        [line 2] Error at 'b': Can't read local variable in its own initializer.
    "};
    run_script(input, "", expected_error, FAILURE);
}

#[test]
fn unused_locals_warn_but_still_run() {
    let input = indoc! {r#"
        {
          var unused = 1;
        }
        print "done";
    "#};
    run_script(
        input,
        "done\n",
        "[line 2] Warning at 'unused': Local variable is never read.\n",
        SUCCESS,
    );
}

#[test]
fn unused_warnings_come_in_declaration_order() {
    let input = indoc! {"
        {
          var first = 1;
          var second = 2;
        }
    "};
    let expected_error = indoc! {"
        [line 2] Warning at 'first': Local variable is never read.
        [line 3] Warning at 'second': Local variable is never read.
    "};
    run_script(input, "", expected_error, SUCCESS);
}

#[test]
fn unused_parameters_warn_too() {
    let input = indoc! {r#"
        fun ignore(x) {
          print "ran";
        }
        ignore(1);
    "#};
    run_script(
        input,
        "ran\n",
        "[line 1] Warning at 'x': Local variable is never read.\n",
        SUCCESS,
    );
}

#[test]
fn references_resolve_through_deep_nesting() {
    let input = indoc! {r#"
        {
          var a = "one";
          {
            {
              print a;
            }
          }
        }
    "#};
    run_ok(input, "one\n");
}
