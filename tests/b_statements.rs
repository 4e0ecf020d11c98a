mod util;

use indoc::indoc;
use util::{run_ok, run_script, FAILURE};

#[test]
fn var_declaration_and_assignment() {
    let input = indoc! {"
        var a = 1;
        var b;
        print a;
        print b;
        b = a + 1;
        print b;
        a = b = 5;
        print a;
        print b;
    "};
    let expected = indoc! {"
        1
        nil
        2
        5
        5
    "};
    run_ok(input, expected);
}

#[test]
fn blocks_shadow_and_restore() {
    let input = indoc! {r#"
        var a = "outer";
        {
          var a = "inner";
          print a;
        }
        print a;
    "#};
    let expected = indoc! {"
        inner
        outer
    "};
    run_ok(input, expected);
}

#[test]
fn assignment_in_inner_scope_mutates_enclosing_binding() {
    let input = indoc! {"
        var a = 1;
        {
          a = 2;
        }
        print a;
    "};
    run_ok(input, "2\n");
}

#[test]
fn if_else_follows_truthiness() {
    let input = indoc! {r#"
        if (1 < 2) print "yes"; else print "no";
        if (nil) print "truthy"; else print "falsy";
    "#};
    let expected = indoc! {"
        yes
        falsy
    "};
    run_ok(input, expected);
}

#[test]
fn while_loop_runs_until_condition_is_falsy() {
    let input = indoc! {"
        var i = 0;
        var product = 1;
        while (i < 5) {
          i = i + 1;
          product = product * i;
        }
        print product;
    "};
    run_ok(input, "120\n");
}

#[test]
fn for_loop_sums_its_induction_variable() {
    let input = indoc! {"
        var sum = 0;
        for (var i = 0; i < 5; i = i + 1) {
          sum = sum + i;
        }
        print sum;
    "};
    run_ok(input, "10\n");
}

#[test]
fn for_loop_without_initializer_uses_existing_variable() {
    let input = indoc! {"
        var i = 0;
        for (; i < 3; i = i + 1) print i;
        print i;
    "};
    let expected = indoc! {"
        0
        1
        2
        3
    "};
    run_ok(input, expected);
}

#[test]
fn reading_an_undefined_variable_fails() {
    run_script(
        "print ghost;",
        "",
        "[line 1] Error at 'ghost': Undefined variable 'ghost'.\n",
        FAILURE,
    );
}

#[test]
fn assignment_never_creates_a_binding() {
    run_script(
        "ghost = 1;",
        "",
        "[line 1] Error at 'ghost': Undefined variable 'ghost'.\n",
        FAILURE,
    );
}

#[test]
fn runtime_error_stops_the_script_after_earlier_output() {
    let input = indoc! {r#"
        print "before";
        print missing;
        print "after";
    "#};
    run_script(
        input,
        "before\n",
        "[line 2] Error at 'missing': Undefined variable 'missing'.\n",
        FAILURE,
    );
}
