mod util;

use indoc::indoc;
use util::{run_ok, run_script, FAILURE};

#[test]
fn instances_carry_fields() {
    let input = indoc! {"
        class Pair {}
        var p = Pair();
        p.x = 1;
        p.y = 2;
        print p.x + p.y;
    "};
    run_ok(input, "3\n");
}

#[test]
fn classes_and_instances_render_by_name() {
    let input = indoc! {"
        class Widget {}
        print Widget;
        var w = Widget();
        print w;
    "};
    let expected = indoc! {"
        Widget
        Widget instance
    "};
    run_ok(input, expected);
}

#[test]
fn fields_hold_values_of_any_kind() {
    let input = indoc! {r#"
        class Box {}
        var box = Box();
        box.label = "tools";
        box.count = 2;
        print box.label;
        print box.count;
    "#};
    let expected = indoc! {"
        tools
        2
    "};
    run_ok(input, expected);
}

#[test]
fn field_writes_are_visible_through_every_alias() {
    let input = indoc! {"
        class Box {}
        var a = Box();
        var b = a;
        b.value = 7;
        print a.value;
    "};
    run_ok(input, "7\n");
}

#[test]
fn instance_equality_is_identity() {
    let input = indoc! {"
        class Thing {}
        var a = Thing();
        var b = Thing();
        print a == a;
        print a == b;
        print Thing == Thing;
    "};
    let expected = indoc! {"
        true
        false
        true
    "};
    run_ok(input, expected);
}

#[test]
fn set_is_an_expression_yielding_the_value() {
    let input = indoc! {"
        class C {}
        var c = C();
        print c.f = 9;
    "};
    run_ok(input, "9\n");
}

#[test]
fn reading_a_missing_field_fails() {
    let input = indoc! {"
        class Empty {}
        print Empty().missing;
    "};
    run_script(
        input,
        "",
        "[line 2] Error at 'missing': Undefined property 'missing'.\n",
        FAILURE,
    );
}

#[test]
fn only_instances_have_properties() {
    let input = indoc! {r#"
        var s = "str";
        print s.length;
    "#};
    run_script(
        input,
        "",
        "[line 2] Error at 'length': Only instances have properties.\n",
        FAILURE,
    );
}

#[test]
fn only_instances_have_fields() {
    run_script(
        "123.field = 1;",
        "",
        "[line 1] Error at 'field': Only instances have fields.\n",
        FAILURE,
    );
}

#[test]
fn constructing_takes_no_arguments() {
    let input = indoc! {"
        class C {}
        C(1);
    "};
    run_script(
        input,
        "",
        "[line 2] Error at ')': Expected 0 arguments but got 1.\n",
        FAILURE,
    );
}

#[test]
fn methods_parse_but_instances_only_expose_fields() {
    let input = indoc! {r#"
        class Greeter {
          hello() {
            print "hi";
          }
        }
        var g = Greeter();
        print g;
    "#};
    run_ok(input, "Greeter instance\n");
}
