use assert_cmd::Command;

fn repl() -> Command {
    Command::cargo_bin("rlox").expect("Binary not found")
}

#[test]
fn definitions_persist_across_lines() {
    let mut cmd = repl();
    cmd.write_stdin("var a = 1;\nprint a + 1;\n");
    cmd.assert().success().stdout("> > 2\n> ").stderr("");
}

#[test]
fn functions_defined_earlier_stay_callable() {
    let mut cmd = repl();
    cmd.write_stdin("fun add(a, b) { return a + b; }\nprint add(2, 3);\n");
    cmd.assert().success().stdout("> > 5\n> ").stderr("");
}

#[test]
fn the_session_survives_a_runtime_error() {
    let mut cmd = repl();
    cmd.write_stdin("print missing;\nprint \"still here\";\n");
    cmd.assert()
        .success()
        .stdout("> > still here\n> ")
        .stderr("[line 1] Error at 'missing': Undefined variable 'missing'.\n");
}

#[test]
fn the_session_survives_a_syntax_error() {
    let mut cmd = repl();
    cmd.write_stdin("var = 1;\nprint 2;\n");
    cmd.assert()
        .success()
        .stdout("> > 2\n> ")
        .stderr("[line 1] Error at '=': Expect variable name.\n");
}

#[test]
fn end_of_input_exits_cleanly() {
    let mut cmd = repl();
    cmd.write_stdin("");
    cmd.assert().success().stdout("> ").stderr("");
}
