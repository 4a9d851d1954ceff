//! End-to-end tests for the RowDB statement pipeline.
//!
//! These tests drive a session line by line, the same way the REPL and
//! script replay do, and check the printed output and the store contents.

use rowdb_core::{ErrorKind, Flow, Session, SessionOptions};
use rowdb_test::{table_rows, Harness, ScriptDir};

#[test]
fn test_select_preserves_insertion_order() {
    let mut h = Harness::new();
    h.lines(&[
        "insert 3,carol,carol@x.com",
        "insert 1,alice,alice@x.com",
        "insert 2,bob,bob@x.com",
        "select",
    ]);

    let output = h.take_output();
    let rows = table_rows(&output);
    assert_eq!(rows.len(), 3);
    assert!(rows[0].contains("carol"));
    assert!(rows[1].contains("alice"));
    assert!(rows[2].contains("bob"));
}

#[test]
fn test_values_round_trip_verbatim() {
    let cases = [
        ("insert 0,zero-id,", "│  0 │ zero-id  │       │"),
        ("insert 12, spaced name , mail@x ", "│ 12 │ spaced name │ mail@x │"),
        ("insert 5,,only@email.org", "│  5 │          │ only@email.org │"),
    ];

    for (line, expected_row) in cases {
        let mut h = Harness::new();
        h.lines(&[line, "select"]);
        let output = h.take_output();
        assert_eq!(table_rows(&output), vec![expected_row], "for `{line}`");
    }
}

#[test]
fn test_empty_table_message() {
    let mut h = Harness::new();
    h.line("select");
    assert_eq!(h.take_output(), "Empty table\n");
}

#[test]
fn test_username_column_widens() {
    let mut h = Harness::new();
    h.lines(&["insert 1,maximilianus,m@x", "select"]);

    let output = h.take_output();
    let header = output.lines().next().unwrap();
    assert_eq!(header, "┌ id ┬ username ────┬ email ┐");
    assert_eq!(table_rows(&output), vec!["│  1 │ maximilianus │ m@x   │"]);
}

#[test]
fn test_id_column_widens() {
    let mut h = Harness::new();
    h.lines(&["insert 123456,ann,a@x", "insert 2,bo,b@x", "select"]);

    let output = h.take_output();
    assert_eq!(
        table_rows(&output),
        vec!["│ 123456 │ ann      │ a@x   │", "│      2 │ bo       │ b@x   │"]
    );
    assert!(output.ends_with("└────────┴──────────┴───────┘\n"));
}

#[test]
fn test_rejected_inserts_do_not_mutate_store() {
    let mut session = Session::new();
    let mut out: Vec<u8> = Vec::new();

    let err = session.dispatch("insert 0,,", &mut out).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StatementArgument);

    let err = session
        .dispatch("insert abc,bob,bob@x.com", &mut out)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StatementArgument);

    assert!(session.store().is_empty());
}

#[test]
fn test_unknown_statement() {
    let mut session = Session::new();
    let mut out: Vec<u8> = Vec::new();

    let err = session.dispatch("update 1,x,y", &mut out).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnrecognizedStatement);
}

#[test]
fn test_exit_stops_processing() {
    let mut h = Harness::new();
    let flow = h.lines(&["insert 1,a,a@x", ".exit", "insert 2,b,b@x"]);

    assert_eq!(flow, Flow::Exit);
    assert_eq!(h.take_output(), "bye.\n");
    assert_eq!(h.row_count(), 1);
}

#[test]
fn test_script_tolerates_malformed_insert() {
    let scripts = ScriptDir::new();
    let path = scripts.write("seed.txt", &["insert nope,bad,row", "insert 1,good,row@x"]);

    let mut h = Harness::new();
    h.line(&format!(".script {}", path.display()));

    assert_eq!(h.row_count(), 1);
    let output = h.take_output();
    assert_eq!(output.lines().count(), 1);
    assert!(output.starts_with("Error: COMMAND_ARGUMENTS_PARSE_ERROR"));
}

#[test]
fn test_script_aborts_on_bad_directive() {
    let scripts = ScriptDir::new();
    let path = scripts.write(
        "broken.txt",
        &["insert 1,a,a@x", ".script one,two", "insert 2,b,b@x"],
    );

    let mut h = Harness::new();
    let err = h.script(&path).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DirectiveArgument);
    assert!(err.detail().contains("`.script one,two`"));
    assert_eq!(h.row_count(), 1);
}

#[test]
fn test_script_error_reported_and_session_continues() {
    let scripts = ScriptDir::new();
    let path = scripts.write("broken.txt", &[".nope", "insert 2,b,b@x"]);

    let mut h = Harness::new();
    let flow = h.line(&format!(".script {}", path.display()));
    assert_eq!(flow, Flow::Continue);
    assert!(h.take_output().starts_with("Error: UNRECOGNIZED_META_COMMAND"));

    h.lines(&["insert 9,z,z@x", "select"]);
    let output = h.take_output();
    assert_eq!(table_rows(&output).len(), 1);
}

#[test]
fn test_missing_script_is_script_io_error() {
    let scripts = ScriptDir::new();

    let mut h = Harness::new();
    let err = h.script(&scripts.path("missing.txt")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ScriptIo);

    h.line(&format!(".script {}", scripts.path("missing.txt").display()));
    assert!(h.take_output().starts_with("Error: SCRIPT_IO_ERROR"));
}

#[test]
fn test_nested_scripts() {
    let scripts = ScriptDir::new();
    let inner = scripts.write("inner.txt", &["insert 2,inner,i@x"]);
    let inner_line = format!(".script {}", inner.display());
    let outer = scripts.write(
        "outer.txt",
        &["insert 1,outer,o@x", inner_line.as_str(), "insert 3,after,a@x", "select"],
    );

    let mut h = Harness::new();
    assert_eq!(h.script(&outer).unwrap(), Flow::Continue);

    let output = h.take_output();
    let rows = table_rows(&output);
    assert_eq!(rows.len(), 3);
    assert!(rows[1].contains("inner"));
}

#[test]
fn test_exit_inside_nested_script_ends_session() {
    let scripts = ScriptDir::new();
    let inner = scripts.write("inner.txt", &["insert 2,b,b@x", ".exit"]);
    let inner_line = format!(".script {}", inner.display());
    let outer = scripts.write("outer.txt", &[inner_line.as_str(), "insert 3,c,c@x"]);

    let mut h = Harness::new();
    assert_eq!(h.script(&outer).unwrap(), Flow::Exit);
    assert_eq!(h.row_count(), 1);
    assert_eq!(h.take_output(), "bye.\n");
}

#[test]
fn test_script_nesting_limit() {
    let scripts = ScriptDir::new();
    let path = scripts.path("loop.txt");
    let self_line = format!(".script {}", path.display());
    scripts.write("loop.txt", &["insert 1,a,a@x", self_line.as_str()]);

    let session = Session::with_options(SessionOptions {
        max_script_depth: 5,
    });
    let mut h = Harness::with_session(session);
    let err = h.script(&path).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ScriptIo);
    assert_eq!(h.row_count(), 5);
}

#[test]
fn test_blank_lines_are_unrecognized_statements() {
    let scripts = ScriptDir::new();
    let path = scripts.write("gaps.txt", &["insert 1,a,a@x", "", "insert 2,b,b@x"]);

    let mut h = Harness::new();
    assert_eq!(h.script(&path).unwrap(), Flow::Continue);
    assert_eq!(h.row_count(), 2);
    assert!(h.take_output().starts_with("Error: UNRECOGNIZED_STATEMENT"));
}
