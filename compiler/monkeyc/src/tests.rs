use super::*;
use pretty_assertions::assert_eq;

#[test]
fn parse_error_report_layout() {
    let report = format_parse_errors(&["first problem", "second problem"]);
    let expected = format!(
        "{MONKEY_FACE}\nWoops! We ran into some monkey business here!\n Parser errors:\n\tfirst problem\n\tsecond problem"
    );
    assert_eq!(report, expected);
}

#[test]
fn monkey_face_is_eleven_lines() {
    assert_eq!(MONKEY_FACE.lines().count(), 11);
    assert!(MONKEY_FACE.ends_with('\n'));
}

#[test]
fn io_errors_name_the_file() {
    let err = commands::run_file("/definitely/not/here.monkey").unwrap_err();
    assert!(err.to_string().starts_with("failed to read '/definitely/not/here.monkey'"));
}
