use super::*;
use pretty_assertions::assert_eq;

#[test]
fn buffer_collects_lines() {
    let handler = buffer_handler();
    handler.println("hello");
    handler.println("");
    handler.println("world");
    assert_eq!(handler.get_output(), "hello\n\nworld\n");
}

#[test]
fn clones_share_one_buffer() {
    let handler = buffer_handler();
    let reader = Rc::clone(&handler);
    handler.println("seen");
    assert_eq!(reader.get_output(), "seen\n");
}

#[test]
fn stdout_captures_nothing() {
    assert_eq!(stdout_handler().get_output(), "");
}
