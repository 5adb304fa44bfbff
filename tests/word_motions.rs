use vi_mini::{Editor, KeyEvent, TextBuffer};

fn ed(lines: &[&str]) -> Editor {
    Editor::with_buffer(TextBuffer::from_lines(
        lines.iter().map(|s| s.to_string()).collect(),
    ))
}

fn feed(editor: &mut Editor, keys: &str) {
    for c in keys.chars() {
        editor.handle_key(KeyEvent::char(c));
    }
}

#[test]
fn word_forward_lands_on_next_word() {
    // Scenario: "abc def" from column 0.
    let mut e = ed(&["abc def"]);
    feed(&mut e, "w");
    assert_eq!(e.cursor(), (0, 4));
}

#[test]
fn word_forward_from_whitespace_skips_the_run() {
    let mut e = ed(&["a   bc"]);
    feed(&mut e, "l");
    assert_eq!(e.cursor(), (0, 1));
    feed(&mut e, "w");
    assert_eq!(e.cursor(), (0, 4));
}

#[test]
fn word_forward_stops_at_line_end() {
    let mut e = ed(&["abc def", "ghi"]);
    feed(&mut e, "www");
    // Motion never crosses a line boundary.
    assert_eq!(e.cursor(), (0, 7));
}

#[test]
fn word_forward_with_count() {
    let mut e = ed(&["one two three four"]);
    feed(&mut e, "3w");
    assert_eq!(e.cursor(), (0, 14));
}

#[test]
fn word_end_variants() {
    let mut e = ed(&["abc def"]);
    feed(&mut e, "e");
    assert_eq!(e.cursor(), (0, 2));
    feed(&mut e, "e");
    assert_eq!(e.cursor(), (0, 6));
}

#[test]
fn word_backward() {
    let mut e = ed(&["abc def"]);
    feed(&mut e, "$");
    assert_eq!(e.cursor(), (0, 7));
    feed(&mut e, "b");
    assert_eq!(e.cursor(), (0, 4));
    feed(&mut e, "b");
    assert_eq!(e.cursor(), (0, 0));
}

#[test]
fn word_backward_on_empty_line_is_noop() {
    let mut e = ed(&[""]);
    feed(&mut e, "b");
    assert_eq!(e.cursor(), (0, 0));
}

#[test]
fn uppercase_aliases_behave_like_lowercase() {
    let mut e = ed(&["abc def"]);
    feed(&mut e, "W");
    assert_eq!(e.cursor(), (0, 4));
    feed(&mut e, "B");
    assert_eq!(e.cursor(), (0, 0));
    feed(&mut e, "E");
    assert_eq!(e.cursor(), (0, 2));
}

#[test]
fn find_char_lands_on_match() {
    let mut e = ed(&["abc def"]);
    feed(&mut e, "fd");
    assert_eq!(e.cursor(), (0, 4));
}

#[test]
fn till_char_lands_one_before() {
    let mut e = ed(&["abc def"]);
    feed(&mut e, "td");
    assert_eq!(e.cursor(), (0, 3));
}

#[test]
fn find_char_with_count_repeats_search() {
    let mut e = ed(&["axbxcx"]);
    feed(&mut e, "2fx");
    assert_eq!(e.cursor(), (0, 3));
}

#[test]
fn find_char_absent_leaves_cursor_unchanged() {
    // Scenario: target absent in the remainder of the line.
    let mut e = ed(&["abc def"]);
    feed(&mut e, "ll");
    assert_eq!(e.cursor(), (0, 2));
    feed(&mut e, "fz");
    assert_eq!(e.cursor(), (0, 2));
}

#[test]
fn find_char_partial_application_keeps_last_match() {
    // Only two matches ahead; the third repetition fails and the cursor
    // stays on the second match.
    let mut e = ed(&["axbx"]);
    feed(&mut e, "9fx");
    assert_eq!(e.cursor(), (0, 3));
}

#[test]
fn find_char_searches_current_line_only() {
    let mut e = ed(&["abc", "xyz"]);
    feed(&mut e, "fx");
    assert_eq!(e.cursor(), (0, 0));
}

#[test]
fn escape_cancels_pending_find() {
    let mut e = ed(&["abc"]);
    feed(&mut e, "f");
    assert_eq!(e.pending_command(), "f");
    e.handle_key(KeyEvent::esc());
    assert_eq!(e.pending_command(), "");
    feed(&mut e, "b");
    // 'b' dispatches as word-backward, not as a find target.
    assert_eq!(e.cursor(), (0, 0));
}
