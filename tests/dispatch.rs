use std::time::{Duration, Instant};

use vi_mini::{Editor, IDLE_RESET, KeyEvent, Mode, TextBuffer};

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
fn count_prefix_scales_motion() {
    let mut e = ed(&["abcdefgh"]);
    feed(&mut e, "3l");
    assert_eq!(e.cursor(), (0, 3));
}

#[test]
fn multi_digit_count() {
    let mut e = ed(&["abcdefghijklmnop"]);
    feed(&mut e, "12l");
    assert_eq!(e.cursor(), (0, 12));
}

#[test]
fn idle_gap_discards_stale_count() {
    let mut e = ed(&["abcdefgh"]);
    let base = Instant::now();
    e.handle_key_at(KeyEvent::char('3'), base);
    // A pause beyond the threshold abandons the pending "3".
    e.handle_key_at(KeyEvent::char('l'), base + IDLE_RESET + Duration::from_millis(100));
    assert_eq!(e.cursor(), (0, 1));
}

#[test]
fn quick_succession_keeps_the_count() {
    let mut e = ed(&["abcdefgh"]);
    let base = Instant::now();
    e.handle_key_at(KeyEvent::char('3'), base);
    e.handle_key_at(KeyEvent::char('l'), base + Duration::from_millis(100));
    assert_eq!(e.cursor(), (0, 3));
}

#[test]
fn idle_gap_discards_stale_operator() {
    let mut e = ed(&["abc"]);
    let base = Instant::now();
    e.handle_key_at(KeyEvent::char('d'), base);
    assert_eq!(e.pending_command(), "d");
    // After the pause, x is a plain delete-char, not a "dx" composition.
    e.handle_key_at(KeyEvent::char('x'), base + Duration::from_secs(1));
    assert_eq!(e.buffer().lines(), ["bc"]);
    assert_eq!(e.pending_command(), "");
}

#[test]
fn unmatched_keystrokes_accumulate_quietly() {
    let mut e = ed(&["abc"]);
    feed(&mut e, "zz");
    assert_eq!(e.buffer().lines(), ["abc"]);
    assert_eq!(e.cursor(), (0, 0));
    assert_eq!(e.pending_command(), "zz");
}

#[test]
fn escape_clears_pending_command() {
    let mut e = ed(&["abc"]);
    feed(&mut e, "3d");
    assert_eq!(e.pending_command(), "3d");
    e.handle_key(KeyEvent::esc());
    assert_eq!(e.pending_command(), "");
    assert_eq!(e.mode(), Mode::Normal);
}

#[test]
fn overlong_garbage_resets_the_buffer() {
    let mut e = ed(&["abc"]);
    feed(&mut e, "zzzzzzzzzzz");
    assert_eq!(e.pending_command(), "");
    // The next keystroke starts fresh.
    feed(&mut e, "l");
    assert_eq!(e.cursor(), (0, 1));
}

#[test]
fn quit_commands_stop_the_loop() {
    let mut e = ed(&["abc"]);
    assert!(e.is_running());
    feed(&mut e, "Q");
    assert!(!e.is_running());

    let mut e = ed(&["abc"]);
    feed(&mut e, ":q");
    assert!(!e.is_running());
}

#[test]
fn colon_w_writes_the_file() {
    let path = std::env::temp_dir().join(format!("vi_mini_write_{}.txt", std::process::id()));
    std::fs::write(&path, "hello\n").unwrap();

    let mut e = Editor::open(&path);
    feed(&mut e, "x:w");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "ello\n");

    std::fs::remove_file(&path).ok();
}

#[test]
fn ctrl_d_writes_and_quits_from_insert_mode() {
    let path = std::env::temp_dir().join(format!("vi_mini_wq_{}.txt", std::process::id()));
    std::fs::write(&path, "ab\n").unwrap();

    let mut e = Editor::open(&path);
    feed(&mut e, "i");
    feed(&mut e, "X");
    e.handle_key(KeyEvent::ctrl('d'));
    assert!(!e.is_running());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "Xab\n");

    std::fs::remove_file(&path).ok();
}

#[test]
fn capital_w_is_shadowed_by_the_word_motion() {
    let mut e = ed(&["hello world"]);
    feed(&mut e, "W");
    assert_eq!(e.cursor(), (0, 6));
}

#[test]
fn save_appends_trailing_newlines() {
    let path = std::env::temp_dir().join(format!("vi_mini_save_{}.txt", std::process::id()));
    let buf = TextBuffer::from_lines(vec!["one".into(), "two".into()]);
    buf.save(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    std::fs::remove_file(&path).ok();
}

#[test]
fn load_strips_trailing_newlines() {
    let path = std::env::temp_dir().join(format!("vi_mini_load_{}.txt", std::process::id()));
    std::fs::write(&path, "one\ntwo\n").unwrap();
    let buf = TextBuffer::load(&path);
    assert_eq!(buf.lines(), ["one", "two"]);
    std::fs::remove_file(&path).ok();
}
