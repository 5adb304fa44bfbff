//! Raw-terminal driver example using crossterm.
//!
//! Run with: cargo run --example vt100 -- <file>
//!
//! The driver owns the terminal: it enters raw mode, translates crossterm
//! key events into `vi_mini` key events, implements `RenderPort` over
//! stdout, and restores the terminal on the way out. Ctrl-C interrupts the
//! loop without writing; it is not treated as an error.

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode as CKeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use vi_mini::{Editor, KeyCode, KeyEvent, Modifiers, RenderPort};

struct Vt100Port<W: Write> {
    out: W,
}

impl<W: Write> RenderPort for Vt100Port<W> {
    fn clear(&mut self) {
        let _ = queue!(self.out, Clear(ClearType::All));
    }

    fn move_cursor(&mut self, line: usize, col: usize) {
        let _ = queue!(
            self.out,
            cursor::MoveTo(col.saturating_sub(1) as u16, line.saturating_sub(1) as u16)
        );
    }

    fn write_text(&mut self, s: &str) {
        let _ = queue!(self.out, Print(s));
    }

    fn set_underline(&mut self, enabled: bool) {
        let attr = if enabled {
            Attribute::Underlined
        } else {
            Attribute::NoUnderline
        };
        let _ = queue!(self.out, SetAttribute(attr));
    }

    fn next_line(&mut self) {
        let _ = queue!(self.out, cursor::MoveToNextLine(1));
    }
}

fn convert_key(key: event::KeyEvent) -> Option<KeyEvent> {
    let mods = if key.modifiers.contains(KeyModifiers::CONTROL) {
        Modifiers::CTRL
    } else {
        Modifiers::empty()
    };
    let code = match key.code {
        CKeyCode::Char(c) => KeyCode::Char(c),
        CKeyCode::Tab => KeyCode::Char('\t'),
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Backspace => KeyCode::Backspace,
        _ => return None,
    };
    Some(KeyEvent { code, mods })
}

fn run(editor: &mut Editor) -> io::Result<()> {
    let mut port = Vt100Port { out: io::stdout() };
    editor.render_to(&mut port);
    port.out.flush()?;

    while editor.is_running() {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }
        // Interruption exits the loop cleanly.
        if key.code == CKeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            break;
        }
        if let Some(ev) = convert_key(key) {
            editor.handle_key(ev);
        }
        editor.render_to(&mut port);
        port.out.flush()?;
    }
    Ok(())
}

fn main() -> io::Result<()> {
    let Some(filename) = std::env::args().nth(1) else {
        eprintln!("usage: vt100 <file>");
        std::process::exit(2);
    };

    let mut editor = Editor::open(&filename);

    terminal::enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;

    let result = run(&mut editor);

    execute!(
        io::stdout(),
        SetAttribute(Attribute::Reset),
        LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;

    result
}
