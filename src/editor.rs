use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::buffer::TextBuffer;
use crate::command::{
    Action, CommandParser, Motion, RangeOp, parse_action, parse_motion, parse_range_op,
};
use crate::history::History;
use crate::key::{KeyCode, KeyEvent};
use crate::traits::RenderPort;
use crate::types::{Mode, Pointer, Selection};

/// The editing session: buffer, cursor/selection, mode, pending command and
/// history, consumed one keystroke at a time.
///
/// The editor is strictly synchronous; each keystroke is dispatched to
/// completion before the next is read, and the host issues a full re-render
/// through [`Editor::render_to`] after every dispatch.
#[derive(Debug)]
pub struct Editor {
    buffer: TextBuffer,
    selection: Selection,
    mode: Mode,
    parser: CommandParser,
    history: History,
    filename: Option<PathBuf>,
    running: bool,
    skip_checkpoint: bool,
}

impl Editor {
    pub fn new() -> Self {
        let buffer = TextBuffer::new();
        let mut history = History::new();
        history.checkpoint(buffer.lines());
        Self {
            buffer,
            selection: Selection::at(Pointer::new(0, 0)),
            mode: Mode::Normal,
            parser: CommandParser::new(),
            history,
            filename: None,
            running: true,
            skip_checkpoint: false,
        }
    }

    /// Creates an editor over in-memory content, with the initial snapshot
    /// checkpointed. No filename is associated.
    pub fn with_buffer(buffer: TextBuffer) -> Self {
        let mut editor = Self::new();
        editor.buffer = buffer;
        editor.history.reset();
        editor.history.checkpoint(editor.buffer.lines());
        editor
    }

    /// Creates an editor with the given file loaded.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let mut editor = Self::new();
        editor.load(path);
        editor
    }

    /// Loads a file, resetting cursor and history; a missing file yields an
    /// empty buffer.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) {
        self.filename = Some(path.as_ref().to_path_buf());
        self.buffer = TextBuffer::load(path);
        self.selection = Selection::at(Pointer::new(0, 0));
        self.history.reset();
        self.history.checkpoint(self.buffer.lines());
        log::debug!(
            "loaded {:?}: {} lines",
            self.filename,
            self.buffer.line_count()
        );
    }

    /// Writes the buffer back to the loaded file.
    pub fn write_file(&self) -> io::Result<()> {
        match &self.filename {
            Some(path) => {
                self.buffer.save(path)?;
                log::debug!("wrote {:?}", path);
                Ok(())
            }
            None => {
                log::warn!("no filename associated, skipping write");
                Ok(())
            }
        }
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The active position as `(line, effective column)`.
    pub fn cursor(&self) -> (usize, usize) {
        let p = self.selection.active;
        (p.line, p.col(&self.buffer))
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The not-yet-dispatched keystroke suffix.
    pub fn pending_command(&self) -> &str {
        self.parser.as_str()
    }

    /// Consumes one keystroke, timestamped now.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.handle_key_at(key, Instant::now());
    }

    /// Consumes one keystroke with an explicit clock reading; the timestamp
    /// only feeds the idle reset of the pending command buffer.
    pub fn handle_key_at(&mut self, key: KeyEvent, now: Instant) {
        self.skip_checkpoint = false;
        if key.code == KeyCode::Esc {
            self.escape();
            return;
        }
        let Some(ch) = key.raw_char() else { return };
        match self.mode {
            Mode::Normal | Mode::Visual => {
                self.parser.push(ch, now);
                self.dispatch();
            }
            Mode::Insert => self.insert_key(ch),
        }
    }

    /// Parses the pending buffer and consults the command tables in
    /// precedence order: motions, Normal actions, Visual operators, then
    /// operator + motion composition.
    fn dispatch(&mut self) {
        let (count, cmd) = self.parser.split_count();
        let cmd = cmd.to_string();
        log::trace!("dispatch {cmd:?} count {count} mode {:?}", self.mode);

        let mut chars = cmd.chars();
        let head = chars.next();
        let tail = chars.as_str().to_string();

        let matched = if let Some(motion) = parse_motion(&cmd) {
            self.apply_motion(motion, count);
            true
        } else if self.mode == Mode::Normal && let Some(action) = parse_action(&cmd) {
            for _ in 0..count {
                self.run_action(action);
            }
            true
        } else if self.mode == Mode::Visual
            && tail.is_empty()
            && let Some(op) = head.and_then(parse_range_op)
        {
            for _ in 0..count {
                self.run_range_op(op);
            }
            true
        } else if self.mode == Mode::Normal
            && !tail.is_empty()
            && let Some(op) = head.and_then(parse_range_op)
            && let Some(motion) = parse_motion(&tail)
        {
            // Operator-pending composition, e.g. "dw" or "3dfx".
            self.enter_visual();
            self.apply_motion(motion, count);
            self.run_range_op(op);
            true
        } else {
            false
        };

        if matched || cmd.chars().count() > 10 {
            self.parser.clear();
        }
        if !self.skip_checkpoint {
            self.history.checkpoint(self.buffer.lines());
        }
    }

    fn apply_motion(&mut self, motion: Motion, count: usize) {
        // A saturated count must stay a huge positive delta, not wrap.
        let delta = isize::try_from(count).unwrap_or(isize::MAX);
        match motion {
            Motion::Left => self.selection.active.move_by(&self.buffer, 0, -delta),
            Motion::Right => self.selection.active.move_by(&self.buffer, 0, delta),
            Motion::Up => self.selection.active.move_by(&self.buffer, -delta, 0),
            Motion::Down => self.selection.active.move_by(&self.buffer, delta, 0),
            Motion::LineStart => self.selection.active.move_start(),
            Motion::LineEnd => self.selection.active.move_end(&self.buffer),
            Motion::WordForward => {
                for _ in 0..count {
                    self.move_word(false);
                }
            }
            Motion::WordEnd => {
                for _ in 0..count {
                    self.move_word(true);
                }
            }
            Motion::WordBackward => {
                for _ in 0..count {
                    self.move_word_backward();
                }
            }
            Motion::Find(target) => self.find_char(target, count, false),
            Motion::Till(target) => self.find_char(target, count, true),
        }
        if self.mode != Mode::Visual {
            self.selection.sync_anchor();
        }
    }

    fn run_action(&mut self, action: Action) {
        match action {
            Action::Write => {
                if let Err(err) = self.write_file() {
                    log::error!("write failed: {err}");
                }
            }
            Action::Quit => self.running = false,
            Action::WriteQuit => self.write_quit(),
            Action::DeleteChar => self.delete(true),
            Action::EnterInsert => self.enter_insert(),
            Action::Append => self.append(),
            Action::EnterVisual => self.enter_visual(),
            Action::Change => self.change(),
            Action::OpenBelow => self.open_line(1),
            Action::OpenAbove => self.open_line(-1),
            Action::Checkpoint => self.history.checkpoint(self.buffer.lines()),
            Action::Undo => self.undo(),
            Action::Redo => self.redo(),
        }
    }

    fn run_range_op(&mut self, op: RangeOp) {
        match op {
            RangeOp::Delete => self.delete(true),
            RangeOp::Change => self.change(),
        }
    }

    /// Escape: abandon the pending command, leave Insert (landing on the
    /// last typed character) or Visual (collapsing the span), checkpoint.
    fn escape(&mut self) {
        self.parser.clear();
        match self.mode {
            Mode::Insert => {
                self.mode = Mode::Normal;
                self.selection.active.move_by(&self.buffer, 0, -1);
                self.selection.sync_anchor();
            }
            Mode::Visual => {
                self.selection.collapse_to_begin(&self.buffer);
                self.mode = Mode::Normal;
            }
            Mode::Normal => {}
        }
        self.history.checkpoint(self.buffer.lines());
    }

    fn enter_insert(&mut self) {
        self.escape();
        self.mode = Mode::Insert;
    }

    fn append(&mut self) {
        self.selection.active.move_by(&self.buffer, 0, 1);
        self.selection.sync_anchor();
        self.enter_insert();
    }

    fn enter_visual(&mut self) {
        let active = self.selection.active;
        let anchor = Pointer::new(active.line, active.col(&self.buffer));
        self.selection = Selection::at(anchor);
        self.mode = Mode::Visual;
    }

    /// `o` / `O`: open an empty line below or above and enter Insert mode.
    fn open_line(&mut self, dline: isize) {
        let line = self.selection.active.line;
        if dline < 0 {
            self.buffer.insert_empty_line(line);
        } else {
            self.buffer.insert_empty_line(line + 1);
            self.selection.active.move_by(&self.buffer, 1, 0);
        }
        self.selection.active.move_start();
        self.selection.sync_anchor();
        self.enter_insert();
    }

    /// Deletes the current span, end column inclusive. With `collapse` the
    /// selection folds onto its begin position and the mode returns to
    /// Normal; insert-mode backspace passes `false` to keep its state.
    fn delete(&mut self, collapse: bool) {
        let begin = self.selection.begin(&self.buffer);
        let end = self.selection.end(&self.buffer);
        let (bl, bc) = (begin.line, begin.col(&self.buffer));
        let (el, ec) = (end.line, end.col(&self.buffer));
        self.buffer.delete_range((bl, bc), (el, ec));
        if collapse {
            self.selection = Selection::at(Pointer::new(bl, bc));
            self.mode = Mode::Normal;
        }
        self.selection.clamp(&self.buffer);
    }

    fn change(&mut self) {
        self.delete(true);
        self.enter_insert();
    }

    fn undo(&mut self) {
        let mut lines = self.buffer.lines().to_vec();
        self.history.undo(&mut lines);
        self.buffer.replace_lines(lines);
        self.selection.clamp(&self.buffer);
        self.skip_checkpoint = true;
    }

    fn redo(&mut self) {
        let mut lines = self.buffer.lines().to_vec();
        self.history.redo(&mut lines);
        self.buffer.replace_lines(lines);
        self.selection.clamp(&self.buffer);
        self.skip_checkpoint = true;
    }

    fn write_quit(&mut self) {
        if let Err(err) = self.write_file() {
            log::error!("write failed: {err}");
        }
        self.running = false;
    }

    /// Forward word motion, current line only. From a word character: past
    /// the word, then past trailing whitespace (or one short of the boundary
    /// for the end-of-word variant). From whitespace: past the run.
    fn move_word(&mut self, to_end: bool) {
        let line: Vec<char> = self.buffer.line(self.selection.active.line).chars().collect();
        let mut col = self.selection.active.col(&self.buffer);
        if col == line.len() {
            return;
        }
        let began_on_space = line[col].is_whitespace();
        if !began_on_space && to_end {
            col += 1;
        }
        while col < line.len() && line[col].is_whitespace() {
            col += 1;
        }
        if began_on_space {
            self.selection.active.set_col(&self.buffer, col);
            return;
        }
        while col < line.len() && !line[col].is_whitespace() {
            col += 1;
        }
        if to_end {
            self.selection.active.set_col(&self.buffer, col - 1);
            return;
        }
        while col < line.len() && line[col].is_whitespace() {
            col += 1;
        }
        self.selection.active.set_col(&self.buffer, col);
    }

    /// Backward word motion, landing one past the previous word's start (or
    /// at column 0 when the word starts the line).
    fn move_word_backward(&mut self) {
        let line: Vec<char> = self.buffer.line(self.selection.active.line).chars().collect();
        let mut col = self.selection.active.col(&self.buffer);
        if col == line.len() {
            if col == 0 {
                return;
            }
            col -= 1;
        }
        if col > 1 && !line[col].is_whitespace() && line[col - 1].is_whitespace() {
            col -= 1;
        }
        while col > 0 && line[col].is_whitespace() {
            col -= 1;
        }
        while col > 0 && !line[col].is_whitespace() {
            col -= 1;
        }
        if col != 0 {
            col += 1;
        }
        self.selection.active.set_col(&self.buffer, col);
    }

    /// `f` / `t`: search forward in the current line, `count` repetitions,
    /// each starting one past the previous match. Partial application: a
    /// failed repetition keeps the last successful position.
    fn find_char(&mut self, target: char, count: usize, till: bool) {
        let line: Vec<char> = self.buffer.line(self.selection.active.line).chars().collect();
        let mut col = self.selection.active.col(&self.buffer);
        if col == line.len() {
            return;
        }
        let mut found = None;
        for _ in 0..count {
            match line[col + 1..].iter().position(|&c| c == target) {
                Some(offset) => {
                    col += 1 + offset;
                    found = Some(col);
                }
                None => break,
            }
        }
        if let Some(col) = found {
            let col = if till { col - 1 } else { col };
            self.selection.active.set_col(&self.buffer, col);
        }
    }

    fn insert_key(&mut self, ch: char) {
        match ch {
            '\n' => {
                let line = self.selection.active.line;
                let col = self.selection.active.col(&self.buffer);
                self.buffer.split_line(line, col);
                self.selection.active.move_by(&self.buffer, 1, 0);
                self.selection.active.move_start();
                self.selection.sync_anchor();
            }
            '\x7f' => {
                self.delete(false);
                self.selection.active.move_by(&self.buffer, 0, -1);
                self.selection.sync_anchor();
            }
            '\x04' => self.write_quit(),
            '\t' => {
                // Spaces to the next 4-column tab stop, at least one.
                self.insert_text(" ");
                while self.cursor().1 % 4 != 0 {
                    self.insert_text(" ");
                }
            }
            c if !c.is_control() => self.insert_text(&c.to_string()),
            c => {
                let escaped: String = c.escape_default().collect();
                self.insert_text(&escaped);
            }
        }
    }

    fn insert_text(&mut self, text: &str) {
        let line = self.selection.active.line;
        let col = self.selection.active.col(&self.buffer);
        self.buffer.insert_text(line, col, text);
        self.selection
            .active
            .move_by(&self.buffer, 0, text.chars().count() as isize);
        self.selection.sync_anchor();
    }

    /// Issues a full render: clear, every line in order with the Visual span
    /// underlined (end column inclusive), cursor parked on the active
    /// position (1-indexed).
    pub fn render_to<R: RenderPort>(&self, port: &mut R) {
        port.clear();
        port.move_cursor(1, 1);
        let begin = self.selection.begin(&self.buffer);
        let end = self.selection.end(&self.buffer);
        let (bl, bc) = (begin.line, begin.col(&self.buffer));
        let (el, ec) = (end.line, end.col(&self.buffer));
        for lineno in 0..self.buffer.line_count() {
            let len = self.buffer.line_len(lineno);
            if self.mode == Mode::Visual && bl <= lineno && lineno <= el {
                let from = if lineno == bl { bc } else { 0 };
                let to = if lineno == el { (ec + 1).min(len) } else { len };
                port.write_text(self.buffer.slice(lineno, 0, from));
                port.set_underline(true);
                port.write_text(self.buffer.slice(lineno, from, to));
                port.set_underline(false);
                port.write_text(self.buffer.slice(lineno, to, len));
            } else {
                port.write_text(self.buffer.line(lineno));
            }
            port.next_line();
        }
        let (line, col) = self.cursor();
        port.move_cursor(line + 1, col + 1);
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
