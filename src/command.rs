use std::time::{Duration, Instant};

/// Gap between keystrokes after which a pending command is abandoned.
///
/// Purely advisory debouncing: it stops a stale leading count from
/// combining with an unrelated keystroke typed after a pause.
pub const IDLE_RESET: Duration = Duration::from_millis(500);

/// Accumulates keystrokes into a pending command string.
///
/// The buffer is cleared on escape, on successful dispatch, or when the gap
/// since the previous keystroke exceeds [`IDLE_RESET`].
#[derive(Debug, Clone, Default)]
pub struct CommandParser {
    pending: String,
    last_key: Option<Instant>,
}

impl CommandParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a keystroke, discarding the stale prefix first if the idle
    /// threshold was exceeded.
    pub fn push(&mut self, ch: char, now: Instant) {
        if let Some(prev) = self.last_key
            && now.saturating_duration_since(prev) > IDLE_RESET
        {
            self.pending.clear();
        }
        self.last_key = Some(now);
        self.pending.push(ch);
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.pending
    }

    /// Splits the pending buffer into a repeat count and a command suffix.
    ///
    /// The count is the leading decimal digit run, floored at 1. A literal
    /// leading `0` is excluded: it is itself a motion, not a count.
    pub fn split_count(&self) -> (usize, &str) {
        if !self.pending.starts_with(|c: char| c.is_ascii_digit() && c != '0') {
            return (1, &self.pending);
        }
        let split = self
            .pending
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.pending.len());
        let count = self.pending[..split]
            .bytes()
            .fold(0usize, |acc, d| {
                acc.saturating_mul(10).saturating_add((d - b'0') as usize)
            })
            .max(1);
        (count, &self.pending[split..])
    }
}

/// Cursor motions; always active regardless of mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    WordForward,
    WordEnd,
    WordBackward,
    /// `f<ch>`: land on the next occurrence of `ch` in the current line.
    Find(char),
    /// `t<ch>`: land one column before the next occurrence.
    Till(char),
}

/// Normal-mode actions, invoked `count` times in a uniform loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Write,
    Quit,
    WriteQuit,
    DeleteChar,
    EnterInsert,
    Append,
    EnterVisual,
    Change,
    OpenBelow,
    OpenAbove,
    Checkpoint,
    Undo,
    Redo,
}

/// Visual-mode range operators, also usable as the first key of an
/// operator + motion composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOp {
    Delete,
    Change,
}

/// The move table. Consulted first, in every mode.
pub fn parse_motion(cmd: &str) -> Option<Motion> {
    let mut chars = cmd.chars();
    let head = chars.next()?;
    let tail = chars.as_str();
    let motion = match (head, tail) {
        ('h', "") => Motion::Left,
        ('l', "") => Motion::Right,
        ('k', "") => Motion::Up,
        ('j', "") => Motion::Down,
        ('0', "") => Motion::LineStart,
        ('$', "") => Motion::LineEnd,
        ('w' | 'W', "") => Motion::WordForward,
        ('e' | 'E', "") => Motion::WordEnd,
        ('b' | 'B', "") => Motion::WordBackward,
        ('f', t) if t.chars().count() == 1 => Motion::Find(t.chars().next()?),
        ('t', t) if t.chars().count() == 1 => Motion::Till(t.chars().next()?),
        _ => return None,
    };
    Some(motion)
}

/// The Normal-mode table.
///
/// `W` maps to write here but is shadowed by the `W` word motion, which is
/// consulted first; `:w` is the reachable spelling.
pub fn parse_action(cmd: &str) -> Option<Action> {
    let action = match cmd {
        "W" | ":w" => Action::Write,
        "Q" | ":q" => Action::Quit,
        "\x04" => Action::WriteQuit,
        "x" => Action::DeleteChar,
        "i" => Action::EnterInsert,
        "a" => Action::Append,
        "v" => Action::EnterVisual,
        "s" => Action::Change,
        "o" => Action::OpenBelow,
        "O" => Action::OpenAbove,
        " " => Action::Checkpoint,
        "u" => Action::Undo,
        "\x12" => Action::Redo,
        _ => return None,
    };
    Some(action)
}

/// The Visual-mode range table. `s` doubles as change, mirroring its
/// Normal-mode meaning.
pub fn parse_range_op(key: char) -> Option<RangeOp> {
    match key {
        'd' => Some(RangeOp::Delete),
        'c' | 's' => Some(RangeOp::Change),
        _ => None,
    }
}
