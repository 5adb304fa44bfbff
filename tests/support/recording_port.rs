use vi_mini::RenderPort;

/// One recorded draw command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Clear,
    MoveCursor(usize, usize),
    Text(String),
    Underline(bool),
    NextLine,
}

/// A render port that records every call for assertion.
#[derive(Debug, Default)]
pub struct RecordingPort {
    pub calls: Vec<DrawCall>,
}

impl RecordingPort {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderPort for RecordingPort {
    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn move_cursor(&mut self, line: usize, col: usize) {
        self.calls.push(DrawCall::MoveCursor(line, col));
    }

    fn write_text(&mut self, s: &str) {
        self.calls.push(DrawCall::Text(s.to_string()));
    }

    fn set_underline(&mut self, enabled: bool) {
        self.calls.push(DrawCall::Underline(enabled));
    }

    fn next_line(&mut self) {
        self.calls.push(DrawCall::NextLine);
    }
}
