/// Ordered whole-buffer snapshots with content-comparison navigation.
///
/// No explicit cursor is stored; the current position is recomputed on each
/// undo/redo by scanning from the newest snapshot backward for the first one
/// equal to the live buffer. O(history length) per call; assumes identical
/// snapshots only ever occur adjacently, which `checkpoint`'s dedup
/// guarantees.
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: Vec<Vec<String>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn latest(&self) -> Option<&[String]> {
        self.snapshots.last().map(Vec::as_slice)
    }

    pub fn reset(&mut self) {
        self.snapshots.clear();
    }

    /// Appends a snapshot unless it equals the most recent one.
    pub fn checkpoint(&mut self, lines: &[String]) {
        if self.snapshots.last().is_none_or(|last| last != lines) {
            self.snapshots.push(lines.to_vec());
        }
    }

    /// Index of the newest snapshot equal to the live buffer, if any.
    fn position(&self, lines: &[String]) -> Option<usize> {
        self.snapshots.iter().rposition(|s| s == lines)
    }

    /// Replaces `lines` with the snapshot preceding the current position.
    ///
    /// If the live content matches no snapshot (it diverged without an
    /// intervening checkpoint), a checkpoint is forced first so the
    /// divergent state is not lost. At the oldest snapshot this is a no-op.
    pub fn undo(&mut self, lines: &mut Vec<String>) {
        let idx = match self.position(lines) {
            Some(idx) => idx,
            None => {
                self.checkpoint(lines);
                self.snapshots.len() - 1
            }
        };
        if idx > 0 {
            *lines = self.snapshots[idx - 1].clone();
            log::debug!("undo to snapshot {}", idx - 1);
        }
    }

    /// Replaces `lines` with the next-newer snapshot, if one exists.
    pub fn redo(&mut self, lines: &mut Vec<String>) {
        if let Some(idx) = self.position(lines)
            && idx + 1 < self.snapshots.len()
        {
            *lines = self.snapshots[idx + 1].clone();
            log::debug!("redo to snapshot {}", idx + 1);
        }
    }
}
