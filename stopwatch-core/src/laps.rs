use std::iter::Rev;
use std::slice::Iter;

/// Newest-first view over the recorded laps.
pub type MostRecentFirst<'a> = Rev<Iter<'a, LapEntry>>;

/// One recorded split. Never modified after creation.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LapEntry {
    index: u32,
    label: String,
}

impl LapEntry {
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The time exactly as it was displayed when the lap was taken.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Ordered lap history. Storage is oldest first.
#[derive(Default, Debug)]
pub struct LapRecorder {
    entries: Vec<LapEntry>,
    counter: u32,
}

impl LapRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a lap carrying `label` verbatim and returns it.
    ///
    /// Whether a lap may be taken at all is decided by the owner, which
    /// knows the clock phase.
    pub fn record(&mut self, label: &str) -> &LapEntry {
        self.counter += 1;
        self.entries.push(LapEntry {
            index: self.counter,
            label: label.to_owned(),
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.counter = 0;
    }

    pub fn entries_most_recent_first(&self) -> MostRecentFirst<'_> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the most recent lap, 0 when none has been taken.
    pub fn last_index(&self) -> u32 {
        self.counter
    }
}
