//! Plain-text field model with indent/unindent editing.
//!
//! Offsets count `char`s, not bytes.

/// Leading spaces removed by one unindent.
const UNINDENT_SPACES: usize = 2;

/// Selection range; `start == end` is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }
}

/// Text value plus selection, as held by an editable surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextField {
    value: String,
    selection: Selection,
}

impl TextField {
    /// New field with the caret at the end.
    pub fn new(value: &str) -> Self {
        let len = value.chars().count();
        Self {
            value: value.to_string(),
            selection: Selection::caret(len),
        }
    }

    pub fn with_selection(mut self, start: usize, end: usize) -> Self {
        self.set_selection(Selection::new(start, end));
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Set the selection, clamped to the value.
    pub fn set_selection(&mut self, selection: Selection) {
        let len = self.len();
        self.selection = Selection::new(selection.start.min(len), selection.end.min(len));
    }

    /// Replace the value, keeping the selection within bounds.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.set_selection(self.selection);
    }

    pub fn select_all(&mut self) {
        self.selection = Selection::new(0, self.len());
    }

    pub fn selected_text(&self) -> String {
        self.value
            .chars()
            .skip(self.selection.start)
            .take(self.selection.end - self.selection.start)
            .collect()
    }

    /// Insert text over the selection, leaving the caret after it.
    pub fn insert(&mut self, text: &str) {
        let Selection { start, end } = self.selection;
        let mut chars: Vec<char> = self.value.chars().collect();
        chars.splice(start..end, text.chars());
        self.value = chars.into_iter().collect();
        self.selection = Selection::caret(start + text.chars().count());
    }

    /// Indent the selected line(s).
    ///
    /// Without a line break in the selection the indent replaces the
    /// selection. Otherwise every line starting inside the selection gets the
    /// indent prepended; the last line only counts if the selection reaches
    /// past its line break.
    pub fn indent(&mut self, unit: &str) {
        let chars: Vec<char> = self.value.chars().collect();
        let Selection { start, end } = self.selection;
        if !chars[start..end].contains(&'\n') {
            self.insert(unit);
            return;
        }

        let starts = line_starts(&chars, start, end);
        let unit: Vec<char> = unit.chars().collect();
        let mut out = Vec::with_capacity(chars.len() + unit.len() * starts.len());
        for (i, c) in chars.iter().enumerate() {
            if starts.contains(&i) {
                out.extend_from_slice(&unit);
            }
            out.push(*c);
        }

        self.value = out.into_iter().collect();
        self.selection = Selection::new(start + unit.len(), end + unit.len() * starts.len());
    }

    /// Remove one indent level (a tab, or up to two spaces) from the start
    /// of each selected line.
    ///
    /// The selection shifts left with the removed text, never past the start
    /// of its line.
    pub fn unindent(&mut self) {
        let chars: Vec<char> = self.value.chars().collect();
        let Selection { start, end } = self.selection;

        let removals: Vec<(usize, usize)> = line_starts(&chars, start, end)
            .into_iter()
            .filter_map(|ls| {
                let n = if chars.get(ls) == Some(&'\t') {
                    1
                } else {
                    chars[ls..].iter().take(UNINDENT_SPACES).take_while(|c| **c == ' ').count()
                };
                (n > 0).then_some((ls, n))
            })
            .collect();
        if removals.is_empty() {
            return;
        }

        let removed = |i: usize| removals.iter().any(|&(p, n)| i >= p && i < p + n);
        self.value = chars
            .iter()
            .enumerate()
            .filter(|(i, _)| !removed(*i))
            .map(|(_, c)| *c)
            .collect();

        let shift = |offset: usize| -> usize {
            let gone: usize = removals
                .iter()
                .map(|&(p, n)| offset.saturating_sub(p).min(n))
                .sum();
            offset - gone
        };
        let new_start = shift(start);
        self.selection = Selection::new(new_start, shift(end).max(new_start));
    }
}

/// Start of the line containing `offset`.
fn line_start(chars: &[char], offset: usize) -> usize {
    chars[..offset]
        .iter()
        .rposition(|c| *c == '\n')
        .map_or(0, |i| i + 1)
}

/// Starts of the lines touched by a selection: the first line always, later
/// lines only when the selection extends beyond their line break.
fn line_starts(chars: &[char], start: usize, end: usize) -> Vec<usize> {
    let first = line_start(chars, start);
    let mut starts = vec![first];
    starts.extend(
        (first..end)
            .filter(|&i| chars[i] == '\n' && i + 1 < end)
            .map(|i| i + 1),
    );
    starts
}
