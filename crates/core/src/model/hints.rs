/// Number of letter tiles available for hints.
pub const HINT_SLOTS: usize = 10;

/// Render view of one hint tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintSlot {
    pub index: usize,
    pub visible: bool,
    pub revealed: bool,
    pub letter: Option<char>,
}

/// Letter tiles for the typing exercise.
///
/// One tile per character of the current word, capped at `HINT_SLOTS`.
/// Characters past the last tile have no hint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HintBoard {
    word: Vec<char>,
    activations: [u32; HINT_SLOTS],
}

impl HintBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Board already showing `word`.
    #[must_use]
    pub fn for_word(word: &str) -> Self {
        let mut board = Self::new();
        board.show_word(word);
        board
    }

    /// Switch to a new word: every tile is covered again and tiles past the
    /// word's length are hidden.
    pub fn show_word(&mut self, word: &str) {
        self.word = word.chars().collect();
        self.activations = [0; HINT_SLOTS];
    }

    /// Number of tiles shown for the current word.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.word.len().min(HINT_SLOTS)
    }

    #[must_use]
    pub fn is_visible(&self, index: usize) -> bool {
        index < self.visible_count()
    }

    /// Click a tile. Returns the uncovered letter, or `None` for tiles that
    /// do not belong to the current word.
    pub fn activate(&mut self, index: usize) -> Option<char> {
        let count = self.activations.get_mut(index)?;
        *count = count.saturating_add(1);
        self.letter(index)
    }

    /// Letter currently shown on a tile.
    #[must_use]
    pub fn letter(&self, index: usize) -> Option<char> {
        let activated = self.activations.get(index).is_some_and(|count| *count > 0);
        if activated && self.is_visible(index) {
            self.word.get(index).copied()
        } else {
            None
        }
    }

    #[must_use]
    pub fn slot(&self, index: usize) -> Option<HintSlot> {
        if index >= HINT_SLOTS {
            return None;
        }
        let letter = self.letter(index);
        Some(HintSlot {
            index,
            visible: self.is_visible(index),
            revealed: letter.is_some(),
            letter,
        })
    }

    pub fn slots(&self) -> impl Iterator<Item = HintSlot> + '_ {
        (0..HINT_SLOTS).filter_map(|index| self.slot(index))
    }

    /// Letters uncovered so far, in tile order.
    #[must_use]
    pub fn revealed_letters(&self) -> Vec<(usize, char)> {
        self.slots()
            .filter_map(|slot| slot.letter.map(|letter| (slot.index, letter)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_follow_word_length() {
        let board = HintBoard::for_word("alma");
        for index in 0..4 {
            assert!(board.is_visible(index), "slot {index} should be visible");
        }
        for index in 4..HINT_SLOTS {
            assert!(!board.is_visible(index), "slot {index} should be hidden");
        }
    }

    #[test]
    fn activating_reveals_letter_at_position() {
        let mut board = HintBoard::for_word("alma");
        assert_eq!(board.letter(2), None);
        assert_eq!(board.activate(2), Some('m'));
        assert_eq!(board.letter(2), Some('m'));
        assert_eq!(board.revealed_letters(), vec![(2, 'm')]);
    }

    #[test]
    fn repeated_clicks_keep_letter_shown() {
        let mut board = HintBoard::for_word("alma");
        assert_eq!(board.activate(1), Some('l'));
        assert_eq!(board.activate(1), Some('l'));
        assert_eq!(board.letter(1), Some('l'));
    }

    #[test]
    fn hidden_tiles_reveal_nothing() {
        let mut board = HintBoard::for_word("alma");
        assert_eq!(board.activate(7), None);
        assert_eq!(board.activate(42), None);
        assert!(board.revealed_letters().is_empty());
    }

    #[test]
    fn new_word_covers_tiles_again() {
        let mut board = HintBoard::for_word("szilva");
        board.activate(5);
        assert_eq!(board.letter(5), Some('a'));

        board.show_word("alma");
        assert_eq!(board.letter(5), None);
        assert!(!board.is_visible(5));
        assert_eq!(board.activate(5), None);
    }

    #[test]
    fn long_words_cap_at_ten_tiles() {
        let mut board = HintBoard::for_word("szamitogepes");
        assert_eq!(board.visible_count(), HINT_SLOTS);
        assert_eq!(board.activate(9), Some('p'));
        assert_eq!(board.activate(10), None);
        assert_eq!(board.slots().count(), HINT_SLOTS);
    }

    #[test]
    fn letters_are_chars_not_bytes() {
        let mut board = HintBoard::for_word("tűz");
        assert_eq!(board.visible_count(), 3);
        assert_eq!(board.activate(1), Some('ű'));
        assert_eq!(board.activate(2), Some('z'));
    }

    #[test]
    fn slot_view_reports_state() {
        let mut board = HintBoard::for_word("alma");
        board.activate(0);
        assert_eq!(
            board.slot(0),
            Some(HintSlot {
                index: 0,
                visible: true,
                revealed: true,
                letter: Some('a'),
            })
        );
        assert_eq!(
            board.slot(6),
            Some(HintSlot {
                index: 6,
                visible: false,
                revealed: false,
                letter: None,
            })
        );
        assert_eq!(board.slot(HINT_SLOTS), None);
    }
}
