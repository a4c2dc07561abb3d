/// Visual state of one target character
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharState {
    Correct,
    Incorrect,
    /// Caret guidance: the next character to type
    Current,
    Pending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub state: CharState,
}

/// Project the typed text onto the target, one glyph per target char.
///
/// Characters typed past the end of the target are not visualised; they
/// still count against accuracy in the metrics.
pub fn render(target: &str, typed: &str) -> Vec<Glyph> {
    let typed: Vec<char> = typed.chars().collect();

    target
        .chars()
        .enumerate()
        .map(|(idx, ch)| {
            let state = match typed.get(idx) {
                Some(&t) if t == ch => CharState::Correct,
                Some(_) => CharState::Incorrect,
                None if idx == typed.len() => CharState::Current,
                None => CharState::Pending,
            };
            Glyph { ch, state }
        })
        .collect()
}
