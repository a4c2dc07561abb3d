use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Edit applied to the free-text input field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Insert(char),
    Paste(String),
    Newline,
    DeleteBack,
}

/// User intent decoded from a terminal event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Edit(Edit),
    /// Clear the input and abandon the current attempt
    Cancel,
    /// Start/Restart button: fresh sentence, ready to type
    Restart,
    /// Next Sentence button and the reload shortcut
    NextSentence,
    ResetBest,
    Quit,
}

pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    // crossterm reports releases on some platforms
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'c' | 'q' => Some(Action::Quit),
            'r' | 'n' => Some(Action::NextSentence),
            'b' => Some(Action::ResetBest),
            _ => None,
        },
        KeyCode::Char(c) => Some(Action::Edit(Edit::Insert(c))),
        KeyCode::Enter => Some(Action::Edit(Edit::Newline)),
        KeyCode::Backspace => Some(Action::Edit(Edit::DeleteBack)),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::F(2) => Some(Action::Restart),
        _ => None,
    }
}

pub fn action_for_paste(text: String) -> Action {
    Action::Edit(Edit::Paste(text))
}

/// Raw content of the text input, newlines included
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    pub(crate) content: String,
}

impl InputField {
    pub fn apply(&mut self, edit: Edit) -> &str {
        match edit {
            Edit::Insert(c) => self.content.push(c),
            Edit::Paste(text) => self.content.push_str(&text),
            Edit::Newline => self.content.push('\n'),
            Edit::DeleteBack => {
                self.content.pop();
            }
        }
        &self.content
    }

    pub fn clear(&mut self) {
        self.content.clear();
    }
}
