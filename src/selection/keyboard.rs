/// Keys the canvas reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Other,
}

impl Key {
    pub fn is_delete(self) -> bool {
        matches!(self, Key::Delete | Key::Backspace)
    }
}

/// Where keyboard focus was when a key was pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Canvas,
    TextInput,
    TextArea,
}

impl Focus {
    /// Text controls own their Delete/Backspace presses.
    pub fn is_text_entry(self) -> bool {
        matches!(self, Focus::TextInput | Focus::TextArea)
    }
}
