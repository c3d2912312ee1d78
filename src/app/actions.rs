use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Commands the mode controller reacts to. Any key that maps to `None` is
/// forwarded untouched to whichever component is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// ctrl+c: always quits.
    Quit,
    /// Plain `q`: quits unless a text field owns the keyboard.
    QuitKey,
    NewNote,
    Submit,
    Save,
    ListNotes,
    Delete,
    Cancel,
}

pub fn command_for(key: &KeyEvent) -> Option<Command> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let plain = !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER);
    match key.code {
        KeyCode::Char('c') if ctrl => Some(Command::Quit),
        KeyCode::Char('q') if plain => Some(Command::QuitKey),
        KeyCode::Char('n') if ctrl => Some(Command::NewNote),
        KeyCode::Char('s') if ctrl => Some(Command::Save),
        KeyCode::Char('l') if ctrl => Some(Command::ListNotes),
        KeyCode::Char('d') if ctrl => Some(Command::Delete),
        KeyCode::Enter => Some(Command::Submit),
        KeyCode::Esc => Some(Command::Cancel),
        _ => None,
    }
}

/// Key hints shown at the bottom of the screen.
pub fn help_text() -> &'static str {
    "ctrl+n: new file ⋅ ctrl+l: list files ⋅ ctrl+d: delete ⋅ esc: back ⋅ ctrl+s: save file ⋅ ctrl+c/q: quit"
}
