use crate::input::InputState;
use crossterm::event::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    None,
    Cancel,
    Confirm,
}

/// Line editing shared by every text field.
pub fn handle_text_input(input: &mut InputState, key_code: KeyCode) -> DialogAction {
    match key_code {
        KeyCode::Esc => DialogAction::Cancel,
        KeyCode::Enter => DialogAction::Confirm,
        KeyCode::Char(c) => {
            input.insert_char(c);
            DialogAction::None
        }
        KeyCode::Backspace => {
            input.backspace();
            DialogAction::None
        }
        KeyCode::Delete => {
            input.delete();
            DialogAction::None
        }
        KeyCode::Left => {
            input.move_left();
            DialogAction::None
        }
        KeyCode::Right => {
            input.move_right();
            DialogAction::None
        }
        KeyCode::Home => {
            input.move_home();
            DialogAction::None
        }
        KeyCode::End => {
            input.move_end();
            DialogAction::None
        }
        _ => DialogAction::None,
    }
}

/// Yes/no prompts: `y` or Enter confirms, `n` or Esc cancels.
pub fn handle_confirm_input(key_code: KeyCode) -> DialogAction {
    match key_code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => DialogAction::Confirm,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => DialogAction::Cancel,
        _ => DialogAction::None,
    }
}
