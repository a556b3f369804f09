use crate::dialog::{handle_text_input, DialogAction};
use crate::input::InputState;
use activity_domain::{Activity, ActivityDraft, ActivityStatus, ActivityUpdate};
use crossterm::event::KeyCode;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Status,
    Image,
}

impl FormField {
    const ORDER: [FormField; 4] = [
        FormField::Title,
        FormField::Description,
        FormField::Status,
        FormField::Image,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Cancel,
    Submit,
}

/// State of the create/edit popup.
#[derive(Debug, Clone)]
pub struct ActivityForm {
    original: Option<Activity>,
    pub title: InputState,
    pub description: InputState,
    pub status: ActivityStatus,
    pub image_path: InputState,
    pub focus: FormField,
}

impl Default for ActivityForm {
    fn default() -> Self {
        Self::create()
    }
}

impl ActivityForm {
    pub fn create() -> Self {
        Self {
            original: None,
            title: InputState::new(),
            description: InputState::new(),
            status: ActivityStatus::default(),
            image_path: InputState::new(),
            focus: FormField::Title,
        }
    }

    pub fn edit(activity: &Activity) -> Self {
        Self {
            original: Some(activity.clone()),
            title: InputState::with_text(activity.title.clone()),
            description: InputState::with_text(activity.description.clone()),
            status: activity.status,
            image_path: InputState::new(),
            focus: FormField::Title,
        }
    }

    /// The activity being edited; `None` for a new one.
    pub fn original(&self) -> Option<&Activity> {
        self.original.as_ref()
    }

    pub fn is_edit(&self) -> bool {
        self.original.is_some()
    }

    pub fn focused_input(&self) -> Option<&InputState> {
        match self.focus {
            FormField::Title => Some(&self.title),
            FormField::Description => Some(&self.description),
            FormField::Image => Some(&self.image_path),
            FormField::Status => None,
        }
    }

    fn focused_input_mut(&mut self) -> Option<&mut InputState> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Image => Some(&mut self.image_path),
            FormField::Status => None,
        }
    }

    pub fn handle_key(&mut self, key_code: KeyCode) -> FormAction {
        match key_code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                return FormAction::None;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                return FormAction::None;
            }
            _ => {}
        }

        if self.focus == FormField::Status {
            return match key_code {
                KeyCode::Esc => FormAction::Cancel,
                KeyCode::Enter => FormAction::Submit,
                KeyCode::Right | KeyCode::Char(' ') | KeyCode::Char('l') => {
                    self.status = self.status.cycle();
                    FormAction::None
                }
                KeyCode::Left | KeyCode::Char('h') => {
                    self.status = self.status.cycle().cycle();
                    FormAction::None
                }
                _ => FormAction::None,
            };
        }

        match self.focused_input_mut() {
            Some(input) => match handle_text_input(input, key_code) {
                DialogAction::Confirm => FormAction::Submit,
                DialogAction::Cancel => FormAction::Cancel,
                DialogAction::None => FormAction::None,
            },
            None => FormAction::None,
        }
    }

    pub fn to_draft(&self) -> ActivityDraft {
        ActivityDraft::new(self.title.as_str(), self.description.as_str()).with_status(self.status)
    }

    /// Only the fields that differ from the activity being edited.
    pub fn to_update(&self) -> ActivityUpdate {
        let Some(original) = &self.original else {
            return ActivityUpdate {
                title: Some(self.title.as_str().to_string()),
                description: Some(self.description.as_str().to_string()),
                status: Some(self.status),
            };
        };
        ActivityUpdate {
            title: (self.title.as_str() != original.title).then(|| self.title.as_str().to_string()),
            description: (self.description.as_str() != original.description)
                .then(|| self.description.as_str().to_string()),
            status: (self.status != original.status).then_some(self.status),
        }
    }

    pub fn image_path(&self) -> Option<PathBuf> {
        let raw = self.image_path.as_str().trim();
        (!raw.is_empty()).then(|| PathBuf::from(raw))
    }
}
