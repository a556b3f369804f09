use ratatui::style::Color;

pub const FOCUSED_BORDER: Color = Color::Cyan;
pub const UNFOCUSED_BORDER: Color = Color::White;
pub const DROP_BORDER: Color = Color::Yellow;
pub const SELECTED_BG: Color = Color::Blue;

pub const NORMAL_TEXT: Color = Color::White;
pub const LABEL_TEXT: Color = Color::DarkGray;
pub const HIGHLIGHT_TEXT: Color = Color::Yellow;
pub const GRABBED_TEXT: Color = Color::LightMagenta;

pub const STATUS_PENDING: Color = Color::Yellow;
pub const STATUS_IN_PROGRESS: Color = Color::LightBlue;
pub const STATUS_DONE: Color = Color::Green;

pub const POPUP_BG: Color = Color::Black;
pub const ERROR_COLOR: Color = Color::Red;
pub const SUCCESS_COLOR: Color = Color::Green;
