use crate::app::{App, AppMode};
use crate::components::*;
use crate::form::FormField;
use crate::input::InputState;
use crate::theme::*;
use activity_client::image_url;
use activity_domain::{Activity, ActivityStatus, DropTarget};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_header(app, frame, chunks[0]);
    render_columns(app, frame, chunks[1]);
    render_footer(app, frame, chunks[2]);

    match &app.mode {
        AppMode::Form => render_form_popup(app, frame),
        AppMode::ConfirmDelete(id) => {
            let title = app
                .session()
                .board()
                .get(id)
                .map(|a| a.title.as_str())
                .unwrap_or(id.as_str());
            render_confirm_popup(
                frame,
                "Delete Activity",
                &format!("Delete '{}'? This cannot be undone.", title),
            );
        }
        AppMode::Detail => render_detail_popup(app, frame),
        AppMode::Normal | AppMode::Dragging { .. } => {}
    }

    if let Some(banner) = &app.banner {
        banner.render(frame, frame.area());
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let groups = app.session().board().groups();
    let mut spans = vec![
        Span::styled("Activity Board", bold_highlight()),
        Span::styled(format!("  Total de {} atividades", groups.total()), normal_text()),
    ];
    let pending = app.session().pending_reconciliations();
    if pending > 0 {
        spans.push(Span::styled(format!("  saving ({})", pending), label_text()));
    }
    spans.push(Span::styled(format!("  {}", app.api_base()), label_text()));

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_columns(app: &App, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (status, chunk) in ActivityStatus::ALL.into_iter().zip(chunks.iter()) {
        render_column(app, frame, *chunk, status);
    }
}

fn render_column(app: &App, frame: &mut Frame, area: Rect, status: ActivityStatus) {
    let board = app.session().board();
    let groups = board.groups();
    let items = groups.get(status);
    let focused = app.cursor.column() == status;
    let active_id = board.active_id();
    let over = match &app.mode {
        AppMode::Dragging { over } => Some(over),
        _ => None,
    };

    let over_this_column = over.and_then(|target| board.container_of(target)) == Some(status);
    let border_style = if over_this_column {
        drop_border()
    } else if focused {
        focused_border()
    } else {
        unfocused_border()
    };

    let title = Line::from(vec![
        Span::styled(format!(" {} ", status.label()), status_style(status)),
        Span::styled(format!("({}) ", items.len()), label_text()),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    let width = area.width.saturating_sub(4) as usize;
    let mut list_items: Vec<ListItem> = items
        .iter()
        .map(|activity| {
            let is_target = over == Some(&DropTarget::Item(activity.id.clone()));
            activity_item(activity, active_id == Some(activity.id.as_str()), is_target, width)
        })
        .collect();

    if over == Some(&DropTarget::Container(status)) {
        list_items.push(ListItem::new(Line::styled("▸ drop here", highlight_text())));
    } else if items.is_empty() {
        list_items.push(ListItem::new(Line::styled("No activities", label_text())));
    }

    let mut state = ListState::default();
    if focused {
        state.select(Some(app.cursor.row()));
    }

    let list = List::new(list_items)
        .block(block)
        .highlight_style(selected_item());
    frame.render_stateful_widget(list, area, &mut state);
}

fn activity_item(activity: &Activity, grabbed: bool, is_target: bool, width: usize) -> ListItem<'static> {
    let marker = if grabbed {
        "» "
    } else if is_target {
        "▸ "
    } else {
        "  "
    };
    let title_style = if grabbed {
        grabbed_item()
    } else if is_target {
        highlight_text()
    } else {
        normal_text().add_modifier(Modifier::BOLD)
    };

    let mut title = vec![
        Span::styled(marker, title_style),
        Span::styled(activity.title.clone(), title_style),
    ];
    if activity.has_image() {
        title.push(Span::styled(" [img]", label_text()));
    }

    let description = Line::styled(
        format!("  {}", truncate(&activity.description, width.saturating_sub(2))),
        label_text(),
    );
    ListItem::new(Text::from(vec![Line::from(title), description]))
}

fn truncate(text: &str, max: usize) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    if first_line.chars().count() <= max {
        return first_line.to_string();
    }
    let kept: String = first_line.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let help_text = match &app.mode {
        AppMode::Normal => {
            "n: new | e: edit | d: delete | s: status | ENTER: details | SPACE: grab | r: reload | q: quit"
        }
        AppMode::Dragging { .. } => "←↓↑→/hjkl: move | SPACE/ENTER: drop | ESC: cancel",
        AppMode::Form => "TAB: next field | ←/→: status | ENTER: save | ESC: cancel",
        AppMode::ConfirmDelete(_) => "y/ENTER: delete | n/ESC: cancel",
        AppMode::Detail => "ESC/ENTER: back",
    };
    let help = Paragraph::new(help_text)
        .style(label_text())
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}

fn render_form_popup(app: &App, frame: &mut Frame) {
    let form = &app.form;
    let title = if form.is_edit() {
        "Edit Activity"
    } else {
        "New Activity"
    };
    let inner = render_popup_with_block(frame, title, 60, 70);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    render_text_field(frame, chunks[0], "Title", &form.title, form.focus == FormField::Title);
    render_text_field(
        frame,
        chunks[1],
        "Description",
        &form.description,
        form.focus == FormField::Description,
    );

    let status_line = Line::from(
        ActivityStatus::ALL
            .into_iter()
            .flat_map(|status| {
                let style = if status == form.status {
                    status_style(status).add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    label_text()
                };
                [Span::styled(format!(" {} ", status.label()), style), Span::raw(" ")]
            })
            .collect::<Vec<_>>(),
    );
    let status_widget = Paragraph::new(status_line).block(field_block(
        "Status",
        form.focus == FormField::Status,
    ));
    frame.render_widget(status_widget, chunks[2]);

    let image_label = match form.original().and_then(|a| a.image_path.as_deref()) {
        Some(current) => format!("Image file (current: {})", current),
        None => "Image file (.jpg .jpeg .png .gif .webp)".to_string(),
    };
    render_text_field(
        frame,
        chunks[3],
        &image_label,
        &form.image_path,
        form.focus == FormField::Image,
    );

    if let (Some(input), Some(area)) = (form.focused_input(), focused_area(form.focus, &chunks)) {
        let max_x = area.x + area.width.saturating_sub(2);
        let cursor_x = (area.x + 1 + input.cursor_pos() as u16).min(max_x);
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

fn focused_area(field: FormField, chunks: &[Rect]) -> Option<Rect> {
    match field {
        FormField::Title => chunks.first().copied(),
        FormField::Description => chunks.get(1).copied(),
        FormField::Status => None,
        FormField::Image => chunks.get(3).copied(),
    }
}

fn field_block(label: &str, focused: bool) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            focused_border()
        } else {
            unfocused_border()
        })
        .title(label)
}

fn render_text_field(frame: &mut Frame, area: Rect, label: &str, input: &InputState, focused: bool) {
    let widget = Paragraph::new(input.as_str())
        .style(normal_text())
        .block(field_block(label, focused));
    frame.render_widget(widget, area);
}

fn render_detail_popup(app: &App, frame: &mut Frame) {
    let Some(activity) = &app.detail else {
        return;
    };
    let inner = render_popup_with_block(frame, "Activity", 70, 70);

    let mut lines = vec![
        Line::from(Span::styled(activity.title.clone(), bold_highlight())),
        Line::from(vec![
            Span::styled("Status: ", label_text()),
            Span::styled(activity.status.label(), status_style(activity.status)),
        ]),
        Line::from(vec![
            Span::styled("Created: ", label_text()),
            Span::styled(
                activity.created_at.format("%Y-%m-%d %H:%M").to_string(),
                normal_text(),
            ),
            Span::styled("  Updated: ", label_text()),
            Span::styled(
                activity.updated_at.format("%Y-%m-%d %H:%M").to_string(),
                normal_text(),
            ),
        ]),
    ];
    if let Some(url) = activity
        .image_path
        .as_deref()
        .and_then(|path| image_url(app.api_base(), path))
    {
        lines.push(Line::from(vec![
            Span::styled("Image: ", label_text()),
            Span::styled(url, highlight_text()),
        ]));
    }
    lines.push(Line::raw(""));
    lines.extend(activity.description.lines().map(|l| Line::styled(l.to_string(), normal_text())));

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(widget, inner);
}
