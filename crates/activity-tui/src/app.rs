use crate::components::Banner;
use crate::cursor::BoardCursor;
use crate::dialog::{handle_confirm_input, DialogAction};
use crate::events::{Event, EventHandler};
use crate::form::{ActivityForm, FormAction};
use crate::ui;
use activity_client::{BoardSession, ImageUpload, ReconcileEvent};
use activity_core::{ActivityError, ActivityResult};
use activity_domain::{Activity, ActivityId, DragOutcome, DropTarget};
use crossterm::event::{KeyCode, KeyEvent};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

const TICK_RATE: Duration = Duration::from_millis(50);
const BANNER_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    /// An activity is grabbed; `over` is what it was last moved over.
    Dragging { over: DropTarget },
    Form,
    ConfirmDelete(ActivityId),
    Detail,
}

pub struct App {
    session: BoardSession,
    api_base: String,
    pub mode: AppMode,
    pub cursor: BoardCursor,
    pub form: ActivityForm,
    pub detail: Option<Activity>,
    pub banner: Option<Banner>,
    pub should_quit: bool,
}

impl App {
    pub fn new(session: BoardSession, api_base: impl Into<String>) -> Self {
        Self {
            session,
            api_base: api_base.into(),
            mode: AppMode::Normal,
            cursor: BoardCursor::new(),
            form: ActivityForm::create(),
            detail: None,
            banner: None,
            should_quit: false,
        }
    }

    pub fn session(&self) -> &BoardSession {
        &self.session
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn selected(&self) -> Option<&Activity> {
        self.cursor.selected(&self.session.board().groups())
    }

    fn show_error(&mut self, err: &ActivityError) {
        tracing::error!("{}", err);
        self.banner = Some(Banner::from_error(err));
    }

    fn sync_cursor(&mut self) {
        let groups = self.session.board().groups();
        let allow_end = matches!(self.mode, AppMode::Dragging { .. });
        self.cursor.clamp(&groups, allow_end);
    }

    fn focus_on(&mut self, id: &str) {
        let groups = self.session.board().groups();
        if !self.cursor.focus_on(&groups, id) {
            self.cursor.clamp(&groups, false);
        }
    }

    pub async fn reload(&mut self) {
        match self.session.reload().await {
            Ok(()) => self.sync_cursor(),
            Err(e) => self.show_error(&e),
        }
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        if self.banner.as_ref().is_some_and(Banner::is_blocking) {
            self.banner = None;
            return;
        }

        match self.mode.clone() {
            AppMode::Normal => self.handle_normal_key(key).await,
            AppMode::Dragging { over } => self.handle_drag_key(key, over),
            AppMode::Form => self.handle_form_key(key).await,
            AppMode::ConfirmDelete(id) => self.handle_confirm_key(key, id).await,
            AppMode::Detail => {
                if matches!(
                    key.code,
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')
                ) {
                    self.detail = None;
                    self.mode = AppMode::Normal;
                }
            }
        }
    }

    async fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.quit(),
            KeyCode::Char('j') | KeyCode::Down => {
                self.cursor
                    .move_down(&self.session.board().groups(), false)
            }
            KeyCode::Char('k') | KeyCode::Up => self.cursor.move_up(),
            KeyCode::Char('h') | KeyCode::Left => {
                self.cursor
                    .move_left(&self.session.board().groups(), false)
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.cursor
                    .move_right(&self.session.board().groups(), false)
            }
            KeyCode::Char('r') => self.reload().await,
            KeyCode::Char('n') => {
                self.form = ActivityForm::create();
                self.mode = AppMode::Form;
            }
            KeyCode::Char('e') => {
                if let Some(form) = self.selected().map(ActivityForm::edit) {
                    self.form = form;
                    self.mode = AppMode::Form;
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected().map(|a| a.id.clone()) {
                    self.mode = AppMode::ConfirmDelete(id);
                }
            }
            KeyCode::Char('s') => {
                if let Some((id, status)) = self.selected().map(|a| (a.id.clone(), a.status)) {
                    match self.session.change_status(&id, status.cycle()).await {
                        Ok(updated) => {
                            self.focus_on(&id);
                            self.banner = Some(Banner::success(format!(
                                "Moved to {}",
                                updated.status.label()
                            )));
                        }
                        Err(e) => self.show_error(&e),
                    }
                }
            }
            KeyCode::Enter => {
                if let Some(id) = self.selected().map(|a| a.id.clone()) {
                    self.open_detail(&id).await;
                }
            }
            KeyCode::Char(' ') => {
                if let Some(id) = self.selected().map(|a| a.id.clone()) {
                    match self.session.start_drag(&id) {
                        Ok(()) => {
                            self.mode = AppMode::Dragging {
                                over: DropTarget::Item(id),
                            }
                        }
                        Err(e) => self.show_error(&e),
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_drag_key(&mut self, key: KeyEvent, over: DropTarget) {
        let Some(active_id) = self.session.board().active_id().map(str::to_string) else {
            self.mode = AppMode::Normal;
            return;
        };

        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => {
                let outcome = self.session.end_drag(Some(over));
                self.finish_drag(&active_id, &outcome);
            }
            KeyCode::Esc => {
                let outcome = self.session.cancel_drag();
                self.finish_drag(&active_id, &outcome);
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.cursor.move_down(&self.session.board().groups(), true);
                self.hover_cursor(&active_id);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.cursor.move_up();
                self.hover_cursor(&active_id);
            }
            KeyCode::Char('h') | KeyCode::Left => {
                self.cursor.move_left(&self.session.board().groups(), true);
                self.hover_cursor(&active_id);
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.cursor.move_right(&self.session.board().groups(), true);
                self.hover_cursor(&active_id);
            }
            _ => {}
        }
    }

    /// Hovers whatever the cursor points at. A cross-column hover moves the
    /// grabbed activity, and the cursor follows it.
    fn hover_cursor(&mut self, active_id: &str) {
        let target = self.cursor.drop_target(&self.session.board().groups());
        if self.session.hover(target.clone()) {
            let groups = self.session.board().groups();
            self.cursor.focus_on(&groups, active_id);
        }
        self.mode = AppMode::Dragging { over: target };
    }

    fn finish_drag(&mut self, active_id: &str, outcome: &DragOutcome) {
        self.mode = AppMode::Normal;
        self.focus_on(active_id);
        match outcome {
            DragOutcome::Committed(batch) => {
                tracing::debug!("Drag committed, reconciling {} activities", batch.len())
            }
            DragOutcome::Unchanged | DragOutcome::Cancelled => {}
        }
    }

    async fn handle_form_key(&mut self, key: KeyEvent) {
        match self.form.handle_key(key.code) {
            FormAction::None => {}
            FormAction::Cancel => self.mode = AppMode::Normal,
            FormAction::Submit => self.submit_form().await,
        }
    }

    async fn submit_form(&mut self) {
        match self.save_form().await {
            Ok(Some(saved)) => {
                let verb = if self.form.is_edit() { "Updated" } else { "Created" };
                self.banner = Some(Banner::success(format!("{} '{}'", verb, saved.title)));
                self.mode = AppMode::Normal;
                self.focus_on(&saved.id);
            }
            Ok(None) => self.mode = AppMode::Normal,
            Err(e) => self.show_error(&e),
        }
    }

    /// `Ok(None)` when an edit changed nothing.
    async fn save_form(&mut self) -> ActivityResult<Option<Activity>> {
        let image = match self.form.image_path() {
            Some(path) => Some(ImageUpload::from_path(path).await?),
            None => None,
        };

        match self.form.original().map(|a| a.id.clone()) {
            Some(id) => {
                let update = self.form.to_update();
                if update.is_empty() && image.is_none() {
                    return Ok(None);
                }
                self.session.update(&id, update, image).await.map(Some)
            }
            None => self
                .session
                .create(self.form.to_draft(), image)
                .await
                .map(Some),
        }
    }

    async fn handle_confirm_key(&mut self, key: KeyEvent, id: ActivityId) {
        match handle_confirm_input(key.code) {
            DialogAction::Confirm => {
                self.mode = AppMode::Normal;
                match self.session.delete(&id).await {
                    Ok(()) => {
                        self.sync_cursor();
                        self.banner = Some(Banner::success("Activity deleted"));
                    }
                    Err(e) => self.show_error(&e),
                }
            }
            DialogAction::Cancel => self.mode = AppMode::Normal,
            DialogAction::None => {}
        }
    }

    async fn open_detail(&mut self, id: &str) {
        match self.session.fetch(id).await {
            Ok(activity) => {
                self.detail = Some(activity);
                self.mode = AppMode::Detail;
            }
            Err(e) => {
                self.show_error(&e);
                if e.is_not_found() {
                    if let Err(reload_err) = self.session.reload().await {
                        tracing::warn!("Reload after missing activity failed: {}", reload_err);
                    }
                    self.sync_cursor();
                }
            }
        }
    }

    /// Applies finished reconciliations and expires stale banners.
    pub fn on_tick(&mut self) {
        let events = self.session.poll_reconciliations();
        if events
            .iter()
            .any(|event| matches!(event, ReconcileEvent::RolledBack(_)))
        {
            self.sync_cursor();
        }
        if self
            .banner
            .as_ref()
            .is_some_and(|banner| banner.is_expired(BANNER_TTL))
        {
            self.banner = None;
        }
    }

    pub async fn run(&mut self) -> ActivityResult<()> {
        let mut terminal = setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> ActivityResult<()> {
        let mut events = EventHandler::new(TICK_RATE);
        self.reload().await;

        while !self.should_quit {
            terminal.draw(|frame| ui::render(self, frame))?;

            match events.next().await {
                Some(Event::Key(key)) => self.handle_key(key).await,
                Some(Event::Tick) => self.on_tick(),
                None => break,
            }
        }

        events.stop();
        Ok(())
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<(), io::Error> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
