use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use parcel_track::{
    ModalKind, ModalResult, PackageId, Page, PageEvent, PageUpdate, TrackedPackage,
};

use crate::action::{Action, AppCommand};

/// Number of ticks a status message stays visible.
const STATUS_TICKS: u8 = 12;

/// Transient status message shown in the status bar.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    /// Remaining ticks before the message expires.
    pub ticks_remaining: u8,
}

/// The TUI application state. This is a pure state machine:
/// inputs produce commands (side effects), actions update state.
pub struct App {
    /// Controllers for the list, dialogs and sections.
    pub page: Page,
    /// Backend label for the title bar.
    pub backend_label: String,
    /// Index of the selected row in the package list.
    pub cursor: usize,
    /// Transient feedback message.
    pub status_message: Option<StatusMessage>,
}

impl App {
    pub fn new(packages: Vec<TrackedPackage>, backend_label: String) -> Self {
        Self {
            page: Page::new(packages),
            backend_label,
            cursor: 0,
            status_message: None,
        }
    }

    /// Handle a terminal event, returning a command for the event loop.
    pub fn handle_event(&mut self, event: Event) -> AppCommand {
        match event {
            Event::Key(key) => self.handle_key(key),
            _ => AppCommand::None,
        }
    }

    /// Handle an async action (result from a background task).
    pub fn handle_action(&mut self, action: Action) -> AppCommand {
        match action {
            Action::Completed(completion) => {
                match self.page.complete(completion) {
                    PageUpdate::Modal(kind, ModalResult::Succeeded { package }) => {
                        let text = match kind {
                            ModalKind::TitleInput => format!("Renamed package {package}"),
                            ModalKind::Delete => format!("Deleted package {package}"),
                        };
                        self.set_status(text, false);
                        self.clamp_cursor();
                    }
                    PageUpdate::Modal(_, ModalResult::Failed(_))
                    | PageUpdate::Section(..)
                    | PageUpdate::Stale => {}
                }
                AppCommand::None
            }
        }
    }

    /// Tick the app forward (called on interval). Used for expiring status messages.
    pub fn tick(&mut self) {
        if let Some(msg) = &mut self.status_message {
            if msg.ticks_remaining == 0 {
                self.status_message = None;
            } else {
                msg.ticks_remaining -= 1;
            }
        }
    }

    /// Package under the cursor.
    pub fn selected_package(&self) -> Option<PackageId> {
        self.page.list.rows().get(self.cursor).map(|row| row.id)
    }

    fn handle_key(&mut self, key: KeyEvent) -> AppCommand {
        // Ctrl+C always quits.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppCommand::Quit;
        }

        match self.page.modals.visible() {
            Some(kind) => self.handle_modal_key(kind, key),
            None => self.handle_list_key(key),
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Char('q') => AppCommand::Quit,
            KeyCode::Char('j') | KeyCode::Down => {
                if self.cursor + 1 < self.page.list.rows().len() {
                    self.cursor += 1;
                }
                AppCommand::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                AppCommand::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_section(),
            KeyCode::Char('r') => self.open_modal(ModalKind::TitleInput),
            KeyCode::Char('d') => self.open_modal(ModalKind::Delete),
            _ => AppCommand::None,
        }
    }

    fn handle_modal_key(&mut self, kind: ModalKind, key: KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Esc => {
                if self.page.modals.region(kind).is_submitting() {
                    self.set_status("Request in progress".into(), true);
                } else {
                    self.page.handle(PageEvent::Dismiss(kind));
                }
                AppCommand::None
            }
            KeyCode::Enter => self.issue(PageEvent::Submit(kind)),
            KeyCode::Backspace if kind == ModalKind::TitleInput => {
                if let Some(input) = self.page.modals.input_mut(kind) {
                    input.pop();
                }
                AppCommand::None
            }
            KeyCode::Char(c) if kind == ModalKind::TitleInput => {
                if let Some(input) = self.page.modals.input_mut(kind) {
                    input.push(c);
                }
                AppCommand::None
            }
            _ => AppCommand::None,
        }
    }

    fn toggle_section(&mut self) -> AppCommand {
        let Some(id) = self.selected_package() else {
            return AppCommand::None;
        };
        let expanded = self
            .page
            .accordion
            .section(id)
            .is_some_and(|section| section.is_expanded());

        if expanded {
            self.issue(PageEvent::Collapsed(id))
        } else {
            self.issue(PageEvent::Expanded(id))
        }
    }

    fn open_modal(&mut self, kind: ModalKind) -> AppCommand {
        match self.selected_package() {
            Some(package) => self.issue(PageEvent::Open { package, kind }),
            None => AppCommand::None,
        }
    }

    fn issue(&mut self, event: PageEvent) -> AppCommand {
        match self.page.handle(event) {
            Some(request) => AppCommand::Issue(request),
            None => AppCommand::None,
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.page.list.rows().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    fn set_status(&mut self, text: String, is_error: bool) {
        self.status_message = Some(StatusMessage {
            text,
            is_error,
            ticks_remaining: STATUS_TICKS,
        });
    }
}
