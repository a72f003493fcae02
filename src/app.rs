//! Interactive state and key handling for the terminal front end.

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::TableState;
use tracing::{error, info};

use crate::clipboard::Clipboard;
use crate::form::Field;
use crate::location::History;
use crate::report::export_to_csv;
use crate::storage::Storage;
use crate::sync::StateSynchronizer;

pub const TOAST_DURATION: Duration = Duration::from_millis(3000);
pub const CSV_EXPORT_PATH: &str = "mortgage_costs.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

/// A short-lived notification drawn over the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
    pub expires_at: Instant,
}

impl Toast {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        variant: ToastVariant,
        now: Instant,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant,
            expires_at: now + TOAST_DURATION,
        }
    }
}

pub struct App<S, H> {
    pub sync: StateSynchronizer<S, H>,
    pub focus: Field,
    /// Text as typed, one per field, indexed by `Field::index`.
    pub inputs: [String; 5],
    pub table_state: TableState,
    pub toast: Option<Toast>,
    clipboard: Box<dyn Clipboard>,
    csv_path: PathBuf,
}

impl<S: Storage, H: History> App<S, H> {
    pub fn new(sync: StateSynchronizer<S, H>, clipboard: Box<dyn Clipboard>) -> Self {
        let inputs = Field::ALL.map(|field| sync.values().display(field));
        let mut app = Self {
            sync,
            focus: Field::MortgageAmount,
            inputs,
            table_state: TableState::default(),
            toast: None,
            clipboard,
            csv_path: PathBuf::from(CSV_EXPORT_PATH),
        };
        app.select_current_row();
        app
    }

    pub fn with_csv_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.csv_path = path.into();
        self
    }

    pub fn input(&self, field: Field) -> &str {
        &self.inputs[field.index()]
    }

    /// Handles one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return key.code == KeyCode::Char('c');
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                self.inputs[self.focus.index()].push(c);
                self.commit_focused();
            }
            KeyCode::Backspace => {
                if self.inputs[self.focus.index()].pop().is_some() {
                    self.commit_focused();
                }
            }
            KeyCode::Char('s') | KeyCode::Char('S') => self.copy_link(Instant::now()),
            KeyCode::Char('e') | KeyCode::Char('E') => self.export_csv(Instant::now()),
            _ => {}
        }
        false
    }

    /// Drops the toast once it has been on screen long enough.
    pub fn tick(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| now >= t.expires_at) {
            self.toast = None;
        }
    }

    /// Copies the full current address. Never touches the form values.
    pub fn copy_link(&mut self, now: Instant) {
        let outcome = self
            .sync
            .share_url()
            .map_err(anyhow::Error::from)
            .and_then(|url| {
                self.clipboard.write_text(&url)?;
                Ok(url)
            });

        self.toast = Some(match outcome {
            Ok(url) => {
                info!(%url, "link copied");
                Toast::new(
                    "URL Copied!",
                    "The calculator URL has been copied to your clipboard.",
                    ToastVariant::Default,
                    now,
                )
            }
            Err(error) => {
                error!(%error, "could not copy URL");
                Toast::new(
                    "Error",
                    "Failed to copy URL to clipboard.",
                    ToastVariant::Destructive,
                    now,
                )
            }
        });
    }

    pub fn export_csv(&mut self, now: Instant) {
        let toast = match export_to_csv(&self.csv_path, self.sync.results()) {
            Ok(()) => {
                info!(path = %self.csv_path.display(), "results exported");
                Toast::new(
                    "Exported",
                    format!("Results written to {}.", self.csv_path.display()),
                    ToastVariant::Default,
                    now,
                )
            }
            Err(error) => {
                error!(error = %format!("{error:#}"), "CSV export failed");
                Toast::new(
                    "Error",
                    "Failed to export results.",
                    ToastVariant::Destructive,
                    now,
                )
            }
        };
        self.toast = Some(toast);
    }

    fn commit_focused(&mut self) {
        let field = self.focus;
        let raw = self.inputs[field.index()].clone();
        self.sync.update(field, &raw);
        self.select_current_row();
    }

    fn select_current_row(&mut self) {
        let current = self
            .sync
            .results()
            .iter()
            .position(|row| row.is_current_amount);
        self.table_state.select(current);
    }
}
