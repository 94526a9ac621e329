//! Inventory browser state and main loop
//!
//! Manages the application state and the event loop, and runs enumeration
//! passes in the background so the UI keeps drawing while system_profiler
//! works.

use anyhow::Result;
use classifier::Inventory;
use crossterm::{
    event::{KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use model::{CableSummary, DeviceSummary};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use super::events::{Action, Event, EventHandler};
use super::ui;
use crate::filter::Filter;
use crate::profiler::{ReportSource, inspect};

/// Which list has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Devices,
    Cables,
}

/// Popup drawn over the record table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    /// No dialog open
    None,
    /// Key bindings
    Help,
    /// Details of the selected device or cable
    Details,
}

/// Outcome of one background enumeration pass
pub type RefreshResult = std::result::Result<Inventory, String>;

/// Everything the browser needs to draw a frame
pub struct App {
    /// Last classified inventory, unfiltered
    inventory: Inventory,
    /// Active search and built-in filter
    filter: Filter,
    pane: Pane,
    device_index: usize,
    cable_index: usize,
    dialog: Dialog,
    /// Keystrokes edit the search query
    searching: bool,
    should_quit: bool,
    /// An enumeration pass is running
    refreshing: bool,
    /// A pass was asked for and not started yet
    refresh_requested: bool,
    last_refresh: Option<Instant>,
    last_error: Option<String>,
}

impl App {
    pub fn new(filter: Filter) -> Self {
        Self {
            inventory: Inventory::default(),
            filter,
            pane: Pane::Devices,
            device_index: 0,
            cable_index: 0,
            dialog: Dialog::None,
            searching: false,
            should_quit: false,
            refreshing: false,
            refresh_requested: false,
            last_refresh: None,
            last_error: None,
        }
    }

    /// Devices passing the current filter, in inventory order
    pub fn devices(&self) -> Vec<&DeviceSummary> {
        self.inventory
            .devices
            .iter()
            .filter(|d| self.filter.matches_device(d))
            .collect()
    }

    /// Cables passing the current filter, in inventory order
    pub fn cables(&self) -> Vec<&CableSummary> {
        self.inventory
            .cables
            .iter()
            .filter(|c| self.filter.matches_cable(c))
            .collect()
    }

    pub fn selected_device(&self) -> Option<&DeviceSummary> {
        self.devices().get(self.device_index).copied()
    }

    pub fn selected_cable(&self) -> Option<&CableSummary> {
        self.cables().get(self.cable_index).copied()
    }

    /// Selected row in the focused pane
    pub fn selected_index(&self) -> usize {
        match self.pane {
            Pane::Devices => self.device_index,
            Pane::Cables => self.cable_index,
        }
    }

    pub fn pane(&self) -> Pane {
        self.pane
    }

    pub fn dialog(&self) -> Dialog {
        self.dialog
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn total_devices(&self) -> usize {
        self.inventory.devices.len()
    }

    pub fn total_cables(&self) -> usize {
        self.inventory.cables.len()
    }

    /// Time since the last successful refresh
    pub fn since_refresh(&self) -> Option<Duration> {
        self.last_refresh.map(|at| at.elapsed())
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Route a key press to the search box or the action map
    pub fn handle_key(&mut self, key: KeyEvent) {
        if !self.searching {
            self.handle_action(Action::from(key));
            return;
        }

        if Action::from(key) == Action::ForceQuit {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.searching = false,
            KeyCode::Backspace => {
                self.filter.search.pop();
                self.clamp_selection();
            }
            KeyCode::Char(c) => {
                self.filter.search.push(c);
                self.clamp_selection();
            }
            _ => {}
        }
    }

    /// Apply an action outside of search mode
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                if self.dialog != Dialog::None {
                    self.dialog = Dialog::None;
                } else {
                    self.should_quit = true;
                }
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::CloseDialog => {
                self.dialog = Dialog::None;
            }
            Action::Up => {
                if self.dialog == Dialog::None {
                    let index = self.index_mut();
                    *index = index.saturating_sub(1);
                }
            }
            Action::Down => {
                if self.dialog == Dialog::None {
                    let len = self.visible_len();
                    let index = self.index_mut();
                    if *index + 1 < len {
                        *index += 1;
                    }
                }
            }
            Action::NextPane => {
                if self.dialog == Dialog::None {
                    self.pane = match self.pane {
                        Pane::Devices => Pane::Cables,
                        Pane::Cables => Pane::Devices,
                    };
                }
            }
            Action::ViewDetails => {
                if self.dialog == Dialog::None && self.visible_len() > 0 {
                    self.dialog = Dialog::Details;
                }
            }
            Action::StartSearch => {
                if self.dialog == Dialog::None {
                    self.searching = true;
                }
            }
            Action::ToggleBuiltIn => {
                self.filter.hide_built_in = !self.filter.hide_built_in;
                self.clamp_selection();
            }
            Action::Refresh => {
                if !self.refreshing {
                    self.refresh_requested = true;
                }
            }
            Action::ShowHelp => {
                self.dialog = Dialog::Help;
            }
            Action::None => {}
        }
    }

    /// Take a pending refresh request, marking the pass as started
    pub fn take_refresh_request(&mut self) -> bool {
        if !self.refresh_requested {
            return false;
        }
        self.refresh_requested = false;
        self.refreshing = true;
        true
    }

    /// Store the outcome of a background pass
    ///
    /// A failed pass keeps the previous inventory on screen.
    pub fn finish_refresh(&mut self, result: RefreshResult) {
        self.refreshing = false;
        match result {
            Ok(inventory) => {
                self.inventory = inventory;
                self.last_refresh = Some(Instant::now());
                self.last_error = None;
                self.clamp_selection();
            }
            Err(message) => self.last_error = Some(message),
        }
    }

    fn index_mut(&mut self) -> &mut usize {
        match self.pane {
            Pane::Devices => &mut self.device_index,
            Pane::Cables => &mut self.cable_index,
        }
    }

    fn visible_len(&self) -> usize {
        match self.pane {
            Pane::Devices => self.devices().len(),
            Pane::Cables => self.cables().len(),
        }
    }

    fn clamp_selection(&mut self) {
        let devices = self.devices().len();
        let cables = self.cables().len();
        self.device_index = self.device_index.min(devices.saturating_sub(1));
        self.cable_index = self.cable_index.min(cables.saturating_sub(1));
        if self.dialog == Dialog::Details && self.visible_len() == 0 {
            self.dialog = Dialog::None;
        }
    }
}

/// Raw-mode terminal, restored on drop
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    /// Switch to raw mode on the alternate screen
    pub fn enter(&mut self) -> Result<()> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Give the terminal back to the shell
    pub fn exit(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Draw the UI
    pub fn draw(&mut self, app: &App) -> Result<()> {
        self.terminal.draw(|frame| {
            ui::render(frame, app);
        })?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Start one enumeration pass on the runtime
fn spawn_refresh(source: &ReportSource, tx: &mpsc::UnboundedSender<RefreshResult>) {
    let source = source.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = inspect(&source).await.map_err(|e| format!("{:#}", e));
        // The receiver is gone once the UI has quit
        let _ = tx.send(result);
    });
}

/// Browse the inventory from `source` until the user quits
pub async fn run(source: ReportSource, filter: Filter) -> Result<()> {
    let mut tui = Tui::new()?;
    tui.enter()?;

    let mut app = App::new(filter);
    let (refresh_tx, mut refresh_rx) = mpsc::unbounded_channel();

    // Initial enumeration
    app.handle_action(Action::Refresh);

    // 250ms tick keeps the "last refresh" age current
    let mut events = EventHandler::new(Duration::from_millis(250));

    loop {
        if app.take_refresh_request() {
            spawn_refresh(&source, &refresh_tx);
        }

        tui.draw(&app)?;

        tokio::select! {
            event = events.next() => {
                match event {
                    Some(Event::Key(key)) => app.handle_key(key),
                    // Resize is handled by ratatui on the next draw
                    Some(Event::Resize(_, _)) | Some(Event::Tick) => {}
                    None => break,
                }
            }

            Some(result) = refresh_rx.recv() => {
                app.finish_refresh(result);
            }
        }

        if app.should_quit() {
            break;
        }
    }

    tui.exit()?;

    Ok(())
}
