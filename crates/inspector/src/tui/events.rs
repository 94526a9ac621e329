//! Keyboard input for the inventory browser

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time;

#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    /// Redraw even without input, so the refresh age keeps moving
    Tick,
}

/// User actions derived from keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Close the open dialog, or leave when none is open
    Quit,
    /// Leave immediately, whatever is open
    ForceQuit,
    Up,
    Down,
    /// Switch between the device and cable panes
    NextPane,
    /// View details of the selected record
    ViewDetails,
    /// Start editing the search query
    StartSearch,
    /// Show or hide built-in devices
    ToggleBuiltIn,
    /// Re-run the enumeration
    Refresh,
    ShowHelp,
    /// Leave search mode or close the open dialog
    CloseDialog,
    None,
}

impl From<KeyEvent> for Action {
    fn from(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Action::ForceQuit
            }
            KeyCode::Esc => Action::CloseDialog,

            KeyCode::Up | KeyCode::Char('k') => Action::Up,
            KeyCode::Down | KeyCode::Char('j') => Action::Down,
            KeyCode::Tab | KeyCode::BackTab => Action::NextPane,

            KeyCode::Enter => Action::ViewDetails,
            KeyCode::Char('/') => Action::StartSearch,
            KeyCode::Char('b') => Action::ToggleBuiltIn,
            KeyCode::Char('r') => Action::Refresh,
            KeyCode::Char('?') => Action::ShowHelp,

            _ => Action::None,
        }
    }
}

/// How long the reader thread blocks before checking whether to stop
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Terminal input plus a periodic tick
///
/// crossterm's `poll` blocks, so input is read on the blocking pool and
/// forwarded over a channel. Ticks come from a tokio interval.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    ticks: time::Interval,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::task::spawn_blocking(move || read_terminal(&tx));

        let mut ticks = time::interval(tick_rate);
        ticks.set_missed_tick_behavior(time::MissedTickBehavior::Skip);

        Self { rx, ticks }
    }

    /// Next input event, or a tick if nothing arrived in time
    ///
    /// Returns None once the reader has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        tokio::select! {
            event = self.rx.recv() => event,
            _ = self.ticks.tick() => Some(Event::Tick),
        }
    }
}

/// Forward key presses and resizes until the receiver goes away
fn read_terminal(tx: &mpsc::UnboundedSender<Event>) {
    while !tx.is_closed() {
        match event::poll(POLL_INTERVAL) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(_) => return,
        }

        let forwarded = match event::read() {
            // Release and repeat events are reported on some platforms
            Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                tx.send(Event::Key(key))
            }
            Ok(CrosstermEvent::Resize(width, height)) => tx.send(Event::Resize(width, height)),
            Ok(_) => Ok(()),
            Err(_) => return,
        };
        if forwarded.is_err() {
            return;
        }
    }
}
