//! Drawing the inventory browser
//!
//! Implements the visual layout: status bar, device or cable table, help bar
//! and the dialogs drawn on top.

use model::{CableSummary, DataPowerState, DeviceSummary, VideoCapability};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};
use std::time::Duration;

use super::app::{App, Dialog, Pane};
use crate::render::{cable_fields, device_fields};

/// Draw one frame of the browser
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Status bar
            Constraint::Min(8),    // Record list
            Constraint::Length(3), // Help bar / search box
        ])
        .split(frame.area());

    render_status_bar(frame, app, chunks[0]);
    match app.pane() {
        Pane::Devices => render_device_list(frame, app, chunks[1]),
        Pane::Cables => render_cable_list(frame, app, chunks[1]),
    }
    if app.is_searching() {
        render_search_box(frame, app, chunks[2]);
    } else {
        render_help_bar(frame, chunks[2]);
    }

    match app.dialog() {
        Dialog::None => {}
        Dialog::Help => render_help_dialog(frame),
        Dialog::Details => render_details_dialog(frame, app),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let refreshed = if app.is_refreshing() {
        Span::styled("refreshing...", Style::default().fg(Color::Yellow))
    } else {
        match app.since_refresh() {
            Some(age) => Span::styled(
                format!("{} ago", format_duration(age)),
                Style::default().fg(Color::Green),
            ),
            None => Span::styled("never", Style::default().fg(Color::DarkGray)),
        }
    };

    let mut status_text = vec![
        Span::styled("Devices: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{}/{}", app.devices().len(), app.total_devices()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  |  "),
        Span::styled("Cables: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{}/{}", app.cables().len(), app.total_cables()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  |  "),
        Span::styled("Refreshed: ", Style::default().fg(Color::DarkGray)),
        refreshed,
    ];
    if app.filter().hide_built_in {
        status_text.push(Span::raw("  |  "));
        status_text.push(Span::styled(
            "built-in hidden",
            Style::default().fg(Color::Magenta),
        ));
    }
    if let Some(error) = app.last_error() {
        status_text.push(Span::raw("  |  "));
        status_text.push(Span::styled(
            format!("Error: {}", error),
            Style::default().fg(Color::Red),
        ));
    }

    let status = Paragraph::new(Line::from(status_text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" USB Inspector ")
                .title_alignment(Alignment::Center)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(status, area);
}

fn header_row(titles: &[&'static str]) -> Row<'static> {
    let cells = titles.iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });
    Row::new(cells).height(1)
}

fn list_block(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Blue))
}

fn highlight_style() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

fn table_state(len: usize, selected: usize) -> TableState {
    let mut state = TableState::default();
    if len > 0 {
        state.select(Some(selected));
    }
    state
}

fn render_device_list(frame: &mut Frame, app: &App, area: Rect) {
    let devices = app.devices();
    let rows: Vec<Row> = devices.iter().map(|d| create_device_row(d)).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(24),    // Name
            Constraint::Length(14), // VID:PID
            Constraint::Length(18), // Transport
            Constraint::Length(13), // Data/Power
            Constraint::Length(14), // Video
            Constraint::Length(9),  // Built-in
        ],
    )
    .header(header_row(&[
        "Name",
        "VID:PID",
        "Transport",
        "Data/Power",
        "Video",
        "Built-in",
    ]))
    .block(list_block(format!(
        " USB Devices ({}) | Tab: Cables ",
        devices.len()
    )))
    .row_highlight_style(highlight_style());

    let mut state = table_state(devices.len(), app.selected_index());
    frame.render_stateful_widget(table, area, &mut state);
}

fn create_device_row(device: &DeviceSummary) -> Row<'static> {
    let ids = match (&device.vendor_id, &device.product_id) {
        (Some(vid), Some(pid)) => format!("{}:{}", short_id(vid), short_id(pid)),
        _ => "-".to_string(),
    };

    let power_style = match device.data_power_state {
        DataPowerState::DataAndPower => Style::default().fg(Color::Green),
        DataPowerState::PowerOnly => Style::default().fg(Color::Yellow),
        DataPowerState::Unknown => Style::default().fg(Color::DarkGray),
    };

    let (built_in, built_in_style) = if device.is_built_in {
        ("yes", Style::default().fg(Color::DarkGray))
    } else {
        ("no", Style::default().fg(Color::White))
    };

    Row::new(vec![
        Cell::from(device.name.clone()),
        Cell::from(ids),
        Cell::from(device.transport.to_string()),
        Cell::from(device.data_power_state.to_string()).style(power_style),
        Cell::from(device.video_capability.to_string())
            .style(video_style(device.video_capability)),
        Cell::from(built_in).style(built_in_style),
    ])
}

fn render_cable_list(frame: &mut Frame, app: &App, area: Rect) {
    let cables = app.cables();
    let rows: Vec<Row> = cables.iter().map(|c| create_cable_row(c)).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(24),    // Name
            Constraint::Length(16), // Vendor
            Constraint::Length(16), // Type
            Constraint::Length(16), // Max speed
            Constraint::Length(14), // Video
        ],
    )
    .header(header_row(&["Name", "Vendor", "Type", "Max Speed", "Video"]))
    .block(list_block(format!(
        " Cables ({}) | Tab: USB Devices ",
        cables.len()
    )))
    .row_highlight_style(highlight_style());

    let mut state = table_state(cables.len(), app.selected_index());
    frame.render_stateful_widget(table, area, &mut state);
}

fn create_cable_row(cable: &CableSummary) -> Row<'static> {
    let or_dash = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    Row::new(vec![
        Cell::from(cable.name.clone()),
        Cell::from(or_dash(&cable.vendor)),
        Cell::from(or_dash(&cable.cable_type)),
        Cell::from(or_dash(&cable.max_speed)),
        Cell::from(cable.video_capability.to_string()).style(video_style(cable.video_capability)),
    ])
}

fn video_style(video: VideoCapability) -> Style {
    match video {
        VideoCapability::Capable => Style::default().fg(Color::Green),
        VideoCapability::NotCapable => Style::default().fg(Color::Red),
        VideoCapability::Unknown => Style::default().fg(Color::DarkGray),
    }
}

/// Leading token of an id such as `0x2109  (VIA Labs, Inc.)`
fn short_id(id: &str) -> &str {
    id.split_whitespace().next().unwrap_or(id)
}

fn render_search_box(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            "/",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(app.filter().search.clone()),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ]);

    let search = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search (Enter/Esc to finish) ")
            .border_style(Style::default().fg(Color::Yellow)),
    );

    frame.render_widget(search, area);
}

fn render_help_bar(frame: &mut Frame, area: Rect) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let bindings = [
        ("q", " Quit  "),
        ("j/k", " Navigate  "),
        ("Tab", " Pane  "),
        ("Enter", " Details  "),
        ("/", " Search  "),
        ("b", " Built-in  "),
        ("r", " Refresh  "),
        ("?", " Help"),
    ];

    let help_text: Vec<Span> = bindings
        .iter()
        .flat_map(|(key, label)| [Span::styled(*key, key_style), Span::raw(*label)])
        .collect();

    let help = Paragraph::new(Line::from(help_text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(help, area);
}

fn render_help_dialog(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());
    let heading = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let binding = |key: &'static str, text: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<13}", key), Style::default().fg(Color::Cyan)),
            Span::raw(text),
        ])
    };

    let help_content = vec![
        Line::from(Span::styled("Navigation", heading)),
        Line::from(""),
        binding("Up / k", "Move selection up"),
        binding("Down / j", "Move selection down"),
        binding("Tab", "Switch between devices and cables"),
        Line::from(""),
        Line::from(Span::styled("Actions", heading)),
        Line::from(""),
        binding("Enter", "View details of the selection"),
        binding("/", "Search by name, vendor, ID, path or serial"),
        binding("b", "Show or hide built-in devices"),
        binding("r", "Run system_profiler again"),
        Line::from(""),
        Line::from(Span::styled("General", heading)),
        Line::from(""),
        binding("?", "Show this help"),
        binding("Esc", "Close dialog"),
        binding("q / Ctrl+C", "Quit"),
    ];

    let help = Paragraph::new(help_content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .title_alignment(Alignment::Center)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, area);
    frame.render_widget(help, area);
}

fn render_details_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(70, 75, frame.area());

    let (title, fields) = match app.pane() {
        Pane::Devices => match app.selected_device() {
            Some(device) => (device.name.clone(), device_fields(device)),
            None => return,
        },
        Pane::Cables => match app.selected_cable() {
            Some(cable) => (cable.name.clone(), cable_fields(cable)),
            None => return,
        },
    };

    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0) + 2;
    let lines: Vec<Line> = fields
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{:<width$}", format!("{}:", label), width = width),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(value, Style::default().fg(Color::White)),
            ])
        })
        .collect();

    let details = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title))
                .title_alignment(Alignment::Center)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, area);
    frame.render_widget(details, area);
}

/// Rectangle of the given percentages centered in `r`
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Compact age such as `42s` or `1h 2m 5s`
fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}
