//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::App;
use crate::config::Settings;
use crate::store::PlaybackStore;
use crate::waveform::{WaveformCanvas, WaveformPhase, WaveformView};

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("gg/G".to_string(), "top/bottom".to_string());
    map.insert("zz".to_string(), "jump to playing".to_string());
    map.insert("enter".to_string(), "play/pause selected".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    // H/L is filled dynamically from config.
    map.insert("↑/↓".to_string(), "volume".to_string());
    map.insert("m".to_string(), "mute".to_string());
    map.insert("click".to_string(), "seek".to_string());
    map.insert("/".to_string(), "search".to_string());
    map.insert("1/2/3".to_string(), "genre/mood/season".to_string());
    map.insert("!/@/#".to_string(), "more like this".to_string());
    map.insert("b".to_string(), "bpm range".to_string());
    map.insert("c".to_string(), "clear filters".to_string());
    map.insert("t".to_string(), "theme".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating the scrub step.
fn controls_text(scrub_percent: f64) -> String {
    let order = [
        "j/k", "enter", "space/p", "H/L", "click", "↑/↓", "m", "gg/G", "zz", "/", "1/2/3", "!/@/#", "b",
        "c", "t", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] scrub -/+{}%", scrub_percent))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format seconds as `M:SS`; anything non-finite or negative reads `0:00`.
pub fn format_time(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "0:00".to_string();
    }
    let whole = secs.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Where the transport actually is, as opposed to what the store wants.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerStatus {
    pub elapsed: f64,
    pub duration: Option<f64>,
}

impl PlayerStatus {
    fn remaining(&self) -> f64 {
        match self.duration {
            Some(d) if d.is_finite() => (d - self.elapsed).max(0.0),
            _ => 0.0,
        }
    }
}

/// Read-only state one frame is drawn from.
pub struct DrawContext<'a> {
    pub app: &'a App,
    pub store: &'a PlaybackStore,
    pub status: PlayerStatus,
    pub settings: &'a Settings,
}

fn phase_label(view: &WaveformView) -> &'static str {
    match view.phase() {
        None => "",
        Some(WaveformPhase::Idle) => "synthetic",
        Some(WaveformPhase::Fetching(_)) => "analyzing",
        Some(WaveformPhase::Blending { .. }) => "blending",
        Some(WaveformPhase::Settled { .. }) => "analyzed",
        Some(WaveformPhase::Unavailable) => "synthetic (analysis failed)",
    }
}

fn left_pad() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

/// Render the entire UI into `frame`. The waveform views are mutable because
/// painting resizes their surfaces and records the area for mouse seeking.
pub fn draw(
    frame: &mut Frame,
    ctx: &DrawContext<'_>,
    player: &mut WaveformView,
    preview: &mut WaveformView,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(6),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ctx.settings.ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" soundshelf ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    draw_track_list(frame, ctx, middle[0]);
    draw_detail(frame, ctx, preview, middle[1]);
    draw_player(frame, ctx, player, chunks[2]);

    let footer = Paragraph::new(controls_text(ctx.settings.controls.scrub_percent))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(left_pad()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}

fn draw_track_list(frame: &mut Frame, ctx: &DrawContext<'_>, area: Rect) {
    let app = ctx.app;
    let display = app.display_indices();
    let q = app.filter_query().trim();

    // Only build ListItems for the visible window, centered on the selection.
    let total = display.len();
    let list_height = area.height.saturating_sub(2) as usize;
    let sel_pos = display.iter().position(|&i| i == app.selected).unwrap_or(0);
    let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
        (0, total, sel_pos)
    } else {
        let half = list_height / 2;
        let mut start = sel_pos.saturating_sub(half);
        if start + list_height > total {
            start = total - list_height;
        }
        (start, start + list_height, sel_pos - start)
    };

    let visible_items: Vec<ListItem> = display[start..end]
        .iter()
        .map(|&i| {
            let title = app.display_title(i);
            let marker = match app.tracks().get(i) {
                Some(t) if ctx.store.is_active(t.id) && ctx.store.is_playing() => "♪ ",
                Some(t) if ctx.store.is_active(t.id) => "‖ ",
                _ => "  ",
            };

            let mut spans = vec![Span::raw(marker)];
            let positions = if q.is_empty() {
                None
            } else {
                app.fuzzy_match_positions_for_track(i, q)
            };
            match positions {
                Some(positions) if !positions.is_empty() => {
                    let mut pos_iter = positions.into_iter().peekable();
                    for (ci, ch) in title.chars().enumerate() {
                        if pos_iter.peek() == Some(&ci) {
                            pos_iter.next();
                            spans.push(Span::styled(
                                ch.to_string(),
                                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                            ));
                        } else {
                            spans.push(Span::raw(ch.to_string()));
                        }
                    }
                }
                _ => spans.push(Span::raw(title)),
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut title = if app.filter_mode || !q.is_empty() {
        format!(" tracks [/{}] ", q)
    } else {
        format!(" tracks ({}) ", total)
    };
    if !app.facets().is_empty() {
        title.push_str(&format!("[{}] ", app.facets().summary()));
    }
    let list = List::new(visible_items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ratatui::widgets::ListState::default();
    if total > 0 {
        state.select(Some(selected_pos_in_visible));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_detail(frame: &mut Frame, ctx: &DrawContext<'_>, preview: &mut WaveformView, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" details ")
        .padding(left_pad());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(track) = ctx.app.selected_track() else {
        let empty = if ctx.app.has_tracks() {
            "No track matches the filter"
        } else {
            "Catalog is empty"
        };
        frame.render_widget(Paragraph::new(empty).italic(), inner);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(inner);

    frame.render_stateful_widget(WaveformCanvas::new(ctx.app.dark_mode), rows[0], preview);

    let mut lines = vec![
        Line::from(track.title.clone().bold()),
        Line::from(if track.artist_name.trim().is_empty() {
            "-".to_string()
        } else {
            track.artist_name.clone()
        }),
    ];
    if let Some(d) = track.duration {
        lines.push(Line::from(format!("Length: {}", format_time(d))));
    }
    if let Some(bpm) = track.bpm {
        lines.push(Line::from(format!("BPM: {}", bpm.round())));
    }
    for (label, values) in [("Genre", &track.genre), ("Mood", &track.mood), ("Season", &track.season)] {
        if !values.is_empty() {
            lines.push(Line::from(format!("{}: {}", label, values.join(", "))));
        }
    }
    if let Some(desc) = track.description.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        lines.push(Line::from(desc.to_string()).italic());
    }
    if let Some(link) = &track.gumroad_link {
        lines.push(Line::from(format!("Buy license: {}", link)));
    }
    for pack in ctx.app.selected_packs() {
        lines.push(Line::from(format!("In pack: {} (${:.2})", pack.title, pack.price)));
        if let Some(link) = &pack.gumroad_link {
            lines.push(Line::from(format!("  {}", link)));
        }
    }
    if let Some(src) = &ctx.app.source {
        lines.push(Line::from(format!("Source: {}", src)).dim());
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), rows[1]);
}

fn draw_player(frame: &mut Frame, ctx: &DrawContext<'_>, player: &mut WaveformView, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" player ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(track) = ctx.store.current_track() else {
        frame.render_widget(
            Paragraph::new("Nothing playing. Press enter on a track.").italic(),
            inner,
        );
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let state = if ctx.store.is_playing() { "▶ Playing" } else { "‖ Paused" };
    let volume = (ctx.store.volume() * 100.0).round() as u32;
    let mut info = format!("{} • {} • vol {}%", state, track.display(), volume);
    let phase = phase_label(player);
    if !phase.is_empty() {
        info.push_str(" • ");
        info.push_str(phase);
    }
    frame.render_widget(Paragraph::new(info), rows[0]);

    let bar = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(1),
            Constraint::Length(8),
        ])
        .split(rows[1]);

    let elapsed = Paragraph::new(format_time(ctx.status.elapsed)).alignment(Alignment::Center);
    let remaining =
        Paragraph::new(format!("-{}", format_time(ctx.status.remaining()))).alignment(Alignment::Center);
    frame.render_widget(elapsed, bar[0]);
    frame.render_stateful_widget(WaveformCanvas::new(ctx.app.dark_mode), bar[1], player);
    frame.render_widget(remaining, bar[2]);
}
