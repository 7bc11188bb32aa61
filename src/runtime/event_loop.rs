use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::Position;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, FacetKind};
use crate::config;
use crate::store::{PROGRESS_MAX, PlaybackStore};
use crate::transport::{MediaElement, TransportController};
use crate::ui;

use super::views::Views;

/// State tracked by the runtime event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    /// Two-key prefix state for `gg` and `zz`.
    pending_gg: bool,
    pending_zz: bool,
    /// A left-button drag that started on the player waveform.
    dragging: bool,
}

/// Everything the loop mutates, borrowed from `runtime::run`.
pub struct Session<'a, E: MediaElement> {
    pub app: &'a mut App,
    pub store: &'a mut PlaybackStore,
    pub controller: &'a mut TransportController<E>,
    pub views: &'a mut Views,
}

/// Main terminal event loop: transport sync, waveform frames, drawing and
/// input. Returns `Ok(())` when shutdown is requested.
pub fn run<E: MediaElement>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    session: Session<'_, E>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let Session {
        app,
        store,
        controller,
        views,
    } = session;
    let started = Instant::now();

    loop {
        controller.tick(store);
        views.bind(app, store);
        views.poll_analysis();
        views.frame(store, started.elapsed().as_secs_f64() * 1000.0);

        let ctx = ui::DrawContext {
            app,
            store,
            status: ui::PlayerStatus {
                elapsed: controller.current_time(),
                duration: controller.duration(),
            },
            settings,
        };
        terminal.draw(|f| ui::draw(f, &ctx, &mut views.player, &mut views.preview))?;

        let timeout = if views.animating() {
            Duration::from_millis(settings.ui.frame_interval_ms)
        } else {
            Duration::from_millis(settings.ui.idle_poll_ms)
        };

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if handle_key_event(key, settings, app, store, state) {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, store, views, state),
                _ => {}
            }
        }
    }

    log::info!("shutting down");
    Ok(())
}

fn handle_mouse_event(mouse: MouseEvent, store: &mut PlaybackStore, views: &mut Views, state: &mut EventLoopState) {
    let Some(area) = views.player.last_area() else {
        return;
    };
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if area.contains(Position::new(mouse.column, mouse.row)) {
                state.dragging = views.player.seek_at(store, mouse.column);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) if state.dragging => {
            views.player.seek_at(store, mouse.column);
        }
        MouseEventKind::Up(MouseButton::Left) => state.dragging = false,
        _ => {}
    }
}

/// Move the current track by `delta` percent through a seek request.
fn scrub(store: &mut PlaybackStore, delta: f64) {
    if store.current_track().is_none() {
        return;
    }
    let target = (store.progress() + delta).clamp(0.0, PROGRESS_MAX);
    store.set_progress(target);
    store.set_seek_time(Some(target));
}

fn play_selected(app: &App, store: &mut PlaybackStore) {
    if let Some(track) = app.selected_track().cloned() {
        store.play_track(&track);
    }
}

/// Returns true when the app should quit.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    store: &mut PlaybackStore,
    state: &mut EventLoopState,
) -> bool {
    if app.filter_mode {
        state.pending_gg = false;
        match key.code {
            KeyCode::Esc => app.clear_filter(),
            KeyCode::Backspace => app.pop_filter_char(),
            KeyCode::Char('j') | KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.next();
            }
            KeyCode::Char('k') | KeyCode::Char('p') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.prev();
            }
            KeyCode::Char(c) => {
                if !c.is_control() {
                    app.push_filter_char(c);
                }
            }
            KeyCode::Enter => {
                if app.display_indices().is_empty() {
                    return false;
                }
                app.exit_filter_mode();
                play_selected(app, store);
            }
            _ => {}
        }
        return false;
    }

    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }
    if key.code != KeyCode::Char('z') {
        state.pending_zz = false;
    }

    let volume_step = settings.audio.volume_step;
    let scrub_percent = settings.controls.scrub_percent;

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('/') => app.enter_filter_mode(),
        KeyCode::Esc => app.clear_filter(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('1') => app.cycle_genre(),
        KeyCode::Char('2') => app.cycle_mood(),
        KeyCode::Char('3') => app.cycle_season(),
        KeyCode::Char('!') => app.toggle_facet_from_selected(FacetKind::Genre),
        KeyCode::Char('@') => app.toggle_facet_from_selected(FacetKind::Mood),
        KeyCode::Char('#') => app.toggle_facet_from_selected(FacetKind::Season),
        KeyCode::Char('b') => app.cycle_bpm_range(),
        KeyCode::Char('c') => app.clear_all_filters(),
        KeyCode::Char('j') => app.next(),
        KeyCode::Char('k') => app.prev(),
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.select_last(),
        KeyCode::Char('z') => {
            if state.pending_zz {
                state.pending_zz = false;
                if let Some(id) = store.current_track_id() {
                    app.select_track_id(id);
                }
            } else {
                state.pending_zz = true;
            }
        }
        KeyCode::Enter => play_selected(app, store),
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            if store.current_track().is_some() {
                store.toggle_play();
            } else {
                play_selected(app, store);
            }
        }
        KeyCode::Up => store.change_volume(volume_step),
        KeyCode::Down => store.change_volume(-volume_step),
        KeyCode::Char('m') => {
            let muted = store.volume() == 0.0;
            store.set_volume(if muted { 1.0 } else { 0.0 });
        }
        KeyCode::Char('H') => scrub(store, -scrub_percent),
        KeyCode::Char('L') => scrub(store, scrub_percent),
        _ => {}
    }

    false
}
