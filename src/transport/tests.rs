use super::*;
use crate::catalog::Track;
use crate::store::PlaybackStore;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    SetSource(String),
    Play,
    Pause,
    Volume(f32),
    Seek(f64),
}

#[derive(Default)]
struct FakeElement {
    calls: Vec<Call>,
    duration: Option<f64>,
    time: f64,
    events: Vec<MediaEvent>,
    refuse_play: bool,
}

impl FakeElement {
    fn with_duration(duration: f64) -> Self {
        Self {
            duration: Some(duration),
            ..Self::default()
        }
    }

    fn count(&self, wanted: &Call) -> usize {
        self.calls.iter().filter(|c| *c == wanted).count()
    }

    fn seeks(&self) -> Vec<f64> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Seek(t) => Some(*t),
                _ => None,
            })
            .collect()
    }
}

impl MediaElement for FakeElement {
    fn set_source(&mut self, url: &str) {
        self.calls.push(Call::SetSource(url.to_string()));
        self.time = 0.0;
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.calls.push(Call::Play);
        if self.refuse_play {
            Err(PlaybackError::LoadFailed("not allowed".into()))
        } else {
            Ok(())
        }
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn set_volume(&mut self, volume: f32) {
        self.calls.push(Call::Volume(volume));
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn set_current_time(&mut self, secs: f64) {
        self.calls.push(Call::Seek(secs));
        self.time = secs;
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        std::mem::take(&mut self.events)
    }
}

fn t(id: u64) -> Arc<Track> {
    Arc::new(Track {
        id,
        title: format!("Track {id}"),
        artist_name: String::new(),
        mp3_url: format!("https://cdn.example/{id}.mp3"),
        cover_url: String::new(),
        duration: None,
        gumroad_link: None,
        ..Default::default()
    })
}

#[test]
fn binds_source_and_starts_playback_once() {
    let mut store = PlaybackStore::default();
    let mut ctl = TransportController::new(FakeElement::with_duration(200.0));

    ctl.tick(&mut store);
    assert!(ctl.element().calls.iter().all(|c| matches!(c, Call::Volume(_))));

    store.play_track(&t(1));
    ctl.tick(&mut store);
    ctl.tick(&mut store);

    let el = ctl.element();
    assert_eq!(
        el.count(&Call::SetSource("https://cdn.example/1.mp3".into())),
        1
    );
    assert_eq!(el.count(&Call::Play), 1);
}

#[test]
fn pause_and_volume_follow_the_store() {
    let mut store = PlaybackStore::default();
    let mut ctl = TransportController::new(FakeElement::with_duration(200.0));
    store.play_track(&t(1));
    ctl.tick(&mut store);

    store.toggle_play();
    store.set_volume(0.3);
    ctl.tick(&mut store);

    let el = ctl.element();
    assert_eq!(el.count(&Call::Pause), 1);
    assert_eq!(el.calls.last(), Some(&Call::Volume(0.3)));
}

#[test]
fn refused_play_is_swallowed_and_intent_kept() {
    let mut store = PlaybackStore::default();
    let mut el = FakeElement::with_duration(200.0);
    el.refuse_play = true;
    let mut ctl = TransportController::new(el);

    store.play_track(&t(1));
    ctl.tick(&mut store);
    ctl.tick(&mut store);

    assert!(store.is_playing());
    // not retried on every tick
    assert_eq!(ctl.element().count(&Call::Play), 1);
}

#[test]
fn position_updates_write_progress() {
    let mut store = PlaybackStore::default();
    let mut ctl = TransportController::new(FakeElement::with_duration(200.0));
    store.play_track(&t(1));
    ctl.tick(&mut store);

    ctl.element_mut().time = 50.0;
    ctl.element_mut().events.push(MediaEvent::TimeUpdate);
    ctl.tick(&mut store);

    assert!((store.progress() - 25.0).abs() < 1e-9);
    assert!((ctl.current_time() - 50.0).abs() < 1e-9);
    assert_eq!(ctl.duration(), Some(200.0));
}

#[test]
fn seek_is_applied_once_and_cleared() {
    let mut store = PlaybackStore::default();
    let mut ctl = TransportController::new(FakeElement::with_duration(200.0));
    store.play_track(&t(1));
    ctl.tick(&mut store);

    store.set_progress(80.0);
    store.set_seek_time(Some(80.0));
    ctl.tick(&mut store);

    assert_eq!(store.seek_time(), None);
    assert_eq!(ctl.element().seeks(), vec![160.0]);
    assert!((store.progress() - 80.0).abs() < 1e-9);

    ctl.tick(&mut store);
    assert_eq!(ctl.element().seeks(), vec![160.0]);
}

#[test]
fn seek_waits_for_known_duration() {
    let mut store = PlaybackStore::default();
    let mut ctl = TransportController::new(FakeElement::default());
    store.play_track(&t(1));
    ctl.tick(&mut store);

    store.set_seek_time(Some(50.0));
    ctl.tick(&mut store);
    assert_eq!(store.seek_time(), Some(50.0));
    assert!(ctl.element().seeks().is_empty());

    ctl.element_mut().duration = Some(f64::INFINITY);
    ctl.tick(&mut store);
    assert_eq!(store.seek_time(), Some(50.0));

    // metadata arriving mid-tick lets the pending seek through the same tick
    ctl.element_mut().duration = Some(120.0);
    ctl.element_mut().events.push(MediaEvent::LoadedMetadata);
    ctl.tick(&mut store);
    assert_eq!(store.seek_time(), None);
    assert_eq!(ctl.element().seeks(), vec![60.0]);
}

#[test]
fn position_updates_are_ignored_while_a_seek_is_pending() {
    let mut store = PlaybackStore::default();
    let mut ctl = TransportController::new(FakeElement::default());
    store.play_track(&t(1));
    ctl.tick(&mut store);

    store.set_progress(70.0);
    store.set_seek_time(Some(70.0));
    ctl.element_mut().time = 10.0;
    ctl.element_mut().events.push(MediaEvent::TimeUpdate);
    ctl.tick(&mut store);

    assert!((store.progress() - 70.0).abs() < 1e-9);
}

#[test]
fn ended_pauses_and_rewinds_without_advancing() {
    let mut store = PlaybackStore::default();
    let mut ctl = TransportController::new(FakeElement::with_duration(200.0));
    store.play_track(&t(1));
    ctl.tick(&mut store);

    ctl.element_mut().time = 200.0;
    ctl.element_mut().events.push(MediaEvent::TimeUpdate);
    ctl.element_mut().events.push(MediaEvent::Ended);
    ctl.tick(&mut store);

    assert!(!store.is_playing());
    assert_eq!(store.progress(), 0.0);
    assert_eq!(ctl.current_time(), 0.0);
    assert_eq!(ctl.element().seeks(), vec![0.0]);
    assert_eq!(store.current_track_id(), Some(1));
    assert_eq!(
        ctl.element()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::SetSource(_)))
            .count(),
        1
    );
}

#[test]
fn switching_tracks_rebinds_and_replays() {
    let mut store = PlaybackStore::default();
    let mut ctl = TransportController::new(FakeElement::with_duration(200.0));
    store.play_track(&t(1));
    ctl.tick(&mut store);
    store.play_track(&t(2));
    ctl.tick(&mut store);

    let el = ctl.element();
    assert_eq!(
        el.count(&Call::SetSource("https://cdn.example/2.mp3".into())),
        1
    );
    assert_eq!(el.count(&Call::Play), 2);
    assert_eq!(store.progress(), 0.0);
}
