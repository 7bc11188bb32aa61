use super::*;
use crate::catalog::Track;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

fn t(id: u64) -> Arc<Track> {
    Arc::new(Track {
        id,
        title: format!("Track {id}"),
        artist_name: "Artist".into(),
        mp3_url: format!("https://cdn.example/{id}.mp3"),
        cover_url: String::new(),
        duration: Some(200.0),
        gumroad_link: None,
        ..Default::default()
    })
}

#[test]
fn play_track_on_empty_state_then_same_track_pauses() {
    let mut s = PlaybackStore::default();
    let a = t(1);

    s.play_track(&a);
    assert_eq!(s.current_track_id(), Some(1));
    assert!(s.is_playing());
    assert_eq!(s.progress(), 0.0);

    s.play_track(&a);
    assert!(!s.is_playing());
    assert_eq!(s.current_track_id(), Some(1));
}

#[test]
fn play_track_toggle_law() {
    let a = t(1);
    let b = t(2);

    for start_playing in [false, true] {
        let mut s = PlaybackStore::default();
        s.play_track(&a);
        if !start_playing {
            s.toggle_play();
        }
        let before = s.is_playing();
        s.play_track(&a);
        s.play_track(&a);
        assert_eq!(s.is_playing(), before);

        s.set_progress(42.0);
        s.play_track(&b);
        assert!(s.is_playing());
        assert_eq!(s.progress(), 0.0);
        assert_eq!(s.current_track_id(), Some(2));
    }
}

#[test]
fn switching_tracks_drops_pending_seek() {
    let mut s = PlaybackStore::default();
    s.play_track(&t(1));
    s.set_seek_time(Some(50.0));
    s.play_track(&t(2));
    assert_eq!(s.seek_time(), None);
}

#[test]
fn volume_is_clamped_and_nan_ignored() {
    let mut s = PlaybackStore::new(0.5);
    s.set_volume(1.7);
    assert_eq!(s.volume(), 1.0);
    s.set_volume(-3.0);
    assert_eq!(s.volume(), 0.0);
    s.set_volume(0.25);
    s.set_volume(f32::NAN);
    assert_eq!(s.volume(), 0.25);

    s.change_volume(0.5);
    assert!((s.volume() - 0.75).abs() < f32::EPSILON);
    s.change_volume(1.0);
    assert_eq!(s.volume(), 1.0);

    assert_eq!(PlaybackStore::new(f32::NAN).volume(), 1.0);
}

#[test]
fn seek_without_track_is_a_noop() {
    let mut s = PlaybackStore::default();
    let rev = s.revision();
    s.set_seek_time(Some(30.0));
    assert_eq!(s.seek_time(), None);
    assert_eq!(s.revision(), rev);
}

#[test]
fn seek_is_clamped_and_clearable() {
    let mut s = PlaybackStore::default();
    s.play_track(&t(1));
    s.set_seek_time(Some(140.0));
    assert_eq!(s.seek_time(), Some(100.0));
    s.set_seek_time(Some(f64::NAN));
    assert_eq!(s.seek_time(), Some(100.0));
    s.set_seek_time(None);
    assert_eq!(s.seek_time(), None);
}

#[test]
fn revision_moves_only_on_effective_changes() {
    let mut s = PlaybackStore::default();
    let r0 = s.revision();
    s.set_volume(1.0);
    s.set_progress(0.0);
    s.set_seek_time(None);
    assert_eq!(s.revision(), r0);

    s.play_track(&t(1));
    let r1 = s.revision();
    assert_ne!(r1, r0);
    s.set_progress(10.0);
    assert_ne!(s.revision(), r1);
}

#[test]
fn is_active_tracks_current_identity() {
    let mut s = PlaybackStore::default();
    assert!(!s.is_active(1));
    s.play_track(&t(1));
    assert!(s.is_active(1));
    s.toggle_play();
    assert!(s.is_active(1));
    assert!(!s.is_active(2));
}

#[test]
fn progress_stays_in_bounds_for_random_positions() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut s = PlaybackStore::default();
    s.play_track(&t(1));

    for _ in 0..2_000 {
        let duration: f64 = rng.gen_range(0.001..10_000.0);
        let position: f64 = rng.gen_range(0.0..=duration);
        s.set_progress(position / duration * 100.0);
        let p = s.progress();
        assert!((0.0..=100.0).contains(&p), "progress {p} out of range");
    }

    s.set_progress(250.0);
    assert_eq!(s.progress(), 100.0);
    s.set_progress(-1.0);
    assert_eq!(s.progress(), 0.0);
}
