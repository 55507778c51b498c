use adsplayer::{MediaItem, PlayMode, PlaybackState, Scheduler};
use adsqueue::{MediaType, QueueItem, QueueStore};
use std::path::{Path, PathBuf};

fn seed_media_root(dir: &Path, queue_items: &[QueueItem]) {
    std::fs::create_dir_all(dir.join("images")).unwrap();
    std::fs::create_dir_all(dir.join("videos")).unwrap();
    std::fs::write(dir.join("images/local.png"), b"x").unwrap();

    if !queue_items.is_empty() {
        let queue_file = dir.join("queue/media_queue.json");
        std::fs::create_dir_all(queue_file.parent().unwrap()).unwrap();
        std::fs::write(
            &queue_file,
            serde_json::to_string_pretty(queue_items).unwrap(),
        )
        .unwrap();
    }
}

fn candidates(names: &[&str]) -> Vec<MediaItem> {
    names
        .iter()
        .map(|n| MediaItem {
            path: PathBuf::from(format!("images/{n}")),
            media_type: MediaType::Image,
            name: n.to_string(),
        })
        .collect()
}

#[tokio::test]
async fn queue_items_beat_local_scan() {
    let dir = tempfile::tempdir().unwrap();
    let queued = QueueItem::new(
        dir.path().join("images/queued.png").display().to_string(),
        MediaType::Image,
        "queued.png",
    );
    seed_media_root(dir.path(), &[queued]);

    let mut scheduler = Scheduler::new(dir.path(), PlaybackState::default());

    // L'élément de file passe avant le scan local, et est marqué joué
    let first = scheduler.select_next().await.unwrap();
    assert_eq!(first.name, "queued.png");

    let store = QueueStore::new(dir.path().join("queue/media_queue.json"));
    let items = store.load().await;
    assert!(items[0].played);
    assert!(items[0].played_at.is_some());

    // File épuisée : le scan local prend le relais
    let second = scheduler.select_next().await.unwrap();
    assert_eq!(second.name, "local.png");
}

#[tokio::test]
async fn played_queue_items_are_not_replayed() {
    let dir = tempfile::tempdir().unwrap();
    let mut queued = QueueItem::new("a.png", MediaType::Image, "a.png");
    queued.played = true;
    seed_media_root(dir.path(), &[queued]);

    let mut scheduler = Scheduler::new(dir.path(), PlaybackState::default());
    let item = scheduler.select_next().await.unwrap();
    assert_eq!(item.name, "local.png");
}

#[test]
fn sequential_selection_wraps_around() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = PlaybackState::default();
    state.current_index = 2;
    let mut scheduler = Scheduler::new(dir.path(), state);

    let list = candidates(&["A", "B", "C"]);
    let picks: Vec<_> = (0..3)
        .map(|_| scheduler.next_from_candidates(&list).unwrap().name)
        .collect();

    assert_eq!(picks, ["C", "A", "B"]);
    assert_eq!(scheduler.state().current_index, 2);
}

#[test]
fn sequential_index_is_clamped_when_list_shrinks() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = PlaybackState::default();
    state.current_index = 2;
    let mut scheduler = Scheduler::new(dir.path(), state);

    // La liste a rétréci entre deux appels : l'index est ramené par modulo
    let list = candidates(&["A", "B"]);
    let pick = scheduler.next_from_candidates(&list).unwrap();
    assert_eq!(pick.name, "A");
    assert_eq!(scheduler.state().current_index, 1);
}

#[test]
fn random_selection_stays_in_candidates() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = PlaybackState::default();
    state.mode = PlayMode::Random;
    let mut scheduler = Scheduler::new(dir.path(), state);

    let list = candidates(&["A", "B", "C"]);
    for _ in 0..50 {
        let pick = scheduler.next_from_candidates(&list).unwrap();
        assert!(list.iter().any(|c| c.name == pick.name));
    }
}

#[test]
fn empty_candidates_yield_none() {
    let dir = tempfile::tempdir().unwrap();
    let mut scheduler = Scheduler::new(dir.path(), PlaybackState::default());
    assert!(scheduler.next_from_candidates(&[]).is_none());
}

#[test]
fn loop_disabled_stops_after_one_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = PlaybackState::default();
    state.loop_enabled = false;
    let mut scheduler = Scheduler::new(dir.path(), state);

    let list = candidates(&["A", "B", "C"]);
    for expected in ["A", "B", "C"] {
        assert_eq!(scheduler.next_from_candidates(&list).unwrap().name, expected);
    }
    assert!(scheduler.next_from_candidates(&list).is_none());

    // Réactivation de la boucle : la lecture reprend
    scheduler.state_mut().loop_enabled = true;
    scheduler.reset_cycle();
    assert!(scheduler.next_from_candidates(&list).is_some());
}
