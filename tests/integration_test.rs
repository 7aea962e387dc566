use anyhow::Result;
use chapnav::{
    aggregate_progress, build_chapter_nav_groups, compute_window, generate_series,
    navigation_events, read_series_file, write_series_file, ChapterNumber, IndexSpace,
    Navigator, NavigatorConfig, NavigatorEvent, PointerDown, PointerRelease, ReleaseKind,
    SampleOptions, ScrollPane, Scrollable, SectionKind, SeriesFile, VolumeMapping, WheelInput,
};
use std::env;
use std::fs;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn number(n: u32) -> ChapterNumber {
    ChapterNumber::whole(n).unwrap()
}

fn mapping(json: &str) -> VolumeMapping {
    serde_json::from_str(json).unwrap()
}

fn strip(space: IndexSpace, viewport: f32) -> Navigator<ScrollPane> {
    let mut nav = Navigator::new(NavigatorConfig::chapters(), space);
    let content = nav.content_size();
    nav.attach(ScrollPane::new(viewport, content));
    nav
}

/// Runs frames at 16 ms intervals until the navigator is idle.
fn run_until_idle(nav: &mut Navigator<ScrollPane>, mut now: Instant) -> Instant {
    for _ in 0..500 {
        now += ms(16);
        if !nav.frame(now).needs_frame {
            break;
        }
    }
    now
}

const SERIES_JSON: &str = r#"{
    "series_id": "harbor-lights",
    "title": "Harbor Lights",
    "volumes": { "1": ["1", "2", "3"], "2": ["4", "5"] },
    "current": "4",
    "logs": [
        { "number": 1, "status": "completed" },
        { "number": 2, "status": "completed" },
        { "number": 2, "status": "completed" },
        { "number": 4, "status": "in_progress" }
    ]
}"#;

#[test]
fn test_series_json_builds_space_and_progress() {
    let series: SeriesFile = serde_json::from_str(SERIES_JSON).unwrap();
    let space = series.index_space(25);

    assert_eq!(space.len(), 5);
    assert_eq!(space.sections().len(), 2);
    assert_eq!(series.current_number(), Some(number(4)));

    let progress = aggregate_progress(space.sections(), &series.logs);
    assert_eq!((progress[0].completed, progress[0].total), (2, 3));
    assert_eq!((progress[1].completed, progress[1].total), (0, 2));
    assert!((progress[0].sweep_degrees() - 240.0).abs() < 1e-3);
}

#[test]
fn test_write_and_read_plain_series() -> Result<()> {
    let path = env::temp_dir().join("chapnav_test_series.json");
    let _ = fs::remove_file(&path);

    let series = generate_series(11, &SampleOptions::default());
    write_series_file(&path, &series)?;
    let loaded = read_series_file(&path)?;
    assert_eq!(loaded, series);

    let text = fs::read_to_string(&path)?;
    assert!(text.trim_start().starts_with('{'));

    fs::remove_file(&path)?;
    Ok(())
}

#[test]
fn test_write_and_read_brotli_series() -> Result<()> {
    let path = env::temp_dir().join("chapnav_test_series.json.br");
    let _ = fs::remove_file(&path);

    let options = SampleOptions {
        total_items: 1200,
        ..SampleOptions::default()
    };
    let series = generate_series(12, &options);
    write_series_file(&path, &series)?;

    let raw = fs::read(&path)?;
    assert_ne!(raw.first(), Some(&b'{'), "brotli output must not be plain JSON");

    let loaded = read_series_file(&path)?;
    assert_eq!(loaded, series);

    fs::remove_file(&path)?;
    Ok(())
}

#[test]
fn test_reading_missing_file_names_the_path() {
    let err = read_series_file("/nonexistent/dir/series.json").unwrap_err();
    assert!(format!("{:#}", err).contains("series.json"));
}

#[test]
fn test_volume_mapping_partitions_in_order() {
    let sections = build_chapter_nav_groups(
        Some(&mapping(r#"{ "1": ["1","2","3"], "2": ["4","5"] }"#)),
        None,
        25,
    );

    assert_eq!(sections.len(), 2);
    assert!(sections.iter().all(|s| s.kind == SectionKind::Volume));
    let flat: Vec<ChapterNumber> = sections.iter().flat_map(|s| s.members.clone()).collect();
    assert_eq!(flat, (1..=5).map(number).collect::<Vec<_>>());
}

#[test]
fn test_range_fallback_for_sixty_items() {
    let sections = build_chapter_nav_groups(None, Some(60), 25);

    let bounds: Vec<(ChapterNumber, ChapterNumber)> = sections
        .iter()
        .map(|s| (s.first().unwrap(), s.last().unwrap()))
        .collect();
    assert_eq!(
        bounds,
        vec![
            (number(1), number(25)),
            (number(26), number(50)),
            (number(51), number(60)),
        ]
    );
    assert!(sections.iter().all(|s| s.kind == SectionKind::Range));
}

#[test]
fn test_window_at_origin_for_small_viewport() {
    let window = compute_window(100, 132.0, 400.0, 0.0, 10).unwrap();
    assert_eq!(window.start_index, 0);
    assert!((12..=14).contains(&window.end_index));
    assert_eq!(window.leading_spacer, 0.0);
}

#[test]
fn test_sample_series_flick_moves_one_card() {
    let series = generate_series(3, &SampleOptions::default());
    let space = series.index_space(25);
    let current = series.current_number().unwrap();
    let mut nav = strip(space, 800.0);

    let start = nav.center_on(current).unwrap();
    assert_eq!(nav.active_item(), Some(current));

    let t0 = Instant::now();
    nav.pointer_down(PointerDown::mouse(500.0), t0);
    nav.pointer_move(440.0, t0 + ms(30));
    let release = nav.pointer_up(t0 + ms(30));
    assert_eq!(
        release,
        PointerRelease::Snap {
            target_index: start + 1,
            kind: ReleaseKind::Flick,
        }
    );

    run_until_idle(&mut nav, t0 + ms(30));
    assert_eq!(nav.active_index(), Some(start + 1));
    assert!(!nav.is_snapping());

    // The click that ends the drag is swallowed
    assert_eq!(nav.activate(start + 1), None);
    assert_eq!(nav.activate(start + 1), nav.space().item(start + 1));
}

#[test]
fn test_wheel_scroll_settles_on_a_card_edge() {
    let space = IndexSpace::build(None, Some(300), 25);
    let mut nav = strip(space, 800.0);
    let t0 = Instant::now();

    assert!(nav.wheel(WheelInput::pixels(0.0, 250.0), t0));
    assert!(nav.wheel(WheelInput::pixels(0.0, 250.0), t0 + ms(20)));
    let end = run_until_idle(&mut nav, t0 + ms(20));
    assert!(end > t0 + ms(170));

    let pane = nav.container().unwrap();
    let index = nav.active_index().unwrap();
    let centered = index as f32 * 132.0 + 60.0 - 400.0;
    assert!((pane.offset() - centered).abs() < 0.5);
    assert!(nav.window().unwrap().contains(index));
}

#[test]
fn test_jump_events_reach_process_wide_store() {
    let seen: Arc<Mutex<Vec<NavigatorEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let subscription = navigation_events().subscribe(move |event| {
        sink.lock().unwrap().push(event.clone());
    });

    let space = IndexSpace::build(None, Some(200), 25);
    let mut nav = strip(space, 400.0).with_events(navigation_events().clone());

    let t0 = Instant::now();
    assert!(nav.jump_to_section(4, t0));
    run_until_idle(&mut nav, t0);
    drop(subscription);

    let events = seen.lock().unwrap().clone();
    let target = number(101);
    assert!(events.contains(&NavigatorEvent::SnapStarted { index: 100, number: target }));
    assert!(events.contains(&NavigatorEvent::Settled { index: 100, number: target }));
    assert_eq!(nav.active_item(), Some(target));
}
