use async_trait::async_trait;
use channels::{DirectionsMessage, FloorsMessage};

use super::*;
use crate::map::{Floor, MapData, Point, Space, SpaceId, SpaceState};
use crate::sdk::{CameraTarget, PathStyle};

// --- Stub collaborators ---

/// Minimal SDK stub: serves a fixed map and fixed directions, draws nothing.
#[derive(Default)]
struct StubSdk {
    map: MapData,
    directions: Option<Directions>,
    directions_requested: usize,
}

#[async_trait(?Send)]
impl MapSdk for StubSdk {
    async fn load_map_data(&mut self, _options: &MapOptions) -> MapData {
        self.map.clone()
    }

    fn animate_camera(&mut self, _target: CameraTarget) {}

    fn set_floor(&mut self, _floor: &FloorId) {}

    async fn get_directions(
        &mut self,
        _start: &SpaceId,
        _destination: &SpaceId,
        _accessible: bool,
    ) -> Option<Directions> {
        self.directions_requested += 1;
        self.directions.clone()
    }

    fn clear_navigation(&mut self) {}

    fn draw_navigation(&mut self, _directions: &Directions) {}

    fn add_path(&mut self, _coordinates: &[Point], _style: &PathStyle) {}

    fn remove_all_paths(&mut self) {}

    fn update_space_state(&mut self, _space: &SpaceId, _state: &SpaceState) {}

    fn show_labels(&mut self) {}
}

#[derive(Default)]
struct RecordingSink {
    posts: Vec<(Channel, String)>,
}

impl ChannelSink for RecordingSink {
    fn post(&mut self, channel: Channel, message: &str) {
        self.posts.push((channel, message.to_owned()));
    }
}

#[derive(Default)]
struct RecordingUi {
    toasts: Vec<String>,
    panels: Vec<Directions>,
    selector_fills: Vec<Vec<FloorOption>>,
}

impl PageUi for RecordingUi {
    fn show_error_toast(&mut self, message: &str) {
        self.toasts.push(message.to_owned());
    }

    fn show_directions(&mut self, directions: &Directions) {
        self.panels.push(directions.clone());
    }

    fn populate_floor_selector(&mut self, options: &[FloorOption]) {
        self.selector_fills.push(options.to_vec());
    }
}

// --- Fixtures ---

fn sample_map() -> MapData {
    MapData {
        spaces: vec![
            Space {
                id: "s_lib".to_owned(),
                name: "Library".to_owned(),
                number: Some("101".to_owned()),
                center: Point::new(1.0, 2.0),
            },
            Space {
                id: "s_caf".to_owned(),
                name: "Cafeteria".to_owned(),
                number: None,
                center: Point::new(3.0, 4.0),
            },
        ],
        floors: vec![
            Floor { id: "f_1".to_owned(), name: "Mezzanine".to_owned(), elevation: 1.0 },
            Floor { id: "f_0".to_owned(), name: "Ground".to_owned(), elevation: 0.0 },
        ],
    }
}

fn sample_directions() -> Directions {
    Directions {
        distance: 12.0,
        instructions: vec!["Go".to_owned()],
        coordinates: vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
    }
}

fn options() -> MapOptions {
    MapOptions { key: "k".to_owned(), secret: "s".to_owned(), map_id: "m".to_owned() }
}

async fn loaded_bridge() -> Bridge<StubSdk, RecordingSink, RecordingUi> {
    let sdk = StubSdk { map: sample_map(), ..StubSdk::default() };
    let mut bridge = Bridge::new(sdk, RecordingSink::default(), RecordingUi::default());
    bridge.load(&options()).await;
    bridge
}

// --- setFloor dispatch ---

#[tokio::test]
async fn set_floor_success_posts_exactly_one_floors_message() {
    let mut bridge = loaded_bridge().await;
    bridge.set_floor("Ground");

    assert_eq!(bridge.channels.posts.len(), 1);
    let (channel, text) = &bridge.channels.posts[0];
    assert_eq!(*channel, Channel::Floors);
    assert_eq!(
        FloorsMessage::from_json(text).expect("decode"),
        FloorsMessage::success("Ground".to_owned(), "f_0".to_owned())
    );
}

#[tokio::test]
async fn set_floor_unknown_posts_exactly_one_error_never_a_success() {
    let mut bridge = loaded_bridge().await;
    bridge.set_floor("Roof");

    assert_eq!(bridge.channels.posts.len(), 1);
    let (channel, text) = &bridge.channels.posts[0];
    assert_eq!(*channel, Channel::Floors);
    assert!(matches!(FloorsMessage::from_json(text).expect("decode"), FloorsMessage::Error(_)));
}

#[tokio::test]
async fn set_floor_before_load_posts_not_initialized() {
    let mut bridge =
        Bridge::new(StubSdk::default(), RecordingSink::default(), RecordingUi::default());
    bridge.set_floor("Ground");

    assert_eq!(bridge.channels.posts.len(), 1);
    let (_, text) = &bridge.channels.posts[0];
    assert_eq!(
        FloorsMessage::from_json(text).expect("decode"),
        FloorsMessage::error("mapView is not initialized".to_owned())
    );
}

// --- getDirections dispatch ---

#[tokio::test]
async fn get_directions_success_posts_exactly_one_directions_message() {
    let mut bridge = loaded_bridge().await;
    bridge.core.sdk.directions = Some(sample_directions());
    bridge.get_directions("Library", "Cafeteria", false).await;

    assert_eq!(bridge.channels.posts.len(), 1);
    let (channel, text) = &bridge.channels.posts[0];
    assert_eq!(*channel, Channel::Directions);
    assert_eq!(
        DirectionsMessage::from_json(text).expect("decode"),
        DirectionsMessage::success(12.0, vec!["Go".to_owned()])
    );
}

#[tokio::test]
async fn get_directions_invalid_endpoint_posts_one_error_without_sdk_work() {
    let mut bridge = loaded_bridge().await;
    bridge.get_directions("Library", "Observatory", false).await;

    assert_eq!(bridge.core.sdk.directions_requested, 0);
    assert_eq!(bridge.channels.posts.len(), 1);
    let (channel, text) = &bridge.channels.posts[0];
    assert_eq!(*channel, Channel::Directions);
    assert_eq!(
        DirectionsMessage::from_json(text).expect("decode"),
        DirectionsMessage::error("Invalid start or destination".to_owned())
    );
}

#[tokio::test]
async fn get_directions_no_path_posts_one_error() {
    let mut bridge = loaded_bridge().await;
    bridge.core.sdk.directions = None;
    bridge.get_directions("Library", "Cafeteria", true).await;

    assert_eq!(bridge.core.sdk.directions_requested, 1);
    assert_eq!(bridge.channels.posts.len(), 1);
    let (_, text) = &bridge.channels.posts[0];
    assert_eq!(
        DirectionsMessage::from_json(text).expect("decode"),
        DirectionsMessage::error("Directions not found".to_owned())
    );
}

#[tokio::test]
async fn every_posted_message_is_valid_json() {
    let mut bridge = loaded_bridge().await;
    bridge.set_floor("Ground");
    bridge.set_floor("Roof");
    bridge.core.sdk.directions = Some(sample_directions());
    bridge.get_directions("Library", "Cafeteria", false).await;
    bridge.get_directions("Library", "Observatory", false).await;

    for (_, text) in &bridge.channels.posts {
        let value: serde_json::Value = serde_json::from_str(text).expect("valid json");
        assert!(value.get("type").is_some());
        assert!(value.get("payload").is_some());
    }
}

// --- Operations that never post ---

#[tokio::test]
async fn focus_space_posts_nothing() {
    let mut bridge = loaded_bridge().await;
    bridge.focus_space("Library");
    bridge.focus_space("Observatory");
    assert!(bridge.channels.posts.is_empty());
}

#[tokio::test]
async fn select_floor_posts_nothing() {
    let mut bridge = loaded_bridge().await;
    bridge.select_floor(&"f_1".to_owned());
    assert!(bridge.channels.posts.is_empty());
}

// --- Search dispatch ---

#[tokio::test]
async fn search_miss_shows_one_toast_and_posts_nothing() {
    let mut bridge = loaded_bridge().await;
    bridge.search_and_highlight("H-999");

    assert_eq!(bridge.ui.toasts, vec!["Room \"H-999\" not found".to_owned()]);
    assert!(bridge.channels.posts.is_empty());
}

#[tokio::test]
async fn search_hit_shows_no_toast() {
    let mut bridge = loaded_bridge().await;
    bridge.search_and_highlight("101");
    assert!(bridge.ui.toasts.is_empty());
}

// --- Tap dispatch ---

#[tokio::test]
async fn tap_path_drawn_forwards_directions_to_the_panel_once() {
    let mut bridge = loaded_bridge().await;
    bridge.core.sdk.directions = Some(sample_directions());
    bridge.on_map_tap(Some("s_lib")).await;
    bridge.on_map_tap(Some("s_caf")).await;
    bridge.on_map_tap(Some("s_lib")).await;

    assert_eq!(bridge.ui.panels, vec![sample_directions()]);
    assert!(bridge.channels.posts.is_empty());
}

#[tokio::test]
async fn first_tap_updates_no_page_widgets() {
    let mut bridge = loaded_bridge().await;
    bridge.on_map_tap(Some("s_lib")).await;
    assert!(bridge.ui.panels.is_empty());
    assert!(bridge.ui.toasts.is_empty());
}

// --- Load dispatch ---

#[tokio::test]
async fn load_populates_the_floor_selector_in_elevation_order() {
    let bridge = loaded_bridge().await;

    assert_eq!(bridge.ui.selector_fills.len(), 1);
    let names: Vec<&str> = bridge.ui.selector_fills[0].iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["Ground", "Mezzanine"]);
}
