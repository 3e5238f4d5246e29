use super::*;

fn space(id: &str, name: &str, number: Option<&str>) -> Space {
    Space {
        id: id.to_owned(),
        name: name.to_owned(),
        number: number.map(str::to_owned),
        center: Point::new(0.0, 0.0),
    }
}

fn floor(id: &str, name: &str, elevation: f64) -> Floor {
    Floor { id: id.to_owned(), name: name.to_owned(), elevation }
}

fn sample_map() -> MapData {
    MapData {
        spaces: vec![
            space("s_1", "Library", Some("101")),
            space("s_2", "Cafeteria", Some("102")),
            space("s_3", "H-820", None),
        ],
        floors: vec![
            floor("f_2", "Level 2", 2.0),
            floor("f_0", "Ground", 0.0),
            floor("f_1", "Mezzanine", 1.0),
        ],
    }
}

// --- Space lookups ---

#[test]
fn space_by_name_exact_match() {
    let map = sample_map();
    assert_eq!(map.space_by_name("Library").map(|s| s.id.as_str()), Some("s_1"));
}

#[test]
fn space_by_name_is_case_sensitive() {
    let map = sample_map();
    assert!(map.space_by_name("library").is_none());
}

#[test]
fn space_by_name_misses_on_substring() {
    let map = sample_map();
    assert!(map.space_by_name("Lib").is_none());
}

#[test]
fn space_by_name_or_id_prefers_name() {
    let mut map = sample_map();
    // A space whose *name* equals another space's id.
    map.spaces.push(space("s_9", "s_1", None));
    assert_eq!(map.space_by_name_or_id("s_1").map(|s| s.id.as_str()), Some("s_9"));
}

#[test]
fn space_by_name_or_id_falls_back_to_id() {
    let map = sample_map();
    assert_eq!(map.space_by_name_or_id("s_2").map(|s| s.name.as_str()), Some("Cafeteria"));
}

#[test]
fn space_by_name_or_number_falls_back_to_number() {
    let map = sample_map();
    assert_eq!(map.space_by_name_or_number("102").map(|s| s.id.as_str()), Some("s_2"));
}

#[test]
fn space_by_name_or_number_prefers_name() {
    let mut map = sample_map();
    map.spaces.push(space("s_4", "102", None));
    assert_eq!(map.space_by_name_or_number("102").map(|s| s.id.as_str()), Some("s_4"));
}

#[test]
fn space_lookup_first_match_wins_on_duplicates() {
    let mut map = sample_map();
    map.spaces.push(space("s_5", "Library", None));
    assert_eq!(map.space_by_name("Library").map(|s| s.id.as_str()), Some("s_1"));
}

#[test]
fn space_without_number_never_matches_by_number() {
    let map = sample_map();
    assert!(map.space_by_name_or_number("H-999").is_none());
}

// --- Floor lookups ---

#[test]
fn floor_by_name_exact_match() {
    let map = sample_map();
    assert_eq!(map.floor_by_name("Mezzanine").map(|f| f.id.as_str()), Some("f_1"));
}

#[test]
fn floor_by_name_is_case_sensitive() {
    let map = sample_map();
    assert!(map.floor_by_name("mezzanine").is_none());
}

// --- Floor ordering ---

#[test]
fn floors_by_elevation_is_non_decreasing() {
    let map = sample_map();
    let ordered: Vec<&str> = map.floors_by_elevation().iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ordered, vec!["f_0", "f_1", "f_2"]);
}

#[test]
fn floors_by_elevation_is_stable_for_ties() {
    let map = MapData {
        spaces: Vec::new(),
        floors: vec![floor("f_a", "A wing", 1.0), floor("f_b", "B wing", 1.0), floor("f_c", "Basement", -1.0)],
    };
    let ordered: Vec<&str> = map.floors_by_elevation().iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ordered, vec!["f_c", "f_a", "f_b"]);
}

#[test]
fn floors_by_elevation_handles_empty_set() {
    let map = MapData::default();
    assert!(map.floors_by_elevation().is_empty());
}

#[test]
fn floors_by_elevation_handles_negative_elevations() {
    let map = MapData {
        spaces: Vec::new(),
        floors: vec![floor("f_1", "Ground", 0.0), floor("f_b2", "Parking 2", -2.0), floor("f_b1", "Parking 1", -1.0)],
    };
    let ordered: Vec<&str> = map.floors_by_elevation().iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ordered, vec!["f_b2", "f_b1", "f_1"]);
}

// --- Space states ---

#[test]
fn base_state_is_interactive_with_hover_color() {
    let state = SpaceState::base();
    assert!(state.interactive);
    assert_eq!(state.hover_color.as_deref(), Some(crate::consts::HOVER_COLOR));
    assert!(state.color.is_none());
}

#[test]
fn inert_state_clears_hover_color() {
    let state = SpaceState::inert();
    assert!(!state.interactive);
    assert!(state.hover_color.is_none());
}

#[test]
fn highlighted_state_sets_fill_color() {
    let state = SpaceState::highlighted();
    assert!(state.interactive);
    assert_eq!(state.color.as_deref(), Some(crate::consts::HIGHLIGHT_COLOR));
}

#[test]
fn space_state_serializes_cleared_colors_as_null() {
    let value = serde_json::to_value(SpaceState::inert()).expect("serialize");
    assert_eq!(
        value,
        serde_json::json!({
            "interactive": false,
            "hoverColor": null,
            "color": null,
            "opacity": 1.0
        })
    );
}

// --- Wire derives ---

#[test]
fn space_deserializes_from_camel_case() {
    let space: Space = serde_json::from_str(
        r#"{"id":"s_7","name":"Gym","number":"G-10","center":{"x":4.5,"y":-2.0}}"#,
    )
    .expect("deserialize");
    assert_eq!(space.number.as_deref(), Some("G-10"));
    assert_eq!(space.center, Point::new(4.5, -2.0));
}

#[test]
fn space_number_defaults_to_none() {
    let space: Space =
        serde_json::from_str(r#"{"id":"s_8","name":"Hall","center":{"x":0.0,"y":0.0}}"#)
            .expect("deserialize");
    assert!(space.number.is_none());
}
