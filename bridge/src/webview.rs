//! Browser boundary: the window-level surface the host shell calls.
//!
//! DESIGN
//! ======
//! The page script loads the mapping SDK, renders the map, and hands the
//! `mapView` / `mapData` handles to [`init_map_bridge`]. From then on the
//! bridge owns the interaction: the host shell invokes the exported functions
//! below by their JavaScript names, outcomes flow back over the host's
//! `postMessage` channels, and taps arrive through the SDK's click event.
//!
//! The SDK carries no published types, so calls go through `Reflect` against
//! the raw handles. SDK failures are logged to the console and surface as the
//! not-found / no-path outcomes the contract already covers.
//!
//! LIFECYCLE
//! =========
//! 1. Page script: `show3dMap(...)` → `initMapBridge(mapView, mapData, options)`
//! 2. Bridge loads its data snapshot, fills the floor dropdown, hooks clicks
//! 3. Host shell calls `focusSpace` / `setFloor` / `getDirections` /
//!    `searchAndHighlight`; channels and DOM widgets report back
//!
//! Everything runs on the browser event loop; the singleton lives in a
//! thread-local cell. Async operations take the bridge out of the cell and
//! put it back after the await, so a call landing mid-flight is reported as
//! "not initialized" rather than re-entering shared state.

use std::cell::RefCell;

use js_sys::{Array, Function, Promise, Reflect};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};

use channels::{Channel, ChannelSink};

use crate::consts;
use crate::host::{Bridge, PageUi};
use crate::map::{Floor, FloorId, FloorOption, MapData, Point, Space, SpaceId, SpaceState};
use crate::sdk::{CameraTarget, Directions, MapOptions, MapSdk, PathStyle};

/// Element ids the page template provides.
const TOAST_ELEMENT_ID: &str = "search-error";
const PANEL_ELEMENT_ID: &str = "directions-panel";
const SELECTOR_ELEMENT_ID: &str = "floor-select";

type WebBridge = Bridge<JsMapSdk, PostMessageSink, DomUi>;

thread_local! {
    static BRIDGE: RefCell<Option<WebBridge>> = const { RefCell::new(None) };
}

// =============================================================================
// EXPORTED SURFACE
// =============================================================================

/// Wire the bridge to the SDK objects the page script created, snapshot the
/// map data, fill the floor dropdown, and hook the SDK's click event.
#[wasm_bindgen(js_name = initMapBridge)]
pub fn init_map_bridge(map_view: JsValue, map_data: JsValue, options: JsValue) {
    let options = parse_options(&options).unwrap_or_else(|| {
        warn("map options malformed; continuing with empty credentials");
        MapOptions { key: String::new(), secret: String::new(), map_id: String::new() }
    });

    let sdk = JsMapSdk::new(map_view.clone(), map_data);
    let bridge = Bridge::new(sdk, PostMessageSink, DomUi::new());
    BRIDGE.with(|cell| {
        *cell.borrow_mut() = Some(bridge);
    });

    spawn_local(async move {
        let taken = BRIDGE.with(|cell| cell.borrow_mut().take());
        let Some(mut bridge) = taken else { return };
        bridge.load(&options).await;
        BRIDGE.with(|cell| *cell.borrow_mut() = Some(bridge));
        hook_floor_selector();
        hook_map_clicks(&map_view);
    });
}

/// Animate the camera to the named space. Host-invocable.
#[wasm_bindgen(js_name = focusSpace)]
pub fn focus_space(identifier: String) {
    with_bridge(|bridge| bridge.focus_space(&identifier));
}

/// Switch the visible floor by name. Host-invocable; reports on
/// `FloorsChannel`.
#[wasm_bindgen(js_name = setFloor)]
pub fn set_floor(floor_name: String) {
    with_bridge(|bridge| bridge.set_floor(&floor_name));
}

/// Compute and draw a route. Host-invocable; reports on `DirectionsChannel`.
#[wasm_bindgen(js_name = getDirections)]
pub fn get_directions(start: String, destination: String, accessible: bool) {
    spawn_local(async move {
        let taken = BRIDGE.with(|cell| cell.borrow_mut().take());
        let Some(mut bridge) = taken else {
            warn("map bridge is not initialized");
            return;
        };
        bridge.get_directions(&start, &destination, accessible).await;
        BRIDGE.with(|cell| *cell.borrow_mut() = Some(bridge));
    });
}

/// Highlight the space matching a name or room number. Host-invocable.
#[wasm_bindgen(js_name = searchAndHighlight)]
pub fn search_and_highlight(identifier: String) {
    with_bridge(|bridge| bridge.search_and_highlight(&identifier));
}

fn with_bridge(f: impl FnOnce(&mut WebBridge)) {
    BRIDGE.with(|cell| match cell.borrow_mut().as_mut() {
        Some(bridge) => f(bridge),
        None => warn("map bridge is not initialized"),
    });
}

// =============================================================================
// SDK ADAPTER
// =============================================================================

/// [`MapSdk`] over the SDK objects living in the page.
pub struct JsMapSdk {
    map_view: JsValue,
    map_data: JsValue,
    /// Raw SDK space objects by id, for calls that need the original object.
    space_handles: Vec<(SpaceId, JsValue)>,
    /// Raw directions object from the last successful request; the SDK draws
    /// its own object, so the typed [`Directions`] alone is not enough.
    last_directions: Option<JsValue>,
}

impl JsMapSdk {
    #[must_use]
    pub fn new(map_view: JsValue, map_data: JsValue) -> Self {
        Self { map_view, map_data, space_handles: Vec::new(), last_directions: None }
    }

    fn space_handle(&self, id: &str) -> Option<&JsValue> {
        self.space_handles.iter().find(|(sid, _)| sid == id).map(|(_, value)| value)
    }

    fn view_part(&self, name: &str) -> JsValue {
        js_get(&self.map_view, name)
    }

    fn read_spaces(&mut self) -> Vec<Space> {
        let raw = js_call(&self.map_data, "getByType", &[&JsValue::from_str("space")]);
        let Some(list) = raw.dyn_ref::<Array>() else { return Vec::new() };

        let mut spaces = Vec::new();
        for item in list.iter() {
            let Some(id) = js_get(&item, "id").as_string() else { continue };
            let Some(name) = js_get(&item, "name").as_string() else { continue };
            let number = js_get(&item, "number").as_string();
            let center = read_point(&js_get(&js_get(&item, "geometry"), "center"));
            self.space_handles.push((id.clone(), item));
            spaces.push(Space { id, name, number, center });
        }
        spaces
    }

    fn read_floors(&self) -> Vec<Floor> {
        let raw = js_call(&self.map_data, "getByType", &[&JsValue::from_str("floor")]);
        let Some(list) = raw.dyn_ref::<Array>() else { return Vec::new() };

        let mut floors = Vec::new();
        for item in list.iter() {
            let Some(id) = js_get(&item, "id").as_string() else { continue };
            let Some(name) = js_get(&item, "name").as_string() else { continue };
            let elevation = js_get(&item, "elevation").as_f64().unwrap_or(0.0);
            floors.push(Floor { id, name, elevation });
        }
        floors
    }
}

#[async_trait::async_trait(?Send)]
impl MapSdk for JsMapSdk {
    async fn load_map_data(&mut self, _options: &MapOptions) -> MapData {
        // The page script already initialized the SDK with these options;
        // here we only snapshot the data it produced.
        self.space_handles.clear();
        MapData { spaces: self.read_spaces(), floors: self.read_floors() }
    }

    fn animate_camera(&mut self, target: CameraTarget) {
        let camera = self.view_part("Camera");
        js_call(&camera, "animateTo", &[&to_js(&target)]);
    }

    fn set_floor(&mut self, floor: &FloorId) {
        js_call(&self.map_view, "setFloor", &[&JsValue::from_str(floor)]);
    }

    async fn get_directions(
        &mut self,
        start: &SpaceId,
        destination: &SpaceId,
        accessible: bool,
    ) -> Option<Directions> {
        let from = self.space_handle(start)?.clone();
        let to = self.space_handle(destination)?.clone();
        let options = to_js(&serde_json::json!({ "accessible": accessible }));

        let raw = js_call(&self.map_data, "getDirections", &[&from, &to, &options]);
        let Ok(promise) = raw.dyn_into::<Promise>() else { return None };
        let resolved = match JsFuture::from(promise).await {
            Ok(value) => value,
            Err(error) => {
                web_sys::console::warn_1(&error);
                return None;
            }
        };
        if resolved.is_null() || resolved.is_undefined() {
            return None;
        }
        // No path on the result means the SDK found no route.
        let path = js_get(&resolved, "path");
        if path.is_null() || path.is_undefined() {
            return None;
        }

        let directions = Directions {
            distance: js_get(&resolved, "distance").as_f64().unwrap_or(0.0),
            instructions: read_instructions(&js_get(&resolved, "instructions")),
            coordinates: read_points(&js_get(&resolved, "coordinates")),
        };
        self.last_directions = Some(resolved);
        Some(directions)
    }

    fn clear_navigation(&mut self) {
        let navigation = self.view_part("Navigation");
        js_call(&navigation, "clear", &[]);
    }

    fn draw_navigation(&mut self, _directions: &Directions) {
        // The SDK draws its own directions instance, kept from the request.
        let Some(raw) = &self.last_directions else { return };
        let navigation = js_get(&self.map_view, "Navigation");
        js_call(&navigation, "draw", &[raw]);
    }

    fn add_path(&mut self, coordinates: &[Point], style: &PathStyle) {
        let paths = self.view_part("Paths");
        js_call(&paths, "add", &[&to_js(coordinates), &to_js(style)]);
    }

    fn remove_all_paths(&mut self) {
        let paths = self.view_part("Paths");
        js_call(&paths, "removeAll", &[]);
    }

    fn update_space_state(&mut self, space: &SpaceId, state: &SpaceState) {
        let Some(handle) = self.space_handle(space) else { return };
        js_call(&self.map_view, "updateState", &[handle, &to_js(state)]);
    }

    fn show_labels(&mut self) {
        let labels = self.view_part("Labels");
        js_call(&labels, "all", &[]);
    }
}

// =============================================================================
// CHANNEL SINK
// =============================================================================

/// Posts messages to the host shell's named channel objects on `window`.
pub struct PostMessageSink;

impl ChannelSink for PostMessageSink {
    fn post(&mut self, channel: Channel, message: &str) {
        let Some(window) = web_sys::window() else { return };
        let global: &JsValue = window.as_ref();
        let receiver = js_get(global, channel.name());
        if receiver.is_null() || receiver.is_undefined() {
            warn(&format!("{channel} is not registered on window"));
            return;
        }
        js_call(&receiver, "postMessage", &[&JsValue::from_str(message)]);
    }
}

// =============================================================================
// DOM WIDGETS
// =============================================================================

/// DOM widgets around the map surface: the search toast, the directions
/// panel, and the floor dropdown.
pub struct DomUi {
    document: Option<web_sys::Document>,
}

impl DomUi {
    #[must_use]
    pub fn new() -> Self {
        Self { document: web_sys::window().and_then(|w| w.document()) }
    }

    fn element(&self, id: &str) -> Option<web_sys::Element> {
        self.document.as_ref().and_then(|d| d.get_element_by_id(id))
    }
}

impl Default for DomUi {
    fn default() -> Self {
        Self::new()
    }
}

impl PageUi for DomUi {
    fn show_error_toast(&mut self, message: &str) {
        let Some(toast) = self.element(TOAST_ELEMENT_ID) else { return };
        toast.set_text_content(Some(message));
        set_style(&toast, "display: block");

        let hide = self.element(TOAST_ELEMENT_ID);
        gloo_timers::callback::Timeout::new(consts::TOAST_DISMISS_MS, move || {
            if let Some(toast) = hide {
                set_style(&toast, "display: none");
            }
        })
        .forget();
    }

    fn show_directions(&mut self, directions: &Directions) {
        let Some(panel) = self.element(PANEL_ELEMENT_ID) else { return };
        panel.set_text_content(Some(&directions.instructions.join("\n")));
    }

    fn populate_floor_selector(&mut self, options: &[FloorOption]) {
        let Some(select) = self.element(SELECTOR_ELEMENT_ID) else { return };
        let Some(document) = self.document.clone() else { return };

        // Drop whatever options the template shipped with.
        select.set_text_content(None);
        for option in options {
            let Ok(node) = document.create_element("option") else { continue };
            if let Err(error) = node.set_attribute("value", &option.id) {
                web_sys::console::warn_1(&error);
                continue;
            }
            node.set_text_content(Some(&option.name));
            if let Err(error) = select.append_child(&node) {
                web_sys::console::warn_1(&error);
            }
        }
    }
}

fn set_style(element: &web_sys::Element, style: &str) {
    if let Err(error) = element.set_attribute("style", style) {
        web_sys::console::warn_1(&error);
    }
}

// =============================================================================
// EVENT HOOKS
// =============================================================================

fn hook_floor_selector() {
    let found = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(SELECTOR_ELEMENT_ID));
    let Some(element) = found else { return };
    let Ok(select) = element.dyn_into::<web_sys::HtmlSelectElement>() else { return };

    let handle = select.clone();
    let on_change = Closure::<dyn FnMut()>::new(move || {
        let floor = handle.value();
        if floor.is_empty() {
            return;
        }
        with_bridge(|bridge| bridge.select_floor(&floor));
    });
    if let Err(error) =
        select.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
    {
        web_sys::console::warn_1(&error);
    }
    on_change.forget();
}

fn hook_map_clicks(map_view: &JsValue) {
    let on_click = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
        let tapped = first_tapped_space(&event);
        spawn_local(async move {
            let taken = BRIDGE.with(|cell| cell.borrow_mut().take());
            let Some(mut bridge) = taken else { return };
            bridge.on_map_tap(tapped.as_deref()).await;
            BRIDGE.with(|cell| *cell.borrow_mut() = Some(bridge));
        });
    });
    js_call(map_view, "on", &[&JsValue::from_str("click"), on_click.as_ref()]);
    on_click.forget();
}

fn first_tapped_space(event: &JsValue) -> Option<String> {
    let raw = js_get(event, "spaces");
    let list = raw.dyn_ref::<Array>()?;
    if list.length() == 0 {
        return None;
    }
    js_get(&list.get(0), "id").as_string()
}

// =============================================================================
// JS HELPERS
// =============================================================================

fn js_get(target: &JsValue, key: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

fn js_call(target: &JsValue, name: &str, args: &[&JsValue]) -> JsValue {
    let member = js_get(target, name);
    let Some(func) = member.dyn_ref::<Function>() else {
        warn(&format!("map sdk: `{name}` is not callable"));
        return JsValue::UNDEFINED;
    };
    let list = Array::new();
    for arg in args {
        list.push(arg);
    }
    match Reflect::apply(func, target, &list) {
        Ok(value) => value,
        Err(error) => {
            warn(&format!("map sdk: `{name}` threw"));
            web_sys::console::warn_1(&error);
            JsValue::UNDEFINED
        }
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    match serde_json::to_string(value) {
        Ok(text) => js_sys::JSON::parse(&text).unwrap_or(JsValue::NULL),
        Err(_) => JsValue::NULL,
    }
}

fn read_point(value: &JsValue) -> Point {
    Point {
        x: js_get(value, "x").as_f64().unwrap_or(0.0),
        y: js_get(value, "y").as_f64().unwrap_or(0.0),
    }
}

fn read_points(value: &JsValue) -> Vec<Point> {
    let Some(list) = value.dyn_ref::<Array>() else { return Vec::new() };
    list.iter().map(|item| read_point(&item)).collect()
}

fn read_instructions(value: &JsValue) -> Vec<String> {
    let Some(list) = value.dyn_ref::<Array>() else { return Vec::new() };
    list.iter()
        .map(|item| {
            // Instructions arrive either as plain strings or as objects with
            // an `instruction` text field.
            item.as_string()
                .or_else(|| js_get(&item, "instruction").as_string())
                .unwrap_or_default()
        })
        .collect()
}

fn parse_options(value: &JsValue) -> Option<MapOptions> {
    let Ok(text) = js_sys::JSON::stringify(value) else { return None };
    match serde_json::from_str(&String::from(text)) {
        Ok(options) => Some(options),
        Err(_) => None,
    }
}

fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}
