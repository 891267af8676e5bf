//! Browser adapters: `web-sys` implementations of the engine's host traits.
//!
//! Nothing in here carries logic of its own. Each adapter forwards to the
//! DOM and converts between DOM numbers and the engine's `f64` geometry.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, warn};
use uuid::Uuid;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    Element, Event, EventTarget, HtmlElement, MouseEvent, MouseEventInit, TouchEvent, TouchList, UiEvent, Window,
};

use crate::caps::Capabilities;
use crate::config::{ScrollOptions, SortOptions};
use crate::consts::SCROLL_TICK_MS;
use crate::engine::{Action, SortableCore};
use crate::geometry::{Point, Rect};
use crate::layout::{Layout, Node};
use crate::pointer::{Button, EventKind, EventLayer, PointerEvent, TouchPoint};
use crate::registry::ItemId;
use crate::scroll::{self, ScrollHost, ScrollRun};
use crate::tap::{self, MouseSample, TapConfig, TapEffects, TapEvent, TapTracker, TouchSample};

/// Milliseconds since the epoch, from the JS clock.
#[must_use]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

// --- Layout ---

/// Layout answered by live DOM elements.
#[derive(Debug, Default)]
pub struct DomLayout {
    elements: HashMap<Uuid, Element>,
    placeholder: Option<Element>,
}

impl DomLayout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate a registered item or container with its element.
    pub fn bind(&mut self, id: Uuid, element: Element) {
        self.elements.insert(id, element);
    }

    pub fn unbind(&mut self, id: Uuid) {
        self.elements.remove(&id);
    }

    pub fn set_placeholder(&mut self, element: Option<Element>) {
        self.placeholder = element;
    }

    fn element(&self, node: Node) -> Option<&Element> {
        match node {
            Node::Item(id) | Node::Container(id) => self.elements.get(&id),
            Node::Placeholder => self.placeholder.as_ref(),
        }
    }
}

fn client_rect(element: &Element) -> Rect {
    let r = element.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

impl Layout for DomLayout {
    fn bounds(&self, node: Node) -> Option<Rect> {
        self.element(node).map(client_rect)
    }

    fn is_visible(&self, node: Node) -> bool {
        self.element(node).is_some_and(|el| el.scroll_height() > 0 || el.scroll_width() > 0)
    }

    fn within(&self, node: Node, selector: &str) -> bool {
        self.element(node).is_some_and(|el| matches!(el.closest(selector), Ok(Some(_))))
    }

    fn containment_bounds(&self, item: ItemId, selector: &str) -> Option<Rect> {
        let element = self.element(Node::Item(item))?;
        match element.closest(selector) {
            Ok(Some(ancestor)) => Some(client_rect(&ancestor)),
            Ok(None) => None,
            Err(e) => {
                warn!(selector, error = ?e, "invalid containment selector");
                None
            }
        }
    }
}

// --- Scrolling ---

/// Sum of `offsetTop` along the offset-parent chain, starting at `element`.
///
/// Detached elements (no offset parent) contribute nothing.
#[must_use]
pub fn offset_chain(element: &HtmlElement) -> Vec<f64> {
    let mut tops = Vec::new();
    if element.offset_parent().is_none() {
        return tops;
    }
    let mut el = element.clone();
    loop {
        tops.push(f64::from(el.offset_top()));
        let Some(parent) = el.offset_parent() else {
            break;
        };
        let Ok(parent) = parent.dyn_into::<HtmlElement>() else {
            break;
        };
        el = parent;
    }
    tops
}

#[allow(clippy::cast_possible_truncation)]
fn to_px(value: f64) -> i32 {
    value.round() as i32
}

/// Window scrolling.
pub struct WindowScroll {
    window: Window,
}

impl WindowScroll {
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl ScrollHost for WindowScroll {
    fn scroll_top(&self) -> f64 {
        self.window.page_y_offset().unwrap_or(0.0)
    }

    fn set_scroll_top(&mut self, top: f64) {
        self.window.scroll_to_with_x_and_y(0.0, top);
    }

    fn client_height(&self) -> f64 {
        self.window.inner_height().map_or(0.0, |h| h.as_f64().unwrap_or(0.0))
    }

    fn scroll_height(&self) -> Option<f64> {
        let root = self.window.document()?.document_element()?;
        Some(f64::from(root.scroll_height()))
    }
}

/// Scrolling inside a container element.
pub struct ElementScroll {
    element: Element,
}

impl ElementScroll {
    #[must_use]
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    /// The container with `id`, if the document has one.
    #[must_use]
    pub fn by_id(window: &Window, id: &str) -> Option<Self> {
        window.document()?.get_element_by_id(id).map(Self::new)
    }
}

impl ScrollHost for ElementScroll {
    fn scroll_top(&self) -> f64 {
        f64::from(self.element.scroll_top())
    }

    fn set_scroll_top(&mut self, top: f64) {
        self.element.set_scroll_top(to_px(top));
    }

    fn client_height(&self) -> f64 {
        f64::from(self.element.client_height())
    }

    fn scroll_height(&self) -> Option<f64> {
        Some(f64::from(self.element.scroll_height()))
    }
}

/// The window, or the container named by `ScrollOptions::container_id`.
pub enum DomScroll {
    Window(WindowScroll),
    Element(ElementScroll),
}

impl DomScroll {
    /// Resolve the scroll surface for `options`. A container id the document
    /// does not know falls back to the window.
    #[must_use]
    pub fn for_options(window: &Window, options: &ScrollOptions) -> Self {
        if let Some(id) = options.container_id.as_deref() {
            if let Some(container) = ElementScroll::by_id(window, id) {
                return Self::Element(container);
            }
            warn!(container_id = id, "scroll container not found; scrolling the window");
        }
        Self::Window(WindowScroll::new(window.clone()))
    }

    fn host(&self) -> &dyn ScrollHost {
        match self {
            Self::Window(w) => w as &dyn ScrollHost,
            Self::Element(e) => e as &dyn ScrollHost,
        }
    }

    fn host_mut(&mut self) -> &mut dyn ScrollHost {
        match self {
            Self::Window(w) => w as &mut dyn ScrollHost,
            Self::Element(e) => e as &mut dyn ScrollHost,
        }
    }
}

impl ScrollHost for DomScroll {
    fn scroll_top(&self) -> f64 {
        self.host().scroll_top()
    }

    fn set_scroll_top(&mut self, top: f64) {
        self.host_mut().set_scroll_top(top);
    }

    fn client_height(&self) -> f64 {
        self.host().client_height()
    }

    fn scroll_height(&self) -> Option<f64> {
        self.host().scroll_height()
    }
}

type SharedRun = Rc<RefCell<ScrollRun<DomScroll>>>;

/// A running smooth scroll. Dropping the handle stops it.
pub struct ScrollHandle {
    window: Window,
    run: SharedRun,
    interval: Rc<Cell<Option<i32>>>,
    _tick: Closure<dyn FnMut()>,
}

impl ScrollHandle {
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.interval.get().is_some()
    }

    /// End the scroll where it is; the end hook runs if it has not yet.
    pub fn stop(&self) {
        clear_interval(&self.window, &self.interval);
        match self.run.try_borrow_mut() {
            Ok(mut run) => run.stop(),
            Err(e) => warn!(error = %e, "scroll stopped while ticking"),
        }
    }
}

impl Drop for ScrollHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

fn clear_interval(window: &Window, interval: &Cell<Option<i32>>) {
    if let Some(id) = interval.take() {
        window.clear_interval_with_handle(id);
    }
}

/// Smoothly scroll so `target` sits `options.offset` pixels below the top of
/// the window or of the container named in `options`.
///
/// `on_start` runs before the first tick and `on_end` exactly once, when the
/// scroll converges or is stopped.
pub fn animate_scroll(
    window: &Window,
    target: &HtmlElement,
    options: &ScrollOptions,
    on_start: impl FnOnce() + 'static,
    on_end: impl FnOnce() + 'static,
) -> ScrollHandle {
    let host = DomScroll::for_options(window, options);
    let run = scroll::animate(host, offset_chain(target), options).on_start(on_start).on_end(on_end);
    let run: SharedRun = Rc::new(RefCell::new(run));
    let interval = Rc::new(Cell::new(None));

    let tick = {
        let run = Rc::clone(&run);
        let interval = Rc::clone(&interval);
        let window = window.clone();
        Closure::<dyn FnMut()>::new(move || {
            let more = run.try_borrow_mut().is_ok_and(|mut run| run.tick());
            if !more {
                clear_interval(&window, &interval);
            }
        })
    };

    if let Ok(mut run) = run.try_borrow_mut() {
        run.start();
    }
    match window.set_interval_with_callback_and_timeout_and_arguments_0(tick.as_ref().unchecked_ref(), to_px(SCROLL_TICK_MS))
    {
        Ok(id) => interval.set(Some(id)),
        Err(e) => {
            warn!(error = ?e, "failed to start scroll timer");
            if let Ok(mut run) = run.try_borrow_mut() {
                run.stop();
            }
        }
    }

    ScrollHandle { window: window.clone(), run, interval, _tick: tick }
}

// --- Events ---

/// Convert a DOM mouse event.
#[must_use]
pub fn mouse_event(ev: &MouseEvent) -> PointerEvent {
    PointerEvent::mouse(
        f64::from(ev.client_x()),
        f64::from(ev.client_y()),
        Button::from_code(ev.button()),
        now_ms(),
    )
}

fn touch_points(list: &TouchList) -> Vec<TouchPoint> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| TouchPoint {
            identifier: i64::from(t.identifier()),
            client: Point::new(f64::from(t.client_x()), f64::from(t.client_y())),
            page: Point::new(f64::from(t.page_x()), f64::from(t.page_y())),
        })
        .collect()
}

/// Convert a DOM touch event, reading its target touches.
#[must_use]
pub fn touch_event(ev: &TouchEvent) -> PointerEvent {
    PointerEvent::touch(touch_points(&ev.target_touches()), now_ms())
}

type Handler = Rc<dyn Fn(EventKind, Event)>;

/// Event layer over a DOM target. Every listener it adds is kept so it can
/// be removed with the exact same function and phase.
pub struct ListenerLayer {
    target: EventTarget,
    handler: Handler,
    listeners: HashMap<(EventKind, bool), Closure<dyn FnMut(Event)>>,
}

impl ListenerLayer {
    #[must_use]
    pub fn new(target: EventTarget, handler: Handler) -> Self {
        Self { target, handler, listeners: HashMap::new() }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl EventLayer for ListenerLayer {
    fn add_listener(&mut self, kind: EventKind, capture: bool) {
        if self.listeners.contains_key(&(kind, capture)) {
            return;
        }
        let handler = Rc::clone(&self.handler);
        let closure = Closure::<dyn FnMut(Event)>::new(move |ev: Event| handler(kind, ev));
        if let Err(e) = self.target.add_event_listener_with_callback_and_bool(
            kind.name(),
            closure.as_ref().unchecked_ref(),
            capture,
        ) {
            warn!(event = kind.name(), error = ?e, "failed to add listener");
            return;
        }
        self.listeners.insert((kind, capture), closure);
    }

    fn remove_listener(&mut self, kind: EventKind, capture: bool) {
        let Some(closure) = self.listeners.remove(&(kind, capture)) else {
            return;
        };
        if let Err(e) = self.target.remove_event_listener_with_callback_and_bool(
            kind.name(),
            closure.as_ref().unchecked_ref(),
            capture,
        ) {
            warn!(event = kind.name(), error = ?e, "failed to remove listener");
        }
    }
}

// --- Tap layer ---

/// Ids for tap targets. Touch events keep targeting the element the touch
/// started on, so only that element needs a stable id.
#[derive(Default)]
struct TapTargets {
    next: u64,
    current: Option<(u64, Element)>,
}

impl TapTargets {
    fn id_of(&mut self, element: &Element, starting: bool) -> u64 {
        if let Some((id, current)) = &self.current {
            if current == element {
                return *id;
            }
        }
        self.next += 1;
        if starting {
            self.current = Some((self.next, element.clone()));
        }
        self.next
    }

    fn element(&self, id: u64) -> Option<&Element> {
        self.current.as_ref().filter(|(current, _)| *current == id).map(|(_, el)| el)
    }
}

fn tap_element(element: &Element, id: u64) -> tap::Element {
    let mut out = tap::Element::new(id, &element.tag_name());
    out.input_type = element.get_attribute("type");
    out.disabled = element.has_attribute("disabled");
    out.read_only = element.has_attribute("readonly");
    out.classes = element.class_name().split_whitespace().map(str::to_owned).collect();
    out
}

fn event_element(ev: &Event) -> Option<Element> {
    ev.target()?.dyn_ref::<Element>().cloned()
}

/// Shared state behind the tap layer's listeners.
struct TapState {
    tracker: RefCell<TapTracker>,
    targets: RefCell<TapTargets>,
    /// Set while the layer dispatches its own click.
    forwarding: Cell<bool>,
}

impl TapState {
    fn sample(&self, kind: EventKind, ev: &Event) -> Option<TapEvent> {
        match kind {
            EventKind::TouchStart | EventKind::TouchMove | EventKind::TouchEnd => {
                let touch = ev.dyn_ref::<TouchEvent>()?;
                let element = event_element(ev)?;
                let starting = kind == EventKind::TouchStart;
                let Ok(mut targets) = self.targets.try_borrow_mut() else {
                    return None;
                };
                let id = targets.id_of(&element, starting);
                let list = if starting { touch.target_touches() } else { touch.changed_touches() };
                let sample =
                    TouchSample { target: tap_element(&element, id), touches: touch_points(&list), timestamp: now_ms() };
                Some(match kind {
                    EventKind::TouchStart => TapEvent::TouchStart(sample),
                    EventKind::TouchMove => TapEvent::TouchMove(sample),
                    _ => TapEvent::TouchEnd(sample),
                })
            }
            EventKind::TouchCancel => Some(TapEvent::TouchCancel),
            EventKind::Click | EventKind::MouseOver | EventKind::MouseDown | EventKind::MouseUp => {
                let submit = event_element(ev).is_some_and(|el| {
                    el.tag_name().eq_ignore_ascii_case("input") && el.get_attribute("type").as_deref() == Some("submit")
                });
                let sample = MouseSample {
                    forwarded: self.forwarding.get(),
                    cancelable: ev.cancelable(),
                    keyboard_submit: submit && ev.dyn_ref::<UiEvent>().is_some_and(|ui| ui.detail() == 0),
                };
                Some(if kind == EventKind::Click { TapEvent::Click(sample) } else { TapEvent::Mouse(sample) })
            }
        }
    }

    fn on_event(&self, kind: EventKind, ev: &Event) {
        let Some(sample) = self.sample(kind, ev) else {
            return;
        };
        // The tracker borrow ends here; a synthetic click re-enters `on_event`.
        let effects = match self.tracker.try_borrow_mut() {
            Ok(mut tracker) => tracker.handle(&sample),
            Err(e) => {
                warn!(event = kind.name(), error = %e, "tap event re-entered the tracker");
                return;
            }
        };
        self.apply(ev, effects);
    }

    fn apply(&self, ev: &Event, effects: TapEffects) {
        if effects.stop_propagation {
            ev.stop_immediate_propagation();
        }
        if effects.prevent_default {
            ev.prevent_default();
        }
        let Some(id) = effects.click else {
            return;
        };
        let element = match self.targets.try_borrow() {
            Ok(targets) => targets.element(id).cloned(),
            Err(_) => None,
        };
        let Some(element) = element else {
            return;
        };
        if effects.focus == Some(id) {
            if let Some(html) = element.dyn_ref::<HtmlElement>() {
                if let Err(e) = html.focus() {
                    warn!(error = ?e, "tap target refused focus");
                }
            }
        }
        self.send_click(&element, ev);
    }

    fn send_click(&self, element: &Element, ev: &Event) {
        let init = MouseEventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        if let Some(touch) = ev.dyn_ref::<TouchEvent>().and_then(|t| t.changed_touches().get(0)) {
            init.set_client_x(touch.client_x());
            init.set_client_y(touch.client_y());
            init.set_screen_x(touch.screen_x());
            init.set_screen_y(touch.screen_y());
        }
        let click = match MouseEvent::new_with_mouse_event_init_dict("click", &init) {
            Ok(click) => click,
            Err(e) => {
                warn!(error = ?e, "failed to build synthetic click");
                return;
            }
        };
        self.forwarding.set(true);
        let dispatched = element.dispatch_event(&click);
        self.forwarding.set(false);
        match dispatched {
            Ok(_) => debug!("synthetic click dispatched"),
            Err(e) => warn!(error = ?e, "failed to dispatch synthetic click"),
        }
    }
}

/// A [`TapTracker`] wired to a DOM root. Dropping the layer removes every
/// listener it added.
pub struct TapLayer {
    state: Rc<TapState>,
    layer: ListenerLayer,
}

impl TapLayer {
    /// Track taps on `root`, for the device described by `caps`.
    #[must_use]
    pub fn attach(root: EventTarget, config: TapConfig, caps: Capabilities) -> Self {
        let state = Rc::new(TapState {
            tracker: RefCell::new(TapTracker::new(config, caps)),
            targets: RefCell::new(TapTargets::default()),
            forwarding: Cell::new(false),
        });
        let handler: Handler = {
            let state = Rc::clone(&state);
            Rc::new(move |kind: EventKind, ev: Event| state.on_event(kind, &ev))
        };
        let mut layer = ListenerLayer::new(root, handler);
        if let Ok(mut tracker) = state.tracker.try_borrow_mut() {
            tracker.attach(&mut layer);
        }
        Self { state, layer }
    }

    /// Probe the current browser's user agent and attach to its document.
    #[must_use]
    pub fn for_document(window: &Window) -> Option<Self> {
        let caps = Capabilities::from_user_agent(&window.navigator().user_agent().unwrap_or_default());
        let root: EventTarget = window.document()?.into();
        Some(Self::attach(root, TapConfig::default(), caps))
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.layer.len()
    }

    /// Remove every listener. Idempotent.
    pub fn destroy(&mut self) {
        match self.state.tracker.try_borrow_mut() {
            Ok(mut tracker) => tracker.destroy(&mut self.layer),
            Err(e) => warn!(error = %e, "tap layer destroyed while handling an event"),
        }
    }
}

impl Drop for TapLayer {
    fn drop(&mut self) {
        self.destroy();
    }
}

// --- Engine wrapper ---

/// The sortable engine bound to live DOM geometry.
#[derive(Debug, Default)]
pub struct Sortable {
    pub core: SortableCore,
    pub layout: DomLayout,
}

impl Sortable {
    #[must_use]
    pub fn new(core: SortableCore) -> Self {
        Self { core, layout: DomLayout::new() }
    }

    pub fn on_pointer_down(&mut self, target: Uuid, ev: &PointerEvent, options: &SortOptions) -> Vec<Action> {
        self.core.pointer_down(target, ev, options, &self.layout)
    }

    pub fn on_pointer_move(&mut self, item: ItemId, ev: &PointerEvent) -> Vec<Action> {
        self.core.pointer_move(item, ev, &self.layout)
    }

    pub fn on_pointer_up(&mut self, item: ItemId) -> Vec<Action> {
        self.core.pointer_up(item, &self.layout)
    }

    pub fn on_pointer_cancel(&mut self, item: ItemId) -> Vec<Action> {
        self.core.pointer_cancel(item)
    }

    pub fn on_tick(&mut self, dt: f64) -> Vec<Action> {
        self.core.tick(dt)
    }
}

/// Serialize actions for a JS host.
///
/// # Errors
///
/// Returns the serializer error if an action cannot be encoded.
pub fn actions_json(actions: &[Action]) -> Result<String, serde_json::Error> {
    serde_json::to_string(actions)
}
