//! Drag-and-drop sortable lists, tap normalization, and eased scrolling.
//!
//! This crate is compiled to WebAssembly and runs in the browser, but the
//! engine itself is headless. It owns the full lifecycle of a reorder gesture:
//! translating raw pointer events into drag sessions, ranking drop candidates
//! by geometry, and committing the move into the ordered collections held by
//! the list registry. The host layer only wires DOM events to the engine,
//! answers geometry queries through [`layout::Layout`], and applies the
//! resulting [`engine::Action`]s to the document.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::SortableCore`] and the actions it emits |
//! | [`session`] | Drag session state machine (idle, armed, dragging, settling) |
//! | [`candidate`] | Drop-candidate ranking and grid/list detection |
//! | [`registry`] | List registry: groups, containers, ordered items |
//! | [`layout`] | Geometry queries the host answers for the engine |
//! | [`reorder`] | Pure move/transfer helpers over ordered sequences |
//! | [`pointer`] | Mouse/touch event model and coordinate normalization |
//! | [`tap`] | Tap-vs-drag classification and ghost-click suppression |
//! | [`caps`] | User-agent capability probe, resolved once |
//! | [`easing`] | The closed set of named easing curves |
//! | [`scroll`] | Eased smooth-scroll animator |
//! | [`config`] | Sorting and scrolling options, parsed from attributes |
//! | [`geometry`] | Points and rectangles |
//! | [`web`] | `web-sys` adapters: layout, smooth scroll, tap layer, event listeners |
//! | [`consts`] | Shared numeric defaults |

pub mod candidate;
pub mod caps;
pub mod config;
pub mod consts;
pub mod easing;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod pointer;
pub mod registry;
pub mod reorder;
pub mod scroll;
pub mod session;
pub mod tap;
pub mod web;

pub use error::SortableError;
