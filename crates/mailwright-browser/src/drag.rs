//! Pointer drag sessions.
//!
//! A [`DragSession`] owns the window listeners for one column drag. It exists
//! from pointer-down on a handle until the drag ends; dropping it detaches
//! every listener, so a drag can never leave handlers behind.

use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{KeyboardEvent, PointerEvent};

/// How a drag ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragEnd {
    /// Keep the widths reached so far (pointer-up, pointer-cancel, blur).
    Commit,
    /// Restore the widths from drag start (Escape).
    Revert,
}

/// Window listeners for an active drag.
pub struct DragSession {
    _listeners: Vec<EventListener>,
}

impl DragSession {
    /// Attach the drag listeners to the window.
    ///
    /// `on_move` receives the pointer's x coordinate; `on_end` runs once per
    /// terminating event and is expected to drop the session. Returns `None`
    /// outside a browser window.
    pub fn start(
        on_move: impl Fn(f64) + 'static,
        on_end: impl Fn(DragEnd) + 'static,
    ) -> Option<Self> {
        let window = web_sys::window()?;
        let on_end = Rc::new(on_end);

        let active = EventListenerOptions::enable_prevent_default();
        let mut listeners = Vec::with_capacity(5);

        listeners.push(EventListener::new_with_options(
            &window,
            "pointermove",
            active,
            move |evt| {
                if let Some(evt) = evt.dyn_ref::<PointerEvent>() {
                    evt.prevent_default();
                    on_move(f64::from(evt.client_x()));
                }
            },
        ));

        for event_type in ["pointerup", "pointercancel", "blur"] {
            let on_end = Rc::clone(&on_end);
            listeners.push(EventListener::new(&window, event_type, move |_| {
                tracing::trace!(event_type, "drag ended");
                on_end(DragEnd::Commit);
            }));
        }

        listeners.push(EventListener::new_with_options(
            &window,
            "keydown",
            active,
            move |evt| {
                let Some(evt) = evt.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if evt.key() == "Escape" {
                    evt.prevent_default();
                    on_end(DragEnd::Revert);
                }
            },
        ));

        Some(Self {
            _listeners: listeners,
        })
    }
}
