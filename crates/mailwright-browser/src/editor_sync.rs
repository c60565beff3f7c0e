//! Preview → editor pushes.
//!
//! Direct edits in the preview are loaded back into the editor once input
//! has been quiet for a while. Each push runs under the shared
//! [`SyncState`], so the editor's change notification it triggers is
//! recognised as an echo and ignored.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

use mailwright_core::{SyncDirection, SyncState};

type Loader = Rc<RefCell<Option<Box<dyn Fn(&str)>>>>;

/// Debounced pushes of preview markup into the editor.
pub struct EditorSync {
    sync: SyncState,
    quiet_ms: u32,
    loader: Loader,
    pending: RefCell<Option<Timeout>>,
}

impl EditorSync {
    pub fn new(sync: SyncState, quiet_ms: u32) -> Self {
        Self {
            sync,
            quiet_ms,
            loader: Rc::new(RefCell::new(None)),
            pending: RefCell::new(None),
        }
    }

    /// Set the function that loads markup into the editor.
    pub fn set_loader(&self, loader: impl Fn(&str) + 'static) {
        *self.loader.borrow_mut() = Some(Box::new(loader));
    }

    /// (Re)arm the quiet window. When it elapses, `read` produces the markup
    /// to push. Earlier pending pushes are cancelled.
    pub fn schedule(&self, read: impl FnOnce() -> Option<String> + 'static) {
        let sync = self.sync.clone();
        let loader = Rc::clone(&self.loader);
        let timeout = Timeout::new(self.quiet_ms, move || {
            if let Some(html) = read() {
                push(&sync, &loader, &html);
            }
        });
        // Replacing the handle drops, and so cancels, the previous timeout.
        *self.pending.borrow_mut() = Some(timeout);
    }

    /// Drop any pending push.
    pub fn cancel(&self) {
        self.pending.borrow_mut().take();
    }

    /// Push immediately. Returns `false` when the push was suppressed.
    pub fn push_now(&self, html: &str) -> bool {
        self.cancel();
        push(&self.sync, &self.loader, html)
    }
}

fn push(sync: &SyncState, loader: &Loader, html: &str) -> bool {
    let Some(_guard) = sync.enter(SyncDirection::PreviewToEditor) else {
        return false;
    };
    let loader = loader.borrow();
    let Some(load) = loader.as_ref() else {
        tracing::debug!("no editor loader registered, dropping preview edit");
        return false;
    };
    tracing::debug!(len = html.len(), "pushing preview edits to editor");
    load(html);
    true
}
