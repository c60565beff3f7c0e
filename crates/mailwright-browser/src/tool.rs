//! The authoring tool: preview pane, resize handles, selection and export
//! wired together.
//!
//! One [`AuthoringTool`] drives one preview element. All state lives behind a
//! single `Rc`; event callbacks hold weak references, so dropping the tool
//! tears down every listener, handle layer and drag session it created.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlTableCellElement, MouseEvent};

use mailwright_core::{
    AuthoringConfig, AuthoringError, ColumnPercents, InlineStyle, ResizeController, Result,
    SelectMode, SelectionDelta, SelectionManager, SyncDirection, SyncState, TableWidths,
    WidthSnapshot, apply_column_percents, compute_table_structure, compute_visible_boundaries,
};

use crate::clipboard::{self, COPIED_MESSAGE, js_message};
use crate::controls::FormControls;
use crate::dom_table::{DomTable, tables_in};
use crate::drag::{DragEnd, DragSession};
use crate::editor_sync::EditorSync;
use crate::export::{editor_html, export_html};
use crate::handles::HandleLayer;
use crate::preview;

/// One table in the preview and everything attached to it.
struct TableView {
    table: DomTable,
    /// Widths in effect; `None` while resize is disabled.
    percents: Option<ColumnPercents>,
    visible: Vec<bool>,
    resize: ResizeController,
    handles: Option<HandleLayer>,
    _cell_listeners: Vec<EventListener>,
}

struct ActiveDrag {
    table: usize,
    _session: DragSession,
}

#[derive(Default)]
struct ToolState {
    tables: Vec<TableView>,
    selection: SelectionManager<HtmlElement>,
    drag: Option<ActiveDrag>,
    exported: String,
}

struct ToolInner {
    config: AuthoringConfig,
    document: Document,
    preview: HtmlElement,
    controls: FormControls,
    sync: SyncState,
    editor: EditorSync,
    state: RefCell<ToolState>,
    highlighter: RefCell<Option<Box<dyn Fn(&HtmlElement)>>>,
    notifier: RefCell<Option<Box<dyn Fn(&str)>>>,
    listeners: RefCell<Vec<EventListener>>,
}

/// Browser authoring tool bound to a preview element.
pub struct AuthoringTool {
    inner: Rc<ToolInner>,
}

impl AuthoringTool {
    /// Bind to the page elements named in `config`.
    pub fn new(config: AuthoringConfig) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| AuthoringError::MissingElement("document".to_owned()))?;
        let preview = document
            .get_element_by_id(&config.elements.preview)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| AuthoringError::MissingElement(config.elements.preview.clone()))?;

        let sync = SyncState::new();
        let inner = Rc::new(ToolInner {
            controls: FormControls::new(document.clone(), config.elements.clone()),
            editor: EditorSync::new(sync.clone(), config.sync_quiet_ms),
            sync,
            config,
            document,
            preview,
            state: RefCell::new(ToolState::default()),
            highlighter: RefCell::new(None),
            notifier: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        });
        ToolInner::attach_page_listeners(&inner);
        tracing::debug!(preview = %inner.config.elements.preview, "authoring tool ready");

        Ok(Self { inner })
    }

    pub fn config(&self) -> &AuthoringConfig {
        &self.inner.config
    }

    pub fn preview(&self) -> &HtmlElement {
        &self.inner.preview
    }

    /// Editor content changed: replace the preview, keeping table widths.
    ///
    /// Returns `false` when the change was the echo of a preview push.
    pub fn on_editor_change(&self, html: &str) -> bool {
        ToolInner::replace_content(&self.inner, html)
    }

    /// Function that loads markup back into the editor.
    pub fn set_editor_loader(&self, loader: impl Fn(&str) + 'static) {
        self.inner.editor.set_loader(loader);
    }

    /// Called with the code block after every export.
    pub fn set_highlighter(&self, highlight: impl Fn(&HtmlElement) + 'static) {
        *self.inner.highlighter.borrow_mut() = Some(Box::new(highlight));
    }

    /// Shows user-facing messages. Defaults to `window.alert`.
    pub fn set_notifier(&self, notify: impl Fn(&str) + 'static) {
        *self.inner.notifier.borrow_mut() = Some(Box::new(notify));
    }

    /// Re-apply fonts from the controls and regenerate the export.
    pub fn render_output(&self) {
        self.inner.render_output();
    }

    /// Current export text.
    pub fn exported_html(&self) -> String {
        self.inner.state.borrow().exported.clone()
    }

    /// Width vectors of the preview tables, in document order.
    pub fn table_percents(&self) -> Vec<Option<ColumnPercents>> {
        let state = self.inner.state.borrow();
        state.tables.iter().map(|view| view.percents.clone()).collect()
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.state.borrow().drag.is_some()
    }

    /// Select a preview cell as if it had been clicked.
    pub fn select_cell(&self, cell: &HtmlTableCellElement, mode: SelectMode) {
        self.inner.select_cell(cell.clone().into(), mode);
    }

    /// Number of selected cells and elements.
    pub fn selection_len(&self) -> usize {
        let state = self.inner.state.borrow();
        state.selection.cells().len() + state.selection.elements().len()
    }

    /// Apply the control values to every selected cell and element.
    pub fn apply_cell_style(&self) -> Result<()> {
        self.inner.apply_cell_style()
    }

    /// Remove inline styles from the selection. Table borders and column
    /// widths are re-applied afterwards.
    pub fn clear_cell_style(&self) -> Result<()> {
        self.inner.clear_cell_style()
    }

    /// Append a divider to the preview and re-export.
    pub fn insert_divider(&self) -> Result<()> {
        preview::insert_divider(&self.inner.preview)
            .map_err(|e| AuthoringError::Dom(js_message(&e)))?;
        self.inner.update_output();
        Ok(())
    }

    /// Start a drag on `boundary` of the table at `table_index`.
    pub fn begin_drag(&self, table_index: usize, boundary: usize, start_x: f64) -> Result<()> {
        ToolInner::begin_drag(&self.inner, table_index, boundary, start_x)
    }

    /// Copy the export to the clipboard, reporting the outcome through the
    /// notifier.
    pub fn copy_html(&self) {
        let text = self.exported_html();
        let weak = Rc::downgrade(&self.inner);
        clipboard::copy_text(text, move |result| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            match result {
                Ok(()) => inner.notify(COPIED_MESSAGE),
                Err(e) => inner.notify(&e.to_string()),
            }
        });
    }

    /// Show a user-facing message.
    pub fn notify(&self, message: &str) {
        self.inner.notify(message);
    }
}

impl ToolInner {
    fn attach_page_listeners(this: &Rc<Self>) {
        let mut listeners = Vec::new();

        let weak = Rc::downgrade(this);
        listeners.push(EventListener::new(&this.preview, "input", move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.on_preview_input();
            }
        }));

        let weak = Rc::downgrade(this);
        listeners.push(EventListener::new(&this.preview, "click", move |evt| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let Some(target) = evt.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            inner.on_preview_click(target, select_mode(evt));
        }));

        if let Some(window) = web_sys::window() {
            let weak = Rc::downgrade(this);
            listeners.push(EventListener::new(&window, "resize", move |_| {
                if let Some(inner) = weak.upgrade() {
                    inner.position_handles();
                }
            }));
        }

        *this.listeners.borrow_mut() = listeners;
    }

    fn replace_content(this: &Rc<Self>, html: &str) -> bool {
        let Some(_guard) = this.sync.enter(SyncDirection::EditorToPreview) else {
            return false;
        };
        // Preview edits not yet pushed are superseded by the editor's content.
        this.editor.cancel();

        {
            let mut state = this.state.borrow_mut();
            if let Some(drag) = state.drag.take() {
                if let Some(view) = state.tables.get_mut(drag.table) {
                    view.resize.cancel();
                }
            }

            let snapshot = WidthSnapshot::from_widths(state.tables.iter().map(|view| {
                match &view.percents {
                    Some(percents) => TableWidths::from_percents(percents.clone()),
                    None => TableWidths::read(&view.table),
                }
            }));
            state.tables.clear();
            state.selection.clear();

            this.preview.set_inner_html(html.trim());

            let mut tables = tables_in(&this.preview);
            let restored = snapshot.restore(tables.iter_mut());
            tracing::debug!(
                tables = tables.len(),
                captured = snapshot.len(),
                "preview content replaced"
            );

            state.tables = tables
                .into_iter()
                .zip(restored)
                .enumerate()
                .map(|(index, (table, percents))| Self::build_view(this, index, table, percents))
                .collect();
        }

        this.render_output();
        true
    }

    fn build_view(
        this: &Rc<Self>,
        index: usize,
        table: DomTable,
        percents: Option<ColumnPercents>,
    ) -> TableView {
        let cells = preview::decorate_table(&table, &this.config.table_border);
        let cell_listeners = cells
            .into_iter()
            .map(|cell| Self::cell_listener(this, cell))
            .collect();

        let visible = compute_visible_boundaries(&compute_table_structure(&table));
        let handles = percents
            .as_ref()
            .filter(|_| visible.iter().any(|shown| *shown))
            .and_then(|_| Self::create_handles(this, index, &visible));

        TableView {
            table,
            percents,
            visible,
            resize: ResizeController::new(this.config.min_column_percent),
            handles,
            _cell_listeners: cell_listeners,
        }
    }

    fn cell_listener(this: &Rc<Self>, cell: HtmlTableCellElement) -> EventListener {
        let weak = Rc::downgrade(this);
        let target = cell.clone();
        EventListener::new(&target, "click", move |evt| {
            if let Some(inner) = weak.upgrade() {
                inner.select_cell(cell.clone().into(), select_mode(evt));
            }
        })
    }

    fn create_handles(this: &Rc<Self>, index: usize, visible: &[bool]) -> Option<HandleLayer> {
        let weak: Weak<Self> = Rc::downgrade(this);
        let layer = HandleLayer::new(
            &this.document,
            index,
            visible,
            this.config.handle_width_px,
            move |boundary, x| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                if let Err(e) = Self::begin_drag(&inner, index, boundary, x) {
                    tracing::debug!(index, boundary, "drag not started: {}", e);
                }
            },
        );
        match layer {
            Ok(layer) => Some(layer),
            Err(e) => {
                tracing::warn!("Failed to create resize handles: {:?}", e);
                None
            }
        }
    }

    fn begin_drag(this: &Rc<Self>, table_index: usize, boundary: usize, x: f64) -> Result<()> {
        let mut state = this.state.borrow_mut();
        if state.drag.is_some() {
            return Err(AuthoringError::AlreadyDragging);
        }
        let view = state
            .tables
            .get_mut(table_index)
            .ok_or(AuthoringError::ResizeDisabled)?;
        let percents = view.percents.clone().ok_or(AuthoringError::ResizeDisabled)?;
        view.resize.begin(boundary, x, percents, &view.visible)?;

        let on_move = Rc::downgrade(this);
        let on_end = Rc::downgrade(this);
        let session = DragSession::start(
            move |x| {
                if let Some(inner) = on_move.upgrade() {
                    inner.drag_move(x);
                }
            },
            move |end| {
                if let Some(inner) = on_end.upgrade() {
                    inner.drag_end(end);
                }
            },
        );
        let Some(session) = session else {
            view.resize.cancel();
            return Err(AuthoringError::MissingElement("window".to_owned()));
        };

        state.drag = Some(ActiveDrag {
            table: table_index,
            _session: session,
        });
        Ok(())
    }

    fn drag_move(&self, x: f64) {
        let mut state = self.state.borrow_mut();
        let Some(index) = state.drag.as_ref().map(|drag| drag.table) else {
            return;
        };
        let Some(view) = state.tables.get_mut(index) else {
            return;
        };
        let width = view.table.width_px();
        if let Some(next) = view.resize.update(x, width) {
            view.set_percents(next);
        }
    }

    fn drag_end(&self, end: DragEnd) {
        let drag = {
            let mut state = self.state.borrow_mut();
            let Some(drag) = state.drag.take() else {
                return;
            };
            if let Some(view) = state.tables.get_mut(drag.table) {
                let result = match end {
                    DragEnd::Commit => view.resize.finish(),
                    DragEnd::Revert => view.resize.cancel(),
                };
                if let Some(percents) = result {
                    view.set_percents(percents);
                }
            }
            drag
        };
        // This runs inside one of the session's own listeners; release them
        // once the callback has returned.
        wasm_bindgen_futures::spawn_local(async move { drop(drag) });

        self.update_output();
    }

    fn on_preview_input(&self) {
        // Direct edits can delete selected nodes.
        self.state
            .borrow_mut()
            .selection
            .retain(|el| self.preview.contains(Some(el.as_ref())));
        self.update_output();
        let preview = self.preview.clone();
        self.editor
            .schedule(move || match editor_html(&preview) {
                Ok(html) => Some(html),
                Err(e) => {
                    tracing::warn!("Failed to serialize preview for editor: {:?}", e);
                    None
                }
            });
    }

    fn on_preview_click(&self, target: Element, mode: SelectMode) {
        // Cells have their own listeners.
        if target.closest("td, th").ok().flatten().is_some() {
            return;
        }
        let Some(block) = top_level_child(&self.preview, target) else {
            return;
        };
        let Ok(block) = block.dyn_into::<HtmlElement>() else {
            return;
        };
        let delta = self.state.borrow_mut().selection.select_element(block, mode);
        show_selection(delta);
    }

    fn select_cell(&self, cell: HtmlElement, mode: SelectMode) {
        let delta = self.state.borrow_mut().selection.select_cell(cell, mode);
        show_selection(delta);
    }

    fn apply_cell_style(&self) -> Result<()> {
        let targets = self.state.borrow().selection.require_any()?;
        let cell_style = self.controls.cell_style();
        for el in &targets {
            let mut style = InlineStyle::parse(&el.get_attribute("style").unwrap_or_default());
            cell_style.apply_to(&mut style);
            if let Err(e) = el.set_attribute("style", &style.to_string()) {
                tracing::warn!("Failed to style element: {:?}", e);
            }
        }
        self.update_output();
        Ok(())
    }

    fn clear_cell_style(&self) -> Result<()> {
        {
            let mut state = self.state.borrow_mut();
            for el in state.selection.require_any()? {
                preview::clear_style(&el);
            }
            for view in &mut state.tables {
                preview::decorate_table(&view.table, &self.config.table_border);
                if let Some(percents) = view.percents.clone() {
                    view.set_percents(percents);
                }
            }
        }
        self.update_output();
        Ok(())
    }

    fn render_output(&self) {
        let font_family = self.controls.font_family(&self.config).to_owned();
        let font_size = if self.controls.email_mode() {
            None
        } else {
            Some(
                self.controls
                    .font_size_px()
                    .unwrap_or(self.config.font_size_px),
            )
        };
        preview::apply_fonts(&self.preview, &font_family, font_size);
        self.position_handles();
        self.update_output();
    }

    fn position_handles(&self) {
        let state = self.state.borrow();
        for view in &state.tables {
            if let (Some(handles), Some(percents)) = (&view.handles, &view.percents) {
                handles.sync_enabled(&view.table);
                handles.position(&view.table, percents);
            }
        }
    }

    /// Regenerate the export and write it into the code block.
    fn update_output(&self) {
        let options = self.controls.export_options(&self.config);
        let html = match export_html(&self.preview, &options) {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("Export failed: {:?}", e);
                return;
            }
        };
        self.state.borrow_mut().exported = html.clone();

        let code_block = self
            .document
            .get_element_by_id(&self.config.elements.code_block)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let Some(code_block) = code_block else {
            tracing::debug!(id = %self.config.elements.code_block, "no code block on page");
            return;
        };
        code_block.set_text_content(Some(&html));
        if let Some(highlight) = self.highlighter.borrow().as_ref() {
            highlight(&code_block);
        }
    }

    fn notify(&self, message: &str) {
        if let Some(notify) = self.notifier.borrow().as_ref() {
            notify(message);
            return;
        }
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}

impl TableView {
    /// Write `percents` onto the table and move the handles to match.
    fn set_percents(&mut self, percents: ColumnPercents) {
        let structure = compute_table_structure(&self.table);
        apply_column_percents(&mut self.table, &structure, &percents);
        if let Some(handles) = &self.handles {
            handles.position(&self.table, &percents);
        }
        self.percents = Some(percents);
    }
}

fn select_mode(evt: &web_sys::Event) -> SelectMode {
    match evt.dyn_ref::<MouseEvent>() {
        Some(evt) if evt.ctrl_key() || evt.meta_key() => SelectMode::Toggle,
        _ => SelectMode::Replace,
    }
}

fn show_selection(delta: SelectionDelta<HtmlElement>) {
    for el in &delta.deselected {
        preview::set_selected(el, false);
    }
    for el in &delta.selected {
        preview::set_selected(el, true);
    }
}

/// The direct child of `root` that contains `target`.
fn top_level_child(root: &Element, target: Element) -> Option<Element> {
    let mut current = target;
    loop {
        let parent = current.parent_element()?;
        if root.is_same_node(Some(&parent)) {
            return Some(current);
        }
        current = parent;
    }
}
