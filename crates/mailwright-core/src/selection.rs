//! Selection state for style operations.
//!
//! Selected cells and elements live in a [`SelectionManager`] owned by the
//! authoring tool instance and passed to whatever applies styles. Generic over
//! the element handle so the browser crate can use DOM elements and tests can
//! use plain ids.

use crate::error::{AuthoringError, Result};

/// How a click combines with the current selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SelectMode {
    /// Plain click: the clicked item becomes the only selection.
    #[default]
    Replace,
    /// Modifier click: toggle the clicked item in or out.
    Toggle,
}

/// Items whose selected state changed, so the caller can update highlights.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionDelta<E> {
    pub selected: Vec<E>,
    pub deselected: Vec<E>,
}

impl<E> Default for SelectionDelta<E> {
    fn default() -> Self {
        Self {
            selected: Vec::new(),
            deselected: Vec::new(),
        }
    }
}

/// Current cell and element selections.
#[derive(Clone, Debug)]
pub struct SelectionManager<E> {
    cells: Vec<E>,
    elements: Vec<E>,
}

impl<E> Default for SelectionManager<E> {
    fn default() -> Self {
        Self {
            cells: Vec::new(),
            elements: Vec::new(),
        }
    }
}

impl<E: Clone + PartialEq> SelectionManager<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> &[E] {
        &self.cells
    }

    pub fn elements(&self) -> &[E] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.elements.is_empty()
    }

    /// Select a table cell. A replacing click also drops element selections.
    pub fn select_cell(&mut self, cell: E, mode: SelectMode) -> SelectionDelta<E> {
        match mode {
            SelectMode::Replace => {
                let mut delta = self.clear();
                delta.deselected.retain(|e| *e != cell);
                self.cells.push(cell.clone());
                delta.selected.push(cell);
                delta
            }
            SelectMode::Toggle => toggle(&mut self.cells, cell),
        }
    }

    /// Select a non-cell element (paragraph, list, divider).
    pub fn select_element(&mut self, element: E, mode: SelectMode) -> SelectionDelta<E> {
        match mode {
            SelectMode::Replace => {
                let mut delta = self.clear();
                delta.deselected.retain(|e| *e != element);
                self.elements.push(element.clone());
                delta.selected.push(element);
                delta
            }
            SelectMode::Toggle => toggle(&mut self.elements, element),
        }
    }

    /// Drop everything. Returns what was deselected.
    pub fn clear(&mut self) -> SelectionDelta<E> {
        let mut deselected = std::mem::take(&mut self.cells);
        deselected.append(&mut self.elements);
        SelectionDelta {
            selected: Vec::new(),
            deselected,
        }
    }

    /// Forget items for which `alive` is false, such as nodes removed by a
    /// direct edit.
    pub fn retain(&mut self, mut alive: impl FnMut(&E) -> bool) {
        self.cells.retain(&mut alive);
        self.elements.retain(&mut alive);
    }

    /// Every selected item, cells first, or [`AuthoringError::NoSelection`].
    pub fn require_any(&self) -> Result<Vec<E>> {
        if self.is_empty() {
            return Err(AuthoringError::NoSelection);
        }
        Ok(self.cells.iter().chain(&self.elements).cloned().collect())
    }
}

fn toggle<E: Clone + PartialEq>(items: &mut Vec<E>, item: E) -> SelectionDelta<E> {
    let mut delta = SelectionDelta::default();
    if let Some(idx) = items.iter().position(|e| *e == item) {
        delta.deselected.push(items.remove(idx));
    } else {
        items.push(item.clone());
        delta.selected.push(item);
    }
    delta
}
