//! Preview → email HTML.
//!
//! The preview markup is cloned into a `<template>` so the cleanup never
//! touches the live page and nothing in the clone loads or runs.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DocumentFragment, Element, HtmlTemplateElement};

use mailwright_core::export::{
    EDITOR_ONLY_ATTRS, EXPORT_TEXT_SELECTOR, HANDLE_LAYER_ATTR, SELECTED_CLASS,
};
use mailwright_core::{ExportOptions, InlineStyle, export_style};

/// Serialize `preview` into cleaned, email-ready HTML.
pub fn export_html(preview: &Element, options: &ExportOptions) -> Result<String, JsValue> {
    let template = clone_into_template(preview)?;
    let root = template.content();

    unwrap_figures(&root)?;
    strip_editor_markers(&root)?;

    for el in query_all(&root, EXPORT_TEXT_SELECTOR) {
        update_style(&el, |style| options.apply_text_style(style))?;
    }
    for link in query_all(&root, "a") {
        update_style(&link, |style| options.apply_link_style(style))?;
        link.set_attribute("target", "_blank")?;
    }

    for el in query_all(&root, "[style]") {
        if let Some(style) = el.get_attribute("style") {
            let converted = export_style(&style);
            if converted != style {
                el.set_attribute("style", &converted)?;
            }
        }
    }

    let html = template.inner_html();
    Ok(options.finish(&html).into_owned())
}

/// Preview markup as the editor should receive it: editor markers removed,
/// everything else untouched.
pub fn editor_html(preview: &Element) -> Result<String, JsValue> {
    let template = clone_into_template(preview)?;
    strip_editor_markers(&template.content())?;
    Ok(template.inner_html())
}

fn clone_into_template(preview: &Element) -> Result<HtmlTemplateElement, JsValue> {
    let document = preview
        .owner_document()
        .ok_or_else(|| JsValue::from_str("preview is not attached to a document"))?;
    let template: HtmlTemplateElement = document.create_element("template")?.dyn_into()?;
    template.set_inner_html(&preview.inner_html());
    Ok(template)
}

/// Remove handle layers, editor-only attributes and selection highlights.
fn strip_editor_markers(root: &DocumentFragment) -> Result<(), JsValue> {
    for layer in query_all(root, &format!("[{HANDLE_LAYER_ATTR}]")) {
        layer.remove();
    }
    for attr in EDITOR_ONLY_ATTRS {
        for el in query_all(root, &format!("[{attr}]")) {
            el.remove_attribute(attr)?;
        }
    }
    for el in query_all(root, &format!(".{SELECTED_CLASS}")) {
        el.class_list().remove_1(SELECTED_CLASS)?;
        if el.class_name().trim().is_empty() {
            el.remove_attribute("class")?;
        }
    }
    Ok(())
}

/// Replace each `figure.table` wrapper with its children.
fn unwrap_figures(root: &DocumentFragment) -> Result<(), JsValue> {
    for figure in query_all(root, "figure.table") {
        let Some(parent) = figure.parent_node() else {
            continue;
        };
        while let Some(child) = figure.first_child() {
            parent.insert_before(&child, Some(&figure))?;
        }
        figure.remove();
    }
    Ok(())
}

fn update_style(el: &Element, edit: impl FnOnce(&mut InlineStyle)) -> Result<(), JsValue> {
    let mut style = InlineStyle::parse(&el.get_attribute("style").unwrap_or_default());
    edit(&mut style);
    el.set_attribute("style", &style.to_string())
}

fn query_all(root: &DocumentFragment, selector: &str) -> Vec<Element> {
    match root.query_selector_all(selector) {
        Ok(nodes) => crate::elements_of(&nodes),
        Err(e) => {
            tracing::warn!(selector, "query failed: {:?}", e);
            Vec::new()
        }
    }
}
