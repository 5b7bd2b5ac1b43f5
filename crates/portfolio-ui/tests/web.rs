//! Browser tests for the controller against real DOM nodes.

#![cfg(target_arch = "wasm32")]

use portfolio_pagination::Section;
use portfolio_ui::{ContentWindowController, WebSection, wire_sections};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn mount(html: &str) {
    let body = document().body().unwrap();
    body.set_inner_html(html);
}

fn logs_markup(count: usize) -> String {
    let items: String = (0..count)
        .map(|i| {
            let state = if i < 3 { "page-visible" } else { "hidden" };
            format!(r#"<div class="item log-item {state}" data-index="{i}">{i}</div>"#)
        })
        .collect();
    format!(
        r#"<div class="paginated-section" data-section="logs" data-total-pages="5" data-items-per-page="3">
<div class="items items-logs">{items}</div>
<nav class="pagination">
<button class="pagination-left-logs page-disabled"></button>
<button class="pagination-right-logs page-active"></button>
<span class="pagination-counter-logs">page 01 / 05</span>
</nav>
</div>"#
    )
}

#[wasm_bindgen_test]
fn locates_and_pages_logs() {
    mount(&logs_markup(15));

    let dom = WebSection::locate(&document(), Section::Logs).unwrap();
    assert_eq!(dom.items_per_page(), Some(3));

    let mut controller = ContentWindowController::initialize(Section::Logs, dom, 3).unwrap();
    assert!(controller.show_page(5));

    let counter = document()
        .query_selector(".pagination-counter-logs")
        .unwrap()
        .unwrap();
    assert_eq!(counter.text_content().as_deref(), Some("page 05 / 05"));

    let visible = document().query_selector_all(".log-item.page-visible").unwrap();
    assert_eq!(visible.length(), 3);
}

#[wasm_bindgen_test]
fn next_click_advances() {
    mount(&logs_markup(15));
    assert_eq!(wire_sections(&document()), 1);

    let next: HtmlElement = document()
        .query_selector(".pagination-right-logs")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    next.click();

    let counter = document()
        .query_selector(".pagination-counter-logs")
        .unwrap()
        .unwrap();
    assert_eq!(counter.text_content().as_deref(), Some("page 02 / 05"));

    let previous = document()
        .query_selector(".pagination-left-logs")
        .unwrap()
        .unwrap();
    assert!(previous.class_list().contains("page-active"));
    assert_eq!(previous.get_attribute("aria-disabled").as_deref(), Some("false"));
}

#[wasm_bindgen_test]
fn zero_page_size_falls_back_to_default() {
    mount(&logs_markup(15).replace(
        "data-items-per-page=\"3\"",
        "data-items-per-page=\"0\"",
    ));

    let dom = WebSection::locate(&document(), Section::Logs).unwrap();
    assert_eq!(dom.items_per_page(), None);
    assert_eq!(wire_sections(&document()), 1);

    let next: HtmlElement = document()
        .query_selector(".pagination-right-logs")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    next.click();

    let counter = document()
        .query_selector(".pagination-counter-logs")
        .unwrap()
        .unwrap();
    assert_eq!(counter.text_content().as_deref(), Some("page 02 / 05"));
}

#[wasm_bindgen_test]
fn missing_section_is_skipped() {
    mount("<p>nothing here</p>");
    assert_eq!(wire_sections(&document()), 0);
}
