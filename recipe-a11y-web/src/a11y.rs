// Accessibility helpers

use web_sys::Document;

const BASE_STYLE_ID: &str = "a11y-base-style";

/// Get CSS for visible focus indicators and screen reader utilities
///
/// Focus rings only show once the root carries `keyboard-navigation`, and the
/// skip link's `focus-visible` marker makes it reappear on screen. `.sr-only`
/// hides the live region from sighted users without hiding it from screen readers.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ".js-focus-visible :focus{outline:none} .keyboard-navigation :focus{outline:3px solid #1a73e8;outline-offset:2px} .skip-link.focus-visible{position:static;width:auto;height:auto;clip:auto} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;}"
}

/// Inject [`visible_focus_css`] into `<head>` once.
pub fn inject_base_styles(document: &Document) {
    if document.get_element_by_id(BASE_STYLE_ID).is_some() {
        return;
    }
    let Some(head) = document.head() else {
        return;
    };
    let Ok(style) = document.create_element("style") else {
        return;
    };
    style.set_id(BASE_STYLE_ID);
    style.set_text_content(Some(visible_focus_css()));
    let _ = head.append_child(&style);
}
