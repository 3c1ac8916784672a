//! Loading overlay and notice elements.
//!
//! The overlay carries the logo, its flashlight reveal mask and a progress
//! line; it stays up until the reveal tracker allows dismissal. A separate
//! blocking notice surfaces refused popup navigation.

use web_sys as web;

#[inline]
pub fn hide_loading(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("loading-overlay") {
        let cl = el.class_list();
        _ = cl.add_1("hidden");
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "display:none");
    }
}

/// Move the flashlight mask on the logo element. The mask itself is CSS; we
/// only drive its center.
pub fn set_reveal_focus(document: &web::Document, x: f32, y: f32, radius: f32) {
    if let Some(el) = document.get_element_by_id("loading-logo") {
        let style = format!(
            "-webkit-mask-image: radial-gradient(circle {radius}px at {x}px {y}px, black 60%, transparent 100%); \
             mask-image: radial-gradient(circle {radius}px at {x}px {y}px, black 60%, transparent 100%);"
        );
        _ = el.set_attribute("style", &style);
    }
}

pub fn set_progress(document: &web::Document, loaded: usize, total: usize) {
    if let Some(el) = document.get_element_by_id("loading-progress") {
        let pct = if total == 0 {
            100
        } else {
            (loaded * 100) / total
        };
        el.set_inner_html(&format!("{pct}%"));
    }
}

/// Blocking notice for popup-refused navigation; no retry, the user has to
/// allow popups and click again.
pub fn show_popup_notice(document: &web::Document, url: &str) {
    if let Some(el) = document.get_element_by_id("popup-notice") {
        el.set_inner_html(&format!(
            "<p>Your browser blocked the new tab.</p><p><a href=\"{url}\" target=\"_blank\" rel=\"noopener\">Open it directly</a></p>"
        ));
        _ = el.class_list().remove_1("hidden");
        _ = el.set_attribute("style", "");
    }
}

pub fn hide_popup_notice(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("popup-notice") {
        _ = el.class_list().add_1("hidden");
        _ = el.set_attribute("style", "display:none");
    }
}
