//! Navigation side effects for hotspot taps.

use crate::overlay;
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    Opened,
    PopupBlocked,
    /// Same-tab redirect requested before asset loading finished; nothing
    /// happens, the tap can be repeated later.
    DeferredUntilLoaded,
}

/// Open a hotspot destination exactly once per tap. New-tab destinations go
/// through `window.open`; a refused popup surfaces a blocking notice.
/// Same-tab destinations redirect only once loading progress reached 100%.
pub fn open_destination(url: &str, new_tab: bool, loading_complete: bool) -> NavOutcome {
    let Some(window) = web::window() else {
        return NavOutcome::PopupBlocked;
    };
    if new_tab {
        match window.open_with_url_and_target(url, "_blank") {
            Ok(Some(_)) => {
                log::info!("[nav] opened {url}");
                NavOutcome::Opened
            }
            _ => {
                log::warn!("[nav] popup blocked for {url}");
                if let Some(doc) = window.document() {
                    overlay::show_popup_notice(&doc, url);
                }
                NavOutcome::PopupBlocked
            }
        }
    } else if loading_complete {
        _ = window.location().set_href(url);
        NavOutcome::Opened
    } else {
        log::info!("[nav] same-tab redirect to {url} deferred until load completes");
        NavOutcome::DeferredUntilLoaded
    }
}
