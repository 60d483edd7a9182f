//! Нативные диалоги браузера

/// `window.confirm`; без окна считается отказом
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Ошибка операции в виде `alert("Error: ...")`
pub fn alert_error(error: &str) {
    log::error!("{}", error);
    if let Some(w) = web_sys::window() {
        let _ = w.alert_with_message(&format!("Error: {}", error));
    }
}
