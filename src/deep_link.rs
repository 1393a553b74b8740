// src/deep_link.rs
//
// Deep link de desbloqueio: `?unlock_badge=<id>`. É lido uma única vez na
// inicialização e removido do endereço para não disparar de novo.

use url::form_urlencoded;

/// Extrai o valor de `param` de uma query string (com ou sem `?`).
pub fn badge_from_query(query: &str, param: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == param)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Aceita uma URL completa, uma query solta ou `--unlock-badge=<id>`.
pub fn badge_from_arg(arg: &str, param: &str) -> Option<String> {
    if let Some(id) = arg.strip_prefix("--unlock-badge=") {
        return Some(id.to_owned()).filter(|id| !id.is_empty());
    }
    let query = match arg.split_once('?') {
        Some((_, query)) => query,
        None => arg,
    };
    let query = query.split('#').next().unwrap_or(query);
    badge_from_query(query, param)
}

/// Lê o deep link da barra de endereço e limpa a query com `history.replaceState`.
#[cfg(target_arch = "wasm32")]
pub fn take_startup_badge(param: &str) -> Option<String> {
    let window = web_sys::window()?;
    let location = window.location();
    let search = location.search().ok()?;
    let badge = badge_from_query(&search, param)?;

    let path = location.pathname().unwrap_or_else(|_| "/".to_owned());
    match window.history() {
        Ok(history) => {
            if let Err(err) = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path)) {
                log::warn!("could not strip deep link from address bar: {err:?}");
            }
        }
        Err(err) => log::warn!("history unavailable: {err:?}"),
    }
    Some(badge)
}

/// Só o primeiro argumento depois do nome do programa conta.
pub fn badge_from_args<I>(args: I, param: &str) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter().nth(1).and_then(|arg| badge_from_arg(&arg, param))
}

/// No desktop o deep link chega como argumento de linha de comando.
#[cfg(not(target_arch = "wasm32"))]
pub fn take_startup_badge(param: &str) -> Option<String> {
    badge_from_args(std::env::args(), param)
}
