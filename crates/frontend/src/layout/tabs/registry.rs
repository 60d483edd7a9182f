//! Маппинг tab.key → View. Все ключи табов разбираются здесь.

use super::tab_labels::{self, KEY_KITS_EVENTOS};
use crate::domain::a002_elemento::ui::list::ElementoList;
use crate::domain::a003_herramienta::ui::list::HerramientaList;
use crate::domain::a004_fraccion::ui::list::FraccionList;
use crate::domain::a005_metodologia::ui::editor::MetodologiaEditor;
use crate::domain::a006_kit::ui::list::KitList;
use crate::domain::a008_kit_evento::ui::list::KitEventoList;
use crate::domain::a009_fraccion_evento::ui::list::FraccionEventoList;
use crate::domain::a010_metodologia_evento::ui::editor::MetodologiaEventoEditor;
use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;

pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();
    let on_close = Callback::new(move |_: ()| tabs_store.close_tab(&key_for_close));

    if let Some(fraccion_id) = tab_labels::fraccion_de_key(key) {
        let fraccion_id = fraccion_id.to_string();
        return view! { <MetodologiaEditor fraccion_id=fraccion_id on_close=on_close /> }
            .into_any();
    }
    if let Some(metodologia_id) = tab_labels::metodologia_evento_de_key(key) {
        let metodologia_id = metodologia_id.to_string();
        return view! { <MetodologiaEventoEditor metodologia_id=metodologia_id on_close=on_close /> }
            .into_any();
    }

    match key {
        k if k == tab_labels::key_elementos() => view! { <ElementoList /> }.into_any(),
        k if k == tab_labels::key_herramientas() => view! { <HerramientaList /> }.into_any(),
        k if k == tab_labels::key_fracciones() => view! { <FraccionList /> }.into_any(),
        k if k == tab_labels::key_kits() => view! { <KitList /> }.into_any(),
        k if k == tab_labels::key_fracciones_eventos() => {
            view! { <FraccionEventoList /> }.into_any()
        }
        KEY_KITS_EVENTOS => view! { <KitEventoList /> }.into_any(),
        _ => {
            log::warn!("Unknown tab key: {}", key);
            view! { <div class="page">{format!("Pestaña desconocida: {}", key)}</div> }
                .into_any()
        }
    }
}
