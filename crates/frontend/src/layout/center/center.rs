use super::tabs::Tabs;
use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;

#[component]
pub fn Center(children: Children) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let sin_tabs = move || ctx.opened.with(|tabs| tabs.is_empty());

    view! {
        <div data-zone="center" class="app-tabs" style="flex: 1; overflow: auto;">
            <Tabs />
            {move || sin_tabs().then(|| view! {
                <div class="app-tabs__empty">
                    {"Seleccione un catálogo en el menú de la izquierda"}
                </div>
            })}
            {children()}
        </div>
    }
}
