use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;

/// Левая зона с меню каталогов; скрывается кнопкой в TopHeader
#[component]
pub fn Left(children: Children) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    view! {
        <nav data-zone="left" class="left" class:hidden=move || !ctx.left_open.get()>
            <div class="left__title">{"Administración"}</div>
            {children()}
        </nav>
    }
}
