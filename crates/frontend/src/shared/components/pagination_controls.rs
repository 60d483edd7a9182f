use crate::shared::icons::icon;
use contracts::shared::paging::PageInfo;
use leptos::prelude::*;

/// Серверная пагинация по `PageInfo` из ответа списка (страницы с 1)
#[component]
pub fn PaginationControls(
    #[prop(into)] info: Signal<PageInfo>,
    /// Callback when page changes
    on_page_change: Callback<u64>,
) -> impl IntoView {
    let current = move || info.get().current_page.max(1);
    let pages = move || info.get().pages.max(1);

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=move || !info.get().has_prev
                title="Primera página"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current() - 1)
                disabled=move || !info.get().has_prev
                title="Página anterior"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || format!("{} / {} ({})", current(), pages(), info.get().total)}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current() + 1)
                disabled=move || !info.get().has_next
                title="Página siguiente"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(pages())
                disabled=move || !info.get().has_next
                title="Última página"
            >
                {icon("chevrons-right")}
            </button>
        </div>
    }
}
