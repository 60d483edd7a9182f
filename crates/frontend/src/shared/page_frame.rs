//! PageFrame - корневая обёртка каждой страницы внутри таба.
//!
//! Ставит на корневой элемент `id = "{tab key}--{category}"` и
//! `data-page-category`.

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCategory {
    List,
    Editor,
}

impl PageCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageCategory::List => "list",
            PageCategory::Editor => "editor",
        }
    }

    fn class(&self) -> &'static str {
        match self {
            PageCategory::List => "page",
            PageCategory::Editor => "page page--detail",
        }
    }
}

#[component]
pub fn PageFrame(
    /// Ключ таба, например `"a002_elemento"`
    #[prop(into)]
    page_key: String,
    category: PageCategory,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            id=format!("{}--{}", page_key, category.as_str())
            class=category.class()
            data-page-category=category.as_str()
        >
            {children()}
        </div>
    }
}
