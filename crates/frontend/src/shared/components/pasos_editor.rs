//! Редактор упорядоченного списка шагов методологии.
//!
//! Порядок задаётся позицией в списке; номер шага при сохранении
//! равен позиции + 1.

use crate::shared::dialogs::confirm;
use crate::shared::icons::icon;
use leptos::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use thaw::*;

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

/// Строка редактора: стабильный ключ для `For` и текст шага
#[derive(Debug, Clone, Copy)]
pub struct PasoDraft {
    pub key: u64,
    pub texto: RwSignal<String>,
}

impl PasoDraft {
    pub fn new(texto: impl Into<String>) -> Self {
        Self {
            key: NEXT_KEY.fetch_add(1, Ordering::Relaxed),
            texto: RwSignal::new(texto.into()),
        }
    }
}

pub fn drafts_from<I, S>(textos: I) -> Vec<PasoDraft>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    textos.into_iter().map(PasoDraft::new).collect()
}

/// Текущие тексты в порядке списка
pub fn textos(drafts: &[PasoDraft]) -> Vec<String> {
    drafts.iter().map(|d| d.texto.get_untracked()).collect()
}

/// Меняет местами элемент `index` с соседом; за границами ничего не делает
pub fn mover<T>(items: &mut [T], index: usize, arriba: bool) {
    let destino = if arriba {
        index.checked_sub(1)
    } else {
        Some(index + 1).filter(|d| *d < items.len())
    };
    if let Some(destino) = destino {
        if index < items.len() {
            items.swap(index, destino);
        }
    }
}

#[component]
pub fn PasosEditor(
    pasos: RwSignal<Vec<PasoDraft>>,
    #[prop(optional, into)] placeholder: Option<String>,
) -> impl IntoView {
    let placeholder = StoredValue::new(placeholder.unwrap_or_else(|| "Instrucción".to_string()));

    let position = move |key: u64| pasos.with(|p| p.iter().position(|d| d.key == key));

    let remove = move |key: u64| {
        let Some(index) = position(key) else { return };
        let vacio = pasos.with_untracked(|p| p[index].texto.get_untracked().trim().is_empty());
        if !vacio && !confirm(&format!("¿Eliminar el paso {}?", index + 1)) {
            return;
        }
        pasos.update(|p| {
            p.remove(index);
        });
    };

    let shift = move |key: u64, arriba: bool| {
        if let Some(index) = position(key) {
            pasos.update(|p| mover(p, index, arriba));
        }
    };

    view! {
        <div class="pasos-editor">
            {move || pasos.with(|p| p.is_empty()).then(|| view! {
                <div class="pasos-editor__empty">{"Sin pasos"}</div>
            })}
            <For
                each=move || pasos.get()
                key=|draft| draft.key
                children=move |draft: PasoDraft| {
                    let key = draft.key;
                    let numero = move || position(key).map(|i| i + 1).unwrap_or_default();
                    view! {
                        <div class="pasos-editor__row">
                            <span class="pasos-editor__num">{numero}</span>
                            <Textarea
                                value=draft.texto
                                placeholder=placeholder.get_value()
                                attr:rows=2
                            />
                            <Space>
                                <Button
                                    size=ButtonSize::Small
                                    appearance=ButtonAppearance::Subtle
                                    on_click=move |_| shift(key, true)
                                >
                                    {icon("arrow-up")}
                                </Button>
                                <Button
                                    size=ButtonSize::Small
                                    appearance=ButtonAppearance::Subtle
                                    on_click=move |_| shift(key, false)
                                >
                                    {icon("arrow-down")}
                                </Button>
                                <Button
                                    size=ButtonSize::Small
                                    appearance=ButtonAppearance::Subtle
                                    on_click=move |_| remove(key)
                                >
                                    {icon("delete")}
                                </Button>
                            </Space>
                        </div>
                    }
                }
            />
            <Button
                appearance=ButtonAppearance::Secondary
                on_click=move |_| pasos.update(|p| p.push(PasoDraft::new("")))
            >
                {icon("plus")}
                " Agregar paso"
            </Button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mover_swaps_with_neighbour() {
        let mut items = vec![1, 2, 3];
        mover(&mut items, 1, true);
        assert_eq!(items, vec![2, 1, 3]);
        mover(&mut items, 1, false);
        assert_eq!(items, vec![2, 3, 1]);
    }

    #[test]
    fn mover_ignores_edges() {
        let mut items = vec![1, 2];
        mover(&mut items, 0, true);
        mover(&mut items, 1, false);
        mover(&mut items, 5, true);
        assert_eq!(items, vec![1, 2]);
    }
}
