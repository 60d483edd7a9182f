use crate::domain::a006_kit::api;
use contracts::domain::a003_herramienta::aggregate::GLOSARIO_HERRAMIENTAS;
use contracts::domain::a006_kit::aggregate::HerramientaDisponible;
use contracts::shared::api::glosario_items;
use leptos::prelude::*;

/// Добавляет id в выбор или убирает его, сохраняя порядок выбора
pub fn toggle(seleccion: &mut Vec<String>, herramienta_id: &str) {
    match seleccion.iter().position(|h| h == herramienta_id) {
        Some(index) => {
            seleccion.remove(index);
        }
        None => seleccion.push(herramienta_id.to_string()),
    }
}

/// Выбор активных инструментов для кита.
///
/// Фильтр по группе запрашивается у сервера; выбранные инструменты других
/// групп остаются в `seleccion`.
#[component]
pub fn HerramientasChecklist(seleccion: RwSignal<Vec<String>>) -> impl IntoView {
    let grupo = RwSignal::new(String::new());
    let disponibles = RwSignal::new(Vec::<HerramientaDisponible>::new());
    let error = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        let g = grupo.get();
        wasm_bindgen_futures::spawn_local(async move {
            let result = api::fetch_herramientas(&g).await;
            if grupo.get_untracked() != g {
                return;
            }
            match result {
                Ok(response) => {
                    disponibles.set(response.herramientas);
                    error.set(None);
                }
                Err(e) => error.set(Some(e)),
            }
        });
    });

    view! {
        <div class="checklist">
            <div class="checklist__header">
                <select class="form-select" on:change=move |ev| grupo.set(event_target_value(&ev))>
                    <option value="">{"Todos los grupos"}</option>
                    {glosario_items(GLOSARIO_HERRAMIENTAS).into_iter().map(|g| view! {
                        <option value=g.codigo.clone()>{format!("{} - {}", g.codigo, g.nombre)}</option>
                    }).collect_view()}
                </select>
                <span class="checklist__count">
                    {move || format!("{} seleccionadas", seleccion.with(|s| s.len()))}
                </span>
            </div>
            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__text">{e}</span>
                </div>
            })}
            <div class="checklist__items">
                {move || disponibles.get().into_iter().map(|h| {
                    let id = StoredValue::new(h.herramienta_id.clone());
                    let checked = move || seleccion.with(|s| s.contains(&id.get_value()));
                    view! {
                        <label class="checklist__item">
                            <input
                                type="checkbox"
                                prop:checked=checked
                                on:change=move |_| seleccion.update(|s| toggle(s, &id.get_value()))
                            />
                            <span class="checklist__id">{h.herramienta_id.clone()}</span>
                            <span class="checklist__name">{h.nombre.clone()}</span>
                            {h.descripcion.clone().filter(|d| *d != h.nombre).map(|d| view! {
                                <span class="checklist__desc">{d}</span>
                            })}
                        </label>
                    }
                }).collect_view()}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut seleccion = vec!["HE-GU-001".to_string()];
        toggle(&mut seleccion, "HE-ES-002");
        assert_eq!(seleccion, vec!["HE-GU-001", "HE-ES-002"]);
        toggle(&mut seleccion, "HE-GU-001");
        assert_eq!(seleccion, vec!["HE-ES-002"]);
    }
}
