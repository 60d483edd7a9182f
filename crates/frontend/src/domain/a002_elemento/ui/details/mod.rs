use crate::domain::a002_elemento::api;
use crate::shared::dialogs::alert_error;
use crate::shared::icons::icon;
use contracts::domain::a002_elemento::aggregate::{
    validate_cantidad, ElementoCatalogos, ElementoCreateDto, ElementoListItem, ElementoUpdateDto,
    ESTATUS_ACTIVO, ESTATUS_INACTIVO,
};
use leptos::prelude::*;
use thaw::*;

#[derive(Debug, Clone, PartialEq)]
pub enum ElementoFormMode {
    Nuevo,
    /// Редактируются только cantidad и estatus
    Editar(ElementoListItem),
}

fn parse_cantidad(text: &str) -> Option<f64> {
    text.trim().replace(',', ".").parse::<f64>().ok()
}

#[component]
pub fn ElementoDetails(
    mode: ElementoFormMode,
    catalogos: ElementoCatalogos,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    match mode {
        ElementoFormMode::Nuevo => {
            view! { <ElementoCreateForm catalogos=catalogos on_saved=on_saved on_cancel=on_cancel /> }
                .into_any()
        }
        ElementoFormMode::Editar(elemento) => {
            view! { <ElementoEditForm elemento=elemento on_saved=on_saved on_cancel=on_cancel /> }
                .into_any()
        }
    }
}

#[component]
fn ElementoCreateForm(
    catalogos: ElementoCatalogos,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let area_id = RwSignal::new(String::new());
    let subarea_id = RwSignal::new(String::new());
    let nombre = RwSignal::new(String::new());
    let descripcion = RwSignal::new(String::new());
    let cantidad = RwSignal::new("1".to_string());
    let id_preview = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let catalogos = StoredValue::new(catalogos);

    // Предпросмотр id при изменении nombre/descripcion
    Effect::new(move |_| {
        let n = nombre.get();
        let d = descripcion.get();
        if n.trim().is_empty() || d.trim().is_empty() {
            id_preview.set(None);
            return;
        }
        wasm_bindgen_futures::spawn_local(async move {
            let result = api::fetch_next_id(&n, &d).await;
            // ответ устарел, если поля успели измениться
            if nombre.get_untracked() != n || descripcion.get_untracked() != d {
                return;
            }
            match result {
                Ok(id) => id_preview.set(Some(id)),
                Err(e) => {
                    log::warn!("next-id: {}", e);
                    id_preview.set(None);
                }
            }
        });
    });

    let subareas = move || {
        let area = area_id.get();
        catalogos.with_value(|c| {
            c.subareas
                .iter()
                .filter(|s| area.is_empty() || s.area_id == area)
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    let sugerencias = move || {
        let n = nombre.get();
        catalogos.with_value(|c| c.descripciones_por_grupo.get(&n).cloned().unwrap_or_default())
    };

    let handle_save = move |_| {
        let dto = ElementoCreateDto {
            subarea_id: subarea_id.get_untracked(),
            nombre: nombre.get_untracked(),
            descripcion: descripcion.get_untracked(),
            cantidad: parse_cantidad(&cantidad.get_untracked()),
        };
        if let Err(e) = dto.validate() {
            alert_error(&e);
            return;
        }
        saving.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let result = api::create(&dto).await;
            saving.set(false);
            match result {
                Ok(response) => {
                    log::info!("{}: {}", response.message, response.elemento.elemento_id);
                    on_saved.run(());
                }
                Err(e) => alert_error(&e),
            }
        });
    };

    view! {
        <div class="details-form">
            <div class="form-group">
                <label>{"Área"}</label>
                <select
                    class="form-select"
                    on:change=move |ev| {
                        area_id.set(event_target_value(&ev));
                        subarea_id.set(String::new());
                    }
                >
                    <option value="">{"Seleccione..."}</option>
                    {catalogos.with_value(|c| c.areas.iter().map(|a| view! {
                        <option value=a.area_id.clone()>{a.nombre.clone()}</option>
                    }).collect_view())}
                </select>
            </div>

            <div class="form-group">
                <label>{"Subárea *"}</label>
                <select
                    class="form-select"
                    on:change=move |ev| subarea_id.set(event_target_value(&ev))
                    prop:value=move || subarea_id.get()
                >
                    <option value="">{"Seleccione..."}</option>
                    {move || subareas().into_iter().map(|s| view! {
                        <option value=s.subarea_id.clone()>{format!("{} ({})", s.nombre, s.area_nombre)}</option>
                    }).collect_view()}
                </select>
            </div>

            <div class="form-group">
                <label>{"Nombre *"}</label>
                <select class="form-select" on:change=move |ev| nombre.set(event_target_value(&ev))>
                    <option value="">{"Seleccione..."}</option>
                    {catalogos.with_value(|c| c.grupos.iter().map(|g| view! {
                        <option value=g.clone()>{g.clone()}</option>
                    }).collect_view())}
                </select>
            </div>

            <div class="form-group">
                <label>{"Descripción *"}</label>
                <input
                    type="text"
                    class="form-input"
                    list="elemento-descripciones"
                    prop:value=move || descripcion.get()
                    on:input=move |ev| descripcion.set(event_target_value(&ev))
                    placeholder="Ej. Giratoria negra"
                />
                <datalist id="elemento-descripciones">
                    {move || sugerencias().into_iter().map(|d| view! { <option value=d></option> }).collect_view()}
                </datalist>
            </div>

            <div class="form-group">
                <label>{"Cantidad *"}</label>
                <input
                    type="number"
                    min="1"
                    class="form-input"
                    prop:value=move || cantidad.get()
                    on:input=move |ev| cantidad.set(event_target_value(&ev))
                />
            </div>

            <div class="id-preview">
                {"ID: "}
                <strong>{move || id_preview.get().unwrap_or_else(|| "—".to_string())}</strong>
            </div>
        </div>

        <div class="details-actions">
            <Button
                appearance=ButtonAppearance::Primary
                on_click=handle_save
                disabled=Signal::derive(move || saving.get())
            >
                {icon("save")}
                {move || if saving.get() { " Guardando..." } else { " Guardar" }}
            </Button>
            <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                {icon("x")}
                " Cancelar"
            </Button>
        </div>
    }
}

#[component]
fn ElementoEditForm(
    elemento: ElementoListItem,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let cantidad = RwSignal::new(
        elemento
            .cantidad
            .map(|c| c.to_string())
            .unwrap_or_default(),
    );
    let estatus = RwSignal::new(
        elemento
            .estatus
            .clone()
            .unwrap_or_else(|| ESTATUS_ACTIVO.to_string()),
    );
    let saving = RwSignal::new(false);
    let id = StoredValue::new(elemento.elemento_id.clone());

    let handle_save = move |_| {
        let Some(valor) = parse_cantidad(&cantidad.get_untracked()) else {
            alert_error("La cantidad debe ser un numero mayor o igual a 1");
            return;
        };
        if let Err(e) = validate_cantidad(valor) {
            alert_error(&e);
            return;
        }
        let dto = ElementoUpdateDto {
            cantidad: Some(valor),
            estatus: Some(estatus.get_untracked()),
        };
        saving.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let result = api::update(&id.get_value(), &dto).await;
            saving.set(false);
            match result {
                Ok(_) => on_saved.run(()),
                Err(e) => alert_error(&e),
            }
        });
    };

    view! {
        <div class="details-form">
            <div class="form-group">
                <label>{"ID"}</label>
                <div class="form-static">{elemento.elemento_id.clone()}</div>
            </div>
            <div class="form-group">
                <label>{"Elemento"}</label>
                <div class="form-static">
                    {format!("{} {}", elemento.nombre, elemento.descripcion.clone().unwrap_or_default())}
                </div>
            </div>
            <div class="form-group">
                <label>{"Ubicación"}</label>
                <div class="form-static">
                    {format!("{} / {}", elemento.area_nombre, elemento.subarea_nombre)}
                </div>
            </div>

            <div class="form-group">
                <label>{"Cantidad *"}</label>
                <input
                    type="number"
                    min="1"
                    class="form-input"
                    prop:value=move || cantidad.get()
                    on:input=move |ev| cantidad.set(event_target_value(&ev))
                />
            </div>

            <div class="form-group">
                <label>{"Estatus"}</label>
                <select
                    class="form-select"
                    on:change=move |ev| estatus.set(event_target_value(&ev))
                    prop:value=move || estatus.get()
                >
                    {[ESTATUS_ACTIVO, ESTATUS_INACTIVO].into_iter().map(|e| view! {
                        <option value=e selected=move || estatus.get() == e>{e}</option>
                    }).collect_view()}
                </select>
            </div>
        </div>

        <div class="details-actions">
            <Button
                appearance=ButtonAppearance::Primary
                on_click=handle_save
                disabled=Signal::derive(move || saving.get())
            >
                {icon("save")}
                {move || if saving.get() { " Guardando..." } else { " Guardar" }}
            </Button>
            <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                {icon("x")}
                " Cancelar"
            </Button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cantidad_accepts_comma_decimal() {
        assert_eq!(parse_cantidad(" 3 "), Some(3.0));
        assert_eq!(parse_cantidad("2,5"), Some(2.5));
        assert_eq!(parse_cantidad("x"), None);
    }
}
