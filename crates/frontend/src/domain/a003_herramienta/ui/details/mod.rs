use crate::domain::a003_herramienta::api;
use crate::shared::dialogs::alert_error;
use crate::shared::icons::icon;
use contracts::domain::a003_herramienta::aggregate::{
    Herramienta, HerramientaCreateDto, HerramientaUpdateDto, ESTATUS_ACTIVO, ESTATUS_INACTIVO,
};
use contracts::shared::api::GlosarioItem;
use leptos::prelude::*;
use thaw::*;

/// Форма создания (`herramienta = None`) или редактирования
#[component]
pub fn HerramientaDetails(
    herramienta: Option<Herramienta>,
    grupos: Vec<GlosarioItem>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let edit_id = StoredValue::new(herramienta.as_ref().map(|h| h.herramienta_id.clone()));
    let is_edit = herramienta.is_some();

    let grupo = RwSignal::new(
        herramienta
            .as_ref()
            .map(|h| h.grupo.clone())
            .unwrap_or_default(),
    );
    let nombre = RwSignal::new(
        herramienta
            .as_ref()
            .map(|h| h.nombre.clone())
            .unwrap_or_default(),
    );
    let descripcion = RwSignal::new(
        herramienta
            .as_ref()
            .and_then(|h| h.descripcion.clone())
            .unwrap_or_default(),
    );
    let estatus = RwSignal::new(
        herramienta
            .as_ref()
            .and_then(|h| h.estatus.clone())
            .unwrap_or_else(|| ESTATUS_ACTIVO.to_string()),
    );
    let id_preview = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    if !is_edit {
        Effect::new(move |_| {
            let g = grupo.get();
            if g.is_empty() {
                id_preview.set(None);
                return;
            }
            wasm_bindgen_futures::spawn_local(async move {
                let result = api::fetch_next_id(&g).await;
                if grupo.get_untracked() != g {
                    return;
                }
                match result {
                    Ok(next) => id_preview.set(Some(next.herramienta_id)),
                    Err(e) => {
                        log::warn!("next-id: {}", e);
                        id_preview.set(None);
                    }
                }
            });
        });
    }

    let handle_save = move |_| {
        let result = match edit_id.get_value() {
            None => {
                let dto = HerramientaCreateDto {
                    grupo: grupo.get_untracked(),
                    nombre: nombre.get_untracked(),
                    descripcion: descripcion.get_untracked(),
                }
                .normalized();
                dto.validate().map(|_| (None, Some(dto), None))
            }
            Some(id) => {
                let dto = HerramientaUpdateDto {
                    nombre: nombre.get_untracked(),
                    descripcion: descripcion.get_untracked(),
                    estatus: estatus.get_untracked(),
                }
                .normalized();
                dto.validate().map(|_| (Some(id), None, Some(dto)))
            }
        };
        let (id, create_dto, update_dto) = match result {
            Ok(parts) => parts,
            Err(e) => {
                alert_error(&e);
                return;
            }
        };

        saving.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let result = match (id, create_dto, update_dto) {
                (Some(id), _, Some(dto)) => api::update(&id, &dto).await,
                (_, Some(dto), _) => api::create(&dto).await,
                _ => Err("Formulario incompleto".to_string()),
            };
            saving.set(false);
            match result {
                Ok(_) => on_saved.run(()),
                Err(e) => alert_error(&e),
            }
        });
    };

    view! {
        <div class="details-form">
            {if is_edit {
                view! {
                    <div class="form-group">
                        <label>{"ID"}</label>
                        <div class="form-static">{edit_id.get_value().unwrap_or_default()}</div>
                    </div>
                }
                .into_any()
            } else {
                view! {
                    <div class="form-group">
                        <label>{"Grupo *"}</label>
                        <select class="form-select" on:change=move |ev| grupo.set(event_target_value(&ev))>
                            <option value="">{"Seleccione..."}</option>
                            {grupos.iter().map(|g| view! {
                                <option value=g.codigo.clone()>{format!("{} - {}", g.codigo, g.nombre)}</option>
                            }).collect_view()}
                        </select>
                    </div>
                    <div class="id-preview">
                        {"ID: "}
                        <strong>{move || id_preview.get().unwrap_or_else(|| "—".to_string())}</strong>
                    </div>
                }
                .into_any()
            }}

            <div class="form-group">
                <label>{"Nombre *"}</label>
                <Input value=nombre placeholder="Ej. Escoba de cerdas duras" />
            </div>

            <div class="form-group">
                <label>{if is_edit { "Descripción *" } else { "Descripción" }}</label>
                <Textarea value=descripcion placeholder="Si se deja vacía se usa el nombre" />
            </div>

            {is_edit.then(|| view! {
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
            })}
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
