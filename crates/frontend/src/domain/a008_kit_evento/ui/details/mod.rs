use crate::domain::a006_kit::ui::herramientas_checklist::HerramientasChecklist;
use crate::domain::a008_kit_evento::api;
use crate::shared::dialogs::alert_error;
use crate::shared::icons::icon;
use contracts::domain::a007_evento::aggregate::{CasoCatalogo, EventoCatalogo};
use contracts::domain::a008_kit_evento::aggregate::{
    KitEventoCreateDto, KitEventoListItem, KitEventoUpdateDto,
};
use leptos::prelude::*;
use thaw::*;

/// Форма кита события. Создание: событие → случай → предпросмотр id.
#[component]
pub fn KitEventoDetails(
    kit: Option<KitEventoListItem>,
    eventos: Vec<EventoCatalogo>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let is_edit = kit.is_some();
    let edit = StoredValue::new(kit.clone());

    let evento_tipo = RwSignal::new(String::new());
    let caso_id = RwSignal::new(String::new());
    let casos = RwSignal::new(Vec::<CasoCatalogo>::new());
    let nombre = RwSignal::new(kit.as_ref().map(|k| k.nombre.clone()).unwrap_or_default());
    let seleccion = RwSignal::new(
        kit.as_ref()
            .map(|k| {
                k.herramientas
                    .iter()
                    .map(|h| h.herramienta_id.clone())
                    .collect::<Vec<String>>()
            })
            .unwrap_or_default(),
    );
    let id_preview = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    if !is_edit {
        Effect::new(move |_| {
            let evento = evento_tipo.get();
            caso_id.set(String::new());
            casos.set(vec![]);
            if evento.is_empty() {
                return;
            }
            wasm_bindgen_futures::spawn_local(async move {
                let result = api::fetch_casos(&evento).await;
                if evento_tipo.get_untracked() != evento {
                    return;
                }
                match result {
                    Ok(response) => casos.set(response.casos),
                    Err(e) => alert_error(&e),
                }
            });
        });

        Effect::new(move |_| {
            let caso = caso_id.get();
            id_preview.set(None);
            if caso.is_empty() {
                return;
            }
            wasm_bindgen_futures::spawn_local(async move {
                let result = api::fetch_next_id(&caso).await;
                if caso_id.get_untracked() != caso {
                    return;
                }
                match result {
                    Ok(next) => id_preview.set(Some(next.kit_id)),
                    Err(e) => log::warn!("next-id: {}", e),
                }
            });
        });
    }

    let handle_save = move |_| {
        let herramientas = seleccion.get_untracked();
        if let Some(kit) = edit.get_value() {
            let dto = KitEventoUpdateDto {
                nombre: nombre.get_untracked().trim().to_string(),
                herramientas,
            };
            if let Err(e) = dto.validate() {
                alert_error(&e);
                return;
            }
            saving.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let result = api::update(&kit.kit_id, &dto).await;
                saving.set(false);
                match result {
                    Ok(_) => on_saved.run(()),
                    Err(e) => alert_error(&e),
                }
            });
            return;
        }

        let dto = KitEventoCreateDto {
            caso_id: caso_id.get_untracked(),
            nombre: nombre.get_untracked(),
            herramientas,
        }
        .normalized();
        if dto.caso_id.is_empty() {
            alert_error("Seleccione un caso");
            return;
        }
        if let Err(e) = dto.validate_contenido() {
            alert_error(&e);
            return;
        }
        saving.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let result = api::create(&dto).await;
            saving.set(false);
            match result {
                Ok(response) => {
                    log::info!("Kit de evento {} creado", response.kit.kit_id);
                    on_saved.run(());
                }
                Err(e) => alert_error(&e),
            }
        });
    };

    view! {
        <div class="details-form">
            {match edit.get_value() {
                Some(k) => view! {
                    <div class="form-group">
                        <label>{"ID"}</label>
                        <div class="form-static">{k.kit_id.clone()}</div>
                    </div>
                    <div class="form-group">
                        <label>{"Evento / Caso"}</label>
                        <div class="form-static">{format!("{} / {}", k.evento_nombre, k.caso_nombre)}</div>
                    </div>
                }
                .into_any(),
                None => view! {
                    <div class="form-group">
                        <label>{"Evento *"}</label>
                        <select class="form-select" on:change=move |ev| evento_tipo.set(event_target_value(&ev))>
                            <option value="">{"Seleccione..."}</option>
                            {eventos.iter().map(|e| view! {
                                <option value=e.evento_tipo_id.clone()>{e.nombre.clone()}</option>
                            }).collect_view()}
                        </select>
                    </div>
                    <div class="form-group">
                        <label>{"Caso *"}</label>
                        <select
                            class="form-select"
                            on:change=move |ev| caso_id.set(event_target_value(&ev))
                            prop:value=move || caso_id.get()
                            disabled=move || casos.with(|c| c.is_empty())
                        >
                            <option value="">{"Seleccione..."}</option>
                            {move || casos.get().into_iter().map(|c| view! {
                                <option value=c.caso_id.clone()>{format!("{} - {}", c.caso_id, c.nombre)}</option>
                            }).collect_view()}
                        </select>
                    </div>
                    <div class="id-preview">
                        {"ID: "}
                        <strong>{move || id_preview.get().unwrap_or_else(|| "—".to_string())}</strong>
                    </div>
                }
                .into_any(),
            }}

            <div class="form-group">
                <label>{"Nombre *"}</label>
                <Input value=nombre placeholder="Ej. Kit derrame de líquidos" />
            </div>

            <div class="form-group">
                <label>{"Herramientas *"}</label>
                <HerramientasChecklist seleccion=seleccion />
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
