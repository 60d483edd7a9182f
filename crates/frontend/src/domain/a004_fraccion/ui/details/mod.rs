use crate::domain::a004_fraccion::api;
use crate::shared::dialogs::alert_error;
use crate::shared::icons::icon;
use contracts::domain::a004_fraccion::aggregate::{
    customs_sin_propio, es_primera_id, nombre_base, nombre_preview, validate_custom,
    FraccionCatalogos, FraccionCreateDto, FraccionListItem, FraccionNextIdResponse,
    FraccionUpdateDto,
};
use leptos::prelude::*;
use thaw::*;

/// Создание (`fraccion = None`) или редактирование фракции.
///
/// После создания вызывается `on_created` с id новой фракции,
/// после сохранения изменений `on_saved`.
#[component]
pub fn FraccionDetails(
    fraccion: Option<FraccionListItem>,
    catalogos: FraccionCatalogos,
    on_saved: Callback<()>,
    on_created: Callback<String>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let is_edit = fraccion.is_some();
    let edit_id = StoredValue::new(fraccion.as_ref().map(|f| f.fraccion_id.clone()));
    let base_edit = StoredValue::new(
        fraccion
            .as_ref()
            .map(|f| f.fraccion_nombre.clone())
            .unwrap_or_default(),
    );
    let primera_edit = fraccion
        .as_ref()
        .map(|f| es_primera_id(&f.fraccion_id))
        .unwrap_or(false);
    // Custom соседей редактируемой фракции, без её собственного
    let customs_edit = RwSignal::new(None::<Vec<String>>);

    let codigo = RwSignal::new(String::new());
    let nombre_custom = RwSignal::new(
        fraccion
            .as_ref()
            .and_then(|f| f.nombre_custom.clone())
            .unwrap_or_default(),
    );
    let nota_tecnica = RwSignal::new(
        fraccion
            .as_ref()
            .and_then(|f| f.nota_tecnica.clone())
            .unwrap_or_default(),
    );
    let grupo_fracciones = RwSignal::new(
        fraccion
            .as_ref()
            .and_then(|f| f.grupo_fracciones.clone())
            .unwrap_or_default(),
    );
    let next = RwSignal::new(None::<FraccionNextIdResponse>);
    let saving = RwSignal::new(false);

    if let Some(f) = fraccion.as_ref() {
        let codigo_edit = f.codigo.clone();
        let propio = f.nombre_custom.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_next_id(&codigo_edit).await {
                Ok(response) => customs_edit.set(Some(customs_sin_propio(
                    &response.customs_existentes,
                    propio.as_deref(),
                ))),
                Err(e) => log::warn!("next-id: {}", e),
            }
        });
    }

    if !is_edit {
        Effect::new(move |_| {
            let c = codigo.get();
            next.set(None);
            if c.is_empty() {
                return;
            }
            wasm_bindgen_futures::spawn_local(async move {
                let result = api::fetch_next_id(&c).await;
                if codigo.get_untracked() != c {
                    return;
                }
                match result {
                    Ok(response) => {
                        if response.es_primera {
                            nombre_custom.set(String::new());
                        }
                        next.set(Some(response));
                    }
                    Err(e) => alert_error(&e),
                }
            });
        });
    }

    let base = move || {
        if is_edit {
            base_edit.get_value()
        } else {
            nombre_base(&codigo.get()).unwrap_or_default().to_string()
        }
    };
    let es_primera = move || next.get().map(|n| n.es_primera).unwrap_or(false);
    let custom_bloqueado = move || if is_edit { primera_edit } else { es_primera() };

    let handle_save = move |_| {
        if let Some(id) = edit_id.get_value() {
            let dto = FraccionUpdateDto {
                nombre_custom: nombre_custom.get_untracked(),
                nota_tecnica: nota_tecnica.get_untracked(),
                grupo_fracciones: grupo_fracciones.get_untracked(),
            };
            let customs = customs_edit.get_untracked().unwrap_or_default();
            if let Err(e) = validate_custom(
                primera_edit,
                dto.nombre_custom().as_deref(),
                &base(),
                &customs,
            ) {
                alert_error(&e);
                return;
            }
            saving.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let result = api::update(&id, &dto).await;
                saving.set(false);
                match result {
                    Ok(_) => on_saved.run(()),
                    Err(e) => alert_error(&e),
                }
            });
            return;
        }

        let dto = FraccionCreateDto {
            codigo: codigo.get_untracked(),
            nombre_custom: nombre_custom.get_untracked(),
            nota_tecnica: nota_tecnica.get_untracked(),
            grupo_fracciones: grupo_fracciones.get_untracked(),
        };
        let base = match dto.validate() {
            Ok(base) => base,
            Err(e) => {
                alert_error(&e);
                return;
            }
        };
        let Some(info) = next.get_untracked() else {
            alert_error("Seleccione un código");
            return;
        };
        let custom = dto.nombre_custom();
        if let Err(e) = validate_custom(
            info.es_primera,
            custom.as_deref(),
            base,
            &info.customs_existentes,
        ) {
            alert_error(&e);
            return;
        }

        saving.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let result = api::create(&dto).await;
            saving.set(false);
            match result {
                Ok(response) => on_created.run(response.fraccion.fraccion_id),
                Err(e) => alert_error(&e),
            }
        });
    };

    let codigos = catalogos.grupos.clone();
    let grupos_fracciones = catalogos.grupos_fracciones.clone();

    view! {
        <div class="details-form">
            {if is_edit {
                view! {
                    <div class="form-group">
                        <label>{"ID"}</label>
                        <div class="form-static">{edit_id.get_value().unwrap_or_default()}</div>
                    </div>
                    <div class="form-group">
                        <label>{"Nombre base"}</label>
                        <div class="form-static">{base()}</div>
                    </div>
                }
                .into_any()
            } else {
                view! {
                    <div class="form-group">
                        <label>{"Código *"}</label>
                        <select class="form-select" on:change=move |ev| codigo.set(event_target_value(&ev))>
                            <option value="">{"Seleccione..."}</option>
                            {codigos.iter().map(|g| view! {
                                <option value=g.codigo.clone()>{format!("{} - {}", g.codigo, g.nombre)}</option>
                            }).collect_view()}
                        </select>
                    </div>
                    <div class="id-preview">
                        {"ID: "}
                        <strong>{move || next.get().map(|n| n.fraccion_id).unwrap_or_else(|| "—".to_string())}</strong>
                    </div>
                    {move || next.get().filter(|n| !n.es_primera).map(|n| view! {
                        <div class="warning-box">
                            <span class="warning-box__icon">"ℹ"</span>
                            <span class="warning-box__text">
                                {format!(
                                    "Este código ya existe. Se requiere un nombre custom distinto de: {}",
                                    n.customs_existentes.join(", "),
                                )}
                            </span>
                        </div>
                    })}
                }
                .into_any()
            }}

            <div class="form-group">
                <label>{move || {
                    let requerido = if is_edit { !primera_edit } else { !es_primera() && next.get().is_some() };
                    if requerido { "Nombre custom *" } else { "Nombre custom" }
                }}</label>
                <input
                    type="text"
                    class="form-input"
                    prop:value=move || nombre_custom.get()
                    on:input=move |ev| nombre_custom.set(event_target_value(&ev))
                    disabled=custom_bloqueado
                    placeholder=move || if custom_bloqueado() {
                        "La primera fracción del código no lleva custom"
                    } else {
                        "Ej. Pasillos"
                    }
                />
            </div>

            <div class="nombre-preview">
                {"Nombre: "}
                <strong>{move || nombre_preview(&base(), &nombre_custom.get())}</strong>
            </div>

            <div class="form-group">
                <label>{"Nota técnica"}</label>
                <Textarea value=nota_tecnica />
            </div>

            <div class="form-group">
                <label>{"Grupo"}</label>
                <select
                    class="form-select"
                    on:change=move |ev| grupo_fracciones.set(event_target_value(&ev))
                    prop:value=move || grupo_fracciones.get()
                >
                    <option value="">{"(sin grupo)"}</option>
                    {grupos_fracciones.into_iter().map(|g| {
                        let value = g.clone();
                        let option_value = g.clone();
                        view! {
                            <option value=option_value selected=move || grupo_fracciones.get() == value>{g}</option>
                        }
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
