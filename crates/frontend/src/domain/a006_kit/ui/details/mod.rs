use crate::domain::a006_kit::api;
use crate::domain::a006_kit::ui::herramientas_checklist::HerramientasChecklist;
use crate::shared::dialogs::alert_error;
use crate::shared::icons::icon;
use contracts::domain::a004_fraccion::aggregate::FraccionOption;
use contracts::domain::a006_kit::aggregate::{KitCreateDto, KitListItem, KitUpdateDto, NIVEL_GENERAL};
use contracts::domain::common::NivelLimpieza;
use leptos::prelude::*;
use thaw::*;

/// Значение select уровня → `nivel_limpieza_id`; `general` и мусор дают `None`
fn nivel_de_select(value: &str) -> Option<i32> {
    value
        .parse::<i32>()
        .ok()
        .filter(|n| NivelLimpieza::from_id(*n).is_some())
}

fn nivel_a_select(nivel: Option<i32>) -> String {
    nivel
        .map(|n| n.to_string())
        .unwrap_or_else(|| NIVEL_GENERAL.to_string())
}

#[component]
pub fn KitDetails(
    kit: Option<KitListItem>,
    fracciones: Vec<FraccionOption>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let is_edit = kit.is_some();
    let edit_id = StoredValue::new(kit.as_ref().map(|k| k.kit_id.clone()));

    let fraccion_id = RwSignal::new(
        kit.as_ref()
            .and_then(|k| k.fraccion_id.clone())
            .unwrap_or_default(),
    );
    let nombre = RwSignal::new(kit.as_ref().map(|k| k.nombre.clone()).unwrap_or_default());
    let nivel = RwSignal::new(nivel_a_select(kit.as_ref().and_then(|k| k.nivel_limpieza_id)));
    let seleccion = RwSignal::new(
        kit.as_ref()
            .map(|k| k.herramientas.iter().map(|h| h.herramienta_id.clone()).collect::<Vec<String>>())
            .unwrap_or_default(),
    );
    let id_preview = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);
    let fracciones = StoredValue::new(fracciones);

    let codigo = move || {
        let id = fraccion_id.get();
        fracciones.with_value(|fs| {
            fs.iter()
                .find(|f| f.fraccion_id == id)
                .map(|f| f.codigo.clone())
                .unwrap_or_default()
        })
    };

    if !is_edit {
        Effect::new(move |_| {
            let c = codigo();
            if c.is_empty() {
                id_preview.set(None);
                return;
            }
            wasm_bindgen_futures::spawn_local(async move {
                let result = api::fetch_next_id(&c).await;
                match result {
                    Ok(next) if next.codigo == c => id_preview.set(Some(next.kit_id)),
                    Ok(_) => {}
                    Err(e) => {
                        log::warn!("next-id: {}", e);
                        id_preview.set(None);
                    }
                }
            });
        });
    }

    let handle_save = move |_| {
        let nivel_limpieza_id = nivel_de_select(&nivel.get_untracked());
        let herramientas = seleccion.get_untracked();

        if let Some(id) = edit_id.get_value() {
            let dto = KitUpdateDto {
                nombre: nombre.get_untracked().trim().to_string(),
                nivel_limpieza_id,
                herramientas,
            };
            if let Err(e) = dto.validate() {
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

        let dto = KitCreateDto {
            codigo: codigo(),
            fraccion_id: fraccion_id.get_untracked(),
            nombre: nombre.get_untracked(),
            nivel_limpieza_id,
            herramientas,
        }
        .normalized();
        if let Err(e) = dto.validate().and_then(|_| dto.validate_contenido()) {
            alert_error(&e);
            return;
        }
        saving.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let result = api::create(&dto).await;
            saving.set(false);
            match result {
                Ok(response) => {
                    log::info!("Kit {} creado", response.kit.kit_id);
                    on_saved.run(());
                }
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
                    <div class="form-group">
                        <label>{"Fracción"}</label>
                        <div class="form-static">{fraccion_id.get_untracked()}</div>
                    </div>
                }
                .into_any()
            } else {
                view! {
                    <div class="form-group">
                        <label>{"Fracción *"}</label>
                        <select class="form-select" on:change=move |ev| fraccion_id.set(event_target_value(&ev))>
                            <option value="">{"Seleccione..."}</option>
                            {fracciones.with_value(|fs| fs.iter().map(|f| view! {
                                <option value=f.fraccion_id.clone()>{format!("{} - {}", f.fraccion_id, f.nombre_full)}</option>
                            }).collect_view())}
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
                <Input value=nombre placeholder="Ej. Kit baño básico" />
            </div>

            <div class="form-group">
                <label>{"Nivel de limpieza"}</label>
                <select
                    class="form-select"
                    on:change=move |ev| nivel.set(event_target_value(&ev))
                    prop:value=move || nivel.get()
                >
                    <option value=NIVEL_GENERAL selected=move || nivel.get() == NIVEL_GENERAL>{"General"}</option>
                    {NivelLimpieza::ALL.into_iter().map(|n| {
                        let value = n.id().to_string();
                        let value_for_selected = value.clone();
                        view! {
                            <option value=value selected=move || nivel.get() == value_for_selected>
                                {n.etiqueta()}
                            </option>
                        }
                    }).collect_view()}
                </select>
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nivel_select_maps_general_to_none() {
        assert_eq!(nivel_de_select(NIVEL_GENERAL), None);
        assert_eq!(nivel_de_select("3"), Some(3));
        assert_eq!(nivel_de_select("7"), None);
        assert_eq!(nivel_a_select(None), "general");
        assert_eq!(nivel_a_select(Some(1)), "1");
    }
}
