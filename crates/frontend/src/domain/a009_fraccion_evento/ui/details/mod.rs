use crate::domain::a009_fraccion_evento::api;
use crate::shared::dialogs::alert_error;
use crate::shared::icons::icon;
use contracts::domain::a007_evento::aggregate::EventoCatalogo;
use contracts::domain::a009_fraccion_evento::aggregate::{
    metodologia_id_para, CodigoDisponible, FraccionEventoCreateDto, FraccionEventoListItem,
    FraccionEventoUpdateDto,
};
use leptos::prelude::*;
use thaw::*;

/// Значение select для нового кода
const CODIGO_NUEVO: &str = "__nuevo";

/// Имя новой фракции.
///
/// Для уже занятого кода имя строится из базового и обязательного custom,
/// для нового кода берётся свободное имя.
fn componer_nombre(base: Option<&str>, custom: &str, libre: &str) -> Result<String, String> {
    match base {
        Some(base) => match custom.trim() {
            "" => Err("Este codigo ya existe. Debes agregar un nombre custom".into()),
            c => Ok(format!("{} — {}", base, c)),
        },
        None => Ok(libre.trim().to_string()),
    }
}

#[component]
pub fn FraccionEventoDetails(
    fraccion: Option<FraccionEventoListItem>,
    eventos: Vec<EventoCatalogo>,
    on_saved: Callback<()>,
    /// Получает id методологии новой фракции
    on_created: Callback<String>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    match fraccion {
        Some(fraccion) => view! {
            <FraccionEventoEditForm fraccion=fraccion on_saved=on_saved on_cancel=on_cancel />
        }
        .into_any(),
        None => view! {
            <FraccionEventoCreateForm eventos=eventos on_created=on_created on_cancel=on_cancel />
        }
        .into_any(),
    }
}

#[component]
fn FraccionEventoCreateForm(
    eventos: Vec<EventoCatalogo>,
    on_created: Callback<String>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let evento_tipo = RwSignal::new(String::new());
    let codigos = RwSignal::new(Vec::<CodigoDisponible>::new());
    let codigo_sel = RwSignal::new(String::new());
    let codigo_nuevo = RwSignal::new(String::new());
    let custom = RwSignal::new(String::new());
    let nombre_libre = RwSignal::new(String::new());
    let descripcion = RwSignal::new(String::new());
    let id_preview = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    Effect::new(move |_| {
        let evento = evento_tipo.get();
        codigo_sel.set(String::new());
        codigos.set(vec![]);
        if evento.is_empty() {
            return;
        }
        wasm_bindgen_futures::spawn_local(async move {
            let result = api::fetch_codigos(&evento).await;
            if evento_tipo.get_untracked() != evento {
                return;
            }
            match result {
                Ok(response) => codigos.set(response.codigos),
                Err(e) => alert_error(&e),
            }
        });
    });

    // Выбранный код и его базовое имя, если код уже занят
    let codigo = move || match codigo_sel.get().as_str() {
        CODIGO_NUEVO => codigo_nuevo.get().trim().to_uppercase(),
        c => c.to_string(),
    };
    let base = move || {
        let sel = codigo_sel.get();
        codigos.with(|cs| {
            cs.iter()
                .find(|c| c.codigo == sel)
                .map(|c| c.nombre_base.clone())
        })
    };

    Effect::new(move |_| {
        let evento = evento_tipo.get();
        let c = codigo();
        id_preview.set(None);
        if evento.is_empty() || c.chars().count() != 2 {
            return;
        }
        wasm_bindgen_futures::spawn_local(async move {
            let result = api::fetch_next_id(&evento, &c).await;
            if evento_tipo.get_untracked() != evento || codigo_sel.with_untracked(|s| s.is_empty()) {
                return;
            }
            match result {
                Ok(next) if next.codigo == c => id_preview.set(Some(next.fraccion_evento_id)),
                Ok(_) => {}
                Err(e) => log::warn!("next-id: {}", e),
            }
        });
    });

    let handle_save = move |_| {
        let nombre = match componer_nombre(
            base().as_deref(),
            &custom.get_untracked(),
            &nombre_libre.get_untracked(),
        ) {
            Ok(nombre) => nombre,
            Err(e) => {
                alert_error(&e);
                return;
            }
        };
        let dto = FraccionEventoCreateDto {
            evento_tipo_id: evento_tipo.get_untracked(),
            codigo: codigo(),
            nombre,
            descripcion: descripcion.get_untracked(),
        }
        .normalized();
        if dto.evento_tipo_id.is_empty() {
            alert_error("Seleccione un evento");
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
                    let fraccion = response.fraccion;
                    let metodologia_id = fraccion
                        .metodologia_id
                        .unwrap_or_else(|| metodologia_id_para(&fraccion.fraccion_evento_id));
                    on_created.run(metodologia_id);
                }
                Err(e) => alert_error(&e),
            }
        });
    };

    view! {
        <div class="details-form">
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
                <label>{"Código *"}</label>
                <select
                    class="form-select"
                    on:change=move |ev| codigo_sel.set(event_target_value(&ev))
                    prop:value=move || codigo_sel.get()
                    disabled=move || evento_tipo.with(|e| e.is_empty())
                >
                    <option value="">{"Seleccione..."}</option>
                    {move || codigos.get().into_iter().map(|c| view! {
                        <option value=c.codigo.clone()>
                            {format!("{} - {} ({})", c.codigo, c.nombre_base, c.count)}
                        </option>
                    }).collect_view()}
                    <option value=CODIGO_NUEVO>{"+ Código nuevo"}</option>
                </select>
            </div>

            {move || (codigo_sel.get() == CODIGO_NUEVO).then(|| view! {
                <div class="form-group">
                    <label>{"Código nuevo (2 letras) *"}</label>
                    <input
                        type="text"
                        class="form-input"
                        maxlength="2"
                        prop:value=move || codigo_nuevo.get()
                        on:input=move |ev| codigo_nuevo.set(event_target_value(&ev).to_uppercase())
                    />
                </div>
                <div class="form-group">
                    <label>{"Nombre *"}</label>
                    <Input value=nombre_libre placeholder="Ej. Derrame de líquidos" />
                </div>
            })}

            {move || base().map(|b| {
                let base_label = b.clone();
                view! {
                <div class="form-group">
                    <label>{"Nombre base"}</label>
                    <div class="form-static">{base_label}</div>
                </div>
                <div class="form-group">
                    <label>{"Nombre custom *"}</label>
                    <Input value=custom placeholder="Ej. Aceite" />
                </div>
                <div class="nombre-preview">
                    {"Nombre: "}
                    <strong>{move || componer_nombre(Some(&b), &custom.get(), "").unwrap_or_else(|_| b.clone())}</strong>
                </div>
                }
            })}

            <div class="form-group">
                <label>{"Descripción"}</label>
                <Textarea value=descripcion attr:rows=3 />
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
fn FraccionEventoEditForm(
    fraccion: FraccionEventoListItem,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let nombre = RwSignal::new(fraccion.nombre.clone());
    let descripcion = RwSignal::new(fraccion.descripcion.clone().unwrap_or_default());
    let saving = RwSignal::new(false);
    let id = StoredValue::new(fraccion.fraccion_evento_id.clone());

    let handle_save = move |_| {
        let dto = FraccionEventoUpdateDto {
            nombre: nombre.get_untracked(),
            descripcion: descripcion.get_untracked(),
        }
        .normalized();
        if let Err(e) = dto.validate() {
            alert_error(&e);
            return;
        }
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
                <div class="form-static">{fraccion.fraccion_evento_id.clone()}</div>
            </div>
            <div class="form-group">
                <label>{"Evento"}</label>
                <div class="form-static">{fraccion.evento_nombre.clone()}</div>
            </div>
            <div class="form-group">
                <label>{"Nombre *"}</label>
                <Input value=nombre />
            </div>
            <div class="form-group">
                <label>{"Descripción"}</label>
                <Textarea value=descripcion attr:rows=3 />
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
    fn existing_codigo_requires_custom() {
        assert_eq!(
            componer_nombre(Some("Derrame"), " Aceite ", "ignorado"),
            Ok("Derrame — Aceite".to_string())
        );
        assert!(componer_nombre(Some("Derrame"), "  ", "").is_err());
    }

    #[test]
    fn new_codigo_uses_free_name() {
        assert_eq!(componer_nombre(None, "x", " Agua "), Ok("Agua".to_string()));
    }
}
