use crate::domain::a010_metodologia_evento::api;
use crate::layout::tabs::tab_labels;
use crate::shared::components::pasos_editor::{drafts_from, textos, PasoDraft, PasosEditor};
use crate::shared::dialogs::alert_error;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageCategory, PageFrame};
use contracts::domain::a010_metodologia_evento::aggregate::{
    GuardarPasosEventoDto, MetodologiaEventoResponse, PasoEvento,
};
use leptos::prelude::*;
use thaw::*;

fn pasos_evento(textos: Vec<String>) -> Vec<PasoEvento> {
    textos
        .into_iter()
        .enumerate()
        .map(|(i, descripcion)| PasoEvento {
            numero_paso: i as i32 + 1,
            descripcion,
        })
        .collect()
}

/// Редактор шагов методологии события; шаги сохраняются одним запросом
#[component]
pub fn MetodologiaEventoEditor(metodologia_id: String, on_close: Callback<()>) -> impl IntoView {
    let data = RwSignal::new(None::<MetodologiaEventoResponse>);
    let pasos = RwSignal::new(Vec::<PasoDraft>::new());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);
    let id = StoredValue::new(metodologia_id.clone());

    let load = move || {
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch(&id.get_value()).await {
                Ok(response) => {
                    pasos.set(drafts_from(
                        response
                            .metodologia
                            .pasos
                            .iter()
                            .map(|p| p.descripcion.clone()),
                    ));
                    data.set(Some(response));
                    error.set(None);
                }
                Err(e) => error.set(Some(e)),
            }
        });
    };

    let handle_save = move |_| {
        let dto = GuardarPasosEventoDto {
            pasos: pasos_evento(pasos.with_untracked(|p| textos(p))),
        };
        if let Err(e) = dto.validate() {
            alert_error(&e);
            return;
        }
        saving.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let result = api::guardar_pasos(&id.get_value(), &dto).await;
            saving.set(false);
            match result {
                Ok(response) => {
                    log::info!("{}", response.message);
                    load();
                }
                Err(e) => alert_error(&e),
            }
        });
    };

    load();

    view! {
        <PageFrame page_key=tab_labels::key_metodologia_evento(&metodologia_id) category=PageCategory::Editor>
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h1 class="page__title">
                    {move || data.get().map(|d| d.metodologia.nombre).unwrap_or_else(|| id.get_value())}
                </h1>
                <Space>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| load()>
                        {icon("refresh")}
                        " Recargar"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        {icon("x")}
                        " Cerrar"
                    </Button>
                </Space>
            </Flex>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            {move || data.get().map(|d| view! {
                <div class="editor-summary">
                    <div>
                        <span class="editor-summary__label">{"Metodología: "}</span>
                        {d.metodologia.metodologia_fraccion_id.clone()}
                    </div>
                    {d.fraccion.map(|f| view! {
                        <div>
                            <span class="editor-summary__label">{"Fracción: "}</span>
                            {format!("{} - {}", f.fraccion_evento_id, f.nombre)}
                        </div>
                    })}
                    {d.evento.map(|e| view! {
                        <div>
                            <span class="editor-summary__label">{"Evento: "}</span>
                            {e.nombre}
                        </div>
                    })}
                    {d.metodologia.descripcion.map(|desc| view! {
                        <p class="editor-summary__desc">{desc}</p>
                    })}
                </div>
            })}

            <PasosEditor pasos=pasos placeholder="Descripción del paso" />

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=handle_save
                    disabled=Signal::derive(move || saving.get() || data.with(|d| d.is_none()))
                >
                    {icon("save")}
                    {move || if saving.get() { " Guardando..." } else { " Guardar pasos" }}
                </Button>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pasos_evento_numbered_from_one() {
        let pasos = pasos_evento(vec!["Acordonar".into(), "Absorber".into()]);
        assert_eq!(pasos[0].numero_paso, 1);
        assert_eq!(pasos[1], PasoEvento { numero_paso: 2, descripcion: "Absorber".into() });
    }
}
