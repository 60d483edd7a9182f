use crate::domain::a005_metodologia::api;
use crate::layout::tabs::tab_labels;
use crate::shared::components::pasos_editor::{drafts_from, textos, PasosEditor};
use crate::shared::dialogs::alert_error;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageCategory, PageFrame};
use contracts::domain::a005_metodologia::aggregate::{
    metodologia_base_id, FraccionMetodologias, GuardarPasosDto, MetodologiaBase, Paso,
};
use contracts::domain::common::NivelLimpieza;
use leptos::prelude::*;
use thaw::*;

/// Шаги из текстов редактора, нумерация с 1
fn pasos_de(textos: Vec<String>) -> Vec<Paso> {
    textos
        .into_iter()
        .enumerate()
        .map(|(i, instruccion)| Paso {
            orden: i as i32 + 1,
            instruccion,
        })
        .collect()
}

/// Редактор базовых методологий фракции: по панели на каждый уровень
#[component]
pub fn MetodologiaEditor(fraccion_id: String, on_close: Callback<()>) -> impl IntoView {
    let data = RwSignal::new(None::<FraccionMetodologias>);
    let error = RwSignal::new(None::<String>);
    let id = StoredValue::new(fraccion_id.clone());

    let load = move || {
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_metodologias(&id.get_value()).await {
                Ok(response) => {
                    data.set(Some(response));
                    error.set(None);
                }
                Err(e) => error.set(Some(e)),
            }
        });
    };

    load();

    view! {
        <PageFrame page_key=tab_labels::key_metodologia(&fraccion_id) category=PageCategory::Editor>
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h1 class="page__title">
                    {move || data.get().map(|d| format!("Metodologías: {}", d.fraccion.nombre_full))
                        .unwrap_or_else(|| format!("Metodologías {}", id.get_value()))}
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

            // Панели пересоздаются после каждой загрузки
            {move || data.get().map(|d| {
                NivelLimpieza::ALL.into_iter().map(|nivel| {
                    let metodologia = d.nivel(nivel).cloned();
                    view! {
                        <NivelPanel
                            fraccion_id=id.get_value()
                            nivel=nivel
                            metodologia=metodologia
                            on_saved=Callback::new(move |_: ()| load())
                        />
                    }
                }).collect_view()
            })}
        </PageFrame>
    }
}

#[component]
fn NivelPanel(
    fraccion_id: String,
    nivel: NivelLimpieza,
    metodologia: Option<MetodologiaBase>,
    on_saved: Callback<()>,
) -> impl IntoView {
    let existe = metodologia.is_some();
    let titulo = match &metodologia {
        Some(m) => format!("{} ({})", m.nombre, m.metodologia_base_id),
        None => format!(
            "{} ({})",
            nivel.etiqueta(),
            metodologia_base_id(&fraccion_id, nivel).unwrap_or_default()
        ),
    };
    let pasos = RwSignal::new(drafts_from(
        metodologia
            .map(|m| m.pasos.into_iter().map(|p| p.instruccion).collect::<Vec<_>>())
            .unwrap_or_default(),
    ));
    let saving = RwSignal::new(false);
    let fraccion_id = StoredValue::new(fraccion_id);

    let handle_save = move |_| {
        let dto = GuardarPasosDto {
            pasos: pasos_de(pasos.with_untracked(|p| textos(p))),
        };
        if let Err(e) = dto.validate() {
            alert_error(&e);
            return;
        }
        saving.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let result = api::guardar_nivel(&fraccion_id.get_value(), nivel, &dto).await;
            saving.set(false);
            match result {
                Ok(response) => {
                    log::info!("{}", response.message);
                    on_saved.run(());
                }
                Err(e) => alert_error(&e),
            }
        });
    };

    let sin_pasos = move || pasos.with(|p| p.is_empty()) && !existe;

    view! {
        <section class=format!("nivel-panel nivel-panel--{}", nivel.nombre())>
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h2 class="nivel-panel__title">
                    <span class="nivel-badge nivel-badge--on">{nivel.letra().to_string()}</span>
                    " "
                    {titulo}
                </h2>
                {(!existe).then(|| view! {
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Warning>
                        "Sin metodología"
                    </Badge>
                })}
            </Flex>
            <PasosEditor pasos=pasos />
            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=handle_save
                    disabled=Signal::derive(move || saving.get() || sin_pasos())
                >
                    {icon("save")}
                    {move || if saving.get() { " Guardando..." } else { " Guardar nivel" }}
                </Button>
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pasos_are_numbered_by_position() {
        let pasos = pasos_de(vec!["Barrer".into(), "Trapear".into()]);
        assert_eq!(pasos[0], Paso { orden: 1, instruccion: "Barrer".into() });
        assert_eq!(pasos[1].orden, 2);
    }
}
