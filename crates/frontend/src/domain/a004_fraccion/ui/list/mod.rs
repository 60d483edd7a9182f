use crate::domain::a004_fraccion::api::{self, FraccionFiltro};
use crate::domain::a004_fraccion::ui::details::FraccionDetails;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{tab_label_for_key, tab_labels};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::dialogs::{alert_error, confirm};
use crate::shared::icons::icon;
use crate::shared::list_utils::{filter_list, Searchable};
use crate::shared::modal::Modal;
use crate::shared::page_frame::{PageCategory, PageFrame};
use contracts::domain::a004_fraccion::aggregate::{FraccionCatalogos, FraccionListItem};
use contracts::domain::common::NivelLimpieza;
use contracts::shared::paging::PageInfo;
use leptos::prelude::*;
use thaw::*;

impl Searchable for FraccionListItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.fraccion_id.as_str(),
            self.nombre_full.as_str(),
            self.nota_tecnica.as_deref().unwrap_or_default(),
            self.grupo_fracciones.as_deref().unwrap_or_default(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
struct FormState(Option<FraccionListItem>);

/// Бейджи B/M/P/E; отсутствующие уровни приглушены
fn niveles_badges(niveles: &[i32]) -> impl IntoView {
    NivelLimpieza::ALL
        .into_iter()
        .map(|nivel| {
            let presente = niveles.contains(&nivel.id());
            let class = if presente {
                "nivel-badge nivel-badge--on"
            } else {
                "nivel-badge nivel-badge--off"
            };
            view! {
                <span class=class title=nivel.etiqueta()>{nivel.letra().to_string()}</span>
            }
        })
        .collect_view()
}

#[component]
#[allow(non_snake_case)]
pub fn FraccionList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    let items = RwSignal::new(Vec::<FraccionListItem>::new());
    let page_info = RwSignal::new(PageInfo::default());
    let catalogos = RwSignal::new(None::<FraccionCatalogos>);
    let error = RwSignal::new(None::<String>);
    let search = RwSignal::new(String::new());
    let grupo = RwSignal::new(String::new());
    let page = RwSignal::new(1u64);
    let form = RwSignal::new(None::<FormState>);

    let fetch = move || {
        let filtro = FraccionFiltro {
            page: Some(page.get_untracked()),
            grupo: Some(grupo.get_untracked()).filter(|g| !g.is_empty()),
        };
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_list(&filtro).await {
                Ok(response) => {
                    items.set(response.fracciones);
                    page_info.set(response.pagination);
                    error.set(None);
                }
                Err(e) => error.set(Some(e)),
            }
        });
    };

    wasm_bindgen_futures::spawn_local(async move {
        match api::fetch_catalogos().await {
            Ok(c) => catalogos.set(Some(c)),
            Err(e) => error.set(Some(e)),
        }
    });

    let open_metodologias = move |fraccion_id: String| {
        let key = tab_labels::key_metodologia(&fraccion_id);
        ctx.open_tab(&key, &tab_label_for_key(&key));
    };

    let handle_delete = move |id: String| {
        let pregunta = format!(
            "¿Eliminar la fracción {}?\nTambién se eliminarán sus metodologías base.",
            id
        );
        if !confirm(&pregunta) {
            return;
        }
        wasm_bindgen_futures::spawn_local(async move {
            match api::delete(&id).await {
                Ok(response) => {
                    log::info!("{}", response.message);
                    fetch();
                }
                Err(e) => alert_error(&e),
            }
        });
    };

    let on_saved = Callback::new(move |_: ()| {
        form.set(None);
        fetch();
    });
    let on_created = Callback::new(move |fraccion_id: String| {
        form.set(None);
        fetch();
        if confirm("Fracción creada. ¿Abrir el editor de metodologías?") {
            open_metodologias(fraccion_id);
        }
    });
    let on_cancel = Callback::new(move |_: ()| form.set(None));

    let visible = move || filter_list(&items.get(), &search.get());

    fetch();

    view! {
        <PageFrame page_key=tab_labels::key_fracciones() category=PageCategory::List>
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h1 class="page__title">{"Fracciones"}</h1>
                <Space>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| form.set(Some(FormState(None)))
                        disabled=Signal::derive(move || catalogos.get().is_none())
                    >
                        {icon("plus")}
                        " Nueva fracción"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                        {icon("refresh")}
                        " Actualizar"
                    </Button>
                </Space>
            </Flex>

            <div class="filter-panel">
                <select
                    class="form-select"
                    on:change=move |ev| {
                        grupo.set(event_target_value(&ev));
                        page.set(1);
                        fetch();
                    }
                >
                    <option value="">{"Todos los grupos"}</option>
                    {move || catalogos.get().map(|c| c.grupos_fracciones.into_iter().map(|g| view! {
                        <option value=g.clone()>{g.clone()}</option>
                    }).collect_view())}
                </select>
                <Input value=search placeholder="Buscar..." />
            </div>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell resizable=true min_width=110.0>"ID"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=220.0>"Nombre"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=200.0>"Nota técnica"</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>"Grupo"</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>"Niveles"</TableHeaderCell>
                        <TableHeaderCell min_width=130.0>"Acciones"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || visible().into_iter().map(|f| {
                        let id_for_delete = f.fraccion_id.clone();
                        let id_for_metodologias = f.fraccion_id.clone();
                        let for_edit = StoredValue::new(f.clone());
                        view! {
                            <TableRow>
                                <TableCell><TableCellLayout>{f.fraccion_id.clone()}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout truncate=true>{f.nombre_full.clone()}</TableCellLayout></TableCell>
                                <TableCell>
                                    <TableCellLayout truncate=true>{f.nota_tecnica.clone().unwrap_or_default()}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{f.grupo_fracciones.clone().unwrap_or_default()}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        <span class="nivel-badges" title=f.niveles_display.clone()>
                                            {niveles_badges(&f.niveles)}
                                        </span>
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| open_metodologias(id_for_metodologias.clone())
                                        >
                                            {icon("steps")}
                                        </Button>
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| form.set(Some(FormState(Some(for_edit.get_value()))))
                                        >
                                            {icon("edit")}
                                        </Button>
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| handle_delete(id_for_delete.clone())
                                        >
                                            {icon("delete")}
                                        </Button>
                                    </TableCellLayout>
                                </TableCell>
                            </TableRow>
                        }
                    }).collect_view()}
                </TableBody>
            </Table>

            <PaginationControls
                info=page_info
                on_page_change=Callback::new(move |p: u64| {
                    page.set(p);
                    fetch();
                })
            />

            {move || form.get().map(|FormState(fraccion)| {
                let title = match &fraccion {
                    Some(f) => format!("Editar {}", f.fraccion_id),
                    None => "Nueva fracción".to_string(),
                };
                let catalogos = catalogos.get_untracked().unwrap_or_else(|| FraccionCatalogos {
                    success: false,
                    grupos: vec![],
                    grupos_fracciones: vec![],
                });
                view! {
                    <Modal title=title on_close=on_cancel>
                        <FraccionDetails
                            fraccion=fraccion
                            catalogos=catalogos
                            on_saved=on_saved
                            on_created=on_created
                            on_cancel=on_cancel
                        />
                    </Modal>
                }
            })}
        </PageFrame>
    }
}
