use crate::domain::a002_elemento::api::{self, ElementoFiltro};
use crate::domain::a002_elemento::ui::details::{ElementoDetails, ElementoFormMode};
use crate::layout::tabs::tab_labels;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::dialogs::{alert_error, confirm};
use crate::shared::icons::icon;
use crate::shared::list_utils::{filter_list, Searchable};
use crate::shared::modal::Modal;
use crate::shared::page_frame::{PageCategory, PageFrame};
use contracts::domain::a002_elemento::aggregate::{
    ElementoCatalogos, ElementoListItem, ESTATUS_ACTIVO,
};
use contracts::shared::paging::PageInfo;
use leptos::prelude::*;
use thaw::*;

impl Searchable for ElementoListItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.elemento_id.as_str(),
            self.nombre.as_str(),
            self.descripcion.as_deref().unwrap_or_default(),
            self.subarea_nombre.as_str(),
            self.area_nombre.as_str(),
        ]
    }
}

fn formato_cantidad(cantidad: Option<f64>) -> String {
    match cantidad {
        Some(c) if c.fract() == 0.0 => format!("{}", c as i64),
        Some(c) => c.to_string(),
        None => "—".to_string(),
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ElementoList() -> impl IntoView {
    let items = RwSignal::new(Vec::<ElementoListItem>::new());
    let page_info = RwSignal::new(PageInfo::default());
    let catalogos = RwSignal::new(None::<ElementoCatalogos>);
    let error = RwSignal::new(None::<String>);
    let search = RwSignal::new(String::new());
    let area_id = RwSignal::new(String::new());
    let subarea_id = RwSignal::new(String::new());
    let page = RwSignal::new(1u64);
    let form_mode = RwSignal::new(None::<ElementoFormMode>);

    let fetch = move || {
        let filtro = ElementoFiltro {
            page: Some(page.get_untracked()),
            area_id: Some(area_id.get_untracked()).filter(|a| !a.is_empty()),
            subarea_id: Some(subarea_id.get_untracked()).filter(|s| !s.is_empty()),
        };
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_list(&filtro).await {
                Ok(response) => {
                    items.set(response.elementos);
                    page_info.set(response.pagination);
                    error.set(None);
                }
                Err(e) => error.set(Some(e)),
            }
        });
    };

    let fetch_catalogos = move || {
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_catalogos().await {
                Ok(c) => catalogos.set(Some(c)),
                Err(e) => error.set(Some(e)),
            }
        });
    };

    let apply_filters = move || {
        page.set(1);
        fetch();
    };

    let handle_delete = move |id: String| {
        if !confirm(&format!("¿Eliminar el elemento {}?", id)) {
            return;
        }
        wasm_bindgen_futures::spawn_local(async move {
            match api::delete(&id).await {
                Ok(_) => fetch(),
                Err(e) => alert_error(&e),
            }
        });
    };

    let on_saved = Callback::new(move |_: ()| {
        form_mode.set(None);
        fetch();
        // descripciones_por_grupo cambia con cada alta
        fetch_catalogos();
    });
    let on_cancel = Callback::new(move |_: ()| form_mode.set(None));

    let visible = move || filter_list(&items.get(), &search.get());

    let subareas_filtradas = move || {
        let area = area_id.get();
        catalogos
            .get()
            .map(|c| {
                c.subareas
                    .into_iter()
                    .filter(|s| area.is_empty() || s.area_id == area)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default()
    };

    fetch_catalogos();
    fetch();

    view! {
        <PageFrame page_key=tab_labels::key_elementos() category=PageCategory::List>
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h1 class="page__title">{"Elementos"}</h1>
                <Space>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| form_mode.set(Some(ElementoFormMode::Nuevo))
                        disabled=Signal::derive(move || catalogos.get().is_none())
                    >
                        {icon("plus")}
                        " Nuevo elemento"
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
                        area_id.set(event_target_value(&ev));
                        subarea_id.set(String::new());
                        apply_filters();
                    }
                    prop:value=move || area_id.get()
                >
                    <option value="">{"Todas las áreas"}</option>
                    {move || catalogos.get().map(|c| c.areas.into_iter().map(|a| {
                        let selected_id = a.area_id.clone();
                        view! {
                            <option value=a.area_id.clone() selected=move || area_id.get() == selected_id>
                                {a.nombre}
                            </option>
                        }
                    }).collect_view())}
                </select>
                <select
                    class="form-select"
                    on:change=move |ev| {
                        subarea_id.set(event_target_value(&ev));
                        apply_filters();
                    }
                    prop:value=move || subarea_id.get()
                >
                    <option value="">{"Todas las subáreas"}</option>
                    {move || subareas_filtradas().into_iter().map(|s| {
                        let selected_id = s.subarea_id.clone();
                        view! {
                            <option value=s.subarea_id.clone() selected=move || subarea_id.get() == selected_id>
                                {format!("{} ({})", s.nombre, s.area_nombre)}
                            </option>
                        }
                    }).collect_view()}
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
                        <TableHeaderCell resizable=true min_width=120.0>"ID"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=140.0>"Nombre"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=200.0>"Descripción"</TableHeaderCell>
                        <TableHeaderCell min_width=80.0>"Cantidad"</TableHeaderCell>
                        <TableHeaderCell min_width=90.0>"Estatus"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=160.0>"Subárea"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=140.0>"Área"</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>"Acciones"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || visible().into_iter().map(|el| {
                        let activo = el.estatus.as_deref() == Some(ESTATUS_ACTIVO);
                        let id_for_delete = el.elemento_id.clone();
                        let for_edit = StoredValue::new(el.clone());
                        view! {
                            <TableRow>
                                <TableCell><TableCellLayout>{el.elemento_id.clone()}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{el.nombre.clone()}</TableCellLayout></TableCell>
                                <TableCell>
                                    <TableCellLayout truncate=true>{el.descripcion.clone().unwrap_or_default()}</TableCellLayout>
                                </TableCell>
                                <TableCell><TableCellLayout>{formato_cantidad(el.cantidad)}</TableCellLayout></TableCell>
                                <TableCell>
                                    <Badge
                                        appearance=BadgeAppearance::Tint
                                        color=if activo { BadgeColor::Success } else { BadgeColor::Danger }
                                    >
                                        {el.estatus.clone().unwrap_or_default()}
                                    </Badge>
                                </TableCell>
                                <TableCell><TableCellLayout truncate=true>{el.subarea_nombre.clone()}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout truncate=true>{el.area_nombre.clone()}</TableCellLayout></TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| form_mode.set(Some(ElementoFormMode::Editar(for_edit.get_value())))
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

            {move || form_mode.get().map(|mode| {
                let title = match &mode {
                    ElementoFormMode::Nuevo => "Nuevo elemento".to_string(),
                    ElementoFormMode::Editar(el) => format!("Editar {}", el.elemento_id),
                };
                let catalogos = catalogos.get_untracked().unwrap_or_else(|| ElementoCatalogos {
                    success: false,
                    areas: vec![],
                    subareas: vec![],
                    grupos: vec![],
                    descripciones_por_grupo: Default::default(),
                });
                view! {
                    <Modal title=title on_close=on_cancel>
                        <ElementoDetails
                            mode=mode
                            catalogos=catalogos
                            on_saved=on_saved
                            on_cancel=on_cancel
                        />
                    </Modal>
                }
            })}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cantidad_formats_whole_numbers_without_decimals() {
        assert_eq!(formato_cantidad(Some(4.0)), "4");
        assert_eq!(formato_cantidad(Some(2.5)), "2.5");
        assert_eq!(formato_cantidad(None), "—");
    }
}
