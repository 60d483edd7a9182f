use crate::domain::a003_herramienta::api::{self, HerramientaFiltro};
use crate::domain::a003_herramienta::ui::details::HerramientaDetails;
use crate::layout::tabs::tab_labels;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::dialogs::{alert_error, confirm};
use crate::shared::icons::icon;
use crate::shared::list_utils::{filter_list, Searchable};
use crate::shared::modal::Modal;
use crate::shared::page_frame::{PageCategory, PageFrame};
use contracts::domain::a003_herramienta::aggregate::{
    Herramienta, ESTATUS_ACTIVO, ESTATUS_INACTIVO,
};
use contracts::shared::api::GlosarioItem;
use contracts::shared::paging::PageInfo;
use leptos::prelude::*;
use thaw::*;

impl Searchable for Herramienta {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.herramienta_id.as_str(),
            self.nombre.as_str(),
            self.descripcion.as_deref().unwrap_or_default(),
        ]
    }
}

/// Открытая форма: `None` внутри - создание
#[derive(Debug, Clone, PartialEq)]
struct FormState(Option<Herramienta>);

#[component]
#[allow(non_snake_case)]
pub fn HerramientaList() -> impl IntoView {
    let items = RwSignal::new(Vec::<Herramienta>::new());
    let page_info = RwSignal::new(PageInfo::default());
    let grupos = RwSignal::new(Vec::<GlosarioItem>::new());
    let error = RwSignal::new(None::<String>);
    let search = RwSignal::new(String::new());
    let grupo = RwSignal::new(String::new());
    let estatus = RwSignal::new(String::new());
    let page = RwSignal::new(1u64);
    let form = RwSignal::new(None::<FormState>);

    let fetch = move || {
        let filtro = HerramientaFiltro {
            page: Some(page.get_untracked()),
            grupo: Some(grupo.get_untracked()).filter(|g| !g.is_empty()),
            estatus: Some(estatus.get_untracked()).filter(|e| !e.is_empty()),
        };
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_list(&filtro).await {
                Ok(response) => {
                    items.set(response.herramientas);
                    page_info.set(response.pagination);
                    error.set(None);
                }
                Err(e) => error.set(Some(e)),
            }
        });
    };

    wasm_bindgen_futures::spawn_local(async move {
        match api::fetch_catalogos().await {
            Ok(c) => grupos.set(c.grupos),
            Err(e) => error.set(Some(e)),
        }
    });

    let handle_delete = move |id: String| {
        if !confirm(&format!("¿Eliminar la herramienta {}?", id)) {
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
        form.set(None);
        fetch();
    });
    let on_cancel = Callback::new(move |_: ()| form.set(None));

    let visible = move || filter_list(&items.get(), &search.get());

    fetch();

    view! {
        <PageFrame page_key=tab_labels::key_herramientas() category=PageCategory::List>
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h1 class="page__title">{"Herramientas"}</h1>
                <Space>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| form.set(Some(FormState(None)))
                    >
                        {icon("plus")}
                        " Nueva herramienta"
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
                    {move || grupos.get().into_iter().map(|g| view! {
                        <option value=g.codigo.clone()>{format!("{} - {}", g.codigo, g.nombre)}</option>
                    }).collect_view()}
                </select>
                <select
                    class="form-select"
                    on:change=move |ev| {
                        estatus.set(event_target_value(&ev));
                        page.set(1);
                        fetch();
                    }
                >
                    <option value="">{"Todos"}</option>
                    <option value=ESTATUS_ACTIVO>{ESTATUS_ACTIVO}</option>
                    <option value=ESTATUS_INACTIVO>{ESTATUS_INACTIVO}</option>
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
                        <TableHeaderCell min_width=70.0>"Grupo"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=160.0>"Nombre"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=220.0>"Descripción"</TableHeaderCell>
                        <TableHeaderCell min_width=90.0>"Estatus"</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>"Acciones"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || visible().into_iter().map(|h| {
                        let activa = h.is_activa();
                        let id_for_delete = h.herramienta_id.clone();
                        let for_edit = StoredValue::new(h.clone());
                        view! {
                            <TableRow>
                                <TableCell><TableCellLayout>{h.herramienta_id.clone()}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{h.grupo.clone()}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout truncate=true>{h.nombre.clone()}</TableCellLayout></TableCell>
                                <TableCell>
                                    <TableCellLayout truncate=true>{h.descripcion.clone().unwrap_or_default()}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <Badge
                                        appearance=BadgeAppearance::Tint
                                        color=if activa { BadgeColor::Success } else { BadgeColor::Danger }
                                    >
                                        {h.estatus.clone().unwrap_or_default()}
                                    </Badge>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
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

            {move || form.get().map(|FormState(herramienta)| {
                let title = match &herramienta {
                    Some(h) => format!("Editar {}", h.herramienta_id),
                    None => "Nueva herramienta".to_string(),
                };
                view! {
                    <Modal title=title on_close=on_cancel>
                        <HerramientaDetails
                            herramienta=herramienta
                            grupos=grupos.get_untracked()
                            on_saved=on_saved
                            on_cancel=on_cancel
                        />
                    </Modal>
                }
            })}
        </PageFrame>
    }
}
