use crate::domain::a008_kit_evento::api::{self, KitEventoFiltro};
use crate::domain::a008_kit_evento::ui::details::KitEventoDetails;
use crate::layout::tabs::tab_labels::KEY_KITS_EVENTOS;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::dialogs::{alert_error, confirm};
use crate::shared::icons::icon;
use crate::shared::list_utils::{filter_list, Searchable};
use crate::shared::modal::Modal;
use crate::shared::page_frame::{PageCategory, PageFrame};
use contracts::domain::a007_evento::aggregate::{CasoCatalogo, EventoCatalogo};
use contracts::domain::a008_kit_evento::aggregate::KitEventoListItem;
use contracts::shared::paging::PageInfo;
use leptos::prelude::*;
use thaw::*;

impl Searchable for KitEventoListItem {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.kit_id.as_str(),
            self.nombre.as_str(),
            self.caso_nombre.as_str(),
            self.evento_nombre.as_str(),
        ];
        fields.extend(self.herramientas.iter().map(|h| h.nombre.as_str()));
        fields
    }
}

#[derive(Debug, Clone, PartialEq)]
struct FormState(Option<KitEventoListItem>);

#[component]
#[allow(non_snake_case)]
pub fn KitEventoList() -> impl IntoView {
    let items = RwSignal::new(Vec::<KitEventoListItem>::new());
    let page_info = RwSignal::new(PageInfo::default());
    let eventos = RwSignal::new(Vec::<EventoCatalogo>::new());
    let casos = RwSignal::new(Vec::<CasoCatalogo>::new());
    let error = RwSignal::new(None::<String>);
    let search = RwSignal::new(String::new());
    let evento_tipo = RwSignal::new(String::new());
    let caso = RwSignal::new(String::new());
    let page = RwSignal::new(1u64);
    let form = RwSignal::new(None::<FormState>);

    let fetch = move || {
        let filtro = KitEventoFiltro {
            page: Some(page.get_untracked()),
            evento_tipo: Some(evento_tipo.get_untracked()).filter(|e| !e.is_empty()),
            caso: Some(caso.get_untracked()).filter(|c| !c.is_empty()),
        };
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_list(&filtro).await {
                Ok(response) => {
                    items.set(response.kits);
                    page_info.set(response.pagination);
                    error.set(None);
                }
                Err(e) => error.set(Some(e)),
            }
        });
    };

    let fetch_casos = move || {
        let evento = evento_tipo.get_untracked();
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_casos(&evento).await {
                Ok(response) => casos.set(response.casos),
                Err(e) => error.set(Some(e)),
            }
        });
    };

    wasm_bindgen_futures::spawn_local(async move {
        match api::fetch_eventos().await {
            Ok(response) => eventos.set(response.eventos),
            Err(e) => error.set(Some(e)),
        }
    });

    let handle_delete = move |id: String| {
        if !confirm(&format!("¿Eliminar el kit de evento {}?", id)) {
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

    fetch_casos();
    fetch();

    view! {
        <PageFrame page_key=KEY_KITS_EVENTOS category=PageCategory::List>
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h1 class="page__title">{"Kits de evento"}</h1>
                <Space>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| form.set(Some(FormState(None)))
                    >
                        {icon("plus")}
                        " Nuevo kit de evento"
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
                        evento_tipo.set(event_target_value(&ev));
                        caso.set(String::new());
                        page.set(1);
                        fetch_casos();
                        fetch();
                    }
                >
                    <option value="">{"Todos los eventos"}</option>
                    {move || eventos.get().into_iter().map(|e| view! {
                        <option value=e.evento_tipo_id.clone()>{e.nombre.clone()}</option>
                    }).collect_view()}
                </select>
                <select
                    class="form-select"
                    on:change=move |ev| {
                        caso.set(event_target_value(&ev));
                        page.set(1);
                        fetch();
                    }
                    prop:value=move || caso.get()
                >
                    <option value="">{"Todos los casos"}</option>
                    {move || casos.get().into_iter().map(|c| view! {
                        <option value=c.caso_id.clone()>{c.nombre.clone()}</option>
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
                        <TableHeaderCell resizable=true min_width=130.0>"ID"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=180.0>"Nombre"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=140.0>"Evento"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=160.0>"Caso"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=220.0>"Herramientas"</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>"Acciones"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || visible().into_iter().map(|k| {
                        let id_for_delete = k.kit_id.clone();
                        let for_edit = StoredValue::new(k.clone());
                        let herramientas = k.herramientas.iter()
                            .map(|h| h.nombre.clone())
                            .collect::<Vec<_>>()
                            .join(", ");
                        view! {
                            <TableRow>
                                <TableCell><TableCellLayout>{k.kit_id.clone()}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout truncate=true>{k.nombre.clone()}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout truncate=true>{k.evento_nombre.clone()}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout truncate=true>{k.caso_nombre.clone()}</TableCellLayout></TableCell>
                                <TableCell>
                                    <TableCellLayout truncate=true>
                                        {format!("({}) {}", k.cantidad_herramientas, herramientas)}
                                    </TableCellLayout>
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

            {move || form.get().map(|FormState(kit)| {
                let title = match &kit {
                    Some(k) => format!("Editar {}", k.kit_id),
                    None => "Nuevo kit de evento".to_string(),
                };
                view! {
                    <Modal title=title on_close=on_cancel>
                        <KitEventoDetails
                            kit=kit
                            eventos=eventos.get_untracked()
                            on_saved=on_saved
                            on_cancel=on_cancel
                        />
                    </Modal>
                }
            })}
        </PageFrame>
    }
}
