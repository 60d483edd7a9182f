use crate::domain::a009_fraccion_evento::api::{self, FraccionEventoFiltro};
use crate::domain::a009_fraccion_evento::ui::details::FraccionEventoDetails;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{tab_label_for_key, tab_labels};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::dialogs::{alert_error, confirm};
use crate::shared::icons::icon;
use crate::shared::list_utils::{filter_list, Searchable};
use crate::shared::modal::Modal;
use crate::shared::page_frame::{PageCategory, PageFrame};
use contracts::domain::a007_evento::aggregate::EventoCatalogo;
use contracts::domain::a009_fraccion_evento::aggregate::{
    metodologia_id_para, FraccionEventoListItem,
};
use contracts::shared::paging::PageInfo;
use leptos::prelude::*;
use thaw::*;

impl Searchable for FraccionEventoListItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.fraccion_evento_id.as_str(),
            self.nombre.as_str(),
            self.descripcion.as_deref().unwrap_or_default(),
            self.evento_nombre.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
struct FormState(Option<FraccionEventoListItem>);

#[component]
#[allow(non_snake_case)]
pub fn FraccionEventoList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    let items = RwSignal::new(Vec::<FraccionEventoListItem>::new());
    let page_info = RwSignal::new(PageInfo::default());
    let eventos = RwSignal::new(Vec::<EventoCatalogo>::new());
    let error = RwSignal::new(None::<String>);
    let search = RwSignal::new(String::new());
    let evento_tipo = RwSignal::new(String::new());
    let page = RwSignal::new(1u64);
    let form = RwSignal::new(None::<FormState>);

    let fetch = move || {
        let filtro = FraccionEventoFiltro {
            page: Some(page.get_untracked()),
            evento_tipo: Some(evento_tipo.get_untracked()).filter(|e| !e.is_empty()),
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
        match api::fetch_eventos().await {
            Ok(response) => eventos.set(response.eventos),
            Err(e) => error.set(Some(e)),
        }
    });

    let open_metodologia = move |metodologia_id: String| {
        let key = tab_labels::key_metodologia_evento(&metodologia_id);
        ctx.open_tab(&key, &tab_label_for_key(&key));
    };

    let handle_delete = move |id: String| {
        let pregunta = format!(
            "¿Eliminar la fracción de evento {}?\nTambién se eliminará su metodología.",
            id
        );
        if !confirm(&pregunta) {
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
    let on_created = Callback::new(move |metodologia_id: String| {
        form.set(None);
        fetch();
        if confirm("Fracción creada. ¿Agregar los pasos de la metodología ahora?") {
            open_metodologia(metodologia_id);
        }
    });
    let on_cancel = Callback::new(move |_: ()| form.set(None));

    let visible = move || filter_list(&items.get(), &search.get());

    fetch();

    view! {
        <PageFrame page_key=tab_labels::key_fracciones_eventos() category=PageCategory::List>
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h1 class="page__title">{"Fracciones de evento"}</h1>
                <Space>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| form.set(Some(FormState(None)))
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
                        evento_tipo.set(event_target_value(&ev));
                        page.set(1);
                        fetch();
                    }
                >
                    <option value="">{"Todos los eventos"}</option>
                    {move || eventos.get().into_iter().map(|e| view! {
                        <option value=e.evento_tipo_id.clone()>{e.nombre.clone()}</option>
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
                        <TableHeaderCell resizable=true min_width=140.0>"Evento"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=200.0>"Nombre"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=200.0>"Descripción"</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>"Metodología"</TableHeaderCell>
                        <TableHeaderCell min_width=130.0>"Acciones"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || visible().into_iter().map(|f| {
                        let id_for_delete = f.fraccion_evento_id.clone();
                        let metodologia_id = f
                            .metodologia_id
                            .clone()
                            .unwrap_or_else(|| metodologia_id_para(&f.fraccion_evento_id));
                        let for_edit = StoredValue::new(f.clone());
                        view! {
                            <TableRow>
                                <TableCell><TableCellLayout>{f.fraccion_evento_id.clone()}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout truncate=true>{f.evento_nombre.clone()}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout truncate=true>{f.nombre.clone()}</TableCellLayout></TableCell>
                                <TableCell>
                                    <TableCellLayout truncate=true>{f.descripcion.clone().unwrap_or_default()}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    {if f.tiene_metodologia && f.cantidad_pasos > 0 {
                                        view! {
                                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>
                                                {format!("{} pasos", f.cantidad_pasos)}
                                            </Badge>
                                        }.into_any()
                                    } else {
                                        view! {
                                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Warning>
                                                "Sin pasos"
                                            </Badge>
                                        }.into_any()
                                    }}
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| open_metodologia(metodologia_id.clone())
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
                    Some(f) => format!("Editar {}", f.fraccion_evento_id),
                    None => "Nueva fracción de evento".to_string(),
                };
                view! {
                    <Modal title=title on_close=on_cancel>
                        <FraccionEventoDetails
                            fraccion=fraccion
                            eventos=eventos.get_untracked()
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
