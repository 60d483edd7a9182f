use crate::domain::a006_kit::api::{self, KitFiltro};
use crate::domain::a006_kit::ui::details::KitDetails;
use crate::layout::tabs::tab_labels;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::dialogs::{alert_error, confirm};
use crate::shared::icons::icon;
use crate::shared::list_utils::{filter_list, Searchable};
use crate::shared::modal::Modal;
use crate::shared::page_frame::{PageCategory, PageFrame};
use contracts::domain::a004_fraccion::aggregate::FraccionOption;
use contracts::domain::a006_kit::aggregate::{KitListItem, TipoKit, NIVEL_GENERAL};
use contracts::domain::common::NivelLimpieza;
use contracts::shared::paging::PageInfo;
use leptos::prelude::*;
use thaw::*;

impl Searchable for KitListItem {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.kit_id.as_str(),
            self.nombre.as_str(),
            self.fraccion_id.as_deref().unwrap_or_default(),
        ];
        fields.extend(self.herramientas.iter().map(|h| h.nombre.as_str()));
        fields
    }
}

/// Подпись уровня кита; `None` означает общий кит
pub fn nivel_label(nivel: Option<i32>) -> String {
    match nivel {
        None => "General".to_string(),
        Some(n) => NivelLimpieza::from_id(n)
            .map(|nv| nv.etiqueta().to_string())
            .unwrap_or_else(|| n.to_string()),
    }
}

/// Коды фракций для фильтра: `(codigo, nombre base)` без повторов
fn codigos_de(fracciones: &[FraccionOption]) -> Vec<(String, String)> {
    let mut codigos: Vec<(String, String)> = Vec::new();
    for f in fracciones {
        if !codigos.iter().any(|(c, _)| *c == f.codigo) {
            codigos.push((f.codigo.clone(), f.nombre.clone()));
        }
    }
    codigos
}

#[derive(Debug, Clone, PartialEq)]
struct FormState(Option<KitListItem>);

#[component]
#[allow(non_snake_case)]
pub fn KitList() -> impl IntoView {
    let items = RwSignal::new(Vec::<KitListItem>::new());
    let page_info = RwSignal::new(PageInfo::default());
    let fracciones = RwSignal::new(Vec::<FraccionOption>::new());
    let error = RwSignal::new(None::<String>);
    let search = RwSignal::new(String::new());
    let fraccion = RwSignal::new(String::new());
    let nivel = RwSignal::new(String::new());
    let page = RwSignal::new(1u64);
    let form = RwSignal::new(None::<FormState>);

    let fetch = move || {
        let filtro = KitFiltro {
            page: Some(page.get_untracked()),
            fraccion: Some(fraccion.get_untracked()).filter(|f| !f.is_empty()),
            nivel: Some(nivel.get_untracked()).filter(|n| !n.is_empty()),
            tipo_kit: Some(TipoKit::Sop.as_str().to_string()),
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

    wasm_bindgen_futures::spawn_local(async move {
        match api::fetch_fracciones().await {
            Ok(response) => fracciones.set(response.fracciones),
            Err(e) => error.set(Some(e)),
        }
    });

    let handle_delete = move |id: String| {
        if !confirm(&format!("¿Eliminar el kit {}?", id)) {
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

    let apply_filters = move || {
        page.set(1);
        fetch();
    };

    let visible = move || filter_list(&items.get(), &search.get());

    fetch();

    view! {
        <PageFrame page_key=tab_labels::key_kits() category=PageCategory::List>
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h1 class="page__title">{"Kits"}</h1>
                <Space>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| form.set(Some(FormState(None)))
                    >
                        {icon("plus")}
                        " Nuevo kit"
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
                        fraccion.set(event_target_value(&ev));
                        apply_filters();
                    }
                >
                    <option value="">{"Todas las fracciones"}</option>
                    {move || fracciones.with(|fs| codigos_de(fs)).into_iter().map(|(codigo, nombre)| view! {
                        <option value=codigo.clone()>{format!("{} - {}", codigo, nombre)}</option>
                    }).collect_view()}
                </select>
                <select
                    class="form-select"
                    on:change=move |ev| {
                        nivel.set(event_target_value(&ev));
                        apply_filters();
                    }
                >
                    <option value="">{"Todos los niveles"}</option>
                    <option value=NIVEL_GENERAL>{"General"}</option>
                    {NivelLimpieza::ALL.into_iter().map(|n| view! {
                        <option value=n.id().to_string()>{n.etiqueta()}</option>
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
                        <TableHeaderCell resizable=true min_width=110.0>"ID"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=180.0>"Nombre"</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>"Fracción"</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>"Nivel"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=240.0>"Herramientas"</TableHeaderCell>
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
                                <TableCell>
                                    <TableCellLayout>{k.fraccion_id.clone().unwrap_or_default()}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                                        {nivel_label(k.nivel_limpieza_id)}
                                    </Badge>
                                </TableCell>
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
                    None => "Nuevo kit".to_string(),
                };
                view! {
                    <Modal title=title on_close=on_cancel>
                        <KitDetails
                            kit=kit
                            fracciones=fracciones.get_untracked()
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
    fn nivel_label_names_general_and_levels() {
        assert_eq!(nivel_label(None), "General");
        assert_eq!(nivel_label(Some(2)), "Media");
        assert_eq!(nivel_label(Some(9)), "9");
    }

    #[test]
    fn filter_options_are_distinct_codigos() {
        let opcion = |id: &str, codigo: &str, nombre: &str| FraccionOption {
            fraccion_id: id.into(),
            codigo: codigo.into(),
            nombre: nombre.into(),
            nombre_custom: None,
            nombre_full: nombre.into(),
        };
        let fracciones = vec![
            opcion("FR-TL-001", "TL", "Tallar Bano"),
            opcion("FR-TL-002", "TL", "Tallar Bano"),
            opcion("FR-BA-001", "BA", "Barrer"),
        ];
        assert_eq!(
            codigos_de(&fracciones),
            vec![
                ("TL".to_string(), "Tallar Bano".to_string()),
                ("BA".to_string(), "Barrer".to_string()),
            ]
        );
    }
}
