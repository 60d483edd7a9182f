use super::repository::{self, ElementoFilter};
use crate::domain::a001_area::repository as area_repository;
use crate::domain::a001_area::service as area_service;
use crate::shared::api_error::{ApiError, ApiResult};
use crate::shared::data::references;
use contracts::domain::a002_elemento::aggregate::{
    codigo_elemento, grupos_ordenados, next_elemento_id, prefijo_id, Elemento,
    ElementoCatalogos, ElementoCreateDto, ElementoListItem, ElementoListResponse,
    ElementoUpdateDto, ESTATUS_ACTIVO, PER_PAGE_DEFAULT,
};
use contracts::shared::paging::{PageInfo, PageRequest};
use sea_orm::ConnectionTrait;
use std::collections::{BTreeMap, HashMap};

/// Фильтры списка элементов
#[derive(Debug, Clone, Default)]
pub struct ElementoListParams {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub area_id: Option<String>,
    pub subarea_id: Option<String>,
}

/// Данные для выпадающих списков формы
pub async fn catalogos<C: ConnectionTrait>(db: &C) -> ApiResult<ElementoCatalogos> {
    let mut descripciones_por_grupo: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (nombre, descripcion) in repository::distinct_descripciones(db).await? {
        let entry = descripciones_por_grupo.entry(nombre).or_default();
        if let Some(d) = descripcion.filter(|d| !d.is_empty()) {
            entry.push(d);
        }
    }

    Ok(ElementoCatalogos {
        success: true,
        areas: area_service::area_options(db).await?,
        subareas: area_service::subarea_options(db).await?,
        grupos: grupos_ordenados(),
        descripciones_por_grupo,
    })
}

/// Список элементов с названиями подзоны и зоны
pub async fn list<C: ConnectionTrait>(db: &C, params: ElementoListParams) -> ApiResult<ElementoListResponse> {
    let page = PageRequest::new(params.page, params.per_page, PER_PAGE_DEFAULT);
    let subarea_id = params.subarea_id.filter(|s| !s.is_empty());
    let area_id = params.area_id.filter(|s| !s.is_empty());

    let filter = match (subarea_id, area_id) {
        (Some(subarea_id), _) => ElementoFilter::SubAreas(vec![subarea_id]),
        (None, Some(area_id)) => {
            ElementoFilter::SubAreas(area_repository::subarea_ids_of_area(db, &area_id).await?)
        }
        (None, None) => ElementoFilter::Todos,
    };

    let (items, total) =
        repository::list_paginated(db, &filter, page.per_page, page.offset()).await?;

    let subareas: HashMap<String, _> = area_repository::list_subareas(db)
        .await?
        .into_iter()
        .map(|s| (s.subarea_id.clone(), s))
        .collect();
    let areas: HashMap<String, String> = area_repository::list_areas(db)
        .await?
        .into_iter()
        .map(|a| (a.area_id, a.area_nombre))
        .collect();

    let elementos = items
        .into_iter()
        .map(|e| {
            let subarea = subareas.get(&e.subarea_id);
            let area_id = subarea.map(|s| s.area_id.clone()).unwrap_or_default();
            ElementoListItem {
                subarea_nombre: subarea.map(|s| s.subarea_nombre.clone()).unwrap_or_default(),
                area_nombre: areas.get(&area_id).cloned().unwrap_or_default(),
                area_id,
                elemento_id: e.elemento_id,
                nombre: e.nombre,
                descripcion: e.descripcion,
                cantidad: e.cantidad,
                estatus: e.estatus,
                subarea_id: e.subarea_id,
            }
        })
        .collect();

    Ok(ElementoListResponse {
        success: true,
        elementos,
        pagination: PageInfo::new(page, total),
    })
}

async fn generar_id<C: ConnectionTrait>(db: &C, nombre: &str, descripcion: &str) -> ApiResult<String> {
    let codigo = codigo_elemento(nombre, descripcion);
    let existentes = repository::ids_with_prefix(db, &prefijo_id(&codigo)).await?;
    Ok(next_elemento_id(&codigo, existentes.iter().map(String::as_str)))
}

/// Предпросмотр следующего id
pub async fn next_id<C: ConnectionTrait>(
    db: &C,
    nombre: Option<&str>,
    descripcion: Option<&str>,
) -> ApiResult<String> {
    let nombre = nombre.map(str::trim).filter(|s| !s.is_empty());
    let descripcion = descripcion.map(str::trim).filter(|s| !s.is_empty());
    match (nombre, descripcion) {
        (Some(nombre), Some(descripcion)) => {
            generar_id(db, &nombre.to_uppercase(), descripcion).await
        }
        _ => Err(ApiError::bad_request("Faltan parametros: nombre y descripcion")),
    }
}

/// Создание нового элемента
pub async fn create<C: ConnectionTrait>(db: &C, dto: ElementoCreateDto) -> ApiResult<Elemento> {
    let cantidad = dto.validate()?;

    if area_repository::find_subarea(db, dto.subarea_id.trim()).await?.is_none() {
        return Err(ApiError::not_found("SubArea no encontrada"));
    }

    let nombre = dto.nombre.trim().to_uppercase();
    let descripcion = dto.descripcion.trim().to_string();
    let elemento = Elemento {
        elemento_id: generar_id(db, &nombre, &descripcion).await?,
        subarea_id: dto.subarea_id.trim().to_string(),
        nombre,
        descripcion: Some(descripcion),
        cantidad: Some(cantidad),
        estatus: Some(ESTATUS_ACTIVO.to_string()),
    };
    repository::insert(db, &elemento).await?;

    tracing::info!("Elemento {} created", elemento.elemento_id);
    Ok(elemento)
}

/// Изменение cantidad/estatus
pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: &str,
    body: &serde_json::Map<String, serde_json::Value>,
) -> ApiResult<Elemento> {
    let mut elemento = repository::get_by_id(db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Elemento no encontrado"))?;

    let dto = ElementoUpdateDto::from_json(body)?;
    if let Some(cantidad) = dto.cantidad {
        elemento.cantidad = Some(cantidad);
    }
    if let Some(estatus) = dto.estatus {
        elemento.estatus = Some(estatus);
    }
    repository::update_editable(db, &elemento).await?;

    tracing::info!("Elemento {} updated", id);
    Ok(elemento)
}

/// Удаление, если элемент не входит ни в один набор
pub async fn delete<C: ConnectionTrait>(db: &C, id: &str) -> ApiResult<()> {
    if repository::get_by_id(db, id).await?.is_none() {
        return Err(ApiError::not_found("Elemento no encontrado"));
    }
    if references::elemento_detalles(db, id).await? > 0 {
        return Err(ApiError::bad_request(
            "No se puede eliminar el elemento porque esta en uso en ElementoDetalle",
        ));
    }
    repository::delete(db, id).await?;

    tracing::info!("Elemento {} deleted", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support::temp_db;
    use serde_json::json;

    fn dto(subarea: &str, nombre: &str, descripcion: &str, cantidad: f64) -> ElementoCreateDto {
        ElementoCreateDto {
            subarea_id: subarea.into(),
            nombre: nombre.into(),
            descripcion: descripcion.into(),
            cantidad: Some(cantidad),
        }
    }

    #[tokio::test]
    async fn create_generates_sequential_ids_per_code() {
        let (_dir, conn) = temp_db().await;
        area_service::insert_test_data(&conn).await.unwrap();

        let a = create(&conn, dto("AD-DI-OF-01", "mesa", "Mesa de juntas", 1.0)).await.unwrap();
        let b = create(&conn, dto("AD-DI-OF-01", "MESA", "Mesa lateral", 2.0)).await.unwrap();
        let c = create(&conn, dto("AD-DI-OF-02", "BORDE", "Borde de puerta", 1.0)).await.unwrap();

        assert_eq!(a.elemento_id, "EL-ME-001");
        assert_eq!(a.nombre, "MESA");
        assert_eq!(a.estatus.as_deref(), Some("ACTIVO"));
        assert_eq!(b.elemento_id, "EL-ME-002");
        assert_eq!(c.elemento_id, "EL-BP-001");

        let preview = next_id(&conn, Some("MESA"), Some("x")).await.unwrap();
        assert_eq!(preview, "EL-ME-003");
    }

    #[tokio::test]
    async fn create_rejects_unknown_subarea() {
        let (_dir, conn) = temp_db().await;
        let err = create(&conn, dto("NOPE", "MESA", "Mesa", 1.0)).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "SubArea no encontrada"));
    }

    #[tokio::test]
    async fn list_filters_by_area_and_pages() {
        let (_dir, conn) = temp_db().await;
        area_service::insert_test_data(&conn).await.unwrap();
        for i in 0..3 {
            create(&conn, dto("AD-DI-OF-01", "SILLA", &format!("Silla {}", i), 1.0))
                .await
                .unwrap();
        }
        create(&conn, dto("AD-RH-OF-01", "SILLA", "Silla RH", 1.0)).await.unwrap();

        let all = list(&conn, ElementoListParams::default()).await.unwrap();
        assert_eq!(all.pagination.total, 4);

        let area = list(
            &conn,
            ElementoListParams {
                area_id: Some("AD-DI".into()),
                per_page: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(area.pagination.total, 3);
        assert_eq!(area.pagination.pages, 2);
        assert!(area.pagination.has_next);
        assert_eq!(area.elementos.len(), 2);
        assert_eq!(area.elementos[0].area_nombre, "Direccion");
        assert_eq!(area.elementos[0].subarea_nombre, "Oficina 01");

        let sub = list(
            &conn,
            ElementoListParams {
                area_id: Some("AD-DI".into()),
                subarea_id: Some("AD-RH-OF-01".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(sub.pagination.total, 1);
    }

    #[tokio::test]
    async fn list_with_huge_page_returns_empty_page() {
        let (_dir, conn) = temp_db().await;
        area_service::insert_test_data(&conn).await.unwrap();
        create(&conn, dto("AD-DI-OF-01", "MESA", "Mesa", 1.0)).await.unwrap();

        let response = list(
            &conn,
            ElementoListParams {
                page: Some(u64::MAX),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(response.elementos.is_empty());
        assert_eq!(response.pagination.total, 1);
        assert!(!response.pagination.has_next);
    }

    #[tokio::test]
    async fn update_only_touches_editable_fields() {
        let (_dir, conn) = temp_db().await;
        area_service::insert_test_data(&conn).await.unwrap();
        let e = create(&conn, dto("AD-DI-OF-01", "LUZ", "Lampara techo", 4.0)).await.unwrap();

        let body = json!({"estatus": "inactivo", "cantidad": 2});
        let updated = update(&conn, &e.elemento_id, body.as_object().unwrap()).await.unwrap();
        assert_eq!(updated.estatus.as_deref(), Some("INACTIVO"));
        assert_eq!(updated.cantidad, Some(2.0));

        let body = json!({"nombre": "X"});
        let err = update(&conn, &e.elemento_id, body.as_object().unwrap()).await.unwrap_err();
        assert_eq!(err.to_string(), "Campo no editable: nombre");
    }

    #[tokio::test]
    async fn delete_refuses_referenced_elemento() {
        let (_dir, conn) = temp_db().await;
        area_service::insert_test_data(&conn).await.unwrap();
        let e = create(&conn, dto("AD-DI-OF-01", "CESTO", "Cesto basura", 1.0)).await.unwrap();

        conn.execute_unprepared(&format!(
            "INSERT INTO elemento_detalle (elemento_set_id, elemento_id) VALUES ('ES-1', '{}')",
            e.elemento_id
        ))
        .await
        .unwrap();
        assert!(delete(&conn, &e.elemento_id).await.is_err());

        conn.execute_unprepared("DELETE FROM elemento_detalle").await.unwrap();
        delete(&conn, &e.elemento_id).await.unwrap();
        assert!(matches!(
            delete(&conn, &e.elemento_id).await.unwrap_err(),
            ApiError::NotFound(_)
        ));
    }
}
