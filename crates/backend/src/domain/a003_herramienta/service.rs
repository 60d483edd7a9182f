use super::repository::{self, HerramientaFilter};
use crate::domain::a006_kit::repository as kit_repository;
use crate::shared::api_error::{ApiError, ApiResult};
use contracts::domain::a003_herramienta::aggregate::{
    Herramienta, HerramientaCatalogos, HerramientaCreateDto, HerramientaListResponse,
    HerramientaNextIdResponse, HerramientaUpdateDto, ESTATUS_ACTIVO, GLOSARIO_HERRAMIENTAS,
    PER_PAGE_DEFAULT, PREFIJO,
};
use contracts::domain::common::catalog_id;
use contracts::shared::api::glosario_items;
use contracts::shared::paging::{PageInfo, PageRequest};
use sea_orm::ConnectionTrait;

#[derive(Debug, Clone, Default)]
pub struct HerramientaListParams {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub grupo: Option<String>,
    pub estatus: Option<String>,
}

pub fn catalogos() -> HerramientaCatalogos {
    HerramientaCatalogos {
        success: true,
        grupos: glosario_items(GLOSARIO_HERRAMIENTAS),
    }
}

/// Следующий id в группе: `HE-{grupo}-NNN`
pub async fn next_id<C: ConnectionTrait>(db: &C, grupo: Option<&str>) -> ApiResult<HerramientaNextIdResponse> {
    let grupo = grupo.unwrap_or_default().trim().to_uppercase();
    catalog_id::validate_codigo(&grupo, "Grupo")?;

    let prefix = [PREFIJO, grupo.as_str()];
    let existentes = repository::ids_with_prefix(db, &prefix).await?;
    let (herramienta_id, numero) = catalog_id::next_id(&prefix, existentes.iter().map(String::as_str));

    Ok(HerramientaNextIdResponse {
        success: true,
        herramienta_id,
        grupo,
        numero,
    })
}

pub async fn list<C: ConnectionTrait>(db: &C, params: HerramientaListParams) -> ApiResult<HerramientaListResponse> {
    let page = PageRequest::new(params.page, params.per_page, PER_PAGE_DEFAULT);
    let filter = HerramientaFilter {
        grupo: params
            .grupo
            .map(|g| g.trim().to_uppercase())
            .filter(|g| !g.is_empty()),
        estatus: params.estatus.filter(|e| !e.is_empty()),
    };
    if let Some(grupo) = &filter.grupo {
        catalog_id::validate_codigo(grupo, "Grupo")?;
    }
    let (herramientas, total) =
        repository::list_paginated(db, &filter, page.per_page, page.offset()).await?;

    Ok(HerramientaListResponse {
        success: true,
        herramientas,
        pagination: PageInfo::new(page, total),
    })
}

/// Создание инструмента со статусом `Activo`
pub async fn create<C: ConnectionTrait>(db: &C, dto: &HerramientaCreateDto) -> ApiResult<Herramienta> {
    let dto = dto.normalized();
    dto.validate()?;

    let next = next_id(db, Some(&dto.grupo)).await?;
    let herramienta = Herramienta {
        herramienta_id: next.herramienta_id,
        nombre: dto.nombre,
        descripcion: Some(dto.descripcion),
        estatus: Some(ESTATUS_ACTIVO.to_string()),
        grupo: dto.grupo,
    };
    repository::insert(db, &herramienta).await?;

    tracing::info!("Herramienta {} created", herramienta.herramienta_id);
    Ok(herramienta)
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: &str,
    dto: &HerramientaUpdateDto,
) -> ApiResult<Herramienta> {
    let mut herramienta = repository::get_by_id(db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Herramienta no encontrada"))?;

    let dto = dto.normalized();
    dto.validate()?;
    herramienta.nombre = dto.nombre;
    herramienta.descripcion = Some(dto.descripcion);
    herramienta.estatus = Some(dto.estatus);
    repository::update(db, &herramienta).await?;

    tracing::info!("Herramienta {} updated", id);
    Ok(herramienta)
}

/// Удаление запрещено, пока инструмент входит в кит
pub async fn delete<C: ConnectionTrait>(db: &C, id: &str) -> ApiResult<()> {
    if repository::get_by_id(db, id).await?.is_none() {
        return Err(ApiError::not_found("Herramienta no encontrada"));
    }
    let kits = kit_repository::count_detalles_de_herramienta(db, id).await?;
    if kits > 0 {
        return Err(ApiError::bad_request(format!(
            "No se puede eliminar. Esta herramienta esta en {} kit(s)",
            kits
        )));
    }
    repository::delete(db, id).await?;

    tracing::info!("Herramienta {} deleted", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support::temp_db;

    fn nueva(grupo: &str, nombre: &str) -> HerramientaCreateDto {
        HerramientaCreateDto {
            grupo: grupo.into(),
            nombre: nombre.into(),
            descripcion: String::new(),
        }
    }

    #[test]
    fn catalogos_are_sorted() {
        let c = catalogos();
        assert_eq!(c.grupos.len(), GLOSARIO_HERRAMIENTAS.len());
        assert_eq!(c.grupos[0].codigo, "AT");
    }

    #[tokio::test]
    async fn next_id_validates_grupo() {
        let (_dir, conn) = temp_db().await;
        let err = next_id(&conn, None).await.unwrap_err();
        assert_eq!(err.to_string(), "Grupo requerido");
        let err = next_id(&conn, Some("MOP")).await.unwrap_err();
        assert_eq!(err.to_string(), "Grupo debe tener 2 caracteres");

        let next = next_id(&conn, Some("mo")).await.unwrap();
        assert_eq!(next.herramienta_id, "HE-MO-001");
        assert_eq!(next.grupo, "MO");
        assert_eq!(next.numero, 1);
    }

    #[tokio::test]
    async fn create_list_and_filter() {
        let (_dir, conn) = temp_db().await;
        let a = create(&conn, &nueva("mo", "Mop azul")).await.unwrap();
        let b = create(&conn, &nueva("MO", "Mop rojo")).await.unwrap();
        create(&conn, &nueva("CU", "Cubeta")).await.unwrap();

        assert_eq!(a.herramienta_id, "HE-MO-001");
        assert_eq!(a.descripcion.as_deref(), Some("Mop azul"));
        assert_eq!(b.herramienta_id, "HE-MO-002");

        let update_dto = HerramientaUpdateDto {
            nombre: "Mop rojo".into(),
            descripcion: "Mop rojo".into(),
            estatus: "Inactivo".into(),
        };
        update(&conn, &b.herramienta_id, &update_dto).await.unwrap();

        let mops = list(
            &conn,
            HerramientaListParams {
                grupo: Some("mo".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(mops.pagination.total, 2);
        assert!(mops.herramientas.iter().all(|h| h.grupo == "MO"));

        let activas = list(
            &conn,
            HerramientaListParams {
                estatus: Some("Activo".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(activas.pagination.total, 2);

        let err = list(
            &conn,
            HerramientaListParams {
                grupo: Some("M_".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn delete_blocked_by_kits() {
        let (_dir, conn) = temp_db().await;
        let h = create(&conn, &nueva("ES", "Escoba")).await.unwrap();
        conn.execute_unprepared(&format!(
            "INSERT INTO a006_kit_detalle (kit_id, herramienta_id) VALUES ('KT-BA-001', '{0}'), ('KT-BA-002', '{0}')",
            h.herramienta_id
        ))
        .await
        .unwrap();

        let err = delete(&conn, &h.herramienta_id).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "No se puede eliminar. Esta herramienta esta en 2 kit(s)"
        );

        conn.execute_unprepared("DELETE FROM a006_kit_detalle").await.unwrap();
        delete(&conn, &h.herramienta_id).await.unwrap();
        assert!(repository::get_by_id(&conn, &h.herramienta_id).await.unwrap().is_none());
    }
}
