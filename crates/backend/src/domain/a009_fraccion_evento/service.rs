use super::repository;
use crate::domain::a007_evento::repository as evento_repository;
use crate::domain::a010_metodologia_evento::repository as metodologia_repository;
use crate::shared::api_error::{ApiError, ApiResult};
use crate::shared::data::references;
use contracts::domain::a007_evento::aggregate::EventoCatalogo;
use contracts::domain::a009_fraccion_evento::aggregate::{
    agrupar_codigos, codigo_de, codigo_evento_de, metodologia_id_para, metodologia_nombre,
    nombre_disponible, prefijo_fraccion, CodigoDisponible, FraccionEvento,
    FraccionEventoCreateDto, FraccionEventoListItem, FraccionEventoListResponse,
    FraccionEventoNextIdResponse, FraccionEventoUpdateDto, FraccionEventoView, PER_PAGE_DEFAULT,
    PREFIJO,
};
use contracts::domain::a010_metodologia_evento::aggregate::MetodologiaEvento;
use contracts::domain::common::catalog_id;
use contracts::shared::paging::{PageInfo, PageRequest};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct FraccionEventoListParams {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub evento_tipo: Option<String>,
}

fn limpio(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

async fn evento_o_404<C: ConnectionTrait>(db: &C, evento_tipo_id: &str) -> ApiResult<EventoCatalogo> {
    evento_repository::get_evento(db, evento_tipo_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Evento {} no encontrado", evento_tipo_id)))
}

async fn hermanas<C: ConnectionTrait>(
    db: &C,
    codigo_evento: &str,
    codigo: &str,
) -> ApiResult<(Vec<String>, Vec<FraccionEvento>)> {
    let prefix = prefijo_fraccion(codigo_evento, codigo).to_vec();
    let refs: Vec<&str> = prefix.iter().map(String::as_str).collect();
    let fracciones = repository::list_by_prefix(db, &refs, None).await?;
    Ok((prefix, fracciones))
}

/// Коды, уже занятые фракциями события
pub async fn codigos_disponibles<C: ConnectionTrait>(
    db: &C,
    evento_tipo: Option<&str>,
) -> ApiResult<Vec<CodigoDisponible>> {
    let evento_tipo =
        limpio(evento_tipo).ok_or_else(|| ApiError::bad_request("evento_tipo requerido"))?;
    evento_o_404(db, evento_tipo).await?;
    let codigo_evento = codigo_evento_de(evento_tipo)?;

    let fracciones =
        repository::list_by_prefix(db, &[PREFIJO, codigo_evento.as_str()], Some(evento_tipo)).await?;
    Ok(agrupar_codigos(&fracciones))
}

pub async fn next_id<C: ConnectionTrait>(
    db: &C,
    evento_tipo: Option<&str>,
    codigo: Option<&str>,
) -> ApiResult<FraccionEventoNextIdResponse> {
    let (Some(evento_tipo), Some(codigo)) = (limpio(evento_tipo), limpio(codigo)) else {
        return Err(ApiError::bad_request("evento_tipo y codigo requeridos"));
    };
    let codigo = codigo.to_uppercase();
    let codigo_evento = codigo_evento_de(evento_tipo)?;
    catalog_id::validate_codigo(&codigo, "Codigo")?;

    let (prefix, fracciones) = hermanas(db, &codigo_evento, &codigo).await?;
    let refs: Vec<&str> = prefix.iter().map(String::as_str).collect();
    let (fraccion_evento_id, numero) = catalog_id::next_id(
        &refs,
        fracciones.iter().map(|f| f.fraccion_evento_id.as_str()),
    );

    Ok(FraccionEventoNextIdResponse {
        success: true,
        fraccion_evento_id,
        codigo_evento,
        codigo,
        numero,
    })
}

pub async fn list<C: ConnectionTrait>(
    db: &C,
    params: FraccionEventoListParams,
) -> ApiResult<FraccionEventoListResponse> {
    let page = PageRequest::new(params.page, params.per_page, PER_PAGE_DEFAULT);
    let evento_tipo = limpio(params.evento_tipo.as_deref());
    let (items, total) =
        repository::list_paginated(db, evento_tipo, page.per_page, page.offset()).await?;

    let ids: Vec<String> = items.iter().map(|f| f.fraccion_evento_id.clone()).collect();
    let mut resumen = metodologia_repository::resumen_por_fraccion(db, &ids).await?;
    let eventos: HashMap<String, String> = evento_repository::list_eventos(db)
        .await?
        .into_iter()
        .map(|e| (e.evento_tipo_id, e.nombre))
        .collect();

    let fracciones = items
        .into_iter()
        .map(|f| {
            let metodologia = resumen.remove(&f.fraccion_evento_id);
            FraccionEventoListItem {
                evento_nombre: eventos.get(&f.evento_tipo_id).cloned().unwrap_or_default(),
                codigo: f.codigo(),
                tiene_metodologia: metodologia.is_some(),
                cantidad_pasos: metodologia.as_ref().map(|(_, n)| *n).unwrap_or(0),
                metodologia_id: metodologia.map(|(id, _)| id),
                fraccion_evento_id: f.fraccion_evento_id,
                evento_tipo_id: f.evento_tipo_id,
                nombre: f.nombre,
                descripcion: f.descripcion,
            }
        })
        .collect();

    Ok(FraccionEventoListResponse {
        success: true,
        fracciones,
        pagination: PageInfo::new(page, total),
    })
}

/// Создание фракции события и её пустой методологии
pub async fn create(db: &DatabaseConnection, dto: &FraccionEventoCreateDto) -> ApiResult<FraccionEventoView> {
    let dto = dto.normalized();
    if dto.evento_tipo_id.is_empty() {
        return Err(ApiError::bad_request("evento_tipo_id requerido"));
    }
    evento_o_404(db, &dto.evento_tipo_id).await?;
    dto.validate_contenido()?;
    let codigo_evento = codigo_evento_de(&dto.evento_tipo_id)?;

    let (prefix, existentes) = hermanas(db, &codigo_evento, &dto.codigo).await?;
    if !nombre_disponible(&dto.nombre, &existentes, None) {
        return Err(ApiError::bad_request(format!(
            "Ya existe una fraccion con el nombre '{}'",
            dto.nombre
        )));
    }
    let refs: Vec<&str> = prefix.iter().map(String::as_str).collect();
    let (fraccion_evento_id, _) = catalog_id::next_id(
        &refs,
        existentes.iter().map(|f| f.fraccion_evento_id.as_str()),
    );

    let descripcion = Some(dto.descripcion.clone()).filter(|d| !d.is_empty());
    let fraccion = FraccionEvento {
        fraccion_evento_id,
        evento_tipo_id: dto.evento_tipo_id,
        nombre: dto.nombre,
        descripcion: descripcion.clone(),
    };
    let metodologia = MetodologiaEvento {
        metodologia_fraccion_id: metodologia_id_para(&fraccion.fraccion_evento_id),
        fraccion_evento_id: fraccion.fraccion_evento_id.clone(),
        nombre: metodologia_nombre(&fraccion.nombre),
        descripcion,
        pasos: Vec::new(),
    };

    let txn = db.begin().await?;
    repository::insert(&txn, &fraccion).await?;
    metodologia_repository::insert(&txn, &metodologia).await?;
    txn.commit().await?;

    tracing::info!(
        "Fraccion evento {} created with metodologia {}",
        fraccion.fraccion_evento_id,
        metodologia.metodologia_fraccion_id
    );
    Ok(FraccionEventoView {
        codigo: Some(fraccion.codigo()),
        metodologia_id: Some(metodologia.metodologia_fraccion_id),
        fraccion_evento_id: fraccion.fraccion_evento_id,
        evento_tipo_id: fraccion.evento_tipo_id,
        nombre: fraccion.nombre,
        descripcion: fraccion.descripcion,
    })
}

/// Переименование фракции; методология получает новое имя и описание
pub async fn update(
    db: &DatabaseConnection,
    id: &str,
    dto: &FraccionEventoUpdateDto,
) -> ApiResult<FraccionEventoView> {
    let mut fraccion = repository::get_by_id(db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Fraccion no encontrada"))?;
    let dto = dto.normalized();
    dto.validate()?;

    if catalog_id::segment_count(id) >= 3 {
        let codigo_evento = catalog_id::segment(id, 1).unwrap_or_default();
        let (_, existentes) = hermanas(db, codigo_evento, &codigo_de(id)).await?;
        if !nombre_disponible(&dto.nombre, &existentes, Some(id)) {
            return Err(ApiError::bad_request(format!(
                "Ya existe otra fraccion con el nombre '{}'",
                dto.nombre
            )));
        }
    }

    fraccion.nombre = dto.nombre;
    fraccion.descripcion = Some(dto.descripcion).filter(|d| !d.is_empty());

    let txn = db.begin().await?;
    repository::update(&txn, &fraccion).await?;
    for mut metodologia in metodologia_repository::list_by_fraccion(&txn, id).await? {
        metodologia.nombre = metodologia_nombre(&fraccion.nombre);
        metodologia.descripcion = fraccion.descripcion.clone();
        metodologia_repository::update(&txn, &metodologia).await?;
    }
    txn.commit().await?;

    tracing::info!("Fraccion evento {} updated", id);
    Ok(FraccionEventoView {
        codigo: None,
        metodologia_id: None,
        fraccion_evento_id: fraccion.fraccion_evento_id,
        evento_tipo_id: fraccion.evento_tipo_id,
        nombre: fraccion.nombre,
        descripcion: fraccion.descripcion,
    })
}

/// Удаление фракции события вместе с методологией и шагами
pub async fn delete(db: &DatabaseConnection, id: &str) -> ApiResult<()> {
    if repository::get_by_id(db, id).await?.is_none() {
        return Err(ApiError::not_found("Fraccion no encontrada"));
    }
    let en_uso = references::sop_evento_detalles(db, id).await?;
    if en_uso > 0 {
        return Err(ApiError::bad_request(format!(
            "No se puede eliminar. Esta fraccion esta en uso en {} SOP(s)",
            en_uso
        )));
    }

    let txn = db.begin().await?;
    for metodologia in metodologia_repository::list_by_fraccion(&txn, id).await? {
        metodologia_repository::delete(&txn, &metodologia.metodologia_fraccion_id).await?;
    }
    repository::delete(&txn, id).await?;
    txn.commit().await?;

    tracing::info!("Fraccion evento {} deleted", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a007_evento::service as evento_service;
    use crate::shared::data::db::test_support::temp_db;

    fn nueva(codigo: &str, nombre: &str) -> FraccionEventoCreateDto {
        FraccionEventoCreateDto {
            evento_tipo_id: "EV-IN".into(),
            codigo: codigo.into(),
            nombre: nombre.into(),
            descripcion: "Atender derrame".into(),
        }
    }

    #[tokio::test]
    async fn create_builds_methodology_and_groups_codes() {
        let (_dir, conn) = temp_db().await;
        evento_service::insert_test_data(&conn).await.unwrap();

        let first = create(&conn, &nueva("de", "Derrame")).await.unwrap();
        assert_eq!(first.fraccion_evento_id, "FR-IN-DE-001");
        assert_eq!(first.codigo.as_deref(), Some("DE"));
        assert_eq!(first.metodologia_id.as_deref(), Some("ME-IN-DE-001"));

        create(&conn, &nueva("DE", "Derrame aceite")).await.unwrap();
        create(&conn, &nueva("VO", "Vomito")).await.unwrap();

        let err = create(&conn, &nueva("DE", "Derrame")).await.unwrap_err();
        assert_eq!(err.to_string(), "Ya existe una fraccion con el nombre 'Derrame'");

        let codigos = codigos_disponibles(&conn, Some("EV-IN")).await.unwrap();
        assert_eq!(codigos.len(), 2);
        assert_eq!(codigos[0].codigo, "DE");
        assert_eq!(codigos[0].count, 2);
        assert_eq!(codigos[0].nombre_base, "Derrame");
        assert_eq!(codigos[0].ultima_fraccion, "FR-IN-DE-002");

        let next = next_id(&conn, Some("EV-IN"), Some("de")).await.unwrap();
        assert_eq!(next.fraccion_evento_id, "FR-IN-DE-003");
        assert_eq!(next.codigo_evento, "IN");
    }

    #[tokio::test]
    async fn validates_query_parameters() {
        let (_dir, conn) = temp_db().await;
        evento_service::insert_test_data(&conn).await.unwrap();

        let err = codigos_disponibles(&conn, None).await.unwrap_err();
        assert_eq!(err.to_string(), "evento_tipo requerido");
        let err = codigos_disponibles(&conn, Some("EV-XX")).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Evento EV-XX no encontrado"));

        let err = next_id(&conn, Some("EV-IN"), None).await.unwrap_err();
        assert_eq!(err.to_string(), "evento_tipo y codigo requeridos");

        let err = create(&conn, &nueva("D", "x")).await.unwrap_err();
        assert_eq!(err.to_string(), "Codigo debe tener 2 caracteres");
    }

    #[tokio::test]
    async fn wildcard_codigo_does_not_reach_siblings() {
        let (_dir, conn) = temp_db().await;
        evento_service::insert_test_data(&conn).await.unwrap();
        create(&conn, &nueva("AB", "Absorbente")).await.unwrap();

        let err = create(&conn, &nueva("A_", "Absorbente")).await.unwrap_err();
        assert_eq!(err.to_string(), "Codigo solo admite letras y numeros");
        let err = next_id(&conn, Some("EV-IN"), Some("a_")).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));

        let hermanas = repository::list_by_prefix(&conn, &["FR", "IN", "A_"], None)
            .await
            .unwrap();
        assert!(hermanas.is_empty());
    }

    #[tokio::test]
    async fn list_reports_methodology_state() {
        let (_dir, conn) = temp_db().await;
        evento_service::insert_test_data(&conn).await.unwrap();
        let f = create(&conn, &nueva("DE", "Derrame")).await.unwrap();
        conn.execute_unprepared(
            "INSERT INTO a010_metodologia_evento_paso (metodologia_fraccion_id, numero_paso, descripcion) \
             VALUES ('ME-IN-DE-001', 1, 'Aislar'), ('ME-IN-DE-001', 2, 'Absorber')",
        )
        .await
        .unwrap();

        let listado = list(
            &conn,
            FraccionEventoListParams {
                evento_tipo: Some("EV-IN".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let row = &listado.fracciones[0];
        assert_eq!(row.fraccion_evento_id, f.fraccion_evento_id);
        assert_eq!(row.evento_nombre, "Incidente");
        assert!(row.tiene_metodologia);
        assert_eq!(row.cantidad_pasos, 2);
        assert_eq!(row.metodologia_id.as_deref(), Some("ME-IN-DE-001"));
    }

    #[tokio::test]
    async fn update_renames_methodology_and_delete_cascades() {
        let (_dir, conn) = temp_db().await;
        evento_service::insert_test_data(&conn).await.unwrap();
        let a = create(&conn, &nueva("DE", "Derrame")).await.unwrap();
        let b = create(&conn, &nueva("DE", "Derrame aceite")).await.unwrap();

        let dto = FraccionEventoUpdateDto {
            nombre: "Derrame".into(),
            descripcion: String::new(),
        };
        let err = update(&conn, &b.fraccion_evento_id, &dto).await.unwrap_err();
        assert_eq!(err.to_string(), "Ya existe otra fraccion con el nombre 'Derrame'");

        let dto = FraccionEventoUpdateDto {
            nombre: "Derrame quimico".into(),
            descripcion: "Con EPP".into(),
        };
        update(&conn, &a.fraccion_evento_id, &dto).await.unwrap();
        let m = metodologia_repository::get_by_id(&conn, "ME-IN-DE-001").await.unwrap().unwrap();
        assert_eq!(m.nombre, "Metodologia de Derrame quimico");
        assert_eq!(m.descripcion.as_deref(), Some("Con EPP"));

        conn.execute_unprepared(
            "INSERT INTO sop_evento_detalle (sop_evento_detalle_id, fraccion_evento_id) VALUES ('SD-1', 'FR-IN-DE-001')",
        )
        .await
        .unwrap();
        let err = delete(&conn, &a.fraccion_evento_id).await.unwrap_err();
        assert_eq!(err.to_string(), "No se puede eliminar. Esta fraccion esta en uso en 1 SOP(s)");

        delete(&conn, &b.fraccion_evento_id).await.unwrap();
        assert!(metodologia_repository::get_by_id(&conn, "ME-IN-DE-002").await.unwrap().is_none());
    }
}
