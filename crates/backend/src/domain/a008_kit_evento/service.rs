use crate::domain::a006_kit::repository::{self as kit_repository, KitFilter};
use crate::domain::a006_kit::service::{herramientas_de_kits, siguiente_id, verificar_herramientas};
use crate::domain::a007_evento::repository as evento_repository;
use crate::shared::api_error::{ApiError, ApiResult};
use contracts::domain::a006_kit::aggregate::{Kit, KitNextIdResponse, TipoKit, PER_PAGE_DEFAULT};
use contracts::domain::a008_kit_evento::aggregate::{
    codigo_desde_caso, prefijo_kit_evento, KitEventoCreateDto, KitEventoListItem,
    KitEventoListResponse, KitEventoUpdateDto, KitEventoView,
};
use contracts::shared::paging::{PageInfo, PageRequest};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct KitEventoListParams {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub evento_tipo: Option<String>,
    pub caso: Option<String>,
}

async fn siguiente<C: ConnectionTrait>(db: &C, codigo: &str) -> ApiResult<(String, u32)> {
    let prefix = prefijo_kit_evento(codigo);
    let prefix: Vec<&str> = prefix.iter().map(String::as_str).collect();
    siguiente_id(db, &prefix).await
}

/// Предпросмотр id `KT-EV-{caso}-NNN`
pub async fn next_id<C: ConnectionTrait>(db: &C, caso_id: Option<&str>) -> ApiResult<KitNextIdResponse> {
    let codigo = codigo_desde_caso(caso_id.unwrap_or_default())?;
    let (kit_id, numero) = siguiente(db, &codigo).await?;
    Ok(KitNextIdResponse {
        success: true,
        kit_id,
        codigo,
        numero,
    })
}

pub async fn list<C: ConnectionTrait>(db: &C, params: KitEventoListParams) -> ApiResult<KitEventoListResponse> {
    let page = PageRequest::new(params.page, params.per_page, PER_PAGE_DEFAULT);
    let caso = params.caso.filter(|c| !c.is_empty());
    let evento_tipo = params.evento_tipo.filter(|e| !e.is_empty());

    let caso_ids = match (caso, evento_tipo) {
        (Some(caso), _) => Some(vec![caso]),
        (None, Some(evento_tipo)) => Some(
            evento_repository::list_casos(db, Some(&evento_tipo))
                .await?
                .into_iter()
                .map(|c| c.caso_id)
                .collect(),
        ),
        (None, None) => None,
    };
    let filter = KitFilter {
        tipo_kit: Some(TipoKit::Evento.as_str().to_string()),
        caso_ids,
        ..Default::default()
    };
    let (items, total) =
        kit_repository::list_paginated(db, &filter, page.per_page, page.offset()).await?;

    let ids: Vec<String> = items.iter().map(|k| k.kit_id.clone()).collect();
    let mut herramientas = herramientas_de_kits(db, &ids).await?;
    let casos: HashMap<String, _> = evento_repository::list_casos(db, None)
        .await?
        .into_iter()
        .map(|c| (c.caso_id.clone(), c))
        .collect();
    let eventos: HashMap<String, String> = evento_repository::list_eventos(db)
        .await?
        .into_iter()
        .map(|e| (e.evento_tipo_id, e.nombre))
        .collect();

    let kits = items
        .into_iter()
        .map(|k| {
            let herramientas = herramientas.remove(&k.kit_id).unwrap_or_default();
            let caso = k.caso_id.as_ref().and_then(|id| casos.get(id));
            let evento_tipo_id = caso.map(|c| c.evento_tipo_id.clone()).unwrap_or_default();
            KitEventoListItem {
                caso_nombre: caso.map(|c| c.nombre.clone()).unwrap_or_default(),
                evento_nombre: eventos.get(&evento_tipo_id).cloned().unwrap_or_default(),
                evento_tipo_id,
                cantidad_herramientas: herramientas.len(),
                herramientas,
                kit_id: k.kit_id,
                caso_id: k.caso_id,
                nombre: k.nombre,
                tipo_kit: k.tipo_kit,
            }
        })
        .collect();

    Ok(KitEventoListResponse {
        success: true,
        kits,
        pagination: PageInfo::new(page, total),
    })
}

/// Создание кита события для случая
pub async fn create(db: &DatabaseConnection, dto: &KitEventoCreateDto) -> ApiResult<KitEventoView> {
    let dto = dto.normalized();
    let codigo = codigo_desde_caso(&dto.caso_id)?;
    if evento_repository::get_caso(db, &dto.caso_id).await?.is_none() {
        return Err(ApiError::not_found(format!("Caso {} no encontrado", dto.caso_id)));
    }
    dto.validate_contenido()?;
    let herramientas = verificar_herramientas(db, &dto.herramientas).await?;

    let (kit_id, _) = siguiente(db, &codigo).await?;
    let kit = Kit {
        kit_id,
        fraccion_id: None,
        nivel_limpieza_id: None,
        nombre: dto.nombre,
        tipo_kit: TipoKit::Evento.as_str().to_string(),
        caso_id: Some(dto.caso_id),
    };

    let txn = db.begin().await?;
    kit_repository::insert(&txn, &kit).await?;
    kit_repository::replace_detalles(&txn, &kit.kit_id, &herramientas, Some(&kit.nombre)).await?;
    txn.commit().await?;

    tracing::info!("Kit evento {} created", kit.kit_id);
    Ok(KitEventoView {
        kit_id: kit.kit_id,
        caso_id: kit.caso_id,
        nombre: kit.nombre,
        herramientas,
    })
}

async fn kit_evento<C: ConnectionTrait>(db: &C, id: &str) -> ApiResult<Kit> {
    let kit = kit_repository::get_by_id(db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Kit no encontrado"))?;
    if kit.tipo() != Some(TipoKit::Evento) {
        return Err(ApiError::bad_request("Este kit no es de tipo evento"));
    }
    Ok(kit)
}

pub async fn update(db: &DatabaseConnection, id: &str, dto: &KitEventoUpdateDto) -> ApiResult<KitEventoView> {
    let mut kit = kit_evento(db, id).await?;
    dto.validate()?;
    let herramientas = verificar_herramientas(db, &dto.herramientas).await?;
    kit.nombre = dto.nombre.trim().to_string();

    let txn = db.begin().await?;
    kit_repository::update(&txn, &kit).await?;
    kit_repository::replace_detalles(&txn, &kit.kit_id, &herramientas, Some(&kit.nombre)).await?;
    txn.commit().await?;

    tracing::info!("Kit evento {} updated", id);
    Ok(KitEventoView {
        kit_id: kit.kit_id,
        caso_id: kit.caso_id,
        nombre: kit.nombre,
        herramientas,
    })
}

pub async fn delete(db: &DatabaseConnection, id: &str) -> ApiResult<()> {
    kit_evento(db, id).await?;
    let txn = db.begin().await?;
    kit_repository::delete(&txn, id).await?;
    txn.commit().await?;

    tracing::info!("Kit evento {} deleted", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_herramienta::service as herramienta_service;
    use crate::domain::a007_evento::service as evento_service;
    use crate::shared::data::db::test_support::temp_db;
    use contracts::domain::a003_herramienta::aggregate::HerramientaCreateDto;

    async fn seed(conn: &DatabaseConnection) -> String {
        evento_service::insert_test_data(conn).await.unwrap();
        herramienta_service::create(
            conn,
            &HerramientaCreateDto {
                grupo: "GU".into(),
                nombre: "Guantes nitrilo".into(),
                descripcion: String::new(),
            },
        )
        .await
        .unwrap()
        .herramienta_id
    }

    fn dto(caso_id: &str, herramienta: &str) -> KitEventoCreateDto {
        KitEventoCreateDto {
            caso_id: caso_id.into(),
            nombre: "Kit derrame".into(),
            herramientas: vec![herramienta.into()],
        }
    }

    #[tokio::test]
    async fn ids_follow_caso_code() {
        let (_dir, conn) = temp_db().await;
        let herramienta = seed(&conn).await;

        let err = next_id(&conn, None).await.unwrap_err();
        assert_eq!(err.to_string(), "caso_id requerido");
        let err = next_id(&conn, Some("CA-IN")).await.unwrap_err();
        assert_eq!(err.to_string(), "Formato de caso_id invalido");

        let kit = create(&conn, &dto("CA-IN-DE", &herramienta)).await.unwrap();
        assert_eq!(kit.kit_id, "KT-EV-DE-001");
        let next = next_id(&conn, Some("CA-IN-DE")).await.unwrap();
        assert_eq!(next.kit_id, "KT-EV-DE-002");
        assert_eq!(next.numero, 2);

        let err = create(&conn, &dto("CA-IN-XX", &herramienta)).await.unwrap_err();
        assert_eq!(err.to_string(), "Caso CA-IN-XX no encontrado");
    }

    #[tokio::test]
    async fn list_filters_by_evento_and_caso() {
        let (_dir, conn) = temp_db().await;
        let herramienta = seed(&conn).await;
        create(&conn, &dto("CA-IN-DE", &herramienta)).await.unwrap();
        create(&conn, &dto("CA-IN-VO", &herramienta)).await.unwrap();
        create(&conn, &dto("CA-EM-IN", &herramienta)).await.unwrap();

        let incidentes = list(
            &conn,
            KitEventoListParams {
                evento_tipo: Some("EV-IN".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(incidentes.pagination.total, 2);
        assert_eq!(incidentes.kits[0].evento_nombre, "Incidente");
        assert_eq!(incidentes.kits[0].caso_nombre, "Derrame");
        assert_eq!(incidentes.kits[0].cantidad_herramientas, 1);

        let caso = list(
            &conn,
            KitEventoListParams {
                evento_tipo: Some("EV-IN".into()),
                caso: Some("CA-EM-IN".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(caso.pagination.total, 1);
        assert_eq!(caso.kits[0].evento_tipo_id, "EV-EM");
    }

    #[tokio::test]
    async fn sop_kits_are_rejected() {
        let (_dir, conn) = temp_db().await;
        let herramienta = seed(&conn).await;
        conn.execute_unprepared(
            "INSERT INTO a006_kit (kit_id, fraccion_id, nombre, tipo_kit) VALUES ('KT-TL-001', 'FR-TL-001', 'Kit', 'sop')",
        )
        .await
        .unwrap();

        let update_dto = KitEventoUpdateDto {
            nombre: "x".into(),
            herramientas: vec![herramienta.clone()],
        };
        let err = update(&conn, "KT-TL-001", &update_dto).await.unwrap_err();
        assert_eq!(err.to_string(), "Este kit no es de tipo evento");
        assert!(delete(&conn, "KT-TL-001").await.is_err());

        let kit = create(&conn, &dto("CA-IN-DE", &herramienta)).await.unwrap();
        let updated = update(&conn, &kit.kit_id, &update_dto).await.unwrap();
        assert_eq!(updated.nombre, "x");
        delete(&conn, &kit.kit_id).await.unwrap();
    }
}
