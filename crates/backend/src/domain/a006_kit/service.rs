use super::repository::{self, KitFilter, NivelFilter};
use crate::domain::a003_herramienta::repository::{self as herramienta_repository, HerramientaFilter};
use crate::domain::a004_fraccion::repository as fraccion_repository;
use crate::shared::api_error::{ApiError, ApiResult};
use contracts::domain::a003_herramienta::aggregate::ESTATUS_ACTIVO;
use contracts::domain::a004_fraccion::aggregate::FraccionOption;
use contracts::domain::a006_kit::aggregate::{
    codigo_de, HerramientaDisponible, Kit, KitCreateDto, KitHerramienta, KitListItem,
    KitListResponse, KitNextIdResponse, KitUpdateDto, KitView, TipoKit, NIVEL_GENERAL,
    PER_PAGE_DEFAULT, PREFIJO,
};
use contracts::domain::common::catalog_id;
use contracts::shared::paging::{PageInfo, PageRequest};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct KitListParams {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub fraccion: Option<String>,
    pub nivel: Option<String>,
    pub tipo_kit: Option<String>,
}

/// `general` → без уровня, число → конкретный уровень, иначе без фильтра
pub fn parse_nivel(nivel: Option<&str>) -> NivelFilter {
    match nivel.map(str::trim) {
        Some(NIVEL_GENERAL) => NivelFilter::General,
        Some(n) => n.parse().map(NivelFilter::Nivel).unwrap_or_default(),
        None => NivelFilter::Todos,
    }
}

pub async fn fracciones_disponibles<C: ConnectionTrait>(db: &C) -> ApiResult<Vec<FraccionOption>> {
    Ok(fraccion_repository::list_all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect())
}

/// Активные инструменты для чек-листа, опционально одной группы
pub async fn herramientas_disponibles<C: ConnectionTrait>(
    db: &C,
    grupo: Option<&str>,
) -> ApiResult<Vec<HerramientaDisponible>> {
    let filter = HerramientaFilter {
        grupo: grupo
            .map(|g| g.trim().to_uppercase())
            .filter(|g| !g.is_empty()),
        estatus: Some(ESTATUS_ACTIVO.to_string()),
    };
    if let Some(grupo) = &filter.grupo {
        catalog_id::validate_codigo(grupo, "Grupo")?;
    }
    Ok(herramienta_repository::list_all(db, &filter)
        .await?
        .into_iter()
        .map(|h| HerramientaDisponible {
            herramienta_id: h.herramienta_id,
            nombre: h.nombre,
            descripcion: h.descripcion,
            grupo: h.grupo,
        })
        .collect())
}

/// Следующий id по произвольному префиксу китов
pub(crate) async fn siguiente_id<C: ConnectionTrait>(db: &C, prefix: &[&str]) -> ApiResult<(String, u32)> {
    let existentes = repository::ids_with_prefix(db, prefix).await?;
    Ok(catalog_id::next_id(prefix, existentes.iter().map(String::as_str)))
}

pub async fn next_id<C: ConnectionTrait>(db: &C, codigo: Option<&str>) -> ApiResult<KitNextIdResponse> {
    let codigo = codigo.unwrap_or_default().trim().to_uppercase();
    catalog_id::validate_codigo(&codigo, "Codigo")?;
    let (kit_id, numero) = siguiente_id(db, &[PREFIJO, codigo.as_str()]).await?;
    Ok(KitNextIdResponse {
        success: true,
        kit_id,
        codigo,
        numero,
    })
}

/// Инструменты китов с названиями
pub(crate) async fn herramientas_de_kits<C: ConnectionTrait>(
    db: &C,
    kit_ids: &[String],
) -> ApiResult<HashMap<String, Vec<KitHerramienta>>> {
    let detalles = repository::detalles_de_kits(db, kit_ids).await?;
    let mut ids: Vec<String> = detalles
        .values()
        .flatten()
        .map(|(herramienta_id, _)| herramienta_id.clone())
        .collect();
    ids.sort();
    ids.dedup();
    let nombres: HashMap<String, String> = herramienta_repository::get_many(db, &ids)
        .await?
        .into_iter()
        .map(|h| (h.herramienta_id, h.nombre))
        .collect();

    Ok(detalles
        .into_iter()
        .map(|(kit_id, rows)| {
            let herramientas = rows
                .into_iter()
                .map(|(herramienta_id, nota)| KitHerramienta {
                    nombre: nombres.get(&herramienta_id).cloned().unwrap_or_default(),
                    herramienta_id,
                    nota,
                })
                .collect();
            (kit_id, herramientas)
        })
        .collect())
}

/// Все id должны существовать; повторы отбрасываются
pub(crate) async fn verificar_herramientas<C: ConnectionTrait>(
    db: &C,
    herramientas: &[String],
) -> ApiResult<Vec<String>> {
    let mut ids: Vec<String> = Vec::with_capacity(herramientas.len());
    for id in herramientas.iter().map(|h| h.trim()) {
        if !ids.iter().any(|existing| existing == id) {
            ids.push(id.to_string());
        }
    }
    let encontradas = herramienta_repository::get_many(db, &ids).await?;
    if let Some(faltante) = ids
        .iter()
        .find(|id| !encontradas.iter().any(|h| &h.herramienta_id == *id))
    {
        return Err(ApiError::not_found(format!(
            "Herramienta {} no encontrada",
            faltante
        )));
    }
    Ok(ids)
}

pub async fn list<C: ConnectionTrait>(db: &C, params: KitListParams) -> ApiResult<KitListResponse> {
    let page = PageRequest::new(params.page, params.per_page, PER_PAGE_DEFAULT);
    let codigo = params
        .fraccion
        .map(|f| f.trim().to_uppercase())
        .filter(|f| !f.is_empty());
    if let Some(codigo) = &codigo {
        catalog_id::validate_codigo(codigo, "Fraccion")?;
    }
    let filter = KitFilter {
        codigo,
        nivel: parse_nivel(params.nivel.as_deref().filter(|n| !n.is_empty())),
        tipo_kit: params.tipo_kit.filter(|t| !t.is_empty()),
        caso_ids: None,
    };
    let (items, total) =
        repository::list_paginated(db, &filter, page.per_page, page.offset()).await?;

    let ids: Vec<String> = items.iter().map(|k| k.kit_id.clone()).collect();
    let mut herramientas = herramientas_de_kits(db, &ids).await?;

    let kits = items
        .into_iter()
        .map(|k| {
            let herramientas = herramientas.remove(&k.kit_id).unwrap_or_default();
            KitListItem {
                codigo: codigo_de(&k.kit_id),
                cantidad_herramientas: herramientas.len(),
                herramientas,
                kit_id: k.kit_id,
                fraccion_id: k.fraccion_id,
                nivel_limpieza_id: k.nivel_limpieza_id,
                nombre: k.nombre,
                tipo_kit: k.tipo_kit,
            }
        })
        .collect();

    Ok(KitListResponse {
        success: true,
        kits,
        pagination: PageInfo::new(page, total),
    })
}

/// Создание кита SOP вместе с составом
pub async fn create(db: &DatabaseConnection, dto: &KitCreateDto) -> ApiResult<KitView> {
    let dto = dto.normalized();
    dto.validate()?;
    if fraccion_repository::get_by_id(db, &dto.fraccion_id).await?.is_none() {
        return Err(ApiError::not_found(format!(
            "Fraccion {} no encontrada",
            dto.fraccion_id
        )));
    }
    dto.validate_contenido()?;
    let herramientas = verificar_herramientas(db, &dto.herramientas).await?;

    let (kit_id, _) = siguiente_id(db, &[PREFIJO, dto.codigo.as_str()]).await?;
    let kit = Kit {
        kit_id,
        fraccion_id: Some(dto.fraccion_id),
        nivel_limpieza_id: dto.nivel_limpieza_id,
        nombre: dto.nombre,
        tipo_kit: TipoKit::Sop.as_str().to_string(),
        caso_id: None,
    };

    let txn = db.begin().await?;
    repository::insert(&txn, &kit).await?;
    repository::replace_detalles(&txn, &kit.kit_id, &herramientas, Some(&kit.nombre)).await?;
    txn.commit().await?;

    tracing::info!("Kit {} created with {} herramientas", kit.kit_id, herramientas.len());
    Ok(KitView {
        kit_id: kit.kit_id,
        fraccion_id: kit.fraccion_id,
        nivel_limpieza_id: kit.nivel_limpieza_id,
        nombre: kit.nombre,
        herramientas,
    })
}

pub async fn update(db: &DatabaseConnection, id: &str, dto: &KitUpdateDto) -> ApiResult<KitView> {
    let mut kit = repository::get_by_id(db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Kit no encontrado"))?;
    dto.validate()?;
    let herramientas = verificar_herramientas(db, &dto.herramientas).await?;

    kit.nombre = dto.nombre.trim().to_string();
    kit.nivel_limpieza_id = dto.nivel_limpieza_id;

    let txn = db.begin().await?;
    repository::update(&txn, &kit).await?;
    repository::replace_detalles(&txn, &kit.kit_id, &herramientas, Some(&kit.nombre)).await?;
    txn.commit().await?;

    tracing::info!("Kit {} updated", id);
    Ok(KitView {
        kit_id: kit.kit_id,
        fraccion_id: kit.fraccion_id,
        nivel_limpieza_id: kit.nivel_limpieza_id,
        nombre: kit.nombre,
        herramientas,
    })
}

pub async fn delete(db: &DatabaseConnection, id: &str) -> ApiResult<()> {
    if repository::get_by_id(db, id).await?.is_none() {
        return Err(ApiError::not_found("Kit no encontrado"));
    }
    let txn = db.begin().await?;
    repository::delete(&txn, id).await?;
    txn.commit().await?;

    tracing::info!("Kit {} deleted", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_herramienta::service as herramienta_service;
    use crate::domain::a004_fraccion::service as fraccion_service;
    use crate::shared::data::db::test_support::temp_db;
    use contracts::domain::a003_herramienta::aggregate::{HerramientaCreateDto, HerramientaUpdateDto};
    use contracts::domain::a004_fraccion::aggregate::FraccionCreateDto;

    async fn seed(conn: &DatabaseConnection) -> (String, Vec<String>) {
        let fraccion = fraccion_service::create(
            conn,
            &FraccionCreateDto {
                codigo: "TL".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let mut herramientas = Vec::new();
        for (grupo, nombre) in [("CE", "Cepillo"), ("AT", "Atomizador"), ("CE", "Cepillo WC")] {
            let h = herramienta_service::create(
                conn,
                &HerramientaCreateDto {
                    grupo: grupo.into(),
                    nombre: nombre.into(),
                    descripcion: String::new(),
                },
            )
            .await
            .unwrap();
            herramientas.push(h.herramienta_id);
        }
        (fraccion.fraccion_id, herramientas)
    }

    fn kit_dto(fraccion_id: &str, nivel: Option<i32>, herramientas: &[String]) -> KitCreateDto {
        KitCreateDto {
            codigo: "tl".into(),
            fraccion_id: fraccion_id.into(),
            nombre: "Kit bano".into(),
            nivel_limpieza_id: nivel,
            herramientas: herramientas.to_vec(),
        }
    }

    #[test]
    fn nivel_filter_parsing() {
        assert_eq!(parse_nivel(Some("general")), NivelFilter::General);
        assert_eq!(parse_nivel(Some("3")), NivelFilter::Nivel(3));
        assert_eq!(parse_nivel(Some("x")), NivelFilter::Todos);
        assert_eq!(parse_nivel(None), NivelFilter::Todos);
    }

    #[tokio::test]
    async fn create_and_list_with_herramientas() {
        let (_dir, conn) = temp_db().await;
        let (fraccion_id, herramientas) = seed(&conn).await;

        let kit = create(&conn, &kit_dto(&fraccion_id, None, &herramientas[..2])).await.unwrap();
        assert_eq!(kit.kit_id, "KT-TL-001");
        assert_eq!(kit.herramientas.len(), 2);
        let second = create(&conn, &kit_dto(&fraccion_id, Some(2), &herramientas[2..])).await.unwrap();
        assert_eq!(second.kit_id, "KT-TL-002");

        let all = list(&conn, KitListParams::default()).await.unwrap();
        assert_eq!(all.pagination.total, 2);
        let first = &all.kits[0];
        assert_eq!(first.codigo, "TL");
        assert_eq!(first.tipo_kit, "sop");
        assert_eq!(first.cantidad_herramientas, 2);
        assert!(first.herramientas.iter().all(|h| h.nota.as_deref() == Some("Kit bano")));
        assert!(first.herramientas.iter().any(|h| h.nombre == "Atomizador"));

        let general = list(
            &conn,
            KitListParams {
                nivel: Some("general".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(general.pagination.total, 1);
        assert_eq!(general.kits[0].kit_id, "KT-TL-001");

        let media = list(
            &conn,
            KitListParams {
                nivel: Some("2".into()),
                fraccion: Some("tl".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(media.kits[0].kit_id, "KT-TL-002");
    }

    #[tokio::test]
    async fn list_filters_by_fraccion_codigo() {
        let (_dir, conn) = temp_db().await;
        let (fraccion_tl, herramientas) = seed(&conn).await;
        let fraccion_ba = fraccion_service::create(
            &conn,
            &FraccionCreateDto {
                codigo: "BA".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        create(&conn, &kit_dto(&fraccion_tl, None, &herramientas[..1])).await.unwrap();
        create(&conn, &kit_dto(&fraccion_tl, Some(1), &herramientas[1..])).await.unwrap();
        let barrer = KitCreateDto {
            codigo: "ba".into(),
            ..kit_dto(&fraccion_ba.fraccion_id, None, &herramientas[..1])
        };
        assert_eq!(create(&conn, &barrer).await.unwrap().kit_id, "KT-BA-001");

        let por_codigo = |codigo: &str| KitListParams {
            fraccion: Some(codigo.to_string()),
            ..Default::default()
        };
        let tl = list(&conn, por_codigo("TL")).await.unwrap();
        assert_eq!(tl.pagination.total, 2);
        assert!(tl.kits.iter().all(|k| k.codigo == "TL"));
        let ba = list(&conn, por_codigo(" ba ")).await.unwrap();
        assert_eq!(ba.pagination.total, 1);
        assert_eq!(ba.kits[0].kit_id, "KT-BA-001");

        let err = list(&conn, por_codigo("T_")).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn create_checks_references() {
        let (_dir, conn) = temp_db().await;
        let (fraccion_id, herramientas) = seed(&conn).await;

        let err = create(&conn, &kit_dto("FR-TL-099", None, &herramientas)).await.unwrap_err();
        assert_eq!(err.to_string(), "Fraccion FR-TL-099 no encontrada");

        let err = create(&conn, &kit_dto(&fraccion_id, None, &["HE-XX-001".to_string()]))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Herramienta HE-XX-001 no encontrada"));

        let err = create(&conn, &kit_dto(&fraccion_id, Some(7), &herramientas)).await.unwrap_err();
        assert_eq!(err.to_string(), "Nivel debe ser 1, 2, 3, 4 o null");

        let err = create(&conn, &kit_dto(&fraccion_id, None, &[])).await.unwrap_err();
        assert_eq!(err.to_string(), "Debe seleccionar al menos 1 herramienta");
    }

    #[tokio::test]
    async fn update_replaces_detalles_and_delete_cleans_up() {
        let (_dir, conn) = temp_db().await;
        let (fraccion_id, herramientas) = seed(&conn).await;
        let kit = create(&conn, &kit_dto(&fraccion_id, None, &herramientas)).await.unwrap();

        let dto = KitUpdateDto {
            nombre: "Kit WC".into(),
            nivel_limpieza_id: Some(1),
            herramientas: vec![herramientas[0].clone()],
        };
        let updated = update(&conn, &kit.kit_id, &dto).await.unwrap();
        assert_eq!(updated.herramientas, vec![herramientas[0].clone()]);
        assert_eq!(repository::count_detalles_de_herramienta(&conn, &herramientas[1]).await.unwrap(), 0);

        let desactivar = HerramientaUpdateDto {
            nombre: "Atomizador".into(),
            descripcion: "Atomizador".into(),
            estatus: "Inactivo".into(),
        };
        herramienta_service::update(&conn, &herramientas[1], &desactivar).await.unwrap();
        let disponibles = herramientas_disponibles(&conn, None).await.unwrap();
        assert_eq!(disponibles.len(), 2);
        let cepillos = herramientas_disponibles(&conn, Some("ce")).await.unwrap();
        assert!(cepillos.iter().all(|h| h.grupo == "CE"));
        assert!(herramientas_disponibles(&conn, Some("c%")).await.is_err());

        delete(&conn, &kit.kit_id).await.unwrap();
        assert!(repository::get_by_id(&conn, &kit.kit_id).await.unwrap().is_none());
        assert_eq!(repository::count_detalles_de_herramienta(&conn, &herramientas[0]).await.unwrap(), 0);
        assert!(matches!(delete(&conn, &kit.kit_id).await.unwrap_err(), ApiError::NotFound(_)));
    }
}
