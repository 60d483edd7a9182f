use super::repository;
use crate::domain::a005_metodologia::repository as metodologia_repository;
use crate::domain::a006_kit::repository as kit_repository;
use crate::shared::api_error::{ApiError, ApiResult};
use crate::shared::data::references;
use contracts::domain::a004_fraccion::aggregate::{
    es_primera_id, validate_custom, validate_grupo, Fraccion, FraccionCatalogos, FraccionCreateDto,
    FraccionEnUso, FraccionListItem, FraccionListResponse, FraccionNextIdResponse,
    FraccionUpdateDto, FraccionView, GLOSARIO_FRACCIONES, GRUPOS_FRACCIONES, PER_PAGE_DEFAULT,
    PREFIJO,
};
use contracts::domain::common::catalog_id;
use contracts::domain::common::nivel_limpieza::niveles_display;
use contracts::shared::api::glosario_items;
use contracts::shared::paging::{PageInfo, PageRequest};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

#[derive(Debug, Clone, Default)]
pub struct FraccionListParams {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub grupo: Option<String>,
}

/// Глоссарий кодов и группы фракций
pub async fn catalogos<C: ConnectionTrait>(db: &C) -> ApiResult<FraccionCatalogos> {
    let mut grupos_fracciones = repository::distinct_grupos(db).await?;
    if grupos_fracciones.is_empty() {
        grupos_fracciones = GRUPOS_FRACCIONES.iter().map(|g| g.to_string()).collect();
    }
    Ok(FraccionCatalogos {
        success: true,
        grupos: glosario_items(GLOSARIO_FRACCIONES),
        grupos_fracciones,
    })
}

/// Следующий id кода и сведения о соседях для правила nombre_custom
pub async fn next_id<C: ConnectionTrait>(db: &C, codigo: Option<&str>) -> ApiResult<FraccionNextIdResponse> {
    let codigo = codigo.unwrap_or_default().trim().to_uppercase();
    catalog_id::validate_codigo(&codigo, "Codigo")?;

    let hermanas = repository::list_by_codigo(db, &codigo).await?;
    let (fraccion_id, numero) = catalog_id::next_id(
        &[PREFIJO, codigo.as_str()],
        hermanas.iter().map(|f| f.fraccion_id.as_str()),
    );

    Ok(FraccionNextIdResponse {
        success: true,
        fraccion_id,
        numero,
        es_primera: hermanas.is_empty(),
        customs_existentes: customs(&hermanas),
        codigo,
    })
}

fn customs(hermanas: &[Fraccion]) -> Vec<String> {
    hermanas
        .iter()
        .filter_map(|f| f.nombre_custom.clone())
        .filter(|c| !c.trim().is_empty())
        .collect()
}

pub async fn list<C: ConnectionTrait>(db: &C, params: FraccionListParams) -> ApiResult<FraccionListResponse> {
    let page = PageRequest::new(params.page, params.per_page, PER_PAGE_DEFAULT);
    let grupo = params.grupo.filter(|g| !g.is_empty());
    let (items, total) =
        repository::list_paginated(db, grupo.as_deref(), page.per_page, page.offset()).await?;

    let ids: Vec<String> = items.iter().map(|f| f.fraccion_id.clone()).collect();
    let mut niveles = metodologia_repository::niveles_por_fraccion(db, &ids).await?;

    let fracciones = items
        .into_iter()
        .map(|f| {
            let niveles = niveles.remove(&f.fraccion_id).unwrap_or_default();
            FraccionListItem {
                codigo: f.codigo(),
                nombre_full: f.nombre_full(),
                niveles_display: niveles_display(&niveles),
                niveles,
                fraccion_id: f.fraccion_id,
                fraccion_nombre: f.fraccion_nombre,
                nombre_custom: f.nombre_custom,
                nota_tecnica: f.nota_tecnica,
                grupo_fracciones: f.grupo_fracciones,
            }
        })
        .collect();

    Ok(FraccionListResponse {
        success: true,
        fracciones,
        pagination: PageInfo::new(page, total),
    })
}

/// Создание фракции по коду глоссария
pub async fn create<C: ConnectionTrait>(db: &C, dto: &FraccionCreateDto) -> ApiResult<FraccionView> {
    let base = dto.validate()?;
    let codigo = dto.codigo();
    let nombre_custom = dto.nombre_custom();

    let hermanas = repository::list_by_codigo(db, &codigo).await?;
    let es_primera = hermanas.is_empty();
    validate_custom(es_primera, nombre_custom.as_deref(), base, &customs(&hermanas))?;

    let (fraccion_id, _) = catalog_id::next_id(
        &[PREFIJO, codigo.as_str()],
        hermanas.iter().map(|f| f.fraccion_id.as_str()),
    );
    let fraccion = Fraccion {
        fraccion_id,
        fraccion_nombre: base.to_string(),
        nombre_custom,
        nota_tecnica: dto.nota_tecnica(),
        grupo_fracciones: dto.grupo_fracciones(),
    };
    repository::insert(db, &fraccion).await?;
    tracing::info!("Fraccion {} created", fraccion.fraccion_id);

    let mut view = FraccionView::from(fraccion);
    view.es_primera = Some(es_primera);
    Ok(view)
}

pub async fn update<C: ConnectionTrait>(db: &C, id: &str, dto: &FraccionUpdateDto) -> ApiResult<FraccionView> {
    let mut fraccion = repository::get_by_id(db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Fraccion no encontrada"))?;

    let grupo = dto.grupo_fracciones();
    validate_grupo(grupo.as_deref())?;

    let nombre_custom = dto.nombre_custom();
    let otras: Vec<Fraccion> = repository::list_by_codigo(db, &fraccion.codigo())
        .await?
        .into_iter()
        .filter(|f| f.fraccion_id != fraccion.fraccion_id)
        .collect();
    validate_custom(
        es_primera_id(&fraccion.fraccion_id),
        nombre_custom.as_deref(),
        &fraccion.fraccion_nombre,
        &customs(&otras),
    )?;

    fraccion.nombre_custom = nombre_custom;
    fraccion.nota_tecnica = dto.nota_tecnica();
    fraccion.grupo_fracciones = grupo;
    repository::update(db, &fraccion).await?;

    tracing::info!("Fraccion {} updated", id);
    Ok(fraccion.into())
}

/// Ссылки на фракцию из SOP, наборов элементов и китов
pub async fn en_uso<C: ConnectionTrait>(db: &C, id: &str) -> ApiResult<FraccionEnUso> {
    Ok(FraccionEnUso {
        sops: references::sop_fracciones(db, id).await?,
        elemento_sets: references::elemento_sets(db, id).await?,
        kits: kit_repository::count_kits_de_fraccion(db, id).await?,
    })
}

/// Удаление фракции вместе с методологиями, которые больше никем не используются.
///
/// Возвращает id удалённых базовых методологий.
pub async fn delete(db: &DatabaseConnection, id: &str) -> ApiResult<Vec<String>> {
    if repository::get_by_id(db, id).await?.is_none() {
        return Err(ApiError::not_found("Fraccion no encontrada"));
    }

    let uso = en_uso(db, id).await?;
    if uso.en_uso() {
        return Err(ApiError::InUse {
            message: "No se puede eliminar. La fraccion esta en uso.".into(),
            detalles: serde_json::to_value(uso).map_err(anyhow::Error::from)?,
        });
    }

    let txn = db.begin().await?;
    let links = metodologia_repository::links_of_fraccion(&txn, id).await?;
    metodologia_repository::delete_links_of_fraccion(&txn, id).await?;

    let mut borradas: Vec<String> = Vec::new();
    for (_, base_id) in links {
        if borradas.contains(&base_id) {
            continue;
        }
        if metodologia_repository::count_links_to_base(&txn, &base_id).await? == 0 {
            metodologia_repository::delete_base(&txn, &base_id).await?;
            borradas.push(base_id);
        }
    }
    repository::delete(&txn, id).await?;
    txn.commit().await?;

    tracing::info!("Fraccion {} deleted with {} metodologias", id, borradas.len());
    Ok(borradas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support::temp_db;

    fn nueva(codigo: &str, custom: &str) -> FraccionCreateDto {
        FraccionCreateDto {
            codigo: codigo.into(),
            nombre_custom: custom.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn first_fraccion_has_no_custom_and_later_ones_need_one() {
        let (_dir, conn) = temp_db().await;

        let err = create(&conn, &nueva("BA", "Pasillos")).await.unwrap_err();
        assert_eq!(err.to_string(), "La primera fraccion no debe tener nombre custom");

        let first = create(&conn, &nueva("ba", "")).await.unwrap();
        assert_eq!(first.fraccion_id, "FR-BA-001");
        assert_eq!(first.nombre_full, "Barrer");
        assert_eq!(first.es_primera, Some(true));

        let err = create(&conn, &nueva("BA", "")).await.unwrap_err();
        assert_eq!(err.to_string(), "Este codigo ya existe. Debes agregar un nombre custom");
        let err = create(&conn, &nueva("BA", "barrer")).await.unwrap_err();
        assert_eq!(err.to_string(), "El nombre custom no puede ser igual al nombre base");

        let second = create(&conn, &nueva("BA", "Pasillos")).await.unwrap();
        assert_eq!(second.fraccion_id, "FR-BA-002");
        assert_eq!(second.nombre_full, "Barrer - Pasillos");
        assert_eq!(second.es_primera, Some(false));

        let err = create(&conn, &nueva("BA", "PASILLOS")).await.unwrap_err();
        assert_eq!(err.to_string(), "Ya existe otra fraccion con el custom 'PASILLOS'");

        let next = next_id(&conn, Some("ba")).await.unwrap();
        assert_eq!(next.fraccion_id, "FR-BA-003");
        assert!(!next.es_primera);
        assert_eq!(next.customs_existentes, vec!["Pasillos".to_string()]);
    }

    #[tokio::test]
    async fn catalogos_fall_back_to_default_groups() {
        let (_dir, conn) = temp_db().await;
        let c = catalogos(&conn).await.unwrap();
        assert_eq!(c.grupos_fracciones, vec!["administracion", "produccion"]);
        assert_eq!(c.grupos.len(), 13);

        let dto = FraccionCreateDto {
            codigo: "TL".into(),
            grupo_fracciones: "produccion".into(),
            ..Default::default()
        };
        create(&conn, &dto).await.unwrap();
        let c = catalogos(&conn).await.unwrap();
        assert_eq!(c.grupos_fracciones, vec!["produccion"]);
    }

    #[tokio::test]
    async fn update_validates_group_and_missing_id() {
        let (_dir, conn) = temp_db().await;
        let f = create(&conn, &nueva("VI", "")).await.unwrap();

        let bad = FraccionUpdateDto {
            grupo_fracciones: "oficinas".into(),
            ..Default::default()
        };
        assert!(update(&conn, &f.fraccion_id, &bad).await.is_err());

        let ok = FraccionUpdateDto {
            nota_tecnica: "Usar paño".into(),
            grupo_fracciones: "administracion".into(),
            ..Default::default()
        };
        let updated = update(&conn, &f.fraccion_id, &ok).await.unwrap();
        assert_eq!(updated.nota_tecnica.as_deref(), Some("Usar paño"));

        let err = update(&conn, "FR-VI-099", &ok).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_keeps_custom_name_rules() {
        let (_dir, conn) = temp_db().await;
        let first = create(&conn, &nueva("TL", "")).await.unwrap();
        create(&conn, &nueva("TL", "Pasillos")).await.unwrap();
        let third = create(&conn, &nueva("TL", "Oficinas")).await.unwrap();

        let con_custom = |custom: &str| FraccionUpdateDto {
            nombre_custom: custom.into(),
            ..Default::default()
        };

        let err = update(&conn, &third.fraccion_id, &con_custom("PASILLOS")).await.unwrap_err();
        assert_eq!(err.to_string(), "Ya existe otra fraccion con el custom 'PASILLOS'");
        let err = update(&conn, &third.fraccion_id, &con_custom("tallar bano")).await.unwrap_err();
        assert_eq!(err.to_string(), "El nombre custom no puede ser igual al nombre base");
        let err = update(&conn, &third.fraccion_id, &con_custom(" ")).await.unwrap_err();
        assert_eq!(err.to_string(), "Este codigo ya existe. Debes agregar un nombre custom");

        let err = update(&conn, &first.fraccion_id, &con_custom("Tallar Bano")).await.unwrap_err();
        assert_eq!(err.to_string(), "La primera fraccion no debe tener nombre custom");

        let same = update(&conn, &third.fraccion_id, &con_custom("oficinas")).await.unwrap();
        assert_eq!(same.nombre_full, "Tallar Bano - oficinas");
        let renamed = update(&conn, &third.fraccion_id, &con_custom("Recepcion")).await.unwrap();
        assert_eq!(renamed.nombre_full, "Tallar Bano - Recepcion");
        let untouched = update(&conn, &first.fraccion_id, &con_custom("")).await.unwrap();
        assert_eq!(untouched.nombre_full, "Tallar Bano");
    }

    #[tokio::test]
    async fn delete_reports_usage_details() {
        let (_dir, conn) = temp_db().await;
        let f = create(&conn, &nueva("TR", "")).await.unwrap();
        conn.execute_unprepared(
            "INSERT INTO sop_fraccion (sop_fraccion_id, sop_id, fraccion_id) VALUES ('SF-1', 'SP-1', 'FR-TR-001')",
        )
        .await
        .unwrap();

        match delete(&conn, &f.fraccion_id).await.unwrap_err() {
            ApiError::InUse { message, detalles } => {
                assert_eq!(message, "No se puede eliminar. La fraccion esta en uso.");
                assert_eq!(detalles, serde_json::json!({"sops": 1, "elemento_sets": 0, "kits": 0}));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn delete_removes_unshared_methodologies() {
        let (_dir, conn) = temp_db().await;
        let f = create(&conn, &nueva("MS", "")).await.unwrap();
        let other = create(&conn, &nueva("MS", "Pasillo")).await.unwrap();

        metodologia_repository::ensure_base(&conn, "MB-MS-001-B", "Mop Seco-B", "Mop Seco").await.unwrap();
        metodologia_repository::ensure_base(&conn, "MB-SHARED", "x", "x").await.unwrap();
        metodologia_repository::upsert_link(&conn, &f.fraccion_id, 1, "MB-MS-001-B").await.unwrap();
        metodologia_repository::upsert_link(&conn, &f.fraccion_id, 2, "MB-SHARED").await.unwrap();
        metodologia_repository::upsert_link(&conn, &other.fraccion_id, 2, "MB-SHARED").await.unwrap();

        let borradas = delete(&conn, &f.fraccion_id).await.unwrap();
        assert_eq!(borradas, vec!["MB-MS-001-B".to_string()]);
        assert!(metodologia_repository::get_base(&conn, "MB-MS-001-B").await.unwrap().is_none());
        assert!(metodologia_repository::get_base(&conn, "MB-SHARED").await.unwrap().is_some());
        assert!(repository::get_by_id(&conn, &f.fraccion_id).await.unwrap().is_none());

        let restantes = list(&conn, FraccionListParams::default()).await.unwrap();
        assert_eq!(restantes.pagination.total, 1);
        assert_eq!(restantes.fracciones[0].niveles, vec![2]);
        assert_eq!(restantes.fracciones[0].niveles_display, "M");
    }
}
