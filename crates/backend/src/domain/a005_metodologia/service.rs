use super::repository;
use crate::domain::a004_fraccion::repository as fraccion_repository;
use crate::shared::api_error::{ApiError, ApiResult};
use contracts::domain::a004_fraccion::aggregate::Fraccion;
use contracts::domain::a005_metodologia::aggregate::{
    metodologia_base_id, metodologia_nombre, FraccionMetodologias, FraccionResumen,
    GuardarPasosDto, GuardarPasosResponse,
};
use contracts::domain::common::NivelLimpieza;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use std::collections::BTreeMap;

async fn fraccion_o_404<C: ConnectionTrait>(db: &C, fraccion_id: &str) -> ApiResult<Fraccion> {
    fraccion_repository::get_by_id(db, fraccion_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Fraccion no encontrada"))
}

/// Методологии фракции по всем четырём уровням
pub async fn get_metodologias<C: ConnectionTrait>(db: &C, fraccion_id: &str) -> ApiResult<FraccionMetodologias> {
    let fraccion = fraccion_o_404(db, fraccion_id).await?;

    let mut metodologias = BTreeMap::new();
    for nivel in NivelLimpieza::ALL {
        metodologias.insert(nivel.id().to_string(), None);
    }
    for (nivel, base_id) in repository::links_of_fraccion(db, fraccion_id).await? {
        if let Some(base) = repository::get_base(db, &base_id).await? {
            metodologias.insert(nivel.to_string(), Some(base));
        }
    }

    Ok(FraccionMetodologias {
        success: true,
        fraccion: FraccionResumen {
            codigo: fraccion.codigo(),
            nombre_full: fraccion.nombre_full(),
            fraccion_id: fraccion.fraccion_id,
            fraccion_nombre: fraccion.fraccion_nombre,
            nombre_custom: fraccion.nombre_custom,
        },
        metodologias,
    })
}

/// Сохранение шагов одного уровня: методология создаётся при необходимости,
/// шаги заменяются целиком, связь с уровнем обновляется
pub async fn guardar_nivel(
    db: &DatabaseConnection,
    fraccion_id: &str,
    nivel: i32,
    dto: &GuardarPasosDto,
) -> ApiResult<GuardarPasosResponse> {
    let fraccion = fraccion_o_404(db, fraccion_id).await?;
    let nivel = NivelLimpieza::try_from(nivel)?;
    dto.validate()?;

    let base_id = metodologia_base_id(&fraccion.fraccion_id, nivel)?;
    let pasos = dto.normalized();

    let txn = db.begin().await?;
    let creada = repository::ensure_base(
        &txn,
        &base_id,
        &metodologia_nombre(&fraccion.fraccion_nombre, nivel),
        &fraccion.fraccion_nombre,
    )
    .await?;
    repository::replace_pasos(&txn, &base_id, &pasos).await?;
    repository::upsert_link(&txn, &fraccion.fraccion_id, nivel.id(), &base_id).await?;
    txn.commit().await?;

    if creada {
        tracing::info!("Metodologia {} created", base_id);
    }
    tracing::info!("Metodologia {} saved with {} pasos", base_id, pasos.len());

    Ok(GuardarPasosResponse {
        success: true,
        message: format!("Metodologia {} guardada correctamente", base_id),
        total_pasos: pasos.len(),
        metodologia_base_id: base_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a004_fraccion::service as fraccion_service;
    use contracts::domain::a004_fraccion::aggregate::FraccionCreateDto;
    use contracts::domain::a005_metodologia::aggregate::Paso;

    use crate::shared::data::db::test_support::temp_db;

    fn pasos(items: &[(i32, &str)]) -> GuardarPasosDto {
        GuardarPasosDto {
            pasos: items
                .iter()
                .map(|(orden, instruccion)| Paso {
                    orden: *orden,
                    instruccion: instruccion.to_string(),
                })
                .collect(),
        }
    }

    async fn fraccion(conn: &DatabaseConnection) -> String {
        let dto = FraccionCreateDto {
            codigo: "TL".into(),
            ..Default::default()
        };
        fraccion_service::create(conn, &dto).await.unwrap().fraccion_id
    }

    #[tokio::test]
    async fn save_creates_base_and_link() {
        let (_dir, conn) = temp_db().await;
        let id = fraccion(&conn).await;

        let r = guardar_nivel(&conn, &id, 2, &pasos(&[(2, " Enjuagar "), (1, "Tallar")]))
            .await
            .unwrap();
        assert_eq!(r.metodologia_base_id, "MB-TL-001-M");
        assert_eq!(r.total_pasos, 2);
        assert_eq!(r.message, "Metodologia MB-TL-001-M guardada correctamente");

        let view = get_metodologias(&conn, &id).await.unwrap();
        assert_eq!(view.metodologias.len(), 4);
        assert!(view.nivel(NivelLimpieza::Basica).is_none());
        let media = view.nivel(NivelLimpieza::Media).unwrap();
        assert_eq!(media.nombre, "Tallar Bano-M");
        assert_eq!(media.descripcion.as_deref(), Some("Tallar Bano"));
        assert_eq!(media.pasos[0].instruccion, "Tallar");
        assert_eq!(media.pasos[1].instruccion, "Enjuagar");
    }

    #[tokio::test]
    async fn save_replaces_existing_pasos() {
        let (_dir, conn) = temp_db().await;
        let id = fraccion(&conn).await;

        guardar_nivel(&conn, &id, 1, &pasos(&[(1, "a"), (2, "b"), (3, "c")])).await.unwrap();
        guardar_nivel(&conn, &id, 1, &pasos(&[(1, "solo")])).await.unwrap();

        let view = get_metodologias(&conn, &id).await.unwrap();
        let basica = view.nivel(NivelLimpieza::Basica).unwrap();
        assert_eq!(basica.pasos.len(), 1);
        assert_eq!(basica.pasos[0].instruccion, "solo");
    }

    #[tokio::test]
    async fn save_validates_input() {
        let (_dir, conn) = temp_db().await;
        let id = fraccion(&conn).await;

        let err = guardar_nivel(&conn, "FR-TL-404", 1, &pasos(&[(1, "x")])).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err = guardar_nivel(&conn, &id, 5, &pasos(&[(1, "x")])).await.unwrap_err();
        assert_eq!(err.to_string(), "Nivel invalido (1-4)");

        let err = guardar_nivel(&conn, &id, 1, &pasos(&[])).await.unwrap_err();
        assert_eq!(err.to_string(), "Debe haber al menos 1 paso");

        let err = guardar_nivel(&conn, &id, 1, &pasos(&[(1, "  ")])).await.unwrap_err();
        assert_eq!(err.to_string(), "Todos los pasos deben tener instruccion");
    }
}
