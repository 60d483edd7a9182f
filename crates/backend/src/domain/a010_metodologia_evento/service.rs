use super::repository;
use crate::domain::a007_evento::repository as evento_repository;
use crate::domain::a009_fraccion_evento::repository as fraccion_repository;
use crate::shared::api_error::{ApiError, ApiResult};
use contracts::domain::a010_metodologia_evento::aggregate::{
    FraccionEventoRef, GuardarPasosEventoDto, GuardarPasosEventoResponse,
    MetodologiaEventoResponse,
};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

/// Методология события вместе с фракцией и событием
pub async fn get<C: ConnectionTrait>(db: &C, id: &str) -> ApiResult<MetodologiaEventoResponse> {
    let metodologia = repository::get_by_id(db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Metodologia no encontrada"))?;

    let fraccion = fraccion_repository::get_by_id(db, &metodologia.fraccion_evento_id).await?;
    let evento = match &fraccion {
        Some(f) => evento_repository::get_evento(db, &f.evento_tipo_id).await?,
        None => None,
    };

    Ok(MetodologiaEventoResponse {
        success: true,
        metodologia,
        fraccion: fraccion.map(|f| FraccionEventoRef {
            fraccion_evento_id: f.fraccion_evento_id,
            nombre: f.nombre,
            descripcion: f.descripcion,
            evento_tipo_id: f.evento_tipo_id,
        }),
        evento: evento.map(Into::into),
    })
}

/// Полная замена шагов методологии
pub async fn guardar_pasos(
    db: &DatabaseConnection,
    id: &str,
    dto: &GuardarPasosEventoDto,
) -> ApiResult<GuardarPasosEventoResponse> {
    if repository::get_by_id(db, id).await?.is_none() {
        return Err(ApiError::not_found("Metodologia no encontrada"));
    }
    dto.validate()?;
    let pasos = dto.normalized();

    let txn = db.begin().await?;
    repository::replace_pasos(&txn, id, &pasos).await?;
    txn.commit().await?;

    tracing::info!("Metodologia evento {} saved with {} pasos", id, pasos.len());
    Ok(GuardarPasosEventoResponse {
        success: true,
        metodologia_fraccion_id: id.to_string(),
        total_pasos: pasos.len(),
        message: format!("Metodologia {} guardada correctamente", id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a007_evento::service as evento_service;
    use crate::domain::a009_fraccion_evento::service as fraccion_service;
    use crate::shared::data::db::test_support::temp_db;
    use contracts::domain::a009_fraccion_evento::aggregate::FraccionEventoCreateDto;
    use contracts::domain::a010_metodologia_evento::aggregate::PasoEvento;

    async fn seed(conn: &DatabaseConnection) -> String {
        evento_service::insert_test_data(conn).await.unwrap();
        fraccion_service::create(
            conn,
            &FraccionEventoCreateDto {
                evento_tipo_id: "EV-IN".into(),
                codigo: "VO".into(),
                nombre: "Vomito".into(),
                descripcion: String::new(),
            },
        )
        .await
        .unwrap()
        .metodologia_id
        .unwrap()
    }

    fn paso(numero_paso: i32, descripcion: &str) -> PasoEvento {
        PasoEvento {
            numero_paso,
            descripcion: descripcion.into(),
        }
    }

    #[tokio::test]
    async fn get_includes_fraccion_and_evento() {
        let (_dir, conn) = temp_db().await;
        let id = seed(&conn).await;

        let response = get(&conn, &id).await.unwrap();
        assert_eq!(response.metodologia.nombre, "Metodologia de Vomito");
        assert!(response.metodologia.pasos.is_empty());
        assert_eq!(response.fraccion.unwrap().fraccion_evento_id, "FR-IN-VO-001");
        assert_eq!(response.evento.unwrap().nombre, "Incidente");

        let err = get(&conn, "ME-IN-VO-999").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn guardar_pasos_replaces_steps() {
        let (_dir, conn) = temp_db().await;
        let id = seed(&conn).await;

        let err = guardar_pasos(&conn, &id, &GuardarPasosEventoDto::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Debe haber al menos 1 paso");

        let dto = GuardarPasosEventoDto {
            pasos: vec![paso(1, "Aislar"), paso(2, "Absorber"), paso(3, "Desinfectar")],
        };
        guardar_pasos(&conn, &id, &dto).await.unwrap();

        let dto = GuardarPasosEventoDto {
            pasos: vec![paso(5, " Desinfectar "), paso(2, "Aislar")],
        };
        let saved = guardar_pasos(&conn, &id, &dto).await.unwrap();
        assert_eq!(saved.total_pasos, 2);
        assert_eq!(saved.message, format!("Metodologia {} guardada correctamente", id));

        let pasos = get(&conn, &id).await.unwrap().metodologia.pasos;
        assert_eq!(pasos, vec![paso(1, "Aislar"), paso(2, "Desinfectar")]);
    }
}
