use super::repository;
use contracts::domain::a007_evento::aggregate::{CasoCatalogo, EventoCatalogo};
use sea_orm::{ConnectionTrait, DbErr};

pub async fn eventos<C: ConnectionTrait>(db: &C) -> Result<Vec<EventoCatalogo>, DbErr> {
    repository::list_eventos(db).await
}

/// Случаи события; пустой фильтр отдаёт все
pub async fn casos<C: ConnectionTrait>(
    db: &C,
    evento_tipo_id: Option<&str>,
) -> Result<Vec<CasoCatalogo>, DbErr> {
    let evento_tipo_id = evento_tipo_id.map(str::trim).filter(|e| !e.is_empty());
    repository::list_casos(db, evento_tipo_id).await
}

/// Вставка тестовых событий и случаев
pub async fn insert_test_data<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let eventos = [
        ("EV-IN", "Incidente", "Incidentes durante la operacion"),
        ("EV-EM", "Emergencia sanitaria", "Contingencias sanitarias"),
    ];
    let casos = [
        ("CA-IN-DE", "EV-IN", "Derrame", "Derrame de liquidos"),
        ("CA-IN-VO", "EV-IN", "Vomito", "Fluidos corporales"),
        ("CA-EM-IN", "EV-EM", "Inundacion", "Agua acumulada"),
    ];

    for (id, nombre, descripcion) in eventos {
        repository::upsert_evento(
            db,
            &EventoCatalogo {
                evento_tipo_id: id.into(),
                nombre: nombre.into(),
                descripcion: Some(descripcion.into()),
            },
        )
        .await?;
    }
    for (id, evento, nombre, descripcion) in casos {
        repository::upsert_caso(
            db,
            &CasoCatalogo {
                caso_id: id.into(),
                evento_tipo_id: evento.into(),
                nombre: nombre.into(),
                descripcion: Some(descripcion.into()),
            },
        )
        .await?;
    }
    tracing::info!("Inserted {} eventos and {} casos", eventos.len(), casos.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support::temp_db;

    #[tokio::test]
    async fn casos_filter_by_evento() {
        let (_dir, conn) = temp_db().await;
        insert_test_data(&conn).await.unwrap();

        let todos = eventos(&conn).await.unwrap();
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].evento_tipo_id, "EV-EM");
        assert_eq!(todos[0].codigo(), Some("EM"));

        assert_eq!(casos(&conn, None).await.unwrap().len(), 3);
        assert_eq!(casos(&conn, Some(" ")).await.unwrap().len(), 3);
        let incidentes = casos(&conn, Some("EV-IN")).await.unwrap();
        assert_eq!(incidentes.len(), 2);
        assert_eq!(incidentes[0].codigo(), Some("DE"));
    }
}
