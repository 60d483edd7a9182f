//! Ссылки из таблиц подсистемы SOP на каталоги.
//!
//! Эти таблицы не имеют своих сущностей в этом сервисе, поэтому считаются сырым SQL.

use sea_orm::{ConnectionTrait, DatabaseBackend, DbErr, Statement};

async fn count_where<C>(db: &C, table: &str, column: &str, value: &str) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
{
    let sql = format!("SELECT COUNT(*) AS n FROM {} WHERE {} = ?", table, column);
    let row = db
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &sql,
            [value.into()],
        ))
        .await?;
    let n: i64 = match row {
        Some(row) => row.try_get("", "n")?,
        None => 0,
    };
    Ok(n.max(0) as u64)
}

/// Сколько наборов элементов ссылаются на элемент
pub async fn elemento_detalles<C: ConnectionTrait>(db: &C, elemento_id: &str) -> Result<u64, DbErr> {
    count_where(db, "elemento_detalle", "elemento_id", elemento_id).await
}

/// Сколько SOP используют фракцию
pub async fn sop_fracciones<C: ConnectionTrait>(db: &C, fraccion_id: &str) -> Result<u64, DbErr> {
    count_where(db, "sop_fraccion", "fraccion_id", fraccion_id).await
}

pub async fn elemento_sets<C: ConnectionTrait>(db: &C, fraccion_id: &str) -> Result<u64, DbErr> {
    count_where(db, "elemento_set", "fraccion_id", fraccion_id).await
}

/// Сколько строк SOP событий ссылаются на фракцию события
pub async fn sop_evento_detalles<C: ConnectionTrait>(
    db: &C,
    fraccion_evento_id: &str,
) -> Result<u64, DbErr> {
    count_where(db, "sop_evento_detalle", "fraccion_evento_id", fraccion_evento_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support::temp_db;

    #[tokio::test]
    async fn counts_rows_by_reference() {
        let (_dir, conn) = temp_db().await;
        assert_eq!(sop_fracciones(&conn, "FR-TL-001").await.unwrap(), 0);

        conn.execute_unprepared(
            "INSERT INTO sop_fraccion (sop_fraccion_id, sop_id, fraccion_id) VALUES \
             ('SF-1', 'SP-1', 'FR-TL-001'), ('SF-2', 'SP-2', 'FR-TL-001')",
        )
        .await
        .unwrap();
        assert_eq!(sop_fracciones(&conn, "FR-TL-001").await.unwrap(), 2);
        assert_eq!(elemento_sets(&conn, "FR-TL-001").await.unwrap(), 0);
    }
}
