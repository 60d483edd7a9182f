use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

use contracts::domain::common::NivelLimpieza;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Таблицы каталогов: имя и DDL.
///
/// `elemento_set`, `elemento_detalle`, `sop_fraccion` и `sop_evento_detalle`
/// принадлежат подсистеме SOP; здесь создаётся только то, что нужно для
/// проверки ссылок при удалении.
const SCHEMA: &[(&str, &str)] = &[
    (
        "nivel_limpieza",
        r#"
        CREATE TABLE nivel_limpieza (
            nivel_limpieza_id INTEGER PRIMARY KEY NOT NULL,
            nombre TEXT NOT NULL UNIQUE
        );
        "#,
    ),
    (
        "a001_area",
        r#"
        CREATE TABLE a001_area (
            area_id TEXT PRIMARY KEY NOT NULL,
            area_nombre TEXT NOT NULL,
            orden_area INTEGER NOT NULL DEFAULT 1000
        );
        "#,
    ),
    (
        "a001_subarea",
        r#"
        CREATE TABLE a001_subarea (
            subarea_id TEXT PRIMARY KEY NOT NULL,
            area_id TEXT NOT NULL,
            subarea_nombre TEXT NOT NULL,
            orden_subarea INTEGER NOT NULL DEFAULT 1000
        );
        "#,
    ),
    (
        "a002_elemento",
        r#"
        CREATE TABLE a002_elemento (
            elemento_id TEXT PRIMARY KEY NOT NULL,
            subarea_id TEXT NOT NULL,
            nombre TEXT NOT NULL,
            descripcion TEXT,
            cantidad REAL,
            estatus TEXT
        );
        "#,
    ),
    (
        "a003_herramienta",
        r#"
        CREATE TABLE a003_herramienta (
            herramienta_id TEXT PRIMARY KEY NOT NULL,
            nombre TEXT NOT NULL,
            descripcion TEXT,
            estatus TEXT
        );
        "#,
    ),
    (
        "a004_fraccion",
        r#"
        CREATE TABLE a004_fraccion (
            fraccion_id TEXT PRIMARY KEY NOT NULL,
            fraccion_nombre TEXT NOT NULL,
            nombre_custom TEXT,
            nota_tecnica TEXT,
            grupo_fracciones TEXT
        );
        "#,
    ),
    (
        "a005_metodologia_base",
        r#"
        CREATE TABLE a005_metodologia_base (
            metodologia_base_id TEXT PRIMARY KEY NOT NULL,
            nombre TEXT,
            descripcion TEXT
        );
        "#,
    ),
    (
        "a005_metodologia_base_paso",
        r#"
        CREATE TABLE a005_metodologia_base_paso (
            metodologia_base_id TEXT NOT NULL,
            orden INTEGER NOT NULL,
            instruccion TEXT NOT NULL,
            PRIMARY KEY (metodologia_base_id, orden)
        );
        "#,
    ),
    (
        "a005_metodologia",
        r#"
        CREATE TABLE a005_metodologia (
            fraccion_id TEXT NOT NULL,
            nivel_limpieza_id INTEGER NOT NULL,
            metodologia_base_id TEXT NOT NULL,
            PRIMARY KEY (fraccion_id, nivel_limpieza_id)
        );
        "#,
    ),
    (
        "a006_kit",
        r#"
        CREATE TABLE a006_kit (
            kit_id TEXT PRIMARY KEY NOT NULL,
            fraccion_id TEXT,
            nivel_limpieza_id INTEGER,
            nombre TEXT NOT NULL,
            tipo_kit TEXT NOT NULL DEFAULT 'sop',
            caso_id TEXT
        );
        "#,
    ),
    (
        "a006_kit_detalle",
        r#"
        CREATE TABLE a006_kit_detalle (
            kit_id TEXT NOT NULL,
            herramienta_id TEXT NOT NULL,
            nota TEXT,
            PRIMARY KEY (kit_id, herramienta_id)
        );
        "#,
    ),
    (
        "a007_evento_catalogo",
        r#"
        CREATE TABLE a007_evento_catalogo (
            evento_tipo_id TEXT PRIMARY KEY NOT NULL,
            nombre TEXT NOT NULL,
            descripcion TEXT
        );
        "#,
    ),
    (
        "a007_caso_catalogo",
        r#"
        CREATE TABLE a007_caso_catalogo (
            caso_id TEXT PRIMARY KEY NOT NULL,
            evento_tipo_id TEXT NOT NULL,
            nombre TEXT NOT NULL,
            descripcion TEXT
        );
        "#,
    ),
    (
        "a009_fraccion_evento",
        r#"
        CREATE TABLE a009_fraccion_evento (
            fraccion_evento_id TEXT PRIMARY KEY NOT NULL,
            evento_tipo_id TEXT NOT NULL,
            nombre TEXT NOT NULL,
            descripcion TEXT
        );
        "#,
    ),
    (
        "a010_metodologia_evento",
        r#"
        CREATE TABLE a010_metodologia_evento (
            metodologia_fraccion_id TEXT PRIMARY KEY NOT NULL,
            fraccion_evento_id TEXT NOT NULL,
            nombre TEXT NOT NULL,
            descripcion TEXT
        );
        "#,
    ),
    (
        "a010_metodologia_evento_paso",
        r#"
        CREATE TABLE a010_metodologia_evento_paso (
            metodologia_fraccion_id TEXT NOT NULL,
            numero_paso INTEGER NOT NULL,
            descripcion TEXT NOT NULL,
            PRIMARY KEY (metodologia_fraccion_id, numero_paso)
        );
        "#,
    ),
    (
        "elemento_set",
        r#"
        CREATE TABLE elemento_set (
            elemento_set_id TEXT PRIMARY KEY NOT NULL,
            subarea_id TEXT,
            fraccion_id TEXT NOT NULL,
            nivel_limpieza_id INTEGER,
            nombre TEXT
        );
        "#,
    ),
    (
        "elemento_detalle",
        r#"
        CREATE TABLE elemento_detalle (
            elemento_set_id TEXT NOT NULL,
            elemento_id TEXT NOT NULL,
            kit_id TEXT,
            orden INTEGER NOT NULL DEFAULT 1000,
            PRIMARY KEY (elemento_set_id, elemento_id)
        );
        "#,
    ),
    (
        "sop_fraccion",
        r#"
        CREATE TABLE sop_fraccion (
            sop_fraccion_id TEXT PRIMARY KEY NOT NULL,
            sop_id TEXT NOT NULL,
            fraccion_id TEXT NOT NULL,
            orden INTEGER NOT NULL DEFAULT 1
        );
        "#,
    ),
    (
        "sop_evento_detalle",
        r#"
        CREATE TABLE sop_evento_detalle (
            sop_evento_detalle_id TEXT PRIMARY KEY NOT NULL,
            fraccion_evento_id TEXT NOT NULL
        );
        "#,
    ),
];

/// SQLite URL для sea-orm (в том числе для путей Windows)
pub fn build_sqlite_url(path: &Path) -> String {
    let normalized = path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

/// Открыть файл базы и привести схему к актуальной
pub async fn connect(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    let conn = Database::connect(build_sqlite_url(&absolute_path)).await?;
    bootstrap_schema(&conn).await?;
    Ok(conn)
}

async fn has_table(conn: &DatabaseConnection, table_name: &str) -> anyhow::Result<bool> {
    let existing = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type='table' AND name = ?",
            [table_name.into()],
        ))
        .await?;
    Ok(!existing.is_empty())
}

/// Создать недостающие таблицы и заполнить уровни уборки
pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for (table_name, create_sql) in SCHEMA {
        if !has_table(conn, table_name).await? {
            tracing::info!("Creating {} table", table_name);
            conn.execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                create_sql.to_string(),
            ))
            .await?;
        }
    }

    for nivel in NivelLimpieza::ALL {
        conn.execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT OR IGNORE INTO nivel_limpieza (nivel_limpieza_id, nombre) VALUES (?, ?)",
            [nivel.id().into(), nivel.nombre().into()],
        ))
        .await?;
    }

    Ok(())
}

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    tracing::info!("Opening database at {}", db_file.display());
    let conn = connect(db_file).await?;
    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

#[cfg(test)]
pub mod test_support {
    use super::*;

    /// Свежая файловая база во временном каталоге
    pub async fn temp_db() -> (tempfile::TempDir, DatabaseConnection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = connect(&dir.path().join("test.db")).await.unwrap();
        (dir, conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_adds_slash_for_drive_letters() {
        assert_eq!(
            build_sqlite_url(Path::new("/tmp/app.db")),
            "sqlite:///tmp/app.db?mode=rwc"
        );
        assert_eq!(
            build_sqlite_url(Path::new("C:\\data\\app.db")),
            "sqlite:///C:/data/app.db?mode=rwc"
        );
    }

    #[tokio::test]
    async fn bootstrap_is_idempotent_and_seeds_levels() {
        let (_dir, conn) = test_support::temp_db().await;
        bootstrap_schema(&conn).await.unwrap();

        assert!(has_table(&conn, "a006_kit_detalle").await.unwrap());
        assert!(!has_table(&conn, "a099_inexistente").await.unwrap());
        let row = conn
            .query_one(Statement::from_string(
                DatabaseBackend::Sqlite,
                "SELECT COUNT(*) AS n FROM nivel_limpieza".to_string(),
            ))
            .await
            .unwrap()
            .unwrap();
        let count: i64 = row.try_get("", "n").unwrap();
        assert_eq!(count, 4);
    }
}
