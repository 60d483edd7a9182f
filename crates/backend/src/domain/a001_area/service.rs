use super::repository;
use contracts::domain::a001_area::aggregate::{Area, AreaOption, SubArea, SubAreaOption};
use sea_orm::{ConnectionTrait, DbErr};
use std::collections::HashMap;

/// Зоны для выпадающих списков
pub async fn area_options<C: ConnectionTrait>(db: &C) -> Result<Vec<AreaOption>, DbErr> {
    Ok(repository::list_areas(db)
        .await?
        .into_iter()
        .map(|a| AreaOption {
            area_id: a.area_id,
            nombre: a.area_nombre,
        })
        .collect())
}

/// Подзоны с названием своей зоны, упорядоченные как зоны, затем по `orden_subarea`
pub async fn subarea_options<C: ConnectionTrait>(db: &C) -> Result<Vec<SubAreaOption>, DbErr> {
    let areas = repository::list_areas(db).await?;
    let orden: HashMap<&str, (usize, &str)> = areas
        .iter()
        .enumerate()
        .map(|(i, a)| (a.area_id.as_str(), (i, a.area_nombre.as_str())))
        .collect();

    let mut subareas = repository::list_subareas(db).await?;
    subareas.sort_by_key(|s| {
        let idx = orden.get(s.area_id.as_str()).map(|(i, _)| *i).unwrap_or(usize::MAX);
        (idx, s.orden_subarea)
    });

    Ok(subareas
        .into_iter()
        .map(|s| SubAreaOption {
            area_nombre: orden
                .get(s.area_id.as_str())
                .map(|(_, n)| n.to_string())
                .unwrap_or_default(),
            subarea_id: s.subarea_id,
            nombre: s.subarea_nombre,
            area_id: s.area_id,
        })
        .collect())
}

/// Вставка тестовых данных
pub async fn insert_test_data<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let areas = [
        ("AD-DI", "Direccion", 1),
        ("AD-RH", "Recursos Humanos", 2),
        ("PR-PL", "Planta", 3),
    ];
    let subareas = [
        ("AD-DI-OF-01", "AD-DI", "Oficina 01", 1),
        ("AD-DI-SA-01", "AD-DI", "Sala Juntas 01", 2),
        ("AD-DI-OF-02", "AD-DI", "Oficina 02", 3),
        ("AD-RH-OF-01", "AD-RH", "Oficina RH", 1),
        ("AD-RH-BA-01", "AD-RH", "Bano RH", 2),
        ("PR-PL-CO-01", "PR-PL", "Comedor", 1),
    ];

    for (area_id, nombre, orden) in areas {
        repository::upsert_area(
            db,
            &Area {
                area_id: area_id.into(),
                area_nombre: nombre.into(),
                orden_area: orden,
            },
        )
        .await?;
    }
    for (subarea_id, area_id, nombre, orden) in subareas {
        repository::upsert_subarea(
            db,
            &SubArea {
                subarea_id: subarea_id.into(),
                area_id: area_id.into(),
                subarea_nombre: nombre.into(),
                orden_subarea: orden,
            },
        )
        .await?;
    }
    tracing::info!("Inserted {} areas and {} subareas", areas.len(), subareas.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support::temp_db;

    #[tokio::test]
    async fn subareas_follow_area_order() {
        let (_dir, conn) = temp_db().await;
        insert_test_data(&conn).await.unwrap();
        insert_test_data(&conn).await.unwrap();

        let areas = area_options(&conn).await.unwrap();
        assert_eq!(areas.len(), 3);
        assert_eq!(areas[0].nombre, "Direccion");

        let subareas = subarea_options(&conn).await.unwrap();
        assert_eq!(subareas.len(), 6);
        assert_eq!(subareas[0].subarea_id, "AD-DI-OF-01");
        assert_eq!(subareas[0].area_nombre, "Direccion");
        assert_eq!(subareas[3].area_id, "AD-RH");
        assert_eq!(subareas[5].area_nombre, "Planta");
    }
}
