use contracts::domain::a001_area::aggregate::{Area, SubArea};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};

pub(crate) mod area {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a001_area")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub area_id: String,
        pub area_nombre: String,
        pub orden_area: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub(crate) mod subarea {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a001_subarea")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub subarea_id: String,
        pub area_id: String,
        pub subarea_nombre: String,
        pub orden_subarea: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl From<area::Model> for Area {
    fn from(m: area::Model) -> Self {
        Area {
            area_id: m.area_id,
            area_nombre: m.area_nombre,
            orden_area: m.orden_area,
        }
    }
}

impl From<subarea::Model> for SubArea {
    fn from(m: subarea::Model) -> Self {
        SubArea {
            subarea_id: m.subarea_id,
            area_id: m.area_id,
            subarea_nombre: m.subarea_nombre,
            orden_subarea: m.orden_subarea,
        }
    }
}

/// Зоны в порядке `orden_area`
pub async fn list_areas<C: ConnectionTrait>(db: &C) -> Result<Vec<Area>, DbErr> {
    let models = area::Entity::find()
        .order_by_asc(area::Column::OrdenArea)
        .order_by_asc(area::Column::AreaId)
        .all(db)
        .await?;
    Ok(models.into_iter().map(Into::into).collect())
}

/// Подзоны в порядке `orden_subarea`
pub async fn list_subareas<C: ConnectionTrait>(db: &C) -> Result<Vec<SubArea>, DbErr> {
    let models = subarea::Entity::find()
        .order_by_asc(subarea::Column::OrdenSubarea)
        .order_by_asc(subarea::Column::SubareaId)
        .all(db)
        .await?;
    Ok(models.into_iter().map(Into::into).collect())
}

pub async fn find_area<C: ConnectionTrait>(db: &C, area_id: &str) -> Result<Option<Area>, DbErr> {
    Ok(area::Entity::find_by_id(area_id.to_string())
        .one(db)
        .await?
        .map(Into::into))
}

pub async fn find_subarea<C: ConnectionTrait>(
    db: &C,
    subarea_id: &str,
) -> Result<Option<SubArea>, DbErr> {
    Ok(subarea::Entity::find_by_id(subarea_id.to_string())
        .one(db)
        .await?
        .map(Into::into))
}

/// Id подзон зоны
pub async fn subarea_ids_of_area<C: ConnectionTrait>(
    db: &C,
    area_id: &str,
) -> Result<Vec<String>, DbErr> {
    let models = subarea::Entity::find()
        .filter(subarea::Column::AreaId.eq(area_id))
        .all(db)
        .await?;
    Ok(models.into_iter().map(|m| m.subarea_id).collect())
}

pub async fn upsert_area<C: ConnectionTrait>(db: &C, area: &Area) -> Result<(), DbErr> {
    let active = area::ActiveModel {
        area_id: Set(area.area_id.clone()),
        area_nombre: Set(area.area_nombre.clone()),
        orden_area: Set(area.orden_area),
    };
    if find_area(db, &area.area_id).await?.is_some() {
        active.update(db).await?;
    } else {
        active.insert(db).await?;
    }
    Ok(())
}

pub async fn upsert_subarea<C: ConnectionTrait>(db: &C, subarea: &SubArea) -> Result<(), DbErr> {
    let active = subarea::ActiveModel {
        subarea_id: Set(subarea.subarea_id.clone()),
        area_id: Set(subarea.area_id.clone()),
        subarea_nombre: Set(subarea.subarea_nombre.clone()),
        orden_subarea: Set(subarea.orden_subarea),
    };
    if find_subarea(db, &subarea.subarea_id).await?.is_some() {
        active.update(db).await?;
    } else {
        active.insert(db).await?;
    }
    Ok(())
}
