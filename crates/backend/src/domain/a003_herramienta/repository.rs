use contracts::domain::a003_herramienta::aggregate::{grupo_de, Herramienta, PREFIJO};
use contracts::domain::common::catalog_id;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, PaginatorTrait, QueryOrder, QuerySelect, Select, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_herramienta")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub herramienta_id: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub estatus: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Herramienta {
    fn from(m: Model) -> Self {
        Herramienta {
            grupo: grupo_de(&m.herramienta_id),
            herramienta_id: m.herramienta_id,
            nombre: m.nombre,
            descripcion: m.descripcion,
            estatus: m.estatus,
        }
    }
}

/// Фильтры списка инструментов
#[derive(Debug, Clone, Default)]
pub struct HerramientaFilter {
    pub grupo: Option<String>,
    pub estatus: Option<String>,
}

fn filtered(filter: &HerramientaFilter) -> Select<Entity> {
    let mut query = Entity::find();
    if let Some(grupo) = &filter.grupo {
        let pattern = catalog_id::like_pattern(&[PREFIJO, grupo.as_str()]);
        query = query.filter(Column::HerramientaId.like(pattern));
    }
    if let Some(estatus) = &filter.estatus {
        query = query.filter(Column::Estatus.eq(estatus.as_str()));
    }
    query
}

pub async fn list_paginated<C: ConnectionTrait>(
    db: &C,
    filter: &HerramientaFilter,
    limit: u64,
    offset: u64,
) -> Result<(Vec<Herramienta>, u64), DbErr> {
    let total = filtered(filter).count(db).await?;
    let items = filtered(filter)
        .order_by_asc(Column::HerramientaId)
        .limit(limit)
        .offset(offset)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok((items, total))
}

/// Все инструменты по фильтру, без пагинации
pub async fn list_all<C: ConnectionTrait>(
    db: &C,
    filter: &HerramientaFilter,
) -> Result<Vec<Herramienta>, DbErr> {
    Ok(filtered(filter)
        .order_by_asc(Column::HerramientaId)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect())
}

pub async fn ids_with_prefix<C: ConnectionTrait>(db: &C, prefix: &[&str]) -> Result<Vec<String>, DbErr> {
    Entity::find()
        .select_only()
        .column(Column::HerramientaId)
        .filter(Column::HerramientaId.like(catalog_id::like_pattern(prefix)))
        .into_tuple::<String>()
        .all(db)
        .await
        .map(|ids| {
            ids.into_iter()
                .filter(|id| catalog_id::has_prefix(id, prefix))
                .collect()
        })
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<Herramienta>, DbErr> {
    Ok(Entity::find_by_id(id.to_string()).one(db).await?.map(Into::into))
}

/// Инструменты по списку id (порядок по id)
pub async fn get_many<C: ConnectionTrait>(db: &C, ids: &[String]) -> Result<Vec<Herramienta>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(Entity::find()
        .filter(Column::HerramientaId.is_in(ids.to_vec()))
        .order_by_asc(Column::HerramientaId)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect())
}

pub async fn insert<C: ConnectionTrait>(db: &C, herramienta: &Herramienta) -> Result<(), DbErr> {
    let active = ActiveModel {
        herramienta_id: Set(herramienta.herramienta_id.clone()),
        nombre: Set(herramienta.nombre.clone()),
        descripcion: Set(herramienta.descripcion.clone()),
        estatus: Set(herramienta.estatus.clone()),
    };
    active.insert(db).await?;
    Ok(())
}

pub async fn update<C: ConnectionTrait>(db: &C, herramienta: &Herramienta) -> Result<(), DbErr> {
    let active = ActiveModel {
        herramienta_id: Set(herramienta.herramienta_id.clone()),
        nombre: Set(herramienta.nombre.clone()),
        descripcion: Set(herramienta.descripcion.clone()),
        estatus: Set(herramienta.estatus.clone()),
    };
    active.update(db).await?;
    Ok(())
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: &str) -> Result<bool, DbErr> {
    let result = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}
