use contracts::domain::a002_elemento::aggregate::Elemento;
use contracts::domain::common::catalog_id;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, PaginatorTrait, QueryOrder, QuerySelect, Select, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_elemento")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub elemento_id: String,
    pub subarea_id: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub cantidad: Option<f64>,
    pub estatus: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Elemento {
    fn from(m: Model) -> Self {
        Elemento {
            elemento_id: m.elemento_id,
            subarea_id: m.subarea_id,
            nombre: m.nombre,
            descripcion: m.descripcion,
            cantidad: m.cantidad,
            estatus: m.estatus,
        }
    }
}

/// Фильтр списка: подзона важнее зоны
#[derive(Debug, Clone, Default)]
pub enum ElementoFilter {
    #[default]
    Todos,
    SubAreas(Vec<String>),
}

fn filtered(filter: &ElementoFilter) -> Select<Entity> {
    let query = Entity::find();
    match filter {
        ElementoFilter::Todos => query,
        ElementoFilter::SubAreas(ids) => query.filter(Column::SubareaId.is_in(ids.clone())),
    }
}

/// Страница элементов, упорядоченная по id
pub async fn list_paginated<C: ConnectionTrait>(
    db: &C,
    filter: &ElementoFilter,
    limit: u64,
    offset: u64,
) -> Result<(Vec<Elemento>, u64), DbErr> {
    let total = filtered(filter).count(db).await?;
    let items = filtered(filter)
        .order_by_asc(Column::ElementoId)
        .limit(limit)
        .offset(offset)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok((items, total))
}

/// Пары (nombre, descripcion) без повторов, отсортированные
pub async fn distinct_descripciones<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<(String, Option<String>)>, DbErr> {
    Entity::find()
        .select_only()
        .column(Column::Nombre)
        .column(Column::Descripcion)
        .distinct()
        .order_by_asc(Column::Nombre)
        .order_by_asc(Column::Descripcion)
        .into_tuple::<(String, Option<String>)>()
        .all(db)
        .await
}

/// Все id с префиксом (`EL-ME-%`)
pub async fn ids_with_prefix<C: ConnectionTrait>(db: &C, prefix: &[&str]) -> Result<Vec<String>, DbErr> {
    Entity::find()
        .select_only()
        .column(Column::ElementoId)
        .filter(Column::ElementoId.like(catalog_id::like_pattern(prefix)))
        .into_tuple::<String>()
        .all(db)
        .await
        .map(|ids| {
            ids.into_iter()
                .filter(|id| catalog_id::has_prefix(id, prefix))
                .collect()
        })
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<Elemento>, DbErr> {
    Ok(Entity::find_by_id(id.to_string()).one(db).await?.map(Into::into))
}

pub async fn insert<C: ConnectionTrait>(db: &C, elemento: &Elemento) -> Result<(), DbErr> {
    let active = ActiveModel {
        elemento_id: Set(elemento.elemento_id.clone()),
        subarea_id: Set(elemento.subarea_id.clone()),
        nombre: Set(elemento.nombre.clone()),
        descripcion: Set(elemento.descripcion.clone()),
        cantidad: Set(elemento.cantidad),
        estatus: Set(elemento.estatus.clone()),
    };
    active.insert(db).await?;
    Ok(())
}

/// Обновление редактируемых полей: cantidad и estatus
pub async fn update_editable<C: ConnectionTrait>(db: &C, elemento: &Elemento) -> Result<(), DbErr> {
    let active = ActiveModel {
        elemento_id: Set(elemento.elemento_id.clone()),
        cantidad: Set(elemento.cantidad),
        estatus: Set(elemento.estatus.clone()),
        ..Default::default()
    };
    active.update(db).await?;
    Ok(())
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: &str) -> Result<bool, DbErr> {
    let result = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}
