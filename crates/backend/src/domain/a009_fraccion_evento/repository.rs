use contracts::domain::a009_fraccion_evento::aggregate::FraccionEvento;
use contracts::domain::common::catalog_id;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, PaginatorTrait, QueryOrder, QuerySelect, Select, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a009_fraccion_evento")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub fraccion_evento_id: String,
    pub evento_tipo_id: String,
    pub nombre: String,
    pub descripcion: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for FraccionEvento {
    fn from(m: Model) -> Self {
        FraccionEvento {
            fraccion_evento_id: m.fraccion_evento_id,
            evento_tipo_id: m.evento_tipo_id,
            nombre: m.nombre,
            descripcion: m.descripcion,
        }
    }
}

fn active_model(f: &FraccionEvento) -> ActiveModel {
    ActiveModel {
        fraccion_evento_id: Set(f.fraccion_evento_id.clone()),
        evento_tipo_id: Set(f.evento_tipo_id.clone()),
        nombre: Set(f.nombre.clone()),
        descripcion: Set(f.descripcion.clone()),
    }
}

fn filtered(evento_tipo_id: Option<&str>) -> Select<Entity> {
    match evento_tipo_id {
        Some(evento) => Entity::find().filter(Column::EventoTipoId.eq(evento)),
        None => Entity::find(),
    }
}

pub async fn list_paginated<C: ConnectionTrait>(
    db: &C,
    evento_tipo_id: Option<&str>,
    limit: u64,
    offset: u64,
) -> Result<(Vec<FraccionEvento>, u64), DbErr> {
    let total = filtered(evento_tipo_id).count(db).await?;
    let items = filtered(evento_tipo_id)
        .order_by_asc(Column::FraccionEventoId)
        .limit(limit)
        .offset(offset)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok((items, total))
}

/// Фракции с префиксом id (`FR-IN-%`, `FR-IN-DE-%`), при необходимости только одного события
pub async fn list_by_prefix<C: ConnectionTrait>(
    db: &C,
    prefix: &[&str],
    evento_tipo_id: Option<&str>,
) -> Result<Vec<FraccionEvento>, DbErr> {
    Ok(filtered(evento_tipo_id)
        .filter(Column::FraccionEventoId.like(catalog_id::like_pattern(prefix)))
        .order_by_asc(Column::FraccionEventoId)
        .all(db)
        .await?
        .into_iter()
        .filter(|m| catalog_id::has_prefix(&m.fraccion_evento_id, prefix))
        .map(Into::into)
        .collect())
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<FraccionEvento>, DbErr> {
    Ok(Entity::find_by_id(id.to_string()).one(db).await?.map(Into::into))
}

pub async fn insert<C: ConnectionTrait>(db: &C, f: &FraccionEvento) -> Result<(), DbErr> {
    active_model(f).insert(db).await?;
    Ok(())
}

pub async fn update<C: ConnectionTrait>(db: &C, f: &FraccionEvento) -> Result<(), DbErr> {
    active_model(f).update(db).await?;
    Ok(())
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: &str) -> Result<bool, DbErr> {
    let result = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}
