use contracts::domain::a004_fraccion::aggregate::{Fraccion, PREFIJO};
use contracts::domain::common::catalog_id;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, PaginatorTrait, QueryOrder, QuerySelect, Select, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a004_fraccion")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub fraccion_id: String,
    pub fraccion_nombre: String,
    pub nombre_custom: Option<String>,
    pub nota_tecnica: Option<String>,
    pub grupo_fracciones: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Fraccion {
    fn from(m: Model) -> Self {
        Fraccion {
            fraccion_id: m.fraccion_id,
            fraccion_nombre: m.fraccion_nombre,
            nombre_custom: m.nombre_custom,
            nota_tecnica: m.nota_tecnica,
            grupo_fracciones: m.grupo_fracciones,
        }
    }
}

fn active_model(fraccion: &Fraccion) -> ActiveModel {
    ActiveModel {
        fraccion_id: Set(fraccion.fraccion_id.clone()),
        fraccion_nombre: Set(fraccion.fraccion_nombre.clone()),
        nombre_custom: Set(fraccion.nombre_custom.clone()),
        nota_tecnica: Set(fraccion.nota_tecnica.clone()),
        grupo_fracciones: Set(fraccion.grupo_fracciones.clone()),
    }
}

fn filtered(grupo: Option<&str>) -> Select<Entity> {
    match grupo {
        Some(grupo) => Entity::find().filter(Column::GrupoFracciones.eq(grupo)),
        None => Entity::find(),
    }
}

pub async fn list_paginated<C: ConnectionTrait>(
    db: &C,
    grupo: Option<&str>,
    limit: u64,
    offset: u64,
) -> Result<(Vec<Fraccion>, u64), DbErr> {
    let total = filtered(grupo).count(db).await?;
    let items = filtered(grupo)
        .order_by_asc(Column::FraccionId)
        .limit(limit)
        .offset(offset)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok((items, total))
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Fraccion>, DbErr> {
    Ok(Entity::find()
        .order_by_asc(Column::FraccionId)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect())
}

/// Фракции того же кода (`FR-{codigo}-%`)
pub async fn list_by_codigo<C: ConnectionTrait>(db: &C, codigo: &str) -> Result<Vec<Fraccion>, DbErr> {
    Ok(Entity::find()
        .filter(Column::FraccionId.like(catalog_id::like_pattern(&[PREFIJO, codigo])))
        .order_by_asc(Column::FraccionId)
        .all(db)
        .await?
        .into_iter()
        .filter(|m| catalog_id::has_prefix(&m.fraccion_id, &[PREFIJO, codigo]))
        .map(Into::into)
        .collect())
}

/// Группы, уже встречающиеся в данных
pub async fn distinct_grupos<C: ConnectionTrait>(db: &C) -> Result<Vec<String>, DbErr> {
    let grupos: Vec<Option<String>> = Entity::find()
        .select_only()
        .column(Column::GrupoFracciones)
        .distinct()
        .filter(Column::GrupoFracciones.is_not_null())
        .order_by_asc(Column::GrupoFracciones)
        .into_tuple()
        .all(db)
        .await?;
    Ok(grupos
        .into_iter()
        .flatten()
        .filter(|g| !g.is_empty())
        .collect())
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<Fraccion>, DbErr> {
    Ok(Entity::find_by_id(id.to_string()).one(db).await?.map(Into::into))
}

pub async fn insert<C: ConnectionTrait>(db: &C, fraccion: &Fraccion) -> Result<(), DbErr> {
    active_model(fraccion).insert(db).await?;
    Ok(())
}

pub async fn update<C: ConnectionTrait>(db: &C, fraccion: &Fraccion) -> Result<(), DbErr> {
    active_model(fraccion).update(db).await?;
    Ok(())
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: &str) -> Result<bool, DbErr> {
    let result = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}
