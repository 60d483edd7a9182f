use contracts::domain::a006_kit::aggregate::{Kit, PREFIJO};
use contracts::domain::common::catalog_id;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, PaginatorTrait, QueryOrder, QuerySelect, Select, Set};
use std::collections::HashMap;

pub(crate) mod kit {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a006_kit")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub kit_id: String,
        pub fraccion_id: Option<String>,
        pub nivel_limpieza_id: Option<i32>,
        pub nombre: String,
        pub tipo_kit: String,
        pub caso_id: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Строка состава кита
pub(crate) mod detalle {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a006_kit_detalle")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub kit_id: String,
        #[sea_orm(primary_key, auto_increment = false)]
        pub herramienta_id: String,
        pub nota: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl From<kit::Model> for Kit {
    fn from(m: kit::Model) -> Self {
        Kit {
            kit_id: m.kit_id,
            fraccion_id: m.fraccion_id,
            nivel_limpieza_id: m.nivel_limpieza_id,
            nombre: m.nombre,
            tipo_kit: m.tipo_kit,
            caso_id: m.caso_id,
        }
    }
}

fn active_model(k: &Kit) -> kit::ActiveModel {
    kit::ActiveModel {
        kit_id: Set(k.kit_id.clone()),
        fraccion_id: Set(k.fraccion_id.clone()),
        nivel_limpieza_id: Set(k.nivel_limpieza_id),
        nombre: Set(k.nombre.clone()),
        tipo_kit: Set(k.tipo_kit.clone()),
        caso_id: Set(k.caso_id.clone()),
    }
}

/// Фильтр по уровню
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NivelFilter {
    #[default]
    Todos,
    /// Киты без уровня
    General,
    Nivel(i32),
}

#[derive(Debug, Clone, Default)]
pub struct KitFilter {
    /// Код фракции: `TL` выбирает `KT-TL-*`
    pub codigo: Option<String>,
    pub nivel: NivelFilter,
    pub tipo_kit: Option<String>,
    pub caso_ids: Option<Vec<String>>,
}

fn filtered(filter: &KitFilter) -> Select<kit::Entity> {
    let mut query = kit::Entity::find();
    if let Some(codigo) = &filter.codigo {
        let pattern = catalog_id::like_pattern(&[PREFIJO, codigo.as_str()]);
        query = query.filter(kit::Column::KitId.like(pattern));
    }
    query = match filter.nivel {
        NivelFilter::Todos => query,
        NivelFilter::General => query.filter(kit::Column::NivelLimpiezaId.is_null()),
        NivelFilter::Nivel(n) => query.filter(kit::Column::NivelLimpiezaId.eq(n)),
    };
    if let Some(tipo) = &filter.tipo_kit {
        query = query.filter(kit::Column::TipoKit.eq(tipo.as_str()));
    }
    if let Some(casos) = &filter.caso_ids {
        query = query.filter(kit::Column::CasoId.is_in(casos.clone()));
    }
    query
}

pub async fn list_paginated<C: ConnectionTrait>(
    db: &C,
    filter: &KitFilter,
    limit: u64,
    offset: u64,
) -> Result<(Vec<Kit>, u64), DbErr> {
    let total = filtered(filter).count(db).await?;
    let items = filtered(filter)
        .order_by_asc(kit::Column::KitId)
        .limit(limit)
        .offset(offset)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok((items, total))
}

pub async fn ids_with_prefix<C: ConnectionTrait>(db: &C, prefix: &[&str]) -> Result<Vec<String>, DbErr> {
    kit::Entity::find()
        .select_only()
        .column(kit::Column::KitId)
        .filter(kit::Column::KitId.like(catalog_id::like_pattern(prefix)))
        .into_tuple::<String>()
        .all(db)
        .await
        .map(|ids| {
            ids.into_iter()
                .filter(|id| catalog_id::has_prefix(id, prefix))
                .collect()
        })
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<Kit>, DbErr> {
    Ok(kit::Entity::find_by_id(id.to_string())
        .one(db)
        .await?
        .map(Into::into))
}

pub async fn insert<C: ConnectionTrait>(db: &C, k: &Kit) -> Result<(), DbErr> {
    active_model(k).insert(db).await?;
    Ok(())
}

pub async fn update<C: ConnectionTrait>(db: &C, k: &Kit) -> Result<(), DbErr> {
    active_model(k).update(db).await?;
    Ok(())
}

/// Удаление кита вместе с составом
pub async fn delete<C: ConnectionTrait>(db: &C, id: &str) -> Result<bool, DbErr> {
    detalle::Entity::delete_many()
        .filter(detalle::Column::KitId.eq(id))
        .exec(db)
        .await?;
    let result = kit::Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// Состав китов: kit_id → [(herramienta_id, nota)]
pub async fn detalles_de_kits<C: ConnectionTrait>(
    db: &C,
    kit_ids: &[String],
) -> Result<HashMap<String, Vec<(String, Option<String>)>>, DbErr> {
    let mut result: HashMap<String, Vec<(String, Option<String>)>> = HashMap::new();
    if kit_ids.is_empty() {
        return Ok(result);
    }
    let rows = detalle::Entity::find()
        .filter(detalle::Column::KitId.is_in(kit_ids.to_vec()))
        .order_by_asc(detalle::Column::KitId)
        .order_by_asc(detalle::Column::HerramientaId)
        .all(db)
        .await?;
    for row in rows {
        result
            .entry(row.kit_id)
            .or_default()
            .push((row.herramienta_id, row.nota));
    }
    Ok(result)
}

/// Полная замена состава кита
pub async fn replace_detalles<C: ConnectionTrait>(
    db: &C,
    kit_id: &str,
    herramientas: &[String],
    nota: Option<&str>,
) -> Result<(), DbErr> {
    detalle::Entity::delete_many()
        .filter(detalle::Column::KitId.eq(kit_id))
        .exec(db)
        .await?;
    if herramientas.is_empty() {
        return Ok(());
    }
    let rows = herramientas.iter().map(|herramienta_id| detalle::ActiveModel {
        kit_id: Set(kit_id.to_string()),
        herramienta_id: Set(herramienta_id.clone()),
        nota: Set(nota.map(str::to_string)),
    });
    detalle::Entity::insert_many(rows).exec(db).await?;
    Ok(())
}

/// В скольких китах есть инструмент
pub async fn count_detalles_de_herramienta<C: ConnectionTrait>(
    db: &C,
    herramienta_id: &str,
) -> Result<u64, DbErr> {
    detalle::Entity::find()
        .filter(detalle::Column::HerramientaId.eq(herramienta_id))
        .count(db)
        .await
}

pub async fn count_kits_de_fraccion<C: ConnectionTrait>(db: &C, fraccion_id: &str) -> Result<u64, DbErr> {
    kit::Entity::find()
        .filter(kit::Column::FraccionId.eq(fraccion_id))
        .count(db)
        .await
}
