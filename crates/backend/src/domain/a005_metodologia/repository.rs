use contracts::domain::a005_metodologia::aggregate::{MetodologiaBase, Paso};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, PaginatorTrait, QueryOrder, Set};
use std::collections::HashMap;

/// Базовая методология (одна на код, номер и уровень)
pub(crate) mod base {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a005_metodologia_base")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub metodologia_base_id: String,
        pub nombre: Option<String>,
        pub descripcion: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub(crate) mod paso {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a005_metodologia_base_paso")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub metodologia_base_id: String,
        #[sea_orm(primary_key, auto_increment = false)]
        pub orden: i32,
        pub instruccion: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Связь фракции и уровня с базовой методологией
pub(crate) mod link {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a005_metodologia")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub fraccion_id: String,
        #[sea_orm(primary_key, auto_increment = false)]
        pub nivel_limpieza_id: i32,
        pub metodologia_base_id: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Уровни, настроенные для каждой фракции из списка
pub async fn niveles_por_fraccion<C: ConnectionTrait>(
    db: &C,
    fraccion_ids: &[String],
) -> Result<HashMap<String, Vec<i32>>, DbErr> {
    let mut result: HashMap<String, Vec<i32>> = HashMap::new();
    if fraccion_ids.is_empty() {
        return Ok(result);
    }
    let links = link::Entity::find()
        .filter(link::Column::FraccionId.is_in(fraccion_ids.to_vec()))
        .order_by_asc(link::Column::FraccionId)
        .order_by_asc(link::Column::NivelLimpiezaId)
        .all(db)
        .await?;
    for l in links {
        result.entry(l.fraccion_id).or_default().push(l.nivel_limpieza_id);
    }
    Ok(result)
}

/// Связи фракции: (nivel, metodologia_base_id)
pub async fn links_of_fraccion<C: ConnectionTrait>(
    db: &C,
    fraccion_id: &str,
) -> Result<Vec<(i32, String)>, DbErr> {
    let links = link::Entity::find()
        .filter(link::Column::FraccionId.eq(fraccion_id))
        .order_by_asc(link::Column::NivelLimpiezaId)
        .all(db)
        .await?;
    Ok(links
        .into_iter()
        .map(|l| (l.nivel_limpieza_id, l.metodologia_base_id))
        .collect())
}

pub async fn get_base<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<MetodologiaBase>, DbErr> {
    let Some(model) = base::Entity::find_by_id(id.to_string()).one(db).await? else {
        return Ok(None);
    };
    let pasos = paso::Entity::find()
        .filter(paso::Column::MetodologiaBaseId.eq(id))
        .order_by_asc(paso::Column::Orden)
        .all(db)
        .await?
        .into_iter()
        .map(|p| Paso {
            orden: p.orden,
            instruccion: p.instruccion,
        })
        .collect();
    Ok(Some(MetodologiaBase {
        metodologia_base_id: model.metodologia_base_id,
        nombre: model.nombre.unwrap_or_default(),
        descripcion: model.descripcion,
        pasos,
    }))
}

/// Создать базовую методологию, если её ещё нет
pub async fn ensure_base<C: ConnectionTrait>(
    db: &C,
    id: &str,
    nombre: &str,
    descripcion: &str,
) -> Result<bool, DbErr> {
    if base::Entity::find_by_id(id.to_string()).one(db).await?.is_some() {
        return Ok(false);
    }
    base::ActiveModel {
        metodologia_base_id: Set(id.to_string()),
        nombre: Set(Some(nombre.to_string())),
        descripcion: Set(Some(descripcion.to_string())),
    }
    .insert(db)
    .await?;
    Ok(true)
}

/// Полная замена шагов методологии
pub async fn replace_pasos<C: ConnectionTrait>(db: &C, base_id: &str, pasos: &[Paso]) -> Result<(), DbErr> {
    paso::Entity::delete_many()
        .filter(paso::Column::MetodologiaBaseId.eq(base_id))
        .exec(db)
        .await?;
    if pasos.is_empty() {
        return Ok(());
    }
    let models = pasos.iter().map(|p| paso::ActiveModel {
        metodologia_base_id: Set(base_id.to_string()),
        orden: Set(p.orden),
        instruccion: Set(p.instruccion.clone()),
    });
    paso::Entity::insert_many(models).exec(db).await?;
    Ok(())
}

pub async fn upsert_link<C: ConnectionTrait>(
    db: &C,
    fraccion_id: &str,
    nivel_limpieza_id: i32,
    base_id: &str,
) -> Result<(), DbErr> {
    let existing = link::Entity::find_by_id((fraccion_id.to_string(), nivel_limpieza_id))
        .one(db)
        .await?;
    let active = link::ActiveModel {
        fraccion_id: Set(fraccion_id.to_string()),
        nivel_limpieza_id: Set(nivel_limpieza_id),
        metodologia_base_id: Set(base_id.to_string()),
    };
    if existing.is_some() {
        active.update(db).await?;
    } else {
        active.insert(db).await?;
    }
    Ok(())
}

pub async fn delete_links_of_fraccion<C: ConnectionTrait>(db: &C, fraccion_id: &str) -> Result<u64, DbErr> {
    let result = link::Entity::delete_many()
        .filter(link::Column::FraccionId.eq(fraccion_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Сколько связей указывают на базовую методологию
pub async fn count_links_to_base<C: ConnectionTrait>(db: &C, base_id: &str) -> Result<u64, DbErr> {
    link::Entity::find()
        .filter(link::Column::MetodologiaBaseId.eq(base_id))
        .count(db)
        .await
}

/// Удаление методологии вместе с шагами
pub async fn delete_base<C: ConnectionTrait>(db: &C, base_id: &str) -> Result<(), DbErr> {
    paso::Entity::delete_many()
        .filter(paso::Column::MetodologiaBaseId.eq(base_id))
        .exec(db)
        .await?;
    base::Entity::delete_by_id(base_id.to_string()).exec(db).await?;
    Ok(())
}
