use contracts::domain::a010_metodologia_evento::aggregate::{MetodologiaEvento, PasoEvento};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, PaginatorTrait, QueryOrder, Set};
use std::collections::HashMap;

pub(crate) mod metodologia {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a010_metodologia_evento")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub metodologia_fraccion_id: String,
        pub fraccion_evento_id: String,
        pub nombre: String,
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
    #[sea_orm(table_name = "a010_metodologia_evento_paso")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub metodologia_fraccion_id: String,
        #[sea_orm(primary_key, auto_increment = false)]
        pub numero_paso: i32,
        pub descripcion: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

fn active_model(m: &MetodologiaEvento) -> metodologia::ActiveModel {
    metodologia::ActiveModel {
        metodologia_fraccion_id: Set(m.metodologia_fraccion_id.clone()),
        fraccion_evento_id: Set(m.fraccion_evento_id.clone()),
        nombre: Set(m.nombre.clone()),
        descripcion: Set(m.descripcion.clone()),
    }
}

async fn pasos_de<C: ConnectionTrait>(db: &C, id: &str) -> Result<Vec<PasoEvento>, DbErr> {
    Ok(paso::Entity::find()
        .filter(paso::Column::MetodologiaFraccionId.eq(id))
        .order_by_asc(paso::Column::NumeroPaso)
        .all(db)
        .await?
        .into_iter()
        .map(|p| PasoEvento {
            numero_paso: p.numero_paso,
            descripcion: p.descripcion,
        })
        .collect())
}

/// Методология с шагами по порядку
pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<MetodologiaEvento>, DbErr> {
    let Some(m) = metodologia::Entity::find_by_id(id.to_string()).one(db).await? else {
        return Ok(None);
    };
    Ok(Some(MetodologiaEvento {
        pasos: pasos_de(db, id).await?,
        metodologia_fraccion_id: m.metodologia_fraccion_id,
        fraccion_evento_id: m.fraccion_evento_id,
        nombre: m.nombre,
        descripcion: m.descripcion,
    }))
}

/// Методологии фракции (без шагов)
pub async fn list_by_fraccion<C: ConnectionTrait>(
    db: &C,
    fraccion_evento_id: &str,
) -> Result<Vec<MetodologiaEvento>, DbErr> {
    Ok(metodologia::Entity::find()
        .filter(metodologia::Column::FraccionEventoId.eq(fraccion_evento_id))
        .order_by_asc(metodologia::Column::MetodologiaFraccionId)
        .all(db)
        .await?
        .into_iter()
        .map(|m| MetodologiaEvento {
            metodologia_fraccion_id: m.metodologia_fraccion_id,
            fraccion_evento_id: m.fraccion_evento_id,
            nombre: m.nombre,
            descripcion: m.descripcion,
            pasos: Vec::new(),
        })
        .collect())
}

/// fraccion_evento_id → (metodologia_fraccion_id, cantidad de pasos); primera metodología por fracción
pub async fn resumen_por_fraccion<C: ConnectionTrait>(
    db: &C,
    fraccion_ids: &[String],
) -> Result<HashMap<String, (String, u64)>, DbErr> {
    let mut result = HashMap::new();
    if fraccion_ids.is_empty() {
        return Ok(result);
    }
    let metodologias = metodologia::Entity::find()
        .filter(metodologia::Column::FraccionEventoId.is_in(fraccion_ids.to_vec()))
        .order_by_asc(metodologia::Column::MetodologiaFraccionId)
        .all(db)
        .await?;
    for m in metodologias {
        if result.contains_key(&m.fraccion_evento_id) {
            continue;
        }
        let pasos = paso::Entity::find()
            .filter(paso::Column::MetodologiaFraccionId.eq(m.metodologia_fraccion_id.as_str()))
            .count(db)
            .await?;
        result.insert(m.fraccion_evento_id, (m.metodologia_fraccion_id, pasos));
    }
    Ok(result)
}

pub async fn insert<C: ConnectionTrait>(db: &C, m: &MetodologiaEvento) -> Result<(), DbErr> {
    active_model(m).insert(db).await?;
    Ok(())
}

/// Обновление имени и описания (шаги не трогаются)
pub async fn update<C: ConnectionTrait>(db: &C, m: &MetodologiaEvento) -> Result<(), DbErr> {
    active_model(m).update(db).await?;
    Ok(())
}

pub async fn replace_pasos<C: ConnectionTrait>(db: &C, id: &str, pasos: &[PasoEvento]) -> Result<(), DbErr> {
    paso::Entity::delete_many()
        .filter(paso::Column::MetodologiaFraccionId.eq(id))
        .exec(db)
        .await?;
    if pasos.is_empty() {
        return Ok(());
    }
    let rows = pasos.iter().map(|p| paso::ActiveModel {
        metodologia_fraccion_id: Set(id.to_string()),
        numero_paso: Set(p.numero_paso),
        descripcion: Set(p.descripcion.clone()),
    });
    paso::Entity::insert_many(rows).exec(db).await?;
    Ok(())
}

/// Удаление методологии вместе с шагами
pub async fn delete<C: ConnectionTrait>(db: &C, id: &str) -> Result<(), DbErr> {
    paso::Entity::delete_many()
        .filter(paso::Column::MetodologiaFraccionId.eq(id))
        .exec(db)
        .await?;
    metodologia::Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(())
}
