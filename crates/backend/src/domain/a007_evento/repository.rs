use contracts::domain::a007_evento::aggregate::{CasoCatalogo, EventoCatalogo};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};

pub(crate) mod evento {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a007_evento_catalogo")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub evento_tipo_id: String,
        pub nombre: String,
        pub descripcion: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub(crate) mod caso {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a007_caso_catalogo")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub caso_id: String,
        pub evento_tipo_id: String,
        pub nombre: String,
        pub descripcion: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl From<evento::Model> for EventoCatalogo {
    fn from(m: evento::Model) -> Self {
        EventoCatalogo {
            evento_tipo_id: m.evento_tipo_id,
            nombre: m.nombre,
            descripcion: m.descripcion,
        }
    }
}

impl From<caso::Model> for CasoCatalogo {
    fn from(m: caso::Model) -> Self {
        CasoCatalogo {
            caso_id: m.caso_id,
            evento_tipo_id: m.evento_tipo_id,
            nombre: m.nombre,
            descripcion: m.descripcion,
        }
    }
}

pub async fn list_eventos<C: ConnectionTrait>(db: &C) -> Result<Vec<EventoCatalogo>, DbErr> {
    Ok(evento::Entity::find()
        .order_by_asc(evento::Column::EventoTipoId)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect())
}

pub async fn get_evento<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<EventoCatalogo>, DbErr> {
    Ok(evento::Entity::find_by_id(id.to_string())
        .one(db)
        .await?
        .map(Into::into))
}

/// Случаи события, при `None` все случаи
pub async fn list_casos<C: ConnectionTrait>(
    db: &C,
    evento_tipo_id: Option<&str>,
) -> Result<Vec<CasoCatalogo>, DbErr> {
    let mut query = caso::Entity::find();
    if let Some(evento_tipo_id) = evento_tipo_id {
        query = query.filter(caso::Column::EventoTipoId.eq(evento_tipo_id));
    }
    Ok(query
        .order_by_asc(caso::Column::CasoId)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect())
}

pub async fn get_caso<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<CasoCatalogo>, DbErr> {
    Ok(caso::Entity::find_by_id(id.to_string())
        .one(db)
        .await?
        .map(Into::into))
}

pub async fn upsert_evento<C: ConnectionTrait>(db: &C, e: &EventoCatalogo) -> Result<(), DbErr> {
    let active = evento::ActiveModel {
        evento_tipo_id: Set(e.evento_tipo_id.clone()),
        nombre: Set(e.nombre.clone()),
        descripcion: Set(e.descripcion.clone()),
    };
    if get_evento(db, &e.evento_tipo_id).await?.is_some() {
        active.update(db).await?;
    } else {
        active.insert(db).await?;
    }
    Ok(())
}

pub async fn upsert_caso<C: ConnectionTrait>(db: &C, c: &CasoCatalogo) -> Result<(), DbErr> {
    let active = caso::ActiveModel {
        caso_id: Set(c.caso_id.clone()),
        evento_tipo_id: Set(c.evento_tipo_id.clone()),
        nombre: Set(c.nombre.clone()),
        descripcion: Set(c.descripcion.clone()),
    };
    if get_caso(db, &c.caso_id).await?.is_some() {
        active.update(db).await?;
    } else {
        active.insert(db).await?;
    }
    Ok(())
}
