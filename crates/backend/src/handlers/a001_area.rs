use axum::Json;
use contracts::shared::api::MessageResponse;

use crate::domain::{a001_area, a007_evento};
use crate::shared::api_error::ApiResult;
use crate::shared::data::db::get_connection;

/// POST /api/catalogos/testdata
pub async fn insert_test_data() -> ApiResult<Json<MessageResponse>> {
    let db = get_connection();
    a001_area::service::insert_test_data(db).await?;
    a007_evento::service::insert_test_data(db).await?;
    Ok(Json(MessageResponse::ok("Datos de prueba insertados")))
}
