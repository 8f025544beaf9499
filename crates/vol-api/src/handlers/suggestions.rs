use std::str::FromStr;

use axum::{Json, extract::Path};
use vol_common::TopStrength;
use vol_common::api::SuggestionsResponse;

use crate::error::ApiError;

pub async fn list_suggestions(
    Path(strength): Path<String>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    let strength = TopStrength::from_str(&strength)
        .map_err(|_| ApiError::BadRequest(format!("unknown strength: {strength}")))?;

    Ok(Json(SuggestionsResponse::for_strength(strength)))
}
