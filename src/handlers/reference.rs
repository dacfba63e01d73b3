use axum::{response::Json, routing::get, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    entities::{CellTech, CellType, ChoiceCode, DopingType},
    ApiResponse, ApiResult, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/choices", get(list_choices))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChoiceOption {
    #[schema(example = "Mono_Si")]
    pub code: String,
    #[schema(example = "Mono-crystalline silicon")]
    pub label: String,
}

/// Allowed codes per choice field. A blank string is also accepted and
/// means unspecified.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChoicesResponse {
    pub cell_type: Vec<ChoiceOption>,
    pub doping_type: Vec<ChoiceOption>,
    pub cell_tech: Vec<ChoiceOption>,
}

fn options<T: ChoiceCode>() -> Vec<ChoiceOption> {
    T::iter()
        .map(|code| ChoiceOption {
            code: code.as_ref().to_string(),
            label: code.label().to_string(),
        })
        .collect()
}

pub fn choices() -> ChoicesResponse {
    ChoicesResponse {
        cell_type: options::<CellType>(),
        doping_type: options::<DopingType>(),
        cell_tech: options::<CellTech>(),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/reference/choices",
    responses(
        (status = 200, description = "Enumerated codes with labels", body = ApiResponse<ChoicesResponse>)
    ),
    tag = "reference"
)]
pub async fn list_choices() -> ApiResult<ChoicesResponse> {
    Ok(Json(ApiResponse::success(choices())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choices_cover_every_code_set() {
        let choices = choices();
        assert_eq!(choices.cell_type.len(), 6);
        assert_eq!(choices.doping_type.len(), 3);
        assert_eq!(choices.cell_tech.len(), 6);
        assert!(choices.cell_type.iter().any(|o| o.code == "Mono_Si"));
        assert!(choices.cell_tech.iter().any(|o| o.code == "Unknown"));
    }
}
