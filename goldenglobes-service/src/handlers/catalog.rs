use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Static description of the API, served at `/`.
pub async fn endpoint_catalog() -> impl IntoResponse {
    Json(json!({
        "Welcome": "Hi! This is an open API about Golden Globes",
        "Routes": [
            {
                "/goldenglobes":
                    "Get an array of all Golden Globes objects in the array",
                "/goldenglobes/awardyear/:year_award":
                    "Gives back an array with objects based on the year that is typed",
                "/goldenglobes/films/:film":
                    "Gives back an array with the film name that was typed",
                "/goldenglobes/nominees/:nominee":
                    "Gives back an array with objects based on the name of the nominee",
                "/goldenglobes/winners/:win":
                    "Gives back an array of all the winners or the ones who did not win",
                "/goldenglobes/release/:year_film":
                    "Return one object that matches the realese year of the film"
            }
        ]
    }))
}
