
use axum::{
    extract::{rejection::JsonRejection, FromRef, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json,
    Router,
};

use chrono::NaiveDate;
use dining_menu_api::{MealPeriod, MenuClient, MenuQuery};

use crate::config::Config;

mod advisor;
use advisor::MealPlanAdvisor;

#[derive(Clone, FromRef)]
struct AppState {
    menu: MenuProxy,
    advisor: MealPlanAdvisor,
}

pub fn make_router(config: &Config, advisor_key: String) -> Router {
    let state = AppState {
        menu: MenuProxy {
            client: MenuClient::new(&*config.menu.base_url),
            school: config.menu.school.clone(),
        },
        advisor: MealPlanAdvisor::new(&config.advisor, advisor_key),
    };

    Router::new()
        .route("/api/menu", get(menu))
        .route("/api/getMealPlan", post(meal_plan).fallback(method_not_allowed))
        .with_state(state)
}

#[derive(Clone)]
struct MenuProxy {
    client: MenuClient,
    school: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct ErrorBody {
    error: String,
}

type ErrorResponse = (StatusCode, Json<ErrorBody>);

fn server_error(message: impl Into<String>) -> ErrorResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { error: message.into() }))
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
enum RelativeDay {
    #[default] Today, Tomorrow,
}

#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum MenuDate {
    Relative(RelativeDay),
    Date(NaiveDate),
}

impl MenuDate {
    fn as_date(self) -> Option<NaiveDate> {
        let today = chrono::Utc::now().date_naive();
        Some(match self {
            MenuDate::Relative(RelativeDay::Today) => today,
            MenuDate::Relative(RelativeDay::Tomorrow) => today.succ_opt()?,
            MenuDate::Date(d) => d,
        })
    }
}

#[derive(Debug, serde::Deserialize)]
struct MenuParams {
    meal: Option<MealPeriod>,
    day: Option<MenuDate>,
}

/// Relays the provider's weekly menu without touching the body.
async fn menu(
    Query(params): Query<MenuParams>,
    State(state): State<MenuProxy>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let meal = params.meal.unwrap_or(MealPeriod::Dinner);
    let day = params.day.unwrap_or(MenuDate::Relative(RelativeDay::Today));
    let date = day.as_date().ok_or_else(|| {
        (StatusCode::BAD_REQUEST, Json(ErrorBody { error: format!("invalid_date") }))
    })?;

    let body = state.client
        .weekly_menu(&MenuQuery::new(state.school.as_str(), meal, date)).await
        .map_err(|err| {
            tracing::error!("could not fetch menu: {err}");
            server_error(err.to_string())
        })?;

    Ok((
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    ))
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanRequest {
    pub available_food_options: Vec<String>,
    pub selected_food_options: Vec<String>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct MealPlanResponse {
    meal_plan: String,
}

async fn meal_plan(
    State(advisor): State<MealPlanAdvisor>,
    body: Result<Json<MealPlanRequest>, JsonRejection>,
) -> Result<Json<MealPlanResponse>, ErrorResponse> {
    // schema check up front, so bad input is not reported as an upstream failure
    let Json(request) = body.map_err(|err| {
        tracing::warn!("rejecting meal plan request: {err}");
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody { error: format!("invalid meal plan request") }),
        )
    })?;

    let plan = advisor.suggest(&request).await.map_err(|err| {
        // log the cause, answer with a generic message
        tracing::error!("could not generate meal plan: {err}");
        server_error("Failed to generate meal plan")
    })?;

    Ok(Json(MealPlanResponse { meal_plan: plan }))
}

async fn method_not_allowed() -> ErrorResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody { error: format!("Method not allowed") }),
    )
}
