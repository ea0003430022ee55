use super::views::FormState;
use super::{AppState, CatalogParams, RunForm, RunRequest};
use crate::error::{ExplorerError, USER_FACING_FAILURE, WorkflowError};
use crate::solutions::{CatalogQuery, Solution, SolutionInput, SolutionOutput};
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};

impl CatalogParams {
    fn to_query(&self) -> CatalogQuery {
        CatalogQuery {
            search: self.q.clone().unwrap_or_default(),
            tags: self
                .tags
                .as_deref()
                .map(CatalogQuery::parse_tags)
                .unwrap_or_default(),
        }
    }
}

/// Look up a solution from a raw path segment. Non-numeric ids are simply
/// unknown.
fn find_solution<'a>(state: &'a AppState, raw_id: &str) -> Option<&'a Solution> {
    raw_id
        .parse::<u32>()
        .ok()
        .and_then(|id| state.catalog.get(id))
}

fn render_failure(error: &anyhow::Error) -> Response {
    tracing::error!(error = %format!("{error:#}"), "page render failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "template error").into_response()
}

fn page(status: StatusCode, rendered: anyhow::Result<String>) -> Response {
    match rendered {
        Ok(html) => (status, Html(html)).into_response(),
        Err(error) => render_failure(&error),
    }
}

fn not_found_page(state: &AppState) -> Response {
    page(StatusCode::NOT_FOUND, state.views.not_found())
}

fn not_found_json() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"error": "Solution not found"})),
    )
        .into_response()
}

/// Status for a failed run: input problems are the caller's, everything
/// else is an upstream failure.
fn failure_status(error: &ExplorerError) -> StatusCode {
    if error.is_input_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::BAD_GATEWAY
    }
}

async fn run_solution(
    state: &AppState,
    solution: &Solution,
    input: SolutionInput,
) -> Result<SolutionOutput, ExplorerError> {
    let result = state.runner.run(solution.kind, input).await;
    if let Err(error) = &result {
        if error.is_input_error() {
            tracing::debug!(solution = solution.id, %error, "rejected solution input");
        } else {
            tracing::warn!(solution = solution.id, %error, "solution run failed");
        }
    }
    result
}

/// GET /health
pub(super) async fn handle_health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// GET / -- catalog page
pub(super) async fn handle_index(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> Response {
    page(
        StatusCode::OK,
        state.views.index(&state.catalog, &params.to_query()),
    )
}

/// GET /solutions/{id} -- detail page with an empty form
pub(super) async fn handle_solution_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let Some(solution) = find_solution(&state, &id) else {
        return not_found_page(&state);
    };
    page(
        StatusCode::OK,
        state
            .views
            .solution(solution, state.runner.models(), &FormState::default()),
    )
}

/// POST /solutions/{id} -- run the demo and render the result
pub(super) async fn handle_solution_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<RunForm>,
) -> Response {
    let Some(solution) = find_solution(&state, &id) else {
        return not_found_page(&state);
    };
    let model = form.model.as_deref().filter(|m| !m.trim().is_empty());
    let input = SolutionInput {
        text: form.input.clone(),
        model: model.map(str::to_string),
    };

    let outcome = run_solution(&state, solution, input).await;
    let (status, output, message) = match &outcome {
        Ok(output) => (StatusCode::OK, Some(output), None),
        // Blank input re-renders the form as it was.
        Err(ExplorerError::Workflow(WorkflowError::EmptyInput)) => (StatusCode::OK, None, None),
        Err(error) if error.is_input_error() => {
            (StatusCode::BAD_REQUEST, None, Some(error.to_string()))
        }
        Err(error) => (failure_status(error), None, Some(USER_FACING_FAILURE.to_string())),
    };

    let view = FormState {
        input: &form.input,
        model,
        output,
        error: message.as_deref(),
    };
    page(
        status,
        state.views.solution(solution, state.runner.models(), &view),
    )
}

/// GET /api/solutions -- filtered catalog as JSON
pub(super) async fn handle_api_list(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> impl IntoResponse {
    let query = params.to_query();
    Json(serde_json::json!({
        "solutions": state.catalog.filter(&query),
        "tags": state.catalog.all_tags(),
    }))
}

/// GET /api/solutions/{id}
pub(super) async fn handle_api_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match find_solution(&state, &id) {
        Some(solution) => Json(solution.clone()).into_response(),
        None => not_found_json(),
    }
}

/// POST /api/solutions/{id}/run
pub(super) async fn handle_api_run(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RunRequest>,
) -> Response {
    let Some(solution) = find_solution(&state, &id) else {
        return not_found_json();
    };
    let input = SolutionInput {
        text: body.input,
        model: body.model,
    };

    match run_solution(&state, solution, input).await {
        Ok(output) => Json(output).into_response(),
        Err(error) if error.is_input_error() => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": error.to_string()})),
        )
            .into_response(),
        Err(error) => (
            failure_status(&error),
            Json(serde_json::json!({
                "error": USER_FACING_FAILURE,
                "detail": error.to_string(),
            })),
        )
            .into_response(),
    }
}
