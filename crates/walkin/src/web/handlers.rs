//! Request handlers.
//!
//! State-changing requests redraw the resulting screen with an inline notice.
//! Navigation requests update the session and redirect to `/`.

use std::sync::Arc;

use axum::extract::{Form, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use tracing::{error, info, warn};

use super::render::{self, Notice};
use super::AppState;
use crate::branding;
use crate::dashboard::{customers, QueueSummary};
use crate::error::Error;
use crate::intake::{self, IntakeForm, IntakeOutcome};
use crate::session::{Action, Screen, Transition};

/// Query string of the customer search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    /// Search term; empty shows every customer.
    #[serde(default)]
    pub q: String,
}

/// Body of the password gate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    /// The submitted password.
    #[serde(default)]
    pub password: String,
}

/// Draw `screen` from freshly loaded data.
#[must_use]
pub fn render_screen(
    state: &AppState,
    screen: Screen,
    term: &str,
    notice: Option<&Notice>,
) -> String {
    let header = state.header();
    match screen {
        Screen::Public => render::public_page(&header, &IntakeForm::default(), notice),
        Screen::Login => render::login_page(&header, notice),
        Screen::Queue => {
            let summary = QueueSummary::compute(
                state.store().queue().records(),
                state.config().queue.total_window,
                state.now().date(),
            );
            render::queue_page(&header, &summary, notice)
        }
        Screen::Customers => {
            let records = state.store().customers().records();
            render::customers_page(&header, &records, term, notice)
        }
    }
}

/// `GET /`: the active screen.
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Html<String> {
    let screen = state.session().screen();
    Html(render_screen(&state, screen, &query.q, None))
}

/// `POST /intake`: public form submission.
pub async fn submit_intake(
    State(state): State<Arc<AppState>>,
    Form(form): Form<IntakeForm>,
) -> Response {
    let header = state.header();
    match intake::submit(state.store(), form, state.now()) {
        IntakeOutcome::Accepted { .. } => Html(render::public_page(
            &header,
            &IntakeForm::default(),
            Some(&Notice::success(
                "✅ Thank you! Your information has been submitted successfully.",
            )),
        ))
        .into_response(),
        IntakeOutcome::Invalid { form, error } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(render::public_page(
                &header,
                &form,
                Some(&Notice::error(error.to_string())),
            )),
        )
            .into_response(),
        IntakeOutcome::Failed { form, error } => (
            if error.is_storage_error() {
                StatusCode::SERVICE_UNAVAILABLE
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            },
            Html(render::public_page(
                &header,
                &form,
                Some(&Notice::error(
                    "We couldn't save your information. Please try again.",
                )),
            )),
        )
            .into_response(),
    }
}

/// `POST /backend`: the hidden backend button.
pub async fn open_backend(State(state): State<Arc<AppState>>) -> Response {
    navigate(&state, Action::OpenBackend)
}

/// `POST /login`: the password gate.
pub async fn login(State(state): State<Arc<AppState>>, Form(form): Form<LoginForm>) -> Response {
    navigate(&state, Action::Login(form.password))
}

/// `POST /nav/queue`.
pub async fn show_queue(State(state): State<Arc<AppState>>) -> Response {
    navigate(&state, Action::ShowQueue)
}

/// `POST /nav/customers`.
pub async fn show_customers(State(state): State<Arc<AppState>>) -> Response {
    navigate(&state, Action::ShowCustomers)
}

/// `POST /nav/public`.
pub async fn show_public(State(state): State<Arc<AppState>>) -> Response {
    navigate(&state, Action::ShowPublic)
}

/// `POST /logout`.
pub async fn logout(State(state): State<Arc<AppState>>) -> Response {
    navigate(&state, Action::Logout)
}

fn navigate(state: &AppState, action: Action) -> Response {
    let transition = state
        .session()
        .apply(action, &state.config().auth.password);

    match transition {
        Transition::LoginRejected => (
            StatusCode::UNAUTHORIZED,
            Html(render::login_page(
                &state.header(),
                Some(&Notice::error("Invalid password!")),
            )),
        )
            .into_response(),
        Transition::Moved(_) | Transition::Denied => Redirect::to("/").into_response(),
    }
}

fn is_authenticated(state: &AppState) -> bool {
    state.session().is_authenticated()
}

fn storage_failure(state: &AppState, screen: Screen, err: &Error) -> Response {
    error!(error = %err, "storage write failed");
    let notice = Notice::error(format!("Could not save changes ({err}). Please try again."));
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(render_screen(state, screen, "", Some(&notice))),
    )
        .into_response()
}

/// `POST /queue/{id}/assign`: take a customer off the queue.
pub async fn assign(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> Response {
    if !is_authenticated(&state) {
        return Redirect::to("/").into_response();
    }

    let notice = match state.store().dequeue(id) {
        Ok(removed) => match removed.first() {
            Some(record) => {
                Notice::success(format!("Customer {} has been assigned!", record.name))
            }
            None => Notice::info("That customer is no longer in the queue."),
        },
        Err(err) => return storage_failure(&state, Screen::Queue, &err),
    };
    Html(render_screen(&state, Screen::Queue, "", Some(&notice))).into_response()
}

/// `POST /queue/clear`: empty the live queue.
pub async fn clear_queue(State(state): State<Arc<AppState>>) -> Response {
    if !is_authenticated(&state) {
        return Redirect::to("/").into_response();
    }

    if let Err(err) = state.store().clear_queue() {
        return storage_failure(&state, Screen::Queue, &err);
    }
    let notice = Notice::success("Queue cleared!");
    Html(render_screen(&state, Screen::Queue, "", Some(&notice))).into_response()
}

/// `POST /customers/clear`: empty the customer log.
pub async fn clear_customers(State(state): State<Arc<AppState>>) -> Response {
    if !is_authenticated(&state) {
        return Redirect::to("/").into_response();
    }

    if let Err(err) = state.store().clear_customers() {
        return storage_failure(&state, Screen::Customers, &err);
    }
    let notice = Notice::success("All customers cleared!");
    Html(render_screen(&state, Screen::Customers, "", Some(&notice))).into_response()
}

/// `GET /customers/export.csv`: download the (filtered) customer log.
pub async fn export_customers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Response {
    if !is_authenticated(&state) {
        return Redirect::to("/").into_response();
    }

    let records = state.store().customers().records();
    let filtered = customers::filter_customers(&records, &query.q);
    let file_name = customers::export_file_name(state.now().date());
    info!(rows = filtered.len(), %file_name, "customer export");

    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        customers::to_csv(filtered),
    )
        .into_response()
}

/// `GET /logo`: the branding asset.
pub async fn logo(State(state): State<Arc<AppState>>) -> Response {
    let Some(path) = branding::find_logo(&state.config().asset_dir()) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let content_type = branding::content_type(&path);
            ([(header::CONTENT_TYPE, content_type)], bytes).into_response()
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read logo");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
