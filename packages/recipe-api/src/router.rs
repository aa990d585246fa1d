//! Matchit routing configuration.

use std::fmt::Display;
use std::sync::Arc;

use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use matchit::Router as MatchitRouter;
use thiserror::Error;

use crate::handlers;
use recipe_core::config::RecipeConfig;
use recipe_core::{Clock, RecipeStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Recipe storage
    pub store: Arc<dyn RecipeStore>,
    /// Timestamp source for created and updated recipes
    pub clock: Arc<dyn Clock>,
    /// Service configuration
    pub config: Arc<RecipeConfig>,
}

/// HTTP request router.
pub struct Router {
    inner: MatchitRouter<RouteHandler>,
    state: AppState,
}

impl Router {
    /// Creates a new router with the recipe routes.
    pub fn new(
        store: Arc<dyn RecipeStore>,
        clock: Arc<dyn Clock>,
        config: Arc<RecipeConfig>,
    ) -> Self {
        let mut router = MatchitRouter::new();

        router
            .insert("/", RouteHandler::Index)
            .expect("Failed to insert / route");
        router
            .insert("/recipes", RouteHandler::Recipes)
            .expect("Failed to insert /recipes route");
        router
            .insert("/recipes/{id}", RouteHandler::Recipe)
            .expect("Failed to insert /recipes/{id} route");

        Self {
            inner: router,
            state: AppState {
                store,
                clock,
                config,
            },
        }
    }

    /// Routes an incoming request to the appropriate handler.
    ///
    /// # Returns
    /// `Result<Response<Bytes>, RouterError>` containing the response or an error.
    pub async fn route<B>(&self, req: Request<B>) -> Result<Response<Bytes>, RouterError>
    where
        B: Body,
        B::Error: Display,
    {
        let path = req.uri().path().to_string();
        tracing::debug!("{} {}", req.method(), path);

        let (handler, id) = match self.inner.at(&path) {
            Ok(matched) => (*matched.value, matched.params.get("id").map(str::to_string)),
            Err(_) => {
                return Err(RouterError::NotFound(format!("No route found for {}", path)));
            }
        };

        handler.handle(req, id, self.state.clone()).await
    }

    /// Routes a request and renders any routing error as its JSON error
    /// response. `HEAD` responses keep their status and headers but carry
    /// no body.
    pub async fn respond<B>(&self, req: Request<B>) -> Response<Bytes>
    where
        B: Body,
        B::Error: Display,
    {
        let head = req.method() == Method::HEAD;
        let mut response = match self.route(req).await {
            Ok(response) => response,
            Err(err) => {
                match &err {
                    RouterError::InternalError(_) | RouterError::Timeout => {
                        tracing::warn!("Error handling request: {}", err)
                    }
                    _ => tracing::debug!("Request rejected: {}", err),
                }
                err.into()
            }
        };

        if head {
            *response.body_mut() = Bytes::new();
        }
        response
    }
}

/// `GET` or its body-less twin `HEAD`.
fn is_read(method: &Method) -> bool {
    method == Method::GET || method == Method::HEAD
}

/// Route handler function.
#[derive(Debug, Clone, Copy)]
enum RouteHandler {
    Index,
    Recipes,
    Recipe,
}

impl RouteHandler {
    /// Handles a request with the given `{id}` route parameter.
    async fn handle<B>(
        &self,
        req: Request<B>,
        id: Option<String>,
        state: AppState,
    ) -> Result<Response<Bytes>, RouterError>
    where
        B: Body,
        B::Error: Display,
    {
        match self {
            RouteHandler::Index => {
                if is_read(req.method()) {
                    handlers::index().await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
            RouteHandler::Recipes => {
                if req.method() == Method::POST {
                    handlers::create_recipe(req, state).await
                } else if is_read(req.method()) {
                    handlers::list_recipes(state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
            RouteHandler::Recipe => {
                let id = handlers::parse_recipe_id(id.as_deref().unwrap_or_default())?;
                if is_read(req.method()) {
                    handlers::get_recipe(id, state).await
                } else if req.method() == Method::PATCH {
                    handlers::update_recipe(req, id, state).await
                } else if req.method() == Method::DELETE {
                    handlers::delete_recipe(id, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
        }
    }
}

/// Router error type.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Internal Error: {0}")]
    InternalError(String),
    #[error("Request Timeout")]
    Timeout,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Not Found: {0}")]
    NotFound(String),
}

impl From<recipe_core::error::StoreError> for RouterError {
    fn from(err: recipe_core::error::StoreError) -> Self {
        RouterError::InternalError(format!("Store error: {}", err))
    }
}

impl From<RouterError> for Response<Bytes> {
    fn from(err: RouterError) -> Self {
        let (status, message, details) = match &err {
            RouterError::MethodNotAllowed => (405, "Method Not Allowed", None),
            RouterError::InternalError(msg) => (500, msg.as_str(), None),
            RouterError::Timeout => (408, "Request Timeout", None),
            RouterError::BadRequest(msg) => (400, msg.as_str(), None),
            RouterError::NotFound(msg) => (404, "Not Found", Some(msg.clone())),
        };

        let error_response = handlers::error_response(status, message.to_string(), details);
        let body = serde_json::to_vec(&error_response)
            .unwrap_or_else(|e| format!("{{\"success\":false,\"error\":{{\"code\":\"500\",\"message\":\"Failed to serialize error: {}\",\"details\":null}}}}", e).into_bytes());

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Bytes::from(body))
            .unwrap_or_else(|_| {
                let mut fallback = Response::new(Bytes::from("Internal Server Error"));
                *fallback.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
                fallback
            })
    }
}
