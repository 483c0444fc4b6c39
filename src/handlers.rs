//! API Gateway request dispatch.
//!
//! Each request is routed by method to exactly one [`UserStore`] operation
//! and answered with a JSON body:
//!
//! | method | `email` | operation | success |
//! |---|---|---|---|
//! | `GET` | optional | fetch one or all | 200 |
//! | `POST` | - | create | 201 |
//! | `PATCH`, `PUT` | required | update | 200 |
//! | `DELETE` | required | delete | 200 |
//!
//! Invalid input answers 400 without touching the store, store failures
//! answer 502, and every other method answers 405.

use crate::{
    user::{User, UserStore, error::UserError},
    validators,
};

use lambda_http::{
    Body, Error, Request, RequestExt, Response,
    http::{Method, StatusCode, header},
};
use serde::Serialize;
use serde_json::{Map, Value};

/// Query parameter selecting a single user.
pub const EMAIL_PARAMETER: &str = "email";

const MISSING_EMAIL: &str = "missing email";
const INVALID_EMAIL: &str = "invalid email";
const INVALID_USER_BODY: &str = "could not marshal item";
const INVALID_PATCH_BODY: &str = "invalid request body";
const DELETE_FAILED: &str = "failed to delete user";
const METHOD_NOT_ALLOWED: &str = "method not allowed";
const UPDATED: &str = "successfully updated user";
const DELETED: &str = "successfully deleted user";

/// Error payload, serialized as `{"error": "..."}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ErrorBody {
    /// Human readable message, omitted when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Create an error payload with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }
}

/// Serialize `body` into a JSON response with the given status.
pub fn api_response<T: Serialize + ?Sized>(
    status: StatusCode,
    body: &T,
) -> Result<Response<Body>, Error> {
    let body = serde_json::to_string(body)?;
    let response = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::Text(body))?;
    Ok(response)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Result<Response<Body>, Error> {
    api_response(status, &ErrorBody::new(message))
}

/// Status code answering a failed store operation.
fn error_status(error: &UserError) -> StatusCode {
    match error {
        err if err.is_invalid_input() => StatusCode::BAD_REQUEST,
        UserError::NotFound => StatusCode::NOT_FOUND,
        UserError::AlreadyExists => StatusCode::CONFLICT,
        _ => StatusCode::BAD_GATEWAY,
    }
}

fn store_error_response(error: UserError) -> Result<Response<Body>, Error> {
    let status = error_status(&error);
    if status.is_server_error() {
        tracing::error!(error = ?error, "user store operation failed");
    } else {
        tracing::warn!(%error, "user store rejected the request");
    }
    error_response(status, error.to_string())
}

/// The non-empty `email` query parameter, if any.
fn email_parameter(request: &Request) -> Option<String> {
    request
        .query_string_parameters()
        .first(EMAIL_PARAMETER)
        .filter(|email| !email.is_empty())
        .map(str::to_string)
}

/// Route a request to the matching handler.
#[tracing::instrument(skip_all, fields(method = %request.method()))]
pub async fn handle_request<S: UserStore + ?Sized>(
    store: &S,
    request: Request,
) -> Result<Response<Body>, Error> {
    let response = match *request.method() {
        Method::GET => get_user(store, &request).await,
        Method::POST => create_user(store, &request).await,
        Method::PATCH | Method::PUT => update_user(store, &request).await,
        Method::DELETE => delete_user(store, &request).await,
        _ => unhandled_method(),
    }?;
    tracing::info!(status = response.status().as_u16(), "request handled");
    Ok(response)
}

/// Fetch the user named by `email`, or every user when it is absent.
///
/// A missing user answers 200 with a `null` body.
pub async fn get_user<S: UserStore + ?Sized>(
    store: &S,
    request: &Request,
) -> Result<Response<Body>, Error> {
    match email_parameter(request) {
        Some(email) => match store.fetch_user(&email).await {
            Ok(user) => api_response(StatusCode::OK, &user),
            Err(err) => store_error_response(err),
        },
        None => match store.fetch_users().await {
            Ok(users) => api_response(StatusCode::OK, &users),
            Err(err) => store_error_response(err),
        },
    }
}

/// Create the user described by the request body.
pub async fn create_user<S: UserStore + ?Sized>(
    store: &S,
    request: &Request,
) -> Result<Response<Body>, Error> {
    let user: User = match serde_json::from_slice(request.body().as_ref()) {
        Ok(user) => user,
        Err(err) => {
            tracing::debug!(%err, "rejected user body");
            return error_response(StatusCode::BAD_REQUEST, INVALID_USER_BODY);
        }
    };
    if !validators::is_email_valid(&user.email) {
        return error_response(StatusCode::BAD_REQUEST, INVALID_EMAIL);
    }
    match store.create_user(user).await {
        Ok(user) => api_response(StatusCode::CREATED, &user),
        Err(err) => store_error_response(err),
    }
}

/// Apply the property-bag in the request body to the user named by `email`.
pub async fn update_user<S: UserStore + ?Sized>(
    store: &S,
    request: &Request,
) -> Result<Response<Body>, Error> {
    let Some(email) = email_parameter(request) else {
        return error_response(StatusCode::BAD_REQUEST, MISSING_EMAIL);
    };
    let updates: Map<String, Value> = match serde_json::from_slice(request.body().as_ref()) {
        Ok(updates) => updates,
        Err(err) => {
            tracing::debug!(%err, "rejected update body");
            return error_response(StatusCode::BAD_REQUEST, INVALID_PATCH_BODY);
        }
    };
    match store.update_user(&email, updates).await {
        Ok(()) => api_response(StatusCode::OK, UPDATED),
        Err(err) => store_error_response(err),
    }
}

/// Delete the user named by `email`.
pub async fn delete_user<S: UserStore + ?Sized>(
    store: &S,
    request: &Request,
) -> Result<Response<Body>, Error> {
    let Some(email) = email_parameter(request) else {
        return error_response(StatusCode::BAD_REQUEST, MISSING_EMAIL);
    };
    match store.delete_user(&email).await {
        Ok(()) => api_response(StatusCode::OK, DELETED),
        Err(err) => {
            tracing::error!(error = ?err, "user store operation failed");
            error_response(StatusCode::BAD_GATEWAY, DELETE_FAILED)
        }
    }
}

/// Answer a method without a handler.
pub fn unhandled_method() -> Result<Response<Body>, Error> {
    error_response(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::memory::MemoryUserStore;

    use lambda_http::http;
    use rstest::{fixture, rstest};
    use serde_json::json;
    use std::collections;

    fn request(method: Method, email: Option<&str>, body: Body) -> Request {
        let request = http::Request::builder()
            .method(method)
            .uri("https://api.example.com/users")
            .body(body)
            .unwrap();
        match email {
            Some(email) => request.with_query_string_parameters(collections::HashMap::from([(
                EMAIL_PARAMETER.to_string(),
                email.to_string(),
            )])),
            None => request,
        }
    }

    fn json_request(method: Method, email: Option<&str>, body: Value) -> Request {
        request(method, email, Body::Text(body.to_string()))
    }

    fn json_body(response: &Response<Body>) -> Value {
        serde_json::from_slice(response.body().as_ref()).unwrap()
    }

    fn jane() -> Value {
        json!({"email": "jane@example.com", "firstName": "Jane", "lastName": "Doe"})
    }

    #[fixture]
    fn store() -> MemoryUserStore {
        MemoryUserStore::default()
    }

    async fn seeded() -> MemoryUserStore {
        let store = MemoryUserStore::default();
        let response = handle_request(&store, json_request(Method::POST, None, jane()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        store
    }

    #[test]
    fn test_api_response_sets_json_content_type() {
        let response = api_response(StatusCode::OK, &json!({"a": 1})).unwrap();
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(json_body(&response), json!({"a": 1}));
    }

    #[test]
    fn test_error_body_omits_missing_message() {
        assert_eq!(serde_json::to_string(&ErrorBody::default()).unwrap(), "{}");
    }

    #[rstest]
    #[tokio::test]
    async fn test_get_users_on_empty_table(store: MemoryUserStore) {
        let response = handle_request(&store, request(Method::GET, None, Body::Empty))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(&response), json!([]));
    }

    #[rstest]
    #[tokio::test]
    async fn test_get_missing_user_is_null(store: MemoryUserStore) {
        let response = handle_request(
            &store,
            request(Method::GET, Some("nobody@example.com"), Body::Empty),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(&response), Value::Null);
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store = seeded().await;
        let response = handle_request(
            &store,
            request(Method::GET, Some("jane@example.com"), Body::Empty),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(&response), jane());

        let response = handle_request(&store, request(Method::GET, None, Body::Empty))
            .await
            .unwrap();
        assert_eq!(json_body(&response), json!([jane()]));
    }

    #[tokio::test]
    async fn test_get_with_empty_email_lists_users() {
        let store = seeded().await;
        let response = handle_request(&store, request(Method::GET, Some(""), Body::Empty))
            .await
            .unwrap();
        assert_eq!(json_body(&response), json!([jane()]));
    }

    #[rstest]
    #[case::invalid_email(
        Body::Text(json!({"email": "not-an-email", "firstName": "A", "lastName": "B"}).to_string()),
        json!({"error": "invalid email"})
    )]
    #[case::malformed_json(
        Body::Text("{\"email\":".to_string()),
        json!({"error": "could not marshal item"})
    )]
    #[case::empty_body(
        Body::Empty,
        json!({"error": "could not marshal item"})
    )]
    #[tokio::test]
    async fn test_create_rejects(#[case] body: Body, #[case] expected: Value) {
        let store = MemoryUserStore::default();
        let response = handle_request(&store, request(Method::POST, None, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(&response), expected);
        assert!(store.fetch_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_existing_user_conflicts() {
        let store = seeded().await;
        let response = handle_request(&store, json_request(Method::POST, None, jane()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(json_body(&response), json!({"error": "user already exists"}));
    }

    #[rstest]
    #[case::patch(Method::PATCH)]
    #[case::put(Method::PUT)]
    #[tokio::test]
    async fn test_update(#[case] method: Method) {
        let store = seeded().await;
        let response = handle_request(
            &store,
            json_request(method, Some("jane@example.com"), json!({"firstName": "X"})),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(&response), json!("successfully updated user"));

        let user = store.fetch_user("jane@example.com").await.unwrap().unwrap();
        assert_eq!(user.first_name, "X");
        assert_eq!(user.last_name, "Doe");
    }

    #[rstest]
    #[case::missing_email(
        None,
        Body::Text(json!({"firstName": "X"}).to_string()),
        StatusCode::BAD_REQUEST,
        json!({"error": "missing email"})
    )]
    #[case::malformed_body(
        Some("jane@example.com"),
        Body::Text("[1, 2]".to_string()),
        StatusCode::BAD_REQUEST,
        json!({"error": "invalid request body"})
    )]
    #[case::unsupported_value(
        Some("jane@example.com"),
        Body::Text(json!({"firstName": {"nested": true}}).to_string()),
        StatusCode::BAD_REQUEST,
        json!({"error": "unsupported attribute value type"})
    )]
    #[case::empty_patch(
        Some("jane@example.com"),
        Body::Text("{}".to_string()),
        StatusCode::BAD_REQUEST,
        json!({"error": "no attributes to update"})
    )]
    #[case::key_update(
        Some("jane@example.com"),
        Body::Text(json!({"email": "other@example.com"}).to_string()),
        StatusCode::BAD_REQUEST,
        json!({"error": "email cannot be updated"})
    )]
    #[case::empty_attribute_name(
        Some("jane@example.com"),
        Body::Text(json!({"": "x"}).to_string()),
        StatusCode::BAD_REQUEST,
        json!({"error": "attribute name cannot be empty"})
    )]
    #[case::unknown_user(
        Some("nobody@example.com"),
        Body::Text(json!({"firstName": "X"}).to_string()),
        StatusCode::NOT_FOUND,
        json!({"error": "user not found"})
    )]
    #[tokio::test]
    async fn test_update_rejects(
        #[case] email: Option<&str>,
        #[case] body: Body,
        #[case] status: StatusCode,
        #[case] expected: Value,
    ) {
        let store = seeded().await;
        let response = handle_request(&store, request(Method::PATCH, email, body))
            .await
            .unwrap();
        assert_eq!(response.status(), status);
        assert_eq!(json_body(&response), expected);
        assert_eq!(
            store.fetch_users().await.unwrap(),
            vec![serde_json::from_value::<User>(jane()).unwrap()]
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let store = seeded().await;
        let response = handle_request(
            &store,
            request(Method::DELETE, Some("jane@example.com"), Body::Empty),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(&response), json!("successfully deleted user"));
        assert_eq!(store.fetch_user("jane@example.com").await.unwrap(), None);
    }

    #[rstest]
    #[tokio::test]
    async fn test_delete_without_email(store: MemoryUserStore) {
        let response = handle_request(&store, request(Method::DELETE, None, Body::Empty))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(&response), json!({"error": "missing email"}));
    }

    #[rstest]
    #[case::options(Method::OPTIONS)]
    #[case::head(Method::HEAD)]
    #[tokio::test]
    async fn test_unhandled_method(#[case] method: Method) {
        let store = MemoryUserStore::default();
        let response = handle_request(&store, request(method, None, Body::Empty))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(json_body(&response), json!({"error": "method not allowed"}));
    }

    #[rstest]
    #[case::invalid_input(UserError::EmptyPatch, StatusCode::BAD_REQUEST)]
    #[case::not_found(UserError::NotFound, StatusCode::NOT_FOUND)]
    #[case::conflict(UserError::AlreadyExists, StatusCode::CONFLICT)]
    #[case::store(UserError::FetchRecords("timeout".into()), StatusCode::BAD_GATEWAY)]
    fn test_error_status(#[case] error: UserError, #[case] expected: StatusCode) {
        assert_eq!(error_status(&error), expected);
    }
}
