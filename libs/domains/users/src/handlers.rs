use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};
use axum_helpers::{AppJson, ErrorResponse, UuidPath};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::{
    CreateUserRequest, ListUsersQuery, UpdateUserStatusRequest, UserPage, UserResponse, UserStatus,
};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user_status, delete_user),
    components(schemas(
        CreateUserRequest,
        UpdateUserStatusRequest,
        UserResponse,
        UserStatus,
        UserPage<UserResponse>,
        ErrorResponse,
    )),
    tags(
        (name = "Users", description = "User management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).delete(delete_user))
        .route("/{id}/status", patch(update_user_status))
        .with_state(shared_service)
}

/// List users with paging, an optional status filter, and an optional
/// name/email search
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Page of users", body = UserPage<UserResponse>),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Query(query): Query<ListUsersQuery>,
) -> UserResult<Json<UserPage<UserResponse>>> {
    let page = service.list_users(query).await?;
    Ok(Json(page))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, description = "Validation failure or duplicate email", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    AppJson(input): AppJson<CreateUserRequest>,
) -> UserResult<Json<UserResponse>> {
    let user = service.create_user(input).await?;
    Ok(Json(user))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<UserResponse>> {
    let user = service.get_user(id).await?;
    Ok(Json(user))
}

/// Update a user's status
#[utoipa::path(
    patch,
    path = "/{id}/status",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUserStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = UserResponse),
        (status = 400, description = "Missing status", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
async fn update_user_status<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
    AppJson(input): AppJson<UpdateUserStatusRequest>,
) -> UserResult<Json<UserResponse>> {
    let user = service.update_user_status(id, input).await?;
    Ok(Json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<impl IntoResponse> {
    service.delete_user(id).await?;
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::repository::MockUserRepository;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn app(mock_repo: MockUserRepository) -> Router {
        router(UserService::new(mock_repo))
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn create_returns_200_with_active_status() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_email().returning(|_| Ok(None));
        mock_repo
            .expect_insert()
            .returning(|input| Ok(User::new(input)));

        let response = app(mock_repo)
            .oneshot(post_json(
                "/",
                json!({ "name": "Sai", "email": "sai@test.com" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ACTIVE");
        assert_eq!(body["name"], "Sai");
        assert!(body["id"].as_str().is_some());
    }

    #[tokio::test]
    async fn create_duplicate_email_returns_400() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_email().returning(|email| {
            Ok(Some(User::new(CreateUserRequest {
                name: "Existing".to_string(),
                email: email.to_string(),
            })))
        });

        let response = app(mock_repo)
            .oneshot(post_json(
                "/",
                json!({ "name": "Sai", "email": "sai@test.com" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["message"], "User with this email already exists");
    }

    #[tokio::test]
    async fn create_blank_name_returns_first_violation() {
        let response = app(MockUserRepository::new())
            .oneshot(post_json(
                "/",
                json!({ "name": "  ", "email": "not-an-email" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Name cannot be empty");
    }

    #[tokio::test]
    async fn get_missing_user_returns_404() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let response = app(mock_repo)
            .oneshot(
                Request::get(format!("/{}", Uuid::now_v7()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["message"], "User not found");
    }

    #[tokio::test]
    async fn get_invalid_uuid_returns_400() {
        let response = app(MockUserRepository::new())
            .oneshot(Request::get("/not-a-uuid").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn patch_status_returns_updated_projection() {
        let user = User::new(CreateUserRequest {
            name: "Sai".to_string(),
            email: "sai@test.com".to_string(),
        });
        let id = user.id;

        let mut mock_repo = MockUserRepository::new();
        let stored = user.clone();
        mock_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        mock_repo.expect_update().returning(Ok);

        let request = Request::patch(format!("/{}/status", id))
            .header("content-type", "application/json")
            .body(Body::from(json!({ "status": "BLOCKED" }).to_string()))
            .unwrap();

        let response = app(mock_repo).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "BLOCKED");
    }

    #[tokio::test]
    async fn patch_without_status_returns_400() {
        let request = Request::patch(format!("/{}/status", Uuid::now_v7()))
            .header("content-type", "application/json")
            .body(Body::from(json!({}).to_string()))
            .unwrap();

        let response = app(MockUserRepository::new()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Status is required");
    }

    #[tokio::test]
    async fn delete_returns_200_with_empty_body() {
        let user = User::new(CreateUserRequest {
            name: "Sai".to_string(),
            email: "sai@test.com".to_string(),
        });
        let id = user.id;

        let mut mock_repo = MockUserRepository::new();
        let stored = user.clone();
        mock_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        mock_repo.expect_delete().returning(|_| Ok(()));

        let response = app(mock_repo)
            .oneshot(
                Request::delete(format!("/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn list_unrecognized_status_is_treated_as_absent() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_page()
            .withf(|filter, _, _| *filter == crate::models::UserFilter::All)
            .returning(|_, page, size| Ok(UserPage::new(vec![], 0, page, size)));

        let response = app(mock_repo)
            .oneshot(Request::get("/?status=SLEEPING").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["totalElements"], 0);
        assert_eq!(body["page"], 0);
    }
}
