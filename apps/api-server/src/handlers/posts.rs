//! Post handlers - the REST surface over the posts service.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use quill_core::domain::{NewPost, Post, PostPatch};
use quill_core::service::ListOptions;
use quill_shared::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(crate) fn post_response(post: &Post) -> PostResponse {
    PostResponse {
        id: post.id.to_hex(),
        title: post.title.clone(),
        contents: post.contents.clone(),
        author: post.author.to_hex(),
        tags: post.tags.clone(),
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsQuery {
    sort_by: Option<String>,
    sort_order: Option<String>,
    author: Option<String>,
    tag: Option<String>,
}

/// GET /posts?sortBy=&sortOrder=&author=&tag=
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let options = ListOptions {
        sort_by: query.sort_by,
        sort_order: query.sort_order,
    };

    let posts = match (query.author, query.tag) {
        (Some(_), Some(_)) => {
            return Err(AppError::BadRequest(
                "query posts by either author or tag, not both".to_string(),
            ));
        }
        (Some(author), None) => state.posts.list_posts_by_author(&author, options).await?,
        (None, Some(tag)) => state.posts.list_posts_by_tag(&tag, options).await?,
        (None, None) => state.posts.list_all_posts(options).await?,
    };

    let body: Vec<PostResponse> = posts.iter().map(post_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    match state.posts.get_post_by_id(&id).await? {
        Some(post) => Ok(HttpResponse::Ok().json(post_response(&post))),
        None => Err(AppError::NotFound(format!("post {id} not found"))),
    }
}

/// POST /posts - requires authentication; the author is the caller.
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let new_post = NewPost {
        title: req.title,
        contents: req.contents,
        tags: req.tags,
    };

    let post = state.posts.create_post(identity.user_id, new_post).await?;
    Ok(HttpResponse::Created().json(post_response(&post)))
}

/// PATCH /posts/{id} - requires authentication and ownership.
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    let patch = PostPatch {
        contents: req.contents,
        tags: req.tags,
    };

    match state
        .posts
        .update_post(identity.user_id, &id, patch)
        .await?
    {
        Some(post) => Ok(HttpResponse::Ok().json(post_response(&post))),
        None => Err(AppError::NotFound(format!("post {id} not found"))),
    }
}

/// DELETE /posts/{id} - requires authentication and ownership.
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let outcome = state.posts.delete_post(identity.user_id, &id).await?;

    if outcome.deleted_count == 0 {
        return Err(AppError::NotFound(format!("post {id} not found")));
    }
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test, web};
    use serde_json::json;

    use quill_core::ports::TokenService;
    use quill_infra::{JwtConfig, JwtTokenService};
    use quill_shared::dto::{AuthResponse, PostResponse};

    use crate::handlers::configure_routes;
    use crate::state::AppState;

    fn test_token_service() -> Arc<dyn TokenService> {
        Arc::new(JwtTokenService::new(JwtConfig {
            secret: "test-secret-key".to_string(),
            expiration_hours: 1,
            issuer: "test-issuer".to_string(),
        }))
    }

    macro_rules! test_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState::in_memory()))
                    .app_data(web::Data::new(test_token_service()))
                    .app_data(web::Data::new(Arc::new(crate::graphql::create_schema())))
                    .configure(configure_routes),
            )
            .await
        };
    }

    macro_rules! signup_and_login {
        ($app:expr) => {{
            let credentials = json!({ "username": "sample", "password": "user" });

            let res = test::call_service(
                $app,
                test::TestRequest::post()
                    .uri("/users/signup")
                    .set_json(&credentials)
                    .to_request(),
            )
            .await;
            assert_eq!(res.status(), StatusCode::CREATED);

            let res = test::call_service(
                $app,
                test::TestRequest::post()
                    .uri("/users/login")
                    .set_json(&credentials)
                    .to_request(),
            )
            .await;
            assert_eq!(res.status(), StatusCode::OK);

            let auth: AuthResponse = test::read_body_json(res).await;
            auth.access_token
        }};
    }

    #[actix_web::test]
    async fn full_post_lifecycle() {
        let app = test_app!();
        let token = signup_and_login!(&app);
        let bearer = (header::AUTHORIZATION, format!("Bearer {token}"));

        // Create
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/posts")
                .insert_header(bearer.clone())
                .set_json(json!({
                    "title": "Hello Quill!",
                    "contents": "First post",
                    "tags": ["intro"]
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let created: PostResponse = test::read_body_json(res).await;
        assert_eq!(created.title, "Hello Quill!");

        // List
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/posts").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let listed: Vec<PostResponse> = test::read_body_json(res).await;
        assert_eq!(listed.len(), 1);

        // Get by id
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/posts/{}", created.id))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        // Update
        let res = test::call_service(
            &app,
            test::TestRequest::patch()
                .uri(&format!("/posts/{}", created.id))
                .insert_header(bearer.clone())
                .set_json(json!({ "contents": "Updated body" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let updated: PostResponse = test::read_body_json(res).await;
        assert_eq!(updated.contents, "Updated body");
        assert_eq!(updated.title, "Hello Quill!");

        // Delete
        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(&format!("/posts/{}", created.id))
                .insert_header(bearer)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/posts/{}", created.id))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn create_post_requires_auth_and_title() {
        let app = test_app!();

        // No token
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/posts")
                .set_json(json!({ "title": "Anonymous" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        // Token but no title
        let token = signup_and_login!(&app);
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/posts")
                .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
                .set_json(json!({ "contents": "no title" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert!(body["detail"].as_str().unwrap().contains("title"));
    }

    #[actix_web::test]
    async fn listing_rejects_author_and_tag_together() {
        let app = test_app!();

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/posts?author=sample&tag=react")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn unknown_ids_map_to_not_found() {
        let app = test_app!();

        for id in ["000000000000000000000000", "not-an-object-id"] {
            let res = test::call_service(
                &app,
                test::TestRequest::get()
                    .uri(&format!("/posts/{id}"))
                    .to_request(),
            )
            .await;
            assert_eq!(res.status(), StatusCode::NOT_FOUND);
        }
    }
}
