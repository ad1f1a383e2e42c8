//! GraphQL schema and endpoint.
//!
//! The endpoint runs under optional auth: a valid bearer token attaches the
//! caller's identity to the context, unauthenticated requests still execute.

pub mod query;

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use juniper::http::GraphQLRequest;
use juniper::{EmptyMutation, EmptySubscription, RootNode};

use quill_core::service::PostsService;

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::state::AppState;
use query::Query;

/// Per-request GraphQL context.
pub struct GraphQLContext {
    pub posts: Arc<PostsService>,
    pub identity: Option<Identity>,
}

impl juniper::Context for GraphQLContext {}

pub type Schema =
    RootNode<'static, Query, EmptyMutation<GraphQLContext>, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    RootNode::new(Query, EmptyMutation::new(), EmptySubscription::new())
}

/// POST /graphql
pub async fn graphql_handler(
    state: web::Data<AppState>,
    schema: web::Data<Arc<Schema>>,
    identity: OptionalIdentity,
    request: web::Json<GraphQLRequest>,
) -> HttpResponse {
    let context = GraphQLContext {
        posts: state.posts.clone(),
        identity: identity.0,
    };

    if let Some(identity) = &context.identity {
        tracing::debug!(username = %identity.username, "authenticated GraphQL request");
    }

    let response = request.execute(schema.get_ref().as_ref(), &context).await;
    HttpResponse::Ok().json(&response)
}
