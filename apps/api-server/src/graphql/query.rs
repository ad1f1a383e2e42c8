//! GraphQL query root, mirroring the posts service surface.

use juniper::{FieldError, FieldResult, GraphQLInputObject, GraphQLObject, ID, graphql_object};

use quill_core::domain::Post;
use quill_core::error::DomainError;
use quill_core::service::ListOptions;

use super::GraphQLContext;

/// Sorting options for post listings.
#[derive(GraphQLInputObject, Debug, Default)]
pub struct PostsOptions {
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl From<PostsOptions> for ListOptions {
    fn from(options: PostsOptions) -> Self {
        Self {
            sort_by: options.sort_by,
            sort_order: options.sort_order,
        }
    }
}

/// A blog post.
#[derive(GraphQLObject, Debug)]
#[graphql(name = "Post")]
pub struct PostObject {
    pub id: ID,
    pub title: String,
    pub contents: String,
    pub author: ID,
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Post> for PostObject {
    fn from(post: &Post) -> Self {
        Self {
            id: ID::from(post.id.to_hex()),
            title: post.title.clone(),
            contents: post.contents.clone(),
            author: ID::from(post.author.to_hex()),
            tags: post.tags.clone(),
            created_at: post.created_at.to_rfc3339(),
            updated_at: post.updated_at.to_rfc3339(),
        }
    }
}

fn field_error(err: DomainError) -> FieldError {
    FieldError::from(err.to_string())
}

fn resolve(options: Option<PostsOptions>) -> ListOptions {
    options.unwrap_or_default().into()
}

pub struct Query;

#[graphql_object(context = GraphQLContext)]
impl Query {
    /// No-op connectivity check.
    fn test() -> Option<&'static str> {
        Some("Hello World from GraphQL!")
    }

    /// All posts, newest first unless options say otherwise.
    async fn posts(
        context: &GraphQLContext,
        options: Option<PostsOptions>,
    ) -> FieldResult<Vec<PostObject>> {
        let posts = context
            .posts
            .list_all_posts(resolve(options))
            .await
            .map_err(field_error)?;
        Ok(posts.iter().map(PostObject::from).collect())
    }

    /// Posts by the given author's username. Unknown usernames resolve to
    /// an empty list.
    async fn posts_by_author(
        context: &GraphQLContext,
        username: String,
        options: Option<PostsOptions>,
    ) -> FieldResult<Vec<PostObject>> {
        let posts = context
            .posts
            .list_posts_by_author(&username, resolve(options))
            .await
            .map_err(field_error)?;
        Ok(posts.iter().map(PostObject::from).collect())
    }

    /// Posts whose tag sequence contains the given tag.
    async fn posts_by_tag(
        context: &GraphQLContext,
        tag: String,
        options: Option<PostsOptions>,
    ) -> FieldResult<Vec<PostObject>> {
        let posts = context
            .posts
            .list_posts_by_tag(&tag, resolve(options))
            .await
            .map_err(field_error)?;
        Ok(posts.iter().map(PostObject::from).collect())
    }

    /// A single post, or null for unknown and malformed ids alike.
    async fn post_by_id(context: &GraphQLContext, id: ID) -> FieldResult<Option<PostObject>> {
        let post = context
            .posts
            .get_post_by_id(&id)
            .await
            .map_err(field_error)?;
        Ok(post.as_ref().map(PostObject::from))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use juniper::{Variables, execute, graphql_value};

    use quill_core::domain::{NewPost, User};
    use quill_core::ports::UserRepository;
    use quill_core::service::PostsService;
    use quill_infra::database::{InMemoryPostRepository, InMemoryUserRepository};

    use super::super::{GraphQLContext, create_schema};

    async fn seeded_context() -> GraphQLContext {
        let post_repo = Arc::new(InMemoryPostRepository::new());
        let user_repo = Arc::new(InMemoryUserRepository::new());
        let user = user_repo
            .insert(User::new("sample".to_string(), "hash".to_string()))
            .await
            .unwrap();

        let posts = PostsService::new(post_repo, user_repo);
        for (title, tags) in [
            ("Learning Redux", vec!["redux"]),
            ("Full-Stack React Projects", vec!["react", "nodejs"]),
        ] {
            posts
                .create_post(
                    user.id,
                    NewPost {
                        title: Some(title.to_string()),
                        contents: None,
                        tags: Some(tags.into_iter().map(String::from).collect()),
                    },
                )
                .await
                .unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        GraphQLContext {
            posts: Arc::new(posts),
            identity: None,
        }
    }

    #[tokio::test]
    async fn test_field_returns_the_greeting() {
        let schema = create_schema();
        let context = seeded_context().await;

        let (value, errors) = execute("{ test }", None, &schema, &Variables::new(), &context)
            .await
            .unwrap();

        assert!(errors.is_empty());
        assert_eq!(
            value,
            graphql_value!({ "test": "Hello World from GraphQL!" })
        );
    }

    #[tokio::test]
    async fn posts_query_honors_sorting_options() {
        let schema = create_schema();
        let context = seeded_context().await;

        let query = r#"{
            posts(options: { sortBy: "createdAt", sortOrder: "ascending" }) { title }
        }"#;
        let (value, errors) = execute(query, None, &schema, &Variables::new(), &context)
            .await
            .unwrap();

        assert!(errors.is_empty());
        assert_eq!(
            value,
            graphql_value!({
                "posts": [
                    { "title": "Learning Redux" },
                    { "title": "Full-Stack React Projects" },
                ]
            })
        );
    }

    #[tokio::test]
    async fn posts_by_author_and_tag_filter() {
        let schema = create_schema();
        let context = seeded_context().await;

        let (value, errors) = execute(
            r#"{ postsByAuthor(username: "sample") { author } }"#,
            None,
            &schema,
            &Variables::new(),
            &context,
        )
        .await
        .unwrap();
        assert!(errors.is_empty());
        let authored = value
            .as_object_value()
            .and_then(|o| o.get_field_value("postsByAuthor"))
            .and_then(|v| v.as_list_value())
            .unwrap();
        assert_eq!(authored.len(), 2);

        let (value, errors) = execute(
            r#"{ postsByTag(tag: "nodejs") { title } }"#,
            None,
            &schema,
            &Variables::new(),
            &context,
        )
        .await
        .unwrap();
        assert!(errors.is_empty());
        assert_eq!(
            value,
            graphql_value!({
                "postsByTag": [{ "title": "Full-Stack React Projects" }]
            })
        );
    }

    #[tokio::test]
    async fn post_by_id_resolves_unknown_ids_to_null() {
        let schema = create_schema();
        let context = seeded_context().await;

        let (value, errors) = execute(
            r#"{ postById(id: "000000000000000000000000") { title } }"#,
            None,
            &schema,
            &Variables::new(),
            &context,
        )
        .await
        .unwrap();

        assert!(errors.is_empty());
        assert_eq!(value, graphql_value!({ "postById": null }));
    }
}
