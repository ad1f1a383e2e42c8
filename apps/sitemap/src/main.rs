//! Sitemap generator CLI.
//!
//! Fetches all posts from the REST API and writes a sitemap XML document to
//! stdout: the static routes plus one `<url>` entry per post, addressed by
//! id and slugified title.

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// The post fields the sitemap needs, as served by `GET /posts`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SitemapPost {
    #[serde(rename = "_id")]
    id: String,
    title: String,
    created_at: String,
    updated_at: Option<String>,
}

/// Environment-driven configuration, with defaults for local development:
/// `FRONTEND_URL` (http://localhost:5173), `BACKEND_URL`
/// (http://localhost:3000).
#[derive(Debug, Clone)]
struct SitemapConfig {
    frontend_url: String,
    backend_url: String,
}

impl SitemapConfig {
    fn from_env() -> Self {
        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());
        let backend_url =
            std::env::var("BACKEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        Self {
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
            backend_url: backend_url.trim_end_matches('/').to_string(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_env_filter("info").init();

    let config = SitemapConfig::from_env();
    let sitemap = generate_sitemap(&config).await?;
    println!("{sitemap}");

    Ok(())
}

async fn generate_sitemap(config: &SitemapConfig) -> Result<String> {
    let url = format!("{}/posts", config.backend_url);
    tracing::info!(%url, "fetching posts");

    let response = reqwest::Client::new()
        .get(&url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .with_context(|| format!("GET {url}"))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        bail!("GET {url} -> {status}\n{body}");
    }

    let posts: Vec<SitemapPost> = response
        .json()
        .await
        .with_context(|| format!("decoding posts from {url}"))?;

    Ok(render_sitemap(&config.frontend_url, &posts))
}

fn render_sitemap(base_url: &str, posts: &[SitemapPost]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for route in ["", "/signup", "/login"] {
        xml.push_str(&format!("<url>\n<loc>{base_url}{route}</loc>\n</url>\n"));
    }

    for post in posts {
        let lastmod = post.updated_at.as_deref().unwrap_or(&post.created_at);
        xml.push_str(&format!(
            "<url>\n<loc>{base_url}/posts/{id}/{slug}</loc>\n<lastmod>{lastmod}</lastmod>\n</url>\n",
            id = post.id,
            slug = slug::slugify(&post.title),
        ));
    }

    xml.push_str("</urlset>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_posts() -> Vec<SitemapPost> {
        vec![
            SitemapPost {
                id: "64f1c0ffee0000000000aaaa".to_string(),
                title: "Learning Redux".to_string(),
                created_at: "2026-08-01T10:00:00Z".to_string(),
                updated_at: Some("2026-08-02T12:30:00Z".to_string()),
            },
            SitemapPost {
                id: "64f1c0ffee0000000000bbbb".to_string(),
                title: "Full-Stack React Projects".to_string(),
                created_at: "2026-08-03T09:00:00Z".to_string(),
                updated_at: None,
            },
        ]
    }

    #[test]
    fn includes_the_static_routes() {
        let xml = render_sitemap("https://blog.example.com", &[]);

        assert!(xml.contains("<loc>https://blog.example.com</loc>"));
        assert!(xml.contains("<loc>https://blog.example.com/signup</loc>"));
        assert!(xml.contains("<loc>https://blog.example.com/login</loc>"));
        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn lists_each_post_with_a_slugified_title() {
        let xml = render_sitemap("https://blog.example.com", &sample_posts());

        assert!(xml.contains(
            "<loc>https://blog.example.com/posts/64f1c0ffee0000000000aaaa/learning-redux</loc>"
        ));
        assert!(xml.contains(
            "<loc>https://blog.example.com/posts/64f1c0ffee0000000000bbbb/full-stack-react-projects</loc>"
        ));
    }

    #[test]
    fn lastmod_falls_back_to_the_creation_date() {
        let xml = render_sitemap("https://blog.example.com", &sample_posts());

        assert!(xml.contains("<lastmod>2026-08-02T12:30:00Z</lastmod>"));
        assert!(xml.contains("<lastmod>2026-08-03T09:00:00Z</lastmod>"));
    }
}
