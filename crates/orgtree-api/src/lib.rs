//! JSON REST API for orgtree.
//!
//! Exposes an axum [`Router`] backed by any
//! [`orgtree_core::repository::ChartRepository`]. Auth, TLS, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", orgtree_api::api_router(repo.clone()))
//! ```

pub mod error;
pub mod orgchart;

use std::sync::Arc;

use axum::{Router, routing::get};
use orgtree_core::repository::ChartRepository;

pub use error::ApiError;

/// Build a fully-materialised API router for `repo`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<R>(repo: Arc<R>) -> Router<()>
where
  R: ChartRepository + 'static,
  R::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/orgchart", get(orgchart::load::<R>).post(orgchart::save::<R>))
    .with_state(repo)
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
  };
  use orgtree_core::{
    OrgNode,
    envelope::{LoadResponse, SaveResponse},
    mutate::add_child,
    node::MAX_DEPTH,
  };
  use orgtree_store_sqlite::SqliteRepository;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  use super::*;

  async fn router() -> Router {
    let repo = SqliteRepository::open_in_memory().await.unwrap();
    api_router(Arc::new(repo))
  }

  async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), 1024 * 1024).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }

  fn get_chart() -> Request<Body> {
    Request::get("/orgchart").body(Body::empty()).unwrap()
  }

  fn post_chart(body: Value) -> Request<Body> {
    Request::post("/orgchart")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string()))
      .unwrap()
  }

  #[tokio::test]
  async fn load_before_any_save_has_no_data() {
    let app = router().await;
    let (status, body) = send(&app, get_chart()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
  }

  #[tokio::test]
  async fn save_then_load_returns_the_tree() {
    let app = router().await;
    let tree = add_child(&OrgNode::default_root(), "root-1");

    let (status, body) = send(&app, post_chart(json!({ "tree": tree }))).await;
    assert_eq!(status, StatusCode::OK);
    let saved: SaveResponse = serde_json::from_value(body).unwrap();
    assert!(saved.success);
    assert_eq!(saved.message.as_deref(), Some(orgchart::SAVED_MESSAGE));

    let (_, body) = send(&app, get_chart()).await;
    let loaded: LoadResponse = serde_json::from_value(body).unwrap();
    assert_eq!(loaded.data, Some(tree));
  }

  #[tokio::test]
  async fn blank_ids_are_assigned_by_the_server() {
    let app = router().await;
    let body = json!({
      "tree": {
        "id": "root-1",
        "name": "CEO",
        "position": "Chief Executive Officer",
        "children": [{ "name": "Dana", "position": "Buyer" }]
      }
    });
    let (status, _) = send(&app, post_chart(body)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get_chart()).await;
    let loaded: LoadResponse = serde_json::from_value(body).unwrap();
    let tree = loaded.data.unwrap();
    let child = &tree.children[0];
    assert!(child.id.starts_with("node-"));
    assert_eq!(child.name, "Dana");
    assert!(child.email.is_empty());
  }

  #[tokio::test]
  async fn duplicate_ids_are_rejected() {
    let app = router().await;
    let mut tree = OrgNode::default_root();
    let mut dup = OrgNode::default_root();
    dup.name = "Shadow".into();
    tree.children.push(dup);

    let (status, body) = send(&app, post_chart(json!({ "tree": tree }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("root-1"));

    let (_, body) = send(&app, get_chart()).await;
    assert_eq!(body, json!({ "success": true }));
  }

  /// root-1 → c2 → … → c{levels}
  fn chain(levels: usize) -> OrgNode {
    let mut tree = OrgNode::default_root();
    for level in (2..=levels).rev() {
      let mut parent = OrgNode { id: format!("c{level}"), ..OrgNode::default() };
      if level < levels {
        parent.children.push(tree.children.remove(0));
      }
      tree.children.push(parent);
    }
    tree
  }

  #[tokio::test]
  async fn deepest_allowed_chart_round_trips() {
    let app = router().await;
    let tree = chain(MAX_DEPTH);
    assert_eq!(tree.depth(), MAX_DEPTH);

    let (status, _) = send(&app, post_chart(json!({ "tree": tree }))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get_chart()).await;
    let loaded: LoadResponse = serde_json::from_value(body).unwrap();
    assert_eq!(loaded.data, Some(tree));
  }

  #[tokio::test]
  async fn chart_past_depth_limit_is_rejected() {
    let app = router().await;
    let tree = chain(MAX_DEPTH + 1);

    let (status, body) = send(&app, post_chart(json!({ "tree": tree }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("depth limit"));

    let (_, body) = send(&app, get_chart()).await;
    assert_eq!(body, json!({ "success": true }));
  }

  #[tokio::test]
  async fn malformed_body_gets_failure_envelope() {
    let app = router().await;
    let req = Request::post("/orgchart")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{\"tree\": 12}"))
      .unwrap();
    let (status, body) = send(&app, req).await;
    assert!(status.is_client_error());
    assert_eq!(body["success"], false);
  }

  #[test]
  fn assign_missing_ids_counts_assignments() {
    let mut tree = OrgNode::default_root();
    tree.children.push(OrgNode::default());
    tree.children.push(OrgNode { id: "   ".into(), ..OrgNode::default() });
    assert_eq!(orgchart::assign_missing_ids(&mut tree), 2);
    assert!(tree.validate().is_ok());
    assert_eq!(orgchart::assign_missing_ids(&mut tree), 0);
  }
}
