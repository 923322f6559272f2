use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use gradbook::model::{ReportStatus, UserRole};
use gradbook::resources::{ReviewReport, TagInput, UserFilters};
use gradbook::store::{AuthStore, TOKEN_KEY};
use gradbook::{
    ApiClient, ApiRequest, Envelope, EnvelopeKind, Error, KeyValueStore, MemoryStore, Method,
    RawResponse, Result, Transport,
};
use serde_json::{Value, json};

/// Replays canned responses and records what was sent.
#[derive(Default)]
struct FakeTransport {
    responses: Mutex<VecDeque<RawResponse>>,
    sent: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    fn replying(responses: Vec<RawResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn sent(&self) -> Vec<ApiRequest> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse> {
        self.sent.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Http("no canned response".to_string()))
    }
}

fn client(responses: Vec<RawResponse>) -> (ApiClient<FakeTransport>, Arc<dyn KeyValueStore>) {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    (ApiClient::new(FakeTransport::replying(responses), store.clone()), store)
}

#[tokio::test]
async fn attaches_stored_token() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let (client, store) = client(vec![RawResponse::new(200, "{}"), RawResponse::new(200, "{}")]);
    client.get("/admin/analytics").await?;
    store.set(TOKEN_KEY, "t0k3n")?;
    client.get("/admin/analytics").await?;

    let sent = client.transport().sent();
    assert_eq!(sent[0].bearer, None);
    assert_eq!(sent[1].bearer.as_deref(), Some("t0k3n"));
    Ok(())
}

#[tokio::test]
async fn normalizes_successful_bodies() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let body = json!({
        "success": true,
        "data": {
            "data": [{"_id": "u1", "username": "ada", "role": "guest", "campus": "c1"}],
            "pagination": {"currentPage": 1, "totalPages": 1, "totalItems": 1, "itemsPerPage": 10}
        }
    });
    let (client, _) = client(vec![RawResponse::new(200, body.to_string())]);
    let filters = UserFilters {
        page: Some(1),
        search: Some("ada".into()),
        ..Default::default()
    };
    let page = client.list_users(&filters).await?;
    assert_eq!(page.data[0].id, "u1");
    assert_eq!(page.data[0].role, UserRole::Guest);

    let sent = client.transport().sent();
    assert_eq!(sent[0].method, Method::Get);
    assert_eq!(sent[0].path, "/admin/users");
    assert_eq!(
        sent[0].query,
        vec![("page".to_string(), "1".to_string()), ("search".to_string(), "ada".to_string())]
    );
    Ok(())
}

#[tokio::test]
async fn unauthorized_clears_token() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let (client, store) = client(vec![RawResponse::new(401, r#"{"message": "jwt expired"}"#)]);
    store.set(TOKEN_KEY, "old")?;
    let res = client.get_user("u1").await;
    assert!(matches!(res, Err(Error::Unauthorized)));
    assert_eq!(store.get(TOKEN_KEY)?, None);
    Ok(())
}

/// Holds a token but refuses to drop it.
struct StickyStore(MemoryStore);

impl KeyValueStore for StickyStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.0.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.0.set(key, value)
    }

    fn remove(&self, _key: &str) -> Result<()> {
        Err(Error::Store("storage unavailable".to_string()))
    }
}

#[tokio::test]
async fn unauthorized_wins_over_store_failure() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let store: Arc<dyn KeyValueStore> = Arc::new(StickyStore(MemoryStore::new()));
    store.set(TOKEN_KEY, "old")?;
    let transport = FakeTransport::replying(vec![RawResponse::new(401, "")]);
    let client = ApiClient::new(transport, store.clone());

    let res = client.get_user("u1").await;
    assert!(matches!(res, Err(Error::Unauthorized)));
    assert_eq!(store.get(TOKEN_KEY)?.as_deref(), Some("old"));
    Ok(())
}

#[tokio::test]
async fn api_error_carries_envelope_message() {
    let (client, _) = client(vec![RawResponse::new(
        409,
        r#"{"success": false, "message": "tag already exists"}"#,
    )]);
    let input = TagInput {
        name: "ai".into(),
        category: None,
    };
    match client.create_tag(&input).await {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 409);
            assert_eq!(message, "tag already exists");
        }
        other => panic!("unexpected {:?}", other),
    }
    let sent = client.transport().sent();
    assert_eq!(sent[0].body, Some(json!({"name": "ai"})));
}

#[tokio::test]
async fn empty_mutation_body_is_null() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let (client, _) = client(vec![RawResponse::new(204, "")]);
    let v = client.soft_delete_post("p/1").await?;
    assert!(v.is_null());
    let sent = client.transport().sent();
    assert_eq!(sent[0].method, Method::Delete);
    assert_eq!(sent[0].path, "/posts/p%2F1");
    Ok(())
}

#[tokio::test]
async fn plain_text_success_passes_through() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let (client, _) = client(vec![RawResponse::new(200, "Deleted")]);
    let v = client.soft_delete_post("p1").await?;
    assert_eq!(v, Value::String("Deleted".into()));
    assert_eq!(Envelope::from_value(v).kind(), EnvelopeKind::Empty);
    Ok(())
}

#[tokio::test]
async fn review_rejects_pending() {
    let (client, _) = client(vec![]);
    let review = ReviewReport {
        status: ReportStatus::Pending,
        review_notes: None,
    };
    assert!(matches!(client.review_report("r1", &review).await, Err(Error::Message(_))));
    assert!(client.transport().sent().is_empty());
}

#[tokio::test]
async fn review_puts_status_and_notes() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let (client, _) = client(vec![RawResponse::new(200, r#"{"success": true}"#)]);
    let review = ReviewReport {
        status: ReportStatus::Resolved,
        review_notes: Some("warned user".into()),
    };
    client.review_report("r1", &review).await?;
    let sent = client.transport().sent();
    assert_eq!(sent[0].method, Method::Put);
    assert_eq!(sent[0].path, "/admin/reports/r1/review");
    assert_eq!(sent[0].body, Some(json!({"status": "resolved", "reviewNotes": "warned user"})));
    Ok(())
}

#[tokio::test]
async fn academic_paths() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let (client, _) = client(vec![
        RawResponse::new(200, r#"[{"_id": "col1", "name": "Engineering", "campusId": "c1"}]"#),
        RawResponse::new(200, r#"{"data": [{"_id": "d1", "collegeId": "col1"}]}"#),
        RawResponse::new(200, r#"{"success": true}"#),
    ]);
    let colleges = client.colleges(Some("c1")).await?;
    assert_eq!(colleges[0].id, "col1");
    let departments = client.departments(None).await?;
    assert_eq!(departments[0].college_id, "col1");
    let structure = client.academic_structure().await?;
    assert!(structure.is_empty());

    let paths: Vec<String> = client.transport().sent().into_iter().map(|r| r.path).collect();
    assert_eq!(
        paths,
        vec![
            "/categories/campuses/c1/colleges",
            "/categories/departments",
            "/categories/structure"
        ]
    );
    Ok(())
}

#[tokio::test]
async fn analytics_empty_body_is_zero() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let (client, _) = client(vec![RawResponse::new(200, "")]);
    let a = client.analytics().await?;
    assert_eq!(a.total_users, 0);
    assert!(a.top_campuses.is_empty());
    Ok(())
}

#[tokio::test]
async fn transport_failure_propagates() {
    let (client, _) = client(vec![]);
    assert!(matches!(client.campuses().await, Err(Error::Http(_))));
}

#[tokio::test]
async fn login_persists_session() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let body = json!({
        "success": true,
        "data": {
            "user": {"_id": "a1", "email": "root@gradbook.edu", "role": "super_admin"},
            "token": "fresh"
        }
    });
    let (client, store) = client(vec![RawResponse::new(200, body.to_string())]);
    let mut auth = AuthStore::load(store.clone())?;
    assert!(!auth.is_authenticated());

    auth.login(&client, "root@gradbook.edu", "hunter2").await?;
    assert!(auth.is_authenticated());
    assert!(!auth.is_loading());
    assert_eq!(auth.user().map(|u| u.id.as_str()), Some("a1"));
    assert_eq!(store.get(TOKEN_KEY)?.as_deref(), Some("fresh"));

    let sent = client.transport().sent();
    assert_eq!(sent[0].path, "/auth/login");
    assert_eq!(
        sent[0].body,
        Some(json!({"email": "root@gradbook.edu", "password": "hunter2"}))
    );

    let reloaded = AuthStore::load(store)?;
    assert_eq!(reloaded.token(), Some("fresh"));
    assert!(reloaded.is_authenticated());
    Ok(())
}

#[tokio::test]
async fn failed_login_keeps_previous_session() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let (client, store) = client(vec![RawResponse::new(400, r#"{"message": "Invalid credentials"}"#)]);
    let mut auth = AuthStore::load(store)?;
    let res = auth.login(&client, "a@b.c", "wrong").await;
    assert!(matches!(res, Err(Error::Api { status: 400, .. })));
    assert!(!auth.is_loading());
    assert!(!auth.is_authenticated());
    Ok(())
}
