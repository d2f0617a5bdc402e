//! End-to-end flows through the public API with a scripted transport.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use http::StatusCode;
use serde_json::json;

use filestore_client::{
    ApiClient, AuthContext, ClientConfig, CollectionFilters, CollectionsService, ErrorAction,
    FileSorter, FilesService, FilterDraft, HttpRequest, HttpResponse, HttpTransport,
    SortDirection, SortField, TransportError, User,
};

/// Routes each request by URL suffix and records what was sent.
struct ScriptedTransport {
    routes: Vec<(&'static str, StatusCode, serde_json::Value)>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    fn new(routes: Vec<(&'static str, StatusCode, serde_json::Value)>) -> Arc<Self> {
        Arc::new(Self {
            routes,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let response = self
            .routes
            .iter()
            .find(|(suffix, _, _)| request.url.ends_with(suffix))
            .map(|(_, status, body)| HttpResponse {
                status: *status,
                content_type: Some("application/json".into()),
                body: body.to_string().into_bytes(),
            })
            .unwrap_or_else(|| HttpResponse {
                status: StatusCode::NOT_FOUND,
                content_type: Some("application/json".into()),
                body: json!({"message": "unknown route"}).to_string().into_bytes(),
            });
        self.requests.lock().unwrap().push(request);
        Ok(response)
    }
}

fn client(transport: Arc<ScriptedTransport>) -> Arc<ApiClient> {
    let client = ApiClient::new(ClientConfig::new("https://files.example.com"), transport);
    client.set_auth(AuthContext::new("tok-123"));
    Arc::new(client)
}

fn file_json(name: &str, owner: &str, time: &str, status: &str) -> serde_json::Value {
    json!({
        "object_name": name,
        "collection": "reports",
        "owner": owner,
        "original_filename": name,
        "upload_time": time,
        "content_type": "application/pdf",
        "size": 10,
        "metadata": {"status": status}
    })
}

#[tokio::test]
async fn collections_overview_tolerates_one_failing_collection() {
    let transport = ScriptedTransport::new(vec![
        (
            "/api/files/alpha",
            StatusCode::OK,
            json!({"files": [file_json("a.pdf", "kim", "20240301", "Done")]}),
        ),
        (
            "/api/files/beta",
            StatusCode::FORBIDDEN,
            json!({"message": "no access"}),
        ),
    ]);
    let api = client(transport.clone());

    let user = User {
        collections: BTreeMap::from([
            ("alpha".to_string(), vec![]),
            ("beta".to_string(), vec![]),
        ]),
        ..Default::default()
    };
    let result = CollectionsService::new(api).get_collections(&user).await;

    let names: Vec<&str> = result.collections.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["alpha", "beta"]);
    assert_eq!(result.collections[0].file_count, 1);
    assert_eq!(result.collections[1].file_count, 0);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].action, ErrorAction::RequestAccess);

    for request in transport.requests() {
        let auth = request
            .headers
            .iter()
            .find(|(name, _)| name == "Authorization")
            .map(|(_, value)| value.clone());
        assert_eq!(auth.as_deref(), Some("Bearer tok-123"));
    }
}

#[tokio::test]
async fn listing_filters_sorts_and_paginates_client_side() {
    let transport = ScriptedTransport::new(vec![(
        "/api/files/reports",
        StatusCode::OK,
        json!({"files": [
            file_json("q1.pdf", "kim", "20240110", "Done"),
            file_json("q2.pdf", "lee", "20240215", "Done"),
            file_json("q3.pdf", "kim", "20240320", "In progress"),
            file_json("q4.pdf", "kim", "2024-04-05T09:30:00Z", "Done"),
        ]}),
    )]);
    let files = FilesService::new(client(transport));

    let mut applied = CollectionFilters::new();
    let mut draft = FilterDraft::new();
    draft.toggle_uploader("kim");
    draft.apply_to(&mut applied);
    let filters = applied.current_filters();
    assert_eq!(filters.uploaders.as_deref(), Some(&["kim".to_string()][..]));

    let page = files
        .list_files("reports", 1, Some(2), Some(&filters))
        .await
        .unwrap();
    assert_eq!(page.total_count, 3);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.files.len(), 2);

    // Compact dates come back normalized to full timestamps.
    assert!(page.files.iter().all(|f| f.upload_time.contains('T')));

    let mut sorter = FileSorter::default();
    sorter.handle_sort_change(SortField::Date);
    assert_eq!(sorter.direction, SortDirection::Desc);
    let sorted = sorter.sorted(&page.files);
    assert!(sorted.windows(2).all(|pair| {
        pair[0].upload_time >= pair[1].upload_time
    }));

    let last = files
        .list_files("reports", 2, Some(2), Some(&filters))
        .await
        .unwrap();
    assert_eq!(last.files.len(), 1);
    assert_eq!(last.current_page, 2);
}
