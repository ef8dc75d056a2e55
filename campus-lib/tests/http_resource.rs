//! Integration tests for the HTTP collaborators against a local test server.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;

use campus_lib::CampusClient;
use campus_lib::api::RemoteResource;
use campus_lib::api::Resource;
use campus_lib::auth::StaticTokenProvider;
use campus_lib::error::ApiError;
use campus_lib::error::Error;
use campus_lib::model::ListQuery;
use campus_lib::model::School;
use campus_lib::table::DeleteFetcher;
use campus_lib::table::ListController;
use campus_lib::table::ListFetcher;
use http_body_util::BodyExt;
use http_body_util::Full;
use hyper::Method;
use hyper::Request;
use hyper::Response;
use hyper::StatusCode;
use hyper::body::Bytes;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use serde_json::Value;
use serde_json::json;
use tokio::net::TcpListener;

const TOKEN: &str = "test-token";
const SCHOOLS: u32 = 12;

/// One request as seen by the test server.
#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    body: Value,
}

type Log = Arc<Mutex<Vec<Recorded>>>;

async fn start_server() -> (SocketAddr, Log) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log = Log::default();

    let server_log = log.clone();
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let log = server_log.clone();
            tokio::spawn(async move {
                let service = service_fn(move |req| handle(req, log.clone()));
                let _ = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await;
            });
        }
    });

    (addr, log)
}

async fn handle(req: Request<Incoming>, log: Log) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let authorized = req
        .headers()
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        == Some(format!("Bearer {}", TOKEN).as_str());
    let bytes = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(_) => Bytes::new(),
    };
    let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    log.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        body: body.clone(),
    });

    if !authorized {
        return Ok(reply(StatusCode::UNAUTHORIZED, json!({"message": "Unauthorized"})));
    }

    let response = match (method, path.as_str()) {
        (Method::POST, "/school/find") => reply(StatusCode::OK, find_schools(&body)),
        (Method::POST, "/broken/find") => Response::builder()
            .status(StatusCode::OK)
            .body(Full::new(Bytes::from("not json")))
            .unwrap(),
        (Method::DELETE, "/school") => match body["id"].as_str() {
            Some("missing") => reply(
                StatusCode::NOT_FOUND,
                json!({"success": false, "message": "School not found"}),
            ),
            Some("locked") => reply(
                StatusCode::OK,
                json!({"success": false, "message": "School still has students"}),
            ),
            _ => reply(StatusCode::OK, json!({"success": true})),
        },
        _ => reply(StatusCode::NOT_FOUND, json!({"message": "Not found"})),
    };
    Ok(response)
}

fn reply(status: StatusCode, body: Value) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}

fn find_schools(body: &Value) -> Value {
    let page = body["page"].as_u64().unwrap_or(1) as u32;
    let limit = body["limit"].as_u64().unwrap_or(10) as u32;
    let search = body["search"].as_str().unwrap_or("").to_lowercase();

    let matching: Vec<u32> = (1..=SCHOOLS)
        .filter(|i| format!("school {}", i).contains(&search))
        .collect();
    let data: Vec<Value> = matching
        .iter()
        .skip(((page - 1) * limit) as usize)
        .take(limit as usize)
        .map(|i| {
            json!({
                "_id": format!("s{}", i),
                "name": format!("School {}", i),
                "address": "Jl. Merdeka",
                "adminsCount": 1,
                "studentsCount": i * 10,
                "images": [],
            })
        })
        .collect();
    let total = matching.len() as u32;

    json!({
        "data": data,
        "page": {
            "currentPage": page,
            "totalPage": total.div_ceil(limit),
            "perPage": limit,
            "totalData": total,
        },
    })
}

fn client(addr: SocketAddr, token: &str) -> CampusClient {
    CampusClient::builder()
        .url(format!("http://{}", addr))
        .token_provider(StaticTokenProvider::new(token))
        .build()
        .unwrap()
}

fn schools(addr: SocketAddr) -> RemoteResource<School> {
    client(addr, TOKEN).resource(Resource::SCHOOL)
}

// =============================================================================
// List
// =============================================================================

#[tokio::test]
async fn test_list_posts_query_and_parses_page() {
    let (addr, log) = start_server().await;

    let query = ListQuery::new(5).with_page(3);
    let page = schools(addr).list(&query).await.unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.rows()[0].id, "s11");
    assert_eq!(page.rows()[1].students_count, 120);
    assert_eq!(page.meta().total_page, 3);
    assert_eq!(page.meta().total_data, 12);

    let recorded = log.lock().unwrap().clone();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].method, Method::POST);
    assert_eq!(recorded[0].path, "/school/find");
    assert_eq!(recorded[0].body, json!({"search": "", "page": 3, "limit": 5}));
}

#[tokio::test]
async fn test_list_with_wrong_token_is_http_error() {
    let (addr, _) = start_server().await;
    let resource: RemoteResource<School> = client(addr, "wrong").resource(Resource::SCHOOL);

    let err = resource.list(&ListQuery::default()).await.unwrap_err();

    assert_eq!(err.status_code(), Some(401));
    assert!(matches!(
        err,
        Error::Api(ApiError::Http { ref message, .. }) if message == "Unauthorized"
    ));
}

#[tokio::test]
async fn test_list_malformed_body_is_parse_error() {
    let (addr, _) = start_server().await;
    let resource: RemoteResource<School> =
        client(addr, TOKEN).resource(Resource::new("broken", "broken"));

    let err = resource.list(&ListQuery::default()).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Api(ApiError::Parse { body: Some(ref body), .. }) if body == "not json"
    ));
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_sends_id() {
    let (addr, log) = start_server().await;

    assert!(schools(addr).delete_one("s3").await.unwrap());

    let recorded = log.lock().unwrap().clone();
    assert_eq!(recorded[0].method, Method::DELETE);
    assert_eq!(recorded[0].path, "/school");
    assert_eq!(recorded[0].body, json!({"id": "s3"}));
}

#[tokio::test]
async fn test_delete_unsuccessful_body_returns_false() {
    let (addr, _) = start_server().await;

    assert!(!schools(addr).delete_one("locked").await.unwrap());
}

#[tokio::test]
async fn test_delete_not_found_uses_server_message() {
    let (addr, _) = start_server().await;

    let err = schools(addr).delete_one("missing").await.unwrap_err();

    assert!(matches!(
        err,
        Error::Api(ApiError::Http { status: 404, ref message }) if message == "School not found"
    ));
}

// =============================================================================
// Controller over HTTP
// =============================================================================

#[tokio::test]
async fn test_controller_over_http() {
    let (addr, log) = start_server().await;
    let controller = ListController::builder(Arc::new(schools(addr)))
        .columns(School::columns())
        .label("school")
        .build();

    controller.load();
    let snapshot = controller.settled().await;
    assert_eq!(snapshot.rows().len(), 10);
    assert_eq!(snapshot.pager().label(), "1/2");

    controller.set_page(2).unwrap();
    let snapshot = controller.settled().await;
    assert_eq!(snapshot.rows().len(), 2);
    assert_eq!(snapshot.row_number(0), 11);

    assert_eq!(log.lock().unwrap().len(), 2);
}
