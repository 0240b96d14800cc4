//! HTTP surface tests over the full router with a stubbed catalog.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use storebooks_api::catalog::{CatalogError, CatalogSource};
use storebooks_api::{AppState, create_router};
use storebooks_core::inventory::CatalogVariant;
use storebooks_core::ledger::AccountType;
use storebooks_shared::config::{AccountingConfig, AppConfig, CatalogConfig, ServerConfig};
use storebooks_shared::types::{Money, UserId};
use storebooks_store::Store;
use storebooks_store::repositories::AccountRepository;
use storebooks_store::repositories::account::{CreateAccountGroupInput, CreateLedgerInput};

struct StubCatalog {
    variants: Vec<CatalogVariant>,
}

#[async_trait]
impl CatalogSource for StubCatalog {
    async fn fetch_variants(&self) -> Result<Vec<CatalogVariant>, CatalogError> {
        Ok(self.variants.clone())
    }
}

struct FailingCatalog;

#[async_trait]
impl CatalogSource for FailingCatalog {
    async fn fetch_variants(&self) -> Result<Vec<CatalogVariant>, CatalogError> {
        Err(CatalogError::Request("connection refused".into()))
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        catalog: CatalogConfig {
            base_url: "http://catalog.test".into(),
            timeout_secs: 1,
        },
        accounting: AccountingConfig::default(),
    }
}

fn app_with_catalog(store: Store, catalog: Arc<dyn CatalogSource>) -> Router {
    create_router(AppState {
        store,
        catalog,
        config: Arc::new(test_config()),
    })
}

fn app(store: Store) -> Router {
    app_with_catalog(store, Arc::new(StubCatalog { variants: vec![] }))
}

/// Seeds Cash (Asset) and Sales (Income) ledgers; returns their ids.
async fn seed_ledgers(store: &Store) -> (Uuid, Uuid) {
    let accounts = AccountRepository::new(store.clone());
    let assets = accounts
        .create_group(CreateAccountGroupInput {
            name: "Assets".into(),
            account_type: AccountType::Asset,
            description: None,
        })
        .await
        .unwrap();
    let income = accounts
        .create_group(CreateAccountGroupInput {
            name: "Income".into(),
            account_type: AccountType::Income,
            description: None,
        })
        .await
        .unwrap();
    let cash = accounts
        .create_ledger(CreateLedgerInput {
            name: "Cash".into(),
            group_id: assets.id,
            opening_balance: Money::from_minor(10_000),
            description: None,
            created_by: UserId::new(),
        })
        .await
        .unwrap();
    let sales = accounts
        .create_ledger(CreateLedgerInput {
            name: "Sales".into(),
            group_id: income.id,
            opening_balance: Money::ZERO,
            description: None,
            created_by: UserId::new(),
        })
        .await
        .unwrap();
    (cash.id.into_inner(), sales.id.into_inner())
}

fn request(method: &str, uri: &str, role: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-actor-id", Uuid::now_v7().to_string())
        .header("x-actor-role", role);
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn sale_body(cash: Uuid, sales: Uuid, debit: i64, credit: i64) -> Value {
    json!({
        "date": "2026-03-10",
        "type": "receipt",
        "description": "cash sale",
        "entries": [
            { "ledgerId": cash, "isDebit": true, "amount": debit },
            { "ledgerId": sales, "isDebit": false, "amount": credit },
        ]
    })
}

#[tokio::test]
async fn health_returns_ok_envelope() {
    let response = app(Store::new())
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["status"], json!("ok"));
}

#[tokio::test]
async fn missing_actor_headers_are_unauthorized() {
    let response = app(Store::new())
        .oneshot(
            Request::get("/finance/ledgers")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn balanced_transaction_is_created() {
    let store = Store::new();
    let (cash, sales) = seed_ledgers(&store).await;

    let response = app(store)
        .oneshot(request(
            "POST",
            "/finance/transactions",
            "submitter",
            Some(sale_body(cash, sales, 5_000, 5_000)),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["status"], json!("draft"));
    assert_eq!(body["data"]["totalDebit"], json!(5_000));
    assert_eq!(body["data"]["isBalanced"], json!(true));
}

/// Scenario B: a 3000/2999 imbalance is a 400 and persists nothing.
#[tokio::test]
async fn unbalanced_transaction_is_rejected_with_400() {
    let store = Store::new();
    let (cash, sales) = seed_ledgers(&store).await;
    let router = app(store);

    let response = router
        .clone()
        .oneshot(request(
            "POST",
            "/finance/transactions",
            "submitter",
            Some(sale_body(cash, sales, 3_000, 2_999)),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("unbalanced_transaction"));

    let list = router
        .oneshot(request("GET", "/finance/transactions", "viewer", None))
        .await
        .unwrap();
    let body = body_json(list).await;
    assert_eq!(body["data"]["data"], json!([]));
    assert_eq!(body["data"]["meta"]["total"], json!(0));
}

/// Scenario C over HTTP: the second approval is a 409 conflict.
#[tokio::test]
async fn double_approval_returns_conflict() {
    let store = Store::new();
    let (cash, sales) = seed_ledgers(&store).await;
    let router = app(store);

    let created = router
        .clone()
        .oneshot(request(
            "POST",
            "/finance/transactions",
            "submitter",
            Some(sale_body(cash, sales, 5_000, 5_000)),
        ))
        .await
        .unwrap();
    let id = body_json(created).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let approve_uri = format!("/finance/transactions/{id}/approve");
    let first = router
        .clone()
        .oneshot(request("PATCH", &approve_uri, "approver", None))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(body_json(first).await["data"]["status"], json!("approved"));

    let second = router
        .oneshot(request("PATCH", &approve_uri, "approver", None))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = body_json(second).await;
    assert_eq!(body["error"], json!("already_terminal"));
}

#[tokio::test]
async fn approval_requires_approver_role() {
    let store = Store::new();
    let (cash, sales) = seed_ledgers(&store).await;
    let router = app(store);

    let created = router
        .clone()
        .oneshot(request(
            "POST",
            "/finance/transactions",
            "submitter",
            Some(sale_body(cash, sales, 5_000, 5_000)),
        ))
        .await
        .unwrap();
    let id = body_json(created).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = router
        .oneshot(request(
            "PATCH",
            &format!("/finance/transactions/{id}/approve"),
            "submitter",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn trial_balance_is_balanced_after_approval() {
    let store = Store::new();
    let (cash, sales) = seed_ledgers(&store).await;
    let router = app(store);

    let created = router
        .clone()
        .oneshot(request(
            "POST",
            "/finance/transactions",
            "submitter",
            Some(sale_body(cash, sales, 5_000, 5_000)),
        ))
        .await
        .unwrap();
    let id = body_json(created).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    router
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/finance/transactions/{id}/approve"),
            "approver",
            None,
        ))
        .await
        .unwrap();

    let response = router
        .oneshot(request(
            "GET",
            "/finance/trial-balance?asOfDate=2026-12-31",
            "viewer",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["isBalanced"], json!(true));
    assert_eq!(body["data"]["totalDebit"], json!(5_000));

    let cash_row = body["data"]["rows"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["ledgerName"] == json!("Cash"))
        .unwrap();
    assert_eq!(cash_row["closingBalance"], json!(15_000));
}

/// Scenario D: catalog value 50000 vs ledger 48000 yields variance 2000 and
/// the ledger is untouched.
#[tokio::test]
async fn reconciliation_reports_variance_without_posting() {
    let store = Store::new();
    let accounts = AccountRepository::new(store.clone());
    let assets = accounts
        .create_group(CreateAccountGroupInput {
            name: "Assets".into(),
            account_type: AccountType::Asset,
            description: None,
        })
        .await
        .unwrap();
    accounts
        .create_ledger(CreateLedgerInput {
            name: "Inventory".into(),
            group_id: assets.id,
            opening_balance: Money::from_minor(48_000),
            description: None,
            created_by: UserId::new(),
        })
        .await
        .unwrap();

    let catalog = Arc::new(StubCatalog {
        variants: vec![CatalogVariant {
            product_id: "prod-1".into(),
            variant_id: "var-1".into(),
            sku: "SKU-1".into(),
            product_title: "Widget".into(),
            variant_title: String::new(),
            cost_per_item: Money::from_minor(1_000),
            selling_price: Money::from_minor(2_500),
            quantity: 50,
        }],
    });
    let router = app_with_catalog(store.clone(), catalog);

    let response = router
        .oneshot(request(
            "GET",
            "/finance/inventory-assets/realtime-calculation",
            "viewer",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["totalInventoryValue"], json!(50_000));
    assert_eq!(body["data"]["ledgerBalance"], json!(48_000));
    assert_eq!(body["data"]["variance"], json!(2_000));

    // The ledger balance itself is untouched by reconciliation.
    let accounts = AccountRepository::new(store);
    let ledgers = accounts
        .list_ledgers(Default::default())
        .await;
    assert_eq!(ledgers[0].current_balance, Money::from_minor(48_000));
}

#[tokio::test]
async fn reconciliation_surfaces_catalog_failure_as_upstream_error() {
    let store = Store::new();
    let router = app_with_catalog(store, Arc::new(FailingCatalog));

    let response = router
        .oneshot(request(
            "GET",
            "/finance/inventory-assets/realtime-calculation",
            "viewer",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("UPSTREAM_ERROR"));
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("connection refused")
    );
}

#[tokio::test]
async fn ledger_listing_returns_derived_balances() {
    let store = Store::new();
    let (_, _) = seed_ledgers(&store).await;

    let response = app(store)
        .oneshot(request("GET", "/finance/ledgers", "viewer", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let ledgers = body["data"].as_array().unwrap();
    assert_eq!(ledgers.len(), 2);
    let cash = ledgers.iter().find(|l| l["name"] == json!("Cash")).unwrap();
    assert_eq!(cash["currentBalance"], json!(10_000));
    assert_eq!(cash["groupType"], json!("asset"));
}
