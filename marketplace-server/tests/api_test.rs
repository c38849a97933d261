//! End-to-end tests driving the full router (middleware included)

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use marketplace_server::api::build_app;
use marketplace_server::auth::JwtConfig;
use marketplace_server::{Config, ServerState};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    app: Router,
    _dir: TempDir,
}

impl TestApp {
    async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let jwt = JwtConfig {
            secret: "integration-test-secret-0123456789abcdef".into(),
            expiration_minutes: 30,
            issuer: "marketplace-test".into(),
            audience: "marketplace-vendors".into(),
        };
        let config = Config::for_work_dir(dir.path().to_string_lossy().to_string(), jwt);
        let state = ServerState::initialize(&config).await.unwrap();
        Self {
            app: build_app(state),
            _dir: dir,
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, None).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body), None).await
    }

    /// Register and log in a vendor, returning `(vendor_id, token)`
    async fn vendor(&self, tag: &str) -> (i64, String) {
        let (status, body) = self
            .post(
                "/api/v1/vendor/register",
                json!({
                    "sellerLegalName": format!("{tag} Pvt Ltd"),
                    "panNumber": "ABCDE1234F",
                    "accountHolderName": "Asha Rao",
                    "accountType": "savings",
                    "accountNumber": format!("ACC-{tag}"),
                    "confirmAccountNumber": format!("ACC-{tag}"),
                    "ifscCode": "IFSC0001",
                    "vendorType": "Vendor",
                    "firstName": "Asha",
                    "lastName": "Rao",
                    "mobileNumber": format!("98{tag}"),
                    "email": format!("{tag}@example.com"),
                    "password": "s3cret-pass",
                    "confirmPassword": "s3cret-pass",
                    "businessName": format!("{tag} Traders"),
                    "storeName": format!("{tag} Store"),
                    "storeCategory": "Home",
                    "pinCode": "560001",
                    "city": "Bengaluru",
                    "address": "1 MG Road"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let vendor_id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = self
            .post(
                "/api/v1/vendor/login",
                json!({ "email": format!("{tag}@example.com"), "password": "s3cret-pass" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["data"]["tokenType"], "Bearer");
        (
            vendor_id,
            body["data"]["accessToken"].as_str().unwrap().to_string(),
        )
    }

    async fn catalog_tree(&self) {
        let (status, body) = self
            .post(
                "/api/v1/category/create",
                json!({ "categoriesTitle": "Home" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let category_id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = self
            .post(
                "/api/v1/subcategory/create",
                json!({ "categoryId": category_id, "title": "Kitchen" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
    }

    async fn product(&self, token: &str, sku: &str, price: &str, stocks: i64) -> i64 {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/product/add",
                Some(json!({
                    "title": format!("Item {sku}"),
                    "description": "A sturdy item",
                    "price": price,
                    "stocks": stocks,
                    "sku": sku,
                    "categories": "Home",
                    "subcategory": "Kitchen",
                    "state": "new",
                    "tags": ["steel"]
                })),
                Some(token),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_i64().unwrap()
    }
}

fn order_body(lines: &[(i64, i64)]) -> Value {
    let products: Vec<Value> = lines
        .iter()
        .map(|(id, qty)| json!({ "productId": id, "quantity": qty }))
        .collect();
    json!({
        "customerId": "cust-1",
        "products": products,
        "shippingInfo": {
            "address": "5 Park St",
            "city": "Kolkata",
            "state": "WB",
            "postalCode": "700016",
            "country": "IN",
            "phoneNumber": "9000000000"
        },
        "paymentInfo": { "method": "COD", "status": "Pending" }
    })
}

#[tokio::test]
async fn health_reports_ok_with_request_id() {
    let app = TestApp::new().await;
    let response = app
        .app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn errors_use_the_failure_envelope() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/v1/vendor/vendor?id=12345").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body.get("data").is_none());

    let (status, body) = app.get("/api/v1/vendor/wallet").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let response = app
        .app
        .clone()
        .oneshot(
            Request::post("/api/v1/order/add")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = TestApp::new().await;
    app.vendor("alpha").await;

    let (status, body) = app
        .post(
            "/api/v1/vendor/login",
            json!({ "mobileNumber": "98alpha", "password": "nope" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn cart_is_split_per_vendor_and_stock_decremented() {
    let app = TestApp::new().await;
    app.catalog_tree().await;
    let (alpha, alpha_token) = app.vendor("alpha").await;
    let (beta, beta_token) = app.vendor("beta").await;
    let pan = app.product(&alpha_token, "PAN-1", "250.50", 10).await;
    let pot = app.product(&beta_token, "POT-1", "99", 3).await;

    let (status, body) = app
        .post("/api/v1/order/add", order_body(&[(pan, 2), (pot, 1)]))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["message"], "Orders placed successfully for each vendor");

    let orders = body["data"].as_array().unwrap();
    assert_eq!(orders.len(), 2);
    let mut by_vendor: Vec<(i64, f64)> = orders
        .iter()
        .map(|o| {
            (
                o["vendorId"].as_i64().unwrap(),
                o["totalAmount"].as_f64().unwrap(),
            )
        })
        .collect();
    by_vendor.sort_by_key(|(v, _)| *v);
    let mut expected = vec![(alpha, 501.0), (beta, 99.0)];
    expected.sort_by_key(|(v, _)| *v);
    assert_eq!(by_vendor, expected);

    let (_, body) = app.get(&format!("/api/v1/product/product?id={pan}")).await;
    assert_eq!(body["data"]["stocks"], 8);
    let (_, body) = app.get(&format!("/api/v1/product/product?id={pot}")).await;
    assert_eq!(body["data"]["stocks"], 2);

    let number = orders[0]["orderID"].as_str().unwrap();
    let (status, body) = app
        .get(&format!("/api/v1/order/singleorder/{number}"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["orderID"], number);

    let (_, body) = app.get("/api/v1/order/total-payments").await;
    assert_eq!(body["data"]["orderCount"], 2);
    assert_eq!(body["data"]["totalAmount"], 600.0);
}

#[tokio::test]
async fn oversized_cart_line_fails_without_side_effects() {
    let app = TestApp::new().await;
    app.catalog_tree().await;
    let (_, token) = app.vendor("alpha").await;
    let pan = app.product(&token, "PAN-1", "10", 1).await;

    let (status, body) = app.post("/api/v1/order/add", order_body(&[(pan, 2)])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    let (_, body) = app.get("/api/v1/order/allorder").await;
    assert!(body["data"].as_array().unwrap().is_empty());
    let (_, body) = app.get(&format!("/api/v1/product/product?id={pan}")).await;
    assert_eq!(body["data"]["stocks"], 1);
}

#[tokio::test]
async fn delivery_credit_then_withdrawal_flow() {
    let app = TestApp::new().await;
    app.catalog_tree().await;
    let (vendor_id, token) = app.vendor("alpha").await;
    let pan = app.product(&token, "PAN-1", "40", 5).await;

    let (_, body) = app.post("/api/v1/order/add", order_body(&[(pan, 2)])).await;
    let number = body["data"][0]["orderID"].as_str().unwrap().to_string();

    for next in ["Processing", "Shipped"] {
        let (status, body) = app
            .send(
                Method::PATCH,
                "/api/v1/order/updateorder",
                Some(json!({ "orderID": number, "status": next })),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
    }
    let (status, body) = app
        .send(
            Method::PATCH,
            "/api/v1/order/updateorder",
            Some(json!({
                "orderID": number,
                "status": "Delivered",
                "vendorId": vendor_id,
                "amount": 80.0
            })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["orderHistory"].as_array().unwrap().len(), 4);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/vendor/withdrawl",
            Some(json!({ "amount": 100 })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/vendor/withdrawl",
            Some(json!({ "amount": "30" })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let request_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = app
        .post(
            "/api/v1/vendor/aprovewithdrwal",
            json!({ "requestId": request_id, "status": "approved" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (_, body) = app
        .send(Method::GET, "/api/v1/vendor/wallet", None, Some(&token))
        .await;
    assert_eq!(body["data"]["walletBalance"], 50.0);
    assert_eq!(body["data"]["transactions"].as_array().unwrap().len(), 2);

    let (_, body) = app.get("/api/v1/vendor/withdrawlall").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn category_with_products_cannot_be_deleted() {
    let app = TestApp::new().await;
    app.catalog_tree().await;
    let (_, token) = app.vendor("alpha").await;
    let pan = app.product(&token, "PAN-1", "10", 1).await;

    let (_, body) = app.get("/api/v1/category/all").await;
    let category = &body["data"][0];
    assert_eq!(category["productCount"], 1);
    let category_id = category["id"].as_i64().unwrap();

    let uri = format!("/api/v1/category/delete?id={category_id}");
    let (status, _) = app.send(Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/v1/product/delete?id={pan}"),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.send(Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn logout_clears_login_status() {
    let app = TestApp::new().await;
    let (vendor_id, token) = app.vendor("alpha").await;

    let (status, _) = app
        .send(Method::POST, "/api/v1/vendor/logout", None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .get(&format!("/api/v1/vendor/vendor?id={vendor_id}"))
        .await;
    assert_eq!(body["data"]["loginStatus"], false);
    assert!(body["data"].get("hashedPassword").is_none());
}

#[tokio::test]
async fn vendor_list_answers_with_and_without_trailing_slash() {
    let app = TestApp::new().await;
    app.vendor("alpha").await;

    for uri in ["/api/v1/vendor", "/api/v1/vendor/"] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["success"], true);
        assert_eq!(body["data"].as_array().unwrap().len(), 1, "{uri}");
    }
}

#[tokio::test]
async fn missing_upload_uses_the_failure_envelope() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/uploads/missing.png").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "File not found");

    let (status, body) = app.get("/uploads/..secret.png").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}
