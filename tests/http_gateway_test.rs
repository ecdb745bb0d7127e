use serde_json::json;
use tryon_studio::gateway::{GatewayError, HttpGateway, TryOnGateway};
use tryon_studio::model::{
    BatchRequest, GarmentId, GenerationId, GenerationRequest, GenerationStatus, HistoryQuery,
    ModelId, PhotoGenerationRequest, UserPhoto,
};
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session(id: &str, is_favorite: bool) -> serde_json::Value {
    json!({
        "_id": id,
        "user_id": "u1",
        "model_id": "m1",
        "product_id": "g1",
        "result_url": format!("/uploads/tryon/{id}.png"),
        "model_name": "Ava",
        "product_name": "Linen Shirt",
        "model_image_url": "/uploads/models/m1.png",
        "product_image_url": "/uploads/products/g1.png",
        "status": "completed",
        "processing_time_ms": 8400,
        "is_favorite": is_favorite,
        "ai_provider": "gemini",
        "created_at": "2025-03-01T10:15:30.123456",
        "expires_at": "2025-05-30T10:15:30.123456"
    })
}

fn request() -> GenerationRequest {
    GenerationRequest {
        model_id: ModelId::from("m1"),
        garment_id: GarmentId::from("g1"),
    }
}

#[tokio::test]
async fn test_generate_posts_selection_with_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/tryon"))
        .and(header("authorization", "Bearer secret"))
        .and(body_json(json!({"model_id": "m1", "product_id": "g1"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(session("t1", false)))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = HttpGateway::new(format!("{}/api/v1", server.uri()), Some("secret".to_string()));
    let result = gateway.generate(&request()).await.unwrap();

    assert_eq!(result.id, GenerationId::from("t1"));
    assert_eq!(result.status, GenerationStatus::Completed);
    assert_eq!(result.garment_name, "Linen Shirt");
    assert_eq!(result.result_image(), Some("/uploads/tryon/t1.png"));
    assert!(result.expires_at.is_some());
}

#[tokio::test]
async fn test_rejection_carries_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tryon"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Product not found"})),
        )
        .mount(&server)
        .await;

    let gateway = HttpGateway::new(server.uri(), None);
    let err = gateway.generate(&request()).await.unwrap_err();

    assert_eq!(
        err,
        GatewayError::Rejected {
            status: 404,
            detail: "Product not found".to_string()
        }
    );
}

#[tokio::test]
async fn test_rejection_without_body_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tryon/history"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let gateway = HttpGateway::new(server.uri(), None);
    let err = gateway.list_history(HistoryQuery::page(1)).await.unwrap_err();

    assert_eq!(
        err,
        GatewayError::Rejected {
            status: 502,
            detail: "Failed to fetch history".to_string()
        }
    );
}

#[tokio::test]
async fn test_unparseable_success_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tryon"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let gateway = HttpGateway::new(server.uri(), None);
    let err = gateway.generate(&request()).await.unwrap_err();

    assert!(matches!(err, GatewayError::Malformed(_)));
}

#[tokio::test]
async fn test_history_listing_maps_to_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tryon/history"))
        .and(query_param("page", "3"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sessions": [session("t41", true), session("t42", false)],
            "total": 45,
            "page": 3,
            "limit": 20
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = HttpGateway::new(server.uri(), None);
    let page = gateway.list_history(HistoryQuery::page(3)).await.unwrap();

    assert_eq!(page.entries.len(), 2);
    assert_eq!(page.total_count, 45);
    assert_eq!(page.page_number, 3);
    assert_eq!(page.total_pages(), 3);
    assert_eq!(page.favorites().len(), 1);
}

#[tokio::test]
async fn test_set_favorite_patches_session() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/tryon/t1/favorite"))
        .and(body_json(json!({"is_favorite": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(session("t1", true)))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = HttpGateway::new(server.uri(), None);
    let confirmed = gateway
        .set_favorite(&GenerationId::from("t1"), true)
        .await
        .unwrap();

    assert!(confirmed.is_favorite);
}

#[tokio::test]
async fn test_batch_posts_product_ids() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tryon/batch"))
        .and(body_json(json!({"model_id": "m1", "product_ids": ["g1", "g2"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "batch_id": "b1",
            "individual_results": [session("t1", false), session("t2", false)],
            "combined_result": null,
            "total_processing_time_ms": 17000,
            "product_count": 2
        })))
        .mount(&server)
        .await;

    let gateway = HttpGateway::new(server.uri(), None);
    let batch = gateway
        .generate_batch(&BatchRequest {
            model_id: ModelId::from("m1"),
            garment_ids: vec![GarmentId::from("g1"), GarmentId::from("g2")],
        })
        .await
        .unwrap();

    assert_eq!(batch.batch_id, "b1");
    assert_eq!(batch.individual_results.len(), 2);
    assert_eq!(batch.combined_result, None);
    assert_eq!(batch.product_count, 2);
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let gateway = HttpGateway::new("http://127.0.0.1:1", None);
    let err = gateway.generate(&request()).await.unwrap_err();

    assert!(matches!(err, GatewayError::Transport(_)));
}

#[tokio::test]
async fn test_photo_generation_posts_multipart_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tryon/with-photo"))
        .and(header("authorization", "Bearer secret"))
        .and(body_string_contains(r#"name="product_id""#))
        .and(body_string_contains(r#"filename="me.jpg""#))
        .and(body_string_contains("jpeg-bytes"))
        .respond_with(ResponseTemplate::new(201).set_body_json(session("t9", false)))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = HttpGateway::new(server.uri(), Some("secret".to_string()));
    let request = PhotoGenerationRequest {
        photo: UserPhoto::new("me.jpg", "image/jpeg", b"jpeg-bytes".to_vec()).unwrap(),
        garment_id: GarmentId::from("g1"),
    };
    let result = gateway.generate_with_photo(&request).await.unwrap();

    assert_eq!(result.id.as_str(), "t9");
}

#[tokio::test]
async fn test_photo_rejection_carries_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tryon/with-photo"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "detail": "Image resolution (300x300) is below minimum (512x512)."
        })))
        .mount(&server)
        .await;

    let gateway = HttpGateway::new(server.uri(), None);
    let request = PhotoGenerationRequest {
        photo: UserPhoto::new("me.png", "image/png", b"tiny".to_vec()).unwrap(),
        garment_id: GarmentId::from("g1"),
    };
    let err = gateway.generate_with_photo(&request).await.unwrap_err();

    assert!(matches!(err, GatewayError::Rejected { status: 400, ref detail } if detail.contains("512x512")));
}

#[tokio::test]
async fn test_get_session_loads_one_generation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tryon/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session("t1", true)))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = HttpGateway::new(server.uri(), None);
    let session = gateway.get_session(&GenerationId::from("t1")).await.unwrap();

    assert_eq!(session.id.as_str(), "t1");
    assert!(session.is_favorite);
}

#[tokio::test]
async fn test_missing_session_uses_fallback_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tryon/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let gateway = HttpGateway::new(server.uri(), None);
    let err = gateway.get_session(&GenerationId::from("gone")).await.unwrap_err();

    assert_eq!(
        err,
        GatewayError::Rejected {
            status: 404,
            detail: "Failed to fetch session".to_string()
        }
    );
}
