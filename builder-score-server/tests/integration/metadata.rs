use crate::helpers;
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn init_server() -> url::Url {
    helpers::init_server_with_setup(|mut settings| {
        settings.share.app_url = "https://scores.example.com".parse().unwrap();
        settings
    })
    .await
}

async fn get_json(base: &url::Url, route: &str) -> Value {
    let response = helpers::get(base, route).await;
    assert_eq!(response.status(), StatusCode::OK, "route: {route}");
    response.json().await.unwrap()
}

#[tokio::test]
async fn landing_page_metadata() {
    let base = init_server().await;

    let body = get_json(&base, "/api/metadata?name=alice").await;
    assert_eq!(body["title"], "Base Builder Score");
    assert_eq!(body["description"], "Check your onchain reputation on Base");
    assert_eq!(body["image_url"], "https://scores.example.com/hero.png");
    assert_eq!(body["frame"]["imageUrl"], "https://scores.example.com/hero.png");
}

#[tokio::test]
async fn shared_result_metadata() {
    let base = init_server().await;

    let body = get_json(&base, "/api/metadata?name=alice.base.eth&score=42&rank=7&t=1").await;
    assert_eq!(
        body,
        json!({
            "title": "alice.base.eth's Builder Score: 42",
            "description": "Ranked #7. Check your score now!",
            "image_url": "https://scores.example.com/api/og?name=alice.base.eth&score=42&rank=7",
            "frame": {
                "version": "next",
                "imageUrl": "https://scores.example.com/api/og?name=alice.base.eth&score=42&rank=7",
                "button": {
                    "title": "Check Your Score",
                    "action": {
                        "type": "launch_frame",
                        "name": "Base Builder Score",
                        "url": "https://scores.example.com/",
                        "splashImageUrl": "https://scores.example.com/splash.png",
                        "splashBackgroundColor": "#1e293b"
                    }
                }
            }
        })
    );
}

#[tokio::test]
async fn health_is_serving() {
    let base = init_server().await;
    assert_eq!(get_json(&base, "/health").await, json!({"status": "SERVING"}));
}
