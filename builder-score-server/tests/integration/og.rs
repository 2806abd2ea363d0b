use crate::helpers;
use builder_score_logic::og::ImageFormat;
use pretty_assertions::assert_eq;
use reqwest::{header, StatusCode};
use url::Url;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

const AVATAR: &[u8] = b"\x89PNG\r\n\x1a\navatar";
const VITALIK: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

async fn init_server(avatars: &MockServer, format: ImageFormat) -> Url {
    let address_identicon_url = format!("{}/address/{{address}}.png", avatars.uri());
    let name_identicon_url = format!("{}/name?seed={{name}}", avatars.uri());
    helpers::init_server_with_setup(|mut settings| {
        settings.og.format = format;
        settings.og.address_identicon_url = address_identicon_url;
        settings.og.name_identicon_url = name_identicon_url;
        settings
    })
    .await
}

async fn get_image(base: &Url, route: &str) -> (String, Vec<u8>) {
    let response = helpers::get(base, route).await;
    assert_eq!(response.status(), StatusCode::OK, "route: {route}");
    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "public, immutable, no-transform, max-age=31536000"
    );
    let content_type = response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .to_string();
    (content_type, response.bytes().await.unwrap().to_vec())
}

#[tokio::test]
async fn incomplete_query_serves_fallback_image() {
    let avatars = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(AVATAR))
        .expect(0)
        .mount(&avatars)
        .await;
    let base = init_server(&avatars, ImageFormat::Svg).await;

    for route in ["/api/og", "/api/og?name=alice", "/api/og?score=12&rank=3"] {
        let (content_type, body) = get_image(&base, route).await;
        assert_eq!(content_type, "image/svg+xml");
        let svg = String::from_utf8(body).unwrap();
        assert!(svg.contains("Check your onchain reputation"), "route: {route}");
    }
}

#[tokio::test]
async fn card_embeds_avatar_and_rank() {
    let avatars = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/address/{VITALIK}.png")))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(AVATAR),
        )
        .expect(1)
        .mount(&avatars)
        .await;
    let base = init_server(&avatars, ImageFormat::Svg).await;

    let (_, body) = get_image(
        &base,
        &format!("/api/og?name=alice.base.eth&score=42&rank=7&address={VITALIK}"),
    )
    .await;
    let svg = String::from_utf8(body).unwrap();
    assert!(svg.contains("alice.base.eth"));
    assert!(svg.contains(">42<"));
    assert!(svg.contains("Top #7"));
    assert!(svg.contains("<image"));
}

#[tokio::test]
async fn unreachable_avatar_still_renders_card() {
    let avatars = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&avatars)
        .await;
    let base = init_server(&avatars, ImageFormat::Svg).await;

    let (_, body) = get_image(&base, "/api/og?name=bob&score=3&rank=NaN&address=undefined").await;
    let svg = String::from_utf8(body).unwrap();
    assert!(svg.contains("Unranked"));
    assert!(!svg.contains("<image"));
    let requests = avatars.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/name");
}

#[tokio::test]
async fn png_images_have_preview_size() {
    let avatars = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&avatars)
        .await;
    let base = init_server(&avatars, ImageFormat::Png).await;

    for route in ["/api/og", "/api/og?name=carol&score=1000&rank=1"] {
        let (content_type, body) = get_image(&base, route).await;
        assert_eq!(content_type, "image/png");
        assert_eq!(&body[..8], b"\x89PNG\r\n\x1a\n");
        let width = u32::from_be_bytes(body[16..20].try_into().unwrap());
        let height = u32::from_be_bytes(body[20..24].try_into().unwrap());
        assert_eq!((width, height), (1200, 800), "route: {route}");
    }
}
