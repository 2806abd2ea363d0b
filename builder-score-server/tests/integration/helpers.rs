use blockscout_service_launcher::test_server;
use builder_score_logic::og::ImageFormat;
use builder_score_server::Settings;
use url::Url;
use wiremock::MockServer;

pub async fn init_server_with_setup<F>(settings_setup: F) -> Url
where
    F: FnOnce(Settings) -> Settings,
{
    let (settings, base) = {
        let mut settings = Settings::default();
        let (server_settings, base) = test_server::get_test_server_settings();
        settings.server = server_settings;
        settings.metrics.enabled = false;
        settings.tracing.enabled = false;
        settings.jaeger.enabled = false;
        settings.og.format = ImageFormat::Svg;

        (settings_setup(settings), base)
    };

    test_server::init_server(|| builder_score_server::run(settings), &base).await;
    base
}

/// Server talking to the given node and to the score api mounted under
/// `score_api_path` of `score_api`.
pub async fn init_server(rpc: &MockServer, score_api: &MockServer, score_api_path: &str) -> Url {
    let rpc_url = mock_url(rpc, "");
    let score_api_url = mock_url(score_api, score_api_path);
    init_server_with_setup(|mut settings| {
        settings.resolver.rpc_url = rpc_url;
        settings.score_api.url = score_api_url;
        settings
    })
    .await
}

pub fn mock_url(server: &MockServer, path: &str) -> Url {
    format!("{}{path}", server.uri())
        .parse()
        .expect("mock server uri should be valid url")
}

pub async fn get(base: &Url, route: &str) -> reqwest::Response {
    reqwest::get(base.join(route).expect("route should be valid"))
        .await
        .expect("server should respond")
}
