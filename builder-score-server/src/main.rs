use blockscout_service_launcher::launcher::ConfigSettings;
use builder_score_server::Settings;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let settings = Settings::build().expect("failed to read config");
    builder_score_server::run(settings).await
}
