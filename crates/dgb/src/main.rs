use std::sync::Arc;

use dgb_core::{config::Config, handler::QuestionHandler};
use dgb_gemini::GeminiClient;

#[tokio::main]
async fn main() -> Result<(), dgb_core::Error> {
    dgb_core::logging::init("dgb");

    // Fails fast on missing credentials, before any connection is opened.
    let cfg = Arc::new(Config::load()?);

    let gemini = Arc::new(GeminiClient::new(
        cfg.gemini_api_key.clone(),
        cfg.request_timeout,
    )?);
    let handler = Arc::new(QuestionHandler::new(gemini, &cfg));

    dgb_discord::router::run_gateway(cfg, handler)
        .await
        .map_err(|e| dgb_core::Error::Platform(format!("discord bot failed: {e}")))?;

    Ok(())
}
