//! Postilion post bot entry point.

use postilion_bot::{BotConfig, BotServer, MemoryAccountStore, WorkflowEngine};
use postilion_core::Account;
use postilion_error::PostilionResult;
use postilion_gateway::{CaptionGateway, ImageGateway, ImgbbRelay, MediaRelay, OpenAiGateway};
use postilion_social::{
    ChatTransport, FacebookPublisher, FanOut, InstagramPublisher, TelegramChannelPublisher,
    TelegramClient, TelegramTransport,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> PostilionResult<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // First argument is an optional TOML config path; otherwise env vars
    let config = match std::env::args().nth(1) {
        Some(path) => BotConfig::from_file(path)?,
        None => BotConfig::from_env()?,
    };

    let telegram = TelegramClient::new(config.telegram.bot_token.clone());

    let openai = OpenAiGateway::new(
        config.openai.api_key.clone(),
        config.openai.chat_model.clone(),
        config.openai.image_model.clone(),
    );
    let captions: Arc<dyn CaptionGateway> = Arc::new(openai.clone());
    let images: Arc<dyn ImageGateway> = Arc::new(openai);
    let relay: Arc<dyn MediaRelay> = Arc::new(ImgbbRelay::new(config.imgbb.api_key.clone()));

    let fanout = FanOut::new()
        .register(Arc::new(TelegramChannelPublisher::new(
            telegram.clone(),
            config.telegram.channel.clone(),
        )))
        .register(Arc::new(InstagramPublisher::new(
            config.meta.access_token.clone(),
            config.meta.ig_user_id.clone(),
        )))
        .register(Arc::new(FacebookPublisher::new(
            config.meta.access_token.clone(),
            config.meta.fb_page_id.clone(),
        )));

    let accounts: Vec<Account> = config.accounts.iter().cloned().map(Account::from).collect();
    info!(accounts = accounts.len(), "Starting Postilion");

    let engine = Arc::new(WorkflowEngine::new(
        Arc::new(MemoryAccountStore::new(accounts)),
        captions,
        images,
        relay,
        Arc::new(fanout),
        Duration::from_secs(config.session.idle_ttl_secs),
    ));

    let transport: Arc<dyn ChatTransport> = Arc::new(TelegramTransport::new(telegram));
    BotServer::new(transport, engine).run().await
}
