use anyhow::{Error, Result, anyhow};
use tracing_subscriber::EnvFilter;
use umeng_push::{
    GatewayClient, Message, Notification, Platform, PushOutcome, config::Config,
    utils::new_out_biz_no,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::load()?;

    let mut args = std::env::args().skip(1);
    let device_token = args
        .next()
        .ok_or_else(|| anyhow!("usage: umeng_push <device_token> <android|ios> [title]"))?;
    let platform: Platform = args
        .next()
        .ok_or_else(|| anyhow!("missing platform, expected android or ios"))?
        .parse()?;
    let title = args.next().unwrap_or_else(|| "test_title".to_string());

    let notification = Notification::new("test_ticker", title, "test_text");

    let mut message = Message::from_config(new_out_biz_no(), &config)?;
    message
        .set_description("umeng_push cli")
        .set_unicast(device_token, platform)
        .set_notification(&notification);

    let client = GatewayClient::from_config(&config)?;
    let PushOutcome { android, ios } = client.push(&mut message).await?;

    for (platform, outcome) in [(Platform::Android, android), (Platform::Ios, ios)] {
        match outcome {
            Some(Ok(result)) => println!("{}: {:?}", platform, result),
            Some(Err(e)) => println!("{}: failed: {}", platform, e),
            None => {}
        }
    }

    Ok(())
}
