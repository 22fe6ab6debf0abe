use std::io;
use std::time::Duration;

use smsfly::{CampaignId, Credentials, SmsFlyClient};

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let credentials = Credentials::new(
        required_env("SMSFLY_LOGIN")?,
        required_env("SMSFLY_PASSWORD")?,
    )?;
    let campaign_id = CampaignId::new(required_env("SMSFLY_CAMPAIGN_ID")?)?;

    let client = SmsFlyClient::builder(credentials)
        .timeout(Duration::from_secs(30))
        .build()?;

    let info = client.get_campaign_info(&campaign_id).await?;
    println!("campaign: {:?}", info.campaign);
    for (status, messages) in &info.states {
        println!("  {status}: {messages}");
    }

    let detail = client.get_campaign_detail(&campaign_id).await?;
    for message in &detail.messages {
        println!("  message: {message:?}");
    }

    Ok(())
}
