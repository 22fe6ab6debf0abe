use std::io;

use smsfly::{Credentials, MessageText, RawPhoneNumber, SendOptions, SendSms, SmsFlyClient};

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

    let login = required_env("SMSFLY_LOGIN")?;
    let password = required_env("SMSFLY_PASSWORD")?;
    let phone_raw = required_env("SMSFLY_PHONE")?;
    let message = std::env::var("SMSFLY_MESSAGE")
        .unwrap_or_else(|_| "Hello from the smsfly demo.".to_owned());

    let client = SmsFlyClient::new(Credentials::new(login, password)?);
    let phone = RawPhoneNumber::new(phone_raw)?;
    let text = MessageText::new(message)?;
    let request = SendSms::to_one(phone, text, SendOptions::default())?;

    let response = client.send_sms(request).await?;
    println!(
        "state: {}, campaign: {:?}, message: {:?}",
        response.state,
        response.campaign_id,
        response.status_message()
    );

    Ok(())
}
