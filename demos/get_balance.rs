use std::io;

use smsfly::{Credentials, SmsFlyClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let login = std::env::var("SMSFLY_LOGIN").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSFLY_LOGIN environment variable is required",
        )
    })?;
    let password = std::env::var("SMSFLY_PASSWORD").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSFLY_PASSWORD environment variable is required",
        )
    })?;

    let client = SmsFlyClient::new(Credentials::new(login, password)?);
    let response = client.get_balance().await?;
    println!("balance: {}", response.balance);

    Ok(())
}
