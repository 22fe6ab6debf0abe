use std::io;

use smsfly::{Alfaname, Credentials, SmsFlyClient};

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

    let client = SmsFlyClient::new(Credentials::new(
        required_env("SMSFLY_LOGIN")?,
        required_env("SMSFLY_PASSWORD")?,
    )?);

    if let Ok(name) = std::env::var("SMSFLY_ALFANAME") {
        let checked = client.check_alfaname(Alfaname::new(name)?).await?;
        println!("check: {:?}", checked.states);
    }

    let list = client.get_alfanames_list().await?;
    for state in &list.states {
        println!("{state:?}");
    }

    Ok(())
}
