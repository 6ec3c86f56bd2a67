use serde_json::json;

use crate::auth::{generate_jwt, Claims};
use crate::cli::OutputFormat;
use crate::config::AppConfig;

pub fn handle(
    config: &AppConfig,
    subject: &str,
    ttl_hours: Option<u64>,
    no_expiry: bool,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let claims = if no_expiry {
        Claims::non_expiring(subject)
    } else {
        Claims::new(subject, ttl_hours.unwrap_or(config.security.jwt_expiry_hours))?
    };

    let token = generate_jwt(&claims, &config.security.jwt_secret)?;

    match output_format {
        OutputFormat::Json => println!("{}", json!({ "token": token, "claims": claims })),
        OutputFormat::Text => println!("Bearer {}", token),
    }
    Ok(())
}
