use anyhow::Result;
use eventlist::api::ApiClient;
use eventlist::core::config::{self, ClientConfig};
use owo_colors::OwoColorize;

pub fn run(client_config: &ClientConfig) -> Result<()> {
    let config_path = config::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:    {}", config_path.display());

    match ApiClient::new(client_config) {
        Ok(client) => println!("  Resource:  {}", client.resource_url()),
        Err(e) => println!("  Resource:  {}", e.to_string().red()),
    }

    println!();
    println!("{}", "Settings".bold());
    for line in config::to_toml(client_config)?.lines() {
        println!("  {line}");
    }

    Ok(())
}
