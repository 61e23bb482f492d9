use anyhow::{bail, Context, Result};
use cfclient::{ClientConfig, Cloudflare, QueryParams};
use log::info;
use reqwest::header::HeaderMap;
use std::env;

const USAGE: &str = "usage: cfclient <config.yaml> <command> [args]

commands:
  zones [name]                   list zones, optionally filtered by name
  records <zone_id>              list DNS records of a zone
  record <zone_id> <record_id>   show one DNS record
  delete <zone_id> <record_id>   delete a DNS record
  cache-level <zone_id> [level]  show or set the cache level";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some((config_file, rest)) = args.split_first() else {
        bail!(USAGE);
    };

    let config = ClientConfig::from_file(config_file)
        .with_context(|| format!("Failed to load config file: {}", config_file))?;
    let api = Cloudflare::new(config)?;

    let rest: Vec<&str> = rest.iter().map(String::as_str).collect();
    let body = match rest.as_slice() {
        ["zones"] => api.get_zones(QueryParams::new(), HeaderMap::new()).await?,
        ["zones", name] => {
            api.get_zones(QueryParams::new().with("name", *name), HeaderMap::new())
                .await?
        }
        ["records", zone_id] => {
            api.get_dns_records(zone_id, QueryParams::new(), HeaderMap::new())
                .await?
        }
        ["record", zone_id, record_id] => {
            api.get_dns_record_details(zone_id, record_id, HeaderMap::new())
                .await?
        }
        ["delete", zone_id, record_id] => {
            info!("Deleting record {} in zone {}", record_id, zone_id);
            api.delete_dns_record(zone_id, record_id, HeaderMap::new())
                .await?
        }
        ["cache-level", zone_id] => {
            api.get_cache_level(zone_id, QueryParams::new(), HeaderMap::new())
                .await?
        }
        ["cache-level", zone_id, level] => {
            info!("Setting cache level of zone {} to {}", zone_id, level);
            api.set_cache_level(zone_id, level.parse()?, HeaderMap::new())
                .await?
        }
        _ => bail!(USAGE),
    };

    println!("{body}");
    Ok(())
}
