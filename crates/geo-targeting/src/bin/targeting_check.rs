use std::env;
use std::fs;

use geo_targeting::{Campaign, CampaignFilter, GeoTargetingConfig, SessionContext, UserProfile};
use serde::Deserialize;
use tracing::info;

/// A single feed request: who is asking and which campaigns are candidates.
#[derive(Debug, Deserialize)]
struct TargetingRequest {
    user: UserProfile,
    #[serde(default)]
    session: Option<SessionContext>,
    #[serde(default)]
    campaigns: Vec<Campaign>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("geo_targeting=info")),
        )
        .init();

    let mut args = env::args().skip(1);
    let request_path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("Usage: targeting_check <request.json>");
            std::process::exit(1);
        }
    };

    let config = GeoTargetingConfig::from_env()?;
    let fallback = config.load_fallback_countries()?;

    let request_data = fs::read_to_string(&request_path)?;
    let request: TargetingRequest = serde_json::from_str(&request_data)?;
    info!(
        "Checking {} campaigns for user {}",
        request.campaigns.len(),
        request.user.id
    );

    let filter = CampaignFilter::new(config, fallback);
    let decisions = filter.decide_all(&request.user, request.session.as_ref(), &request.campaigns);

    if decisions.is_empty() {
        println!("No campaigns in request");
        return Ok(());
    }

    for (campaign, decision) in decisions {
        println!("{}", campaign.render_decision(&decision));
    }

    Ok(())
}
