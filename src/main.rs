use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info, warn};

use yt_membership::config::{Config, DEFAULT_CONFIG_PATH};
use yt_membership::infra::http_client::ReqwestHttp;
use yt_membership::infra::youtube_api::YoutubeChannelApi;
use yt_membership::logging;
use yt_membership::membership::{ArtOptions, BadgeTier};
use yt_membership::{EnrichUseCase, ExtraInfo, ImportUseCase, MemberRecord};

#[derive(Parser)]
#[command(name = "yt_membership")]
#[command(about = "Show channel members with their profile photo and tenure badge")]
#[command(version = "0.1.0")]
struct Cli {
    /// Membership export (CSV)
    csv: PathBuf,

    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Skip photo lookups and only compute badges
    #[arg(long)]
    offline: bool,

    /// Render photo art without colours
    #[arg(long)]
    no_color: bool,

    /// Print one JSON document instead of text cards
    #[arg(long)]
    json: bool,

    /// Log enrichment failures and keep going instead of aborting
    #[arg(long)]
    keep_going: bool,
}

#[derive(Serialize)]
struct MemberCard<'a> {
    #[serde(flatten)]
    member: &'a MemberRecord,
    badge_tier: BadgeTier,
    #[serde(flatten)]
    extra: ExtraInfo,
}

fn print_card(card: &MemberCard<'_>) {
    let member = card.member;
    println!("{}", member.name);
    println!("   Level: {} ({:.1} months)", member.membership_level, member.total_time_in_level);
    println!("   Member for: {:.1} months", member.total_time_as_member);
    println!("   Badge: {} ({})", card.badge_tier, card.extra.badge_image_path.display());
    match member.last_update_at() {
        Ok(at) => println!("   Last update: {} at {}", member.last_update, at.format("%Y-%m-%d %H:%M %:z")),
        Err(_) => println!("   Last update: {} at {}", member.last_update, member.last_update_timestamp),
    }
    if let Some(url) = &card.extra.photo_url {
        println!("   Photo: {url}");
    }
    if let Some(art) = &card.extra.photo_art {
        println!("{art}");
    }
    println!();
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load_from(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    let members = ImportUseCase::with_csv_source()
        .get_members_from_csv(&cli.csv)
        .with_context(|| format!("reading members from {}", cli.csv.display()))?;

    let art = if cli.no_color {
        ArtOptions::monochrome()
    } else {
        ArtOptions::default()
    };
    let enricher = EnrichUseCase::new(
        Box::new(YoutubeChannelApi::new(Box::new(ReqwestHttp::new()), config.youtube.clone())),
        Box::new(ReqwestHttp::new()),
    )
    .with_art_options(art);

    let mut cards = Vec::with_capacity(members.len());
    for member in &members {
        let extra = if cli.offline {
            EnrichUseCase::badge_only(member)?
        } else {
            match enricher.get_extra_info(member) {
                Ok(extra) => extra,
                Err(e) if cli.keep_going => {
                    warn!("Enrichment failed for {}: {}", member.name, e);
                    EnrichUseCase::badge_only(member)?
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("enriching {}", member.name));
                }
            }
        };
        let card = MemberCard {
            member,
            badge_tier: BadgeTier::from_months(member.total_time_as_member)?,
            extra,
        };
        if cli.json {
            cards.push(card);
        } else {
            print_card(&card);
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
    }
    info!("Processed {} members", members.len());
    Ok(())
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let _guard = logging::init_logging();

    let cli = Cli::parse();
    run(&cli).map_err(|e| {
        error!("{:#}", e);
        e
    })
}
