//! DoorReach — wholesale outreach console.
//!
//! A thin presentational layer over the outreach backend: fetch doors,
//! campaigns, and stats; render them; forward user actions (send, mark
//! responded, enrich, generate) back over REST. The only logic owned here
//! is the follow-up status engine driving the live countdowns.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use doorreach_api_client::{
    CampaignDateField, OutreachClient, PipelineRun, SendEmailRequest, StartPipelineRequest,
    ValidatePipelineRequest,
};
use doorreach_core::config::AppConfig;
use doorreach_core::types::{EmailVariant, OutreachCampaign};
use doorreach_dashboard::{CampaignCard, CampaignFilter, CountdownTicker, DashboardSummary};
use doorreach_followup::FollowUpTimeline;
use std::io::Write;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "doorreach")]
#[command(about = "Wholesale outreach console — doors, campaigns, follow-ups")]
#[command(version)]
struct Cli {
    /// Outreach backend base URL (overrides config)
    #[arg(long, env = "DOORREACH__API__BASE_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Overview stats across campaigns, follow-ups, and enrichment
    Stats,
    /// List campaigns with live follow-up status
    Campaigns {
        /// all | sent | overdue | waiting
        #[arg(long, default_value = "all")]
        filter: CampaignFilter,
    },
    /// Show one campaign card; --watch keeps the countdown live
    Campaign {
        id: String,
        #[arg(long, default_value_t = false)]
        watch: bool,
    },
    /// List retailers ("doors")
    Retailers {
        #[arg(long, default_value_t = 0)]
        skip: u64,
        #[arg(long, default_value_t = 50)]
        limit: u64,
        /// Filter by country code
        #[arg(long)]
        country: Option<String>,
        /// Filter by relationship status
        #[arg(long)]
        status: Option<String>,
    },
    /// Send a chosen draft variant for a campaign
    Send {
        id: String,
        /// A | B | C
        #[arg(long)]
        variant: EmailVariant,
    },
    /// Record a retailer response
    MarkResponded {
        id: String,
        /// Response timestamp; defaults to the current time
        #[arg(long)]
        date: Option<DateTime<Utc>>,
    },
    /// Record a follow-up send date
    RecordFollowup {
        id: String,
        /// Follow-up slot: 1, 2, or 3
        #[arg(long)]
        slot: u8,
        /// Send timestamp; defaults to the current time
        #[arg(long)]
        date: Option<DateTime<Utc>>,
    },
    /// Trigger contact enrichment for one retailer
    Enrich { id: String },
    /// Generate campaigns for a set of retailers
    Generate {
        /// Comma-separated retailer ids
        #[arg(long, value_delimiter = ',', required = true)]
        retailers: Vec<String>,
        /// Brand to pitch; defaults to the configured brand
        #[arg(long)]
        brand: Option<String>,
    },
    /// Discovery pipeline — find new doors from seed and competitor URLs
    Pipeline {
        #[command(subcommand)]
        action: PipelineAction,
    },
    /// Print the CSV export URLs
    ExportUrls,
}

#[derive(Subcommand, Debug)]
enum PipelineAction {
    /// Check seed and competitor URLs before starting a run
    Validate {
        /// Comma-separated seed retailer URLs
        #[arg(long, value_delimiter = ',', required = true)]
        seeds: Vec<String>,
        /// Comma-separated competitor stockist-page URLs
        #[arg(long, value_delimiter = ',', required = true)]
        competitors: Vec<String>,
    },
    /// Start a discovery run
    Start {
        /// Comma-separated seed retailer URLs
        #[arg(long, value_delimiter = ',', required = true)]
        seeds: Vec<String>,
        /// Comma-separated competitor stockist-page URLs
        #[arg(long, value_delimiter = ',', required = true)]
        competitors: Vec<String>,
        /// Brand to pitch; defaults to the configured brand
        #[arg(long)]
        brand: Option<String>,
        /// Skip contact enrichment of discovered retailers
        #[arg(long, default_value_t = false)]
        no_enrich: bool,
        /// Cap on how many retailers to enrich
        #[arg(long, default_value_t = 50)]
        max_enrich: u32,
    },
    /// Show one run's status
    Status { run_id: String },
    /// List past runs
    Runs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doorreach=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    let client = OutreachClient::new(&config.api)?;

    match cli.command {
        Command::Stats => show_stats(&client).await?,
        Command::Campaigns { filter } => list_campaigns(&client, filter).await?,
        Command::Campaign { id, watch } => show_campaign(&client, &config, &id, watch).await?,
        Command::Retailers {
            skip,
            limit,
            country,
            status,
        } => list_retailers(&client, skip, limit, country.as_deref(), status.as_deref()).await?,
        Command::Send { id, variant } => send_email(&client, &id, variant).await?,
        Command::MarkResponded { id, date } => {
            // Real-time sampling happens here, at the call site.
            let date = date.unwrap_or_else(Utc::now);
            let ack = client.mark_responded(&id, date).await?;
            info!(campaign_id = %id, success = ack.success, "Marked responded");
            println!("Campaign {} marked responded at {}", id, date.to_rfc3339());
        }
        Command::RecordFollowup { id, slot, date } => {
            let field = CampaignDateField::for_slot(slot)
                .ok_or_else(|| anyhow::anyhow!("follow-up slot must be 1, 2, or 3"))?;
            let date = date.unwrap_or_else(Utc::now);
            let ack = client.update_campaign_date(&id, field, date).await?;
            info!(campaign_id = %id, slot, success = ack.success, "Recorded follow-up date");
            println!("Follow-up {} recorded for campaign {}", slot, id);
        }
        Command::Enrich { id } => {
            let response = client.enrich_retailer(&id).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Generate { retailers, brand } => {
            let brand = brand.unwrap_or(config.brand.name);
            let count = retailers.len();
            let response = client.generate_campaigns(retailers, &brand).await?;
            info!(count, brand = %brand, "Requested campaign generation");
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Pipeline { action } => run_pipeline(&client, &config, action).await?,
        Command::ExportUrls => {
            println!("campaigns: {}", client.campaigns_csv_url());
            println!("retailers: {}", client.retailers_csv_url());
        }
    }

    Ok(())
}

async fn show_stats(client: &OutreachClient) -> anyhow::Result<()> {
    let (results, campaigns, enrichment) = tokio::join!(
        client.list_results(),
        client.list_campaigns(),
        client.enrichment_stats(),
    );
    let results = results?;
    let campaigns = campaigns?;
    let enrichment = enrichment?;

    let summary = DashboardSummary::build(
        &results.results,
        &campaigns.campaigns,
        enrichment,
        Utc::now(),
    );

    println!("Generation jobs");
    println!("  total: {}", summary.campaigns.total);
    println!("  completed: {}", summary.campaigns.completed);
    println!("  failed: {}", summary.campaigns.failed);
    println!("  in flight: {}", summary.campaigns.processing);
    println!("  total cost: ${:.2}", summary.campaigns.total_cost);
    println!("Follow-up posture ({} campaigns)", summary.followups.total);
    println!("  not sent: {}", summary.followups.not_sent);
    println!("  waiting: {}", summary.followups.waiting);
    println!("  overdue: {}", summary.followups.overdue);
    println!("  responded: {}", summary.followups.responded);
    println!("  sequence complete: {}", summary.followups.sequence_complete);
    println!("Enrichment");
    println!("  retailers: {}", summary.enrichment.total_retailers);
    println!("  with emails: {}", summary.enrichment.with_emails);
    for (status, count) in &summary.enrichment.by_status {
        println!("    {}: {}", status, count);
    }
    Ok(())
}

async fn list_campaigns(client: &OutreachClient, filter: CampaignFilter) -> anyhow::Result<()> {
    let list = client.list_campaigns().await?;
    let now = Utc::now();
    let selected = filter.apply(&list.campaigns, now);
    info!(total = list.total, shown = selected.len(), filter = %filter, "Loaded campaigns");

    println!(
        "{:<14} {:<28} {:<20} {:<24} {}",
        "ID", "RETAILER", "STAGE", "NEXT ACTION", "COUNTDOWN"
    );
    for campaign in selected {
        let status = FollowUpTimeline::from_campaign(campaign).status_at(now);
        let countdown = status
            .countdown()
            .map(|c| format!("{} {}", c, c.qualifier()))
            .unwrap_or_default();
        println!(
            "{:<14} {:<28} {:<20} {:<24} {}",
            truncate(&campaign.id, 14),
            truncate(&campaign.retailer_name, 28),
            status.stage,
            status.next_action,
            countdown
        );
    }
    Ok(())
}

async fn show_campaign(
    client: &OutreachClient,
    config: &AppConfig,
    id: &str,
    watch: bool,
) -> anyhow::Result<()> {
    let list = client.list_campaigns().await?;
    let campaign = list
        .campaigns
        .into_iter()
        .find(|c| c.id == id)
        .ok_or_else(|| anyhow::anyhow!("no campaign with id {}", id))?;

    print_card(&campaign);

    if watch {
        watch_countdown(&campaign, config.refresh.interval_secs).await?;
    }
    Ok(())
}

fn print_card(campaign: &OutreachCampaign) {
    let card = CampaignCard::build(campaign, Utc::now());
    println!("{} — {} ({})", card.campaign_id, card.retailer_name, card.brand_name);
    if let Some(email) = &card.retailer_email {
        println!("contact: {}", email);
    }
    if let Some(notes) = &card.retailer_notes {
        println!("notes: {}", notes);
    }
    println!("status: {} — {}", card.stage, card.next_action);
    if let Some(countdown) = card.countdown {
        println!("countdown: {} {}", countdown, countdown.qualifier());
    }
    for preview in &card.variants {
        println!("--- Variation {} ---", preview.variant);
        println!("subject: {}", preview.subject);
        println!("{}", preview.snippet);
    }
}

async fn watch_countdown(campaign: &OutreachCampaign, interval_secs: u64) -> anyhow::Result<()> {
    let timeline = FollowUpTimeline::from_campaign(campaign);
    let ticker = CountdownTicker::spawn(timeline, Duration::from_secs(interval_secs.max(1)));
    let mut rx = ticker.subscribe();

    println!("watching (Ctrl-C to stop)");
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let status = rx.borrow().clone();
                let line = match status.countdown() {
                    Some(countdown) => {
                        format!("{} — {} ({} {})", status.stage, status.next_action, countdown, countdown.qualifier())
                    }
                    None => format!("{} — {}", status.stage, status.next_action),
                };
                print!("\r{:<80}", line);
                std::io::stdout().flush()?;
            }
        }
    }
    println!();
    Ok(())
}

async fn list_retailers(
    client: &OutreachClient,
    skip: u64,
    limit: u64,
    country: Option<&str>,
    status: Option<&str>,
) -> anyhow::Result<()> {
    let list = client.list_retailers(skip, limit, country, status).await?;
    info!(total = list.total, shown = list.retailers.len(), "Loaded retailers");

    println!(
        "{:<14} {:<28} {:<8} {:<12} {:<10} {}",
        "ID", "NAME", "COUNTRY", "ENRICHMENT", "SCORE", "EMAILS"
    );
    for retailer in &list.retailers {
        println!(
            "{:<14} {:<28} {:<8} {:<12} {:<10} {}",
            truncate(&retailer.id, 14),
            truncate(&retailer.name, 28),
            retailer.country.as_deref().unwrap_or("-"),
            retailer.enrichment_status.as_deref().unwrap_or("-"),
            retailer
                .confidence_score
                .map(|s| format!("{:.2}", s))
                .unwrap_or_else(|| "-".to_string()),
            retailer.contact_emails.join(", ")
        );
    }
    Ok(())
}

async fn send_email(
    client: &OutreachClient,
    id: &str,
    variant: EmailVariant,
) -> anyhow::Result<()> {
    let request = SendEmailRequest {
        campaign_id: id.to_string(),
        variation: variant,
        from_email: None,
        from_name: None,
    };
    let response = client.send_email(&request).await?;
    info!(
        campaign_id = %id,
        email_id = %response.email_id,
        "Email sent"
    );
    println!(
        "Sent variation {} to {} ({}): {}",
        variant, response.sent_to, response.retailer, response.subject
    );
    Ok(())
}

async fn run_pipeline(
    client: &OutreachClient,
    config: &AppConfig,
    action: PipelineAction,
) -> anyhow::Result<()> {
    match action {
        PipelineAction::Validate { seeds, competitors } => {
            let request = ValidatePipelineRequest {
                seed_retailer_urls: seeds,
                competitor_brand_urls: competitors,
            };
            let validation = client.validate_pipeline(&request).await?;
            println!("valid: {}", validation.is_valid);
            let req = &validation.requirements;
            println!(
                "seeds: {} provided, {} required",
                req.provided_seeds, req.min_seed_retailers
            );
            println!(
                "competitors: {} provided, {} required",
                req.provided_competitors, req.min_competitor_brands
            );
            for error in &validation.errors {
                println!("error: {}", error);
            }
            for warning in &validation.warnings {
                println!("warning: {}", warning);
            }
        }
        PipelineAction::Start {
            seeds,
            competitors,
            brand,
            no_enrich,
            max_enrich,
        } => {
            let request = StartPipelineRequest {
                seed_retailer_urls: seeds,
                competitor_brand_urls: competitors,
                brand_name: brand.unwrap_or_else(|| config.brand.name.clone()),
                enrich_contacts: !no_enrich,
                max_enrich,
            };
            let run = client.start_pipeline(&request).await?;
            info!(run_id = %run.run_id, status = %run.status, "Started discovery run");
            println!("run {} — {}", run.run_id, run.status);
        }
        PipelineAction::Status { run_id } => {
            let run = client.pipeline_status(&run_id).await?;
            print_pipeline_run(&run);
        }
        PipelineAction::Runs => {
            let list = client.list_pipeline_runs().await?;
            println!(
                "{:<20} {:<10} {:<22} {:<10} {}",
                "RUN", "STATUS", "CREATED", "FOUND", "BRAND"
            );
            for run in &list.runs {
                println!(
                    "{:<20} {:<10} {:<22} {:<10} {}",
                    truncate(&run.run_id, 20),
                    run.status,
                    run.created_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
                    run.stats.retailers_found,
                    run.config.brand_name
                );
            }
        }
    }
    Ok(())
}

fn print_pipeline_run(run: &PipelineRun) {
    println!("run {} — {}", run.run_id, run.status);
    if let Some(started) = run.started_at {
        println!("started: {}", started.to_rfc3339());
    }
    if let Some(completed) = run.completed_at {
        println!("completed: {}", completed.to_rfc3339());
    }
    if let Some(error) = &run.error {
        println!("error: {}", error);
    }
    for (stage, progress) in &run.stages {
        println!("  {}: {} ({})", stage, progress.status, progress.count);
    }
    println!(
        "found {} / enriched {} / emails {}",
        run.stats.retailers_found, run.stats.retailers_enriched, run.stats.emails_generated
    );
    if !run.retailers.is_empty() {
        println!("{:<28} {:<24} {:<8} {}", "NAME", "DOMAIN", "SCORE", "EMAILS");
        for retailer in &run.retailers {
            println!(
                "{:<28} {:<24} {:<8.2} {}",
                truncate(&retailer.name, 28),
                truncate(&retailer.domain, 24),
                retailer.confidence_score,
                retailer
                    .contact_emails
                    .as_deref()
                    .unwrap_or_default()
                    .join(", ")
            );
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
