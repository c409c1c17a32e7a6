use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;

use moddesk::moderation::schedule::combine_date_time;
use moddesk::{
    ApiClient, ContentStatus, ContentType, ListFilter, ModerationAction, ModerationCoordinator,
    ModerationState, PaymentStatus, PromotionAdminAction, Session, TabCounts, TokenPair,
    DEFAULT_PAYMENT_AMOUNT,
};

#[derive(Parser)]
#[command(name = "moddesk")]
#[command(about = "Admin moderation desk for the content platform")]
#[command(long_about = "moddesk drives the content moderation workflow against the platform \
                       backend: review approvals, payment requests and verification, status \
                       overrides, scheduled reviews, and promotion administration. Run \
                       'moddesk doctor' to smoke-test backend connectivity.")]
struct Cli {
    /// Override the backend base URL from configuration
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List content items in the moderation queue with tab counts
    List {
        /// Filter by content type: opportunity, event, job, resource
        #[arg(long = "type")]
        content_type: Option<String>,
        /// Filter by status: draft, active, inactive
        #[arg(long)]
        status: Option<String>,
        /// Filter by payment status (e.g. awaiting_payment, payment_uploaded)
        #[arg(long)]
        payment_status: Option<String>,
        /// Free-text search over title and id
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Approve a submitted item (paid content then waits for a payment request)
    Approve {
        content_type: String,
        id: String,
    },
    /// Reject a submitted item with a mandatory reason
    Reject {
        content_type: String,
        id: String,
        #[arg(long, help = "Rejection reason shown to the provider")]
        reason: String,
    },
    /// Request payment from the provider for approved paid content
    RequestPayment {
        content_type: String,
        id: String,
        /// Amount in whole Naira
        #[arg(long, default_value_t = DEFAULT_PAYMENT_AMOUNT)]
        amount: u64,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Verify (or reject with --reject) an uploaded payment receipt
    VerifyPayment {
        content_type: String,
        id: String,
        /// Reject the receipt instead of verifying it
        #[arg(long)]
        reject: bool,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Direct status override; disabling requires --reason
    SetState {
        content_type: String,
        id: String,
        /// New status: draft, active, inactive
        status: String,
        #[arg(long, help = "Disable reason, required when status is inactive")]
        reason: Option<String>,
    },
    /// Pull an item back to draft until a scheduled review time
    ScheduleReview {
        content_type: String,
        id: String,
        #[arg(long, help = "Review date, YYYY-MM-DD")]
        date: String,
        #[arg(long, help = "Review time, HH:MM")]
        time: String,
    },
    /// Patch content fields via the type-specific update endpoint
    Edit {
        content_type: String,
        id: String,
        /// JSON object with the fields to change
        #[arg(long)]
        patch: String,
    },
    /// Administer promotions
    Promotion {
        #[command(subcommand)]
        action: PromotionCommands,
    },
    /// Smoke-test backend connectivity (health + public list endpoints)
    Doctor,
}

#[derive(Subcommand)]
enum PromotionCommands {
    List {
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "20")]
        limit: u32,
    },
    Approve {
        id: String,
    },
    Reject {
        id: String,
        #[arg(long)]
        reason: String,
    },
    VerifyPayment {
        id: String,
    },
    RejectPayment {
        id: String,
        #[arg(long)]
        reason: String,
    },
    Pause {
        id: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tokio::runtime::Runtime::new()?.block_on(run(cli))
}

async fn run(cli: Cli) -> Result<()> {
    moddesk::init_telemetry()?;
    moddesk::init_config()?;

    match cli.command {
        Commands::Doctor => doctor_command(cli.base_url).await,
        Commands::List {
            content_type,
            status,
            payment_status,
            search,
            page,
            limit,
        } => {
            let coordinator = build_coordinator(cli.base_url)?;
            list_command(
                &coordinator,
                content_type,
                status,
                payment_status,
                search,
                page,
                limit,
            )
            .await
        }
        Commands::Approve { content_type, id } => {
            run_action(cli.base_url, &content_type, &id, ModerationAction::Approve).await
        }
        Commands::Reject {
            content_type,
            id,
            reason,
        } => {
            run_action(
                cli.base_url,
                &content_type,
                &id,
                ModerationAction::Reject { reason },
            )
            .await
        }
        Commands::RequestPayment {
            content_type,
            id,
            amount,
            notes,
        } => {
            run_action(
                cli.base_url,
                &content_type,
                &id,
                ModerationAction::RequestPayment { amount, notes },
            )
            .await
        }
        Commands::VerifyPayment {
            content_type,
            id,
            reject,
            notes,
        } => {
            run_action(
                cli.base_url,
                &content_type,
                &id,
                ModerationAction::VerifyPayment {
                    verified: !reject,
                    notes,
                },
            )
            .await
        }
        Commands::SetState {
            content_type,
            id,
            status,
            reason,
        } => {
            run_action(
                cli.base_url,
                &content_type,
                &id,
                ModerationAction::ChangeState {
                    new_status: parse_status(&status)?,
                    disable_reason: reason,
                },
            )
            .await
        }
        Commands::ScheduleReview {
            content_type,
            id,
            date,
            time,
        } => {
            let at = combine_date_time(&date, &time)?;
            run_action(
                cli.base_url,
                &content_type,
                &id,
                ModerationAction::ScheduleReview { at },
            )
            .await
        }
        Commands::Edit {
            content_type,
            id,
            patch,
        } => {
            let patch: serde_json::Value = serde_json::from_str(&patch)?;
            run_action(
                cli.base_url,
                &content_type,
                &id,
                ModerationAction::EditContent { patch },
            )
            .await
        }
        Commands::Promotion { action } => {
            let coordinator = build_coordinator(cli.base_url)?;
            promotion_command(coordinator.api(), action).await
        }
    }
}

/// Build the coordinator plus its session from configuration, starting the
/// periodic token refresh in the background.
fn build_coordinator(base_url_override: Option<String>) -> Result<ModerationCoordinator> {
    let cfg = moddesk::config()?;
    let base_url = base_url_override.unwrap_or_else(|| cfg.backend.base_url.clone());

    let tokens = cfg.backend.token.clone().map(|access| TokenPair {
        access,
        refresh: cfg.backend.refresh_token.clone().unwrap_or_default(),
    });
    let session = Arc::new(Session::new(&base_url, tokens));
    session.spawn_periodic_refresh(std::time::Duration::from_secs(
        cfg.session.refresh_interval_seconds,
    ));

    let api = ApiClient::new(
        base_url,
        session,
        cfg.backend.rate_limit.requests_per_minute,
        cfg.backend.rate_limit.burst_capacity,
    )?;
    Ok(ModerationCoordinator::new(api))
}

/// Fetch the item, run the action through the coordinator, and report the
/// state transition the backend confirmed.
async fn run_action(
    base_url: Option<String>,
    content_type: &str,
    id: &str,
    action: ModerationAction,
) -> Result<()> {
    let coordinator = build_coordinator(base_url)?;
    let ct: ContentType = content_type.parse().map_err(anyhow::Error::msg)?;
    let item = coordinator.api().fetch_content(ct, id).await?;

    match coordinator.execute(&item, action).await {
        Ok(outcome) => {
            println!(
                "✅ {} {}: {} -> {}",
                ct, id, outcome.previous_state, outcome.new_state
            );
            Ok(())
        }
        Err(err) => {
            eprintln!("❌ {ct} {id}: {err}");
            std::process::exit(1);
        }
    }
}

async fn list_command(
    coordinator: &ModerationCoordinator,
    content_type: Option<String>,
    status: Option<String>,
    payment_status: Option<String>,
    search: Option<String>,
    page: u32,
    limit: Option<u32>,
) -> Result<()> {
    let cfg = moddesk::config()?;
    let filter = ListFilter {
        content_type: content_type
            .map(|s| s.parse::<ContentType>().map_err(anyhow::Error::msg))
            .transpose()?,
        status: status.map(|s| parse_status(&s)).transpose()?,
        payment_status: payment_status
            .map(|s| parse_payment_status(&s))
            .transpose()?,
        search,
    };
    let limit = limit.unwrap_or(cfg.moderation.page_size);

    let page_data = coordinator.api().list_moderation(&filter, page, limit).await?;
    // The backend treats unknown query parameters as best-effort, so the
    // same filter is enforced on the fetched page too.
    let items: Vec<_> = page_data
        .data
        .iter()
        .filter(|item| filter.matches(item))
        .collect();
    let counts = TabCounts::from_items(items.iter().copied());

    println!(
        "📋 Moderation queue (page {}, {} of {} items)",
        page_data.page,
        items.len(),
        page_data.total
    );
    println!(
        "   pending: {} | approved: {} | awaiting payment: {} | uploaded: {} | live: {} | rejected: {}",
        counts.pending,
        counts.approved,
        counts.awaiting_payment,
        counts.payment_uploaded,
        counts.live,
        counts.rejected
    );
    println!();
    for item in &items {
        let state = ModerationState::derive(item);
        println!(
            "  {:<26} {:<12} {:<34} [{}]",
            item.id,
            item.content_type.to_string(),
            item.title.as_deref().unwrap_or("(untitled)"),
            state
        );
    }
    Ok(())
}

async fn promotion_command(api: &ApiClient, action: PromotionCommands) -> Result<()> {
    match action {
        PromotionCommands::List { page, limit } => {
            let promos = api.list_promotions(page, limit).await?;
            println!("📣 Promotions (page {}, {} items)", promos.page, promos.data.len());
            let now = chrono::Utc::now();
            for p in &promos.data {
                let remaining = p
                    .remaining_days(now)
                    .map(|d| format!("{d}d left"))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "  {:<26} {:?} {:?}/{:?} {}",
                    p.id, p.package_type, p.status, p.payment_status, remaining
                );
            }
            Ok(())
        }
        PromotionCommands::Approve { id } => {
            promotion_action(api, &id, PromotionAdminAction::Approve).await
        }
        PromotionCommands::Reject { id, reason } => {
            promotion_action(api, &id, PromotionAdminAction::Reject { reason }).await
        }
        PromotionCommands::VerifyPayment { id } => {
            promotion_action(api, &id, PromotionAdminAction::VerifyPayment).await
        }
        PromotionCommands::RejectPayment { id, reason } => {
            promotion_action(api, &id, PromotionAdminAction::RejectPayment { reason }).await
        }
        PromotionCommands::Pause { id } => {
            promotion_action(api, &id, PromotionAdminAction::Pause).await
        }
    }
}

async fn promotion_action(api: &ApiClient, id: &str, action: PromotionAdminAction) -> Result<()> {
    let name = action.path_segment();
    match api.promotion_action(id, &action).await {
        Ok(()) => {
            println!("✅ promotion {id}: {name} accepted");
            Ok(())
        }
        Err(err) => {
            eprintln!("❌ promotion {id}: {name} failed: {err}");
            std::process::exit(1);
        }
    }
}

/// Unauthenticated smoke checks against the health and public list
/// endpoints. Exit code 1 when any check fails.
async fn doctor_command(base_url_override: Option<String>) -> Result<()> {
    let cfg = moddesk::config()?;
    let base_url = base_url_override.unwrap_or_else(|| cfg.backend.base_url.clone());
    let session = Arc::new(Session::new(&base_url, None));
    let api = ApiClient::new(
        base_url.clone(),
        session,
        cfg.backend.rate_limit.requests_per_minute,
        cfg.backend.rate_limit.burst_capacity,
    )?;

    const CHECKS: [&str; 5] = [
        "/health",
        "/api/opportunities",
        "/api/events",
        "/api/jobs",
        "/api/resources",
    ];

    println!("🩺 Checking backend at {base_url}");
    let mut failed = 0u32;
    for path in CHECKS {
        match api.smoke_get(path).await {
            Ok(status) if status.is_success() => {
                println!("✅ PASS {path} ({status})");
            }
            Ok(status) => {
                println!("❌ FAIL {path} ({status})");
                failed += 1;
            }
            Err(err) => {
                println!("❌ FAIL {path} ({err})");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        println!("{failed} backend check(s) failed");
        std::process::exit(1);
    }
    println!("All backend checks passed");
    Ok(())
}

fn parse_status(s: &str) -> Result<ContentStatus> {
    match s.to_ascii_lowercase().as_str() {
        "draft" => Ok(ContentStatus::Draft),
        "active" => Ok(ContentStatus::Active),
        "inactive" => Ok(ContentStatus::Inactive),
        other => anyhow::bail!("unknown status: {other} (expected draft, active, or inactive)"),
    }
}

fn parse_payment_status(s: &str) -> Result<PaymentStatus> {
    match s.to_ascii_lowercase().as_str() {
        "not_required" => Ok(PaymentStatus::NotRequired),
        "pending" => Ok(PaymentStatus::Pending),
        "awaiting_payment" => Ok(PaymentStatus::AwaitingPayment),
        "payment_uploaded" => Ok(PaymentStatus::PaymentUploaded),
        "verified" => Ok(PaymentStatus::Verified),
        "failed" => Ok(PaymentStatus::Failed),
        other => anyhow::bail!("unknown payment status: {other}"),
    }
}
