use std::sync::Arc;

use anyhow::Context;
use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::access::{AccessEvaluator, Role};
use crate::cli::utils::{output_error, output_success, print_fields};
use crate::cli::OutputFormat;
use crate::config::config;
use crate::database::{DatabaseManager, OrganizationStore, PgStore};

#[derive(Subcommand)]
pub enum AccessCommands {
    #[command(about = "Evaluate a user's role and gated access in an organization")]
    Check {
        #[arg(long, help = "User id to evaluate")]
        user: Uuid,
        #[arg(long, help = "Organization slug")]
        org: String,
        #[arg(long, help = "Also test this required role (e.g. staff_manager)")]
        role: Option<Role>,
    },
}

pub async fn handle(cmd: AccessCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let result = match cmd {
        AccessCommands::Check { user, org, role } => check(user, &org, role, output_format).await,
    };
    DatabaseManager::close().await;
    result
}

async fn check(user_id: Uuid, slug: &str, required: Option<Role>, output_format: OutputFormat) -> anyhow::Result<()> {
    let store = Arc::new(PgStore::connect().await.context("failed to connect to database")?);

    let Some(organization) = store.find_by_slug(slug).await? else {
        output_error(output_format, &format!("Organization '{}' not found", slug), Some("NOT_FOUND"))?;
        return Ok(());
    };

    let evaluator =
        AccessEvaluator::new(store.clone(), store.clone()).with_freshness(config().access.freshness());

    let role = evaluator.role_of(user_id, organization.id).await?;
    let has_required = match required {
        Some(required) => Some(evaluator.has_role(user_id, organization.id, required).await?),
        None => None,
    };
    let subscription = evaluator.subscription_of(user_id, organization.id).await?;
    let active = evaluator.has_active_subscription(user_id, organization.id).await?;
    let gated = evaluator.check_gated_access(user_id, organization.id).await?;

    match output_format {
        OutputFormat::Json => output_success(
            output_format,
            "Access evaluated",
            Some(json!({
                "user_id": user_id,
                "organization_id": organization.id,
                "organization_slug": organization.slug,
                "role": role,
                "required_role": required,
                "has_required_role": has_required,
                "subscription_status": subscription.as_ref().map(|s| s.status.as_str()),
                "current_period_end": subscription.as_ref().and_then(|s| s.current_period_end),
                "has_active_subscription": active,
                "gated_access": gated,
                "granted": gated.is_granted(),
            })),
        ),
        OutputFormat::Text => {
            println!("Access for {} in {} ({})", user_id, organization.name, organization.slug);

            let mut fields = vec![(
                "role",
                role.map_or_else(|| "none".to_string(), |r| r.to_string()),
            )];
            if let (Some(required), Some(has)) = (required, has_required) {
                fields.push(("required", format!("{} -> {}", required, if has { "yes" } else { "no" })));
            }
            fields.push((
                "subscription",
                subscription
                    .as_ref()
                    .map_or_else(|| "none".to_string(), |s| s.status.to_string()),
            ));
            fields.push(("active", active.to_string()));
            fields.push(("gated", format!("{:?}", gated)));
            print_fields(&fields);
            Ok(())
        }
    }
}
