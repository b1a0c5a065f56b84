use std::sync::Arc;
use std::time::Duration;

use poise::serenity_prelude::Http;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::db::Repository;
use crate::error::AppError;
use crate::notify::Notifier;
use crate::poller::MatchPoller;
use crate::riot::{Region, RequestMetrics, RiotClient};
use crate::tracking::{DiffPolicy, Enrollment, RankLadder};

use super::commands;

const METRICS_LOG_INTERVAL: Duration = Duration::from_secs(600);

pub type DiscordPoller = MatchPoller<Repository, RiotClient, Arc<Http>>;

/// Shared data accessible in all commands
pub struct Data {
    pub store: Arc<Repository>,
    pub enrollment: Enrollment<Repository, RiotClient>,
    pub poller: Arc<DiscordPoller>,
    pub riot_metrics: Arc<RequestMetrics>,
    pub default_region: Region,
    pub max_tracked_players: usize,
}

impl std::fmt::Debug for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Data")
            .field("store", &self.store)
            .field("default_region", &self.default_region)
            .field("max_tracked_players", &self.max_tracked_players)
            .finish_non_exhaustive()
    }
}

pub type Context<'a> = poise::Context<'a, Data, AppError>;

/// Build the framework. The poller needs the gateway HTTP client, so it is
/// assembled and started once the bot is ready.
pub fn create_framework(
    config: Config,
    store: Arc<Repository>,
    riot: Arc<RiotClient>,
) -> poise::Framework<Data, AppError> {
    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::track(),
                commands::confirm(),
                commands::cancel(),
                commands::untrack(),
                commands::myplayers(),
                commands::forcecheck(),
                commands::status(),
                commands::settings(),
            ],
            on_error: |error| {
                Box::pin(async move {
                    handle_error(error).await;
                })
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                let policy = DiffPolicy {
                    ladder: RankLadder::default(),
                    points_threshold: config.rank_points_threshold,
                };
                let poller = Arc::new(MatchPoller::new(
                    store.clone(),
                    riot.clone(),
                    Notifier::new(ctx.http.clone()),
                    policy,
                    config.poll_pacing,
                ));
                tokio::spawn(poller.clone().start_polling(config.polling_interval_secs));

                let riot_metrics = riot.metrics();
                tokio::spawn(riot_metrics.clone().log_loop(METRICS_LOG_INTERVAL));

                info!(
                    bot_name = %ready.user.name,
                    guild_count = ready.guilds.len(),
                    "🎮 Bot is ready"
                );

                Ok(Data {
                    enrollment: Enrollment::new(
                        store.clone(),
                        riot,
                        config.session_ttl,
                        config.max_tracked_players,
                    ),
                    store,
                    poller,
                    riot_metrics,
                    default_region: config.default_region,
                    max_tracked_players: config.max_tracked_players,
                })
            })
        })
        .build()
}

async fn handle_error(error: poise::FrameworkError<'_, Data, AppError>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            let command_name = ctx.command().name.as_str();
            match &error {
                // Rejections the user can act upon.
                AppError::Enrollment(_) | AppError::Poller(_) => {
                    warn!(
                        error = %error,
                        command = command_name,
                        user_id = %ctx.author().id,
                        "🎮 ⚠️ Command rejected"
                    );
                }
                _ => {
                    error!(
                        error = ?error,
                        command = command_name,
                        user_id = %ctx.author().id,
                        "🎮 ❌ Command execution failed"
                    );
                }
            }
            let _ = ctx.say(format!("Error: {}", error)).await;
        }
        poise::FrameworkError::ArgumentParse { error, ctx, .. } => {
            warn!(
                error = %error,
                command = ctx.command().name.as_str(),
                "🎮 ⚠️ Invalid command argument"
            );
            let _ = ctx.say(format!("Invalid argument: {}", error)).await;
        }
        poise::FrameworkError::MissingBotPermissions {
            missing_permissions,
            ctx,
            ..
        } => {
            warn!(
                permissions = %missing_permissions,
                command = ctx.command().name.as_str(),
                "🎮 ⚠️ Bot missing permissions"
            );
            let _ = ctx
                .say(format!("Missing permissions: {}", missing_permissions))
                .await;
        }
        other => {
            error!(error = ?other, "🎮 ❌ Unhandled framework error");
        }
    }
}
