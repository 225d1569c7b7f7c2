//! LinkedIn command handlers for the CLI.

use std::path::Path;

use chrono::Utc;
use socialdata_builder::SocialPostBuilder;
use socialdata_core::{AppConfig, EngineStore};
use socialdata_linkedin::{scopes, LinkedInClient, LinkedInClientFactory};

/// Configuration, engine store and client factory shared by every command.
pub(crate) struct Context {
    pub config: AppConfig,
    pub store: EngineStore,
    pub factory: LinkedInClientFactory,
}

impl Context {
    /// Opens the engine store and applies credentials from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine store cannot be read.
    pub(crate) fn new(config: AppConfig) -> anyhow::Result<Self> {
        let store = EngineStore::open(&config.engine_store_path)?;
        store.apply_credentials(
            config.linkedin_client_id.as_deref(),
            config.linkedin_client_secret.as_deref(),
        );
        let factory = LinkedInClientFactory::new(
            config.callback_url(),
            config.linkedin_request_timeout_secs,
        );
        Ok(Self {
            config,
            store,
            factory,
        })
    }

    fn client(&self) -> anyhow::Result<LinkedInClient> {
        let engine = self.store.load();
        if !engine.has_credentials() {
            anyhow::bail!(
                "LinkedIn credentials missing; set LINKEDIN_CLIENT_ID and LINKEDIN_CLIENT_SECRET"
            );
        }
        Ok(self.factory.client_for(&engine)?)
    }
}

/// Scopes given on the command line, or the configured defaults.
pub(crate) fn resolve_scopes<'a>(requested: &'a [String], configured: &'a [String]) -> &'a [String] {
    if requested.is_empty() {
        configured
    } else {
        requested
    }
}

pub(crate) fn unknown_scopes(requested: &[String]) -> Vec<&str> {
    requested
        .iter()
        .map(String::as_str)
        .filter(|s| !scopes::is_known(s))
        .collect()
}

pub(crate) fn run_login_url(
    ctx: &Context,
    requested: &[String],
    state: Option<&str>,
) -> anyhow::Result<()> {
    let scopes = resolve_scopes(requested, &ctx.config.linkedin_connect_scopes);
    for scope in unknown_scopes(scopes) {
        tracing::warn!(scope, "scope is not a documented LinkedIn v2 permission");
    }

    let mut client = ctx.client()?;
    let url = client.build_login_url(scopes, state)?;

    println!("{url}");
    if let Some(state) = client.state() {
        eprintln!("state: {state}");
    }
    Ok(())
}

/// Exchanges `code` and persists the token with its absolute expiry.
///
/// # Errors
///
/// Returns an error if the exchange fails or the engine store cannot be
/// written.
pub(crate) async fn run_exchange(ctx: &Context, code: &str) -> anyhow::Result<()> {
    let mut client = ctx.client()?;
    let token = client.exchange_authorization_code(code).await?;

    let expires_at = i64::try_from(token.expires_in)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .and_then(|lifetime| Utc::now().checked_add_signed(lifetime));

    let mut engine = ctx.store.load();
    engine.set_access_token(Some(token.token), true)?;
    engine.set_access_token_expires_at(expires_at, true);
    ctx.store.save(engine)?;

    match expires_at {
        Some(at) => println!("access token stored; expires at {}", at.to_rfc3339()),
        None => println!("access token stored"),
    }
    Ok(())
}

/// Runs the post pipeline for one feed and prints the posts as JSON.
///
/// # Errors
///
/// Returns an error if the feeds file cannot be loaded, the feed is unknown,
/// or the fetch fails.
pub(crate) async fn run_fetch(
    ctx: &Context,
    feed_name: &str,
    feeds_path: Option<&Path>,
) -> anyhow::Result<()> {
    let path = feeds_path.unwrap_or(&ctx.config.feeds_path);
    let feeds = socialdata_core::load_feeds(path)?;
    let entry = feeds
        .find(feed_name)
        .ok_or_else(|| anyhow::anyhow!("feed '{feed_name}' not found in {}", path.display()))?;

    let engine = ctx.store.load();
    if engine.is_access_token_expired(Utc::now()) {
        tracing::warn!(feed = %entry.name, "stored LinkedIn access token has expired");
    }

    let builder = SocialPostBuilder::new(ctx.factory.clone());
    let posts = builder
        .build_posts(Some(&engine), Some(&entry.config))
        .await?;

    tracing::info!(feed = %entry.name, posts = posts.len(), "feed built");
    println!("{}", serde_json::to_string_pretty(&posts)?);
    Ok(())
}

/// Prints LinkedIn's introspection data for the stored token, with its
/// epoch dates rendered the same way as the server's debug-token route.
///
/// # Errors
///
/// Returns an error if no token is stored or introspection fails.
pub(crate) async fn run_introspect(ctx: &Context) -> anyhow::Result<()> {
    let engine = ctx.store.load();
    let token = engine
        .access_token()
        .ok_or_else(|| anyhow::anyhow!("no access token stored; run `exchange` first"))?;

    let client = ctx.client()?;
    let mut data = client.introspect_token(token).await?;
    socialdata_linkedin::format_introspection_dates(&mut data);
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}
