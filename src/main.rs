use anyhow::Context;
use tokio_stream::StreamExt;
use tracing_subscriber::EnvFilter;

use skillbridge::config::ClientConfig;
use skillbridge::models::LoginRequest;
use skillbridge::routes::guard;
use skillbridge::services::auth;
use skillbridge::services::notifications::{badge_label, NotificationPoller};
use skillbridge::{AppContext, Route};

const USAGE: &str = "usage: skillbridge [login <email> <password> | logout | whoami | open <path> | stats | watch]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ClientConfig::from_env();
    tracing::info!("using API at {}", config.api_url);

    let ctx = AppContext::init(config)?;
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["login", email, password] => {
            let credentials = LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            };
            match auth::login(&ctx.client, &credentials).await {
                Ok(route) => {
                    ctx.navigator.navigate(route.clone());
                    println!("signed in, opening {route}");
                }
                Err(e) => anyhow::bail!(e.user_message("Login failed")),
            }
        }
        ["logout"] => {
            auth::logout(&ctx.client, &ctx.navigator);
            println!("signed out");
        }
        ["whoami"] => match ctx.session.current_user() {
            Some(user) => println!("{} (#{}, {})", user.name, user.id, user.role.as_str()),
            None => println!("not signed in"),
        },
        ["open", path] => {
            let requested = Route::parse(path);
            let snapshot = ctx.session.snapshot();
            let landed = ctx.navigator.navigate_guarded(requested.clone(), snapshot.as_ref());
            if landed != requested {
                println!("{requested} redirected to {landed} ({:?})", guard(&requested, snapshot.as_ref()));
            } else {
                println!("{landed}");
            }
        }
        ["stats"] => {
            let stats = ctx
                .client
                .stats()
                .get()
                .await
                .context("failed to load platform stats")?;
            println!(
                "{} services, {} providers, average rating {:.1}",
                stats.total_services, stats.total_providers, stats.avg_rating
            );
        }
        [] | ["watch"] => watch(&ctx).await?,
        _ => anyhow::bail!(USAGE),
    }

    Ok(())
}

async fn watch(ctx: &AppContext) -> anyhow::Result<()> {
    if !ctx.session.is_authenticated() {
        println!("not signed in");
        return Ok(());
    }

    let poller = NotificationPoller::spawn(ctx.client.clone(), ctx.config.poll_interval);
    let mut counts = poller.stream();

    loop {
        tokio::select! {
            next = counts.next() => match next {
                Some(unread) => {
                    let badge = badge_label(unread).unwrap_or_else(|| "none".to_string());
                    tracing::info!(unread, "unread notifications: {badge}");
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                break;
            }
        }
    }

    if !ctx.session.is_authenticated() {
        tracing::warn!("session ended, sign in again");
    }
    Ok(())
}
