//! Auth command implementations.

use anyhow::{Context as _, Result, bail};
use clap::{Args, Subcommand};
use colored::Colorize;
use serde_json::Value;

use nexus_core::{Credentials, Registration};

use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Log in with email or username
    Login(LoginArgs),

    /// Create an account and log in
    Register(RegisterArgs),

    /// End the session, locally and on the backend
    Logout,

    /// Show the stored session
    Whoami,

    /// Exchange the refresh token for a new access token
    Refresh,

    /// Fetch the current user from the backend
    Me,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Email or username
    #[arg(long, short = 'u')]
    pub identifier: String,

    /// Account password
    #[arg(long, env = "NEXUS_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Ask the backend for a long-lived session
    #[arg(long)]
    pub remember_me: bool,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long, env = "NEXUS_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Display name
    #[arg(long)]
    pub nickname: String,

    #[arg(long)]
    pub phone: Option<String>,
}

pub async fn handle(cmd: AuthCommand, ctx: &Context) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Login(args) => login(args, ctx).await,
        AuthSubcommand::Register(args) => register(args, ctx).await,
        AuthSubcommand::Logout => logout(ctx).await,
        AuthSubcommand::Whoami => whoami(ctx),
        AuthSubcommand::Refresh => refresh(ctx).await,
        AuthSubcommand::Me => me(ctx).await,
    }
}

async fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let credentials = Credentials::new(args.identifier, args.password).remember_me(args.remember_me);

    eprintln!("{}", "Logging in...".dimmed());
    ctx.store()
        .login(&credentials)
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    print_session(ctx);
    Ok(())
}

async fn register(args: RegisterArgs, ctx: &Context) -> Result<()> {
    let mut registration = Registration::new(args.email, args.password, args.nickname);
    if let Some(phone) = args.phone {
        registration = registration.with_phone(phone);
    }

    eprintln!("{}", "Registering...".dimmed());
    ctx.store()
        .register(&registration)
        .await
        .context("Failed to register")?;

    output::success("Account created");
    println!();
    print_session(ctx);
    Ok(())
}

async fn logout(ctx: &Context) -> Result<()> {
    let had_session = ctx.store().is_logged_in();
    ctx.store().logout().await;

    if had_session {
        output::success("Logged out");
    } else {
        output::hint("No active session.");
    }
    Ok(())
}

fn whoami(ctx: &Context) -> Result<()> {
    if !ctx.store().is_logged_in() {
        bail!("No active session. Run 'nexus auth login' first.");
    }

    print_session(ctx);
    Ok(())
}

async fn refresh(ctx: &Context) -> Result<()> {
    ctx.store()
        .refresh()
        .await
        .context("Failed to refresh session")?;

    output::success("Session refreshed");
    Ok(())
}

async fn me(ctx: &Context) -> Result<()> {
    ctx.enter_home()?;
    let user = ctx
        .store()
        .current_user()
        .await
        .context("Failed to fetch current user")?;
    ctx.print(&user)
}

fn print_session(ctx: &Context) {
    output::field("App", ctx.profile().as_str());
    output::field("API", ctx.client().config().base_url.as_str());

    let info = ctx.store().user_info().unwrap_or(Value::Null);
    for (label, key) in [("User ID", "id"), ("Email", "email"), ("Nickname", "nickname")] {
        match &info[key] {
            Value::Null => {}
            Value::String(s) => output::field(label, s),
            other => output::field(label, &other.to_string()),
        }
    }

    let refresh = if ctx.store().session().refresh_token().is_some() {
        "yes"
    } else {
        "no"
    };
    output::field("Refresh token", refresh);
}
