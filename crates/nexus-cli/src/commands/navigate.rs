//! Navigate command implementation.

use anyhow::Result;
use clap::Args;

use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct NavigateArgs {
    /// Route path, e.g. /chat/42
    pub path: String,
}

pub fn run(args: NavigateArgs, ctx: &Context) -> Result<()> {
    let target = ctx.enter(&args.path)?;

    output::success(&format!("Navigated to {}", target.path));
    output::field("Route", target.name);
    output::field("View", target.view);
    if let Some(title) = target.title {
        output::field("Title", title);
    }
    for (name, value) in &target.params {
        output::field(&format!("Param {}", name), value);
    }
    if target.matched.len() > 1 {
        output::field("Layout", &target.matched.join(" > "));
    }
    Ok(())
}
