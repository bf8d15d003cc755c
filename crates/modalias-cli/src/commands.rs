//! Command implementations.
//!
//! Each command writes to the given output so it can be driven from tests.

use std::io::Write;
use std::path::{Path, PathBuf};

use modalias::{
    AliasResolver, ConfigureReport, ResolutionHook, ResolveOptions, SettingsStatus, StandardHost,
};
use modalias_config::AliasOptions;

use crate::cli::{Cli, Command, PathsArgs, ResolveArgs, RewriteArgs};
use crate::error::Result;
use crate::ui::Style;

/// Placeholder filename for the module requests are issued from.
const REQUESTER_FILE: &str = "[modalias]";

/// A configured resolver over the filesystem host.
pub struct Session {
    pub resolver: AliasResolver<StandardHost>,
    pub report: ConfigureReport,
}

impl Session {
    pub fn cwd(&self) -> &Path {
        &self.report.cwd
    }

    fn requesting_dir(&self, from: Option<&Path>) -> PathBuf {
        match from {
            Some(from) => self.cwd().join(from),
            None => self.cwd().to_path_buf(),
        }
    }
}

/// Build a resolver and apply `options` to it.
pub fn setup(options: &AliasOptions) -> Result<Session> {
    let cwd = options.resolved_cwd()?;
    let resolver = AliasResolver::new(StandardHost::new(&cwd));
    let report = resolver.configure(options)?;
    tracing::debug!(settings = %report.settings_file.display(), "configured resolver");
    Ok(Session { resolver, report })
}

/// Run the parsed command line. Options come from the environment with the
/// command-line flags layered on top.
pub fn execute(cli: &Cli, out: &mut dyn Write, style: &Style) -> Result<()> {
    let options = AliasOptions::load()?.merge(cli.options());
    let session = setup(&options)?;

    match &cli.command {
        Command::Rewrite(args) => rewrite(&session, args, out, style),
        Command::Paths(args) => paths(&session, args, out, style),
        Command::Resolve(args) => resolve(&session, args, out, style),
        Command::Check => check(&session, out, style),
    }
}

pub fn rewrite(session: &Session, args: &RewriteArgs, out: &mut dyn Write, style: &Style) -> Result<()> {
    for request in &args.requests {
        let effective = session.resolver.resolve_request(request);
        if effective == request.as_str() {
            writeln!(out, "{} {}", style.request(request), style.dim("(unchanged)"))?;
        } else {
            writeln!(out, "{} -> {}", style.request(request), style.path(Path::new(&*effective)))?;
        }
    }
    Ok(())
}

pub fn paths(session: &Session, args: &PathsArgs, out: &mut dyn Write, style: &Style) -> Result<()> {
    let from = session.requesting_dir(args.from.as_deref());
    for path in session.resolver.compute_search_paths(&from) {
        writeln!(out, "{}", style.path(&path))?;
    }
    Ok(())
}

pub fn resolve(session: &Session, args: &ResolveArgs, out: &mut dyn Write, style: &Style) -> Result<()> {
    let from = session.requesting_dir(args.from.as_deref());
    let search_paths = session.resolver.compute_search_paths(&from);
    let requester = session
        .resolver
        .host()
        .load_module(from.join(REQUESTER_FILE), None, search_paths);

    let resolved = session.resolver.resolve_filename(
        &args.request,
        Some(&*requester),
        false,
        &ResolveOptions::default(),
    )?;
    writeln!(out, "{}", style.path(&resolved))?;
    Ok(())
}

pub fn check(session: &Session, out: &mut dyn Write, style: &Style) -> Result<()> {
    let report = &session.report;
    let status = match &report.settings {
        SettingsStatus::Loaded => style.request("loaded"),
        SettingsStatus::NotFound => style.warn("not found"),
        SettingsStatus::Malformed(reason) => style.warn(&format!("malformed ({reason})")),
    };
    writeln!(
        out,
        "{} {} [{}]",
        style.heading("settings:"),
        style.path(&report.settings_file),
        status
    )?;

    let aliases = session.resolver.aliases();
    writeln!(out, "{} {}", style.heading("aliases:"), aliases.len())?;
    for entry in &aliases {
        writeln!(out, "  {} -> {}", style.request(&entry.prefix), style.path(&entry.target_dir))?;
    }

    let dirs = session.resolver.search_dirs();
    writeln!(out, "{} {}", style.heading("search dirs:"), dirs.len())?;
    for dir in &dirs {
        writeln!(out, "  {}", style.path(dir))?;
    }
    Ok(())
}
