use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the site-locale binary.
#[derive(Debug, Parser)]
#[command(
    name = "site-locale",
    version,
    about = "Locale preference, switch menu and localized content for the blog"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "SITE_LOCALE_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: GlobalOverrides,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print the active locale.
    Current,
    /// Make CODE the active locale and persist it.
    Switch(SwitchArgs),
    /// Render the locale switch menu, optionally selecting an entry.
    Menu(MenuArgs),
    /// Canonicalize a route, or rewrite it for another locale.
    Route(RouteArgs),
    /// Print the About page author profile for the active locale.
    About(AboutArgs),
}

#[derive(Debug, Args, Clone)]
pub struct SwitchArgs {
    /// Locale code to switch to (en|zh).
    #[arg(value_name = "CODE")]
    pub code: String,
}

#[derive(Debug, Args, Default, Clone)]
pub struct MenuArgs {
    /// Render the menu as if the trigger button had been activated.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub open: bool,

    /// Open the menu and select CODE.
    #[arg(long, value_name = "CODE", conflicts_with = "open")]
    pub select: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct RouteArgs {
    /// Route pathname, e.g. `/zh/about`.
    #[arg(value_name = "PATH", value_hint = ValueHint::Other)]
    pub path: String,

    /// Locale to rewrite the route for; without it the route is canonicalized.
    #[arg(long, value_name = "CODE")]
    pub to: Option<String>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct AboutArgs {
    /// Locale to render instead of the active one.
    #[arg(long, value_name = "CODE")]
    pub lang: Option<String>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct GlobalOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,

    /// Override the directory holding the persisted preference.
    #[arg(
        long = "storage-directory",
        value_name = "PATH",
        value_hint = ValueHint::DirPath,
        global = true
    )]
    pub storage_directory: Option<PathBuf>,

    /// Override the storage namespace (file stem of the preference document).
    #[arg(long = "storage-namespace", value_name = "NAME", global = true)]
    pub storage_namespace: Option<String>,

    /// Override the author profiles file.
    #[arg(
        long = "content-authors-file",
        value_name = "PATH",
        value_hint = ValueHint::FilePath,
        global = true
    )]
    pub content_authors_file: Option<PathBuf>,

    /// Override the content fallback policy (strict|default_locale).
    #[arg(long = "content-fallback", value_name = "POLICY", global = true)]
    pub content_fallback: Option<String>,
}
