use std::{process, sync::Arc};

use site_locale::{
    application::{
        about::{AboutService, AboutView},
        error::AppError,
        repos::{AuthorsRepo, PreferenceStorage},
        store::LocaleStore,
        switch::{LocaleSwitch, StoreTarget},
    },
    config,
    domain::{
        locale::Locale,
        route::{canonical_path, localized_path},
    },
    infra::{content::TomlAuthorsRepo, error::InfraError, storage::FileStorage, telemetry},
};
use tracing::{Dispatch, Level, debug, dispatcher, error};
use tracing_subscriber::fmt as tracing_fmt;

fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        eprintln!("error: {}: {error}", error.presentation_message());
        process::exit(error.exit_code());
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::from(InfraError::configuration(err.to_string())))?;

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    let command = cli_args.command.unwrap_or(config::Command::Current);
    let store = open_store(&settings);

    match command {
        config::Command::Current => run_current(&store),
        config::Command::Switch(args) => run_switch(&store, args),
        config::Command::Menu(args) => run_menu(&store, args),
        config::Command::Route(args) => run_route(args),
        config::Command::About(args) => run_about(store, &settings, args),
    }
}

fn open_store(settings: &config::Settings) -> Arc<LocaleStore> {
    let storage: Arc<dyn PreferenceStorage> = Arc::new(FileStorage::new(
        settings.storage.directory.clone(),
        settings.storage.namespace.clone(),
    ));
    debug!(
        directory = %settings.storage.directory.display(),
        namespace = %settings.storage.namespace,
        "Opening locale store"
    );
    Arc::new(LocaleStore::open(storage))
}

fn run_current(store: &LocaleStore) -> Result<(), AppError> {
    println!("{}", describe(store.active_locale()));
    Ok(())
}

fn run_switch(store: &LocaleStore, args: config::SwitchArgs) -> Result<(), AppError> {
    let outcome = store.switch_to(args.code.trim())?;
    println!("{}", describe(outcome.locale));
    if !outcome.persisted {
        eprintln!("warning: preference applies to this run only; storage is unavailable");
    }
    Ok(())
}

fn run_menu(store: &LocaleStore, args: config::MenuArgs) -> Result<(), AppError> {
    let mut switch = LocaleSwitch::new(StoreTarget::new(store));
    switch.mount();

    if let Some(code) = args.select.as_deref() {
        switch.toggle();
        switch.select_code(code.trim())?;
    } else if args.open {
        switch.toggle();
    }

    println!("{}", switch.render());
    Ok(())
}

fn run_route(args: config::RouteArgs) -> Result<(), AppError> {
    let rewritten = match args.to.as_deref() {
        Some(code) => localized_path(&args.path, code.trim().parse::<Locale>()?),
        None => canonical_path(&args.path).unwrap_or(args.path),
    };
    println!("{rewritten}");
    Ok(())
}

fn run_about(
    store: Arc<LocaleStore>,
    settings: &config::Settings,
    args: config::AboutArgs,
) -> Result<(), AppError> {
    let authors: Arc<dyn AuthorsRepo> =
        Arc::new(TomlAuthorsRepo::new(settings.content.authors_file.clone()));
    let service = AboutService::new(store, authors, settings.content.fallback);

    let view = match args.lang.as_deref() {
        Some(code) => service.about_view_for(code.trim().parse::<Locale>()?)?,
        None => service.about_view()?,
    };
    print!("{}", format_about(&view));
    Ok(())
}

fn describe(locale: Locale) -> String {
    format!("{} ({locale})", locale.label())
}

fn format_about(view: &AboutView) -> String {
    let author = &view.author;
    let mut lines = vec![author.name.clone()];

    if view.is_fallback() {
        lines.push(format!(
            "(not available in {}; showing {})",
            view.requested.label(),
            view.served.label()
        ));
    }

    let role = [author.occupation.as_deref(), author.company.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ");
    if !role.is_empty() {
        lines.push(role);
    }

    lines.extend(
        [
            ("email", &author.email),
            ("github", &author.github),
            ("linkedin", &author.linkedin),
            ("twitter", &author.twitter),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_ref().map(|value| format!("{label}: {value}"))),
    );

    let body = author.body.trim();
    if !body.is_empty() {
        lines.push(String::new());
        lines.push(body.to_string());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
