use std::{fs, io::Write, process};

use foglio::{
    application::{compose::PostPageService, error::AppError},
    config,
    domain::{
        decor::{FixedViewport, HeadlessViewport, ViewportProbe},
        document::PostDocument,
    },
    infra::{error::InfraError, telemetry},
    presentation::views::{PostTemplate, render_template},
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging)?;

    match cli_args.command {
        config::Command::Render(args) => run_render(settings, *args),
    }
}

fn run_render(settings: config::Settings, args: config::RenderArgs) -> Result<(), AppError> {
    let raw = fs::read_to_string(&args.document).map_err(|err| AppError::from(InfraError::Io(err)))?;
    let document: PostDocument = serde_json::from_str(&raw)
        .map_err(|err| AppError::validation(format!("invalid post document: {err}")))?;

    let probe: Box<dyn ViewportProbe> = match args.viewport_height {
        Some(height) => Box::new(FixedViewport(height)),
        None => Box::new(HeadlessViewport),
    };

    let service = PostPageService::new(settings.site, &settings.decor);
    let view = service.compose(&document, probe.as_ref())?;
    let page = render_template(PostTemplate { view })?;

    match args.output.as_ref() {
        Some(path) => {
            fs::write(path, &page).map_err(|err| AppError::from(InfraError::Io(err)))?;
            info!(
                target = "foglio::render",
                document = %args.document.display(),
                output = %path.display(),
                "Rendered post page"
            );
        }
        None => {
            std::io::stdout()
                .write_all(page.as_bytes())
                .map_err(|err| AppError::from(InfraError::Io(err)))?;
        }
    }

    Ok(())
}
