use clap::Parser;
use serde_json::Value;
use tracing::info;
use yajsf::adapters::{load_document, load_optional, HtmlSink};
use yajsf::cli::Cli;
use yajsf::config::Settings;
use yajsf::domain::{FieldErrors, FieldOptions, FormData};
use yajsf::form::FormAssembler;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration (CLI > env vars > config file)
    let settings = Settings::new_with_cli(&cli)?;

    tracing_subscriber::fmt()
        .with_max_level(settings.log_level())
        .with_writer(std::io::stderr)
        .init();

    let schema: Value = load_document(&cli.schema)?;
    let data: FormData = load_optional(cli.data.as_deref())?;
    let options: FieldOptions = load_optional(cli.options.as_deref())?;
    let errors: FieldErrors = load_optional(cli.errors.as_deref())?;

    let registry = settings.widget_registry();
    let mut sink = HtmlSink::new(settings.render.clone())?;
    let count = FormAssembler::new(&schema, &settings.form, &registry)
        .with_data(&data)
        .with_options(&options)
        .with_errors(&errors)
        .build(&mut sink)?;

    let html = sink.render()?;
    match &cli.output {
        Some(path) => {
            std::fs::write(path, html)?;
            info!("Wrote {} fields to {}", count, path.display());
        }
        None => println!("{}", html),
    }

    Ok(())
}
