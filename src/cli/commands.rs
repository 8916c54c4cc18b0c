use crate::{
    cli::args::{workspace_path, CheckArgs, OutputFormat, RunArgs},
    core::{
        catalog::Catalog,
        config::{ConfigLoader, MandateConfig, CONFIG_FILE_NAME},
        transformer::Transformer,
        worker::{DirectorySink, DirectorySource, RunSummary, Worker},
    },
    Result,
};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

pub fn check(args: CheckArgs) -> Result<()> {
    let workspace = workspace_path(args.path.as_deref());
    let config = load_config(&workspace, args.config.as_deref())?;
    let catalog = Catalog::from_config(&config)?;

    match args.format {
        OutputFormat::Text => print!("{}", render_catalog_text(&catalog)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&catalog_json(&catalog))?
        ),
    }
    Ok(())
}

pub fn run(args: RunArgs) -> Result<RunSummary> {
    let workspace = workspace_path(args.path.as_deref());
    let config = load_config(&workspace, args.config.as_deref())?;
    let catalog = Catalog::from_config(&config)?;

    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| anchor(&workspace, &config.worker.output_dir));
    let rejected_dir = args.rejected.clone().or_else(|| {
        config
            .worker
            .rejected_dir
            .as_deref()
            .map(|dir| anchor(&workspace, dir))
    });
    let continue_on_error = config.worker.continue_on_error && !args.fail_fast;

    tracing::info!(
        input = %args.input.display(),
        output = %output_dir.display(),
        continue_on_error,
        "starting run"
    );

    let mut source = DirectorySource::open(&args.input)?;
    let mut sink = DirectorySink::new(output_dir, rejected_dir);
    let summary = Worker::new(&catalog)
        .continue_on_error(continue_on_error)
        .run(&mut source, &mut sink)?;

    match args.format {
        OutputFormat::Text => print!("{}", render_summary_text(&summary)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(summary)
}

fn load_config(workspace: &Path, explicit: Option<&Path>) -> Result<MandateConfig> {
    let path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| workspace.join(CONFIG_FILE_NAME));
    if !path.exists() {
        tracing::warn!(path = %path.display(), "no configuration file found, using defaults");
    }
    Ok(ConfigLoader::load(&path)?)
}

fn anchor(workspace: &Path, dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        workspace.join(dir)
    }
}

fn discriminator(transformer: &Transformer) -> Option<&str> {
    transformer.definition().validator().discriminator_field()
}

fn render_catalog_text(catalog: &Catalog) -> String {
    let router = catalog.router();
    if router.is_empty() {
        return "No transformers configured\n".to_string();
    }

    let mut out = format!(
        "{} transformer(s), routed on '{}'\n",
        router.len(),
        router.tag_field()
    );
    for transformer in router.transformers() {
        out.push_str(&format!("\n{}\n", transformer.name()));
        out.push_str(&format!("  tag:        {}\n", transformer.tag()));
        if let Some(field) = discriminator(transformer) {
            out.push_str(&format!("  field:      {}\n", field));
        }
        let operations: Vec<&str> = transformer.operation_names().collect();
        let required: Vec<&str> = transformer
            .required_operations()
            .iter()
            .map(String::as_str)
            .collect();
        let pipeline: Vec<String> = catalog
            .pipeline(transformer.name())
            .iter()
            .map(|step| step.identity().to_string())
            .collect();
        out.push_str(&format!("  operations: {}\n", join_or_dash(&operations)));
        out.push_str(&format!("  required:   {}\n", join_or_dash(&required)));
        out.push_str(&format!("  pipeline:   {}\n", join_or_dash(&pipeline)));
    }
    out
}

fn join_or_dash<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items
            .iter()
            .map(|item| item.as_ref())
            .collect::<Vec<&str>>()
            .join(", ")
    }
}

fn catalog_json(catalog: &Catalog) -> Value {
    let transformers: Vec<Value> = catalog
        .router()
        .transformers()
        .map(|transformer| {
            json!({
                "name": transformer.name(),
                "tag": transformer.tag(),
                "field": discriminator(transformer),
                "operations": transformer.operation_names().collect::<Vec<_>>(),
                "required": transformer.required_operations(),
                "pipeline": catalog.pipeline(transformer.name()),
            })
        })
        .collect();
    json!({
        "tag_field": catalog.router().tag_field(),
        "transformers": transformers,
    })
}

fn render_summary_text(summary: &RunSummary) -> String {
    let mut out = format!(
        "processed: {}\ndelivered: {}\nrejected:  {}\n",
        summary.processed,
        summary.delivered,
        summary.rejected.len()
    );
    for rejection in &summary.rejected {
        out.push_str(&format!(
            "  {} [{}] {}\n",
            rejection.id, rejection.code, rejection.message
        ));
    }
    if summary.halted {
        out.push_str("stopped at the first rejection\n");
    }
    out
}
