mod output;
mod pages;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use formrun_api::{ClientConfig, FormrunClient, WorkflowTransport};
use formrun_handler::{Bindings, Document, PageMarkup, SharedDocument, bind_page, find_form, shared, single, workflow};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::output::{OutputFormat, PanelReport};

#[derive(Debug, Parser)]
#[command(name = "formrun", version, about = "Submit workflow forms and render the service's answer")]
struct Cli {
    /// Workflow service base URL; overrides FORMRUN_API_BASE.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Html, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Submit the test form (`POST /api/run-test`).
    RunTest {
        /// Value of the name field; blank sends "World".
        #[arg(long, default_value = "")]
        name: String,
    },
    /// Submit a workflow card (`POST /api/workflows/{id}/run`).
    Run {
        workflow_id: String,
        /// Form field as NAME=VALUE; repeatable.
        #[arg(long = "field", value_parser = parse_key_value)]
        fields: Vec<(String, String)>,
        /// Card title shown in the success heading.
        #[arg(long)]
        title: Option<String>,
    },
    /// Load page markup (YAML or JSON) and submit one of its forms.
    Page {
        file: PathBuf,
        /// Form element id or workflow id.
        form: String,
        /// Set an element's value before submitting, as ID=VALUE; repeatable.
        #[arg(long = "set", value_parser = parse_key_value)]
        values: Vec<(String, String)>,
    },
    /// Check the service's health endpoint.
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env().context("read client configuration")?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.clone()).context("apply --base-url")?;
    }
    let client = FormrunClient::new(config).context("build workflow service client")?;

    if let Command::Health = cli.command {
        let health = client.health().await.context("query health endpoint")?;
        println!("{}", health.status);
        if !health.is_healthy() {
            bail!("service reported status '{}'", health.status);
        }
        return Ok(());
    }

    let transport: Arc<dyn WorkflowTransport> = Arc::new(client);
    let (document, form_key) = page_for(&cli.command)?;
    let report = submit_and_report(document, &form_key, transport).await?;
    println!("{}", report.render(cli.format)?);
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// `RUST_LOG` directives, or `warn` when unset or unparseable.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Build the page a command submits and the key of the form to submit.
fn page_for(command: &Command) -> Result<(Document, String)> {
    match command {
        Command::RunTest { name } => Ok((pages::single_form_page(name), single::FORM_ID.to_string())),
        Command::Run {
            workflow_id,
            fields,
            title,
        } => Ok((
            pages::workflow_card_page(workflow_id, title.as_deref(), fields),
            workflow_id.clone(),
        )),
        Command::Page { file, form, values } => {
            let markup =
                PageMarkup::load(file).with_context(|| format!("load page markup from {}", file.display()))?;
            let mut document = markup.to_document();
            for (id, value) in values {
                if !document.set_value_by_id(id, value.as_str()) {
                    bail!("no element with id '{id}' in {}", file.display());
                }
            }
            Ok((document, form.clone()))
        }
        Command::Health => Err(anyhow!("health does not submit a form")),
    }
}

async fn submit_and_report(
    document: Document,
    form_key: &str,
    transport: Arc<dyn WorkflowTransport>,
) -> Result<PanelReport> {
    let document = shared(document);
    let bindings = bind_page(&document, transport);
    let form = find_form(&document, form_key).with_context(|| format!("no form '{form_key}' on page"))?;
    let result = result_container(&document, &bindings, form)
        .with_context(|| format!("form '{form_key}' is not bound; its page lacks required elements"))?;

    let dispatch = bindings.submit(form).await;
    debug!(listeners = dispatch.outcomes.len(), "submit dispatched");
    let state = bindings
        .handlers_for(form)
        .last()
        .map(|handler| handler.ui_state())
        .unwrap_or_default();

    Ok(PanelReport::capture(&document, result, state, dispatch.outcomes.last().cloned()))
}

/// The result panel the last listener on `form` renders into.
fn result_container(
    document: &SharedDocument,
    bindings: &Bindings,
    form: formrun_handler::NodeId,
) -> Option<formrun_handler::NodeId> {
    let handler = bindings.handlers_for(form).pop()?;
    let page = document.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let id = match handler.variant().workflow_id() {
        Some(workflow_id) => format!("{}{workflow_id}", workflow::RESULT_ID_PREFIX),
        None => single::RESULT_ID.to_string(),
    };
    page.get_element_by_id(&id)
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.trim().is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.trim().to_string(), value.to_string()))
}
