//! `leadrelay` CLI: terminal front end for the contact form.
//!
//! Runs the same form state machine the website uses: validates fields,
//! submits through the relay endpoint (or, with `--direct`, straight to the
//! public forms relay with an embedded access key), and prints the field
//! errors, the confirmation, or the generic failure message.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use leadrelay_core::form::{FormFields, FormPage, LeadForm, SubmitOutcome};
use leadrelay_core::payload::{ProviderPayload, DEFAULT_SITE_NAME};
use leadrelay_core::provider::{http_client, web3forms, Web3FormsProvider};
use leadrelay_core::relay_client::RelayClient;
use leadrelay_core::{Credential, LeadProvider, LeadSubmission, ProjectType, PropertyType};

// ── ANSI color helpers ───────────────────────────────────────────────

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

// ── CLI structure ────────────────────────────────────────────────────

/// Submit property evaluation requests from the terminal.
#[derive(Parser)]
#[command(
    name = "leadrelay",
    version,
    about = "leadrelay CLI: submit, preview, and inspect contact form leads",
    long_about = None,
    after_help = format!(
        "{DIM}Environment variables:{RESET}\n  \
         LEADRELAY_RELAY_URL          Relay origin (default: http://127.0.0.1:3000)\n  \
         LEADRELAY_PUBLIC_ACCESS_KEY  Public forms-relay key for --direct\n\n\
         {DIM}Examples:{RESET}\n  \
         leadrelay submit --name 'John Smith' --email john@example.com --phone 7135550123\n  \
         leadrelay preview --name 'John Smith' --email john@example.com --phone 7135550123\n  \
         leadrelay options"
    ),
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and submit a lead.
    Submit {
        #[command(flatten)]
        form: FormArgs,
        /// Which form's confirmation copy to show: contact or evaluation.
        #[arg(long, default_value = "contact")]
        page: String,
        /// Relay origin to submit to.
        #[arg(long, env = "LEADRELAY_RELAY_URL", default_value = "http://127.0.0.1:3000")]
        relay: String,
        /// Skip the relay and post to the forms provider with a public key.
        #[arg(long)]
        direct: bool,
        /// Public access key for --direct (embedded, not secret).
        #[arg(long, env = "LEADRELAY_PUBLIC_ACCESS_KEY", hide_env_values = true)]
        public_key: Option<String>,
        /// Forms provider base URL for --direct.
        #[arg(long, default_value = web3forms::DEFAULT_BASE_URL)]
        provider_url: String,
        /// Sender label for --direct.
        #[arg(long, default_value = DEFAULT_SITE_NAME)]
        site_name: String,
    },
    /// Show what the relay would forward for a lead, without sending it.
    Preview {
        #[command(flatten)]
        form: FormArgs,
        /// Sender label.
        #[arg(long, default_value = DEFAULT_SITE_NAME)]
        site_name: String,
    },
    /// List the project and property type options.
    Options,
}

/// The contact form fields.
#[derive(Args)]
struct FormArgs {
    /// Full name (required).
    #[arg(long, default_value = "")]
    name: String,
    /// Email address (required).
    #[arg(long, default_value = "")]
    email: String,
    /// Phone number (required).
    #[arg(long, default_value = "")]
    phone: String,
    /// Property address.
    #[arg(long, default_value = "")]
    address: String,
    /// Project type slug (see `leadrelay options`) or free text.
    #[arg(long, default_value = "")]
    project_type: String,
    /// Property type slug (see `leadrelay options`) or free text.
    #[arg(long, default_value = "")]
    property_type: String,
    /// Description of the property.
    #[arg(long, default_value = "")]
    property_description: String,
    /// Anything else.
    #[arg(long, default_value = "")]
    message: String,
}

impl From<FormArgs> for FormFields {
    fn from(args: FormArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            phone: args.phone,
            address: args.address,
            project_type: args.project_type,
            property_type: args.property_type,
            property_description: args.property_description,
            message: args.message,
        }
    }
}

// ── Command dispatch ─────────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("  {RED}{BOLD}✗ Error:{RESET} {e:#}");
            eprintln!();
            ExitCode::FAILURE
        }
    }
}

async fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Submit {
            form,
            page,
            relay,
            direct,
            public_key,
            provider_url,
            site_name,
        } => {
            let page = FormPage::from_name(&page)
                .with_context(|| format!("unknown page '{page}' (expected contact or evaluation)"))?;
            let client = http_client(None).context("failed to build HTTP client")?;

            let provider: Box<dyn LeadProvider> = if direct {
                let Some(key) = public_key else {
                    bail!("--direct needs --public-key or LEADRELAY_PUBLIC_ACCESS_KEY");
                };
                let provider =
                    Web3FormsProvider::new(client, Credential::PublicEmbedded(key), site_name)
                        .with_base_url(&provider_url);
                if provider.credential().is_public() {
                    warning("submitting directly with a public access key (client-embedded credential)");
                }
                Box::new(provider)
            } else {
                Box::new(RelayClient::new(client, &relay))
            };

            cmd_submit(page, form.into(), provider.as_ref()).await
        }
        Commands::Preview { form, site_name } => cmd_preview(form.into(), &site_name),
        Commands::Options => {
            cmd_options();
            Ok(())
        }
    }
}

// ── Commands ─────────────────────────────────────────────────────────

async fn cmd_submit(page: FormPage, fields: FormFields, provider: &dyn LeadProvider) -> Result<()> {
    let mut form = LeadForm::with_fields(page, fields);
    tracing::debug!(provider = provider.name(), ?page, "submitting lead");

    println!();
    println!("  {CYAN}{BOLD}▸ {}{RESET} {DIM}via {}{RESET}", form.button_label(), provider.name());

    match form.submit(provider).await {
        SubmitOutcome::Submitted(confirmation) => {
            println!();
            success(confirmation.heading);
            println!("    {}", confirmation.body);
            println!();
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => {
            println!();
            for (field, message) in errors.iter() {
                println!("  {RED}✗{RESET} {BOLD}{field}{RESET}: {message}");
            }
            println!();
            bail!("submission not sent: fix the fields above")
        }
        SubmitOutcome::Failed(message) => {
            println!();
            println!("  {RED}{BOLD}✗{RESET} {message}");
            println!();
            bail!("submission failed")
        }
        SubmitOutcome::AlreadySubmitted => bail!("form was already submitted"),
    }
}

fn cmd_preview(fields: FormFields, site_name: &str) -> Result<()> {
    let mut form = LeadForm::with_fields(FormPage::Contact, fields);
    let lead = match form.validate() {
        Ok(lead) => lead,
        Err(errors) => {
            println!();
            for (field, message) in errors.iter() {
                println!("  {RED}✗{RESET} {BOLD}{field}{RESET}: {message}");
            }
            println!();
            bail!("the relay would reject this submission");
        }
    };

    let payload = ProviderPayload::from_lead(&lead, site_name);

    println!();
    header("Subject", &payload.subject);
    kv_line("From", &payload.from_name);
    if let Some(label) = option_label(&lead) {
        kv_line("Option", label);
    }
    println!();
    println!("{}", indent(&payload.text_body()));
    println!();
    Ok(())
}

/// Label of the selected project or property type, when it is a known slug.
fn option_label(lead: &LeadSubmission) -> Option<&'static str> {
    lead.project_type
        .as_deref()
        .and_then(ProjectType::from_slug)
        .map(ProjectType::label)
        .or_else(|| {
            lead.property_type
                .as_deref()
                .and_then(PropertyType::from_slug)
                .map(PropertyType::label)
        })
}

fn cmd_options() {
    println!();
    println!("  {BOLD}Project types{RESET}");
    for t in ProjectType::ALL {
        kv_line(t.slug(), t.label());
    }
    println!();
    println!("  {BOLD}Property types{RESET}");
    for t in PropertyType::ALL {
        kv_line(t.slug(), t.label());
    }
    println!();
}

// ── Output helpers ───────────────────────────────────────────────────

fn header(title: &str, value: &str) {
    println!("  {CYAN}{BOLD}{title}:{RESET} {value}");
}

fn kv_line(key: &str, value: &str) {
    println!("    {DIM}{key:<16}{RESET} {value}");
}

fn success(msg: &str) {
    println!("  {GREEN}{BOLD}✓{RESET} {BOLD}{msg}{RESET}");
}

fn warning(msg: &str) {
    eprintln!("  {YELLOW}{BOLD}!{RESET} {msg}");
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("    {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
