use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{
    load_settings, PageView, PresentationEvent, ReactionSession, StaticEditor, SubmissionError,
    SubmissionOutcome,
};
use shared::{
    domain::{MoleculeRole, ReactionDraft, Smiles},
    sic_format::parse_reaction,
};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info, warn};

/// Command-line front-end for the SiC reaction analysis service.
#[derive(Parser, Debug)]
#[command(name = "sigc")]
struct Args {
    /// Reactant molecule as a SMILES string. Repeatable.
    #[arg(short = 'r', long = "reactant")]
    reactants: Vec<String>,
    /// Product molecule as a SMILES string. Repeatable.
    #[arg(short = 'p', long = "product")]
    products: Vec<String>,
    /// Solvent molecule as a SMILES string. Repeatable.
    #[arg(short = 's', long = "solvent")]
    solvent: Vec<String>,
    /// SiC-format file (`{reactants}>>{solvent}>>{products}`). Ignored when
    /// both -r and -p are given.
    #[arg(short = 'i', long)]
    input_file: Option<PathBuf>,
    /// Write the analysis output to this file instead of stdout.
    #[arg(short = 'o', long)]
    output_file: Option<PathBuf>,
    /// Include debug output.
    #[arg(short = 'd', long)]
    debug: bool,
    /// Analysis server base URL; overrides sigc.toml and the environment.
    #[arg(long)]
    server_url: Option<String>,
    /// Print the JSON payload that would be submitted and exit.
    #[arg(long)]
    print_payload: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let filter = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let draft = resolve_draft(&args)?;

    let mut settings = load_settings();
    if let Some(server_url) = &args.server_url {
        settings.server_url = server_url.clone();
    }
    let session = ReactionSession::from_settings(&settings)?;
    let mut events = session.subscribe_events();

    let mut editor = StaticEditor::default();
    for role in MoleculeRole::ALL {
        for smiles in draft.molecules(role) {
            editor.draw(smiles.as_str());
            session.add_from_editor(&editor, role).await;
        }
    }

    if args.print_payload {
        println!("{}", serde_json::to_string_pretty(&session.payload().await)?);
        return Ok(());
    }

    info!(server_url = %settings.server_url, "submitting reaction");
    let (outcome, view) = submit_to_view(&session, &mut events).await;

    match outcome {
        Ok(SubmissionOutcome::Displayed(result)) => {
            info!(submission_id = %result.submission_id, "analysis complete");
            let text = render_text(&view);
            match &args.output_file {
                Some(path) => fs::write(path, text)
                    .with_context(|| format!("failed to write output to '{}'", path.display()))?,
                None => println!("{text}"),
            }
            Ok(())
        }
        Ok(SubmissionOutcome::Superseded { submission_id }) => {
            warn!(%submission_id, "submission superseded before the response arrived");
            Ok(())
        }
        Err(err) => Err(err).context("reaction analysis failed"),
    }
}

/// Flags win when both reactants and products are given; otherwise the input
/// file is required.
fn resolve_draft(args: &Args) -> Result<ReactionDraft> {
    let from_flags = ReactionDraft {
        reactants: args.reactants.iter().cloned().map(Smiles::from).collect(),
        products: args.products.iter().cloned().map(Smiles::from).collect(),
        solvent: args.solvent.iter().cloned().map(Smiles::from).collect(),
    };
    let flags_complete = !from_flags.reactants.is_empty() && !from_flags.products.is_empty();

    match &args.input_file {
        _ if flags_complete => Ok(from_flags),
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read SiC file '{}'", path.display()))?;
            parse_reaction(&raw)
                .with_context(|| format!("failed to parse SiC file '{}'", path.display()))
        }
        None => bail!(
            "reactants and products need to be provided, by input file (-i) or by arguments \
             (-r and -p), to find a mechanism"
        ),
    }
}

async fn submit_to_view(
    session: &ReactionSession,
    events: &mut broadcast::Receiver<PresentationEvent>,
) -> (Result<SubmissionOutcome, SubmissionError>, PageView) {
    let outcome = session.submit().await;
    let mut view = PageView::default();
    view.apply_all(&drain_events(events));
    (outcome, view)
}

/// Collects everything still queued. A lagging receiver loses the oldest
/// events but keeps draining, so the output events at the tail survive.
fn drain_events(rx: &mut broadcast::Receiver<PresentationEvent>) -> Vec<PresentationEvent> {
    let mut events = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => events.push(event),
            Err(TryRecvError::Lagged(skipped)) => {
                debug!(skipped, "presentation events dropped");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
    events
}

/// Terminal rendering of the output region: `<br>` back to newlines and
/// the basic entities unescaped.
fn render_text(view: &PageView) -> String {
    if !view.output_visible {
        return String::new();
    }
    view.output_content
        .replace("<br>", "\n")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
