use std::sync::Arc;

use shared::{
    domain::ReactionDraft,
    error::{ApiError, ErrorCode},
    protocol::SubmissionPayload,
};
use tracing::{info, warn};

use crate::mechanism::MechanismEngine;

#[derive(Clone)]
pub struct ApiContext {
    pub engine: Arc<dyn MechanismEngine>,
}

pub const NO_REACTANTS: &str = "No reactants added.";
pub const NO_PRODUCTS: &str = "No products added.";
pub const SEARCH_FAILED: &str = "Mechanism search failed:";

/// Runs the mechanism engine for `payload` and renders the write-up as an
/// HTML fragment. Missing sides and engine failures are answered in the
/// write-up itself; only a crashed search is an error.
pub async fn find_mechanism(
    ctx: &ApiContext,
    payload: SubmissionPayload,
) -> Result<String, ApiError> {
    if payload.reactants.is_empty() {
        return Ok(render_html(NO_REACTANTS));
    }
    if payload.products.is_empty() {
        return Ok(render_html(NO_PRODUCTS));
    }

    let reaction = ReactionDraft {
        solvent: payload.solvent.molecules().to_vec(),
        reactants: payload.reactants,
        products: payload.products,
    };
    info!(
        reactants = reaction.reactants.len(),
        products = reaction.products.len(),
        solvent = reaction.solvent.len(),
        "searching for mechanism"
    );

    let engine = Arc::clone(&ctx.engine);
    let write_up = tokio::task::spawn_blocking(move || engine.find_mechanism(&reaction))
        .await
        .map_err(|err| {
            ApiError::new(
                ErrorCode::Internal,
                format!("mechanism search panicked: {err}"),
            )
        })?
        .unwrap_or_else(|err| {
            warn!("mechanism search failed: {err:#}");
            format!("{SEARCH_FAILED}\n{err:#}")
        });

    Ok(render_html(&write_up))
}

/// Escapes markup and turns line breaks into `<br>`.
pub fn render_html(text: &str) -> String {
    let mut html = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => html.push_str("&amp;"),
            '<' => html.push_str("&lt;"),
            '>' => html.push_str("&gt;"),
            '\n' => html.push_str("<br>"),
            other => html.push(other),
        }
    }
    html
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
