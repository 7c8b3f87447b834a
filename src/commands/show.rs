use owo_colors::OwoColorize;

use super::{open_session, print_json};
use crate::api::{CatalogSource, LookupKey};
use crate::app::{Command, Session};
use crate::config::Config;
use crate::detail::PokemonDetail;
use crate::display::format_detail;
use crate::error::{PokedexError, Result};

/// Open the detail view for `key` and return what it shows
pub async fn run_show<S: CatalogSource>(
    session: &mut Session<S>,
    key: LookupKey,
) -> Result<PokemonDetail> {
    session.dispatch(Command::OpenDetail(key)).await;

    let state = session.state();
    if let Some(view) = state.detail.as_ref().filter(|d| d.is_open()) {
        if let Some(error) = &view.error {
            eprintln!("{} partial detail: {}", "warning:".yellow(), error);
        }
        return Ok(view.working().clone());
    }

    match (&state.not_found, &state.last_error) {
        (Some(target), _) => Err(PokedexError::NotFound(target.clone())),
        (None, Some(error)) => Err(PokedexError::Api(error.clone())),
        (None, None) => Err(PokedexError::Other("detail view did not open".to_string())),
    }
}

/// Show one creature in detail
pub async fn cmd_show(target: &str, json: bool) -> Result<()> {
    let key = LookupKey::parse(target)?;
    let config = Config::load()?;
    let mut session = open_session(&config)?;

    let detail = run_show(&mut session, key).await?;
    if json {
        return print_json(&detail);
    }
    print!("{}", format_detail(&detail));
    Ok(())
}
