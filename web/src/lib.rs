use clap::Parser;
use wasm_bindgen::prelude::*;

mod app;
mod games;
mod utils;

/// Knobs read from the location hash, e.g. `#snake&-vv&--seed=42`.
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub(crate) struct Args {
    /// Game to show, the home page when absent
    pub game: Option<String>,

    /// What log level to use
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

impl Args {
    pub(crate) fn from_hash(hash: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(hash.split(['#', '&']))
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window().location().hash().unwrap_or_default();
    let args = Args::from_hash(&location_hash).unwrap_or_default();
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("seed: {:?}", args.seed);

    let root = document()
        .get_element_by_id("hub")
        .expect("Could not find id=\"hub\" element");

    log::debug!("App started");
    yew::Renderer::<app::App>::with_root_and_props(root, app::AppProps { seed: args.seed })
        .render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_carries_game_verbosity_and_seed() {
        let args = Args::from_hash("#snake&-vv&--seed=42").unwrap();
        assert_eq!(args.game.as_deref(), Some("snake"));
        assert_eq!(args.seed, Some(42));
        assert!(args.verbose.log_level().is_some());
    }

    #[test]
    fn empty_hash_is_the_home_page() {
        assert_eq!(Args::from_hash("").unwrap().game, None);
        assert_eq!(Args::from_hash("#").unwrap().game.as_deref(), Some(""));
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(Args::from_hash("#memory&--seed=nope").is_err());
    }
}
