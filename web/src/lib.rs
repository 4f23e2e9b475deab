use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    game: game::GameProps,
}

/// Options come from the URL hash, e.g. `#--seed=7&--target=15&-vv`.
fn parse_hash(hash: &str) -> Result<Args, clap::Error> {
    Args::try_parse_from(hash.split(['#', '&']))
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = parse_hash(&location_hash).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("options: {:?}", args.game);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, args.game).render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hash_uses_defaults() {
        let args = parse_hash("").unwrap();
        assert_eq!(args.game.seed, None);
        assert_eq!(
            args.game.game_config(),
            sunlit_core::GameConfig::default()
        );
    }

    #[test]
    fn hash_options_reach_the_game() {
        let args = parse_hash("#--seed=7&--target=15").unwrap();
        assert_eq!(args.game.seed, Some(7));
        assert_eq!(args.game.game_config().target_score, 15);
    }

    #[test]
    fn zero_target_from_the_hash_is_raised_to_one() {
        let args = parse_hash("#--target=0").unwrap();
        assert_eq!(args.game.game_config().target_score, 1);
    }

    #[test]
    fn unknown_options_are_rejected() {
        assert!(parse_hash("#--theme=dark").is_err());
    }
}
