use gamehub_core::GameId;
use yew::prelude::*;

use memory::MemoryView;
use rps::RpsView;
use snake::SnakeView;
use tictactoe::TicTacToeView;

mod memory;
mod rps;
mod snake;
mod tictactoe;

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameViewProps {
    pub id: GameId,
    #[prop_or_default]
    pub seed: Option<u64>,
}

/// Picks the component hosting the requested game.
#[function_component(GameView)]
pub(crate) fn game_view(props: &GameViewProps) -> Html {
    let seed = props.seed;
    log::trace!("rendering {}", props.id);

    match props.id {
        GameId::TicTacToe => html! { <TicTacToeView/> },
        GameId::RockPaperScissors => html! { <RpsView {seed}/> },
        GameId::Snake => html! { <SnakeView {seed}/> },
        GameId::Memory => html! { <MemoryView {seed}/> },
    }
}

/// Properties shared by the games that need randomness.
#[derive(Properties, Clone, PartialEq)]
pub(crate) struct SeedProps {
    #[prop_or_default]
    pub seed: Option<u64>,
}
