use gamehub_core::{StateMachine, TicTacToe, TicTacToeEvent, TicTacToeStatus};
use yew::prelude::*;

fn status_text(status: TicTacToeStatus) -> String {
    match status {
        TicTacToeStatus::Next(mark) => format!("Next player: {}", mark.symbol()),
        TicTacToeStatus::Winner(mark) => format!("Winner: {}", mark.symbol()),
        TicTacToeStatus::Draw => "Draw!".to_string(),
    }
}

#[derive(Debug)]
pub(crate) struct TicTacToeView {
    game: TicTacToe,
}

impl Component for TicTacToeView {
    type Message = TicTacToeEvent;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            game: TicTacToe::new(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, event: Self::Message) -> bool {
        log::trace!("tic-tac-toe event: {:?}", event);
        match self.game.apply(event) {
            Ok(outcome) => outcome.has_update(),
            Err(err) => {
                log::error!("tic-tac-toe: {}", err);
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let status = self.game.status();
        let cb_restart = ctx.link().callback(|_| TicTacToeEvent::Restart);

        html! {
            <div class="tic-tac-toe">
                <div class="status">{status_text(status)}</div>
                <div class={classes!("board", status.is_finished().then_some("finished"))}>
                    {
                        for self.game.board().iter().enumerate().map(|(index, cell)| {
                            let onclick =
                                ctx.link().callback(move |_| TicTacToeEvent::Place(index));
                            html! {
                                <button class="square" {onclick}>
                                    {cell.map(|mark| mark.symbol()).unwrap_or_default()}
                                </button>
                            }
                        })
                    }
                </div>
                <button class="restart" onclick={cb_restart}>{"Restart"}</button>
            </div>
        }
    }
}
