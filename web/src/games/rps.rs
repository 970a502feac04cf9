use gamehub_core::{Choice, RockPaperScissors, Round, RpsEvent, StateMachine};
use yew::prelude::*;

use super::SeedProps;
use crate::utils::seed_or_random;

fn choice_label(choice: Choice) -> &'static str {
    match choice {
        Choice::Rock => "✊ Rock",
        Choice::Paper => "✋ Paper",
        Choice::Scissors => "✌️ Scissors",
    }
}

fn round_view(round: &Round) -> Html {
    html! {
        <div class="result">
            <p>{"You chose: "}{choice_label(round.player)}</p>
            <p>{"Computer chose: "}{choice_label(round.computer)}</p>
            <h2>{round.outcome.message()}</h2>
        </div>
    }
}

#[derive(Debug)]
pub(crate) struct RpsView {
    game: RockPaperScissors,
}

impl Component for RpsView {
    type Message = RpsEvent;
    type Properties = SeedProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            game: RockPaperScissors::new(seed_or_random(ctx.props().seed)),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, event: Self::Message) -> bool {
        // Clearing an empty result changes nothing on screen.
        self.game.apply(event).is_some()
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let round = self.game.last_round();
        let cb_clear = ctx.link().callback(|_| RpsEvent::Clear);

        html! {
            <div class="rock-paper-scissors">
                <div class="choices">
                    {
                        for Choice::ALL.into_iter().map(|choice| {
                            let onclick = ctx.link().callback(move |_| RpsEvent::Play(choice));
                            html! {
                                <button class="choice" title={choice.name()} {onclick}>
                                    {choice_label(choice)}
                                </button>
                            }
                        })
                    }
                </div>
                {
                    match round {
                        Some(round) => html! {
                            <>
                                {round_view(&round)}
                                <button class="clear" onclick={cb_clear}>{"Clear"}</button>
                            </>
                        },
                        None => html! { <p class="hint">{"Make your choice!"}</p> },
                    }
                }
            </div>
        }
    }
}
