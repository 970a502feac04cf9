use gamehub_core::{
    Card, MemoryEvent, MemoryGame, MemoryOutcome, MemoryState, ResolveTicket, RevealOutcome,
    StateMachine,
};
use gloo::timers::callback::Timeout;
use yew::prelude::*;

use super::SeedProps;
use crate::utils::seed_or_random;

#[derive(Properties, PartialEq)]
struct CardProps {
    card: Card,
    onclick: Callback<MouseEvent>,
}

#[function_component(CardView)]
fn card_view(props: &CardProps) -> Html {
    let card = &props.card;
    let class = classes!(
        "card",
        card.is_revealed().then_some("revealed"),
        card.is_matched().then_some("matched"),
    );

    html! {
        <div {class} onclick={props.onclick.clone()}>
            { if card.is_face_up() { card.symbol } else { "?" } }
        </div>
    }
}

/// What an engine outcome means for the pending resolve timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum TimerAction {
    Keep,
    Cancel,
    Schedule(ResolveTicket),
}

impl From<MemoryOutcome> for TimerAction {
    fn from(outcome: MemoryOutcome) -> Self {
        match outcome {
            MemoryOutcome::Started => Self::Cancel,
            MemoryOutcome::Reveal(RevealOutcome::Evaluating(ticket)) => Self::Schedule(ticket),
            MemoryOutcome::Reveal(_) => Self::Keep,
            MemoryOutcome::Resolve(resolve) if resolve.has_update() => Self::Cancel,
            MemoryOutcome::Resolve(_) => Self::Keep,
        }
    }
}

pub(crate) struct MemoryView {
    game: MemoryGame,
    /// Delayed resolution of the face-up pair, cancelled on drop.
    pending: Option<Timeout>,
}

impl MemoryView {
    fn schedule_resolve(&mut self, ctx: &Context<Self>, ticket: ResolveTicket) {
        let link = ctx.link().clone();
        self.pending = Some(Timeout::new(ticket.delay_ms(), move || {
            link.send_message(MemoryEvent::Resolve(ticket))
        }));
    }

    fn intro_view(&self, ctx: &Context<Self>) -> Html {
        let cb_start = ctx.link().callback(|_| MemoryEvent::Start);
        html! {
            <div class="intro">
                <p>{"Find all matching pairs of cards!"}</p>
                <button onclick={cb_start}>{"Start Game"}</button>
            </div>
        }
    }

    fn won_view(&self, ctx: &Context<Self>) -> Html {
        let cb_start = ctx.link().callback(|_| MemoryEvent::Start);
        html! {
            <div class="won">
                <h2>{"Congratulations!"}</h2>
                <p>{format!("You completed the game in {} moves", self.game.moves())}</p>
                <button onclick={cb_start}>{"Play Again"}</button>
            </div>
        }
    }

    fn board_view(&self, ctx: &Context<Self>) -> Html {
        let cb_restart = ctx.link().callback(|_| MemoryEvent::Start);
        html! {
            <>
                <div class="stats">
                    <span>{format!("Moves: {}", self.game.moves())}</span>
                    <button onclick={cb_restart}>{"Restart"}</button>
                </div>
                <div class="card-grid">
                    {
                        for self.game.cards().iter().map(|card| {
                            let id = card.id;
                            let onclick = ctx.link().callback(move |_| MemoryEvent::Reveal(id));
                            html! { <CardView key={id.0} card={*card} {onclick}/> }
                        })
                    }
                </div>
            </>
        }
    }
}

impl Component for MemoryView {
    type Message = MemoryEvent;
    type Properties = SeedProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            game: MemoryGame::new(seed_or_random(ctx.props().seed)),
            pending: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, event: Self::Message) -> bool {
        let outcome = match self.game.apply(event) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::error!("memory: {}", err);
                return false;
            }
        };

        match TimerAction::from(outcome) {
            TimerAction::Keep => {}
            TimerAction::Cancel => self.pending = None,
            TimerAction::Schedule(ticket) => self.schedule_resolve(ctx, ticket),
        }

        outcome.has_update()
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="memory-game">
                {
                    match self.game.state() {
                        MemoryState::NotStarted => self.intro_view(ctx),
                        MemoryState::Won => self.won_view(ctx),
                        _ => self.board_view(ctx),
                    }
                }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamehub_core::CardId;

    fn action(game: &mut MemoryGame, event: MemoryEvent) -> TimerAction {
        game.apply(event).unwrap().into()
    }

    #[test]
    fn second_pick_schedules_and_resolution_cancels() {
        let mut game = MemoryGame::new(3);
        assert_eq!(action(&mut game, MemoryEvent::Start), TimerAction::Cancel);
        assert_eq!(
            action(&mut game, MemoryEvent::Reveal(CardId(0))),
            TimerAction::Keep
        );

        let TimerAction::Schedule(ticket) = action(&mut game, MemoryEvent::Reveal(CardId(8)))
        else {
            panic!("second pick should schedule a resolution");
        };
        assert!(ticket.is_match());
        assert_eq!(
            action(&mut game, MemoryEvent::Resolve(ticket)),
            TimerAction::Cancel
        );
    }

    #[test]
    fn restart_cancels_and_stale_resolution_keeps() {
        let mut game = MemoryGame::new(4);
        game.apply(MemoryEvent::Start).unwrap();
        game.apply(MemoryEvent::Reveal(CardId(0))).unwrap();
        let TimerAction::Schedule(ticket) = action(&mut game, MemoryEvent::Reveal(CardId(1)))
        else {
            panic!("second pick should schedule a resolution");
        };

        assert_eq!(action(&mut game, MemoryEvent::Start), TimerAction::Cancel);
        assert_eq!(
            action(&mut game, MemoryEvent::Resolve(ticket)),
            TimerAction::Keep
        );
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use std::time::Duration;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::{Element, HtmlElement};
    use yew::platform::time::sleep;

    wasm_bindgen_test_configure!(run_in_browser);

    fn click(root: &Element, selector: &str) {
        root.query_selector(selector)
            .unwrap()
            .unwrap()
            .unchecked_into::<HtmlElement>()
            .click();
    }

    fn face_up(root: &Element) -> u32 {
        root.query_selector_all(".card.revealed").unwrap().length()
    }

    #[wasm_bindgen_test]
    async fn restart_deals_face_down_while_a_pair_is_pending() {
        let root = gloo::utils::document().create_element("div").unwrap();
        gloo::utils::body().append_child(&root).unwrap();
        yew::Renderer::<MemoryView>::with_root_and_props(
            root.clone(),
            SeedProps { seed: Some(2) },
        )
        .render();
        sleep(Duration::from_millis(10)).await;

        click(&root, ".intro button");
        sleep(Duration::from_millis(10)).await;
        assert_eq!(root.query_selector_all(".card").unwrap().length(), 16);

        click(&root, ".card:nth-child(1)");
        click(&root, ".card:nth-child(2)");
        sleep(Duration::from_millis(10)).await;
        assert_eq!(face_up(&root), 2);

        click(&root, ".stats button");
        sleep(Duration::from_millis(10)).await;
        assert_eq!(face_up(&root), 0);

        let text = root.text_content().unwrap_or_default();
        assert!(text.contains("Moves: 0"), "{}", text);

        // past the first pair's deadline, the new deal is still untouched
        sleep(Duration::from_millis(1100)).await;
        assert_eq!(face_up(&root), 0);
        assert_eq!(root.query_selector_all(".card.matched").unwrap().length(), 0);
    }
}
