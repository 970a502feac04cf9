use gamehub_core::{Direction, Epoch, GRID_SIZE, GridCell, SnakeEvent, SnakeGame, StateMachine};
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Interval;
use gloo::utils::document;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};
use yew::prelude::*;

use super::SeedProps;
use crate::utils::seed_or_random;

const CELL_PX: f64 = 15.0;
const CANVAS_PX: u32 = 300;

const BACKGROUND_COLOR: &str = "#FFFFFF";
const GRID_COLOR: &str = "#E0E0E0";
const SNAKE_COLOR: &str = "#4CAF50";
const HEAD_COLOR: &str = "#2E7D32";
const FOOD_COLOR: &str = "#FF5722";

/// Maps a `KeyboardEvent::key` value to the event it triggers.
fn key_event(key: &str) -> Option<SnakeEvent> {
    use Direction::*;
    Some(match key {
        "ArrowUp" => SnakeEvent::Steer(Up),
        "ArrowDown" => SnakeEvent::Steer(Down),
        "ArrowLeft" => SnakeEvent::Steer(Left),
        "ArrowRight" => SnakeEvent::Steer(Right),
        " " => SnakeEvent::TogglePause,
        _ => return None,
    })
}

fn cell_color(cell: GridCell) -> Option<&'static str> {
    match cell {
        GridCell::Empty => None,
        GridCell::Snake => Some(SNAKE_COLOR),
        GridCell::Head => Some(HEAD_COLOR),
        GridCell::Food => Some(FOOD_COLOR),
    }
}

/// Period and epoch a running game wants to be ticked with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct TickSchedule {
    period: u32,
    epoch: Epoch,
}

impl TickSchedule {
    /// `None` while paused or after game over, so no interval is kept alive.
    fn of(game: &SnakeGame) -> Option<Self> {
        game.is_running().then(|| Self {
            period: game.speed_ms(),
            epoch: game.epoch(),
        })
    }
}

struct Ticker {
    schedule: TickSchedule,
    _interval: Interval,
}

pub(crate) struct SnakeView {
    game: SnakeGame,
    canvas: NodeRef,
    ticker: Option<Ticker>,
    _key_listener: EventListener,
}

impl SnakeView {
    /// Keeps exactly one interval alive while the game runs, at the current speed.
    fn sync_ticker(&mut self, ctx: &Context<Self>) {
        let wanted = TickSchedule::of(&self.game);
        if self.ticker.as_ref().map(|ticker| ticker.schedule) == wanted {
            return;
        }

        let Some(schedule) = wanted else {
            log::trace!("snake: ticker stopped");
            self.ticker = None;
            return;
        };

        log::trace!("snake: ticking every {}ms", schedule.period);
        let link = ctx.link().clone();
        let epoch = schedule.epoch;
        self.ticker = Some(Ticker {
            schedule,
            _interval: Interval::new(schedule.period, move || {
                link.send_message(SnakeEvent::Tick(epoch))
            }),
        });
    }

    fn draw(&self) -> Result<(), JsValue> {
        let Some(canvas) = self.canvas.cast::<HtmlCanvasElement>() else {
            return Ok(());
        };
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        let size = f64::from(CANVAS_PX);
        context.set_fill_style_str(BACKGROUND_COLOR);
        context.fill_rect(0.0, 0.0, size, size);

        context.set_stroke_style_str(GRID_COLOR);
        context.set_line_width(1.0);
        context.begin_path();
        for line in 0..=GRID_SIZE.0 {
            let offset = f64::from(line) * CELL_PX;
            context.move_to(offset, 0.0);
            context.line_to(offset, size);
            context.move_to(0.0, offset);
            context.line_to(size, offset);
        }
        context.stroke();

        for ((x, y), &cell) in self.game.grid().indexed_iter() {
            if let Some(color) = cell_color(cell) {
                context.set_fill_style_str(color);
                context.fill_rect(
                    x as f64 * CELL_PX + 1.0,
                    y as f64 * CELL_PX + 1.0,
                    CELL_PX - 2.0,
                    CELL_PX - 2.0,
                );
            }
        }

        Ok(())
    }

    fn overlay_view(&self, ctx: &Context<Self>) -> Html {
        if self.game.is_game_over() {
            let cb_reset = ctx.link().callback(|_| SnakeEvent::Reset);
            html! {
                <div class="overlay game-over">
                    <h2>{"Game Over!"}</h2>
                    <p>{format!("Final Score: {}", self.game.score())}</p>
                    <button onclick={cb_reset}>{"Play Again"}</button>
                </div>
            }
        } else if self.game.is_paused() {
            html! {
                <div class="overlay paused">
                    <h2>{"Paused"}</h2>
                </div>
            }
        } else {
            html! {}
        }
    }

    fn controls_view(&self, ctx: &Context<Self>) -> Html {
        let button = |label: &'static str, event: SnakeEvent| {
            let onclick = ctx.link().callback(move |_| event);
            html! { <button {onclick}>{label}</button> }
        };

        html! {
            <div class="controls">
                <div>{button("↑", SnakeEvent::Steer(Direction::Up))}</div>
                <div>
                    {button("←", SnakeEvent::Steer(Direction::Left))}
                    {button("⏯", SnakeEvent::TogglePause)}
                    {button("→", SnakeEvent::Steer(Direction::Right))}
                </div>
                <div>{button("↓", SnakeEvent::Steer(Direction::Down))}</div>
            </div>
        }
    }
}

impl Component for SnakeView {
    type Message = SnakeEvent;
    type Properties = SeedProps;

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        let key_listener = EventListener::new_with_options(
            &document(),
            "keydown",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if let Some(message) = key_event(&event.key()) {
                    event.prevent_default();
                    link.send_message(message);
                }
            },
        );

        let mut view = Self {
            game: SnakeGame::new(seed_or_random(ctx.props().seed)),
            canvas: NodeRef::default(),
            ticker: None,
            _key_listener: key_listener,
        };
        view.sync_ticker(ctx);
        view
    }

    fn update(&mut self, ctx: &Context<Self>, event: Self::Message) -> bool {
        let updated = self.game.apply(event).has_update();
        if updated {
            self.sync_ticker(ctx);
        }
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let size = CANVAS_PX.to_string();

        html! {
            <div class="snake-game">
                <div class="score">{format!("Score: {}", self.game.score())}</div>
                <div class="board">
                    <canvas ref={self.canvas.clone()} width={size.clone()} height={size}/>
                    {self.overlay_view(ctx)}
                </div>
                <p class="instructions">{"Use arrow keys to move, space to pause"}</p>
                {self.controls_view(ctx)}
            </div>
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if let Err(err) = self.draw() {
            log::error!("snake: failed to draw board: {:?}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_keys_steer_and_space_pauses() {
        assert_eq!(key_event("ArrowUp"), Some(SnakeEvent::Steer(Direction::Up)));
        assert_eq!(
            key_event("ArrowLeft"),
            Some(SnakeEvent::Steer(Direction::Left))
        );
        assert_eq!(key_event(" "), Some(SnakeEvent::TogglePause));
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(key_event("a"), None);
        assert_eq!(key_event("Enter"), None);
    }

    #[test]
    fn board_fits_the_canvas() {
        assert_eq!(f64::from(GRID_SIZE.0) * CELL_PX, f64::from(CANVAS_PX));
        assert_eq!(cell_color(GridCell::Empty), None);
        assert_eq!(cell_color(GridCell::Food), Some(FOOD_COLOR));
    }

    #[test]
    fn running_game_ticks_at_its_speed() {
        let game = SnakeGame::new(1);
        assert_eq!(
            TickSchedule::of(&game),
            Some(TickSchedule {
                period: 100,
                epoch: game.epoch(),
            })
        );
    }

    #[test]
    fn pause_and_game_over_stop_the_ticker() {
        let mut game = SnakeGame::new(1);
        game.apply(SnakeEvent::TogglePause);
        assert_eq!(TickSchedule::of(&game), None);
        game.apply(SnakeEvent::TogglePause);
        assert!(TickSchedule::of(&game).is_some());

        let mut game = SnakeGame::with_layout(1, (19, 0), &[], Direction::Right, (0, 5));
        game.apply(SnakeEvent::Tick(game.epoch()));
        assert!(game.is_game_over());
        assert_eq!(TickSchedule::of(&game), None);
    }

    #[test]
    fn eating_and_reset_replace_the_schedule() {
        let mut game = SnakeGame::with_layout(1, (10, 10), &[], Direction::Right, (11, 10));
        let before = TickSchedule::of(&game);
        game.apply(SnakeEvent::Tick(game.epoch()));
        let faster = TickSchedule::of(&game);
        assert_ne!(faster, before);
        assert_eq!(faster.map(|s| s.period), Some(98));

        game.apply(SnakeEvent::Reset);
        let after_reset = TickSchedule::of(&game);
        assert_eq!(after_reset.map(|s| s.period), Some(100));
        assert_ne!(after_reset, before);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use std::time::Duration;
    use wasm_bindgen_test::*;
    use web_sys::{Element, HtmlElement};
    use yew::platform::time::sleep;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount() -> Element {
        let root = document().create_element("div").unwrap();
        gloo::utils::body().append_child(&root).unwrap();
        yew::Renderer::<SnakeView>::with_root_and_props(
            root.clone(),
            SeedProps { seed: Some(5) },
        )
        .render();
        root
    }

    fn click(root: &Element, selector: &str) {
        root.query_selector(selector)
            .unwrap()
            .unwrap()
            .unchecked_into::<HtmlElement>()
            .click();
    }

    #[wasm_bindgen_test]
    async fn pause_button_shows_and_hides_the_overlay() {
        let root = mount();
        sleep(Duration::from_millis(10)).await;
        assert!(root.query_selector("canvas").unwrap().is_some());
        assert!(root.query_selector(".overlay.paused").unwrap().is_none());

        let pause = ".controls div:nth-child(2) button:nth-child(2)";
        click(&root, pause);
        sleep(Duration::from_millis(10)).await;
        assert!(root.query_selector(".overlay.paused").unwrap().is_some());

        click(&root, pause);
        sleep(Duration::from_millis(10)).await;
        assert!(root.query_selector(".overlay.paused").unwrap().is_none());
    }

    #[wasm_bindgen_test]
    async fn unattended_snake_crashes_and_stops_ticking() {
        let root = mount();
        // heading right from (10,10), the wall is ten ticks away
        sleep(Duration::from_millis(1500)).await;
        let text = root.text_content().unwrap_or_default();
        assert!(text.contains("Game Over!"), "{}", text);
        assert!(text.contains("Final Score: 0"), "{}", text);
    }
}
