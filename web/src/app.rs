use gamehub_core::GameId;
use gloo::events::EventListener;
use gloo::utils::window;
use yew::prelude::*;

use crate::Args;
use crate::games::GameView;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Route {
    Home,
    Game(GameId),
    NotFound(String),
}

impl Route {
    pub(crate) fn from_hash(hash: &str) -> Self {
        match Args::from_hash(hash) {
            Ok(args) => Self::from_slug(args.game.as_deref()),
            Err(err) => {
                log::warn!("could not parse location hash {:?}: {}", hash, err);
                Self::NotFound(hash.trim_start_matches('#').to_string())
            }
        }
    }

    fn from_slug(slug: Option<&str>) -> Self {
        match slug {
            None | Some("") => Self::Home,
            Some(slug) => match slug.parse() {
                Ok(id) => Self::Game(id),
                Err(err) => {
                    log::debug!("{}", err);
                    Self::NotFound(slug.to_string())
                }
            },
        }
    }

    fn current() -> Self {
        Self::from_hash(&window().location().hash().unwrap_or_default())
    }
}

fn game_href(id: GameId) -> String {
    format!("#{}", id.slug())
}

#[derive(Properties, PartialEq)]
struct GameCardProps {
    id: GameId,
}

#[function_component(GameCard)]
fn game_card(props: &GameCardProps) -> Html {
    let id = props.id;
    html! {
        <a class="game-card" href={game_href(id)}>
            <h2>{id.title()}</h2>
            <p>{"Click to play"}</p>
        </a>
    }
}

#[function_component(HomePage)]
fn home_page() -> Html {
    html! {
        <div class="home">
            <h1>{"Mini Game Hub"}</h1>
            <div class="game-list">
                { for GameId::ALL.into_iter().map(|id| html! { <GameCard key={id.slug()} {id}/> }) }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct GameLayoutProps {
    #[prop_or_default]
    children: Html,
}

#[function_component(GameLayout)]
fn game_layout(props: &GameLayoutProps) -> Html {
    html! {
        <div class="layout">
            <a class="back" href="#">{"← Back to Games"}</a>
            {props.children.clone()}
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct AppProps {
    /// Forced seed for every game opened in this session
    #[prop_or_default]
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Navigate(Route),
}

pub(crate) struct App {
    route: Route,
    _hash_listener: EventListener,
}

impl Component for App {
    type Message = Msg;
    type Properties = AppProps;

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        let hash_listener = EventListener::new(&window(), "hashchange", move |_| {
            link.send_message(Msg::Navigate(Route::current()))
        });

        Self {
            route: Route::current(),
            _hash_listener: hash_listener,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        let Msg::Navigate(route) = msg;
        if self.route == route {
            return false;
        }
        log::debug!("navigate: {:?}", route);
        self.route = route;
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let seed = ctx.props().seed;

        match &self.route {
            Route::Home => html! { <HomePage/> },
            Route::Game(id) => html! {
                <GameLayout>
                    <section class="game">
                        <GameView key={id.slug()} id={*id} {seed}/>
                    </section>
                </GameLayout>
            },
            Route::NotFound(_) => html! {
                <GameLayout>
                    <div class="not-found">{"Game not found"}</div>
                </GameLayout>
            },
        }
    }
}
