use crate::utils::*;
use clap::Args;
use gloo::timers::callback::Timeout;
use sunlit_core as game;
use yew::prelude::*;

const CARD_BACK: &str = "🌿";

fn message_class(kind: game::MessageKind) -> &'static str {
    use game::MessageKind::*;
    match kind {
        Neutral => "neutral",
        Success => "success",
        Disruption => "disruption",
    }
}

/// What is drawn on the visible side of a card.
fn card_face(tile: &game::Tile) -> &'static str {
    if tile.is_removed() {
        ""
    } else if tile.is_revealed() {
        tile.category().emoji()
    } else {
        CARD_BACK
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Select(game::TileIndex),
    Advance(game::Deferred),
    NewGame,
    Acknowledge,
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    index: game::TileIndex,
    tile: game::Tile,
    callback: Callback<game::TileIndex>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        index,
        tile,
        callback,
    } = props.clone();

    let class = classes!(
        "card",
        tile.is_revealed().then_some("revealed"),
        tile.is_removed().then_some("removed")
    );
    let title = tile.is_revealed().then(|| tile.category().name());
    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", index);
        callback.emit(index);
    });

    html! {
        <div {class} {onclick} {title}>{card_face(&tile)}</div>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct StatsProps {
    score: game::Score,
    target: game::Score,
    flipped: usize,
    turn: u32,
}

#[function_component(StatsView)]
fn stats_component(props: &StatsProps) -> Html {
    let stat = |label: &'static str, value: String| {
        html! {
            <div class="stat">
                <small>{label}</small>
                <strong>{value}</strong>
            </div>
        }
    };

    html! {
        <nav class="stats">
            {stat("Score", props.score.to_string())}
            {stat("Goal", props.target.to_string())}
            {stat("Cards Flipped", props.flipped.to_string())}
            {stat("Turn", props.turn.to_string())}
        </nav>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct InstructionsProps {
    target: game::Score,
}

#[function_component(InstructionsView)]
fn instructions_component(props: &InstructionsProps) -> Html {
    html! {
        <article class="instructions">
            <h2>{"🎯 How to Play:"}</h2>
            <ul>
                <li><strong>{"Click up to three cards"}</strong>{" each turn to reveal them."}</li>
                <li><strong>{"☀️ Sun + 💨 CO2 + 💧 Water"}</strong>{" = 5 points (Photosynthesis Combo) - Cards are removed!"}</li>
                <li><strong>{"Any pair"}</strong>{" (Sun+CO2, Sun+Water, CO2+Water) in a turn of 3 cards = 2 points."}</li>
                <li><strong>{"🦗 Grasshoppers"}</strong>{" end your turn immediately and shuffle with an adjacent card."}</li>
                <li><strong>{"Goal:"}</strong>{format!(" Reach {} points to win!", props.target)}</li>
            </ul>
        </article>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct EndOfGameProps {
    message: game::Message,
    on_close: Callback<MouseEvent>,
}

#[function_component(EndOfGameView)]
fn end_of_game_component(props: &EndOfGameProps) -> Html {
    html! {
        <Modal>
            <dialog id="end-of-game" open={true}>
                <article>
                    <header>
                        <span>{"💨☀️💧"}</span>
                        <h2>{"What is Photosynthesis?"}</h2>
                    </header>
                    <p class={classes!("message", message_class(props.message.kind))}>
                        {props.message.text.clone()}
                    </p>
                    <p>
                        {"Photosynthesis is how plants make their own food. They use sunlight, water, \
                          and carbon dioxide from the air. With the help of their green leaves, they turn \
                          these into sugary food for energy and release oxygen, which we need to breathe. \
                          It's like plants cooking their own meal using sunlight as their stove!"}
                    </p>
                    <footer>
                        <button onclick={props.on_close.clone()}>{"Got it!"}</button>
                    </footer>
                </article>
            </dialog>
        </Modal>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    #[prop_or_default]
    pub(crate) seed: Option<u64>,

    /// Score needed to win
    #[arg(short, long)]
    #[prop_or_default]
    pub(crate) target: Option<game::Score>,
}

impl GameProps {
    pub(crate) fn game_config(&self) -> game::GameConfig {
        self.target
            .map_or_else(game::GameConfig::default, game::GameConfig::new)
    }
}

#[derive(Debug)]
pub(crate) struct GameView {
    engine: game::TurnEngine,
}

impl GameView {
    /// Feeds `deferred` back once its delay has passed. Steps outliving their session are
    /// dropped by the engine, so the timer is never cancelled.
    fn schedule(ctx: &Context<Self>, deferred: game::Deferred) {
        let link = ctx.link().clone();
        let _ = Timeout::new(deferred.delay_ms, move || {
            link.send_message(Msg::Advance(deferred))
        })
        .forget();
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);

        Self {
            engine: game::TurnEngine::new(props.game_config(), seed),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Select(index) => match self.engine.select(index) {
                Ok(game::SelectOutcome::TurnComplete(deferred)) => {
                    log::debug!("turn complete, evaluating in {}ms", deferred.delay_ms);
                    Self::schedule(ctx, deferred);
                    true
                }
                Ok(outcome) => outcome.has_update(),
                Err(err) => {
                    log::error!("select {}: {}", index, err);
                    false
                }
            },
            Advance(deferred) => {
                let outcome = self.engine.advance(deferred);
                log::debug!("{:?} step: {:?}", deferred.step, outcome);
                if let game::AdvanceOutcome::Announced(next) = outcome {
                    Self::schedule(ctx, next);
                }
                outcome.has_update()
            }
            NewGame => {
                self.engine.new_game();
                true
            }
            Acknowledge => {
                self.engine.acknowledge();
                self.engine.new_game();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let snapshot = self.engine.snapshot();
        let select = ctx.link().callback(Select);
        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            NewGame
        });
        let cb_acknowledge = ctx.link().callback(|_: MouseEvent| Acknowledge);

        html! {
            <div class="sunlit">
                <header>
                    <h1>{"🌱 Photosynthesis: Sunlit Fields"}</h1>
                    <p>{"Nurture your meadow by gathering sunlight, plants, and water!"}</p>
                </header>
                <StatsView
                    score={snapshot.score}
                    target={snapshot.target_score}
                    flipped={snapshot.revealed_count}
                    turn={snapshot.turn}
                />
                <div class={classes!("message", message_class(snapshot.message.kind))}>
                    {snapshot.message.text.clone()}
                </div>
                <div class="board">
                    {
                        for snapshot.tiles.iter().enumerate().map(|(index, &tile)| html! {
                            <CardView key={tile.id().to_string()} {index} {tile} callback={select.clone()}/>
                        })
                    }
                </div>
                <button class="new-game" onclick={cb_new_game}>{"New Game"}</button>
                <InstructionsView target={snapshot.target_score}/>
                {
                    for snapshot.acknowledgment.map(|message| html! {
                        <EndOfGameView {message} on_close={cb_acknowledge.clone()}/>
                    })
                }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sunlit_core::Category;

    fn board() -> game::Board {
        let layout = [
            Category::Sun,
            Category::Co2,
            Category::Water,
            Category::Grasshopper,
        ]
        .repeat(4);
        game::Board::from_categories(&layout).unwrap()
    }

    #[test]
    fn message_kinds_map_to_banner_classes() {
        assert_eq!(message_class(game::MessageKind::Neutral), "neutral");
        assert_eq!(message_class(game::MessageKind::Success), "success");
        assert_eq!(message_class(game::MessageKind::Disruption), "disruption");
    }

    #[test]
    fn face_down_cards_show_the_back() {
        let tile = board()[0];
        assert_eq!(card_face(&tile), CARD_BACK);
    }

    #[test]
    fn revealed_cards_show_their_category() {
        let mut engine = game::TurnEngine::new(game::GameConfig::default(), 1);
        engine.select(0).unwrap();
        let tile = engine.board()[0];
        assert_eq!(card_face(&tile), tile.category().emoji());
    }

    #[test]
    fn removed_cards_are_blank() {
        let board = board().with_removed(&[1]).unwrap();
        assert_eq!(card_face(&board[1]), "");
    }

    #[test]
    fn target_option_overrides_the_default_goal() {
        let props = GameProps {
            seed: Some(1),
            target: Some(15),
        };
        assert_eq!(props.game_config().target_score, 15);

        let props = GameProps {
            seed: None,
            target: None,
        };
        assert_eq!(
            props.game_config().target_score,
            game::GameConfig::DEFAULT_TARGET_SCORE
        );
    }
}
