pub mod config;
pub mod data;
pub mod deck;
pub mod gesture;
pub mod keyboard;
pub mod motion;
pub mod profile;

use config::{load_config, DeckConfig};
use data::generate_profiles;
use deck::{DeckController, DismissAction, DismissTicket, ReleaseOutcome};
use gesture::{PointerKind, PointerSample};
use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use keyboard::{is_text_entry, KeyCommand};
use log::{debug, info};
use motion::{drag_transform, exit_transform, swipe_hint, CardMotion, Viewport};
use profile::Profile;
use std::rc::Rc;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsCast;
use web_sys::window;
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct DeckState {
    deck: DeckController,
    front: CardMotion,
    config: DeckConfig,
}

enum DeckMsg {
    Dismiss {
        action: DismissAction,
        viewport: Viewport,
    },
    Complete(DismissTicket),
    CyclePhoto,
    Reset,
    PointerDown(PointerSample),
    PointerMove {
        pointer_id: i32,
        x: f64,
        y: f64,
    },
    PointerUp {
        pointer_id: i32,
        timestamp: f64,
        viewport: Viewport,
    },
    PointerCancel {
        pointer_id: i32,
    },
}

impl DeckState {
    fn new(config: DeckConfig) -> Self {
        let profiles = fresh_batch(&config);
        Self {
            deck: DeckController::new(profiles, config.thresholds),
            front: CardMotion::Rest,
            config,
        }
    }

    /// Returns whether anything visible changed.
    fn apply(&mut self, msg: DeckMsg) -> bool {
        match msg {
            DeckMsg::Dismiss { action, viewport } => self.start_dismissal(action, viewport),
            DeckMsg::Complete(ticket) => match self.deck.complete(ticket) {
                Some(profile) => {
                    debug!("Removed {} ({} left)", profile.id, self.deck.len());
                    self.front = CardMotion::Rest;
                    true
                }
                None => {
                    debug!("Discarding stale completion {:?}", ticket);
                    false
                }
            },
            DeckMsg::CyclePhoto => match self.deck.cycle_photo() {
                Ok(_) => true,
                Err(err) => {
                    debug!("Photo cycle ignored: {}", err);
                    false
                }
            },
            DeckMsg::Reset => {
                self.deck.reset(fresh_batch(&self.config));
                self.front = CardMotion::Rest;
                info!("Reshuffled deck with {} profiles", self.deck.len());
                true
            }
            DeckMsg::PointerDown(sample) => {
                if self.deck.pointer_down(sample) {
                    self.front = CardMotion::Dragging(drag_transform(0.0, 0.0));
                    true
                } else {
                    false
                }
            }
            DeckMsg::PointerMove { pointer_id, x, y } => {
                match self.deck.pointer_move(pointer_id, x, y) {
                    Some((dx, dy)) => {
                        self.front = CardMotion::Dragging(drag_transform(dx, dy));
                        true
                    }
                    None => false,
                }
            }
            DeckMsg::PointerUp {
                pointer_id,
                timestamp,
                viewport,
            } => {
                let Some(outcome) = self.deck.pointer_up(pointer_id, timestamp) else {
                    return false;
                };
                self.front = match outcome {
                    ReleaseOutcome::Dismissing(pending) => {
                        debug!("Swipe resolved to {:?}", pending.action);
                        CardMotion::Exiting(exit_transform(pending.action, viewport))
                    }
                    ReleaseOutcome::PhotoCycled | ReleaseOutcome::SnapBack => CardMotion::Rest,
                };
                true
            }
            DeckMsg::PointerCancel { pointer_id } => {
                if self.deck.pointer_cancel(pointer_id) {
                    self.front = CardMotion::Rest;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn start_dismissal(&mut self, action: DismissAction, viewport: Viewport) -> bool {
        match self.deck.dismiss(action) {
            Ok(pending) => {
                debug!("Dismissing with {:?} ({:?})", action, pending.ticket);
                self.front = CardMotion::Exiting(exit_transform(action, viewport));
                true
            }
            Err(err) => {
                debug!("Ignoring {:?}: {}", action, err);
                false
            }
        }
    }
}

impl Reducible for DeckState {
    type Action = DeckMsg;

    fn reduce(self: Rc<Self>, msg: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        if next.apply(msg) {
            Rc::new(next)
        } else {
            self
        }
    }
}

fn fresh_batch(config: &DeckConfig) -> Vec<Profile> {
    generate_profiles(
        config.deck_size,
        config.photos_per_profile,
        &mut rand::thread_rng(),
    )
}

#[function_component(App)]
fn app() -> Html {
    let state = use_reducer(|| DeckState::new(load_config()));

    // Read by the document keydown listener, which outlives any single render.
    let accepts_dismiss = use_mut_ref(|| false);
    *accepts_dismiss.borrow_mut() = !state.deck.controls_disabled();

    {
        let exit_ms = state.config.timing.exit_ms;
        let pending = state.deck.pending().map(|pending| pending.ticket);
        let state = state.clone();

        use_effect_with_deps(
            move |pending: &Option<DismissTicket>| {
                let timeout = (*pending).map(|ticket| {
                    Timeout::new(exit_ms, move || state.dispatch(DeckMsg::Complete(ticket)))
                });
                // Dropping an unfired timeout cancels it.
                move || drop(timeout)
            },
            pending,
        );
    }

    {
        let state = state.clone();
        let accepts_dismiss = accepts_dismiss.clone();

        use_effect_with_deps(
            move |_| {
                let listener = window().and_then(|w| w.document()).map(|document| {
                    EventListener::new(&document, "keydown", move |event| {
                        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                            return;
                        };
                        if focus_is_text_entry(event) {
                            return;
                        }
                        let Some(command) = KeyCommand::from_key(&event.key()) else {
                            return;
                        };

                        match command {
                            KeyCommand::Dismiss(action) => {
                                if *accepts_dismiss.borrow() {
                                    *accepts_dismiss.borrow_mut() = false;
                                    event.prevent_default();
                                    state.dispatch(DeckMsg::Dismiss {
                                        action,
                                        viewport: current_viewport(),
                                    });
                                }
                            }
                            KeyCommand::Reset => {
                                event.prevent_default();
                                state.dispatch(DeckMsg::Reset);
                            }
                        }
                    })
                });
                move || drop(listener)
            },
            (),
        );
    }

    let on_action = {
        let state = state.clone();
        Callback::from(move |action: DismissAction| {
            state.dispatch(DeckMsg::Dismiss {
                action,
                viewport: current_viewport(),
            });
        })
    };

    let on_shuffle = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(DeckMsg::Reset))
    };

    let disabled = state.deck.controls_disabled();

    html! {
        <div class="app-container">
            <header class="app-header">
                <h1>{ "Swipe Deck" }</h1>
                <button class="shuffle-button" onclick={on_shuffle}>{ "Shuffle" }</button>
            </header>
            <main class="content">
                { render_deck(&state) }
            </main>
            <nav class="controls">
                { for DismissAction::ALL
                    .into_iter()
                    .map(|action| render_action_button(action, disabled, &on_action)) }
            </nav>
            <p class="shortcut-hint">{ "← nope · ↑ super like · → like · R reshuffle" }</p>
        </div>
    }
}

fn render_action_button(
    action: DismissAction,
    disabled: bool,
    on_action: &Callback<DismissAction>,
) -> Html {
    let on_click = {
        let on_action = on_action.clone();
        Callback::from(move |_: MouseEvent| on_action.emit(action))
    };

    html! {
        <button class={classes!("action-button", action_class(action))}
            aria-label={action.label()}
            disabled={disabled}
            onclick={on_click}>
            { action_glyph(action) }
        </button>
    }
}

fn render_deck(state: &UseReducerHandle<DeckState>) -> Html {
    let profiles = state.deck.profiles();
    if profiles.is_empty() {
        return html! {
            <p class="deck-empty">{ "No more profiles. Shuffle to start over." }</p>
        };
    }

    let count = profiles.len();
    html! {
        <section class="deck" aria-label="Profiles">
            { for profiles.iter().enumerate().map(|(index, profile)| {
                let z_index = count - index;
                if index == 0 {
                    render_front_card(state, profile, z_index)
                } else {
                    html! {
                        <article key={profile.id.clone()} class="card"
                            style={format!("z-index: {};", z_index)}>
                            { render_card_contents(profile) }
                        </article>
                    }
                }
            }) }
        </section>
    }
}

fn render_front_card(
    state: &UseReducerHandle<DeckState>,
    profile: &Profile,
    z_index: usize,
) -> Html {
    let pointer_down = {
        let state = state.clone();
        Callback::from(move |event: PointerEvent| {
            if event.button() != 0 || state.deck.is_animating() {
                return;
            }
            event.prevent_default();
            if let Some(card) = event
                .current_target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            {
                let _ = card.set_pointer_capture(event.pointer_id());
            }
            state.dispatch(DeckMsg::PointerDown(PointerSample {
                pointer_id: event.pointer_id(),
                kind: PointerKind::from_pointer_type(&event.pointer_type()),
                x: event.client_x() as f64,
                y: event.client_y() as f64,
            }));
        })
    };

    let pointer_move = {
        let state = state.clone();
        Callback::from(move |event: PointerEvent| {
            if !state.deck.gesture().is_dragging() {
                return;
            }
            state.dispatch(DeckMsg::PointerMove {
                pointer_id: event.pointer_id(),
                x: event.client_x() as f64,
                y: event.client_y() as f64,
            });
        })
    };

    let pointer_up = {
        let state = state.clone();
        Callback::from(move |event: PointerEvent| {
            release_capture(&event);
            state.dispatch(DeckMsg::PointerUp {
                pointer_id: event.pointer_id(),
                timestamp: event.time_stamp(),
                viewport: current_viewport(),
            });
        })
    };

    let pointer_cancel = {
        let state = state.clone();
        Callback::from(move |event: PointerEvent| {
            release_capture(&event);
            state.dispatch(DeckMsg::PointerCancel {
                pointer_id: event.pointer_id(),
            });
        })
    };

    let double_click = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(DeckMsg::CyclePhoto))
    };

    let hint = if state.front.is_dragging() {
        state
            .deck
            .gesture()
            .drag()
            .and_then(|drag| swipe_hint(drag.dx, drag.dy, state.deck.gesture().thresholds()))
    } else {
        None
    };

    let stamp = match hint {
        Some((action, strength)) => html! {
            <span class={classes!("stamp", action_class(action))}
                style={format!("opacity: {:.2};", strength)}>
                { stamp_text(action) }
            </span>
        },
        None => html! {},
    };

    let style = format!(
        "z-index: {}; {}",
        z_index,
        state.front.style(&state.config.timing)
    );

    html! {
        <article key={profile.id.clone()} class="card card--front"
            style={style}
            onpointerdown={pointer_down}
            onpointermove={pointer_move}
            onpointerup={pointer_up}
            onpointercancel={pointer_cancel}
            ondblclick={double_click}>
            { stamp }
            { render_card_contents(profile) }
        </article>
    }
}

fn render_card_contents(profile: &Profile) -> Html {
    let photo = profile.current_photo();

    html! {
        <>
            <img class="card__media"
                src={photo.src.to_string()}
                alt={profile.alt_text()}
                draggable="false" />
            <div class="card__body">
                <div class="title-row">
                    <h2 class="card__title">{ &profile.name }</h2>
                    <span class="card__age">{ profile.age }</span>
                </div>
                <div class="card__meta">{ profile.subtitle() }</div>
                <p class="card__bio">{ &profile.bio }</p>
                <div class="card__chips">
                    { for profile.tags.iter().map(|tag| html! { <span class="chip">{ tag }</span> }) }
                </div>
            </div>
        </>
    }
}

fn release_capture(event: &PointerEvent) {
    if let Some(card) = event
        .current_target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
    {
        if card.has_pointer_capture(event.pointer_id()) {
            let _ = card.release_pointer_capture(event.pointer_id());
        }
    }
}

fn focus_is_text_entry(event: &KeyboardEvent) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<web_sys::HtmlElement>().ok())
        .map(|element| is_text_entry(&element.tag_name(), element.is_content_editable()))
        .unwrap_or(false)
}

fn current_viewport() -> Viewport {
    let Some(window) = window() else {
        return Viewport::default();
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    Viewport { width, height }
}

fn action_class(action: DismissAction) -> &'static str {
    match action {
        DismissAction::Like => "like",
        DismissAction::Nope => "nope",
        DismissAction::SuperLike => "superlike",
    }
}

fn stamp_text(action: DismissAction) -> &'static str {
    match action {
        DismissAction::Like => "LIKE",
        DismissAction::Nope => "NOPE",
        DismissAction::SuperLike => "SUPER",
    }
}

fn action_glyph(action: DismissAction) -> &'static str {
    match action {
        DismissAction::Like => "♥",
        DismissAction::Nope => "✕",
        DismissAction::SuperLike => "★",
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    info!("Starting swipe deck");
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> DeckState {
        DeckState::new(DeckConfig::default())
    }

    fn viewport() -> Viewport {
        Viewport {
            width: 1280.0,
            height: 800.0,
        }
    }

    #[test]
    fn reset_builds_configured_deck() {
        let config = DeckConfig {
            deck_size: 4,
            ..DeckConfig::default()
        };
        let mut state = DeckState::new(config);
        assert_eq!(state.deck.len(), 4);

        state.apply(DeckMsg::Dismiss {
            action: DismissAction::Like,
            viewport: viewport(),
        });
        assert!(state.apply(DeckMsg::Reset));
        assert_eq!(state.deck.len(), 4);
        assert!(!state.deck.is_animating());
        assert_eq!(state.front, CardMotion::Rest);
    }

    #[test]
    fn swipe_right_exits_and_completes() {
        let mut state = state();
        let head = state.deck.top().map(|p| p.id.clone());

        state.apply(DeckMsg::PointerDown(PointerSample {
            pointer_id: 1,
            kind: PointerKind::Mouse,
            x: 100.0,
            y: 100.0,
        }));
        state.apply(DeckMsg::PointerMove {
            pointer_id: 1,
            x: 260.0,
            y: 95.0,
        });
        assert!(state.front.is_dragging());

        assert!(state.apply(DeckMsg::PointerUp {
            pointer_id: 1,
            timestamp: 50.0,
            viewport: viewport(),
        }));
        assert_eq!(
            state.front,
            CardMotion::Exiting(exit_transform(DismissAction::Like, viewport()))
        );

        let ticket = state.deck.pending().expect("in flight").ticket;
        assert!(state.apply(DeckMsg::Complete(ticket)));
        assert_eq!(state.deck.len(), 11);
        assert_ne!(state.deck.top().map(|p| p.id.clone()), head);
        assert_eq!(state.front, CardMotion::Rest);
    }

    #[test]
    fn rejected_messages_leave_state_untouched() {
        let state = Rc::new(state());
        let next = state.clone().reduce(DeckMsg::PointerCancel { pointer_id: 4 });
        assert!(Rc::ptr_eq(&state, &next));
    }

    #[test]
    fn cancel_mid_drag_returns_card_to_rest() {
        let mut state = state();
        let before = state.deck.profiles().to_vec();

        assert!(state.apply(DeckMsg::PointerDown(PointerSample {
            pointer_id: 2,
            kind: PointerKind::Touch,
            x: 100.0,
            y: 100.0,
        })));
        assert!(state.apply(DeckMsg::PointerMove {
            pointer_id: 2,
            x: 190.0,
            y: 60.0,
        }));
        assert!(state.front.is_dragging());

        assert!(state.apply(DeckMsg::PointerCancel { pointer_id: 2 }));
        assert_eq!(state.front, CardMotion::Rest);
        assert!(!state.deck.gesture().is_dragging());
        assert!(!state.deck.is_animating());
        assert_eq!(state.deck.profiles(), before.as_slice());
    }

    #[test]
    fn stamps_read_in_capitals() {
        assert_eq!(stamp_text(DismissAction::Like), "LIKE");
        assert_eq!(stamp_text(DismissAction::Nope), "NOPE");
        assert_eq!(stamp_text(DismissAction::SuperLike), "SUPER");
    }

    #[test]
    fn stale_completion_after_reset_is_ignored() {
        let mut state = state();
        state.apply(DeckMsg::Dismiss {
            action: DismissAction::Nope,
            viewport: viewport(),
        });
        let ticket = state.deck.pending().expect("in flight").ticket;

        state.apply(DeckMsg::Reset);
        assert!(!state.apply(DeckMsg::Complete(ticket)));
        assert_eq!(state.deck.len(), 12);
    }
}
