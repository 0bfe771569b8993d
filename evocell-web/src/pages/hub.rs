use std::cell::RefCell;
use std::rc::Rc;

use evocell_game::constants::{SURFACE_HEIGHT, SURFACE_WIDTH};
use evocell_game::{HubUpdate, MissionHub, PointerInput, Scenario, Scene};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::{EvolutionOverlay, LogPanel, Meter, MissionList, MissionView, Stage};
use crate::dom;
use crate::router::Route;
use crate::storage::BrowserStorage;

type SharedHub = Rc<RefCell<Option<MissionHub<BrowserStorage>>>>;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub scenario: Scenario,
}

fn fresh_hub(scenario: Scenario) -> Option<MissionHub<BrowserStorage>> {
    let seed = js_sys::Date::now() as u64;
    match MissionHub::new(scenario, BrowserStorage, seed) {
        Ok(hub) => Some(hub),
        Err(err) => {
            dom::console_error(&format!("engine setup failed: {err}"));
            None
        }
    }
}

fn completion_feedback(update: &HubUpdate) -> Option<String> {
    let result = update.completed.as_ref()?;
    let award = update.award.as_ref()?;
    if !award.accepted {
        return Some("That run was already torn down.".to_string());
    }
    Some(if award.evolution_started {
        "Adaptation complete! The cell evolves.".to_string()
    } else if award.points_applied > 0 {
        format!(
            "Mission complete, scored {}: adaptation {}% (+{}%)",
            result.raw_score, award.percent, award.points_applied
        )
    } else if result.success {
        "Mission already applied this session, no further boost.".to_string()
    } else {
        format!(
            "Scored {}, below the pass mark. Open it again to retry.",
            result.raw_score
        )
    })
}

#[function_component(HubPage)]
pub fn hub_page(props: &Props) -> Html {
    let hub: SharedHub = use_mut_ref(|| fresh_hub(props.scenario));
    let refresh = use_force_update();
    let feedback = use_state(|| AttrValue::from("Pick an organelle mission to begin."));

    let on_select = use_callback((), {
        let hub = hub.clone();
        let refresh = refresh.clone();
        let feedback = feedback.clone();
        move |id: String, _: &()| {
            if let Some(hub) = hub.borrow_mut().as_mut() {
                match hub.launch(&id) {
                    Ok(()) => {
                        let hint = hub
                            .missions()
                            .iter()
                            .find(|mission| mission.id == id)
                            .map(|mission| mission.hint.clone())
                            .unwrap_or_default();
                        feedback.set(AttrValue::from(hint));
                    }
                    Err(err) => feedback.set(AttrValue::from(err.to_string())),
                }
            }
            refresh.force_update();
        }
    });

    let on_pointer = use_callback((), {
        let hub = hub.clone();
        let refresh = refresh.clone();
        let feedback = feedback.clone();
        move |input: PointerInput, _: &()| {
            if let Some(hub) = hub.borrow_mut().as_mut() {
                let update = hub.pointer(input);
                if let Some(message) = completion_feedback(&update) {
                    feedback.set(AttrValue::from(message));
                    refresh.force_update();
                }
            }
        }
    });

    let on_tick = use_callback((), {
        let hub = hub.clone();
        let refresh = refresh.clone();
        let feedback = feedback.clone();
        move |dt_ms: f64, _: &()| {
            if let Some(hub) = hub.borrow_mut().as_mut() {
                let update = hub.tick(dt_ms);
                if let Some(message) = completion_feedback(&update) {
                    feedback.set(AttrValue::from(message));
                    refresh.force_update();
                }
            }
        }
    });

    let scene_provider = use_callback((), {
        let hub = hub.clone();
        move |(), _: &()| {
            hub.borrow()
                .as_ref()
                .map_or_else(Scene::default, MissionHub::scene)
        }
    });

    let on_cancel = {
        let hub = hub.clone();
        let refresh = refresh.clone();
        let feedback = feedback.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(hub) = hub.borrow_mut().as_mut() {
                hub.cancel_active();
            }
            feedback.set(AttrValue::from("Mission cancelled."));
            refresh.force_update();
        })
    };

    let on_reset = {
        let hub = hub.clone();
        let refresh = refresh.clone();
        let feedback = feedback.clone();
        Callback::from(move |_: MouseEvent| {
            if !dom::confirm("Reset all saved progress?") {
                return;
            }
            if let Some(hub) = hub.borrow_mut().as_mut() {
                hub.reset_progress();
            }
            feedback.set(AttrValue::from("Progress wiped. Fresh cell."));
            refresh.force_update();
        })
    };

    let on_export = {
        let hub = hub.clone();
        Callback::from(move |_: MouseEvent| {
            let exported = hub.borrow().as_ref().map(MissionHub::export_json);
            match exported {
                Some(Ok(payload)) => {
                    if let Err(err) = dom::download_json("evocell-progress.json", &payload) {
                        dom::console_error(&format!("export failed: {err}"));
                    }
                }
                Some(Err(err)) => dom::console_error(&format!("export failed: {err}")),
                None => {}
            }
        })
    };

    let on_player_change = {
        let hub = hub.clone();
        let refresh = refresh.clone();
        Callback::from(move |event: Event| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                if let Some(hub) = hub.borrow_mut().as_mut() {
                    hub.set_player(&input.value());
                }
                refresh.force_update();
            }
        })
    };

    let view = hub.borrow();
    let Some(state) = view.as_ref() else {
        return html! {
            <main class="hub hub--broken">
                <h1>{ "Evocell" }</h1>
                <p>{ "The mission engine failed to start. See the console for details." }</p>
            </main>
        };
    };

    let session = state.session();
    let missions: Vec<MissionView> = state
        .missions()
        .iter()
        .map(|mission| MissionView {
            id: mission.id.clone(),
            title: mission.title.clone(),
            hint: mission.hint.clone(),
            weight: mission.weight,
            done: session.has_awarded(&mission.id),
            active: state.active_mission() == Some(mission.id.as_str()),
        })
        .collect();
    let percent = session.percent();
    let stages: Vec<u8> = session.thresholds_fired().to_vec();
    let events = session.log().to_vec();
    let player = session.player().to_string();
    let evolution = session.evolution().cloned();
    let fitness = state.fitness().ok();
    let total_score = state.record().total_score;
    let game_active = state.active_mission().is_some();
    drop(view);

    html! {
        <main class="hub">
            <header class="hub__header">
                <h1>{ props.scenario.title() }</h1>
                <Link<Route> to={Route::Home}>{ "change scenario" }</Link<Route>>
                <label class="hub__player">
                    { "Explorer name " }
                    <input type="text" placeholder={player.clone()} onchange={on_player_change} />
                </label>
            </header>
            <div class="hub__layout">
                <aside class="hub__missions">
                    <MissionList missions={missions} on_select={on_select} />
                    <div class="hub__tools">
                        <button onclick={on_export}>{ "Export progress" }</button>
                        <button class="danger" onclick={on_reset}>{ "Reset" }</button>
                    </div>
                </aside>
                <section class="hub__play">
                    <Meter percent={percent} stages_reached={stages} />
                    <Stage
                        width={SURFACE_WIDTH as u32}
                        height={SURFACE_HEIGHT as u32}
                        scene={scene_provider}
                        on_pointer={on_pointer}
                        on_tick={on_tick}
                        active={game_active}
                    />
                    <p class="hub__feedback">{ (*feedback).clone() }</p>
                    if game_active {
                        <button onclick={on_cancel}>{ "Abandon mission" }</button>
                    }
                </section>
                <aside class="hub__narrative">
                    if let Some(report) = fitness {
                        <div class="fitness">
                            <h2>{ "Simulated fitness" }</h2>
                            <p class="fitness__score">{ format!("{} / 100", report.composite) }</p>
                            <p class="fitness__verdict">{ format!("The cell is {}.", report.verdict) }</p>
                            <p class="fitness__total">{ format!("Stored mission average: {total_score}") }</p>
                        </div>
                    }
                    <LogPanel player={AttrValue::from(player.clone())} events={events} />
                </aside>
            </div>
            if let Some(sequence) = evolution {
                <EvolutionOverlay sequence={sequence} player={AttrValue::from(player)} />
            }
        </main>
    }
}
