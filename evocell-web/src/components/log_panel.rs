use evocell_game::AwardEvent;
use evocell_game::constants::{
    LOG_EVOLUTION_COMPLETE, LOG_MISSION_APPLIED, LOG_MISSION_FAILED, LOG_MISSION_REPEATED,
};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub player: AttrValue,
    pub events: Vec<AwardEvent>,
}

fn line_for(player: &str, event: &AwardEvent) -> String {
    match event.log_key.as_str() {
        LOG_MISSION_APPLIED => format!(
            "{player} applied {} (+{}%), adaptation {}%",
            event.title, event.points, event.percent_after
        ),
        LOG_MISSION_REPEATED => format!("{} revisited, no further boost", event.title),
        LOG_MISSION_FAILED => format!("{} attempt fell short, try again", event.title),
        LOG_EVOLUTION_COMPLETE => format!(
            "{player} applied {} (+{}%): EVOLUTION COMPLETE",
            event.title, event.points
        ),
        other => format!("{}: {other}", event.title),
    }
}

#[function_component(LogPanel)]
pub fn log_panel(p: &Props) -> Html {
    html! {
        <div class="mission-log" aria-live="polite">
            <h2>{ "Mission log" }</h2>
            if p.events.is_empty() {
                <p class="mission-log__empty">{ "No missions applied yet." }</p>
            } else {
                <ol>
                    { for p.events.iter().map(|event| html! {
                        <li>{ line_for(&p.player, event) }</li>
                    }) }
                </ol>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn event(key: &str, points: u32) -> AwardEvent {
        AwardEvent {
            mission_id: "mito".to_string(),
            title: "Mitochondria".to_string(),
            points,
            percent_after: 12,
            log_key: key.to_string(),
        }
    }

    #[test]
    fn log_lines_follow_the_event_kind() {
        let props = Props {
            player: AttrValue::from("Ada"),
            events: vec![
                event("log.mission.applied", 12),
                event("log.mission.failed", 0),
            ],
        };
        let html = block_on(LocalServerRenderer::<LogPanel>::with_props(props).render());
        assert!(html.contains("Ada applied Mitochondria (+12%)"));
        assert!(html.contains("fell short"));
    }

    #[test]
    fn empty_log_shows_a_placeholder() {
        let props = Props {
            player: AttrValue::from("Ada"),
            events: Vec::new(),
        };
        let html = block_on(LocalServerRenderer::<LogPanel>::with_props(props).render());
        assert!(html.contains("No missions applied yet."));
    }
}
