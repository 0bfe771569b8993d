use evocell_game::EvolutionSequence;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub sequence: EvolutionSequence,
    pub player: AttrValue,
}

/// One-shot celebration overlay. The engine generates the burst exactly
/// once; this component only plays it back.
#[function_component(EvolutionOverlay)]
pub fn evolution_overlay(p: &Props) -> Html {
    html! {
        <div class="evolution">
            <div class="evolution__banner">
                <h2>{ "=== EVOLUTION COMPLETE ===" }</h2>
                <p>{ format!("{} fully adapted the cell", p.player) }</p>
            </div>
            { for p.sequence.particles.iter().map(|particle| {
                let class = if particle.alt_tint {
                    "particle particle--alt"
                } else {
                    "particle"
                };
                let style = format!(
                    "left:{}px;top:{}px;animation-delay:{}ms;",
                    particle.x, particle.y, particle.delay_ms
                );
                html! { <div {class} {style}></div> }
            }) }
        </div>
    }
}
