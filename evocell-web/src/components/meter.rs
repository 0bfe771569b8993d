use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub percent: u8,
    /// Breakpoints already crossed; each one bumps the visual stage.
    #[prop_or_default]
    pub stages_reached: Vec<u8>,
}

#[function_component(Meter)]
pub fn meter(p: &Props) -> Html {
    let stage_class = format!("meter meter--stage-{}", p.stages_reached.len());
    let fill_style = format!("width:{}%;", p.percent);
    html! {
        <div class={stage_class} role="progressbar">
            <div class="meter__fill" style={fill_style}></div>
            <span class="meter__percent">{ format!("{}%", p.percent) }</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn meter_shows_percent_and_stage() {
        let props = Props {
            percent: 42,
            stages_reached: vec![30],
        };
        let html = block_on(LocalServerRenderer::<Meter>::with_props(props).render());
        assert!(html.contains("42%"));
        assert!(html.contains("meter--stage-1"));
        assert!(html.contains("width:42%"));
    }
}
