use yew::prelude::*;

/// Row data for one mission button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionView {
    pub id: String,
    pub title: String,
    pub hint: String,
    pub weight: u32,
    pub done: bool,
    pub active: bool,
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub missions: Vec<MissionView>,
    pub on_select: Callback<String>,
}

#[function_component(MissionList)]
pub fn mission_list(p: &Props) -> Html {
    html! {
        <ul class="org-list">
            { for p.missions.iter().map(|mission| {
                let mut class = Classes::from("org-btn");
                if mission.done {
                    class.push("org-btn--done");
                }
                if mission.active {
                    class.push("org-btn--active");
                }
                let onclick = {
                    let on_select = p.on_select.clone();
                    let id = mission.id.clone();
                    Callback::from(move |_| on_select.emit(id.clone()))
                };
                html! {
                    <li>
                        <button {class} {onclick} disabled={mission.done}>
                            <strong>{ &mission.title }</strong>
                            <span class="org-btn__boost">{ format!("+{}%", mission.weight) }</span>
                            <small>{ &mission.hint }</small>
                        </button>
                    </li>
                }
            }) }
        </ul>
    }
}
