use evocell_game::Scenario;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{HomePage, HubPage};

#[derive(Clone, Copy, Routable, PartialEq, Eq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/animal")]
    AnimalCell,
    #[at("/plant")]
    VenusFlytrap,
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[must_use]
pub fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <HomePage /> },
        // Keys force a fresh hub (and a fresh adaptation session) per
        // scenario, matching the session-per-visit lifecycle.
        Route::AnimalCell => html! {
            <HubPage key="animal" scenario={Scenario::AnimalCell} />
        },
        Route::VenusFlytrap => html! {
            <HubPage key="plant" scenario={Scenario::VenusFlytrap} />
        },
        Route::NotFound => html! {
            <main class="menu">
                <h1>{ "Nothing here" }</h1>
                <Link<Route> to={Route::Home}>{ "back to the lab" }</Link<Route>>
            </main>
        },
    }
}
