use evocell_game::Scenario;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    html! {
        <main class="menu">
            <h1>{ "Evocell" }</h1>
            <p class="menu__tagline">
                { "Guide a living cell to full adaptation, one organelle mission at a time." }
            </p>
            <nav class="menu__scenarios">
                <Link<Route> classes="menu__card" to={Route::AnimalCell}>
                    <h2>{ Scenario::AnimalCell.title() }</h2>
                    <p>{ "Energy, gene control, and a membrane under siege." }</p>
                </Link<Route>>
                <Link<Route> classes="menu__card" to={Route::VenusFlytrap}>
                    <h2>{ Scenario::VenusFlytrap.title() }</h2>
                    <p>{ "Sunlight, snap-traps, and months of stored prey." }</p>
                </Link<Route>>
            </nav>
        </main>
    }
}
