use dioxus::prelude::*;

mod calendar;
mod components;
mod config;
mod db;
mod editor;
mod export;
mod locale;
mod store;
mod views;

use views::SchedulePage;

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/tailwind.css") }
        head {
            document::Meta {
                name: "description",
                content: "Organización de los servicios semanales de iluminación",
            }
            document::Script { src: "https://cdn.tailwindcss.com" }
        }
        SchedulePage {}
    }
}
