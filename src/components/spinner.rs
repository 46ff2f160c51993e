use dioxus::prelude::*;

#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        div { class: "flex items-center justify-center h-screen",
            div { class: "spinner rounded-full h-32 w-32 border-blue-500" }
        }
    }
}
