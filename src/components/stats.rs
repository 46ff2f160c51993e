use dioxus::prelude::*;

#[component]
pub fn StatCard(
    label: String,
    value: String,
    container: &'static str,
    label_color: &'static str,
    value_color: &'static str,
) -> Element {
    rsx! {
        div { class: "rounded-xl border shadow-sm p-4 {container}",
            div { class: "font-semibold text-lg {label_color}", {label} }
            div { class: "text-3xl font-bold {value_color}", {value} }
        }
    }
}
