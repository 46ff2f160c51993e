use chrono::{Datelike, NaiveDate};
use dioxus::prelude::*;

use crate::calendar;
use crate::components::{LoadingSpinner, StatCard};
use crate::config::ScheduleConfig;
use crate::editor::DayEditor;
use crate::export;
use crate::locale;
use crate::store::{AssignmentRecord, ScheduleStore};

#[cfg(target_arch = "wasm32")]
use crate::db::wasm_store::LocalStore;
#[cfg(not(target_arch = "wasm32"))]
use crate::db::MemoryStore;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{prelude::Closure, JsCast};
#[cfg(target_arch = "wasm32")]
use web_sys::window;

// Cosmetic gate before the UI becomes interactive.
#[cfg(target_arch = "wasm32")]
const STARTUP_DELAY_MS: i32 = 1_000;
// Settle time so the print-mode layout is applied before the capture.
#[cfg(target_arch = "wasm32")]
const EXPORT_SETTLE_MS: i32 = 300;

#[cfg(target_arch = "wasm32")]
fn open_store() -> ScheduleStore {
    ScheduleStore::load(Box::new(LocalStore))
}

#[cfg(not(target_arch = "wasm32"))]
fn open_store() -> ScheduleStore {
    ScheduleStore::load(Box::new(MemoryStore::new()))
}

#[cfg(target_arch = "wasm32")]
fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() as u32 + 1,
        now.get_date() as u32,
    )
    .expect("valid browser date")
}

#[cfg(not(target_arch = "wasm32"))]
fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

// Per-cell view model, precomputed so the rsx loop stays flat.
struct DayCell {
    day: NaiveDate,
    is_today: bool,
    cell_class: String,
    number_class: String,
    record: Option<AssignmentRecord>,
}

fn day_cells(
    year: i32,
    month: u32,
    store: &ScheduleStore,
    config: &ScheduleConfig,
    current_day: NaiveDate,
) -> Vec<DayCell> {
    calendar::service_days(year, month, config)
        .into_iter()
        .map(|day| {
            let record = store.find(day).cloned();
            let style = &config.service_for_day(day).style;
            let is_today = day == current_day;
            let is_past = day < current_day;
            let is_weekend = matches!(day.weekday().num_days_from_sunday(), 0 | 6);

            let (fill, border) = match record {
                Some(_) => (style.fill_class, style.border_class),
                None => ("bg-gray-50", "border-gray-200"),
            };
            let mut cell_class = format!(
                "day-cell border rounded-xl p-3 min-h-[180px] cursor-pointer shadow-sm hover:shadow-md relative {fill} {border}"
            );
            if is_today {
                cell_class.push_str(" ring-2 ring-blue-500");
            }
            if is_past && !is_today {
                cell_class.push_str(" opacity-80");
            }

            let mut number_class = String::from("font-bold text-xl");
            number_class.push_str(if is_weekend { " text-blue-600" } else { " text-gray-700" });
            if is_today {
                number_class.push_str(" text-blue-700");
            }

            DayCell { day, is_today, cell_class, number_class, record }
        })
        .collect()
}

#[component]
#[allow(unused_mut)]
pub fn SchedulePage() -> Element {
    let config = use_signal(ScheduleConfig::default);
    let mut store = use_signal(open_store);
    let mut editor = use_signal(DayEditor::default);

    let current_day = today();
    let mut year = use_signal(move || current_day.year());
    let mut month = use_signal(move || current_day.month());

    let mut loading = use_signal(|| true);
    let mut print_mode = use_signal(|| false);
    let mut exporting = use_signal(|| false);
    let mut notice = use_signal(|| Option::<String>::None);

    // startup gate: show the spinner briefly, then reveal the page
    use_effect(move || {
        #[cfg(target_arch = "wasm32")]
        {
            let mut loading = loading.clone();
            let cb = Closure::wrap(Box::new(move || loading.set(false)) as Box<dyn FnMut()>);
            if let Some(w) = window() {
                let _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
                    cb.as_ref().unchecked_ref(),
                    STARTUP_DELAY_MS,
                );
            }
            cb.forget();
        }
        #[cfg(not(target_arch = "wasm32"))]
        loading.set(false);
    });

    let mut select_day = move |day: NaiveDate| {
        editor.write().open(day, &store.read(), &config.read());
    };

    let on_new_service = move |_| {
        select_day(today());
    };

    let on_save = move |_| {
        let result = editor.write().commit(&mut store.write());
        if let Err(err) = result {
            tracing::warn!(%err, "commit failed");
            notice.set(Some("No se pudo guardar el cronograma. Intente de nuevo.".into()));
        }
    };

    let on_delete = move |_| {
        let result = editor.write().delete(&mut store.write());
        if let Err(err) = result {
            tracing::warn!(%err, "delete failed");
            notice.set(Some("No se pudo eliminar el servicio. Intente de nuevo.".into()));
        }
    };

    let on_close = move |_| {
        editor.write().discard();
    };

    let on_prev_month = move |_| {
        let (y, m) = calendar::prev_month(year(), month());
        year.set(y);
        month.set(m);
    };

    let on_next_month = move |_| {
        let (y, m) = calendar::next_month(year(), month());
        year.set(y);
        month.set(m);
    };

    // JPEG export: flip print mode on, give the layout a beat to settle,
    // capture, and clear the flags on success and failure alike.
    let on_export = move |_| {
        if exporting() {
            return;
        }
        exporting.set(true);
        print_mode.set(true);
        #[cfg(target_arch = "wasm32")]
        {
            let y = year();
            let m = month();
            let records = store.read().records().to_vec();
            let cfg = config.read().clone();
            let mut exporting = exporting.clone();
            let mut print_mode = print_mode.clone();
            let mut notice = notice.clone();
            let cb = Closure::wrap(Box::new(move || {
                let result = export::download_month_jpeg(y, m, &records, &cfg);
                print_mode.set(false);
                exporting.set(false);
                if let Err(err) = result {
                    web_sys::console::error_1(&format!("[EXPORT] {err}").into());
                    notice.set(Some("No se pudo generar la imagen del cronograma.".into()));
                }
            }) as Box<dyn FnMut()>);
            if let Some(w) = window() {
                let _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
                    cb.as_ref().unchecked_ref(),
                    EXPORT_SETTLE_MS,
                );
            }
            cb.forget();
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = export::download_month_jpeg(
                year(),
                month(),
                store.read().records(),
                &config.read(),
            );
            print_mode.set(false);
            exporting.set(false);
        }
    };

    if loading() {
        return rsx! {
            LoadingSpinner {}
        };
    }

    let root_class = if print_mode() {
        "p-4 md:p-8 space-y-8 max-w-full mx-auto print-mode"
    } else {
        "p-4 md:p-8 space-y-8 max-w-full mx-auto"
    };

    let month_label = locale::month_year_label(year(), month()).to_uppercase();
    let cells = day_cells(year(), month(), &store.read(), &config.read(), current_day);
    let total_scheduled = store.read().records().len();
    let scheduled_this_month = store
        .read()
        .records()
        .iter()
        .filter(|r| r.date.year() == year() && r.date.month() == month())
        .count();

    let cfg = config.read();
    let service_names: Vec<String> = cfg.services().map(|s| s.name.clone()).collect();
    let coordinators = cfg.coordinators.clone();
    let servers = cfg.servers.clone();
    let servers_total = servers.len();
    drop(cfg);

    let draft = editor.read().draft().cloned();

    rsx! {
        div { class: "{root_class}",
            header { class: "bg-gradient-to-r from-blue-600 to-purple-600 text-white p-6 rounded-2xl shadow-lg no-export",
                div { class: "flex flex-col md:flex-row justify-between items-center gap-4",
                    div {
                        h1 { class: "text-3xl font-bold", "Cronograma de Iluminación" }
                        p { class: "text-blue-100 text-lg", "Organización de servicios semanales" }
                    }
                    div { class: "flex items-center gap-4",
                        button {
                            class: "bg-white text-blue-600 hover:bg-blue-50 px-6 py-3 rounded-xl font-semibold shadow-md text-lg",
                            onclick: on_new_service,
                            "+ Nuevo Servicio"
                        }
                        button {
                            class: "bg-yellow-400 text-gray-800 hover:bg-yellow-300 px-6 py-3 rounded-xl font-semibold shadow-md text-lg disabled:opacity-60",
                            disabled: exporting(),
                            onclick: on_export,
                            { if exporting() { "Generando…" } else { "Descargar JPEG" } }
                        }
                    }
                }
            }

            { notice.read().as_ref().map(|msg| rsx!(
                div { class: "no-export bg-red-50 border-l-4 border-red-400 p-4 rounded-r-lg flex items-center justify-between",
                    p { class: "text-red-700 text-md", {msg.clone()} }
                    button { class: "text-red-500 hover:text-red-700 text-xl", onclick: move |_| notice.set(None), "✕" }
                }
            )) }

            div { class: "flex flex-col md:flex-row gap-8",
                // editor panel
                { draft.map(|d| {
                    let slot_count = d.slots.len();
                    rsx!(
                        div { class: "transition-all duration-300 w-full md:w-96 flex-shrink-0",
                            div { class: "bg-white border-0 shadow-xl rounded-2xl sticky top-4 no-export",
                                div { class: "p-6 space-y-4",
                                    div { class: "flex justify-between items-center border-b pb-3",
                                        h2 { class: "text-xl font-bold text-gray-800", {locale::day_heading(d.date)} }
                                        button { class: "text-gray-500 hover:text-gray-700 text-xl", onclick: on_close, "✕" }
                                    }

                                    div { class: "space-y-4",
                                        div {
                                            label { class: "block text-lg font-medium text-gray-700 mb-2", "Servicio:" }
                                            select {
                                                class: "w-full p-3 border border-gray-300 rounded-lg focus:ring-2 focus:ring-blue-500 text-lg",
                                                value: d.service.clone(),
                                                oninput: move |e| editor.write().set_service(&e.value(), &config.read()),
                                                option { value: "", "Seleccione un servicio" }
                                                for name in service_names.clone() {
                                                    option { value: "{name}", "{name}" }
                                                }
                                            }
                                        }

                                        div {
                                            label { class: "block text-lg font-medium text-gray-700 mb-2", "Coordinador:" }
                                            select {
                                                class: "w-full p-3 border border-gray-300 rounded-lg focus:ring-2 focus:ring-blue-500 text-lg",
                                                value: d.coordinator.clone(),
                                                oninput: move |e| editor.write().set_coordinator(&e.value()),
                                                for name in coordinators.clone() {
                                                    option { value: "{name}", "{name}" }
                                                }
                                            }
                                        }

                                        div { class: "space-y-3",
                                            label { class: "block text-lg font-medium text-gray-700 mb-2", "Servidores:" }
                                            for idx in 0..slot_count {
                                                div { class: "flex items-center gap-2",
                                                    span { class: "text-lg text-gray-500 w-8", {format!("#{}", idx + 1)} }
                                                    select {
                                                        class: "flex-1 p-3 border border-gray-300 rounded-lg focus:ring-2 focus:ring-blue-500 text-lg",
                                                        value: d.slots[idx].clone(),
                                                        oninput: move |e| editor.write().set_slot(idx, &e.value()),
                                                        option { value: "", "Seleccione servidor" }
                                                        for name in servers.clone() {
                                                            option { value: "{name}", "{name}" }
                                                        }
                                                    }
                                                }
                                            }
                                        }
                                    }

                                    div { class: "flex justify-between gap-3 pt-4",
                                        button {
                                            class: "flex-1 bg-red-600 hover:bg-red-700 text-white py-3 rounded-lg text-lg",
                                            onclick: on_delete,
                                            "Eliminar"
                                        }
                                        button {
                                            class: "flex-1 bg-green-600 hover:bg-green-700 text-white py-3 rounded-lg text-lg",
                                            onclick: on_save,
                                            "Guardar"
                                        }
                                    }
                                }
                            }
                        }
                    )
                }) }

                // calendar
                div { class: "flex-grow",
                    div { class: "bg-white rounded-2xl shadow-lg overflow-hidden",
                        div { class: "bg-gray-50 p-4 border-b no-export",
                            div { class: "flex items-center justify-between",
                                button { class: "text-gray-600 hover:bg-gray-200 text-lg px-4 py-2 rounded-lg", onclick: on_prev_month, "◀" }
                                h2 { class: "text-xl font-bold text-gray-800", {month_label} }
                                button { class: "text-gray-600 hover:bg-gray-200 text-lg px-4 py-2 rounded-lg", onclick: on_next_month, "▶" }
                            }
                        }

                        div { class: "p-4",
                            div { class: "grid grid-cols-1 md:grid-cols-3 gap-4 no-export",
                                for name in service_names.clone() {
                                    div { class: "text-center font-semibold text-gray-700 p-2 text-lg", {name.to_uppercase()} }
                                }
                            }

                            div { class: "grid grid-cols-1 md:grid-cols-3 gap-4",
                                for cell in cells {
                                    div {
                                        key: "{cell.day}",
                                        class: "{cell.cell_class}",
                                        onclick: move |_| select_day(cell.day),
                                        div { class: "flex flex-col h-full",
                                            div { class: "flex justify-between items-start",
                                                span { class: "{cell.number_class}", {cell.day.day().to_string()} }
                                                { cell.is_today.then(|| rsx!(
                                                    span { class: "bg-blue-600 text-white text-sm px-2 py-1 rounded-full", "HOY" }
                                                )) }
                                            }
                                            { match cell.record {
                                                Some(record) => rsx!(
                                                    div { class: "mt-2 flex-grow",
                                                        div { class: "space-y-1",
                                                            div { class: "font-semibold text-gray-800 text-lg", {record.service.clone()} }
                                                            div { class: "text-gray-600 text-md", {record.coordinator.clone()} }
                                                            div { class: "border-t border-gray-200 my-1" }
                                                            for (idx, person) in record.slots.iter().enumerate() {
                                                                div { class: "text-md",
                                                                    span { class: "font-medium", {format!("Serv. {}: ", idx + 1)} }
                                                                    { if person.is_empty() { "---".to_string() } else { person.clone() } }
                                                                }
                                                            }
                                                        }
                                                    }
                                                ),
                                                None => rsx!(
                                                    div { class: "flex-grow flex items-center justify-center",
                                                        span { class: "text-gray-400 text-lg", "Sin programar" }
                                                    }
                                                ),
                                            } }
                                        }
                                    }
                                }
                            }
                        }
                    }

                    div { class: "mt-6 grid grid-cols-1 md:grid-cols-3 gap-4 no-export",
                        StatCard {
                            label: "Servicios Programados".to_string(),
                            value: total_scheduled.to_string(),
                            container: "bg-blue-50 border-blue-200",
                            label_color: "text-blue-600",
                            value_color: "text-blue-800",
                        }
                        StatCard {
                            label: "Este Mes".to_string(),
                            value: scheduled_this_month.to_string(),
                            container: "bg-green-50 border-green-200",
                            label_color: "text-green-600",
                            value_color: "text-green-800",
                        }
                        StatCard {
                            label: "Servidores".to_string(),
                            value: servers_total.to_string(),
                            container: "bg-purple-50 border-purple-200",
                            label_color: "text-purple-600",
                            value_color: "text-purple-800",
                        }
                    }
                }
            }

            div { class: "bg-yellow-50 border-l-4 border-yellow-400 p-4 rounded-r-lg no-export",
                div { class: "flex items-start",
                    div { class: "flex-shrink-0 text-yellow-500 mr-2", "💡" }
                    div {
                        h4 { class: "font-semibold text-yellow-800 text-lg", "Notas importantes" }
                        p { class: "text-yellow-700 text-md",
                            "- Haz clic en cualquier día para programar o editar un servicio."
                            br {}
                            "- Los días pasados aparecen atenuados."
                            br {}
                            "- El día actual está resaltado con un borde azul."
                        }
                    }
                }
            }
        }
    }
}
