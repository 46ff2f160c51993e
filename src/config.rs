use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Presentation hints for a service: utility classes for the live grid and
/// hex values for the canvas export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceStyle {
    pub fill_class: &'static str,
    pub border_class: &'static str,
    pub fill_hex: &'static str,
    pub border_hex: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    pub slot_count: usize,
    pub style: ServiceStyle,
}

/// Immutable schedule configuration, built once at startup and passed by
/// reference into the store/editor call sites. Weekday keys follow the
/// 0=Sunday .. 6=Saturday convention used by the persisted data.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleConfig {
    services: BTreeMap<u32, Service>,
    fallback: Service,
    pub coordinators: Vec<String>,
    pub servers: Vec<String>,
}

pub const DEFAULT_SLOT_COUNT: usize = 2;

const GRAY: ServiceStyle = ServiceStyle {
    fill_class: "bg-gray-100",
    border_class: "border-gray-300",
    fill_hex: "#f3f4f6",
    border_hex: "#d1d5db",
};

impl Default for ScheduleConfig {
    fn default() -> Self {
        let blue = ServiceStyle {
            fill_class: "bg-blue-100",
            border_class: "border-blue-300",
            fill_hex: "#dbeafe",
            border_hex: "#93c5fd",
        };
        let green = ServiceStyle {
            fill_class: "bg-green-100",
            border_class: "border-green-300",
            fill_hex: "#dcfce7",
            border_hex: "#86efac",
        };
        let purple = ServiceStyle {
            fill_class: "bg-purple-100",
            border_class: "border-purple-300",
            fill_hex: "#f3e8ff",
            border_hex: "#d8b4fe",
        };
        Self::new(
            vec![
                (0, Service { name: "Domingo".into(), slot_count: 4, style: blue }),
                (3, Service { name: "Miércoles".into(), slot_count: 2, style: green }),
                (6, Service { name: "Sábado".into(), slot_count: 2, style: purple }),
            ],
            vec![
                "Carlos Larez".into(),
                "Moisés Henríquez".into(),
                "Samuel Colón".into(),
            ],
            vec![
                "Cesar Silvera".into(),
                "Omar Acosta".into(),
                "Rafael Maldonado".into(),
                "Jesús Pimentel".into(),
                "Samuel Rincón".into(),
            ],
        )
    }
}

impl ScheduleConfig {
    pub fn new(
        services: Vec<(u32, Service)>,
        coordinators: Vec<String>,
        servers: Vec<String>,
    ) -> Self {
        debug_assert!(services.iter().all(|(weekday, _)| *weekday < 7));
        Self {
            services: services.into_iter().collect(),
            fallback: Service {
                name: String::new(),
                slot_count: DEFAULT_SLOT_COUNT,
                style: GRAY,
            },
            coordinators,
            servers,
        }
    }

    /// Every weekday resolves to exactly one service: the configured entry
    /// or the unnamed fallback.
    pub fn service_for_weekday(&self, weekday: u32) -> &Service {
        self.services.get(&weekday).unwrap_or(&self.fallback)
    }

    pub fn service_for_day(&self, day: NaiveDate) -> &Service {
        self.service_for_weekday(day.weekday().num_days_from_sunday())
    }

    pub fn service_by_name(&self, name: &str) -> Option<&Service> {
        self.services.values().find(|service| service.name == name)
    }

    /// Slot count used when a draft switches to `name`; unknown names (and
    /// the empty selection) fall back to the default count.
    pub fn slot_count_for(&self, name: &str) -> usize {
        self.service_by_name(name)
            .map(|service| service.slot_count)
            .unwrap_or(DEFAULT_SLOT_COUNT)
    }

    /// Days of unconfigured weekdays never appear in the calendar grid.
    pub fn is_service_day(&self, day: NaiveDate) -> bool {
        self.services
            .contains_key(&day.weekday().num_days_from_sunday())
    }

    /// Configured services in weekday order (Sunday first).
    pub fn services(&self) -> impl Iterator<Item = &Service> {
        self.services.values()
    }

    pub fn default_coordinator(&self) -> &str {
        self.coordinators.first().map(String::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn configured_weekdays_resolve_to_their_service() {
        let config = ScheduleConfig::default();
        let sunday = config.service_for_day(date("2024-06-02"));
        assert_eq!(sunday.name, "Domingo");
        assert_eq!(sunday.slot_count, 4);
        let saturday = config.service_for_day(date("2024-06-01"));
        assert_eq!(saturday.name, "Sábado");
        assert_eq!(saturday.slot_count, 2);
    }

    #[test]
    fn unconfigured_weekday_falls_back_to_default() {
        let config = ScheduleConfig::default();
        // 2024-06-04 is a Tuesday
        let service = config.service_for_day(date("2024-06-04"));
        assert_eq!(service.name, "");
        assert_eq!(service.slot_count, DEFAULT_SLOT_COUNT);
        assert!(!config.is_service_day(date("2024-06-04")));
    }

    #[test]
    fn slot_count_lookup_by_name() {
        let config = ScheduleConfig::default();
        assert_eq!(config.slot_count_for("Domingo"), 4);
        assert_eq!(config.slot_count_for("Miércoles"), 2);
        assert_eq!(config.slot_count_for(""), DEFAULT_SLOT_COUNT);
        assert_eq!(config.slot_count_for("Lunes"), DEFAULT_SLOT_COUNT);
    }

    #[test]
    fn services_iterate_in_weekday_order() {
        let config = ScheduleConfig::default();
        let names: Vec<_> = config.services().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Domingo", "Miércoles", "Sábado"]);
    }

    #[test]
    fn injected_configuration_is_honored() {
        let config = ScheduleConfig::new(
            vec![(
                1,
                Service { name: "Lunes".into(), slot_count: 3, style: GRAY },
            )],
            vec!["Ana Pérez".into()],
            vec![],
        );
        // 2024-06-03 is a Monday
        assert_eq!(config.service_for_day(date("2024-06-03")).slot_count, 3);
        assert_eq!(config.default_coordinator(), "Ana Pérez");
        assert!(!config.is_service_day(date("2024-06-02")));
    }
}
