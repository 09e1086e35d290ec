//! Static indicator catalog: the fixed mapping from user-facing labels to
//! workbook sheets, descriptions and rendering strategy.

/// Rendering strategy for an indicator's sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// Year-labelled columns, rendered as a multi-country line chart.
    TimeSeries,
    /// Category-labelled columns, rendered as a single-country bar chart.
    GenerationMix,
}

/// One entry of the indicator catalog. Immutable for the process lifetime.
#[derive(Debug, Clone, Copy)]
pub struct Indicator {
    pub label: &'static str,
    pub sheet: &'static str,
    pub description: &'static str,
    pub view: ViewKind,
    /// Companion text file rendered below the main view, if any.
    pub supplement: Option<&'static str>,
}

pub const INDICATORS: [Indicator; 8] = [
    Indicator {
        label: "Energy Related Greenhouse Gas Emissions (Mt CO2e)",
        sheet: "Greenhouse Gas Emissions",
        description: "Energy-sector greenhouse gas emissions (million tonnes of CO2e).",
        view: ViewKind::TimeSeries,
        supplement: Some("greenhousegas.md"),
    },
    Indicator {
        label: "Fossil Fuel Consumption (EJ)",
        sheet: "Fossil Fuel Consumption (EJ)",
        description: "Total fossil fuel consumption in exajoules.",
        view: ViewKind::TimeSeries,
        supplement: None,
    },
    Indicator {
        label: "Renewable Energy Consumption (EJ)",
        sheet: "Renewable Energy Consumption",
        description: "Total renewable energy consumption in exajoules.",
        view: ViewKind::TimeSeries,
        supplement: None,
    },
    Indicator {
        label: "Power Sector Decarbonisation (generation mix share)",
        sheet: "Power Sector Decarbonisation",
        description: "Share of electricity generation by source. Values represent fractions of total generation.",
        view: ViewKind::GenerationMix,
        supplement: None,
    },
    Indicator {
        label: "Carbon Intensity (tCO2-eq per MJ)",
        sheet: "Carbon Int (tCO2-eq per MJ)",
        description: "Carbon intensity of energy supply (tonnes CO2e per megajoule).",
        view: ViewKind::TimeSeries,
        supplement: Some("carbonintensity.md"),
    },
    Indicator {
        label: "Energy Consumption per Capita (GJ per person)",
        sheet: "Energy Consumption per Capita",
        description: "Per-capita energy use in gigajoules.",
        view: ViewKind::TimeSeries,
        supplement: None,
    },
    Indicator {
        label: "Economy-wide Carbon Intensity (CO2e per $ GDP)",
        sheet: "Economic Energy Intensity",
        description: "Energy intensity of the economy: energy used per unit of GDP.",
        view: ViewKind::TimeSeries,
        supplement: None,
    },
    Indicator {
        label: "Carbon Intensity (CO2e per $ GDP)",
        sheet: "Carbon Intensity (per GDP)",
        description: "Carbon intensity per unit of GDP.",
        view: ViewKind::TimeSeries,
        supplement: None,
    },
];

/// Looks up a catalog entry by its display label.
pub fn indicator_by_label(label: &str) -> Option<&'static Indicator> {
    INDICATORS.iter().find(|ind| ind.label == label)
}
