//! End-to-end tests: raw rows -> normalization -> join -> narrative.
//!
//! Inputs are built in memory, so no workbook fixtures are needed.

use calidad_core::catalog::builtin::surface_water;
use calidad_core::config::ReportConfig;
use calidad_core::error::CalidadError;
use calidad_core::format::NumberFormat;
use calidad_core::model::{Module, RawCell, RawMeasurement};
use calidad_core::reference::{annotate_groundwater_reference, REFERENCE_COLUMN};
use calidad_core::regulation::{RawRegulationRow, RegulationTable};
use calidad_core::{generate_narrative, prepare_dataset};

fn measurement(parameter: &str, unit: &str, station: &str, value: RawCell) -> RawMeasurement {
    RawMeasurement {
        parameter: parameter.into(),
        unit: unit.into(),
        station: station.into(),
        date: None,
        value,
    }
}

fn regulation(headers: &[&str], rows: Vec<(&str, &str, Vec<RawCell>)>) -> RegulationTable {
    let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let rows: Vec<RawRegulationRow> = rows
        .into_iter()
        .map(|(parameter, unit, cells)| RawRegulationRow {
            parameter: parameter.into(),
            unit: unit.into(),
            cells,
        })
        .collect();
    RegulationTable::from_raw(&headers, &rows)
}

fn selection(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| c.to_string()).collect()
}

fn lead_rows() -> Vec<RawMeasurement> {
    vec![
        measurement("Plomo", "mg/L", "E-1", RawCell::Number(5.0)),
        measurement("Plomo", "mg/L", "E-2", RawCell::from("<2")),
        measurement("Plomo", "mg/L", "E-3", RawCell::from("15")),
        measurement("Plomo", "mg/L", "E-4", RawCell::from("n.d.")),
        measurement("Cadmio", "mg/L", "E-1", RawCell::Number(0.001)),
    ]
}

fn surface_table() -> RegulationTable {
    regulation(
        &[
            "parametro",
            "unidad",
            "lim_inf_eca_2017_1a2",
            "lim_sup_eca_2017_1a2",
            "lim_sup_eca_2017_3d1",
            "lim_sup_eca_2017_3d2",
        ],
        vec![(
            "Plomo",
            "mg/L",
            vec![
                RawCell::from("Plomo"),
                RawCell::from("mg/L"),
                RawCell::Number(0.0),
                RawCell::Number(10.0),
                RawCell::Number(0.05),
                RawCell::Number(0.05),
            ],
        )],
    )
}

// ---------------------------------------------------------------------------
// Surface water
// ---------------------------------------------------------------------------

#[test]
fn surface_lead_scenario() {
    let dataset = prepare_dataset(&lead_rows(), &surface_table());
    assert_eq!(dataset.len(), 4);
    assert_eq!(dataset.dropped, 1);
    assert_eq!(dataset.parameters(), vec!["Plomo", "Cadmio"]);

    let text = generate_narrative(
        &dataset,
        "Plomo",
        Module::Surface,
        &selection(&["lim_inf_eca_2017_1a2", "lim_sup_eca_2017_1a2"]),
        &surface_water().unwrap(),
        &ReportConfig::default(),
    )
    .unwrap();

    assert_eq!(
        text,
        "Como se observa en el gráfico, los valores de Plomo registrados en todas las estaciones variaron desde por debajo del límite de detección (2 mg/L) hasta un máximo igual a 15 mg/L, con un valor promedio de 7 mg/L. Al comparar los resultados obtenidos con el ECA 2017 para agua para la categoría 1 - A2 (0 a 10 mg/L), se observa que 1 (33 %) de los registros no cumplen con el valor establecido."
    );
}

#[test]
fn surface_default_selection_combines_irrigation_and_livestock() {
    let dataset = prepare_dataset(&lead_rows(), &surface_table());
    let selected = Module::Surface.default_selection(&dataset.groups());
    assert_eq!(
        selected,
        selection(&["lim_sup_eca_2017_3d1", "lim_sup_eca_2017_3d2"])
    );

    let text = generate_narrative(
        &dataset,
        "Plomo",
        Module::Surface,
        &selected,
        &surface_water().unwrap(),
        &ReportConfig::default(),
    )
    .unwrap();
    assert!(text.ends_with(
        " Al comparar los resultados obtenidos con el ECA 2017 para agua para la categoría 3 – D1 (0,05 mg/L) y 3 - D2 (0,05 mg/L), se observa que todos los registros no cumplen con el ECA 2017."
    ));
}

#[test]
fn unmatched_parameter_is_not_applicable() {
    let dataset = prepare_dataset(&lead_rows(), &surface_table());
    let text = generate_narrative(
        &dataset,
        "Cadmio",
        Module::Surface,
        &selection(&["lim_sup_eca_2017_1a2"]),
        &surface_water().unwrap(),
        &ReportConfig::default(),
    )
    .unwrap();
    assert!(text.contains("mínimo igual a 0,001 mg/L"), "{text}");
    assert!(text.ends_with(
        " Cabe mencionar que no existe un ECA 2017 para agua para la categoría 1 - A2 (aguas que pueden ser potabilizadas con tratamiento convencional) aplicable para este parámetro."
    ));
}

#[test]
fn parameter_without_records_is_an_error() {
    let dataset = prepare_dataset(&lead_rows(), &surface_table());
    let err = generate_narrative(
        &dataset,
        "Mercurio",
        Module::Surface,
        &[],
        &surface_water().unwrap(),
        &ReportConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, CalidadError::UnknownParameter(ref p) if p == "Mercurio"));
}

#[test]
fn all_below_detection_limit_lists_limits() {
    let rows = vec![
        measurement("Plomo", "mg/L", "E-1", RawCell::from("<1")),
        measurement("Plomo", "mg/L", "E-2", RawCell::from("<1")),
        measurement("Plomo", "mg/L", "E-3", RawCell::from("<2")),
    ];
    let dataset = prepare_dataset(&rows, &surface_table());
    let text = generate_narrative(
        &dataset,
        "Plomo",
        Module::Surface,
        &[],
        &surface_water().unwrap(),
        &ReportConfig::default(),
    )
    .unwrap();
    assert_eq!(
        text,
        "Como se observa en el gráfico, los valores de Plomo registrados en todas las estaciones se encontraron por debajo del límite de detección (1, 2 mg/L)."
    );
}

#[test]
fn narrative_is_deterministic() {
    let catalog = surface_water().unwrap();
    let config = ReportConfig::default();
    let columns = selection(&[
        "lim_sup_eca_2017_3d1",
        "lim_inf_eca_2017_1a2",
        "lim_sup_eca_2017_1a2",
        "lim_sup_eca_2017_3d2",
    ]);

    let render = || {
        let dataset = prepare_dataset(&lead_rows(), &surface_table());
        generate_narrative(&dataset, "Plomo", Module::Surface, &columns, &catalog, &config)
            .unwrap()
    };
    assert_eq!(render(), render());
}

#[test]
fn decimal_point_configuration() {
    let dataset = prepare_dataset(&lead_rows(), &surface_table());
    let config = ReportConfig {
        number_format: NumberFormat {
            decimal_separator: '.',
            thousands_separator: None,
        },
        ..ReportConfig::default()
    };
    let text = generate_narrative(
        &dataset,
        "Cadmio",
        Module::Surface,
        &[],
        &surface_water().unwrap(),
        &config,
    )
    .unwrap();
    assert!(text.contains("0.001 mg/L"), "{text}");
}

// ---------------------------------------------------------------------------
// Effluents
// ---------------------------------------------------------------------------

#[test]
fn effluents_connectives() {
    let rows = vec![
        measurement("Zinc", "mg/L", "EF-1", RawCell::Number(0.5)),
        measurement("Zinc", "mg/L", "EF-2", RawCell::Number(2.0)),
    ];
    let table = regulation(
        &["parametro", "unidad", "lim_sup_nmp_minero", "lim_sup_lmp_2010_minero"],
        vec![(
            "Zinc",
            "mg/L",
            vec![
                RawCell::from("Zinc"),
                RawCell::from("mg/L"),
                RawCell::Number(3.0),
                RawCell::Number(1.5),
            ],
        )],
    );
    let dataset = prepare_dataset(&rows, &table);
    let selected = Module::Effluents.default_selection(&dataset.groups());

    let text = generate_narrative(
        &dataset,
        "Zinc",
        Module::Effluents,
        &selected,
        &surface_water().unwrap(),
        &ReportConfig::default(),
    )
    .unwrap();
    assert!(text.ends_with(
        " Al comparar los resultados obtenidos con el NMP 1996 para efluentes minero-metalúrgicos (3 mg/L), se observa que todos los registros cumplen con el NMP. Por otro lado, al comparar los resultados obtenidos con el LMP 2010 para efluentes minero-metalúrgicos (1,5 mg/L), se observa que 1 (50 %) de los registros no cumplen con el valor establecido."
    ), "{text}");
}

// ---------------------------------------------------------------------------
// Groundwater
// ---------------------------------------------------------------------------

#[test]
fn groundwater_reference_column_and_narrative() {
    let rows = vec![
        measurement("Hierro", "mg/L", "PZ-1", RawCell::Number(1.0)),
        measurement("Hierro", "mg/L", "PZ-2", RawCell::Number(2.0)),
        measurement("Hierro", "mg/L", "PZ-3", RawCell::Number(3.0)),
    ];
    let mut dataset = prepare_dataset(&rows, &RegulationTable::default());
    annotate_groundwater_reference(&mut dataset);

    let record = &dataset.records[0];
    assert_eq!(dataset.threshold(record, REFERENCE_COLUMN), Some(4.0));
    // The reference column is not a regulation group.
    assert!(dataset.groups().is_empty());

    let text = generate_narrative(
        &dataset,
        "Hierro",
        Module::Groundwater,
        &[],
        &surface_water().unwrap(),
        &ReportConfig::default(),
    )
    .unwrap();
    assert!(text.ends_with(
        "valor de referencia el promedio más dos veces la desviación estándar (4 mg/L). Al realizar la comparación, se observa que todos los registros se encuentran por debajo del valor de referencia alto."
    ), "{text}");
}

// ---------------------------------------------------------------------------
// Sediments
// ---------------------------------------------------------------------------

#[test]
fn sediments_from_legacy_column_spelling() {
    let rows = vec![
        measurement("Cobre", "mg/kg", "SED-1", RawCell::Number(20.0)),
        measurement("Cobre", "mg/kg", "SED-2", RawCell::Number(40.0)),
    ];
    let table = regulation(
        &["parametro", "unidad", "ISGQ_freshwater", "PEL_freshwater"],
        vec![(
            "Cobre",
            "mg/kg",
            vec![
                RawCell::from("Cobre"),
                RawCell::from("mg/kg"),
                RawCell::Number(35.7),
                RawCell::Number(197.0),
            ],
        )],
    );
    let dataset = prepare_dataset(&rows, &table);
    let selected = Module::Sediments.default_selection(&dataset.groups());
    let text = generate_narrative(
        &dataset,
        "Cobre",
        Module::Sediments,
        &selected,
        &surface_water().unwrap(),
        &ReportConfig::default(),
    )
    .unwrap();
    assert!(text.ends_with(
        " Al comparar los resultados obtenidos con el ISQG (35,7 mg/kg), se observa que 1 (50 %) de los registros exceden el valor establecido. Al comparar los resultados obtenidos con el PEL (197 mg/kg), se observa que todos los registros cumplen con el valor establecido."
    ), "{text}");
}

// ---------------------------------------------------------------------------
// Saved datasets
// ---------------------------------------------------------------------------

#[test]
fn saved_dataset_renders_identically() {
    let dataset = prepare_dataset(&lead_rows(), &surface_table());
    let json = serde_json::to_string(&dataset).unwrap();
    let restored: calidad_core::dataset::MergedDataset = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.dropped, 1);
    assert_eq!(restored.columns, dataset.columns);

    let catalog = surface_water().unwrap();
    let config = ReportConfig::default();
    let columns = Module::Surface.default_selection(&dataset.groups());
    let a = generate_narrative(&dataset, "Plomo", Module::Surface, &columns, &catalog, &config)
        .unwrap();
    let b = generate_narrative(&restored, "Plomo", Module::Surface, &columns, &catalog, &config)
        .unwrap();
    assert_eq!(a, b);
}
