use soriamap_core::{
    AddPoiRequest, Category, ImportDisposition, ImportError, MemoryKeyValueStore, MemoryMap, Poi,
    PoiApp, ServiceError,
};

fn fresh_app() -> PoiApp<MemoryKeyValueStore, MemoryMap> {
    PoiApp::bootstrap(MemoryKeyValueStore::new(), MemoryMap::new()).unwrap()
}

fn app_with(pois: &[Poi]) -> PoiApp<MemoryKeyValueStore, MemoryMap> {
    let mut app = fresh_app();
    let document = serde_json::to_string(pois).unwrap();
    app.import(&document, ImportDisposition::Replace).unwrap();
    app
}

fn sample(id: &str, name: &str, category: Category) -> Poi {
    Poi::with_id(
        id,
        "2025-06-01T12:00:00.000Z",
        name,
        "",
        category,
        41.7,
        -2.4,
    )
}

#[test]
fn export_of_empty_collection_is_a_warning_noop() {
    let app = fresh_app();
    let err = app.export().unwrap_err();
    assert!(matches!(err, ServiceError::EmptyExport));
}

#[test]
fn export_is_pretty_printed_and_dated() {
    let mut app = fresh_app();
    app.select_location(41.76, -2.46);
    app.add_poi(AddPoiRequest {
        name: "Bache grande".to_string(),
        description: String::new(),
        category: Category::Pothole,
    })
    .unwrap();

    let document = app.export().unwrap();
    assert!(document.filename.starts_with("soria-pois-"));
    assert!(document.filename.ends_with(".json"));
    // 2-space indentation of the pretty printer.
    assert!(document.json.contains("\n  {"));

    let decoded: Vec<Poi> = serde_json::from_str(&document.json).unwrap();
    assert_eq!(decoded, app.pois());
}

#[test]
fn import_replace_of_an_export_round_trips() {
    let original = app_with(&[
        sample("10", "Señal caída", Category::Signal),
        sample("11", "Obra nocturna", Category::Roadwork),
    ]);
    let document = original.export().unwrap();

    let mut restored = fresh_app();
    let outcome = restored
        .import(&document.json, ImportDisposition::Replace)
        .unwrap();

    assert_eq!(outcome.input_count, 2);
    assert_eq!(outcome.applied_count, 2);

    let mut original_ids: Vec<&str> = original.pois().iter().map(|p| p.id.as_str()).collect();
    let mut restored_ids: Vec<&str> = restored.pois().iter().map(|p| p.id.as_str()).collect();
    original_ids.sort_unstable();
    restored_ids.sort_unstable();
    assert_eq!(original_ids, restored_ids);
    assert_eq!(restored.markers().len(), 2);
}

#[test]
fn merge_skips_duplicates_and_keeps_existing_record() {
    let mut app = app_with(&[sample("x", "B", Category::Other)]);

    let document = r#"[{"id":"x","name":"A","category":"otro","lat":1,"lng":1}]"#;
    let outcome = app.import(document, ImportDisposition::Merge).unwrap();

    assert_eq!(outcome.input_count, 1);
    assert_eq!(outcome.applied_count, 0);
    assert_eq!(outcome.success_message(), "Importados 0 puntos de interés correctamente");
    assert_eq!(app.find_poi("x").unwrap().name, "B");
    assert_eq!(app.pois().len(), 1);
    assert_eq!(app.markers().len(), 1);
}

#[test]
fn merge_appends_unseen_records_and_their_markers() {
    let mut app = app_with(&[sample("x", "B", Category::Other)]);

    let document = r#"[
        {"id":"x","name":"A","category":"otro","lat":1,"lng":1},
        {"id":"y","name":"C","category":"señal","lat":41.7,"lng":-2.4,"date":"2025-06-02T12:00:00.000Z"}
    ]"#;
    let outcome = app.import(document, ImportDisposition::Merge).unwrap();

    assert_eq!(outcome.input_count, 2);
    assert_eq!(outcome.applied_count, 1);
    assert_eq!(app.pois().len(), 2);
    assert!(app.markers().contains("y"));
    assert_eq!(app.find_poi("y").unwrap().category, Category::Signal);
}

#[test]
fn replace_discards_previous_collection_and_markers() {
    let mut app = app_with(&[
        sample("old-1", "Antiguo", Category::Accident),
        sample("old-2", "Más antiguo", Category::Other),
    ]);

    let document = r#"[{"id":"new","name":"Nuevo","category":"obra","lat":41.7,"lng":-2.4}]"#;
    app.import(document, ImportDisposition::Replace).unwrap();

    assert_eq!(app.pois().len(), 1);
    assert!(app.find_poi("old-1").is_none());
    assert_eq!(app.markers().len(), 1);
    assert!(app.markers().contains("new"));
    assert_eq!(app.map().marker_count(), 1);
}

#[test]
fn one_invalid_record_aborts_the_whole_import() {
    let mut app = app_with(&[sample("kept", "Se queda", Category::Other)]);

    let document = r#"[
        {"id":"a","name":"válido","category":"otro","lat":1,"lng":1},
        {"id":"","name":"sin id","category":"otro","lat":1,"lng":1}
    ]"#;
    let err = app.import(document, ImportDisposition::Merge).unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Import(ImportError::InvalidRecord(_))
    ));
    assert_eq!(app.pois().len(), 1);
    assert_eq!(app.markers().len(), 1);
}

#[test]
fn non_array_document_is_rejected() {
    let mut app = fresh_app();
    let err = app
        .import(r#"{"not":"an array"}"#, ImportDisposition::Merge)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Import(ImportError::NotAnArray)));
}

#[test]
fn malformed_json_is_rejected() {
    let mut app = fresh_app();
    let err = app.import("[{", ImportDisposition::Merge).unwrap_err();
    assert!(matches!(err, ServiceError::Import(ImportError::Parse(_))));
}

#[test]
fn unknown_category_token_imports_as_otro() {
    let mut app = fresh_app();
    let document = r#"[{"id":"u","name":"Raro","category":"desconocida","lat":1,"lng":1}]"#;
    app.import(document, ImportDisposition::Merge).unwrap();
    assert_eq!(app.find_poi("u").unwrap().category, Category::Other);
}
