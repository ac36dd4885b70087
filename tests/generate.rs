use std::path::Path;

use oapi_ts_generator::{
    emitter::{API_FILE, CONFIG_FILE, CONFIG_TEMPLATE, MODELS_FILE, REQUEST_FILE, REQUEST_TEMPLATE},
    GenerateConfig, GenerateError,
};

const PETSTORE: &str = include_str!("fixtures/petstore.json");

fn read(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(name)).unwrap()
}

#[tokio::test]
async fn generates_petstore_client() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("petstore.json");
    std::fs::write(&input, PETSTORE).unwrap();
    let out_dir = dir.path().join("api");

    let config = GenerateConfig::new(input.to_str().unwrap(), &out_dir);
    oapi_ts_generator::run(&config).await.unwrap();

    let models = read(&out_dir, MODELS_FILE);
    let declarations: Vec<_> = models
        .lines()
        .filter(|line| line.starts_with("export "))
        .collect();
    assert_eq!(
        declarations,
        [
            "export class Pet {",
            "export enum Status {",
            "export type Pets = Pet[];",
            "export type Priority = 1 | 2 | 3;",
            "export class Metadata {}",
            "export class Error {",
        ]
    );
    assert!(models.contains("    id: number;\n"));
    assert!(models.contains("    tag?: string;\n"));
    assert!(models.contains("    status?: Status;\n"));
    assert!(models.contains("    photo?: Blob;\n"));
    assert!(models.contains("        vaccinated = false,\n"));
    assert!(models.contains("     * @description Name of the pet\n"));
    assert!(models.contains("    available = 'available',\n"));

    let api = read(&out_dir, API_FILE);
    assert!(api.starts_with("import { Request } from './request';\nimport * as Models from './models';\n"));
    assert!(api.contains("export class Pets {"));
    assert!(api.contains("export class Admin {"));
    assert!(api.contains("        query: { limit?: number; status?: Models.Status };\n"));
    assert!(api.contains("        body: Models.Pet;\n"));
    assert!(api.contains("        path: { petId: number };\n"));
    assert!(api.contains("        header: { 'X-Request-Id'?: string };\n"));
    assert!(api.contains("            url: `/pets/${path.petId}`,\n"));
    assert_eq!(api.matches("static showPetById(").count(), 2);

    assert_eq!(read(&out_dir, REQUEST_FILE), REQUEST_TEMPLATE);
    assert_eq!(read(&out_dir, CONFIG_FILE), CONFIG_TEMPLATE);
}

#[tokio::test]
async fn regeneration_keeps_customized_config() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("petstore.json");
    std::fs::write(&input, PETSTORE).unwrap();
    let config = GenerateConfig::new(input.to_str().unwrap(), dir.path());

    oapi_ts_generator::run(&config).await.unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE), "// my interceptors\n").unwrap();
    oapi_ts_generator::run(&config).await.unwrap();

    assert_eq!(read(dir.path(), CONFIG_FILE), "// my interceptors\n");
}

#[tokio::test]
async fn invalid_document_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.json");
    std::fs::write(
        &input,
        r#"{
            "openapi": "3.0.0",
            "components": { "schemas": { "Id": { "type": "integer" } } },
            "paths": { "/things": { "get": { "tags": ["Things"] } } }
        }"#,
    )
    .unwrap();
    let out_dir = dir.path().join("out");

    let err = oapi_ts_generator::run(&GenerateConfig::new(input.to_str().unwrap(), &out_dir))
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<GenerateError>(),
        Some(GenerateError::MissingOperationId { .. })
    ));
    assert!(!out_dir.exists());
}

#[tokio::test]
async fn missing_version_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("noversion.yaml");
    std::fs::write(&input, "paths: {}\n").unwrap();

    let err = oapi_ts_generator::run(&GenerateConfig::new(input.to_str().unwrap(), dir.path()))
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<GenerateError>(),
        Some(GenerateError::MissingVersion)
    ));
    assert!(!dir.path().join(MODELS_FILE).exists());
}
