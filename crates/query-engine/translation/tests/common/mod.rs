use std::fs;
use std::path::PathBuf;

use query_engine_translation::translation;
use query_engine_translation::translation::parameters::QueryParameters;

/// The entity every golden configuration describes.
const ENTITY: &str = "doctor";

/// Translate the request of a golden test against the configuration next to it.
pub async fn test_translation(testname: &str) -> anyhow::Result<serde_json::Value> {
    let _ = env_logger::builder().is_test(true).try_init();

    let directory = PathBuf::from("tests/goldenfiles").join(testname);

    let parsed_configuration = query_compiler_configuration::parse_configuration(&directory).await?;
    let configuration =
        query_compiler_configuration::make_runtime_configuration(parsed_configuration)?;

    let parameters: QueryParameters =
        serde_json::from_str(&fs::read_to_string(directory.join("request.json")).unwrap())
            .unwrap();

    let plan =
        translation::query::translate_for_entity(&configuration.metadata, ENTITY, &parameters)?;
    Ok(serde_json::to_value(plan)?)
}

/// The plan a golden test is expected to produce.
pub fn expected_plan(testname: &str) -> serde_json::Value {
    let path = PathBuf::from("tests/goldenfiles")
        .join(testname)
        .join("expected.json");
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}
