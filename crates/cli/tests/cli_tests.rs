use similar_asserts::assert_eq;

use query_compiler_cli::{run, Command, Context};
use query_compiler_configuration::{
    generate_latest_schema, parse_configuration, write_parsed_configuration, ParsedConfiguration,
    CONFIGURATION_JSONSCHEMA_FILENAME,
};
use query_engine_metadata::metadata::{EntitiesInfo, QueryConfig};

async fn run_in(directory: &tempfile::TempDir, command: Command) -> anyhow::Result<String> {
    let context = Context {
        context_path: directory.path().to_owned(),
    };
    let mut output = Vec::new();
    run(command, &context, &mut output).await?;
    Ok(String::from_utf8(output)?)
}

#[tokio::test]
async fn initialize_writes_an_empty_configuration() {
    let directory = tempfile::tempdir().unwrap();
    run_in(&directory, Command::Initialize { force: false })
        .await
        .unwrap();

    assert_eq!(
        parse_configuration(directory.path()).await.unwrap(),
        ParsedConfiguration::initial()
    );
    assert!(directory
        .path()
        .join(CONFIGURATION_JSONSCHEMA_FILENAME)
        .exists());
}

#[tokio::test]
async fn initialize_does_not_overwrite_without_force() {
    let directory = tempfile::tempdir().unwrap();
    run_in(&directory, Command::Initialize { force: false })
        .await
        .unwrap();

    let error = run_in(&directory, Command::Initialize { force: false })
        .await
        .unwrap_err();
    assert!(error.to_string().contains("--force"), "{error}");

    run_in(&directory, Command::Initialize { force: true })
        .await
        .unwrap();
}

#[tokio::test]
async fn schema_prints_the_configuration_schema() {
    let directory = tempfile::tempdir().unwrap();
    let output = run_in(&directory, Command::Schema).await.unwrap();
    let printed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(
        printed,
        serde_json::to_value(generate_latest_schema()).unwrap()
    );
}

async fn configure_doctor(directory: &tempfile::TempDir) {
    let configuration = ParsedConfiguration {
        entities: EntitiesInfo(
            [(
                "doctor".into(),
                QueryConfig::new(["name"], ["gender", "patient.name"]).with_max_limit(20),
            )]
            .into_iter()
            .collect(),
        ),
        ..ParsedConfiguration::initial()
    };
    write_parsed_configuration(configuration, directory.path())
        .await
        .unwrap();
}

#[tokio::test]
async fn compile_prints_the_query_plan() {
    let directory = tempfile::tempdir().unwrap();
    configure_doctor(&directory).await;

    let output = run_in(
        &directory,
        Command::Compile {
            entity: "doctor".to_string(),
            query: "searchTerm=ann&gender=FEMALE&patient.name=Bo&role=ADMIN&limit=50".to_string(),
        },
    )
    .await
    .unwrap();

    let plan: serde_json::Value = serde_json::from_str(&output).unwrap();
    let conditions = serde_json::json!({
        "OR": [{ "name": { "contains": "ann", "mode": "insensitive" } }],
        "gender": "FEMALE",
        "patient": { "name": "Bo" }
    });
    assert_eq!(
        plan,
        serde_json::json!({
            "query": {
                "where": conditions,
                "include": {},
                "orderBy": { "createdAt": "desc" },
                "skip": 0,
                "take": 20
            },
            "count": { "where": conditions },
            "page": 1
        })
    );
}

#[tokio::test]
async fn compile_reports_unknown_entities() {
    let directory = tempfile::tempdir().unwrap();
    configure_doctor(&directory).await;

    let error = run_in(
        &directory,
        Command::Compile {
            entity: "nurse".to_string(),
            query: String::new(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(error.to_string(), "Entity 'nurse' not found.");
}

#[tokio::test]
async fn compile_needs_a_configuration() {
    let directory = tempfile::tempdir().unwrap();
    let result = run_in(
        &directory,
        Command::Compile {
            entity: "doctor".to_string(),
            query: String::new(),
        },
    )
    .await;
    assert!(result.is_err());
}
