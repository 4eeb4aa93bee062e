//! Full analysis through the CLI connector and a scripted stand-in binary.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use claude_agent_sdk::Error as SdkError;
use claude_ai_analyzer::{
    AnalysisClient, AnalyzerConfig, AnalyzerError, DirectoryLocks, EnvCredentials, ModelCatalog,
};

const HANDSHAKE: &str = r#"#!/bin/sh
read -r line
id=$(printf '%s\n' "$line" | sed -E 's/.*"request_id":"([^"]*)".*/\1/')
printf '{"type":"control_response","response":{"subtype":"success","request_id":"%s","response":{}}}\n' "$id"
read -r prompt
"#;

const RESULT_LINE: &str = r#"printf '%s\n' '{"type":"result","subtype":"success","is_error":false,"num_turns":2,"session_id":"s1"}'
cat > /dev/null
"#;

/// Copies the `--settings` file aside, then answers like the CLI would.
fn fake_cli(settings_copy: &Path, args_file: &Path) -> String {
    format!(
        r#"#!/bin/sh
printf '%s\n' "$@" > '{args}'
prev=""
for arg in "$@"; do
  if [ "$prev" = "--settings" ]; then cp "$arg" '{copy}'; fi
  prev="$arg"
done
read -r line
id=$(printf '%s\n' "$line" | sed -E 's/.*"request_id":"([^"]*)".*/\1/')
printf '{{"type":"control_response","response":{{"subtype":"success","request_id":"%s","response":{{}}}}}}\n' "$id"
read -r prompt
printf '%s\n' '{{"type":"assistant","message":{{"model":"m","content":[{{"type":"text","text":"{{\"summary\":"}}]}}}}'
printf '%s\n' '{{"type":"assistant","message":{{"model":"m","content":[{{"type":"tool_use","id":"t1","name":"Glob","input":{{"pattern":"**/*.rs"}}}}]}}}}'
printf '%s\n' '{{"type":"assistant","message":{{"model":"m","content":[{{"type":"text","text":"\"ok\"}}"}}]}}}}'
printf '%s\n' '{{"type":"result","subtype":"success","is_error":false,"num_turns":3,"session_id":"s1"}}'
cat > /dev/null
"#,
        args = args_file.display(),
        copy = settings_copy.display(),
    )
}

fn install(dir: &Path, script: &str) -> PathBuf {
    let path = dir.join("claude");
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[tokio::test]
async fn test_analysis_through_scripted_cli() {
    let bin_dir = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    let settings_copy = bin_dir.path().join("settings-copy.json");
    let args_file = bin_dir.path().join("args.txt");
    let cli = install(bin_dir.path(), &fake_cli(&settings_copy, &args_file));

    assert!(claude_agent_sdk::probe_cli(Some(cli.as_path())));

    let client = AnalysisClient::builder(project.path(), true)
        .language("ja")
        .credentials(EnvCredentials::with_lookup(|_| Some("token".to_string())))
        .config(AnalyzerConfig::default().with_model("haiku").with_cli_path(&cli))
        .models(ModelCatalog::new())
        .locks(DirectoryLocks::new())
        .build()
        .unwrap();

    let text = client.run_analysis_query("Summarize").await.unwrap();
    assert_eq!(text, "{\"summary\":\"ok\"}");

    let settings: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&settings_copy).unwrap()).unwrap();
    assert_eq!(settings["permissions"]["defaultMode"], "acceptEdits");
    assert_eq!(settings["sandbox"]["enabled"], true);

    let args = std::fs::read_to_string(&args_file).unwrap();
    let args: Vec<&str> = args.lines().collect();
    assert!(args.contains(&"claude-haiku-4-5-20251001"));
    assert!(args.contains(&"Read,Glob,Grep"));
    assert!(args.contains(&"50"));
    assert!(args.iter().any(|arg| arg.contains("in Japanese.")));

    let leftovers: Vec<_> = std::fs::read_dir(project.path()).unwrap().collect();
    assert!(leftovers.is_empty());
}

fn client_for(project: &Path, cli: &Path) -> AnalysisClient {
    AnalysisClient::builder(project, true)
        .credentials(EnvCredentials::with_lookup(|_| Some("token".to_string())))
        .config(AnalyzerConfig::default().with_cli_path(cli))
        .models(ModelCatalog::new())
        .locks(DirectoryLocks::new())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_assistant_error_code_does_not_drop_text() {
    let bin_dir = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    let reply = r#"printf '%s\n' '{"type":"assistant","message":{"model":"m","content":[{"type":"text","text":"A"}]},"error":"overloaded"}'
printf '%s\n' '{"type":"assistant","message":{"model":"m","content":[{"type":"text","text":"B"}]}}'
"#;
    let cli = install(bin_dir.path(), &format!("{}{}{}", HANDSHAKE, reply, RESULT_LINE));

    let text = client_for(project.path(), &cli)
        .run_analysis_query("Summarize")
        .await
        .unwrap();
    assert_eq!(text, "AB");
}

#[tokio::test]
async fn test_undecodable_assistant_line_fails_the_analysis() {
    let bin_dir = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    let reply = r#"printf '%s\n' '{"type":"assistant","message":{"model":"m","content":42}}'
printf '%s\n' '{"type":"assistant","message":{"model":"m","content":[{"type":"text","text":"B"}]}}'
"#;
    let cli = install(bin_dir.path(), &format!("{}{}{}", HANDSHAKE, reply, RESULT_LINE));

    let err = client_for(project.path(), &cli)
        .run_analysis_query("Summarize")
        .await
        .unwrap_err();
    assert!(matches!(err, AnalyzerError::Agent(SdkError::Json(_))));

    let leftovers: Vec<_> = std::fs::read_dir(project.path()).unwrap().collect();
    assert!(leftovers.is_empty());
}
