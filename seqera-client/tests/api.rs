mod common;

use axum::http::Method;
use common::MockApi;
use serde_json::json;

use seqera_client::{ClientError, SeqeraClient};
use seqera_core::domain::pipeline::Launch;
use seqera_core::dto::Page;
use seqera_core::dto::label::CreateLabel;

fn pipeline_json(id: i64) -> serde_json::Value {
    json!({ "pipelineId": id, "name": format!("pipeline-{}", id) })
}

#[tokio::test]
async fn test_user_info_sends_bearer_token() {
    let api = MockApi::new();
    api.on(
        Method::GET,
        "/user-info",
        200,
        json!({ "user": { "id": 7, "userName": "jdoe", "email": "jdoe@example.com" } }),
    );
    let client = SeqeraClient::new(api.start().await).with_token("secret-token");

    let user = client.user().info().await.unwrap();

    assert_eq!(user.id, 7);
    assert_eq!(user.user_name, "jdoe");
    let seen = api.seen_at(Method::GET, "/user-info");
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer secret-token"));
}

#[tokio::test]
async fn test_pipeline_list_forwards_workspace_search_and_page() {
    let api = MockApi::new();
    api.on(
        Method::GET,
        "/pipelines",
        200,
        json!({ "pipelines": [pipeline_json(1)], "totalSize": 12 }),
    );
    let client = SeqeraClient::new(api.start().await).with_token("t");

    let page = client
        .pipelines()
        .list(Some(42), Some("rna"), Page::new(10, 20))
        .await
        .unwrap();

    assert_eq!(page.total_size, 12);
    assert_eq!(page.items[0].name, "pipeline-1");

    let seen = &api.seen_at(Method::GET, "/pipelines")[0];
    assert_eq!(seen.query_value("workspaceId"), Some("42"));
    assert_eq!(seen.query_value("search"), Some("rna"));
    assert_eq!(seen.query_value("max"), Some("10"));
    assert_eq!(seen.query_value("offset"), Some("20"));
}

#[tokio::test]
async fn test_pipeline_list_all_follows_pages() {
    let api = MockApi::new();
    let first: Vec<_> = (0..100).map(pipeline_json).collect();
    api.on_query(
        Method::GET,
        "/pipelines",
        ("offset", "0"),
        200,
        json!({ "pipelines": first, "totalSize": 101 }),
    );
    api.on_query(
        Method::GET,
        "/pipelines",
        ("offset", "100"),
        200,
        json!({ "pipelines": [pipeline_json(100)], "totalSize": 101 }),
    );
    let client = SeqeraClient::new(api.start().await);

    let all = client.pipelines().list_all(None, None).await.unwrap();

    assert_eq!(all.len(), 101);
    assert_eq!(all[100].pipeline_id, 100);
    let seen = api.seen_at(Method::GET, "/pipelines");
    assert_eq!(seen.len(), 2);
    assert!(seen.iter().all(|s| s.query_value("workspaceId").is_none()));
}

#[tokio::test]
async fn test_error_statuses_are_classified() {
    let api = MockApi::new();
    api.on(
        Method::GET,
        "/pipelines/1",
        404,
        json!({ "message": "Pipeline not found" }),
    );
    api.on(Method::GET, "/user-info", 401, json!({ "message": "Unauthorized" }));
    api.on_raw(Method::GET, "/service-info", 500, &[], "database down");
    let client = SeqeraClient::new(api.start().await).with_token("bad");

    let err = client.pipelines().get(1, None).await.unwrap_err();
    assert!(matches!(&err, ClientError::NotFound(msg) if msg == "Pipeline not found"));

    let err = client.user().info().await.unwrap_err();
    assert!(err.is_auth_error());
    assert_eq!(err.status(), Some(401));

    let err = client.user().service_info().await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database down");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_parse_error() {
    let api = MockApi::new();
    api.on_raw(
        Method::GET,
        "/user-info",
        200,
        &[("content-type", "application/json")],
        "{not json",
    );
    let client = SeqeraClient::new(api.start().await);

    let err = client.user().info().await.unwrap_err();
    assert!(matches!(err, ClientError::ParseError(_)));
}

#[tokio::test]
async fn test_launch_posts_launch_body() {
    let api = MockApi::new();
    api.on(
        Method::POST,
        "/workflow/launch",
        200,
        json!({ "workflowId": "run-1" }),
    );
    let client = SeqeraClient::new(api.start().await);

    let launch = Launch {
        pipeline: "https://github.com/nextflow-io/hello".to_string(),
        compute_env_id: Some("ce-1".to_string()),
        work_dir: Some("s3://bucket/work".to_string()),
        ..Default::default()
    };
    let id = client.runs().launch(Some(5), launch).await.unwrap();

    assert_eq!(id, "run-1");
    let seen = &api.seen_at(Method::POST, "/workflow/launch")[0];
    assert_eq!(seen.query_value("workspaceId"), Some("5"));
    let body = seen.json();
    assert_eq!(body["launch"]["pipeline"], "https://github.com/nextflow-io/hello");
    assert_eq!(body["launch"]["computeEnvId"], "ce-1");
    assert_eq!(body["launch"]["workDir"], "s3://bucket/work");
}

#[tokio::test]
async fn test_relaunch_with_resume_reuses_session() {
    let api = MockApi::new();
    api.on(
        Method::GET,
        "/workflow/abc",
        200,
        json!({
            "workflow": {
                "id": "abc",
                "runName": "happy_turing",
                "status": "FAILED",
                "sessionId": "session-1",
                "commitId": "c0ffee"
            }
        }),
    );
    api.on(
        Method::GET,
        "/workflow/abc/launch",
        200,
        json!({
            "launch": {
                "id": "launch-1",
                "pipeline": "nf-core/rnaseq",
                "computeEnv": { "id": "ce-9", "name": "aws", "platform": "aws-batch" },
                "workDir": "s3://bucket/work"
            }
        }),
    );
    api.on(
        Method::POST,
        "/workflow/launch",
        200,
        json!({ "workflowId": "def" }),
    );
    let client = SeqeraClient::new(api.start().await);

    let id = client.runs().relaunch("abc", Some(3), true).await.unwrap();

    assert_eq!(id, "def");
    let body = api.seen_at(Method::POST, "/workflow/launch")[0].json();
    let launch = &body["launch"];
    assert_eq!(launch["resume"], true);
    assert_eq!(launch["sessionId"], "session-1");
    assert_eq!(launch["revision"], "c0ffee");
    assert_eq!(launch["computeEnvId"], "ce-9");
    assert!(launch.get("computeEnv").is_none());
    assert!(launch.get("id").is_none());
}

#[tokio::test]
async fn test_cancel_posts_without_body() {
    let api = MockApi::new();
    api.on_raw(Method::POST, "/workflow/abc/cancel", 204, &[], "");
    let client = SeqeraClient::new(api.start().await);

    client.runs().cancel("abc", Some(1)).await.unwrap();

    let seen = &api.seen_at(Method::POST, "/workflow/abc/cancel")[0];
    assert!(seen.body.is_empty());
    assert_eq!(seen.query_value("workspaceId"), Some("1"));
}

#[tokio::test]
async fn test_run_ids_are_encoded_as_one_segment() {
    let api = MockApi::new();
    api.on_raw(Method::POST, "/workflow/a%2Fb%3Fx%23y/cancel", 204, &[], "");
    api.on_raw(Method::DELETE, "/workflow/..%2Fpipelines", 204, &[], "");
    let client = SeqeraClient::new(api.start().await);

    client.runs().cancel("a/b?x#y", None).await.unwrap();
    client.runs().delete("../pipelines", None).await.unwrap();

    let seen = &api.seen_at(Method::POST, "/workflow/a%2Fb%3Fx%23y/cancel")[0];
    assert!(seen.query.is_empty());
    assert_eq!(api.seen_at(Method::DELETE, "/workflow/..%2Fpipelines").len(), 1);
}

#[tokio::test]
async fn test_label_add_marks_resource_labels() {
    let api = MockApi::new();
    api.on(
        Method::POST,
        "/labels",
        200,
        json!({ "id": 11, "name": "env", "value": "prod", "resource": true }),
    );
    let client = SeqeraClient::new(api.start().await);

    let label = client
        .labels()
        .add(Some(2), &CreateLabel::new("env", Some("prod".to_string()), false))
        .await
        .unwrap();

    assert_eq!(label.to_string(), "env=prod");
    let body = api.seen_at(Method::POST, "/labels")[0].json();
    assert_eq!(body["resource"], true);
    assert_eq!(body["isDefault"], false);
}

#[tokio::test]
async fn test_workspace_delete_targets_org_path() {
    let api = MockApi::new();
    api.on_raw(Method::DELETE, "/orgs/4/workspaces/9", 204, &[], "");
    let client = SeqeraClient::new(api.start().await);

    client.workspaces().delete(4, 9).await.unwrap();

    assert_eq!(api.seen_at(Method::DELETE, "/orgs/4/workspaces/9").len(), 1);
}

#[tokio::test]
async fn test_dataset_upload_sends_multipart_file() {
    let api = MockApi::new();
    api.on(
        Method::POST,
        "/datasets/ds-1/upload",
        200,
        json!({
            "version": {
                "datasetId": "ds-1",
                "version": 2,
                "hasHeader": true,
                "fileName": "samples.csv",
                "mediaType": "text/csv"
            }
        }),
    );
    let client = SeqeraClient::new(api.start().await);

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("samples.csv");
    std::fs::write(&file, "sample,fastq\nA,a.fq\n").unwrap();

    let version = client
        .datasets()
        .upload("ds-1", Some(8), &file, true)
        .await
        .unwrap();

    assert_eq!(version.version, 2);
    let seen = &api.seen_at(Method::POST, "/datasets/ds-1/upload")[0];
    assert_eq!(seen.query_value("header"), Some("true"));
    assert!(
        seen.content_type
            .as_deref()
            .unwrap()
            .starts_with("multipart/form-data")
    );
    let body = seen.text();
    assert!(body.contains("filename=\"samples.csv\""));
    assert!(body.contains("sample,fastq\nA,a.fq\n"));
}

#[tokio::test]
async fn test_data_link_browse_all_follows_tokens() {
    let api = MockApi::new();
    api.on_query(
        Method::GET,
        "/data-links/dl-1/browse/reads",
        ("nextPageToken", "page-2"),
        200,
        json!({ "objects": [{ "type": "FILE", "name": "b.fq", "size": 2 }] }),
    );
    api.on(
        Method::GET,
        "/data-links/dl-1/browse/reads",
        200,
        json!({
            "objects": [{ "type": "FILE", "name": "a.fq", "size": 1 }],
            "nextPageToken": "page-2"
        }),
    );
    let client = SeqeraClient::new(api.start().await);

    let items = client
        .data_links()
        .browse_all("dl-1", Some(1), Some("cred-1"), "reads")
        .await
        .unwrap();

    let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["a.fq", "b.fq"]);
    let seen = api.seen_at(Method::GET, "/data-links/dl-1/browse/reads");
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].query_value("credentialsId"), Some("cred-1"));
}
