//! 解析ワークフロー + HTTPクライアントの結合テスト
//!
//! ローカルに立てたモック解析サーバーに対して、選択 → 送信 → 結果/エラー → リセット
//! の各シナリオを検証する

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
    Router,
};
use skin_eval::analyzer::HttpAnalyzer;
use skin_eval::workflow::Workflow;
use skin_eval_common::{
    Alternative, AnalysisResult, Outcome, SelectedImage, WorkflowMode, WorkflowState,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, Notify};

/// 受信したmultipartパート
#[derive(Debug, Clone)]
struct ReceivedPart {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

#[derive(Clone)]
struct MockState {
    calls: Arc<AtomicUsize>,
    parts: Arc<Mutex<Vec<ReceivedPart>>>,
    status: StatusCode,
    body: String,
    /// 指定時は通知されるまでレスポンスを保留
    gate: Option<Arc<Notify>>,
    /// 1回目の呼び出しだけ500を返す
    fail_first: bool,
}

struct MockServer {
    url: String,
    state: MockState,
}

impl MockServer {
    fn calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    fn release(&self) {
        if let Some(gate) = &self.state.gate {
            gate.notify_one();
        }
    }
}

async fn handle_analyze(State(state): State<MockState>, mut multipart: Multipart) -> (StatusCode, String) {
    let call = state.calls.fetch_add(1, Ordering::SeqCst);

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        state.parts.lock().await.push(ReceivedPart {
            name,
            file_name,
            content_type,
            bytes,
        });
    }

    if let Some(gate) = &state.gate {
        gate.notified().await;
    }

    if state.fail_first && call == 0 {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"model warming up"}"#.to_string(),
        );
    }

    (state.status, state.body.clone())
}

fn mock_state(status: StatusCode, body: &str) -> MockState {
    MockState {
        calls: Arc::new(AtomicUsize::new(0)),
        parts: Arc::new(Mutex::new(Vec::new())),
        status,
        body: body.to_string(),
        gate: None,
        fail_first: false,
    }
}

async fn spawn_mock(status: StatusCode, body: &str, gated: bool) -> MockServer {
    let mut state = mock_state(status, body);
    state.gate = gated.then(|| Arc::new(Notify::new()));
    serve(state).await
}

/// 1回目は500、2回目以降は `body` を200で返すモック
async fn spawn_flaky_mock(body: &str) -> MockServer {
    let mut state = mock_state(StatusCode::OK, body);
    state.fail_first = true;
    serve(state).await
}

async fn serve(state: MockState) -> MockServer {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    let app = Router::new()
        .route("/analyze", post(handle_analyze))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockServer {
        url: format!("http://{addr}"),
        state,
    }
}

fn workflow_for(server: &MockServer) -> Workflow<HttpAnalyzer> {
    let analyzer = HttpAnalyzer::new(&server.url, Duration::from_secs(10)).expect("client");
    Workflow::new(analyzer)
}

fn jpeg(name: &str) -> SelectedImage {
    SelectedImage::new(name, "image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'])
}

/// 送信中状態になるまで待つ
async fn wait_for_submitting(workflow: &Workflow<HttpAnalyzer>, server: &MockServer) {
    for _ in 0..200 {
        if workflow.view().mode == WorkflowMode::Submitting && server.calls() == 1 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("request never reached the mock server");
}

const ECZEMA_BODY: &str = r#"{"condition":"Eczema","confidence":82,"description":"...","alternatives":[{"name":"Psoriasis","confidence":41}]}"#;

/// シナリオA: 選択 → プレビュー → 送信 → 結果
#[tokio::test]
async fn test_scenario_a_results_ready() {
    let server = spawn_mock(StatusCode::OK, ECZEMA_BODY, false).await;
    let workflow = workflow_for(&server);

    let outcome = workflow.select_and_preview(jpeg("arm.jpg")).await.expect("preview");
    assert_eq!(outcome, Outcome::Applied);
    let view = workflow.view();
    assert_eq!(view.mode, WorkflowMode::ImageSelected);
    assert!(view.preview.unwrap().as_str().starts_with("data:image/jpeg;base64,"));

    assert_eq!(workflow.submit().await.expect("submit"), Outcome::Applied);

    let expected = AnalysisResult {
        condition: "Eczema".to_string(),
        confidence: 82,
        description: "...".to_string(),
        alternatives: vec![Alternative {
            name: "Psoriasis".to_string(),
            confidence: 41,
        }],
    };
    assert_eq!(workflow.state(), WorkflowState::ResultsReady(expected));
    assert_eq!(server.calls(), 1);
}

/// multipartのパート名・ファイル名・MIMEタイプ・内容
#[tokio::test]
async fn test_request_is_single_image_part() {
    let server = spawn_mock(StatusCode::OK, ECZEMA_BODY, false).await;
    let workflow = workflow_for(&server);

    let image = jpeg("arm.jpg");
    workflow.select_image(image.clone());
    workflow.submit().await.expect("submit");

    let parts = server.state.parts.lock().await;
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].name, "image");
    assert_eq!(parts[0].file_name.as_deref(), Some("arm.jpg"));
    assert_eq!(parts[0].content_type.as_deref(), Some("image/jpeg"));
    assert_eq!(parts[0].bytes, image.bytes);
}

/// シナリオB: HTTP 500 + {"error": ...}
#[tokio::test]
async fn test_scenario_b_server_error_message() {
    let server = spawn_mock(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"model unavailable"}"#, false).await;
    let workflow = workflow_for(&server);

    workflow.select_and_preview(jpeg("arm.jpg")).await.expect("preview");
    workflow.submit().await.expect("submit");

    let view = workflow.view();
    assert_eq!(view.mode, WorkflowMode::Failed);
    assert_eq!(view.error.as_deref(), Some("model unavailable"));
    assert!(view.result.is_none());
}

/// messageフィールドが優先される
#[tokio::test]
async fn test_rejection_prefers_message_field() {
    let server = spawn_mock(
        StatusCode::BAD_REQUEST,
        r#"{"message":"Please upload a clearer photo","error":"bad_request"}"#,
        false,
    )
    .await;
    let workflow = workflow_for(&server);

    workflow.select_image(jpeg("blurry.jpg"));
    workflow.submit().await.expect("submit");
    assert_eq!(workflow.view().error.as_deref(), Some("Please upload a clearer photo"));
}

/// 本文が解釈できないエラーは固定文言
#[tokio::test]
async fn test_rejection_with_unparseable_body() {
    let server = spawn_mock(StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>", false).await;
    let workflow = workflow_for(&server);

    workflow.select_image(jpeg("arm.jpg"));
    workflow.submit().await.expect("submit");
    assert_eq!(workflow.view().error.as_deref(), Some("Failed to analyze image"));
}

/// 2xxでも形が合わなければ不正レスポンス
#[tokio::test]
async fn test_malformed_success_response() {
    let server = spawn_mock(
        StatusCode::OK,
        r#"{"condition":"Eczema","confidence":182,"description":"..."}"#,
        false,
    )
    .await;
    let workflow = workflow_for(&server);

    workflow.select_image(jpeg("arm.jpg"));
    assert_eq!(workflow.submit().await.expect("submit"), Outcome::Applied);

    let view = workflow.view();
    assert_eq!(view.mode, WorkflowMode::Failed);
    assert_eq!(
        view.error.as_deref(),
        Some("Failed to read analysis results. Please try again.")
    );
}

/// シナリオC: 画像なしの送信は通信しない
#[tokio::test]
async fn test_scenario_c_submit_without_image() {
    let server = spawn_mock(StatusCode::OK, ECZEMA_BODY, false).await;
    let workflow = workflow_for(&server);

    let err = workflow.submit().await.unwrap_err();
    assert!(err.is_precondition());
    assert_eq!(err.to_string(), "Please select an image first");
    assert_eq!(server.calls(), 0);
    assert_eq!(workflow.state(), WorkflowState::Idle);
}

/// シナリオD: Aのプレビュー完了前にBを選択
#[tokio::test]
async fn test_scenario_d_last_selection_wins() {
    let server = spawn_mock(StatusCode::OK, ECZEMA_BODY, false).await;
    let workflow = workflow_for(&server);

    let ticket_a = workflow.select_image(jpeg("a.jpg"));
    let ticket_b = workflow.select_image(SelectedImage::new("b.png", "image/png", b"\x89PNG\r\n".to_vec()));

    let (outcome_b, outcome_a) = tokio::join!(workflow.load_preview(ticket_b), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        workflow.load_preview(ticket_a).await
    });
    assert_eq!(outcome_b.unwrap(), Outcome::Applied);
    assert_eq!(outcome_a.unwrap(), Outcome::Stale);

    let view = workflow.view();
    assert_eq!(view.file_name.as_deref(), Some("b.png"));
    assert_eq!(view.preview.unwrap().as_str(), "data:image/png;base64,iVBORw0K");
}

/// 送信中の再送信は副作用なし、保留中リクエストの結果にも影響しない
#[tokio::test]
async fn test_submit_while_in_flight_is_ignored() {
    let server = spawn_mock(StatusCode::OK, ECZEMA_BODY, true).await;
    let workflow = Arc::new(workflow_for(&server));

    workflow.select_image(jpeg("arm.jpg"));
    let pending = {
        let workflow = Arc::clone(&workflow);
        tokio::spawn(async move { workflow.submit().await })
    };
    wait_for_submitting(&workflow, &server).await;

    let err = workflow.submit().await.unwrap_err();
    assert!(err.is_precondition());
    assert_eq!(err.to_string(), "An analysis is already in progress");
    assert_eq!(server.calls(), 1);

    server.release();
    let outcome = pending.await.expect("join").expect("submit");
    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(workflow.view().result.unwrap().condition, "Eczema");
    assert_eq!(server.calls(), 1);
}

/// リセット後に届いたレスポンスは破棄
#[tokio::test]
async fn test_response_after_reset_is_discarded() {
    let server = spawn_mock(StatusCode::OK, ECZEMA_BODY, true).await;
    let workflow = Arc::new(workflow_for(&server));

    workflow.select_image(jpeg("arm.jpg"));
    let pending = {
        let workflow = Arc::clone(&workflow);
        tokio::spawn(async move { workflow.submit().await })
    };
    wait_for_submitting(&workflow, &server).await;

    workflow.reset();
    server.release();

    assert_eq!(pending.await.expect("join").expect("submit"), Outcome::Stale);
    assert_eq!(workflow.state(), WorkflowState::Idle);
}

/// 新しい画像を選んだ後に届いたレスポンスは破棄
#[tokio::test]
async fn test_response_after_new_selection_is_discarded() {
    let server = spawn_mock(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"late failure"}"#, true).await;
    let workflow = Arc::new(workflow_for(&server));

    workflow.select_image(jpeg("first.jpg"));
    let pending = {
        let workflow = Arc::clone(&workflow);
        tokio::spawn(async move { workflow.submit().await })
    };
    wait_for_submitting(&workflow, &server).await;

    workflow.select_image(jpeg("second.jpg"));
    server.release();

    assert_eq!(pending.await.expect("join").expect("submit"), Outcome::Stale);
    let view = workflow.view();
    assert_eq!(view.mode, WorkflowMode::ImageSelected);
    assert_eq!(view.file_name.as_deref(), Some("second.jpg"));
    assert!(view.error.is_none());
}

/// 接続できない場合は通信失敗の固定文言、リセットで回復できる
#[tokio::test]
async fn test_transport_failure_then_reset() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    // ポートを確保してすぐ閉じる
    let closed = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = closed.local_addr().expect("addr");
    drop(closed);

    let analyzer = HttpAnalyzer::new(&format!("http://{addr}"), Duration::from_secs(5)).expect("client");
    let workflow = Workflow::new(analyzer);

    workflow.select_image(jpeg("arm.jpg"));
    assert_eq!(workflow.submit().await.expect("submit"), Outcome::Applied);

    let view = workflow.view();
    assert_eq!(view.mode, WorkflowMode::Failed);
    assert_eq!(
        view.error.as_deref(),
        Some("Failed to analyze image. Please try again.")
    );
    assert!(view.can_submit);

    workflow.reset();
    assert_eq!(workflow.state(), WorkflowState::Idle);
}

/// 失敗後の再送信は同じ画像を送り直し、結果まで進む
#[tokio::test]
async fn test_retry_after_failure_reaches_results() {
    let server = spawn_flaky_mock(ECZEMA_BODY).await;
    let workflow = workflow_for(&server);

    workflow.select_image(jpeg("arm.jpg"));
    assert_eq!(workflow.submit().await.expect("submit"), Outcome::Applied);

    let view = workflow.view();
    assert_eq!(view.mode, WorkflowMode::Failed);
    assert_eq!(view.error.as_deref(), Some("model warming up"));
    assert!(view.can_submit);

    assert_eq!(workflow.submit().await.expect("retry"), Outcome::Applied);

    let view = workflow.view();
    assert_eq!(view.mode, WorkflowMode::ResultsReady);
    assert!(view.error.is_none());
    assert_eq!(view.result.map(|r| r.condition).as_deref(), Some("Eczema"));
    assert_eq!(server.calls(), 2);

    let parts = server.state.parts.lock().await;
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].bytes, parts[1].bytes);
    assert_eq!(parts[1].file_name.as_deref(), Some("arm.jpg"));
}

/// タイムアウトも通信失敗として扱う
#[tokio::test]
async fn test_timeout_is_transport_failure() {
    let server = spawn_mock(StatusCode::OK, ECZEMA_BODY, true).await;
    let analyzer = HttpAnalyzer::new(&server.url, Duration::from_millis(200)).expect("client");
    let workflow = Workflow::new(analyzer);

    workflow.select_image(jpeg("arm.jpg"));
    workflow.submit().await.expect("submit");

    let view = workflow.view();
    assert_eq!(view.mode, WorkflowMode::Failed);
    assert_eq!(
        view.error.as_deref(),
        Some("Failed to analyze image. Please try again.")
    );
    assert_eq!(server.calls(), 1);
}
